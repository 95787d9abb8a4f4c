use clap::CommandFactory;
use clap_complete::{generate_to, Shell};
use std::env;
use std::io::Error;

include!("src/cli.rs");

fn main() -> Result<(), Error> {
    let outdir = match env::var_os("OUT_DIR") {
        None => return Ok(()),
        Some(outdir) => outdir,
    };

    let mut cmd = Opts::command();

    for shell in [Shell::Bash, Shell::Zsh] {
        let path = generate_to(shell, &mut cmd, "invoicedl", &outdir)?;
        println!("cargo:warning={} completion file is generated: {:?}", shell, path);
    }

    println!("cargo:rerun-if-changed=src/cli.rs");
    println!("cargo:rerun-if-changed=build.rs");

    Ok(())
}
