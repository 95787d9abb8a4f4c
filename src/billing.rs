use std::fmt;
use std::str::FromStr;

use rust_decimal::Decimal;
use strum_macros::EnumString;

/// Currencies the provider counts in whole units rather than cents.
#[derive(EnumString, Debug, PartialEq, Clone, Copy)]
#[strum(ascii_case_insensitive)]
enum ZeroDecimal {
    Bif,
    Clp,
    Djf,
    Gnf,
    Jpy,
    Kmf,
    Krw,
    Mga,
    Pyg,
    Rwf,
    Ugx,
    Vnd,
    Vuv,
    Xaf,
    Xof,
    Xpf,
}

#[derive(Debug, PartialEq, Clone)]
pub struct Money(String, Decimal);

impl Money {
    pub fn new(currency: &str, amount: Decimal) -> Self {
        Self(currency.to_uppercase(), amount)
    }

    /// Amounts arrive as integers in the currency's smallest unit.
    pub fn from_minor_units(currency: &str, amount: i64) -> Self {
        let scale = if ZeroDecimal::from_str(currency).is_ok() { 0 } else { 2 };
        Self::new(currency, Decimal::new(amount, scale))
    }
}

impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{} {}", self.0, self.1)
    }
}
