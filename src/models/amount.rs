use crate::error::{Result, ViewerError};
use num_bigint::BigInt;
use num_traits::{Signed, ToPrimitive};
use std::fmt;
use std::str::FromStr;

/// Fixed-point asset amount as the node prints it, e.g. `"1.000 GBG"`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Amount {
    units: BigInt,
    precision: u32,
    symbol: String,
}

impl Amount {
    pub fn parse(raw: &str) -> Result<Self> {
        let invalid = || ViewerError::InvalidAmount(raw.to_string());
        let mut parts = raw.split_whitespace();
        let number = parts.next().ok_or_else(invalid)?;
        let symbol = parts.next().ok_or_else(invalid)?;
        if parts.next().is_some() {
            return Err(invalid());
        }

        let (whole, fraction) = number.split_once('.').unwrap_or((number, ""));
        if !fraction.chars().all(|c| c.is_ascii_digit()) {
            return Err(invalid());
        }
        let units = BigInt::from_str(&format!("{}{}", whole, fraction)).map_err(|_| invalid())?;

        Ok(Self {
            units,
            precision: fraction.len() as u32,
            symbol: symbol.to_string(),
        })
    }

    pub fn to_f64(&self) -> f64 {
        self.units.to_f64().unwrap_or(0.0) / 10f64.powi(self.precision as i32)
    }

    fn rescaled(&self, precision: u32) -> BigInt {
        &self.units * BigInt::from(10).pow(precision - self.precision)
    }

    pub fn checked_add(&self, other: &Amount) -> Result<Amount> {
        if self.symbol != other.symbol {
            return Err(ViewerError::CurrencyMismatch {
                left: self.to_string(),
                right: other.to_string(),
            });
        }
        let precision = self.precision.max(other.precision);
        Ok(Amount {
            units: self.rescaled(precision) + other.rescaled(precision),
            precision,
            symbol: self.symbol.clone(),
        })
    }
}

impl fmt::Display for Amount {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let sign = if self.units.is_negative() { "-" } else { "" };
        let digits = self.units.abs().to_string();
        if self.precision == 0 {
            return write!(f, "{}{} {}", sign, digits, self.symbol);
        }
        let precision = self.precision as usize;
        let digits = format!("{:0>width$}", digits, width = precision + 1);
        let (whole, fraction) = digits.split_at(digits.len() - precision);
        write!(f, "{}{}.{} {}", sign, whole, fraction, self.symbol)
    }
}
