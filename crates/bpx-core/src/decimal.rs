//! Precision-safe decimal types for trading.
//!
//! Uses `rust_decimal` for exact decimal arithmetic. Prices and sizes arrive
//! from the exchange as decimal strings and must be echoed back without
//! floating-point artifacts.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Generates a `Decimal` newtype that serializes as a decimal string.
macro_rules! decimal_newtype {
    ($(#[$meta:meta])* $name:ident) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
        #[serde(transparent)]
        pub struct $name(pub Decimal);

        impl $name {
            pub const ZERO: Self = Self(Decimal::ZERO);

            #[inline]
            pub fn new(value: Decimal) -> Self {
                Self(value)
            }

            #[inline]
            pub fn inner(&self) -> Decimal {
                self.0
            }

            #[inline]
            pub fn is_zero(&self) -> bool {
                self.0.is_zero()
            }

            /// Strictly greater than zero.
            #[inline]
            pub fn is_positive(&self) -> bool {
                self.0 > Decimal::ZERO
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                fmt::Display::fmt(&self.0, f)
            }
        }

        impl FromStr for $name {
            type Err = rust_decimal::Error;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                s.trim().parse().map(Self)
            }
        }

        impl From<Decimal> for $name {
            fn from(value: Decimal) -> Self {
                Self(value)
            }
        }
    };
}

decimal_newtype! {
    /// Limit price, kept at the scale the exchange sent it with.
    Price
}

decimal_newtype! {
    /// Order-book level quantity.
    Size
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_price_display_keeps_exchange_scale() {
        let price: Price = "143.250".parse().unwrap();
        assert_eq!(price.to_string(), "143.250");
        assert_eq!(price.inner(), dec!(143.25));
    }

    #[test]
    fn test_price_deserializes_from_string() {
        let price: Price = serde_json::from_str("\"0.0012\"").unwrap();
        assert_eq!(price, Price::new(dec!(0.0012)));
        assert!(price.is_positive());
    }

    #[test]
    fn test_size_zero() {
        assert!(Size::ZERO.is_zero());
        assert!(!Size::ZERO.is_positive());
        assert!(Size::new(dec!(0.5)).is_positive());
    }
}
