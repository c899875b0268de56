// -------------------------------------------------------------------------------------------------
//  Copyright (C) 2015-2025 Nautech Systems Pty Ltd. All rights reserved.
//  https://nautechsystems.io
//
//  Licensed under the GNU Lesser General Public License Version 3.0 (the "License");
//  You may not use this file except in compliance with the License.
//  You may obtain a copy of the License at https://www.gnu.org/licenses/lgpl-3.0.en.html
//
//  Unless required by applicable law or agreed to in writing, software
//  distributed under the License is distributed on an "AS IS" BASIS,
//  WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
//  See the License for the specific language governing permissions and
//  limitations under the License.
// -------------------------------------------------------------------------------------------------

//! Errors associated with monetary values and their configuration.

use std::path::PathBuf;

use strum::Display;
use ustr::Ustr;

/// The reason a currency was refused by a constructor.
#[derive(Copy, Clone, Debug, Display, PartialEq, Eq, Hash)]
#[strum(serialize_all = "snake_case")]
pub enum CurrencyRejection {
    /// No currency was supplied.
    Missing,
    /// The currency code is not present in the currency registry.
    Unknown,
    /// The currency is disallowed by the active [`crate::policy::CurrencyPolicy`].
    Disallowed,
    /// The currency precision differs from the registered currency with the same code.
    PrecisionMismatch,
}

/// Errors raised by [`crate::types::Money`] construction and arithmetic.
///
/// Every failure is a deterministic function of the inputs; nothing here is transient.
#[derive(thiserror::Error, Debug, Clone, PartialEq)]
pub enum MoneyError {
    #[error("Invalid currency '{code}': {reason}")]
    InvalidCurrency {
        code: String,
        reason: CurrencyRejection,
    },
    #[error("Currency mismatch: cannot {operation} {left} and {right}")]
    CurrencyMismatch {
        operation: &'static str,
        left: Ustr,
        right: Ustr,
    },
    #[error("Arithmetic overflow in `Money::{operation}`")]
    ArithmeticOverflow { operation: &'static str },
    #[error("Invalid non-finite value for '{param}', was {value}")]
    NonFiniteAmount { param: &'static str, value: f64 },
}

impl MoneyError {
    pub(crate) fn missing_currency() -> Self {
        Self::InvalidCurrency {
            code: String::new(),
            reason: CurrencyRejection::Missing,
        }
    }

    pub(crate) fn unknown_currency(code: &str) -> Self {
        Self::InvalidCurrency {
            code: code.to_string(),
            reason: CurrencyRejection::Unknown,
        }
    }

    pub(crate) fn disallowed_currency(code: Ustr) -> Self {
        Self::InvalidCurrency {
            code: code.to_string(),
            reason: CurrencyRejection::Disallowed,
        }
    }

    pub(crate) fn precision_mismatch(code: Ustr) -> Self {
        Self::InvalidCurrency {
            code: code.to_string(),
            reason: CurrencyRejection::PrecisionMismatch,
        }
    }

    pub(crate) const fn overflow(operation: &'static str) -> Self {
        Self::ArithmeticOverflow { operation }
    }
}

/// Errors raised while loading or applying a [`crate::config::MoneyConfig`].
#[derive(thiserror::Error, Debug)]
pub enum ConfigError {
    #[error("Failed to read config file '{path}': {source}")]
    ReadFile {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("Failed to parse config: {0}")]
    Parse(#[from] toml::de::Error),
    #[error("Invalid currency definition for '{code}': {reason}")]
    InvalidCurrency { code: String, reason: String },
    #[error("Currency registry error: {0}")]
    Registry(String),
    #[error("A process-wide currency policy is already installed")]
    PolicyAlreadyInstalled,
}

#[cfg(test)]
mod tests {
    use rstest::rstest;

    use super::*;

    #[rstest]
    fn test_invalid_currency_display() {
        let err = MoneyError::disallowed_currency(Ustr::from("RUB"));
        assert_eq!(err.to_string(), "Invalid currency 'RUB': disallowed");

        let err = MoneyError::missing_currency();
        assert_eq!(err.to_string(), "Invalid currency '': missing");

        let err = MoneyError::unknown_currency("XYZ");
        assert_eq!(err.to_string(), "Invalid currency 'XYZ': unknown");

        let err = MoneyError::precision_mismatch(Ustr::from("USD"));
        assert_eq!(err.to_string(), "Invalid currency 'USD': precision_mismatch");
    }

    #[rstest]
    fn test_currency_mismatch_display() {
        let err = MoneyError::CurrencyMismatch {
            operation: "add",
            left: Ustr::from("RUR"),
            right: Ustr::from("USD"),
        };
        assert_eq!(err.to_string(), "Currency mismatch: cannot add RUR and USD");
    }

    #[rstest]
    fn test_overflow_display() {
        let err = MoneyError::overflow("negate");
        assert_eq!(err.to_string(), "Arithmetic overflow in `Money::negate`");
    }
}
