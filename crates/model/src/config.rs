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

//! Configuration for the currency registry and the process-wide [`CurrencyPolicy`].
//!
//! ```toml
//! disallowed_currencies = ["RUB"]
//!
//! [[currencies]]
//! code = "TND"
//! precision = 3
//! iso4217 = 788
//! name = "Tunisian dinar"
//! currency_type = "FIAT"
//! ```

use std::{collections::HashSet, path::Path};

use serde::{Deserialize, Serialize};

use crate::{
    enums::CurrencyType,
    error::ConfigError,
    policy::{CurrencyPolicy, INTERNATIONAL_RUBLE_CODE},
    types::Currency,
};

/// Definition of an additional currency to register at startup.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct CurrencyConfig {
    /// The currency code (e.g. "TND").
    pub code: String,
    /// The number of fractional digits.
    pub precision: u8,
    /// The ISO 4217 numeric code, zero if none.
    #[serde(default)]
    pub iso4217: u16,
    /// The full name of the currency.
    pub name: String,
    /// The currency category.
    #[serde(default = "default_currency_type")]
    pub currency_type: CurrencyType,
}

const fn default_currency_type() -> CurrencyType {
    CurrencyType::Fiat
}

impl CurrencyConfig {
    /// Builds the validated [`Currency`] described by this definition.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::InvalidCurrency`] if any field fails validation.
    pub fn to_currency(&self) -> Result<Currency, ConfigError> {
        Currency::new_checked(
            self.code.as_str(),
            self.precision,
            self.iso4217,
            self.name.as_str(),
            self.currency_type,
        )
        .map_err(|e| ConfigError::InvalidCurrency {
            code: self.code.clone(),
            reason: e.to_string(),
        })
    }
}

/// Configuration for money construction.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct MoneyConfig {
    /// Currency codes which money constructors refuse.
    pub disallowed_currencies: Vec<String>,
    /// Additional currencies to register on top of the built-in table.
    pub currencies: Vec<CurrencyConfig>,
}

impl Default for MoneyConfig {
    /// Creates a new default [`MoneyConfig`] instance, refusing only the international ruble.
    fn default() -> Self {
        Self {
            disallowed_currencies: vec![INTERNATIONAL_RUBLE_CODE.to_string()],
            currencies: Vec::new(),
        }
    }
}

impl MoneyConfig {
    /// Parses a [`MoneyConfig`] from a TOML string.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Parse`] if the TOML is malformed or contains unknown fields.
    pub fn from_toml_str(s: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(s)?)
    }

    /// Reads and parses a [`MoneyConfig`] from the TOML file at `path`.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or parsed.
    pub fn from_path<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let contents = std::fs::read_to_string(path).map_err(|source| ConfigError::ReadFile {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_toml_str(&contents)
    }

    /// Returns the [`CurrencyPolicy`] described by this configuration.
    #[must_use]
    pub fn policy(&self) -> CurrencyPolicy {
        CurrencyPolicy::new(&self.disallowed_currencies)
    }

    /// Validates and returns the additional currencies.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::InvalidCurrency`] if a definition is invalid, a code is
    /// defined more than once, or a definition changes the precision of a registered currency.
    pub fn currencies(&self) -> Result<Vec<Currency>, ConfigError> {
        let mut seen = HashSet::with_capacity(self.currencies.len());
        self.currencies
            .iter()
            .map(|definition| {
                if !seen.insert(definition.code.as_str()) {
                    return Err(ConfigError::InvalidCurrency {
                        code: definition.code.clone(),
                        reason: "defined more than once".to_string(),
                    });
                }

                let currency = definition.to_currency()?;
                if let Some(existing) = Currency::try_from_str(&definition.code)
                    && existing.precision() != currency.precision()
                {
                    return Err(ConfigError::InvalidCurrency {
                        code: definition.code.clone(),
                        reason: format!(
                            "precision {} conflicts with registered precision {}",
                            currency.precision(),
                            existing.precision(),
                        ),
                    });
                }
                Ok(currency)
            })
            .collect()
    }

    /// Installs the policy process-wide and registers the additional currencies.
    ///
    /// Must be called before any money is constructed. Every currency definition is
    /// validated, and the policy installed, before the registry is touched.
    ///
    /// # Errors
    ///
    /// Returns an error if a currency definition is invalid, a process-wide policy is
    /// already installed, or the registry cannot be updated.
    pub fn apply(&self) -> Result<(), ConfigError> {
        let currencies = self.currencies()?;
        CurrencyPolicy::install(self.policy())?;

        for currency in currencies {
            if let Some(existing) = Currency::try_from_str(currency.code().as_str()) {
                log::warn!("Replacing registered currency {existing:?} with {currency:?}");
            }
            Currency::register(currency, true).map_err(|e| ConfigError::Registry(e.to_string()))?;
        }

        for code in &self.disallowed_currencies {
            if Currency::try_from_str(code).is_none() {
                log::warn!("Disallowed currency {code} is not registered");
            }
        }

        Ok(())
    }
}

////////////////////////////////////////////////////////////////////////////////
// Tests
////////////////////////////////////////////////////////////////////////////////
#[cfg(test)]
mod tests {
    use std::io::Write;

    use rstest::rstest;

    use super::*;

    const FULL_CONFIG: &str = r#"
disallowed_currencies = ["RUB", "USD"]

[[currencies]]
code = "TND"
precision = 3
iso4217 = 788
name = "Tunisian dinar"

[[currencies]]
code = "GOLDG"
precision = 4
name = "Gold gram"
currency_type = "COMMODITY_BACKED"
"#;

    #[rstest]
    fn test_default() {
        let config = MoneyConfig::default();
        assert_eq!(config.disallowed_currencies, vec!["RUB".to_string()]);
        assert!(config.currencies.is_empty());
        assert_eq!(config.policy(), CurrencyPolicy::domestic());
    }

    #[rstest]
    fn test_empty_toml_is_default() {
        assert_eq!(MoneyConfig::from_toml_str("").unwrap(), MoneyConfig::default());
    }

    #[rstest]
    fn test_full_config() {
        let config = MoneyConfig::from_toml_str(FULL_CONFIG).unwrap();
        assert_eq!(
            config.policy().disallowed().collect::<Vec<_>>(),
            vec!["RUB", "USD"]
        );

        let currencies = config.currencies().unwrap();
        assert_eq!(currencies.len(), 2);
        assert_eq!(currencies[0].code().as_str(), "TND");
        assert_eq!(currencies[0].precision(), 3);
        assert_eq!(currencies[0].iso4217(), 788);
        assert_eq!(currencies[0].currency_type(), CurrencyType::Fiat);
        assert_eq!(currencies[1].iso4217(), 0);
        assert_eq!(currencies[1].currency_type(), CurrencyType::CommodityBacked);
    }

    #[rstest]
    fn test_permissive_config() {
        let config = MoneyConfig::from_toml_str("disallowed_currencies = []").unwrap();
        assert_eq!(config.policy(), CurrencyPolicy::permissive());
    }

    #[rstest]
    fn test_unknown_field_rejected() {
        let result = MoneyConfig::from_toml_str("forbidden = [\"RUB\"]");
        assert!(matches!(result, Err(ConfigError::Parse(_))));
    }

    #[rstest]
    fn test_invalid_precision_rejected() {
        let config = MoneyConfig::from_toml_str(
            r#"
[[currencies]]
code = "BAD"
precision = 12
name = "Too precise"
"#,
        )
        .unwrap();

        match config.currencies() {
            Err(ConfigError::InvalidCurrency { code, reason }) => {
                assert_eq!(code, "BAD");
                assert!(reason.contains("precision"));
            }
            other => panic!("expected invalid currency, was {other:?}"),
        }
    }

    #[rstest]
    fn test_duplicate_currency_rejected() {
        let config = MoneyConfig::from_toml_str(
            r#"
[[currencies]]
code = "DUP"
precision = 2
name = "Duplicate"

[[currencies]]
code = "DUP"
precision = 3
name = "Duplicate again"
"#,
        )
        .unwrap();

        assert!(matches!(
            config.currencies(),
            Err(ConfigError::InvalidCurrency { code, .. }) if code == "DUP"
        ));
    }

    #[rstest]
    fn test_builtin_precision_redefinition_rejected() {
        let config = MoneyConfig::from_toml_str(
            r#"
[[currencies]]
code = "RUR"
precision = 3
iso4217 = 810
name = "Russian ruble"
"#,
        )
        .unwrap();

        match config.apply() {
            Err(ConfigError::InvalidCurrency { code, reason }) => {
                assert_eq!(code, "RUR");
                assert!(reason.contains("conflicts with registered precision 2"));
            }
            other => panic!("expected invalid currency, was {other:?}"),
        }
        assert_eq!(Currency::try_from_str("RUR").unwrap().precision(), 2);
        assert_eq!(Currency::RUR().precision(), 2);
    }

    #[rstest]
    fn test_apply_after_policy_fixed_leaves_registry_untouched() {
        // Fixes the process-wide policy for this test binary
        let _ = CurrencyPolicy::global();

        let config = MoneyConfig::from_toml_str(
            r#"
[[currencies]]
code = "UNAPPLIED"
precision = 2
name = "Never registered"
"#,
        )
        .unwrap();

        assert!(matches!(
            config.apply(),
            Err(ConfigError::PolicyAlreadyInstalled)
        ));
        assert!(Currency::try_from_str("UNAPPLIED").is_none());
    }

    #[rstest]
    fn test_from_path() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(FULL_CONFIG.as_bytes()).unwrap();

        let config = MoneyConfig::from_path(file.path()).unwrap();
        assert_eq!(config, MoneyConfig::from_toml_str(FULL_CONFIG).unwrap());
    }

    #[rstest]
    fn test_from_missing_path() {
        let result = MoneyConfig::from_path("/nonexistent/monetary.toml");
        assert!(matches!(result, Err(ConfigError::ReadFile { .. })));
    }
}
