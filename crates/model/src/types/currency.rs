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

//! Represents a medium of exchange in a specified denomination with a fixed decimal precision.
//!
//! Handles up to [`MAX_CURRENCY_PRECISION`] decimals of precision.

use std::{
    fmt::{Debug, Display, Formatter},
    hash::{Hash, Hasher},
    str::FromStr,
};

use monetary_core::{
    MUTEX_POISONED,
    correctness::{
        FAILED, check_in_range_inclusive_u8, check_nonempty_string, check_valid_string_ascii,
    },
};
use serde::{Deserialize, Serialize, Serializer};
use ustr::Ustr;

use crate::{currencies::CURRENCY_MAP, enums::CurrencyType};

/// The maximum number of fractional digits a currency may declare.
///
/// At this precision one major unit is `10^9` raw units, which still leaves over nine
/// billion major units of headroom in an `i64` raw amount.
pub const MAX_CURRENCY_PRECISION: u8 = 9;

/// Powers of ten indexed by precision, i.e. the raw units in one major unit.
const SCALE_FACTORS: [i64; MAX_CURRENCY_PRECISION as usize + 1] = [
    1,
    10,
    100,
    1_000,
    10_000,
    100_000,
    1_000_000,
    10_000_000,
    100_000_000,
    1_000_000_000,
];

/// Checks if a given `precision` value is within the allowed currency precision range.
///
/// # Errors
///
/// Returns an error if `precision` exceeds [`MAX_CURRENCY_PRECISION`].
pub fn check_currency_precision(precision: u8) -> anyhow::Result<()> {
    check_in_range_inclusive_u8(precision, 0, MAX_CURRENCY_PRECISION, "precision")
}

/// Represents a medium of exchange in a specified denomination with a fixed decimal precision.
///
/// Equality and hashing consider the `code` and `precision`, since the precision fixes the
/// scale of every raw amount denominated in the currency.
#[derive(Clone, Copy, Eq)]
pub struct Currency {
    pub(crate) code: Ustr,
    pub(crate) precision: u8,
    pub(crate) iso4217: u16,
    pub(crate) name: Ustr,
    pub(crate) currency_type: CurrencyType,
}

impl Currency {
    /// Creates a new [`Currency`] instance with correctness checking.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - `code` is not a valid ASCII alphanumeric string.
    /// - `name` is the empty string.
    /// - `precision` is invalid outside the valid representable range [0, MAX_CURRENCY_PRECISION].
    pub fn new_checked<T: AsRef<str>>(
        code: T,
        precision: u8,
        iso4217: u16,
        name: T,
        currency_type: CurrencyType,
    ) -> anyhow::Result<Self> {
        let code = code.as_ref();
        let name = name.as_ref();
        check_valid_string_ascii(code, "code")?;
        check_nonempty_string(name, "name")?;
        check_currency_precision(precision)?;
        Ok(Self {
            code: Ustr::from(code),
            precision,
            iso4217,
            name: Ustr::from(name),
            currency_type,
        })
    }

    /// Creates a new [`Currency`] instance.
    ///
    /// # Panics
    ///
    /// Panics if a correctness check fails. See [`Currency::new_checked`] for more details.
    pub fn new<T: AsRef<str>>(
        code: T,
        precision: u8,
        iso4217: u16,
        name: T,
        currency_type: CurrencyType,
    ) -> Self {
        Self::new_checked(code, precision, iso4217, name, currency_type).expect(FAILED)
    }

    /// The currency code as an alpha-3 string (e.g., "USD", "RUR").
    #[must_use]
    pub fn code(&self) -> Ustr {
        self.code
    }

    /// The number of fractional digits (the scale of a raw amount).
    #[must_use]
    pub const fn precision(&self) -> u8 {
        self.precision
    }

    /// The ISO 4217 numeric code (zero for non-ISO currencies).
    #[must_use]
    pub const fn iso4217(&self) -> u16 {
        self.iso4217
    }

    /// The full name of the currency.
    #[must_use]
    pub fn name(&self) -> Ustr {
        self.name
    }

    /// The currency type, indicating its category (e.g. Fiat, Crypto).
    #[must_use]
    pub const fn currency_type(&self) -> CurrencyType {
        self.currency_type
    }

    /// Returns the number of raw units in one major unit, i.e. `10^precision`.
    #[must_use]
    pub const fn scale_factor(&self) -> i64 {
        SCALE_FACTORS[self.precision as usize]
    }

    /// Register the given `currency` in the internal currency map.
    ///
    /// - If `overwrite` is `true`, any existing currency will be replaced.
    /// - If `overwrite` is `false` and the currency already exists, the operation is a no-op.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - There is a failure acquiring the lock on the currency map.
    /// - `overwrite` is `true` and the registered currency has a different precision.
    pub fn register(currency: Self, overwrite: bool) -> anyhow::Result<()> {
        let mut map = CURRENCY_MAP
            .lock()
            .map_err(|e| anyhow::anyhow!("{MUTEX_POISONED}: {e}"))?;

        if let Some(existing) = map.get(currency.code.as_str()) {
            if !overwrite {
                return Ok(());
            }
            if existing.precision != currency.precision {
                anyhow::bail!(
                    "Cannot change precision of registered currency {} from {} to {}",
                    currency.code,
                    existing.precision,
                    currency.precision,
                );
            }
        }

        log::debug!("Registering currency {currency:?}");
        map.insert(currency.code.to_string(), currency);
        Ok(())
    }

    /// Attempts to parse a [`Currency`] from a string, returning `None` if not found.
    pub fn try_from_str(s: &str) -> Option<Self> {
        let map_guard = CURRENCY_MAP.lock().ok()?;
        map_guard.get(s).copied()
    }
}

impl PartialEq for Currency {
    fn eq(&self, other: &Self) -> bool {
        self.code == other.code && self.precision == other.precision
    }
}

impl Hash for Currency {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.code.hash(state);
        self.precision.hash(state);
    }
}

impl Debug for Currency {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{}(code='{}', precision={}, iso4217={}, name='{}', currency_type={})",
            stringify!(Currency),
            self.code,
            self.precision,
            self.iso4217,
            self.name,
            self.currency_type,
        )
    }
}

impl Display for Currency {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.code)
    }
}

impl FromStr for Currency {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> anyhow::Result<Self> {
        let map_guard = CURRENCY_MAP
            .lock()
            .map_err(|e| anyhow::anyhow!("Failed to acquire lock on `CURRENCY_MAP`: {e}"))?;
        map_guard
            .get(s)
            .copied()
            .ok_or_else(|| anyhow::anyhow!("Unknown currency: {s}"))
    }
}

impl Serialize for Currency {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        self.code.serialize(serializer)
    }
}

impl<'de> Deserialize<'de> for Currency {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let currency_str: String = Deserialize::deserialize(deserializer)?;
        Self::from_str(&currency_str).map_err(serde::de::Error::custom)
    }
}

////////////////////////////////////////////////////////////////////////////////
// Tests
////////////////////////////////////////////////////////////////////////////////
#[cfg(test)]
mod tests {
    use std::{collections::HashSet, str::FromStr};

    use rstest::rstest;

    use super::*;

    #[rstest]
    fn test_debug() {
        let currency = Currency::RUR();
        assert_eq!(
            format!("{currency:?}"),
            "Currency(code='RUR', precision=2, iso4217=810, name='Russian ruble (domestic)', currency_type=FIAT)"
        );
    }

    #[rstest]
    fn test_display() {
        assert_eq!(format!("{}", Currency::USD()), "USD");
    }

    #[rstest]
    #[should_panic(expected = "code")]
    fn test_invalid_currency_code() {
        let _ = Currency::new("", 2, 840, "United States dollar", CurrencyType::Fiat);
    }

    #[rstest]
    #[should_panic(expected = "name")]
    fn test_empty_currency_name() {
        let _ = Currency::new("USD", 2, 840, "", CurrencyType::Fiat);
    }

    #[rstest]
    #[should_panic(expected = "precision")]
    fn test_invalid_precision() {
        let _ = Currency::new("USD", 10, 840, "United States dollar", CurrencyType::Fiat);
    }

    #[rstest]
    #[case(0, 1)]
    #[case(2, 100)]
    #[case(3, 1_000)]
    #[case(MAX_CURRENCY_PRECISION, 1_000_000_000)]
    fn test_scale_factor(#[case] precision: u8, #[case] expected: i64) {
        let currency = Currency::new("SCALE", precision, 0, "Scale test", CurrencyType::Fiat);
        assert_eq!(currency.scale_factor(), expected);
    }

    #[rstest]
    fn test_register_no_overwrite() {
        let currency1 = Currency::new("TESTA", 2, 999, "Test Currency A", CurrencyType::Fiat);
        Currency::register(currency1, false).unwrap();

        let currency2 = Currency::new("TESTA", 2, 999, "Test Currency A2", CurrencyType::Fiat);
        Currency::register(currency2, false).unwrap();

        let found = Currency::try_from_str("TESTA").unwrap();
        assert_eq!(found.name().as_str(), "Test Currency A");
    }

    #[rstest]
    fn test_register_with_overwrite() {
        let currency1 = Currency::new("TESTB", 2, 998, "Test Currency B", CurrencyType::Fiat);
        Currency::register(currency1, false).unwrap();

        let currency2 = Currency::new("TESTB", 2, 998, "Test Currency B2", CurrencyType::Fiat);
        Currency::register(currency2, true).unwrap();

        let found = Currency::try_from_str("TESTB").unwrap();
        assert_eq!(found.name().as_str(), "Test Currency B2");
        assert_eq!(found.precision(), 2);
    }

    #[rstest]
    fn test_register_overwrite_refuses_precision_change() {
        let currency1 = Currency::new("TESTC", 2, 997, "Test Currency C", CurrencyType::Fiat);
        Currency::register(currency1, false).unwrap();

        let currency2 = Currency::new("TESTC", 3, 997, "Test Currency C3", CurrencyType::Fiat);
        let err = Currency::register(currency2, true).unwrap_err();
        assert!(err.to_string().contains("from 2 to 3"));

        let found = Currency::try_from_str("TESTC").unwrap();
        assert_eq!(found.precision(), 2);
        assert_eq!(found.name().as_str(), "Test Currency C");
    }

    #[rstest]
    fn test_register_overwrite_refuses_builtin_precision_change() {
        let rur3 = Currency::new("RUR", 3, 810, "Russian ruble", CurrencyType::Fiat);
        assert!(Currency::register(rur3, true).is_err());
        assert_eq!(Currency::try_from_str("RUR").unwrap().precision(), 2);
    }

    #[rstest]
    fn test_new_for_fiat() {
        let currency = Currency::new("AUD", 2, 36, "Australian dollar", CurrencyType::Fiat);
        assert_eq!(currency.code().as_str(), "AUD");
        assert_eq!(currency.precision(), 2);
        assert_eq!(currency.iso4217(), 36);
        assert_eq!(currency.name().as_str(), "Australian dollar");
        assert_eq!(currency.currency_type(), CurrencyType::Fiat);
    }

    #[rstest]
    fn test_try_from_str_invalid() {
        assert!(Currency::try_from_str("INVALID").is_none());
    }

    #[rstest]
    fn test_from_str_unknown() {
        let err = Currency::from_str("NOPE").unwrap_err();
        assert_eq!(err.to_string(), "Unknown currency: NOPE");
    }

    #[rstest]
    fn test_partial_eq_checks_code_and_precision() {
        let c1 = Currency::new("ABC", 2, 999, "Currency ABC", CurrencyType::Fiat);
        let c2 = Currency::new("ABC", 2, 100, "Completely Different", CurrencyType::Crypto);
        let c3 = Currency::new("ABC", 3, 999, "Currency ABC", CurrencyType::Fiat);
        assert_eq!(c1, c2);
        assert_ne!(c1, c3);

        let set: HashSet<Currency> = [c1, c2, c3].into_iter().collect();
        assert_eq!(set.len(), 2);
    }

    #[rstest]
    fn test_domestic_and_international_rubles_differ() {
        assert_ne!(Currency::RUR(), Currency::RUB());
        assert_eq!(Currency::RUR().precision(), Currency::RUB().precision());
    }

    #[rstest]
    fn test_serialization_deserialization() {
        let currency = Currency::USD();
        let serialized = serde_json::to_string(&currency).unwrap();
        assert_eq!(serialized, "\"USD\"");
        let deserialized: Currency = serde_json::from_str(&serialized).unwrap();
        assert_eq!(currency, deserialized);
    }

    #[rstest]
    fn test_deserialize_unknown_code_fails() {
        let result: Result<Currency, _> = serde_json::from_str("\"QQQ\"");
        assert!(result.is_err());
    }
}
