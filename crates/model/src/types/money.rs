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

//! Represents an amount of money in a specified currency denomination.
//!
//! A [`Money`] stores its amount as a raw `i64` scaled by `10^precision` of its currency
//! (kopecks for `RUR`, cents for `USD`). All arithmetic happens on the raw integer and is
//! checked: overflow is reported as [`MoneyError::ArithmeticOverflow`] rather than wrapping.

use std::{
    cmp::Ordering,
    fmt::{Debug, Display},
};

use monetary_core::{
    correctness::check_finite_f64,
    math::{ceil_to_multiple, pow10_i64, round_half_away_from_zero},
};
use rust_decimal::{
    Decimal, RoundingStrategy,
    prelude::{FromPrimitive, ToPrimitive},
};
use serde::{Deserialize, Serialize};

use crate::{
    error::MoneyError,
    policy::CurrencyPolicy,
    record::MoneyRecord,
    types::Currency,
};

/// The raw fixed-point representation of a money amount.
pub type MoneyRaw = i64;

/// Represents an amount of money in a specified currency denomination.
///
/// Values are immutable: every operation returns a new instance. Two values are equal
/// if and only if both the raw amount and the currency are equal, and the hash covers both.
///
/// Ordering is only defined within a single currency, so [`PartialOrd::partial_cmp`]
/// returns `None` for values in different currencies. Use [`Money::compare_to`] to get
/// an explicit [`MoneyError::CurrencyMismatch`] instead.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(into = "MoneyRecord", try_from = "MoneyRecord")]
pub struct Money {
    raw: MoneyRaw,
    currency: Currency,
}

impl Money {
    /// Creates a new [`Money`] from an amount in major units.
    ///
    /// The raw amount is `amount * 10^precision` rounded to the nearest integer,
    /// with ties rounded away from zero.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - `currency` is refused by the process-wide [`CurrencyPolicy`].
    /// - `currency` has a different precision from the registered currency of the same code.
    /// - `amount` is NaN or infinite.
    /// - The scaled amount does not fit in a [`MoneyRaw`].
    pub fn from_major_units(amount: f64, currency: Currency) -> Result<Self, MoneyError> {
        let currency = validate_currency(currency)?;
        check_finite_amount(amount, "amount")?;

        #[allow(clippy::cast_precision_loss, reason = "scale factor is at most 10^9")]
        let scaled = amount * currency.scale_factor() as f64;
        let raw = round_half_away_from_zero(scaled)
            .ok_or(MoneyError::overflow("from_major_units"))?;
        Ok(Self { raw, currency })
    }

    /// Creates a new [`Money`] from a whole number of major units, scaled exactly.
    ///
    /// # Errors
    ///
    /// Returns an error if `currency` is refused or the scaled amount overflows.
    pub fn from_integer_major_units(amount: i64, currency: Currency) -> Result<Self, MoneyError> {
        let currency = validate_currency(currency)?;
        let raw = amount
            .checked_mul(currency.scale_factor())
            .ok_or(MoneyError::overflow("from_integer_major_units"))?;
        Ok(Self { raw, currency })
    }

    /// Creates a new [`Money`] from an exact decimal amount in major units.
    ///
    /// The decimal is scaled by `10^precision` exactly and then truncated toward zero,
    /// so digits beyond the currency precision are dropped rather than rounded
    /// (`1.239 RUR` becomes 123 kopecks).
    ///
    /// # Errors
    ///
    /// Returns an error if `currency` is refused or the scaled amount overflows.
    pub fn from_decimal(amount: Decimal, currency: Currency) -> Result<Self, MoneyError> {
        let currency = validate_currency(currency)?;
        let raw = amount
            .checked_mul(Decimal::from(currency.scale_factor()))
            .and_then(|scaled| scaled.trunc().to_i64())
            .ok_or(MoneyError::overflow("from_decimal"))?;
        Ok(Self { raw, currency })
    }

    /// Creates a new [`Money`] from an already scaled `raw` amount.
    ///
    /// # Errors
    ///
    /// Returns an error if `currency` is refused by the process-wide [`CurrencyPolicy`]
    /// or its precision differs from the registered currency of the same code.
    pub fn from_raw(raw: MoneyRaw, currency: Currency) -> Result<Self, MoneyError> {
        let currency = validate_currency(currency)?;
        Ok(Self { raw, currency })
    }

    /// Creates a new [`Money`] from a `raw` amount and a currency `code` looked up in the registry.
    ///
    /// # Errors
    ///
    /// Returns [`MoneyError::InvalidCurrency`] if `code` is empty, unknown, or refused.
    pub fn from_raw_code(raw: MoneyRaw, code: &str) -> Result<Self, MoneyError> {
        if code.is_empty() {
            return Err(MoneyError::missing_currency());
        }
        let currency =
            Currency::try_from_str(code).ok_or_else(|| MoneyError::unknown_currency(code))?;
        Self::from_raw(raw, currency)
    }

    /// Creates a new [`Money`] instance with a value of zero in the given `currency`.
    ///
    /// # Errors
    ///
    /// Returns an error if `currency` is refused by the process-wide [`CurrencyPolicy`].
    pub fn zero(currency: Currency) -> Result<Self, MoneyError> {
        Self::from_raw(0, currency)
    }

    /// Creates a new [`Money`] in US dollars.
    ///
    /// # Errors
    ///
    /// See [`Money::from_major_units`].
    pub fn dollars(amount: f64) -> Result<Self, MoneyError> {
        Self::from_major_units(amount, Currency::USD())
    }

    /// Creates a new [`Money`] in domestic rubles (`RUR`).
    ///
    /// # Errors
    ///
    /// See [`Money::from_major_units`].
    pub fn rubles(amount: f64) -> Result<Self, MoneyError> {
        Self::from_major_units(amount, Currency::RUR())
    }

    /// Creates a new [`Money`] in domestic rubles (`RUR`) from a number of kopecks.
    ///
    /// # Errors
    ///
    /// See [`Money::from_raw`].
    pub fn kopecks(amount: i64) -> Result<Self, MoneyError> {
        Self::from_raw(amount, Currency::RUR())
    }

    /// Returns the raw fixed-point amount, in minor units of the currency.
    #[must_use]
    pub const fn raw(&self) -> MoneyRaw {
        self.raw
    }

    /// Returns the currency denomination.
    #[must_use]
    pub const fn currency(&self) -> Currency {
        self.currency
    }

    /// Returns the amount in major units as an exact `Decimal`.
    #[must_use]
    pub fn as_decimal(&self) -> Decimal {
        Decimal::new(self.raw, u32::from(self.currency.precision()))
    }

    /// Returns the amount in major units as an `f64`.
    ///
    /// This is lossy for large amounts and must not feed back into money arithmetic.
    #[must_use]
    #[allow(clippy::cast_precision_loss)]
    pub fn as_f64(&self) -> f64 {
        self.raw as f64 / self.currency.scale_factor() as f64
    }

    /// Returns `true` if the value of this instance is zero.
    #[must_use]
    pub const fn is_zero(&self) -> bool {
        self.raw == 0
    }

    /// Returns `true` if the value of this instance is greater than zero.
    #[must_use]
    pub const fn is_positive(&self) -> bool {
        self.raw > 0
    }

    /// Returns `true` if the value of this instance is less than zero.
    #[must_use]
    pub const fn is_negative(&self) -> bool {
        self.raw < 0
    }

    /// Returns the sum of this amount and `other`.
    ///
    /// # Errors
    ///
    /// Returns an error if the currencies differ or the sum overflows.
    #[allow(clippy::should_implement_trait, reason = "fallible, returns a `Result`")]
    pub fn add(&self, other: &Self) -> Result<Self, MoneyError> {
        self.check_same_currency("add", other)?;
        let raw = self
            .raw
            .checked_add(other.raw)
            .ok_or(MoneyError::overflow("add"))?;
        Ok(self.with_raw(raw))
    }

    /// Returns the difference of this amount and `other`.
    ///
    /// # Errors
    ///
    /// Returns an error if the currencies differ or the difference overflows.
    pub fn subtract(&self, other: &Self) -> Result<Self, MoneyError> {
        self.check_same_currency("subtract", other)?;
        let raw = self
            .raw
            .checked_sub(other.raw)
            .ok_or(MoneyError::overflow("subtract"))?;
        Ok(self.with_raw(raw))
    }

    /// Returns this amount multiplied by `scalar`.
    ///
    /// The product is computed in decimal from the exact raw amount and the decimal form
    /// of `scalar`, then rounded to the nearest integer with ties away from
    /// zero, so one kopeck times 2.5 is three kopecks.
    ///
    /// # Errors
    ///
    /// Returns an error if `scalar` is not finite or the product overflows.
    pub fn multiply(&self, scalar: f64) -> Result<Self, MoneyError> {
        check_finite_amount(scalar, "scalar")?;

        let raw = Decimal::from_f64(scalar)
            .and_then(|scalar| Decimal::from(self.raw).checked_mul(scalar))
            .map(|product| {
                product.round_dp_with_strategy(0, RoundingStrategy::MidpointAwayFromZero)
            })
            .and_then(|product| product.to_i64())
            .ok_or(MoneyError::overflow("multiply"))?;
        Ok(self.with_raw(raw))
    }

    /// Returns this amount with its sign flipped.
    ///
    /// # Errors
    ///
    /// Returns an error if the raw amount is [`MoneyRaw::MIN`].
    pub fn negate(&self) -> Result<Self, MoneyError> {
        let raw = self
            .raw
            .checked_neg()
            .ok_or(MoneyError::overflow("negate"))?;
        Ok(self.with_raw(raw))
    }

    /// Returns the absolute value of this amount.
    ///
    /// # Errors
    ///
    /// Returns an error if the raw amount is [`MoneyRaw::MIN`].
    pub fn abs(&self) -> Result<Self, MoneyError> {
        let raw = self
            .raw
            .checked_abs()
            .ok_or(MoneyError::overflow("abs"))?;
        Ok(self.with_raw(raw))
    }

    /// Rounds this amount up (toward positive infinity) to a multiple of `10^n` major units.
    ///
    /// `n = 0` rounds up to whole major units, `n = 1` to tens, `n = 3` to thousands.
    /// Negative amounts move toward zero: `-12.34 RUR` rounded with `n = 0` is `-12.00 RUR`.
    ///
    /// # Errors
    ///
    /// Returns an error if the multiple or the rounded amount does not fit in a [`MoneyRaw`].
    pub fn round_up(&self, n: u32) -> Result<Self, MoneyError> {
        let raw = n
            .checked_add(u32::from(self.currency.precision()))
            .and_then(pow10_i64)
            .and_then(|multiple| ceil_to_multiple(self.raw, multiple))
            .ok_or(MoneyError::overflow("round_up"))?;
        Ok(self.with_raw(raw))
    }

    /// Compares this amount with `other`.
    ///
    /// # Errors
    ///
    /// Returns [`MoneyError::CurrencyMismatch`] if the currencies differ.
    pub fn compare_to(&self, other: &Self) -> Result<Ordering, MoneyError> {
        self.check_same_currency("compare", other)?;
        Ok(self.raw.cmp(&other.raw))
    }

    /// Returns whether this amount and `other` share a currency and so can be compared.
    #[must_use]
    pub fn can_compare(&self, other: &Self) -> bool {
        self.currency == other.currency
    }

    /// Returns whether this amount is strictly greater than `other`.
    ///
    /// # Errors
    ///
    /// Returns [`MoneyError::CurrencyMismatch`] if the currencies differ.
    pub fn greater_than(&self, other: &Self) -> Result<bool, MoneyError> {
        Ok(self.compare_to(other)?.is_gt())
    }

    /// Currency validation already happened when `self` was built.
    const fn with_raw(&self, raw: MoneyRaw) -> Self {
        Self {
            raw,
            currency: self.currency,
        }
    }

    fn check_same_currency(&self, operation: &'static str, other: &Self) -> Result<(), MoneyError> {
        if self.currency != other.currency {
            return Err(MoneyError::CurrencyMismatch {
                operation,
                left: self.currency.code(),
                right: other.currency.code(),
            });
        }
        Ok(())
    }
}

/// Applies the process-wide [`CurrencyPolicy`] and rejects a `currency` whose precision
/// disagrees with the registered currency of the same code.
fn validate_currency(currency: Currency) -> Result<Currency, MoneyError> {
    let currency = CurrencyPolicy::global().validate(Some(currency))?;
    match Currency::try_from_str(currency.code().as_str()) {
        Some(registered) if registered.precision() != currency.precision() => {
            Err(MoneyError::precision_mismatch(currency.code()))
        }
        _ => Ok(currency),
    }
}

fn check_finite_amount(value: f64, param: &'static str) -> Result<(), MoneyError> {
    check_finite_f64(value, param).map_err(|_| MoneyError::NonFiniteAmount { param, value })
}

impl PartialOrd for Money {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        if self.can_compare(other) {
            Some(self.raw.cmp(&other.raw))
        } else {
            None
        }
    }
}

impl Debug for Money {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{}({}, {})",
            stringify!(Money),
            self.as_decimal(),
            self.currency
        )
    }
}

impl Display for Money {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} {}", self.as_decimal(), self.currency)
    }
}


////////////////////////////////////////////////////////////////////////////////
// Property-based testing
////////////////////////////////////////////////////////////////////////////////
#[cfg(test)]
mod property_tests {
    use proptest::prelude::*;
    use rstest::rstest;

    use super::*;

    fn currency_strategy() -> impl Strategy<Value = Currency> {
        prop_oneof![
            Just(Currency::USD()),
            Just(Currency::RUR()),
            Just(Currency::EUR()),
            Just(Currency::JPY()),
            Just(Currency::KWD()),
            Just(Currency::BTC()),
        ]
    }

    fn raw_strategy() -> impl Strategy<Value = MoneyRaw> {
        prop_oneof![
            8 => -1_000_000_000_000_000_i64..1_000_000_000_000_000_i64,
            1 => Just(0),
            1 => -1_000_i64..1_000_i64,
        ]
    }

    fn money_strategy() -> impl Strategy<Value = Money> {
        (raw_strategy(), currency_strategy())
            .prop_map(|(raw, currency)| Money::from_raw(raw, currency).unwrap())
    }

    proptest! {
        #[rstest]
        fn prop_from_raw_roundtrip(money in money_strategy()) {
            let rebuilt = Money::from_raw(money.raw(), money.currency()).unwrap();
            prop_assert_eq!(rebuilt.raw(), money.raw());
            prop_assert_eq!(rebuilt, money);
        }

        #[rstest]
        fn prop_from_major_units_matches_rounded_scaling(
            amount in -1_000_000_000.0_f64..1_000_000_000.0_f64,
            currency in currency_strategy(),
        ) {
            let money = Money::from_major_units(amount, currency).unwrap();
            let expected = (amount * currency.scale_factor() as f64).round() as i64;
            prop_assert_eq!(money.raw(), expected);
            prop_assert_eq!(money.currency(), currency);
        }

        #[rstest]
        fn prop_add_then_subtract_is_identity(a in money_strategy(), b_raw in raw_strategy()) {
            let b = Money::from_raw(b_raw, a.currency()).unwrap();
            let sum = a.add(&b).unwrap();
            prop_assert_eq!(sum, b.add(&a).unwrap());
            prop_assert_eq!(sum.subtract(&b).unwrap(), a);
        }

        #[rstest]
        fn prop_negate_is_involution(money in money_strategy()) {
            prop_assert_eq!(money.negate().unwrap().negate().unwrap(), money);
        }

        #[rstest]
        fn prop_compare_matches_raw_ordering(a in money_strategy(), b_raw in raw_strategy()) {
            let b = Money::from_raw(b_raw, a.currency()).unwrap();
            prop_assert_eq!(a.compare_to(&b).unwrap(), a.raw().cmp(&b.raw()));
            prop_assert_eq!(a.partial_cmp(&b), Some(a.raw().cmp(&b.raw())));
            prop_assert_eq!(a.greater_than(&b).unwrap(), a.raw() > b.raw());
        }

        #[rstest]
        fn prop_round_up_is_ceiling_to_multiple(money in money_strategy(), n in 0_u32..4) {
            let multiple = 10_i64.pow(n + u32::from(money.currency().precision()));
            let rounded = money.round_up(n).unwrap();

            prop_assert_eq!(rounded.currency(), money.currency());
            prop_assert!(rounded.raw() >= money.raw());
            prop_assert!(rounded.raw() - money.raw() < multiple);
            prop_assert_eq!(rounded.raw().rem_euclid(multiple), 0);
        }

        #[rstest]
        fn prop_mixed_currencies_never_combine(a in money_strategy(), b in money_strategy()) {
            if a.currency() != b.currency() {
                prop_assert!(!a.can_compare(&b));
                let is_mismatch = |result: Result<Money, MoneyError>| {
                    matches!(result, Err(MoneyError::CurrencyMismatch { .. }))
                };
                prop_assert!(is_mismatch(a.add(&b)));
                prop_assert!(is_mismatch(a.subtract(&b)));
                prop_assert!(a.compare_to(&b).is_err());
                prop_assert_ne!(a, b);
            }
        }
    }
}
