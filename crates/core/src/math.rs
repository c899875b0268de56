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

//! Integer and floating-point helpers for exact fixed-point arithmetic.
//!
//! All helpers are total: instead of wrapping or saturating they return `None` when the
//! result cannot be represented, leaving the caller to decide how to surface the failure.

/// Macro for approximate floating-point equality comparison.
///
/// # Usage
///
/// ```rust
/// use monetary_core::approx_eq;
///
/// let a = 0.1 + 0.2;
/// let b = 0.3;
/// assert!(approx_eq!(f64, a, b, epsilon = 1e-10));
/// ```
#[macro_export]
macro_rules! approx_eq {
    ($type:ty, $left:expr, $right:expr, epsilon = $epsilon:expr) => {{
        let left_val: $type = $left;
        let right_val: $type = $right;
        (left_val - right_val).abs() < $epsilon
    }};
}

/// The lower bound of `i64` as an exactly representable `f64` (-2^63).
const I64_MIN_AS_F64: f64 = -9_223_372_036_854_775_808.0;

/// The exclusive upper bound of `i64` as an exactly representable `f64` (2^63).
const I64_MAX_EXCLUSIVE_AS_F64: f64 = 9_223_372_036_854_775_808.0;

/// Rounds `value` to the nearest integer, with ties rounded away from zero.
///
/// Returns `None` if `value` is not finite or the rounded result lies outside the `i64` range.
#[inline]
#[must_use]
pub fn round_half_away_from_zero(value: f64) -> Option<i64> {
    if !value.is_finite() {
        return None;
    }

    let rounded = value.round();
    if (I64_MIN_AS_F64..I64_MAX_EXCLUSIVE_AS_F64).contains(&rounded) {
        #[allow(clippy::cast_possible_truncation, reason = "range checked above")]
        Some(rounded as i64)
    } else {
        None
    }
}

/// Returns `10^exp` as an `i64`, or `None` on overflow.
#[inline]
#[must_use]
pub fn pow10_i64(exp: u32) -> Option<i64> {
    10_i64.checked_pow(exp)
}

/// Rounds `value` up (toward positive infinity) to the nearest multiple of `multiple`.
///
/// Returns `None` if `multiple` is not positive or the result overflows `i64`.
#[inline]
#[must_use]
pub fn ceil_to_multiple(value: i64, multiple: i64) -> Option<i64> {
    if multiple <= 0 {
        return None;
    }

    let mut quotient = value.div_euclid(multiple);
    if value.rem_euclid(multiple) != 0 {
        quotient = quotient.checked_add(1)?;
    }
    quotient.checked_mul(multiple)
}
