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

//! Validation rule deciding which currencies a [`crate::types::Money`] may be denominated in.
//!
//! The default rule is [`CurrencyPolicy::domestic`], which refuses the international ruble
//! code `RUB` so that ruble amounts are always carried as the domestic `RUR`. A different rule
//! can be installed once per process, typically from [`crate::config::MoneyConfig::apply`].

use std::{collections::BTreeSet, sync::OnceLock};

use crate::{
    error::{ConfigError, MoneyError},
    types::Currency,
};

static GLOBAL_POLICY: OnceLock<CurrencyPolicy> = OnceLock::new();

/// The currency code refused by [`CurrencyPolicy::domestic`].
pub const INTERNATIONAL_RUBLE_CODE: &str = "RUB";

/// A set of currency codes which money constructors must refuse.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CurrencyPolicy {
    disallowed: BTreeSet<String>,
}

impl CurrencyPolicy {
    /// Creates a new [`CurrencyPolicy`] refusing each of the given currency `codes`.
    pub fn new<I, S>(codes: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        Self {
            disallowed: codes
                .into_iter()
                .map(|code| code.as_ref().to_string())
                .collect(),
        }
    }

    /// Returns the policy accepting every registered currency except the international ruble.
    #[must_use]
    pub fn domestic() -> Self {
        Self::new([INTERNATIONAL_RUBLE_CODE])
    }

    /// Returns a policy accepting every currency.
    #[must_use]
    pub fn permissive() -> Self {
        Self {
            disallowed: BTreeSet::new(),
        }
    }

    /// Returns whether `currency` may be used to denominate money.
    #[must_use]
    pub fn is_allowed(&self, currency: &Currency) -> bool {
        !self.disallowed.contains(currency.code().as_str())
    }

    /// Returns the refused currency codes in ascending order.
    pub fn disallowed(&self) -> impl Iterator<Item = &str> {
        self.disallowed.iter().map(String::as_str)
    }

    /// Validates an optional `currency` against this policy.
    ///
    /// # Errors
    ///
    /// Returns [`MoneyError::InvalidCurrency`] if `currency` is `None` or is refused.
    pub fn validate(&self, currency: Option<Currency>) -> Result<Currency, MoneyError> {
        let Some(currency) = currency else {
            return Err(MoneyError::missing_currency());
        };

        if !self.is_allowed(&currency) {
            log::warn!("Refused money in disallowed currency {currency}");
            return Err(MoneyError::disallowed_currency(currency.code()));
        }

        Ok(currency)
    }

    /// Returns the process-wide policy, falling back to [`CurrencyPolicy::domestic`].
    ///
    /// The first call fixes the policy for the lifetime of the process.
    pub fn global() -> &'static Self {
        GLOBAL_POLICY.get_or_init(Self::domestic)
    }

    /// Installs `policy` as the process-wide policy.
    ///
    /// Must happen before any money is constructed, since construction reads the policy.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::PolicyAlreadyInstalled`] if a policy has already been installed
    /// or the default has already been fixed by a call to [`CurrencyPolicy::global`].
    pub fn install(policy: Self) -> Result<(), ConfigError> {
        log::debug!("Installing {policy:?}");
        GLOBAL_POLICY
            .set(policy)
            .map_err(|_| ConfigError::PolicyAlreadyInstalled)
    }
}

impl Default for CurrencyPolicy {
    /// Creates a new default [`CurrencyPolicy`] instance, see [`CurrencyPolicy::domestic`].
    fn default() -> Self {
        Self::domestic()
    }
}
