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

//! Flat storage representation of [`Money`] for persistence layers.
//!
//! A record mirrors how money is usually stored in a table: an integer column and a nullable
//! currency code column. Converting a record back into [`Money`] always goes through
//! [`Money::from_raw_code`], so a stored row can never produce an unvalidated value.

use serde::{Deserialize, Serialize};

use crate::{error::MoneyError, types::Money};

/// A raw amount and currency code as read from, or written to, storage.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct MoneyRecord {
    /// The amount in minor units of the currency.
    pub raw_amount: i64,
    /// The currency code, `None` when the stored column was null.
    pub currency: Option<String>,
}

impl MoneyRecord {
    /// Creates a new [`MoneyRecord`] instance.
    #[must_use]
    pub const fn new(raw_amount: i64, currency: Option<String>) -> Self {
        Self {
            raw_amount,
            currency,
        }
    }
}

impl From<Money> for MoneyRecord {
    fn from(money: Money) -> Self {
        Self {
            raw_amount: money.raw(),
            currency: Some(money.currency().code().to_string()),
        }
    }
}

impl TryFrom<MoneyRecord> for Money {
    type Error = MoneyError;

    fn try_from(record: MoneyRecord) -> Result<Self, Self::Error> {
        let code = record.currency.ok_or_else(MoneyError::missing_currency)?;
        Self::from_raw_code(record.raw_amount, code.trim())
    }
}
