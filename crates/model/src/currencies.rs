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

//! Common `Currency` constants and the built-in currency registry.
//!
//! Precisions follow the ISO 4217 minor-unit column. Two ruble codes are present:
//! `RUR` (numeric 810) for domestic settlement and `RUB` (numeric 643) for international
//! payments. Which of them a [`crate::types::Money`] accepts is decided by the active
//! [`crate::policy::CurrencyPolicy`], not by the registry.

use std::{
    collections::HashMap,
    sync::{LazyLock, Mutex},
};

use crate::{enums::CurrencyType, types::Currency};

macro_rules! currency_constants {
    ($($fn_name:ident => ($code:literal, $precision:literal, $iso4217:literal, $name:literal, $currency_type:ident)),* $(,)?) => {
        impl Currency {
            $(
                #[allow(non_snake_case)]
                #[must_use]
                #[doc = concat!("Returns the built-in `", $code, "` currency (", $name, ").")]
                pub fn $fn_name() -> Self {
                    static LOCK: std::sync::OnceLock<Currency> = std::sync::OnceLock::new();
                    *LOCK.get_or_init(|| Self {
                        code: ustr::Ustr::from($code),
                        precision: $precision,
                        iso4217: $iso4217,
                        name: ustr::Ustr::from($name),
                        currency_type: CurrencyType::$currency_type,
                    })
                }
            )*
        }

        fn builtin_currencies() -> Vec<Currency> {
            vec![$(Currency::$fn_name()),*]
        }
    };
}

currency_constants! {
    // Fiat currencies
    AUD => ("AUD", 2, 36, "Australian dollar", Fiat),
    BHD => ("BHD", 3, 48, "Bahraini dinar", Fiat),
    CAD => ("CAD", 2, 124, "Canadian dollar", Fiat),
    CHF => ("CHF", 2, 756, "Swiss franc", Fiat),
    CNY => ("CNY", 2, 156, "Chinese yuan", Fiat),
    EUR => ("EUR", 2, 978, "Euro", Fiat),
    GBP => ("GBP", 2, 826, "British Pound", Fiat),
    JPY => ("JPY", 0, 392, "Japanese yen", Fiat),
    KRW => ("KRW", 0, 410, "South Korean won", Fiat),
    KWD => ("KWD", 3, 414, "Kuwaiti dinar", Fiat),
    RUB => ("RUB", 2, 643, "Russian ruble", Fiat),
    RUR => ("RUR", 2, 810, "Russian ruble (domestic)", Fiat),
    USD => ("USD", 2, 840, "United States dollar", Fiat),
    // Commodity backed currencies
    XAG => ("XAG", 2, 961, "Silver (one troy ounce)", CommodityBacked),
    XAU => ("XAU", 2, 959, "Gold (one troy ounce)", CommodityBacked),
    // Crypto currencies
    BTC => ("BTC", 8, 0, "Bitcoin", Crypto),
    ETH => ("ETH", 8, 0, "Ethereum", Crypto),
    USDT => ("USDT", 8, 0, "Tether", Crypto),
}

/// A map of built-in `Currency` constants, extended at runtime by [`Currency::register`].
pub static CURRENCY_MAP: LazyLock<Mutex<HashMap<String, Currency>>> = LazyLock::new(|| {
    let map = builtin_currencies()
        .into_iter()
        .map(|currency| (currency.code.to_string(), currency))
        .collect();
    Mutex::new(map)
});
