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

//! Exact monetary values for the `monetary` workspace.
//!
//! The `monetary-model` crate provides an immutable [`Money`](types::Money) value which stores
//! an amount as an `i64` count of minor units (kopecks, cents) together with its
//! [`Currency`](types::Currency). Construction and arithmetic never go through floating point
//! for the stored amount and never wrap on overflow.
//!
//! - [`types`]: the `Money` and `Currency` value types.
//! - [`currencies`]: built-in ISO 4217 currency constants and the currency registry.
//! - [`policy`]: the rule deciding which currencies money may be denominated in.
//! - [`record`]: the flat storage representation used by persistence layers.
//! - [`config`]: TOML configuration for the registry and policy.
//!
//! # Logging
//!
//! The crate logs through the [`log`](https://docs.rs/log) facade and never installs a logger;
//! the host application chooses the backend.

#![warn(rustc::all)]
#![deny(unsafe_code)]
#![deny(nonstandard_style)]
#![deny(missing_debug_implementations)]
#![deny(rustdoc::broken_intra_doc_links)]

pub mod config;
pub mod currencies;
pub mod enums;
pub mod error;
pub mod policy;
pub mod record;
pub mod types;

// Re-exports
pub use crate::{
    config::MoneyConfig,
    error::{ConfigError, CurrencyRejection, MoneyError},
    policy::CurrencyPolicy,
    record::MoneyRecord,
    types::{Currency, Money, MoneyRaw},
};
