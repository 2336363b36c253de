//! Pocket Ledger - personal income and expense ledger
//!
//! This library records household income and expense movements against a
//! fixed category taxonomy and derives the reporting tables from them:
//! per-month trends, category distribution, detail comparison and the
//! savings figure.
//!
//! # Architecture
//!
//! The crate is organized into the following modules:
//!
//! - `config`: Configuration and path management
//! - `error`: Custom error types
//! - `models`: Movements, their classification enums, money and periods
//! - `taxonomy`: The category tree and entry validation
//! - `storage`: JSON document store and user directory
//! - `services`: Effective-date policy, login and the movement flows
//! - `reports`: Filter engine, aggregations and the dashboard
//! - `display`: Terminal rendering
//! - `export`: CSV, JSON and YAML writers
//! - `cli`: Command handlers for the `pocket` binary
//!
//! # Example
//!
//! ```rust,ignore
//! use pocket_ledger::config::{paths::LedgerPaths, settings::Settings};
//! use pocket_ledger::reports::{Dashboard, MovementFilter};
//! use pocket_ledger::storage::{MovementStore, Storage};
//!
//! let paths = LedgerPaths::new()?;
//! let settings = Settings::load_or_create(&paths)?;
//! let storage = Storage::new(paths)?;
//! let movements = storage.movements.list_all()?;
//! let report = Dashboard::build(&movements, &MovementFilter::new());
//! println!("{}", report.format_terminal(&settings.currency_symbol));
//! ```

pub mod cli;
pub mod config;
pub mod display;
pub mod error;
pub mod export;
pub mod models;
pub mod reports;
pub mod services;
pub mod storage;
pub mod taxonomy;

pub use error::{LedgerError, LedgerResult};
