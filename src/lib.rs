//! nextcheck - when is the next paycheck, and what is due before it
//!
//! Derives the current pay period from the most recent pay date, matches
//! recurring monthly expenses to the days they fall due inside that period,
//! and advances the stored pay date once a payday has passed.
//!
//! # Architecture
//!
//! - `config`: Configuration and path management
//! - `error`: Custom error types
//! - `models`: Pay cycles, expenses, the income record, money and IDs
//! - `storage`: Store traits and the local JSON implementation
//! - `api`: HTTP client for the remote income/expense service
//! - `services`: Period derivation, due matching, rollover and the day ticker
//! - `display`: Terminal formatting
//! - `cli`: Command handlers
//!
//! # Example
//!
//! ```rust,ignore
//! use nextcheck::config::{paths::NextCheckPaths, settings::Settings};
//!
//! let paths = NextCheckPaths::new()?;
//! let settings = Settings::load_or_create(&paths)?;
//! ```

pub mod api;
pub mod cli;
pub mod config;
pub mod display;
pub mod error;
pub mod models;
pub mod services;
pub mod storage;

pub use error::NextCheckError;
