//! Remote income/expense service access

pub mod client;

pub use client::ApiClient;
