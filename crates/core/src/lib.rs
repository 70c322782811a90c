//! Plate Cost Core - Recipe costing and profitability library.
//!
//! This crate holds the domain types and the costing arithmetic shared by the
//! other Plate Cost components:
//! - `client` - Typed client for the remote inventory/recipe backend
//! - `cli` - Command-line tools for costing recipes and building reports
//!
//! # Architecture
//!
//! The core crate contains only types and pure functions - no I/O, no HTTP
//! clients, no logging. Every figure is recomputed from its inputs on demand;
//! nothing derived is stored.
//!
//! # Modules
//!
//! - [`types`] - Typed IDs, money, units and category enumerations
//! - [`costing`] - Aggregation, batch/per-unit cost, price and margin solving
//! - [`draft`] - Recipe draft reducer driven by tagged field edits
//! - [`health`] - Margin warning tiers
//! - [`recipe`] - Recipe payload exchanged with the backend
//! - [`report`] - Period financial report (revenue, COGS, expenses, profit)

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod costing;
pub mod draft;
pub mod health;
pub mod recipe;
pub mod report;
pub mod types;

pub use types::*;
