//! Core types for Plate Cost.
//!
//! This module provides type-safe wrappers for common domain concepts.

pub mod category;
pub mod id;
pub mod money;
pub mod unit;

pub use category::{CategoryParseError, ExpenseCategory, InventoryType};
pub use id::*;
pub use money::{CurrencyCode, format_money};
pub use unit::{Unit, UnitParseError};
