//! exptable - Logarithm tables for powers of two
//!
//! This crate provides functionality to:
//! - Generate the `ln(2^i)`, `ln(1 + 2^-i)` and `2^i / (1 + 2^i)` tables for i = 1..=31
//! - Render them as decimal text (shortest round-trip or exact binary expansion)
//! - Evaluate Q8.24 fixed-point `exp`/`ln` driven by those tables
//! - Save and load the tables as a binary export file

pub mod app;
pub mod constants;
pub mod domain;
pub mod infra;

// Re-export commonly used types
pub use constants::*;
pub use domain::decimal::{DecimalStyle, format_decimal};
pub use domain::fixed_point::{FixedPoint, FixedTables};
pub use domain::table::{Row, Table, TableKind, Variant};
