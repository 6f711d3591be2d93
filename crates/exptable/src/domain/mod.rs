//! Domain layer - Pure computational logic
//!
//! This module contains pure functions and algorithms without I/O dependencies.

pub mod decimal;
pub mod fixed_point;
pub mod table;
pub mod table_format;
