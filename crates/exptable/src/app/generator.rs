//! Table generation and text output
//!
//! This module builds the tables of a variant and renders them as text.

use crate::domain::decimal::{DecimalStyle, format_decimal};
use crate::domain::fixed_point::FixedPoint;
use crate::domain::table::{Row, Table, Variant};
use log::debug;
use std::io::{self, Write};

/// How row values are rendered
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ValueFormat {
    /// Decimal text of the f64 value
    Decimal(DecimalStyle),
    /// Raw Q8.24 integer
    Fixed,
}

impl Default for ValueFormat {
    fn default() -> Self {
        Self::Decimal(DecimalStyle::Shortest)
    }
}

/// Generate all tables of a variant, in print order
pub fn generate_tables(variant: Variant) -> Vec<Table> {
    let tables: Vec<Table> = variant
        .kinds()
        .iter()
        .map(|&kind| Table::compute(kind))
        .collect();
    debug!("generated {} tables for {:?}", tables.len(), variant);
    tables
}

/// Header line of a table
pub fn header_line(table: &Table) -> String {
    format!("---- {} ----", table.kind.label())
}

/// Render a single value
pub fn format_value(value: f64, format: ValueFormat) -> String {
    match format {
        ValueFormat::Decimal(style) => format_decimal(value, style),
        ValueFormat::Fixed => FixedPoint::from_f64(value).raw().to_string(),
    }
}

/// Render a row: `i, 2^i, value` for table 1, `value` otherwise
pub fn format_row(row: &Row, format: ValueFormat) -> String {
    let value = format_value(row.value, format);
    match row.power {
        Some(power) => format!("{}, {}, {}", row.exponent, power, value),
        None => value,
    }
}

/// Write tables as text
///
/// A table with a header is preceded by a blank separator (unless it is the
/// first output), the dashed header line, and a blank line.
pub fn write_tables<W: Write>(
    writer: &mut W,
    variant: Variant,
    tables: &[Table],
    format: ValueFormat,
) -> io::Result<()> {
    let mut wrote_any = false;

    for table in tables {
        if variant.has_header(table.kind) {
            if wrote_any {
                writeln!(writer)?;
            }
            writeln!(writer, "{}", header_line(table))?;
            writeln!(writer)?;
        }

        for row in &table.rows {
            writeln!(writer, "{}", format_row(row, format))?;
        }
        wrote_any = true;
    }

    writer.flush()
}

/// Generate and render a variant into a string
pub fn render_tables(variant: Variant, format: ValueFormat) -> String {
    let tables = generate_tables(variant);
    let mut buf = Vec::new();
    // writing into a Vec cannot fail
    if write_tables(&mut buf, variant, &tables, format).is_err() {
        return String::new();
    }
    String::from_utf8_lossy(&buf).into_owned()
}
