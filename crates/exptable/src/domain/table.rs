//! Table definitions and row computation
//!
//! Every table is indexed by an exponent `i` running from `MIN_EXPONENT`
//! to `MAX_EXPONENT`. Values are computed in `f64`; nothing here recomputes
//! at higher precision.

use crate::constants::{MAX_EXPONENT, MIN_EXPONENT, ROWS_PER_TABLE};
use std::fmt;

/// Kind of table, in print order
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum TableKind {
    /// Table 1: `ln(2^i)`, rows also carry the integer `2^i`
    PowerLog,
    /// Table 2: `ln(2^-i + 1)`
    ReciprocalLog,
    /// Table 3: `2^i / (1 + 2^i)`
    Ratio,
}

impl TableKind {
    /// All kinds in print order
    pub const ALL: [TableKind; 3] = [Self::PowerLog, Self::ReciprocalLog, Self::Ratio];

    /// 1-based table number used in labels
    pub fn number(self) -> u32 {
        match self {
            Self::PowerLog => 1,
            Self::ReciprocalLog => 2,
            Self::Ratio => 3,
        }
    }

    /// Label printed between the dashed markers
    pub fn label(self) -> String {
        format!("exp table {}", self.number())
    }

    /// Compute the value of this table for exponent `i`
    pub fn value(self, exponent: u32) -> f64 {
        match self {
            Self::PowerLog => (power_of_two(exponent) as f64).ln(),
            Self::ReciprocalLog => (2f64.powi(-(exponent as i32)) + 1.0).ln(),
            Self::Ratio => {
                let p = 2f64.powi(exponent as i32);
                p / (1.0 + p)
            }
        }
    }

    /// Compute a full row for exponent `i`
    pub fn row(self, exponent: u32) -> Row {
        let power = match self {
            Self::PowerLog => Some(power_of_two(exponent)),
            Self::ReciprocalLog | Self::Ratio => None,
        };

        Row {
            exponent,
            power,
            value: self.value(exponent),
        }
    }
}

impl fmt::Display for TableKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.label())
    }
}

/// `1 << i` as an exact integer
pub fn power_of_two(exponent: u32) -> u64 {
    1u64 << exponent
}

/// Single table row
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Row {
    /// Exponent `i`
    pub exponent: u32,
    /// Exact `2^i`, only present in table 1
    pub power: Option<u64>,
    /// Computed value
    pub value: f64,
}

/// A computed table
#[derive(Clone, Debug, PartialEq)]
pub struct Table {
    pub kind: TableKind,
    pub rows: Vec<Row>,
}

impl Table {
    /// Compute all rows of `kind`
    pub fn compute(kind: TableKind) -> Self {
        let mut rows = Vec::with_capacity(ROWS_PER_TABLE);

        for exponent in MIN_EXPONENT..=MAX_EXPONENT {
            rows.push(kind.row(exponent));
        }

        Self { kind, rows }
    }

    /// Values in row order
    pub fn values(&self) -> impl Iterator<Item = f64> + '_ {
        self.rows.iter().map(|row| row.value)
    }
}

/// Which revision of the table script to reproduce
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum Variant {
    /// First draft: tables 1 and 2, table 1 printed without a header
    Draft,
    /// Tables 1, 2 and 3, each with a header
    #[default]
    Full,
}

impl Variant {
    /// Table kinds produced by this variant, in print order
    pub fn kinds(self) -> &'static [TableKind] {
        match self {
            Self::Draft => &TableKind::ALL[..2],
            Self::Full => &TableKind::ALL,
        }
    }

    /// Whether the table of `kind` is preceded by a header line
    pub fn has_header(self, kind: TableKind) -> bool {
        !(self == Self::Draft && kind == TableKind::PowerLog)
    }

    /// Number of tables produced
    pub fn table_count(self) -> usize {
        self.kinds().len()
    }

    /// Variant byte used in the export file
    pub fn to_byte(self) -> u8 {
        match self {
            Self::Draft => 0,
            Self::Full => 1,
        }
    }

    /// Parse the variant byte of the export file
    pub fn from_byte(byte: u8) -> Option<Self> {
        match byte {
            0 => Some(Self::Draft),
            1 => Some(Self::Full),
            _ => None,
        }
    }
}
