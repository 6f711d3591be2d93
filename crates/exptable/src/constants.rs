//! Table and file format constants

// =============================================================================
// Table parameters
// =============================================================================

/// First exponent of every table (i = 1)
pub const MIN_EXPONENT: u32 = 1;

/// Last exponent of every table (i = 31)
pub const MAX_EXPONENT: u32 = 31;

/// Rows per table
pub const ROWS_PER_TABLE: usize = (MAX_EXPONENT - MIN_EXPONENT + 1) as usize; // 31

// =============================================================================
// Fixed-point parameters
// =============================================================================

/// Fraction bits of the Q8.24 format
pub const FRACTION_BITS: u32 = 24;

/// Integer bits of the Q8.24 format (sign included)
pub const INTEGER_BITS: u32 = 32 - FRACTION_BITS;

/// Raw value of 1.0
pub const FIXED_UNIT: i32 = 1 << FRACTION_BITS;

// =============================================================================
// Export file format
// =============================================================================

/// Magic bytes at the start of an export file
pub const TABLE_MAGIC: [u8; 8] = *b"EXPTABLE";

/// Export file format version
pub const FILE_FORMAT_VERSION: u16 = 1;

/// Header size in bytes
pub const FILE_HEADER_SIZE: usize = 64;

/// Bytes per row: f64 bit pattern (8) + Q8.24 raw value (4)
pub const ROW_ENTRY_SIZE: usize = 12;

/// Default extension for export files
pub const TABLE_FILE_EXTENSION: &str = "expt";
