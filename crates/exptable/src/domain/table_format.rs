//! Export file format definitions
//!
//! This module defines the binary export format for the tables,
//! including header structure and validation.

use crate::constants::{
    FILE_FORMAT_VERSION, FILE_HEADER_SIZE, FRACTION_BITS, MIN_EXPONENT, ROW_ENTRY_SIZE,
    ROWS_PER_TABLE, TABLE_MAGIC,
};
use crate::domain::table::Variant;
use std::time::{SystemTime, UNIX_EPOCH};

/// Export file header metadata
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct TableHeader {
    /// File format version
    pub version: u16,
    /// Table set stored in the file
    pub variant: Variant,
    /// Fraction bits of the stored fixed-point values
    pub fraction_bits: u32,
    /// Rows per table
    pub rows_per_table: u32,
    /// Number of tables in file
    pub num_tables: u32,
    /// Exponent of the first row
    pub first_exponent: u32,
    /// Creation timestamp (Unix epoch seconds)
    pub created_at: u64,
}

impl TableHeader {
    /// Create a new header with current parameters
    pub fn new(variant: Variant) -> Self {
        let created_at = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map(|d| d.as_secs())
            .unwrap_or(0);

        Self {
            version: FILE_FORMAT_VERSION,
            variant,
            fraction_bits: FRACTION_BITS,
            rows_per_table: ROWS_PER_TABLE as u32,
            num_tables: variant.table_count() as u32,
            first_exponent: MIN_EXPONENT,
            created_at,
        }
    }

    /// Serialize header to bytes (64 bytes)
    pub fn to_bytes(&self) -> [u8; FILE_HEADER_SIZE] {
        let mut buf = [0u8; FILE_HEADER_SIZE];

        buf[0..8].copy_from_slice(&TABLE_MAGIC);
        buf[8..10].copy_from_slice(&self.version.to_le_bytes());
        buf[10] = self.variant.to_byte();
        // 11 reserved
        buf[12..16].copy_from_slice(&self.fraction_bits.to_le_bytes());
        buf[16..20].copy_from_slice(&self.rows_per_table.to_le_bytes());
        buf[20..24].copy_from_slice(&self.num_tables.to_le_bytes());
        buf[24..28].copy_from_slice(&self.first_exponent.to_le_bytes());
        // 28..32 reserved
        buf[32..40].copy_from_slice(&self.created_at.to_le_bytes());
        // 40..64 reserved

        buf
    }

    /// Deserialize header from bytes
    ///
    /// Checks magic, version and the variant byte. Structural fields are
    /// checked by [`validate_header`].
    pub fn from_bytes(buf: &[u8; FILE_HEADER_SIZE]) -> Result<Self, TableFormatError> {
        if buf[0..8] != TABLE_MAGIC {
            return Err(TableFormatError::InvalidMagic);
        }

        let version = u16::from_le_bytes([buf[8], buf[9]]);
        if version != FILE_FORMAT_VERSION {
            return Err(TableFormatError::UnsupportedVersion(version));
        }

        let variant =
            Variant::from_byte(buf[10]).ok_or(TableFormatError::UnknownVariant(buf[10]))?;

        Ok(Self {
            version,
            variant,
            fraction_bits: u32::from_le_bytes([buf[12], buf[13], buf[14], buf[15]]),
            rows_per_table: u32::from_le_bytes([buf[16], buf[17], buf[18], buf[19]]),
            num_tables: u32::from_le_bytes([buf[20], buf[21], buf[22], buf[23]]),
            first_exponent: u32::from_le_bytes([buf[24], buf[25], buf[26], buf[27]]),
            created_at: u64::from_le_bytes([
                buf[32], buf[33], buf[34], buf[35], buf[36], buf[37], buf[38], buf[39],
            ]),
        })
    }
}

/// Validation options for table loading
#[derive(Clone, Debug, Default)]
pub struct ValidationOptions {
    /// Expected variant (None = accept either)
    pub expected_variant: Option<Variant>,
}

impl ValidationOptions {
    /// Require a specific variant
    pub fn for_variant(variant: Variant) -> Self {
        Self {
            expected_variant: Some(variant),
        }
    }
}

/// Export file format errors
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum TableFormatError {
    /// Invalid magic number (not a valid export file)
    #[error("Invalid file format: not an exp table file")]
    InvalidMagic,
    /// Unsupported format version
    #[error("Unsupported format version: {0}")]
    UnsupportedVersion(u16),
    /// Variant byte not recognised
    #[error("Unknown table variant: {0}")]
    UnknownVariant(u8),
    /// Variant differs from the expected one
    #[error("Variant mismatch: expected {expected:?}, found {found:?}")]
    VariantMismatch { expected: Variant, found: Variant },
    /// Table count does not match the variant
    #[error("Table count mismatch: expected {expected}, found {found}")]
    TableCountMismatch { expected: u32, found: u32 },
    /// Rows per table or first exponent differ from the compiled layout
    #[error(
        "Row layout mismatch: expected {expected} rows from exponent {first}, \
         found {found_rows} rows from exponent {found_first}"
    )]
    RowLayoutMismatch {
        expected: u32,
        first: u32,
        found_rows: u32,
        found_first: u32,
    },
    /// Fixed-point format differs
    #[error("Fraction bits mismatch: expected {expected}, found {found}")]
    FractionBitsMismatch { expected: u32, found: u32 },
    /// Stored fixed-point value does not match the stored f64
    #[error("Inconsistent entry in table {table} at exponent {exponent}")]
    InconsistentEntry { table: u32, exponent: u32 },
    /// File size does not match expected size
    #[error("Invalid file size: expected {expected} bytes, found {found} bytes")]
    InvalidFileSize { expected: u64, found: u64 },
    /// I/O error
    #[error("I/O error: {0}")]
    Io(String),
}

impl From<std::io::Error> for TableFormatError {
    fn from(e: std::io::Error) -> Self {
        Self::Io(e.to_string())
    }
}

/// Validate header against the compiled layout and options
pub fn validate_header(
    header: &TableHeader,
    options: &ValidationOptions,
) -> Result<(), TableFormatError> {
    if let Some(expected) = options.expected_variant
        && header.variant != expected
    {
        return Err(TableFormatError::VariantMismatch {
            expected,
            found: header.variant,
        });
    }

    let expected_tables = header.variant.table_count() as u32;
    if header.num_tables != expected_tables {
        return Err(TableFormatError::TableCountMismatch {
            expected: expected_tables,
            found: header.num_tables,
        });
    }

    if header.rows_per_table != ROWS_PER_TABLE as u32 || header.first_exponent != MIN_EXPONENT {
        return Err(TableFormatError::RowLayoutMismatch {
            expected: ROWS_PER_TABLE as u32,
            first: MIN_EXPONENT,
            found_rows: header.rows_per_table,
            found_first: header.first_exponent,
        });
    }

    if header.fraction_bits != FRACTION_BITS {
        return Err(TableFormatError::FractionBitsMismatch {
            expected: FRACTION_BITS,
            found: header.fraction_bits,
        });
    }

    Ok(())
}

/// Calculate expected file size from header
pub fn expected_file_size(header: &TableHeader) -> u64 {
    let data_size =
        header.rows_per_table as u64 * header.num_tables as u64 * ROW_ENTRY_SIZE as u64;
    FILE_HEADER_SIZE as u64 + data_size
}
