//! Export file I/O operations
//!
//! This module provides functions for reading and writing table export files.

use crate::constants::{FILE_HEADER_SIZE, MIN_EXPONENT, TABLE_FILE_EXTENSION};
use crate::domain::fixed_point::FixedPoint;
use crate::domain::table::{Row, Table, TableKind, Variant, power_of_two};
use crate::domain::table_format::{
    TableFormatError, TableHeader, ValidationOptions, expected_file_size, validate_header,
};
use byteorder::{LittleEndian, ReadBytesExt, WriteBytesExt};
use log::debug;
use std::fs::{self, File};
use std::io::{BufReader, BufWriter, Read, Write};
use std::path::{Path, PathBuf};

fn ensure_parent_dir(path: &Path) -> std::io::Result<()> {
    if let Some(parent) = path.parent()
        && !parent.as_os_str().is_empty()
    {
        fs::create_dir_all(parent)?;
    }

    Ok(())
}

/// Get the export file path for a variant
///
/// Format: `{dir}/{variant}.expt`
pub fn get_table_path(dir: impl AsRef<Path>, variant: Variant) -> PathBuf {
    let name = match variant {
        Variant::Draft => "draft",
        Variant::Full => "full",
    };
    dir.as_ref().join(format!("{}.{}", name, TABLE_FILE_EXTENSION))
}

/// Save tables with header
///
/// `tables` must hold the kinds of `variant` in print order.
pub fn save_tables(
    path: impl AsRef<Path>,
    variant: Variant,
    tables: &[Table],
) -> Result<(), TableFormatError> {
    let header = TableHeader::new(variant);

    let kinds: Vec<TableKind> = tables.iter().map(|t| t.kind).collect();
    if kinds != variant.kinds() {
        return Err(TableFormatError::TableCountMismatch {
            expected: header.num_tables,
            found: tables.len() as u32,
        });
    }
    for table in tables {
        if table.rows.len() != header.rows_per_table as usize {
            return Err(TableFormatError::RowLayoutMismatch {
                expected: header.rows_per_table,
                first: header.first_exponent,
                found_rows: table.rows.len() as u32,
                found_first: table.rows.first().map_or(0, |r| r.exponent),
            });
        }
    }

    ensure_parent_dir(path.as_ref())?;
    let file = File::create(path.as_ref())?;
    let mut writer = BufWriter::new(file);

    writer.write_all(&header.to_bytes())?;

    for table in tables {
        for row in &table.rows {
            writer.write_u64::<LittleEndian>(row.value.to_bits())?;
            writer.write_i32::<LittleEndian>(FixedPoint::from_f64(row.value).raw())?;
        }
    }

    writer.flush()?;
    debug!(
        "saved {} tables ({:?}) to {}",
        tables.len(),
        variant,
        path.as_ref().display()
    );
    Ok(())
}

/// Load tables with validation
pub fn load_tables(
    path: impl AsRef<Path>,
    options: &ValidationOptions,
) -> Result<(TableHeader, Vec<Table>), TableFormatError> {
    let file = File::open(path.as_ref())?;
    let metadata = file.metadata()?;

    let mut reader = BufReader::new(file);
    let mut header_buf = [0u8; FILE_HEADER_SIZE];
    reader.read_exact(&mut header_buf)?;

    let header = TableHeader::from_bytes(&header_buf)?;
    validate_header(&header, options)?;

    let expected_size = expected_file_size(&header);
    if metadata.len() != expected_size {
        return Err(TableFormatError::InvalidFileSize {
            expected: expected_size,
            found: metadata.len(),
        });
    }

    let mut tables = Vec::with_capacity(header.num_tables as usize);
    for &kind in header.variant.kinds() {
        let mut rows = Vec::with_capacity(header.rows_per_table as usize);
        for offset in 0..header.rows_per_table {
            let exponent = MIN_EXPONENT + offset;
            let value = f64::from_bits(reader.read_u64::<LittleEndian>()?);
            let fixed = reader.read_i32::<LittleEndian>()?;

            if fixed != FixedPoint::from_f64(value).raw() {
                return Err(TableFormatError::InconsistentEntry {
                    table: kind.number(),
                    exponent,
                });
            }

            rows.push(Row {
                exponent,
                power: (kind == TableKind::PowerLog).then(|| power_of_two(exponent)),
                value,
            });
        }
        tables.push(Table { kind, rows });
    }

    debug!(
        "loaded {} tables ({:?}) from {}",
        tables.len(),
        header.variant,
        path.as_ref().display()
    );
    Ok((header, tables))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::app::generator::generate_tables;

    #[test]
    fn test_save_and_load_tables() {
        let dir = tempfile::tempdir().unwrap();
        let path = get_table_path(dir.path(), Variant::Full);
        let tables = generate_tables(Variant::Full);

        save_tables(&path, Variant::Full, &tables).unwrap();
        let (header, loaded) = load_tables(&path, &ValidationOptions::default()).unwrap();

        assert_eq!(header.variant, Variant::Full);
        assert_eq!(loaded, tables);
    }

    #[test]
    fn test_save_creates_parent_dir() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("tables.expt");
        let tables = generate_tables(Variant::Draft);

        save_tables(&path, Variant::Draft, &tables).unwrap();
        assert!(path.exists());
    }

    #[test]
    fn test_save_rejects_wrong_kinds() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("bad.expt");
        let tables = generate_tables(Variant::Draft);

        let result = save_tables(&path, Variant::Full, &tables);
        assert!(matches!(
            result,
            Err(TableFormatError::TableCountMismatch {
                expected: 3,
                found: 2
            })
        ));
        assert!(!path.exists());
    }

    #[test]
    fn test_load_nonexistent_file() {
        let result = load_tables("nonexistent_file.expt", &ValidationOptions::default());
        assert!(matches!(result, Err(TableFormatError::Io(_))));
    }

    #[test]
    fn test_get_table_path() {
        assert_eq!(
            get_table_path(".", Variant::Full),
            PathBuf::from(".").join("full.expt")
        );
        assert_eq!(
            get_table_path("tables", Variant::Draft),
            PathBuf::from("tables").join("draft.expt")
        );
    }
}
