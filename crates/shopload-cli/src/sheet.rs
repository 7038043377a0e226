//! Spreadsheet reading: turns a CSV or Excel file into [`ProductRow`]s.
//!
//! The header row is validated up front; a file missing any required column
//! is rejected before a single row is processed.

use std::path::Path;

use anyhow::{bail, Context, Result};
use calamine::{open_workbook_auto, Data, Reader};
use shopload_core::{ColumnIndex, ProductRow};

const EXCEL_EXTENSIONS: [&str; 5] = ["xlsx", "xls", "xlsm", "xlsb", "ods"];

/// Reads every data row from `path`.
///
/// `.csv` files are read with the `csv` crate; Excel-family files with
/// `calamine`, using `sheet` or the first worksheet.
///
/// # Errors
///
/// Fails on an unsupported extension, an unreadable file or worksheet, or a
/// header row missing required columns ([`shopload_core::CoreError::MissingColumns`]).
pub(crate) fn read_rows(path: &Path, sheet: Option<&str>) -> Result<Vec<ProductRow>> {
    let ext = path
        .extension()
        .and_then(|e| e.to_str())
        .map(str::to_ascii_lowercase)
        .unwrap_or_default();

    let table = if ext == "csv" {
        read_csv_table(path)?
    } else if EXCEL_EXTENSIONS.contains(&ext.as_str()) {
        read_excel_table(path, sheet)?
    } else {
        bail!("Unsupported file type: .{ext}");
    };

    rows_from_table(table)
}

/// Validates the header and maps every record to a row. Blank records are
/// kept so that row indices line up with the sheet; they fail later for
/// lacking a handle.
fn rows_from_table(mut table: Vec<Vec<String>>) -> Result<Vec<ProductRow>> {
    if table.is_empty() {
        bail!("file has no header row");
    }
    let headers = table.remove(0);
    let index = ColumnIndex::from_headers(headers.as_slice())?;

    Ok(table
        .iter()
        .map(|cells| index.row(cells.as_slice()))
        .collect())
}

fn read_csv_table(path: &Path) -> Result<Vec<Vec<String>>> {
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .from_path(path)
        .with_context(|| format!("Failed to open CSV file: {}", path.display()))?;

    let mut table = Vec::new();
    for (line, record) in reader.records().enumerate() {
        let record =
            record.with_context(|| format!("Failed to read CSV record {}", line + 1))?;
        table.push(record.iter().map(str::to_owned).collect());
    }
    Ok(table)
}

fn read_excel_table(path: &Path, sheet: Option<&str>) -> Result<Vec<Vec<String>>> {
    let mut workbook = open_workbook_auto(path)
        .with_context(|| format!("Failed to open Excel file: {}", path.display()))?;

    let sheet_name = match sheet {
        Some(name) => name.to_owned(),
        None => workbook
            .sheet_names()
            .first()
            .context("Excel file has no sheets")?
            .clone(),
    };

    let range = workbook
        .worksheet_range(&sheet_name)
        .with_context(|| format!("Failed to read sheet: {sheet_name}"))?;

    Ok(range
        .rows()
        .map(|row| row.iter().map(cell_to_string).collect())
        .collect())
}

/// Renders a cell the way it reads in the sheet. Blank and error cells are `""`.
fn cell_to_string(cell: &Data) -> String {
    match cell {
        Data::Empty | Data::Error(_) => String::new(),
        Data::String(s) => s.clone(),
        // f64 Display already drops a trailing `.0` on whole numbers.
        Data::Float(f) => f.to_string(),
        Data::Int(i) => i.to_string(),
        other => other.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use std::io::Write;

    use shopload_core::CoreError;

    use super::*;

    const HEADER: &str =
        "Handle,Title,Body (HTML),Type,Vendor,Tags,Variant SKU,Variant Price,Option1 Value,Image Src";

    fn write_temp(suffix: &str, contents: &str) -> tempfile::NamedTempFile {
        let mut file = tempfile::Builder::new()
            .suffix(suffix)
            .tempfile()
            .expect("failed to create temp file");
        file.write_all(contents.as_bytes())
            .expect("failed to write temp file");
        file
    }

    #[test]
    fn reads_csv_rows_with_blank_cells_as_empty() {
        let file = write_temp(
            ".csv",
            &format!(
                "{HEADER}\n\
                 classic-tee,Classic Tee,<p>Soft</p>,Shirts,Acme,\"summer, cotton\",TEE-S,19.99,S,http://x/1.jpg\n\
                 mug,Mug,,,,,,,,\n"
            ),
        );

        let rows = read_rows(file.path(), None).expect("expected rows");
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0].handle, "classic-tee");
        assert_eq!(rows[0].tags, "summer, cotton");
        assert_eq!(rows[0].image_src, "http://x/1.jpg");
        assert_eq!(rows[1].handle, "mug");
        assert_eq!(rows[1].vendor, "");
        assert_eq!(rows[1].image_src, "");
    }

    #[test]
    fn keeps_fully_blank_records_in_position() {
        let file = write_temp(
            ".csv",
            &format!("{HEADER}\ntee,Tee,,,,,,,,\n,,,,,,,,,\nmug,Mug,,,,,,,,\n"),
        );
        let rows = read_rows(file.path(), None).unwrap();
        let handles: Vec<&str> = rows.iter().map(|r| r.handle.as_str()).collect();
        assert_eq!(handles, vec!["tee", "", "mug"]);
        assert_eq!(rows[1], ProductRow::default());
    }

    #[test]
    fn accepts_csv_without_image_column() {
        let file = write_temp(
            ".csv",
            "Handle,Title,Body (HTML),Type,Vendor,Tags,Variant SKU,Variant Price,Option1 Value\n\
             mug,Mug,,,,,,,\n",
        );
        let rows = read_rows(file.path(), None).unwrap();
        assert_eq!(rows[0].image_src, "");
    }

    #[test]
    fn rejects_csv_missing_required_columns() {
        let file = write_temp(".csv", "Handle,Title,Tags\nmug,Mug,\n");
        let err = read_rows(file.path(), None).unwrap_err();
        match err.downcast_ref::<CoreError>() {
            Some(CoreError::MissingColumns(missing)) => {
                assert!(missing.contains(&"Vendor".to_owned()));
                assert!(missing.contains(&"Option1 Value".to_owned()));
                assert_eq!(missing.len(), 6);
            }
            None => panic!("expected MissingColumns, got: {err:#}"),
        }
    }

    #[test]
    fn rejects_unsupported_extension() {
        let file = write_temp(".json", "[]");
        let err = read_rows(file.path(), None).unwrap_err();
        assert!(
            err.to_string().contains("Unsupported file type: .json"),
            "unexpected error: {err:#}"
        );
    }

    #[test]
    fn rejects_empty_file() {
        let file = write_temp(".csv", "");
        assert!(read_rows(file.path(), None).is_err());
    }

    #[test]
    fn cell_to_string_renders_numbers_plainly() {
        assert_eq!(cell_to_string(&Data::Float(12.0)), "12");
        assert_eq!(cell_to_string(&Data::Float(19.99)), "19.99");
        assert_eq!(cell_to_string(&Data::Int(7)), "7");
        assert_eq!(cell_to_string(&Data::Empty), "");
        assert_eq!(cell_to_string(&Data::String("tee".to_owned())), "tee");
    }
}
