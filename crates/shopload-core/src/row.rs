//! Normalized catalog rows and the column set they are read from.
//!
//! A [`ProductRow`] is built once per spreadsheet record and never mutated.
//! Every field is a plain string; blank or absent cells are `""`.

use std::collections::HashMap;

use crate::CoreError;

pub const HANDLE: &str = "Handle";
pub const TITLE: &str = "Title";
pub const BODY_HTML: &str = "Body (HTML)";
pub const TYPE: &str = "Type";
pub const VENDOR: &str = "Vendor";
pub const TAGS: &str = "Tags";
pub const VARIANT_SKU: &str = "Variant SKU";
pub const VARIANT_PRICE: &str = "Variant Price";
pub const OPTION1_VALUE: &str = "Option1 Value";
pub const IMAGE_SRC: &str = "Image Src";

/// Columns that must be present in the header row.
pub const REQUIRED_COLUMNS: [&str; 9] = [
    HANDLE,
    TITLE,
    BODY_HTML,
    TYPE,
    VENDOR,
    TAGS,
    VARIANT_SKU,
    VARIANT_PRICE,
    OPTION1_VALUE,
];

/// One catalog record, keyed by the fixed column set.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProductRow {
    pub handle: String,
    pub title: String,
    pub body_html: String,
    pub product_type: String,
    pub vendor: String,
    pub tags: String,
    pub variant_sku: String,
    pub variant_price: String,
    pub option1_value: String,
    /// Optional column; `""` when the sheet has no `Image Src` header.
    pub image_src: String,
}

/// Header name → cell position, validated against [`REQUIRED_COLUMNS`].
#[derive(Debug, Clone)]
pub struct ColumnIndex {
    positions: HashMap<String, usize>,
}

impl ColumnIndex {
    /// Indexes a header row. Header names are trimmed before matching.
    ///
    /// # Errors
    ///
    /// Returns [`CoreError::MissingColumns`] naming every required column
    /// that is absent from `headers`, in [`REQUIRED_COLUMNS`] order.
    pub fn from_headers<S: AsRef<str>>(headers: &[S]) -> Result<Self, CoreError> {
        let mut positions = HashMap::with_capacity(headers.len());
        for (idx, header) in headers.iter().enumerate() {
            // First occurrence wins on duplicate headers.
            positions
                .entry(header.as_ref().trim().to_owned())
                .or_insert(idx);
        }

        let missing: Vec<String> = REQUIRED_COLUMNS
            .iter()
            .filter(|col| !positions.contains_key(**col))
            .map(|col| (*col).to_owned())
            .collect();
        if !missing.is_empty() {
            return Err(CoreError::MissingColumns(missing));
        }

        Ok(Self { positions })
    }

    /// Builds a row from one record's cells. Short records and absent
    /// optional columns yield `""`.
    #[must_use]
    pub fn row<S: AsRef<str>>(&self, cells: &[S]) -> ProductRow {
        let cell = |column: &str| -> String {
            self.positions
                .get(column)
                .and_then(|&idx| cells.get(idx))
                .map(|value| value.as_ref().to_owned())
                .unwrap_or_default()
        };

        ProductRow {
            handle: cell(HANDLE),
            title: cell(TITLE),
            body_html: cell(BODY_HTML),
            product_type: cell(TYPE),
            vendor: cell(VENDOR),
            tags: cell(TAGS),
            variant_sku: cell(VARIANT_SKU),
            variant_price: cell(VARIANT_PRICE),
            option1_value: cell(OPTION1_VALUE),
            image_src: cell(IMAGE_SRC),
        }
    }
}
