//! Pure mapping from a spreadsheet row (and the store's current view of the
//! product) to Admin API write payloads.

use std::collections::HashSet;

use shopload_core::ProductRow;

use crate::types::{ProductInput, RemoteProduct, VariantInput};

/// Splits a comma-separated tag cell, trimming each tag and dropping empties.
/// Order is preserved.
#[must_use]
pub fn split_tags(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(str::trim)
        .filter(|tag| !tag.is_empty())
        .map(str::to_owned)
        .collect()
}

/// Builds the product payload for a row. Carrying `existing.id` turns the
/// payload into an update.
#[must_use]
pub fn build_product_input(row: &ProductRow, existing: Option<&RemoteProduct>) -> ProductInput {
    ProductInput {
        id: existing.map(|product| product.id.clone()),
        title: row.title.trim().to_owned(),
        handle: row.handle.trim().to_owned(),
        description_html: row.body_html.trim().to_owned(),
        product_type: row.product_type.trim().to_owned(),
        vendor: row.vendor.trim().to_owned(),
        tags: split_tags(&row.tags),
    }
}

/// Picks the variant a row targets and builds its update payload.
///
/// A non-empty `Variant SKU` selects the variant with exactly that SKU;
/// otherwise, or when nothing matches, the first variant is used. Returns
/// `None` only when the product has no variants at all. Blank price/SKU cells
/// are left out of the payload rather than cleared.
#[must_use]
pub fn build_variant_input(product: &RemoteProduct, row: &ProductRow) -> Option<VariantInput> {
    let sku = row.variant_sku.trim();
    let price = row.variant_price.trim();

    let first = product.variants.nodes().next()?;
    let target = if sku.is_empty() {
        first
    } else {
        product
            .variants
            .nodes()
            .find(|variant| variant.sku.as_deref() == Some(sku))
            .unwrap_or(first)
    };

    Some(VariantInput {
        id: target.id.clone(),
        price: (!price.is_empty()).then(|| price.to_owned()),
        sku: (!sku.is_empty()).then(|| sku.to_owned()),
    })
}

/// Non-empty image URLs already attached to `product`.
#[must_use]
pub fn collect_image_srcs(product: Option<&RemoteProduct>) -> HashSet<String> {
    product
        .into_iter()
        .flat_map(|p| p.images.nodes())
        .filter_map(|image| image.src.as_deref())
        .filter(|src| !src.is_empty())
        .map(str::to_owned)
        .collect()
}
