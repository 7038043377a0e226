//! The create and update paths a live row goes through after lookup.

use std::collections::HashSet;

use shopload_admin::{
    build_variant_input, collect_image_srcs, AdminClient, AdminError, CreatedMedia, ProductInput,
    RemoteProduct, VariantInput,
};
use shopload_core::ProductRow;

/// Which view of the product a variant was resolved against.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Snapshot {
    /// The product echoed back by the update mutation.
    Updated,
    /// The product fetched before the update.
    Existing,
}

/// Resolves the row's variant against the updated product first, then the
/// pre-update snapshot. The update echo can omit variants the lookup saw.
pub(crate) fn resolve_variant(
    updated: &RemoteProduct,
    existing: &RemoteProduct,
    row: &ProductRow,
) -> Option<(VariantInput, Snapshot)> {
    build_variant_input(updated, row)
        .map(|input| (input, Snapshot::Updated))
        .or_else(|| build_variant_input(existing, row).map(|input| (input, Snapshot::Existing)))
}

pub(super) async fn create_product(
    client: &AdminClient,
    row: &ProductRow,
    input: &ProductInput,
) -> Result<RemoteProduct, AdminError> {
    let product = client.product_create(input).await?;

    if let Some(variant) = build_variant_input(&product, row) {
        client.variant_update(&product.id, &variant).await?;
    }

    let known = collect_image_srcs(Some(&product));
    attach_image_if_new(client, &product.id, row, &known).await?;

    Ok(product)
}

pub(super) async fn update_product(
    client: &AdminClient,
    row: &ProductRow,
    input: &ProductInput,
    existing: &RemoteProduct,
) -> Result<RemoteProduct, AdminError> {
    let product = client.product_update(input).await?;

    if let Some((variant, snapshot)) = resolve_variant(&product, existing, row) {
        let product_id = match snapshot {
            Snapshot::Updated => &product.id,
            Snapshot::Existing => &existing.id,
        };
        client.variant_update(product_id, &variant).await?;
    }

    let mut known = collect_image_srcs(Some(existing));
    known.extend(collect_image_srcs(Some(&product)));
    attach_image_if_new(client, &product.id, row, &known).await?;

    Ok(product)
}

/// Creates the row's image unless the URL is blank or already attached.
async fn attach_image_if_new(
    client: &AdminClient,
    product_id: &str,
    row: &ProductRow,
    known: &HashSet<String>,
) -> Result<(), AdminError> {
    let src = row.image_src.trim();
    if src.is_empty() {
        return Ok(());
    }
    if known.contains(src) {
        tracing::debug!(product_id, src, "image already attached");
        return Ok(());
    }

    let media = client.create_image(product_id, src).await?;
    let preview = media.first().and_then(CreatedMedia::preview_url);
    tracing::info!(
        product_id,
        src,
        preview = preview.unwrap_or("pending"),
        "attached product image"
    );
    Ok(())
}
