//! Admin GraphQL API shapes used by the importer.
//!
//! Read shapes mirror the selection sets in `queries.rs`: products come back
//! with `variants`/`images` as Relay connections (`edges[].node`). Write
//! shapes are fixed-field records; optional fields are omitted from the JSON
//! entirely so the API leaves the stored value alone.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Relay-style connection. Missing or `null` edges decode as empty.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct Connection<T> {
    #[serde(default = "Vec::new")]
    pub edges: Vec<Edge<T>>,
}

impl<T> Default for Connection<T> {
    fn default() -> Self {
        Self { edges: Vec::new() }
    }
}

impl<T> Connection<T> {
    pub fn nodes(&self) -> impl Iterator<Item = &T> {
        self.edges.iter().map(|edge| &edge.node)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct Edge<T> {
    pub node: T,
}

/// A product as the store currently sees it.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct RemoteProduct {
    /// Opaque global ID, e.g. `gid://shopify/Product/123`.
    pub id: String,
    pub title: String,
    pub handle: String,
    #[serde(default)]
    pub variants: Connection<RemoteVariant>,
    #[serde(default)]
    pub images: Connection<RemoteImage>,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct RemoteVariant {
    pub id: String,
    #[serde(default)]
    pub sku: Option<String>,
    #[serde(default)]
    pub price: Option<String>,
    #[serde(default)]
    pub title: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct RemoteImage {
    #[serde(default)]
    pub id: Option<String>,
    #[serde(default)]
    pub src: Option<String>,
}

/// Entry of a mutation's `userErrors` / `mediaUserErrors` list.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct UserError {
    #[serde(default)]
    pub field: Option<Vec<String>>,
    pub message: String,
}

impl fmt::Display for UserError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.field {
            Some(path) if !path.is_empty() => write!(f, "{}: {}", path.join("."), self.message),
            _ => f.write_str(&self.message),
        }
    }
}

/// `ProductInput` for `productCreate` / `productUpdate`.
///
/// `id` is set only when updating an existing product.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductInput {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    pub title: String,
    pub handle: String,
    pub description_html: String,
    pub product_type: String,
    pub vendor: String,
    pub tags: Vec<String>,
}

/// `ProductVariantsBulkInput` targeting a single existing variant.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct VariantInput {
    pub id: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub price: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sku: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum MediaContentType {
    Image,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateMediaInput {
    pub original_source: String,
    pub media_content_type: MediaContentType,
}

impl CreateMediaInput {
    #[must_use]
    pub fn image(src: &str) -> Self {
        Self {
            original_source: src.to_owned(),
            media_content_type: MediaContentType::Image,
        }
    }
}

/// Media descriptor echoed by `productCreateMedia`. The preview is usually
/// still processing right after creation, so every level is optional.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct CreatedMedia {
    #[serde(default)]
    pub preview: Option<MediaPreview>,
}

impl CreatedMedia {
    #[must_use]
    pub fn preview_url(&self) -> Option<&str> {
        self.preview
            .as_ref()
            .and_then(|p| p.image.as_ref())
            .and_then(|i| i.url.as_deref())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct MediaPreview {
    #[serde(default)]
    pub image: Option<PreviewImage>,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct PreviewImage {
    #[serde(default)]
    pub url: Option<String>,
}

// Response envelopes (the `data` object of each operation).

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct ProductByHandleData {
    pub product_by_handle: Option<RemoteProduct>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct ProductMutationPayload {
    #[serde(default)]
    pub product: Option<RemoteProduct>,
    #[serde(default)]
    pub user_errors: Vec<UserError>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct ProductCreateData {
    pub product_create: ProductMutationPayload,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct ProductUpdateData {
    pub product_update: ProductMutationPayload,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct VariantsBulkUpdatePayload {
    #[serde(default)]
    pub product_variants: Option<Vec<RemoteVariant>>,
    #[serde(default)]
    pub user_errors: Vec<UserError>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct VariantsBulkUpdateData {
    pub product_variants_bulk_update: VariantsBulkUpdatePayload,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct CreateMediaPayload {
    #[serde(default)]
    pub media: Option<Vec<CreatedMedia>>,
    #[serde(default)]
    pub media_user_errors: Vec<UserError>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct ProductCreateMediaData {
    pub product_create_media: CreateMediaPayload,
}
