//! Single Admin API write operations.
//!
//! Each method checks the mutation's own error list and turns a non-empty
//! list into [`AdminError::Mutation`]. Nothing here is retried beyond what
//! the transport already does.

use serde_json::json;

use crate::error::{AdminError, MutationOp};
use crate::queries::{PRODUCT_CREATE, PRODUCT_CREATE_MEDIA, PRODUCT_UPDATE, VARIANTS_BULK_UPDATE};
use crate::types::{
    CreateMediaInput, CreatedMedia, ProductCreateData, ProductCreateMediaData, ProductInput,
    ProductMutationPayload, ProductUpdateData, RemoteProduct, RemoteVariant, UserError,
    VariantInput, VariantsBulkUpdateData,
};

use super::AdminClient;

fn check_user_errors(op: MutationOp, errors: Vec<UserError>) -> Result<(), AdminError> {
    if errors.is_empty() {
        Ok(())
    } else {
        Err(AdminError::Mutation { op, errors })
    }
}

fn into_product(
    op: MutationOp,
    payload: ProductMutationPayload,
) -> Result<RemoteProduct, AdminError> {
    check_user_errors(op, payload.user_errors)?;
    payload.product.ok_or(AdminError::MissingPayload { op })
}

impl AdminClient {
    /// Creates a product and returns it with up to 20 variants and images.
    ///
    /// # Errors
    ///
    /// - [`AdminError::Mutation`] with op `create` if `userErrors` is non-empty.
    /// - [`AdminError::MissingPayload`] if no product came back.
    /// - Any transport error from [`AdminClient::execute`].
    pub async fn product_create(&self, input: &ProductInput) -> Result<RemoteProduct, AdminError> {
        let data: ProductCreateData = self
            .execute_as(
                PRODUCT_CREATE,
                json!({ "input": input }),
                &format!("productCreate(handle={})", input.handle),
            )
            .await?;
        into_product(MutationOp::Create, data.product_create)
    }

    /// Updates the product identified by `input.id`.
    ///
    /// # Errors
    ///
    /// - [`AdminError::Mutation`] with op `update` if `userErrors` is non-empty.
    /// - [`AdminError::MissingPayload`] if no product came back.
    /// - Any transport error from [`AdminClient::execute`].
    pub async fn product_update(&self, input: &ProductInput) -> Result<RemoteProduct, AdminError> {
        let data: ProductUpdateData = self
            .execute_as(
                PRODUCT_UPDATE,
                json!({ "input": input }),
                &format!("productUpdate(handle={})", input.handle),
            )
            .await?;
        into_product(MutationOp::Update, data.product_update)
    }

    /// Updates one variant through a single-element bulk update and returns it.
    ///
    /// # Errors
    ///
    /// - [`AdminError::Mutation`] with op `variantUpdate` if `userErrors` is non-empty.
    /// - [`AdminError::MissingPayload`] if the response lists no variants.
    /// - Any transport error from [`AdminClient::execute`].
    pub async fn variant_update(
        &self,
        product_id: &str,
        variant: &VariantInput,
    ) -> Result<RemoteVariant, AdminError> {
        let data: VariantsBulkUpdateData = self
            .execute_as(
                VARIANTS_BULK_UPDATE,
                json!({ "productId": product_id, "variants": [variant] }),
                &format!("productVariantsBulkUpdate(productId={product_id})"),
            )
            .await?;
        let payload = data.product_variants_bulk_update;
        check_user_errors(MutationOp::VariantUpdate, payload.user_errors)?;
        payload
            .product_variants
            .and_then(|variants| variants.into_iter().next())
            .ok_or(AdminError::MissingPayload {
                op: MutationOp::VariantUpdate,
            })
    }

    /// Attaches an image to a product from a public URL.
    ///
    /// # Errors
    ///
    /// - [`AdminError::Mutation`] with op `createImage` if `mediaUserErrors` is non-empty.
    /// - Any transport error from [`AdminClient::execute`].
    pub async fn create_image(
        &self,
        product_id: &str,
        src: &str,
    ) -> Result<Vec<CreatedMedia>, AdminError> {
        let data: ProductCreateMediaData = self
            .execute_as(
                PRODUCT_CREATE_MEDIA,
                json!({ "productId": product_id, "media": [CreateMediaInput::image(src)] }),
                &format!("productCreateMedia(productId={product_id})"),
            )
            .await?;
        let payload = data.product_create_media;
        check_user_errors(MutationOp::CreateImage, payload.media_user_errors)?;
        Ok(payload.media.unwrap_or_default())
    }
}
