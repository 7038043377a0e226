//! Product lookup by handle.

use serde_json::json;

use crate::error::AdminError;
use crate::queries::PRODUCT_BY_HANDLE;
use crate::types::{ProductByHandleData, RemoteProduct};

use super::AdminClient;

impl AdminClient {
    /// Fetches the product with `handle`, including its first 50 variants
    /// and first 50 images.
    ///
    /// `Ok(None)` means the store has no product with that handle; callers
    /// use it to choose between create and update.
    ///
    /// # Errors
    ///
    /// Propagates any transport error from [`AdminClient::execute`], or
    /// [`AdminError::Deserialize`] if the product does not have the expected shape.
    pub async fn find_by_handle(&self, handle: &str) -> Result<Option<RemoteProduct>, AdminError> {
        let data: ProductByHandleData = self
            .execute_as(
                PRODUCT_BY_HANDLE,
                json!({ "handle": handle }),
                &format!("productByHandle(handle={handle})"),
            )
            .await?;
        Ok(data.product_by_handle)
    }
}
