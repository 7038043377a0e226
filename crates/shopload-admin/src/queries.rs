//! GraphQL documents sent to the Admin API.
//!
//! Operation names are unique and none is a prefix of another, so request
//! bodies can be told apart by name alone.

pub(crate) const PRODUCT_BY_HANDLE: &str = r"
query GetProductByHandle($handle: String!) {
  productByHandle(handle: $handle) {
    id
    title
    handle
    variants(first: 50) {
      edges { node { id sku price title } }
    }
    images(first: 50) {
      edges { node { id src } }
    }
  }
}
";

pub(crate) const PRODUCT_CREATE: &str = r"
mutation CreateProduct($input: ProductInput!) {
  productCreate(input: $input) {
    product {
      id
      title
      handle
      variants(first: 20) {
        edges { node { id sku price title } }
      }
      images(first: 20) {
        edges { node { id src } }
      }
    }
    userErrors { field message }
  }
}
";

pub(crate) const PRODUCT_UPDATE: &str = r"
mutation UpdateProduct($input: ProductInput!) {
  productUpdate(input: $input) {
    product {
      id
      title
      handle
      variants(first: 20) {
        edges { node { id sku price title } }
      }
      images(first: 20) {
        edges { node { id src } }
      }
    }
    userErrors { field message }
  }
}
";

pub(crate) const VARIANTS_BULK_UPDATE: &str = r"
mutation UpdateVariant($productId: ID!, $variants: [ProductVariantsBulkInput!]!) {
  productVariantsBulkUpdate(productId: $productId, variants: $variants) {
    productVariants { id sku price title }
    userErrors { field message }
  }
}
";

pub(crate) const PRODUCT_CREATE_MEDIA: &str = r"
mutation AttachProductImage($productId: ID!, $media: [CreateMediaInput!]!) {
  productCreateMedia(productId: $productId, media: $media) {
    media {
      preview { image { url } }
    }
    mediaUserErrors { field message }
  }
}
";
