pub mod client;
pub mod error;
pub mod input;
mod queries;
pub mod retry;
pub mod types;

pub use client::AdminClient;
pub use error::{AdminError, MutationOp};
pub use input::{build_product_input, build_variant_input, collect_image_srcs, split_tags};
pub use retry::RetryPolicy;
pub use types::{
    CreatedMedia, ProductInput, RemoteImage, RemoteProduct, RemoteVariant, UserError,
    VariantInput,
};
