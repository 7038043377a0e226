use std::fmt;

use thiserror::Error;

use crate::types::UserError;

/// Admin API mutation that reported application-level errors.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MutationOp {
    Create,
    Update,
    VariantUpdate,
    CreateImage,
}

impl fmt::Display for MutationOp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            MutationOp::Create => "create",
            MutationOp::Update => "update",
            MutationOp::VariantUpdate => "variantUpdate",
            MutationOp::CreateImage => "createImage",
        };
        f.write_str(name)
    }
}

#[derive(Debug, Error)]
pub enum AdminError {
    /// Network or TLS failure from the underlying HTTP client. Not retried.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("invalid Admin API endpoint \"{endpoint}\": {reason}")]
    InvalidEndpoint { endpoint: String, reason: String },

    /// Non-200 status outside the transient set.
    #[error("HTTP {status}: {body}")]
    Transport { status: u16, body: String },

    #[error("max retries exceeded for GraphQL request ({attempts} attempts, last HTTP {last_status})")]
    TransportExhausted { attempts: u32, last_status: u16 },

    /// Top-level `errors` array in an HTTP 200 response. Never retried.
    #[error("GraphQL errors: {}", render_json_list(.errors))]
    GraphQl { errors: Vec<serde_json::Value> },

    /// `userErrors` / `mediaUserErrors` returned by a mutation.
    #[error("{op} errors: {}", render_user_errors(.errors))]
    Mutation { op: MutationOp, errors: Vec<UserError> },

    #[error("{op} returned no result")]
    MissingPayload { op: MutationOp },

    #[error("JSON deserialization error for {context}: {source}")]
    Deserialize {
        context: String,
        #[source]
        source: serde_json::Error,
    },
}

fn render_json_list(values: &[serde_json::Value]) -> String {
    values
        .iter()
        .map(|value| {
            value
                .get("message")
                .and_then(serde_json::Value::as_str)
                .map_or_else(|| value.to_string(), str::to_owned)
        })
        .collect::<Vec<_>>()
        .join("; ")
}

fn render_user_errors(errors: &[UserError]) -> String {
    errors
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join("; ")
}
