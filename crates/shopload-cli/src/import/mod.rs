//! Per-row reconciliation: lookup, build, mutate, report.
//!
//! Rows are processed strictly in order and independently. A failed row is
//! reported and left as-is (no rollback); the next row starts regardless.

mod paths;

use std::fmt;
use std::io::{self, Write};

use shopload_admin::{build_product_input, AdminClient, AdminError};
use shopload_core::ProductRow;
use thiserror::Error;

#[derive(Debug, Error)]
pub(crate) enum RowError {
    #[error("Each row must have a 'Handle' value")]
    MissingHandle,

    #[error(transparent)]
    Admin(#[from] AdminError),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Action {
    Create,
    Update,
}

impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Action::Create => f.write_str("create"),
            Action::Update => f.write_str("update"),
        }
    }
}

/// What happened to one row.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum RowOutcome {
    DryRun {
        action: Action,
        title: String,
        handle: String,
        with_image: bool,
    },
    Created {
        title: String,
        id: String,
    },
    Updated {
        title: String,
        id: String,
    },
}

impl fmt::Display for RowOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RowOutcome::DryRun {
                action,
                title,
                handle,
                with_image,
            } => {
                let extra = if *with_image { " + image" } else { "" };
                write!(f, "[DRY-RUN] Would {action} product '{title}' ({handle}){extra}")
            }
            RowOutcome::Created { title, id } => write!(f, "Created product: {title} ({id})"),
            RowOutcome::Updated { title, id } => write!(f, "Updated product: {title} ({id})"),
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub(crate) struct ImportSummary {
    pub processed: usize,
    pub succeeded: usize,
    pub failed: usize,
}

impl fmt::Display for ImportSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Processed {} rows: {} succeeded, {} failed",
            self.processed, self.succeeded, self.failed
        )
    }
}

/// Reconciles one row against the store.
///
/// The product fetched at the start is the only remote view used for every
/// decision in this row. In dry-run mode no mutation is issued.
///
/// # Errors
///
/// [`RowError::MissingHandle`] for a blank handle; otherwise any
/// [`AdminError`] from the lookup or a mutation.
pub(crate) async fn process_row(
    client: &AdminClient,
    row: &ProductRow,
    dry_run: bool,
) -> Result<RowOutcome, RowError> {
    let handle = row.handle.trim();
    if handle.is_empty() {
        return Err(RowError::MissingHandle);
    }
    let image_src = row.image_src.trim();

    let existing = client.find_by_handle(handle).await?;
    let input = build_product_input(row, existing.as_ref());

    if dry_run {
        let action = if existing.is_some() {
            Action::Update
        } else {
            Action::Create
        };
        return Ok(RowOutcome::DryRun {
            action,
            title: input.title,
            handle: handle.to_owned(),
            with_image: !image_src.is_empty(),
        });
    }

    match existing {
        Some(existing) => {
            tracing::info!(handle, product_id = %existing.id, "updating product");
            let product = paths::update_product(client, row, &input, &existing).await?;
            Ok(RowOutcome::Updated {
                title: product.title,
                id: product.id,
            })
        }
        None => {
            tracing::info!(handle, "creating product");
            let product = paths::create_product(client, row, &input).await?;
            Ok(RowOutcome::Created {
                title: product.title,
                id: product.id,
            })
        }
    }
}

/// Processes every row in order, writing one report line per row to `out`.
///
/// # Errors
///
/// Only fails if writing to `out` fails; row failures are reported, not returned.
pub(crate) async fn run_import<W: Write>(
    client: &AdminClient,
    rows: &[ProductRow],
    dry_run: bool,
    out: &mut W,
) -> io::Result<ImportSummary> {
    let mut summary = ImportSummary::default();

    for (index, row) in rows.iter().enumerate() {
        summary.processed += 1;
        match process_row(client, row, dry_run).await {
            Ok(outcome) => {
                summary.succeeded += 1;
                writeln!(out, "{outcome}")?;
            }
            Err(e) => {
                summary.failed += 1;
                tracing::error!(row = index, handle = %row.handle, error = %e, "row import failed");
                writeln!(out, "Row {index} failed: {e}")?;
            }
        }
    }

    Ok(summary)
}

#[cfg(test)]
#[path = "import_test.rs"]
mod tests;
