mod import;
mod sheet;

use std::io::Write;
use std::path::PathBuf;

use clap::Parser;
use tracing_subscriber::EnvFilter;

#[derive(Debug, Parser)]
#[command(name = "shopload")]
#[command(about = "Import/update Shopify products from Excel/CSV via the GraphQL Admin API")]
struct Cli {
    /// Path to a .xlsx, .xls or .csv file
    file_path: PathBuf,

    /// Worksheet name (Excel only; defaults to the first sheet)
    #[arg(long)]
    sheet: Option<String>,

    /// Print what would be done without writing anything to Shopify
    #[arg(long)]
    dry_run: bool,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let config = shopload_core::load_import_config()?;
    let env_filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(config.log_level.clone()))?;
    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr)
        .init();

    let rows = sheet::read_rows(&cli.file_path, cli.sheet.as_deref())?;
    let client = shopload_admin::AdminClient::new(&config)?;
    tracing::info!(
        file = %cli.file_path.display(),
        rows = rows.len(),
        dry_run = cli.dry_run,
        endpoint = %client.endpoint(),
        "starting import"
    );

    let mut stdout = std::io::stdout().lock();
    let summary = import::run_import(&client, &rows, cli.dry_run, &mut stdout).await?;
    writeln!(stdout, "{summary}")?;

    Ok(())
}
