use anyhow::{Context, Result, bail};
use clap::Parser;
use pdfsearch::{
    backend::HttpSearchBackend,
    config, logging,
    controller::{SearchController, SubmissionStatus},
    document::CandidateFile,
    render::PageView,
};
use std::path::PathBuf;

const SUGGESTED_TOP_N: std::ops::RangeInclusive<i64> = 1..=20;

#[derive(Parser)]
#[command(
    name = "pdfsearch",
    about = "Upload a PDF and list the passages that best match a query"
)]
struct Cli {
    /// PDF document to search.
    #[arg(long, short)]
    file: Option<PathBuf>,
    /// What to search for.
    #[arg(long, short, default_value = "")]
    query: String,
    /// Number of passages to request (defaults to PDFSEARCH_TOP_N or 5).
    #[arg(long, short = 'n', allow_negative_numbers = true)]
    top_n: Option<i64>,
    /// Search endpoint (defaults to PDFSEARCH_ENDPOINT).
    #[arg(long)]
    endpoint: Option<String>,
    /// Print the full text of the given result (1-based).
    #[arg(long)]
    inspect: Option<usize>,
}

#[tokio::main]
async fn main() {
    if let Err(err) = run().await {
        eprintln!("error: {err:#}");
        std::process::exit(1);
    }
}

async fn run() -> Result<()> {
    let cli = Cli::parse();
    let config = config::init_config().context("failed to load configuration")?;
    logging::init_tracing(config.log_file.as_deref());

    let endpoint = cli.endpoint.as_deref().unwrap_or(&config.endpoint);
    let backend = HttpSearchBackend::new(endpoint).context("failed to build search client")?;

    let mut controller = SearchController::new(cli.top_n.unwrap_or(config.default_top_n));
    if !SUGGESTED_TOP_N.contains(&controller.result_limit()) {
        tracing::warn!(
            top_n = controller.result_limit(),
            "Result limit outside 1-20; forwarding unchanged"
        );
    }

    if let Some(path) = &cli.file {
        let file = CandidateFile::from_path(path).context("failed to load document")?;
        controller.accept_dropped_files([file]);
    }
    controller.set_query_text(cli.query);

    let ticket = match controller.begin_submission() {
        Ok(ticket) => ticket,
        Err(reason) => {
            print!("{}", PageView::from_controller(&controller));
            bail!("{reason}");
        }
    };

    eprint!("{}", PageView::from_controller(&controller).results);
    tracing::info!(endpoint = %backend.endpoint(), "Submitting search");
    let outcome = ticket.dispatch(&backend).await;
    let status = controller.resolve(ticket.id(), outcome);

    if let Some(position) = cli.inspect {
        let inspected = position
            .checked_sub(1)
            .and_then(|index| controller.inspect_result(index));
        if inspected.is_none() {
            tracing::warn!(position, "No result at that position to inspect");
        }
    }

    print!("{}", PageView::from_controller(&controller));

    if status == SubmissionStatus::Failed {
        bail!("search failed");
    }
    Ok(())
}
