use std::fs;
use std::io::{self, Read, Write};
use std::path::{Path, PathBuf};

use clap::{Args, Parser, Subcommand, ValueEnum};
use summary::{DEFAULT_TITLE, HtmlDocument, LowUtilizationReport};

#[derive(Debug, thiserror::Error)]
enum CliError {
    #[error("failed to read {input}: {source}")]
    ReadInput { input: String, source: io::Error },
    #[error("failed to write {path}: {source}")]
    WriteOutput { path: String, source: io::Error },
    #[error(transparent)]
    Payload(#[from] summary::PayloadError),
    #[error("invalid JSON output: {0}")]
    InvalidJson(#[from] serde_json::Error),
    #[error("http request failed: {0}")]
    Http(#[from] reqwest::Error),
    #[error("server returned HTTP {status}: {message}")]
    ServerError { status: u16, message: String },
}

#[derive(Parser, Debug)]
#[command(name = "util-cli", about = "Render low-utilization summaries offline or through util-report")]
struct Cli {
    #[arg(long, env = "UTIL_REPORT_BASE_URL", default_value = "http://127.0.0.1:3000")]
    base_url: String,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Check that the service answers `/healthz`.
    Ping,
    /// Render a report locally.
    Render(RenderArgs),
    /// Post a report to the service and print the page it returns.
    Remote(RemoteArgs),
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
enum OutputFormat {
    /// Complete HTML page.
    Html,
    /// Date label and bucket sections only.
    Fragment,
    /// Element-state snapshot.
    Json,
}

#[derive(Args, Debug)]
struct RenderArgs {
    #[arg(long, default_value = "-", help = "Report JSON path, or - for stdin")]
    input: String,

    #[arg(long, value_enum, default_value_t = OutputFormat::Html)]
    format: OutputFormat,

    #[arg(long, default_value = DEFAULT_TITLE)]
    title: String,

    #[arg(long, help = "Write here instead of stdout")]
    output: Option<PathBuf>,
}

#[derive(Args, Debug)]
struct RemoteArgs {
    #[arg(long, default_value = "-", help = "Report JSON path, or - for stdin")]
    input: String,

    #[arg(long, help = "Write here instead of stdout")]
    output: Option<PathBuf>,
}

#[tokio::main]
async fn main() -> Result<(), CliError> {
    tracing_subscriber::fmt().with_writer(io::stderr).init();

    let cli = Cli::parse();
    let base_url = cli.base_url.trim_end_matches('/').to_owned();

    match cli.command {
        Command::Ping => run_ping(&base_url).await,
        Command::Render(args) => run_render(args),
        Command::Remote(args) => run_remote(&base_url, args).await,
    }
}

async fn run_ping(base_url: &str) -> Result<(), CliError> {
    let response = reqwest::get(format!("{base_url}/healthz")).await?;
    let status = response.status();
    if !status.is_success() {
        return Err(CliError::ServerError { status: status.as_u16(), message: "health check failed".to_owned() });
    }
    println!("ok");
    Ok(())
}

fn run_render(args: RenderArgs) -> Result<(), CliError> {
    let raw = read_input(&args.input)?;
    let report = LowUtilizationReport::from_json(&raw)?;
    let rendered = render_output(&report, args.format, &args.title)?;
    tracing::info!(
        input = %args.input,
        below_35 = report.bucket(summary::Bucket::Below35).len(),
        below_50 = report.bucket(summary::Bucket::Below50).len(),
        "rendered utilization summary"
    );
    write_output(args.output.as_deref(), &rendered)
}

async fn run_remote(base_url: &str, args: RemoteArgs) -> Result<(), CliError> {
    let raw = read_input(&args.input)?;
    // Fail locally on a bad payload instead of round-tripping it.
    let report = LowUtilizationReport::from_json(&raw)?;

    let client = reqwest::Client::new();
    let request = remote_request(&client, base_url, &report)?;
    let response = client.execute(request).await?;
    let status = response.status();
    let body = response.text().await?;
    if !status.is_success() {
        return Err(CliError::ServerError { status: status.as_u16(), message: body });
    }
    write_output(args.output.as_deref(), &body)
}

fn remote_request(
    client: &reqwest::Client,
    base_url: &str,
    report: &LowUtilizationReport,
) -> Result<reqwest::Request, CliError> {
    Ok(client.post(format!("{base_url}/util-summary")).json(report).build()?)
}

fn render_output(report: &LowUtilizationReport, format: OutputFormat, title: &str) -> Result<String, CliError> {
    let doc = HtmlDocument::rendered(report);
    let rendered = match format {
        OutputFormat::Html => doc.render_page(title, report.total_resources),
        OutputFormat::Fragment => doc.render_tables_fragment(),
        OutputFormat::Json => {
            let mut json = serde_json::to_string_pretty(&doc)?;
            json.push('\n');
            json
        }
    };
    Ok(rendered)
}

fn read_input(input: &str) -> Result<String, CliError> {
    let result = if input == "-" {
        let mut raw = String::new();
        io::stdin().read_to_string(&mut raw).map(|_| raw)
    } else {
        fs::read_to_string(input)
    };
    result.map_err(|source| CliError::ReadInput { input: input.to_owned(), source })
}

fn write_output(output: Option<&Path>, content: &str) -> Result<(), CliError> {
    match output {
        Some(path) => fs::write(path, content)
            .map_err(|source| CliError::WriteOutput { path: path.display().to_string(), source }),
        None => io::stdout()
            .write_all(content.as_bytes())
            .map_err(|source| CliError::WriteOutput { path: "stdout".to_owned(), source }),
    }
}

#[cfg(test)]
#[path = "main_test.rs"]
mod tests;
