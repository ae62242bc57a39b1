mod batch;
mod circuit;
mod config;
mod render;
mod routes;
mod state;

use std::io::{self, Read};
use std::path::{Path, PathBuf};

use clap::{Args, Parser, Subcommand};
use tracing::info;

use crate::batch::{BatchError, BatchMode, BatchOptions, Outcome};
use crate::config::{ConfigError, RenderConfig, ServerConfig};
use crate::render::Rasterizer;

#[derive(Debug, thiserror::Error)]
enum CliError {
    #[error("invalid configuration: {0}")]
    Config(#[from] ConfigError),
    #[error("failed to read {path}: {source}")]
    Read { path: String, source: io::Error },
    #[error("failed to write {}: {source}", path.display())]
    Write { path: PathBuf, source: io::Error },
    #[error("failed to bind {addr}: {source}")]
    Bind { addr: String, source: io::Error },
    #[error("server failed: {0}")]
    Serve(io::Error),
    #[error(transparent)]
    Batch(#[from] BatchError),
    #[error("{failed} of {total} construct lines failed")]
    LinesFailed { failed: usize, total: usize },
}

#[derive(Parser, Debug)]
#[command(name = "genecircuit", about = "Genetic circuit diagram renderer")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Serve the visualizer page and the render API.
    Serve {
        /// Listen port; defaults to 3000.
        #[arg(long, env = "PORT")]
        port: Option<u16>,
    },
    /// Render construct lines to one PNG file per construct.
    Render(RenderArgs),
}

#[derive(Args, Debug)]
struct RenderArgs {
    /// Input file with one construct per line; `-` reads stdin.
    #[arg(long, default_value = "-")]
    input: String,

    #[arg(long, default_value = ".")]
    out_dir: PathBuf,

    /// Stop at the first bad line instead of rendering the rest.
    #[arg(long)]
    fail_fast: bool,

    /// Overrides `GENECIRCUIT_DPI`.
    #[arg(long)]
    dpi: Option<u32>,
}

#[tokio::main]
async fn main() -> Result<(), CliError> {
    tracing_subscriber::fmt::init();

    let cli = Cli::parse();
    match cli.command {
        Command::Serve { port } => run_serve(port).await,
        Command::Render(args) => run_render(&args),
    }
}

async fn run_serve(port: Option<u16>) -> Result<(), CliError> {
    let mut config = ServerConfig::from_env()?;
    if let Some(port) = port {
        config.port = port;
    }
    let port = config.port;

    let state = state::AppState::new(config);
    let (width, height) = state.rasterizer.pixel_size();
    let app = routes::app(state);

    let addr = format!("0.0.0.0:{port}");
    let listener = match tokio::net::TcpListener::bind(&addr).await {
        Ok(listener) => listener,
        Err(source) => return Err(CliError::Bind { addr, source }),
    };

    info!(%port, width, height, "genecircuit listening");
    axum::serve(listener, app).await.map_err(CliError::Serve)
}

fn run_render(args: &RenderArgs) -> Result<(), CliError> {
    let config = with_dpi(RenderConfig::from_env()?, args.dpi)?;
    let input = read_input(&args.input)?;
    let rasterizer = Rasterizer::new(&config);
    let mode = if args.fail_fast { BatchMode::FailFast } else { BatchMode::ContinueOnError };

    let written = render_to_dir(&input, &rasterizer, mode, &args.out_dir)?;
    for path in &written {
        println!("{}", path.display());
    }
    Ok(())
}

/// Apply a `--dpi` override and re-validate.
fn with_dpi(mut config: RenderConfig, dpi: Option<u32>) -> Result<RenderConfig, CliError> {
    if let Some(dpi) = dpi {
        config.dpi = dpi;
        config.validate()?;
    }
    Ok(config)
}

fn read_input(path: &str) -> Result<String, CliError> {
    let result = if path == "-" {
        let mut input = String::new();
        io::stdin().read_to_string(&mut input).map(|_| input)
    } else {
        std::fs::read_to_string(path)
    };
    result.map_err(|source| CliError::Read { path: path.to_owned(), source })
}

/// Render every line of `input` into `out_dir`, one `{name}.png` per construct.
///
/// Bad lines are reported on stderr. In continue-on-error mode the good lines
/// are still written and the run fails afterwards; fail-fast writes nothing.
fn render_to_dir(input: &str, rasterizer: &Rasterizer, mode: BatchMode, out_dir: &Path) -> Result<Vec<PathBuf>, CliError> {
    let report = batch::run(input, rasterizer, BatchOptions { mode, max_constructs: None })?;

    std::fs::create_dir_all(out_dir).map_err(|source| CliError::Write { path: out_dir.to_path_buf(), source })?;

    let mut written = Vec::new();
    for outcome in &report.outcomes {
        match outcome {
            Outcome::Rendered(rendered) => {
                let path = out_dir.join(output_filename(&rendered.construct.filename()));
                std::fs::write(&path, &rendered.png).map_err(|source| CliError::Write { path: path.clone(), source })?;
                written.push(path);
            }
            Outcome::Failed(error) => eprintln!("{error}"),
        }
    }

    if report.has_errors() {
        let failed = report.errors().count();
        return Err(CliError::LinesFailed { failed, total: report.outcomes.len() });
    }
    info!(count = written.len(), dir = %out_dir.display(), "constructs written");
    Ok(written)
}

/// Keep a construct's file inside the output directory.
fn output_filename(filename: &str) -> String {
    filename.replace(['/', '\\'], "_")
}

#[cfg(test)]
#[path = "main_test.rs"]
mod tests;
