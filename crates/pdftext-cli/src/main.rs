use std::io::IsTerminal;
use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;
use tracing_subscriber::EnvFilter;

mod output;

use output::ColorMode;

/// Extract plain text from a PDF, falling back across several extraction libraries
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Cli {
    /// Path to the PDF file
    #[arg(required_unless_present = "list_backends")]
    pdf_path: Option<PathBuf>,

    /// List extraction strategies in priority order and exit
    #[arg(long)]
    list_backends: bool,

    /// Disable colored output
    #[arg(long)]
    no_color: bool,

    /// Log strategy outcomes to stderr (-v for info, -vv for debug)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

fn main() -> ExitCode {
    // Argument errors exit 1 like every other failure; help and version exit 0.
    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        Err(e) => {
            // A closed stderr loses the usage message; the exit code still reports it.
            e.print().ok();
            return if e.use_stderr() {
                ExitCode::FAILURE
            } else {
                ExitCode::SUCCESS
            };
        }
    };

    init_tracing(cli.verbose);
    std::panic::set_hook(Box::new(|info| {
        tracing::debug!(panic = %info, "panic inside extraction backend");
    }));

    match run(cli) {
        Ok(code) => code,
        Err(e) => {
            tracing::error!(error = %e, "failed to write output");
            ExitCode::FAILURE
        }
    }
}

fn init_tracing(verbose: u8) {
    let filter = match verbose {
        0 => EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        1 => EnvFilter::new("info"),
        _ => EnvFilter::new("debug"),
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn run(cli: Cli) -> anyhow::Result<ExitCode> {
    let dispatcher = pdftext_ingest::default_dispatcher();

    if cli.list_backends {
        let mut stdout = std::io::stdout().lock();
        let color = ColorMode(!cli.no_color && stdout.is_terminal());
        output::print_backends(&mut stdout, dispatcher.strategies(), color)?;
        return Ok(ExitCode::SUCCESS);
    }

    let Some(pdf_path) = cli.pdf_path else {
        return Ok(ExitCode::FAILURE);
    };

    // Stdout is only touched once the dispatcher has returned.
    match dispatcher.extract(&pdf_path) {
        Ok(extraction) => {
            output::print_text(&mut std::io::stdout().lock(), &extraction.text)?;
            Ok(ExitCode::SUCCESS)
        }
        Err(e) => {
            tracing::info!(error = %e, "extraction failed");
            Ok(ExitCode::FAILURE)
        }
    }
}
