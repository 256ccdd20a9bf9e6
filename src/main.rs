//! excel2md - Convert spreadsheets into Markdown tables

use std::io::{self, Write};
use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use excel2md::{
    default_output_path, write_markdown, ConverterBuilder, DateFormat, Excel2MdError,
    SheetSelector,
};

/// Convert Excel (xlsx/xls/xlsb/ods) sheets into Markdown tables
#[derive(Parser, Debug)]
#[command(name = "excel2md")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Input spreadsheet file
    input: PathBuf,

    /// Output Markdown file (default: input path with .md extension)
    #[arg(short, long, conflicts_with = "stdout")]
    output: Option<PathBuf>,

    /// Convert only this sheet (default: all sheets)
    #[arg(short, long)]
    sheet: Option<String>,

    /// chrono format string for date cells (e.g. "%Y/%m/%d")
    #[arg(long)]
    date_format: Option<String>,

    /// Pad cells so that table columns line up
    #[arg(long)]
    align: bool,

    /// Print the document to stdout instead of writing a file
    #[arg(long)]
    stdout: bool,

    /// Enable debug logging
    #[arg(short, long)]
    verbose: bool,
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_logger(cli.verbose);

    match run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("✗ Conversion failed: {}", e);
            ExitCode::from(1)
        }
    }
}

/// ログはstderrに出力し、stdoutは変換結果用に空けておく
fn init_logger(verbose: bool) {
    let default_directive = if verbose { "excel2md=debug" } else { "excel2md=warn" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_directive));

    tracing_subscriber::registry()
        .with(filter)
        .with(
            tracing_subscriber::fmt::layer()
                .with_target(false)
                .with_writer(io::stderr)
                .compact(),
        )
        .init();
}

fn run(cli: Cli) -> Result<(), Excel2MdError> {
    let mut builder = ConverterBuilder::new()
        .with_sheet_selector(SheetSelector::from_optional_name(cli.sheet))
        .with_aligned_columns(cli.align);
    if let Some(format) = cli.date_format {
        builder = builder.with_date_format(DateFormat::Custom(format));
    }
    let converter = builder.build()?;

    if cli.stdout {
        let markdown = converter.convert_path(&cli.input)?;
        let mut stdout = io::stdout().lock();
        stdout.write_all(markdown.as_bytes())?;
        stdout.flush()?;
        return Ok(());
    }

    println!("Reading: {}", cli.input.display());
    let markdown = converter.convert_path(&cli.input)?;

    let output = cli
        .output
        .unwrap_or_else(|| default_output_path(&cli.input));
    write_markdown(&output, &markdown)?;

    println!("✓ Saved to: {}", output.display());
    println!("✓ Conversion complete!");

    Ok(())
}
