mod commands;
mod output;

use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(
    name = "faktura",
    version,
    about = "Extract fixed-layout PDF invoices into xlsx spreadsheets"
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run the full pipeline: locate a PDF, extract, write the spreadsheet
    Run {
        /// Directory holding the invoice PDF
        #[arg(long, default_value = "INVOICE")]
        input_dir: PathBuf,

        /// Output xlsx path (overwritten if it exists)
        #[arg(short = 'O', long = "out", default_value = "output.xlsx")]
        out: PathBuf,

        /// Custom layout descriptor JSON (default: the built-in 'bazaar' layout)
        #[arg(short, long, value_name = "FILE")]
        layout: Option<PathBuf>,

        /// Open the written file with the platform opener
        #[arg(long)]
        open: bool,
    },
    /// Probe a PDF for a registered supplier number (without extracting)
    Detect {
        /// Path to the PDF file
        pdf_file: PathBuf,

        /// Custom layout descriptor JSON (default: the built-in 'bazaar' layout)
        #[arg(short, long, value_name = "FILE")]
        layout: Option<PathBuf>,

        /// Output format: table (default) or json
        #[arg(short, long, default_value = "table")]
        output: String,
    },
    /// Manage and inspect layout descriptors
    Layouts {
        #[command(subcommand)]
        action: LayoutsAction,
    },
}

#[derive(Subcommand)]
enum LayoutsAction {
    /// List predefined layouts
    List,
    /// Show a predefined layout in detail
    Show {
        /// Preset name (e.g., "bazaar")
        preset: String,
    },
    /// Validate a custom layout file
    Validate {
        /// Path to JSON layout file
        file: PathBuf,
    },
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Run {
            input_dir,
            out,
            layout,
            open,
        } => commands::run::run(input_dir, out, layout, open),
        Commands::Detect {
            pdf_file,
            layout,
            output,
        } => commands::detect::run(pdf_file, layout, &output),
        Commands::Layouts { action } => match action {
            LayoutsAction::List => commands::layouts::list(),
            LayoutsAction::Show { preset } => commands::layouts::show(&preset),
            LayoutsAction::Validate { file } => commands::layouts::validate(&file),
        },
    };

    if let Err(e) = result {
        eprintln!("Error: {e}");
        std::process::exit(1);
    }
}
