// src/main.rs

use std::path::PathBuf;

use anyhow::Context;
use clap::{ArgAction, Parser, Subcommand, ValueEnum};
use huffzip::codes::{CodeTable, symbol_label};
use huffzip::report::Report;
use huffzip::{compress, logger};

#[derive(Parser)]
#[command(name = "huffzip", version)]
#[command(about = "Lossless file compression with static Huffman coding.", long_about = None)]
struct Cli {
    /// More log output; repeat for more detail
    #[arg(short, long, action = ArgAction::Count, global = true)]
    verbose: u8,
    /// Less log output
    #[arg(short, long, action = ArgAction::Count, global = true)]
    quiet: u8,
    #[command(subcommand)]
    command: Commands,
}

#[derive(Copy, Clone, PartialEq, Eq, PartialOrd, Ord, ValueEnum, Debug)]
enum Format {
    #[clap(help = "Human-readable summary (Default).")]
    Text,
    #[clap(help = "One JSON object per run.")]
    Json,
}

#[derive(Subcommand)]
enum Commands {
    /// Compress INPUT into OUTPUT
    Compress {
        input: PathBuf,
        output: PathBuf,
        /// Print the code assigned to every symbol
        #[arg(long)]
        show_table: bool,
        #[arg(long, value_enum, default_value_t = Format::Text)]
        format: Format,
    },
    /// Restore OUTPUT from a compressed INPUT
    Decompress {
        input: PathBuf,
        output: PathBuf,
        #[arg(long, value_enum, default_value_t = Format::Text)]
        format: Format,
    },
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    logger::init(logger::level_for(cli.verbose, cli.quiet))?;

    let span = tracing::info_span!("command_execution", command = ?std::env::args().collect::<Vec<_>>());
    let _enter = span.enter();

    match cli.command {
        Commands::Compress {
            input,
            output,
            show_table,
            format,
        } => {
            let compressed = compress::compress_file(&input, &output).with_context(|| {
                format!("failed to compress {} into {}", input.display(), output.display())
            })?;
            if show_table {
                print_code_table(&compressed.table);
            }
            print_report(&compressed.report, format)?;
        }
        Commands::Decompress {
            input,
            output,
            format,
        } => {
            let report = compress::decompress_file(&input, &output).with_context(|| {
                format!("failed to decompress {} into {}", input.display(), output.display())
            })?;
            print_report(&report, format)?;
        }
    }

    Ok(())
}

fn print_code_table(table: &CodeTable) {
    println!("Huffman Code Table:");
    for (symbol, code) in table.iter() {
        println!("'{}' -> {}", symbol_label(symbol), code);
    }
}

fn print_report(report: &Report, format: Format) -> anyhow::Result<()> {
    match format {
        Format::Text => println!("{report}"),
        Format::Json => println!("{}", report.to_json()?),
    }
    Ok(())
}
