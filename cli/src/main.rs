//! pdfdiff CLI - compare two PDF files line by line

use std::path::PathBuf;
use std::process;
use std::time::Duration;

use clap::Parser;
use colored::Colorize;
use indicatif::{ProgressBar, ProgressStyle};

use pdfdiff::{Comparison, DiffEntry, Error, PdfTextExtractor, Pipeline, TesseractOcr};

#[derive(Parser)]
#[command(name = "pdfdiff")]
#[command(author = "iyulab")]
#[command(version)]
#[command(about = "Compare the text of two PDF files line by line", long_about = None)]
struct Cli {
    /// First PDF file (the "old" side)
    #[arg(value_name = "FIRST")]
    first: PathBuf,

    /// Second PDF file (the "new" side)
    #[arg(value_name = "SECOND")]
    second: PathBuf,

    /// Emit the result as JSON instead of colored text
    #[arg(long)]
    json: bool,

    /// Pretty-print JSON output
    #[arg(long, requires = "json")]
    pretty: bool,

    /// Also print unchanged lines
    #[arg(short = 'u', long)]
    unchanged: bool,

    /// Disable the OCR fallback for image-only pages
    #[arg(long)]
    no_ocr: bool,

    /// Tesseract language code for OCR
    #[arg(long, default_value = "eng", env = "PDFDIFF_OCR_LANG")]
    lang: String,
}

fn main() {
    env_logger::init();
    let cli = Cli::parse();

    let extractor = if cli.no_ocr {
        PdfTextExtractor::without_ocr()
    } else {
        PdfTextExtractor::with_ocr_backend(Box::new(TesseractOcr::new().with_lang(&cli.lang)))
    };
    let pipeline = Pipeline::with_extractor(extractor);

    let spinner = spinner("Comparing documents...");
    let result = pipeline.process_files(&cli.first, &cli.second);
    spinner.finish_and_clear();

    match result {
        Ok(comparison) => {
            if cli.json {
                print_json(&comparison, cli.pretty);
            } else {
                print_colored(&comparison, cli.unchanged);
            }
        }
        Err(err) => {
            eprintln!("{} {}", "error:".red().bold(), err);
            process::exit(exit_code(&err));
        }
    }
}

fn spinner(message: &'static str) -> ProgressBar {
    let pb = ProgressBar::new_spinner();
    pb.set_style(
        ProgressStyle::with_template("{spinner:.cyan} {msg}")
            .unwrap_or_else(|_| ProgressStyle::default_spinner()),
    );
    pb.set_message(message);
    pb.enable_steady_tick(Duration::from_millis(80));
    pb
}

fn print_json(comparison: &Comparison, pretty: bool) {
    let rendered = if pretty {
        comparison.to_json_pretty()
    } else {
        comparison.to_json()
    };
    match rendered {
        Ok(json) => println!("{}", json),
        Err(err) => {
            eprintln!("{} {}", "error:".red().bold(), err);
            process::exit(1);
        }
    }
}

fn print_colored(comparison: &Comparison, show_unchanged: bool) {
    for entry in &comparison.differences {
        match entry {
            DiffEntry::Unchanged { text } => {
                if show_unchanged {
                    println!("  {}", line(text).dimmed());
                }
            }
            DiffEntry::Added { text } => println!("{} {}", "+".green(), line(text).green()),
            DiffEntry::Removed { text } => println!("{} {}", "-".red(), line(text).red()),
            DiffEntry::Modified { old, new } => {
                println!("{} {}", "~".yellow(), line(old).yellow().strikethrough());
                println!("{} {}", "~".yellow(), line(new).yellow());
            }
        }
    }

    let summary = &comparison.summary;
    println!();
    println!(
        "{} {} additions, {} deletions, {} modifications",
        "summary:".bold(),
        summary.additions.to_string().green(),
        summary.deletions.to_string().red(),
        summary.modifications.to_string().yellow()
    );
}

/// Line text keeps its terminator; strip it for display.
fn line(text: &str) -> &str {
    text.trim_end_matches(['\r', '\n'])
}

/// Validation failures exit with 2, unexpected failures with 1. Mirrors
/// the client-error/server-error split a service boundary would apply.
fn exit_code(err: &Error) -> i32 {
    match err {
        Error::InvalidDocument(_)
        | Error::EmptyContent
        | Error::SizeExceeded { .. } => 2,
        _ => 1,
    }
}
