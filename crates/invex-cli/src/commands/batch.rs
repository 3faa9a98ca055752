//! Batch processing command for multiple invoice files.

use std::collections::HashMap;
use std::fs;
use std::path::PathBuf;
use std::time::Instant;

use clap::Args;
use console::style;
use glob::glob;
use indicatif::{ProgressBar, ProgressStyle};
use tracing::debug;

use invex_core::{BatchReport, ExtractionPipeline, ExtractionStatus, InvoiceType, RawDocument};

use super::process::{csv_row, format_record, load_config, retrieve, OutputFormat, CSV_HEADER};

/// Arguments for the batch command.
#[derive(Args)]
pub struct BatchArgs {
    /// Input files or glob pattern
    #[arg(required = true)]
    input: String,

    /// Output directory for per-file records
    #[arg(short, long)]
    output_dir: Option<PathBuf>,

    /// Output format for each file
    #[arg(short, long, value_enum, default_value = "json")]
    format: OutputFormat,

    /// Also generate a summary CSV
    #[arg(long)]
    summary: bool,

    /// Print spending statistics after processing
    #[arg(long)]
    stats: bool,
}

pub async fn run(args: BatchArgs, config_path: Option<&str>) -> anyhow::Result<()> {
    let start = Instant::now();

    let config = load_config(config_path)?;
    let pipeline = ExtractionPipeline::new(&config)?;

    // Expand glob pattern
    let files: Vec<PathBuf> = glob(&args.input)?
        .filter_map(|r| r.ok())
        .filter(|p| {
            let ext = p.extension().and_then(|e| e.to_str()).unwrap_or("");
            matches!(ext.to_lowercase().as_str(), "pdf" | "txt" | "text")
        })
        .collect();

    if files.is_empty() {
        anyhow::bail!("No matching files found for pattern: {}", args.input);
    }

    println!(
        "{} Found {} files to process",
        style("ℹ").blue(),
        files.len()
    );

    if let Some(ref output_dir) = args.output_dir {
        fs::create_dir_all(output_dir)?;
    }

    let pb = ProgressBar::new(files.len() as u64);
    pb.set_style(
        ProgressStyle::default_bar()
            .template("{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} files")
            .unwrap()
            .progress_chars("=>-"),
    );

    // Retrieve all raw texts; an unreadable file becomes a failed
    // document, never an abort.
    let mut documents: Vec<RawDocument> = Vec::with_capacity(files.len());
    for path in &files {
        documents.push(retrieve(path)?);
        pb.inc(1);
    }
    pb.finish_with_message("Complete");

    let report = pipeline.process_batch(&documents);

    // Per-file outputs
    if let Some(ref output_dir) = args.output_dir {
        for (path, record) in files.iter().zip(&report.records) {
            let output_name = path
                .file_stem()
                .and_then(|s| s.to_str())
                .unwrap_or("record");

            let extension = match args.format {
                OutputFormat::Json => "json",
                OutputFormat::Csv => "csv",
                OutputFormat::Text => "txt",
            };

            let output_path = output_dir.join(format!("{}.{}", output_name, extension));
            fs::write(&output_path, format_record(record, args.format)?)?;
            debug!("Wrote output to {}", output_path.display());
        }
    }

    // Generate summary if requested
    if args.summary {
        let summary_path = args
            .output_dir
            .as_ref()
            .map(|d| d.join("summary.csv"))
            .unwrap_or_else(|| PathBuf::from("summary.csv"));

        write_summary(&summary_path, &report)?;
        println!(
            "{} Summary written to {}",
            style("✓").green(),
            summary_path.display()
        );
    }

    println!();
    println!(
        "{} Processed {} files in {:?}",
        style("✓").green(),
        report.summary.total,
        start.elapsed()
    );
    println!(
        "   {} success, {} partial, {} failed",
        style(report.summary.success).green(),
        style(report.summary.partial).yellow(),
        style(report.summary.failed).red()
    );

    let failed: Vec<&RawDocument> = documents.iter().filter(|d| !d.retrieved).collect();
    if !failed.is_empty() {
        println!();
        println!("{}", style("Failed files:").red());
        for doc in failed {
            println!(
                "  - {}: {}",
                doc.filename,
                doc.failure.as_deref().unwrap_or("unknown error")
            );
        }
    }

    if args.stats {
        print_stats(&report);
    }

    Ok(())
}

fn write_summary(path: &PathBuf, report: &BatchReport) -> anyhow::Result<()> {
    let mut wtr = csv::Writer::from_path(path)?;

    wtr.write_record(CSV_HEADER)?;
    for record in &report.records {
        wtr.write_record(csv_row(record))?;
    }

    wtr.flush()?;
    Ok(())
}

/// Print spend totals per currency, category counts and the most
/// frequent vendor across successfully extracted invoices.
fn print_stats(report: &BatchReport) {
    let invoices: Vec<_> = report
        .records
        .iter()
        .filter(|r| {
            r.invoice_type == InvoiceType::Invoice
                && r.extraction_status != ExtractionStatus::Failed
        })
        .collect();

    println!();
    println!("{}", style("Statistics:").bold());
    println!("  Invoices: {} of {} documents", invoices.len(), report.summary.total);

    let mut per_currency: HashMap<&str, (usize, f64)> = HashMap::new();
    for record in &invoices {
        let entry = per_currency.entry(record.currency.as_str()).or_default();
        entry.0 += 1;
        entry.1 += record.amount;
    }
    let mut currencies: Vec<_> = per_currency.into_iter().collect();
    currencies.sort_by(|(_, (_, a)), (_, (_, b))| b.total_cmp(a));
    for (currency, (count, total)) in currencies {
        println!("  Spend:    {:.2} {} across {} invoices", total, currency, count);
    }

    let mut per_category: HashMap<&str, usize> = HashMap::new();
    for record in &invoices {
        *per_category.entry(record.category.as_str()).or_default() += 1;
    }
    let mut categories: Vec<_> = per_category.into_iter().collect();
    categories.sort_by(|a, b| b.1.cmp(&a.1));
    for (category, count) in categories {
        println!("  Category: {} x{}", category, count);
    }

    let mut per_vendor: HashMap<&str, usize> = HashMap::new();
    for record in &invoices {
        if record.vendor != "N/A" {
            *per_vendor.entry(record.vendor.as_str()).or_default() += 1;
        }
    }
    if let Some((vendor, count)) = per_vendor.into_iter().max_by_key(|(_, count)| *count) {
        println!("  Top vendor: {} ({} invoices)", vendor, count);
    }
}
