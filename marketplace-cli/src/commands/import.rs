//! Import command - load product documents from JSON, NDJSON or CSV

use std::path::Path;

use anyhow::{Context, Result};
use colored::Colorize;
use indicatif::{ProgressBar, ProgressStyle};
use marketplace_core::services::ImportResult;
use marketplace_core::{EntryPoint, LogEvent};

use super::{get_context, get_logger, log_event};
use crate::output;

const BATCH_SIZE: usize = 100;

pub fn run(file: &Path, preview: bool, json: bool) -> Result<()> {
    let ctx = get_context()?;
    let logger = get_logger(EntryPoint::Cli);

    let (products, warnings) = ctx
        .import_service
        .preview(file)
        .with_context(|| format!("Failed to read {}", file.display()))?;

    if preview {
        if json {
            println!(
                "{}",
                serde_json::to_string_pretty(&serde_json::json!({
                    "products": products,
                    "warnings": warnings,
                }))?
            );
            return Ok(());
        }

        println!("{}", "PREVIEW MODE - No changes applied".yellow());
        println!();

        let shown = &products[..products.len().min(10)];
        println!("{}", output::product_table(shown, &ctx.config));
        if products.len() > 10 {
            println!("... and {} more", products.len() - 10);
        }
        print_warnings(&warnings);
        return Ok(());
    }

    let progress = if json {
        ProgressBar::hidden()
    } else {
        let bar = ProgressBar::new(products.len() as u64);
        bar.set_style(
            ProgressStyle::with_template("{bar:40.cyan/blue} {pos}/{len} products")
                .unwrap_or_else(|_| ProgressStyle::default_bar()),
        );
        bar
    };

    let mut result = ImportResult {
        warnings,
        ..Default::default()
    };
    for batch in products.chunks(BATCH_SIZE) {
        let batch_result = ctx.import_service.insert_all(batch, Vec::new())?;
        result.imported += batch_result.imported;
        result.warnings.extend(batch_result.warnings);
        progress.inc(batch.len() as u64);
    }
    result.skipped = result.warnings.len();
    progress.finish_and_clear();

    log_event(&logger, LogEvent::new("import_completed").with_command("import"));

    if json {
        println!("{}", serde_json::to_string_pretty(&result)?);
        return Ok(());
    }

    println!("{}", "Import complete".green());
    println!();
    println!("  Imported: {}", result.imported);
    println!("  Skipped: {}", result.skipped);
    print_warnings(&result.warnings);

    Ok(())
}

fn print_warnings(warnings: &[String]) {
    if warnings.is_empty() {
        return;
    }
    println!();
    for warning in warnings.iter().take(10) {
        output::warning(&format!("  {}", warning));
    }
    if warnings.len() > 10 {
        println!("  ... and {} more", warnings.len() - 10);
    }
}
