//! Status command - show catalog status and summary

use anyhow::Result;
use colored::Colorize;
use comfy_table::{ContentArrangement, Table};

use super::get_context;
use crate::output;

pub fn run(json: bool) -> Result<()> {
    let ctx = get_context()?;
    let status = ctx.status_service.get_status()?;

    if json {
        println!("{}", serde_json::to_string_pretty(&status)?);
        return Ok(());
    }

    println!("{}", "Marketplace Status".bold());
    if ctx.config.demo_mode {
        output::info("Demo mode is on");
    }
    println!();

    let mut table = Table::new();
    table.set_content_arrangement(ContentArrangement::Dynamic);

    table.add_row(vec!["Users", &status.total_users.to_string()]);
    table.add_row(vec!["Products", &status.total_products.to_string()]);
    table.add_row(vec!["Categories", &status.total_categories.to_string()]);
    table.add_row(vec!["Database size", &output::format_size(status.db_size_bytes)]);

    println!("{}", table);
    println!();

    if !status.categories.is_empty() {
        println!("{}", "Categories".bold());
        for name in &status.categories {
            println!("  • {}", name);
        }
    }

    Ok(())
}
