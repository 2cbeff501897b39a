//! Demo command - manage demo mode and seed the demo catalog

use anyhow::Result;
use clap::Subcommand;
use colored::Colorize;

use super::{get_context, get_data_dir};
use marketplace_core::adapters::demo::{DEMO_PASSWORD, DEMO_USERNAME};
use marketplace_core::services::DemoService;

#[derive(Subcommand)]
pub enum DemoCommands {
    /// Enable demo mode
    #[command(name = "on")]
    On,
    /// Disable demo mode
    #[command(name = "off")]
    Off {
        /// Also delete the demo database
        #[arg(long)]
        clean: bool,
    },
    /// Show demo mode status
    Status,
}

pub fn run(command: Option<DemoCommands>) -> Result<()> {
    let data_dir = get_data_dir();
    std::fs::create_dir_all(&data_dir)?;
    let demo_service = DemoService::new(&data_dir);

    match command {
        Some(DemoCommands::On) => {
            demo_service.enable()?;
            println!("{}", "Demo mode enabled".green());
            println!(
                "Demo catalog has been populated. Run 'mkt' and log in as {}/{}.",
                DEMO_USERNAME, DEMO_PASSWORD
            );
            Ok(())
        }
        Some(DemoCommands::Off { clean }) => {
            demo_service.disable(clean)?;
            println!("{}", "Demo mode disabled".yellow());
            Ok(())
        }
        Some(DemoCommands::Status) | None => {
            if demo_service.is_enabled()? {
                println!("Demo mode is {}", "ON".green());
            } else {
                println!("Demo mode is {}", "OFF".yellow());
            }
            Ok(())
        }
    }
}

/// Seed the demo catalog into whichever database is active
pub fn seed(json: bool) -> Result<()> {
    let ctx = get_context()?;
    let result = ctx.seed_demo_data()?;

    if json {
        println!(
            "{}",
            serde_json::json!({
                "products": result.products,
                "user_created": result.user_created,
            })
        );
        return Ok(());
    }

    println!("{}", "Demo data seeded".green());
    println!("  Products added: {}", result.products);
    if result.user_created {
        println!("  Account created: {}/{}", DEMO_USERNAME, DEMO_PASSWORD);
    }
    Ok(())
}
