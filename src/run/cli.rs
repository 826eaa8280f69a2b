use anyhow::Result;

use crate::config::{ENV_CURRENCY, ENV_LOG, ENV_LOG_FILE, ENV_MONTH};

pub(crate) fn as_cli(args: &[String]) -> Result<()> {
    match args[1].as_str() {
        "--help" | "-h" | "help" => {
            print_usage();
            Ok(())
        }
        "--version" | "-V" | "version" => {
            println!("budgetflow {}", env!("CARGO_PKG_VERSION"));
            Ok(())
        }
        other => {
            print_usage();
            anyhow::bail!("Unknown argument: {other}");
        }
    }
}

fn print_usage() {
    println!("BudgetFlow: monthly budget planner for the terminal");
    println!();
    println!("Usage: budgetflow [--help | --version]");
    println!();
    println!("Without arguments the interactive UI starts with a demo plan.");
    println!("Nothing is written to disk; every launch starts fresh.");
    println!();
    println!("Environment:");
    println!("  {ENV_MONTH:<22}Month of the starting plan, YYYY-MM (default: current)");
    println!("  {ENV_CURRENCY:<22}Currency symbol (default: €)");
    println!("  {ENV_LOG:<22}Log filter, e.g. debug (default: logging off)");
    println!("  {ENV_LOG_FILE:<22}Log file path (default: data dir)");
}
