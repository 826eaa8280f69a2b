mod budget;
mod config;
mod input;
mod logging;
mod models;
mod run;
mod session;
mod store;
mod ui;

use anyhow::{Context, Result};

fn main() -> Result<()> {
    let args: Vec<String> = std::env::args().collect();
    if args.len() > 1 {
        return run::as_cli(&args);
    }

    let config = config::Config::from_env()?;
    logging::init(&config)?;

    let state = store::demo_state(&config.month)
        .with_context(|| format!("Could not build the plan for {}", config.month))?;
    run::as_tui(state, &config)
}
