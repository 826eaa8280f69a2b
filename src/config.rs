//! Runtime configuration, read from the environment.
//!
//! | Variable              | Meaning                                   | Default            |
//! |-----------------------|-------------------------------------------|--------------------|
//! | `BUDGETFLOW_MONTH`    | Month of the starting plan (`YYYY-MM`)    | current month      |
//! | `BUDGETFLOW_CURRENCY` | Symbol printed in front of amounts        | `€`                |
//! | `BUDGETFLOW_LOG`      | Log filter (`info`, `budgetflow=debug`…)  | logging disabled   |
//! | `BUDGETFLOW_LOG_FILE` | Log file path                             | data dir           |

use std::path::PathBuf;

use anyhow::{Context, Result};
use chrono::Local;

use crate::input;

pub(crate) const ENV_MONTH: &str = "BUDGETFLOW_MONTH";
pub(crate) const ENV_CURRENCY: &str = "BUDGETFLOW_CURRENCY";
pub(crate) const ENV_LOG: &str = "BUDGETFLOW_LOG";
pub(crate) const ENV_LOG_FILE: &str = "BUDGETFLOW_LOG_FILE";

const DEFAULT_CURRENCY: &str = "€";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    pub month: String,
    pub currency: String,
    pub log_filter: Option<String>,
    pub log_file: Option<PathBuf>,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build the config from any key lookup. Blank values count as unset.
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        let month = match get(ENV_MONTH) {
            Some(raw) => {
                let first_day = input::parse_month(&raw)
                    .with_context(|| format!("{ENV_MONTH} is not a valid month"))?;
                first_day.format("%Y-%m").to_string()
            }
            None => Local::now().format("%Y-%m").to_string(),
        };

        Ok(Self {
            month,
            currency: get(ENV_CURRENCY).unwrap_or_else(|| DEFAULT_CURRENCY.to_string()),
            log_filter: get(ENV_LOG),
            log_file: get(ENV_LOG_FILE).map(PathBuf::from),
        })
    }
}
