use loan_sanction_core::LoanProductConfig;
use std::fs;
use tracing::{debug, info};

use crate::input::file::resolve_path;

/// Load product settings from a YAML file, or fall back to the defaults.
pub fn load_product_config(
    path: Option<&str>,
) -> Result<LoanProductConfig, Box<dyn std::error::Error>> {
    let config = match path {
        Some(path) => {
            let canonical = resolve_path(path)?;
            let contents = fs::read_to_string(&canonical)
                .map_err(|e| format!("Failed to read '{}': {}", canonical.display(), e))?;
            let config = parse_product_config(&contents)
                .map_err(|e| format!("Failed to parse '{}': {}", canonical.display(), e))?;
            info!(path = %canonical.display(), "loaded product config");
            config
        }
        None => {
            debug!("no product config given, using defaults");
            LoanProductConfig::default()
        }
    };

    config.validate()?;
    Ok(config)
}

fn parse_product_config(yaml: &str) -> Result<LoanProductConfig, serde_yaml::Error> {
    if yaml.trim().is_empty() {
        return Ok(LoanProductConfig::default());
    }
    serde_yaml::from_str(yaml)
}
