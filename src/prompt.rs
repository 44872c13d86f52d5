//! Interactive collection of run parameters.
//!
//! Used only for values neither the CLI nor the config file supplied. A blank
//! answer to the threshold prompt selects the 180-character default.

use anyhow::{Context, Result};
use dialoguer::{theme::ColorfulTheme, Input};
use std::path::PathBuf;

use crate::config::DEFAULT_MAX_PATH_LEN;

pub fn prompt_source_dir() -> Result<PathBuf> {
    let s: String = Input::with_theme(&ColorfulTheme::default())
        .with_prompt("Source directory path")
        .interact_text()
        .context("failed to read source directory from stdin")?;
    Ok(PathBuf::from(s.trim()))
}

pub fn prompt_target_dir() -> Result<PathBuf> {
    let s: String = Input::with_theme(&ColorfulTheme::default())
        .with_prompt("Target directory path")
        .interact_text()
        .context("failed to read target directory from stdin")?;
    Ok(PathBuf::from(s.trim()))
}

pub fn prompt_max_path_len() -> Result<usize> {
    let s: String = Input::with_theme(&ColorfulTheme::default())
        .with_prompt(format!(
            "Maximum path length (press Enter for default {DEFAULT_MAX_PATH_LEN})"
        ))
        .allow_empty(true)
        .validate_with(|input: &String| -> Result<(), String> {
            let trimmed = input.trim();
            if trimmed.is_empty() || trimmed.parse::<usize>().is_ok() {
                Ok(())
            } else {
                Err(format!("'{trimmed}' is not a number"))
            }
        })
        .interact_text()
        .context("failed to read maximum path length from stdin")?;

    let trimmed = s.trim();
    if trimmed.is_empty() {
        return Ok(DEFAULT_MAX_PATH_LEN);
    }
    trimmed
        .parse::<usize>()
        .with_context(|| format!("invalid maximum path length '{trimmed}'"))
}
