use anyhow::{Context, Result};

use colored::Colorize;

use crate::repo::{Repository, log};

/// Echoes the commit log, line for line.
pub fn log(repo: &Repository) -> Result<String> {
    let Some(text) = log::read(repo).context("could not read log file")? else {
        return Ok("No commits yet".into());
    };

    let mut formatted = String::new();
    for line in text.lines() {
        if line.starts_with("commit ") {
            formatted.push_str(&line.yellow().to_string());
        } else {
            formatted.push_str(line);
        }
        formatted.push('\n');
    }
    formatted.pop();

    Ok(formatted)
}
