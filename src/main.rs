#![allow(clippy::uninlined_format_args)]

mod args;
mod commands;
mod constants;
mod error;
mod hashing;
mod index;
mod object;
mod repo;
mod utils;
mod worktree;

use clap::Parser;
use colored::Colorize;

pub use error::{Error, Result};

fn main() {
    let args = args::Args::parse();

    let current_dir = match std::env::current_dir() {
        Ok(dir) => dir,
        Err(error) => {
            eprintln!("{} could not get current directory: {}", "Error:".red(), error);
            std::process::exit(1);
        }
    };
    let repository = repo::Repository::at(current_dir);

    match commands::execute_command(&repository, &args.command) {
        Ok(message) => {
            if !message.is_empty() {
                println!("{}", message)
            }
        }
        Err(error) => {
            eprintln!("{} {:#}", "Error:".red(), error);
            std::process::exit(1);
        }
    }
}
