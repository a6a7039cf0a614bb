use std::ffi::OsString;

use clap::{Parser, Subcommand};

/// Contains the commands passed to the program
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
pub struct Args {
    #[command(subcommand)]
    pub command: Command,
}

/// A list of subcommands the program can perform
#[derive(Subcommand, Debug)]
pub enum Command {
    /// Creates the repository layout
    Init,

    /// Creates a blob from a file and prints its digest
    HashObject {
        /// Write the object to the store (accepted for compatibility; objects are
        /// always written)
        #[arg(short = 'w')]
        write: bool,
        /// File to hash
        file: OsString,
    },
    /// Shows a stored object
    CatFile {
        /// Print the object payload
        #[arg(short = 'p', group = "selector")]
        pretty: bool,
        /// Print the payload size in bytes
        #[arg(short = 's', group = "selector")]
        size: bool,
        /// Print the object kind
        #[arg(short = 't', group = "selector")]
        kind: bool,
        /// Digest of the object to show
        hash: String,
    },

    /// Snapshots the working directory as a tree and prints its digest
    WriteTree,
    /// Lists the entries of a tree object
    LsTree {
        /// Only print entry names
        #[arg(long)]
        name_only: bool,
        /// Digest of the tree to list
        hash: String,
    },

    /// Stages files for the next commit, recursing into directories
    Add {
        /// Files or directories to stage
        paths: Vec<OsString>,
    },
    /// Shows the files present in the index file
    LsFiles {
        /// Shows more detailed information for every file
        #[arg(short, long)]
        debug: bool,
    },

    /// Creates a new commit from the staged state and prints its digest
    Commit {
        /// The commit message
        #[arg(short, long)]
        message: String,
    },
    /// Echoes the commit log
    Log,

    /// Restores the working directory to a commit and moves HEAD to it
    Checkout {
        /// Digest of the commit to restore
        commit: String,
    },
}
