mod add;
mod cat_file;
mod checkout;
mod commit;
mod hash_object;
mod init;
mod log;
mod ls_files;
mod ls_tree;
mod write_tree;

use anyhow::{Result, bail};

use crate::args::Command;
use crate::repo::Repository;

/// Calls the corresponding function to perform every command variant.
///
/// # Return
///
/// The text to print on success, which may be empty.
///
/// # Errors
///
/// This function will fail if the repository is missing (for every command but
/// `init`) or the executed command returns an error.
pub fn execute_command(repo: &Repository, command: &Command) -> Result<String> {
    if !repo.exists() {
        if let Command::Init = command {
            // Only command that can be executed without a repository already existing
            return init::init(repo);
        }
        bail!("not a gitlite repository (run \"gitlite init\" first)");
    }
    match command {
        Command::Init => init::init(repo), // always reports "already initialized"
        Command::HashObject { write: _, file } => hash_object::hash_object(repo, file),
        Command::CatFile {
            pretty,
            size,
            kind,
            hash,
        } => cat_file::cat_file(repo, *pretty, *size, *kind, hash),
        Command::WriteTree => write_tree::write_tree(repo),
        Command::LsTree { name_only, hash } => ls_tree::ls_tree(repo, *name_only, hash),
        Command::Add { paths } => add::add(repo, paths),
        Command::LsFiles { debug } => ls_files::ls_files(repo, *debug),
        Command::Commit { message } => commit::commit(repo, message),
        Command::Log => log::log(repo),
        Command::Checkout { commit } => checkout::checkout(repo, commit),
    }
}
