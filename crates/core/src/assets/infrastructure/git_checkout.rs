use std::ffi::{OsStr, OsString};
use std::path::Path;
use std::process::Command;

use crate::assets::domain::repository_checkout::{CheckoutError, RepositoryCheckout};

/// Clones repositories with the `git` command-line client.
pub struct GitCheckout {
    program: OsString,
}

impl GitCheckout {
    pub fn new() -> Self {
        Self::with_program("git")
    }

    pub fn with_program(program: impl Into<OsString>) -> Self {
        Self {
            program: program.into(),
        }
    }

    fn run(&self, args: &[&OsStr]) -> Result<(), CheckoutError> {
        let command = std::iter::once(self.program.as_os_str())
            .chain(args.iter().copied())
            .map(|a| a.to_string_lossy())
            .collect::<Vec<_>>()
            .join(" ");
        log::info!("running {command}");

        let output = Command::new(&self.program)
            .args(args)
            .output()
            .map_err(|source| CheckoutError::Spawn {
                command: command.clone(),
                source,
            })?;

        if !output.status.success() {
            return Err(CheckoutError::Failed {
                command,
                status: output.status,
                stderr: String::from_utf8_lossy(&output.stderr).trim().to_string(),
            });
        }
        Ok(())
    }
}

impl Default for GitCheckout {
    fn default() -> Self {
        Self::new()
    }
}

impl RepositoryCheckout for GitCheckout {
    fn checkout(&self, url: &str, revision: &str, dest: &Path) -> Result<(), CheckoutError> {
        self.run(&[OsStr::new("clone"), OsStr::new(url), dest.as_os_str()])?;
        self.run(&[
            OsStr::new("-C"),
            dest.as_os_str(),
            OsStr::new("checkout"),
            OsStr::new(revision),
            OsStr::new("--quiet"),
        ])
    }
}
