use std::path::Path;
use std::process::ExitStatus;

use thiserror::Error;

#[derive(Error, Debug)]
pub enum CheckoutError {
    #[error("failed to run `{command}`: {source}")]
    Spawn {
        command: String,
        #[source]
        source: std::io::Error,
    },
    #[error("`{command}` exited with {status}: {stderr}")]
    Failed {
        command: String,
        status: ExitStatus,
        stderr: String,
    },
}

/// Materialises a remote repository at a fixed revision.
pub trait RepositoryCheckout {
    /// Clones `url` into `dest` (which must not exist yet or be empty)
    /// and checks out `revision`.
    fn checkout(&self, url: &str, revision: &str, dest: &Path) -> Result<(), CheckoutError>;
}
