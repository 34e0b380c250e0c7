use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use thiserror::Error;

use crate::assets::domain::repository_checkout::{CheckoutError, RepositoryCheckout};
use crate::assets::infrastructure::git_checkout::GitCheckout;
use crate::shared::constants::{BODY_MODEL_REPO_URL, BODY_MODEL_REVISION, BODY_MODEL_SUBDIR};

#[derive(Error, Debug)]
pub enum ModelFetchError {
    #[error("failed to create temporary checkout directory: {0}")]
    TempDir(#[source] io::Error),
    #[error(transparent)]
    Checkout(#[from] CheckoutError),
    #[error("revision {revision} has no directory {subdir}")]
    MissingSubdir { revision: String, subdir: String },
    #[error("failed to create {path}: {source}")]
    CreateParent {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("failed to move {from} to {to}: {source}")]
    Relocate {
        from: PathBuf,
        to: PathBuf,
        #[source]
        source: io::Error,
    },
}

/// Where a model's assets live upstream.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ModelSource {
    pub url: String,
    pub revision: String,
    /// Directory inside the repository that holds the assets.
    pub subdir: String,
}

impl ModelSource {
    /// The fruit-fly body model, pinned to a known-good commit.
    pub fn body_model() -> Self {
        Self {
            url: BODY_MODEL_REPO_URL.to_string(),
            revision: BODY_MODEL_REVISION.to_string(),
            subdir: BODY_MODEL_SUBDIR.to_string(),
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum FetchOutcome {
    AlreadyPresent,
    Fetched,
}

/// Ensures a model's asset directory exists locally.
pub struct ModelFetcher {
    source: ModelSource,
    checkout: Box<dyn RepositoryCheckout>,
}

impl ModelFetcher {
    pub fn new(source: ModelSource, checkout: Box<dyn RepositoryCheckout>) -> Self {
        Self { source, checkout }
    }

    /// Fetcher for the pinned body model.
    pub fn body_model(checkout: Box<dyn RepositoryCheckout>) -> Self {
        Self::new(ModelSource::body_model(), checkout)
    }

    /// Checks the source out into a temporary directory and moves its
    /// asset subdirectory to `dest`. Does nothing if `dest` exists.
    pub fn fetch_if_missing(&self, dest: &Path) -> Result<FetchOutcome, ModelFetchError> {
        if dest.exists() {
            log::debug!("{} already present, skipping fetch", dest.display());
            return Ok(FetchOutcome::AlreadyPresent);
        }

        let tmp = tempfile::tempdir().map_err(ModelFetchError::TempDir)?;
        let repo = tmp.path().join("repo");
        self.checkout
            .checkout(&self.source.url, &self.source.revision, &repo)?;

        let assets = repo.join(&self.source.subdir);
        if !assets.is_dir() {
            return Err(ModelFetchError::MissingSubdir {
                revision: self.source.revision.clone(),
                subdir: self.source.subdir.clone(),
            });
        }

        if let Some(parent) = dest.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent).map_err(|source| ModelFetchError::CreateParent {
                path: parent.to_path_buf(),
                source,
            })?;
        }
        relocate(&assets, dest).map_err(|source| ModelFetchError::Relocate {
            from: assets.clone(),
            to: dest.to_path_buf(),
            source,
        })?;

        log::info!("fetched {} into {}", self.source.subdir, dest.display());
        Ok(FetchOutcome::Fetched)
    }
}

/// Fetches the body model into `dest` with `git`.
pub fn download_body_model_if_missing(dest: &Path) -> Result<FetchOutcome, ModelFetchError> {
    ModelFetcher::body_model(Box::new(GitCheckout::new())).fetch_if_missing(dest)
}

/// Moves a directory tree, copying when a rename cannot cross filesystems.
fn relocate(from: &Path, to: &Path) -> io::Result<()> {
    match fs::rename(from, to) {
        Ok(()) => Ok(()),
        Err(e) => {
            log::debug!("rename failed ({e}), copying instead");
            copy_dir_all(from, to)?;
            fs::remove_dir_all(from)
        }
    }
}

fn copy_dir_all(from: &Path, to: &Path) -> io::Result<()> {
    fs::create_dir_all(to)?;
    for entry in fs::read_dir(from)? {
        let entry = entry?;
        let target = to.join(entry.file_name());
        if entry.file_type()?.is_dir() {
            copy_dir_all(&entry.path(), &target)?;
        } else {
            fs::copy(entry.path(), &target)?;
        }
    }
    Ok(())
}
