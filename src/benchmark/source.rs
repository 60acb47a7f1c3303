//! Git checkout of the benchmarked sources

use std::path::Path;
use std::sync::Arc;

use crate::error::AppResult;

use super::process::{CommandRunner, CommandSpec};

/// Clones repositories and checks out revisions
#[derive(Clone)]
pub struct SourceControl {
    runner: Arc<dyn CommandRunner>,
}

impl SourceControl {
    pub fn new(runner: Arc<dyn CommandRunner>) -> Self {
        Self { runner }
    }

    /// `git clone <url> <dest>`
    pub async fn clone_repo(&self, url: &str, dest: &Path) -> AppResult<()> {
        tracing::info!(url, dest = %dest.display(), "Cloning repository");
        let spec = CommandSpec::new("git")
            .arg("clone")
            .arg(url)
            .arg(dest.to_string_lossy());
        self.runner.run(&spec).await?;
        Ok(())
    }

    /// `git checkout <commit>` inside `repo`
    pub async fn checkout(&self, repo: &Path, commit: &str) -> AppResult<()> {
        tracing::info!(repo = %repo.display(), commit, "Checking out commit");
        let spec = CommandSpec::new("git")
            .args(["checkout", commit])
            .current_dir(repo);
        self.runner.run(&spec).await?;
        Ok(())
    }
}
