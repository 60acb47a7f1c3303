//! Target identity derived from a commit reference

use std::fmt;
use std::path::{Path, PathBuf};

use crate::constants::{PERF_DIR_PREFIX, TARGET_NAME_PREFIX, WORK_ROOT};

/// Names and paths of everything a run creates for one commit.
///
/// All values are pure functions of the commit string, so two runs for the
/// same commit always agree and runs for different commits never collide.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Target {
    commit: String,
    name: String,
    work_dir: PathBuf,
    perf_dir: PathBuf,
}

impl Target {
    pub fn new(commit: impl Into<String>) -> Self {
        Self::with_root(commit, WORK_ROOT)
    }

    /// Derive a target whose directories live under `root`
    pub fn with_root(commit: impl Into<String>, root: impl AsRef<Path>) -> Self {
        let commit = commit.into();
        let name = format!("{TARGET_NAME_PREFIX}{commit}");
        let root = root.as_ref();
        Self {
            work_dir: root.join(&name),
            perf_dir: root.join(format!("{PERF_DIR_PREFIX}{name}")),
            commit,
            name,
        }
    }

    /// Commit reference the target was built from
    pub fn commit(&self) -> &str {
        &self.commit
    }

    /// Image tag and container name
    pub fn name(&self) -> &str {
        &self.name
    }

    /// TerminusDB checkout directory
    pub fn work_dir(&self) -> &Path {
        &self.work_dir
    }

    /// HTTP performance suite checkout directory
    pub fn perf_dir(&self) -> &Path {
        &self.perf_dir
    }
}

impl fmt::Display for Target {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.name)
    }
}
