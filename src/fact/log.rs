use std::io::Write as _;
use std::path::{Path, PathBuf};

use anyhow::Context as _;

use crate::foundation::error::FactReelResult;

/// Append-only plaintext log with one `YYYY-MM-DD fact` line per fetched fact.
#[derive(Clone, Debug)]
pub struct FactLog {
    path: PathBuf,
}

impl Default for FactLog {
    fn default() -> Self {
        Self::new("facts.txt")
    }
}

impl FactLog {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Append `"{date} {fact}\n"`, creating the file if absent.
    pub fn append(&self, date: chrono::NaiveDate, fact: &str) -> FactReelResult<()> {
        let mut file = std::fs::OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.path)
            .with_context(|| format!("failed to open fact log '{}'", self.path.display()))?;
        writeln!(file, "{} {fact}", date.format("%Y-%m-%d"))
            .with_context(|| format!("failed to append to fact log '{}'", self.path.display()))?;
        Ok(())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/fact/log.rs"]
mod tests;
