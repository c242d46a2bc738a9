use std::fmt;
use std::path::PathBuf;

use serde::Serialize;

/// Final state of one file after a strip pass.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum Outcome {
    /// File has no alpha channel and was left untouched.
    NoAlpha,
    /// Alpha was composited away and the file overwritten.
    Stripped,
    /// Dry run: the file has alpha and would be stripped.
    WouldStrip,
    /// Decoding or encoding failed; the file was left untouched.
    Failed { error: String },
}

impl Outcome {
    pub fn is_failed(&self) -> bool {
        matches!(self, Outcome::Failed { .. })
    }
}

impl fmt::Display for Outcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Outcome::NoAlpha => write!(f, "no alpha channel"),
            Outcome::Stripped => write!(f, "alpha removed"),
            Outcome::WouldStrip => write!(f, "would remove alpha"),
            Outcome::Failed { error } => write!(f, "{error}"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FileReport {
    pub path: PathBuf,
    #[serde(flatten)]
    pub outcome: Outcome,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BatchReport {
    pub dir: PathBuf,
    pub files: Vec<FileReport>,
}

impl BatchReport {
    pub fn new(dir: PathBuf) -> Self {
        Self {
            dir,
            files: Vec::new(),
        }
    }

    pub fn push(&mut self, path: PathBuf, outcome: Outcome) {
        self.files.push(FileReport { path, outcome });
    }

    pub fn stripped(&self) -> usize {
        self.count(|o| matches!(o, Outcome::Stripped | Outcome::WouldStrip))
    }

    pub fn skipped(&self) -> usize {
        self.count(|o| matches!(o, Outcome::NoAlpha))
    }

    pub fn failed(&self) -> usize {
        self.count(Outcome::is_failed)
    }

    fn count(&self, pred: impl Fn(&Outcome) -> bool) -> usize {
        self.files.iter().filter(|f| pred(&f.outcome)).count()
    }

    pub fn summary(&self) -> String {
        format!(
            "{} file(s): {} stripped, {} without alpha, {} failed",
            self.files.len(),
            self.stripped(),
            self.skipped(),
            self.failed()
        )
    }
}
