//! Status and end-of-review summaries.

use std::fmt;
use std::path::PathBuf;

/// Where the reviewer is, for a status line.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Progress {
    /// Cursor position; equal to `total` once the session is exhausted.
    pub position: usize,
    pub total: usize,
    pub accepted: usize,
    pub rejected: usize,
    /// Crop file name of the instance on screen.
    pub current_file: Option<String>,
}

impl fmt::Display for Progress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.position < self.total {
            write!(f, "Instance {} of {}", self.position + 1, self.total)?;
        } else {
            write!(f, "Reviewed {} of {}", self.total, self.total)?;
        }
        write!(
            f,
            " | Accepted: {} | Rejected: {}",
            self.accepted, self.rejected
        )?;
        if let Some(file) = &self.current_file {
            write!(f, " | {}", file)?;
        }
        Ok(())
    }
}

/// What a finished (or abandoned) review produced.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ReviewSummary {
    pub category: String,
    pub total: usize,
    pub accepted: usize,
    pub rejected: usize,
    /// Path of the rejection export, if one was written.
    pub export_path: Option<PathBuf>,
    /// True when the reviewer quit before reaching the last instance.
    pub finished_early: bool,
}

impl ReviewSummary {
    pub fn undecided(&self) -> usize {
        self.total - self.accepted - self.rejected
    }
}

impl fmt::Display for ReviewSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.finished_early {
            writeln!(f, "Review of '{}' stopped early", self.category)?;
        } else {
            writeln!(f, "Review of '{}' complete", self.category)?;
        }
        writeln!(f)?;
        writeln!(f, "Accepted: {}", self.accepted)?;
        writeln!(f, "Rejected: {}", self.rejected)?;
        if self.undecided() > 0 {
            writeln!(f, "Undecided: {}", self.undecided())?;
        }
        writeln!(f)?;

        match &self.export_path {
            Some(path) => {
                writeln!(f, "Rejected annotations saved to:")?;
                writeln!(f, "{}", path.display())
            }
            None if self.rejected == 0 => writeln!(f, "No annotations were rejected."),
            None => writeln!(f, "Rejected annotations were not exported."),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn summary(rejected: usize, export_path: Option<PathBuf>) -> ReviewSummary {
        ReviewSummary {
            category: "dog".into(),
            total: 4,
            accepted: 2,
            rejected,
            export_path,
            finished_early: false,
        }
    }

    #[test]
    fn test_summary_with_export() {
        let text = summary(2, Some(PathBuf::from("output/rejected_dog.json"))).to_string();
        assert!(text.starts_with("Review of 'dog' complete\n"));
        assert!(text.contains("Rejected: 2\n"));
        assert!(!text.contains("Undecided"));
        assert!(text.ends_with("output/rejected_dog.json\n"));
    }

    #[test]
    fn test_summary_without_rejections() {
        let text = summary(0, None).to_string();
        assert!(text.contains("Undecided: 2\n"));
        assert!(text.ends_with("No annotations were rejected.\n"));
    }

    #[test]
    fn test_summary_abandoned() {
        let mut s = summary(1, None);
        s.finished_early = true;
        let text = s.to_string();
        assert!(text.starts_with("Review of 'dog' stopped early\n"));
        assert!(text.ends_with("Rejected annotations were not exported.\n"));
    }
}
