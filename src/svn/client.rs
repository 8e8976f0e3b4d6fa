use std::fmt;
use std::process::Command;

use tracing::{debug, info};

use crate::error::{Error, Result};

/// Revisions to request from `svn log`, both ends inclusive.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RevisionRange {
    pub start: String,
    pub end: String,
}

impl RevisionRange {
    /// The whole history of a repository.
    #[must_use]
    pub fn full() -> Self {
        Self::starting_at("0")
    }

    #[must_use]
    pub fn starting_at(start: &str) -> Self {
        Self {
            start: start.to_string(),
            end: "HEAD".to_string(),
        }
    }
}

impl fmt::Display for RevisionRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.start, self.end)
    }
}

/// Provides the XML log document of a repository.
pub trait LogSource {
    fn log_xml(&self, uri: &str, range: &RevisionRange) -> Result<String>;
}

/// Runs the `svn` command line client.
#[derive(Debug, Clone)]
pub struct SvnClient {
    program: String,
}

impl SvnClient {
    pub fn new(program: impl Into<String>) -> Self {
        Self {
            program: program.into(),
        }
    }

    fn run(&self, args: &[&str]) -> Result<String> {
        debug!("  {} {}", self.program, args.join(" "));
        let output = Command::new(&self.program)
            .args(["--no-auth-cache", "--non-interactive"])
            .args(args)
            .output()?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            return Err(Error::Svn(format!(
                "{} {} exited with {}: {}",
                self.program,
                args.first().copied().unwrap_or_default(),
                output.status,
                stderr.trim()
            )));
        }

        String::from_utf8(output.stdout)
            .map_err(|e| Error::Svn(format!("output is not UTF-8: {e}")))
    }
}

impl Default for SvnClient {
    fn default() -> Self {
        Self::new("svn")
    }
}

impl LogSource for SvnClient {
    fn log_xml(&self, uri: &str, range: &RevisionRange) -> Result<String> {
        info!("export subversion log for revision {range}");
        let range = range.to_string();
        self.run(&["log", "--verbose", "--xml", "--revision", &range, uri])
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_revision_range_display() {
        assert_eq!(RevisionRange::full().to_string(), "0:HEAD");
        assert_eq!(RevisionRange::starting_at("17").to_string(), "17:HEAD");
    }

    #[test]
    fn test_missing_program_is_io_error() {
        let client = SvnClient::new("vcdb-test-no-such-svn-binary");
        let result = client.log_xml("file:///tmp/nothing", &RevisionRange::full());
        assert!(matches!(result, Err(Error::Io(_))));
    }
}
