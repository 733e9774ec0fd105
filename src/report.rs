use std::fmt;
use std::path::Path;

use chrono::Utc;
use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Action {
    Compress,
    Decompress,
}

/// Summary of one file operation.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Report {
    pub timestamp: String,
    pub action: Action,
    pub input: String,
    pub output: String,
    pub original_size: u64,
    pub compressed_size: u64,
}

impl Report {
    pub fn new(
        action: Action,
        input: &Path,
        output: &Path,
        original_size: u64,
        compressed_size: u64,
    ) -> Self {
        Self {
            timestamp: Utc::now().to_rfc3339(),
            action,
            input: input.display().to_string(),
            output: output.display().to_string(),
            original_size,
            compressed_size,
        }
    }

    /// Original size over compressed size.
    pub fn ratio(&self) -> f64 {
        if self.compressed_size == 0 {
            return 0.0;
        }
        self.original_size as f64 / self.compressed_size as f64
    }

    pub fn to_json(&self) -> serde_json::Result<String> {
        #[derive(Serialize)]
        struct WithRatio<'a> {
            #[serde(flatten)]
            report: &'a Report,
            ratio: f64,
        }
        serde_json::to_string(&WithRatio {
            report: self,
            ratio: self.ratio(),
        })
    }
}

impl fmt::Display for Report {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.action {
            Action::Compress => writeln!(f, "Compression complete.")?,
            Action::Decompress => writeln!(f, "Decompression complete.")?,
        }
        writeln!(f, "Original size: {} bytes", self.original_size)?;
        writeln!(f, "Compressed size: {} bytes", self.compressed_size)?;
        write!(f, "Compression ratio: {:.4}:1", self.ratio())
    }
}
