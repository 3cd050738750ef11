//! Audit logger for generation and anonymization calls

use crate::domain::{Pin, Result};
use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};
use std::fmt;
use std::fs::OpenOptions;
use std::io::Write;
use std::path::{Path, PathBuf};

/// Which entry point produced an audit record
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Operation {
    Generate,
    Anonymize,
}

impl fmt::Display for Operation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Generate => write!(f, "generate"),
            Self::Anonymize => write!(f, "anonymize"),
        }
    }
}

/// Audit log entry for one call
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AuditRecord {
    pub timestamp: DateTime<Utc>,
    pub operation: Operation,
    /// PINs requested (`count`, or the source length)
    pub requested: usize,
    /// PINs emitted
    pub emitted: usize,
    /// Distinct values drawn
    pub groups: usize,
    pub l_birth: Option<NaiveDate>,
    pub u_birth: Option<NaiveDate>,
    pub male_prob: Option<f64>,
    pub bounds_estimated: bool,
    pub male_prob_estimated: bool,
    /// Whether a birthdate density was fitted
    pub fitted: bool,
    pub unique: bool,
    pub keep_rel: bool,
    /// Candidates redrawn because they collided
    pub collisions: usize,
    /// SHA-256 of the source batch (never plaintext PINs)
    pub source_digest: Option<String>,
    pub processing_time_ms: u64,
}

impl AuditRecord {
    /// Empty record for `operation` stamped with the current time
    pub fn new(operation: Operation, requested: usize) -> Self {
        Self {
            timestamp: Utc::now(),
            operation,
            requested,
            emitted: 0,
            groups: 0,
            l_birth: None,
            u_birth: None,
            male_prob: None,
            bounds_estimated: false,
            male_prob_estimated: false,
            fitted: false,
            unique: false,
            keep_rel: false,
            collisions: 0,
            source_digest: None,
            processing_time_ms: 0,
        }
    }
}

/// SHA-256 hex digest over a PIN batch, one PIN per line
pub fn digest_source(source: &[Pin]) -> String {
    let mut hasher = Sha256::new();
    for pin in source {
        hasher.update(pin.as_str().as_bytes());
        hasher.update(b"\n");
    }
    format!("{:x}", hasher.finalize())
}

/// Appends audit records to a log file
#[derive(Debug)]
pub struct AuditLogger {
    log_path: PathBuf,
    json_format: bool,
    enabled: bool,
}

impl AuditLogger {
    /// Create a new audit logger
    ///
    /// # Errors
    ///
    /// Returns [`crate::domain::PinError::Io`] if the log directory cannot be created.
    pub fn new(log_path: PathBuf, json_format: bool, enabled: bool) -> Result<Self> {
        if enabled {
            if let Some(parent) = log_path.parent() {
                if !parent.as_os_str().is_empty() {
                    std::fs::create_dir_all(parent)?;
                }
            }
        }

        Ok(Self {
            log_path,
            json_format,
            enabled,
        })
    }

    pub fn log_path(&self) -> &Path {
        &self.log_path
    }

    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    /// Append a record to the log file
    pub fn log(&self, record: &AuditRecord) -> Result<()> {
        if !self.enabled {
            return Ok(());
        }

        let mut file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.log_path)?;

        if self.json_format {
            let json_line = serde_json::to_string(record)?;
            writeln!(file, "{json_line}")?;
        } else {
            writeln!(
                file,
                "[{}] Operation: {} | Requested: {} | Emitted: {} | Groups: {} | Fitted: {} | Collisions: {} | Time: {}ms",
                record.timestamp.to_rfc3339(),
                record.operation,
                record.requested,
                record.emitted,
                record.groups,
                record.fitted,
                record.collisions,
                record.processing_time_ms
            )?;
        }

        Ok(())
    }
}
