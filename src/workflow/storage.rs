/// Append-only audit log storage
///
/// Writes one JSON object per line to a file. Records are never rewritten or
/// removed. Every write is synced before returning so the trail survives an
/// abrupt exit right after a step.

use crate::error::AuditError;
use crate::workflow::types::AuditEvent;
use std::fs::OpenOptions;
use std::io::Write;
use std::path::{Path, PathBuf};

/// Newline-delimited JSON audit log
///
/// Owned by a single engine. Sharing one log between engines running
/// concurrently needs external serialization of `write_event` calls.
#[derive(Debug)]
pub struct AuditLog {
    /// Target file; created on first write
    path: PathBuf,
}

impl AuditLog {
    /// Prepare the log, creating the parent directory if needed
    ///
    /// The file itself is not touched until the first event is written.
    pub fn new(path: impl Into<PathBuf>) -> Result<Self, AuditError> {
        let path = path.into();
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent).map_err(|source| AuditError::CreateDir {
                path: parent.to_path_buf(),
                source,
            })?;
        }
        tracing::debug!("🗂️ Audit log target: {}", path.display());
        Ok(Self { path })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Append one event, stamping `ts` with the current time if unset
    pub fn write_event(&self, event: &AuditEvent) -> Result<(), AuditError> {
        let mut record = event.clone();
        if record.ts.is_none() {
            record.ts = Some(chrono::Utc::now().timestamp());
        }

        let mut line = serde_json::to_string(&record)?;
        line.push('\n');

        let mut file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.path)
            .map_err(|source| AuditError::Open {
                path: self.path.clone(),
                source,
            })?;

        file.write_all(line.as_bytes())
            .and_then(|()| file.sync_data())
            .map_err(|source| AuditError::Write {
                path: self.path.clone(),
                source,
            })?;

        tracing::debug!("📝 Audit record appended: step='{}' ok={}", record.step, record.ok);
        Ok(())
    }

    /// Read every record back, oldest first
    pub fn read_events(&self) -> Result<Vec<AuditEvent>, AuditError> {
        let text = match std::fs::read_to_string(&self.path) {
            Ok(text) => text,
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => return Ok(Vec::new()),
            Err(source) => {
                return Err(AuditError::Open {
                    path: self.path.clone(),
                    source,
                })
            }
        };

        text.lines()
            .filter(|line| !line.trim().is_empty())
            .map(|line| serde_json::from_str(line).map_err(AuditError::from))
            .collect()
    }
}
