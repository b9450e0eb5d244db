use crate::aggregation::types::AttackEvent;
use crate::error_handling::types::LogError;
use log::info;
use std::fs::{File, OpenOptions};
use std::io::Write;
use std::path::{Path, PathBuf};
use std::sync::Mutex;

/// Payload bytes kept in a log block. Applied to the raw captured bytes,
/// before hex encoding.
const LOG_PAYLOAD_CAP: usize = 200;

/// Append-only text log, one formatted block per recorded attack.
///
/// The file is created once at startup with a timestamped name; the core
/// never reads it back. Writes are serialized with a mutex since handlers
/// log concurrently.
pub struct AttackLog {
    path: PathBuf,
    file: Mutex<File>,
}

impl AttackLog {
    /// Creates `attack_log_<timestamp>.txt` inside `dir`.
    pub fn create_in(dir: &Path) -> Result<Self, LogError> {
        let name = format!(
            "attack_log_{}.txt",
            chrono::Local::now().format("%Y%m%d_%H%M%S")
        );
        let path = dir.join(name);
        let file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&path)
            .map_err(LogError::CreateFailed)?;

        info!("Attack log: {}", path.display());
        Ok(Self {
            path,
            file: Mutex::new(file),
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Appends one block for a recorded event. `payload` is the raw
    /// captured bytes; only the first 200 are logged (hex-encoded).
    pub fn write_event(&self, event: &AttackEvent, payload: &[u8]) -> Result<(), LogError> {
        let truncated = &payload[..payload.len().min(LOG_PAYLOAD_CAP)];
        let rule = "=".repeat(80);

        let block = format!(
            "\n{rule}\n\
             [{timestamp}] ATTACK DETECTED\n\
             {rule}\n\
             Source IP: {source}\n\
             Port: {port}\n\
             Protocol: {protocol}\n\
             Data Received: {data}\n\
             Attack Type: {attack_type}\n\
             Severity: {severity}\n\
             {rule}\n",
            rule = rule,
            timestamp = event.timestamp,
            source = event.source_addr,
            port = event.port,
            protocol = event.protocol,
            data = hex::encode(truncated),
            attack_type = event.attack_type,
            severity = event.severity,
        );

        let mut file = self.file.lock().unwrap();
        file.write_all(block.as_bytes())
            .map_err(LogError::WriteFailed)?;
        file.flush().map_err(LogError::WriteFailed)?;
        Ok(())
    }
}
