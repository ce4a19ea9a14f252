use anyhow::Result;
use chrono::Local;
use serde::Serialize;
use std::path::{Path, PathBuf};
use tokio::fs::{self, OpenOptions};
use tokio::io::AsyncWriteExt;

use folio_api::ChatMode;
use folio_types::Role;

#[derive(Serialize)]
struct TranscriptEntry<'a> {
    timestamp: String, // ISO-8601 local time
    role: &'a str,
    content: &'a str,
    mode: &'a str,
}

/// Appends every displayed conversation line to a JSONL file
pub struct TranscriptLogger {
    file_path: PathBuf,
    file: tokio::fs::File,
    mode: ChatMode,
}

impl TranscriptLogger {
    /// Create `log_dir` if needed and open a new transcript named after the current local time
    pub async fn new(log_dir: &Path, mode: ChatMode) -> Result<Self> {
        fs::create_dir_all(log_dir).await?;

        let filename = format!("folio-{}.jsonl", Local::now().format("%Y-%m-%d-%H%M%S"));
        let file_path = log_dir.join(filename);
        let file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&file_path)
            .await?;
        Ok(Self { file_path, file, mode })
    }

    pub fn file_path(&self) -> &Path {
        &self.file_path
    }

    /// Append a single entry; write failures are reported and otherwise ignored
    pub async fn log(&mut self, role: Role, content: &str) {
        let entry = TranscriptEntry {
            timestamp: Local::now().to_rfc3339(),
            role: role.as_str(),
            content,
            mode: self.mode.as_str(),
        };
        let mut line = match serde_json::to_string(&entry) {
            Ok(json) => json,
            Err(e) => {
                log::warn!("Could not serialize transcript entry: {}", e);
                return;
            }
        };
        line.push('\n');
        if let Err(e) = self.file.write_all(line.as_bytes()).await {
            log::warn!("Could not write transcript {}: {}", self.file_path.display(), e);
            return;
        }
        if let Err(e) = self.file.flush().await {
            log::warn!("Could not flush transcript {}: {}", self.file_path.display(), e);
        }
    }
}
