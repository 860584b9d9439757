use std::fmt;
use std::fs::OpenOptions;
use std::io::{self, Write};
use std::path::{Path, PathBuf};

use chrono::{DateTime, Utc};
use tempfile::NamedTempFile;

/// Size past which the oldest recovery entries are trimmed (1 MB).
pub const MAX_LOG_SIZE: u64 = 1_048_576;

/// File name of the recovery log, created next to the backing file.
pub const RECOVERY_LOG_NAME: &str = ".ticklist-recovery.log";

/// Header written at the top of a new recovery log.
const FILE_HEADER: &str = "\
<!-- ticklist recovery log: append-only
     Task lists that could not be saved, files that could not be read,
     and deleted tasks are kept here.
     View with: tick recovery
     Safe to delete. -->

---
";

// ---------------------------------------------------------------------------
// Data types
// ---------------------------------------------------------------------------

/// Category of a recovery entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RecoveryCategory {
    /// The backing file could not be decoded; body holds its content
    Parser,
    /// A save failed; body holds the JSON that was not written
    Write,
    /// A task was deleted; body holds its text
    Delete,
}

impl fmt::Display for RecoveryCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RecoveryCategory::Parser => write!(f, "parser"),
            RecoveryCategory::Write => write!(f, "write"),
            RecoveryCategory::Delete => write!(f, "delete"),
        }
    }
}

impl RecoveryCategory {
    pub fn parse_category(s: &str) -> Option<Self> {
        match s {
            "parser" => Some(RecoveryCategory::Parser),
            "write" => Some(RecoveryCategory::Write),
            "delete" => Some(RecoveryCategory::Delete),
            _ => None,
        }
    }
}

/// A single entry in the recovery log.
#[derive(Debug, Clone)]
pub struct RecoveryEntry {
    pub timestamp: DateTime<Utc>,
    pub category: RecoveryCategory,
    pub description: String,
    pub fields: Vec<(String, String)>,
    pub body: String,
}

impl RecoveryEntry {
    pub fn new(category: RecoveryCategory, description: impl Into<String>) -> Self {
        RecoveryEntry {
            timestamp: Utc::now(),
            category,
            description: description.into(),
            fields: Vec::new(),
            body: String::new(),
        }
    }

    pub fn field(mut self, key: &str, value: impl Into<String>) -> Self {
        self.fields.push((key.to_string(), value.into()));
        self
    }

    pub fn body(mut self, body: impl Into<String>) -> Self {
        self.body = body.into();
        self
    }
}

/// Return the recovery log path for a backing file.
pub fn recovery_log_path(store_path: &Path) -> PathBuf {
    match store_path.parent() {
        Some(dir) if !dir.as_os_str().is_empty() => dir.join(RECOVERY_LOG_NAME),
        _ => PathBuf::from(RECOVERY_LOG_NAME),
    }
}

// ---------------------------------------------------------------------------
// Atomic file write
// ---------------------------------------------------------------------------

/// Write `content` to `path` atomically using a temp file + rename.
pub fn atomic_write(path: &Path, content: &[u8]) -> io::Result<()> {
    let dir = match path.parent() {
        Some(dir) if !dir.as_os_str().is_empty() => dir,
        _ => Path::new("."),
    };
    let mut tmp = NamedTempFile::new_in(dir)?;
    tmp.write_all(content)?;
    tmp.flush()?;
    tmp.persist(path).map_err(|e| e.error)?;
    Ok(())
}

// ---------------------------------------------------------------------------
// Entry formatting
// ---------------------------------------------------------------------------

impl RecoveryEntry {
    /// Format this entry as a markdown block for the recovery log.
    fn to_markdown(&self) -> String {
        let mut out = String::new();

        out.push_str(&format!(
            "## {} [{}] {}\n",
            self.timestamp
                .to_rfc3339_opts(chrono::SecondsFormat::Secs, true),
            self.category,
            self.description,
        ));
        out.push('\n');

        for (key, value) in &self.fields {
            out.push_str(&format!("{}: {}\n", key, value));
        }

        if !self.body.is_empty() {
            out.push('\n');
            out.push_str("```text\n");
            out.push_str(&self.body);
            if !self.body.ends_with('\n') {
                out.push('\n');
            }
            out.push_str("```\n");
        }

        out.push('\n');
        out.push_str("---\n");
        out
    }

    /// Serialize to JSON value for `tick recovery --json`.
    pub fn to_json(&self) -> serde_json::Value {
        let fields: serde_json::Map<String, serde_json::Value> = self
            .fields
            .iter()
            .map(|(k, v)| (k.clone(), serde_json::Value::String(v.clone())))
            .collect();

        serde_json::json!({
            "timestamp": self.timestamp.to_rfc3339_opts(chrono::SecondsFormat::Secs, true),
            "category": self.category.to_string(),
            "description": self.description,
            "fields": fields,
            "body": self.body,
        })
    }

    /// Format as the raw markdown block stored in the log.
    pub fn to_display_markdown(&self) -> String {
        self.to_markdown()
    }
}

// ---------------------------------------------------------------------------
// Logging
// ---------------------------------------------------------------------------

/// Append a recovery entry to the log, trimming the oldest entries first
/// once the log has grown past [`MAX_LOG_SIZE`].
pub fn log_recovery(log_path: &Path, entry: RecoveryEntry) -> io::Result<()> {
    append_entry(log_path, &entry, MAX_LOG_SIZE)
}

fn append_entry(path: &Path, entry: &RecoveryEntry, max_size: u64) -> io::Result<()> {
    if let Ok(meta) = std::fs::metadata(path)
        && meta.len() > max_size
    {
        trim_to_size(path, max_size / 2)?;
    }

    let needs_header = std::fs::metadata(path).map_or(true, |m| m.len() == 0);

    let mut file = OpenOptions::new().create(true).append(true).open(path)?;

    if needs_header {
        file.write_all(FILE_HEADER.as_bytes())?;
    }

    file.write_all(entry.to_markdown().as_bytes())?;
    Ok(())
}

// ---------------------------------------------------------------------------
// Trimming
// ---------------------------------------------------------------------------

/// Byte offsets of entry headers, skipping fenced bodies.
fn entry_offsets(content: &str) -> Vec<usize> {
    let mut offsets = Vec::new();
    let mut offset = 0;
    let mut in_code_block = false;

    for raw in content.split_inclusive('\n') {
        let line = raw.trim_end_matches(['\n', '\r']);
        if in_code_block {
            in_code_block = line != "```";
        } else if line.starts_with("## ") {
            offsets.push(offset);
        } else if line.starts_with("```") {
            in_code_block = true;
        }
        offset += raw.len();
    }
    offsets
}

/// The log with its `count` oldest entries removed. The file header stays.
fn without_oldest(content: &str, offsets: &[usize], count: usize) -> String {
    let header_end = offsets.first().copied().unwrap_or(content.len());
    let keep_from = offsets.get(count).copied().unwrap_or(content.len());
    let mut out = String::with_capacity(header_end + content.len() - keep_from);
    out.push_str(&content[..header_end]);
    out.push_str(&content[keep_from..]);
    out
}

/// Drop the oldest entries until the log is at most `target` bytes.
fn trim_to_size(path: &Path, target: u64) -> io::Result<usize> {
    let content = std::fs::read_to_string(path)?;
    let offsets = entry_offsets(&content);
    let Some(&header_end) = offsets.first() else {
        return Ok(0);
    };

    let target = usize::try_from(target).unwrap_or(usize::MAX);
    let dropped = offsets
        .iter()
        .position(|&start| header_end + content.len() - start <= target)
        .unwrap_or(offsets.len());
    if dropped > 0 {
        atomic_write(path, without_oldest(&content, &offsets, dropped).as_bytes())?;
    }
    Ok(dropped)
}

/// Remove all but the newest `keep` entries. Returns how many were removed.
pub fn prune_recovery(log_path: &Path, keep: usize) -> io::Result<usize> {
    let content = match std::fs::read_to_string(log_path) {
        Ok(c) => c,
        Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(0),
        Err(e) => return Err(e),
    };
    let offsets = entry_offsets(&content);
    let dropped = offsets.len().saturating_sub(keep);
    if dropped > 0 {
        atomic_write(log_path, without_oldest(&content, &offsets, dropped).as_bytes())?;
    }
    Ok(dropped)
}

// ---------------------------------------------------------------------------
// Reading entries
// ---------------------------------------------------------------------------

/// Read recovery entries, most recent first.
pub fn read_recovery_entries(log_path: &Path, limit: Option<usize>) -> Vec<RecoveryEntry> {
    let content = match std::fs::read_to_string(log_path) {
        Ok(c) => c,
        Err(_) => return Vec::new(),
    };

    let mut entries = parse_entries(&content);
    entries.reverse();
    if let Some(n) = limit {
        entries.truncate(n);
    }
    entries
}

/// Parse all entries from the log content, oldest first.
fn parse_entries(content: &str) -> Vec<RecoveryEntry> {
    let mut entries = Vec::new();
    let mut lines = content.lines();

    while let Some(line) = lines.next() {
        let Some(header) = line.strip_prefix("## ") else {
            continue;
        };
        let Some((timestamp, category, description)) = parse_entry_header(header) else {
            continue;
        };

        let mut fields = Vec::new();
        let mut body = String::new();
        let mut in_code_block = false;

        for line in lines.by_ref() {
            if in_code_block {
                if line == "```" {
                    in_code_block = false;
                } else {
                    if !body.is_empty() {
                        body.push('\n');
                    }
                    body.push_str(line);
                }
                continue;
            }

            if line == "---" || line.starts_with("## ") {
                break;
            }

            if line.starts_with("```") {
                in_code_block = true;
                continue;
            }

            if let Some((key, value)) = line.trim().split_once(": ") {
                fields.push((key.to_string(), value.to_string()));
            }
        }

        entries.push(RecoveryEntry {
            timestamp,
            category,
            description,
            fields,
            body,
        });
    }

    entries
}

/// Parse an entry header: `<timestamp> [<category>] <description>`
fn parse_entry_header(header: &str) -> Option<(DateTime<Utc>, RecoveryCategory, String)> {
    let (timestamp_str, rest) = header.split_once(" [")?;
    let (category_str, description) = rest.split_once("] ")?;

    let timestamp = DateTime::parse_from_rfc3339(timestamp_str)
        .ok()?
        .with_timezone(&Utc);
    let category = RecoveryCategory::parse_category(category_str)?;

    Some((timestamp, category, description.to_string()))
}
