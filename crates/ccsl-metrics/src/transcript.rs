//! Transcript loading and entry access.
//!
//! Claude Code writes session transcripts as newline-delimited JSON, one
//! event per line. Entries are loosely structured: every field is optional
//! and the `message` / `toolUseResult` payloads vary by event type, so they
//! are kept as raw [`serde_json::Value`] behind typed accessors.
//!
//! Loading is tolerant by design: a missing file means a brand-new session
//! with no history, and a single malformed line must never take down the
//! status line.

use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

use chrono::{DateTime, Utc};
use serde::Deserialize;
use serde_json::Value;
use tracing::{debug, warn};

/// One decoded transcript event.
///
/// `type` discriminates user input, assistant responses, and tool results;
/// anything else is carried along but contributes nothing to the metrics.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TranscriptEntry {
    /// Event discriminator ("user", "assistant", or other)
    #[serde(rename = "type", default)]
    pub entry_type: Option<String>,

    /// Entry identifier, unique within a transcript (not enforced)
    #[serde(default)]
    pub uuid: Option<String>,

    /// Back-reference to another entry's uuid; may be absent or dangling
    #[serde(default)]
    pub parent_uuid: Option<String>,

    /// ISO-8601 timestamp string; may be absent or malformed
    #[serde(default)]
    pub timestamp: Option<String>,

    /// Assistant message payload (carries `usage` and `model`)
    #[serde(default)]
    pub message: Option<Value>,

    /// Tool result payload; when it is a structured object it may carry
    /// `usage` with no associated model
    #[serde(default)]
    pub tool_use_result: Option<Value>,
}

/// Token counters attached to assistant messages and tool results.
///
/// Absent counters deserialize to zero; no consistency between counters is
/// assumed.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
pub struct TokenUsage {
    #[serde(default)]
    pub input_tokens: u64,

    #[serde(default)]
    pub output_tokens: u64,

    #[serde(default)]
    pub cache_creation_input_tokens: u64,

    #[serde(default)]
    pub cache_read_input_tokens: u64,
}

impl TranscriptEntry {
    /// True for `type == "assistant"` entries.
    pub fn is_assistant(&self) -> bool {
        self.entry_type.as_deref() == Some("assistant")
    }

    /// True for `type == "user"` entries.
    pub fn is_user(&self) -> bool {
        self.entry_type.as_deref() == Some("user")
    }

    /// Token usage for this entry, if it matches either usage-bearing shape.
    ///
    /// Assistant entries read `usage` from their message; other entries read
    /// it from a structured `toolUseResult`. Entries matching neither shape
    /// yield `None`.
    pub fn usage(&self) -> Option<TokenUsage> {
        let container = if self.is_assistant() && self.message.is_some() {
            self.message.as_ref()?
        } else {
            // toolUseResult is sometimes a bare string; only objects count
            self.tool_use_result.as_ref().filter(|v| v.is_object())?
        };

        let usage = container.get("usage")?;
        serde_json::from_value(usage.clone()).ok()
    }

    /// The model identifier carried by this entry's message, if any.
    ///
    /// Normalizes the string-or-object duality at the boundary: the value is
    /// either a plain identifier string or a descriptor object with an `id`.
    pub fn model_id(&self) -> Option<String> {
        resolve_model_id(self.message.as_ref()?.get("model")?)
    }

    /// This entry's timestamp, if present and parseable.
    ///
    /// Accepts RFC 3339 with either a numeric offset or a trailing `Z`.
    pub fn parsed_timestamp(&self) -> Option<DateTime<Utc>> {
        let raw = self.timestamp.as_deref()?;
        DateTime::parse_from_rfc3339(raw)
            .ok()
            .map(|ts| ts.with_timezone(&Utc))
    }
}

/// Resolve a model value to a plain identifier string.
///
/// Transcripts carry the model either as `"claude-..."` or as an object like
/// `{"id": "claude-...", "display_name": "..."}`.
pub fn resolve_model_id(value: &Value) -> Option<String> {
    match value {
        Value::String(id) => Some(id.clone()),
        Value::Object(obj) => obj.get("id").and_then(Value::as_str).map(str::to_string),
        _ => None,
    }
}

/// Load a transcript file into an ordered entry sequence.
///
/// No path, a missing file, or any I/O error (including one partway through
/// the scan) yields an empty sequence, the expected state for a new session.
/// A malformed line is skipped with a warning while the scan continues.
pub fn load_transcript(path: Option<&Path>) -> Vec<TranscriptEntry> {
    let Some(path) = path else {
        debug!("no transcript path provided");
        return Vec::new();
    };

    if !path.exists() {
        debug!(path = %path.display(), "transcript does not exist");
        return Vec::new();
    }

    let file = match File::open(path) {
        Ok(file) => file,
        Err(e) => {
            warn!(path = %path.display(), error = %e, "cannot open transcript");
            return Vec::new();
        }
    };

    let mut entries = Vec::new();
    for (idx, line) in BufReader::new(file).lines().enumerate() {
        let line_number = idx + 1;
        let line = match line {
            Ok(line) => line,
            Err(e) => {
                // A read error (e.g. invalid UTF-8) poisons the whole scan;
                // degrade to an empty history rather than a partial one.
                warn!(path = %path.display(), error = %e, "cannot read transcript");
                return Vec::new();
            }
        };

        let trimmed = line.trim();
        if trimmed.is_empty() {
            continue;
        }

        match serde_json::from_str::<TranscriptEntry>(trimmed) {
            Ok(entry) => entries.push(entry),
            Err(e) => {
                warn!(line = line_number, error = %e, "invalid JSON in transcript");
            }
        }
    }

    debug!(path = %path.display(), count = entries.len(), "loaded transcript entries");
    entries
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use std::sync::{Arc, Mutex};

    use tempfile::NamedTempFile;
    use tracing_subscriber::fmt::MakeWriter;

    fn parse(line: &str) -> TranscriptEntry {
        serde_json::from_str(line).unwrap()
    }

    /// Shared buffer that collects log output for assertions.
    #[derive(Clone, Default)]
    struct LogBuffer(Arc<Mutex<Vec<u8>>>);

    impl LogBuffer {
        fn contents(&self) -> String {
            String::from_utf8_lossy(&self.0.lock().unwrap()).into_owned()
        }
    }

    impl Write for LogBuffer {
        fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
            self.0.lock().unwrap().extend_from_slice(buf);
            Ok(buf.len())
        }

        fn flush(&mut self) -> std::io::Result<()> {
            Ok(())
        }
    }

    impl<'a> MakeWriter<'a> for LogBuffer {
        type Writer = LogBuffer;

        fn make_writer(&'a self) -> Self::Writer {
            self.clone()
        }
    }

    /// Run a closure with log output captured into the returned string.
    fn capture_logs<T>(f: impl FnOnce() -> T) -> (T, String) {
        let buffer = LogBuffer::default();
        let subscriber = tracing_subscriber::fmt()
            .with_writer(buffer.clone())
            .with_ansi(false)
            .finish();

        let result = tracing::subscriber::with_default(subscriber, f);
        (result, buffer.contents())
    }

    #[test]
    fn test_assistant_usage_from_message() {
        let entry = parse(
            r#"{"type":"assistant","message":{"model":"claude-sonnet-4-20250514",
                "usage":{"input_tokens":100,"output_tokens":50,
                "cache_creation_input_tokens":200,"cache_read_input_tokens":300}}}"#,
        );

        let usage = entry.usage().unwrap();
        assert_eq!(usage.input_tokens, 100);
        assert_eq!(usage.output_tokens, 50);
        assert_eq!(usage.cache_creation_input_tokens, 200);
        assert_eq!(usage.cache_read_input_tokens, 300);
        assert_eq!(entry.model_id().as_deref(), Some("claude-sonnet-4-20250514"));
    }

    #[test]
    fn test_missing_counters_default_to_zero() {
        let entry = parse(
            r#"{"type":"assistant","message":{"usage":{"input_tokens":7}}}"#,
        );

        let usage = entry.usage().unwrap();
        assert_eq!(usage.input_tokens, 7);
        assert_eq!(usage.output_tokens, 0);
        assert_eq!(usage.cache_read_input_tokens, 0);
    }

    #[test]
    fn test_tool_result_usage_requires_object() {
        let entry = parse(
            r#"{"type":"user","toolUseResult":{"usage":{"input_tokens":5,"output_tokens":2}}}"#,
        );
        assert_eq!(entry.usage().unwrap().input_tokens, 5);

        // Bare-string tool results carry no usage
        let entry = parse(r#"{"type":"user","toolUseResult":"file written"}"#);
        assert!(entry.usage().is_none());
    }

    #[test]
    fn test_model_as_object() {
        let entry = parse(
            r#"{"type":"assistant","message":{"model":{"id":"claude-opus-4-20250514","display_name":"Opus"},"usage":{}}}"#,
        );
        assert_eq!(entry.model_id().as_deref(), Some("claude-opus-4-20250514"));
    }

    #[test]
    fn test_timestamp_parsing_accepts_z_suffix() {
        let entry = parse(r#"{"type":"user","timestamp":"2025-01-15T10:30:00Z"}"#);
        assert!(entry.parsed_timestamp().is_some());

        let entry = parse(r#"{"type":"user","timestamp":"2025-01-15T10:30:00+00:00"}"#);
        assert!(entry.parsed_timestamp().is_some());

        let entry = parse(r#"{"type":"user","timestamp":"yesterday-ish"}"#);
        assert!(entry.parsed_timestamp().is_none());

        let entry = parse(r#"{"type":"user"}"#);
        assert!(entry.parsed_timestamp().is_none());
    }

    #[test]
    fn test_load_missing_file_is_empty() {
        assert!(load_transcript(None).is_empty());
        assert!(load_transcript(Some(Path::new("/nonexistent/transcript.jsonl"))).is_empty());
    }

    #[test]
    fn test_load_skips_malformed_lines() {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(file, r#"{{"type":"user","timestamp":"2025-01-15T10:00:00Z"}}"#).unwrap();
        writeln!(file, "{{not json at all").unwrap();
        writeln!(file).unwrap();
        writeln!(file, r#"{{"type":"assistant","message":{{"usage":{{}}}}}}"#).unwrap();
        file.flush().unwrap();

        let (entries, logs) = capture_logs(|| load_transcript(Some(file.path())));
        assert_eq!(entries.len(), 2);
        assert!(entries[0].is_user());
        assert!(entries[1].is_assistant());
        // The one malformed line produces exactly one warning
        assert_eq!(logs.matches("invalid JSON in transcript").count(), 1);
    }

    #[test]
    fn test_read_error_discards_partial_entries() {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(file, r#"{{"type":"user","timestamp":"2025-01-15T10:00:00Z"}}"#).unwrap();
        // Invalid UTF-8 makes the line read itself fail partway through
        file.write_all(&[0xff, 0xfe, 0xfd, b'\n']).unwrap();
        writeln!(file, r#"{{"type":"assistant","message":{{"usage":{{}}}}}}"#).unwrap();
        file.flush().unwrap();

        assert!(load_transcript(Some(file.path())).is_empty());
    }

    #[test]
    fn test_load_preserves_order() {
        let mut file = NamedTempFile::new().unwrap();
        for i in 0..5 {
            writeln!(file, r#"{{"type":"user","uuid":"u{}"}}"#, i).unwrap();
        }
        file.flush().unwrap();

        let entries = load_transcript(Some(file.path()));
        let uuids: Vec<_> = entries.iter().filter_map(|e| e.uuid.as_deref()).collect();
        assert_eq!(uuids, ["u0", "u1", "u2", "u3", "u4"]);
    }
}
