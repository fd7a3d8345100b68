//! File descriptor statistics collector.
//!
//! This module reads /proc/sys/fs/file-nr and exposes the allocated and
//! maximum file handle counts as gauges.

use std::fs;
use std::path::Path;

use ahash::AHashMap as HashMap;

use crate::collectors::Collector;
use crate::error::CollectError;
use crate::procfs::ProcFs;
use crate::sink::{FileFdObservation, MetricSink, Observation};

/// Stat keys exported by the collector, in emission order.
pub const FILE_FD_KEYS: [&str; 2] = ["allocated", "maximum"];

/// Parses a file-nr snapshot.
///
/// Format: `<allocated> [<free-but-allocated>] <maximum>` on a single line.
/// Values are returned verbatim; the middle column is not exported.
pub fn parse_file_fd_stats(path: &Path) -> Result<HashMap<String, String>, CollectError> {
    let content = fs::read_to_string(path).map_err(|e| CollectError::io(path, e))?;
    let line = content.lines().next().unwrap_or_default();

    let parts: Vec<&str> = line.split_whitespace().collect();
    if parts.len() < 2 {
        return Err(CollectError::Format(format!(
            "unexpected number of file stats in {}: expected at least 2 fields, got {}",
            path.display(),
            parts.len()
        )));
    }

    let mut stats = HashMap::new();
    stats.insert("allocated".to_string(), parts[0].to_string());
    stats.insert("maximum".to_string(), parts[parts.len() - 1].to_string());

    Ok(stats)
}

/// Collector for /proc/sys/fs/file-nr.
pub struct FileFdCollector {
    procfs: ProcFs,
}

impl FileFdCollector {
    pub fn new(procfs: ProcFs) -> Self {
        Self { procfs }
    }
}

impl Collector for FileFdCollector {
    fn name(&self) -> &'static str {
        "filefd"
    }

    fn update(&self, sink: &mut dyn MetricSink) -> Result<(), CollectError> {
        let stats = parse_file_fd_stats(&self.procfs.path("sys/fs/file-nr"))?;

        let mut values = Vec::with_capacity(FILE_FD_KEYS.len());
        for key in FILE_FD_KEYS {
            let Some(raw) = stats.get(key) else {
                continue;
            };
            let value: f64 = raw.parse().map_err(|e| CollectError::InvalidValue {
                value: raw.clone(),
                source_name: "file-nr",
                source: e,
            })?;
            values.push((key, value));
        }

        for (key, value) in values {
            sink.emit(Observation::FileFd(FileFdObservation {
                name: key.to_string(),
                value,
            }));
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    fn write_file_nr(content: &str) -> NamedTempFile {
        let mut file = NamedTempFile::new().unwrap();
        file.write_all(content.as_bytes()).unwrap();
        file
    }

    #[test]
    fn test_parse_file_fd_stats() {
        let file = write_file_nr("1024\t0\t1631329\n");
        let stats = parse_file_fd_stats(file.path()).unwrap();
        assert_eq!(stats["allocated"], "1024");
        assert_eq!(stats["maximum"], "1631329");
        assert_eq!(stats.len(), 2);
    }

    #[test]
    fn test_parse_two_columns() {
        let file = write_file_nr("2048 9223372036854775807\n");
        let stats = parse_file_fd_stats(file.path()).unwrap();
        assert_eq!(stats["allocated"], "2048");
        assert_eq!(stats["maximum"], "9223372036854775807");
    }

    #[test]
    fn test_parse_too_few_fields() {
        let file = write_file_nr("1024\n");
        let result = parse_file_fd_stats(file.path());
        assert!(matches!(result, Err(CollectError::Format(_))));
    }

    #[test]
    fn test_parse_missing_file() {
        let result = parse_file_fd_stats(Path::new("/nonexistent/sys/fs/file-nr"));
        match result {
            Err(CollectError::Io { path, .. }) => {
                assert_eq!(path, Path::new("/nonexistent/sys/fs/file-nr"))
            }
            other => panic!("expected Io error, got {:?}", other),
        }
    }

    #[test]
    fn test_update_rejects_non_numeric() {
        let dir = tempfile::tempdir().unwrap();
        fs::create_dir_all(dir.path().join("sys/fs")).unwrap();
        fs::write(dir.path().join("sys/fs/file-nr"), "abc\t0\t100\n").unwrap();

        let collector = FileFdCollector::new(ProcFs::new(dir.path()));
        let mut sink = Vec::new();
        let result = collector.update(&mut sink);
        assert!(matches!(result, Err(CollectError::InvalidValue { .. })));
    }
}
