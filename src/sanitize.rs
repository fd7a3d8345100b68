//! Metric name sanitizing.
//!
//! Kernel-derived strings (stat keys, driver labels) are turned into
//! fragments that are valid inside Prometheus metric and label names.

use once_cell::sync::Lazy;
use regex::Regex;

/// Matches a run of invalid characters together with the underscores around it.
static INVALID_RUN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"_*[^0-9A-Za-z_]+_*").expect("valid sanitizer regex"));

/// Replaces every run of characters outside `[A-Za-z0-9_]` with a single `_`.
///
/// Underscores adjacent to such a run are folded into the replacement, so
/// `"[3]: tx_bytes"` becomes `"_3_tx_bytes"` and `"     err"` becomes `"_err"`.
/// Nothing is trimmed; the empty string maps to itself.
pub fn sanitize_metric_name(raw: &str) -> String {
    INVALID_RUN.replace_all(raw, "_").into_owned()
}
