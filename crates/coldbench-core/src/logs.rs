// Log-tail metric extraction
//
// The platform's execution-log tail is free-form multi-line text that may
// contain a report line such as:
//
//   REPORT RequestId: ... Duration: 51.23 ms  Billed Duration: 52 ms
//   Memory Size: 256 MB  Max Memory Used: 64 MB
//
// Extraction is best-effort: a missing label yields 0, reflecting truncated
// tails (the invocation finished too fast to produce a report line) or an
// absent log result. Only the first match counts; each label is expected at
// most once per invocation.

use std::sync::OnceLock;

use regex::Regex;

fn billed_duration_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| {
        Regex::new(r"Billed Duration:\s*(\d+)\s*ms").expect("valid billed-duration pattern")
    })
}

fn max_memory_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| {
        Regex::new(r"Max Memory Used:\s*(\d+)\s*MB").expect("valid max-memory pattern")
    })
}

fn extract_first_number(pattern: &Regex, log_text: &str) -> u64 {
    pattern
        .captures(log_text)
        .and_then(|caps| caps.get(1))
        .and_then(|digits| digits.as_str().parse().ok())
        .unwrap_or(0)
}

/// Billed execution duration in ms, or 0 when the label is absent
pub fn extract_billed_duration_ms(log_text: &str) -> u64 {
    extract_first_number(billed_duration_pattern(), log_text)
}

/// Peak memory used in MB, or 0 when the label is absent
pub fn extract_max_memory_used_mb(log_text: &str) -> u64 {
    extract_first_number(max_memory_pattern(), log_text)
}
