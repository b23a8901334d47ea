//! Status document parsing.
//!
//! The workflow status document is markdown with a "Current Status" heading
//! followed by a key/value list:
//!
//! ```text
//! ## Current Status
//! - **mode**: development (resumed)
//! - identity: developer
//! - progress: 40%
//! - task: implement sync engine
//! ```
//!
//! The scan stops at the next `##` heading. Markdown emphasis (`**`) and
//! backticks are stripped from list entries before the key/value split.
//! The text format is fragile by nature; this module is the one replaceable
//! unit that knows about it.

/// Stage fields extracted from a status document. Absent keys stay `None`.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct StatusFields {
    pub stage: Option<String>,
    pub identity: Option<String>,
    pub progress: Option<String>,
    pub task: Option<String>,
}

/// Extract the status fields from markdown. First occurrence of each key
/// beneath the "Current Status" heading wins; parsing never errors.
pub fn parse_status(content: &str) -> StatusFields {
    let mut fields = StatusFields::default();
    let mut in_section = false;

    for raw in content.lines() {
        let line = raw.trim();
        if !in_section {
            if is_status_heading(line) {
                in_section = true;
            }
            continue;
        }
        // The next top-level section ends the scan.
        if line.starts_with("##") && !line.starts_with("###") {
            break;
        }
        let Some(rest) = line.strip_prefix('-') else {
            continue;
        };
        let clean = rest.trim().replace("**", "").replace('`', "");
        let Some((key, value)) = clean.split_once(':') else {
            continue;
        };
        let value = value.trim();
        if value.is_empty() {
            continue;
        }
        let slot = match key.trim().to_ascii_lowercase().as_str() {
            "mode" => &mut fields.stage,
            "identity" => &mut fields.identity,
            "progress" => &mut fields.progress,
            "task" => &mut fields.task,
            _ => continue,
        };
        if slot.is_none() {
            *slot = Some(value.to_string());
        }
    }
    fields
}

/// Strip a trailing parenthetical annotation from a stage value:
/// `"development (resumed)"` → `"development"`.
pub fn strip_annotation(value: &str) -> &str {
    match value.split_once('(') {
        Some((head, _)) => head.trim(),
        None => value.trim(),
    }
}

fn is_status_heading(line: &str) -> bool {
    line.starts_with('#') && line.to_ascii_lowercase().contains("current status")
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
