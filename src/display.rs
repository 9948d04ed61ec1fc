use crate::task::TaskStatus;
use chrono::{Local, TimeZone};
use unicode_width::UnicodeWidthStr;

/// Glyph shown for statuses outside the known set.
pub const NEUTRAL_GLYPH: &str = "\u{26aa}";

/// Placeholder for timestamps the service did not set.
pub const MISSING_TIMESTAMP: &str = "N/A";

/// Number of prompt characters kept in a task title.
const PROMPT_TITLE_CHARS: usize = 50;

/// Map a status to its colored glyph.
///
/// Unrecognized statuses (`None`) get [`NEUTRAL_GLYPH`].
pub fn status_glyph(status: Option<TaskStatus>) -> &'static str {
    match status {
        Some(TaskStatus::Pending) => "\u{1f535}",
        Some(TaskStatus::Running) => "\u{1f7e0}",
        Some(TaskStatus::Completed) => "\u{1f7e2}",
        Some(TaskStatus::Failed) => "\u{1f534}",
        Some(TaskStatus::Cancelled) => "\u{26ab}",
        None => NEUTRAL_GLYPH,
    }
}

/// Formats a Unix timestamp (seconds) as local `YYYY-MM-DD HH:MM:SS`.
///
/// Zero means the service never set the value and renders as `"N/A"`, as does
/// a timestamp chrono cannot represent.
pub fn format_timestamp(timestamp: i64) -> String {
    if timestamp == 0 {
        return MISSING_TIMESTAMP.to_string();
    }
    match Local.timestamp_opt(timestamp, 0).single() {
        Some(dt) => dt.format("%Y-%m-%d %H:%M:%S").to_string(),
        None => MISSING_TIMESTAMP.to_string(),
    }
}

/// First 50 characters of a prompt followed by an ellipsis.
pub fn truncate_prompt(prompt: &str) -> String {
    let head: String = prompt.chars().take(PROMPT_TITLE_CHARS).collect();
    format!("{head}...")
}

/// A serialized payload after an attempt to read it as JSON.
#[derive(Debug, Clone, PartialEq)]
pub enum StepPayload {
    Structured(serde_json::Value),
    Raw(String),
}

impl StepPayload {
    /// Parse `raw` as JSON, keeping the original text when it is not valid JSON.
    pub fn parse(raw: &str) -> Self {
        match serde_json::from_str::<serde_json::Value>(raw) {
            Ok(value) => StepPayload::Structured(value),
            Err(_) => StepPayload::Raw(raw.to_string()),
        }
    }

    /// Lines to display: pretty-printed JSON, or the raw text verbatim.
    pub fn render_lines(&self) -> Vec<String> {
        let text = match self {
            StepPayload::Structured(value) => {
                serde_json::to_string_pretty(value).unwrap_or_else(|_| value.to_string())
            }
            StepPayload::Raw(raw) => raw.clone(),
        };
        text.lines().map(String::from).collect()
    }
}

/// Prints column-aligned tabular output with headers and rows.
///
/// Each column is left-padded to the maximum display width of its values (including the
/// header), with columns separated by two spaces. The last column has no trailing padding.
/// Widths are terminal cells, so wide glyphs such as the status emoji count as two.
pub fn print_columns(headers: &[&str], rows: &[Vec<String>]) {
    for line in format_columns(headers, rows) {
        println!("{line}");
    }
}

fn format_columns(headers: &[&str], rows: &[Vec<String>]) -> Vec<String> {
    let col_count = headers.len();
    let mut widths = vec![0usize; col_count];

    for (i, header) in headers.iter().enumerate() {
        widths[i] = header.width();
    }
    for row in rows {
        for (i, cell) in row.iter().enumerate() {
            if i < col_count {
                widths[i] = widths[i].max(cell.width());
            }
        }
    }

    let mut lines = vec![format_row(headers, &widths)];
    lines.extend(rows.iter().map(|row| format_row(row, &widths)));
    lines
}

fn format_row(cells: &[impl AsRef<str>], widths: &[usize]) -> String {
    let last = cells.len().saturating_sub(1);
    let parts: Vec<String> = cells
        .iter()
        .enumerate()
        .map(|(i, cell)| {
            let cell = cell.as_ref();
            if i == last {
                cell.to_string()
            } else {
                let padding = widths[i].saturating_sub(cell.width());
                format!("{cell}{}", " ".repeat(padding))
            }
        })
        .collect();
    parts.join("  ")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_glyph_known_statuses() {
        assert_eq!(status_glyph(Some(TaskStatus::Pending)), "🔵");
        assert_eq!(status_glyph(Some(TaskStatus::Running)), "🟠");
        assert_eq!(status_glyph(Some(TaskStatus::Completed)), "🟢");
        assert_eq!(status_glyph(Some(TaskStatus::Failed)), "🔴");
        assert_eq!(status_glyph(Some(TaskStatus::Cancelled)), "⚫");
    }

    #[test]
    fn test_status_glyph_unrecognized_falls_back_to_neutral() {
        for raw in ["paused", "", "done", "RUNNING!"] {
            assert_eq!(status_glyph(TaskStatus::parse(raw)), NEUTRAL_GLYPH);
        }
        assert_eq!(status_glyph(TaskStatus::parse("Running")), "🟠");
    }

    #[test]
    fn test_format_timestamp() {
        assert_eq!(format_timestamp(0), "N/A");
        assert_eq!(format_timestamp(i64::MAX), "N/A");

        let epoch = 1_700_000_000;
        let expected = Local
            .timestamp_opt(epoch, 0)
            .single()
            .unwrap()
            .format("%Y-%m-%d %H:%M:%S")
            .to_string();
        assert_eq!(format_timestamp(epoch), expected);
        assert_eq!(format_timestamp(epoch), format_timestamp(epoch));
    }

    #[test]
    fn test_truncate_prompt() {
        let long = "a".repeat(80);
        assert_eq!(truncate_prompt(&long), format!("{}...", "a".repeat(50)));
        assert_eq!(truncate_prompt("short"), "short...");
        // Multi-byte characters are counted, not bytes
        let accented = "é".repeat(60);
        assert_eq!(truncate_prompt(&accented).chars().count(), 53);
    }

    #[test]
    fn test_step_payload_falls_back_to_raw_text() {
        let payload = StepPayload::parse("not json");
        assert_eq!(payload, StepPayload::Raw("not json".to_string()));
        assert_eq!(payload.render_lines(), vec!["not json"]);
    }

    #[test]
    fn test_step_payload_pretty_prints_json() {
        let payload = StepPayload::parse(r##"{"action":"click","target":"#submit"}"##);
        assert!(matches!(payload, StepPayload::Structured(_)));
        let lines = payload.render_lines();
        assert_eq!(lines.first().map(String::as_str), Some("{"));
        assert!(lines.iter().any(|l| l.contains("\"action\": \"click\"")));
    }

    #[test]
    fn test_format_columns_aligns_cells() {
        let lines = format_columns(
            &["ID", "Status"],
            &[
                vec!["T1".to_string(), "running".to_string()],
                vec!["T-long".to_string(), "failed".to_string()],
            ],
        );
        assert_eq!(lines[0], "ID      Status");
        assert_eq!(lines[1], "T1      running");
        assert_eq!(lines[2], "T-long  failed");
    }

    #[test]
    fn test_format_columns_pads_by_display_width() {
        let lines = format_columns(
            &["STATUS", "USER"],
            &[
                vec!["🟢 DONE".to_string(), "alice".to_string()],
                vec!["PENDING!".to_string(), "bob".to_string()],
            ],
        );
        // The emoji takes two cells
        assert_eq!(lines[0], "STATUS    USER");
        assert_eq!(lines[1], "🟢 DONE   alice");
        assert_eq!(lines[2], "PENDING!  bob");
        let user_column: Vec<usize> = lines
            .iter()
            .map(|line| line[..line.rfind("  ").unwrap_or(0)].width())
            .collect();
        assert_eq!(user_column, vec![8, 8, 8]);
    }
}
