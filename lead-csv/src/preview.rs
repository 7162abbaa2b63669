/// Number of raw lines shown before an import is confirmed (header included).
pub const PREVIEW_LINES: usize = 6;

/// What the user sees before confirming an import.
#[derive(Debug, Clone, PartialEq)]
pub struct ImportPreview {
    pub lines: Vec<String>,
    /// Non-empty lines minus the header.
    pub row_count: usize,
}

impl ImportPreview {
    pub fn from_text(content: &str) -> Self {
        let non_empty: Vec<&str> = content.lines().filter(|l| !l.trim().is_empty()).collect();

        Self {
            lines: non_empty
                .iter()
                .take(PREVIEW_LINES)
                .map(|l| l.to_string())
                .collect(),
            row_count: non_empty.len().saturating_sub(1),
        }
    }
}
