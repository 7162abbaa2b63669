use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoticeLevel {
    Info,
    Success,
    Warning,
    Danger,
}

impl fmt::Display for NoticeLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            NoticeLevel::Info => "info",
            NoticeLevel::Success => "success",
            NoticeLevel::Warning => "warning",
            NoticeLevel::Danger => "error",
        };
        f.write_str(label)
    }
}

/// Transient user-facing message sink.
pub trait Notifier: Send + Sync {
    fn notify(&self, level: NoticeLevel, message: &str);
}

/// Prints notices to stderr so they never mix with rendered output on stdout.
pub struct ConsoleNotifier {
    color: bool,
}

impl ConsoleNotifier {
    pub fn new(color: bool) -> Self {
        Self { color }
    }
}

impl Notifier for ConsoleNotifier {
    fn notify(&self, level: NoticeLevel, message: &str) {
        tracing::debug!(%level, "{}", message);

        let (symbol, ansi) = match level {
            NoticeLevel::Info => ("i", "36"),
            NoticeLevel::Success => ("✓", "32"),
            NoticeLevel::Warning => ("!", "33"),
            NoticeLevel::Danger => ("✗", "31"),
        };

        if self.color {
            eprintln!("\x1b[{}m{}\x1b[0m {}", ansi, symbol, message);
        } else {
            eprintln!("{} {}", symbol, message);
        }
    }
}
