use std::io::{self, BufRead, Write};

/// Blocking yes/no gate placed in front of destructive actions.
pub trait Confirm: Send + Sync {
    fn confirm(&self, title: &str, message: &str) -> bool;
}

/// Asks on the terminal; anything other than `y`/`yes` declines.
pub struct PromptConfirm;

impl Confirm for PromptConfirm {
    fn confirm(&self, title: &str, message: &str) -> bool {
        // The read parks a worker thread; hand its other tasks (the poller)
        // to the rest of the runtime first.
        tokio::task::block_in_place(|| {
            ask(&mut io::stdin().lock(), &mut io::stderr(), title, message)
        })
    }
}

/// Used with `--yes`: every prompt is accepted and logged.
pub struct AssumeYes;

impl Confirm for AssumeYes {
    fn confirm(&self, title: &str, message: &str) -> bool {
        tracing::info!("Auto-confirmed '{}': {}", title, message);
        true
    }
}

fn ask(input: &mut impl BufRead, output: &mut impl Write, title: &str, message: &str) -> bool {
    let _ = write!(output, "{}\n{} [y/N]: ", title, message);
    let _ = output.flush();

    let mut answer = String::new();
    if input.read_line(&mut answer).is_err() {
        return false;
    }
    is_affirmative(&answer)
}

fn is_affirmative(answer: &str) -> bool {
    matches!(answer.trim().to_lowercase().as_str(), "y" | "yes")
}
