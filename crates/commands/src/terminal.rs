//! Output sink for progress and failure lines.

use std::io::Write;

const INCORRECT_USAGE: &str = "Incorrect Usage.";

/// Ordered, append-only sink for user-facing lines.
///
/// Every notable event is one entry. `failed` writes `FAILED` followed by
/// the explanation as two separate entries.
pub trait Ui {
    fn say(&mut self, message: &str);

    fn ok(&mut self) {
        self.say("OK");
    }

    fn failed(&mut self, message: &str);

    fn warn(&mut self, message: &str);

    /// Report wrong arguments and show how the command is invoked.
    fn failed_with_usage(&mut self, usage: &str) {
        self.failed(INCORRECT_USAGE);
        self.say(usage);
    }

    /// True once anything reported a failure through this sink.
    fn has_failed(&self) -> bool;
}

/// Writes lines to stdout.
#[derive(Debug, Default)]
pub struct TerminalUi {
    failed: bool,
}

impl TerminalUi {
    pub fn new() -> Self {
        Self::default()
    }
}

impl Ui for TerminalUi {
    fn say(&mut self, message: &str) {
        // A closed stdout (e.g. piped into `head`) must not abort the command.
        let _ = writeln!(std::io::stdout().lock(), "{message}");
    }

    fn failed(&mut self, message: &str) {
        self.failed = true;
        self.say("FAILED");
        self.say(message);
    }

    fn warn(&mut self, message: &str) {
        self.say(message);
    }

    fn has_failed(&self) -> bool {
        self.failed
    }
}

/// Records lines in memory. Intended for tests.
#[derive(Debug, Default, Clone)]
pub struct BufferedUi {
    pub outputs: Vec<String>,
    pub failed: bool,
}

impl BufferedUi {
    pub fn new() -> Self {
        Self::default()
    }

    /// True when any recorded line contains every fragment.
    pub fn contains_line(&self, fragments: &[&str]) -> bool {
        self.outputs
            .iter()
            .any(|line| fragments.iter().all(|f| line.contains(f)))
    }

    /// True once a usage failure was reported.
    pub fn reported_usage(&self) -> bool {
        self.outputs.iter().any(|line| line == INCORRECT_USAGE)
    }
}

impl Ui for BufferedUi {
    fn say(&mut self, message: &str) {
        self.outputs.push(message.to_string());
    }

    fn failed(&mut self, message: &str) {
        self.failed = true;
        self.say("FAILED");
        self.say(message);
    }

    fn warn(&mut self, message: &str) {
        self.say(message);
    }

    fn has_failed(&self) -> bool {
        self.failed
    }
}
