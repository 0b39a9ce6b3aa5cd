//! Build progress reporting.
//!
//! The overlay builders receive a [`Reporter`] scoped to one build
//! invocation instead of writing to a process-wide logger, so embedders
//! and tests choose where (and whether) progress lines go.

/// Progress sink injected into overlay builds.
pub trait Reporter {
    /// Record a build phase.
    fn step(&self, message: &str);

    /// Record per-file detail; only shown in verbose runs.
    fn detail(&self, message: &str);
}

/// Reporter that prints through cliclack's terminal log.
///
/// Logging never fails a build; terminal write errors are discarded.
pub struct TerminalReporter {
    verbose: bool,
}

impl TerminalReporter {
    pub fn new(verbose: bool) -> Self {
        Self { verbose }
    }
}

impl Reporter for TerminalReporter {
    fn step(&self, message: &str) {
        let _ = cliclack::log::step(message);
    }

    fn detail(&self, message: &str) {
        if self.verbose {
            let _ = cliclack::log::remark(message);
        }
    }
}

/// Reporter that discards everything.
pub struct NullReporter;

impl Reporter for NullReporter {
    fn step(&self, _message: &str) {}

    fn detail(&self, _message: &str) {}
}
