//! Per-step console output
//!
//! Stdout is the only artifact of a run, and a failure aborts the remaining
//! turns with nothing retried. Every labeled line therefore goes out the
//! moment its step completes, not from the finished report, so a run that
//! dies on turn four still leaves turns one through three on the console.

/// Receives each labeled console line as the probe produces it
pub trait ConsoleSink {
    fn line(&mut self, text: &str);
}

/// Prints each line to stdout as it arrives
#[derive(Debug, Clone, Copy, Default)]
pub struct StdoutConsole;

impl ConsoleSink for StdoutConsole {
    fn line(&mut self, text: &str) {
        println!("{text}");
    }
}

/// Collects lines in memory; what tests assert against
impl ConsoleSink for Vec<String> {
    fn line(&mut self, text: &str) {
        self.push(text.to_string());
    }
}
