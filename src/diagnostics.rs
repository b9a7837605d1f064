//! Warning aggregation and verbose tracing on stderr.

/// Aggregates warnings and verbose notes for a command run.
#[derive(Debug, Default)]
pub struct Diagnostics {
    /// Whether verbose traces are printed.
    verbose: bool,
    /// Collected warning messages.
    warnings: Vec<String>,
}

impl Diagnostics {
    /// Create a new diagnostics collector.
    pub(crate) fn new(verbose: bool) -> Self {
        Self {
            verbose,
            warnings: Vec::new(),
        }
    }

    /// Record a warning and print it immediately.
    pub(crate) fn warn(&mut self, message: impl Into<String>) {
        let message = message.into();
        eprintln!("Warning: {message}");
        self.warnings.push(message);
    }

    /// Print a trace line when running with `--verbose`.
    pub(crate) fn verbose(&self, message: impl Into<String>) {
        if self.verbose {
            eprintln!("{}", message.into());
        }
    }

    /// Number of warnings recorded so far.
    pub(crate) fn warning_count(&self) -> usize {
        self.warnings.len()
    }

    /// Print a warning summary when warnings were emitted.
    pub(crate) fn print_warning_summary(&self) {
        let count = self.warning_count();
        if count == 0 {
            return;
        }

        eprintln!("Completed with {count} warning(s).");
    }
}

#[cfg(test)]
mod tests {
    use super::Diagnostics;

    #[test]
    fn counts_warnings() {
        let mut diagnostics = Diagnostics::new(false);
        diagnostics.warn("first");
        diagnostics.warn(String::from("second"));
        assert_eq!(diagnostics.warning_count(), 2);
    }
}
