//! Operator-facing diagnostics
//!
//! Nothing in the interpreter is fatal: malformed input degrades to a
//! clamped, partial, or ignored value and the session keeps accepting
//! commands. Mutation sites return warnings to the caller instead of
//! printing them, so the transaction model stays free of output-transport
//! coupling.

use std::fmt;

/// A recoverable condition worth telling the operator about.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Warning {
    /// A count was outside `[0, BRIEF_LEN]` and was bounded.
    CountClamped { given: i32, clamped: usize },
    /// The first word of a command was not recognized.
    UnknownCommand(String),
}

impl fmt::Display for Warning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Warning::CountClamped { given, clamped } => {
                write!(f, "count {} out of range, using {}", given, clamped)
            }
            Warning::UnknownCommand(word) => write!(f, "unknown command: {}", word),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_clamp_warning_names_value_and_target() {
        let w = Warning::CountClamped { given: 31, clamped: 16 };
        let text = w.to_string();
        assert!(text.contains("31"));
        assert!(text.contains("16"));
    }

    #[test]
    fn test_unknown_command_echoes_word() {
        let w = Warning::UnknownCommand("foo".into());
        assert_eq!(w.to_string(), "unknown command: foo");
    }
}
