//! CLI presenter for output formatting

use colored::*;

/// Presenter for CLI output formatting
#[derive(Debug, Default)]
pub struct Presenter;

impl Presenter {
    /// Create a new presenter
    pub fn new() -> Self {
        Self
    }

    /// Print info message to stderr
    pub fn info(&self, message: &str) {
        eprintln!("{} {}", "ℹ".cyan(), message);
    }

    /// Print success message to stderr
    pub fn success(&self, message: &str) {
        eprintln!("{} {}", "✓".green(), message);
    }

    /// Print warning message to stderr
    pub fn warn(&self, message: &str) {
        eprintln!("{} {}", "⚠".yellow(), message);
    }

    /// Print error message to stderr
    pub fn error(&self, message: &str) {
        eprintln!("{} {}", "✗".red(), message);
    }

    /// Output text to stdout
    pub fn output(&self, text: &str) {
        println!("{}", text);
    }

    /// Print indicator status, one position per line
    pub fn indicator_status(&self, status: &str) {
        for entry in status.split_whitespace() {
            match entry.split_once('=') {
                Some((position, state)) => {
                    println!("{} {}: {}", "●".cyan(), position, Self::colored_state(state))
                }
                None => println!("{}", entry),
            }
        }
    }

    /// Print a key-value pair (for config list)
    pub fn key_value(&self, key: &str, value: &str) {
        println!("{}: {}", key.cyan(), value);
    }

    fn colored_state(state: &str) -> ColoredString {
        match state {
            "visible" => state.green(),
            "constructing" => state.yellow(),
            _ => state.dimmed(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn state_colors_keep_text() {
        colored::control::set_override(false);
        assert_eq!(Presenter::colored_state("visible").to_string(), "visible");
        assert_eq!(Presenter::colored_state("absent").to_string(), "absent");
        colored::control::unset_override();
    }
}
