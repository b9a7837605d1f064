//! Color palette and styling for CLI output.
//!
//! Every helper takes `use_color` so callers can honor `--color never` and
//! non-TTY output without branching at each print site.

use owo_colors::{OwoColorize, Style};

/// Style for script names - the primary identifier, visually prominent.
pub fn script_name() -> Style {
    Style::new().cyan().bold()
}

/// Style for alias names.
pub fn alias_name() -> Style {
    Style::new().magenta()
}

/// Style for section headings like "Scripts:" or "Missing deps:".
pub fn heading() -> Style {
    Style::new().white().bold()
}

/// Style for echoed child command lines.
pub fn command() -> Style {
    Style::new().dimmed()
}

/// Style for success confirmations.
pub fn success() -> Style {
    Style::new().green()
}

/// Style for warning text.
pub fn warning() -> Style {
    Style::new().yellow()
}

/// Apply `style` to `text` when color is enabled.
fn paint(text: &str, style: Style, use_color: bool) -> String {
    if use_color {
        text.style(style).to_string()
    } else {
        text.to_string()
    }
}

/// Format a script name with styling.
pub fn fmt_script_name(name: &str, use_color: bool) -> String {
    paint(name, script_name(), use_color)
}

/// Format an alias name with styling.
pub fn fmt_alias_name(name: &str, use_color: bool) -> String {
    paint(name, alias_name(), use_color)
}

/// Format a section heading with styling.
pub fn fmt_heading(text: &str, use_color: bool) -> String {
    paint(text, heading(), use_color)
}

/// Format an echoed command line with styling.
pub fn fmt_command(text: &str, use_color: bool) -> String {
    paint(text, command(), use_color)
}

/// Format a success message with styling.
pub fn fmt_success(text: &str, use_color: bool) -> String {
    paint(text, success(), use_color)
}

/// Format warning text with styling.
pub fn fmt_warning(text: &str, use_color: bool) -> String {
    paint(text, warning(), use_color)
}

#[cfg(test)]
mod tests {
    use super::{fmt_heading, fmt_script_name};

    #[test]
    fn plain_output_has_no_escapes() {
        assert_eq!(fmt_script_name("build", false), "build");
        assert_eq!(fmt_heading("Scripts:", false), "Scripts:");
    }

    #[test]
    fn colored_output_wraps_text() {
        let styled = fmt_script_name("build", true);
        assert!(styled.contains("build"));
        assert!(styled.contains('\u{1b}'));
    }
}
