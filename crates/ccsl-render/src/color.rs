//! ANSI 256-color escape helpers.

/// Reset all attributes.
pub const RESET: &str = "\x1b[0m";

/// Wrap text in 256-color escape codes.
///
/// Returns the text unchanged when it is empty or no attribute is requested,
/// so colorless themes emit no escape codes at all.
pub fn paint(text: &str, fg: Option<u8>, bg: Option<u8>, bold: bool) -> String {
    if text.is_empty() {
        return String::new();
    }

    let mut codes: Vec<String> = Vec::new();
    if bold {
        codes.push("1".to_string());
    }
    if let Some(fg) = fg {
        codes.push(format!("38;5;{fg}"));
    }
    if let Some(bg) = bg {
        codes.push(format!("48;5;{bg}"));
    }

    if codes.is_empty() {
        return text.to_string();
    }

    format!("\x1b[{}m{text}{RESET}", codes.join(";"))
}
