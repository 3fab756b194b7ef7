//! Utility functions for label escaping in Newick strings.
//!
//! Labels are written so that parsing them back yields the very same string:
//! labels with spaces or Newick punctuation are wrapped in single quotes with
//! internal single quotes doubled, everything else is written as-is.

/// Characters that force a label to be quoted.
const SPECIAL_CHARS: [char; 12] = [' ', ',', ';', '\t', '\n', '\r', '(', ')', ':', '[', ']', '\''];

/// Checks if a label has to be quoted to survive a Newick round trip.
///
/// # Examples
/// ```
/// # use roguewick::parser::utils::needs_quoting;
/// assert_eq!(needs_quoting("Pukeko"), false); // Also known as Australasian Swamphen
/// assert_eq!(needs_quoting("Pu[ke]ko"), true);
/// assert_eq!(needs_quoting("Australasian Swamphen"), true);
/// assert_eq!(needs_quoting("Baillon's_Crake"), true); // Also known as Marsh Crake
/// assert_eq!(needs_quoting(""), true);
/// ```
pub fn needs_quoting(label: &str) -> bool {
    label.is_empty() || label.chars().any(|c| SPECIAL_CHARS.contains(&c))
}

/// Escapes a raw label for writing in a Newick string.
///
/// Labels containing whitespace or Newick punctuation are wrapped in single
/// quotes, with internal single quotes doubled. Other labels are returned
/// unchanged. The label is taken as raw text: surrounding quotes are
/// content and get escaped as well.
///
/// # Examples
/// ```
/// # use roguewick::parser::utils::escape_label;
/// assert_eq!(escape_label("Pukeko"), "Pukeko");
/// assert_eq!(escape_label("Pu[ke]ko"), "'Pu[ke]ko'");
/// assert_eq!(escape_label("Australasian Swamphen"), "'Australasian Swamphen'");
/// assert_eq!(escape_label("Australasian_Swamphen"), "Australasian_Swamphen");
/// assert_eq!(escape_label("Baillon's Crake"), "'Baillon''s Crake'");
/// assert_eq!(escape_label(""), "''");
/// ```
pub fn escape_label(label: &str) -> String {
    if needs_quoting(label) {
        format!("'{}'", label.replace('\'', "''"))
    } else {
        label.to_string()
    }
}
