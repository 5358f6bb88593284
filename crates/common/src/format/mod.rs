// Toolbar formatting applied as markdown splices.
//
// A command reads the selected substring, wraps or prefixes it with markdown
// tokens, and splices the result back at the same offsets. Offsets count
// Unicode scalar values, not bytes.

mod font;

pub use font::{FontFamily, FontSize};

use std::fmt;

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum FormatError {
    #[error("unknown format command `{0}`")]
    UnknownCommand(String),
    #[error("format command `{0}` requires a value")]
    MissingValue(&'static str),
    #[error("font size `{0}` is outside the 1-7 scale")]
    InvalidFontSize(String),
    #[error("unknown font family `{0}`")]
    UnknownFontFamily(String),
}

/// A toolbar action.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(tag = "command", content = "value", rename_all = "snake_case")]
pub enum FormatCommand {
    Bold,
    Italic,
    Underline,
    Strikethrough,
    Paragraph,
    UnorderedList,
    OrderedList,
    FontName(FontFamily),
    FontSize(FontSize),
}

impl FormatCommand {
    /// Parse a toolbar command name, with `value` for `font` and `size`.
    pub fn parse(name: &str, value: Option<&str>) -> Result<Self, FormatError> {
        let command = match name.trim().to_ascii_lowercase().as_str() {
            "bold" => Self::Bold,
            "italic" => Self::Italic,
            "underline" => Self::Underline,
            "strike" | "strikethrough" => Self::Strikethrough,
            "paragraph" | "p" => Self::Paragraph,
            "unordered-list" | "ul" | "bullets" => Self::UnorderedList,
            "ordered-list" | "ol" | "numbers" => Self::OrderedList,
            "font" | "font-name" => {
                Self::FontName(value.ok_or(FormatError::MissingValue("font"))?.parse()?)
            }
            "size" | "font-size" => {
                Self::FontSize(value.ok_or(FormatError::MissingValue("size"))?.parse()?)
            }
            _ => return Err(FormatError::UnknownCommand(name.to_string())),
        };
        Ok(command)
    }
}

impl fmt::Display for FormatCommand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Bold => f.write_str("bold"),
            Self::Italic => f.write_str("italic"),
            Self::Underline => f.write_str("underline"),
            Self::Strikethrough => f.write_str("strikethrough"),
            Self::Paragraph => f.write_str("paragraph"),
            Self::UnorderedList => f.write_str("unordered-list"),
            Self::OrderedList => f.write_str("ordered-list"),
            Self::FontName(family) => write!(f, "font {family}"),
            Self::FontSize(size) => write!(f, "size {}", size.step()),
        }
    }
}

/// Character offsets of a selection, `start..end`.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
pub struct Selection {
    pub start: usize,
    pub end: usize,
}

impl Selection {
    pub fn new(start: usize, end: usize) -> Self {
        Self { start, end }
    }

    pub fn cursor(at: usize) -> Self {
        Self { start: at, end: at }
    }

    /// Ordered and clamped to `len` characters.
    pub fn normalize(self, len: usize) -> Self {
        let (start, end) =
            if self.start <= self.end { (self.start, self.end) } else { (self.end, self.start) };
        Self { start: start.min(len), end: end.min(len) }
    }
}

/// Result of a splice: the new content and the selection over the formatted text.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Spliced {
    pub content: String,
    pub selection: Selection,
}

/// Apply `command` to `selection` of `content`.
///
/// Tokens are never stripped: applying bold twice nests the markers.
pub fn apply_markdown(content: &str, selection: Selection, command: FormatCommand) -> Spliced {
    let selection = selection.normalize(content.chars().count());
    let byte_start = byte_offset(content, selection.start);
    let byte_end = byte_offset(content, selection.end);
    let selected = &content[byte_start..byte_end];

    let (replacement, inner) = match command {
        FormatCommand::Bold => wrap(selected, "**", "**"),
        FormatCommand::Italic => wrap(selected, "*", "*"),
        FormatCommand::Underline => wrap(selected, "<u>", "</u>"),
        FormatCommand::Strikethrough => wrap(selected, "~~", "~~"),
        FormatCommand::Paragraph => wrap(selected, "\n\n", "\n\n"),
        FormatCommand::UnorderedList => prefix_lines(selected, |_| "- ".to_string()),
        FormatCommand::OrderedList => prefix_lines(selected, |index| format!("{}. ", index + 1)),
        FormatCommand::FontName(family) => {
            let open = format!("<span style=\"font-family: {}\">", family.css());
            wrap(selected, &open, "</span>")
        }
        FormatCommand::FontSize(size) => {
            let open = format!("<span style=\"font-size: {}\">", size.px());
            wrap(selected, &open, "</span>")
        }
    };

    let mut spliced = String::with_capacity(content.len() + replacement.len() - selected.len());
    spliced.push_str(&content[..byte_start]);
    spliced.push_str(&replacement);
    spliced.push_str(&content[byte_end..]);

    Spliced {
        content: spliced,
        selection: Selection::new(selection.start + inner.start, selection.start + inner.end),
    }
}

/// Wrap `text`; the returned selection is relative to the replacement and
/// covers `text` inside the tokens.
fn wrap(text: &str, open: &str, close: &str) -> (String, Selection) {
    let inner_start = open.chars().count();
    let inner_end = inner_start + text.chars().count();
    (format!("{open}{text}{close}"), Selection::new(inner_start, inner_end))
}

fn prefix_lines(text: &str, prefix: impl Fn(usize) -> String) -> (String, Selection) {
    let replacement = text
        .split('\n')
        .enumerate()
        .map(|(index, line)| format!("{}{line}", prefix(index)))
        .collect::<Vec<_>>()
        .join("\n");
    let len = replacement.chars().count();
    (replacement, Selection::new(0, len))
}

fn byte_offset(text: &str, char_offset: usize) -> usize {
    text.char_indices().nth(char_offset).map(|(index, _)| index).unwrap_or(text.len())
}
