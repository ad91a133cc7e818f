//! Renderable block model.
//!
//! A `Block` is one classified unit of an agent reply. The set of variants
//! is closed; renderers match on it exhaustively.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Block {
    /// `![alt](url)` found somewhere in a line.
    Image { alt_text: String, url: String },
    /// A run of `|`-delimited lines with separator rows removed.
    /// When `header` is set the first row is the header row.
    Table { rows: Vec<Vec<String>>, header: bool },
    /// Bullet item with the leading `•` stripped.
    Bullet { text: String },
    /// Numbered item, label (`"3. "`) kept verbatim.
    NumberedItem { text: String },
    /// Trimmed line ending in `:`.
    Heading { text: String },
    /// Anything else that isn't blank.
    Text { text: String },
}

impl Block {
    pub fn text(text: impl Into<String>) -> Self {
        Block::Text { text: text.into() }
    }

    pub fn heading(text: impl Into<String>) -> Self {
        Block::Heading { text: text.into() }
    }

    pub fn bullet(text: impl Into<String>) -> Self {
        Block::Bullet { text: text.into() }
    }

    pub fn numbered(text: impl Into<String>) -> Self {
        Block::NumberedItem { text: text.into() }
    }

    pub fn image(alt_text: impl Into<String>, url: impl Into<String>) -> Self {
        Block::Image {
            alt_text: alt_text.into(),
            url: url.into(),
        }
    }

    /// Short label for logs and debugging.
    pub fn kind(&self) -> &'static str {
        match self {
            Block::Image { .. } => "image",
            Block::Table { .. } => "table",
            Block::Bullet { .. } => "bullet",
            Block::NumberedItem { .. } => "numbered_item",
            Block::Heading { .. } => "heading",
            Block::Text { .. } => "text",
        }
    }

    /// The header row of a table, if it has one.
    pub fn header_row(&self) -> Option<&[String]> {
        match self {
            Block::Table { rows, header: true } => rows.first().map(Vec::as_slice),
            _ => None,
        }
    }

    /// Table rows after the header (all rows when there is no header).
    /// Empty for non-table blocks.
    pub fn body_rows(&self) -> &[Vec<String>] {
        match self {
            Block::Table { rows, header } => {
                if *header && !rows.is_empty() {
                    &rows[1..]
                } else {
                    rows.as_slice()
                }
            }
            _ => &[],
        }
    }
}
