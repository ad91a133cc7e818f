//! Terminal Renderer — Converts segmented agent replies into plain
//! terminal lines.
//!
//! One function per block variant; tables are laid out with padded
//! columns so they line up in a monospace terminal.

use insight_core::session::{ChatMessage, Role};
use insight_core::{Block, segment};
use unicode_width::UnicodeWidthStr;

// ════════════════════════════════════════════════════════════════════
// Glyphs
// ════════════════════════════════════════════════════════════════════

const COLUMN_SEP: &str = " │ ";
const RULE_CROSS: &str = "─┼─";
const RULE: char = '─';
const USER_PREFIX: &str = "> ";
const IMAGE_LABEL: &str = "image";
const DEFAULT_ALT: &str = "image";

// ════════════════════════════════════════════════════════════════════
// Messages
// ════════════════════════════════════════════════════════════════════

/// Render one chat message. User messages are echoed verbatim (quoted),
/// assistant messages go through the segmenter.
pub fn render_message(message: &ChatMessage) -> Vec<String> {
    match message.role {
        Role::User => message
            .content
            .split('\n')
            .map(|line| format!("{}{}", USER_PREFIX, line))
            .collect(),
        Role::Assistant => render_blocks(&message.blocks()),
    }
}

/// Segment and render raw reply text in one go.
pub fn render_reply(content: &str) -> Vec<String> {
    render_blocks(&segment(content))
}

// ════════════════════════════════════════════════════════════════════
// Blocks
// ════════════════════════════════════════════════════════════════════

pub fn render_blocks(blocks: &[Block]) -> Vec<String> {
    let mut out = Vec::new();
    for block in blocks {
        render_block(block, &mut out);
    }
    out
}

pub fn render_block(block: &Block, out: &mut Vec<String>) {
    match block {
        Block::Heading { text } => {
            out.push(text.clone());
            out.push(RULE.to_string().repeat(text.width()));
        }
        Block::Bullet { text } => out.push(format!("  • {}", text)),
        Block::NumberedItem { text } => out.push(format!("  {}", text)),
        Block::Text { text } => out.push(text.clone()),
        Block::Image { alt_text, url } => {
            let alt = if alt_text.is_empty() { DEFAULT_ALT } else { alt_text.as_str() };
            out.push(format!("[{}: {}] {}", IMAGE_LABEL, alt, url));
        }
        Block::Table { rows, header } => render_table(rows, *header, out),
    }
}

// ════════════════════════════════════════════════════════════════════
// Tables
// ════════════════════════════════════════════════════════════════════

/// Display width of each column; ragged rows count missing cells as empty.
pub fn column_widths(rows: &[Vec<String>]) -> Vec<usize> {
    let columns = rows.iter().map(Vec::len).max().unwrap_or(0);
    (0..columns)
        .map(|col| {
            rows.iter()
                .filter_map(|row| row.get(col))
                .map(|cell| cell.width())
                .max()
                .unwrap_or(0)
        })
        .collect()
}

fn render_table(rows: &[Vec<String>], header: bool, out: &mut Vec<String>) {
    let widths = column_widths(rows);

    for (idx, row) in rows.iter().enumerate() {
        out.push(render_row(row, &widths));

        if header && idx == 0 {
            let rule = widths
                .iter()
                .map(|w| RULE.to_string().repeat(*w))
                .collect::<Vec<_>>()
                .join(RULE_CROSS);
            out.push(rule);
        }
    }
}

/// Short rows stop at their last cell; no separators for missing columns.
fn render_row(row: &[String], widths: &[usize]) -> String {
    let line = row
        .iter()
        .zip(widths)
        .map(|(cell, w)| {
            let pad = w.saturating_sub(cell.width());
            format!("{}{}", cell, " ".repeat(pad))
        })
        .collect::<Vec<_>>()
        .join(COLUMN_SEP);

    line.trim_end().to_string()
}
