//! Reply segmentation.
//!
//! Splits an agent reply into renderable [`Block`]s, one forward pass over
//! the lines. At each cursor position the rules in [`RULES`] are tried top
//! to bottom; the first one that matches decides what (if anything) is
//! emitted and where the cursor goes next.
//!
//! Priority:
//! 1. `![alt](url)` anywhere in the line → Image
//! 2. line with `|` followed by another line with `|` → Table (whole run)
//! 3. `•` prefix → Bullet
//! 4. `N. ` prefix → NumberedItem
//! 5. ends with `:` → Heading
//! 6. anything non-blank → Text
//! 7. blank → nothing

use regex::Regex;
use std::sync::OnceLock;

use super::model::Block;

static IMAGE_SHAPE_REGEX: OnceLock<Regex> = OnceLock::new();
static IMAGE_REGEX: OnceLock<Regex> = OnceLock::new();
static NUMBERED_REGEX: OnceLock<Regex> = OnceLock::new();
static SEPARATOR_REGEX: OnceLock<Regex> = OnceLock::new();

const BULLET_GLYPH: char = '•';

/// Outcome of a matching rule: the block to emit (if any) and the index of
/// the first line not consumed.
#[derive(Debug)]
struct Step {
    block: Option<Block>,
    next: usize,
}

impl Step {
    fn single(at: usize, block: Option<Block>) -> Self {
        Self {
            block,
            next: at + 1,
        }
    }
}

type Rule = fn(&[&str], usize) -> Option<Step>;

/// Classification rules in priority order. `blank` matches whatever is left,
/// so every position is claimed by exactly one rule.
const RULES: [Rule; 7] = [image, table, bullet, numbered_item, heading, text, blank];

pub struct Segmenter;

impl Segmenter {
    /// Partition `content` into blocks. Never fails: shapes that can't be
    /// captured are dropped, everything else non-blank falls through to
    /// `Text`.
    pub fn segment(content: &str) -> Vec<Block> {
        let lines: Vec<&str> = content.split('\n').collect();
        let mut blocks = Vec::new();
        let mut i = 0;

        while i < lines.len() {
            let step = RULES
                .iter()
                .find_map(|rule| rule(&lines, i))
                .unwrap_or(Step::single(i, None));

            if let Some(block) = step.block {
                blocks.push(block);
            }
            // Every rule consumes at least one line.
            i = step.next.max(i + 1);
        }

        blocks
    }
}

/// Shorthand for [`Segmenter::segment`].
pub fn segment(content: &str) -> Vec<Block> {
    Segmenter::segment(content)
}

// ── Rules ──

fn image(lines: &[&str], i: usize) -> Option<Step> {
    let line = lines[i];
    let shape = IMAGE_SHAPE_REGEX
        .get_or_init(|| Regex::new(r"!\[.*\]\(.*\)").expect("Invalid Image Shape Regex"));
    if !shape.is_match(line) {
        return None;
    }

    // Only the first image on a line is kept.
    let capture = IMAGE_REGEX.get_or_init(|| {
        Regex::new(r"!\[([^\]]*)\]\(([^)]+)\)").expect("Invalid Image Regex")
    });
    let block = capture
        .captures(line)
        .map(|caps| Block::image(&caps[1], &caps[2]));

    Some(Step::single(i, block))
}

fn table(lines: &[&str], i: usize) -> Option<Step> {
    let starts_run = lines[i].contains('|') && lines.get(i + 1).is_some_and(|l| l.contains('|'));
    if !starts_run {
        return None;
    }

    let end = table_run_end(lines, i);
    let rows: Vec<Vec<String>> = lines[i..end]
        .iter()
        .filter(|line| !is_separator_row(line))
        .map(|line| split_cells(line))
        .collect();

    // A run made only of separators is swallowed without output.
    let block = (!rows.is_empty()).then_some(Block::Table { rows, header: true });

    Some(Step { block, next: end })
}

fn bullet(lines: &[&str], i: usize) -> Option<Step> {
    let rest = lines[i].trim().strip_prefix(BULLET_GLYPH)?;
    Some(Step::single(i, Some(Block::bullet(rest.trim()))))
}

fn numbered_item(lines: &[&str], i: usize) -> Option<Step> {
    let trimmed = lines[i].trim();
    let re = NUMBERED_REGEX
        .get_or_init(|| Regex::new(r"^[0-9]+\.\s").expect("Invalid Numbered Regex"));
    if !re.is_match(trimmed) {
        return None;
    }
    Some(Step::single(i, Some(Block::numbered(trimmed))))
}

/// Trailing-colon heuristic. Sentences ending in `:` land here too.
fn heading(lines: &[&str], i: usize) -> Option<Step> {
    let trimmed = lines[i].trim();
    if !trimmed.ends_with(':') {
        return None;
    }
    Some(Step::single(i, Some(Block::heading(trimmed))))
}

fn text(lines: &[&str], i: usize) -> Option<Step> {
    let trimmed = lines[i].trim();
    if trimmed.is_empty() {
        return None;
    }
    Some(Step::single(i, Some(Block::text(trimmed))))
}

fn blank(_lines: &[&str], i: usize) -> Option<Step> {
    Some(Step::single(i, None))
}

// ── Table helpers ──

/// Index one past the last line of the `|` run starting at `start`.
fn table_run_end(lines: &[&str], start: usize) -> usize {
    let mut end = start;
    while end < lines.len() && lines[end].contains('|') {
        end += 1;
    }
    end
}

/// `---|---`, `| --- | --- |` and friends: dash-only cells between pipes.
pub fn is_separator_row(line: &str) -> bool {
    let re = SEPARATOR_REGEX.get_or_init(|| {
        Regex::new(r"^\|?(\s*-+\s*\|)*\s*-+\s*\|?$").expect("Invalid Separator Regex")
    });
    re.is_match(line.trim())
}

/// Split a row on `|`, trimming cells and dropping the empty fragments
/// left by leading/trailing pipes.
pub fn split_cells(line: &str) -> Vec<String> {
    line.split('|')
        .map(str::trim)
        .filter(|cell| !cell.is_empty())
        .map(str::to_string)
        .collect()
}
