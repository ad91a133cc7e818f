//! Block model + segmenter.
//!
//! A "block" is one renderable unit of an agent reply:
//! - heading
//! - bullet / numbered item
//! - table
//! - image
//! - plain text
//!
//! The segmenter turns raw reply text into an ordered list of blocks.

pub mod model;
pub mod segmenter;

pub use model::Block;
pub use segmenter::{Segmenter, segment};
