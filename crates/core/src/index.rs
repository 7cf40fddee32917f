//! Parsing of user supplied item positions

use crate::error::{FeedError, FeedResult};

/// Parses a zero-based item index typed by the user
///
/// Surrounding whitespace is ignored. Text that is not an integer yields
/// `InvalidIndex`; negative values and values `>= len` yield `OutOfRange`.
pub fn parse_index(raw: &str, len: usize) -> FeedResult<usize> {
    let input = raw.trim();
    let index: i64 = input.parse().map_err(|_| FeedError::InvalidIndex {
        input: input.to_string(),
    })?;

    match usize::try_from(index) {
        Ok(position) if position < len => Ok(position),
        _ => Err(FeedError::OutOfRange { index, len }),
    }
}
