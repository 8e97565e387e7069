//! `---` delimited front matter splitting.

use thiserror::Error;

/// Opening and closing line of the block.
const DELIMITER: &str = "---";
/// Byte order mark some editors prepend.
const BOM: char = '\u{feff}';

#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum FrontMatterError {
    #[error("file does not start with a '---' front matter block")]
    Missing,
    #[error("front matter block is not closed by a '---' line")]
    Unterminated,
}

/// Split a content file into its raw front matter and body.
///
/// The newline ending the closing delimiter belongs to neither part.
///
/// # Errors
/// - [`FrontMatterError::Missing`] when the first line is not `---`
/// - [`FrontMatterError::Unterminated`] when no closing `---` line follows
pub fn split(text: &str) -> Result<(&str, &str), FrontMatterError> {
    let text = text.strip_prefix(BOM).unwrap_or(text);

    let Some((first_line, rest)) = text.split_once('\n') else {
        return Err(if is_delimiter(text) {
            FrontMatterError::Unterminated
        } else {
            FrontMatterError::Missing
        });
    };
    if !is_delimiter(first_line) {
        return Err(FrontMatterError::Missing);
    }

    let mut offset = 0;
    for line in rest.split_inclusive('\n') {
        if is_delimiter(line) {
            let (front, tail) = rest.split_at(offset);
            let body = tail.strip_prefix(line).unwrap_or(tail);
            return Ok((front, body));
        }
        offset += line.len();
    }

    Err(FrontMatterError::Unterminated)
}

/// Trailing whitespace (including `\r`) is ignored.
fn is_delimiter(line: &str) -> bool {
    line.trim_end() == DELIMITER
}
