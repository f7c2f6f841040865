//! Message and segment splitting.
//!
//! HL7 v2 messages are newline-separated segment lines, each a list of
//! fields joined by a message-specific separator character. The separator
//! is bootstrapped from the MSH header segment itself: it is the literal
//! character immediately following the 3-letter code, because nothing else
//! about the message can be assumed before the header is read.

use nom::{bytes::complete::tag, character::complete::anychar, sequence::preceded, IResult};

use crate::models::MessageHeader;
use crate::segment::Segment;

/// The separator assumed when a message carries no MSH header.
pub const DEFAULT_FIELD_SEPARATOR: char = '|';

/// Splits a raw message into its segment lines.
///
/// The message is trimmed as a whole, split on line feeds, and each line
/// loses a trailing carriage return (HL7 traffic arrives with either line
/// ending). Empty lines are dropped.
pub fn split_segments(raw: &str) -> Vec<&str> {
    raw.trim()
        .split('\n')
        .map(|line| line.trim_end_matches('\r'))
        .filter(|line| !line.is_empty())
        .collect()
}

/// Recognizes the MSH prelude and yields the declared separator character.
fn msh_prelude(input: &str) -> IResult<&str, char> {
    preceded(tag(MessageHeader::CODE), anychar)(input)
}

/// Determines the field separator for an entire message.
///
/// Looks for the first segment starting with `MSH` and returns the
/// character directly after the code. Falls back to
/// [`DEFAULT_FIELD_SEPARATOR`] when no header segment exists, or when the
/// header is too short to declare one.
pub fn detect_field_separator(raw: &str) -> char {
    split_segments(raw)
        .into_iter()
        .find(|segment| segment.starts_with(MessageHeader::CODE))
        .and_then(|segment| msh_prelude(segment).ok())
        .map(|(_, separator)| separator)
        .unwrap_or(DEFAULT_FIELD_SEPARATOR)
}

/// Splits one segment line into a [`Segment`] using the given separator.
///
/// Every separator occurrence splits; nested component/sub-component
/// encoding is not interpreted, so a separator inside escaped content
/// still splits. Element 0 of the result is the segment code.
pub fn split_fields(separator: char, segment: &str) -> Segment {
    Segment::new(segment.split(separator).map(str::to_string).collect())
}
