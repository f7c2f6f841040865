//! Parse orchestration.

use crate::error::{Hl7Error, Hl7Result};
use crate::message::ParsedMessage;
use crate::models::{MessageHeader, SegmentModel};
use crate::splitter::{detect_field_separator, split_fields, split_segments};

/// Parses one raw HL7 message into its typed form.
///
/// The message is split into segments, the field separator is detected
/// once from the MSH header and applied to every segment, and each
/// segment is mapped to its typed model by code.
///
/// Parsing is pure and stateless: the same input always produces the same
/// output, and a failure never affects later calls.
///
/// # Errors
///
/// - [`Hl7Error::EmptyMessage`] when the input is empty or whitespace.
/// - [`Hl7Error::MissingHeader`] when no MSH segment is present.
///
/// # Example
///
/// ```rust
/// use hl7_message::parse;
///
/// let raw = "MSH|^~\\&|LAB|HOSP|APP|FAC|KEY1\nOBR|1|2|3|4|5|KEY2\nOBX|1|NM|GLU|Glucose^Serum|95.5";
/// let parsed = parse(raw).unwrap();
///
/// assert_eq!(parsed.header().unwrap().key.as_deref(), Some("KEY1"));
/// assert_eq!(parsed.order().unwrap().key.as_deref(), Some("KEY2"));
/// assert_eq!(parsed.observation().unwrap().name.as_deref(), Some("Glucose Serum"));
/// ```
pub fn parse(raw: &str) -> Hl7Result<ParsedMessage> {
    let raw = raw.trim();
    if raw.is_empty() {
        return Err(Hl7Error::EmptyMessage);
    }

    let segments = split_segments(raw);
    if !segments
        .iter()
        .any(|segment| segment.starts_with(MessageHeader::CODE))
    {
        return Err(Hl7Error::MissingHeader);
    }

    let separator = detect_field_separator(raw);
    let models = segments
        .into_iter()
        .map(|segment| SegmentModel::from_segment(split_fields(separator, segment)))
        .collect::<Hl7Result<Vec<_>>>()?;

    Ok(ParsedMessage::new(models))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_empty_input() {
        assert_eq!(parse("").unwrap_err(), Hl7Error::EmptyMessage);
        assert_eq!(parse("  \n \r\n").unwrap_err(), Hl7Error::EmptyMessage);
    }

    #[test]
    fn test_parse_without_header() {
        let err = parse("OBR|1|2|3\nOBX|1|NM|GLU|Glucose|95.5").unwrap_err();
        assert_eq!(err, Hl7Error::MissingHeader);
    }

    #[test]
    fn test_parse_uses_declared_separator_everywhere() {
        let parsed = parse("MSH#^~\\&#A#B#C#D#KEY1\nOBR#1#2#3#4#5#KEY2").unwrap();
        assert_eq!(parsed.header().unwrap().key.as_deref(), Some("KEY1"));
        assert_eq!(parsed.order().unwrap().key.as_deref(), Some("KEY2"));
    }
}
