//! Raw segment representation.

use crate::error::{Hl7Error, Hl7Result};

/// One raw segment of an HL7 message: a 3-letter type code and its
/// ordered fields.
///
/// By construction `fields[0]` always equals `code` (the code is itself
/// the first field of the segment line), so `fields` is never empty when
/// `code` is non-empty.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Segment {
    /// The segment type code (e.g. "MSH", "OBR", "OBX").
    pub code: String,
    /// All fields in segment order, including the code at index 0.
    pub fields: Vec<String>,
}

impl Segment {
    /// Creates a segment from its ordered fields.
    ///
    /// The code is taken from the first field; an empty field list yields
    /// an empty code.
    pub fn new(fields: Vec<String>) -> Self {
        let code = fields.first().cloned().unwrap_or_default();
        Self { code, fields }
    }

    /// Returns the field at `index`, or `None` when the index is out of
    /// range. Field index 0 is the segment code.
    pub fn field(&self, index: usize) -> Option<&str> {
        self.fields.get(index).map(String::as_str)
    }

    /// Checks that this segment carries the expected code.
    ///
    /// Model constructors call this as their first step; the orchestrator
    /// dispatches by code, so in normal operation the check never fires.
    pub fn expect_code(&self, expected: &'static str) -> Hl7Result<()> {
        if self.code == expected {
            Ok(())
        } else {
            Err(Hl7Error::SegmentTypeMismatch {
                expected,
                found: self.code.clone(),
            })
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn segment(fields: &[&str]) -> Segment {
        Segment::new(fields.iter().map(|f| f.to_string()).collect())
    }

    #[test]
    fn test_code_is_first_field() {
        let seg = segment(&["OBX", "1", "NM"]);
        assert_eq!(seg.code, "OBX");
        assert_eq!(seg.field(0), Some("OBX"));
    }

    #[test]
    fn test_field_out_of_range_is_none() {
        let seg = segment(&["OBR", "1"]);
        assert_eq!(seg.field(1), Some("1"));
        assert_eq!(seg.field(2), None);
    }

    #[test]
    fn test_empty_fields_yield_empty_code() {
        let seg = Segment::new(Vec::new());
        assert_eq!(seg.code, "");
        assert_eq!(seg.field(0), None);
    }

    #[test]
    fn test_expect_code_match() {
        let seg = segment(&["MSH", "^~\\&"]);
        assert!(seg.expect_code("MSH").is_ok());
    }

    #[test]
    fn test_expect_code_mismatch() {
        let seg = segment(&["OBR", "1"]);
        let err = seg.expect_code("OBX").unwrap_err();
        assert_eq!(
            err,
            Hl7Error::SegmentTypeMismatch {
                expected: "OBX",
                found: "OBR".to_string(),
            }
        );
    }
}
