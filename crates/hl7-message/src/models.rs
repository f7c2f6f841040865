//! Typed segment models.
//!
//! Each modeled segment type has a plain extraction struct built from a raw
//! [`Segment`], and [`SegmentModel`] ties them together as a tagged union so
//! callers dispatch with an exhaustive match instead of comparing code
//! strings. Absent field indices become `None`; they are never errors.

use nom::number::complete::double;

use crate::error::Hl7Result;
use crate::segment::Segment;

/// The HL7 repetition/component separator replaced during name extraction.
const COMPONENT_SEPARATOR: char = '^';

/// Extraction from an MSH (Message Header) segment.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct MessageHeader {
    /// The message's distinguishing key, field index 6.
    pub key: Option<String>,
}

impl MessageHeader {
    /// Segment code for message headers.
    pub const CODE: &'static str = "MSH";

    /// Field index of the message key.
    const KEY_INDEX: usize = 6;

    /// Extracts a header model from a raw segment.
    ///
    /// Fails with [`Hl7Error::SegmentTypeMismatch`](crate::Hl7Error) when
    /// the segment is not an MSH segment.
    pub fn from_segment(segment: &Segment) -> Hl7Result<Self> {
        segment.expect_code(Self::CODE)?;
        Ok(Self {
            key: segment.field(Self::KEY_INDEX).map(str::to_string),
        })
    }
}

/// Extraction from an OBR (Observation Request) segment.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct OrderRequest {
    /// The order's distinguishing key, field index 6.
    pub key: Option<String>,
}

impl OrderRequest {
    /// Segment code for observation requests.
    pub const CODE: &'static str = "OBR";

    /// Field index of the order key.
    const KEY_INDEX: usize = 6;

    /// Extracts an order model from a raw segment.
    pub fn from_segment(segment: &Segment) -> Hl7Result<Self> {
        segment.expect_code(Self::CODE)?;
        Ok(Self {
            key: segment.field(Self::KEY_INDEX).map(str::to_string),
        })
    }
}

/// Extraction from an OBX (Observation/Result) segment.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ObservationResult {
    /// The observation's distinguishing key, field index 14.
    pub key: Option<String>,
    /// Observation name, field index 4, with component separators (`^`)
    /// replaced by spaces.
    pub name: Option<String>,
    /// Observation value, field index 5, rendered with exactly two decimal
    /// digits from the longest numeric prefix. A field with no numeric
    /// prefix renders as `"NaN"`.
    pub value: Option<String>,
}

impl ObservationResult {
    /// Segment code for observation results.
    pub const CODE: &'static str = "OBX";

    const KEY_INDEX: usize = 14;
    const NAME_INDEX: usize = 4;
    const VALUE_INDEX: usize = 5;

    /// Extracts an observation model from a raw segment.
    pub fn from_segment(segment: &Segment) -> Hl7Result<Self> {
        segment.expect_code(Self::CODE)?;
        Ok(Self {
            key: segment.field(Self::KEY_INDEX).map(str::to_string),
            name: segment
                .field(Self::NAME_INDEX)
                .map(|name| name.replace(COMPONENT_SEPARATOR, " ")),
            value: segment.field(Self::VALUE_INDEX).map(format_numeric_value),
        })
    }
}

/// Renders an observation value with two decimal digits.
///
/// The longest numeric prefix wins, so a value carrying a trailing unit
/// such as `"12.5mg"` renders as `"12.50"`. A value with no numeric
/// prefix renders as `"NaN"`, which is the pinned behavior for
/// non-numeric results rather than an error.
fn format_numeric_value(raw: &str) -> String {
    let value = double::<_, nom::error::Error<&str>>(raw.trim())
        .map(|(_, value)| value)
        .unwrap_or(f64::NAN);
    format!("{value:.2}")
}

/// A segment mapped to its typed model, tagged by segment type.
///
/// Codes without a model are carried as [`SegmentModel::Unmodeled`] with
/// their raw fields intact.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
#[cfg_attr(feature = "serde", serde(untagged))]
pub enum SegmentModel {
    /// An MSH segment.
    Header(MessageHeader),
    /// An OBR segment.
    Order(OrderRequest),
    /// An OBX segment.
    Observation(ObservationResult),
    /// A segment with no registered model.
    Unmodeled(Segment),
}

impl SegmentModel {
    /// Maps a raw segment to its typed model by code.
    ///
    /// Dispatch is by the segment's own code, so the per-model mismatch
    /// check cannot fire here; the `Result` propagates it anyway rather
    /// than masking a future dispatch bug.
    pub fn from_segment(segment: Segment) -> Hl7Result<Self> {
        match segment.code.as_str() {
            MessageHeader::CODE => Ok(Self::Header(MessageHeader::from_segment(&segment)?)),
            OrderRequest::CODE => Ok(Self::Order(OrderRequest::from_segment(&segment)?)),
            ObservationResult::CODE => {
                Ok(Self::Observation(ObservationResult::from_segment(&segment)?))
            }
            _ => Ok(Self::Unmodeled(segment)),
        }
    }

    /// Returns the segment code this model was mapped from.
    pub fn code(&self) -> &str {
        match self {
            Self::Header(_) => MessageHeader::CODE,
            Self::Order(_) => OrderRequest::CODE,
            Self::Observation(_) => ObservationResult::CODE,
            Self::Unmodeled(segment) => &segment.code,
        }
    }

    /// Returns true when the segment type has a registered model.
    pub fn is_modeled(&self) -> bool {
        !matches!(self, Self::Unmodeled(_))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Hl7Error;

    fn segment(line: &str) -> Segment {
        crate::splitter::split_fields('|', line)
    }

    #[test]
    fn test_header_key_extraction() {
        let header = MessageHeader::from_segment(&segment("MSH|^~\\&|A|B|C|D|KEY1")).unwrap();
        assert_eq!(header.key.as_deref(), Some("KEY1"));
    }

    #[test]
    fn test_header_key_absent() {
        let header = MessageHeader::from_segment(&segment("MSH|^~\\&|A")).unwrap();
        assert_eq!(header.key, None);
    }

    #[test]
    fn test_header_rejects_other_codes() {
        let err = MessageHeader::from_segment(&segment("OBR|1")).unwrap_err();
        assert!(matches!(
            err,
            Hl7Error::SegmentTypeMismatch { expected: "MSH", .. }
        ));
    }

    #[test]
    fn test_order_key_extraction() {
        let order = OrderRequest::from_segment(&segment("OBR|1|2|3|4|5|KEY2")).unwrap();
        assert_eq!(order.key.as_deref(), Some("KEY2"));
    }

    #[test]
    fn test_order_rejects_other_codes() {
        assert!(OrderRequest::from_segment(&segment("OBX|1")).is_err());
    }

    #[test]
    fn test_observation_full_extraction() {
        let obx = segment("OBX|1|NM|GLU|Glucose^Serum|95.5|mg/dL||||F|||20240101|KEY3");
        let result = ObservationResult::from_segment(&obx).unwrap();
        assert_eq!(result.key.as_deref(), Some("KEY3"));
        assert_eq!(result.name.as_deref(), Some("Glucose Serum"));
        assert_eq!(result.value.as_deref(), Some("95.50"));
    }

    #[test]
    fn test_observation_name_replaces_every_separator() {
        let obx = segment("OBX|1|NM|GLU|A^B^C|1");
        let result = ObservationResult::from_segment(&obx).unwrap();
        assert_eq!(result.name.as_deref(), Some("A B C"));
    }

    #[test]
    fn test_observation_absent_fields_are_none() {
        // A truncated OBX must not fail; every extraction is optional.
        let result = ObservationResult::from_segment(&segment("OBX|1|NM")).unwrap();
        assert_eq!(result.key, None);
        assert_eq!(result.name, None);
        assert_eq!(result.value, None);
    }

    #[test]
    fn test_observation_non_numeric_value_is_nan() {
        let result = ObservationResult::from_segment(&segment("OBX|1|ST|X|Name|abc")).unwrap();
        assert_eq!(result.value.as_deref(), Some("NaN"));
    }

    #[test]
    fn test_observation_value_keeps_numeric_prefix() {
        // A trailing unit does not spoil the value; the numeric prefix wins.
        let result = ObservationResult::from_segment(&segment("OBX|1|NM|X|Name|12.5mg")).unwrap();
        assert_eq!(result.value.as_deref(), Some("12.50"));

        let result = ObservationResult::from_segment(&segment("OBX|1|NM|X|Name|-3e2 IU")).unwrap();
        assert_eq!(result.value.as_deref(), Some("-300.00"));
    }

    #[test]
    fn test_observation_value_is_rounded_to_two_decimals() {
        let result = ObservationResult::from_segment(&segment("OBX|1|NM|X|Name|12.5")).unwrap();
        assert_eq!(result.value.as_deref(), Some("12.50"));

        let result = ObservationResult::from_segment(&segment("OBX|1|NM|X|Name|0.999")).unwrap();
        assert_eq!(result.value.as_deref(), Some("1.00"));
    }

    #[test]
    fn test_segment_model_dispatch() {
        assert!(matches!(
            SegmentModel::from_segment(segment("MSH|^~\\&")).unwrap(),
            SegmentModel::Header(_)
        ));
        assert!(matches!(
            SegmentModel::from_segment(segment("OBR|1")).unwrap(),
            SegmentModel::Order(_)
        ));
        assert!(matches!(
            SegmentModel::from_segment(segment("OBX|1")).unwrap(),
            SegmentModel::Observation(_)
        ));
    }

    #[test]
    fn test_segment_model_unmodeled_passthrough() {
        let model = SegmentModel::from_segment(segment("PID|1|12345")).unwrap();
        match &model {
            SegmentModel::Unmodeled(raw) => {
                assert_eq!(raw.code, "PID");
                assert_eq!(raw.fields, vec!["PID", "1", "12345"]);
            }
            other => panic!("expected Unmodeled, got {other:?}"),
        }
        assert_eq!(model.code(), "PID");
        assert!(!model.is_modeled());
    }
}
