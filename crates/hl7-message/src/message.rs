//! Parsed message output type.

use std::collections::BTreeMap;

use crate::models::{MessageHeader, ObservationResult, OrderRequest, SegmentModel};

/// The result of parsing one HL7 message.
///
/// Stores every mapped segment in message order, so repeated segment types
/// (commonly OBX) are all retained. [`collapsed`](Self::collapsed) offers
/// the historical one-model-per-type view, where a repeated type keeps only
/// its last occurrence; that view is also the serialization shape.
///
/// # Example
///
/// ```rust
/// use hl7_message::parse;
///
/// let message = "MSH|^~\\&|LAB|HOSP|APP|FAC|KEY1\nOBX|1|NM|GLU|Glucose|95.5";
/// let parsed = parse(message).unwrap();
///
/// assert_eq!(parsed.header().unwrap().key.as_deref(), Some("KEY1"));
/// assert_eq!(parsed.observations().count(), 1);
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct ParsedMessage {
    models: Vec<SegmentModel>,
}

impl ParsedMessage {
    /// Creates a parsed message from mapped segments in message order.
    pub fn new(models: Vec<SegmentModel>) -> Self {
        Self { models }
    }

    /// All mapped segments in message order, unmodeled ones included.
    pub fn models(&self) -> &[SegmentModel] {
        &self.models
    }

    /// Number of segments in the message.
    pub fn len(&self) -> usize {
        self.models.len()
    }

    /// Returns true when the message mapped to no segments.
    pub fn is_empty(&self) -> bool {
        self.models.is_empty()
    }

    /// The message header model, taking the last MSH when repeated.
    pub fn header(&self) -> Option<&MessageHeader> {
        self.models.iter().rev().find_map(|model| match model {
            SegmentModel::Header(header) => Some(header),
            _ => None,
        })
    }

    /// The order model, taking the last OBR when repeated.
    pub fn order(&self) -> Option<&OrderRequest> {
        self.models.iter().rev().find_map(|model| match model {
            SegmentModel::Order(order) => Some(order),
            _ => None,
        })
    }

    /// The last observation result, mirroring the collapsed view.
    pub fn observation(&self) -> Option<&ObservationResult> {
        self.observations().last()
    }

    /// All observation results in message order.
    pub fn observations(&self) -> impl Iterator<Item = &ObservationResult> {
        self.models.iter().filter_map(|model| match model {
            SegmentModel::Observation(observation) => Some(observation),
            _ => None,
        })
    }

    /// One model per segment code, last occurrence winning.
    ///
    /// Unmodeled segments are skipped, matching the orchestrator contract
    /// of silently dropping codes with no registered model from the
    /// output mapping.
    pub fn collapsed(&self) -> BTreeMap<&str, &SegmentModel> {
        let mut collapsed = BTreeMap::new();
        for model in self.models.iter().filter(|model| model.is_modeled()) {
            collapsed.insert(model.code(), model);
        }
        collapsed
    }
}

/// Serializes as the collapsed per-code mapping, e.g.
/// `{"MSH": {...}, "OBR": {...}, "OBX": {...}}`.
#[cfg(feature = "serde")]
impl serde::Serialize for ParsedMessage {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.collect_map(self.collapsed())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::splitter::split_fields;

    fn model(line: &str) -> SegmentModel {
        SegmentModel::from_segment(split_fields('|', line)).unwrap()
    }

    #[test]
    fn test_empty_message() {
        let parsed = ParsedMessage::new(Vec::new());
        assert!(parsed.is_empty());
        assert!(parsed.header().is_none());
        assert!(parsed.collapsed().is_empty());
    }

    #[test]
    fn test_accessors() {
        let parsed = ParsedMessage::new(vec![
            model("MSH|^~\\&|A|B|C|D|KEY1"),
            model("OBR|1|2|3|4|5|KEY2"),
            model("OBX|1|NM|GLU|Glucose|95.5"),
        ]);

        assert_eq!(parsed.len(), 3);
        assert_eq!(parsed.header().unwrap().key.as_deref(), Some("KEY1"));
        assert_eq!(parsed.order().unwrap().key.as_deref(), Some("KEY2"));
        assert_eq!(
            parsed.observation().unwrap().value.as_deref(),
            Some("95.50")
        );
    }

    #[test]
    fn test_repeated_observations_all_retained() {
        let parsed = ParsedMessage::new(vec![
            model("OBX|1|NM|GLU|Glucose|95.5"),
            model("OBX|2|NM|NA|Sodium|140"),
        ]);

        let names: Vec<_> = parsed
            .observations()
            .map(|obs| obs.name.clone().unwrap())
            .collect();
        assert_eq!(names, vec!["Glucose", "Sodium"]);
    }

    #[test]
    fn test_collapsed_keeps_last_occurrence() {
        let parsed = ParsedMessage::new(vec![
            model("OBX|1|NM|GLU|Glucose|95.5"),
            model("OBX|2|NM|NA|Sodium|140"),
        ]);

        let collapsed = parsed.collapsed();
        assert_eq!(collapsed.len(), 1);
        match collapsed["OBX"] {
            SegmentModel::Observation(obs) => assert_eq!(obs.name.as_deref(), Some("Sodium")),
            other => panic!("expected Observation, got {other:?}"),
        }
    }

    #[test]
    fn test_collapsed_skips_unmodeled() {
        let parsed = ParsedMessage::new(vec![
            model("MSH|^~\\&|A|B|C|D|KEY1"),
            model("PID|1|12345"),
        ]);

        let collapsed = parsed.collapsed();
        assert!(collapsed.contains_key("MSH"));
        assert!(!collapsed.contains_key("PID"));
    }
}
