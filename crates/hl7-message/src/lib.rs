//! # hl7-message
//!
//! A Rust library for parsing HL7 v2 pipe-delimited clinical messages
//! into typed records.
//!
//! This crate provides:
//! - **Splitting**: raw message → segments → fields, with the field
//!   separator bootstrapped from the MSH header itself
//! - **Typed models**: MSH, OBR and OBX segments mapped to extraction
//!   structs with light value normalization
//!
//! ## Quick Start
//!
//! ```rust
//! use hl7_message::parse;
//!
//! let raw = "MSH|^~\\&|LAB|HOSP|APP|FAC|KEY1\n\
//!            OBR|1|2|3|4|5|KEY2\n\
//!            OBX|1|NM|GLU|Glucose^Serum|95.5|mg/dL||||F|||20240101|KEY3";
//!
//! let parsed = parse(raw).unwrap();
//!
//! assert_eq!(parsed.header().unwrap().key.as_deref(), Some("KEY1"));
//! assert_eq!(parsed.order().unwrap().key.as_deref(), Some("KEY2"));
//!
//! let obx = parsed.observation().unwrap();
//! assert_eq!(obx.key.as_deref(), Some("KEY3"));
//! assert_eq!(obx.name.as_deref(), Some("Glucose Serum"));
//! assert_eq!(obx.value.as_deref(), Some("95.50"));
//! ```
//!
//! ## Message structure
//!
//! | Layer | Delimiter | Handled |
//! |-------|-----------|---------|
//! | Segment | line feed (`\n`, tolerating `\r\n`) | Yes |
//! | Field | declared by MSH (usually `\|`) | Yes |
//! | Component | `^` | Replaced by spaces in OBX names only |
//! | Repetition / sub-component / escape | `~`, `&`, `\` | No (out of scope) |
//!
//! Segment types other than MSH, OBR and OBX are carried through as raw
//! [`Segment`] values rather than typed models.
//!
//! ## Feature Flags
//!
//! - `serde` - Serialize/Deserialize derives on the output types;
//!   [`ParsedMessage`] serializes as a per-code mapping.

#![warn(missing_docs)]
#![warn(rustdoc::missing_crate_level_docs)]

mod error;
mod message;
mod models;
mod parser;
mod segment;
mod splitter;

pub use error::{Hl7Error, Hl7Result};
pub use message::ParsedMessage;
pub use models::{MessageHeader, ObservationResult, OrderRequest, SegmentModel};
pub use parser::parse;
pub use segment::Segment;
pub use splitter::{
    detect_field_separator, split_fields, split_segments, DEFAULT_FIELD_SEPARATOR,
};
