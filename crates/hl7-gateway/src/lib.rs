//! # hl7-gateway
//!
//! MLLP gateway around the [`hl7-message`](hl7_message) parser: receives
//! HL7 v2 messages over TCP, parses each one, persists the JSON result to
//! a timestamped file, and answers the sender with the parse result.
//!
//! ## Architecture
//!
//! ```text
//! ┌──────────────────────────────────────────────────────────┐
//! │                       hl7-gateway                        │
//! │                                                          │
//! │  Gateway (one task per connection)                       │
//! │  ├── MllpCodec   - frame HL7 messages on the wire        │
//! │  ├── hl7-message - parse each inbound frame              │
//! │  ├── MessageSink - persist the result (FileSink: JSON)   │
//! │  └── reply       - serialized result or error object     │
//! └──────────────────────────────────────────────────────────┘
//! ```
//!
//! The parsing core stays pure; everything stateful (socket, directories,
//! configuration) lives here. Per-message failures are answered and
//! logged, never fatal to the connection or the listener.
//!
//! ## Quick Start
//!
//! ```no_run
//! use std::sync::Arc;
//! use hl7_gateway::{FileSink, Gateway, GatewayConfig};
//!
//! # async fn run() -> Result<(), Box<dyn std::error::Error>> {
//! let config = GatewayConfig::builder()
//!     .with_port(2575)
//!     .with_save_dir("data")
//!     .build();
//!
//! let sink = Arc::new(FileSink::new(&config.save_dir)?);
//! let gateway = Gateway::bind(&config, sink).await?;
//! gateway.serve().await?;
//! # Ok(())
//! # }
//! ```

#![warn(missing_docs)]
#![warn(rustdoc::missing_crate_level_docs)]

mod codec;
mod config;
mod error;
mod gateway;
mod sink;

pub use codec::MllpCodec;
pub use config::{
    GatewayConfig, GatewayConfigBuilder, DEFAULT_HOST, DEFAULT_PORT, DEFAULT_SAVE_DIR,
};
pub use error::{GatewayError, GatewayResult};
pub use gateway::{ErrorReply, Gateway, SavedReply};
pub use sink::{FileSink, MessageSink};
