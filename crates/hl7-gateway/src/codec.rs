//! MLLP framing codec.
//!
//! Minimal Lower Layer Protocol wraps each HL7 message in a vertical-tab
//! start byte and a file-separator + carriage-return trailer:
//!
//! ```text
//! <0x0B> message payload <0x1C> <0x0D>
//! ```
//!
//! The codec yields one payload per frame and wraps outbound replies in
//! the same envelope. Bytes arriving before a start byte are discarded.

use bytes::{Buf, BufMut, Bytes, BytesMut};
use tokio_util::codec::{Decoder, Encoder};

/// MLLP frame start byte (vertical tab).
const BLOCK_START: u8 = 0x0B;

/// MLLP frame end byte (file separator), followed by a carriage return.
const BLOCK_END: u8 = 0x1C;

/// Carriage return terminating the trailer.
const CARRIAGE_RETURN: u8 = 0x0D;

/// Codec for MLLP-framed HL7 traffic.
#[derive(Debug, Default)]
pub struct MllpCodec;

impl MllpCodec {
    /// Creates a new codec.
    pub fn new() -> Self {
        Self
    }
}

impl Decoder for MllpCodec {
    type Item = BytesMut;
    type Error = std::io::Error;

    fn decode(&mut self, src: &mut BytesMut) -> Result<Option<Self::Item>, Self::Error> {
        // Drop any noise ahead of the start byte.
        match src.iter().position(|&b| b == BLOCK_START) {
            Some(start) => src.advance(start + 1),
            None => {
                src.clear();
                return Ok(None);
            }
        }

        let Some(end) = src.iter().position(|&b| b == BLOCK_END) else {
            // Incomplete frame: put the start byte back and wait for more.
            let mut restored = BytesMut::with_capacity(src.len() + 1);
            restored.put_u8(BLOCK_START);
            restored.extend_from_slice(src);
            *src = restored;
            return Ok(None);
        };

        let payload = src.split_to(end);
        src.advance(1);
        // Consume the trailing carriage return when it has arrived.
        if src.first() == Some(&CARRIAGE_RETURN) {
            src.advance(1);
        }
        Ok(Some(payload))
    }
}

impl Encoder<Bytes> for MllpCodec {
    type Error = std::io::Error;

    fn encode(&mut self, item: Bytes, dst: &mut BytesMut) -> Result<(), Self::Error> {
        dst.reserve(item.len() + 3);
        dst.put_u8(BLOCK_START);
        dst.extend_from_slice(&item);
        dst.put_u8(BLOCK_END);
        dst.put_u8(CARRIAGE_RETURN);
        Ok(())
    }
}
