//! MLLP listener wiring transport, parser and sink together.

use std::net::SocketAddr;
use std::path::Path;
use std::sync::Arc;

use bytes::Bytes;
use futures::{SinkExt, StreamExt};
use serde::Serialize;
use tokio::net::{TcpListener, TcpStream};
use tokio_util::codec::Framed;
use tracing::{error, info, warn};

use crate::codec::MllpCodec;
use crate::config::GatewayConfig;
use crate::error::{GatewayError, GatewayResult};
use crate::sink::MessageSink;

/// Reply sent for a successfully processed message.
///
/// Mirrors what the system historically echoed to senders: where the
/// result was stored, a human-readable confirmation, and the parsed data.
#[derive(Debug, Serialize)]
pub struct SavedReply<'a> {
    /// Path the parse result was persisted to.
    pub file_path: &'a Path,
    /// Confirmation text.
    pub message: String,
    /// The parse result itself.
    pub data: &'a hl7_message::ParsedMessage,
}

/// Reply sent when processing a message failed.
#[derive(Debug, Serialize)]
pub struct ErrorReply {
    /// Description of the failure.
    pub error: String,
}

/// An MLLP gateway bound to a listen address.
///
/// Every accepted connection runs in its own task. Frames are parsed with
/// [`hl7_message::parse`], persisted through the [`MessageSink`], and
/// answered with the serialized result. A failure on one message is
/// reported to the sender and logged; it never tears down the connection
/// or the listener.
///
/// # Example
///
/// ```no_run
/// use std::sync::Arc;
/// use hl7_gateway::{FileSink, Gateway, GatewayConfig};
///
/// # async fn run() -> Result<(), Box<dyn std::error::Error>> {
/// let config = GatewayConfig::from_env();
/// let sink = Arc::new(FileSink::new(&config.save_dir)?);
/// let gateway = Gateway::bind(&config, sink).await?;
/// gateway.serve().await?;
/// # Ok(())
/// # }
/// ```
pub struct Gateway {
    listener: TcpListener,
    local_addr: SocketAddr,
    sink: Arc<dyn MessageSink + Send + Sync>,
}

impl Gateway {
    /// Binds the listener on the configured address.
    pub async fn bind(
        config: &GatewayConfig,
        sink: Arc<dyn MessageSink + Send + Sync>,
    ) -> GatewayResult<Self> {
        let addr = config.listen_addr();
        let listener = TcpListener::bind(addr.as_str())
            .await
            .map_err(|source| GatewayError::Bind {
                addr: addr.clone(),
                source,
            })?;
        let local_addr = listener
            .local_addr()
            .map_err(|source| GatewayError::Bind { addr, source })?;
        info!(addr = %local_addr, "gateway listening");
        Ok(Self {
            listener,
            local_addr,
            sink,
        })
    }

    /// The address the listener is actually bound to.
    ///
    /// Differs from the configured address when port 0 was requested.
    pub fn local_addr(&self) -> SocketAddr {
        self.local_addr
    }

    /// Accepts connections until the surrounding task is dropped.
    pub async fn serve(self) -> GatewayResult<()> {
        loop {
            match self.listener.accept().await {
                Ok((stream, peer)) => {
                    info!(%peer, "client connected");
                    let sink = Arc::clone(&self.sink);
                    tokio::spawn(async move {
                        handle_connection(stream, peer, sink).await;
                        info!(%peer, "client disconnected");
                    });
                }
                Err(e) => warn!(error = %e, "failed to accept connection"),
            }
        }
    }
}

/// Drives one connection: one reply frame per inbound frame.
///
/// Parsing and persistence run on the blocking pool, so a slow disk
/// stalls only this message, never the reactor thread.
async fn handle_connection(
    stream: TcpStream,
    peer: SocketAddr,
    sink: Arc<dyn MessageSink + Send + Sync>,
) {
    let mut transport = Framed::new(stream, MllpCodec::new());

    while let Some(frame) = transport.next().await {
        let frame = match frame {
            Ok(frame) => frame,
            Err(e) => {
                warn!(%peer, error = %e, "transport error, closing connection");
                return;
            }
        };

        let sink = Arc::clone(&sink);
        let processed =
            tokio::task::spawn_blocking(move || process_frame(&frame, sink.as_ref())).await;
        let reply = match processed {
            Ok(Ok(reply)) => reply,
            Ok(Err(e)) => {
                error!(%peer, error = %e, "failed to process message");
                render_error(&e)
            }
            Err(e) => {
                error!(%peer, error = %e, "processing task failed, closing connection");
                return;
            }
        };

        if let Err(e) = transport.send(reply).await {
            warn!(%peer, error = %e, "failed to send reply, closing connection");
            return;
        }
    }
}

/// Parses, persists and renders the reply for one inbound frame.
fn process_frame(frame: &[u8], sink: &(dyn MessageSink + Send + Sync)) -> GatewayResult<Bytes> {
    let raw = std::str::from_utf8(frame).map_err(|_| GatewayError::NonUtf8Frame)?;
    let parsed = hl7_message::parse(raw)?;
    let file_path = sink.persist(&parsed)?;
    info!(path = %file_path.display(), "message persisted");

    let reply = SavedReply {
        message: format!("HL7 message saved in {}", file_path.display()),
        file_path: &file_path,
        data: &parsed,
    };
    Ok(Bytes::from(serde_json::to_vec(&reply)?))
}

/// Renders a failure as the JSON error reply.
fn render_error(error: &GatewayError) -> Bytes {
    let reply = ErrorReply {
        error: error.to_string(),
    };
    // Serializing a single string field cannot fail.
    Bytes::from(serde_json::to_vec(&reply).unwrap_or_default())
}
