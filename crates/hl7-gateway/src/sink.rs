//! Persistence of parse results.
//!
//! The transport hands every successful parse to a [`MessageSink`]; the
//! stock implementation is [`FileSink`], which writes one timestamped JSON
//! file per message under a base directory. The trait is the seam that
//! lets tests (or another deployment) swap the storage without touching
//! the transport.

use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::{Component, Path, PathBuf};
use std::sync::Mutex;

use chrono::Local;
use hl7_message::ParsedMessage;

use crate::error::{GatewayError, GatewayResult};

/// Timestamp pattern embedded in persisted file names.
const FILE_TIMESTAMP_FORMAT: &str = "%d%m%Y-%H%M%S";

/// Destination for parsed messages.
pub trait MessageSink {
    /// Persists one parse result, returning where it was stored.
    fn persist(&self, message: &ParsedMessage) -> GatewayResult<PathBuf>;
}

/// Sink that writes each parse result as JSON to a timestamped file.
///
/// Files are named `hl7-message-<ddMMyyyy-HHmmss>.txt` and land in the
/// current target directory, which starts as the base directory and can be
/// re-pointed at a subdirectory with [`set_relative_dir`](Self::set_relative_dir).
#[derive(Debug)]
pub struct FileSink {
    base_dir: PathBuf,
    current_dir: Mutex<PathBuf>,
}

impl FileSink {
    /// Creates a sink rooted at `base_dir`, creating the directory if
    /// needed.
    pub fn new(base_dir: impl Into<PathBuf>) -> GatewayResult<Self> {
        let base_dir = base_dir.into();
        std::fs::create_dir_all(&base_dir)
            .map_err(|e| GatewayError::io_error(&base_dir, e))?;
        Ok(Self {
            current_dir: Mutex::new(base_dir.clone()),
            base_dir,
        })
    }

    /// Re-targets the sink at a subdirectory of the base directory.
    ///
    /// The path is taken relative to the base; `./` and `<base>/` prefixes
    /// are tolerated. Absolute paths and any `..` component are rejected
    /// with [`GatewayError::SavePathOutsideBase`] so a caller-supplied
    /// path can never escape the base. The directory is created.
    pub fn set_relative_dir(&self, requested: impl AsRef<Path>) -> GatewayResult<PathBuf> {
        let requested = requested.as_ref();
        let relative = self.sanitize(requested)?;
        let target = self.base_dir.join(relative);
        std::fs::create_dir_all(&target).map_err(|e| GatewayError::io_error(&target, e))?;
        *self.current_dir.lock().expect("sink lock poisoned") = target.clone();
        Ok(target)
    }

    /// The directory files are currently written to.
    pub fn current_dir(&self) -> PathBuf {
        self.current_dir.lock().expect("sink lock poisoned").clone()
    }

    fn sanitize(&self, requested: &Path) -> GatewayResult<PathBuf> {
        // Tolerated prefixes, in the order they stack: "./", then the base
        // directory ("./data/lab" with base "data" means "lab", not
        // "data/lab"). The base also matches by its final component so a
        // relative request works against an absolute base.
        let stripped = requested.strip_prefix(".").unwrap_or(requested);
        let stripped = stripped
            .strip_prefix(&self.base_dir)
            .ok()
            .or_else(|| {
                self.base_dir
                    .file_name()
                    .and_then(|name| stripped.strip_prefix(name).ok())
            })
            .unwrap_or(stripped);

        let mut relative = PathBuf::new();
        for component in stripped.components() {
            match component {
                Component::Normal(part) => relative.push(part),
                Component::CurDir => {}
                _ => {
                    return Err(GatewayError::SavePathOutsideBase {
                        requested: requested.to_path_buf(),
                    })
                }
            }
        }
        Ok(relative)
    }
}

impl MessageSink for FileSink {
    fn persist(&self, message: &ParsedMessage) -> GatewayResult<PathBuf> {
        let timestamp = Local::now().format(FILE_TIMESTAMP_FORMAT);
        let path = self
            .current_dir()
            .join(format!("hl7-message-{timestamp}.txt"));

        let file = File::create(&path).map_err(|e| GatewayError::io_error(&path, e))?;
        let mut writer = BufWriter::new(file);
        serde_json::to_writer(&mut writer, message)?;
        writer.flush().map_err(|e| GatewayError::io_error(&path, e))?;

        Ok(path)
    }
}
