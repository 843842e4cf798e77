//! Error taxonomy shared across library modules.
//!
//! Mirrors the propagation policy of the format's error handling design:
//! parse/filter failures are local and silent (counted, never surfaced),
//! I/O failures bubble to the caller and are fatal for the current file,
//! and `Unimplemented`/`DataTooLarge` are programmer errors the CLI
//! wrappers treat as fatal rather than recoverable.
use std::io;

use thiserror::Error;

/// Errors a [`crate::catalog::Serialiser`]/[`crate::writer::Writer`] call can surface.
#[derive(Debug, Error)]
pub enum WriterError {
    /// The caller attempted to record packet id `0`, which is reserved for
    /// the Writer's own lazily-emitted `Version` frame.
    #[error("packet id 0 is reserved for the Version frame")]
    InvalidArgument,
    /// The byte sink rejected a write. Fatal for the current file.
    #[error("I/O error writing frame: {0}")]
    Io(#[from] io::Error),
}

/// Errors a [`crate::source::PacketSource`] implementation can surface.
#[derive(Debug, Error)]
pub enum SourceError {
    /// This concrete source does not implement the requested pull operation
    /// (e.g. `next_n2k` on a TeamSurv reader).
    #[error("operation not implemented by this packet source")]
    Unimplemented,
    /// A YDVR record declared a payload larger than the frame buffer maximum.
    #[error("record payload of {len} bytes exceeds the maximum of {max}")]
    DataTooLarge { len: usize, max: usize },
    /// The underlying reader failed.
    #[error("I/O error reading packet source: {0}")]
    Io(#[from] io::Error),
}
