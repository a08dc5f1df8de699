//! Error types for the emulator core.
//!
//! Three kinds map to the three error categories this system distinguishes:
//! startup errors (bad ROM/snapshot input), which should fail loudly, and
//! runtime emulation events, which are tolerated silently and therefore
//! never reach this type at all (see `bus` and `video` for those).

use std::path::PathBuf;

#[derive(thiserror::Error, Debug)]
pub enum EmuError {
    #[error("failed to read ROM file {path}: {source}")]
    RomIo {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("ROM file {path} has wrong size: expected {expected} bytes, got {actual}")]
    RomSize {
        path: PathBuf,
        expected: usize,
        actual: usize,
    },

    #[error("failed to read snapshot file {path}: {source}")]
    SnapshotIo {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("malformed .SNA snapshot: {0}")]
    MalformedSna(String),

    #[error("malformed .Z80 snapshot: {0}")]
    MalformedZ80(String),

    #[error("unrecognized snapshot extension on {0:?} (expected .sna or .z80)")]
    UnknownSnapshotKind(PathBuf),
}

pub type Result<T> = std::result::Result<T, EmuError>;
