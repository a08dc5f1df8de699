/*!
snapshot/mod.rs - `.SNA` and `.Z80` snapshot loading (spec §6).

A `SnapshotImage` is the loader-neutral result: a fully populated
`Regs` plus the 48K memory image spanning `0x4000..=0xFFFF` (video RAM
and main RAM together, matching `Bus::load_ram_image`'s expectation).
`load_snapshot_file` dispatches on file extension.
*/

mod sna;
mod z80;

use std::path::Path;

use crate::cpu::regs::Regs;
use crate::error::{EmuError, Result};

pub struct SnapshotImage {
    pub regs: Regs,
    /// 0xC000 bytes covering `0x4000..=0xFFFF`.
    pub ram: Vec<u8>,
    pub border: u8,
}

pub fn load_snapshot_file(path: &Path) -> Result<SnapshotImage> {
    let data = std::fs::read(path).map_err(|source| EmuError::SnapshotIo { path: path.to_path_buf(), source })?;
    match path.extension().and_then(|e| e.to_str()).map(|e| e.to_ascii_lowercase()).as_deref() {
        Some("sna") => sna::load(&data),
        Some("z80") => z80::load(&data),
        _ => Err(EmuError::UnknownSnapshotKind(path.to_path_buf())),
    }
}
