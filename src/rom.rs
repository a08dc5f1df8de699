//! 16K ROM image loading (spec §6).

use std::fs;
use std::path::Path;

use crate::bus::ROM_SIZE;
use crate::error::{EmuError, Result};

/// Read a raw 16384-byte ROM dump from disk.
pub fn load_rom_file(path: &Path) -> Result<[u8; ROM_SIZE]> {
    let data = fs::read(path).map_err(|source| EmuError::RomIo { path: path.to_path_buf(), source })?;
    if data.len() != ROM_SIZE {
        return Err(EmuError::RomSize { path: path.to_path_buf(), expected: ROM_SIZE, actual: data.len() });
    }
    let mut rom = [0u8; ROM_SIZE];
    rom.copy_from_slice(&data);
    Ok(rom)
}
