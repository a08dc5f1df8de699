//! Command-line argument parsing (spec §6), gated behind the `cli`
//! feature alongside `tracing`-based logging.

use std::path::PathBuf;

use clap::Parser;

#[derive(Parser, Debug)]
#[command(name = "speccy80", about = "ZX Spectrum 48K emulator core")]
pub struct Args {
    /// Path to the 16K ROM image.
    #[arg(short = 'r', long = "rom")]
    pub rom: PathBuf,

    /// Load a `.sna` snapshot before starting.
    #[arg(short = 'S', long = "sna")]
    pub sna: Option<PathBuf>,

    /// Load a `.z80` snapshot before starting.
    #[arg(short = 'Z', long = "z80")]
    pub z80: Option<PathBuf>,

    /// Write a best-effort debug log to this file.
    #[arg(short = 'l', long = "debug-log")]
    pub debug_log: Option<PathBuf>,
}
