#![doc = r#"
speccy80 - a ZX Spectrum 48K-compatible Z80 emulator core.

This crate exposes the emulator core modules for use by the `speccy80`
binary and by tests. The core (`cpu`, `bus`, `video`, `machine`,
`snapshot`, `rom`, `error`) has no dependency on the CLI or display
layers and builds with no features enabled.

Modules:
- cpu: Z80 registers, ALU, instruction fetch, and the four-plane decoder
- bus: memory + I/O bus mapping ROM/video/RAM and port access
- video: the 48K display-file + keyboard-matrix peripheral
- machine: composes cpu + bus into the runnable machine and its loop
- snapshot: `.sna`/`.z80` snapshot loading
- rom: raw 16K ROM image loading
- error: the crate's `EmuError` type
- cli: command-line argument parsing (feature `cli`)
"#]

pub mod bus;
pub mod cpu;
pub mod error;
pub mod machine;
pub mod rom;
pub mod snapshot;
pub mod video;

#[cfg(feature = "cli")]
pub mod cli;

#[cfg(feature = "display")]
pub mod display;

pub use bus::Bus;
pub use cpu::Cpu;
pub use error::EmuError;
pub use machine::Machine;
