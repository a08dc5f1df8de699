/*!
machine.rs - composes the CPU and bus into the runnable 48K Spectrum
machine (spec §4.11). `run()` is the cooperative single-threaded loop; a
host (the `display`-feature GUI loop in `main.rs`, or a test) drives
`step()`/`request_stop()`/`set_key()` and polls `framebuffer()`.
*/

use std::path::Path;

use crate::bus::Bus;
use crate::cpu::Cpu;
use crate::error::Result;
use crate::rom;
use crate::snapshot;

pub struct Machine {
    pub cpu: Cpu,
    pub bus: Bus,
    stop: bool,
}

impl Machine {
    pub fn new() -> Self {
        Self { cpu: Cpu::new(), bus: Bus::new(), stop: false }
    }

    pub fn load_rom_file(&mut self, path: &Path) -> Result<()> {
        let rom = rom::load_rom_file(path)?;
        self.bus.load_rom(&rom);
        Ok(())
    }

    /// Load a `.sna`/`.z80` snapshot, replacing CPU registers and RAM
    /// atomically (spec §3's snapshot-mutation invariant). Usable both
    /// from the CLI's startup flags and from the in-run F10 menu hotkey,
    /// without requiring a host window (spec §4.11 supplement).
    pub fn load_snapshot_file(&mut self, path: &Path) -> Result<()> {
        let snap = snapshot::load_snapshot_file(path)?;
        self.bus.load_ram_image(&snap.ram);
        self.cpu.regs = snap.regs;
        Ok(())
    }

    pub fn reset(&mut self) {
        self.cpu.reset();
    }

    pub fn request_stop(&mut self) {
        self.stop = true;
    }

    pub fn is_stopped(&self) -> bool {
        self.stop
    }

    /// Run instructions until `request_stop()` is called. The host is
    /// responsible for calling this from its own event/frame loop (or
    /// for driving `cpu.step(&mut self.bus)` directly, e.g. under a
    /// windowing event callback).
    pub fn run(&mut self) {
        while !self.stop {
            self.cpu.step(&mut self.bus);
        }
    }

    pub fn framebuffer(&self) -> &[u8] {
        self.bus.video.framebuffer()
    }

    pub fn set_key(&mut self, row: usize, bit: usize, down: bool) {
        self.bus.video.set_key(row, bit, down);
    }
}

impl Default for Machine {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn load_rom_rejects_wrong_size() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(&[0u8; 100]).unwrap();
        let mut machine = Machine::new();
        let err = machine.load_rom_file(file.path());
        assert!(err.is_err());
    }

    #[test]
    fn load_rom_then_step_runs_nop() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(&[0u8; crate::bus::ROM_SIZE]).unwrap();
        let mut machine = Machine::new();
        machine.load_rom_file(file.path()).unwrap();
        let cycles = machine.cpu.step(&mut machine.bus);
        assert_eq!(cycles, 4);
        assert_eq!(machine.cpu.regs.pc, 1);
    }

    #[test]
    fn request_stop_before_run_means_run_executes_nothing() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(&[0u8; crate::bus::ROM_SIZE]).unwrap();
        let mut machine = Machine::new();
        machine.load_rom_file(file.path()).unwrap();
        assert!(!machine.is_stopped());
        machine.request_stop();
        assert!(machine.is_stopped());
        machine.run();
        assert_eq!(machine.cpu.regs.pc, 0); // run() never executed a step
    }
}
