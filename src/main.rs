//! speccy80 CLI entry point (spec §6): parses arguments, wires up
//! best-effort debug logging, loads the ROM/snapshot, and either drives
//! the machine headlessly or hands it to the `display` feature's
//! windowed loop.

use std::process::ExitCode;

use clap::Parser;
use speccy80::cli::Args;
use speccy80::Machine;

fn main() -> ExitCode {
    let args = Args::parse();
    init_logging(args.debug_log.as_deref());

    let mut machine = Machine::new();
    if let Err(e) = machine.load_rom_file(&args.rom) {
        eprintln!("speccy80: {e}");
        return ExitCode::FAILURE;
    }

    let snapshot = args.z80.as_deref().or(args.sna.as_deref());
    if let Some(path) = snapshot {
        if let Err(e) = machine.load_snapshot_file(path) {
            eprintln!("speccy80: {e}");
            return ExitCode::FAILURE;
        }
    }

    run(machine)
}

#[cfg(feature = "display")]
fn run(machine: Machine) -> ExitCode {
    match speccy80::display::run_windowed(machine) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("speccy80: display error: {e}");
            ExitCode::FAILURE
        }
    }
}

#[cfg(not(feature = "display"))]
fn run(mut machine: Machine) -> ExitCode {
    machine.run();
    ExitCode::SUCCESS
}

/// Initialise `tracing` logging, writing to `debug_log` if one was given.
/// Per spec §7, debug-log writes are best-effort: a file that can't be
/// opened falls back to a stderr subscriber instead of aborting startup.
fn init_logging(debug_log: Option<&std::path::Path>) {
    use tracing_subscriber::EnvFilter;

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    let file = debug_log.and_then(|path| {
        std::fs::OpenOptions::new()
            .create(true)
            .append(true)
            .open(path)
            .map_err(|e| eprintln!("speccy80: could not open debug log {path:?}: {e}"))
            .ok()
    });

    match file {
        Some(file) => {
            tracing_subscriber::fmt()
                .with_env_filter(filter)
                .with_writer(std::sync::Mutex::new(file))
                .with_ansi(false)
                .init();
        }
        None => {
            tracing_subscriber::fmt().with_env_filter(filter).init();
        }
    }
}
