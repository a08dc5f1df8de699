/*!
display.rs - optional `winit` + `pixels` window loop (feature `display`).

Not part of the emulator core (spec §1 scope excludes host windowing);
this is the thin adapter the `speccy80` binary uses when built with
`--features display`. It owns the window/surface and nothing else: all
emulation state lives in `Machine`.
*/

use std::num::NonZeroU32;

use pixels::{Pixels, SurfaceTexture};
use winit::application::ApplicationHandler;
use winit::event::{ElementState, WindowEvent};
use winit::event_loop::{ActiveEventLoop, EventLoop};
use winit::keyboard::{Key, NamedKey};
use winit::window::{Window, WindowId};

use crate::machine::Machine;
use crate::video::{SCREEN_HEIGHT, SCREEN_WIDTH};

/// T-states to run per redraw, matching one 50Hz frame (see `cpu::core::CYCLES_PER_FRAME`).
const CYCLES_PER_FRAME: u32 = crate::cpu::core::CYCLES_PER_FRAME;

pub fn run_windowed(machine: Machine) -> Result<(), pixels::Error> {
    let event_loop = EventLoop::new().expect("failed to create event loop");
    let mut app = App { machine, window: None, pixels: None };
    event_loop.run_app(&mut app).expect("event loop exited with an error");
    Ok(())
}

struct App {
    machine: Machine,
    window: Option<Window>,
    pixels: Option<Pixels<'static>>,
}

impl ApplicationHandler for App {
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.window.is_some() {
            return;
        }
        let attrs = Window::default_attributes()
            .with_title("speccy80")
            .with_inner_size(winit::dpi::LogicalSize::new(
                (SCREEN_WIDTH * 2) as u32,
                (SCREEN_HEIGHT * 2) as u32,
            ));
        let window = event_loop.create_window(attrs).expect("failed to create window");
        let size = window.inner_size();
        let surface_texture = SurfaceTexture::new(size.width, size.height, &window);
        let pixels = Pixels::new(SCREEN_WIDTH as u32, SCREEN_HEIGHT as u32, surface_texture)
            .expect("failed to create pixel surface");

        self.window = Some(window);
        self.pixels = Some(pixels);
        if let Some(window) = &self.window {
            window.request_redraw();
        }
    }

    fn window_event(&mut self, event_loop: &ActiveEventLoop, _id: WindowId, event: WindowEvent) {
        match event {
            WindowEvent::CloseRequested => event_loop.exit(),
            WindowEvent::Resized(size) => {
                if let (Some(pixels), Some(w), Some(h)) =
                    (self.pixels.as_mut(), NonZeroU32::new(size.width), NonZeroU32::new(size.height))
                {
                    let _ = pixels.resize_surface(w.get(), h.get());
                }
            }
            WindowEvent::KeyboardInput { event: key_event, .. } => {
                if key_event.logical_key == Key::Named(NamedKey::Escape)
                    && key_event.state == ElementState::Pressed
                {
                    event_loop.exit();
                    return;
                }
                if let Some((row, bit)) = map_key(&key_event.logical_key) {
                    self.machine.set_key(row, bit, key_event.state == ElementState::Pressed);
                }
            }
            WindowEvent::RedrawRequested => {
                let mut elapsed = 0u32;
                while elapsed < CYCLES_PER_FRAME {
                    elapsed += self.machine.cpu.step(&mut self.machine.bus);
                }
                if let Some(pixels) = self.pixels.as_mut() {
                    pixels.frame_mut().chunks_exact_mut(4).zip(
                        self.machine.framebuffer().chunks_exact(3),
                    ).for_each(|(dst, src)| {
                        dst[0] = src[0];
                        dst[1] = src[1];
                        dst[2] = src[2];
                        dst[3] = 0xFF;
                    });
                    let _ = pixels.render();
                }
                if let Some(window) = &self.window {
                    window.request_redraw();
                }
            }
            _ => {}
        }
    }
}

/// Maps a small subset of PC keys onto the Spectrum's 8x5 matrix; enough
/// to drive BASIC input, not a full remapping of every Spectrum key.
fn map_key(key: &Key) -> Option<(usize, usize)> {
    match key {
        Key::Character(s) => match s.as_str() {
            "z" | "Z" => Some((0, 1)),
            "x" | "X" => Some((0, 2)),
            "a" | "A" => Some((1, 0)),
            "s" | "S" => Some((1, 1)),
            "q" | "Q" => Some((2, 0)),
            "1" => Some((3, 0)),
            "0" => Some((4, 0)),
            "p" | "P" => Some((5, 0)),
            "m" | "M" => Some((7, 2)),
            _ => None,
        },
        Key::Named(NamedKey::Enter) => Some((6, 0)),
        Key::Named(NamedKey::Space) => Some((7, 0)),
        Key::Named(NamedKey::Shift) => Some((0, 0)),
        _ => None,
    }
}
