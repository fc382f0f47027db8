//! SDL2 display surface for the interactive viewer.
//!
//! Only compiled with the `window` feature. The window knows nothing about
//! scenes: it turns SDL input into [`ViewCommand`]s and uploads finished
//! [`FrameBuffer`]s.

use sdl2::event::Event;
use sdl2::keyboard::Keycode;
use sdl2::mouse::MouseWheelDirection;
use sdl2::pixels::PixelFormatEnum;
use sdl2::rect::Rect;

use crate::render::FrameBuffer;
use crate::viewer::ViewCommand;

pub const FPS: u64 = 60;
pub const FRAME_TARGET_TIME: f64 = 1000.0 / FPS as f64;

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum WindowEvent {
    Quit,
    Resize(u32, u32),
    Command(ViewCommand),
}

pub struct FrameLimiter {
    previous_frame_time: u64,
}

impl FrameLimiter {
    pub fn new(window: &Window) -> Self {
        Self {
            previous_frame_time: window.timer().ticks64(),
        }
    }

    /// Waits if necessary to maintain frame rate and returns the delta time in milliseconds.
    pub fn wait_and_get_delta(&mut self, window: &Window) -> u64 {
        let mut current_time = window.timer().ticks64();
        let mut delta_time = current_time - self.previous_frame_time;

        if delta_time < FRAME_TARGET_TIME as u64 {
            let time_to_wait = (FRAME_TARGET_TIME as u64) - delta_time;
            std::thread::sleep(std::time::Duration::from_millis(time_to_wait));
            current_time = window.timer().ticks64();
            delta_time = current_time - self.previous_frame_time;
        }

        self.previous_frame_time = current_time;
        delta_time
    }
}

/// Maps a key press to a viewer command.
///
/// Arrows rotate, WASD pans, L/M zoom, Tab switches what a mouse drag does,
/// R resets the view. `[`/`]` dim or brighten the ambient light and `;`/`'`
/// the direct light.
pub fn key_command(key: Keycode, light_step: i16) -> Option<ViewCommand> {
    let command = match key {
        Keycode::Left => ViewCommand::RotateLeft,
        Keycode::Right => ViewCommand::RotateRight,
        Keycode::Up => ViewCommand::RotateUp,
        Keycode::Down => ViewCommand::RotateDown,
        Keycode::W => ViewCommand::PanUp,
        Keycode::S => ViewCommand::PanDown,
        Keycode::A => ViewCommand::PanLeft,
        Keycode::D => ViewCommand::PanRight,
        Keycode::L => ViewCommand::ZoomIn,
        Keycode::M => ViewCommand::ZoomOut,
        Keycode::Tab => ViewCommand::ToggleDragMode,
        Keycode::R => ViewCommand::Reset,
        Keycode::LeftBracket => ViewCommand::AdjustAmbient(-light_step),
        Keycode::RightBracket => ViewCommand::AdjustAmbient(light_step),
        Keycode::Semicolon => ViewCommand::AdjustLight(-light_step),
        Keycode::Quote => ViewCommand::AdjustLight(light_step),
        _ => return None,
    };
    Some(command)
}

pub struct Window {
    canvas: sdl2::render::Canvas<sdl2::video::Window>,
    texture: sdl2::render::Texture<'static>,
    texture_creator: Box<sdl2::render::TextureCreator<sdl2::video::WindowContext>>,
    event_pump: sdl2::EventPump,
    timer_subsystem: sdl2::TimerSubsystem,
    width: u32,
    height: u32,
    light_step: i16,
    drag_start: Option<(i32, i32)>,
}

impl Window {
    pub fn new(title: &str, width: u32, height: u32, light_step: i16) -> Result<Self, String> {
        let sdl_context = sdl2::init()?;
        let video_subsystem = sdl_context.video()?;
        let timer_subsystem = sdl_context.timer()?;

        let window = video_subsystem
            .window(title, width, height)
            .position_centered()
            .resizable()
            .build()
            .map_err(|e| e.to_string())?;

        let canvas = window.into_canvas().build().map_err(|e| e.to_string())?;
        let texture_creator = Box::new(canvas.texture_creator());
        let event_pump = sdl_context.event_pump()?;

        // SAFETY: texture_creator is heap-allocated and lives as long as Window.
        // We ensure texture is dropped before texture_creator by struct field order.
        let texture_creator_ref: &'static sdl2::render::TextureCreator<sdl2::video::WindowContext> =
            unsafe { &*(texture_creator.as_ref() as *const _) };
        let texture = texture_creator_ref
            .create_texture_streaming(PixelFormatEnum::ARGB8888, width, height)
            .map_err(|e| e.to_string())?;

        Ok(Self {
            canvas,
            texture,
            texture_creator,
            event_pump,
            timer_subsystem,
            width,
            height,
            light_step,
            drag_start: None,
        })
    }

    /// Drains pending SDL events.
    ///
    /// A mouse drag is reported once, on button release, as the total
    /// offset since the press.
    pub fn poll_events(&mut self) -> Vec<WindowEvent> {
        let mut events = Vec::new();
        for event in self.event_pump.poll_iter() {
            match event {
                Event::Quit { .. }
                | Event::KeyDown {
                    keycode: Some(Keycode::Escape),
                    ..
                } => events.push(WindowEvent::Quit),
                Event::Window {
                    win_event: sdl2::event::WindowEvent::Resized(w, h),
                    ..
                } => events.push(WindowEvent::Resize(w as u32, h as u32)),
                Event::KeyDown {
                    keycode: Some(key), ..
                } => {
                    if let Some(command) = key_command(key, self.light_step) {
                        events.push(WindowEvent::Command(command));
                    }
                }
                Event::MouseButtonDown { x, y, .. } => self.drag_start = Some((x, y)),
                Event::MouseButtonUp { x, y, .. } => {
                    if let Some((start_x, start_y)) = self.drag_start.take() {
                        events.push(WindowEvent::Command(ViewCommand::Drag {
                            dx: (x - start_x) as f32,
                            dy: (y - start_y) as f32,
                        }));
                    }
                }
                Event::MouseWheel { y, direction, .. } => {
                    let y = if direction == MouseWheelDirection::Flipped { -y } else { y };
                    if y > 0 {
                        events.push(WindowEvent::Command(ViewCommand::ZoomIn));
                    } else if y < 0 {
                        events.push(WindowEvent::Command(ViewCommand::ZoomOut));
                    }
                }
                _ => {}
            }
        }
        events
    }

    pub fn present(&mut self, frame: &FrameBuffer) -> Result<(), String> {
        if frame.width() != self.width || frame.height() != self.height {
            return Err(format!(
                "frame is {}x{} but the window texture is {}x{}",
                frame.width(),
                frame.height(),
                self.width,
                self.height
            ));
        }
        self.texture
            .update(None, &frame.to_argb_bytes(), (self.width * 4) as usize)
            .map_err(|e| e.to_string())?;

        self.canvas.clear();
        self.canvas
            .copy(&self.texture, None, Some(Rect::new(0, 0, self.width, self.height)))?;
        self.canvas.present();
        Ok(())
    }

    pub fn resize(&mut self, width: u32, height: u32) -> Result<(), String> {
        self.width = width;
        self.height = height;
        // SAFETY: Same as in new() - texture_creator outlives texture
        let texture_creator_ref: &'static sdl2::render::TextureCreator<sdl2::video::WindowContext> =
            unsafe { &*(self.texture_creator.as_ref() as *const _) };
        self.texture = texture_creator_ref
            .create_texture_streaming(PixelFormatEnum::ARGB8888, width, height)
            .map_err(|e| e.to_string())?;
        Ok(())
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn timer(&self) -> &sdl2::TimerSubsystem {
        &self.timer_subsystem
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_key_bindings() {
        assert_eq!(key_command(Keycode::Left, 8), Some(ViewCommand::RotateLeft));
        assert_eq!(key_command(Keycode::W, 8), Some(ViewCommand::PanUp));
        assert_eq!(key_command(Keycode::L, 8), Some(ViewCommand::ZoomIn));
        assert_eq!(key_command(Keycode::LeftBracket, 8), Some(ViewCommand::AdjustAmbient(-8)));
        assert_eq!(key_command(Keycode::Q, 8), None);
    }
}
