use crate::StringToAnyhow;
use gridcast::render::{self, draw_frame, draw_minimap, Rgba};
use gridcast::{Control, Simulation};
use glam::Vec2;
use sdl2::keyboard::Keycode;
use sdl2::pixels::Color;
use sdl2::rect::{Point, Rect};
use sdl2::render::{BlendMode, Canvas};
use sdl2::video::Window;

#[derive(Clone, Copy, PartialEq, Debug)]
pub(crate) enum GameState {
    Playing,
    Minimap,
    Paused,
    Exit,
}

fn sdl_color(color: Rgba) -> Color {
    Color::RGBA(color.r, color.g, color.b, color.a)
}

fn point(v: Vec2) -> Point {
    Point::new(v.x.round() as i32, v.y.round() as i32)
}

/// snap a float rectangle to whole pixels, nothing when it rounds to empty
fn pixel_rect(x: f32, y: f32, w: f32, h: f32) -> Option<Rect> {
    let (w, h) = (w.round(), h.round());
    if w < 1. || h < 1. {
        return None;
    }
    Some(Rect::new(x.round() as i32, y.round() as i32, w as u32, h as u32))
}

/// SDL window canvas as a drawing sink for the engine.
pub(crate) struct Screen {
    pub canvas: Canvas<Window>,
}

impl render::Canvas for Screen {
    type Error = anyhow::Error;

    fn clear(&mut self, color: Rgba) -> anyhow::Result<()> {
        self.canvas.set_draw_color(sdl_color(color));
        self.canvas.clear();
        Ok(())
    }

    fn fill_rect(&mut self, x: f32, y: f32, w: f32, h: f32, color: Rgba) -> anyhow::Result<()> {
        let Some(rect) = pixel_rect(x, y, w, h) else {
            return Ok(());
        };
        self.canvas.set_draw_color(sdl_color(color));
        self.canvas.fill_rect(rect).ah()
    }

    fn line(&mut self, from: Vec2, to: Vec2, color: Rgba) -> anyhow::Result<()> {
        self.canvas.set_draw_color(sdl_color(color));
        self.canvas.draw_line(point(from), point(to)).ah()
    }

    fn fill_circle(&mut self, center: Vec2, radius: f32, color: Rgba) -> anyhow::Result<()> {
        self.canvas.set_draw_color(sdl_color(color));
        // one horizontal span per pixel row
        let r = radius.max(1.).round() as i32;
        let c = point(center);
        for dy in -r..=r {
            let dx = (((r * r - dy * dy) as f32).sqrt()) as i32;
            self.canvas
                .draw_line(
                    Point::new(c.x() - dx, c.y() + dy),
                    Point::new(c.x() + dx, c.y() + dy),
                )
                .ah()?;
        }
        Ok(())
    }
}

fn control_for(key: Keycode) -> Option<Control> {
    match key {
        Keycode::Up | Keycode::W => Some(Control::Forward),
        Keycode::Down | Keycode::S => Some(Control::Backward),
        Keycode::Left | Keycode::A => Some(Control::TurnLeft),
        Keycode::Right | Keycode::D => Some(Control::TurnRight),
        _ => None,
    }
}

pub(crate) struct Game {
    sim: Simulation,
    pub game_state: GameState,
    pub screen: Screen,
}

impl Game {
    pub fn new(sim: Simulation, canvas: Canvas<Window>) -> Self {
        let mut screen = Screen { canvas };
        screen.canvas.set_blend_mode(BlendMode::Blend);

        Self {
            sim,
            game_state: GameState::Playing,
            screen,
        }
    }

    /// handle a key going down (repeats are filtered by the caller)
    pub fn key_down(&mut self, key: Keycode) {
        if let Some(control) = control_for(key) {
            self.sim.viewer.press(control);
            return;
        }

        match (key, self.game_state) {
            (Keycode::Escape, _) => self.game_state = GameState::Exit,
            (Keycode::P, GameState::Paused) => self.game_state = GameState::Playing,
            (Keycode::P, _) => self.game_state = GameState::Paused,
            (Keycode::M, GameState::Minimap) => self.game_state = GameState::Playing,
            (Keycode::M, GameState::Playing) => self.game_state = GameState::Minimap,
            _ => {}
        }
    }

    pub fn key_up(&mut self, key: Keycode) {
        if let Some(control) = control_for(key) {
            self.sim.viewer.release(control);
        }
    }

    /// advance and draw one frame
    pub fn frame(&mut self) -> anyhow::Result<()> {
        match self.game_state {
            GameState::Playing | GameState::Minimap => self.playing_draw(),
            GameState::Paused => self.pause_draw(),
            GameState::Exit => Ok(()),
        }
    }

    fn playing_draw(&mut self) -> anyhow::Result<()> {
        let frame = self.sim.tick();
        let (_, height) = self.sim.screen_size();

        draw_frame(&mut self.screen, &frame.columns, height)?;

        if self.game_state == GameState::Minimap {
            draw_minimap(
                &mut self.screen,
                &self.sim.grid,
                &self.sim.viewer,
                &frame.hits,
                self.sim.config.minimap_scale,
            )?;
        }

        Ok(())
    }

    fn pause_draw(&mut self) -> anyhow::Result<()> {
        // redraw the frozen view under a dark veil
        let frame = self.sim.render();
        let (_, height) = self.sim.screen_size();
        draw_frame(&mut self.screen, &frame.columns, height)?;

        self.screen.canvas.set_draw_color(Color::RGBA(0, 0, 0, 0xDD));
        self.screen.canvas.fill_rect(None).ah()
    }
}
