use anyhow::Context;
use clap::Parser;
use game::{Game, GameState};
use glam::Vec2;
use gridcast::map::TILE_SIZE;
use gridcast::{CollisionPolicy, Config, Simulation, TileGrid};
use sdl2::event::Event;
use std::f32::consts::FRAC_PI_2;
use std::path::PathBuf;
use std::time::{Duration, Instant};

mod game;

// helper trait to convert strings into std::error types
trait StringToAnyhow<T> {
    fn ah(self) -> anyhow::Result<T>;
}

impl<T> StringToAnyhow<T> for Result<T, String> {
    fn ah(self) -> anyhow::Result<T> {
        self.map_err(|err| anyhow::anyhow!("{err}"))
    }
}

/// First-person ray casting over a tile map.
#[derive(Parser, Debug)]
#[command(version)]
struct Args {
    /// text map to load instead of the built-in one
    map: Option<PathBuf>,

    /// edge length of one tile, in pixels
    #[arg(long, default_value_t = TILE_SIZE)]
    tile_size: f32,

    /// horizontal field of view, in degrees
    #[arg(long, default_value_t = 60.)]
    fov: f32,

    /// slide along walls instead of stopping dead
    #[arg(long)]
    slide: bool,

    /// fade walls with distance, alpha = DIMMING / distance
    #[arg(long)]
    dimming: Option<f32>,
}

impl Args {
    fn config(&self) -> Config {
        Config {
            tile_size: self.tile_size,
            fov: self.fov.to_radians(),
            collision: if self.slide {
                CollisionPolicy::Slide
            } else {
                CollisionPolicy::Reject
            },
            dimming: self.dimming,
            ..Config::default()
        }
    }

    fn grid(&self) -> anyhow::Result<TileGrid> {
        Ok(match &self.map {
            Some(path) => TileGrid::load(path, self.tile_size)
                .with_context(|| format!("could not load map {}", path.display()))?,
            None => TileGrid::default_map(self.tile_size).context("built-in map is invalid")?,
        })
    }
}

fn main() -> anyhow::Result<()> {
    pretty_env_logger::init_custom_env("GRIDCAST_LOG");
    let args = Args::parse();

    let grid = args.grid()?;
    let config = args.config();
    let center = Vec2::new(grid.width() / 2., grid.height() / 2.);
    let start = if grid.has_wall_at_vec(center) {
        Simulation::first_open_cell(&grid).context("map has no open cells")?
    } else {
        center
    };
    log::info!("initializing simulation");
    let sim = Simulation::with_viewer_at(grid, config, start, FRAC_PI_2)?;
    let (width, height) = sim.screen_size();

    // sdl boilerplate
    log::info!("initializing sdl2");
    let sdl_ctx = sdl2::init().ah()?;
    log::info!("initializing video");
    let video = sdl_ctx.video().ah()?;

    log::info!("initializing window");
    let mut window = video
        .window("gridcast", width as u32, height as u32)
        .position_centered()
        .build()?;
    window.set_resizable(false);
    log::info!("creating canvas");
    let canvas = window.into_canvas().build()?;
    log::info!("pumping events");
    let mut events = sdl_ctx.event_pump().ah()?;

    let mut game = Game::new(sim, canvas);
    let delta = Duration::from_millis(1_000 / config.target_fps);

    'main_loop: loop {
        let prev = Instant::now();

        for ev in events.poll_iter() {
            match ev {
                Event::Quit { .. } => break 'main_loop,
                Event::KeyDown {
                    keycode: Some(k),
                    repeat: false,
                    ..
                } => game.key_down(k),
                Event::KeyUp {
                    keycode: Some(k), ..
                } => game.key_up(k),
                _ => {}
            }
        }

        if game.game_state == GameState::Exit {
            break;
        }

        if let Err(err) = game.frame() {
            log::error!("error while in game state {:?}: {err}", game.game_state);
            Err(err)?;
        }
        game.screen.canvas.present();

        let diff = prev.elapsed();
        if diff < delta {
            std::thread::sleep(delta - diff);
        }
    }

    Ok(())
}
