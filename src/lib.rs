//! grid ray casting: cast a fan of rays across a tile map and turn the hit
//! distances into perspective-corrected wall strips
//!
//! ```text
//! Viewer::update -> fan::cast_all -> projector::project -> render::draw_frame
//! ```

pub mod config;
pub mod fan;
pub mod map;
pub mod projector;
pub mod ray;
pub mod render;
pub mod sim;
pub mod viewer;

pub use config::{Config, ConfigError};
pub use map::{Cell, MapError, TileGrid};
pub use projector::ProjectedColumn;
pub use ray::HitRecord;
pub use sim::{Frame, Simulation};
pub use viewer::{CollisionPolicy, Control, Viewer};

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error(transparent)]
    Map(#[from] MapError),

    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error("map tile size {map} does not match configured tile size {config}")]
    TileSizeMismatch { map: f32, config: f32 },

    #[error("viewer start {0} is inside a wall")]
    StartInWall(glam::Vec2),
}
