use crate::map::TILE_SIZE;
use crate::viewer::CollisionPolicy;
use std::f32::consts::PI;

/// startup constants, fixed once the simulation is running
#[derive(Clone, Copy, PartialEq, Debug)]
pub struct Config {
    pub tile_size: f32,
    /// horizontal field of view, radians
    pub fov: f32,
    pub move_speed: f32,
    /// radians per tick
    pub rotation_speed: f32,
    pub collision: CollisionPolicy,
    /// distance dimming factor, off unless set
    pub dimming: Option<f32>,
    pub minimap_scale: f32,
    pub target_fps: u64,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            tile_size: TILE_SIZE,
            fov: 60f32.to_radians(),
            move_speed: 2.,
            rotation_speed: 2f32.to_radians(),
            collision: CollisionPolicy::Reject,
            dimming: None,
            minimap_scale: 0.2,
            target_fps: 30,
        }
    }
}

#[derive(Debug, thiserror::Error, PartialEq)]
pub enum ConfigError {
    #[error("field of view must lie strictly between 0 and pi radians, got {0}")]
    Fov(f32),

    #[error("tile size must be a positive finite number, got {0}")]
    TileSize(f32),

    #[error("{name} must be a non-negative finite number, got {value}")]
    Speed { name: &'static str, value: f32 },

    #[error("dimming factor must be positive and finite, got {0}")]
    Dimming(f32),

    #[error("minimap scale must be positive, got {0}")]
    MinimapScale(f32),

    #[error("target fps must be non-zero")]
    TargetFps,
}

impl Config {
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !(self.fov > 0. && self.fov < PI) {
            return Err(ConfigError::Fov(self.fov));
        }
        if !self.tile_size.is_finite() || self.tile_size <= 0. {
            return Err(ConfigError::TileSize(self.tile_size));
        }
        for (name, value) in [
            ("move speed", self.move_speed),
            ("rotation speed", self.rotation_speed),
        ] {
            if !value.is_finite() || value < 0. {
                return Err(ConfigError::Speed { name, value });
            }
        }
        if let Some(k) = self.dimming {
            if !k.is_finite() || k <= 0. {
                return Err(ConfigError::Dimming(k));
            }
        }
        if !(self.minimap_scale > 0.) {
            return Err(ConfigError::MinimapScale(self.minimap_scale));
        }
        if self.target_fps == 0 {
            return Err(ConfigError::TargetFps);
        }

        Ok(())
    }
}
