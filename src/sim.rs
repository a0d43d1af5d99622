use crate::config::Config;
use crate::fan::cast_all;
use crate::map::{Cell, TileGrid};
use crate::projector::{project_with, ProjectedColumn, Projection};
use crate::ray::HitRecord;
use crate::viewer::Viewer;
use crate::Error;
use glam::Vec2;

/// one frame's worth of engine output
#[derive(Clone, PartialEq, Debug, Default)]
pub struct Frame {
    pub hits: Vec<HitRecord>,
    pub columns: Vec<ProjectedColumn>,
}

/// owns the map, the viewer and the startup constants
#[derive(Clone, PartialEq, Debug)]
pub struct Simulation {
    pub grid: TileGrid,
    pub viewer: Viewer,
    pub config: Config,
}

impl Simulation {
    /// validate `config` and place the viewer at the centre of the world,
    /// facing `angle`
    pub fn new(grid: TileGrid, config: Config, angle: f32) -> Result<Self, Error> {
        let start = Vec2::new(grid.width() / 2., grid.height() / 2.);
        Self::with_viewer_at(grid, config, start, angle)
    }

    pub fn with_viewer_at(
        grid: TileGrid,
        config: Config,
        pos: Vec2,
        angle: f32,
    ) -> Result<Self, Error> {
        config.validate()?;
        if grid.tile_size() != config.tile_size {
            return Err(Error::TileSizeMismatch {
                map: grid.tile_size(),
                config: config.tile_size,
            });
        }
        if grid.has_wall_at_vec(pos) {
            return Err(Error::StartInWall(pos));
        }

        let viewer = Viewer::new(pos, angle, config.move_speed, config.rotation_speed)
            .with_collision(config.collision);
        log::info!(
            "simulation ready: {}x{} map, viewer at {} facing {:.3} rad",
            grid.rows(),
            grid.cols(),
            viewer.pos,
            viewer.angle()
        );

        Ok(Self {
            grid,
            viewer,
            config,
        })
    }

    /// screen size in pixels: one pixel per world unit
    pub fn screen_size(&self) -> (usize, usize) {
        (self.grid.width() as usize, self.grid.height() as usize)
    }

    /// cast and project from the current pose without moving
    pub fn render(&self) -> Frame {
        let (width, height) = self.screen_size();
        // one ray per pixel column, strip i is drawn at x = i
        let hits = cast_all(&self.grid, &self.viewer, self.config.fov, width);
        let columns = project_with(
            &hits,
            &self.viewer,
            self.config.fov,
            width,
            height,
            self.grid.tile_size(),
            Projection {
                dimming: self.config.dimming,
            },
        );

        Frame { hits, columns }
    }

    /// advance the viewer one tick, then render
    pub fn tick(&mut self) -> Frame {
        self.viewer.update(&self.grid);
        let frame = self.render();
        log::trace!(
            "tick: pos {} angle {:.3}, {} columns",
            self.viewer.pos,
            self.viewer.angle(),
            frame.columns.len()
        );
        frame
    }

    /// centre of the first open cell in reading order
    pub fn first_open_cell(grid: &TileGrid) -> Option<Vec2> {
        let (row, col, _) = grid.iter_cells().find(|(_, _, cell)| *cell == Cell::Open)?;
        Some(grid.cell_origin(row, col) + Vec2::splat(grid.tile_size() / 2.))
    }
}
