use crate::map::{Cell, TileGrid};
use crate::projector::ProjectedColumn;
use crate::ray::HitRecord;
use crate::viewer::Viewer;
use glam::Vec2;

/// length of the heading marker on the minimap, in world units
const HEADING_LENGTH: f32 = 30.;

#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub struct Rgba {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl Rgba {
    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b, a: 0xff }
    }

    pub const fn grey(level: u8, a: u8) -> Self {
        Self {
            r: level,
            g: level,
            b: level,
            a,
        }
    }
}

pub const PRIMARY: Rgba = Rgba::rgb(0x22, 0x22, 0x22);
pub const SECONDARY: Rgba = Rgba::rgb(0xff, 0xff, 0xff);
pub const MARKER: Rgba = Rgba::rgb(0xff, 0x00, 0x00);

/// drawing capabilities the engine needs from a window or surface
pub trait Canvas {
    type Error;

    fn clear(&mut self, color: Rgba) -> Result<(), Self::Error>;
    fn fill_rect(&mut self, x: f32, y: f32, w: f32, h: f32, color: Rgba)
        -> Result<(), Self::Error>;
    fn line(&mut self, from: Vec2, to: Vec2, color: Rgba) -> Result<(), Self::Error>;
    fn fill_circle(&mut self, center: Vec2, radius: f32, color: Rgba) -> Result<(), Self::Error>;
}

/// colour of a wall strip: grey at the strip's shade, faded by its alpha
pub fn strip_color(column: &ProjectedColumn) -> Rgba {
    Rgba::grey(column.shade, (column.alpha.clamp(0., 1.) * 255.).round() as u8)
}

/// clear the canvas and draw one 1px-wide strip per column, clipped to the
/// screen
pub fn draw_frame<C: Canvas>(
    canvas: &mut C,
    columns: &[ProjectedColumn],
    screen_height: usize,
) -> Result<(), C::Error> {
    canvas.clear(PRIMARY)?;

    let screen_height = screen_height as f32;
    for column in columns {
        let top = column.top.max(0.);
        let bottom = (column.top + column.height).min(screen_height);
        if bottom <= top {
            continue;
        }
        canvas.fill_rect(
            column.column as f32,
            top,
            1.,
            bottom - top,
            strip_color(column),
        )?;
    }

    Ok(())
}

/// overlay the map, the rays and the viewer, scaled down by `scale`
pub fn draw_minimap<C: Canvas>(
    canvas: &mut C,
    grid: &TileGrid,
    viewer: &Viewer,
    hits: &[HitRecord],
    scale: f32,
) -> Result<(), C::Error> {
    let tile = grid.tile_size() * scale;
    for (row, col, cell) in grid.iter_cells() {
        let origin = grid.cell_origin(row, col) * scale;
        let color = match cell {
            Cell::Wall => PRIMARY,
            Cell::Open => SECONDARY,
        };
        canvas.fill_rect(origin.x, origin.y, tile, tile, color)?;
    }

    let eye = viewer.pos * scale;
    for hit in hits.iter().filter(|hit| hit.is_hit()) {
        canvas.line(eye, hit.point * scale, MARKER)?;
    }

    canvas.fill_circle(eye, viewer.radius * scale, MARKER)?;
    canvas.line(
        eye,
        (viewer.pos + viewer.facing() * HEADING_LENGTH) * scale,
        MARKER,
    )?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ray::cast_from;

    #[derive(Clone, PartialEq, Debug)]
    enum Call {
        Clear(Rgba),
        Rect(f32, f32, f32, f32, Rgba),
        Line(Vec2, Vec2, Rgba),
        Circle(Vec2, f32, Rgba),
    }

    /// canvas that records every call
    #[derive(Default)]
    struct Recorder {
        calls: Vec<Call>,
    }

    impl Canvas for Recorder {
        type Error = std::convert::Infallible;

        fn clear(&mut self, color: Rgba) -> Result<(), Self::Error> {
            self.calls.push(Call::Clear(color));
            Ok(())
        }

        fn fill_rect(
            &mut self,
            x: f32,
            y: f32,
            w: f32,
            h: f32,
            color: Rgba,
        ) -> Result<(), Self::Error> {
            self.calls.push(Call::Rect(x, y, w, h, color));
            Ok(())
        }

        fn line(&mut self, from: Vec2, to: Vec2, color: Rgba) -> Result<(), Self::Error> {
            self.calls.push(Call::Line(from, to, color));
            Ok(())
        }

        fn fill_circle(&mut self, center: Vec2, radius: f32, color: Rgba) -> Result<(), Self::Error> {
            self.calls.push(Call::Circle(center, radius, color));
            Ok(())
        }
    }

    fn column(column: usize, height: f32, top: f32, shade: u8) -> ProjectedColumn {
        ProjectedColumn {
            column,
            height,
            top,
            shade,
            alpha: 1.,
        }
    }

    #[test]
    fn frame_strips_are_clipped() {
        let mut canvas = Recorder::default();
        let columns = [
            column(0, 100., 50., 255),
            column(1, 400., -100., 180),
            column(2, 0., 100., 255),
        ];
        draw_frame(&mut canvas, &columns, 200).unwrap();

        assert_eq!(
            canvas.calls,
            vec![
                Call::Clear(PRIMARY),
                Call::Rect(0., 50., 1., 100., Rgba::grey(255, 255)),
                Call::Rect(1., 0., 1., 200., Rgba::grey(180, 255)),
            ]
        );
    }

    #[test]
    fn strip_alpha_follows_dimming() {
        let mut faded = column(0, 10., 0., 255);
        faded.alpha = 0.5;
        assert_eq!(strip_color(&faded).a, 128);
    }

    #[test]
    fn minimap_draws_tiles_rays_and_viewer() {
        let grid = TileGrid::default_map(32.).unwrap();
        let viewer = Viewer::new(Vec2::new(240., 176.), 0., 2., 0.1);
        let hits = [
            cast_from(&grid, viewer.pos, 0.),
            HitRecord {
                point: Vec2::INFINITY,
                distance: f32::INFINITY,
                was_hit_vertical: true,
                angle: 1.,
            },
        ];
        let mut canvas = Recorder::default();
        draw_minimap(&mut canvas, &grid, &viewer, &hits, 0.5).unwrap();

        let rects = canvas
            .calls
            .iter()
            .filter(|call| matches!(call, Call::Rect(..)))
            .count();
        assert_eq!(rects, 11 * 15);

        let tail = &canvas.calls[rects..];
        assert_eq!(
            tail,
            &[
                Call::Line(Vec2::new(120., 88.), hits[0].point * 0.5, MARKER),
                Call::Circle(Vec2::new(120., 88.), 1.5, MARKER),
                Call::Line(Vec2::new(120., 88.), Vec2::new(135., 88.), MARKER),
            ]
        );
    }
}
