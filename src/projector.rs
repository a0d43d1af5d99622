use crate::ray::HitRecord;
use crate::viewer::Viewer;

/// shade for strips whose wall was hit on a vertical grid line
pub const VERTICAL_SHADE: u8 = 255;
/// shade for strips hit on a horizontal grid line
pub const HORIZONTAL_SHADE: u8 = 180;

/// floor for corrected distances, keeps a viewer touching a wall finite
pub const MIN_DISTANCE: f32 = 1e-4;

/// one wall strip in screen space
#[derive(Clone, Copy, PartialEq, Debug)]
pub struct ProjectedColumn {
    pub column: usize,
    pub height: f32,
    /// y of the strip's top edge; negative when the strip overflows the screen
    pub top: f32,
    pub shade: u8,
    /// 1.0 unless distance dimming is on
    pub alpha: f32,
}

/// optional projection tweaks
#[derive(Clone, Copy, PartialEq, Debug, Default)]
pub struct Projection {
    /// fade strips with `alpha = dimming / distance`
    pub dimming: Option<f32>,
}

/// radial distance turned into distance from the projection plane
pub fn corrected_distance(distance: f32, ray_angle: f32, viewer_angle: f32) -> f32 {
    distance * (ray_angle - viewer_angle).cos()
}

/// distance from the eye to a plane `screen_width` pixels wide spanning `fov`
pub fn plane_distance(fov: f32, screen_width: f32) -> f32 {
    (screen_width / 2.) / (fov / 2.).tan()
}

pub fn strip_height(tile_size: f32, corrected: f32, plane: f32) -> f32 {
    tile_size / corrected.max(MIN_DISTANCE) * plane
}

pub fn project(
    hits: &[HitRecord],
    viewer: &Viewer,
    fov: f32,
    screen_width: usize,
    screen_height: usize,
    tile_size: f32,
) -> Vec<ProjectedColumn> {
    project_with(
        hits,
        viewer,
        fov,
        screen_width,
        screen_height,
        tile_size,
        Projection::default(),
    )
}

pub fn project_with(
    hits: &[HitRecord],
    viewer: &Viewer,
    fov: f32,
    screen_width: usize,
    screen_height: usize,
    tile_size: f32,
    projection: Projection,
) -> Vec<ProjectedColumn> {
    let plane = plane_distance(fov, screen_width as f32);
    let half_screen = screen_height as f32 / 2.;

    hits.iter()
        .enumerate()
        .map(|(column, hit)| {
            let corrected = corrected_distance(hit.distance, hit.angle, viewer.angle());
            let height = strip_height(tile_size, corrected, plane);
            let alpha = match projection.dimming {
                Some(k) => (k / corrected.max(MIN_DISTANCE)).clamp(0., 1.),
                None => 1.,
            };

            ProjectedColumn {
                column,
                height,
                top: half_screen - height / 2.,
                shade: if hit.was_hit_vertical {
                    VERTICAL_SHADE
                } else {
                    HORIZONTAL_SHADE
                },
                alpha,
            }
        })
        .collect()
}
