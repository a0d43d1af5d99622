use crate::map::TileGrid;
use crate::ray::{cast, HitRecord};
use crate::viewer::{normalize_angle, Viewer};

/// angle of ray `index` out of `num_rays` spread across `fov`
pub fn ray_angle(viewer_angle: f32, fov: f32, index: usize, num_rays: usize) -> f32 {
    normalize_angle(viewer_angle - fov / 2. + index as f32 * (fov / num_rays as f32))
}

/// cast one ray per screen column, left to right across the field of view
pub fn cast_all(grid: &TileGrid, viewer: &Viewer, fov: f32, num_rays: usize) -> Vec<HitRecord> {
    (0..num_rays)
        .map(|i| cast(grid, viewer, ray_angle(viewer.angle(), fov, i, num_rays)))
        .collect()
}
