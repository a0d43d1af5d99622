use crate::map::TileGrid;
use crate::viewer::{normalize_angle, Viewer};
use glam::Vec2;
use std::f32::consts::{FRAC_PI_2, PI};

/// below this, a ray counts as parallel to a family of grid lines
pub const PARALLEL_EPSILON: f32 = 1e-6;

/// how far a crossing is pushed into the cell the ray is entering
pub const NUDGE: f32 = 1.;

/// a ray angle plus the half-plane flags that fix its step signs
#[derive(Clone, Copy, PartialEq, Debug)]
pub struct Ray {
    angle: f32,
    sin: f32,
    cos: f32,
    facing_down: bool,
    facing_right: bool,
}

impl Ray {
    pub fn new(angle: f32) -> Self {
        let angle = normalize_angle(angle);
        // snap near-axis components so axis rays stay on their grid line
        let snap = |v: f32| if v.abs() < PARALLEL_EPSILON { 0. } else { v };
        let (sin, cos) = angle.sin_cos();
        Self {
            angle,
            sin: snap(sin),
            cos: snap(cos),
            facing_down: angle > 0. && angle < PI,
            facing_right: angle < FRAC_PI_2 || angle > 3. * FRAC_PI_2,
        }
    }

    pub fn angle(&self) -> f32 {
        self.angle
    }

    pub fn facing_down(&self) -> bool {
        self.facing_down
    }

    pub fn facing_up(&self) -> bool {
        !self.facing_down
    }

    pub fn facing_right(&self) -> bool {
        self.facing_right
    }

    pub fn facing_left(&self) -> bool {
        !self.facing_right
    }
}

/// which family of grid lines a crossing sits on
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum Crossing {
    /// lines of constant y
    Horizontal,
    /// lines of constant x
    Vertical,
}

#[derive(Clone, Copy, PartialEq, Debug)]
pub struct HitRecord {
    pub point: Vec2,
    /// euclidean distance from the ray origin, infinite when nothing was hit
    pub distance: f32,
    pub was_hit_vertical: bool,
    pub angle: f32,
}

impl HitRecord {
    pub fn is_hit(&self) -> bool {
        self.distance.is_finite()
    }
}

/// offset between successive horizontal-line crossings, or `None` when the
/// ray never crosses a horizontal line
pub fn horizontal_step(ray: &Ray, tile_size: f32) -> Option<Vec2> {
    let Ray { sin, cos, .. } = *ray;
    if sin == 0. {
        return None;
    }

    let dy = if ray.facing_down { tile_size } else { -tile_size };
    let mut dx = tile_size * cos / sin;
    // dx must point the way the ray faces horizontally
    if (ray.facing_left() && dx > 0.) || (ray.facing_right && dx < 0.) {
        dx = -dx;
    }

    Some(Vec2::new(dx, dy))
}

/// offset between successive vertical-line crossings, or `None` when the ray
/// never crosses a vertical line
pub fn vertical_step(ray: &Ray, tile_size: f32) -> Option<Vec2> {
    let Ray { sin, cos, .. } = *ray;
    if cos == 0. {
        return None;
    }

    let dx = if ray.facing_right { tile_size } else { -tile_size };
    let mut dy = tile_size * sin / cos;
    // dy must point the way the ray faces vertically
    if (ray.facing_up() && dy > 0.) || (ray.facing_down && dy < 0.) {
        dy = -dy;
    }

    Some(Vec2::new(dx, dy))
}

/// point to test for a crossing so it lands in the cell the ray enters.
/// grid lines belong to the cell below/right, so only rays heading up or left
/// get moved
pub fn sample_point(crossing: Crossing, point: Vec2, ray: &Ray) -> Vec2 {
    match crossing {
        Crossing::Horizontal if ray.facing_up() => point - Vec2::Y * NUDGE,
        Crossing::Vertical if ray.facing_left() => point - Vec2::X * NUDGE,
        _ => point,
    }
}

fn first_crossing(crossing: Crossing, origin: Vec2, ray: &Ray, tile_size: f32) -> Vec2 {
    let Ray { sin, cos, .. } = *ray;
    match crossing {
        Crossing::Horizontal => {
            let mut y = (origin.y / tile_size).floor() * tile_size;
            if ray.facing_down {
                y += tile_size;
            }
            Vec2::new(origin.x + (y - origin.y) * cos / sin, y)
        }
        Crossing::Vertical => {
            let mut x = (origin.x / tile_size).floor() * tile_size;
            if ray.facing_right {
                x += tile_size;
            }
            Vec2::new(x, origin.y + (x - origin.x) * sin / cos)
        }
    }
}

/// walk one family of crossings until a wall is sampled or the walk leaves
/// the world
fn find_wall(grid: &TileGrid, crossing: Crossing, origin: Vec2, ray: &Ray) -> Option<Vec2> {
    let tile_size = grid.tile_size();
    let step = match crossing {
        Crossing::Horizontal => horizontal_step(ray, tile_size),
        Crossing::Vertical => vertical_step(ray, tile_size),
    }?;

    let (width, height) = (grid.width(), grid.height());
    let mut next = first_crossing(crossing, origin, ray, tile_size);
    while (0. ..=width).contains(&next.x) && (0. ..=height).contains(&next.y) {
        if grid.has_wall_at_vec(sample_point(crossing, next, ray)) {
            return Some(next);
        }
        next += step;
    }

    None
}

/// pick the nearer of the two candidates; ties go to the vertical one
fn resolve(
    origin: Vec2,
    horizontal: Option<Vec2>,
    vertical: Option<Vec2>,
    ray: &Ray,
) -> HitRecord {
    let distance_to = |hit: Option<Vec2>| hit.map_or(f32::INFINITY, |p| origin.distance(p));
    let (horz_distance, vert_distance) = (distance_to(horizontal), distance_to(vertical));

    let was_hit_vertical = vert_distance <= horz_distance;
    let (point, distance) = if was_hit_vertical {
        (vertical, vert_distance)
    } else {
        (horizontal, horz_distance)
    };

    HitRecord {
        point: point.unwrap_or(Vec2::INFINITY),
        distance,
        was_hit_vertical,
        angle: ray.angle,
    }
}

/// cast a single ray from an arbitrary origin
pub fn cast_from(grid: &TileGrid, origin: Vec2, angle: f32) -> HitRecord {
    let ray = Ray::new(angle);
    let horizontal = find_wall(grid, Crossing::Horizontal, origin, &ray);
    let vertical = find_wall(grid, Crossing::Vertical, origin, &ray);
    resolve(origin, horizontal, vertical, &ray)
}

/// cast a single ray from the viewer's position
pub fn cast(grid: &TileGrid, viewer: &Viewer, angle: f32) -> HitRecord {
    cast_from(grid, viewer.pos, angle)
}
