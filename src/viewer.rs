use crate::map::TileGrid;
use glam::Vec2;
use std::f32::consts::TAU;

/// wrap any finite angle into `[0, 2pi)`
pub fn normalize_angle(angle: f32) -> f32 {
    let wrapped = angle.rem_euclid(TAU);
    // rem_euclid rounds tiny negative inputs up to exactly TAU
    if wrapped >= TAU {
        0.
    } else {
        wrapped
    }
}

/// how a blocked step is resolved
#[derive(Clone, Copy, PartialEq, Eq, Debug, Default)]
pub enum CollisionPolicy {
    /// any wall at the destination cancels the whole step
    #[default]
    Reject,
    /// test and commit the x and y components separately
    Slide,
}

#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum Control {
    Forward,
    Backward,
    TurnLeft,
    TurnRight,
}

#[derive(Clone, Copy, PartialEq, Debug)]
pub struct Viewer {
    pub pos: Vec2,
    angle: f32,
    /// -1 turns left, +1 turns right
    pub turn: i8,
    /// -1 walks back, +1 walks forward
    pub walk: i8,
    pub move_speed: f32,
    pub rotation_speed: f32,
    /// only used to draw the minimap marker; walls see a point
    pub radius: f32,
    pub collision: CollisionPolicy,
}

impl Viewer {
    pub fn new(pos: Vec2, angle: f32, move_speed: f32, rotation_speed: f32) -> Self {
        Self {
            pos,
            angle: normalize_angle(angle),
            turn: 0,
            walk: 0,
            move_speed,
            rotation_speed,
            radius: 3.,
            collision: CollisionPolicy::Reject,
        }
    }

    pub fn with_collision(mut self, collision: CollisionPolicy) -> Self {
        self.collision = collision;
        self
    }

    /// facing angle, always in `[0, 2pi)`
    pub fn angle(&self) -> f32 {
        self.angle
    }

    /// unit vector along the facing angle
    pub fn facing(&self) -> Vec2 {
        Vec2::from_angle(self.angle)
    }

    fn step(&self) -> Vec2 {
        self.facing() * (self.walk as f32 * self.move_speed)
    }

    pub fn press(&mut self, control: Control) {
        match control {
            Control::Forward => self.walk = 1,
            Control::Backward => self.walk = -1,
            Control::TurnRight => self.turn = 1,
            Control::TurnLeft => self.turn = -1,
        }
    }

    pub fn release(&mut self, control: Control) {
        match control {
            Control::Forward | Control::Backward => self.walk = 0,
            Control::TurnLeft | Control::TurnRight => self.turn = 0,
        }
    }

    /// advance one tick: turn first, then try to step along the new heading
    pub fn update(&mut self, grid: &TileGrid) {
        self.angle = normalize_angle(self.angle + self.turn as f32 * self.rotation_speed);

        let step = self.step();
        if step == Vec2::ZERO {
            return;
        }

        match self.collision {
            CollisionPolicy::Reject => {
                let next = self.pos + step;
                if !grid.has_wall_at_vec(next) {
                    self.pos = next;
                }
            }
            CollisionPolicy::Slide => {
                if !grid.has_wall_at(self.pos.x + step.x, self.pos.y) {
                    self.pos.x += step.x;
                }
                if !grid.has_wall_at(self.pos.x, self.pos.y + step.y) {
                    self.pos.y += step.y;
                }
            }
        }
    }
}
