/// Entities: Player and Ghost, plus the per-frame input record.
/// Both are plain data owned by the session; systems borrow them for
/// the duration of one update call.

use super::geom::Vec2;

/// Cosmetic color carried by entities; the renderer maps it to a
/// terminal color.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub struct Rgb {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

pub const PLAYER_A_COLOR: Rgb = Rgb { r: 253, g: 249, b: 0 };
pub const PLAYER_B_COLOR: Rgb = Rgb { r: 0, g: 228, b: 48 };

/// One stable color per ghost slot.
pub const GHOST_COLORS: [Rgb; 6] = [
    Rgb { r: 230, g: 70, b: 60 },
    Rgb { r: 255, g: 140, b: 0 },
    Rgb { r: 255, g: 105, b: 180 },
    Rgb { r: 80, g: 160, b: 255 },
    Rgb { r: 170, g: 90, b: 255 },
    Rgb { r: 60, g: 220, b: 120 },
];

#[derive(Clone, Debug)]
pub struct Player {
    /// Continuous pixel-space position.
    pub position: Vec2,
    /// Where captures teleport the player back to. Fixed at session reset.
    pub spawn_position: Vec2,
    pub radius: f32,
    /// Pixels per second.
    pub speed: f32,
    pub color: Rgb,
    pub lives: u32,
    pub score: u32,
    /// Seconds of capture immunity remaining; counts down to 0.
    pub invulnerable_secs: f32,
}

impl Player {
    pub fn new(radius: f32, speed: f32, color: Rgb) -> Self {
        Player {
            position: Vec2::ZERO,
            spawn_position: Vec2::ZERO,
            radius,
            speed,
            color,
            lives: 3,
            score: 0,
            invulnerable_secs: 0.0,
        }
    }
}

#[derive(Clone, Debug)]
pub struct Ghost {
    pub position: Vec2,
    pub radius: f32,
    /// Pixels per second; a fixed fraction of the player speed.
    pub speed: f32,
    pub color: Rgb,
    /// Last direction the pursuit picked. Zero until the first move;
    /// kept unchanged on frames where the ghost is boxed in.
    pub current_direction: Vec2,
}

impl Ghost {
    pub fn new(position: Vec2, radius: f32, speed: f32, color: Rgb) -> Self {
        Ghost {
            position,
            radius,
            speed,
            color,
            current_direction: Vec2::ZERO,
        }
    }
}

/// Input sampled once per frame by the host loop.
/// Directions have magnitude <= 1 (normalized or exact zero);
/// start/restart are edge-triggered.
#[derive(Clone, Copy, Debug, Default)]
pub struct FrameInput {
    pub dir_a: Vec2,
    pub dir_b: Vec2,
    pub start: bool,
    pub restart: bool,
}
