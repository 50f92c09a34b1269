use macroquad::prelude::*;
use ::rand::Rng;

/// Hard-bounded rectangular world `[0,0] x [width,height]`.
pub struct Arena {
    pub width: f32,
    pub height: f32,
}

impl Arena {
    pub fn new(width: f32, height: f32) -> Self {
        Self { width, height }
    }

    pub fn bounds(&self) -> Rect {
        Rect::new(0.0, 0.0, self.width, self.height)
    }

    /// True if `pos` lies inside the arena. Edges count as inside.
    pub fn contains(&self, pos: Vec2) -> bool {
        pos.x >= 0.0 && pos.x <= self.width && pos.y >= 0.0 && pos.y <= self.height
    }

    /// Uniform random point over the arena.
    pub fn random_point(&self, rng: &mut impl Rng) -> Vec2 {
        vec2(
            rng.gen_range(0.0..self.width),
            rng.gen_range(0.0..self.height),
        )
    }
}
