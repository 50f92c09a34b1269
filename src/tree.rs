use macroquad::prelude::*;
use ::rand::Rng;

use crate::arena::Arena;
use crate::config;
use crate::species::{SpeciesDescriptor, SpeciesId};

/// One tree: a circle that never moves, growing until shaded out or old.
#[derive(Clone, Debug)]
pub struct Tree {
    pub species: SpeciesId,
    pub pos: Vec2,
    pub radius: f32,
    /// Set during dominance resolution when a larger tree overlaps this one.
    /// Cleared at the start of every step.
    pub dominated: bool,
}

impl Tree {
    pub fn new(species: SpeciesId, pos: Vec2) -> Self {
        Self {
            species,
            pos,
            radius: config::INITIAL_RADIUS,
            dominated: false,
        }
    }

    /// Circle overlap test; tangency counts, with a small epsilon to absorb
    /// float error at exact touch distance.
    pub fn intersects(&self, other: &Tree) -> bool {
        let dist_sq = (self.pos - other.pos).length_squared();
        let reach = self.radius + other.radius;
        dist_sq - reach * reach < config::INTERSECT_EPSILON
    }

    /// One year of growth. Frozen once the radius has reached the species'
    /// max size; the final growth year may overshoot it by less than one
    /// increment.
    pub fn grow(&mut self, species: &SpeciesDescriptor) {
        if self.radius < species.max_size {
            self.radius += species.growth_per_year;
        }
    }

    pub fn is_old(&self, species: &SpeciesDescriptor) -> bool {
        self.radius >= species.max_size
    }

    /// Axis-aligned bounding box of the crown, the quadtree insertion key.
    pub fn bounding_box(&self) -> Rect {
        Rect::new(
            self.pos.x - self.radius,
            self.pos.y - self.radius,
            self.radius * 2.0,
            self.radius * 2.0,
        )
    }

    /// Candidate position for a seedling: distance uniform in
    /// `[3r, 4r]`, direction uniform, redrawn until it lands in the arena.
    /// Termination relies on the spawn-geometry check done at sim
    /// construction (the annulus of any in-bounds parent reaches into the
    /// arena).
    pub fn offspring_point(&self, arena: &Arena, rng: &mut impl Rng) -> Vec2 {
        loop {
            let dist = rng.gen_range(
                self.radius * config::SPAWN_DIST_MIN..self.radius * config::SPAWN_DIST_MAX,
            );
            let angle = rng.gen_range(0.0..std::f32::consts::TAU);
            let point = self.pos + Vec2::from_angle(angle) * dist;
            if arena.contains(point) {
                return point;
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::species::SpeciesDescriptor;
    use ::rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    fn test_species() -> SpeciesDescriptor {
        SpeciesDescriptor {
            name: "test",
            growth_per_year: 1.0,
            shade_survival: 1.0,
            oldage_survival: 1.0,
            max_size: 15.0,
            offspring_probability: 0.0,
            color: WHITE,
        }
    }

    fn tree_at(x: f32, y: f32, radius: f32) -> Tree {
        let mut tree = Tree::new(SpeciesId(0), vec2(x, y));
        tree.radius = radius;
        tree
    }

    #[test]
    fn overlapping_circles_intersect() {
        let a = tree_at(0.0, 0.0, 1.0);
        let b = tree_at(0.5, 0.0, 1.0);
        assert!(a.intersects(&b));
        assert!(b.intersects(&a));
    }

    #[test]
    fn tangency_counts_as_intersection() {
        let a = tree_at(0.0, 0.0, 1.0);
        let b = tree_at(2.0, 0.0, 1.0);
        assert!(a.intersects(&b));
    }

    #[test]
    fn separated_circles_do_not_intersect() {
        let a = tree_at(0.0, 0.0, 1.0);
        let b = tree_at(2.1, 0.0, 1.0);
        assert!(!a.intersects(&b));
    }

    #[test]
    fn growth_freezes_at_max_size() {
        let species = test_species();
        let mut tree = tree_at(0.0, 0.0, config::INITIAL_RADIUS);

        for _ in 0..14 {
            assert!(!tree.is_old(&species));
            tree.grow(&species);
        }
        assert_eq!(tree.radius, 15.0);
        assert!(tree.is_old(&species));

        tree.grow(&species);
        assert_eq!(tree.radius, 15.0);
    }

    #[test]
    fn offspring_points_land_in_the_annulus() {
        let arena = Arena::new(800.0, 800.0);
        let mut rng = ChaCha8Rng::seed_from_u64(3);
        let parent = tree_at(400.0, 400.0, 5.0);

        for _ in 0..500 {
            let point = parent.offspring_point(&arena, &mut rng);
            let dist = (point - parent.pos).length();
            assert!(dist >= 5.0 * config::SPAWN_DIST_MIN - 1e-3);
            assert!(dist <= 5.0 * config::SPAWN_DIST_MAX + 1e-3);
            assert!(arena.contains(point));
        }
    }

    #[test]
    fn corner_parent_still_finds_in_bounds_points() {
        let arena = Arena::new(800.0, 800.0);
        let mut rng = ChaCha8Rng::seed_from_u64(11);
        let parent = tree_at(1.0, 1.0, 6.0);

        for _ in 0..200 {
            let point = parent.offspring_point(&arena, &mut rng);
            assert!(arena.contains(point));
        }
    }

    #[test]
    fn bounding_box_covers_the_crown() {
        let tree = tree_at(10.0, 20.0, 3.0);
        let bbox = tree.bounding_box();
        assert_eq!(bbox, Rect::new(7.0, 17.0, 6.0, 6.0));
    }
}
