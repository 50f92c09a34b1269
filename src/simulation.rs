use ::rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

use crate::arena::Arena;
use crate::config;
use crate::quadtree::Quadtree;
use crate::species::{SpeciesId, SpeciesTable};
use crate::tree::Tree;

/// Outcome tallies from one step, fed to the stats layer.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct StepReport {
    pub births: u32,
    pub shade_deaths: u32,
    pub oldage_deaths: u32,
}

impl StepReport {
    pub fn deaths(&self) -> u32 {
        self.shade_deaths + self.oldage_deaths
    }
}

pub struct SimState {
    pub species: SpeciesTable,
    pub arena: Arena,
    trees: Vec<Tree>,
    quadtree: Quadtree,
    initial_count: usize,
    pub rng: ChaCha8Rng,
    pub step_count: u64,
    pub paused: bool,
    pub speed_multiplier: f32,
}

impl SimState {
    /// Build a simulator and seed its first generation. Fails fast when the
    /// arena is too small for some species' offspring sampling annulus.
    pub fn new(
        species: SpeciesTable,
        arena: Arena,
        initial_count: usize,
        seed: u64,
    ) -> Result<Self, String> {
        validate_spawn_geometry(&species, &arena)?;

        let quadtree = Quadtree::new(arena.bounds());
        let mut sim = Self {
            species,
            arena,
            trees: Vec::new(),
            quadtree,
            initial_count,
            rng: ChaCha8Rng::seed_from_u64(seed),
            step_count: 0,
            paused: true,
            speed_multiplier: 1.0,
        };
        sim.reset();
        Ok(sim)
    }

    /// Read-only view of the current generation, for rendering and stats.
    pub fn trees(&self) -> &[Tree] {
        &self.trees
    }

    /// Live tree count per species, indexed by `SpeciesId`.
    pub fn species_census(&self) -> Vec<u32> {
        let mut census = vec![0u32; self.species.len()];
        for tree in &self.trees {
            census[tree.species.0] += 1;
        }
        census
    }

    pub fn mean_radius(&self) -> f32 {
        if self.trees.is_empty() {
            return 0.0;
        }
        self.trees.iter().map(|t| t.radius).sum::<f32>() / self.trees.len() as f32
    }

    /// Reseed the population: the configured tree count, species uniform
    /// over the table, positions uniform over the arena, all at radius 1.
    pub fn reset(&mut self) {
        self.trees.clear();
        self.quadtree.clear();
        self.step_count = 0;

        for _ in 0..self.initial_count {
            let species = SpeciesId(self.rng.gen_range(0..self.species.len()));
            let pos = self.arena.random_point(&mut self.rng);
            admit(&mut self.trees, &mut self.quadtree, Tree::new(species, pos));
        }
    }

    /// Advance one generation: dominance resolution over the frozen current
    /// population, then the per-tree production rules building the next
    /// generation (and its index) into fresh storage, swapped in at the end.
    pub fn step(&mut self) -> StepReport {
        self.resolve_dominance();

        let mut report = StepReport::default();
        let mut next_trees = Vec::with_capacity(self.trees.len());
        let mut next_quadtree = Quadtree::new(self.arena.bounds());

        for mut tree in std::mem::take(&mut self.trees) {
            let species = self.species.get(tree.species);
            // Fresh independent draws for every tree, every step.
            let shade_survives = self.rng.gen::<f32>() < species.shade_survival;
            let oldage_survives = self.rng.gen::<f32>() < species.oldage_survival;
            let offspring_drawn = self.rng.gen::<f32>() < species.offspring_probability;

            if tree.dominated && shade_survives {
                admit(&mut next_trees, &mut next_quadtree, tree);
            } else if tree.dominated {
                report.shade_deaths += 1;
            } else if tree.is_old(species) && oldage_survives {
                admit(&mut next_trees, &mut next_quadtree, tree);
            } else if tree.is_old(species) {
                report.oldage_deaths += 1;
            } else {
                // Sample before growing: the annulus uses this year's radius.
                let seedling = offspring_drawn.then(|| {
                    Tree::new(tree.species, tree.offspring_point(&self.arena, &mut self.rng))
                });
                tree.grow(species);
                admit(&mut next_trees, &mut next_quadtree, tree);
                if let Some(seedling) = seedling {
                    report.births += 1;
                    admit(&mut next_trees, &mut next_quadtree, seedling);
                }
            }
        }

        self.trees = next_trees;
        self.quadtree = next_quadtree;
        self.step_count += 1;
        report
    }

    /// Phase A: mark the smaller tree of every overlapping pair. A pure
    /// read of start-of-step radii; marks are buffered and applied after
    /// the scan.
    fn resolve_dominance(&mut self) {
        let mut dominated = vec![false; self.trees.len()];

        for (idx, tree) in self.trees.iter().enumerate() {
            for other_idx in self.quadtree.retrieve(tree.bounding_box()) {
                let other_idx = other_idx as usize;
                if other_idx == idx {
                    continue;
                }
                let other = &self.trees[other_idx];
                if !tree.intersects(other) {
                    continue;
                }
                if tree.radius < other.radius {
                    dominated[idx] = true;
                } else if other.radius < tree.radius {
                    dominated[other_idx] = true;
                } else {
                    // Equal radii: the earlier slot shades the later one.
                    dominated[idx.max(other_idx)] = true;
                }
            }
        }

        for (tree, flag) in self.trees.iter_mut().zip(dominated) {
            tree.dominated = flag;
        }
    }
}

fn admit(trees: &mut Vec<Tree>, quadtree: &mut Quadtree, tree: Tree) {
    quadtree.insert(trees.len() as u32, tree.bounding_box());
    trees.push(tree);
}

/// Offspring sampling must be able to land in-bounds for any in-bounds
/// parent: the outer spawn distance of every species has to fit within both
/// arena dimensions. Reproduction only happens before old age, so the
/// sampling radius never exceeds max size.
fn validate_spawn_geometry(species: &SpeciesTable, arena: &Arena) -> Result<(), String> {
    for (_, desc) in species.iter() {
        let outer = desc.max_size * config::SPAWN_DIST_MAX;
        if outer > arena.width || outer > arena.height {
            return Err(format!(
                "species '{}': offspring spawn distance {outer} does not fit \
                 the {}x{} arena",
                desc.name, arena.width, arena.height
            ));
        }
    }
    Ok(())
}
