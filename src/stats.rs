use std::collections::VecDeque;

use crate::simulation::StepReport;

/// Bounded history of one metric, oldest samples evicted first.
pub struct History {
    samples: VecDeque<f32>,
    capacity: usize,
}

impl History {
    pub fn new(capacity: usize) -> Self {
        Self {
            samples: VecDeque::with_capacity(capacity),
            capacity,
        }
    }

    pub fn push(&mut self, value: f32) {
        if self.samples.len() == self.capacity {
            self.samples.pop_front();
        }
        self.samples.push_back(value);
    }

    /// Samples in chronological order.
    pub fn iter(&self) -> impl Iterator<Item = f32> + '_ {
        self.samples.iter().copied()
    }

    pub fn len(&self) -> usize {
        self.samples.len()
    }

    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    pub fn last(&self) -> Option<f32> {
        self.samples.back().copied()
    }
}

/// Per-step series backing the graphs panel.
pub struct SimStats {
    pub population: History,
    pub per_species: Vec<History>,
    pub births: History,
    pub deaths: History,
    pub mean_radius: History,
}

impl SimStats {
    pub fn new(species_count: usize, capacity: usize) -> Self {
        Self {
            population: History::new(capacity),
            per_species: (0..species_count).map(|_| History::new(capacity)).collect(),
            births: History::new(capacity),
            deaths: History::new(capacity),
            mean_radius: History::new(capacity),
        }
    }

    /// Record one step. `census` is the per-species tree count, indexed by
    /// `SpeciesId`, and must match the species count given at construction.
    pub fn record(&mut self, census: &[u32], mean_radius: f32, report: &StepReport) {
        let total: u32 = census.iter().sum();
        self.population.push(total as f32);
        for (series, &count) in self.per_species.iter_mut().zip(census) {
            series.push(count as f32);
        }
        self.births.push(report.births as f32);
        self.deaths.push(report.deaths() as f32);
        self.mean_radius.push(mean_radius);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn history_evicts_oldest_at_capacity() {
        let mut history = History::new(3);
        for v in [1.0, 2.0, 3.0, 4.0] {
            history.push(v);
        }
        assert_eq!(history.iter().collect::<Vec<_>>(), vec![2.0, 3.0, 4.0]);
        assert_eq!(history.last(), Some(4.0));
        assert_eq!(history.len(), 3);
    }

    #[test]
    fn record_tracks_population_and_per_species_counts() {
        let mut stats = SimStats::new(3, 8);
        let report = StepReport {
            births: 2,
            shade_deaths: 1,
            oldage_deaths: 1,
        };
        stats.record(&[5, 0, 7], 2.5, &report);

        assert_eq!(stats.population.last(), Some(12.0));
        assert_eq!(stats.per_species[0].last(), Some(5.0));
        assert_eq!(stats.per_species[1].last(), Some(0.0));
        assert_eq!(stats.per_species[2].last(), Some(7.0));
        assert_eq!(stats.births.last(), Some(2.0));
        assert_eq!(stats.deaths.last(), Some(2.0));
        assert_eq!(stats.mean_radius.last(), Some(2.5));
    }
}
