use macroquad::prelude::*;

/// Index into the simulation's species table. Ids are handed out by the
/// table at startup and stay valid for the whole run; the table is closed.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug)]
pub struct SpeciesId(pub usize);

/// Immutable growth parameters for one species.
#[derive(Clone, Debug)]
pub struct SpeciesDescriptor {
    pub name: &'static str,
    /// Radius gained per undominated, non-old year.
    pub growth_per_year: f32,
    /// Chance of surviving a year in the shade of a larger tree.
    pub shade_survival: f32,
    /// Chance of surviving a year after reaching max size.
    pub oldage_survival: f32,
    /// Radius at which the tree stops growing and old age begins.
    pub max_size: f32,
    /// Chance of producing one offspring in a growth year.
    pub offspring_probability: f32,
    /// Debug color for rendering.
    pub color: Color,
}

impl SpeciesDescriptor {
    fn validate(&self) -> Result<(), String> {
        for (label, p) in [
            ("shade_survival", self.shade_survival),
            ("oldage_survival", self.oldage_survival),
            ("offspring_probability", self.offspring_probability),
        ] {
            if !(0.0..=1.0).contains(&p) {
                return Err(format!(
                    "species '{}': {label} = {p} is outside [0, 1]",
                    self.name
                ));
            }
        }
        if !(self.growth_per_year > 0.0) {
            return Err(format!(
                "species '{}': growth_per_year = {} must be positive",
                self.name, self.growth_per_year
            ));
        }
        if !(self.max_size > 0.0) {
            return Err(format!(
                "species '{}': max_size = {} must be positive",
                self.name, self.max_size
            ));
        }
        Ok(())
    }
}

/// Closed species registry, populated once at startup and never mutated.
pub struct SpeciesTable {
    descriptors: Vec<SpeciesDescriptor>,
}

impl SpeciesTable {
    /// Build a table, rejecting any out-of-range descriptor up front.
    pub fn new(descriptors: Vec<SpeciesDescriptor>) -> Result<Self, String> {
        if descriptors.is_empty() {
            return Err("species table must register at least one species".to_string());
        }
        for desc in &descriptors {
            desc.validate()?;
        }
        Ok(Self { descriptors })
    }

    /// Look up a descriptor. A dangling id is a programming error and panics.
    pub fn get(&self, id: SpeciesId) -> &SpeciesDescriptor {
        &self.descriptors[id.0]
    }

    pub fn len(&self) -> usize {
        self.descriptors.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = (SpeciesId, &SpeciesDescriptor)> {
        self.descriptors
            .iter()
            .enumerate()
            .map(|(i, d)| (SpeciesId(i), d))
    }
}

/// The built-in forest: elm, palm and bush.
pub fn default_descriptors() -> Vec<SpeciesDescriptor> {
    vec![
        SpeciesDescriptor {
            name: "elm",
            growth_per_year: 0.2,
            shade_survival: 0.7,
            oldage_survival: 0.96,
            max_size: 7.0,
            offspring_probability: 0.4,
            color: Color::new(0.0, 0.55, 0.0, 0.78),
        },
        SpeciesDescriptor {
            name: "palm",
            growth_per_year: 0.6,
            shade_survival: 0.4,
            oldage_survival: 0.8,
            max_size: 7.0,
            offspring_probability: 0.5,
            color: Color::new(1.0, 0.65, 0.0, 0.78),
        },
        SpeciesDescriptor {
            name: "bush",
            growth_per_year: 0.75,
            shade_survival: 0.8,
            oldage_survival: 0.4,
            max_size: 3.0,
            offspring_probability: 0.8,
            color: Color::new(0.9, 0.1, 0.1, 0.78),
        },
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    fn valid_descriptor() -> SpeciesDescriptor {
        SpeciesDescriptor {
            name: "test",
            growth_per_year: 0.5,
            shade_survival: 0.5,
            oldage_survival: 0.5,
            max_size: 5.0,
            offspring_probability: 0.5,
            color: WHITE,
        }
    }

    #[test]
    fn default_table_validates() {
        let table = SpeciesTable::new(default_descriptors()).unwrap();
        assert_eq!(table.len(), 3);
        assert_eq!(table.get(SpeciesId(0)).name, "elm");
        assert_eq!(table.get(SpeciesId(2)).max_size, 3.0);
    }

    #[test]
    fn out_of_range_probability_is_rejected() {
        let mut desc = valid_descriptor();
        desc.shade_survival = 1.2;
        assert!(SpeciesTable::new(vec![desc]).is_err());

        let mut desc = valid_descriptor();
        desc.offspring_probability = -0.01;
        assert!(SpeciesTable::new(vec![desc]).is_err());
    }

    #[test]
    fn nonpositive_growth_or_size_is_rejected() {
        let mut desc = valid_descriptor();
        desc.growth_per_year = 0.0;
        assert!(SpeciesTable::new(vec![desc]).is_err());

        let mut desc = valid_descriptor();
        desc.max_size = -1.0;
        assert!(SpeciesTable::new(vec![desc]).is_err());
    }

    #[test]
    fn empty_table_is_rejected() {
        assert!(SpeciesTable::new(Vec::new()).is_err());
    }
}
