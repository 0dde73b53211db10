use anyhow::{Result, bail};

use crate::{Config, model::Location};

/// Read-only set of locations shown as markers on the map.
#[derive(Debug, Clone)]
pub struct LocationCatalog {
    locations: Vec<Location>,
}

impl LocationCatalog {
    /// Build a catalog, rejecting duplicate names (case-insensitive).
    pub fn new(locations: Vec<Location>) -> Result<Self> {
        for (i, loc) in locations.iter().enumerate() {
            if locations[..i].iter().any(|l| l.name.eq_ignore_ascii_case(&loc.name)) {
                bail!("Duplicate location '{}' in catalog", loc.name);
            }
        }
        Ok(Self { locations })
    }

    /// The built-in country markers.
    pub fn builtin() -> Self {
        Self { locations: builtin_locations() }
    }

    /// Built-in markers extended by `[[locations]]` from the config file.
    /// A configured entry replaces a built-in one with the same name.
    pub fn from_config(config: &Config) -> Result<Self> {
        let extra = Self::new(config.locations.clone())?;

        let mut locations: Vec<Location> = builtin_locations()
            .into_iter()
            .filter(|b| extra.find(&b.name).is_none())
            .collect();
        locations.extend(extra.locations);

        Ok(Self { locations })
    }

    pub fn find(&self, name: &str) -> Option<&Location> {
        let name = name.trim();
        self.locations.iter().find(|l| l.name.eq_ignore_ascii_case(name))
    }

    pub fn iter(&self) -> impl Iterator<Item = &Location> {
        self.locations.iter()
    }

    pub fn len(&self) -> usize {
        self.locations.len()
    }

    pub fn is_empty(&self) -> bool {
        self.locations.is_empty()
    }
}

fn builtin_locations() -> Vec<Location> {
    vec![
        Location::new("Norway", 60.472, 8.4689, 25),
        Location::new("Canada", 56.1304, -106.3468, 35),
        Location::new("Australia", -25.2744, 133.7751, 45),
        Location::new("Japan", 36.2048, 138.2529, 55),
        Location::new("Germany", 51.1657, 10.4515, 65),
        Location::new("India", 20.5937, 78.9629, 220),
        Location::new("China", 35.8617, 104.1954, 165),
        Location::new("United States", 37.0902, -95.7129, 110),
        Location::new("Azerbaijan", 40.1431, 47.5769, 95),
        Location::new("Brazil", -14.235, -51.9253, 85),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builtin_has_ten_unique_countries() {
        let catalog = LocationCatalog::builtin();
        assert_eq!(catalog.len(), 10);
        assert!(LocationCatalog::new(catalog.iter().cloned().collect()).is_ok());
    }

    #[test]
    fn find_is_case_insensitive() {
        let catalog = LocationCatalog::builtin();
        let norway = catalog.find("  norway ").expect("norway is built in");
        assert_eq!(norway, &Location::new("Norway", 60.472, 8.4689, 25));
        assert!(catalog.find("Atlantis").is_none());
    }

    #[test]
    fn duplicate_names_rejected() {
        let err = LocationCatalog::new(vec![
            Location::new("Chile", -35.6, -71.5, 60),
            Location::new("CHILE", -35.0, -71.0, 61),
        ])
        .unwrap_err();
        assert!(err.to_string().contains("Duplicate location"));
    }

    #[test]
    fn config_entries_extend_and_replace_builtin() {
        let mut cfg = Config::default();
        cfg.add_location(Location::new("Chile", -35.6751, -71.543, 60));
        cfg.add_location(Location::new("India", 20.5937, 78.9629, 180));

        let catalog = LocationCatalog::from_config(&cfg).expect("valid catalog");
        assert_eq!(catalog.len(), 11);
        assert_eq!(catalog.find("India").map(|l| l.baseline_aqi), Some(180));
        assert!(catalog.find("Chile").is_some());
    }
}
