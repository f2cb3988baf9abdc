//! Scenario files: the starting state of a campaign, in YAML.

use rand::Rng;
use serde::{Deserialize, Serialize};
use sim_ai::{seed_back_catalog, seed_competitors};
use sim_core::{validate_world, Agency, Concept, Fandom, SimConfig, ValidationError, World};
use std::path::Path;
use thiserror::Error;
use tracing::info;

#[derive(Debug, Error)]
pub enum ScenarioError {
    #[error("cannot read scenario: {0}")]
    Io(#[from] std::io::Error),

    #[error("malformed scenario: {0}")]
    Parse(#[from] serde_yaml::Error),

    #[error("invalid starting world: {0}")]
    Invalid(#[from] ValidationError),
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Scenario {
    pub company_name: String,
    pub group_name: String,
    pub money: i64,
    /// Player fandom. Defaults to a small domestic fanbase.
    pub fandom: Option<Fandom>,
    pub trend: Concept,
    /// Explicit competitor roster; seeded when absent.
    pub agencies: Option<Vec<Agency>>,
    pub competitor_count: usize,
    pub back_catalog: usize,
    /// Trainees offered for free at the start.
    pub starting_trainees: usize,
    pub config: SimConfig,
}

impl Default for Scenario {
    fn default() -> Self {
        Self {
            company_name: "Dream Ent.".to_string(),
            group_name: "Rookies".to_string(),
            money: 50_000_000,
            fandom: None,
            trend: Concept::Cute,
            agencies: None,
            competitor_count: 5,
            back_catalog: 40,
            starting_trainees: 3,
            config: SimConfig::default(),
        }
    }
}

impl Scenario {
    pub fn from_yaml_str(s: &str) -> Result<Self, ScenarioError> {
        Ok(serde_yaml::from_str(s)?)
    }

    pub fn from_path(path: impl AsRef<Path>) -> Result<Self, ScenarioError> {
        let text = std::fs::read_to_string(path)?;
        Self::from_yaml_str(&text)
    }

    /// Build and validate the week-1 world.
    pub fn into_world<R: Rng + ?Sized>(&self, rng: &mut R) -> Result<World, ScenarioError> {
        let mut world = World::new(self.company_name.clone(), self.group_name.clone(), self.money);
        if let Some(f) = &self.fandom {
            world.fandom = f.clone();
        }
        world.current_trend = self.trend;
        world.agencies = match &self.agencies {
            Some(a) => a.clone(),
            None => seed_competitors(self.competitor_count, rng),
        };
        world.releases = seed_back_catalog(&world.agencies, self.back_catalog, rng);
        validate_world(&world)?;
        info!(
            company = %world.company_name,
            agencies = world.agencies.len(),
            catalog = world.releases.len(),
            "scenario loaded"
        );
        Ok(world)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;
    use sim_core::MarketFocus;

    #[test]
    fn empty_document_uses_defaults() {
        let s = Scenario::from_yaml_str("{}").unwrap();
        assert_eq!(s, Scenario::default());
    }

    #[test]
    fn partial_config_keeps_other_defaults() {
        let s = Scenario::from_yaml_str(
            r#"
company_name: Moonlight
money: 1000
trend: Dark
config:
  rng_seed: 99
  chart_size: 50
"#,
        )
        .unwrap();
        assert_eq!(s.company_name, "Moonlight");
        assert_eq!(s.money, 1000);
        assert_eq!(s.trend, Concept::Dark);
        assert_eq!(s.config.rng_seed, 99);
        assert_eq!(s.config.chart_size, 50);
        assert_eq!(s.config.physical_unit_price, 1500);
        assert_eq!(s.back_catalog, 40);
    }

    #[test]
    fn malformed_yaml_is_an_error() {
        let err = Scenario::from_yaml_str("money: [not, a, number]").unwrap_err();
        assert!(matches!(err, ScenarioError::Parse(_)));
    }

    #[test]
    fn seeded_world_is_populated() {
        let mut rng = ChaCha8Rng::seed_from_u64(5);
        let w = Scenario::default().into_world(&mut rng).unwrap();
        assert_eq!(w.week, 1);
        assert_eq!(w.agencies.len(), 5);
        assert_eq!(w.releases.len(), 40);
        assert_eq!(w.money, 50_000_000);
    }

    #[test]
    fn explicit_fandom_and_roster() {
        let s = Scenario::from_yaml_str(
            r#"
fandom:
  size: 12000
  name: Comets
  buying_power: 70
  streaming_power: 60
  loyalty: 80
  leaning: Global
agencies: []
back_catalog: 10
"#,
        )
        .unwrap();
        let mut rng = ChaCha8Rng::seed_from_u64(6);
        let w = s.into_world(&mut rng).unwrap();
        assert_eq!(w.fandom.size, 12000);
        assert_eq!(w.fandom.leaning, MarketFocus::Global);
        assert!(w.agencies.is_empty());
        // No artists, nothing to seed a catalog from.
        assert!(w.releases.is_empty());
    }

    #[test]
    fn invalid_fandom_is_rejected() {
        let s = Scenario {
            fandom: Some(Fandom {
                loyalty: 150,
                ..Fandom::neutral()
            }),
            ..Scenario::default()
        };
        let mut rng = ChaCha8Rng::seed_from_u64(7);
        assert!(matches!(s.into_world(&mut rng), Err(ScenarioError::Invalid(_))));
    }

    #[test]
    fn bundled_scenario_parses() {
        let text = include_str!("../../../assets/scenarios/default.yaml");
        let s = Scenario::from_yaml_str(text).unwrap();
        let mut rng = ChaCha8Rng::seed_from_u64(s.config.rng_seed);
        s.into_world(&mut rng).unwrap();
    }
}
