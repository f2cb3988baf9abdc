//! Weekly economic settlement for the player's agency.

use rust_decimal::prelude::ToPrimitive;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use sim_core::{Release, SimConfig};

use crate::EconError;

/// Breakdown of one week's cash movement.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Settlement {
    pub physical_revenue: i64,
    pub streaming_revenue: i64,
    pub maintenance: i64,
}

impl Settlement {
    pub fn net(&self) -> i64 {
        self.physical_revenue + self.streaming_revenue - self.maintenance
    }
}

/// Physical revenue from player releases launching exactly this week.
pub fn physical_revenue(releases: &[Release], week: i32, unit_price: i64) -> i64 {
    releases
        .iter()
        .filter(|r| r.is_player() && r.age(week) == 0)
        .map(|r| r.stats.weekly_physical as i64 * unit_price)
        .sum()
}

/// Domestic plus global streams across all player releases this week.
pub fn player_weekly_streams(releases: &[Release]) -> u64 {
    releases
        .iter()
        .filter(|r| r.is_player())
        .map(|r| r.stats.weekly_streams_domestic + r.stats.weekly_streams_global)
        .sum()
}

/// Royalty on `streams` at `rate`, floored to whole currency units.
pub fn streaming_royalty(streams: u64, rate: Decimal) -> Result<i64, EconError> {
    if rate < Decimal::ZERO {
        return Err(EconError::InvalidRate);
    }
    (Decimal::from(streams) * rate)
        .floor()
        .to_i64()
        .ok_or(EconError::Overflow)
}

/// Fixed base cost plus a per-member surcharge.
pub fn maintenance(cfg: &SimConfig, members: usize) -> i64 {
    cfg.base_maintenance + cfg.maintenance_per_member * members as i64
}

/// Settle a week: revenue from player releases minus running costs.
pub fn settle_week(
    releases: &[Release],
    week: i32,
    members: usize,
    cfg: &SimConfig,
) -> Result<Settlement, EconError> {
    Ok(Settlement {
        physical_revenue: physical_revenue(releases, week, cfg.physical_unit_price),
        streaming_revenue: streaming_royalty(player_weekly_streams(releases), cfg.stream_royalty)?,
        maintenance: maintenance(cfg, members),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use sim_core::{ArtistId, Concept, Owner, ReleaseId};

    fn player_release(id: &str, date: i32, physical: u64, dom: u64, glob: u64) -> Release {
        let mut r = Release::new(ReleaseId(id.to_string()), Owner::Player, "Testers", "Hype", Concept::Fresh, date);
        r.stats.weekly_physical = physical;
        r.stats.weekly_streams_domestic = dom;
        r.stats.weekly_streams_global = glob;
        r
    }

    #[test]
    fn only_launch_week_physical_counts() {
        let releases = vec![
            player_release("a", 5, 100, 0, 0),
            player_release("b", 4, 1000, 0, 0),
        ];
        assert_eq!(physical_revenue(&releases, 5, 1500), 150_000);
    }

    #[test]
    fn bot_streams_are_not_royalties() {
        let mut bot = player_release("bot", 1, 0, 1_000_000, 1_000_000);
        bot.owner = Owner::Competitor(ArtistId("x".to_string()));
        let releases = vec![bot, player_release("p", 1, 0, 1000, 3000)];
        assert_eq!(player_weekly_streams(&releases), 4000);
    }

    #[test]
    fn royalty_is_floored() {
        assert_eq!(streaming_royalty(7, Decimal::new(15, 2)).unwrap(), 1);
        assert_eq!(streaming_royalty(1_000_000, Decimal::new(15, 2)).unwrap(), 150_000);
        assert_eq!(streaming_royalty(10, Decimal::new(-1, 0)), Err(EconError::InvalidRate));
    }

    #[test]
    fn settlement_nets_maintenance() {
        let cfg = SimConfig::default();
        let releases = vec![player_release("a", 3, 10, 10_000, 10_000)];
        let s = settle_week(&releases, 3, 4, &cfg).unwrap();
        assert_eq!(s.physical_revenue, 15_000);
        assert_eq!(s.streaming_revenue, 3_000);
        assert_eq!(s.maintenance, 900_000);
        assert_eq!(s.net(), 15_000 + 3_000 - 900_000);
    }

    proptest! {
        #[test]
        fn maintenance_grows_with_members(members in 0usize..50) {
            let cfg = SimConfig::default();
            prop_assert!(maintenance(&cfg, members + 1) > maintenance(&cfg, members));
        }

        #[test]
        fn royalty_monotonic(streams in 0u64..1_000_000_000) {
            let rate = Decimal::new(15, 2);
            prop_assert!(streaming_royalty(streams + 100, rate).unwrap() >= streaming_royalty(streams, rate).unwrap());
        }
    }
}
