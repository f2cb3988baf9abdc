//! The weekly turn: a pure transform from one world snapshot to the next.

use rand::Rng;
use serde::{Deserialize, Serialize};
use sim_ai::plan_bot_releases;
use sim_core::{Fandom, GroupHistoryEntry, NotificationKind, Owner, ReleaseId, SimConfig, World};
use sim_econ::{decay_release, settle_week, EconError, Settlement};
use tracing::{debug, info, warn};

use crate::charts::rank_all;
use crate::shows::{resolve_shows, ShowWin};

/// What happened during one simulated week.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct WeekReport {
    pub week: i32,
    /// In roster order.
    pub bot_releases: Vec<ReleaseId>,
    pub show_winners: Vec<ShowWin>,
    pub settlement: Settlement,
}

impl WeekReport {
    pub fn player_wins(&self) -> usize {
        self.show_winners.iter().filter(|w| w.is_player).count()
    }
}

/// Simulate the week after `world.week` and return the resulting snapshot.
///
/// The input is never modified. Phases run in order: competitor releases,
/// decay, ranking, music shows, catalog sort, settlement, then the
/// week-end upkeep (rest, fan votes, history). On error no snapshot is
/// produced.
pub fn advance_week<R: Rng + ?Sized>(
    world: &World,
    cfg: &SimConfig,
    rng: &mut R,
) -> Result<(World, WeekReport), EconError> {
    let week = world.week + 1;
    let mut next = world.clone();
    next.week = week;

    let bots = plan_bot_releases(world, week, rng);
    let bot_ids: Vec<ReleaseId> = bots.iter().map(|r| r.id.clone()).collect();
    // Each new release is pushed to the front, so the last artist in the roster leads.
    next.releases.splice(0..0, bots.into_iter().rev());
    debug!(week, count = bot_ids.len(), "competitor releases");

    let mut simulated = 0usize;
    for release in next.releases.iter_mut() {
        let fandom = match &release.owner {
            Owner::Player => world.fandom.clone(),
            Owner::Competitor(id) => match world.artist(id) {
                Some(artist) => artist.fandom.clone(),
                None => {
                    warn!(release = %release.id.0, artist = %id.0, "unknown artist, using neutral fandom");
                    Fandom::neutral()
                }
            },
        };
        if decay_release(release, &fandom, world.current_trend, week, rng) {
            simulated += 1;
        }
    }
    debug!(week, simulated, "decay pass");

    rank_all(&mut next.releases, week, cfg.chart_size);

    let show_winners = resolve_shows(&mut next.releases, week, rng);
    for win in show_winners.iter().filter(|w| w.is_player) {
        next.fandom.size += cfg.show_win_fans;
        info!(show = %win.show, title = %win.title, score = win.score, "player won a music show");
        next.notify(
            format!("{} Win!", win.show),
            format!("\"{}\" took first place on {} with {} points.", win.title, win.show, win.score),
            NotificationKind::Success,
        );
    }

    next.releases.sort_by(|a, b| b.date_released.cmp(&a.date_released));

    let settlement = settle_week(&next.releases, week, next.active_idols.len(), cfg)?;
    next.money += settlement.net();

    for idol in next.active_idols.iter_mut().chain(next.trainees.iter_mut()) {
        idol.rest(cfg.energy_recovery, cfg.stress_relief);
    }
    next.fan_votes = next.fan_votes.saturating_add(cfg.weekly_fan_votes);

    let total_streams = next
        .releases
        .iter()
        .filter(|r| r.is_player())
        .map(|r| r.stats.total_streams_domestic + r.stats.total_streams_global)
        .sum();
    next.group_history.push(GroupHistoryEntry {
        week,
        total_streams,
        fans: next.fandom.size,
        money: next.money,
    });

    info!(
        week,
        money = next.money,
        net = settlement.net(),
        fans = next.fandom.size,
        show_wins = show_winners.len(),
        "week settled"
    );

    Ok((
        next,
        WeekReport {
            week,
            bot_releases: bot_ids,
            show_winners,
            settlement,
        },
    ))
}
