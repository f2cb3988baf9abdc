//! Weekly music shows: weighted scoring among the top chart releases.
//!
//! Each show nominates the three best domestic-chart releases younger than
//! eight weeks. Four components (digital, physical, social, votes) are
//! normalised against the best nominee, scaled to 10,000 points and weighted
//! per show; a random broadcast score in [0, 2000) is added on top.

use rand::Rng;
use serde::{Deserialize, Serialize};
use sim_core::{ChartPosition, Release, ReleaseId, ScoreBreakdown, ShowCandidate, ShowResult};
use tracing::debug;

/// Nominees per show.
pub const NOMINEES: usize = 3;
/// Releases this old or older are no longer eligible.
pub const ELIGIBLE_WEEKS: i32 = 8;
/// Points a component is worth at full weight for the best nominee.
pub const POINT_BASIS: f64 = 10_000.0;
/// Upper bound (exclusive) of the broadcast score.
pub const BROADCAST_MAX: f64 = 2_000.0;

/// Per-show component weights.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct ShowWeights {
    pub digital: f64,
    pub physical: f64,
    pub sns: f64,
    pub vote: f64,
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct MusicShow {
    pub name: &'static str,
    pub weights: ShowWeights,
}

/// The weekly show lineup, in broadcast order.
pub const MUSIC_SHOWS: [MusicShow; 5] = [
    MusicShow {
        name: "The Show",
        weights: ShowWeights { digital: 0.4, physical: 0.1, sns: 0.2, vote: 0.15 },
    },
    MusicShow {
        name: "Show Champion",
        weights: ShowWeights { digital: 0.35, physical: 0.15, sns: 0.2, vote: 0.15 },
    },
    MusicShow {
        name: "M Countdown",
        weights: ShowWeights { digital: 0.45, physical: 0.15, sns: 0.15, vote: 0.1 },
    },
    MusicShow {
        name: "Music Bank",
        weights: ShowWeights { digital: 0.6, physical: 0.05, sns: 0.0, vote: 0.1 },
    },
    MusicShow {
        name: "Inkigayo",
        weights: ShowWeights { digital: 0.55, physical: 0.1, sns: 0.3, vote: 0.05 },
    },
];

/// Raw component inputs of one nominee.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct ShowInputs {
    pub digital: u64,
    pub physical: u64,
    pub sns: u64,
    pub votes: u64,
}

impl ShowInputs {
    pub fn of(r: &Release) -> Self {
        Self {
            digital: r.stats.weekly_streams_domestic,
            physical: r.stats.weekly_sales_points,
            sns: r.stats.mv_views,
            votes: u64::from(r.votes),
        }
    }
}

/// Per-component maxima across nominees, each floored at 1.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Maxima(ShowInputs);

impl Maxima {
    pub fn of(inputs: &[ShowInputs]) -> Self {
        let max = |f: fn(&ShowInputs) -> u64| inputs.iter().map(f).max().unwrap_or(0).max(1);
        Self(ShowInputs {
            digital: max(|i| i.digital),
            physical: max(|i| i.physical),
            sns: max(|i| i.sns),
            votes: max(|i| i.votes),
        })
    }
}

/// Weighted, normalised components without the broadcast score.
pub fn weighted_components(inputs: &ShowInputs, maxima: &Maxima, w: &ShowWeights) -> ScoreBreakdown {
    let part = |v: u64, m: u64, weight: f64| v as f64 / m as f64 * POINT_BASIS * weight;
    ScoreBreakdown {
        digital: part(inputs.digital, maxima.0.digital, w.digital),
        physical: part(inputs.physical, maxima.0.physical, w.physical),
        sns: part(inputs.sns, maxima.0.sns, w.sns),
        votes: part(inputs.votes, maxima.0.votes, w.vote),
        broadcast: 0.0,
    }
}

/// Indices of this week's nominees: best domestic rank first, at most three.
pub fn eligible_candidates(releases: &[Release], week: i32) -> Vec<usize> {
    let mut eligible: Vec<(usize, u32)> = releases
        .iter()
        .enumerate()
        .filter(|(_, r)| r.age(week) < ELIGIBLE_WEEKS)
        .filter_map(|(i, r)| match r.charts.domestic.current {
            ChartPosition::Ranked(rank) => Some((i, rank)),
            ChartPosition::Unranked => None,
        })
        .collect();
    eligible.sort_by_key(|&(_, rank)| rank);
    eligible.into_iter().take(NOMINEES).map(|(i, _)| i).collect()
}

/// Index of the highest score. The first of equal scores wins.
pub fn pick_winner(candidates: &[ShowCandidate]) -> Option<usize> {
    candidates
        .iter()
        .enumerate()
        .fold(None, |best: Option<(usize, u64)>, (i, c)| match best {
            Some((_, s)) if s >= c.score => best,
            _ => Some((i, c.score)),
        })
        .map(|(i, _)| i)
}

/// Score every nominee for one show. Draws one broadcast score per nominee.
pub fn score_show<R: Rng + ?Sized>(
    show: &MusicShow,
    nominees: &[&Release],
    maxima: &Maxima,
    rng: &mut R,
) -> Vec<ShowCandidate> {
    nominees
        .iter()
        .map(|r| {
            let mut breakdown = weighted_components(&ShowInputs::of(r), maxima, &show.weights);
            breakdown.broadcast = rng.gen_range(0.0..BROADCAST_MAX);
            ShowCandidate {
                release_id: r.id.clone(),
                artist_name: r.artist_name.clone(),
                title: r.title.clone(),
                is_player: r.is_player(),
                score: breakdown.sum().floor() as u64,
                breakdown,
            }
        })
        .collect()
}

/// Placement of candidate `i`: the winner is 1; everyone else is 1 plus
/// the number of candidates ahead of them.
fn placement(candidates: &[ShowCandidate], winner: usize, i: usize) -> u8 {
    if i == winner {
        return 1;
    }
    let mine = candidates[i].score;
    let ahead = candidates
        .iter()
        .enumerate()
        .filter(|&(j, c)| j != i && (j == winner || c.score > mine || (c.score == mine && j < i)))
        .count();
    (ahead + 1) as u8
}

/// One show's outcome for the week.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ShowWin {
    pub show: String,
    pub release_id: ReleaseId,
    pub title: String,
    pub is_player: bool,
    pub score: u64,
}

/// Run every show for `week`.
///
/// Every nominee gets a history record with the full candidate list; the
/// winner's win counter increments. Returns one entry per decided show.
pub fn resolve_shows<R: Rng + ?Sized>(releases: &mut [Release], week: i32, rng: &mut R) -> Vec<ShowWin> {
    let nominees = eligible_candidates(releases, week);
    if nominees.is_empty() {
        debug!(week, "no show nominees this week");
        return Vec::new();
    }
    let inputs: Vec<ShowInputs> = nominees.iter().map(|&i| ShowInputs::of(&releases[i])).collect();
    let maxima = Maxima::of(&inputs);

    let mut wins = Vec::with_capacity(MUSIC_SHOWS.len());
    for show in &MUSIC_SHOWS {
        let scored = {
            let refs: Vec<&Release> = nominees.iter().map(|&i| &releases[i]).collect();
            score_show(show, &refs, &maxima, rng)
        };
        let Some(winner) = pick_winner(&scored) else {
            continue;
        };
        for (pos, &idx) in nominees.iter().enumerate() {
            let r = &mut releases[idx];
            let won = pos == winner;
            if won {
                r.show_wins += 1;
            }
            r.show_history.push(ShowResult {
                show: show.name.to_string(),
                week,
                placement: placement(&scored, winner, pos),
                score: scored[pos].score,
                won,
                winner: scored[winner].release_id.clone(),
                candidates: scored.clone(),
            });
        }
        let w = &scored[winner];
        debug!(show = show.name, title = %w.title, score = w.score, "show decided");
        wins.push(ShowWin {
            show: show.name.to_string(),
            release_id: w.release_id.clone(),
            title: w.title.clone(),
            is_player: w.is_player,
            score: w.score,
        });
    }
    wins
}
