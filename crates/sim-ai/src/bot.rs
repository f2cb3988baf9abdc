//! Weekly release decisions for competitor artists.

use content::random_title;
use rand::Rng;
use sim_core::{
    ArtistId, ChartPosition, CompetitorArtist, Concept, MarketFocus, Owner, Release, ReleaseId,
    ReleaseKind, ReleaseStyle, World,
};
use tracing::debug;

/// Chance of releasing in any given week.
pub const BASE_RELEASE_CHANCE: f64 = 0.05;
/// Extra chance once an artist has been quiet for a long time.
pub const DORMANT_BONUS: f64 = 0.2;
pub const DORMANT_WEEKS: i32 = 20;
/// Extra chance when the chart leader looks beatable.
pub const WEAK_LEADER_BONUS: f64 = 0.3;
pub const OPPORTUNIST_WEEKS: i32 = 10;
/// A #1 with fewer weekly domestic streams than this is considered weak.
pub const WEAK_LEADER_STREAMS: u64 = 1_000_000;
/// Gap reported for an artist with no release in the catalog.
pub const NO_PRIOR_RELEASE_GAP: i32 = 99;
/// Probability that a bot release follows the current trend.
pub const FOLLOW_TREND_CHANCE: f64 = 0.4;
/// Upper bound (exclusive) of the random quality bonus.
pub const QUALITY_BONUS_MAX: u8 = 20;
/// Critic score assigned to bot releases.
pub const BOT_CRITIC_SCORE: u8 = 50;

/// Weeks since the artist's most recent release, as seen from `week`.
pub fn weeks_since_last_release(releases: &[Release], artist: &ArtistId, week: i32) -> i32 {
    releases
        .iter()
        .filter(|r| r.artist_id() == Some(artist))
        .map(|r| r.date_released)
        .max()
        .map_or(NO_PRIOR_RELEASE_GAP, |last| week - last)
}

/// Whether the current domestic #1 is pulling fewer than 1M weekly streams.
pub fn weak_chart_leader(releases: &[Release]) -> bool {
    releases
        .iter()
        .find(|r| r.charts.domestic.current == ChartPosition::Ranked(1))
        .is_some_and(|r| r.stats.weekly_streams_domestic < WEAK_LEADER_STREAMS)
}

/// Summed probability that an artist releases this week.
pub fn release_probability(weeks_since: i32, weak_leader: bool) -> f64 {
    let mut p = BASE_RELEASE_CHANCE;
    if weeks_since > DORMANT_WEEKS {
        p += DORMANT_BONUS;
    }
    if weak_leader && weeks_since > OPPORTUNIST_WEEKS {
        p += WEAK_LEADER_BONUS;
    }
    p
}

/// Build a bot release for `artist` dated `week`.
pub fn bot_release<R: Rng + ?Sized>(
    artist: &CompetitorArtist,
    trend: Concept,
    week: i32,
    rng: &mut R,
) -> Release {
    let concept = if rng.gen_bool(FOLLOW_TREND_CHANCE) {
        trend
    } else {
        Concept::ALL[rng.gen_range(0..Concept::ALL.len())]
    };
    let title = random_title(concept, rng);
    let quality = artist
        .skill_level
        .saturating_add(rng.gen_range(0..QUALITY_BONUS_MAX))
        .min(100);

    let mut r = Release::new(
        ReleaseId(format!("bot-{}-w{week}", artist.id.0)),
        Owner::Competitor(artist.id.clone()),
        artist.name.clone(),
        title,
        concept,
        week,
    );
    r.style = ReleaseStyle::Commercial;
    r.market_focus = MarketFocus::Balanced;
    r.kind = ReleaseKind::Single;
    r.quality = quality;
    r.reviews.critic_score = BOT_CRITIC_SCORE;
    r.reviews.public_score = 50;
    r.reviews.summary = "Generated".to_string();
    r
}

/// Decide, independently per artist, which competitors release in `week`.
///
/// One uniform draw per artist decides the release; releasing artists then
/// draw concept, title and quality. Returned in roster order.
pub fn plan_bot_releases<R: Rng + ?Sized>(world: &World, week: i32, rng: &mut R) -> Vec<Release> {
    let weak_leader = weak_chart_leader(&world.releases);
    let mut out = Vec::new();
    for artist in world.artists() {
        let gap = weeks_since_last_release(&world.releases, &artist.id, week);
        let p = release_probability(gap, weak_leader);
        if rng.gen::<f64>() < p {
            let r = bot_release(artist, world.current_trend, week, rng);
            debug!(artist = %artist.name, title = %r.title, quality = r.quality, gap, "bot release");
            out.push(r);
        }
    }
    out
}
