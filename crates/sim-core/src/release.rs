//! Releases and everything a release carries through its chart life.

use serde::{Deserialize, Serialize};

use crate::roster::ArtistId;

/// Unique identifier for a release.
#[derive(Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct ReleaseId(pub String);

/// Musical concept tag. The world trend is one of these.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Concept {
    Cute,
    GirlCrush,
    Dark,
    Fresh,
    Retro,
    HipHop,
    Ballad,
}

impl Concept {
    /// Every concept, in declaration order.
    pub const ALL: [Concept; 7] = [
        Concept::Cute,
        Concept::GirlCrush,
        Concept::Dark,
        Concept::Fresh,
        Concept::Retro,
        Concept::HipHop,
        Concept::Ballad,
    ];

    pub fn label(self) -> &'static str {
        match self {
            Concept::Cute => "Cute",
            Concept::GirlCrush => "Girl Crush",
            Concept::Dark => "Dark",
            Concept::Fresh => "Fresh",
            Concept::Retro => "Retro",
            Concept::HipHop => "Hip Hop",
            Concept::Ballad => "Ballad",
        }
    }
}

/// Commercial releases chase mass appeal; conceptual ones chase critics.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ReleaseStyle {
    Commercial,
    Conceptual,
}

/// Which market a release (or a fandom) leans towards.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum MarketFocus {
    Domestic,
    Global,
    Balanced,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ReleaseKind {
    Single,
    Album,
}

/// The three independent chart dimensions.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Market {
    /// Main domestic chart, ranked by unique listeners.
    Domestic,
    /// Secondary domestic chart, ranked by weekly streams.
    Secondary,
    /// Global chart, ranked by weekly streams.
    Global,
}

impl Market {
    pub const ALL: [Market; 3] = [Market::Domestic, Market::Secondary, Market::Global];
}

/// Position on a chart. `Unranked` means outside the visible window.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ChartPosition {
    Ranked(u32),
    #[default]
    Unranked,
}

impl ChartPosition {
    pub fn rank(self) -> Option<u32> {
        match self {
            ChartPosition::Ranked(r) => Some(r),
            ChartPosition::Unranked => None,
        }
    }

    pub fn is_ranked(self) -> bool {
        matches!(self, ChartPosition::Ranked(_))
    }

    /// The better of two positions. Any rank beats `Unranked`.
    pub fn best(self, other: ChartPosition) -> ChartPosition {
        match (self, other) {
            (ChartPosition::Ranked(a), ChartPosition::Ranked(b)) => ChartPosition::Ranked(a.min(b)),
            (ChartPosition::Ranked(a), ChartPosition::Unranked)
            | (ChartPosition::Unranked, ChartPosition::Ranked(a)) => ChartPosition::Ranked(a),
            (ChartPosition::Unranked, ChartPosition::Unranked) => ChartPosition::Unranked,
        }
    }
}

/// One on-chart week.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChartEntry {
    pub week: i32,
    pub rank: u32,
}

/// Current/peak/history for a single chart.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct ChartRun {
    pub current: ChartPosition,
    pub peak: ChartPosition,
    pub history: Vec<ChartEntry>,
}

impl ChartRun {
    /// Stamp this week's placement. Off-chart weeks clear `current` and
    /// leave peak and history untouched.
    pub fn record(&mut self, week: i32, position: ChartPosition) {
        self.current = position;
        if let ChartPosition::Ranked(rank) = position {
            self.peak = self.peak.best(position);
            self.history.push(ChartEntry { week, rank });
        }
    }
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct ChartRuns {
    pub domestic: ChartRun,
    pub secondary: ChartRun,
    pub global: ChartRun,
}

impl ChartRuns {
    pub fn get(&self, market: Market) -> &ChartRun {
        match market {
            Market::Domestic => &self.domestic,
            Market::Secondary => &self.secondary,
            Market::Global => &self.global,
        }
    }

    pub fn get_mut(&mut self, market: Market) -> &mut ChartRun {
        match market {
            Market::Domestic => &mut self.domestic,
            Market::Secondary => &mut self.secondary,
            Market::Global => &mut self.global,
        }
    }
}

/// Weekly and cumulative consumption figures.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct ReleaseStats {
    /// Physical units sold this week. Drives physical revenue.
    pub weekly_physical: u64,
    pub total_physical: u64,
    /// Physical units plus streaming-equivalent units. Drives show scoring.
    pub weekly_sales_points: u64,
    pub total_sales_points: u64,
    pub weekly_streams_domestic: u64,
    pub total_streams_domestic: u64,
    /// Unique-listener estimate on the domestic chart.
    pub unique_listeners_domestic: u64,
    pub weekly_streams_secondary: u64,
    pub total_streams_secondary: u64,
    pub weekly_streams_global: u64,
    pub total_streams_global: u64,
    /// Cumulative music-video views.
    pub mv_views: u64,
}

impl ReleaseStats {
    /// The figure a chart sorts by.
    pub fn chart_metric(&self, market: Market) -> u64 {
        match market {
            Market::Domestic => self.unique_listeners_domestic,
            Market::Secondary => self.weekly_streams_secondary,
            Market::Global => self.weekly_streams_global,
        }
    }
}

/// Marketing effects applied to a release.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct MarketingState {
    /// Decays by a flat amount each week.
    pub public_interest: u32,
    /// Cumulative, never decays.
    pub playlist_reach: u64,
    pub ad_spend: i64,
}

/// Short-video platform activity.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct SocialStats {
    pub total_videos: u64,
    pub weekly_videos: u64,
    pub total_views: u64,
    pub challenge_tag: String,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Reviews {
    pub critic_score: u8,
    pub public_score: u8,
    pub summary: String,
}

/// Who owns a release.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Owner {
    Player,
    Competitor(ArtistId),
}

/// Per-candidate score components for one show.
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct ScoreBreakdown {
    pub digital: f64,
    pub physical: f64,
    pub sns: f64,
    pub votes: f64,
    pub broadcast: f64,
}

impl ScoreBreakdown {
    pub fn sum(&self) -> f64 {
        self.digital + self.physical + self.sns + self.votes + self.broadcast
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ShowCandidate {
    pub release_id: ReleaseId,
    pub artist_name: String,
    pub title: String,
    pub is_player: bool,
    pub score: u64,
    pub breakdown: ScoreBreakdown,
}

/// A release's participation in one music show. Never mutated once recorded.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ShowResult {
    pub show: String,
    pub week: i32,
    /// 1 for the winner; otherwise 1 + number of candidates placed ahead.
    pub placement: u8,
    pub score: u64,
    pub won: bool,
    pub winner: ReleaseId,
    /// Every nominee of that week's show, in chart order.
    pub candidates: Vec<ShowCandidate>,
}

/// A single musical work in circulation.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Release {
    pub id: ReleaseId,
    pub owner: Owner,
    pub artist_name: String,
    pub title: String,
    pub concept: Concept,
    pub style: ReleaseStyle,
    pub market_focus: MarketFocus,
    pub kind: ReleaseKind,
    /// Fixed at creation, 0-100.
    pub quality: u8,
    /// First week the release is simulated.
    pub date_released: i32,
    /// Week a player release was commissioned. Unset for rival and seeded releases.
    pub produced_week: Option<i32>,
    pub stats: ReleaseStats,
    pub marketing: MarketingState,
    pub social: SocialStats,
    pub reviews: Reviews,
    pub tracklist: Vec<String>,
    pub netizen_comments: Vec<String>,
    /// Once set, stays set.
    pub is_viral: bool,
    pub charts: ChartRuns,
    pub show_wins: u32,
    pub show_history: Vec<ShowResult>,
    pub votes: u32,
}

impl Release {
    /// A fresh release with zeroed statistics and no chart history.
    pub fn new(
        id: ReleaseId,
        owner: Owner,
        artist_name: impl Into<String>,
        title: impl Into<String>,
        concept: Concept,
        date_released: i32,
    ) -> Self {
        let title = title.into();
        let challenge_tag = format!("#{}Challenge", title.split_whitespace().collect::<String>());
        Self {
            id,
            owner,
            artist_name: artist_name.into(),
            title,
            concept,
            style: ReleaseStyle::Commercial,
            market_focus: MarketFocus::Balanced,
            kind: ReleaseKind::Single,
            quality: 50,
            date_released,
            produced_week: None,
            stats: ReleaseStats::default(),
            marketing: MarketingState::default(),
            social: SocialStats {
                challenge_tag,
                ..SocialStats::default()
            },
            reviews: Reviews {
                critic_score: 50,
                public_score: 50,
                summary: String::new(),
            },
            tracklist: Vec::new(),
            netizen_comments: Vec::new(),
            is_viral: false,
            charts: ChartRuns::default(),
            show_wins: 0,
            show_history: Vec::new(),
            votes: 0,
        }
    }

    /// Weeks since release. Negative while still scheduled.
    pub fn age(&self, week: i32) -> i32 {
        week - self.date_released
    }

    /// Whether the release takes part in the given week's simulation.
    pub fn is_active(&self, week: i32) -> bool {
        self.age(week) >= 0
    }

    pub fn is_player(&self) -> bool {
        matches!(self.owner, Owner::Player)
    }

    pub fn artist_id(&self) -> Option<&ArtistId> {
        match &self.owner {
            Owner::Player => None,
            Owner::Competitor(id) => Some(id),
        }
    }
}
