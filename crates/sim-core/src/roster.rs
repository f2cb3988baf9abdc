//! Competitor agencies, their artists and fandom demand profiles.

use serde::{Deserialize, Serialize};

use crate::release::{Concept, MarketFocus};

/// Unique identifier for a competitor artist.
#[derive(Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct ArtistId(pub String);

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum GroupType {
    BoyGroup,
    GirlGroup,
    Coed,
}

/// Demand parameters of an artist's audience.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Fandom {
    pub size: u64,
    pub name: String,
    /// Physical-sales propensity, 0-100.
    pub buying_power: u8,
    /// Streaming propensity, 0-100.
    pub streaming_power: u8,
    /// 0-100. Advisory only.
    pub loyalty: u8,
    pub leaning: MarketFocus,
}

impl Fandom {
    /// Stand-in profile for releases whose artist cannot be resolved.
    pub fn neutral() -> Self {
        Self {
            size: 1000,
            name: "Unknown".to_string(),
            buying_power: 50,
            streaming_power: 50,
            loyalty: 50,
            leaning: MarketFocus::Balanced,
        }
    }
}

/// How a rival agency tends to behave.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum BotStrategy {
    Aggressive,
    Quality,
    Viral,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct CompetitorArtist {
    pub id: ArtistId,
    pub name: String,
    pub group_type: GroupType,
    pub concept: Concept,
    /// Baseline quality of the artist's releases.
    pub skill_level: u8,
    pub fandom: Fandom,
}

/// AI-controlled rival agency. Composition is fixed after initialization.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Agency {
    pub id: String,
    pub name: String,
    pub reputation: u8,
    pub strategy: BotStrategy,
    pub artists: Vec<CompetitorArtist>,
}
