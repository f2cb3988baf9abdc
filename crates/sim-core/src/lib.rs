#![deny(warnings)]

//! Core domain models and invariants for Idol Tycoon.
//!
//! This crate defines the serializable world snapshot shared by the
//! simulation crates, with validation helpers to guarantee basic invariants.

pub mod idol;
pub mod release;
pub mod roster;

pub use idol::*;
pub use release::*;
pub use roster::*;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use thiserror::Error;

/// Simulation configuration parameters.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SimConfig {
    /// Seed for deterministic RNG.
    pub rng_seed: u64,
    /// Number of visible positions on each chart.
    pub chart_size: u32,
    /// Revenue per physical unit sold.
    pub physical_unit_price: i64,
    /// Revenue per domestic or global stream.
    pub stream_royalty: Decimal,
    /// Fixed weekly running cost.
    pub base_maintenance: i64,
    /// Weekly running cost per debuted idol.
    pub maintenance_per_member: i64,
    /// Fandom growth for every music-show win by the player.
    pub show_win_fans: u64,
    /// Fan votes added to the player's pool each week.
    pub weekly_fan_votes: u32,
    pub energy_recovery: u8,
    pub stress_relief: u8,
}

impl Default for SimConfig {
    fn default() -> Self {
        Self {
            rng_seed: 42,
            chart_size: 200,
            physical_unit_price: 1500,
            stream_royalty: Decimal::new(15, 2),
            base_maintenance: 500_000,
            maintenance_per_member: 100_000,
            show_win_fans: 200,
            weekly_fan_votes: 100,
            energy_recovery: 20,
            stress_relief: 10,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum NotificationKind {
    Info,
    Success,
    Warning,
    Danger,
}

/// Player-facing message.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Notification {
    pub title: String,
    pub message: String,
    pub kind: NotificationKind,
    pub week: i32,
}

/// Weekly progress of the player's group.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct GroupHistoryEntry {
    pub week: i32,
    /// Cumulative domestic plus global streams across player releases.
    pub total_streams: u64,
    pub fans: u64,
    pub money: i64,
}

/// Top-level world snapshot.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct World {
    /// Current week. The only driver of time.
    pub week: i32,
    /// Signed; no floor is enforced.
    pub money: i64,
    pub company_name: String,
    pub group_name: String,
    pub group_type: GroupType,
    pub fandom: Fandom,
    pub fan_votes: u32,
    pub current_trend: Concept,
    pub trainees: Vec<Idol>,
    pub active_idols: Vec<Idol>,
    /// Full catalog. Releases are never removed.
    pub releases: Vec<Release>,
    pub agencies: Vec<Agency>,
    pub notifications: Vec<Notification>,
    pub group_history: Vec<GroupHistoryEntry>,
    /// Counter used to mint ids for player-created entities.
    pub next_id: u64,
}

impl World {
    /// An empty world at week 1.
    pub fn new(company_name: impl Into<String>, group_name: impl Into<String>, money: i64) -> Self {
        Self {
            week: 1,
            money,
            company_name: company_name.into(),
            group_name: group_name.into(),
            group_type: GroupType::GirlGroup,
            fandom: Fandom {
                size: 5000,
                name: "Stars".to_string(),
                buying_power: 60,
                streaming_power: 80,
                loyalty: 90,
                leaning: MarketFocus::Domestic,
            },
            fan_votes: 500,
            current_trend: Concept::Cute,
            trainees: Vec::new(),
            active_idols: Vec::new(),
            releases: Vec::new(),
            agencies: Vec::new(),
            notifications: Vec::new(),
            group_history: Vec::new(),
            next_id: 1,
        }
    }

    /// Mint a fresh id with the given prefix.
    pub fn mint_id(&mut self, prefix: &str) -> String {
        let id = format!("{prefix}-{}", self.next_id);
        self.next_id += 1;
        id
    }

    pub fn notify(&mut self, title: impl Into<String>, message: impl Into<String>, kind: NotificationKind) {
        self.notifications.push(Notification {
            title: title.into(),
            message: message.into(),
            kind,
            week: self.week,
        });
    }

    pub fn artist(&self, id: &ArtistId) -> Option<&CompetitorArtist> {
        self.agencies
            .iter()
            .flat_map(|a| a.artists.iter())
            .find(|a| &a.id == id)
    }

    pub fn artists(&self) -> impl Iterator<Item = &CompetitorArtist> {
        self.agencies.iter().flat_map(|a| a.artists.iter())
    }

    pub fn release(&self, id: &ReleaseId) -> Option<&Release> {
        self.releases.iter().find(|r| &r.id == id)
    }

    pub fn release_mut(&mut self, id: &ReleaseId) -> Option<&mut Release> {
        self.releases.iter_mut().find(|r| &r.id == id)
    }
}

/// Validation errors for domain invariants.
#[derive(Debug, Error, PartialEq)]
pub enum ValidationError {
    /// A 0-100 score is out of range.
    #[error("{field} must be within [0, 100], got {value}")]
    ScoreOutOfRange { field: &'static str, value: u8 },
    /// Release ids must be unique in the catalog.
    #[error("duplicate release id: {0}")]
    DuplicateRelease(String),
    /// Artist ids must be unique across agencies.
    #[error("duplicate artist id: {0}")]
    DuplicateArtist(String),
    /// A name must not be blank.
    #[error("blank name for {0}")]
    BlankName(&'static str),
}

fn check_score(field: &'static str, value: u8) -> Result<(), ValidationError> {
    if value > 100 {
        return Err(ValidationError::ScoreOutOfRange { field, value });
    }
    Ok(())
}

/// Validate a fandom profile.
pub fn validate_fandom(f: &Fandom) -> Result<(), ValidationError> {
    check_score("buying_power", f.buying_power)?;
    check_score("streaming_power", f.streaming_power)?;
    check_score("loyalty", f.loyalty)?;
    Ok(())
}

/// Validate a release.
pub fn validate_release(r: &Release) -> Result<(), ValidationError> {
    if r.title.trim().is_empty() {
        return Err(ValidationError::BlankName("release title"));
    }
    check_score("quality", r.quality)?;
    check_score("critic_score", r.reviews.critic_score)?;
    check_score("public_score", r.reviews.public_score)?;
    Ok(())
}

/// Validate an idol.
pub fn validate_idol(i: &Idol) -> Result<(), ValidationError> {
    if i.name.trim().is_empty() {
        return Err(ValidationError::BlankName("idol"));
    }
    check_score("energy", i.energy)?;
    check_score("stress", i.stress)?;
    Ok(())
}

/// Validate the world, including cross-references like id uniqueness.
pub fn validate_world(world: &World) -> Result<(), ValidationError> {
    validate_fandom(&world.fandom)?;
    for i in world.trainees.iter().chain(&world.active_idols) {
        validate_idol(i)?;
    }

    let mut artist_ids: BTreeSet<&ArtistId> = BTreeSet::new();
    for agency in &world.agencies {
        if agency.name.trim().is_empty() {
            return Err(ValidationError::BlankName("agency"));
        }
        for artist in &agency.artists {
            check_score("skill_level", artist.skill_level)?;
            validate_fandom(&artist.fandom)?;
            if !artist_ids.insert(&artist.id) {
                return Err(ValidationError::DuplicateArtist(artist.id.0.clone()));
            }
        }
    }

    let mut release_ids: BTreeSet<&ReleaseId> = BTreeSet::new();
    for r in &world.releases {
        validate_release(r)?;
        if !release_ids.insert(&r.id) {
            return Err(ValidationError::DuplicateRelease(r.id.0.clone()));
        }
    }
    Ok(())
}
