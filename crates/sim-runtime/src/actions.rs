//! Player-initiated actions between turns.
//!
//! Every action reads a snapshot and returns a new one. Preconditions are
//! checked before anything changes, so a rejected action leaves no trace
//! except the notification added by [`reject`].

use content::{ComebackRequest, ContentService, Resilient, TraineeProfile};
use serde::{Deserialize, Serialize};
use sim_core::{
    lineup_energy, lineup_skill, Concept, Idol, MarketFocus, NotificationKind, Owner, Release,
    ReleaseId, ReleaseKind, ReleaseStyle, Skill, World,
};
use thiserror::Error;
use tracing::{debug, info};

/// Player releases commissioned inside this window cause fan fatigue.
pub const FATIGUE_WEEKS: i32 = 4;
pub const FATIGUE_FACTOR: f64 = 0.8;
/// Teasers start with this much public interest.
pub const TEASER_INTEREST: u32 = 20;
/// Marketing is only possible for releases younger than this.
pub const PROMOTION_WEEKS: i32 = 12;
pub const SCOUT_COST: i64 = 1_000_000;
pub const TRAINING_COST: i64 = 100_000;

#[derive(Debug, Error, PartialEq)]
pub enum ActionError {
    #[error("not enough money: need {needed}, have {available}")]
    InsufficientFunds { needed: i64, available: i64 },

    #[error("members are too tired: need {needed} energy, average is {average:.0}")]
    InsufficientEnergy { needed: u8, average: f64 },

    #[error("no debuted members")]
    NoActiveIdols,

    #[error("unknown release: {0}")]
    UnknownRelease(String),

    #[error("unknown trainee: {0}")]
    UnknownTrainee(String),

    #[error("not enough fan votes: need {needed}, have {available}")]
    NotEnoughVotes { needed: u32, available: u32 },

    #[error("release {0} can no longer be promoted")]
    NotEligible(String),
}

/// Record a failed action as a danger notification on an otherwise unchanged snapshot.
pub fn reject(world: &World, title: &str, err: &ActionError) -> World {
    let mut next = world.clone();
    next.notify(title, err.to_string(), NotificationKind::Danger);
    next
}

fn require_funds(world: &World, needed: i64) -> Result<(), ActionError> {
    if world.money < needed {
        return Err(ActionError::InsufficientFunds {
            needed,
            available: world.money,
        });
    }
    Ok(())
}

fn require_energy(world: &World, needed: u8) -> Result<(), ActionError> {
    let average = lineup_energy(&world.active_idols);
    if average < f64::from(needed) {
        return Err(ActionError::InsufficientEnergy { needed, average });
    }
    Ok(())
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum BudgetTier {
    Budget,
    Standard,
    Blockbuster,
}

impl BudgetTier {
    pub fn base_cost(self) -> i64 {
        match self {
            BudgetTier::Budget => 5_000_000,
            BudgetTier::Standard => 20_000_000,
            BudgetTier::Blockbuster => 100_000_000,
        }
    }
}

/// Everything the player picks in the studio.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ReleaseOrder {
    pub title: String,
    pub concept: Concept,
    pub style: ReleaseStyle,
    pub market_focus: MarketFocus,
    pub kind: ReleaseKind,
    pub budget: BudgetTier,
    pub teasing: bool,
}

impl ReleaseOrder {
    /// Base tier cost, ×2.5 for albums, ×1.2 with a teaser campaign.
    pub fn cost(&self) -> i64 {
        let mut cost = self.budget.base_cost();
        if self.kind == ReleaseKind::Album {
            cost = cost * 5 / 2;
        }
        if self.teasing {
            cost = cost * 6 / 5;
        }
        cost
    }
}

/// Produce and schedule a comeback.
///
/// The release is first simulated next week, or the week after with a
/// teaser. A player release commissioned in the last four weeks cuts
/// quality by 20%.
pub async fn produce_release<S: ContentService>(
    world: &World,
    order: &ReleaseOrder,
    content: &Resilient<S>,
) -> Result<World, ActionError> {
    if world.active_idols.is_empty() {
        return Err(ActionError::NoActiveIdols);
    }
    let cost = order.cost();
    require_funds(world, cost)?;

    let fatigued = world
        .releases
        .iter()
        .any(|r| {
            r.is_player() && world.week - r.produced_week.unwrap_or(r.date_released) < FATIGUE_WEEKS
        });
    let fatigue = if fatigued { FATIGUE_FACTOR } else { 1.0 };

    let outcome = content
        .comeback_outcome(&ComebackRequest {
            group_name: world.group_name.clone(),
            concept: order.concept,
            style: order.style,
            title: order.title.clone(),
            avg_skill: lineup_skill(&world.active_idols),
            fandom_size: world.fandom.size,
            budget: cost,
        })
        .await;

    let mut next = world.clone();
    let id = ReleaseId(next.mint_id("rel"));
    let delay = if order.teasing { 2 } else { 1 };
    let mut r = Release::new(
        id,
        Owner::Player,
        next.group_name.clone(),
        order.title.clone(),
        order.concept,
        world.week + delay,
    );
    r.style = order.style;
    r.market_focus = order.market_focus;
    r.kind = order.kind;
    r.produced_week = Some(world.week);
    r.quality = (f64::from(outcome.quality_score) * fatigue).floor() as u8;
    r.reviews.critic_score = outcome.critic_score;
    r.reviews.public_score = outcome.public_score;
    r.reviews.summary = outcome.review_summary;
    r.tracklist = outcome.tracklist;
    r.netizen_comments = outcome.netizen_comments;
    if order.teasing {
        r.marketing.public_interest = TEASER_INTEREST;
    }
    info!(title = %r.title, quality = r.quality, week = r.date_released, cost, "comeback scheduled");

    next.money -= cost;
    next.releases.insert(0, r);
    if fatigued {
        next.notify(
            "Oversaturation",
            "Fans are tired from recent releases. Initial impact reduced by 20%.",
            NotificationKind::Warning,
        );
    }
    next.notify(
        "Comeback Set",
        format!("{} scheduled. Strategy: {:?}.", order.title, order.market_focus),
        NotificationKind::Success,
    );
    Ok(next)
}

fn trainee_from(next: &mut World, profile: TraineeProfile) -> Idol {
    Idol {
        id: next.mint_id("trainee"),
        name: profile.name,
        age: profile.age,
        stats: profile.stats,
        energy: 100,
        stress: 0,
        positions: vec![profile.primary_position],
    }
}

/// Add generated profiles to the trainee roster at no cost.
pub fn enroll_trainees(world: &World, profiles: Vec<TraineeProfile>) -> World {
    let mut next = world.clone();
    for p in profiles {
        let idol = trainee_from(&mut next, p);
        debug!(id = %idol.id, name = %idol.name, "trainee enrolled");
        next.trainees.push(idol);
    }
    next
}

/// Scout one new trainee for a fee.
pub async fn scout_trainee<S: ContentService>(world: &World, content: &Resilient<S>) -> Result<World, ActionError> {
    require_funds(world, SCOUT_COST)?;
    let profiles = content.trainees(1).await;
    let mut next = enroll_trainees(world, profiles);
    next.money -= SCOUT_COST;
    if let Some(t) = next.trainees.last() {
        let msg = format!("Recruited {}!", t.name);
        next.notify("Scout Successful", msg, NotificationKind::Success);
    }
    Ok(next)
}

/// Move a trainee into the active lineup.
pub fn debut_trainee(world: &World, trainee_id: &str) -> Result<World, ActionError> {
    let idx = world
        .trainees
        .iter()
        .position(|t| t.id == trainee_id)
        .ok_or_else(|| ActionError::UnknownTrainee(trainee_id.to_string()))?;
    let mut next = world.clone();
    let idol = next.trainees.remove(idx);
    next.active_idols.push(idol);
    next.notify("Debut", "A new star is born!", NotificationKind::Success);
    Ok(next)
}

/// One lesson: +1 in a skill, capped at 100.
pub fn train_trainee(world: &World, trainee_id: &str, skill: Skill) -> Result<World, ActionError> {
    if !world.trainees.iter().any(|t| t.id == trainee_id) {
        return Err(ActionError::UnknownTrainee(trainee_id.to_string()));
    }
    require_funds(world, TRAINING_COST)?;
    let mut next = world.clone();
    next.money -= TRAINING_COST;
    if let Some(t) = next.trainees.iter_mut().find(|t| t.id == trainee_id) {
        let stat = t.stats.get_mut(skill);
        *stat = stat.saturating_add(1).min(100);
    }
    Ok(next)
}

/// What a marketing campaign boosts.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum PromoEffect {
    PublicInterest(u32),
    PlaylistReach(u64),
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum Promotion {
    StreetPromotions,
    VarietyShowGuest,
    NationalRadioPush,
    PitchToCurators,
    PremierPlaylisting,
}

impl Promotion {
    pub const ALL: [Promotion; 5] = [
        Promotion::StreetPromotions,
        Promotion::VarietyShowGuest,
        Promotion::NationalRadioPush,
        Promotion::PitchToCurators,
        Promotion::PremierPlaylisting,
    ];

    pub fn name(self) -> &'static str {
        match self {
            Promotion::StreetPromotions => "Street Promotions",
            Promotion::VarietyShowGuest => "Variety Show Guest",
            Promotion::NationalRadioPush => "National Radio Push",
            Promotion::PitchToCurators => "Pitch to Curators",
            Promotion::PremierPlaylisting => "Premier Playlisting",
        }
    }

    /// (cost, energy, effect)
    pub fn terms(self) -> (i64, u8, PromoEffect) {
        match self {
            Promotion::StreetPromotions => (500_000, 10, PromoEffect::PublicInterest(5)),
            Promotion::VarietyShowGuest => (2_000_000, 25, PromoEffect::PublicInterest(20)),
            Promotion::NationalRadioPush => (5_000_000, 15, PromoEffect::PublicInterest(35)),
            Promotion::PitchToCurators => (1_000_000, 5, PromoEffect::PlaylistReach(200_000)),
            Promotion::PremierPlaylisting => (15_000_000, 0, PromoEffect::PlaylistReach(1_500_000)),
        }
    }
}

/// Run a marketing campaign for one of the player's recent releases.
pub fn promote(world: &World, release_id: &ReleaseId, promo: Promotion) -> Result<World, ActionError> {
    let release = world
        .release(release_id)
        .ok_or_else(|| ActionError::UnknownRelease(release_id.0.clone()))?;
    if !release.is_player() || release.age(world.week) >= PROMOTION_WEEKS {
        return Err(ActionError::NotEligible(release_id.0.clone()));
    }
    let (cost, energy, effect) = promo.terms();
    require_funds(world, cost)?;
    require_energy(world, energy)?;

    let mut next = world.clone();
    next.money -= cost;
    for idol in next.active_idols.iter_mut() {
        idol.drain(energy);
    }
    if let Some(r) = next.release_mut(release_id) {
        r.marketing.ad_spend += cost;
        match effect {
            PromoEffect::PublicInterest(v) => r.marketing.public_interest += v,
            PromoEffect::PlaylistReach(v) => r.marketing.playlist_reach += v,
        }
    }
    next.notify("Marketing", format!("{} executed.", promo.name()), NotificationKind::Success);
    Ok(next)
}

/// Move fan votes from the pool onto a release.
pub fn allocate_votes(world: &World, release_id: &ReleaseId, amount: u32) -> Result<World, ActionError> {
    if world.release(release_id).is_none() {
        return Err(ActionError::UnknownRelease(release_id.0.clone()));
    }
    if world.fan_votes < amount {
        return Err(ActionError::NotEnoughVotes {
            needed: amount,
            available: world.fan_votes,
        });
    }
    let mut next = world.clone();
    next.fan_votes -= amount;
    if let Some(r) = next.release_mut(release_id) {
        r.votes += amount;
    }
    Ok(next)
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum BusinessAction {
    FanLivestream,
    LimitedMerchDrop,
    FanMeeting,
    WorldTourConcert,
}

/// Terms of a business action at the current fandom size.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct BusinessTerms {
    pub cost: i64,
    pub reward_money: i64,
    pub reward_fans: u64,
    pub energy: u8,
}

impl BusinessAction {
    pub fn name(self) -> &'static str {
        match self {
            BusinessAction::FanLivestream => "Fan Livestream",
            BusinessAction::LimitedMerchDrop => "Limited Merch Drop",
            BusinessAction::FanMeeting => "Fan Meeting",
            BusinessAction::WorldTourConcert => "World Tour Concert",
        }
    }

    pub fn terms(self, fandom_size: u64) -> BusinessTerms {
        let fans = i64::try_from(fandom_size).unwrap_or(i64::MAX);
        let (cost, reward_money, reward_fans, energy) = match self {
            BusinessAction::FanLivestream => (0, 100_000, 200, 10),
            BusinessAction::LimitedMerchDrop => (5_000_000, fans.saturating_mul(5_000), 50, 5),
            BusinessAction::FanMeeting => (20_000_000, fans.saturating_mul(15_000), 1_000, 30),
            BusinessAction::WorldTourConcert => (100_000_000, fans.saturating_mul(50_000), 5_000, 60),
        };
        BusinessTerms {
            cost,
            reward_money,
            reward_fans,
            energy,
        }
    }
}

/// Spend money and member energy for cash and fans.
pub fn business_action(world: &World, action: BusinessAction) -> Result<World, ActionError> {
    let t = action.terms(world.fandom.size);
    require_funds(world, t.cost)?;
    require_energy(world, t.energy)?;

    let mut next = world.clone();
    next.money = next.money - t.cost + t.reward_money;
    next.fandom.size += t.reward_fans;
    for idol in next.active_idols.iter_mut() {
        idol.drain(t.energy);
    }
    info!(action = action.name(), net = t.reward_money - t.cost, fans = t.reward_fans, "business action");
    next.notify("Business", format!("{} completed.", action.name()), NotificationKind::Success);
    Ok(next)
}
