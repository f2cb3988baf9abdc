#![deny(warnings)]

//! Content generation for player-initiated actions.
//!
//! The external generator (an LLM in production) produces review scores,
//! flavor text and trainee profiles. The simulation never depends on it
//! succeeding: [`Resilient`] bounds every call with a timeout and substitutes
//! a static fallback payload on any failure.

pub mod titles;

pub use titles::random_title;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use sim_core::{Concept, IdolStats, Position, ReleaseStyle};
use std::time::Duration;
use thiserror::Error;
use tracing::{debug, warn};

/// Errors reported by a content generator.
#[derive(Debug, Error, PartialEq)]
pub enum ContentError {
    #[error("service unavailable: {0}")]
    Unavailable(String),

    #[error("invalid response: {0}")]
    InvalidResponse(String),

    #[error("request timeout")]
    Timeout,
}

/// Inputs describing a planned comeback.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ComebackRequest {
    pub group_name: String,
    pub concept: Concept,
    pub style: ReleaseStyle,
    pub title: String,
    pub avg_skill: f64,
    pub fandom_size: u64,
    pub budget: i64,
}

/// Reception of a comeback as judged by the generator.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ComebackOutcome {
    /// 1-100.
    pub quality_score: u8,
    /// 0-100.
    pub critic_score: u8,
    /// 0-100.
    pub public_score: u8,
    pub review_summary: String,
    pub tracklist: Vec<String>,
    pub netizen_comments: Vec<String>,
}

impl ComebackOutcome {
    /// Neutral outcome used whenever the generator fails.
    pub fn fallback() -> Self {
        Self {
            quality_score: 60,
            critic_score: 65,
            public_score: 70,
            review_summary: "A standard release that plays it safe.".to_string(),
            tracklist: ["Intro", "B-side 1", "B-side 2", "Outro"]
                .map(String::from)
                .to_vec(),
            netizen_comments: ["Not bad!", "Expected more...", "The beat is catchy."]
                .map(String::from)
                .to_vec(),
        }
    }

    /// Clamp scores into range and keep at most three comments.
    pub fn sanitized(mut self) -> Self {
        self.quality_score = self.quality_score.clamp(1, 100);
        self.critic_score = self.critic_score.min(100);
        self.public_score = self.public_score.min(100);
        self.netizen_comments.truncate(3);
        self
    }
}

/// A generated trainee profile.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct TraineeProfile {
    pub name: String,
    pub age: u8,
    pub stats: IdolStats,
    pub primary_position: Position,
}

impl TraineeProfile {
    /// Default trainee used whenever the generator fails.
    pub fn fallback() -> Self {
        Self {
            name: "Minji".to_string(),
            age: 16,
            stats: IdolStats {
                vocal: 40,
                dance: 50,
                rap: 20,
                visual: 60,
                charisma: 45,
            },
            primary_position: Position::Visual,
        }
    }
}

/// Contract of the external content generator.
#[async_trait]
pub trait ContentService: Send + Sync {
    /// Name of the backend, for logs.
    fn name(&self) -> &str;

    async fn comeback_outcome(&self, req: &ComebackRequest) -> Result<ComebackOutcome, ContentError>;

    async fn trainees(&self, count: usize) -> Result<Vec<TraineeProfile>, ContentError>;
}

/// Generator that always fails. Every call degrades to the fallback.
#[derive(Clone, Debug, Default)]
pub struct Offline;

#[async_trait]
impl ContentService for Offline {
    fn name(&self) -> &str {
        "offline"
    }

    async fn comeback_outcome(&self, _req: &ComebackRequest) -> Result<ComebackOutcome, ContentError> {
        Err(ContentError::Unavailable("no content backend configured".to_string()))
    }

    async fn trainees(&self, _count: usize) -> Result<Vec<TraineeProfile>, ContentError> {
        Err(ContentError::Unavailable("no content backend configured".to_string()))
    }
}

/// Wraps a generator so calls never fail and never hang.
pub struct Resilient<S> {
    inner: S,
    timeout: Duration,
}

impl<S: ContentService> Resilient<S> {
    pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

    pub fn new(inner: S) -> Self {
        Self {
            inner,
            timeout: Self::DEFAULT_TIMEOUT,
        }
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Comeback reception, or [`ComebackOutcome::fallback`] on failure.
    pub async fn comeback_outcome(&self, req: &ComebackRequest) -> ComebackOutcome {
        let result = tokio::time::timeout(self.timeout, self.inner.comeback_outcome(req)).await;
        match flatten(result) {
            Ok(outcome) => {
                debug!(backend = self.inner.name(), title = %req.title, "comeback outcome generated");
                outcome.sanitized()
            }
            Err(e) => {
                warn!(backend = self.inner.name(), error = %e, "comeback generation failed, using fallback");
                ComebackOutcome::fallback()
            }
        }
    }

    /// Exactly `count` trainees. Missing profiles are filled with the fallback.
    pub async fn trainees(&self, count: usize) -> Vec<TraineeProfile> {
        let result = tokio::time::timeout(self.timeout, self.inner.trainees(count)).await;
        let mut profiles = match flatten(result) {
            Ok(p) => p,
            Err(e) => {
                warn!(backend = self.inner.name(), error = %e, "trainee generation failed, using fallback");
                Vec::new()
            }
        };
        profiles.truncate(count);
        profiles.resize_with(count, TraineeProfile::fallback);
        profiles
    }
}

fn flatten<T>(
    result: Result<Result<T, ContentError>, tokio::time::error::Elapsed>,
) -> Result<T, ContentError> {
    result.map_err(|_| ContentError::Timeout)?
}
