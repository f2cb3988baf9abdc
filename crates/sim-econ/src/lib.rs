#![deny(warnings)]

//! Economic models for Idol Tycoon.
//!
//! This crate provides:
//! - The retention/decay model turning a release's age, style, reception and
//!   marketing into weekly streams, sales and short-video activity
//! - Weekly settlement of the player's revenue and running costs

pub mod retention;
pub mod settlement;

pub use retention::{decay_release, project_week, time_retention, WeeklyFigures};
pub use settlement::{settle_week, Settlement};

use thiserror::Error;

/// Errors produced by economic helpers.
#[derive(Debug, Error, PartialEq)]
pub enum EconError {
    /// Rates must be non-negative.
    #[error("invalid rate")]
    InvalidRate,
    /// A monetary amount no longer fits the balance type.
    #[error("monetary overflow")]
    Overflow,
}
