#![deny(warnings)]

//! Competitor behaviour for Idol Tycoon.
//!
//! Rival agencies decide each week, artist by artist, whether to put out new
//! material. They release more often after long gaps and pounce when the
//! domestic chart leader looks weak. This crate also seeds the initial roster
//! and the back catalog that populates week 1.

pub mod bot;
pub mod seed;

pub use bot::{plan_bot_releases, release_probability, weak_chart_leader, weeks_since_last_release};
pub use seed::{seed_back_catalog, seed_competitors};
