//! Weekly retention and demand for a single release.
//!
//! Popularity is a product of a time-retention curve (three age bands),
//! quality resilience, trend alignment, virality and marketing interest.
//! Market focus then splits that popularity across the three markets.

use rand::Rng;
use sim_core::{Concept, Fandom, MarketFocus, Release, ReleaseKind, ReleaseStyle};

/// Weeks of linear early decay.
pub const EARLY_BAND_END: i32 = 4;
/// Last week of exponential mid-life decay.
pub const MID_BAND_END: i32 = 12;
/// A release turns viral the first week its weekly videos exceed this.
pub const VIRAL_VIDEO_THRESHOLD: u64 = 2000;
/// Streams per streaming-equivalent sales unit.
pub const STREAMS_PER_SALES_UNIT: u64 = 1500;
/// Physical sales stop after this many weeks.
pub const PHYSICAL_SALES_WEEKS: i32 = 8;
/// Flat weekly decay of marketing public interest.
pub const PUBLIC_INTEREST_DECAY: u32 = 5;

const PUBLIC_MULTIPLIER_FLOOR: f64 = 0.01;
const VIEWS_PER_VIDEO: u64 = 500;

/// (decay modifier, stream modifier) for a style.
pub fn style_modifiers(style: ReleaseStyle) -> (f64, f64) {
    match style {
        ReleaseStyle::Commercial => (1.2, 1.2),
        ReleaseStyle::Conceptual => (0.8, 0.9),
    }
}

/// Long-tail modifier from critical reception: acclaim slows decay.
pub fn critic_factor(critic_score: u8) -> f64 {
    if critic_score > 80 {
        0.7
    } else if critic_score < 50 {
        1.3
    } else {
        1.0
    }
}

/// Fraction of launch popularity kept at `age` weeks.
pub fn time_retention(age: i32, style: ReleaseStyle, critic_score: u8) -> f64 {
    let (decay_mod, _) = style_modifiers(style);
    if age <= EARLY_BAND_END {
        1.0 - f64::from(age) * 0.03 * decay_mod
    } else if age <= MID_BAND_END {
        0.88 * (0.85 * decay_mod).powi(age - EARLY_BAND_END)
    } else {
        0.25 * (0.98 * critic_factor(critic_score)).powi(age - MID_BAND_END)
    }
}

/// (domestic, global) multipliers for a market focus.
pub fn market_multipliers(focus: MarketFocus) -> (f64, f64) {
    match focus {
        MarketFocus::Domestic => (1.3, 0.7),
        MarketFocus::Global => (0.7, 1.3),
        MarketFocus::Balanced => (1.0, 1.0),
    }
}

/// Inputs of the public multiplier.
#[derive(Clone, Copy, Debug)]
pub struct Popularity {
    pub retention: f64,
    pub quality: u8,
    pub trending: bool,
    pub viral: bool,
    pub public_interest: u32,
    pub style: ReleaseStyle,
}

/// Overall popularity this week, floored at 0.01.
pub fn public_multiplier(p: &Popularity) -> f64 {
    let (_, stream_mod) = style_modifiers(p.style);
    let quality_resilience = f64::from(p.quality) / 100.0 * 0.4;
    let trend_factor = if p.trending { 1.2 } else { 1.0 };
    let viral_factor = if p.viral { 4.0 } else { 1.0 };
    let interest = 1.0 + f64::from(p.public_interest) / 25.0;
    let m = (p.retention + quality_resilience) * trend_factor * viral_factor * interest * stream_mod;
    m.max(PUBLIC_MULTIPLIER_FLOOR)
}

/// Everything a release produces in one week.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct WeeklyFigures {
    pub retention: f64,
    pub weekly_videos: u64,
    pub viral: bool,
    pub public_multiplier: f64,
    pub streams_domestic: u64,
    pub streams_secondary: u64,
    pub streams_global: u64,
    pub unique_listeners: u64,
    pub streaming_sales: u64,
    pub physical: u64,
}

impl WeeklyFigures {
    pub fn sales_points(&self) -> u64 {
        self.physical + self.streaming_sales
    }
}

fn floor_u64(x: f64) -> u64 {
    if x.is_finite() && x > 0.0 {
        x.floor().min(u64::MAX as f64) as u64
    } else {
        0
    }
}

/// Short-video uploads this week. `draw` is uniform in [0, 1).
pub fn weekly_videos(style: ReleaseStyle, viral: bool, retention: f64, draw: f64) -> u64 {
    let base = match style {
        ReleaseStyle::Commercial => 500.0,
        ReleaseStyle::Conceptual => 100.0,
    };
    let viral_boost = if viral { 5.0 } else { 1.0 };
    floor_u64(base * draw * viral_boost * retention)
}

/// Physical units for an album still in its sales window.
pub fn physical_units(kind: ReleaseKind, age: i32, quality: u8, fandom: &Fandom) -> u64 {
    if kind != ReleaseKind::Album || !(0..PHYSICAL_SALES_WEEKS).contains(&age) {
        return 0;
    }
    let decay = 0.5f64.powi(age);
    floor_u64(
        fandom.size as f64 * (f64::from(fandom.buying_power) / 100.0) * (f64::from(quality) / 50.0) * decay,
    )
}

/// Compute a release's figures for `week` without mutating it.
///
/// Returns `None` while the release is still scheduled (`week < date_released`).
/// Consumes exactly one uniform draw from `rng` otherwise.
pub fn project_week<R: Rng + ?Sized>(
    release: &Release,
    fandom: &Fandom,
    trend: Concept,
    week: i32,
    rng: &mut R,
) -> Option<WeeklyFigures> {
    let age = release.age(week);
    if age < 0 {
        return None;
    }
    let retention = time_retention(age, release.style, release.reviews.critic_score);

    let videos = weekly_videos(release.style, release.is_viral, retention, rng.gen::<f64>());
    let viral = release.is_viral || videos > VIRAL_VIDEO_THRESHOLD;

    let pm = public_multiplier(&Popularity {
        retention,
        quality: release.quality,
        trending: release.concept == trend,
        viral,
        public_interest: release.marketing.public_interest,
        style: release.style,
    });
    let (dom_mult, glob_mult) = market_multipliers(release.market_focus);

    let domestic_base = fandom.size as f64 * (f64::from(fandom.streaming_power) / 50.0) * 10.0;
    let tiktok_bonus = videos as f64 * 100.0;
    let playlist_bonus = release.marketing.playlist_reach as f64 * 0.05;

    let streams_domestic = floor_u64(domestic_base * pm * dom_mult);
    let streams_global = floor_u64((domestic_base * pm * 2.0 + playlist_bonus + tiktok_bonus) * glob_mult);
    let streams_secondary = floor_u64(domestic_base * pm * 0.5 * dom_mult);

    Some(WeeklyFigures {
        retention,
        weekly_videos: videos,
        viral,
        public_multiplier: pm,
        streams_domestic,
        streams_secondary,
        streams_global,
        unique_listeners: floor_u64(streams_domestic as f64 * 0.3),
        streaming_sales: (streams_domestic + streams_global) / STREAMS_PER_SALES_UNIT,
        physical: physical_units(release.kind, age, release.quality, fandom),
    })
}

/// Fold a week's figures into the release's running totals.
pub fn apply_week(release: &mut Release, f: &WeeklyFigures) {
    release.is_viral = release.is_viral || f.viral;

    let social = &mut release.social;
    social.weekly_videos = f.weekly_videos;
    social.total_videos += f.weekly_videos;
    social.total_views += f.weekly_videos * VIEWS_PER_VIDEO;

    let s = &mut release.stats;
    s.weekly_physical = f.physical;
    s.total_physical += f.physical;
    s.weekly_sales_points = f.sales_points();
    s.total_sales_points += f.sales_points();
    s.weekly_streams_domestic = f.streams_domestic;
    s.total_streams_domestic += f.streams_domestic;
    s.unique_listeners_domestic = f.unique_listeners;
    s.weekly_streams_secondary = f.streams_secondary;
    s.total_streams_secondary += f.streams_secondary;
    s.weekly_streams_global = f.streams_global;
    s.total_streams_global += f.streams_global;
    s.mv_views += f.streams_global;

    release.marketing.public_interest = release
        .marketing
        .public_interest
        .saturating_sub(PUBLIC_INTEREST_DECAY);
}

/// Advance one release by one week. Returns whether it was simulated.
pub fn decay_release<R: Rng + ?Sized>(
    release: &mut Release,
    fandom: &Fandom,
    trend: Concept,
    week: i32,
    rng: &mut R,
) -> bool {
    match project_week(release, fandom, trend, week, rng) {
        Some(f) => {
            apply_week(release, &f);
            true
        }
        None => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;
    use sim_core::{Owner, ReleaseId};

    fn fandom(size: u64, streaming_power: u8) -> Fandom {
        Fandom {
            size,
            streaming_power,
            ..Fandom::neutral()
        }
    }

    fn release(style: ReleaseStyle, quality: u8, date: i32) -> Release {
        let mut r = Release::new(
            ReleaseId("r".to_string()),
            Owner::Player,
            "Testers",
            "Signal",
            Concept::Dark,
            date,
        );
        r.style = style;
        r.quality = quality;
        r
    }

    #[test]
    fn retention_bands() {
        assert_eq!(time_retention(0, ReleaseStyle::Commercial, 60), 1.0);
        let r4 = time_retention(4, ReleaseStyle::Commercial, 60);
        assert!((r4 - (1.0 - 4.0 * 0.03 * 1.2)).abs() < 1e-12);
        let r6 = time_retention(6, ReleaseStyle::Conceptual, 60);
        assert!((r6 - 0.88 * 0.68f64.powi(2)).abs() < 1e-12);
        let r15 = time_retention(15, ReleaseStyle::Conceptual, 60);
        assert!((r15 - 0.25 * 0.98f64.powi(3)).abs() < 1e-12);
    }

    #[test]
    fn conceptual_drops_into_mid_band() {
        let before = time_retention(4, ReleaseStyle::Conceptual, 60);
        let after = time_retention(5, ReleaseStyle::Conceptual, 60);
        assert!(before >= after);
    }

    #[test]
    fn commercial_drops_into_long_tail() {
        let before = time_retention(12, ReleaseStyle::Commercial, 60);
        let after = time_retention(13, ReleaseStyle::Commercial, 60);
        assert!(before >= after);
    }

    #[test]
    fn acclaim_slows_long_tail() {
        let acclaimed = time_retention(13, ReleaseStyle::Commercial, 85);
        let panned = time_retention(13, ReleaseStyle::Commercial, 40);
        assert!((acclaimed - 0.25 * 0.98 * 0.7).abs() < 1e-12);
        assert!((panned - 0.25 * 0.98 * 1.3).abs() < 1e-12);
        // Long-tail factors compound; acclaim wins once the base drops below 1.
        assert!(time_retention(20, ReleaseStyle::Commercial, 85) < time_retention(13, ReleaseStyle::Commercial, 85));
        assert!(time_retention(20, ReleaseStyle::Commercial, 40) > time_retention(13, ReleaseStyle::Commercial, 40));
    }

    #[test]
    fn launch_week_domestic_streams() {
        // Commercial, quality 80, age 0, no trend, not viral, 5000 fans at power 80.
        let r = release(ReleaseStyle::Commercial, 80, 3);
        let mut rng = ChaCha8Rng::seed_from_u64(1);
        let f = project_week(&r, &fandom(5000, 80), Concept::Cute, 3, &mut rng).unwrap();
        assert!((f.public_multiplier - 1.32 * 1.2).abs() < 1e-9);
        // 5000 × (80 / 50) × 10 × 1.584
        assert_eq!(f.streams_domestic, 126_720);
        assert_eq!(f.streams_secondary, f.streams_domestic / 2);
        assert!(!f.viral);
    }

    #[test]
    fn scheduled_release_is_untouched() {
        let mut r = release(ReleaseStyle::Commercial, 70, 10);
        r.stats.weekly_streams_domestic = 1234;
        r.marketing.public_interest = 20;
        let before = r.clone();
        let mut rng = ChaCha8Rng::seed_from_u64(3);
        assert!(!decay_release(&mut r, &Fandom::neutral(), Concept::Dark, 9, &mut rng));
        assert_eq!(r, before);
    }

    #[test]
    fn virality_is_sticky() {
        let mut r = release(ReleaseStyle::Conceptual, 40, 0);
        r.is_viral = true;
        let mut rng = ChaCha8Rng::seed_from_u64(9);
        for week in 0..30 {
            decay_release(&mut r, &Fandom::neutral(), Concept::Cute, week, &mut rng);
            assert!(r.is_viral);
        }
    }

    #[test]
    fn viral_threshold_counts_this_week() {
        // 500 * 0.99 * 5 * 1.0 = 2475 videos for an already-viral launch.
        assert!(weekly_videos(ReleaseStyle::Commercial, true, 1.0, 0.99) > VIRAL_VIDEO_THRESHOLD);
        // Organic uploads alone cannot cross the threshold.
        assert!(weekly_videos(ReleaseStyle::Commercial, false, 1.0, 0.999) <= VIRAL_VIDEO_THRESHOLD);
    }

    #[test]
    fn trend_and_interest_raise_popularity() {
        let base = Popularity {
            retention: 0.9,
            quality: 60,
            trending: false,
            viral: false,
            public_interest: 0,
            style: ReleaseStyle::Conceptual,
        };
        let trending = Popularity { trending: true, ..base };
        let hyped = Popularity { public_interest: 25, ..base };
        assert!((public_multiplier(&trending) / public_multiplier(&base) - 1.2).abs() < 1e-9);
        assert!((public_multiplier(&hyped) / public_multiplier(&base) - 2.0).abs() < 1e-9);
    }

    #[test]
    fn multiplier_has_floor() {
        let p = Popularity {
            retention: -5.0,
            quality: 0,
            trending: false,
            viral: false,
            public_interest: 0,
            style: ReleaseStyle::Commercial,
        };
        assert_eq!(public_multiplier(&p), 0.01);
    }

    #[test]
    fn albums_sell_physical_for_eight_weeks() {
        let f = Fandom {
            size: 10_000,
            buying_power: 50,
            ..Fandom::neutral()
        };
        assert_eq!(physical_units(ReleaseKind::Album, 0, 100, &f), 10_000);
        assert_eq!(physical_units(ReleaseKind::Album, 1, 100, &f), 5_000);
        assert_eq!(physical_units(ReleaseKind::Album, 8, 100, &f), 0);
        assert_eq!(physical_units(ReleaseKind::Single, 0, 100, &f), 0);
    }

    #[test]
    fn sales_points_keep_physical_separate() {
        let mut r = release(ReleaseStyle::Commercial, 90, 0);
        r.kind = ReleaseKind::Album;
        let fan = Fandom {
            size: 200_000,
            buying_power: 80,
            streaming_power: 80,
            ..Fandom::neutral()
        };
        let mut rng = ChaCha8Rng::seed_from_u64(5);
        decay_release(&mut r, &fan, Concept::Dark, 0, &mut rng);
        let s = &r.stats;
        let sea = (s.weekly_streams_domestic + s.weekly_streams_global) / STREAMS_PER_SALES_UNIT;
        assert_eq!(s.weekly_physical, 288_000);
        assert_eq!(s.weekly_sales_points, s.weekly_physical + sea);
        assert_eq!(s.mv_views, s.weekly_streams_global);
    }

    #[test]
    fn public_interest_decays_to_zero() {
        let mut r = release(ReleaseStyle::Commercial, 60, 0);
        r.marketing.public_interest = 12;
        let mut rng = ChaCha8Rng::seed_from_u64(5);
        for (week, expected) in [(0, 7), (1, 2), (2, 0), (3, 0)] {
            decay_release(&mut r, &Fandom::neutral(), Concept::Cute, week, &mut rng);
            assert_eq!(r.marketing.public_interest, expected);
        }
    }

    #[test]
    fn market_focus_shifts_streams() {
        let mut dom = release(ReleaseStyle::Commercial, 70, 0);
        dom.market_focus = MarketFocus::Domestic;
        let mut glob = dom.clone();
        glob.market_focus = MarketFocus::Global;
        let fan = fandom(50_000, 60);
        let a = project_week(&dom, &fan, Concept::Cute, 0, &mut ChaCha8Rng::seed_from_u64(2)).unwrap();
        let b = project_week(&glob, &fan, Concept::Cute, 0, &mut ChaCha8Rng::seed_from_u64(2)).unwrap();
        assert!(a.streams_domestic > b.streams_domestic);
        assert!(a.streams_global < b.streams_global);
    }

    proptest! {
        #[test]
        fn totals_accumulate(weeks in 1i32..30, seed in 0u64..1000) {
            let mut r = release(ReleaseStyle::Commercial, 75, 0);
            let mut rng = ChaCha8Rng::seed_from_u64(seed);
            let mut sum = 0u64;
            for w in 0..weeks {
                decay_release(&mut r, &fandom(20_000, 70), Concept::Cute, w, &mut rng);
                sum += r.stats.weekly_streams_domestic;
            }
            prop_assert_eq!(r.stats.total_streams_domestic, sum);
        }

        #[test]
        fn mid_band_decays_for_conceptual(age in 5i32..12) {
            let a = time_retention(age, ReleaseStyle::Conceptual, 60);
            let b = time_retention(age + 1, ReleaseStyle::Conceptual, 60);
            prop_assert!(b < a);
        }
    }
}
