//! Initial competitor roster and pre-history catalog.

use content::random_title;
use rand::Rng;
use sim_core::{
    Agency, ArtistId, BotStrategy, ChartEntry, ChartPosition, CompetitorArtist, Concept, Fandom,
    GroupType, MarketFocus, Owner, Release, ReleaseId, ReleaseKind, ReleaseStyle,
};

const AGENCY_NAMES: [&str; 6] = ["Starlight", "Sapphire", "Hybridge", "JNP", "Yellow Gate", "Cubic"];
const ARTIST_NAMES: [&str; 6] = ["LUMA", "Aster", "NewDays", "Stray Wolves", "Velvet Pink", "I-DLE"];
const GROUP_TYPES: [GroupType; 6] = [
    GroupType::GirlGroup,
    GroupType::GirlGroup,
    GroupType::GirlGroup,
    GroupType::BoyGroup,
    GroupType::GirlGroup,
    GroupType::GirlGroup,
];
const STRATEGIES: [BotStrategy; 3] = [BotStrategy::Aggressive, BotStrategy::Quality, BotStrategy::Viral];

/// Generate `count` rival agencies with one artist each.
///
/// Boy groups lean global and buy physically; girl groups lean domestic and
/// stream.
pub fn seed_competitors<R: Rng + ?Sized>(count: usize, rng: &mut R) -> Vec<Agency> {
    (0..count)
        .map(|i| {
            let group_type = GROUP_TYPES.get(i).copied().unwrap_or(GroupType::GirlGroup);
            let boy = group_type == GroupType::BoyGroup;
            let artist = CompetitorArtist {
                id: ArtistId(format!("art-{i}")),
                name: ARTIST_NAMES
                    .get(i)
                    .map_or_else(|| format!("Artist {i}"), |n| n.to_string()),
                group_type,
                concept: Concept::ALL[rng.gen_range(0..Concept::ALL.len())],
                skill_level: rng.gen_range(70..100),
                fandom: Fandom {
                    size: rng.gen_range(50_000..550_000),
                    name: "Fans".to_string(),
                    buying_power: if boy { 90 } else { 40 },
                    streaming_power: if boy { 50 } else { 90 },
                    loyalty: 70,
                    leaning: if boy { MarketFocus::Global } else { MarketFocus::Domestic },
                },
            };
            Agency {
                id: format!("comp-{i}"),
                name: AGENCY_NAMES
                    .get(i)
                    .map_or_else(|| format!("Agency {i}"), |n| n.to_string()),
                reputation: rng.gen_range(60..95),
                strategy: STRATEGIES[rng.gen_range(0..STRATEGIES.len())],
                artists: vec![artist],
            }
        })
        .collect()
}

/// Back-catalog releases dated before week 1 so the first charts are populated.
///
/// Each release is 1-20 weeks old with synthetic totals and a synthetic
/// domestic chart run that climbs then falls away from its start rank.
pub fn seed_back_catalog<R: Rng + ?Sized>(agencies: &[Agency], count: usize, rng: &mut R) -> Vec<Release> {
    let artists: Vec<&CompetitorArtist> = agencies.iter().flat_map(|a| a.artists.iter()).collect();
    if artists.is_empty() {
        return Vec::new();
    }
    (0..count)
        .map(|i| {
            let artist = artists[rng.gen_range(0..artists.len())];
            let is_album = rng.gen_bool(0.4);
            let weeks_ago: i32 = rng.gen_range(1..=20);
            let concept = Concept::ALL[rng.gen_range(0..Concept::ALL.len())];
            let quality: u8 = rng.gen_range(60..100);
            let start_rank = (100 - i32::from(quality) - rng.gen_range(0..20)).max(1) as u32;

            let mut history = Vec::with_capacity(weeks_ago as usize + 1);
            for w in (0..=weeks_ago).rev() {
                let drift = ((f64::from(w) - f64::from(weeks_ago) / 2.0).abs() * 8.0).floor() as u32;
                history.push(ChartEntry {
                    week: 1 - w,
                    rank: (start_rank + drift).min(200),
                });
            }

            let fandom = &artist.fandom;
            let total_streams = fandom.size * weeks_ago as u64 * 5;
            let multiplier = if is_album { 1.5 } else { 0.5 };
            let total_sales =
                (fandom.size as f64 * (f64::from(fandom.buying_power) / 100.0) * multiplier).floor() as u64;

            let mut r = Release::new(
                ReleaseId(format!("hist-{i}")),
                Owner::Competitor(artist.id.clone()),
                artist.name.clone(),
                random_title(concept, rng),
                concept,
                1 - weeks_ago,
            );
            r.style = if rng.gen_bool(0.5) {
                ReleaseStyle::Commercial
            } else {
                ReleaseStyle::Conceptual
            };
            r.market_focus = [MarketFocus::Domestic, MarketFocus::Global, MarketFocus::Balanced][rng.gen_range(0..3)];
            r.kind = if is_album { ReleaseKind::Album } else { ReleaseKind::Single };
            r.quality = quality;
            r.stats.total_physical = total_sales;
            r.stats.total_sales_points = total_sales;
            r.stats.total_streams_domestic = total_streams;
            r.stats.unique_listeners_domestic = u64::from(201 - start_rank) * 2000;
            r.stats.total_streams_secondary = total_streams * 4 / 5;
            r.stats.total_streams_global = total_streams * 2;
            r.stats.mv_views = total_streams / 2;
            r.social.total_videos = total_streams / 100;
            r.social.total_views = total_streams / 2;
            r.reviews.critic_score = rng.gen_range(60..90);
            r.reviews.public_score = rng.gen_range(70..90);
            r.reviews.summary = "A solid release from the archives.".to_string();
            r.show_wins = if quality > 90 { rng.gen_range(0..3) } else { 0 };

            let current = history.last().map_or(ChartPosition::Unranked, |e| ChartPosition::Ranked(e.rank));
            r.charts.domestic.current = current;
            r.charts.domestic.peak = ChartPosition::Ranked(start_rank);
            r.charts.domestic.history = history;
            r.charts.secondary.peak = ChartPosition::Ranked(start_rank);
            if rng.gen_bool(0.6) {
                r.charts.secondary.current = ChartPosition::Ranked((start_rank + 5).min(200));
            }
            r.charts.global.peak = ChartPosition::Ranked(start_rank + 10);
            if rng.gen_bool(0.5) {
                r.charts.global.current = ChartPosition::Ranked((start_rank + 10).min(200));
            }
            r
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;
    use sim_core::{validate_world, World};

    #[test]
    fn competitors_follow_group_profiles() {
        let mut rng = ChaCha8Rng::seed_from_u64(1);
        let agencies = seed_competitors(5, &mut rng);
        assert_eq!(agencies.len(), 5);
        let boys = &agencies[3].artists[0];
        assert_eq!(boys.group_type, GroupType::BoyGroup);
        assert_eq!(boys.fandom.leaning, MarketFocus::Global);
        assert_eq!(boys.fandom.buying_power, 90);
        for a in agencies.iter().flat_map(|a| &a.artists) {
            assert!((70..100).contains(&a.skill_level));
            assert!((50_000..550_000).contains(&a.fandom.size));
        }
    }

    #[test]
    fn roster_beyond_name_table() {
        let mut rng = ChaCha8Rng::seed_from_u64(2);
        let agencies = seed_competitors(8, &mut rng);
        assert_eq!(agencies[7].name, "Agency 7");
        assert_eq!(agencies[7].artists[0].name, "Artist 7");
    }

    #[test]
    fn back_catalog_is_valid_history() {
        let mut rng = ChaCha8Rng::seed_from_u64(3);
        let mut w = World::new("Co", "G", 0);
        w.agencies = seed_competitors(5, &mut rng);
        w.releases = seed_back_catalog(&w.agencies, 40, &mut rng);
        validate_world(&w).unwrap();
        assert_eq!(w.releases.len(), 40);
        for r in &w.releases {
            assert!(r.date_released <= 0);
            let run = &r.charts.domestic;
            assert!(!run.history.is_empty());
            assert_eq!(run.history.last().map(|e| e.week), Some(1));
            assert!(run.history.iter().all(|e| (1..=200).contains(&e.rank)));
            assert!(w.artist(r.artist_id().unwrap()).is_some());
        }
    }

    #[test]
    fn no_artists_no_catalog() {
        let mut rng = ChaCha8Rng::seed_from_u64(4);
        assert!(seed_back_catalog(&[], 10, &mut rng).is_empty());
    }
}
