//! Chart ranking across the three markets.

use sim_core::{ChartPosition, Market, Release};

/// Rank every active release in `market` and stamp current/peak/history.
///
/// Releases are sorted by the market's metric, descending, with a stable
/// sort so equal metrics keep catalog order. Positions beyond `chart_size`
/// are `Unranked`. Releases still scheduled for a later week are skipped.
pub fn rank_market(releases: &mut [Release], market: Market, week: i32, chart_size: u32) {
    let mut order: Vec<usize> = (0..releases.len())
        .filter(|&i| releases[i].is_active(week))
        .collect();
    order.sort_by(|&a, &b| {
        releases[b]
            .stats
            .chart_metric(market)
            .cmp(&releases[a].stats.chart_metric(market))
    });
    for (pos, idx) in order.into_iter().enumerate() {
        let rank = pos as u32 + 1;
        let position = if rank <= chart_size {
            ChartPosition::Ranked(rank)
        } else {
            ChartPosition::Unranked
        };
        releases[idx].charts.get_mut(market).record(week, position);
    }
}

/// Rank all three markets independently.
pub fn rank_all(releases: &mut [Release], week: i32, chart_size: u32) {
    for market in Market::ALL {
        rank_market(releases, market, week, chart_size);
    }
}

/// Releases currently on a chart, best first.
pub fn chart_view(releases: &[Release], market: Market) -> Vec<&Release> {
    let mut on_chart: Vec<&Release> = releases
        .iter()
        .filter(|r| r.charts.get(market).current.is_ranked())
        .collect();
    on_chart.sort_by_key(|r| r.charts.get(market).current.rank());
    on_chart
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use sim_core::{Concept, Owner, ReleaseId};

    fn release(id: usize, listeners: u64, date: i32) -> Release {
        let mut r = Release::new(
            ReleaseId(format!("r{id}")),
            Owner::Player,
            "Testers",
            format!("Song {id}"),
            Concept::Cute,
            date,
        );
        r.stats.unique_listeners_domestic = listeners;
        r.stats.weekly_streams_secondary = listeners;
        r.stats.weekly_streams_global = 1000 - listeners.min(1000);
        r
    }

    #[test]
    fn ranks_descending_by_metric() {
        let mut rs = vec![release(0, 10, 0), release(1, 30, 0), release(2, 20, 0)];
        rank_market(&mut rs, Market::Domestic, 1, 200);
        let ranks: Vec<_> = rs.iter().map(|r| r.charts.domestic.current.rank()).collect();
        assert_eq!(ranks, vec![Some(3), Some(1), Some(2)]);
    }

    #[test]
    fn ties_keep_catalog_order() {
        let mut rs = vec![release(0, 5, 0), release(1, 5, 0), release(2, 5, 0)];
        rank_market(&mut rs, Market::Domestic, 1, 200);
        let ranks: Vec<_> = rs.iter().map(|r| r.charts.domestic.current.rank()).collect();
        assert_eq!(ranks, vec![Some(1), Some(2), Some(3)]);
    }

    #[test]
    fn markets_are_independent() {
        let mut rs = vec![release(0, 900, 0), release(1, 100, 0)];
        rank_all(&mut rs, 1, 200);
        assert_eq!(rs[0].charts.domestic.current, ChartPosition::Ranked(1));
        assert_eq!(rs[0].charts.global.current, ChartPosition::Ranked(2));
        assert_eq!(rs[1].charts.global.current, ChartPosition::Ranked(1));
    }

    #[test]
    fn cutoff_drops_off_chart_but_keeps_peak() {
        let mut rs: Vec<Release> = (0..5).map(|i| release(i, 100 - i as u64, 0)).collect();
        rank_market(&mut rs, Market::Domestic, 1, 3);
        assert_eq!(rs[4].charts.domestic.current, ChartPosition::Unranked);
        assert!(rs[4].charts.domestic.history.is_empty());

        // Week 2: the former #1 collapses below the cutoff.
        rs[0].stats.unique_listeners_domestic = 0;
        rank_market(&mut rs, Market::Domestic, 2, 3);
        let run = &rs[0].charts.domestic;
        assert_eq!(run.current, ChartPosition::Unranked);
        assert_eq!(run.peak, ChartPosition::Ranked(1));
        assert_eq!(run.history.len(), 1);
    }

    #[test]
    fn scheduled_releases_are_not_ranked() {
        let mut rs = vec![release(0, 10, 0), release(1, 1_000, 5)];
        rank_market(&mut rs, Market::Domestic, 1, 200);
        assert_eq!(rs[0].charts.domestic.current, ChartPosition::Ranked(1));
        assert_eq!(rs[1].charts.domestic, Default::default());
    }

    #[test]
    fn chart_view_is_sorted() {
        let mut rs = vec![release(0, 10, 0), release(1, 30, 0), release(2, 20, 0)];
        rank_all(&mut rs, 1, 2);
        let view: Vec<_> = chart_view(&rs, Market::Domestic).iter().map(|r| r.id.0.clone()).collect();
        assert_eq!(view, vec!["r1", "r2"]);
    }

    proptest! {
        #[test]
        fn rank_order_matches_metric(metrics in proptest::collection::vec(0u64..50, 1..60), size in 1u32..40) {
            let mut rs: Vec<Release> = metrics.iter().enumerate().map(|(i, &m)| release(i, m, 0)).collect();
            rank_market(&mut rs, Market::Domestic, 1, size);
            for a in &rs {
                for b in &rs {
                    let (ma, mb) = (a.stats.unique_listeners_domestic, b.stats.unique_listeners_domestic);
                    if ma > mb {
                        match (a.charts.domestic.current.rank(), b.charts.domestic.current.rank()) {
                            (Some(ra), Some(rb)) => prop_assert!(ra < rb),
                            (Some(_), None) | (None, None) => {}
                            (None, Some(_)) => prop_assert!(false, "worse release ranked above better one"),
                        }
                    }
                }
            }
        }

        #[test]
        fn peak_only_improves(weeks in proptest::collection::vec(proptest::collection::vec(0u64..100, 6), 1..12)) {
            let mut rs: Vec<Release> = (0..6).map(|i| release(i, 0, 0)).collect();
            let mut prev_peaks: Vec<Option<u32>> = vec![None; 6];
            for (w, metrics) in weeks.iter().enumerate() {
                for (r, &m) in rs.iter_mut().zip(metrics) {
                    r.stats.unique_listeners_domestic = m;
                }
                rank_market(&mut rs, Market::Domestic, w as i32 + 1, 4);
                for (r, prev) in rs.iter().zip(prev_peaks.iter_mut()) {
                    let peak = r.charts.domestic.peak.rank();
                    if let (Some(p), Some(q)) = (*prev, peak) {
                        prop_assert!(q <= p);
                    }
                    prop_assert!(prev.is_none() || peak.is_some());
                    *prev = peak;
                }
            }
        }
    }
}
