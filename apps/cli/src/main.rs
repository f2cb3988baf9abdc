#![deny(warnings)]

//! Headless CLI: load a scenario, optionally auto-produce singles, and run N weeks.

use anyhow::{bail, Context, Result};
use content::{random_title, Offline, Resilient};
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use sim_core::{MarketFocus, ReleaseKind, ReleaseStyle, World};
use sim_runtime::{
    advance_week, debut_trainee, enroll_trainees, produce_release, reject, BudgetTier, ReleaseOrder,
    Scenario, SimSnapshot,
};
use std::time::Duration;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

const BUNDLED_SCENARIO: &str = include_str!("../../../assets/scenarios/default.yaml");

#[derive(Debug, Default)]
struct Args {
    scenario: Option<String>,
    weeks: Option<u32>,
    seed: Option<u64>,
    release_every: Option<u32>,
    json: bool,
}

fn parse_args() -> Result<Args> {
    let mut args = Args::default();
    let mut it = std::env::args().skip(1);
    while let Some(arg) = it.next() {
        match arg.as_str() {
            "--scenario" => args.scenario = it.next(),
            "--weeks" => args.weeks = Some(parse_value(&arg, it.next())?),
            "--seed" => args.seed = Some(parse_value(&arg, it.next())?),
            "--release-every" => args.release_every = Some(parse_value(&arg, it.next())?),
            "--json" => args.json = true,
            other => bail!("unknown argument: {other}"),
        }
    }
    Ok(args)
}

fn parse_value<T: std::str::FromStr>(flag: &str, value: Option<String>) -> Result<T> {
    let v = value.with_context(|| format!("{flag} needs a value"))?;
    v.parse()
        .map_err(|_| anyhow::anyhow!("invalid value for {flag}: {v}"))
}

fn load_scenario(path: Option<&str>) -> Result<Scenario> {
    match path {
        Some(p) => Scenario::from_path(p).with_context(|| format!("loading {p}")),
        None => Ok(Scenario::from_yaml_str(BUNDLED_SCENARIO)?),
    }
}

/// Debut everyone on the trainee roster.
fn debut_all(mut world: World) -> Result<World> {
    let ids: Vec<String> = world.trainees.iter().map(|t| t.id.clone()).collect();
    for id in ids {
        world = debut_trainee(&world, &id)?;
    }
    Ok(world)
}

#[tokio::main]
async fn main() -> Result<()> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt().with_env_filter(filter).init();

    let args = parse_args()?;
    info!(?args, "starting CLI");

    let mut scenario = load_scenario(args.scenario.as_deref())?;
    if let Some(seed) = args.seed {
        scenario.config.rng_seed = seed;
    }
    let cfg = scenario.config.clone();
    let mut rng = ChaCha8Rng::seed_from_u64(cfg.rng_seed);
    let content = Resilient::new(Offline).with_timeout(Duration::from_secs(5));

    let mut world = scenario.into_world(&mut rng)?;
    let profiles = content.trainees(scenario.starting_trainees).await;
    world = debut_all(enroll_trainees(&world, profiles))?;

    let weeks = args.weeks.unwrap_or(12);
    let release_every = args.release_every.unwrap_or(0);
    let mut net_income = 0;
    for i in 0..weeks {
        if release_every > 0 && i % release_every == 0 {
            let order = ReleaseOrder {
                title: random_title(world.current_trend, &mut rng),
                concept: world.current_trend,
                style: ReleaseStyle::Commercial,
                market_focus: MarketFocus::Balanced,
                kind: ReleaseKind::Single,
                budget: BudgetTier::Budget,
                teasing: false,
            };
            world = match produce_release(&world, &order, &content).await {
                Ok(next) => next,
                Err(e) => {
                    warn!(error = %e, title = %order.title, "auto release rejected");
                    reject(&world, "Release Failed", &e)
                }
            };
        }

        let (next, report) = advance_week(&world, &cfg, &mut rng)?;
        net_income += report.settlement.net();
        if !args.json {
            println!(
                "week {:>3} | money: {:>13} | net: {:>11} | fans: {:>7} | rivals: {} | player wins: {}",
                report.week,
                next.money,
                report.settlement.net(),
                next.fandom.size,
                report.bot_releases.len(),
                report.player_wins()
            );
        }
        world = next;
    }

    let snap = SimSnapshot::of(&world, weeks, net_income);
    if args.json {
        println!("{}", serde_json::to_string_pretty(&snap)?);
    } else {
        println!(
            "KPI | weeks: {} | money: {} | net: {} | fans: {} | releases: {} | streams: {} | show wins: {} | best peak: {}",
            snap.weeks_run,
            snap.money,
            snap.net_income,
            snap.fans,
            snap.player_releases,
            snap.player_streams,
            snap.player_show_wins,
            snap.best_domestic_peak.map_or_else(|| "-".to_string(), |p| format!("#{p}"))
        );
    }
    Ok(())
}
