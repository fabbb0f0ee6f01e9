//! Forgeworld - Idle wave-combat demo
//!
//! Drives the combat simulation headless at a display-like frame rate.
//! An optional image path argument runs the capture flow against the scan
//! backend: the image is classified and a skill result triggers the
//! matching ultimate in combat.

mod settings;

use std::panic::{catch_unwind, AssertUnwindSafe};
use std::time::{Duration, Instant};

use anyhow::Result;
use rand::RngCore;
use tracing::{info, warn, Level};
use tracing_subscriber::FmtSubscriber;

use forge_core::{ClockConfig, FrameClock};
use forge_game::{EntityStats, Hero, Simulation, Stage};
use forge_integration::{PendingRequest, ScanClient, ScanMode, ScanResult};

use crate::settings::GameSettings;

/// Target frame interval for the headless loop
const FRAME_INTERVAL: Duration = Duration::from_millis(16);

/// How long the demo runs before exiting, in simulation milliseconds
const DEMO_DURATION_MS: f64 = 300_000.0;

fn build_simulation(settings: &GameSettings) -> Simulation {
    let seed = if settings.simulation.seed == 0 {
        rand::thread_rng().next_u64()
    } else {
        settings.simulation.seed
    };
    info!(seed, "seeding simulation");

    let mut sim = Simulation::new(seed);
    sim.hero = Hero::new(
        EntityStats {
            max_hp: settings.hero.max_hp,
            hp: settings.hero.max_hp,
            atk: settings.hero.atk,
            def: settings.hero.def,
            crit_rate: settings.hero.crit_rate,
            crit_dmg: settings.hero.crit_dmg,
            ..Default::default()
        },
        settings.hero.attacks_per_second,
    );
    sim
}

/// Submit the image at `path` for skill classification, spending one film
fn submit_scan(
    client: &ScanClient,
    sim: &mut Simulation,
    path: &str,
) -> Result<Option<PendingRequest<ScanResult>>> {
    if !sim.film.consume() {
        warn!("no film left, skipping scan");
        return Ok(None);
    }
    let image = std::fs::read(path)?;
    sim.ui.analyzing = true;
    Ok(Some(client.scan(image, ScanMode::ScanSkill)))
}

/// Poll the in-flight scan; returns true once it has resolved
fn poll_scan(sim: &mut Simulation, pending: &PendingRequest<ScanResult>, now_ms: f64) -> bool {
    let Some(outcome) = pending.try_recv() else {
        return false;
    };
    sim.ui.analyzing = false;
    match outcome {
        Ok(result) => {
            info!(
                item = %result.flavor.name,
                kind = %result.analysis.kind,
                "scan classified"
            );
            if let Some(skill) = result.skill_name() {
                sim.trigger_skill(skill, now_ms);
            }
        }
        Err(e) => warn!("scan failed: {}", e),
    }
    true
}

fn main() -> Result<()> {
    // Initialize logging
    let subscriber = FmtSubscriber::builder()
        .with_max_level(Level::INFO)
        .with_target(false)
        .finish();
    tracing::subscriber::set_global_default(subscriber)?;

    info!("Starting Forgeworld...");

    let settings = GameSettings::load();
    let scan_client = ScanClient::new(settings.backend.base_url.clone())?;

    let mut clock = FrameClock::new(ClockConfig {
        time_scale: settings.simulation.time_scale,
        max_delta_ms: settings.simulation.max_delta_ms,
    });
    let mut sim = build_simulation(&settings);

    let scan_path = std::env::args().nth(1);
    let mut pending_scan: Option<PendingRequest<ScanResult>> = None;
    let mut scan_armed = scan_path.is_some();

    let start = Instant::now();
    loop {
        let timestamp_ms = start.elapsed().as_secs_f64() * 1000.0;
        clock.tick(timestamp_ms);
        let now_ms = clock.now_ms();

        // One component failing must not kill the scheduling chain; the
        // loop always re-arms
        let outcome = catch_unwind(AssertUnwindSafe(|| sim.tick(now_ms)));
        if outcome.is_err() {
            warn!(now_ms, "tick failed, continuing");
        }

        // Kick off the capture flow once combat is underway
        if scan_armed && sim.wave.stage == Stage::Fighting {
            if let Some(path) = &scan_path {
                pending_scan = submit_scan(&scan_client, &mut sim, path)?;
            }
            scan_armed = false;
        }
        if let Some(pending) = &pending_scan {
            if poll_scan(&mut sim, pending, now_ms) {
                pending_scan = None;
            }
        }

        if sim.wave.stage == Stage::GameOver || now_ms >= DEMO_DURATION_MS {
            break;
        }
        std::thread::sleep(FRAME_INTERVAL);
    }

    let survival_secs = sim
        .wave
        .survival_ms
        .unwrap_or_else(|| clock.now_ms())
        / 1000.0;
    info!(
        wave = sim.wave.wave,
        kills = sim.kills,
        survival_secs,
        hero_hp = sim.hero.stats.hp,
        "run finished"
    );

    Ok(())
}
