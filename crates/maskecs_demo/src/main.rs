//! # MASKECS Demo
//!
//! Spawns a seeded population, gives roughly half of it every component,
//! checks that the query engine finds exactly that half, then runs a
//! fixed-rate update loop that moves and "draws" entities on the console.
//!
//! Usage: `maskecs_demo [config.toml]`

#![deny(missing_docs)]
#![deny(unsafe_code)]

mod components;
mod config;
mod error;
mod hooks;

use std::path::Path;
use std::process::ExitCode;
use std::time::Instant;

use maskecs_core::{EntityId, System};
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use tracing::{error, info};
use tracing_subscriber::FmtSubscriber;

use components::{Position, Sprite, Velocity};
use config::DemoConfig;
use error::{DemoError, DemoResult};
use hooks::{Draw, Movement};

fn main() -> ExitCode {
    let path = std::env::args().nth(1);
    let config = match DemoConfig::load(path.as_deref().map(Path::new)) {
        Ok(config) => config,
        Err(err) => {
            eprintln!("maskecs_demo: {err}");
            return ExitCode::FAILURE;
        }
    };

    // validate() already accepted the level
    let level = config.level().unwrap_or(tracing::Level::INFO);
    let subscriber = FmtSubscriber::builder()
        .with_max_level(level)
        .with_target(false)
        .finish();
    if tracing::subscriber::set_global_default(subscriber).is_err() {
        eprintln!("maskecs_demo: a tracing subscriber is already installed");
    }

    match run(&config) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            error!("{err}");
            ExitCode::FAILURE
        }
    }
}

fn run(config: &DemoConfig) -> DemoResult<()> {
    info!(?config, "starting demo");

    let mut system = System::builder()
        .with_component::<Position>()
        .with_component::<Velocity>()
        .with_component::<Sprite>()
        .with_capacity(config.entity_count as usize)
        .build()?;

    let chosen = populate(&mut system, config)?;
    let found = system.query::<(Position, Velocity, Sprite)>()?;
    if found != chosen {
        return Err(DemoError::SelfCheck {
            expected: chosen.len(),
            found: found.len(),
        });
    }
    info!(
        entities = system.entity_count(),
        complete = found.len(),
        "self-check passed"
    );

    let interval = config.tick_interval();
    system.set_update_hooks(vec![
        Box::new(Movement {
            dt: interval.as_secs_f32(),
        }),
        Box::new(Draw::new(std::io::stdout(), config.draw_limit)),
    ]);

    for tick in 0..config.ticks {
        let started = Instant::now();
        system.update()?;
        let elapsed = started.elapsed();
        tracing::debug!(tick, ?elapsed, "tick complete");

        if let Some(rest) = interval.checked_sub(elapsed) {
            std::thread::sleep(rest);
        }
    }

    let snapshot = system.storage::<Position>()?.as_bytes();
    let digest = snapshot
        .iter()
        .fold(0u32, |acc, &b| acc.rotate_left(5) ^ u32::from(b));
    info!(bytes = snapshot.len(), digest, "final position column");
    Ok(())
}

/// Spawns `entity_count` entities; each one, with probability one half,
/// gets all three components and a random velocity. Returns those handles.
fn populate(system: &mut System, config: &DemoConfig) -> DemoResult<Vec<EntityId>> {
    let mut rng = ChaCha8Rng::seed_from_u64(config.seed);
    let mut chosen = Vec::new();

    for n in 0..config.entity_count {
        let id = system.spawn_entity()?;
        if !rng.gen_bool(0.5) {
            continue;
        }

        system.enable_components::<(Position, Velocity, Sprite)>(id)?;
        *system.component::<Velocity>(id)? = Velocity {
            dx: rng.gen_range(-1.0..1.0),
            dy: rng.gen_range(-1.0..1.0),
        };
        system.component::<Sprite>(id)?.handle = n;
        chosen.push(id);
    }

    Ok(chosen)
}
