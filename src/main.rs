use std::str::FromStr;
use std::sync::Arc;
use std::sync::atomic::AtomicBool;
use std::time::Duration;

use anyhow::{Context, Result};
use taktic_core::Position;
use taktic_engine::{Engine, EngineConfig, Player, RandomPlayer, SearchControl, format_pv};
use tracing::info;
use tracing_subscriber::EnvFilter;

/// Longest game the demo will play before giving up.
const MAX_PLIES: u32 = 300;

fn env_or<T>(name: &str, default: T) -> Result<T>
where
    T: FromStr,
    T::Err: std::error::Error + Send + Sync + 'static,
{
    match std::env::var(name) {
        Ok(raw) => raw
            .trim()
            .parse()
            .with_context(|| format!("{name}={raw:?} is not a valid value")),
        Err(_) => Ok(default),
    }
}

fn config_from_env() -> Result<EngineConfig> {
    let defaults = EngineConfig::default();
    let config = EngineConfig::for_size(env_or("TAKTIC_SIZE", defaults.size)?)
        .with_max_depth(env_or("TAKTIC_DEPTH", defaults.max_depth)?)
        .with_verbosity(env_or("TAKTIC_VERBOSITY", defaults.verbosity)?)
        .with_seed(env_or("TAKTIC_SEED", defaults.seed)?);
    config.validate()?;
    Ok(config)
}

/// Per-move thinking limit from `TAKTIC_LIMIT_MS`; unset or `0` means none.
fn limit_from_env() -> Result<Option<Duration>> {
    let ms: u64 = env_or("TAKTIC_LIMIT_MS", 0)?;
    Ok((ms > 0).then(|| Duration::from_millis(ms)))
}

/// Fresh control for one move; the clock starts now.
fn move_control(limit: Option<Duration>) -> SearchControl {
    let stopped = Arc::new(AtomicBool::new(false));
    match limit {
        Some(limit) => SearchControl::new_timed(stopped, limit),
        None => SearchControl::new_infinite(stopped),
    }
}

fn main() -> Result<()> {
    let config = config_from_env()?;
    let limit = limit_from_env()?;
    let default_filter = if config.verbosity > 0 { "debug" } else { "info" };
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter)))
        .init();

    info!(
        size = config.size,
        depth = config.max_depth,
        seed = config.seed,
        limit_ms = limit.map(|l| l.as_millis() as u64),
        "taktic starting"
    );

    let size = config.size;
    let seed = config.seed;
    let mut engine = Engine::new(config)?;
    let mut pos = Position::new(size)?;
    let opening = engine.analyze(&move_control(limit), &pos);
    info!(
        depth = opening.depth,
        value = opening.value,
        nodes = opening.nodes,
        pv = %format_pv(&opening.pv),
        "opening analysis"
    );

    // Engine plays white against a random mover.
    let mut opponent = RandomPlayer::new(seed);
    while !pos.is_terminal() && pos.move_number() < MAX_PLIES {
        let mover = pos.side_to_move();
        let player: &mut dyn Player = if mover == taktic_core::Color::White {
            &mut engine
        } else {
            &mut opponent
        };
        let mv = player.get_move(&move_control(limit), &pos)?;
        info!(ply = pos.move_number(), side = %mover, %mv, "move");
        pos = pos.apply(&mv)?;
    }

    match pos.outcome() {
        Some(outcome) => info!(?outcome, plies = pos.move_number(), "game over"),
        None => info!(plies = pos.move_number(), "move limit reached"),
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unset_limit_searches_without_deadline() {
        let control = move_control(None);
        assert!(!control.should_stop_iterating());
        assert!(!control.should_stop(1024));
    }

    #[test]
    fn limited_engine_still_moves() {
        let control = move_control(Some(Duration::ZERO));
        assert!(control.should_stop_iterating());

        let config = EngineConfig::for_size(5).with_max_depth(6);
        let mut engine = Engine::new(config).unwrap();
        let pos = Position::new(5).unwrap();
        let analysis = engine.analyze(&control, &pos);
        assert_eq!(analysis.depth, 1, "an expired limit stops after depth 1");
        assert!(pos.apply(&analysis.pv[0]).is_ok());
    }
}
