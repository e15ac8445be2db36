//! Headless client for A Little Folk Tale.
//!
//! Composition root: loads content, builds the runtime for a scene, replays
//! an input script frame by frame and logs a summary of the session.
//!
//! ```bash
//! INPUT_SCRIPT=demos/lantern_walk.ron cargo run -p folktale-client
//! ```
mod config;
mod logging;
mod script;

use std::sync::Arc;
use std::time::Duration;

use anyhow::{Context, Result};
use tokio::sync::broadcast::{self, error::RecvError};

use folktale_content::ContentFactory;
use folktale_runtime::{
    Event, FileSaveRepository, OracleManager, Runtime, RuntimeConfig, Scenario, SessionEvent,
    Topic,
};

use config::CliConfig;
use script::InputScript;

/// Seconds of idle play when no input script is given.
const IDLE_SECONDS: u32 = 5;

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();

    let config = CliConfig::from_env();
    logging::setup_logging(&config.session_id)?;

    tracing::info!("Starting folktale client");
    tracing::info!("Content: {}", config.content_dir.display());
    tracing::info!("Scene: {}", config.scene);
    tracing::info!("Saves: {}", config.save_dir.display());

    run(config).await
}

async fn run(config: CliConfig) -> Result<()> {
    let factory = ContentFactory::new(&config.content_dir);
    let oracles = OracleManager::from_content(&factory)?;
    let layout = factory.load_scene(&config.scene)?;
    let repository = FileSaveRepository::new(&config.save_dir)
        .with_context(|| format!("Failed to open save directory {}", config.save_dir.display()))?;

    let script = match &config.input_script {
        Some(path) => InputScript::load(path)?,
        None => InputScript::idle(config.tick_rate.saturating_mul(IDLE_SECONDS)),
    };
    tracing::info!("Replaying {} frames", script.total_frames());

    let runtime = Runtime::builder()
        .config(RuntimeConfig {
            save_slot: config.save_slot.clone(),
            ..RuntimeConfig::default()
        })
        .oracles(oracles)
        .scenario(Scenario::new(layout))
        .repository(Arc::new(repository))
        .restore_on_start(config.restore)
        .build()
        .await?;
    let handle = runtime.handle();

    let consumer = handle
        .subscribe(Topic::Session)
        .map(|rx| tokio::spawn(log_session_events(rx)));

    let dt = config.frame_dt();
    let mut interval = tokio::time::interval(Duration::from_secs_f32(dt));
    let mut rejections = 0;
    let mut saves = 0;

    for input in script.frames() {
        if config.realtime {
            interval.tick().await;
        }
        let report = handle.step(input, dt).await?;
        rejections += report.rejections.len();
        if let Some(saved) = &report.saved {
            saves += 1;
            tracing::info!(
                "Lantern {:?} saved slot[{}] at tick {}",
                saved.lantern_id,
                saved.slot,
                saved.tick
            );
        }
    }

    let hud = handle.hud().await?;
    let state = handle.query_state().await?;
    tracing::info!(
        tick = %hud.tick,
        health = hud.health,
        stamina = hud.stamina,
        alive = hud.alive,
        enemies = state.enemies.len(),
        lanterns = ?state.lit_lanterns(),
        saves,
        rejections,
        "Session finished"
    );
    for equipped in &hud.equipped {
        tracing::info!("Equipped {:?}: {}", equipped.slot, equipped.item);
    }
    println!(
        "tick {} | health {:.0}% | stamina {:.0}% | lanterns lit {:?} | saves {}",
        hud.tick,
        hud.health * 100.0,
        hud.stamina * 100.0,
        state.lit_lanterns(),
        saves
    );

    drop(handle);
    runtime.shutdown().await?;
    if let Some(consumer) = consumer {
        consumer.await.context("Session log task failed")?;
    }

    tracing::info!("Client shutdown complete");
    Ok(())
}

/// Mirrors session events into the log until the runtime shuts down.
async fn log_session_events(mut rx: broadcast::Receiver<Event>) {
    loop {
        match rx.recv().await {
            Ok(Event::Session(event)) => match event {
                SessionEvent::Saved {
                    slot,
                    tick,
                    lantern_id,
                } => tracing::debug!("Saved slot[{}] at tick {} ({:?})", slot, tick, lantern_id),
                SessionEvent::SaveFailed { slot, error } => {
                    tracing::warn!("Save to slot[{}] failed: {}", slot, error)
                }
                SessionEvent::Restored { slot, tick } => {
                    tracing::info!("Restored slot[{}] at tick {}", slot, tick)
                }
                SessionEvent::ActionRejected {
                    tick, action, code, ..
                } => tracing::debug!("Tick {}: {} rejected ({})", tick, action, code),
            },
            Ok(_) => {}
            Err(RecvError::Lagged(skipped)) => {
                tracing::warn!("Session log lagged; skipped {} events", skipped)
            }
            Err(RecvError::Closed) => break,
        }
    }
}
