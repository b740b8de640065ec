//! `loadwatch simulate`: concurrent jobs sharing one loading flag.

use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;

use colored::*;
use eyre::{Result, eyre};
use futures::future::join_all;
use log::{info, warn};
use rand::Rng;

use loadwatch::config::Config;
use loadwatch::{LoadingEventKind, LoadingHandle, LoadingStore};

use crate::overlay::TextOverlay;

/// Outcome of a simulation run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Summary {
    pub succeeded: usize,
    pub failed: usize,
    pub changes: usize,
    pub overlay_shown: usize,
}

struct JobPlan {
    delay: Duration,
    fails: bool,
}

fn plan_jobs(config: &Config, tasks: usize) -> Vec<JobPlan> {
    let sim = &config.simulate;
    let mut rng = rand::rng();
    (0..tasks)
        .map(|_| JobPlan {
            delay: Duration::from_millis(rng.random_range(sim.min_delay_ms..=sim.max_delay_ms)),
            fails: rng.random_bool(sim.failure_rate),
        })
        .collect()
}

pub async fn run(config: &Config, tasks: usize, override_state: Option<bool>, json: bool) -> Result<Summary> {
    if tasks == 0 {
        eyre::bail!("tasks must be > 0");
    }

    let store = Arc::new(LoadingStore::new());
    let overlay = TextOverlay::new(config.overlay.clone(), json);
    overlay.attach(&store);

    let changes = Arc::new(AtomicUsize::new(0));
    let counter = Arc::clone(&changes);
    store.on(LoadingEventKind::Change, move |event| {
        counter.fetch_add(1, Ordering::SeqCst);
        if !json {
            return;
        }
        if let Some(change) = event.change() {
            let line = serde_json::json!({
                "at": chrono::Local::now().format("%H:%M:%S%.3f").to_string(),
                "isLoading": change.is_loading,
                "isOverrideState": change.is_override_state,
            });
            println!("{}", line);
        }
    });

    if override_state.is_some() {
        store.override_loading(override_state);
    }

    info!("Simulating {} jobs", tasks);
    let jobs = plan_jobs(config, tasks).into_iter().enumerate().map(|(index, plan)| {
        let handle = LoadingHandle::new(Arc::clone(&store));
        tokio::spawn(async move {
            handle
                .track(async move {
                    tokio::time::sleep(plan.delay).await;
                    if plan.fails {
                        Err(eyre!("job {} failed after {}ms", index, plan.delay.as_millis()))
                    } else {
                        Ok(plan.delay)
                    }
                })
                .await
        })
    });

    let mut succeeded = 0;
    let mut failed = 0;
    for joined in join_all(jobs).await {
        match joined? {
            Ok(delay) => {
                succeeded += 1;
                if !json {
                    println!("{} finished in {}ms", "ok".green(), delay.as_millis());
                }
            }
            Err(e) => {
                failed += 1;
                warn!("{}", e);
                if !json {
                    println!("{} {}", "failed".red(), e);
                }
            }
        }
    }

    if override_state.is_some() {
        store.override_loading(None);
    }

    if store.global_counter() != 0 || store.is_global_loading() {
        return Err(eyre!("store still loading after all jobs settled"));
    }

    let summary = Summary {
        succeeded,
        failed,
        changes: changes.load(Ordering::SeqCst),
        overlay_shown: overlay.times_shown(),
    };
    store.remove_all_listeners();
    Ok(summary)
}
