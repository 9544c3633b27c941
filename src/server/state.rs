// Shared server state and the background generation worker
use crate::config::AppConfig;
use crate::pipeline;
use crate::scraper::HttpFetcher;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use tokio::sync::Notify;
use tokio::task::JoinHandle;
use tracing::{error, info};

/// Application state shared across handlers.
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<AppConfig>,
    /// Signalled by `/generate`. A signal sent while a run is in flight is
    /// stored as a single permit, so requests coalesce into one follow-up run.
    pub refresh: Arc<Notify>,
    pub generating: Arc<AtomicBool>,
}

impl AppState {
    pub fn new(config: Arc<AppConfig>) -> Self {
        Self {
            config,
            refresh: Arc::new(Notify::new()),
            generating: Arc::new(AtomicBool::new(false)),
        }
    }

    pub fn request_generation(&self) {
        self.refresh.notify_one();
    }

    pub fn is_generating(&self) -> bool {
        self.generating.load(Ordering::SeqCst)
    }
}

/// Runs the pipeline once per refresh signal, never two runs at a time.
pub fn spawn_generation_worker(state: AppState) -> JoinHandle<()> {
    tokio::spawn(async move {
        let fetcher = match HttpFetcher::new(&state.config.user_agent, state.config.request_timeout_seconds) {
            Ok(f) => f,
            Err(e) => {
                error!("Failed to build HTTP client, generation disabled: {}", e);
                return;
            }
        };

        loop {
            info!("Waiting for generation request...");
            state.refresh.notified().await;
            info!("Generation triggered.");

            state.generating.store(true, Ordering::SeqCst);
            match pipeline::run(&state.config, &fetcher).await {
                Ok(summary) => info!("Report regenerated: {}", summary.files.html.display()),
                Err(e) => error!("Report generation failed: {}", e),
            }
            state.generating.store(false, Ordering::SeqCst);
        }
    })
}
