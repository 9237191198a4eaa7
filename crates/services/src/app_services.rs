use std::path::PathBuf;
use std::sync::Arc;

use artikel_core::model::{ProgressState, TrainerSettings};
use storage::repository::Storage;

use crate::Clock;
use crate::ads::{AdGateService, AdProvider};
use crate::progress_service::ProgressService;
use crate::sessions::StageLoopService;
use crate::text::{PlainTextRenderer, TextRenderer};

/// Assembles app-facing services over one `Storage`.
#[derive(Clone)]
pub struct AppServices {
    settings: TrainerSettings,
    stage_loop: Arc<StageLoopService>,
    progress: ProgressService,
    ads: Arc<AdGateService>,
    renderer: Arc<dyn TextRenderer>,
}

impl AppServices {
    /// Build services backed by JSON files.
    pub async fn new_json(
        data_dir: impl Into<PathBuf>,
        state_dir: impl Into<PathBuf>,
        settings: TrainerSettings,
        clock: Clock,
        provider: Arc<dyn AdProvider>,
    ) -> Self {
        Self::from_storage(Storage::json(data_dir, state_dir), settings, clock, provider).await
    }

    /// Build services over an existing storage aggregate. Loads the ad-gate
    /// counters eagerly.
    pub async fn from_storage(
        storage: Storage,
        settings: TrainerSettings,
        clock: Clock,
        provider: Arc<dyn AdProvider>,
    ) -> Self {
        let progress = ProgressService::new(Arc::clone(&storage.progress));
        let ads = Arc::new(
            AdGateService::load(clock, Arc::clone(&storage.ad_gate), provider, &settings).await,
        );
        let stage_loop = Arc::new(StageLoopService::new(
            settings,
            Arc::clone(&storage.stages),
            progress.clone(),
            Arc::clone(&ads),
        ));

        Self {
            settings,
            stage_loop,
            progress,
            ads,
            renderer: Arc::new(PlainTextRenderer),
        }
    }

    /// Replace the label renderer used by front-ends.
    #[must_use]
    pub fn with_renderer(mut self, renderer: Arc<dyn TextRenderer>) -> Self {
        self.renderer = renderer;
        self
    }

    #[must_use]
    pub fn settings(&self) -> &TrainerSettings {
        &self.settings
    }

    #[must_use]
    pub fn stage_loop(&self) -> Arc<StageLoopService> {
        Arc::clone(&self.stage_loop)
    }

    #[must_use]
    pub fn progress(&self) -> &ProgressService {
        &self.progress
    }

    #[must_use]
    pub fn ads(&self) -> Arc<AdGateService> {
        Arc::clone(&self.ads)
    }

    #[must_use]
    pub fn renderer(&self) -> Arc<dyn TextRenderer> {
        Arc::clone(&self.renderer)
    }

    /// Progress to start the app with.
    pub async fn load_progress(&self) -> ProgressState {
        self.progress.load().await
    }
}
