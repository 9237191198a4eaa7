//! Ad gating: when to ask the platform to show an ad.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex, PoisonError};

use tracing::{debug, error, info, warn};

use artikel_core::Clock;
use artikel_core::model::{AdGateState, TrainerSettings};
use storage::repository::AdGateRepository;

/// Platform ad capability. Implementations own the actual ad SDK.
pub trait AdProvider: Send + Sync {
    fn request_banner(&self);
    fn show_interstitial(&self);
}

/// Provider used when no ad SDK is available.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoopAdProvider;

impl AdProvider for NoopAdProvider {
    fn request_banner(&self) {}

    fn show_interstitial(&self) {}
}

/// Provider that only counts calls.
#[derive(Debug, Default)]
pub struct MockAdProvider {
    banners: AtomicUsize,
    interstitials: AtomicUsize,
}

impl MockAdProvider {
    #[must_use]
    pub fn banners(&self) -> usize {
        self.banners.load(Ordering::SeqCst)
    }

    #[must_use]
    pub fn interstitials(&self) -> usize {
        self.interstitials.load(Ordering::SeqCst)
    }
}

impl AdProvider for MockAdProvider {
    fn request_banner(&self) {
        self.banners.fetch_add(1, Ordering::SeqCst);
    }

    fn show_interstitial(&self) {
        self.interstitials.fetch_add(1, Ordering::SeqCst);
    }
}

/// Tracks answered questions and daily-ad timing, persisting after every change.
pub struct AdGateService {
    clock: Clock,
    repo: Arc<dyn AdGateRepository>,
    provider: Arc<dyn AdProvider>,
    interval_questions: u32,
    daily_interval_secs: u32,
    state: Mutex<AdGateState>,
}

impl AdGateService {
    /// Load persisted counters, falling back to zeroed defaults.
    pub async fn load(
        clock: Clock,
        repo: Arc<dyn AdGateRepository>,
        provider: Arc<dyn AdProvider>,
        settings: &TrainerSettings,
    ) -> Self {
        let state = match repo.load_ad_gate().await {
            Ok(state) => state.unwrap_or_default(),
            Err(err) => {
                warn!(error = %err, "ad state file unreadable; resetting counters");
                AdGateState::default()
            }
        };
        debug!(
            questions = state.questions_since_last_ad(),
            last_daily_ad = state.last_daily_ad(),
            "loaded ad gate"
        );

        Self {
            clock,
            repo,
            provider,
            interval_questions: settings.ad_interval_questions(),
            daily_interval_secs: settings.daily_ad_interval_secs(),
            state: Mutex::new(state),
        }
    }

    #[must_use]
    pub fn state(&self) -> AdGateState {
        *self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    #[must_use]
    pub fn should_show_periodic_ad(&self) -> bool {
        self.state().should_show_periodic_ad(self.interval_questions)
    }

    #[must_use]
    pub fn should_offer_daily_ad(&self) -> bool {
        self.state()
            .should_offer_daily_ad(self.clock.now(), self.daily_interval_secs)
    }

    pub fn request_banner(&self) {
        self.provider.request_banner();
    }

    /// Count one answered question.
    pub async fn record_question(&self) {
        self.update(AdGateState::record_question).await;
    }

    /// Reset the question counter after an interstitial.
    pub async fn record_ad_shown(&self) {
        self.update(AdGateState::record_ad_shown).await;
    }

    pub async fn record_daily_ad_watched(&self) {
        let now = self.clock.now();
        self.update(|state| state.record_daily_ad_watched(now)).await;
    }

    /// Show an interstitial through the provider if one is due.
    ///
    /// Returns true if an ad was shown.
    pub async fn show_periodic_ad_if_due(&self) -> bool {
        if !self.should_show_periodic_ad() {
            return false;
        }
        info!("showing periodic interstitial");
        self.provider.show_interstitial();
        self.record_ad_shown().await;
        true
    }

    /// Play the opt-in daily ad if a day has passed since the last one.
    pub async fn show_daily_ad_if_due(&self) -> bool {
        if !self.should_offer_daily_ad() {
            return false;
        }
        info!("showing daily ad");
        self.provider.show_interstitial();
        self.record_daily_ad_watched().await;
        true
    }

    async fn update(&self, apply: impl FnOnce(&mut AdGateState)) {
        let snapshot = {
            let mut guard = self.state.lock().unwrap_or_else(PoisonError::into_inner);
            apply(&mut *guard);
            *guard
        };
        if let Err(err) = self.repo.save_ad_gate(&snapshot).await {
            error!(error = %err, "failed to save ad state");
        }
    }
}
