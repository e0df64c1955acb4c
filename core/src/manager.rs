//! Demo-mode lifecycle manager.
//!
//! The ONLY component with cross-call mutable state: it owns the enabled
//! flag, the active seed, and the customization knobs, and it persists
//! them through the injected Storage on every mutation. Construct one
//! instance at application start and share it — one logical manager per
//! running application.
//!
//! Persistence is best-effort durability, not a transaction: a corrupt
//! payload at load time falls back to defaults, and a failed save never
//! fails the mutation that triggered it.

use crate::config::{GenerationOptions, OptionsPatch};
use crate::dataset::{self, DemoDataset};
use crate::storage::Storage;
use crate::types::Seed;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

pub const STATE_KEY: &str = "demo_mode_state";

/// The persisted manager state. This exact shape round-trips through
/// storage; unknown keys are ignored on load and missing keys take
/// their field defaults.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DemoModeState {
    #[serde(default)]
    pub is_enabled: bool,
    #[serde(default = "default_seed")]
    pub current_seed: Seed,
    #[serde(default)]
    pub last_generated: Option<DateTime<Utc>>,
    #[serde(default)]
    pub customizations: GenerationOptions,
}

fn default_seed() -> Seed {
    dataset::DEFAULT_SEED
}

impl Default for DemoModeState {
    fn default() -> Self {
        Self {
            is_enabled: false,
            current_seed: dataset::DEFAULT_SEED,
            last_generated: None,
            customizations: GenerationOptions::default(),
        }
    }
}

pub type SubscriptionId = u64;

type Listener = Box<dyn Fn(&DemoModeState) + Send>;

pub struct DemoModeManager {
    state: DemoModeState,
    storage: Box<dyn Storage>,
    listeners: Vec<(SubscriptionId, Listener)>,
    next_subscription_id: SubscriptionId,
}

impl DemoModeManager {
    /// Build a manager over the given storage backend, restoring any
    /// previously persisted state. A missing or corrupt payload falls
    /// back to defaults without surfacing an error.
    pub fn new(storage: Box<dyn Storage>) -> Self {
        let state = match storage.get(STATE_KEY) {
            Ok(Some(payload)) => match serde_json::from_str::<DemoModeState>(&payload) {
                Ok(state) => state,
                Err(err) => {
                    log::warn!("discarding corrupt demo-mode state: {err}");
                    DemoModeState::default()
                }
            },
            Ok(None) => DemoModeState::default(),
            Err(err) => {
                log::warn!("demo-mode state load failed, using defaults: {err}");
                DemoModeState::default()
            }
        };

        Self {
            state,
            storage,
            listeners: Vec::new(),
            next_subscription_id: 0,
        }
    }

    /// Snapshot of the current state.
    pub fn state(&self) -> DemoModeState {
        self.state.clone()
    }

    pub fn is_enabled(&self) -> bool {
        self.state.is_enabled
    }

    pub fn enable(&mut self) {
        self.state.is_enabled = true;
        self.persist_and_notify();
    }

    pub fn disable(&mut self) {
        self.state.is_enabled = false;
        self.persist_and_notify();
    }

    pub fn toggle(&mut self) -> bool {
        self.state.is_enabled = !self.state.is_enabled;
        self.persist_and_notify();
        self.state.is_enabled
    }

    /// Regenerate from the given seed, or a fresh random one. Updates
    /// the active seed and the last-generated timestamp.
    pub fn generate_new_data(&mut self, seed: Option<Seed>) -> DemoDataset {
        let seed = seed.unwrap_or_else(|| rand::random::<u32>() as Seed);
        let data = dataset::generate_with_options(seed, &self.state.customizations);
        self.state.current_seed = seed;
        self.state.last_generated = Some(data.metadata.generated_at);
        log::info!("demo data regenerated with seed {seed}");
        self.persist_and_notify();
        data
    }

    /// Recompute the dataset for the active seed. Same seed in, same
    /// graph out — recomputing from scratch keeps the observable value
    /// identical on every call.
    pub fn current_data(&self) -> DemoDataset {
        dataset::generate_with_options(self.state.current_seed, &self.state.customizations)
    }

    /// The stable reference dataset (module default seed, stock knobs).
    pub fn default_data(&self) -> &'static DemoDataset {
        dataset::default_dataset()
    }

    pub fn customizations(&self) -> &GenerationOptions {
        &self.state.customizations
    }

    pub fn update_customizations(&mut self, patch: &OptionsPatch) {
        self.state.customizations.apply(patch);
        self.persist_and_notify();
    }

    /// Back to factory defaults, clearing the persisted payload.
    pub fn reset(&mut self) {
        self.state = DemoModeState::default();
        if let Err(err) = self.storage.remove(STATE_KEY) {
            log::warn!("demo-mode state remove failed: {err}");
        }
        self.notify();
    }

    /// Register a listener invoked synchronously after every mutation.
    pub fn subscribe(&mut self, listener: impl Fn(&DemoModeState) + Send + 'static) -> SubscriptionId {
        let id = self.next_subscription_id;
        self.next_subscription_id += 1;
        self.listeners.push((id, Box::new(listener)));
        id
    }

    pub fn unsubscribe(&mut self, id: SubscriptionId) {
        self.listeners.retain(|(listener_id, _)| *listener_id != id);
    }

    fn persist_and_notify(&mut self) {
        self.persist();
        self.notify();
    }

    fn persist(&mut self) {
        match serde_json::to_string(&self.state) {
            Ok(payload) => {
                if let Err(err) = self.storage.set(STATE_KEY, &payload) {
                    log::warn!("demo-mode state save failed: {err}");
                }
            }
            Err(err) => log::warn!("demo-mode state serialize failed: {err}"),
        }
    }

    fn notify(&self) {
        for (_, listener) in &self.listeners {
            listener(&self.state);
        }
    }
}
