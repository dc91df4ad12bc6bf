//! Persistence boundary for the momentum engine.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Mutex, MutexGuard};

use crate::error::{CoreError, Result};
use crate::momentum::{MomentumEvent, MomentumState};

/// Stable key the state blob is stored under.
pub const MOMENTUM_STATE_KEY: &str = "momentum_state";

/// Load/save adapter for [`MomentumState`].
///
/// `load` returns `Ok(None)` when nothing was ever persisted; that case is
/// distinct from a persisted state whose momentum is zero.
pub trait MomentumStore {
    fn load(&self) -> Result<Option<MomentumState>>;

    fn save(&self, state: &MomentumState) -> Result<()>;

    /// Append to the change history. Stores without history ignore it.
    fn append_event(&self, _event: &MomentumEvent) -> Result<()> {
        Ok(())
    }

    /// Most recent events, newest first.
    fn recent_events(&self, _limit: usize) -> Result<Vec<MomentumEvent>> {
        Ok(Vec::new())
    }
}

impl<S: MomentumStore + ?Sized> MomentumStore for &S {
    fn load(&self) -> Result<Option<MomentumState>> {
        (**self).load()
    }

    fn save(&self, state: &MomentumState) -> Result<()> {
        (**self).save(state)
    }

    fn append_event(&self, event: &MomentumEvent) -> Result<()> {
        (**self).append_event(event)
    }

    fn recent_events(&self, limit: usize) -> Result<Vec<MomentumEvent>> {
        (**self).recent_events(limit)
    }
}

/// In-memory store for tests and hosts that persist elsewhere.
#[derive(Debug, Default)]
pub struct MemoryStore {
    state: Mutex<Option<MomentumState>>,
    events: Mutex<Vec<MomentumEvent>>,
    fail_saves: AtomicBool,
    fail_loads: AtomicBool,
}

fn lock<T>(m: &Mutex<T>) -> MutexGuard<'_, T> {
    m.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Store pre-seeded with a persisted state.
    pub fn with_state(state: MomentumState) -> Self {
        let store = Self::default();
        *lock(&store.state) = Some(state);
        store
    }

    /// Make subsequent saves and event appends fail.
    pub fn set_fail_saves(&self, fail: bool) {
        self.fail_saves.store(fail, Ordering::SeqCst);
    }

    /// Make subsequent loads fail.
    pub fn set_fail_loads(&self, fail: bool) {
        self.fail_loads.store(fail, Ordering::SeqCst);
    }

    /// Last successfully saved state.
    pub fn saved(&self) -> Option<MomentumState> {
        lock(&self.state).clone()
    }

    /// Every appended event, oldest first.
    pub fn events(&self) -> Vec<MomentumEvent> {
        lock(&self.events).clone()
    }
}

impl MomentumStore for MemoryStore {
    fn load(&self) -> Result<Option<MomentumState>> {
        if self.fail_loads.load(Ordering::SeqCst) {
            return Err(CoreError::Custom("memory store: load failed".into()));
        }
        Ok(lock(&self.state).clone())
    }

    fn save(&self, state: &MomentumState) -> Result<()> {
        if self.fail_saves.load(Ordering::SeqCst) {
            return Err(CoreError::Custom("memory store: save failed".into()));
        }
        *lock(&self.state) = Some(state.clone());
        Ok(())
    }

    fn append_event(&self, event: &MomentumEvent) -> Result<()> {
        if self.fail_saves.load(Ordering::SeqCst) {
            return Err(CoreError::Custom("memory store: append failed".into()));
        }
        lock(&self.events).push(event.clone());
        Ok(())
    }

    fn recent_events(&self, limit: usize) -> Result<Vec<MomentumEvent>> {
        Ok(lock(&self.events).iter().rev().take(limit).cloned().collect())
    }
}
