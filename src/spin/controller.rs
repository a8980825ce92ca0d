//! Timer-driven spin controller.
//!
//! All state-machine mutation happens under one lock, so a start is fully
//! processed (timer armed included) before any other event is looked at.
//! Completion is a spawned tokio sleep that holds only a weak reference to the
//! controller and a generation number. Teardown aborts the sleep, and the fire
//! path re-checks both the generation and the teardown flag, so a completion
//! callback can never run once [`SpinController::teardown`] has returned.

use std::cell::RefCell;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Weak};
use std::time::Duration;

use parking_lot::{Mutex, ReentrantMutex};
use rand::SeedableRng;
use rand::rngs::StdRng;
use tokio::runtime::Handle;
use tokio::sync::watch;
use tokio::task::JoinHandle;

use super::{SpinConfig, SpinEffect, SpinEvent, SpinMachine, SpinSnapshot, SpinState, draw_plan};
use crate::errors::SpinError;
use crate::log;

/// Called with the winning segment index once a spin lands.
pub type CompletionCallback = Box<dyn FnMut(usize) + Send + 'static>;

struct PendingTimer {
    generation: u64,
    handle: JoinHandle<()>,
}

struct Core {
    machine: SpinMachine,
    rng: StdRng,
    timer: Option<PendingTimer>,
    generation: u64,
}

impl Core {
    fn cancel_timer(&mut self) {
        if let Some(timer) = self.timer.take() {
            timer.handle.abort();
            log::debug!(generation = timer.generation, "cancelled spin timer");
        }
    }
}

struct Shared {
    core: Mutex<Core>,
    torn_down: AtomicBool,
    /// Reentrant so the callback may call back into the controller,
    /// including `teardown`.
    on_complete: ReentrantMutex<RefCell<Option<CompletionCallback>>>,
    updates: watch::Sender<SpinSnapshot>,
}

impl Shared {
    fn publish(&self, core: &Core) {
        self.updates.send_replace(core.machine.snapshot());
    }

    fn fire_completion(&self, generation: u64) {
        let winning_index = {
            let mut core = self.core.lock();
            if self.torn_down.load(Ordering::SeqCst) {
                return;
            }
            match &core.timer {
                Some(timer) if timer.generation == generation => {}
                _ => {
                    log::debug!(generation, "stale spin timer fired");
                    return;
                }
            }
            core.timer = None;

            let effect = core.machine.dispatch(SpinEvent::SpinComplete);
            self.publish(&core);
            match effect {
                Ok(Some(SpinEffect::NotifyComplete { winning_index })) => winning_index,
                _ => return,
            }
        };
        self.notify(winning_index);
    }

    fn notify(&self, winning_index: usize) {
        let slot = self.on_complete.lock();
        if self.torn_down.load(Ordering::SeqCst) {
            return;
        }
        // Already borrowed means we are inside the callback on this thread.
        let Ok(mut callback) = slot.try_borrow_mut() else {
            log::warn!(winning_index, "completion callback is already running");
            return;
        };
        if let Some(callback) = callback.as_mut() {
            callback(winning_index);
        }
        if self.torn_down.load(Ordering::SeqCst) {
            callback.take();
        }
    }
}

/// Owns a wheel's spin lifecycle.
///
/// Dropping the controller tears it down.
pub struct SpinController {
    shared: Arc<Shared>,
    runtime: Handle,
}

impl SpinController {
    /// Controller with default settings and an entropy-seeded RNG.
    ///
    /// Must be called from within a tokio runtime.
    pub fn new<F>(segment_count: usize, on_complete: F) -> Result<Self, SpinError>
    where
        F: FnMut(usize) + Send + 'static,
    {
        Self::with_config(segment_count, SpinConfig::default(), None, on_complete)
    }

    /// Controller with explicit settings. A `seed` makes every draw reproducible.
    pub fn with_config<F>(
        segment_count: usize,
        config: SpinConfig,
        seed: Option<u64>,
        on_complete: F,
    ) -> Result<Self, SpinError>
    where
        F: FnMut(usize) + Send + 'static,
    {
        config.validate()?;
        validate_segment_count(segment_count)?;
        let runtime = Handle::try_current().map_err(|_| SpinError::NoRuntime)?;

        let rng = match seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_os_rng(),
        };
        let machine = SpinMachine::new(segment_count, config);
        let (updates, _) = watch::channel(machine.snapshot());

        log::info!(
            segment_count,
            seeded = seed.is_some(),
            "spin controller ready"
        );
        Ok(Self {
            shared: Arc::new(Shared {
                core: Mutex::new(Core {
                    machine,
                    rng,
                    timer: None,
                    generation: 0,
                }),
                torn_down: AtomicBool::new(false),
                on_complete: ReentrantMutex::new(RefCell::new(Some(Box::new(on_complete)))),
                updates,
            }),
            runtime,
        })
    }

    /// Start a spin. Returns `false` when the wheel is not idle or has been
    /// torn down; nothing changes in that case.
    pub fn start_spin(&self) -> bool {
        if self.is_torn_down() {
            log::warn!("start_spin after teardown");
            return false;
        }

        let mut guard = self.shared.core.lock();
        let core = &mut *guard;
        if core.machine.state() != SpinState::Idle {
            log::warn!(
                state = core.machine.state().as_str(),
                "spin already in progress"
            );
            return false;
        }

        let plan = draw_plan(
            &mut core.rng,
            core.machine.segment_count(),
            core.machine.config(),
        );
        let after = match core.machine.dispatch(SpinEvent::StartSpin(plan)) {
            Ok(Some(SpinEffect::ScheduleCompletion { after })) => after,
            _ => return false,
        };

        core.cancel_timer();
        core.generation += 1;
        let generation = core.generation;
        core.timer = Some(PendingTimer {
            generation,
            handle: self.schedule(generation, after),
        });
        self.shared.publish(core);
        true
    }

    fn schedule(&self, generation: u64, after: Duration) -> JoinHandle<()> {
        let weak: Weak<Shared> = Arc::downgrade(&self.shared);
        self.runtime.spawn(async move {
            tokio::time::sleep(after).await;
            if let Some(shared) = weak.upgrade() {
                shared.fire_completion(generation);
            }
        })
    }

    /// Acknowledge a landed spin so another can start.
    pub fn reset(&self) -> bool {
        if self.is_torn_down() {
            log::warn!("reset after teardown");
            return false;
        }
        let mut core = self.shared.core.lock();
        let accepted = core.machine.dispatch(SpinEvent::Reset).is_ok();
        if accepted {
            self.shared.publish(&core);
        }
        accepted
    }

    /// Switch to a new theme: cancel any spin in flight and return to idle,
    /// keeping the rotation baseline. A torn-down controller stays as it is.
    pub fn reload(&self, segment_count: usize) -> Result<(), SpinError> {
        validate_segment_count(segment_count)?;
        if self.is_torn_down() {
            log::warn!(segment_count, "reload after teardown");
            return Ok(());
        }
        let mut core = self.shared.core.lock();
        core.cancel_timer();
        core.machine.reload(segment_count);
        self.shared.publish(&core);
        log::debug!(segment_count, "spin controller reloaded");
        Ok(())
    }

    /// Cancel everything. No completion callback runs after this returns.
    pub fn teardown(&self) {
        if self.shared.torn_down.swap(true, Ordering::SeqCst) {
            return;
        }
        self.shared.core.lock().cancel_timer();

        let slot = self.shared.on_complete.lock();
        if let Ok(mut callback) = slot.try_borrow_mut() {
            callback.take();
        }
        log::debug!("spin controller torn down");
    }

    pub fn is_torn_down(&self) -> bool {
        self.shared.torn_down.load(Ordering::SeqCst)
    }

    pub fn snapshot(&self) -> SpinSnapshot {
        self.shared.core.lock().machine.snapshot()
    }

    /// Watch every state change. The receiver starts at the current snapshot.
    pub fn subscribe(&self) -> watch::Receiver<SpinSnapshot> {
        self.shared.updates.subscribe()
    }

    pub fn state(&self) -> SpinState {
        self.shared.core.lock().machine.state()
    }

    pub fn current_rotation(&self) -> f64 {
        self.shared.core.lock().machine.current_rotation()
    }

    pub fn target_rotation(&self) -> f64 {
        self.shared.core.lock().machine.target_rotation()
    }

    pub fn is_spinning(&self) -> bool {
        self.shared.core.lock().machine.is_spinning()
    }

    pub fn winning_index(&self) -> Option<usize> {
        self.shared.core.lock().machine.winning_index()
    }

    pub fn segment_count(&self) -> usize {
        self.shared.core.lock().machine.segment_count()
    }
}

impl Drop for SpinController {
    fn drop(&mut self) {
        self.teardown();
    }
}

impl std::fmt::Debug for SpinController {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SpinController")
            .field("snapshot", &self.snapshot())
            .field("torn_down", &self.is_torn_down())
            .finish()
    }
}

fn validate_segment_count(segment_count: usize) -> Result<(), SpinError> {
    if segment_count == 0 {
        return Err(SpinError::InvalidConfig {
            field: "segmentCount",
            reason: "must be at least 1".to_string(),
        });
    }
    Ok(())
}
