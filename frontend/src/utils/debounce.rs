use leptos::*;
use std::{cell::Cell, rc::Rc, time::Duration};

use super::timer::sleep;

pub const SEARCH_DEBOUNCE: Duration = Duration::from_millis(300);

/// Generation counter for pending timers. Each new input arms a fresh ticket;
/// a timer may only fire if its ticket is still the newest one, so the last
/// input always wins (trailing edge).
#[derive(Debug, Default)]
pub struct DebounceGate {
    generation: Cell<u64>,
    closed: Cell<bool>,
}

impl DebounceGate {
    pub fn arm(&self) -> u64 {
        let next = self.generation.get().wrapping_add(1);
        self.generation.set(next);
        next
    }

    pub fn should_fire(&self, ticket: u64) -> bool {
        !self.closed.get() && self.generation.get() == ticket
    }

    /// Called on teardown; pending timers become no-ops.
    pub fn close(&self) {
        self.closed.set(true);
    }
}

/// Arms `gate` and writes `value` into `target` after `delay`, unless another
/// update was scheduled on the same gate in the meantime.
pub fn schedule_update<T>(
    gate: &Rc<DebounceGate>,
    delay: Duration,
    value: T,
    target: RwSignal<T>,
) where
    T: PartialEq + 'static,
{
    let ticket = gate.arm();
    let gate = Rc::clone(gate);
    spawn_local(async move {
        sleep(delay).await;
        if !gate.should_fire(ticket) {
            return;
        }
        if target
            .try_with_untracked(|current| *current != value)
            .unwrap_or(false)
        {
            target.set(value);
        }
    });
}

/// Mirrors `source` into a new signal once it has been stable for `delay`.
pub fn use_debounced<T>(source: Signal<T>, delay: Duration) -> ReadSignal<T>
where
    T: Clone + PartialEq + 'static,
{
    let debounced = create_rw_signal(source.get_untracked());
    let gate = Rc::new(DebounceGate::default());

    let effect_gate = Rc::clone(&gate);
    create_effect(move |_| {
        schedule_update(&effect_gate, delay, source.get(), debounced);
    });

    on_cleanup(move || gate.close());
    debounced.read_only()
}
