use super::{AccessEvent, AccessGate, AccessState};
use log::{debug, info};
use std::sync::atomic::{AtomicU8, AtomicUsize, Ordering};
use tokio::sync::broadcast;

const STATE_UNKNOWN: u8 = 0;
const STATE_REQUESTED: u8 = 1;
const STATE_GRANTED: u8 = 2;
const STATE_DENIED: u8 = 3;

const EVENT_CAPACITY: usize = 16;

/// In-process gate whose outcome is delivered by the host through
/// [`ManagedGate::resolve`].
pub struct ManagedGate {
    state: AtomicU8,
    prompts: AtomicUsize,
    events: broadcast::Sender<AccessEvent>,
}

impl ManagedGate {
    pub fn new() -> Self {
        Self::with_state(STATE_UNKNOWN)
    }

    /// A gate that already holds the capability.
    pub fn granted() -> Self {
        Self::with_state(STATE_GRANTED)
    }

    fn with_state(state: u8) -> Self {
        let (events, _) = broadcast::channel(EVENT_CAPACITY);
        Self {
            state: AtomicU8::new(state),
            prompts: AtomicUsize::new(0),
            events,
        }
    }

    pub fn state(&self) -> AccessState {
        match self.state.load(Ordering::SeqCst) {
            STATE_REQUESTED => AccessState::Requested,
            STATE_GRANTED => AccessState::Granted,
            STATE_DENIED => AccessState::Denied,
            _ => AccessState::Unknown,
        }
    }

    /// Number of prompts started so far.
    pub fn prompt_count(&self) -> usize {
        self.prompts.load(Ordering::SeqCst)
    }

    pub fn subscribe(&self) -> broadcast::Receiver<AccessEvent> {
        self.events.subscribe()
    }

    /// Deliver the user's answer to a prompt. Also used for later revocation.
    pub fn resolve(&self, granted: bool) -> AccessState {
        let event = AccessEvent::outcome(granted);
        let state = if granted { STATE_GRANTED } else { STATE_DENIED };
        self.state.store(state, Ordering::SeqCst);
        info!("SMS permission resolved: {:?}", event);
        // No subscribers is fine.
        let _ = self.events.send(event);
        self.state()
    }
}

impl Default for ManagedGate {
    fn default() -> Self {
        Self::new()
    }
}

impl AccessGate for ManagedGate {
    fn is_granted(&self) -> bool {
        self.state.load(Ordering::SeqCst) == STATE_GRANTED
    }

    fn request(&self) {
        let _ = self.state.compare_exchange(
            STATE_UNKNOWN,
            STATE_REQUESTED,
            Ordering::SeqCst,
            Ordering::SeqCst,
        );
        let _ = self.state.compare_exchange(
            STATE_DENIED,
            STATE_REQUESTED,
            Ordering::SeqCst,
            Ordering::SeqCst,
        );
        let prompts = self.prompts.fetch_add(1, Ordering::SeqCst) + 1;
        debug!("SMS permission prompt #{} started", prompts);
        let _ = self.events.send(AccessEvent::Requested);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn request_moves_to_requested_and_counts_prompt() {
        let gate = ManagedGate::new();
        assert_eq!(gate.state(), AccessState::Unknown);

        gate.request();
        assert_eq!(gate.state(), AccessState::Requested);
        assert_eq!(gate.prompt_count(), 1);
        assert!(!gate.is_granted());
    }

    #[test]
    fn resolve_publishes_outcome() {
        let gate = ManagedGate::new();
        let mut events = gate.subscribe();

        gate.request();
        assert_eq!(gate.resolve(true), AccessState::Granted);

        assert_eq!(events.try_recv().unwrap(), AccessEvent::Requested);
        assert_eq!(events.try_recv().unwrap(), AccessEvent::Granted);
        assert!(gate.is_granted());
    }

    #[test]
    fn denied_gate_can_be_asked_again() {
        let gate = ManagedGate::new();
        gate.request();
        gate.resolve(false);
        assert_eq!(gate.state(), AccessState::Denied);

        gate.request();
        assert_eq!(gate.state(), AccessState::Requested);
        assert_eq!(gate.prompt_count(), 2);
    }

    #[test]
    fn resolve_can_revoke_a_grant() {
        let gate = ManagedGate::granted();
        gate.resolve(false);
        assert!(!gate.is_granted());
    }

    #[test]
    fn outcome_events_carry_callback_labels() {
        assert_eq!(AccessEvent::outcome(true), AccessEvent::Granted);
        assert_eq!(AccessEvent::outcome(false), AccessEvent::Denied);
        assert_eq!(AccessEvent::outcome(true).as_str(), "granted");
        assert_eq!(AccessEvent::outcome(false).as_str(), "denied");
        assert_eq!(AccessEvent::Requested.as_str(), "requested");
    }
}
