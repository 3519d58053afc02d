//! Tap feedback first, route change after a fixed latency
//!
//! `request` marks the pressed route immediately and schedules the commit.
//! A newer request cancels the older one (last request wins), and teardown
//! cancels whatever is still pending.

use crate::timer_registry::{OwnerTag, Timer, TimerHandle, Timers};
use shared::Route;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct PendingNavigation {
    handle: TimerHandle,
    route: Route,
}

#[derive(Debug, Clone, PartialEq)]
pub struct DebouncedNavigation {
    owner: OwnerTag,
    latency_ms: u64,
    pending: Option<PendingNavigation>,
    pressed: Option<Route>,
}

impl DebouncedNavigation {
    pub fn new(owner: OwnerTag, latency_ms: u64) -> Self {
        Self {
            owner,
            latency_ms,
            pending: None,
            pressed: None,
        }
    }

    /// Register the press and schedule the commit. The returned handle can
    /// be passed to [`Timers::cancel`] or dropped in favour of [`Self::cancel`].
    pub fn request(&mut self, route: Route, timers: &mut Timers) -> TimerHandle {
        self.cancel(timers);
        self.pressed = Some(route);
        let handle = timers.schedule(self.owner, self.latency_ms, Timer::NavigationCommit(route));
        self.pending = Some(PendingNavigation { handle, route });
        handle
    }

    pub fn cancel(&mut self, timers: &mut Timers) -> bool {
        self.pressed = None;
        match self.pending.take() {
            Some(pending) => timers.cancel(pending.handle),
            None => false,
        }
    }

    /// Route to commit if `handle` is the live request's timer.
    pub fn on_elapsed(&mut self, handle: TimerHandle) -> Option<Route> {
        match self.pending {
            Some(pending) if pending.handle == handle => {
                self.pending = None;
                self.pressed = None;
                Some(pending.route)
            }
            _ => None,
        }
    }

    /// Forget pending state after the owner's timers were cancelled wholesale.
    pub fn forget(&mut self) {
        self.pending = None;
        self.pressed = None;
    }

    pub fn pressed(&self) -> Option<Route> {
        self.pressed
    }

    pub fn pending_route(&self) -> Option<Route> {
        self.pending.map(|pending| pending.route)
    }

    pub fn latency_ms(&self) -> u64 {
        self.latency_ms
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::timer_registry::TimerRegistry;

    fn commits(nav: &mut DebouncedNavigation, timers: &mut Timers, until: u64) -> Vec<(u64, Route)> {
        let mut committed = Vec::new();
        timers.run_until(until, |timers, fired| {
            if let Some(route) = nav.on_elapsed(fired.handle) {
                committed.push((timers.now(), route));
            }
        });
        committed
    }

    #[test]
    fn test_press_is_immediate_commit_is_delayed() {
        let mut timers = TimerRegistry::new(0);
        let owner = timers.register_owner();
        let mut nav = DebouncedNavigation::new(owner, 165);

        nav.request(Route::Projects, &mut timers);
        assert_eq!(nav.pressed(), Some(Route::Projects));
        assert!(commits(&mut nav, &mut timers, 164).is_empty());
        assert_eq!(commits(&mut nav, &mut timers, 400), vec![(165, Route::Projects)]);
        assert_eq!(nav.pressed(), None);
    }

    #[test]
    fn test_last_request_wins() {
        let mut timers = TimerRegistry::new(0);
        let owner = timers.register_owner();
        let mut nav = DebouncedNavigation::new(owner, 165);

        let first = nav.request(Route::Skills, &mut timers);
        timers.set_now(80);
        nav.request(Route::Contact, &mut timers);

        assert!(!timers.is_pending(first));
        assert_eq!(commits(&mut nav, &mut timers, 1000), vec![(245, Route::Contact)]);
        assert_eq!(timers.fired_count(), 1);
    }

    #[test]
    fn test_cancel_prevents_commit() {
        let mut timers = TimerRegistry::new(0);
        let owner = timers.register_owner();
        let mut nav = DebouncedNavigation::new(owner, 160);

        nav.request(Route::About, &mut timers);
        assert!(nav.cancel(&mut timers));
        assert!(!nav.cancel(&mut timers));
        assert!(commits(&mut nav, &mut timers, 1000).is_empty());
    }

    #[test]
    fn test_teardown_by_owner_means_no_commit() {
        let mut timers = TimerRegistry::new(0);
        let owner = timers.register_owner();
        let mut nav = DebouncedNavigation::new(owner, 160);

        nav.request(Route::About, &mut timers);
        timers.cancel_all(owner);
        nav.forget();

        assert!(commits(&mut nav, &mut timers, 1000).is_empty());
        assert_eq!(timers.fired_count(), 0);
    }
}
