//! Cancellable delayed actions on a virtual millisecond clock
//!
//! Every delayed follow-up in the choreography (overlay hide, link reveal,
//! debounced navigation, page exit) goes through a [`TimerRegistry`]. Each
//! component instance registers an [`OwnerTag`] and tags the timers it
//! schedules, so teardown is a single [`TimerRegistry::cancel_all`] call.
//!
//! The registry never fires anything on its own. The host moves the clock
//! forward with [`TimerRegistry::pop_due`] / [`TimerRegistry::run_until`],
//! which makes firing order fully deterministic: earliest `fire_at` first,
//! ties broken by scheduling order.

use shared::Route;
use std::collections::BTreeMap;

/// Identity of one scheduled timer. Handles are never reused.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TimerHandle(u64);

/// Identity of the component instance that owns a group of timers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct OwnerTag(u64);

#[derive(Debug, Clone, PartialEq)]
struct PendingTimer<A> {
    owner: OwnerTag,
    fire_at: u64,
    action: A,
}

/// A timer that reached its deadline and was removed from the registry.
#[derive(Debug, Clone, PartialEq)]
pub struct Fired<A> {
    pub handle: TimerHandle,
    pub owner: OwnerTag,
    pub fire_at: u64,
    pub action: A,
}

#[derive(Debug, Clone)]
pub struct TimerRegistry<A> {
    now: u64,
    next_handle: u64,
    next_owner: u64,
    pending: BTreeMap<TimerHandle, PendingTimer<A>>,
    fired_count: u64,
    cancelled_count: u64,
}

impl<A> Default for TimerRegistry<A> {
    fn default() -> Self {
        Self::new(0)
    }
}

impl<A> TimerRegistry<A> {
    pub fn new(now: u64) -> Self {
        Self {
            now,
            next_handle: 0,
            next_owner: 0,
            pending: BTreeMap::new(),
            fired_count: 0,
            cancelled_count: 0,
        }
    }

    pub fn now(&self) -> u64 {
        self.now
    }

    /// Move the clock forward without firing anything. The clock never
    /// goes backwards.
    pub fn set_now(&mut self, now: u64) {
        self.now = self.now.max(now);
    }

    pub fn register_owner(&mut self) -> OwnerTag {
        self.next_owner += 1;
        OwnerTag(self.next_owner)
    }

    pub fn schedule(&mut self, owner: OwnerTag, delay_ms: u64, action: A) -> TimerHandle {
        self.next_handle += 1;
        let handle = TimerHandle(self.next_handle);
        self.pending.insert(
            handle,
            PendingTimer {
                owner,
                fire_at: self.now.saturating_add(delay_ms),
                action,
            },
        );
        handle
    }

    /// Cancel one timer. Returns `false` when the handle already fired or
    /// was cancelled before; that case has no side effects.
    pub fn cancel(&mut self, handle: TimerHandle) -> bool {
        let removed = self.pending.remove(&handle).is_some();
        if removed {
            self.cancelled_count += 1;
        }
        removed
    }

    /// Cancel every pending timer of `owner`, returning how many were removed.
    pub fn cancel_all(&mut self, owner: OwnerTag) -> usize {
        let before = self.pending.len();
        self.pending.retain(|_, timer| timer.owner != owner);
        let removed = before - self.pending.len();
        self.cancelled_count += removed as u64;
        removed
    }

    pub fn is_pending(&self, handle: TimerHandle) -> bool {
        self.pending.contains_key(&handle)
    }

    pub fn pending_count(&self) -> usize {
        self.pending.len()
    }

    pub fn pending_for(&self, owner: OwnerTag) -> usize {
        self.pending
            .values()
            .filter(|timer| timer.owner == owner)
            .count()
    }

    pub fn fired_count(&self) -> u64 {
        self.fired_count
    }

    pub fn cancelled_count(&self) -> u64 {
        self.cancelled_count
    }

    /// Earliest deadline among pending timers.
    pub fn next_deadline(&self) -> Option<u64> {
        self.pending.values().map(|timer| timer.fire_at).min()
    }

    /// Remove and return the earliest timer due at or before `until`,
    /// advancing the clock to its deadline.
    pub fn pop_due(&mut self, until: u64) -> Option<Fired<A>> {
        let handle = self
            .pending
            .iter()
            .filter(|(_, timer)| timer.fire_at <= until)
            .min_by_key(|(handle, timer)| (timer.fire_at, **handle))
            .map(|(handle, _)| *handle)?;
        let timer = self.pending.remove(&handle)?;
        self.now = self.now.max(timer.fire_at);
        self.fired_count += 1;
        Some(Fired {
            handle,
            owner: timer.owner,
            fire_at: timer.fire_at,
            action: timer.action,
        })
    }

    /// Fire everything due up to `until`, including timers scheduled by
    /// `dispatch` itself, then leave the clock at `until`.
    pub fn run_until(&mut self, until: u64, mut dispatch: impl FnMut(&mut Self, Fired<A>)) {
        while let Some(fired) = self.pop_due(until) {
            dispatch(self, fired);
        }
        self.set_now(until);
    }
}

/// Delayed actions scheduled by the portfolio components.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Timer {
    OverlayHide,
    NavigationCommit(Route),
    MenuOpenSettled,
    MenuCloseSettled,
    MenuLinkReveal(usize),
    PageExitComplete,
    PageEnterComplete,
    ContactSent,
    ContactReset,
}

pub type Timers = TimerRegistry<Timer>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fires_in_deadline_then_schedule_order() {
        let mut timers = TimerRegistry::new(0);
        let owner = timers.register_owner();
        timers.schedule(owner, 30, "late");
        timers.schedule(owner, 10, "first");
        timers.schedule(owner, 10, "second");

        let mut fired = Vec::new();
        timers.run_until(100, |_, timer| fired.push((timer.fire_at, timer.action)));

        assert_eq!(fired, vec![(10, "first"), (10, "second"), (30, "late")]);
        assert_eq!(timers.now(), 100);
        assert_eq!(timers.fired_count(), 3);
    }

    #[test]
    fn test_cancel_is_idempotent() {
        let mut timers = TimerRegistry::new(0);
        let owner = timers.register_owner();
        let handle = timers.schedule(owner, 10, ());

        assert!(timers.cancel(handle));
        assert!(!timers.cancel(handle));
        assert_eq!(timers.cancelled_count(), 1);

        let fired_handle = timers.schedule(owner, 5, ());
        assert!(timers.pop_due(5).is_some());
        assert!(!timers.cancel(fired_handle));
        assert_eq!(timers.cancelled_count(), 1);
    }

    #[test]
    fn test_cancel_all_only_touches_owner() {
        let mut timers = TimerRegistry::new(0);
        let menu = timers.register_owner();
        let page = timers.register_owner();
        timers.schedule(menu, 10, 'm');
        timers.schedule(menu, 20, 'm');
        let page_timer = timers.schedule(page, 15, 'p');

        assert_eq!(timers.cancel_all(menu), 2);
        assert_eq!(timers.pending_for(menu), 0);
        assert!(timers.is_pending(page_timer));
        assert_eq!(timers.next_deadline(), Some(15));
    }

    #[test]
    fn test_dispatch_can_chain_timers_within_window() {
        let mut timers = TimerRegistry::new(0);
        let owner = timers.register_owner();
        timers.schedule(owner, 10, 1u32);

        let mut seen = Vec::new();
        timers.run_until(35, |timers, fired| {
            seen.push((fired.fire_at, fired.action));
            if fired.action < 3 {
                timers.schedule(fired.owner, 10, fired.action + 1);
            }
        });

        assert_eq!(seen, vec![(10, 1), (20, 2), (30, 3)]);
        assert_eq!(timers.pending_count(), 0);
    }

    #[test]
    fn test_clock_never_goes_backwards() {
        let mut timers: TimerRegistry<()> = TimerRegistry::new(50);
        timers.set_now(20);
        assert_eq!(timers.now(), 50);
        let owner = timers.register_owner();
        timers.schedule(owner, 10, ());
        assert_eq!(timers.next_deadline(), Some(60));
        assert!(timers.pop_due(59).is_none());
    }
}
