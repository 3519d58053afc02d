//! Full-screen navigation menu lifecycle
//!
//! `Closed -> Opening -> Open -> Closing -> Closed`. `Opening` and `Closing`
//! last exactly the declared wipe durations; the settle timers mirror those
//! durations so the state machine only observes "animation started" and
//! "animation declared complete".
//!
//! The menu is the only writer of the [`ScrollLock`]: it is held in every
//! state except `Closed`.

use crate::debounced_navigation::DebouncedNavigation;
use crate::reveal_overlay::{OverlaySlot, OverlayVariant, StripWipe};
use crate::scroll_lock::{Overflow, ScrollLock};
use crate::timer_registry::{OwnerTag, Timer, TimerHandle, Timers};
use shared::{PortfolioConfig, Route};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum MenuState {
    #[default]
    Closed,
    Opening,
    Open,
    Closing,
}

impl MenuState {
    /// End state the latest toggle asked for.
    pub fn is_open_target(self) -> bool {
        matches!(self, MenuState::Opening | MenuState::Open)
    }
}

#[derive(Debug, Clone)]
pub struct MenuStateMachine {
    owner: OwnerTag,
    state: MenuState,
    settle_timer: Option<TimerHandle>,
    link_timers: Vec<Option<TimerHandle>>,
    revealed_links: Vec<bool>,
    overlay: OverlaySlot,
    navigation: DebouncedNavigation,
    scroll_lock: ScrollLock,
    wipe: StripWipe,
    overlay_hide_after_ms: u64,
    link_step_ms: u64,
}

impl MenuStateMachine {
    pub fn new(config: &PortfolioConfig, initial_overflow: Overflow, timers: &mut Timers) -> Self {
        let owner = timers.register_owner();
        let link_count = Route::MENU.len();
        Self {
            owner,
            state: MenuState::Closed,
            settle_timer: None,
            link_timers: vec![None; link_count],
            revealed_links: vec![false; link_count],
            overlay: OverlaySlot::default(),
            navigation: DebouncedNavigation::new(owner, config.navigation.debounce_ms),
            scroll_lock: ScrollLock::new(initial_overflow),
            wipe: StripWipe::from_config(&config.overlay),
            overlay_hide_after_ms: config.overlay.navbar_hide_after_ms,
            link_step_ms: config.menu.link_step_ms,
        }
    }

    pub fn owner(&self) -> OwnerTag {
        self.owner
    }

    pub fn state(&self) -> MenuState {
        self.state
    }

    pub fn overlay(&self) -> &OverlaySlot {
        &self.overlay
    }

    pub fn scroll_lock(&self) -> &ScrollLock {
        &self.scroll_lock
    }

    pub fn revealed_links(&self) -> &[bool] {
        &self.revealed_links
    }

    pub fn pressed(&self) -> Option<Route> {
        self.navigation.pressed()
    }

    pub fn wipe(&self) -> &StripWipe {
        &self.wipe
    }

    /// Delay before link `index` starts its entrance: after the whole wipe,
    /// then one step per link.
    pub fn link_reveal_delay_ms(&self, index: usize) -> u64 {
        self.wipe.wipe_in_total_ms() + index as u64 * self.link_step_ms
    }

    /// Flip the requested end state. Safe mid-animation: the latest request wins.
    pub fn toggle(&mut self, timers: &mut Timers) -> MenuState {
        if self.state.is_open_target() {
            self.begin_close(timers);
        } else {
            self.begin_open(timers);
        }
        self.state
    }

    /// Drive towards `Closed`; no-op when already closing or closed.
    pub fn close(&mut self, timers: &mut Timers) {
        if self.state.is_open_target() {
            self.begin_close(timers);
        }
    }

    /// Tap on a menu link. Ignored unless the menu is opening or open.
    pub fn activate_link(&mut self, route: Route, timers: &mut Timers) -> Option<TimerHandle> {
        if !self.state.is_open_target() {
            return None;
        }
        Some(self.navigation.request(route, timers))
    }

    /// Drop a pending link navigation without touching the menu state.
    pub fn cancel_navigation(&mut self, timers: &mut Timers) -> bool {
        self.navigation.cancel(timers)
    }

    /// Apply one of this menu's fired timers. Returns the route to commit
    /// when a debounced link activation elapsed; the caller navigates first
    /// and then calls [`Self::close`].
    pub fn on_timer(&mut self, handle: TimerHandle, action: Timer) -> Option<Route> {
        match action {
            Timer::MenuOpenSettled if self.is_settle_timer(handle) => {
                if self.state == MenuState::Opening {
                    self.state = MenuState::Open;
                }
                self.settle_timer = None;
            }
            Timer::MenuCloseSettled if self.is_settle_timer(handle) => {
                if self.state == MenuState::Closing {
                    self.state = MenuState::Closed;
                    self.scroll_lock.release();
                    self.overlay.forget();
                }
                self.settle_timer = None;
            }
            Timer::MenuLinkReveal(index) => {
                if let Some(slot) = self.link_timers.get_mut(index) {
                    if *slot == Some(handle) {
                        *slot = None;
                        self.revealed_links[index] = true;
                    }
                }
            }
            Timer::OverlayHide => {
                self.overlay.on_hide_elapsed(handle);
            }
            Timer::NavigationCommit(_) => return self.navigation.on_elapsed(handle),
            _ => {}
        }
        None
    }

    /// Cancel everything this menu scheduled and release the scroll lock.
    pub fn teardown(&mut self, timers: &mut Timers) {
        timers.cancel_all(self.owner);
        self.settle_timer = None;
        self.link_timers.iter_mut().for_each(|slot| *slot = None);
        self.revealed_links.iter_mut().for_each(|revealed| *revealed = false);
        self.overlay.forget();
        self.navigation.forget();
        self.scroll_lock.release();
        self.state = MenuState::Closed;
    }

    fn is_settle_timer(&self, handle: TimerHandle) -> bool {
        self.settle_timer == Some(handle)
    }

    fn begin_open(&mut self, timers: &mut Timers) {
        self.cancel_settle(timers);
        self.cancel_link_reveals(timers);
        self.state = MenuState::Opening;
        self.scroll_lock.acquire();
        self.overlay.mount(
            OverlayVariant::Navbar,
            self.overlay_hide_after_ms,
            self.owner,
            timers,
        );
        for index in 0..self.link_timers.len() {
            let delay = self.link_reveal_delay_ms(index);
            self.link_timers[index] =
                Some(timers.schedule(self.owner, delay, Timer::MenuLinkReveal(index)));
        }
        self.settle_timer = Some(timers.schedule(
            self.owner,
            self.wipe.wipe_in_total_ms(),
            Timer::MenuOpenSettled,
        ));
    }

    fn begin_close(&mut self, timers: &mut Timers) {
        self.cancel_settle(timers);
        self.cancel_link_reveals(timers);
        // A link tapped before the close must not navigate later.
        self.navigation.cancel(timers);
        self.state = MenuState::Closing;
        self.settle_timer = Some(timers.schedule(
            self.owner,
            self.wipe.wipe_out_total_ms(),
            Timer::MenuCloseSettled,
        ));
    }

    fn cancel_settle(&mut self, timers: &mut Timers) {
        if let Some(handle) = self.settle_timer.take() {
            timers.cancel(handle);
        }
    }

    fn cancel_link_reveals(&mut self, timers: &mut Timers) {
        for slot in self.link_timers.iter_mut() {
            if let Some(handle) = slot.take() {
                timers.cancel(handle);
            }
        }
        self.revealed_links.iter_mut().for_each(|revealed| *revealed = false);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::timer_registry::TimerRegistry;

    fn menu() -> (MenuStateMachine, Timers) {
        let mut timers = TimerRegistry::new(0);
        let menu = MenuStateMachine::new(&PortfolioConfig::default(), Overflow::Auto, &mut timers);
        (menu, timers)
    }

    fn settle(menu: &mut MenuStateMachine, timers: &mut Timers, until: u64) -> Vec<Route> {
        let mut committed = Vec::new();
        timers.run_until(until, |timers, fired| {
            if let Some(route) = menu.on_timer(fired.handle, fired.action) {
                committed.push(route);
                menu.close(timers);
            }
        });
        committed
    }

    fn assert_lock_matches_state(menu: &MenuStateMachine) {
        assert_eq!(
            menu.scroll_lock().is_held(),
            menu.state() != MenuState::Closed,
            "scroll lock out of sync in {:?}",
            menu.state()
        );
    }

    #[test]
    fn test_open_cycle() {
        let (mut menu, mut timers) = menu();
        assert_eq!(menu.toggle(&mut timers), MenuState::Opening);
        assert_eq!(menu.scroll_lock().policy(), Overflow::Hidden);
        assert_eq!(menu.overlay().live_count(), 1);

        let opens_at = menu.wipe().wipe_in_total_ms();
        settle(&mut menu, &mut timers, opens_at);
        assert_eq!(menu.state(), MenuState::Open);
        assert_lock_matches_state(&menu);

        assert_eq!(menu.toggle(&mut timers), MenuState::Closing);
        assert_lock_matches_state(&menu);
        let closes_at = timers.now() + menu.wipe().wipe_out_total_ms();
        settle(&mut menu, &mut timers, closes_at);
        assert_eq!(menu.state(), MenuState::Closed);
        assert_eq!(menu.scroll_lock().policy(), Overflow::Auto);
        assert_eq!(menu.overlay().live_count(), 0);
        assert_eq!(timers.pending_count(), 0);
    }

    #[test]
    fn test_rapid_toggles_settle_on_parity() {
        for count in 1..=9 {
            let (mut menu, mut timers) = menu();
            for step in 0..count {
                timers.set_now(step * 30);
                menu.toggle(&mut timers);
                assert_lock_matches_state(&menu);
            }
            settle(&mut menu, &mut timers, 60_000);

            let expected = if count % 2 == 1 {
                MenuState::Open
            } else {
                MenuState::Closed
            };
            assert_eq!(menu.state(), expected, "after {} toggles", count);
            assert_lock_matches_state(&menu);
            assert!(menu.overlay().live_count() <= 1);
        }
    }

    #[test]
    fn test_links_reveal_after_wipe_in_order() {
        let (mut menu, mut timers) = menu();
        menu.toggle(&mut timers);
        let wipe_total = menu.wipe().wipe_in_total_ms();

        settle(&mut menu, &mut timers, wipe_total - 1);
        assert!(menu.revealed_links().iter().all(|revealed| !revealed));

        settle(&mut menu, &mut timers, wipe_total);
        assert_eq!(menu.revealed_links()[0], true);
        assert_eq!(menu.revealed_links()[1], false);

        let last_link_at = menu.link_reveal_delay_ms(4);
        settle(&mut menu, &mut timers, last_link_at);
        assert!(menu.revealed_links().iter().all(|revealed| *revealed));
    }

    #[test]
    fn test_closing_mid_open_cancels_pending_reveals() {
        let (mut menu, mut timers) = menu();
        menu.toggle(&mut timers);
        timers.set_now(100);
        menu.toggle(&mut timers);

        settle(&mut menu, &mut timers, 60_000);
        assert_eq!(menu.state(), MenuState::Closed);
        assert!(menu.revealed_links().iter().all(|revealed| !revealed));
    }

    #[test]
    fn test_link_commits_then_closes() {
        let (mut menu, mut timers) = menu();
        menu.toggle(&mut timers);
        settle(&mut menu, &mut timers, 2000);

        assert!(menu.activate_link(Route::Contact, &mut timers).is_some());
        assert_eq!(menu.pressed(), Some(Route::Contact));
        assert!(settle(&mut menu, &mut timers, 2164).is_empty());

        let committed = settle(&mut menu, &mut timers, 2165);
        assert_eq!(committed, vec![Route::Contact]);
        assert_eq!(menu.state(), MenuState::Closing);

        settle(&mut menu, &mut timers, 10_000);
        assert_eq!(menu.state(), MenuState::Closed);
        assert_lock_matches_state(&menu);
    }

    #[test]
    fn test_close_drops_pending_link() {
        let (mut menu, mut timers) = menu();
        menu.toggle(&mut timers);
        settle(&mut menu, &mut timers, 2000);

        menu.activate_link(Route::About, &mut timers);
        timers.set_now(2030);
        assert_eq!(menu.toggle(&mut timers), MenuState::Closing);
        assert_eq!(menu.pressed(), None);
        timers.set_now(2060);
        assert_eq!(menu.toggle(&mut timers), MenuState::Opening);

        assert!(settle(&mut menu, &mut timers, 10_000).is_empty());
        assert_eq!(menu.state(), MenuState::Open);
        assert_lock_matches_state(&menu);
    }

    #[test]
    fn test_links_ignored_while_closed() {
        let (mut menu, mut timers) = menu();
        assert!(menu.activate_link(Route::About, &mut timers).is_none());
        assert_eq!(timers.pending_count(), 0);
    }

    #[test]
    fn test_teardown_mid_open_leaves_nothing_behind() {
        let (mut menu, mut timers) = menu();
        menu.toggle(&mut timers);
        timers.set_now(900);
        menu.activate_link(Route::Skills, &mut timers);

        menu.teardown(&mut timers);
        assert_eq!(timers.pending_for(menu.owner()), 0);
        assert!(!menu.scroll_lock().is_held());
        assert_eq!(menu.scroll_lock().policy(), Overflow::Auto);

        let fired_before = timers.fired_count();
        assert!(settle(&mut menu, &mut timers, 60_000).is_empty());
        assert_eq!(timers.fired_count(), fired_before);
    }
}
