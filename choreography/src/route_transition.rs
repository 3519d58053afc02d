//! Page exit/enter sequencing keyed by route
//!
//! Each mounted page gets its own [`OwnerTag`], reveal overlay, in-page
//! shortcut navigation and (on the contact page) form submission. A route
//! change plays the outgoing page's exit first; the incoming page mounts
//! only when the exit timer fires. Navigating again while a page is exiting
//! only replaces the queued destination, so a second exit never starts.

use crate::contact::ContactSubmission;
use crate::debounced_navigation::DebouncedNavigation;
use crate::reveal_overlay::{OverlaySlot, OverlayVariant};
use crate::timer_registry::{OwnerTag, Timer, TimerHandle, Timers};
use shared::{ContactSection, PortfolioConfig, Route};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TransitionPhase {
    #[default]
    Idle,
    Exiting,
    Entering,
}

/// Identity of one page mount. Visiting the same route twice yields two ids.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct PageInstanceId(u64);

#[derive(Debug, Clone)]
pub struct MountedPage {
    id: PageInstanceId,
    route: Route,
    owner: OwnerTag,
    phase: TransitionPhase,
    mounted_at: u64,
    phase_timer: Option<TimerHandle>,
    overlay: OverlaySlot,
    shortcuts: DebouncedNavigation,
    contact: Option<ContactSubmission>,
}

impl MountedPage {
    pub fn id(&self) -> PageInstanceId {
        self.id
    }

    pub fn route(&self) -> Route {
        self.route
    }

    pub fn owner(&self) -> OwnerTag {
        self.owner
    }

    pub fn phase(&self) -> TransitionPhase {
        self.phase
    }

    pub fn mounted_at(&self) -> u64 {
        self.mounted_at
    }

    pub fn overlay(&self) -> &OverlaySlot {
        &self.overlay
    }

    pub fn pressed(&self) -> Option<Route> {
        self.shortcuts.pressed()
    }

    pub fn contact(&self) -> Option<&ContactSubmission> {
        self.contact.as_ref()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CommitOutcome {
    Mounted(PageInstanceId),
    ExitStarted(PageInstanceId),
    /// A page is already exiting; only the destination changed.
    Requeued,
    /// The route is already displayed.
    Unchanged,
}

#[derive(Debug, Clone)]
pub struct RouteTransitionCoordinator {
    page: Option<MountedPage>,
    queued: Option<Route>,
    next_page: u64,
    exit_duration_ms: u64,
    enter_duration_ms: u64,
    overlay_hide_after_ms: u64,
    debounce_ms: u64,
    contact_config: ContactSection,
}

impl RouteTransitionCoordinator {
    pub fn new(config: &PortfolioConfig) -> Self {
        Self {
            page: None,
            queued: None,
            next_page: 0,
            exit_duration_ms: config.page.exit_duration_ms,
            enter_duration_ms: config.page.enter_duration_ms,
            overlay_hide_after_ms: config.overlay.page_hide_after_ms,
            debounce_ms: config.navigation.debounce_ms,
            contact_config: config.contact.clone(),
        }
    }

    pub fn page(&self) -> Option<&MountedPage> {
        self.page.as_ref()
    }

    pub fn queued(&self) -> Option<Route> {
        self.queued
    }

    pub fn owns(&self, owner: OwnerTag) -> bool {
        self.page.as_ref().is_some_and(|page| page.owner == owner)
    }

    /// React to the router's location becoming `route`.
    pub fn commit(&mut self, route: Route, timers: &mut Timers) -> CommitOutcome {
        let Some(page) = self.page.as_mut() else {
            return CommitOutcome::Mounted(self.mount(route, timers));
        };
        match page.phase {
            TransitionPhase::Exiting => {
                self.queued = Some(route);
                CommitOutcome::Requeued
            }
            _ if page.route == route => CommitOutcome::Unchanged,
            _ => {
                timers.cancel_all(page.owner);
                page.overlay.forget();
                page.shortcuts.forget();
                page.phase = TransitionPhase::Exiting;
                page.phase_timer =
                    Some(timers.schedule(page.owner, self.exit_duration_ms, Timer::PageExitComplete));
                self.queued = Some(route);
                CommitOutcome::ExitStarted(page.id)
            }
        }
    }

    /// Landing-page shortcut button. Ignored while the page is leaving.
    pub fn press_shortcut(&mut self, route: Route, timers: &mut Timers) -> Option<TimerHandle> {
        let page = self.page.as_mut()?;
        if page.phase == TransitionPhase::Exiting {
            return None;
        }
        Some(page.shortcuts.request(route, timers))
    }

    /// Drop a pending shortcut navigation, keeping the page as it is.
    pub fn cancel_shortcut(&mut self, timers: &mut Timers) -> bool {
        self.page
            .as_mut()
            .is_some_and(|page| page.shortcuts.cancel(timers))
    }

    pub fn contact_mut(&mut self) -> Option<&mut ContactSubmission> {
        self.page
            .as_mut()
            .filter(|page| page.phase != TransitionPhase::Exiting)
            .and_then(|page| page.contact.as_mut())
    }

    /// Apply a fired timer owned by the current page. Returns a route when
    /// an in-page shortcut navigation is due.
    pub fn on_timer(
        &mut self,
        owner: OwnerTag,
        handle: TimerHandle,
        action: Timer,
        timers: &mut Timers,
    ) -> Option<Route> {
        let page = self.page.as_mut().filter(|page| page.owner == owner)?;
        match action {
            Timer::PageExitComplete if page.phase_timer == Some(handle) => {
                self.unmount(timers);
                if let Some(next) = self.queued.take() {
                    self.mount(next, timers);
                }
            }
            Timer::PageEnterComplete if page.phase_timer == Some(handle) => {
                page.phase_timer = None;
                page.phase = TransitionPhase::Idle;
            }
            Timer::OverlayHide => {
                page.overlay.on_hide_elapsed(handle);
            }
            Timer::NavigationCommit(_) => return page.shortcuts.on_elapsed(handle),
            Timer::ContactSent | Timer::ContactReset => {
                if let Some(contact) = page.contact.as_mut() {
                    contact.on_timer(handle, action, timers);
                }
            }
            _ => {}
        }
        None
    }

    /// Unmount whatever is displayed, cancelling all of its timers.
    pub fn teardown(&mut self, timers: &mut Timers) {
        self.unmount(timers);
        self.queued = None;
    }

    fn mount(&mut self, route: Route, timers: &mut Timers) -> PageInstanceId {
        self.next_page += 1;
        let id = PageInstanceId(self.next_page);
        let owner = timers.register_owner();
        let mut overlay = OverlaySlot::default();
        overlay.mount(OverlayVariant::Page, self.overlay_hide_after_ms, owner, timers);
        let phase_timer = timers.schedule(owner, self.enter_duration_ms, Timer::PageEnterComplete);
        self.page = Some(MountedPage {
            id,
            route,
            owner,
            phase: TransitionPhase::Entering,
            mounted_at: timers.now(),
            phase_timer: Some(phase_timer),
            overlay,
            shortcuts: DebouncedNavigation::new(owner, self.debounce_ms),
            contact: (route == Route::Contact)
                .then(|| ContactSubmission::new(owner, &self.contact_config)),
        });
        id
    }

    fn unmount(&mut self, timers: &mut Timers) {
        if let Some(page) = self.page.take() {
            timers.cancel_all(page.owner);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::timer_registry::TimerRegistry;
    use shared::ContactField;

    fn coordinator() -> (RouteTransitionCoordinator, Timers) {
        (
            RouteTransitionCoordinator::new(&PortfolioConfig::default()),
            TimerRegistry::new(0),
        )
    }

    fn run(pages: &mut RouteTransitionCoordinator, timers: &mut Timers, until: u64) -> Vec<Route> {
        let mut shortcuts = Vec::new();
        timers.run_until(until, |timers, fired| {
            if let Some(route) = pages.on_timer(fired.owner, fired.handle, fired.action, timers) {
                shortcuts.push(route);
            }
        });
        shortcuts
    }

    #[test]
    fn test_exit_before_enter() {
        let (mut pages, mut timers) = coordinator();
        let home = match pages.commit(Route::Home, &mut timers) {
            CommitOutcome::Mounted(id) => id,
            other => panic!("unexpected {:?}", other),
        };
        run(&mut pages, &mut timers, 1000);
        assert_eq!(pages.page().map(MountedPage::phase), Some(TransitionPhase::Idle));

        assert_eq!(
            pages.commit(Route::Projects, &mut timers),
            CommitOutcome::ExitStarted(home)
        );
        run(&mut pages, &mut timers, 1449);
        let page = pages.page().unwrap();
        assert_eq!((page.route(), page.phase()), (Route::Home, TransitionPhase::Exiting));

        run(&mut pages, &mut timers, 1450);
        let page = pages.page().unwrap();
        assert_eq!(page.route(), Route::Projects);
        assert_eq!(page.phase(), TransitionPhase::Entering);
        assert_eq!(page.mounted_at(), 1450);
        assert!(page.overlay().current().is_some_and(|overlay| overlay.is_visible()));

        run(&mut pages, &mut timers, 1450 + 650);
        assert_eq!(pages.page().unwrap().phase(), TransitionPhase::Idle);
        run(&mut pages, &mut timers, 1450 + 900);
        assert!(pages
            .page()
            .unwrap()
            .overlay()
            .current()
            .is_some_and(|overlay| !overlay.is_visible()));
    }

    #[test]
    fn test_navigation_during_exit_does_not_start_second_exit() {
        let (mut pages, mut timers) = coordinator();
        pages.commit(Route::Home, &mut timers);
        run(&mut pages, &mut timers, 1000);

        pages.commit(Route::About, &mut timers);
        timers.set_now(1100);
        assert_eq!(pages.commit(Route::Skills, &mut timers), CommitOutcome::Requeued);
        assert_eq!(pages.commit(Route::Contact, &mut timers), CommitOutcome::Requeued);
        assert_eq!(timers.pending_count(), 1);

        run(&mut pages, &mut timers, 1450);
        assert_eq!(pages.page().map(MountedPage::route), Some(Route::Contact));
        assert!(pages.page().unwrap().contact().is_some());
    }

    #[test]
    fn test_same_path_remounts_are_independent() {
        let (mut pages, mut timers) = coordinator();
        let mut ids = Vec::new();
        for (step, route) in [Route::About, Route::Projects, Route::About].into_iter().enumerate() {
            timers.set_now(step as u64 * 5000);
            pages.commit(route, &mut timers);
            run(&mut pages, &mut timers, step as u64 * 5000 + 2000);
            ids.push(pages.page().unwrap().id());
        }
        assert_eq!(ids.len(), 3);
        assert!(ids[0] != ids[1] && ids[1] != ids[2] && ids[0] != ids[2]);
    }

    #[test]
    fn test_back_to_exiting_route_mounts_fresh_instance() {
        let (mut pages, mut timers) = coordinator();
        pages.commit(Route::About, &mut timers);
        run(&mut pages, &mut timers, 1000);
        let first = pages.page().unwrap().id();

        pages.commit(Route::Projects, &mut timers);
        assert_eq!(pages.commit(Route::About, &mut timers), CommitOutcome::Requeued);
        run(&mut pages, &mut timers, 2000);

        let page = pages.page().unwrap();
        assert_eq!(page.route(), Route::About);
        assert_ne!(page.id(), first);
    }

    #[test]
    fn test_same_route_is_unchanged() {
        let (mut pages, mut timers) = coordinator();
        pages.commit(Route::Skills, &mut timers);
        assert_eq!(pages.commit(Route::Skills, &mut timers), CommitOutcome::Unchanged);
    }

    #[test]
    fn test_shortcut_cancelled_by_exit() {
        let (mut pages, mut timers) = coordinator();
        pages.commit(Route::Home, &mut timers);
        run(&mut pages, &mut timers, 1000);

        pages.press_shortcut(Route::Projects, &mut timers);
        assert_eq!(pages.page().unwrap().pressed(), Some(Route::Projects));
        pages.commit(Route::About, &mut timers);
        assert!(pages.press_shortcut(Route::Skills, &mut timers).is_none());

        assert!(run(&mut pages, &mut timers, 5000).is_empty());
        assert_eq!(pages.page().map(MountedPage::route), Some(Route::About));
    }

    #[test]
    fn test_cancelled_shortcut_never_commits() {
        let (mut pages, mut timers) = coordinator();
        pages.commit(Route::Home, &mut timers);
        run(&mut pages, &mut timers, 1000);

        pages.press_shortcut(Route::Skills, &mut timers);
        assert!(pages.cancel_shortcut(&mut timers));
        assert!(!pages.cancel_shortcut(&mut timers));
        assert_eq!(pages.page().unwrap().pressed(), None);
        assert!(run(&mut pages, &mut timers, 5000).is_empty());
    }

    #[test]
    fn test_contact_unmount_cancels_submission() {
        let (mut pages, mut timers) = coordinator();
        pages.commit(Route::Contact, &mut timers);
        run(&mut pages, &mut timers, 1000);
        let contact = pages.contact_mut().unwrap();
        for (field, value) in [
            (ContactField::Name, "Ada"),
            (ContactField::Email, "ada@example.com"),
            (ContactField::Subject, "Hi"),
            (ContactField::Message, "Hello"),
        ] {
            contact.edit(field, value.to_string());
        }
        assert!(contact.submit(&mut timers));

        timers.set_now(1010);
        pages.commit(Route::About, &mut timers);
        let fired = timers.fired_count();
        run(&mut pages, &mut timers, 20_000);

        // Only the exit, enter and overlay timers of the pages fire.
        assert_eq!(pages.page().map(MountedPage::route), Some(Route::About));
        assert_eq!(timers.fired_count() - fired, 3);
        assert_eq!(timers.pending_count(), 0);
    }

    #[test]
    fn test_teardown_cancels_everything() {
        let (mut pages, mut timers) = coordinator();
        pages.commit(Route::Home, &mut timers);
        pages.press_shortcut(Route::Contact, &mut timers);
        assert!(timers.pending_count() > 0);

        pages.teardown(&mut timers);
        assert_eq!(timers.pending_count(), 0);
        assert!(pages.page().is_none());
    }
}
