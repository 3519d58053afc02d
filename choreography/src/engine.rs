//! Composition of all choreography components over one timer registry
//!
//! The host feeds [`Event`]s and clock ticks in; [`Effect`]s and a
//! [`Snapshot`] come out. Effects are derived by diffing snapshots around
//! every event and every fired timer, plus an explicit
//! [`Effect::Navigated`] emitted before the route change is applied.

use crate::contact::{ContactStatus, FieldErrors};
use crate::menu::{MenuState, MenuStateMachine};
use crate::responsive::{ActiveRenderer, LayoutMode, ResourceLedger, ResponsiveLayoutSwitch};
use crate::reveal_overlay::{OverlayInstance, OverlaySlot, StripWipe};
use crate::route_transition::{PageInstanceId, RouteTransitionCoordinator, TransitionPhase};
use crate::scroll_lock::Overflow;
use crate::timer_registry::{Fired, Timer, TimerRegistry, Timers};
use shared::{ContactField, ContactForm, PortfolioConfig, Route};

/// Location source and sink. The engine reads the current location to key
/// page transitions and calls `navigate` to commit a route change.
pub trait Router {
    fn current_location(&self) -> Route;
    fn navigate(&mut self, route: Route);
}

/// In-memory router with a visible history.
#[derive(Debug, Clone, PartialEq)]
pub struct MemoryRouter {
    location: Route,
    history: Vec<Route>,
}

impl MemoryRouter {
    pub fn new(start: Route) -> Self {
        Self {
            location: start,
            history: vec![start],
        }
    }

    pub fn history(&self) -> &[Route] {
        &self.history
    }
}

impl Router for MemoryRouter {
    fn current_location(&self) -> Route {
        self.location
    }

    fn navigate(&mut self, route: Route) {
        self.location = route;
        self.history.push(route);
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum Event {
    MenuToggled,
    MenuLinkPressed(Route),
    ShortcutPressed(Route),
    /// The location changed outside the engine (browser back/forward).
    LocationChanged(Route),
    ViewportResized(u32),
    ContactFieldEdited(ContactField, String),
    ContactSubmitted,
    Teardown,
}

#[derive(Debug, Clone, PartialEq)]
pub enum Effect {
    Navigated(Route),
    Pressed(Route),
    MenuChanged(MenuState),
    LinkRevealed(usize),
    ScrollPolicyChanged(Overflow),
    PageMounted { id: PageInstanceId, route: Route },
    PageUnmounted { id: PageInstanceId, route: Route },
    PagePhaseChanged { id: PageInstanceId, phase: TransitionPhase },
    OverlayShown(OverlayInstance),
    OverlayHidden(OverlayInstance),
    RendererChanged {
        from: Option<ActiveRenderer>,
        to: Option<ActiveRenderer>,
    },
    ContactStatusChanged(ContactStatus),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OverlayView {
    pub instance: OverlayInstance,
    pub visible: bool,
}

impl OverlayView {
    fn of(slot: &OverlaySlot) -> Option<Self> {
        slot.current().map(|overlay| OverlayView {
            instance: overlay.instance(),
            visible: overlay.is_visible(),
        })
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct ContactView {
    pub status: ContactStatus,
    pub form: ContactForm,
    pub errors: FieldErrors,
}

#[derive(Debug, Clone, PartialEq)]
pub struct PageView {
    pub id: PageInstanceId,
    pub route: Route,
    pub phase: TransitionPhase,
    pub overlay: Option<OverlayView>,
    pub pressed: Option<Route>,
    pub contact: Option<ContactView>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct MenuView {
    pub state: MenuState,
    pub overlay: Option<OverlayView>,
    pub revealed_links: Vec<bool>,
    pub pressed: Option<Route>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LayoutView {
    pub width: u32,
    pub mode: LayoutMode,
    pub renderer: Option<ActiveRenderer>,
}

/// Everything a view needs to render the current frame.
#[derive(Debug, Clone, PartialEq)]
pub struct Snapshot {
    pub location: Route,
    pub page: Option<PageView>,
    pub menu: MenuView,
    pub scroll_policy: Overflow,
    pub layout: LayoutView,
    pub wipe: StripWipe,
}

pub struct Choreographer<R: Router> {
    router: R,
    timers: Timers,
    menu: MenuStateMachine,
    pages: RouteTransitionCoordinator,
    layout: ResponsiveLayoutSwitch,
    layout_page: Option<PageInstanceId>,
    ledger: ResourceLedger,
    wipe: StripWipe,
    torn_down: bool,
}

impl<R: Router> Choreographer<R> {
    /// Build the engine and mount the page for the router's current location.
    pub fn new(
        config: &PortfolioConfig,
        router: R,
        viewport_width: u32,
        initial_overflow: Overflow,
        now: u64,
    ) -> Self {
        let mut timers = TimerRegistry::new(now);
        let menu = MenuStateMachine::new(config, initial_overflow, &mut timers);
        let mut pages = RouteTransitionCoordinator::new(config);
        pages.commit(router.current_location(), &mut timers);
        let mut engine = Self {
            router,
            timers,
            menu,
            pages,
            layout: ResponsiveLayoutSwitch::new(config.layout.compact_breakpoint_px, viewport_width),
            layout_page: None,
            ledger: ResourceLedger::default(),
            wipe: StripWipe::from_config(&config.overlay),
            torn_down: false,
        };
        engine.reconcile_layout();
        engine
    }

    pub fn handle(&mut self, event: Event, now: u64) -> Vec<Effect> {
        let mut effects = self.advance_to(now);
        if self.torn_down {
            return effects;
        }
        let before = self.snapshot();
        match event {
            Event::MenuToggled => {
                self.menu.toggle(&mut self.timers);
            }
            // Menu links and page shortcuts share one pending navigation:
            // whichever was pressed last is the only one that commits.
            Event::MenuLinkPressed(route) => {
                if self.menu.activate_link(route, &mut self.timers).is_some() {
                    self.pages.cancel_shortcut(&mut self.timers);
                }
            }
            Event::ShortcutPressed(route) => {
                if self.pages.press_shortcut(route, &mut self.timers).is_some() {
                    self.menu.cancel_navigation(&mut self.timers);
                }
            }
            Event::LocationChanged(route) => {
                self.pages.commit(route, &mut self.timers);
            }
            Event::ViewportResized(width) => {
                self.layout.on_resize(width, &mut self.ledger);
            }
            Event::ContactFieldEdited(field, value) => {
                if let Some(contact) = self.pages.contact_mut() {
                    contact.edit(field, value);
                }
            }
            Event::ContactSubmitted => {
                if let Some(contact) = self.pages.contact_mut() {
                    contact.submit(&mut self.timers);
                }
            }
            Event::Teardown => self.teardown(),
        }
        self.reconcile_layout();
        diff(&before, &self.snapshot(), &mut effects);
        effects
    }

    /// Fire every timer due at or before `now`, in deadline order.
    pub fn advance_to(&mut self, now: u64) -> Vec<Effect> {
        let mut effects = Vec::new();
        while let Some(fired) = self.timers.pop_due(now) {
            let before = self.snapshot();
            self.dispatch(fired, &mut effects);
            self.reconcile_layout();
            diff(&before, &self.snapshot(), &mut effects);
        }
        self.timers.set_now(now);
        effects
    }

    pub fn next_deadline(&self) -> Option<u64> {
        self.timers.next_deadline()
    }

    pub fn now(&self) -> u64 {
        self.timers.now()
    }

    pub fn timers(&self) -> &Timers {
        &self.timers
    }

    pub fn ledger(&self) -> ResourceLedger {
        self.ledger
    }

    pub fn router(&self) -> &R {
        &self.router
    }

    pub fn is_torn_down(&self) -> bool {
        self.torn_down
    }

    pub fn snapshot(&self) -> Snapshot {
        let page = self.pages.page().map(|page| PageView {
            id: page.id(),
            route: page.route(),
            phase: page.phase(),
            overlay: OverlayView::of(page.overlay()),
            pressed: page.pressed(),
            contact: page.contact().map(|contact| ContactView {
                status: contact.status(),
                form: contact.form().clone(),
                errors: contact.errors().clone(),
            }),
        });
        Snapshot {
            location: self.router.current_location(),
            page,
            menu: MenuView {
                state: self.menu.state(),
                overlay: OverlayView::of(self.menu.overlay()),
                revealed_links: self.menu.revealed_links().to_vec(),
                pressed: self.menu.pressed(),
            },
            scroll_policy: self.menu.scroll_lock().policy(),
            layout: LayoutView {
                width: self.layout.width(),
                mode: self.layout.mode(),
                renderer: self.layout.active(),
            },
            wipe: self.wipe.clone(),
        }
    }

    fn dispatch(&mut self, fired: Fired<Timer>, effects: &mut Vec<Effect>) {
        if fired.owner == self.menu.owner() {
            // Navigate first, then close, from the same callback.
            if let Some(route) = self.menu.on_timer(fired.handle, fired.action) {
                self.navigate(route, effects);
                self.menu.close(&mut self.timers);
            }
        } else if self.pages.owns(fired.owner) {
            if let Some(route) =
                self.pages
                    .on_timer(fired.owner, fired.handle, fired.action, &mut self.timers)
            {
                self.navigate(route, effects);
            }
        }
    }

    fn navigate(&mut self, route: Route, effects: &mut Vec<Effect>) {
        self.router.navigate(route);
        effects.push(Effect::Navigated(route));
        let location = self.router.current_location();
        self.pages.commit(location, &mut self.timers);
    }

    /// Keep exactly one projects renderer alive while a projects page
    /// instance is mounted, and none otherwise.
    fn reconcile_layout(&mut self) {
        let projects = self
            .pages
            .page()
            .filter(|page| page.route() == Route::Projects)
            .map(|page| page.id());
        if projects == self.layout_page {
            return;
        }
        self.layout.detach(&mut self.ledger);
        if projects.is_some() {
            self.layout.attach(&mut self.ledger);
        }
        self.layout_page = projects;
    }

    fn teardown(&mut self) {
        self.menu.teardown(&mut self.timers);
        self.pages.teardown(&mut self.timers);
        self.torn_down = true;
    }
}

fn diff(before: &Snapshot, after: &Snapshot, effects: &mut Vec<Effect>) {
    match (&before.page, &after.page) {
        (Some(old), Some(new)) if old.id == new.id => {
            if old.phase != new.phase {
                effects.push(Effect::PagePhaseChanged {
                    id: new.id,
                    phase: new.phase,
                });
            }
        }
        (old, new) => {
            if let Some(old) = old {
                effects.push(Effect::PageUnmounted {
                    id: old.id,
                    route: old.route,
                });
            }
            if let Some(new) = new {
                effects.push(Effect::PageMounted {
                    id: new.id,
                    route: new.route,
                });
            }
        }
    }
    let page_overlay = |page: &Option<PageView>| page.as_ref().and_then(|page| page.overlay);
    diff_overlay(page_overlay(&before.page), page_overlay(&after.page), effects);

    let page_pressed = |page: &Option<PageView>| page.as_ref().and_then(|page| page.pressed);
    diff_pressed(page_pressed(&before.page), page_pressed(&after.page), effects);

    let contact_status = |page: &Option<PageView>| {
        page.as_ref()
            .and_then(|page| page.contact.as_ref())
            .map(|contact| contact.status)
    };
    if let (Some(old), Some(new)) = (contact_status(&before.page), contact_status(&after.page)) {
        if old != new {
            effects.push(Effect::ContactStatusChanged(new));
        }
    }

    if before.menu.state != after.menu.state {
        effects.push(Effect::MenuChanged(after.menu.state));
    }
    diff_overlay(before.menu.overlay, after.menu.overlay, effects);
    for (index, revealed) in after.menu.revealed_links.iter().enumerate() {
        if *revealed && !before.menu.revealed_links.get(index).copied().unwrap_or(false) {
            effects.push(Effect::LinkRevealed(index));
        }
    }
    diff_pressed(before.menu.pressed, after.menu.pressed, effects);

    if before.scroll_policy != after.scroll_policy {
        effects.push(Effect::ScrollPolicyChanged(after.scroll_policy.clone()));
    }

    let renderer_id = |layout: &LayoutView| layout.renderer.map(|renderer| renderer.id);
    if renderer_id(&before.layout) != renderer_id(&after.layout) {
        effects.push(Effect::RendererChanged {
            from: before.layout.renderer,
            to: after.layout.renderer,
        });
    }
}

fn diff_overlay(before: Option<OverlayView>, after: Option<OverlayView>, effects: &mut Vec<Effect>) {
    let same_instance = matches!((before, after), (Some(old), Some(new)) if old.instance == new.instance);
    if let Some(old) = before.filter(|old| old.visible) {
        let still_visible = same_instance && after.is_some_and(|new| new.visible);
        if !still_visible {
            effects.push(Effect::OverlayHidden(old.instance));
        }
    }
    if let Some(new) = after.filter(|new| new.visible) {
        if !same_instance {
            effects.push(Effect::OverlayShown(new.instance));
        }
    }
}

fn diff_pressed(before: Option<Route>, after: Option<Route>, effects: &mut Vec<Effect>) {
    if let Some(route) = after.filter(|_| before != after) {
        effects.push(Effect::Pressed(route));
    }
}
