//! ChoreographyDriver - hosts the choreography engine in an Actor
//!
//! The engine runs on the browser's millisecond clock. After every event or
//! fired deadline the driver applies the returned effects, publishes a fresh
//! [`Snapshot`] and re-arms a single timeout for the engine's next deadline.

use crate::browser::{self, BrowserRouter, WindowListener};
use crate::dataflow::{Actor, Relay, relay};
use crate::debug::{DEBUG_CHOREOGRAPHY, debug_log};
use choreography::{
    ActiveRenderer, Choreographer, ContactStatus, Effect, Event, MenuState, OverlayView,
    PageInstanceId, Snapshot, StripWipe, TransitionPhase,
};
use futures::{StreamExt, select};
use gloo_timers::callback::Timeout;
use shared::{ContactField, PageSection, PortfolioConfig, Route};
use zoon::*;

#[derive(Clone)]
pub struct ChoreographyDriver {
    snapshot: Actor<Snapshot>,
    wipe: StripWipe,
    page_timing: PageSection,

    /// Hamburger button pressed
    pub menu_toggled_relay: Relay<()>,
    /// Link tapped inside the fullscreen menu
    pub menu_link_pressed_relay: Relay<Route>,
    /// In-page shortcut button pressed (landing page)
    pub shortcut_pressed_relay: Relay<Route>,
    /// Contact form input changed
    pub contact_field_edited_relay: Relay<(ContactField, String)>,
    /// Contact form submit button pressed
    pub contact_submitted_relay: Relay<()>,
    /// Root element removed from the DOM
    pub app_removed_relay: Relay<()>,
}

impl ChoreographyDriver {
    pub fn new(config: &PortfolioConfig) -> Self {
        let engine = Choreographer::new(
            config,
            BrowserRouter,
            browser::viewport_width(),
            browser::body_overflow(),
            browser::now_ms(),
        );
        let wipe = engine.snapshot().wipe;

        let (menu_toggled_relay, mut menu_toggled) = relay();
        let (menu_link_pressed_relay, mut menu_link_pressed) = relay();
        let (shortcut_pressed_relay, mut shortcut_pressed) = relay();
        let (contact_field_edited_relay, mut contact_field_edited) = relay();
        let (contact_submitted_relay, mut contact_submitted) = relay();
        let (app_removed_relay, mut app_removed) = relay();

        let snapshot = Actor::new(engine.snapshot(), async move |state| {
            let mut engine = engine;
            let (deadline_reached_relay, mut deadline_reached) = relay::<()>();
            let (location_changed_relay, mut location_changed) = relay::<Route>();
            let (viewport_resized_relay, mut viewport_resized) = relay::<u32>();

            let _popstate_listener = WindowListener::new("popstate", move |_| {
                location_changed_relay.send(browser::current_route())
            });
            let _resize_listener = WindowListener::new("resize", move |_| {
                viewport_resized_relay.send(browser::viewport_width())
            });

            let mut alarm = None;
            arm_deadline(&mut alarm, &engine, &deadline_reached_relay);

            loop {
                // `None` means the armed deadline elapsed.
                let event = select! {
                    event = menu_toggled.next() => match event {
                        Some(()) => Some(Event::MenuToggled),
                        None => break,
                    },
                    event = menu_link_pressed.next() => match event {
                        Some(route) => Some(Event::MenuLinkPressed(route)),
                        None => break,
                    },
                    event = shortcut_pressed.next() => match event {
                        Some(route) => Some(Event::ShortcutPressed(route)),
                        None => break,
                    },
                    event = location_changed.next() => match event {
                        Some(route) => Some(Event::LocationChanged(route)),
                        None => break,
                    },
                    event = viewport_resized.next() => match event {
                        Some(width) => Some(Event::ViewportResized(width)),
                        None => break,
                    },
                    event = contact_field_edited.next() => match event {
                        Some((field, value)) => Some(Event::ContactFieldEdited(field, value)),
                        None => break,
                    },
                    event = contact_submitted.next() => match event {
                        Some(()) => Some(Event::ContactSubmitted),
                        None => break,
                    },
                    event = app_removed.next() => match event {
                        Some(()) => Some(Event::Teardown),
                        None => break,
                    },
                    event = deadline_reached.next() => match event {
                        Some(()) => None,
                        None => break,
                    },
                };

                let now = browser::now_ms();
                let effects = match event {
                    Some(event) => {
                        debug_log!(DEBUG_CHOREOGRAPHY, "[{}ms] {:?}", now, event);
                        engine.handle(event, now)
                    }
                    None => engine.advance_to(now),
                };
                apply_effects(&effects);
                state.set_neq(engine.snapshot());

                if engine.is_torn_down() {
                    debug_log!(DEBUG_CHOREOGRAPHY, "[{}ms] choreography stopped", now);
                    break;
                }
                arm_deadline(&mut alarm, &engine, &deadline_reached_relay);
            }
        });

        Self {
            snapshot,
            wipe,
            page_timing: config.page.clone(),
            menu_toggled_relay,
            menu_link_pressed_relay,
            shortcut_pressed_relay,
            contact_field_edited_relay,
            contact_submitted_relay,
            app_removed_relay,
        }
    }

    pub fn wipe(&self) -> &StripWipe {
        &self.wipe
    }

    pub fn page_timing(&self) -> &PageSection {
        &self.page_timing
    }

    // ===== SIGNALS =====

    /// Identity of the mounted page; changes only on mount/unmount.
    pub fn page_signal(&self) -> impl Signal<Item = Option<(PageInstanceId, Route)>> {
        self.snapshot
            .signal_ref(|snapshot| snapshot.page.as_ref().map(|page| (page.id, page.route)))
            .dedupe()
    }

    pub fn page_phase_signal(&self) -> impl Signal<Item = Option<TransitionPhase>> {
        self.snapshot
            .signal_ref(|snapshot| snapshot.page.as_ref().map(|page| page.phase))
            .dedupe()
    }

    pub fn page_overlay_signal(&self) -> impl Signal<Item = Option<OverlayView>> {
        self.snapshot
            .signal_ref(|snapshot| snapshot.page.as_ref().and_then(|page| page.overlay))
            .dedupe()
    }

    pub fn shortcut_pressed_signal(&self) -> impl Signal<Item = Option<Route>> {
        self.snapshot
            .signal_ref(|snapshot| snapshot.page.as_ref().and_then(|page| page.pressed))
            .dedupe()
    }

    pub fn location_signal(&self) -> impl Signal<Item = Route> {
        self.snapshot.signal_ref(|snapshot| snapshot.location).dedupe()
    }

    pub fn menu_state_signal(&self) -> impl Signal<Item = MenuState> {
        self.snapshot.signal_ref(|snapshot| snapshot.menu.state).dedupe()
    }

    pub fn menu_overlay_signal(&self) -> impl Signal<Item = Option<OverlayView>> {
        self.snapshot.signal_ref(|snapshot| snapshot.menu.overlay).dedupe()
    }

    pub fn link_revealed_signal(&self, index: usize) -> impl Signal<Item = bool> {
        self.snapshot
            .signal_ref(move |snapshot| {
                snapshot.menu.revealed_links.get(index).copied().unwrap_or(false)
            })
            .dedupe()
    }

    pub fn menu_pressed_signal(&self) -> impl Signal<Item = Option<Route>> {
        self.snapshot.signal_ref(|snapshot| snapshot.menu.pressed).dedupe()
    }

    pub fn renderer_signal(&self) -> impl Signal<Item = Option<ActiveRenderer>> {
        self.snapshot.signal_ref(|snapshot| snapshot.layout.renderer).dedupe()
    }

    pub fn contact_status_signal(&self) -> impl Signal<Item = ContactStatus> {
        self.snapshot
            .signal_ref(|snapshot| {
                snapshot
                    .page
                    .as_ref()
                    .and_then(|page| page.contact.as_ref())
                    .map(|contact| contact.status)
                    .unwrap_or_default()
            })
            .dedupe()
    }

    pub fn contact_field_signal(&self, field: ContactField) -> impl Signal<Item = String> {
        self.snapshot
            .signal_ref(move |snapshot| {
                snapshot
                    .page
                    .as_ref()
                    .and_then(|page| page.contact.as_ref())
                    .map(|contact| contact.form.field(field).to_string())
                    .unwrap_or_default()
            })
            .dedupe_cloned()
    }

    pub fn contact_error_signal(&self, field: ContactField) -> impl Signal<Item = Option<&'static str>> {
        self.snapshot
            .signal_ref(move |snapshot| {
                snapshot
                    .page
                    .as_ref()
                    .and_then(|page| page.contact.as_ref())
                    .and_then(|contact| contact.errors.get(&field).copied())
            })
            .dedupe()
    }
}

fn apply_effects(effects: &[Effect]) {
    for effect in effects {
        debug_log!(DEBUG_CHOREOGRAPHY, "    {:?}", effect);
        match effect {
            Effect::ScrollPolicyChanged(policy) => browser::set_body_overflow(policy),
            Effect::PageMounted { .. } => scroll_to_top(),
            _ => {}
        }
    }
}

fn scroll_to_top() {
    if let Some(window) = web_sys::window() {
        window.scroll_to_with_x_and_y(0.0, 0.0);
    }
}

/// Replace the armed timeout with one for the engine's next deadline.
/// Dropping the previous `Timeout` cancels it.
fn arm_deadline(
    alarm: &mut Option<Timeout>,
    engine: &Choreographer<BrowserRouter>,
    deadline_reached_relay: &Relay<()>,
) {
    *alarm = engine.next_deadline().map(|deadline| {
        let delay = deadline.saturating_sub(engine.now());
        let delay = u32::try_from(delay).unwrap_or(u32::MAX);
        let deadline_reached_relay = deadline_reached_relay.clone();
        Timeout::new(delay, move || deadline_reached_relay.send(()))
    });
}
