//! Deterministic animation and navigation choreography for the portfolio
//!
//! Every timed behavior of the site runs on one virtual clock so it can be
//! driven from a browser timeout or stepped millisecond by millisecond in
//! tests. Nothing in this crate touches the DOM.
//!
//! # Components
//!
//! - **[`TimerRegistry`]** - Cancellable deadlines grouped by owner
//! - **[`OverlaySlot`]** - At most one strip-wipe overlay per context
//! - **[`ScrollLock`]** - Saves and restores the page overflow policy
//! - **[`DebouncedNavigation`]** - Last-request-wins delayed route commit
//! - **[`MenuStateMachine`]** - Fullscreen menu open/close sequencing
//! - **[`RouteTransitionCoordinator`]** - Exit-before-enter page swaps
//! - **[`ResponsiveLayoutSwitch`]** - Projects renderer chosen by width
//! - **[`ContactSubmission`]** - Simulated contact form send
//! - **[`Choreographer`]** - All of the above behind one event loop
//!
//! # Rules
//!
//! 1. **Owners cancel wholesale** - Unmounting cancels every timer of its owner
//! 2. **Stale fires are no-ops** - Callbacks check their handle before acting
//! 3. **Effects, not side effects** - The host applies returned [`Effect`]s

pub mod contact;
pub mod debounced_navigation;
pub mod engine;
pub mod menu;
pub mod responsive;
pub mod reveal_overlay;
pub mod route_transition;
pub mod scroll_lock;
pub mod timer_registry;

pub use contact::{ContactStatus, ContactSubmission, FieldErrors};
pub use debounced_navigation::DebouncedNavigation;
pub use engine::{
    Choreographer, ContactView, Effect, Event, LayoutView, MemoryRouter, MenuView, OverlayView,
    PageView, Router, Snapshot,
};
pub use menu::{MenuState, MenuStateMachine};
pub use responsive::{
    ActiveRenderer, LayoutMode, LayoutSwitch, RendererId, ResourceLedger, ResponsiveLayoutSwitch,
    layout_mode,
};
pub use reveal_overlay::{
    OverlayInstance, OverlaySlot, OverlayVariant, RevealOverlay, StripTiming, StripWipe,
};
pub use route_transition::{
    CommitOutcome, MountedPage, PageInstanceId, RouteTransitionCoordinator, TransitionPhase,
};
pub use scroll_lock::{Overflow, ScrollLock};
pub use timer_registry::{Fired, OwnerTag, Timer, TimerHandle, TimerRegistry, Timers};
