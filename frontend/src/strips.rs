//! Strip wipe rendering
//!
//! Timing comes from [`StripWipe`]; this module only turns a "covering"
//! signal into CSS transforms with per-strip transition delays.

use choreography::{StripTiming, StripWipe};
use zoon::*;

const STRIP_COLOR: &str = "#111114";
const STRIP_ACCENT_COLOR: &str = "#2b2bd9";
const STRIP_EASING: &str = "cubic-bezier(0.76, 0, 0.24, 1)";

/// How a strip row reacts when its covering signal flips.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WipeKind {
    /// Page overlay: starts covering and collapses right-to-left.
    Reveal,
    /// Menu backdrop: covers right-to-left, collapses left-to-right.
    Curtain,
}

/// Page overlay for one overlay instance. Mount a new one per instance so
/// every page mount replays the reveal.
pub fn page_reveal(wipe: &StripWipe) -> impl Element {
    let collapsed = Mutable::new(false);
    strip_row(wipe, WipeKind::Reveal, {
        let collapsed = collapsed.clone();
        move || collapsed.signal().map_bool(|| false, || true)
    }, || always(false))
    .after_insert(move |_| {
        // One frame in the covering pose so the transition has a start.
        Task::start(async move {
            Timer::sleep(16).await;
            collapsed.set_neq(true);
        });
    })
}

/// Menu backdrop. `accent` tints the strips while the menu's own overlay
/// instance is visible.
pub fn menu_curtain<C, A>(
    wipe: &StripWipe,
    covering: impl Fn() -> C + Clone + 'static,
    accent: impl Fn() -> A + Clone + 'static,
) -> impl Element
where
    C: Signal<Item = bool> + Unpin + 'static,
    A: Signal<Item = bool> + Unpin + 'static,
{
    strip_row(wipe, WipeKind::Curtain, covering, accent)
}

fn strip_row<C, A>(
    wipe: &StripWipe,
    kind: WipeKind,
    covering: impl Fn() -> C + Clone + 'static,
    accent: impl Fn() -> A + Clone + 'static,
) -> Row<row::EmptyFlagNotSet, RawHtmlEl>
where
    C: Signal<Item = bool> + Unpin + 'static,
    A: Signal<Item = bool> + Unpin + 'static,
{
    Row::new()
        .s(Width::fill())
        .s(Height::screen())
        .update_raw_el(|raw_el| raw_el.style("pointer-events", "none"))
        .items(wipe.strips().map(|timing| {
            strip(wipe, kind, timing, covering.clone(), accent.clone())
        }))
}

fn strip<C, A>(
    wipe: &StripWipe,
    kind: WipeKind,
    timing: StripTiming,
    covering: impl Fn() -> C + 'static,
    accent: impl Fn() -> A + 'static,
) -> impl Element
where
    C: Signal<Item = bool> + Unpin + 'static,
    A: Signal<Item = bool> + Unpin + 'static,
{
    let enter = format!(
        "transform {}ms {} {}ms, background-color 300ms ease",
        wipe.enter_duration_ms, STRIP_EASING, timing.enter_delay_ms
    );
    let exit = format!(
        "transform {}ms {} {}ms, background-color 300ms ease",
        wipe.exit_duration_ms, STRIP_EASING, timing.exit_delay_ms
    );
    El::new()
        .s(Width::fill())
        .s(Height::fill())
        .update_raw_el(move |raw_el| {
            raw_el
                .style("transform-origin", "top")
                .style("will-change", "transform")
                .style_signal(
                    "transform",
                    covering().map_bool(|| "scaleY(1)", || "scaleY(0)"),
                )
                .style_signal(
                    "transition",
                    covering().map(move |covering| match (kind, covering) {
                        // Reveal collapses with the entrance stagger.
                        (WipeKind::Reveal, _) => enter.clone(),
                        (WipeKind::Curtain, true) => enter.clone(),
                        (WipeKind::Curtain, false) => exit.clone(),
                    }),
                )
                .style_signal(
                    "background-color",
                    accent().map_bool(|| STRIP_ACCENT_COLOR, || STRIP_COLOR),
                )
        })
}
