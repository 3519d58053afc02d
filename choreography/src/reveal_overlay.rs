//! Five-strip wipe overlay
//!
//! Entrance runs right-to-left (the rightmost strip starts first), exit runs
//! left-to-right. An overlay auto-hides once per mount after a fixed delay,
//! whether or not the page underneath is ready.

use crate::timer_registry::{OwnerTag, Timer, TimerHandle, Timers};
use shared::OverlaySection;

/// Per-strip delay formulas for the wipe.
#[derive(Debug, Clone, PartialEq)]
pub struct StripWipe {
    pub strip_count: usize,
    pub enter_step_ms: u64,
    pub exit_step_ms: u64,
    pub enter_duration_ms: u64,
    pub exit_duration_ms: u64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StripTiming {
    pub index: usize,
    pub enter_delay_ms: u64,
    pub exit_delay_ms: u64,
}

impl StripWipe {
    pub fn from_config(overlay: &OverlaySection) -> Self {
        Self {
            strip_count: overlay.strip_count,
            enter_step_ms: overlay.enter_step_ms,
            exit_step_ms: overlay.exit_step_ms,
            enter_duration_ms: overlay.strip_enter_duration_ms,
            exit_duration_ms: overlay.strip_exit_duration_ms,
        }
    }

    fn last_index(&self) -> usize {
        self.strip_count.saturating_sub(1)
    }

    /// Strip `i` (0 = leftmost) starts after `(N - 1 - i) * step`.
    pub fn enter_delay_ms(&self, strip: usize) -> u64 {
        self.last_index().saturating_sub(strip) as u64 * self.enter_step_ms
    }

    /// Strip `i` (0 = leftmost) starts after `i * step`.
    pub fn exit_delay_ms(&self, strip: usize) -> u64 {
        strip.min(self.last_index()) as u64 * self.exit_step_ms
    }

    pub fn wipe_in_total_ms(&self) -> u64 {
        self.enter_delay_ms(0) + self.enter_duration_ms
    }

    pub fn wipe_out_total_ms(&self) -> u64 {
        self.exit_delay_ms(self.last_index()) + self.exit_duration_ms
    }

    pub fn strips(&self) -> impl Iterator<Item = StripTiming> + '_ {
        (0..self.strip_count).map(|index| StripTiming {
            index,
            enter_delay_ms: self.enter_delay_ms(index),
            exit_delay_ms: self.exit_delay_ms(index),
        })
    }
}

impl Default for StripWipe {
    fn default() -> Self {
        Self::from_config(&OverlaySection::default())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum OverlayVariant {
    /// Covers a freshly mounted page and collapses to reveal it.
    Page,
    /// Backdrop of the full-screen navigation menu.
    Navbar,
}

/// Identity of one overlay mount. A new value means the view must restart
/// the strip animation from scratch.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct OverlayInstance {
    pub owner: OwnerTag,
    pub seq: u64,
}

#[derive(Debug, Clone, PartialEq)]
pub struct RevealOverlay {
    instance: OverlayInstance,
    variant: OverlayVariant,
    visible: bool,
    mounted_at: u64,
    hide_timer: Option<TimerHandle>,
}

impl RevealOverlay {
    pub fn instance(&self) -> OverlayInstance {
        self.instance
    }

    pub fn variant(&self) -> OverlayVariant {
        self.variant
    }

    pub fn is_visible(&self) -> bool {
        self.visible
    }

    pub fn mounted_at(&self) -> u64 {
        self.mounted_at
    }
}

/// Holds the single live overlay of one transition context (a page instance
/// or the menu). Mounting again replaces the previous overlay, cancelling
/// its hide timer first, so overlays never stack.
#[derive(Debug, Clone, Default)]
pub struct OverlaySlot {
    current: Option<RevealOverlay>,
    mounts: u64,
}

impl OverlaySlot {
    pub fn mount(
        &mut self,
        variant: OverlayVariant,
        hide_after_ms: u64,
        owner: OwnerTag,
        timers: &mut Timers,
    ) -> OverlayInstance {
        self.clear(timers);
        self.mounts += 1;
        let instance = OverlayInstance {
            owner,
            seq: self.mounts,
        };
        let hide_timer = timers.schedule(owner, hide_after_ms, Timer::OverlayHide);
        self.current = Some(RevealOverlay {
            instance,
            variant,
            visible: true,
            mounted_at: timers.now(),
            hide_timer: Some(hide_timer),
        });
        instance
    }

    /// Hide the overlay if `handle` is the live overlay's hide timer.
    pub fn on_hide_elapsed(&mut self, handle: TimerHandle) -> bool {
        match self.current.as_mut() {
            Some(overlay) if overlay.hide_timer == Some(handle) => {
                overlay.hide_timer = None;
                overlay.visible = false;
                true
            }
            _ => false,
        }
    }

    pub fn clear(&mut self, timers: &mut Timers) {
        if let Some(overlay) = self.current.take() {
            if let Some(handle) = overlay.hide_timer {
                timers.cancel(handle);
            }
        }
    }

    /// Drop the overlay when its owner's timers were already cancelled wholesale.
    pub fn forget(&mut self) {
        self.current = None;
    }

    pub fn current(&self) -> Option<&RevealOverlay> {
        self.current.as_ref()
    }

    pub fn live_count(&self) -> usize {
        usize::from(self.current.is_some())
    }

    pub fn mount_count(&self) -> u64 {
        self.mounts
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::timer_registry::TimerRegistry;

    #[test]
    fn test_entrance_is_rightmost_first() {
        let wipe = StripWipe {
            strip_count: 5,
            enter_step_ms: 150,
            exit_step_ms: 100,
            enter_duration_ms: 600,
            exit_duration_ms: 400,
        };
        for i in 0..5 {
            assert_eq!(wipe.enter_delay_ms(i), (4 - i as u64) * 150);
            assert_eq!(wipe.exit_delay_ms(i), i as u64 * 100);
        }
        let strips: Vec<_> = wipe.strips().collect();
        assert!(strips.windows(2).all(|w| w[0].enter_delay_ms > w[1].enter_delay_ms));
        assert!(strips.windows(2).all(|w| w[0].exit_delay_ms < w[1].exit_delay_ms));
        assert_eq!(strips[4].enter_delay_ms, 0);
        assert_eq!(strips[0].exit_delay_ms, 0);
    }

    #[test]
    fn test_wipe_totals() {
        let wipe = StripWipe::default();
        assert_eq!(wipe.wipe_in_total_ms(), 4 * 120 + 320);
        assert_eq!(wipe.wipe_out_total_ms(), 4 * 100 + 400);
    }

    #[test]
    fn test_single_strip_has_no_stagger() {
        let wipe = StripWipe {
            strip_count: 1,
            ..StripWipe::default()
        };
        assert_eq!(wipe.enter_delay_ms(0), 0);
        assert_eq!(wipe.exit_delay_ms(0), 0);
        assert_eq!(wipe.wipe_in_total_ms(), wipe.enter_duration_ms);
    }

    #[test]
    fn test_overlay_hides_once_after_timeout() {
        let mut timers = TimerRegistry::new(0);
        let owner = timers.register_owner();
        let mut slot = OverlaySlot::default();
        slot.mount(OverlayVariant::Navbar, 1400, owner, &mut timers);

        timers.run_until(1399, |_, fired| {
            slot.on_hide_elapsed(fired.handle);
        });
        assert!(slot.current().is_some_and(|overlay| overlay.is_visible()));

        let mut hides = 0;
        timers.run_until(5000, |_, fired| {
            if slot.on_hide_elapsed(fired.handle) {
                hides += 1;
            }
        });
        assert_eq!(hides, 1);
        assert!(slot.current().is_some_and(|overlay| !overlay.is_visible()));
    }

    #[test]
    fn test_remount_replaces_instead_of_stacking() {
        let mut timers = TimerRegistry::new(0);
        let owner = timers.register_owner();
        let mut slot = OverlaySlot::default();

        let first = slot.mount(OverlayVariant::Page, 900, owner, &mut timers);
        timers.set_now(100);
        let second = slot.mount(OverlayVariant::Page, 900, owner, &mut timers);
        timers.set_now(200);
        let third = slot.mount(OverlayVariant::Page, 900, owner, &mut timers);

        assert_ne!(first, second);
        assert_ne!(second, third);
        assert_eq!(slot.live_count(), 1);
        assert_eq!(timers.pending_for(owner), 1);
        assert_eq!(slot.current().map(RevealOverlay::mounted_at), Some(200));

        // Superseded hide timers were cancelled and cannot hide the live overlay.
        let mut hidden_at = Vec::new();
        timers.run_until(2000, |timers, fired| {
            if slot.on_hide_elapsed(fired.handle) {
                hidden_at.push(timers.now());
            }
        });
        assert_eq!(hidden_at, vec![1100]);
    }
}
