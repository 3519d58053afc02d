//! Projects view renderer selection by viewport width
//!
//! `Compact` below the breakpoint (stacked cards), `Wide` otherwise (the
//! drag/scroll gallery). Switching tears the old renderer down before the
//! new one mounts. The [`ResourceLedger`] counts the listeners and frame
//! loops held by mounted renderers so leaks are observable.

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LayoutMode {
    Compact,
    Wide,
}

pub fn layout_mode(width: u32, breakpoint: u32) -> LayoutMode {
    if width < breakpoint {
        LayoutMode::Compact
    } else {
        LayoutMode::Wide
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct RendererId(u64);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ActiveRenderer {
    pub id: RendererId,
    pub mode: LayoutMode,
    frame_loop: bool,
}

impl ActiveRenderer {
    pub fn runs_frame_loop(&self) -> bool {
        self.frame_loop
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ResourceLedger {
    resize_listeners: usize,
    frame_loops: usize,
}

impl ResourceLedger {
    pub fn resize_listeners(&self) -> usize {
        self.resize_listeners
    }

    pub fn frame_loops(&self) -> usize {
        self.frame_loops
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LayoutSwitch {
    pub from: ActiveRenderer,
    pub to: ActiveRenderer,
}

#[derive(Debug, Clone)]
pub struct ResponsiveLayoutSwitch {
    breakpoint: u32,
    width: u32,
    mode: LayoutMode,
    attached: bool,
    active: Option<ActiveRenderer>,
    next_renderer: u64,
}

impl ResponsiveLayoutSwitch {
    pub fn new(breakpoint: u32, width: u32) -> Self {
        Self {
            breakpoint,
            width,
            mode: layout_mode(width, breakpoint),
            attached: false,
            active: None,
            next_renderer: 0,
        }
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn mode(&self) -> LayoutMode {
        self.mode
    }

    pub fn is_attached(&self) -> bool {
        self.attached
    }

    pub fn active(&self) -> Option<ActiveRenderer> {
        self.active
    }

    /// Start observing on behalf of a mounted projects view. Idempotent.
    pub fn attach(&mut self, ledger: &mut ResourceLedger) -> RendererId {
        if let Some(active) = self.active.filter(|_| self.attached) {
            return active.id;
        }
        self.attached = true;
        ledger.resize_listeners += 1;
        self.mount_renderer(ledger).id
    }

    /// Record the latest width. When attached and the mode flips, the old
    /// renderer is released before the new one is mounted.
    pub fn on_resize(&mut self, width: u32, ledger: &mut ResourceLedger) -> Option<LayoutSwitch> {
        self.width = width;
        let mode = layout_mode(width, self.breakpoint);
        if mode == self.mode {
            return None;
        }
        self.mode = mode;
        if !self.attached {
            return None;
        }
        let from = self.teardown_renderer(ledger)?;
        let to = self.mount_renderer(ledger);
        Some(LayoutSwitch { from, to })
    }

    pub fn detach(&mut self, ledger: &mut ResourceLedger) {
        if !self.attached {
            return;
        }
        self.teardown_renderer(ledger);
        ledger.resize_listeners = ledger.resize_listeners.saturating_sub(1);
        self.attached = false;
    }

    fn mount_renderer(&mut self, ledger: &mut ResourceLedger) -> ActiveRenderer {
        self.next_renderer += 1;
        // The wide gallery animates its drag/scroll inertia every frame.
        let frame_loop = self.mode == LayoutMode::Wide;
        if frame_loop {
            ledger.frame_loops += 1;
        }
        let renderer = ActiveRenderer {
            id: RendererId(self.next_renderer),
            mode: self.mode,
            frame_loop,
        };
        self.active = Some(renderer);
        renderer
    }

    fn teardown_renderer(&mut self, ledger: &mut ResourceLedger) -> Option<ActiveRenderer> {
        let renderer = self.active.take()?;
        if renderer.frame_loop {
            ledger.frame_loops = ledger.frame_loops.saturating_sub(1);
        }
        Some(renderer)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_breakpoint_boundary() {
        assert_eq!(layout_mode(767, 768), LayoutMode::Compact);
        assert_eq!(layout_mode(768, 768), LayoutMode::Wide);
        assert_eq!(layout_mode(0, 768), LayoutMode::Compact);
    }

    #[test]
    fn test_width_tracked_while_detached() {
        let mut ledger = ResourceLedger::default();
        let mut switch = ResponsiveLayoutSwitch::new(768, 1024);
        assert!(switch.on_resize(500, &mut ledger).is_none());
        assert_eq!(switch.mode(), LayoutMode::Compact);
        assert_eq!(ledger, ResourceLedger::default());

        switch.attach(&mut ledger);
        assert_eq!(switch.active().map(|r| r.mode), Some(LayoutMode::Compact));
        assert_eq!(ledger.frame_loops(), 0);
        assert_eq!(ledger.resize_listeners(), 1);
    }

    #[test]
    fn test_wide_to_compact_releases_gallery_loop() {
        let mut ledger = ResourceLedger::default();
        let mut switch = ResponsiveLayoutSwitch::new(768, 1024);
        let gallery = switch.attach(&mut ledger);
        assert_eq!(ledger.frame_loops(), 1);

        let change = switch.on_resize(500, &mut ledger).unwrap();
        assert_eq!(change.from.id, gallery);
        assert_eq!(change.from.mode, LayoutMode::Wide);
        assert_eq!(change.to.mode, LayoutMode::Compact);
        assert_eq!(ledger.frame_loops(), 0);
        assert_eq!(ledger.resize_listeners(), 1);
    }

    #[test]
    fn test_repeated_crossings_leave_one_renderer() {
        let mut ledger = ResourceLedger::default();
        let mut switch = ResponsiveLayoutSwitch::new(768, 1024);
        switch.attach(&mut ledger);
        switch.attach(&mut ledger);

        let mut switches = 0;
        for crossing in 0..25 {
            let width = if crossing % 2 == 0 { 500 } else { 1200 };
            if switch.on_resize(width, &mut ledger).is_some() {
                switches += 1;
            }
            // Resizes within the same mode never remount.
            assert!(switch.on_resize(width + 1, &mut ledger).is_none());
        }

        assert_eq!(switches, 25);
        assert_eq!(switch.mode(), LayoutMode::Compact);
        assert_eq!(ledger.resize_listeners(), 1);
        assert_eq!(ledger.frame_loops(), 0);

        switch.detach(&mut ledger);
        switch.detach(&mut ledger);
        assert_eq!(ledger, ResourceLedger::default());
        assert!(switch.active().is_none());
    }
}
