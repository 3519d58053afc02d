//! Single-value Actor
//!
//! An Actor owns a `Mutable<T>` and a task that processes events from
//! Relays, so every state change goes through one sequential loop.

use std::future::Future;
use std::sync::Arc;
use zoon::{Mutable, Signal, Task, TaskHandle};

/// Single-value reactive state container.
///
/// The processor future may hold browser resources (timeouts, event
/// listeners); they live exactly as long as the Actor because dropping the
/// last clone aborts the task.
///
/// ```rust
/// let (menu_toggled_relay, mut menu_toggled) = relay::<()>();
///
/// let menu_open = Actor::new(false, async move |state| {
///     while let Some(()) = menu_toggled.next().await {
///         state.update(|open| !open);
///     }
/// });
///
/// El::new().child_signal(menu_open.signal().map(|open| open.then(menu_panel)))
/// ```
#[derive(Clone, Debug)]
pub struct Actor<T>
where
    T: Clone + Send + Sync + 'static,
{
    state: Mutable<T>,
    #[allow(dead_code)]
    task_handle: Arc<TaskHandle>,
}

impl<T> Actor<T>
where
    T: Clone + Send + Sync + 'static,
{
    /// Create an Actor with its initial state and its event loop.
    pub fn new<F, Fut>(initial_state: T, processor: F) -> Self
    where
        F: FnOnce(Mutable<T>) -> Fut + 'static,
        Fut: Future<Output = ()> + 'static,
    {
        let state = Mutable::new(initial_state);
        let task_handle = Arc::new(Task::start_droppable(processor(state.clone())));
        Self { state, task_handle }
    }

    pub fn signal(&self) -> impl Signal<Item = T> {
        self.state.signal_cloned()
    }

    /// Signal of a projection of the state, without cloning the whole value.
    pub fn signal_ref<U>(&self, f: impl Fn(&T) -> U + 'static) -> impl Signal<Item = U>
    where
        U: PartialEq + 'static,
    {
        self.state.signal_ref(f)
    }
}
