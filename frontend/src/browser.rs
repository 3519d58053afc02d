//! Thin wrappers over the browser APIs the choreography needs
//!
//! Clock, viewport width, body overflow, History API routing, and window
//! event listeners that unregister themselves when dropped.

use choreography::{Overflow, Router};
use shared::Route;
use wasm_bindgen::JsCast;
use wasm_bindgen::closure::Closure;

/// Milliseconds since page load, from the high resolution clock.
pub fn now_ms() -> u64 {
    web_sys::window()
        .and_then(|window| window.performance())
        .map(|performance| performance.now().max(0.0) as u64)
        .unwrap_or(0)
}

pub fn viewport_width() -> u32 {
    web_sys::window()
        .and_then(|window| window.inner_width().ok())
        .and_then(|width| width.as_f64())
        .map(|width| width.max(0.0) as u32)
        .unwrap_or(0)
}

fn body_style() -> Option<web_sys::CssStyleDeclaration> {
    web_sys::window()
        .and_then(|window| window.document())
        .and_then(|document| document.body())
        .map(|body| body.style())
}

/// The inline overflow policy of `<body>`, `Unset` when none is set.
pub fn body_overflow() -> Overflow {
    body_style()
        .and_then(|style| style.get_property_value("overflow").ok())
        .map(|value| Overflow::from_css(&value))
        .unwrap_or_default()
}

pub fn set_body_overflow(policy: &Overflow) {
    let Some(style) = body_style() else {
        return;
    };
    let result = match policy {
        Overflow::Unset => style.remove_property("overflow").map(drop),
        policy => style.set_property("overflow", policy.as_css()),
    };
    if let Err(error) = result {
        zoon::eprintln!("Failed to set body overflow: {:?}", error);
    }
}

/// The route for the current address bar path. Unknown paths show Home.
pub fn current_route() -> Route {
    let path = web_sys::window()
        .and_then(|window| window.location().pathname().ok())
        .unwrap_or_default();
    Route::from_path(&path).unwrap_or_else(|error| {
        zoon::eprintln!("{}, showing {}", error, Route::Home);
        Route::Home
    })
}

/// [`Router`] backed by the History API.
#[derive(Debug, Clone, Copy, Default)]
pub struct BrowserRouter;

impl Router for BrowserRouter {
    fn current_location(&self) -> Route {
        current_route()
    }

    fn navigate(&mut self, route: Route) {
        let Some(window) = web_sys::window() else {
            return;
        };
        let pushed = window.history().and_then(|history| {
            history.push_state_with_url(&wasm_bindgen::JsValue::NULL, "", Some(route.path()))
        });
        if let Err(error) = pushed {
            zoon::eprintln!("Failed to push {} to history: {:?}", route, error);
        }
    }
}

/// A `window` event listener, removed again on drop.
pub struct WindowListener {
    event: &'static str,
    closure: Closure<dyn FnMut(web_sys::Event)>,
}

impl WindowListener {
    pub fn new(event: &'static str, handler: impl FnMut(web_sys::Event) + 'static) -> Self {
        let closure = Closure::wrap(Box::new(handler) as Box<dyn FnMut(web_sys::Event)>);
        if let Some(window) = web_sys::window() {
            if let Err(error) =
                window.add_event_listener_with_callback(event, closure.as_ref().unchecked_ref())
            {
                zoon::eprintln!("Failed to listen to '{}': {:?}", event, error);
            }
        }
        Self { event, closure }
    }
}

impl Drop for WindowListener {
    fn drop(&mut self) {
        if let Some(window) = web_sys::window() {
            let _ = window.remove_event_listener_with_callback(
                self.event,
                self.closure.as_ref().unchecked_ref(),
            );
        }
    }
}
