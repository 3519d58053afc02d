use crate::contact::contact_page;
use crate::driver::ChoreographyDriver;
use crate::projects::projects_page;
use crate::strips::{menu_curtain, page_reveal};
use choreography::{MenuState, TransitionPhase};
use shared::Route;
use zoon::*;

const INK: &str = "#f4f4f6";
const INK_MUTED: &str = "#a1a1aa";
const PAPER: &str = "#0a0a0c";
const ACCENT: &str = "#6366f1";
const PAGE_EASING: &str = "cubic-bezier(0.22, 1, 0.36, 1)";

/// Root element. Holding `driver` here keeps the engine alive for as long
/// as the app is in the DOM; removal tears the choreography down.
pub fn root(driver: ChoreographyDriver) -> impl Element {
    Stack::new()
        .s(Width::fill())
        .update_raw_el(|raw_el| raw_el.style("min-height", "100vh"))
        .s(Background::new().color(PAPER))
        .s(Font::new().color(INK).family([
            FontFamily::new("Figtree"),
            FontFamily::new("Inter"),
            FontFamily::new("system-ui"),
            FontFamily::SansSerif,
        ]))
        .layer(page_host(&driver))
        .layer(fixed_layer(page_overlay(&driver), "0"))
        .layer(fixed_layer(menu_layer(&driver), "0"))
        .layer(fixed_layer(navbar(&driver), "0 0 auto 0"))
        .after_remove(move |_| driver.app_removed_relay.send(()))
}

fn fixed_layer(content: impl Element, inset: &'static str) -> impl Element {
    El::new()
        .s(Width::fill())
        .update_raw_el(move |raw_el| {
            raw_el
                .style("position", "fixed")
                .style("inset", inset)
                .style("pointer-events", "none")
        })
        .child(content)
}

// ===== NAVBAR & MENU =====

fn navbar(driver: &ChoreographyDriver) -> impl Element {
    Row::new()
        .s(Width::fill())
        .s(Padding::new().x(32).y(20))
        .s(Align::new().top())
        .update_raw_el(|raw_el| raw_el.style("pointer-events", "auto"))
        .item(
            El::new()
                .s(Font::new().size(20).weight(FontWeight::Bold).color(INK))
                .child("portfolio."),
        )
        .item(
            Button::new()
                .s(Align::new().right())
                .s(Padding::new().x(16).y(8))
                .s(RoundedCorners::all_max())
                .s(Borders::all(Border::new().width(1).color(INK_MUTED)))
                .s(Font::new().size(14).color(INK).weight(FontWeight::Medium))
                .label(Text::with_signal(driver.menu_state_signal().map(|state| {
                    if state.is_open_target() { "Close" } else { "Menu" }
                })))
                .on_press({
                    let menu_toggled_relay = driver.menu_toggled_relay.clone();
                    move || menu_toggled_relay.send(())
                }),
        )
}

fn menu_layer(driver: &ChoreographyDriver) -> impl Element {
    let menu_open = {
        let driver = driver.clone();
        move || driver.menu_state_signal().map(MenuState::is_open_target)
    };
    let accent = {
        let driver = driver.clone();
        move || {
            driver
                .menu_overlay_signal()
                .map(|overlay| overlay.is_some_and(|overlay| overlay.visible))
        }
    };
    Stack::new()
        .s(Width::fill())
        .s(Height::screen())
        .update_raw_el({
            let menu_open = menu_open.clone();
            move |raw_el| {
                raw_el.style_signal("pointer-events", menu_open().map_bool(|| "auto", || "none"))
            }
        })
        .layer(menu_curtain(driver.wipe(), menu_open, accent))
        .layer(
            Column::new()
                .s(Align::center())
                .s(Gap::new().y(12))
                .items(
                    Route::MENU
                        .iter()
                        .enumerate()
                        .map(|(index, route)| menu_link(driver, index, *route)),
                ),
        )
}

fn menu_link(driver: &ChoreographyDriver, index: usize, route: Route) -> impl Element {
    let revealed = {
        let driver = driver.clone();
        move || driver.link_revealed_signal(index)
    };
    let pressed = driver
        .menu_pressed_signal()
        .map(move |pressed| pressed == Some(route));
    let current = driver.location_signal().map(move |location| location == route);
    Button::new()
        .s(Font::new()
            .size(48)
            .weight(FontWeight::Bold)
            .color_signal(current.map_bool(|| ACCENT, || INK)))
        .s(Transform::with_signal_self(pressed.map(|pressed| {
            pressed.then(|| Transform::new().scale(92))
        })))
        .update_raw_el(move |raw_el| {
            raw_el
                .style("transition", "opacity 400ms ease, transform 400ms ease")
                .style_signal("opacity", revealed().map_bool(|| "1", || "0"))
                .style_signal(
                    "translate",
                    revealed().map_bool(|| "0 0", || "0 24px"),
                )
        })
        .label(route.label())
        .on_press({
            let menu_link_pressed_relay = driver.menu_link_pressed_relay.clone();
            move || menu_link_pressed_relay.send(route)
        })
}

// ===== PAGES =====

fn page_overlay(driver: &ChoreographyDriver) -> impl Element {
    let wipe = driver.wipe().clone();
    El::new().s(Width::fill()).child_signal(
        driver
            .page_overlay_signal()
            .map(|overlay| overlay.filter(|overlay| overlay.visible).map(|overlay| overlay.instance))
            .dedupe()
            .map(move |instance| instance.map(|_| page_reveal(&wipe))),
    )
}

fn page_host(driver: &ChoreographyDriver) -> impl Element {
    El::new().s(Width::fill()).child_signal(driver.page_signal().map({
        let driver = driver.clone();
        move |page| page.map(|(_, route)| page_frame(&driver, route))
    }))
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum PagePose {
    Before,
    Shown,
    Leaving,
}

/// One mounted page instance. It fades in once inserted and fades out
/// while the engine holds it in `Exiting`.
fn page_frame(driver: &ChoreographyDriver, route: Route) -> impl Element {
    let inserted = Mutable::new(false);
    let timing = driver.page_timing().clone();
    let pose = {
        let driver = driver.clone();
        let inserted = inserted.clone();
        move || {
            map_ref! {
                let phase = driver.page_phase_signal(),
                let inserted = inserted.signal() => match (phase, inserted) {
                    (Some(TransitionPhase::Exiting), _) => PagePose::Leaving,
                    (_, true) => PagePose::Shown,
                    (_, false) => PagePose::Before,
                }
            }
            .dedupe()
        }
    };
    El::new()
        .s(Width::fill())
        .s(Padding::new().top(96).x(32).bottom(64))
        .update_raw_el(move |raw_el| {
            raw_el
                .style_signal(
                    "opacity",
                    pose().map(|pose| if pose == PagePose::Shown { "1" } else { "0" }),
                )
                .style_signal(
                    "translate",
                    pose().map(|pose| match pose {
                        PagePose::Before => "0 32px",
                        PagePose::Shown => "0 0",
                        PagePose::Leaving => "0 -32px",
                    }),
                )
                .style_signal(
                    "transition",
                    pose().map(move |pose| {
                        let duration = match pose {
                            PagePose::Leaving => timing.exit_duration_ms,
                            _ => timing.enter_duration_ms,
                        };
                        format!("opacity {duration}ms {PAGE_EASING}, translate {duration}ms {PAGE_EASING}")
                    }),
                )
        })
        .after_insert(move |_| {
            Task::start(async move {
                Timer::sleep(16).await;
                inserted.set_neq(true);
            });
        })
        .child(page_content(driver, route))
}

fn page_content(driver: &ChoreographyDriver, route: Route) -> RawElOrText {
    match route {
        Route::Home => home_page(driver).unify(),
        Route::About => about_page().unify(),
        Route::Projects => projects_page(driver).unify(),
        Route::Skills => skills_page().unify(),
        Route::Contact => contact_page(driver).unify(),
    }
}

fn page_title(title: &str) -> impl Element {
    El::new()
        .s(Font::new().size(56).weight(FontWeight::Bold).color(INK))
        .s(Padding::new().bottom(24))
        .child(title)
}

fn paragraph(text: &str) -> impl Element {
    Paragraph::new()
        .s(Font::new().size(18).color(INK_MUTED).line_height(28))
        .s(Width::fill().max(720))
        .content(text)
}

fn home_page(driver: &ChoreographyDriver) -> impl Element {
    Column::new()
        .s(Gap::new().y(24))
        .item(page_title("Hi, I build things for the web."))
        .item(paragraph(
            "Frontend engineer focused on motion, interaction and the small details that make interfaces feel alive.",
        ))
        .item(
            Row::new()
                .s(Gap::new().x(16))
                .multiline()
                .items(Route::HERO_SHORTCUTS.iter().map(|route| shortcut_button(driver, *route))),
        )
}

/// Landing page button: the press animation shows immediately, the route
/// changes after the debounce latency.
fn shortcut_button(driver: &ChoreographyDriver, route: Route) -> impl Element {
    let pressed = driver
        .shortcut_pressed_signal()
        .map(move |pressed| pressed == Some(route))
        .broadcast();
    Button::new()
        .s(Padding::new().x(24).y(12))
        .s(RoundedCorners::all_max())
        .s(Font::new().size(16).weight(FontWeight::SemiBold).color(INK))
        .s(Background::new().color_signal(pressed.signal().map_bool(|| ACCENT, || "transparent")))
        .s(Borders::all(Border::new().width(1).color(ACCENT)))
        .s(Transform::with_signal_self(
            pressed.signal().map(|pressed| pressed.then(|| Transform::new().scale(94))),
        ))
        .s(Transitions::new([
            Transition::property("transform").duration(150),
            Transition::property("background-color").duration(150),
        ]))
        .label(route.label())
        .on_press({
            let shortcut_pressed_relay = driver.shortcut_pressed_relay.clone();
            move || shortcut_pressed_relay.send(route)
        })
}

fn about_page() -> impl Element {
    Column::new()
        .s(Gap::new().y(20))
        .item(page_title("About"))
        .item(paragraph(
            "I have spent the last years designing and shipping interfaces where animation carries meaning: transitions that explain where you came from and where you are going.",
        ))
        .item(paragraph(
            "When not coding I sketch layouts, take photos of city lights and tinker with generative art.",
        ))
}

const SKILLS: [(&str, &[&str]); 3] = [
    ("Languages", &["Rust", "TypeScript", "GLSL", "SQL"]),
    ("Frontend", &["WebGL", "Animation", "Accessibility", "Design systems"]),
    ("Tooling", &["Vite", "Cargo", "Figma", "CI pipelines"]),
];

fn skills_page() -> impl Element {
    Column::new()
        .s(Gap::new().y(32))
        .item(page_title("Skills"))
        .items(SKILLS.iter().map(|(group, skills)| {
            Column::new()
                .s(Gap::new().y(12))
                .item(
                    El::new()
                        .s(Font::new().size(14).weight(FontWeight::SemiBold).color(INK_MUTED))
                        .child(*group),
                )
                .item(Row::new().s(Gap::new().x(8).y(8)).multiline().items(skills.iter().map(
                    |skill| {
                        El::new()
                            .s(Padding::new().x(14).y(6))
                            .s(RoundedCorners::all_max())
                            .s(Borders::all(Border::new().width(1).color(INK_MUTED)))
                            .s(Font::new().size(15).color(INK))
                            .child(*skill)
                    },
                )))
        }))
}
