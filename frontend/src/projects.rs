//! Projects page renderers
//!
//! The engine decides which renderer is active; this module only draws it.
//! The wide gallery owns a frame loop task that is dropped together with
//! its element, so switching to the compact cards stops the loop.

use crate::debug::{DEBUG_GALLERY, debug_log};
use crate::driver::ChoreographyDriver;
use choreography::{ActiveRenderer, LayoutMode};
use shared::{GalleryItem, GalleryParams, project_catalog};
use std::sync::Arc;
use zoon::*;

const CARD_WIDTH: f64 = 420.0;
const CARD_GAP: f64 = 40.0;
const FRAME_MS: u32 = 16;

pub fn projects_page(driver: &ChoreographyDriver) -> impl Element {
    Column::new()
        .s(Gap::new().y(32))
        .item(
            El::new()
                .s(Font::new().size(56).weight(FontWeight::Bold))
                .child("Projects"),
        )
        .item(El::new().s(Width::fill()).child_signal(driver.renderer_signal().map(
            |renderer| renderer.map(render),
        )))
}

fn render(renderer: ActiveRenderer) -> RawElOrText {
    debug_log!(DEBUG_GALLERY, "Mounting {:?} projects renderer {:?}", renderer.mode, renderer.id);
    let items = project_catalog();
    match renderer.mode {
        LayoutMode::Wide => gallery(items, GalleryParams::default()).unify(),
        LayoutMode::Compact => stacked_cards(items).unify(),
    }
}

// ===== WIDE: DRAG GALLERY =====

fn gallery(items: Vec<GalleryItem>, params: GalleryParams) -> impl Element {
    let target = Mutable::new(0.0_f64);
    let offset = Mutable::new(0.0_f64);
    let drag_origin: Mutable<Option<(f64, f64)>> = Mutable::new(None);
    let max_offset = (items.len().saturating_sub(1)) as f64 * (CARD_WIDTH + CARD_GAP);

    let frame_loop = Task::start_droppable({
        let target = target.clone();
        let offset = offset.clone();
        let ease = params.scroll_ease;
        async move {
            debug_log!(DEBUG_GALLERY, "Gallery frame loop started");
            loop {
                Timer::sleep(FRAME_MS).await;
                let goal = target.get();
                let current = offset.get();
                if (goal - current).abs() > 0.1 {
                    offset.set(current + (goal - current) * ease);
                }
            }
        }
    });
    let params = Arc::new(params);

    Row::new()
        .s(Width::fill())
        .s(Height::exact(520))
        .s(Gap::new().x(CARD_GAP as u32))
        .s(Cursor::new(CursorIcon::Grab))
        .update_raw_el(|raw_el| {
            raw_el
                .style("perspective", "1200px")
                .style("overflow", "hidden")
                .style("touch-action", "pan-y")
                .style("user-select", "none")
        })
        .on_pointer_down_event({
            let target = target.clone();
            let drag_origin = drag_origin.clone();
            move |event: PointerEvent| drag_origin.set(Some((event.x() as f64, target.get())))
        })
        .on_pointer_move_event({
            let target = target.clone();
            let drag_origin = drag_origin.clone();
            let scroll_speed = params.scroll_speed;
            move |event: PointerEvent| {
                if let Some((start_x, start_target)) = drag_origin.get() {
                    let dragged = (start_x - event.x() as f64) * scroll_speed;
                    target.set((start_target + dragged).clamp(0.0, max_offset));
                }
            }
        })
        .on_pointer_up({
            let drag_origin = drag_origin.clone();
            move || drag_origin.set(None)
        })
        .on_pointer_leave(move || drag_origin.set(None))
        .items(items.into_iter().enumerate().map(|(index, item)| {
            gallery_card(item, index, offset.clone(), params.clone())
        }))
        .after_remove(move |_| {
            debug_log!(DEBUG_GALLERY, "Gallery frame loop stopped");
            drop(frame_loop);
        })
}

fn gallery_card(
    item: GalleryItem,
    index: usize,
    offset: Mutable<f64>,
    params: Arc<GalleryParams>,
) -> impl Element {
    let home = index as f64 * (CARD_WIDTH + CARD_GAP);
    let bend_amount = params.bend_amount;
    Stack::new()
        .s(Width::exact(CARD_WIDTH as u32))
        .s(Height::fill())
        .update_raw_el(move |raw_el| {
            raw_el
                .style("flex-shrink", "0")
                .style("overflow", "hidden")
                .style("border-radius", &format!("{}%", params.corner_radius * 100.0))
                .style_signal(
                    "transform",
                    offset.signal().map(move |offset| {
                        let distance = (home - offset) / (CARD_WIDTH + CARD_GAP);
                        let bend = distance.clamp(-2.0, 2.0) * bend_amount * 4.0;
                        format!("translateX({:.1}px) rotateY({:.2}deg)", -offset, -bend)
                    }),
                )
        })
        .layer(
            Image::new()
                .s(Width::fill())
                .s(Height::fill())
                .url(&item.image_ref)
                .description(&item.title)
                .update_raw_el(|raw_el| {
                    raw_el
                        .style("object-fit", "cover")
                        .attr("draggable", "false")
                }),
        )
        .layer(
            Column::new()
                .s(Align::new().bottom())
                .s(Width::fill())
                .s(Padding::all(24))
                .s(Gap::new().y(8))
                .s(Font::new().color(&params.text_color))
                .update_raw_el(|raw_el| {
                    raw_el.style(
                        "background",
                        "linear-gradient(to top, rgba(0, 0, 0, 0.75), transparent)",
                    )
                })
                .item(
                    El::new()
                        .update_raw_el({
                            let font_spec = params.font_spec.clone();
                            move |raw_el| raw_el.style("font", &font_spec)
                        })
                        .child(item.title.clone()),
                )
                .item(item.description.clone().map(|description| {
                    Paragraph::new().s(Font::new().size(15)).content(description)
                }))
                .item(card_links(&item)),
        )
}

// ===== COMPACT: STACKED CARDS =====

fn stacked_cards(items: Vec<GalleryItem>) -> impl Element {
    Column::new()
        .s(Width::fill())
        .s(Gap::new().y(24))
        .items(items.into_iter().map(stacked_card))
}

fn stacked_card(item: GalleryItem) -> impl Element {
    Column::new()
        .s(Width::fill())
        .s(RoundedCorners::all(16))
        .s(Borders::all(Border::new().width(1).color("#27272a")))
        .s(Background::new().color("#141418"))
        .update_raw_el(|raw_el| raw_el.style("overflow", "hidden"))
        .item(
            Image::new()
                .s(Width::fill())
                .s(Height::exact(200))
                .url(&item.image_ref)
                .description(&item.title)
                .update_raw_el(|raw_el| raw_el.style("object-fit", "cover")),
        )
        .item(
            Column::new()
                .s(Padding::all(20))
                .s(Gap::new().y(10))
                .item(
                    El::new()
                        .s(Font::new().size(22).weight(FontWeight::SemiBold))
                        .child(item.title.clone()),
                )
                .item(item.description.clone().map(|description| {
                    Paragraph::new()
                        .s(Font::new().size(15).color("#a1a1aa"))
                        .content(description)
                }))
                .item(card_links(&item)),
        )
}

fn card_links(item: &GalleryItem) -> impl Element {
    let links = [("View", item.link_href.clone()), ("Code", item.repo_href.clone())];
    Row::new()
        .s(Gap::new().x(16))
        .items(links.into_iter().filter_map(|(label, href)| {
            href.map(|href| {
                Link::new()
                    .s(Font::new().size(14).weight(FontWeight::SemiBold).underline())
                    .label(label)
                    .to(href)
                    .new_tab(NewTab::new())
            })
        }))
}
