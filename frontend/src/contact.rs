//! Contact page
//!
//! Field values, errors and the send status all live in the engine; the
//! inputs only forward edits through `contact_field_edited_relay`.

use crate::driver::ChoreographyDriver;
use choreography::ContactStatus;
use shared::ContactField;
use zoon::*;

const FIELD_BACKGROUND: &str = "#141418";
const FIELD_BORDER: &str = "#27272a";
const ERROR_COLOR: &str = "#f87171";
const SUCCESS_COLOR: &str = "#4ade80";

const FIELDS: [(ContactField, &str); 4] = [
    (ContactField::Name, "Your name"),
    (ContactField::Email, "Email address"),
    (ContactField::Subject, "Subject"),
    (ContactField::Message, "Tell me about your project"),
];

pub fn contact_page(driver: &ChoreographyDriver) -> impl Element {
    Column::new()
        .s(Gap::new().y(20))
        .s(Width::fill().max(640))
        .item(
            El::new()
                .s(Font::new().size(56).weight(FontWeight::Bold))
                .child("Contact"),
        )
        .items(FIELDS.iter().map(|(field, placeholder)| form_row(driver, *field, placeholder)))
        .item(submit_row(driver))
}

fn form_row(driver: &ChoreographyDriver, field: ContactField, placeholder: &'static str) -> impl Element {
    Column::new()
        .s(Gap::new().y(6))
        .s(Width::fill())
        .item(field_input(driver, field, placeholder))
        .item_signal(driver.contact_error_signal(field).map(|error| {
            error.map(|error| {
                El::new()
                    .s(Font::new().size(13).color(ERROR_COLOR))
                    .child(error)
            })
        }))
}

fn field_input(driver: &ChoreographyDriver, field: ContactField, placeholder: &'static str) -> RawElOrText {
    let on_change = {
        let contact_field_edited_relay = driver.contact_field_edited_relay.clone();
        move |text: String| contact_field_edited_relay.send((field, text))
    };
    let text = driver.contact_field_signal(field);
    let label = format!("{:?}", field);
    match field {
        ContactField::Message => TextArea::new()
            .s(Width::fill())
            .s(Height::exact(160))
            .s(Padding::all(14))
            .s(RoundedCorners::all(10))
            .s(Background::new().color(FIELD_BACKGROUND))
            .s(Borders::all(Border::new().width(1).color(FIELD_BORDER)))
            .s(Font::new().size(16))
            .label_hidden(label)
            .placeholder(Placeholder::new(placeholder))
            .text_signal(text)
            .on_change(on_change)
            .unify(),
        _ => TextInput::new()
            .s(Width::fill())
            .s(Padding::all(14))
            .s(RoundedCorners::all(10))
            .s(Background::new().color(FIELD_BACKGROUND))
            .s(Borders::all(Border::new().width(1).color(FIELD_BORDER)))
            .s(Font::new().size(16))
            .label_hidden(label)
            .placeholder(Placeholder::new(placeholder))
            .text_signal(text)
            .on_change(on_change)
            .unify(),
    }
}

fn submit_row(driver: &ChoreographyDriver) -> impl Element {
    let status = driver.contact_status_signal().broadcast();
    Row::new()
        .s(Gap::new().x(20))
        .item(
            Button::new()
                .s(Padding::new().x(28).y(12))
                .s(RoundedCorners::all_max())
                .s(Background::new().color("#6366f1"))
                .s(Font::new().size(16).weight(FontWeight::SemiBold))
                .label_signal(status.signal().map(|status| match status {
                    ContactStatus::Submitting => "Sending…",
                    _ => "Send message",
                }))
                .on_press({
                    let contact_submitted_relay = driver.contact_submitted_relay.clone();
                    move || contact_submitted_relay.send(())
                }),
        )
        .item_signal(status.signal().map(|status| {
            (status == ContactStatus::Succeeded).then(|| {
                El::new()
                    .s(Font::new().size(15).color(SUCCESS_COLOR))
                    .child("Message sent. I'll get back to you soon.")
            })
        }))
}
