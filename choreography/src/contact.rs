//! Simulated contact form submission
//!
//! `Idle -> Submitting -> Succeeded -> Idle`, timed by the registry so the
//! contact page can cancel both steps when it unmounts.

use crate::timer_registry::{OwnerTag, Timer, TimerHandle, Timers};
use indexmap::IndexMap;
use shared::{ContactField, ContactForm, ContactSection};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ContactStatus {
    #[default]
    Idle,
    Submitting,
    Succeeded,
}

pub type FieldErrors = IndexMap<ContactField, &'static str>;

#[derive(Debug, Clone)]
pub struct ContactSubmission {
    owner: OwnerTag,
    status: ContactStatus,
    form: ContactForm,
    errors: FieldErrors,
    timer: Option<TimerHandle>,
    submit_latency_ms: u64,
    success_reset_ms: u64,
}

impl ContactSubmission {
    pub fn new(owner: OwnerTag, config: &ContactSection) -> Self {
        Self {
            owner,
            status: ContactStatus::Idle,
            form: ContactForm::default(),
            errors: FieldErrors::new(),
            timer: None,
            submit_latency_ms: config.submit_latency_ms,
            success_reset_ms: config.success_reset_ms,
        }
    }

    pub fn status(&self) -> ContactStatus {
        self.status
    }

    pub fn form(&self) -> &ContactForm {
        &self.form
    }

    pub fn errors(&self) -> &FieldErrors {
        &self.errors
    }

    /// Editing a field clears that field's error.
    pub fn edit(&mut self, field: ContactField, value: String) {
        self.form.set_field(field, value);
        self.errors.shift_remove(&field);
    }

    /// Validate and start the simulated send. Returns `false` when the form
    /// has errors or a send is already in flight.
    pub fn submit(&mut self, timers: &mut Timers) -> bool {
        if self.status == ContactStatus::Submitting {
            return false;
        }
        self.errors = self.form.validate();
        if !self.errors.is_empty() {
            return false;
        }
        self.replace_timer(timers, self.submit_latency_ms, Timer::ContactSent);
        self.status = ContactStatus::Submitting;
        true
    }

    pub fn on_timer(&mut self, handle: TimerHandle, action: Timer, timers: &mut Timers) {
        if self.timer != Some(handle) {
            return;
        }
        self.timer = None;
        match action {
            Timer::ContactSent => {
                self.status = ContactStatus::Succeeded;
                self.form = ContactForm::default();
                self.replace_timer(timers, self.success_reset_ms, Timer::ContactReset);
            }
            Timer::ContactReset => self.status = ContactStatus::Idle,
            _ => {}
        }
    }

    fn replace_timer(&mut self, timers: &mut Timers, delay_ms: u64, action: Timer) {
        if let Some(handle) = self.timer.take() {
            timers.cancel(handle);
        }
        self.timer = Some(timers.schedule(self.owner, delay_ms, action));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::timer_registry::TimerRegistry;

    fn filled() -> Vec<(ContactField, &'static str)> {
        vec![
            (ContactField::Name, "Ada"),
            (ContactField::Email, "ada@example.com"),
            (ContactField::Subject, "Hello"),
            (ContactField::Message, "Nice portfolio"),
        ]
    }

    fn run(contact: &mut ContactSubmission, timers: &mut Timers, until: u64) {
        timers.run_until(until, |timers, fired| contact.on_timer(fired.handle, fired.action, timers));
    }

    #[test]
    fn test_invalid_form_stays_idle() {
        let mut timers = TimerRegistry::new(0);
        let owner = timers.register_owner();
        let mut contact = ContactSubmission::new(owner, &ContactSection::default());

        contact.edit(ContactField::Email, "nope".to_string());
        assert!(!contact.submit(&mut timers));
        assert_eq!(contact.status(), ContactStatus::Idle);
        assert_eq!(contact.errors().len(), 4);
        assert_eq!(timers.pending_count(), 0);

        contact.edit(ContactField::Email, "ada@example.com".to_string());
        assert!(!contact.errors().contains_key(&ContactField::Email));
    }

    #[test]
    fn test_submit_succeeds_then_resets() {
        let mut timers = TimerRegistry::new(0);
        let owner = timers.register_owner();
        let mut contact = ContactSubmission::new(owner, &ContactSection::default());
        for (field, value) in filled() {
            contact.edit(field, value.to_string());
        }

        assert!(contact.submit(&mut timers));
        assert!(!contact.submit(&mut timers));
        assert_eq!(contact.status(), ContactStatus::Submitting);

        run(&mut contact, &mut timers, 1100);
        assert_eq!(contact.status(), ContactStatus::Succeeded);
        assert_eq!(contact.form(), &ContactForm::default());

        run(&mut contact, &mut timers, 5099);
        assert_eq!(contact.status(), ContactStatus::Succeeded);
        run(&mut contact, &mut timers, 5100);
        assert_eq!(contact.status(), ContactStatus::Idle);
    }
}
