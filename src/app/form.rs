//! Form controller - field state, validation gate and submit lifecycle
//!
//! One controller type drives both lead forms. A [`FormSpec`] describes the
//! field set, which checkbox (if any) must be ticked, the notification texts
//! and how the field values become a [`ContactSubmission`].
//!
//! Lifecycle: `Idle --submit--> Submitting --result--> Idle`. The result is
//! recorded as [`SubmitOutcome`]; success clears every field, failure keeps
//! them so nothing typed is lost.

use std::fmt;
use std::sync::OnceLock;
use std::time::Duration;

use regex::Regex;

use crate::constants::MODAL_CLOSE_DELAY;
use crate::error::ApiError;
use crate::messages::NetworkCommand;
use crate::models::{ContactSubmission, FieldValue};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum FieldKind {
    Text,
    Email,
    Phone,
    Message,
    Checkbox,
}

#[derive(Debug)]
pub struct FieldSpec {
    pub name: &'static str,
    pub label: &'static str,
    pub placeholder: &'static str,
    pub kind: FieldKind,
    pub required: bool,
}

/// Static description of one form variant
pub struct FormSpec {
    pub title: &'static str,
    pub fields: &'static [FieldSpec],
    /// Checkbox that must be ticked before anything is sent
    pub consent_field: Option<&'static str>,
    pub consent_message: &'static str,
    pub success_message: &'static str,
    pub failure_message: &'static str,
    pub build_payload: fn(&FormFields) -> ContactSubmission,
}

impl fmt::Debug for FormSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FormSpec")
            .field("title", &self.title)
            .field("fields", &self.fields)
            .field("consent_field", &self.consent_field)
            .finish_non_exhaustive()
    }
}

/// Landing page "Get in touch" form
pub static CONTACT_FORM: FormSpec = FormSpec {
    title: "Get In Touch",
    fields: &[
        FieldSpec {
            name: "name",
            label: "Name",
            placeholder: "Your name",
            kind: FieldKind::Text,
            required: true,
        },
        FieldSpec {
            name: "email",
            label: "Email",
            placeholder: "you@example.com",
            kind: FieldKind::Email,
            required: true,
        },
        FieldSpec {
            name: "phone",
            label: "Phone",
            placeholder: "(555) 123-4567",
            kind: FieldKind::Phone,
            required: true,
        },
        FieldSpec {
            name: "message",
            label: "Message",
            placeholder: "Tell us about your property",
            kind: FieldKind::Message,
            required: true,
        },
    ],
    consent_field: None,
    consent_message: "",
    success_message: "Message sent successfully! We'll get back to you soon.",
    failure_message: "Failed to send message. Please try again.",
    build_payload: contact_payload,
};

/// "Get your offer" form, shown inline or in a modal
pub static OFFER_FORM: FormSpec = FormSpec {
    title: "Complete form to start the process",
    fields: &[
        FieldSpec {
            name: "name",
            label: "Name",
            placeholder: "Your name",
            kind: FieldKind::Text,
            required: true,
        },
        FieldSpec {
            name: "address",
            label: "Home Location",
            placeholder: "Enter your complete address here",
            kind: FieldKind::Text,
            required: true,
        },
        FieldSpec {
            name: "email",
            label: "Your email",
            placeholder: "Email",
            kind: FieldKind::Email,
            required: true,
        },
        FieldSpec {
            name: "phone",
            label: "Phone",
            placeholder: "Phone number",
            kind: FieldKind::Phone,
            required: true,
        },
        FieldSpec {
            name: "agreedToTerms",
            label: "I agree to the Privacy Policy and Terms and Conditions",
            placeholder: "",
            kind: FieldKind::Checkbox,
            required: false,
        },
    ],
    consent_field: Some("agreedToTerms"),
    consent_message: "Please agree to the Privacy Policy and Terms and Conditions",
    success_message: "Your request has been submitted! We'll contact you within 24 hours.",
    failure_message: "Failed to submit request. Please try again.",
    build_payload: offer_payload,
};

fn contact_payload(fields: &FormFields) -> ContactSubmission {
    ContactSubmission {
        name: fields.text("name").to_string(),
        email: fields.text("email").to_string(),
        phone: fields.text("phone").to_string(),
        message: fields.text("message").to_string(),
    }
}

fn offer_payload(fields: &FormFields) -> ContactSubmission {
    ContactSubmission {
        name: fields.text("name").to_string(),
        email: fields.text("email").to_string(),
        phone: fields.text("phone").to_string(),
        message: format!("Property Address: {}", fields.text("address")),
    }
}

fn email_pattern() -> &'static Regex {
    static EMAIL: OnceLock<Regex> = OnceLock::new();
    EMAIL.get_or_init(|| Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").expect("valid email pattern"))
}

/// Field values in declaration order
#[derive(Clone, Debug, PartialEq)]
pub struct FormFields(Vec<(&'static str, FieldValue)>);

impl FormFields {
    fn initial(spec: &FormSpec) -> Self {
        FormFields(
            spec.fields
                .iter()
                .map(|f| {
                    let value = match f.kind {
                        FieldKind::Checkbox => FieldValue::Checked(false),
                        _ => FieldValue::Text(String::new()),
                    };
                    (f.name, value)
                })
                .collect(),
        )
    }

    pub fn get(&self, name: &str) -> Option<&FieldValue> {
        self.0.iter().find(|(n, _)| *n == name).map(|(_, v)| v)
    }

    fn get_mut(&mut self, name: &str) -> Option<&mut FieldValue> {
        self.0.iter_mut().find(|(n, _)| *n == name).map(|(_, v)| v)
    }

    /// Text value of a field; empty for unknown or checkbox fields
    pub fn text(&self, name: &str) -> &str {
        self.get(name).map(FieldValue::as_text).unwrap_or("")
    }

    pub fn checked(&self, name: &str) -> bool {
        self.get(name).is_some_and(FieldValue::is_checked)
    }

    pub fn iter(&self) -> impl Iterator<Item = &(&'static str, FieldValue)> {
        self.0.iter()
    }
}

/// Where the form is displayed
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Hosting {
    Inline,
    /// Dismissible surface, closed shortly after a successful submit
    Modal,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SubmitPhase {
    Idle,
    Submitting,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SubmitOutcome {
    Succeeded,
    Failed,
}

/// Result of pressing submit
#[derive(Debug, PartialEq)]
pub enum SubmitAttempt {
    /// Validation passed; send this command
    Dispatched(NetworkCommand),
    /// Validation failed; nothing was sent
    Invalid(String),
    /// A submission is already in flight
    Busy,
}

/// What the host should surface once a submission settles
#[derive(Debug, PartialEq)]
pub struct FormCompletion {
    pub outcome: SubmitOutcome,
    pub message: String,
    /// Set for modal-hosted forms after a success
    pub close_after: Option<Duration>,
}

#[derive(Clone, Debug)]
pub struct FormController {
    spec: &'static FormSpec,
    hosting: Hosting,
    fields: FormFields,
    phase: SubmitPhase,
    pending_request: Option<u64>,
    validation_message: Option<String>,
    last_outcome: Option<SubmitOutcome>,
    focused: usize,
}

impl FormController {
    pub fn new(spec: &'static FormSpec, hosting: Hosting) -> Self {
        FormController {
            spec,
            hosting,
            fields: FormFields::initial(spec),
            phase: SubmitPhase::Idle,
            pending_request: None,
            validation_message: None,
            last_outcome: None,
            focused: 0,
        }
    }

    pub fn spec(&self) -> &'static FormSpec {
        self.spec
    }

    pub fn fields(&self) -> &FormFields {
        &self.fields
    }

    pub fn phase(&self) -> SubmitPhase {
        self.phase
    }

    pub fn is_submitting(&self) -> bool {
        self.phase == SubmitPhase::Submitting
    }

    pub fn pending_request(&self) -> Option<u64> {
        self.pending_request
    }

    pub fn validation_message(&self) -> Option<&str> {
        self.validation_message.as_deref()
    }

    pub fn last_outcome(&self) -> Option<SubmitOutcome> {
        self.last_outcome
    }

    pub fn focused(&self) -> usize {
        self.focused
    }

    fn field_spec(&self, name: &str) -> Option<&'static FieldSpec> {
        self.spec.fields.iter().find(|f| f.name == name)
    }

    /// Set a text field. Ignored while submitting or for checkbox fields.
    pub fn set_text(&mut self, name: &str, value: impl Into<String>) -> bool {
        if self.is_submitting() {
            return false;
        }
        match self.fields.get_mut(name) {
            Some(FieldValue::Text(current)) => {
                *current = value.into();
                self.validation_message = None;
                true
            }
            _ => false,
        }
    }

    /// Set a checkbox field. Ignored while submitting or for text fields.
    pub fn set_checked(&mut self, name: &str, checked: bool) -> bool {
        if self.is_submitting() {
            return false;
        }
        match self.fields.get_mut(name) {
            Some(FieldValue::Checked(current)) => {
                *current = checked;
                self.validation_message = None;
                true
            }
            _ => false,
        }
    }

    /// Check the gate and build the payload without changing state
    pub fn validate(&self) -> Result<ContactSubmission, String> {
        for field in self.spec.fields {
            if field.kind == FieldKind::Checkbox {
                continue;
            }
            let value = self.fields.text(field.name).trim();
            if field.required && value.is_empty() {
                return Err(format!("{} is required", field.label));
            }
            if field.kind == FieldKind::Email && !value.is_empty() && !email_pattern().is_match(value) {
                return Err(format!("{} must be a valid email address", field.label));
            }
        }

        if let Some(consent) = self.spec.consent_field {
            if !self.fields.checked(consent) {
                return Err(self.spec.consent_message.to_string());
            }
        }

        Ok((self.spec.build_payload)(&self.fields))
    }

    /// Try to submit. Only a valid form in the idle phase yields a command.
    pub fn submit(&mut self, request_id: u64) -> SubmitAttempt {
        if self.is_submitting() {
            return SubmitAttempt::Busy;
        }

        match self.validate() {
            Ok(payload) => {
                self.phase = SubmitPhase::Submitting;
                self.pending_request = Some(request_id);
                self.validation_message = None;
                SubmitAttempt::Dispatched(NetworkCommand::SubmitContact {
                    id: request_id,
                    payload,
                })
            }
            Err(message) => {
                tracing::info!(form = self.spec.title, reason = %message, "Form validation failed");
                self.validation_message = Some(message.clone());
                SubmitAttempt::Invalid(message)
            }
        }
    }

    /// Apply the result of a submission. Returns `None` for results that do
    /// not belong to the request currently in flight.
    pub fn finish(&mut self, request_id: u64, result: Result<(), ApiError>) -> Option<FormCompletion> {
        if self.pending_request != Some(request_id) {
            tracing::debug!(id = request_id, "Ignoring result for a submission that is not pending");
            return None;
        }

        self.phase = SubmitPhase::Idle;
        self.pending_request = None;

        match result {
            Ok(()) => {
                self.clear_fields();
                self.last_outcome = Some(SubmitOutcome::Succeeded);
                Some(FormCompletion {
                    outcome: SubmitOutcome::Succeeded,
                    message: self.spec.success_message.to_string(),
                    close_after: (self.hosting == Hosting::Modal).then_some(MODAL_CLOSE_DELAY),
                })
            }
            Err(e) => {
                tracing::error!(id = request_id, form = self.spec.title, error = %e, "Form submission failed");
                if let ApiError::Validation(detail) = &e {
                    self.validation_message = Some(detail.clone());
                }
                self.last_outcome = Some(SubmitOutcome::Failed);
                Some(FormCompletion {
                    outcome: SubmitOutcome::Failed,
                    message: self.spec.failure_message.to_string(),
                    close_after: None,
                })
            }
        }
    }

    fn clear_fields(&mut self) {
        self.fields = FormFields::initial(self.spec);
        self.validation_message = None;
        self.focused = 0;
    }

    // ========================
    // Keyboard editing
    // ========================

    pub fn focus_next(&mut self) {
        self.focused = (self.focused + 1) % self.spec.fields.len();
    }

    pub fn focus_prev(&mut self) {
        self.focused = self
            .focused
            .checked_sub(1)
            .unwrap_or(self.spec.fields.len() - 1);
    }

    fn focused_spec(&self) -> &'static FieldSpec {
        &self.spec.fields[self.focused]
    }

    /// Append a character to the focused field; space toggles a checkbox
    pub fn type_char(&mut self, c: char) {
        let field = self.focused_spec();
        if field.kind == FieldKind::Checkbox {
            if c == ' ' {
                self.toggle_focused();
            }
            return;
        }
        let mut value = self.fields.text(field.name).to_string();
        value.push(c);
        self.set_text(field.name, value);
    }

    pub fn backspace(&mut self) {
        let field = self.focused_spec();
        if field.kind == FieldKind::Checkbox {
            return;
        }
        let mut value = self.fields.text(field.name).to_string();
        if value.pop().is_some() {
            self.set_text(field.name, value);
        }
    }

    pub fn toggle_focused(&mut self) {
        let field = self.focused_spec();
        if field.kind == FieldKind::Checkbox {
            let checked = self.fields.checked(field.name);
            self.set_checked(field.name, !checked);
        }
    }

    /// Whether the named field exists and is a checkbox
    pub fn is_checkbox(&self, name: &str) -> bool {
        self.field_spec(name).is_some_and(|f| f.kind == FieldKind::Checkbox)
    }
}
