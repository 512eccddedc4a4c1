//! Render state - data structure sent from App layer to UI for rendering

use crate::app::form::{FieldKind, FormController};
use crate::app::loader::{DetailState, ListingState};
use crate::app::notifications::Notification;
use crate::messages::ui_events::{InputMode, Page};
use crate::models::FieldValue;

/// One form field as drawn
#[derive(Debug, Clone, PartialEq)]
pub struct FieldView {
    pub label: &'static str,
    pub placeholder: &'static str,
    pub kind: FieldKind,
    pub value: FieldValue,
    pub required: bool,
    pub focused: bool,
}

/// A form as drawn
#[derive(Debug, Clone, PartialEq)]
pub struct FormView {
    pub title: &'static str,
    pub fields: Vec<FieldView>,
    pub submitting: bool,
    pub validation_message: Option<String>,
    /// Whether keystrokes currently go into this form
    pub editing: bool,
}

impl FormView {
    pub fn from_controller(form: &FormController, editing: bool) -> Self {
        let spec = form.spec();
        let fields = spec
            .fields
            .iter()
            .enumerate()
            .map(|(i, field)| FieldView {
                label: field.label,
                placeholder: field.placeholder,
                kind: field.kind,
                value: form
                    .fields()
                    .get(field.name)
                    .cloned()
                    .unwrap_or(FieldValue::Text(String::new())),
                required: field.required,
                focused: editing && i == form.focused(),
            })
            .collect();

        FormView {
            title: spec.title,
            fields,
            submitting: form.is_submitting(),
            validation_message: form.validation_message().map(str::to_string),
            editing,
        }
    }
}

/// Complete state needed by the UI to render
#[derive(Debug, Clone)]
pub struct RenderState {
    pub page: Page,
    pub can_go_back: bool,
    pub navbar_scrolled: bool,
    pub scroll: u16,

    // Portfolio
    pub listing: ListingState,
    pub selected_property: usize,

    // Property detail
    pub detail: DetailState,

    // Home
    pub faq_open: Option<usize>,
    pub contact_form: FormView,

    // Offer form modal
    pub modal: Option<FormView>,

    pub notifications: Vec<Notification>,
    pub input_mode: InputMode,
    pub show_help: bool,
    pub api_url: String,
}

impl Default for RenderState {
    fn default() -> Self {
        use crate::app::form::{Hosting, CONTACT_FORM};
        use crate::constants::DEFAULT_API_URL;
        RenderState {
            page: Page::Home,
            can_go_back: false,
            navbar_scrolled: false,
            scroll: 0,
            listing: ListingState::Loading,
            selected_property: 0,
            detail: DetailState::Loading,
            faq_open: None,
            contact_form: FormView::from_controller(
                &FormController::new(&CONTACT_FORM, Hosting::Inline),
                false,
            ),
            modal: None,
            notifications: Vec::new(),
            input_mode: InputMode::Normal,
            show_help: false,
            api_url: String::from(DEFAULT_API_URL),
        }
    }
}
