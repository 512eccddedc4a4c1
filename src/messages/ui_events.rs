//! UI events - messages from UI layer to App layer

use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers};

/// Pages of the site
#[derive(Clone, Debug, PartialEq, Eq, Default)]
pub enum Page {
    #[default]
    Home,
    Portfolio,
    PropertyDetail(String),
}

impl Page {
    pub fn title(&self) -> &str {
        match self {
            Page::Home => "Home",
            Page::Portfolio => "Portfolio",
            Page::PropertyDetail(_) => "Property",
        }
    }
}

/// Events generated from user input in the UI layer
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UiEvent {
    // Navigation
    GoHome,
    GoPortfolio,
    Back,
    Reload,
    ScrollUp,
    ScrollDown,

    // Portfolio
    SelectNext,
    SelectPrev,
    OpenSelected,

    // Home
    ToggleFaq(usize),
    OpenOfferForm,

    // Property detail
    ContactAboutProperty,

    // Form editing
    StartEditing,
    StopEditing,
    NextField,
    PrevField,
    CharInput(char),
    Backspace,
    SubmitForm,
    CloseModal,

    // Popups
    ToggleHelp,
    CloseHelp,

    // System
    Quit,
}

/// Input mode
#[derive(Clone, Copy, PartialEq, Eq, Debug, Default)]
pub enum InputMode {
    #[default]
    Normal,
    Editing,
}

/// Convert a key event to a UiEvent based on current UI context
pub fn key_to_ui_event(
    key: KeyEvent,
    page: &Page,
    input_mode: InputMode,
    modal_open: bool,
    show_help: bool,
) -> Option<UiEvent> {
    if key.kind != KeyEventKind::Press {
        return None;
    }

    if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
        return Some(UiEvent::Quit);
    }

    if show_help {
        return Some(UiEvent::CloseHelp);
    }

    if modal_open {
        return match key.code {
            KeyCode::Esc => Some(UiEvent::CloseModal),
            KeyCode::Enter => Some(UiEvent::SubmitForm),
            KeyCode::Tab | KeyCode::Down => Some(UiEvent::NextField),
            KeyCode::BackTab | KeyCode::Up => Some(UiEvent::PrevField),
            KeyCode::Backspace => Some(UiEvent::Backspace),
            KeyCode::Char(c) => Some(UiEvent::CharInput(c)),
            _ => None,
        };
    }

    if input_mode == InputMode::Editing {
        return match key.code {
            KeyCode::Esc => Some(UiEvent::StopEditing),
            KeyCode::Enter => Some(UiEvent::SubmitForm),
            KeyCode::Tab => Some(UiEvent::NextField),
            KeyCode::BackTab => Some(UiEvent::PrevField),
            KeyCode::Backspace => Some(UiEvent::Backspace),
            KeyCode::Char(c) => Some(UiEvent::CharInput(c)),
            _ => None,
        };
    }

    // Shared navigation keys
    match key.code {
        KeyCode::Char('q') => return Some(UiEvent::Quit),
        KeyCode::Char('?') => return Some(UiEvent::ToggleHelp),
        KeyCode::Char('h') => return Some(UiEvent::GoHome),
        KeyCode::Char('p') => return Some(UiEvent::GoPortfolio),
        KeyCode::Char('r') => return Some(UiEvent::Reload),
        KeyCode::PageUp => return Some(UiEvent::ScrollUp),
        KeyCode::PageDown => return Some(UiEvent::ScrollDown),
        _ => {}
    }

    match page {
        Page::Home => handle_home_keys(key),
        Page::Portfolio => handle_portfolio_keys(key),
        Page::PropertyDetail(_) => handle_detail_keys(key),
    }
}

fn handle_home_keys(key: KeyEvent) -> Option<UiEvent> {
    match key.code {
        KeyCode::Char('e') | KeyCode::Enter => Some(UiEvent::StartEditing),
        KeyCode::Tab => Some(UiEvent::NextField),
        KeyCode::BackTab => Some(UiEvent::PrevField),
        KeyCode::Char('s') => Some(UiEvent::SubmitForm),
        KeyCode::Char('o') => Some(UiEvent::OpenOfferForm),
        KeyCode::Char(c @ '1'..='9') => c.to_digit(10).map(|d| UiEvent::ToggleFaq(d as usize - 1)),
        KeyCode::Up => Some(UiEvent::ScrollUp),
        KeyCode::Down => Some(UiEvent::ScrollDown),
        KeyCode::Esc | KeyCode::Char('b') => Some(UiEvent::Back),
        _ => None,
    }
}

fn handle_portfolio_keys(key: KeyEvent) -> Option<UiEvent> {
    match key.code {
        KeyCode::Up | KeyCode::Char('k') => Some(UiEvent::SelectPrev),
        KeyCode::Down | KeyCode::Char('j') => Some(UiEvent::SelectNext),
        KeyCode::Enter => Some(UiEvent::OpenSelected),
        KeyCode::Esc | KeyCode::Char('b') => Some(UiEvent::Back),
        _ => None,
    }
}

fn handle_detail_keys(key: KeyEvent) -> Option<UiEvent> {
    match key.code {
        KeyCode::Up => Some(UiEvent::ScrollUp),
        KeyCode::Down => Some(UiEvent::ScrollDown),
        KeyCode::Char('c') => Some(UiEvent::ContactAboutProperty),
        // "Back to Portfolio" / "View More Properties"
        KeyCode::Esc | KeyCode::Char('b') | KeyCode::Char('v') => Some(UiEvent::GoPortfolio),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn press(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    #[test]
    fn test_ctrl_c_always_quits() {
        let key = KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL);
        assert_eq!(
            key_to_ui_event(key, &Page::Home, InputMode::Editing, true, true),
            Some(UiEvent::Quit)
        );
    }

    #[test]
    fn test_modal_captures_text() {
        let event = key_to_ui_event(press(KeyCode::Char('q')), &Page::Home, InputMode::Normal, true, false);
        assert_eq!(event, Some(UiEvent::CharInput('q')));
        let event = key_to_ui_event(press(KeyCode::Esc), &Page::Home, InputMode::Normal, true, false);
        assert_eq!(event, Some(UiEvent::CloseModal));
    }

    #[test]
    fn test_editing_captures_text() {
        let event = key_to_ui_event(press(KeyCode::Char('p')), &Page::Home, InputMode::Editing, false, false);
        assert_eq!(event, Some(UiEvent::CharInput('p')));
        let event = key_to_ui_event(press(KeyCode::Enter), &Page::Home, InputMode::Editing, false, false);
        assert_eq!(event, Some(UiEvent::SubmitForm));
    }

    #[test]
    fn test_page_specific_keys() {
        let detail = Page::PropertyDetail("42".into());
        assert_eq!(
            key_to_ui_event(press(KeyCode::Char('b')), &detail, InputMode::Normal, false, false),
            Some(UiEvent::GoPortfolio)
        );
        assert_eq!(
            key_to_ui_event(press(KeyCode::Enter), &Page::Portfolio, InputMode::Normal, false, false),
            Some(UiEvent::OpenSelected)
        );
        assert_eq!(
            key_to_ui_event(press(KeyCode::Char('3')), &Page::Home, InputMode::Normal, false, false),
            Some(UiEvent::ToggleFaq(2))
        );
        assert_eq!(
            key_to_ui_event(press(KeyCode::Char('p')), &detail, InputMode::Normal, false, false),
            Some(UiEvent::GoPortfolio)
        );
    }

    #[test]
    fn test_help_swallows_keys() {
        assert_eq!(
            key_to_ui_event(press(KeyCode::Char('q')), &Page::Portfolio, InputMode::Normal, false, true),
            Some(UiEvent::CloseHelp)
        );
    }

    #[test]
    fn test_release_events_ignored() {
        let mut key = press(KeyCode::Char('q'));
        key.kind = KeyEventKind::Release;
        assert_eq!(key_to_ui_event(key, &Page::Home, InputMode::Normal, false, false), None);
    }
}
