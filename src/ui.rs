//! Drawing functions. Pure: everything shown comes from the `RenderState`.

use ratatui::{prelude::*, widgets::*};

use crate::app::form::FieldKind;
use crate::app::loader::{DetailState, ListingState};
use crate::app::notifications::{Notification, NotificationKind};
use crate::constants::BRAND_NAME;
use crate::content::{CONTACT_INFO, FAQS, FOOTER_TAGLINE, HERO_SUBTITLE, HERO_TITLE, OFFER_DISCLAIMER, STEPS};
use crate::messages::render::{FieldView, FormView};
use crate::messages::ui_events::InputMode;
use crate::messages::{Page, RenderState};
use crate::models::Property;

pub fn draw(f: &mut Frame, state: &RenderState) {
    let area = f.area();

    let navbar_height = if state.navbar_scrolled { 1 } else { 3 };
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(navbar_height), // Navbar
            Constraint::Min(0),                // Page
            Constraint::Length(1),             // Status bar
        ])
        .split(area);

    draw_navbar(f, state, chunks[0]);

    match &state.page {
        Page::Home => draw_home(f, state, chunks[1]),
        Page::Portfolio => draw_portfolio(f, state, chunks[1]),
        Page::PropertyDetail(_) => draw_detail(f, state, chunks[1]),
    }

    draw_status_bar(f, state, chunks[2]);

    // Popups
    if let Some(modal) = &state.modal {
        draw_modal(f, modal, area);
    }

    draw_notifications(f, &state.notifications, chunks[1]);

    if state.show_help {
        draw_help_popup(f, area);
    }
}

fn draw_navbar(f: &mut Frame, state: &RenderState, area: Rect) {
    let link = |label: &'static str, active: bool| {
        if active {
            Span::styled(label, Style::default().fg(Color::Black).bg(Color::Cyan).bold())
        } else {
            Span::styled(label, Style::default().fg(Color::Gray))
        }
    };

    let line = Line::from(vec![
        Span::styled(format!(" {} ", BRAND_NAME), Style::default().fg(Color::Cyan).bold()),
        Span::raw("  "),
        link(" h:Home ", state.page == Page::Home),
        Span::raw(" "),
        link(
            " p:Portfolio ",
            matches!(state.page, Page::Portfolio | Page::PropertyDetail(_)),
        ),
        Span::raw(" "),
        Span::styled(" o:Get Offer ", Style::default().fg(Color::Black).bg(Color::Yellow)),
    ]);

    // Compact once the page is scrolled
    if state.navbar_scrolled {
        f.render_widget(Paragraph::new(line).style(Style::default().bg(Color::DarkGray)), area);
    } else {
        let block = Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::Cyan));
        f.render_widget(Paragraph::new(line).block(block), area);
    }
}

// ============================================================================
// Home
// ============================================================================

fn draw_home(f: &mut Frame, state: &RenderState, area: Rect) {
    let mut lines: Vec<Line> = Vec::new();

    lines.push(Line::from(""));
    lines.push(Line::from(Span::styled(HERO_TITLE, Style::default().fg(Color::White).bold())).centered());
    lines.push(Line::from(Span::styled(HERO_SUBTITLE, Style::default().fg(Color::Gray))).centered());
    lines.push(Line::from(Span::styled("[o] Get Your Cash Offer", Style::default().fg(Color::Yellow).bold())).centered());
    lines.push(Line::from(""));

    lines.push(section_title("How It Works"));
    for (i, step) in STEPS.iter().enumerate() {
        lines.push(Line::from(vec![
            Span::styled(format!(" {}. ", i + 1), Style::default().fg(Color::Cyan).bold()),
            Span::styled(step.title, Style::default().bold()),
        ]));
        lines.push(Line::from(Span::styled(format!("    {}", step.description), Style::default().fg(Color::Gray))));
    }
    lines.push(Line::from(""));

    lines.push(section_title("Frequently Asked Questions"));
    for (i, faq) in FAQS.iter().enumerate() {
        let open = state.faq_open == Some(i);
        let marker = if open { "-" } else { "+" };
        lines.push(Line::from(vec![
            Span::styled(format!(" [{}] {} ", i + 1, marker), Style::default().fg(Color::Cyan)),
            Span::raw(faq.question),
        ]));
        if open {
            lines.push(Line::from(Span::styled(format!("       {}", faq.answer), Style::default().fg(Color::Gray))));
        }
    }
    lines.push(Line::from(""));

    lines.extend(form_lines(&state.contact_form));
    lines.push(Line::from(""));

    lines.push(Line::from(Span::styled(format!(" {}", BRAND_NAME), Style::default().fg(Color::Cyan).bold())));
    lines.push(Line::from(Span::styled(format!(" {}", FOOTER_TAGLINE), Style::default().fg(Color::DarkGray))));
    lines.push(Line::from(Span::styled(format!(" {}", CONTACT_INFO.join("  |  ")), Style::default().fg(Color::DarkGray))));

    let home = Paragraph::new(lines)
        .wrap(Wrap { trim: false })
        .scroll((state.scroll, 0));
    f.render_widget(home, area);
}

fn section_title(title: &'static str) -> Line<'static> {
    Line::from(Span::styled(format!(" {} ", title), Style::default().fg(Color::Yellow).bold()))
}

/// A form as a run of lines: title, one line per field, then status
fn form_lines(form: &FormView) -> Vec<Line<'static>> {
    let mut lines = vec![section_title(form.title)];
    lines.extend(form.fields.iter().map(field_line));

    if form.submitting {
        lines.push(Line::from(Span::styled(" Sending...", Style::default().fg(Color::Yellow))));
    } else if let Some(message) = &form.validation_message {
        lines.push(Line::from(Span::styled(format!(" {}", message), Style::default().fg(Color::Red))));
    }

    let hint = if form.editing {
        " Tab:next field | Enter:submit | Esc:done"
    } else {
        " e:edit | s:submit"
    };
    lines.push(Line::from(Span::styled(hint, Style::default().fg(Color::DarkGray))));
    lines
}

fn field_line(field: &FieldView) -> Line<'static> {
    let cursor = if field.focused { ">" } else { " " };
    let label_style = if field.focused {
        Style::default().fg(Color::Yellow).bold()
    } else {
        Style::default()
    };
    let required = if field.required { "*" } else { "" };

    if field.kind == FieldKind::Checkbox {
        let mark = if field.value.is_checked() { "[x]" } else { "[ ]" };
        return Line::from(vec![
            Span::styled(format!("{} {} ", cursor, mark), label_style),
            Span::styled(field.label, label_style),
        ]);
    }

    let text = field.value.as_text();
    let value = if text.is_empty() {
        Span::styled(field.placeholder, Style::default().fg(Color::DarkGray))
    } else {
        Span::raw(text.to_string())
    };
    Line::from(vec![
        Span::styled(format!("{} {}{}: ", cursor, field.label, required), label_style),
        value,
    ])
}

// ============================================================================
// Portfolio
// ============================================================================

fn draw_portfolio(f: &mut Frame, state: &RenderState, area: Rect) {
    let block = Block::default()
        .borders(Borders::ALL)
        .title(" Our Portfolio ")
        .border_style(Style::default().fg(Color::Cyan));

    match &state.listing {
        ListingState::Loading => {
            let p = Paragraph::new("Loading properties...")
                .style(Style::default().fg(Color::DarkGray))
                .block(block);
            f.render_widget(p, area);
        }
        ListingState::Empty => {
            let lines = vec![
                Line::from(""),
                Line::from(Span::styled("No properties available", Style::default().bold())).centered(),
                Line::from(Span::styled("Check back soon for new listings", Style::default().fg(Color::DarkGray))).centered(),
            ];
            f.render_widget(Paragraph::new(lines).block(block), area);
        }
        ListingState::Error(message) => {
            f.render_widget(error_panel(message, block), area);
        }
        ListingState::Ready(properties) => {
            let items: Vec<ListItem> = properties.iter().map(property_card).collect();
            let list = List::new(items)
                .block(block.title_bottom(Line::from(" ↑/↓ select | Enter: details ").right_aligned()))
                .highlight_style(Style::default().fg(Color::Yellow).bold())
                .highlight_symbol("> ");

            let mut list_state = ListState::default();
            list_state.select(Some(state.selected_property));
            f.render_stateful_widget(list, area, &mut list_state);
        }
    }
}

fn property_card(property: &Property) -> ListItem<'static> {
    ListItem::new(vec![
        Line::from(vec![
            Span::styled(property.title.clone(), Style::default().bold()),
            Span::raw("  "),
            Span::styled(format!("[{}]", property.status), Style::default().fg(status_color(&property.status))),
        ]),
        Line::from(vec![
            Span::styled(property.price.clone(), Style::default().fg(Color::Green).bold()),
            Span::raw("  "),
            Span::styled(property.address.clone(), Style::default().fg(Color::Gray)),
        ]),
        Line::from(Span::styled(property.specs_line(), Style::default().fg(Color::DarkGray))),
        Line::from(""),
    ])
}

/// Color for a property status badge
pub fn status_color(status: &str) -> Color {
    match status.to_ascii_lowercase().as_str() {
        "available" => Color::Green,
        "pending" | "under contract" => Color::Yellow,
        "sold" => Color::Red,
        _ => Color::Gray,
    }
}

fn error_panel<'a>(message: &str, block: Block<'a>) -> Paragraph<'a> {
    let lines = vec![
        Line::from(""),
        Line::from(Span::styled("Something went wrong", Style::default().fg(Color::Red).bold())).centered(),
        Line::from(Span::styled(message.to_string(), Style::default().fg(Color::Gray))).centered(),
        Line::from(Span::styled("[r] Retry", Style::default().fg(Color::Yellow))).centered(),
    ];
    Paragraph::new(lines).block(block).wrap(Wrap { trim: false })
}

// ============================================================================
// Property detail
// ============================================================================

fn draw_detail(f: &mut Frame, state: &RenderState, area: Rect) {
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Cyan));

    match &state.detail {
        DetailState::Loading => {
            let p = Paragraph::new("Loading property...")
                .style(Style::default().fg(Color::DarkGray))
                .block(block);
            f.render_widget(p, area);
        }
        DetailState::NotFound => {
            let lines = vec![
                Line::from(""),
                Line::from(Span::styled("Property Not Found", Style::default().bold())).centered(),
                Line::from(Span::styled(
                    "The property you're looking for doesn't exist.",
                    Style::default().fg(Color::Gray),
                ))
                .centered(),
                Line::from(""),
                Line::from(Span::styled("[b] Back to Portfolio", Style::default().fg(Color::Yellow))).centered(),
            ];
            f.render_widget(Paragraph::new(lines).block(block), area);
        }
        DetailState::Error(message) => {
            f.render_widget(error_panel(message, block), area);
        }
        DetailState::Ready(property) => {
            let mut lines = vec![
                Line::from(vec![
                    Span::styled(property.title.clone(), Style::default().fg(Color::White).bold()),
                    Span::raw("  "),
                    Span::styled(format!("[{}]", property.status), Style::default().fg(status_color(&property.status))),
                ]),
                Line::from(Span::styled(property.address.clone(), Style::default().fg(Color::Gray))),
                Line::from(""),
                Line::from(Span::styled(property.price.clone(), Style::default().fg(Color::Green).bold())),
                Line::from(property.specs_line()),
                Line::from(""),
            ];
            if !property.image.is_empty() {
                lines.push(Line::from(vec![
                    Span::styled("Image: ", Style::default().fg(Color::DarkGray)),
                    Span::styled(property.image.clone(), Style::default().fg(Color::Blue).underlined()),
                ]));
                lines.push(Line::from(""));
            }
            if !property.description.is_empty() {
                lines.push(section_title("About this property"));
                lines.push(Line::from(property.description.clone()));
                lines.push(Line::from(""));
            }
            if let Some(listed) = property.created_at {
                lines.push(Line::from(Span::styled(
                    format!("Listed {}", listed.format("%B %-d, %Y")),
                    Style::default().fg(Color::DarkGray),
                )));
            }
            lines.push(Line::from(Span::styled(
                "[c] Contact us about this property  [b] Back to Portfolio",
                Style::default().fg(Color::Yellow),
            )));

            let detail = Paragraph::new(lines)
                .block(block.title(" Property "))
                .wrap(Wrap { trim: false })
                .scroll((state.scroll, 0));
            f.render_widget(detail, area);
        }
    }
}

// ============================================================================
// Overlays
// ============================================================================

fn draw_modal(f: &mut Frame, form: &FormView, area: Rect) {
    let popup_area = centered_rect(70, 60, area);

    let mut lines = form_lines(form);
    lines.push(Line::from(""));
    lines.push(Line::from(Span::styled(OFFER_DISCLAIMER, Style::default().fg(Color::DarkGray))));

    let block = Block::default()
        .borders(Borders::ALL)
        .title(" Get Your Cash Offer (Esc to close) ")
        .border_style(Style::default().fg(Color::Yellow))
        .style(Style::default().bg(Color::Black));

    let modal = Paragraph::new(lines).block(block).wrap(Wrap { trim: false });

    f.render_widget(Clear, popup_area);
    f.render_widget(modal, popup_area);
}

/// Toasts stacked in the top-right corner of `area`, newest at the bottom
fn draw_notifications(f: &mut Frame, notifications: &[Notification], area: Rect) {
    let width = area.width.min(50);
    let mut y = area.y;
    for toast in notifications {
        if y + 3 > area.y + area.height {
            break;
        }
        let color = match toast.kind {
            NotificationKind::Success => Color::Green,
            NotificationKind::Error => Color::Red,
        };
        let rect = Rect::new(area.x + area.width - width, y, width, 3);
        let block = Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(color))
            .title(format!(" {} ", toast.created_at.with_timezone(&chrono::Local).format("%H:%M:%S")));
        let p = Paragraph::new(toast.message.as_str())
            .style(Style::default().fg(color))
            .block(block);
        f.render_widget(Clear, rect);
        f.render_widget(p, rect);
        y += 3;
    }
}

fn draw_status_bar(f: &mut Frame, state: &RenderState, area: Rect) {
    let status = if state.modal.is_some() {
        " Tab:next field | Space:toggle | Enter:submit | Esc:close ".to_string()
    } else if state.input_mode == InputMode::Editing {
        " ESC:stop editing | Tab:next field | Enter:submit ".to_string()
    } else {
        let back = if state.can_go_back { "b:back | " } else { "" };
        format!(" h:home | p:portfolio | {}r:reload | ?:help | q:quit  [{}] ", back, state.api_url)
    };

    let bar = Paragraph::new(status).style(Style::default().fg(Color::DarkGray));
    f.render_widget(bar, area);
}

fn draw_help_popup(f: &mut Frame, area: Rect) {
    let popup_area = centered_rect(60, 70, area);

    let help_text = r#"
 BH INVESTMENT - Keyboard Shortcuts

 NAVIGATION
   h                  Home
   p                  Portfolio
   b / Esc            Back
   r                  Reload current page
   ↑ / ↓              Scroll / select property
   Enter              Open selected property

 HOME
   1-5                Expand or collapse a question
   e                  Edit the contact form
   s                  Send the contact form
   o                  Get a cash offer

 PROPERTY
   c                  Contact us about this property

 FORMS
   Tab / Shift+Tab    Next / previous field
   Space              Toggle checkbox
   Enter              Submit
   Esc                Stop editing / close

 GENERAL
   ?                  Toggle this help
   q / Ctrl+C         Quit

 Press any key to close...
"#;

    let block = Block::default()
        .borders(Borders::ALL)
        .title(" Help ")
        .style(Style::default().bg(Color::Black));

    let help = Paragraph::new(help_text)
        .block(block)
        .wrap(Wrap { trim: false });

    f.render_widget(Clear, popup_area);
    f.render_widget(help, popup_area);
}

fn centered_rect(percent_x: u16, percent_y: u16, r: Rect) -> Rect {
    let popup_layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Percentage((100 - percent_y) / 2),
            Constraint::Percentage(percent_y),
            Constraint::Percentage((100 - percent_y) / 2),
        ])
        .split(r);

    Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage((100 - percent_x) / 2),
            Constraint::Percentage(percent_x),
            Constraint::Percentage((100 - percent_x) / 2),
        ])
        .split(popup_layout[1])[1]
}
