//! Page rendering with ratatui.

use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    symbols,
    text::{Line, Span},
    widgets::{Block, Borders, Clear, List, ListItem, Paragraph, Wrap},
    Frame,
};

use super::app::{FormFocus, PageFocus, PageState};
use crate::feedback::{Category, Field, FeedbackForm, Lifecycle, RatingControl, Scheduler};

const MODAL_WIDTH: u16 = 72;

/// Draw the whole page, with the feedback modal on top when open.
pub fn draw<S: Scheduler>(f: &mut Frame, state: &PageState<S>) {
    let area = f.area();

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3), // Header
            Constraint::Length(3), // Search
            Constraint::Min(5),    // Body
            Constraint::Length(2), // Footer
        ])
        .split(area);

    draw_header(f, chunks[0], state);
    draw_search(f, chunks[1], state);
    draw_body(f, chunks[2], state);
    draw_footer(f, chunks[3], state);

    if state.modal.is_open() {
        draw_modal(f, area, state);
    }
}

fn draw_header<S: Scheduler>(f: &mut Frame, area: Rect, state: &PageState<S>) {
    let mut spans = vec![
        Span::styled(" ▶ ", Style::default().fg(Color::Green).add_modifier(Modifier::BOLD)),
        Span::styled("VideoIndex", Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD)),
        Span::styled(" │ ", Style::default().fg(Color::DarkGray)),
    ];

    let actions_focused = state.focus == PageFocus::Actions && !state.modal.is_open();
    for action in state.actions.actions() {
        let style = if actions_focused && *action == state.actions.focused() {
            Style::default().fg(Color::Black).bg(Color::Cyan).add_modifier(Modifier::BOLD)
        } else {
            Style::default().fg(Color::White)
        };
        spans.push(Span::styled(format!("[ {} ]", action.label()), style));
        spans.push(Span::styled(
            format!(" {} ", action.shortcut()),
            Style::default().fg(Color::DarkGray),
        ));
    }

    let header = Paragraph::new(Line::from(spans)).block(
        Block::default()
            .borders(Borders::BOTTOM)
            .border_style(Style::default().fg(Color::DarkGray))
            .border_set(symbols::border::ROUNDED),
    );
    f.render_widget(header, area);
}

fn draw_search<S: Scheduler>(f: &mut Frame, area: Rect, state: &PageState<S>) {
    let focused = state.focus == PageFocus::Search && !state.modal.is_open();
    let line = if state.search.query().is_empty() {
        Line::from(Span::styled(
            state.search.placeholder().to_string(),
            Style::default().fg(Color::DarkGray).add_modifier(Modifier::ITALIC),
        ))
    } else {
        Line::from(Span::styled(
            state.search.query().to_string(),
            Style::default().fg(Color::White),
        ))
    };

    let border = if focused { Color::Cyan } else { Color::DarkGray };
    let search = Paragraph::new(line).block(
        Block::default()
            .title(" 🔍 Search ")
            .borders(Borders::ALL)
            .border_style(Style::default().fg(border))
            .border_set(symbols::border::ROUNDED),
    );
    f.render_widget(search, area);
}

fn draw_body<S: Scheduler>(f: &mut Frame, area: Rect, state: &PageState<S>) {
    let mut items: Vec<ListItem> = Vec::new();

    if state.last_query.is_empty() {
        items.push(ListItem::new(Span::styled(
            "Type to search learning pods.",
            Style::default().fg(Color::DarkGray),
        )));
    } else {
        items.push(ListItem::new(Line::from(vec![
            Span::styled("Searching for ", Style::default().fg(Color::DarkGray)),
            Span::styled(
                format!("\"{}\"", state.last_query),
                Style::default().fg(Color::Yellow),
            ),
        ])));
    }

    let received = &state.modal.host().received;
    if !received.is_empty() {
        items.push(ListItem::new(""));
        for entry in received.iter().rev() {
            let category = entry.draft.category.map(Category::label).unwrap_or("");
            items.push(ListItem::new(Line::from(vec![
                Span::styled("✓ ", Style::default().fg(Color::Green)),
                Span::styled(
                    entry.received_at.format("%H:%M:%S ").to_string(),
                    Style::default().fg(Color::DarkGray),
                ),
                Span::styled(category.to_string(), Style::default().fg(Color::Cyan)),
                Span::styled(
                    format!(" from {} ({}★)", entry.draft.name, entry.draft.rating.get()),
                    Style::default().fg(Color::White),
                ),
            ])));
        }
    }

    let list = List::new(items).block(
        Block::default()
            .title(" Learning Pods ")
            .title_style(Style::default().fg(Color::Green).add_modifier(Modifier::BOLD))
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::DarkGray))
            .border_set(symbols::border::ROUNDED),
    );
    f.render_widget(list, area);
}

fn key_hint(key: &'static str, text: &'static str) -> [Span<'static>; 2] {
    [
        Span::styled(key, Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD)),
        Span::styled(text, Style::default().fg(Color::DarkGray)),
    ]
}

fn draw_footer<S: Scheduler>(f: &mut Frame, area: Rect, state: &PageState<S>) {
    let hints: Vec<[Span<'static>; 2]> = if state.modal.is_open() {
        vec![
            key_hint(" tab", " next field  "),
            key_hint("ctrl+s", " send  "),
            key_hint("esc", " close"),
        ]
    } else {
        vec![
            key_hint(" tab", " switch focus  "),
            key_hint("←→", " actions  "),
            key_hint("ctrl+q", " quit"),
        ]
    };
    let mut spans: Vec<Span> = hints.into_iter().flatten().collect();

    if let Some(status) = &state.status {
        spans.push(Span::styled(" │ ", Style::default().fg(Color::DarkGray)));
        spans.push(Span::styled(status.clone(), Style::default().fg(Color::Green)));
    }

    let footer = Paragraph::new(Line::from(spans)).block(
        Block::default()
            .borders(Borders::TOP)
            .border_style(Style::default().fg(Color::DarkGray))
            .border_set(symbols::border::ROUNDED),
    );
    f.render_widget(footer, area);
}

/// Centre a box of the given size inside `area`, clamped to fit.
fn centered(area: Rect, width: u16, height: u16) -> Rect {
    let width = width.min(area.width.saturating_sub(2)).max(1);
    let height = height.min(area.height.saturating_sub(2)).max(1);
    let x = area.x + (area.width.saturating_sub(width)) / 2;
    let y = area.y + (area.height.saturating_sub(height)) / 2;
    Rect::new(x, y, width, height)
}

fn draw_modal<S: Scheduler>(f: &mut Frame, area: Rect, state: &PageState<S>) {
    let lifecycle = state.modal.lifecycle();
    let (title, color, lines) = match lifecycle {
        Lifecycle::Submitted => (" Feedback Sent ", Color::Green, success_lines()),
        _ => (
            " Share Your Feedback ",
            Color::Cyan,
            form_lines(state.modal.form(), state.form_focus, state.category_cursor, lifecycle),
        ),
    };

    let height = lines.len() as u16 + 2;
    let modal_area = centered(area, MODAL_WIDTH, height);

    f.render_widget(Clear, modal_area);

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(color))
        .border_set(symbols::border::ROUNDED)
        .title(Span::styled(
            title,
            Style::default().fg(color).add_modifier(Modifier::BOLD),
        ));

    let inner = block.inner(modal_area);
    f.render_widget(block, modal_area);

    let paragraph = Paragraph::new(lines).wrap(Wrap { trim: false });
    f.render_widget(paragraph, inner);
}

fn success_lines() -> Vec<Line<'static>> {
    vec![
        Line::from(""),
        Line::from(Span::styled(
            "✓",
            Style::default().fg(Color::Green).add_modifier(Modifier::BOLD),
        ))
        .centered(),
        Line::from(""),
        Line::from(Span::styled(
            "Thank you for your feedback!",
            Style::default().fg(Color::White).add_modifier(Modifier::BOLD),
        ))
        .centered(),
        Line::from(Span::styled(
            "We appreciate you taking the time to help us improve VideoIndex.",
            Style::default().fg(Color::DarkGray),
        ))
        .centered(),
        Line::from(""),
    ]
}

fn field_label(text: &'static str, focused: bool) -> Line<'static> {
    let (marker, style) = if focused {
        ("▸ ", Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD))
    } else {
        ("  ", Style::default().fg(Color::White))
    };
    Line::from(vec![
        Span::styled(marker, style),
        Span::styled(text, style),
        Span::styled(" *", Style::default().fg(Color::Red)),
    ])
}

fn error_line(form: &FeedbackForm, field: Field) -> Option<Line<'static>> {
    form.errors().message(field).map(|message| {
        Line::from(Span::styled(
            format!("    ⚠ {message}"),
            Style::default().fg(Color::Red),
        ))
    })
}

fn input_line(value: &str, focused: bool) -> Line<'static> {
    let cursor = if focused { "▏" } else { "" };
    Line::from(vec![
        Span::raw("    "),
        Span::styled(value.to_string(), Style::default().fg(Color::White)),
        Span::styled(cursor, Style::default().fg(Color::Cyan)),
    ])
}

fn star_line(control: &RatingControl, form: &FeedbackForm) -> Line<'static> {
    let selected = form.draft().rating;
    let mut spans = vec![Span::raw("    ")];
    for position in 1..=RatingControl::POSITIONS {
        let style = if control.star_filled(position, selected) {
            Style::default().fg(Color::Yellow)
        } else {
            Style::default().fg(Color::DarkGray)
        };
        spans.push(Span::styled("★ ", style));
    }
    let label = control.label(selected);
    if !label.is_empty() {
        spans.push(Span::styled(
            format!(" {label}"),
            Style::default().fg(Color::White),
        ));
    }
    Line::from(spans)
}

fn form_lines(
    form: &FeedbackForm,
    focus: FormFocus,
    category_cursor: usize,
    lifecycle: Lifecycle,
) -> Vec<Line<'static>> {
    let draft = form.draft();
    let editing = lifecycle == Lifecycle::Editing;
    let focused = |f: FormFocus| editing && focus == f;
    let mut lines = vec![
        Line::from(Span::styled(
            "Help us improve VideoIndex with your thoughts and suggestions",
            Style::default().fg(Color::DarkGray),
        )),
        Line::from(""),
    ];

    lines.push(field_label("Name", focused(FormFocus::Name)));
    lines.push(input_line(&draft.name, focused(FormFocus::Name)));
    lines.extend(error_line(form, Field::Name));

    lines.push(field_label("Email", focused(FormFocus::Email)));
    lines.push(input_line(&draft.email, focused(FormFocus::Email)));
    lines.extend(error_line(form, Field::Email));

    lines.push(field_label("Overall Rating", focused(FormFocus::Rating)));
    lines.push(star_line(form.rating_control(), form));
    lines.extend(error_line(form, Field::Rating));

    lines.push(field_label("Category", focused(FormFocus::Category)));
    for category in Category::ALL {
        let chosen = draft.category == Some(category);
        let under_cursor = focused(FormFocus::Category) && category.index() == category_cursor;
        let marker = if chosen { "●" } else { "○" };
        let style = if under_cursor {
            Style::default().fg(Color::Black).bg(Color::Cyan)
        } else if chosen {
            Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD)
        } else {
            Style::default().fg(Color::White)
        };
        lines.push(Line::from(vec![
            Span::raw("    "),
            Span::styled(format!("{marker} {}", category.label()), style),
            Span::styled(
                format!("  {}", category.description()),
                Style::default().fg(Color::DarkGray),
            ),
        ]));
    }
    lines.extend(error_line(form, Field::Category));

    let mut feedback_label = field_label("Your Feedback", focused(FormFocus::Feedback));
    feedback_label.spans.push(Span::styled(
        format!("  {}", form.feedback_counter()),
        Style::default().fg(Color::DarkGray),
    ));
    lines.push(feedback_label);
    if draft.feedback_text.is_empty() {
        lines.push(input_line("", focused(FormFocus::Feedback)));
    } else {
        let text_lines: Vec<&str> = draft.feedback_text.split('\n').collect();
        let last = text_lines.len() - 1;
        for (i, text) in text_lines.into_iter().enumerate() {
            lines.push(input_line(text, i == last && focused(FormFocus::Feedback)));
        }
    }
    lines.extend(error_line(form, Field::Feedback));

    if let Some(error) = form.submit_error() {
        lines.push(Line::from(""));
        lines.push(Line::from(Span::styled(
            format!("  ✗ {error}"),
            Style::default().fg(Color::Red).add_modifier(Modifier::BOLD),
        )));
    }

    lines.push(Line::from(""));
    let send = if lifecycle == Lifecycle::Submitting {
        Span::styled(
            "[ Sending... ]",
            Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD),
        )
    } else if focused(FormFocus::Send) {
        Span::styled(
            "[ Send Feedback ]",
            Style::default().fg(Color::Black).bg(Color::Cyan).add_modifier(Modifier::BOLD),
        )
    } else {
        Span::styled("[ Send Feedback ]", Style::default().fg(Color::Cyan))
    };
    lines.push(Line::from(vec![
        Span::raw("  "),
        Span::styled("[ Cancel ] esc", Style::default().fg(Color::DarkGray)),
        Span::raw("   "),
        send,
    ]));

    lines
}
