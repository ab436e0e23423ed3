use crate::ui::layout::DashboardLayout;
use crate::ui::widgets::popup::dialog_frame;
use climate_dashboard::controllers::{FormField, LocationForm, ModalId, SubmissionState};
use climate_dashboard::domain::Severity;
use climate_dashboard::notifications::Toast;
use climate_dashboard::Dashboard;
use ratatui::layout::{Alignment, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line as TextLine, Span, Text};
use ratatui::widgets::{Block, Borders, Clear, Paragraph, Wrap};
use ratatui::Frame;

const TOAST_HEIGHT: u16 = 3;

const fn severity_color(severity: Severity) -> Color {
    match severity {
        Severity::Info => Color::Cyan,
        Severity::Success => Color::Green,
        Severity::Error => Color::Red,
    }
}

/// Stacked top-right, oldest first.
pub fn render_toasts(toasts: &[Toast], layout: &DashboardLayout, f: &mut Frame<'_>) {
    let area = layout.toasts;
    for (index, toast) in toasts.iter().enumerate() {
        let offset = u16::try_from(index).unwrap_or(u16::MAX).saturating_mul(TOAST_HEIGHT);
        if offset.saturating_add(TOAST_HEIGHT) > area.height {
            break;
        }
        let slot = Rect {
            x: area.x,
            y: area.y + offset,
            width: area.width,
            height: TOAST_HEIGHT,
        };
        let color = severity_color(toast.severity);
        f.render_widget(Clear, slot);
        let paragraph = Paragraph::new(TextLine::from(vec![
            Span::styled(format!("{} ", toast.icon()), Style::default().fg(color)),
            Span::raw(toast.message.as_str()),
        ]))
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Style::default().fg(color))
                .title_bottom(TextLine::from(toast.created_at.format(" %H:%M:%S ").to_string()).right_aligned()),
        );
        f.render_widget(paragraph, slot);
    }
}

pub fn render_active_modal(dashboard: &Dashboard, layout: &DashboardLayout, f: &mut Frame<'_>) {
    match dashboard.modals.active() {
        Some(ModalId::AddLocation) => render_location_modal(
            dashboard.modals.form(),
            dashboard.modals.submission().state(),
            f,
            layout.modal,
        ),
        Some(ModalId::Help) => render_help(f, layout.help),
        None => {}
    }
}

fn field_line(form: &LocationForm, field: FormField) -> TextLine<'_> {
    let focused = form.focus() == field;
    let label_style = if focused {
        Style::default()
            .fg(Color::Yellow)
            .add_modifier(Modifier::BOLD)
    } else {
        Style::default().fg(Color::Gray)
    };
    let cursor = if focused && field.is_text() { "▏" } else { "" };
    let value = if field == FormField::PropertyType {
        format!("◀ {} ▶", form.property_type())
    } else {
        format!("{}{cursor}", form.value(field))
    };
    TextLine::from(vec![
        Span::styled(format!("{:<14}", field.label()), label_style),
        Span::raw(value),
    ])
}

fn button(form: &LocationForm, field: FormField) -> Span<'static> {
    let style = if form.focus() == field {
        Style::default().fg(Color::Black).bg(Color::Yellow)
    } else {
        Style::default().fg(Color::Yellow)
    };
    Span::styled(format!("[ {} ]", field.label()), style)
}

fn render_location_modal(
    form: &LocationForm,
    state: SubmissionState,
    f: &mut Frame<'_>,
    area: Rect,
) {
    let inner = dialog_frame(f, area, ModalId::AddLocation.title(), Color::Green);

    let mut lines: Vec<TextLine<'_>> = FormField::ALL
        .iter()
        .filter(|field| !matches!(field, FormField::Submit | FormField::Cancel))
        .map(|field| field_line(form, *field))
        .collect();
    lines.push(TextLine::from(""));
    lines.push(TextLine::from(vec![
        button(form, FormField::Submit),
        Span::raw("  "),
        button(form, FormField::Cancel),
    ]));
    lines.push(TextLine::from(""));
    let status = match state {
        SubmissionState::Submitting => "Saving…",
        _ => "Tab/↑/↓ move · Enter next/press · ←/→ property type · Esc close",
    };
    lines.push(TextLine::from(Span::styled(status, Style::default().fg(Color::Gray))));

    f.render_widget(Paragraph::new(Text::from(lines)).wrap(Wrap { trim: false }), inner);
}

fn help_lines() -> Vec<TextLine<'static>> {
    [
        ("←/→", "Move between sections"),
        ("m", "Toggle the compact menu"),
        ("/", "Search risk locations"),
        ("[ ]", "Change the chart range"),
        ("1-4", "Add location · analysis · report · emergency"),
        ("x", "Dismiss the newest notification"),
        ("click", "Map: report coordinate · outside a dialog: close it"),
        ("Esc", "Close search or dialog"),
        ("q", "Quit"),
    ]
    .into_iter()
    .map(|(key, text)| {
        TextLine::from(vec![
            Span::styled(
                format!("{key:<8}"),
                Style::default()
                    .fg(Color::Yellow)
                    .add_modifier(Modifier::BOLD),
            ),
            Span::raw(text),
        ])
    })
    .collect()
}

fn render_help(f: &mut Frame<'_>, area: Rect) {
    let inner = dialog_frame(f, area, "Help & Keyboard Shortcuts", Color::Yellow);
    f.render_widget(
        Paragraph::new(Text::from(help_lines())).wrap(Wrap { trim: true }),
        inner,
    );
}

pub fn render_search(dashboard: &Dashboard, layout: &DashboardLayout, f: &mut Frame<'_>) {
    let search = &dashboard.search;
    if !search.is_open() {
        return;
    }
    let inner = dialog_frame(f, layout.search, "Search locations", Color::Cyan);

    let mut lines = vec![
        TextLine::from(vec![
            Span::styled("› ", Style::default().fg(Color::Cyan)),
            Span::raw(search.input()),
            Span::raw(if search.is_focused() { "▏" } else { "" }),
        ]),
        TextLine::from(""),
    ];
    if search.results().is_empty() {
        lines.push(TextLine::from(Span::styled(
            "Type at least three characters",
            Style::default().fg(Color::Gray),
        )));
    }
    for result in search.results() {
        lines.push(TextLine::from(vec![
            Span::raw(result.label.as_str()),
            Span::styled(
                format!(
                    "  ({:.4}, {:.4})",
                    result.coordinate.latitude, result.coordinate.longitude
                ),
                Style::default().fg(Color::Gray),
            ),
        ]));
    }

    f.render_widget(
        Paragraph::new(Text::from(lines)).alignment(Alignment::Left),
        inner,
    );
}
