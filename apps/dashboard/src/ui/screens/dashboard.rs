use crate::ui::layout::DashboardLayout;
use crate::ui::widgets::charts::{render_risk_map, render_temperature_chart};
use climate_dashboard::domain::ActionKind;
use climate_dashboard::Dashboard;
use ratatui::layout::{Alignment, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line as TextLine, Span, Text};
use ratatui::widgets::{Block, Borders, Paragraph, Tabs};
use ratatui::Frame;

const ACCENT: Color = Color::Rgb(76, 175, 80);

pub fn render_dashboard(dashboard: &Dashboard, layout: &DashboardLayout, f: &mut Frame<'_>) {
    render_nav(dashboard, f, layout.nav);
    render_stats(dashboard, layout, f);
    render_temperature_chart(dashboard.chart.series(), dashboard.chart.range(), f, layout.chart);
    render_risk_map(&dashboard.map_scene().snapshot(), f, layout.map);
    render_action_cards(dashboard, layout, f);
    render_shortcuts(f, layout.status);
}

fn render_nav(dashboard: &Dashboard, f: &mut Frame<'_>, area: Rect) {
    let links = dashboard.navigation.links();
    let block = Block::default()
        .title(Span::styled(
            " 🌍 Climate Risk Dashboard ",
            Style::default().fg(ACCENT).add_modifier(Modifier::BOLD),
        ))
        .title_bottom(
            TextLine::from(format!(" mode: {} ", dashboard.mode().as_str())).right_aligned(),
        )
        .borders(Borders::ALL)
        .border_style(Style::default().fg(ACCENT));

    if dashboard.navigation.is_mobile_menu_open() {
        let menu: Vec<Span<'_>> = links
            .iter()
            .map(|link| {
                let style = if link.active {
                    Style::default().fg(Color::Black).bg(ACCENT)
                } else {
                    Style::default().fg(Color::Gray)
                };
                Span::styled(format!(" {} ", link.label), style)
            })
            .collect();
        f.render_widget(Paragraph::new(TextLine::from(menu)).block(block), area);
        return;
    }

    let tabs = Tabs::new(links.iter().map(|link| link.label.as_str()))
        .block(block)
        .select(dashboard.navigation.active_index().unwrap_or(0))
        .style(Style::default().fg(Color::Gray))
        .highlight_style(Style::default().fg(ACCENT).add_modifier(Modifier::BOLD))
        .divider(Span::raw("|"));
    f.render_widget(tabs, area);
}

fn render_stats(dashboard: &Dashboard, layout: &DashboardLayout, f: &mut Frame<'_>) {
    let tiles = layout.stat_tiles(u32::try_from(dashboard.stats.len()).unwrap_or(1));
    for (stat, area) in dashboard.stats.iter().zip(tiles.iter()) {
        let text = Text::from(vec![
            TextLine::from(Span::styled(
                stat.display_text(),
                Style::default()
                    .fg(Color::White)
                    .add_modifier(Modifier::BOLD),
            )),
            TextLine::from(Span::styled(stat.label, Style::default().fg(Color::Gray))),
        ]);
        let tile = Paragraph::new(text)
            .alignment(Alignment::Center)
            .block(Block::default().borders(Borders::ALL).border_style(Style::default().fg(Color::DarkGray)));
        f.render_widget(tile, *area);
    }
}

fn render_action_cards(dashboard: &Dashboard, layout: &DashboardLayout, f: &mut Frame<'_>) {
    let kinds = dashboard.action_cards();
    let cards = layout.action_cards(u32::try_from(kinds.len()).unwrap_or(1));
    for (index, (kind, area)) in kinds.iter().zip(cards.iter()).enumerate() {
        let pending = dashboard.is_pending(*kind);
        let border = if *kind == ActionKind::Emergency {
            Color::Rgb(255, 87, 34)
        } else {
            ACCENT
        };
        let status = if pending { "working…" } else { "ready" };
        let text = Text::from(vec![
            TextLine::from(Span::styled(
                kind.label(),
                Style::default().add_modifier(Modifier::BOLD),
            )),
            TextLine::from(Span::styled(status, Style::default().fg(Color::Gray))),
        ]);
        let card = Paragraph::new(text).alignment(Alignment::Center).block(
            Block::default()
                .title(format!(" {} ", index + 1))
                .borders(Borders::ALL)
                .border_style(Style::default().fg(border)),
        );
        f.render_widget(card, *area);
    }
}

fn key(label: &'static str) -> Span<'static> {
    Span::styled(
        label,
        Style::default()
            .fg(Color::Yellow)
            .add_modifier(Modifier::BOLD),
    )
}

fn hint(label: &'static str) -> Span<'static> {
    Span::styled(label, Style::default().fg(Color::Gray))
}

fn render_shortcuts(f: &mut Frame<'_>, area: Rect) {
    let line = TextLine::from(vec![
        key("←/→"),
        hint(": Sections | "),
        key("/"),
        hint(": Search | "),
        key("[ ]"),
        hint(": Range | "),
        key("1-4"),
        hint(": Actions | "),
        key("x"),
        hint(": Dismiss | "),
        key("?"),
        hint(": Help | "),
        key("q"),
        hint(": Quit"),
    ]);
    f.render_widget(Paragraph::new(line).alignment(Alignment::Center), area);
}
