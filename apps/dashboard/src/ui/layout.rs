use crate::ui::widgets::popup::centered_rect;
use ratatui::layout::{Constraint, Direction, Layout, Margin, Position, Rect};
use std::rc::Rc;

const TOAST_WIDTH: u16 = 42;

/// Screen regions shared by the renderer and the mouse hit-testing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DashboardLayout {
    pub nav: Rect,
    pub stats: Rect,
    pub chart: Rect,
    pub map: Rect,
    pub actions: Rect,
    pub status: Rect,
    pub toasts: Rect,
    pub modal: Rect,
    pub help: Rect,
    pub search: Rect,
}

impl DashboardLayout {
    pub fn new(area: Rect) -> Self {
        let rows = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(3),
                Constraint::Length(4),
                Constraint::Min(10),
                Constraint::Length(4),
                Constraint::Length(1),
            ])
            .split(area);

        let middle = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Percentage(55), Constraint::Percentage(45)])
            .split(rows[2]);

        let toast_width = TOAST_WIDTH.min(area.width);
        let toasts = Rect {
            x: area.right().saturating_sub(toast_width),
            y: rows[1].y,
            width: toast_width,
            height: area.height.saturating_sub(rows[1].y.saturating_sub(area.y)),
        };

        Self {
            nav: rows[0],
            stats: rows[1],
            chart: middle[0],
            map: middle[1],
            actions: rows[3],
            status: rows[4],
            toasts,
            modal: centered_rect(60, 70, area),
            help: centered_rect(50, 60, area),
            search: centered_rect(60, 50, area),
        }
    }

    pub fn stat_tiles(&self, count: u32) -> Rc<[Rect]> {
        split_evenly(self.stats, count)
    }

    pub fn action_cards(&self, count: u32) -> Rc<[Rect]> {
        split_evenly(self.actions, count)
    }

    /// Drawing area of the map inside its border.
    pub fn map_canvas(&self) -> Rect {
        self.map.inner(Margin::new(1, 1))
    }

    /// Fractions (0..=1, top-left origin) of a cell inside the map canvas.
    pub fn map_fraction(&self, column: u16, row: u16) -> Option<(f64, f64)> {
        let canvas = self.map_canvas();
        if !canvas.contains(Position::new(column, row)) {
            return None;
        }
        let span = |len: u16| f64::from(len.saturating_sub(1).max(1));
        Some((
            f64::from(column - canvas.x) / span(canvas.width),
            f64::from(row - canvas.y) / span(canvas.height),
        ))
    }

    pub fn action_at(&self, column: u16, row: u16, count: u32) -> Option<usize> {
        self.action_cards(count)
            .iter()
            .position(|card| card.contains(Position::new(column, row)))
    }
}

fn split_evenly(area: Rect, count: u32) -> Rc<[Rect]> {
    let count = count.max(1);
    Layout::default()
        .direction(Direction::Horizontal)
        .constraints((0..count).map(|_| Constraint::Ratio(1, count)))
        .split(area)
}
