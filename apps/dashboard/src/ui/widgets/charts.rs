use climate_dashboard::controllers::ChartSeries;
use climate_dashboard::domain::{RiskTier, TimeRange};
use climate_dashboard::scene::{MapSnapshot, Viewport};
use ratatui::layout::Rect;
use ratatui::style::{Color, Modifier, Style};
use ratatui::symbols::Marker;
use ratatui::text::{Line as TextLine, Span};
use ratatui::widgets::canvas::{Canvas, Map, MapResolution, Points};
use ratatui::widgets::{Axis, Block, Borders, Chart, Dataset, GraphType, Paragraph};
use ratatui::Frame;

pub const fn tier_color(tier: RiskTier) -> Color {
    let (r, g, b) = tier.rgb();
    Color::Rgb(r, g, b)
}

fn value_bounds(values: &[f64]) -> [f64; 2] {
    let (min, max) = values
        .iter()
        .fold((f64::MAX, f64::MIN), |(min, max), value| {
            (min.min(*value), max.max(*value))
        });
    if min > max {
        return [0.0, 1.0];
    }
    [(min - 1.0).floor(), (max + 1.0).ceil()]
}

#[allow(clippy::cast_precision_loss)]
pub fn render_temperature_chart(series: &ChartSeries, range: TimeRange, f: &mut Frame<'_>, area: Rect) {
    let block = Block::default()
        .title(format!(" Temperature Trend · {} ", range.label()))
        .title_bottom(TextLine::from(" [ / ] change range ").right_aligned())
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Cyan));

    if series.is_empty() {
        let paragraph = Paragraph::new("No climate data available")
            .block(block)
            .alignment(ratatui::layout::Alignment::Center);
        f.render_widget(paragraph, area);
        return;
    }

    let points = series.points();
    let last = series.len().saturating_sub(1);
    let labels = series.labels();
    let x_labels: Vec<Span<'_>> = [0, last / 2, last]
        .iter()
        .filter_map(|index| labels.get(*index))
        .map(|label| Span::raw(label.as_str()))
        .collect();

    let y_bounds = value_bounds(series.values());
    let y_labels = vec![
        Span::raw(format!("{:.0}°C", y_bounds[0])),
        Span::raw(format!("{:.0}°C", y_bounds[1])),
    ];

    let dataset = Dataset::default()
        .name("Temperature (°C)")
        .marker(Marker::Braille)
        .graph_type(GraphType::Line)
        .style(Style::default().fg(Color::Rgb(76, 175, 80)))
        .data(&points);

    let chart = Chart::new(vec![dataset])
        .block(block)
        .x_axis(
            Axis::default()
                .style(Style::default().fg(Color::Gray))
                .bounds([0.0, last.max(1) as f64])
                .labels(x_labels),
        )
        .y_axis(
            Axis::default()
                .style(Style::default().fg(Color::Gray))
                .bounds(y_bounds)
                .labels(y_labels),
        );

    f.render_widget(chart, area);
}

pub fn render_risk_map(map: &MapSnapshot, f: &mut Frame<'_>, area: Rect) {
    let block = Block::default()
        .title(" Risk Map ")
        .title_bottom(
            TextLine::from(map.attribution.clone().unwrap_or_default()).right_aligned(),
        )
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Cyan));

    let Some(viewport) = map.viewport() else {
        let paragraph = Paragraph::new("Map not initialized").block(block);
        f.render_widget(paragraph, area);
        return;
    };

    let Viewport { x_bounds, y_bounds } = viewport;
    let canvas = Canvas::default()
        .block(block)
        .marker(Marker::Braille)
        .x_bounds(x_bounds)
        .y_bounds(y_bounds)
        .paint(|ctx| {
            ctx.draw(&Map {
                resolution: MapResolution::High,
                color: Color::DarkGray,
            });
            ctx.layer();
            for placed in &map.markers {
                let coords = [(placed.marker.longitude, placed.marker.latitude)];
                ctx.draw(&Points {
                    coords: &coords,
                    color: tier_color(placed.marker.tier),
                });
                ctx.print(
                    placed.marker.longitude,
                    placed.marker.latitude,
                    TextLine::from(Span::styled(
                        format!("● {}", placed.marker.label),
                        Style::default()
                            .fg(tier_color(placed.marker.tier))
                            .add_modifier(Modifier::BOLD),
                    )),
                );
            }
        });

    f.render_widget(canvas, area);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bounds_pad_the_observed_range() {
        assert_eq!(value_bounds(&[21.2, 27.9]), [20.0, 29.0]);
        assert_eq!(value_bounds(&[]), [0.0, 1.0]);
    }
}
