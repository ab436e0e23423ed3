use crate::event::keymap::{map_key, map_mouse, InputContext};
use crate::ui;
use crate::ui::layout::DashboardLayout;
use climate_dashboard::app::DashboardSnapshot;
use climate_dashboard::Dashboard;
use color_eyre::Result;
use crossterm::event::{self, Event, KeyEventKind};
use ratatui::backend::CrosstermBackend;
use ratatui::Terminal;
use std::io::Stdout;
use std::time::Duration;
use tokio::time::Instant;

/// Roughly 60 frames per second.
const FRAME_INTERVAL: Duration = Duration::from_millis(16);

/// Bootstrap has already happened; finish the load animation and print the snapshot.
pub fn run_headless(dashboard: &mut Dashboard, json: bool) -> Result<()> {
    dashboard.complete_animations();
    dashboard.process_events();
    let snapshot = dashboard.snapshot();

    if json {
        println!("{}", serde_json::to_string_pretty(&snapshot)?);
    } else {
        print_snapshot(&snapshot);
    }
    Ok(())
}

fn print_snapshot(snapshot: &DashboardSnapshot) {
    println!("\nClimate Risk Dashboard ({})", snapshot.mode.as_str());
    println!("=========================");
    for stat in &snapshot.stats {
        println!("{:<20} {}", stat.label, stat.display_text());
    }

    println!("\nTemperature ({} points, range {}):", snapshot.chart.len(), snapshot.range);
    for (label, value) in snapshot.chart.labels().iter().zip(snapshot.chart.values()) {
        println!("- {label}: {value:.1}°C");
    }

    println!("\nRisk markers:");
    for marker in &snapshot.markers {
        println!(
            "- {} ({:.4}, {:.4}) {}",
            marker.label,
            marker.latitude,
            marker.longitude,
            marker.tier.label()
        );
    }
}

/// Run the dashboard event loop until the user quits.
pub async fn run(terminal: &mut Terminal<CrosstermBackend<Stdout>>, dashboard: &mut Dashboard) -> Result<()> {
    while dashboard.is_running() {
        dashboard.tick(Instant::now());

        terminal
            .draw(|f| ui::ui(dashboard, f))
            .map_err(|e| color_eyre::eyre::eyre!("Terminal draw error: {e}"))?;

        while event::poll(Duration::ZERO)? {
            let size = terminal.size()?;
            let layout = DashboardLayout::new(ratatui::layout::Rect::new(0, 0, size.width, size.height));
            let ui_event = match event::read()? {
                Event::Key(key) if key.kind == KeyEventKind::Press => map_key(
                    InputContext::of(dashboard),
                    dashboard.modals.form().focus(),
                    key,
                ),
                Event::Mouse(mouse) => map_mouse(dashboard, &layout, mouse),
                _ => None,
            };
            if let Some(ui_event) = ui_event {
                dashboard.handle_ui_event(ui_event);
            }
        }

        // Yields to spawned flows, toast timers and the poller between frames.
        tokio::time::sleep(FRAME_INTERVAL).await;
    }
    Ok(())
}
