// UI module for climate_dashboard
// Draws every controller's state; layout is shared with mouse hit-testing

pub mod layout;
pub mod screens;
pub mod widgets;

use climate_dashboard::Dashboard;
use layout::DashboardLayout;
use ratatui::Frame;

pub fn ui(dashboard: &Dashboard, f: &mut Frame<'_>) {
    let layout = DashboardLayout::new(f.area());

    screens::dashboard::render_dashboard(dashboard, &layout, f);
    screens::overlays::render_active_modal(dashboard, &layout, f);
    screens::overlays::render_search(dashboard, &layout, f);
    screens::overlays::render_toasts(&dashboard.toasts().visible(), &layout, f);
}

#[cfg(test)]
mod tests {
    use super::*;
    use climate_dashboard::api::{ApiClient, ReqwestTransport};
    use climate_dashboard::domain::ActionKind;
    use climate_dashboard::events::UiEvent;
    use climate_dashboard::notifications::ToastQueue;
    use climate_dashboard::{DashboardOptions, Hooks};
    use ratatui::backend::TestBackend;
    use ratatui::Terminal;
    use std::sync::Arc;

    fn screen_text(terminal: &Terminal<TestBackend>) -> String {
        terminal
            .backend()
            .buffer()
            .content()
            .iter()
            .map(ratatui::buffer::Cell::symbol)
            .collect()
    }

    #[tokio::test(start_paused = true)]
    async fn renders_stats_cards_and_open_form() -> color_eyre::Result<()> {
        let toasts = ToastQueue::new();
        let api = ApiClient::new(
            "http://localhost:8000/api/v1",
            None,
            Arc::new(ReqwestTransport::new()),
            toasts.clone(),
        );
        let mut dashboard =
            Dashboard::bootstrap(DashboardOptions::default(), api, toasts, Hooks::default());
        dashboard.complete_animations();
        dashboard.handle_ui_event(UiEvent::Action(ActionKind::Location));

        let mut terminal = Terminal::new(TestBackend::new(140, 45))?;
        terminal.draw(|f| ui(&dashboard, f))?;

        let text = screen_text(&terminal);
        assert!(text.contains("1247"));
        assert!(text.contains("Run Analysis"));
        assert!(text.contains("Latitude *"));
        Ok(())
    }
}
