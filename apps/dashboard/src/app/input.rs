use crate::app::state::Dashboard;
use crate::controllers::{DismissTrigger, FormField, ModalId};
use crate::domain::TimeRange;
use crate::events::UiEvent;

impl Dashboard {
    pub fn handle_ui_event(&mut self, event: UiEvent) {
        tracing::trace!(?event, "ui event");

        match event {
            UiEvent::SelectLink(index) => {
                self.navigation.select_link(index);
            }
            UiEvent::NextLink => {
                self.navigation.select_next();
            }
            UiEvent::PreviousLink => {
                self.navigation.select_previous();
            }
            UiEvent::ToggleMobileMenu => {
                self.navigation.toggle_mobile_menu();
            }

            UiEvent::OpenSearch => self.search.open(),
            UiEvent::CloseSearch => self.search.close(),
            UiEvent::SearchChar(ch) => {
                if self.search.is_open() {
                    self.search.push_char(ch);
                }
            }
            UiEvent::SearchBackspace => {
                if self.search.is_open() {
                    self.search.pop_char();
                }
            }
            UiEvent::Escape => self.handle_escape(),

            UiEvent::SetRange(token) => self.change_range(TimeRange::parse(&token)),
            UiEvent::ShiftRange(forward) => {
                let current = self.chart.range();
                let range = if forward {
                    current.next()
                } else {
                    current.previous()
                };
                self.change_range(range);
            }

            UiEvent::Action(kind) => self.dispatch_action(kind),

            UiEvent::ShowModal(id) => self.modals.show(id),
            UiEvent::DismissModal(id, trigger) => self.modals.dismiss(id, trigger),
            UiEvent::ModalClick(target) => {
                if let Some(id) = self.modals.active() {
                    self.modals.handle_click(id, target);
                }
            }
            UiEvent::FormChar(ch) => self.modals.form_mut().insert_char(ch),
            UiEvent::FormBackspace => self.modals.form_mut().backspace(),
            UiEvent::FormFocusNext => self.modals.form_mut().focus_next(),
            UiEvent::FormFocusPrevious => self.modals.form_mut().focus_previous(),
            UiEvent::FormCycleOption(forward) => {
                if self.modals.form().focus() == FormField::PropertyType {
                    self.modals.form_mut().cycle_property_type(forward);
                }
            }
            UiEvent::FormActivate => self.activate_focused_field(),
            UiEvent::SubmitLocation => self.submit_location(),

            UiEvent::MapClick(at) => self.map.handle_click(at),

            UiEvent::DismissToast(id) => {
                self.toasts.dismiss(id);
            }
            UiEvent::DismissNewestToast => {
                self.toasts.dismiss_newest();
            }

            UiEvent::Quit => self.quit(),
        }
    }

    /// Escape closes the search overlay first, then whichever modal is open.
    fn handle_escape(&mut self) {
        if self.search.handle_escape() {
            return;
        }
        if let Some(id) = self.modals.active() {
            self.modals.dismiss(id, DismissTrigger::Close);
        }
    }

    fn activate_focused_field(&mut self) {
        match self.modals.form().focus() {
            FormField::Submit => self.submit_location(),
            FormField::Cancel => self.modals.dismiss(ModalId::AddLocation, DismissTrigger::Cancel),
            FormField::PropertyType => self.modals.form_mut().cycle_property_type(true),
            FormField::Name | FormField::Address | FormField::Latitude | FormField::Longitude => {
                self.modals.form_mut().focus_next();
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use crate::app::Hooks;
    use crate::controllers::{ClickTarget, FormField, ModalId, OverlayState};
    use crate::domain::{ActionKind, Coordinate, OperationMode, TimeRange};
    use crate::events::UiEvent;
    use crate::testing::{test_dashboard, test_dashboard_with, RecordingClicks, RecordingSections};
    use std::time::Duration;

    #[tokio::test(start_paused = true)]
    async fn link_selection_reaches_section_hook() {
        let sections = RecordingSections::default();
        let hooks = Hooks {
            sections: Box::new(sections.clone()),
            ..Hooks::default()
        };
        let mut harness = test_dashboard_with(OperationMode::Simulated, hooks);

        harness.dashboard.handle_ui_event(UiEvent::SelectLink(1));
        harness.dashboard.handle_ui_event(UiEvent::NextLink);

        assert_eq!(sections.visited(), vec!["climate", "map"]);
        assert_eq!(harness.dashboard.navigation.active_index(), Some(2));
    }

    #[tokio::test(start_paused = true)]
    async fn escape_closes_search_before_modal() {
        let mut harness = test_dashboard(OperationMode::Simulated);
        harness.dashboard.handle_ui_event(UiEvent::Action(ActionKind::Location));
        harness.dashboard.handle_ui_event(UiEvent::OpenSearch);

        harness.dashboard.handle_ui_event(UiEvent::Escape);
        assert_eq!(harness.dashboard.search.state(), OverlayState::Closed);
        assert!(harness.dashboard.modals.is_visible(ModalId::AddLocation));

        harness.dashboard.handle_ui_event(UiEvent::Escape);
        assert!(!harness.dashboard.modals.is_visible(ModalId::AddLocation));
    }

    #[tokio::test(start_paused = true)]
    async fn search_typing_is_ignored_while_closed() {
        let mut harness = test_dashboard(OperationMode::Simulated);
        harness.dashboard.handle_ui_event(UiEvent::SearchChar('k'));
        assert_eq!(harness.dashboard.search.input(), "");

        harness.dashboard.handle_ui_event(UiEvent::OpenSearch);
        for ch in "key".chars() {
            harness.dashboard.handle_ui_event(UiEvent::SearchChar(ch));
        }
        assert_eq!(harness.dashboard.search.results()[0].label, "Key Biscayne");
    }

    #[tokio::test(start_paused = true)]
    async fn range_events_regenerate_chart() {
        let mut harness = test_dashboard(OperationMode::Simulated);
        harness.dashboard.handle_ui_event(UiEvent::set_range(TimeRange::Week));
        assert_eq!(harness.dashboard.chart.series().len(), 7);

        harness.dashboard.handle_ui_event(UiEvent::ShiftRange(false));
        assert_eq!(harness.dashboard.chart.range(), TimeRange::Year);
        assert_eq!(harness.dashboard.chart.series().len(), 365);
        assert_eq!(harness.dashboard.chart_scene().snapshot().redraws, 3);
    }

    #[tokio::test(start_paused = true)]
    async fn backdrop_click_dismisses_but_content_click_does_not() {
        let mut harness = test_dashboard(OperationMode::Simulated);
        harness.dashboard.handle_ui_event(UiEvent::ShowModal(ModalId::Help));

        harness.dashboard.handle_ui_event(UiEvent::ModalClick(ClickTarget::Content));
        assert!(harness.dashboard.modals.is_visible(ModalId::Help));
        harness.dashboard.handle_ui_event(UiEvent::ModalClick(ClickTarget::Backdrop));
        assert!(!harness.dashboard.modals.is_visible(ModalId::Help));
    }

    #[tokio::test(start_paused = true)]
    async fn enter_walks_form_and_submits_from_button() {
        let mut harness = test_dashboard(OperationMode::Simulated);
        harness.dashboard.handle_ui_event(UiEvent::Action(ActionKind::Location));

        for (text, expected_next) in [
            ("Home", FormField::Address),
            ("", FormField::Latitude),
            ("25.77", FormField::Longitude),
            ("-80.19", FormField::PropertyType),
        ] {
            for ch in text.chars() {
                harness.dashboard.handle_ui_event(UiEvent::FormChar(ch));
            }
            harness.dashboard.handle_ui_event(UiEvent::FormActivate);
            assert_eq!(harness.dashboard.modals.form().focus(), expected_next);
        }

        harness.dashboard.handle_ui_event(UiEvent::FormFocusNext);
        assert_eq!(harness.dashboard.modals.form().focus(), FormField::Submit);
        harness.dashboard.handle_ui_event(UiEvent::FormActivate);
        harness.settle(Duration::from_millis(1500)).await;

        assert_eq!(
            harness.messages(),
            vec!["Adding location...", "Location added successfully!"]
        );
        assert!(!harness.dashboard.modals.is_visible(ModalId::AddLocation));
    }

    #[tokio::test(start_paused = true)]
    async fn cancel_button_closes_modal() {
        let mut harness = test_dashboard(OperationMode::Simulated);
        harness.dashboard.handle_ui_event(UiEvent::Action(ActionKind::Location));
        harness.dashboard.handle_ui_event(UiEvent::FormFocusPrevious);
        assert_eq!(harness.dashboard.modals.form().focus(), FormField::Cancel);

        harness.dashboard.handle_ui_event(UiEvent::FormActivate);
        assert!(!harness.dashboard.modals.is_visible(ModalId::AddLocation));
        assert!(harness.toasts.is_empty());
    }

    #[tokio::test(start_paused = true)]
    async fn map_clicks_reach_click_hook() {
        let clicks = RecordingClicks::default();
        let hooks = Hooks {
            map_clicks: Box::new(clicks.clone()),
            ..Hooks::default()
        };
        let mut harness = test_dashboard_with(OperationMode::Simulated, hooks);

        harness
            .dashboard
            .handle_ui_event(UiEvent::MapClick(Coordinate::new(25.5, -80.3)));
        assert_eq!(clicks.clicks(), vec![Coordinate::new(25.5, -80.3)]);
    }

    #[tokio::test(start_paused = true)]
    async fn toast_dismissal_and_quit() {
        let mut harness = test_dashboard(OperationMode::Simulated);
        harness.dashboard.handle_ui_event(UiEvent::Action(ActionKind::Report));
        assert_eq!(harness.toasts.len(), 1);

        harness.dashboard.handle_ui_event(UiEvent::DismissNewestToast);
        assert!(harness.toasts.is_empty());
        harness.dashboard.handle_ui_event(UiEvent::DismissNewestToast);

        harness.dashboard.handle_ui_event(UiEvent::Quit);
        assert!(!harness.dashboard.is_running());
    }
}
