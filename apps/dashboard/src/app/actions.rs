use crate::app::state::Dashboard;
use crate::controllers::{ModalId, SubmissionEvent};
use crate::domain::{ActionKind, LocationSubmission, OperationMode, Severity, TimeRange};
use crate::events::{ActionOutcome, DashboardEvent};
use chrono::Local;
use serde_json::Value;
use std::future::Future;
use std::time::Duration;
use tokio::sync::mpsc::UnboundedSender;

pub const LOCATION_SAVE_DELAY: Duration = Duration::from_millis(1500);
pub const ADDING_LOCATION: &str = "Adding location...";
pub const LOCATION_ADDED: &str = "Location added successfully!";
pub const REPORT_NEEDS_ANALYSIS: &str = "Run an analysis before generating a report";

/// How long the simulated flow behind an action card takes.
pub const fn simulated_delay(kind: ActionKind) -> Duration {
    match kind {
        ActionKind::Location => Duration::ZERO,
        ActionKind::Analysis => Duration::from_millis(3000),
        ActionKind::Report => Duration::from_millis(2000),
        ActionKind::Emergency => Duration::from_millis(2500),
    }
}

/// Info toast shown when a flow starts. The location card opens a form instead.
pub const fn start_message(kind: ActionKind) -> Option<&'static str> {
    match kind {
        ActionKind::Location => None,
        ActionKind::Analysis => Some("Running climate risk analysis..."),
        ActionKind::Report => Some("Generating report..."),
        ActionKind::Emergency => Some("Sending emergency alert..."),
    }
}

pub const fn success_message(kind: ActionKind) -> &'static str {
    match kind {
        ActionKind::Location => LOCATION_ADDED,
        ActionKind::Analysis => "Analysis completed successfully!",
        ActionKind::Report => "Report generated successfully!",
        ActionKind::Emergency => "Emergency alert sent!",
    }
}

/// Pulls an analysis id out of a `/analyze` response, accepting string or numeric ids.
pub fn analysis_id_from(response: &Value) -> Option<String> {
    ["analysis_id", "analysisId", "id"]
        .iter()
        .find_map(|key| match response.get(key)? {
            Value::String(id) if !id.is_empty() => Some(id.clone()),
            Value::Number(id) => Some(id.to_string()),
            _ => None,
        })
}

fn spawn_flow<F>(events: &UnboundedSender<DashboardEvent>, flow: F)
where
    F: Future<Output = DashboardEvent> + Send + 'static,
{
    let events = events.clone();
    tokio::spawn(async move {
        let event = flow.await;
        if events.send(event).is_err() {
            tracing::debug!("dashboard gone before flow finished");
        }
    });
}

impl Dashboard {
    /// Routes an action card: `location` opens the form, the others start their flow.
    pub fn dispatch_action(&mut self, kind: ActionKind) {
        tracing::info!(action = kind.as_str(), mode = self.mode.as_str(), "action dispatched");

        if kind == ActionKind::Location {
            self.modals.show(ModalId::AddLocation);
            return;
        }

        match self.mode {
            OperationMode::Simulated => {
                self.begin_action(kind);
                let delay = simulated_delay(kind);
                spawn_flow(&self.events_tx, async move {
                    tokio::time::sleep(delay).await;
                    DashboardEvent::ActionCompleted {
                        kind,
                        outcome: ActionOutcome::Simulated,
                    }
                });
            }
            OperationMode::Live => self.run_live_action(kind),
        }
    }

    fn run_live_action(&mut self, kind: ActionKind) {
        let api = self.api.clone();

        match kind {
            ActionKind::Location => {}
            ActionKind::Analysis => {
                let location = self.analysis_target();
                self.begin_action(kind);
                spawn_flow(&self.events_tx, async move {
                    match api.start_analysis(&location).await {
                        Ok(response) => DashboardEvent::ActionCompleted {
                            kind,
                            outcome: ActionOutcome::AnalysisStarted {
                                analysis_id: analysis_id_from(&response),
                            },
                        },
                        Err(error) => DashboardEvent::ActionFailed {
                            kind,
                            reason: error.to_string(),
                        },
                    }
                });
            }
            ActionKind::Report => {
                let Some(analysis_id) = self.last_analysis_id.clone() else {
                    tracing::warn!("report requested without a completed analysis");
                    self.toasts.push(REPORT_NEEDS_ANALYSIS, Severity::Error);
                    return;
                };
                self.begin_action(kind);
                spawn_flow(&self.events_tx, async move {
                    match api.get_recommendations(&analysis_id).await {
                        Ok(response) => DashboardEvent::ActionCompleted {
                            kind,
                            outcome: ActionOutcome::Recommendations(response),
                        },
                        Err(error) => DashboardEvent::ActionFailed {
                            kind,
                            reason: error.to_string(),
                        },
                    }
                });
            }
            ActionKind::Emergency => {
                let center = self.map.center();
                self.begin_action(kind);
                spawn_flow(&self.events_tx, async move {
                    match api.get_climate_data(center.latitude, center.longitude).await {
                        Ok(response) => DashboardEvent::ActionCompleted {
                            kind,
                            outcome: ActionOutcome::ClimateData(response),
                        },
                        Err(error) => DashboardEvent::ActionFailed {
                            kind,
                            reason: error.to_string(),
                        },
                    }
                });
            }
        }
    }

    fn begin_action(&mut self, kind: ActionKind) {
        if let Some(message) = start_message(kind) {
            self.toasts.push(message, Severity::Info);
        }
        self.pending_actions.push(kind);
    }

    /// Drops one pending entry; a second run of the same action stays pending.
    fn finish_action(&mut self, kind: ActionKind) {
        if let Some(index) = self.pending_actions.iter().position(|pending| *pending == kind) {
            self.pending_actions.remove(index);
        }
    }

    /// Switches the chart range. In live mode the generated series is then replaced
    /// by climate data for the map center once it arrives.
    pub fn change_range(&mut self, range: TimeRange) {
        self.chart.set_range(range.token());
        self.fetch_climate_series();
    }

    pub(crate) fn fetch_climate_series(&mut self) {
        if self.mode != OperationMode::Live {
            return;
        }
        let api = self.api.clone();
        let center = self.map.center();
        let range = self.chart.range();
        spawn_flow(&self.events_tx, async move {
            match api.get_climate_data(center.latitude, center.longitude).await {
                Ok(payload) => DashboardEvent::ClimateSeriesLoaded { range, payload },
                Err(error) => DashboardEvent::ClimateSeriesFailed {
                    range,
                    reason: error.to_string(),
                },
            }
        });
    }

    fn apply_climate_data(&mut self, payload: &Value) {
        if let Err(error) = self
            .chart
            .apply_climate_payload(payload, Local::now().date_naive())
        {
            tracing::info!(%error, "climate data left the chart unchanged");
        }
    }

    /// The last saved location, or the map center when nothing has been added yet.
    fn analysis_target(&self) -> LocationSubmission {
        self.last_location.clone().unwrap_or_else(|| {
            let center = self.map.center();
            LocationSubmission {
                name: "Map center".to_string(),
                address: String::new(),
                latitude: center.latitude,
                longitude: center.longitude,
                property_type: "residential".to_string(),
            }
        })
    }

    fn transition(&mut self, event: &SubmissionEvent) {
        if let Err(error) = self.modals.submission_mut().process(event) {
            tracing::warn!(%error, "ignored submission event");
        }
    }

    /// Validates the add-location form and, when valid, starts saving it.
    ///
    /// Invalid input produces a single error toast and never reaches the network.
    pub fn submit_location(&mut self) {
        if self.modals.submission().is_busy() {
            tracing::debug!("submission already in flight");
            return;
        }

        self.transition(&SubmissionEvent::Begin);
        let location = match self.modals.form().validate() {
            Ok(location) => location,
            Err(error) => {
                tracing::warn!(?error, "location form rejected");
                self.transition(&SubmissionEvent::Rejected);
                self.toasts.push(error.to_string(), Severity::Error);
                self.transition(&SubmissionEvent::Reset);
                return;
            }
        };

        self.transition(&SubmissionEvent::Accepted);
        self.toasts.push(ADDING_LOCATION, Severity::Info);
        self.last_location = Some(location.clone());
        let session = self.modals.location_session();

        match self.mode {
            OperationMode::Simulated => spawn_flow(&self.events_tx, async move {
                tokio::time::sleep(LOCATION_SAVE_DELAY).await;
                DashboardEvent::LocationSaved {
                    analysis_id: None,
                    session,
                }
            }),
            OperationMode::Live => {
                let api = self.api.clone();
                spawn_flow(&self.events_tx, async move {
                    match api.start_analysis(&location).await {
                        Ok(response) => DashboardEvent::LocationSaved {
                            analysis_id: analysis_id_from(&response),
                            session,
                        },
                        Err(error) => DashboardEvent::LocationFailed {
                            reason: error.to_string(),
                        },
                    }
                });
            }
        }
    }

    pub(crate) fn apply_event(&mut self, event: DashboardEvent) {
        match event {
            DashboardEvent::LocationSaved {
                analysis_id,
                session,
            } => {
                self.transition(&SubmissionEvent::Confirmed);
                if analysis_id.is_some() {
                    self.last_analysis_id = analysis_id;
                }
                self.toasts.push(LOCATION_ADDED, Severity::Success);
                if session == self.modals.location_session() {
                    self.modals.hide(ModalId::AddLocation);
                    self.modals.form_mut().reset();
                } else {
                    tracing::debug!("location form reopened since submit; leaving it open");
                }
                self.transition(&SubmissionEvent::Reset);
                self.load_dashboard(tokio::time::Instant::now());
            }
            DashboardEvent::LocationFailed { reason } => {
                // The API client has already shown the error toast.
                tracing::warn!(%reason, "location was not saved");
                self.transition(&SubmissionEvent::Failed(reason));
                self.transition(&SubmissionEvent::Reset);
            }
            DashboardEvent::ActionCompleted { kind, outcome } => {
                self.finish_action(kind);
                self.apply_outcome(outcome);
                self.toasts.push(success_message(kind), Severity::Success);
            }
            DashboardEvent::ActionFailed { kind, reason } => {
                self.finish_action(kind);
                tracing::warn!(action = kind.as_str(), %reason, "action failed");
            }
            DashboardEvent::ClimateSeriesLoaded { range, payload } => {
                if range == self.chart.range() {
                    self.apply_climate_data(&payload);
                } else {
                    tracing::debug!(range = range.token(), "dropping climate data for a stale range");
                }
            }
            DashboardEvent::ClimateSeriesFailed { range, reason } => {
                // The API client has already shown the error toast.
                tracing::warn!(range = range.token(), %reason, "keeping the generated series");
            }
        }
    }

    fn apply_outcome(&mut self, outcome: ActionOutcome) {
        match outcome {
            ActionOutcome::Simulated => {}
            ActionOutcome::AnalysisStarted { analysis_id } => {
                match analysis_id {
                    Some(id) => self.last_analysis_id = Some(id),
                    None => tracing::warn!("analysis response carried no id"),
                }
            }
            ActionOutcome::Recommendations(response) => {
                let count = response.as_array().map_or(0, Vec::len);
                tracing::info!(count, "recommendations received");
            }
            ActionOutcome::ClimateData(response) => self.apply_climate_data(&response),
        }
    }
}
