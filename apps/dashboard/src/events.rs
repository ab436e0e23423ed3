//! Typed events flowing into the dashboard.
//!
//! [`UiEvent`] is what the user did; [`DashboardEvent`] is what a spawned flow reports
//! back once its delay or request finishes.

use crate::controllers::{ClickTarget, DismissTrigger, ModalId};
use crate::domain::{ActionKind, Coordinate, TimeRange};
use crate::notifications::ToastId;
use serde_json::Value;

#[derive(Debug, Clone, PartialEq)]
pub enum UiEvent {
    SelectLink(usize),
    NextLink,
    PreviousLink,
    ToggleMobileMenu,

    OpenSearch,
    CloseSearch,
    SearchChar(char),
    SearchBackspace,
    Escape,

    SetRange(String),
    ShiftRange(bool),

    Action(ActionKind),

    ShowModal(ModalId),
    DismissModal(ModalId, DismissTrigger),
    ModalClick(ClickTarget),
    FormChar(char),
    FormBackspace,
    FormFocusNext,
    FormFocusPrevious,
    FormCycleOption(bool),
    /// Enter inside the form: advance a text field or press the focused button.
    FormActivate,
    SubmitLocation,

    MapClick(Coordinate),

    DismissToast(ToastId),
    DismissNewestToast,

    Quit,
}

impl UiEvent {
    pub fn set_range(range: TimeRange) -> Self {
        Self::SetRange(range.token().to_string())
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum DashboardEvent {
    /// `session` is the location-form session the save was submitted from.
    LocationSaved {
        analysis_id: Option<String>,
        session: u64,
    },
    LocationFailed { reason: String },
    ActionCompleted { kind: ActionKind, outcome: ActionOutcome },
    ActionFailed { kind: ActionKind, reason: String },
    ClimateSeriesLoaded { range: TimeRange, payload: Value },
    ClimateSeriesFailed { range: TimeRange, reason: String },
}

/// Data a completed action hands back to the dashboard.
#[derive(Debug, Clone, PartialEq)]
pub enum ActionOutcome {
    Simulated,
    AnalysisStarted { analysis_id: Option<String> },
    Recommendations(Value),
    ClimateData(Value),
}
