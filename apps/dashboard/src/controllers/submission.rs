use std::convert::TryFrom;
use std::fmt;

/// Lifecycle of one location submission.
#[derive(Clone, Copy, PartialEq, Eq, Debug, Default)]
pub enum SubmissionState {
    #[default]
    Idle,
    Validating,
    Invalid,
    Submitting,
    Success,
    Failed,
}

impl fmt::Display for SubmissionState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Idle => write!(f, "Idle"),
            Self::Validating => write!(f, "Validating"),
            Self::Invalid => write!(f, "Invalid"),
            Self::Submitting => write!(f, "Submitting"),
            Self::Success => write!(f, "Success"),
            Self::Failed => write!(f, "Failed"),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum SubmissionEvent {
    Begin,
    Rejected,
    Accepted,
    Confirmed,
    Failed(String),
    Reset,
}

impl fmt::Display for SubmissionEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Begin => write!(f, "Begin"),
            Self::Rejected => write!(f, "Rejected"),
            Self::Accepted => write!(f, "Accepted"),
            Self::Confirmed => write!(f, "Confirmed"),
            Self::Failed(reason) => write!(f, "Failed({reason})"),
            Self::Reset => write!(f, "Reset"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StateTransitionError {
    pub from: SubmissionState,
    pub event: SubmissionEvent,
}

impl fmt::Display for StateTransitionError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Invalid transition from {} with event {}",
            self.from, self.event
        )
    }
}

impl std::error::Error for StateTransitionError {}

struct NextState(SubmissionState);

impl TryFrom<(SubmissionState, &SubmissionEvent)> for NextState {
    type Error = StateTransitionError;

    fn try_from(value: (SubmissionState, &SubmissionEvent)) -> Result<Self, Self::Error> {
        let (current, event) = value;

        let next = match (current, event) {
            (SubmissionState::Idle, SubmissionEvent::Begin) => SubmissionState::Validating,
            (SubmissionState::Validating, SubmissionEvent::Rejected) => SubmissionState::Invalid,
            (SubmissionState::Validating, SubmissionEvent::Accepted) => SubmissionState::Submitting,
            (SubmissionState::Submitting, SubmissionEvent::Confirmed) => SubmissionState::Success,
            (SubmissionState::Submitting, SubmissionEvent::Failed(_)) => SubmissionState::Failed,
            (
                SubmissionState::Invalid | SubmissionState::Success | SubmissionState::Failed,
                SubmissionEvent::Reset,
            ) => SubmissionState::Idle,
            _ => {
                return Err(StateTransitionError {
                    from: current,
                    event: event.clone(),
                })
            }
        };
        Ok(Self(next))
    }
}

/// Guards the submit flow so a second submit cannot start while one is in flight.
#[derive(Debug, Default)]
pub struct SubmissionMachine {
    state: SubmissionState,
}

impl SubmissionMachine {
    pub const fn new() -> Self {
        Self {
            state: SubmissionState::Idle,
        }
    }

    pub const fn state(&self) -> SubmissionState {
        self.state
    }

    pub const fn is_busy(&self) -> bool {
        matches!(
            self.state,
            SubmissionState::Validating | SubmissionState::Submitting
        )
    }

    pub fn process(
        &mut self,
        event: &SubmissionEvent,
    ) -> Result<SubmissionState, StateTransitionError> {
        let NextState(next) = NextState::try_from((self.state, event))?;
        tracing::debug!(from = %self.state, to = %next, %event, "submission transition");
        self.state = next;
        Ok(next)
    }
}
