// Controllers for climate_dashboard
// Each one owns a single piece of dashboard state and its collaborators

pub mod chart;
pub mod helpers;
pub mod map;
pub mod modal;
pub mod navigation;
pub mod search;
pub mod submission;

pub use chart::{ChartController, ChartDataError, ChartSeries, ChartWidget};
pub use map::{MapClickHook, MapController, MapWidget, RiskMarker};
pub use modal::{
    ClickTarget, DismissTrigger, FormField, LocationForm, ModalController, ModalId, ModalView,
    ValidationError,
};
pub use navigation::{NavLink, NavigationController, SectionHook};
pub use search::{OverlayState, SearchHook, SearchOverlay, SearchResult};
pub use submission::{
    StateTransitionError, SubmissionEvent, SubmissionMachine, SubmissionState,
};
