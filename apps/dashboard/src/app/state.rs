use crate::animator::{default_stats, DashboardStat, StatAnimator, STAT_ANIMATION_DURATION};
use crate::api::ApiClient;
use crate::controllers::map::{default_markers, LoggingClickHook};
use crate::controllers::navigation::LoggingSectionHook;
use crate::controllers::search::LocationSearch;
use crate::controllers::{
    ChartController, ChartSeries, MapClickHook, MapController, ModalController,
    NavigationController, RiskMarker, SearchHook, SearchOverlay, SectionHook,
};
use crate::domain::{ActionKind, LocationSubmission, OperationMode, Severity, TimeRange};
use crate::events::DashboardEvent;
use crate::notifications::ToastQueue;
use crate::poller::{spawn_poller, LoggingNotificationCheck, NotificationCheck, POLL_INTERVAL};
use crate::scene::{ChartScene, MapScene};
use serde::Serialize;
use std::time::Duration;
use tokio::sync::mpsc::{unbounded_channel, UnboundedReceiver, UnboundedSender};
use tokio::task::JoinHandle;
use tokio::time::Instant;

/// Bootstrap steps, in the order they run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum BootStep {
    Navigation,
    Search,
    Modals,
    Charts,
    Map,
    ActionCards,
    Notifications,
}

impl BootStep {
    pub const ORDER: [Self; 7] = [
        Self::Navigation,
        Self::Search,
        Self::Modals,
        Self::Charts,
        Self::Map,
        Self::ActionCards,
        Self::Notifications,
    ];

    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Navigation => "navigation",
            Self::Search => "search",
            Self::Modals => "modals",
            Self::Charts => "charts",
            Self::Map => "map",
            Self::ActionCards => "action_cards",
            Self::Notifications => "notifications",
        }
    }
}

/// External collaborators handed to the controllers at bootstrap.
pub struct Hooks {
    pub sections: Box<dyn SectionHook>,
    pub search: Box<dyn SearchHook>,
    pub map_clicks: Box<dyn MapClickHook>,
    pub notifications: Box<dyn NotificationCheck>,
}

impl Default for Hooks {
    fn default() -> Self {
        Self {
            sections: Box::new(LoggingSectionHook),
            search: Box::new(LocationSearch::new(default_markers())),
            map_clicks: Box::new(LoggingClickHook),
            notifications: Box::new(LoggingNotificationCheck),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DashboardOptions {
    pub mode: OperationMode,
    pub initial_range: TimeRange,
    pub poll_interval: Duration,
}

impl Default for DashboardOptions {
    fn default() -> Self {
        Self {
            mode: OperationMode::Simulated,
            initial_range: TimeRange::Month,
            poll_interval: POLL_INTERVAL,
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct NotificationLine {
    pub severity: Severity,
    pub message: String,
}

/// Everything headless mode prints.
#[derive(Debug, Clone, Serialize)]
pub struct DashboardSnapshot {
    pub mode: OperationMode,
    pub range: &'static str,
    pub boot_order: Vec<BootStep>,
    pub stats: Vec<DashboardStat>,
    pub chart: ChartSeries,
    pub markers: Vec<RiskMarker>,
    pub notifications: Vec<NotificationLine>,
}

pub struct Dashboard {
    pub navigation: NavigationController,
    pub search: SearchOverlay,
    pub modals: ModalController,
    pub chart: ChartController,
    pub map: MapController,
    pub stats: Vec<DashboardStat>,
    pub(crate) mode: OperationMode,
    pub(crate) api: ApiClient,
    pub(crate) toasts: ToastQueue,
    pub(crate) events_tx: UnboundedSender<DashboardEvent>,
    pub(crate) pending_actions: Vec<ActionKind>,
    pub(crate) last_analysis_id: Option<String>,
    pub(crate) last_location: Option<LocationSubmission>,
    events_rx: UnboundedReceiver<DashboardEvent>,
    animator: StatAnimator,
    chart_scene: ChartScene,
    map_scene: MapScene,
    action_cards: Vec<ActionKind>,
    boot_order: Vec<BootStep>,
    load_count: u32,
    running: bool,
    _poller: JoinHandle<()>,
}

impl std::fmt::Debug for Dashboard {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Dashboard")
            .field("mode", &self.mode)
            .field("boot_order", &self.boot_order)
            .field("load_count", &self.load_count)
            .field("pending_actions", &self.pending_actions)
            .finish_non_exhaustive()
    }
}

fn record(order: &mut Vec<BootStep>, step: BootStep) {
    tracing::info!(step = step.as_str(), "initialized");
    order.push(step);
}

impl Dashboard {
    /// Initializes every controller in [`BootStep::ORDER`], starts the poller and
    /// issues the first dashboard load. Live mode also requests the chart's climate
    /// data. Must run inside a tokio runtime.
    pub fn bootstrap(
        options: DashboardOptions,
        api: ApiClient,
        toasts: ToastQueue,
        hooks: Hooks,
    ) -> Self {
        let mut boot_order = Vec::with_capacity(BootStep::ORDER.len());

        let navigation = NavigationController::with_default_links(hooks.sections);
        record(&mut boot_order, BootStep::Navigation);

        let search = SearchOverlay::new(hooks.search);
        record(&mut boot_order, BootStep::Search);

        let modals = ModalController::new();
        record(&mut boot_order, BootStep::Modals);

        let chart_scene = ChartScene::default();
        let mut chart = ChartController::new(Box::new(chart_scene.clone()));
        chart.initialize(options.initial_range);
        record(&mut boot_order, BootStep::Charts);

        let map_scene = MapScene::default();
        let mut map = MapController::new(Box::new(map_scene.clone()), hooks.map_clicks);
        map.initialize();
        record(&mut boot_order, BootStep::Map);

        let action_cards = ActionKind::ALL.to_vec();
        record(&mut boot_order, BootStep::ActionCards);

        let poller = spawn_poller(options.poll_interval, hooks.notifications);
        record(&mut boot_order, BootStep::Notifications);

        let (events_tx, events_rx) = unbounded_channel();
        let mut dashboard = Self {
            navigation,
            search,
            modals,
            chart,
            map,
            stats: default_stats(),
            mode: options.mode,
            api,
            toasts,
            events_tx,
            pending_actions: Vec::new(),
            last_analysis_id: None,
            last_location: None,
            events_rx,
            animator: StatAnimator::new(),
            chart_scene,
            map_scene,
            action_cards,
            boot_order,
            load_count: 0,
            running: true,
            _poller: poller,
        };

        tracing::info!(mode = options.mode.as_str(), "dashboard bootstrapped");
        dashboard.load_dashboard(Instant::now());
        dashboard.fetch_climate_series();
        dashboard
    }

    /// Counts every stat up from zero to its target over the animation duration.
    pub fn load_dashboard(&mut self, now: Instant) {
        for (index, stat) in self.stats.iter_mut().enumerate() {
            stat.displayed = 0.0;
            self.animator
                .animate(index, 0.0, stat.target, now, STAT_ANIMATION_DURATION);
        }
        self.load_count += 1;
        tracing::info!(load = self.load_count, "dashboard data loaded");
    }

    /// One display frame: advance animations and apply finished flows.
    pub fn tick(&mut self, now: Instant) {
        self.animator.tick(now, &mut self.stats);
        self.process_events();
    }

    /// Jumps every running animation to its end value.
    pub fn complete_animations(&mut self) {
        self.animator
            .tick(Instant::now() + STAT_ANIMATION_DURATION, &mut self.stats);
    }

    /// Applies everything spawned flows have reported so far, in arrival order.
    pub fn process_events(&mut self) {
        while let Ok(event) = self.events_rx.try_recv() {
            self.apply_event(event);
        }
    }

    pub fn quit(&mut self) {
        self.running = false;
    }

    pub const fn is_running(&self) -> bool {
        self.running
    }

    pub const fn mode(&self) -> OperationMode {
        self.mode
    }

    pub const fn toasts(&self) -> &ToastQueue {
        &self.toasts
    }

    pub const fn api(&self) -> &ApiClient {
        &self.api
    }

    pub fn boot_order(&self) -> &[BootStep] {
        &self.boot_order
    }

    pub const fn load_count(&self) -> u32 {
        self.load_count
    }

    pub fn action_cards(&self) -> &[ActionKind] {
        &self.action_cards
    }

    pub fn is_pending(&self, kind: ActionKind) -> bool {
        self.pending_actions.contains(&kind)
    }

    pub fn last_analysis_id(&self) -> Option<&str> {
        self.last_analysis_id.as_deref()
    }

    pub const fn chart_scene(&self) -> &ChartScene {
        &self.chart_scene
    }

    pub const fn map_scene(&self) -> &MapScene {
        &self.map_scene
    }

    pub fn snapshot(&self) -> DashboardSnapshot {
        DashboardSnapshot {
            mode: self.mode,
            range: self.chart.range().token(),
            boot_order: self.boot_order.clone(),
            stats: self.stats.clone(),
            chart: self.chart.series().clone(),
            markers: self.map.markers().to_vec(),
            notifications: self
                .toasts
                .visible()
                .into_iter()
                .map(|toast| NotificationLine {
                    severity: toast.severity,
                    message: toast.message,
                })
                .collect(),
        }
    }
}
