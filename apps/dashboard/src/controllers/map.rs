use crate::domain::{Coordinate, RiskTier};
use serde::Serialize;

pub const DEFAULT_CENTER: Coordinate = Coordinate::new(25.7617, -80.1918);
pub const DEFAULT_ZOOM: u8 = 10;
pub const TILE_URL: &str = "https://{s}.tile.openstreetmap.org/{z}/{x}/{y}.png";
pub const TILE_ATTRIBUTION: &str = "© OpenStreetMap contributors";

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RiskMarker {
    pub latitude: f64,
    pub longitude: f64,
    pub tier: RiskTier,
    pub label: String,
}

impl RiskMarker {
    pub fn new(label: &str, latitude: f64, longitude: f64, tier: RiskTier) -> Self {
        Self {
            latitude,
            longitude,
            tier,
            label: label.to_string(),
        }
    }

    pub const fn coordinate(&self) -> Coordinate {
        Coordinate::new(self.latitude, self.longitude)
    }

    pub fn popup_text(&self) -> String {
        format!("{}\nRisk: {}", self.label, self.tier.label())
    }
}

pub fn default_markers() -> Vec<RiskMarker> {
    vec![
        RiskMarker::new("Miami Beach", 25.7907, -80.1300, RiskTier::High),
        RiskMarker::new("Key Biscayne", 25.6937, -80.1628, RiskTier::High),
        RiskMarker::new("Downtown Miami", 25.7743, -80.1937, RiskTier::Medium),
        RiskMarker::new("Homestead", 25.4687, -80.4776, RiskTier::Medium),
        RiskMarker::new("Coral Gables", 25.7215, -80.2684, RiskTier::Low),
    ]
}

/// The mapping surface the controller draws on.
pub trait MapWidget {
    fn set_view(&mut self, center: Coordinate, zoom: u8);
    fn add_tile_layer(&mut self, url_template: &str, attribution: &str);
    fn add_marker(&mut self, marker: &RiskMarker, color: &str, popup: &str);
}

/// Receives map clicks. No business behavior is attached to them yet.
pub trait MapClickHook {
    fn on_click(&mut self, at: Coordinate);
}

#[derive(Debug, Default)]
pub struct LoggingClickHook;

impl MapClickHook for LoggingClickHook {
    fn on_click(&mut self, at: Coordinate) {
        tracing::info!(lat = at.latitude, lng = at.longitude, "map clicked");
    }
}

pub struct MapController {
    widget: Box<dyn MapWidget>,
    click_hook: Box<dyn MapClickHook>,
    markers: Vec<RiskMarker>,
    center: Coordinate,
    zoom: u8,
    initialized: bool,
}

impl std::fmt::Debug for MapController {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MapController")
            .field("markers", &self.markers.len())
            .field("center", &self.center)
            .field("zoom", &self.zoom)
            .field("initialized", &self.initialized)
            .finish_non_exhaustive()
    }
}

impl MapController {
    pub fn new(widget: Box<dyn MapWidget>, click_hook: Box<dyn MapClickHook>) -> Self {
        Self {
            widget,
            click_hook,
            markers: Vec::new(),
            center: DEFAULT_CENTER,
            zoom: DEFAULT_ZOOM,
            initialized: false,
        }
    }

    /// Sets the default view, attaches the base tiles and draws every risk marker.
    /// The map is created once; later calls are ignored.
    pub fn initialize(&mut self) {
        if self.initialized {
            return;
        }

        self.widget.set_view(self.center, self.zoom);
        self.widget.add_tile_layer(TILE_URL, TILE_ATTRIBUTION);

        self.markers = default_markers();
        for marker in &self.markers {
            self.widget
                .add_marker(marker, &marker.tier.hex(), &marker.popup_text());
        }

        self.initialized = true;
        tracing::debug!(markers = self.markers.len(), "map initialized");
    }

    pub fn handle_click(&mut self, at: Coordinate) {
        self.click_hook.on_click(at);
    }

    pub fn markers(&self) -> &[RiskMarker] {
        &self.markers
    }

    pub const fn center(&self) -> Coordinate {
        self.center
    }

    pub const fn zoom(&self) -> u8 {
        self.zoom
    }

    pub const fn is_initialized(&self) -> bool {
        self.initialized
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scene::MapScene;
    use crate::testing::RecordingClicks;

    fn controller() -> (MapController, MapScene, RecordingClicks) {
        let scene = MapScene::default();
        let clicks = RecordingClicks::default();
        (
            MapController::new(Box::new(scene.clone()), Box::new(clicks.clone())),
            scene,
            clicks,
        )
    }

    #[test]
    fn initialize_draws_default_view_tiles_and_markers() {
        let (mut map, scene, _) = controller();
        map.initialize();

        let snapshot = scene.snapshot();
        assert_eq!(snapshot.center, Some(DEFAULT_CENTER));
        assert_eq!(snapshot.zoom, DEFAULT_ZOOM);
        assert_eq!(snapshot.tile_url.as_deref(), Some(TILE_URL));
        assert_eq!(snapshot.markers.len(), default_markers().len());
    }

    #[test]
    fn markers_are_colored_by_tier_with_uppercase_popups() {
        let (mut map, scene, _) = controller();
        map.initialize();

        let snapshot = scene.snapshot();
        let beach = snapshot
            .markers
            .iter()
            .find(|placed| placed.marker.label == "Miami Beach");
        let Some(beach) = beach else {
            panic!("Miami Beach marker missing");
        };
        assert_eq!(beach.color, "#ff5722");
        assert_eq!(beach.popup, "Miami Beach\nRisk: HIGH");

        for placed in &snapshot.markers {
            assert_eq!(placed.color, placed.marker.tier.hex());
        }
    }

    #[test]
    fn initialize_is_idempotent() {
        let (mut map, scene, _) = controller();
        map.initialize();
        map.initialize();
        assert_eq!(scene.snapshot().markers.len(), default_markers().len());
    }

    #[test]
    fn clicks_are_forwarded_to_hook() {
        let (mut map, _, clicks) = controller();
        map.initialize();
        map.handle_click(Coordinate::new(25.0, -80.0));
        assert_eq!(clicks.clicks(), vec![Coordinate::new(25.0, -80.0)]);
    }
}
