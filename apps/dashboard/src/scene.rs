//! In-memory chart and map surfaces.
//!
//! Controllers draw into these through the `ChartWidget` / `MapWidget` traits; the
//! terminal renderer and headless output read the same shared scene back.

use crate::controllers::chart::{ChartSeries, ChartWidget};
use crate::controllers::map::{MapWidget, RiskMarker};
use crate::domain::Coordinate;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(PoisonError::into_inner)
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct ChartSnapshot {
    pub series: ChartSeries,
    pub redraws: u64,
}

#[derive(Debug, Clone, Default)]
pub struct ChartScene(Arc<Mutex<ChartSnapshot>>);

impl ChartScene {
    pub fn snapshot(&self) -> ChartSnapshot {
        lock(&self.0).clone()
    }
}

impl ChartWidget for ChartScene {
    fn redraw(&mut self, series: &ChartSeries) {
        let mut snapshot = lock(&self.0);
        snapshot.series = series.clone();
        snapshot.redraws += 1;
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct PlacedMarker {
    pub marker: RiskMarker,
    pub color: String,
    pub popup: String,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct MapSnapshot {
    pub center: Option<Coordinate>,
    pub zoom: u8,
    pub tile_url: Option<String>,
    pub attribution: Option<String>,
    pub markers: Vec<PlacedMarker>,
}

impl MapSnapshot {
    pub fn viewport(&self) -> Option<Viewport> {
        self.center.map(|center| Viewport::around(center, self.zoom))
    }
}

#[derive(Debug, Clone, Default)]
pub struct MapScene(Arc<Mutex<MapSnapshot>>);

impl MapScene {
    pub fn snapshot(&self) -> MapSnapshot {
        lock(&self.0).clone()
    }
}

impl MapWidget for MapScene {
    fn set_view(&mut self, center: Coordinate, zoom: u8) {
        let mut snapshot = lock(&self.0);
        snapshot.center = Some(center);
        snapshot.zoom = zoom;
    }

    fn add_tile_layer(&mut self, url_template: &str, attribution: &str) {
        let mut snapshot = lock(&self.0);
        snapshot.tile_url = Some(url_template.to_string());
        snapshot.attribution = Some(attribution.to_string());
    }

    fn add_marker(&mut self, marker: &RiskMarker, color: &str, popup: &str) {
        lock(&self.0).markers.push(PlacedMarker {
            marker: marker.clone(),
            color: color.to_string(),
            popup: popup.to_string(),
        });
    }
}

/// Longitude/latitude window shown for a center and zoom level.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Viewport {
    pub x_bounds: [f64; 2],
    pub y_bounds: [f64; 2],
}

impl Viewport {
    /// Approximates a 512 pixel wide web map: the visible span halves with every zoom level.
    pub fn around(center: Coordinate, zoom: u8) -> Self {
        let half_span = 360.0 / 2_f64.powi(i32::from(zoom));
        Self {
            x_bounds: [center.longitude - half_span, center.longitude + half_span],
            y_bounds: [
                (center.latitude - half_span).max(-90.0),
                (center.latitude + half_span).min(90.0),
            ],
        }
    }

    /// Maps fractions of the drawing area (0,0 = top left) back to a coordinate.
    pub fn unproject(&self, fx: f64, fy: f64) -> Coordinate {
        let fx = fx.clamp(0.0, 1.0);
        let fy = fy.clamp(0.0, 1.0);
        let longitude = (self.x_bounds[1] - self.x_bounds[0]).mul_add(fx, self.x_bounds[0]);
        let latitude = (self.y_bounds[0] - self.y_bounds[1]).mul_add(fy, self.y_bounds[1]);
        Coordinate::new(latitude, longitude)
    }

    pub fn contains(&self, at: Coordinate) -> bool {
        (self.x_bounds[0]..=self.x_bounds[1]).contains(&at.longitude)
            && (self.y_bounds[0]..=self.y_bounds[1]).contains(&at.latitude)
    }
}
