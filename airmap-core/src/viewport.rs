use serde::Serialize;
use tracing::debug;

pub const MIN_ZOOM: u8 = 1;
pub const MAX_ZOOM: u8 = 18;

/// Zoom levels at or below this show the whole world.
pub const WORLD_VIEW_MAX_ZOOM: u8 = 3;

pub const DEFAULT_CENTER: LatLon = LatLon { lat: 20.0, lon: 0.0 };
pub const DEFAULT_ZOOM: u8 = 2;

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct LatLon {
    pub lat: f64,
    pub lon: f64,
}

impl LatLon {
    pub fn new(lat: f64, lon: f64) -> Self {
        Self { lat, lon }
    }
}

/// Visible center and zoom of the map.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Viewport {
    pub center: LatLon,
    pub zoom: u8,
}

impl Default for Viewport {
    fn default() -> Self {
        Self { center: DEFAULT_CENTER, zoom: DEFAULT_ZOOM }
    }
}

impl Viewport {
    pub fn is_world_view(&self) -> bool {
        self.zoom <= WORLD_VIEW_MAX_ZOOM
    }
}

/// Sole owner of the camera state. Every transition keeps `zoom` in
/// `[MIN_ZOOM, MAX_ZOOM]`.
#[derive(Debug, Default)]
pub struct ViewportController {
    viewport: Viewport,
}

impl ViewportController {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn viewport(&self) -> Viewport {
        self.viewport
    }

    pub fn set_zoom(&mut self, delta: i32) {
        let next = (i32::from(self.viewport.zoom).saturating_add(delta))
            .clamp(i32::from(MIN_ZOOM), i32::from(MAX_ZOOM));
        // clamped into u8 range above
        self.viewport.zoom = next as u8;
    }

    pub fn zoom_in(&mut self) {
        self.set_zoom(1);
    }

    pub fn zoom_out(&mut self) {
        self.set_zoom(-1);
    }

    /// Adopt a camera state reported by the map itself (drag, pinch).
    ///
    /// The center is taken as-is. Callers are expected to pass an in-range
    /// zoom; anything else is pulled back into range rather than stored.
    pub fn set_view(&mut self, center: LatLon, zoom: u8) {
        let clamped = zoom.clamp(MIN_ZOOM, MAX_ZOOM);
        if clamped != zoom {
            debug!(zoom, clamped, "set_view zoom outside range, clamping");
        }
        self.viewport = Viewport { center, zoom: clamped };
    }

    pub fn reset(&mut self) {
        self.viewport = Viewport::default();
    }
}
