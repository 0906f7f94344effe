//! Platform abstraction layer
//!
//! Handles browser/native differences for:
//! - Page elements and back-buffer sizing
//! - Tuning overrides embedded in the page
//! - The hand-tracking bridge (web only)

#[cfg(target_arch = "wasm32")]
pub mod tracking;

use crate::tuning::Tuning;

/// Seed for a new run: the explicit one if given, otherwise the wall clock
pub fn session_seed(explicit: Option<u64>, clock_ms: f64) -> u64 {
    explicit.unwrap_or(clock_ms as u64)
}

/// Tuning for this session from an optional JSON override
///
/// Blank or invalid overrides fall back to the defaults.
pub fn tuning_from_override(source: Option<&str>) -> Tuning {
    let Some(json) = source.map(str::trim).filter(|s| !s.is_empty()) else {
        return Tuning::default();
    };
    match Tuning::from_json(json) {
        Ok(tuning) => {
            log::info!("Loaded tuning overrides");
            tuning
        }
        Err(e) => {
            log::warn!("Ignoring tuning overrides: {}", e);
            Tuning::default()
        }
    }
}

#[cfg(target_arch = "wasm32")]
mod web {
    use wasm_bindgen::JsCast;
    use web_sys::{Document, HtmlCanvasElement, Window};

    use crate::error::StartupError;
    use crate::renderer::Viewport;
    use crate::settings::QualityPreset;
    use crate::tuning::Tuning;

    pub fn window() -> Result<Window, StartupError> {
        web_sys::window().ok_or(StartupError::NoWindow)
    }

    pub fn document(window: &Window) -> Result<Document, StartupError> {
        window.document().ok_or(StartupError::NoDocument)
    }

    /// Look up `#id` and cast it to the expected element type
    pub fn element_by_id<T: JsCast>(document: &Document, id: &str) -> Result<T, StartupError> {
        document
            .get_element_by_id(id)
            .ok_or_else(|| StartupError::MissingElement(id.to_string()))?
            .dyn_into::<T>()
            .map_err(|_| StartupError::WrongElementType(id.to_string()))
    }

    /// Current canvas size scaled for the back buffer
    pub fn canvas_viewport(
        window: &Window,
        canvas: &HtmlCanvasElement,
        quality: QualityPreset,
    ) -> Viewport {
        let dpr = window.device_pixel_ratio() as f32;
        Viewport::new(
            canvas.client_width() as f32,
            canvas.client_height() as f32,
            dpr * quality.resolution_scale(),
        )
    }

    /// Size the canvas back buffer to match `viewport`
    pub fn apply_viewport(canvas: &HtmlCanvasElement, viewport: &Viewport) {
        canvas.set_width(viewport.physical.0);
        canvas.set_height(viewport.physical.1);
    }

    /// Tuning from the page's optional `<script id="tuning">` block
    pub fn page_tuning(document: &Document) -> Tuning {
        let source = document
            .get_element_by_id("tuning")
            .and_then(|el| el.text_content());
        super::tuning_from_override(source.as_deref())
    }
}

#[cfg(target_arch = "wasm32")]
pub use web::*;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_session_seed_prefers_explicit() {
        assert_eq!(session_seed(Some(7), 1_700_000_000_000.0), 7);
        assert_eq!(session_seed(None, 1234.9), 1234);
    }

    #[test]
    fn test_missing_override_is_default() {
        let tuning = tuning_from_override(None);
        assert_eq!(tuning.generation.threshold, Tuning::default().generation.threshold);
        let tuning = tuning_from_override(Some("   \n"));
        assert_eq!(tuning.physics.gravity, Tuning::default().physics.gravity);
    }

    #[test]
    fn test_partial_override_applies() {
        let tuning = tuning_from_override(Some(r#"{ "physics": { "move_speed": 0.25 } }"#));
        assert_eq!(tuning.physics.move_speed, 0.25);
        assert_eq!(tuning.physics.gravity, Tuning::default().physics.gravity);
    }

    #[test]
    fn test_invalid_override_falls_back() {
        let tuning = tuning_from_override(Some("{ not json"));
        assert_eq!(tuning.physics.move_speed, Tuning::default().physics.move_speed);

        let tuning = tuning_from_override(Some(r#"{ "generation": { "coin_chance": 3.0 } }"#));
        assert_eq!(tuning.generation.coin_chance, Tuning::default().generation.coin_chance);
    }
}
