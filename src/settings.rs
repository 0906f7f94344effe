//! Session settings
//!
//! Read once from the page URL query string (`?seed=42&fps=1&quality=low`).
//! Nothing here is persisted between visits.

use serde::{Deserialize, Serialize};

/// Quality preset levels
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum QualityPreset {
    Low,
    #[default]
    Medium,
    High,
}

impl QualityPreset {
    pub fn as_str(&self) -> &'static str {
        match self {
            QualityPreset::Low => "Low",
            QualityPreset::Medium => "Medium",
            QualityPreset::High => "High",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "low" => Some(QualityPreset::Low),
            "medium" | "med" => Some(QualityPreset::Medium),
            "high" => Some(QualityPreset::High),
            _ => None,
        }
    }

    /// Fraction of the device pixel ratio used for the back buffer
    ///
    /// The whole scene is shaded per pixel, so this is the main cost knob.
    pub fn resolution_scale(&self) -> f32 {
        match self {
            QualityPreset::Low => 0.5,
            QualityPreset::Medium => 0.75,
            QualityPreset::High => 1.0,
        }
    }
}

/// Per-session switches
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Settings {
    /// World seed; `None` picks one from the clock
    pub seed: Option<u64>,
    pub quality: QualityPreset,
    /// Show FPS counter
    pub show_fps: bool,
    /// Let the hand tracker draw the detected skeleton over the camera preview
    pub show_landmarks: bool,
    /// Step the simulation at a fixed 60 Hz instead of once per display frame
    pub fixed_timestep: bool,
    /// Start in demo mode
    pub autopilot: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            seed: None,
            quality: QualityPreset::Medium,
            show_fps: false,
            show_landmarks: true,
            fixed_timestep: false,
            autopilot: false,
        }
    }
}

impl Settings {
    /// Parse a URL query string (with or without the leading `?`)
    ///
    /// Keys and values are form-decoded (`+` and `%XX`). Unknown keys and
    /// unparsable values are ignored.
    pub fn from_query(query: &str) -> Self {
        let mut settings = Self::default();
        let query = query.strip_prefix('?').unwrap_or(query);

        for pair in query.split('&').filter(|p| !p.is_empty()) {
            let (key, value) = pair.split_once('=').unwrap_or((pair, "1"));
            let (key, value) = (decode_component(key), decode_component(value));
            let value = value.as_str();
            match key.as_str() {
                "seed" => settings.seed = value.parse().ok().or(settings.seed),
                "quality" => {
                    if let Some(q) = QualityPreset::from_str(value) {
                        settings.quality = q;
                    }
                }
                "fps" => settings.show_fps = parse_flag(value, settings.show_fps),
                "landmarks" => settings.show_landmarks = parse_flag(value, settings.show_landmarks),
                "fixed" => settings.fixed_timestep = parse_flag(value, settings.fixed_timestep),
                "autopilot" => settings.autopilot = parse_flag(value, settings.autopilot),
                _ => log::debug!("Ignoring unknown setting '{}'", key),
            }
        }
        settings
    }

    /// Read settings from the current page URL (WASM only)
    #[cfg(target_arch = "wasm32")]
    pub fn load() -> Self {
        let search = web_sys::window()
            .and_then(|w| w.location().search().ok())
            .unwrap_or_default();
        let settings = Self::from_query(&search);
        log::info!("Settings: {:?}", settings);
        settings
    }

    /// Native stub
    #[cfg(not(target_arch = "wasm32"))]
    pub fn load() -> Self {
        Self::default()
    }
}

/// Decode one `application/x-www-form-urlencoded` component
///
/// Malformed escapes are kept literally; invalid UTF-8 is replaced.
fn decode_component(raw: &str) -> String {
    let bytes = raw.as_bytes();
    let mut out = Vec::with_capacity(bytes.len());
    let mut i = 0;
    while i < bytes.len() {
        match bytes[i] {
            b'+' => out.push(b' '),
            b'%' => {
                let hex = raw.get(i + 1..i + 3).and_then(|h| u8::from_str_radix(h, 16).ok());
                if let Some(byte) = hex {
                    out.push(byte);
                    i += 2;
                } else {
                    out.push(b'%');
                }
            }
            b => out.push(b),
        }
        i += 1;
    }
    String::from_utf8_lossy(&out).into_owned()
}

fn parse_flag(value: &str, current: bool) -> bool {
    match value.to_lowercase().as_str() {
        "1" | "true" | "on" | "yes" => true,
        "0" | "false" | "off" | "no" => false,
        _ => current,
    }
}
