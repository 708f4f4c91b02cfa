//! Runtime settings and input modality presets
//!
//! Chosen once at startup from the page query string, e.g.
//! `?facts=kids&input=touch`.

use serde::{Deserialize, Serialize};

use crate::config::FactSheet;

/// Input device family the controller is tuned for
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum InputModality {
    /// Mouse or pen
    #[default]
    Pointer,
    /// Finger on a touch screen
    Touch,
}

impl InputModality {
    pub fn as_str(&self) -> &'static str {
        match self {
            InputModality::Pointer => "pointer",
            InputModality::Touch => "touch",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "pointer" | "mouse" | "desktop" => Some(InputModality::Pointer),
            "touch" => Some(InputModality::Touch),
            _ => None,
        }
    }
}

/// Where the info overlay is anchored
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum InfoAnchor {
    /// Just below-right of the pointer
    NearPointer,
    /// Middle of the canvas (fingers cover the pointer position)
    CanvasCenter,
}

/// Tap/drag thresholds for the interaction controller
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct InteractionSettings {
    /// A press released sooner than this is a tap (ms)
    pub tap_max_ms: f64,
    /// A press that travelled further than this is never a tap (px)
    pub tap_slop_px: f32,
    /// Moves this soon after the press are ignored (ms)
    pub drag_grace_ms: f64,
    /// Moves are ignored until the press has travelled this far (px)
    pub drag_jitter_px: f32,
    /// A tap this soon after the previous tap is ignored (ms)
    pub double_tap_window_ms: f64,
    pub info_anchor: InfoAnchor,
    /// Show the dragged body's facts at the pointer while dragging
    pub facts_follow_drag: bool,
}

impl InteractionSettings {
    pub fn for_modality(modality: InputModality) -> Self {
        match modality {
            InputModality::Pointer => Self {
                tap_max_ms: 250.0,
                tap_slop_px: 5.0,
                drag_grace_ms: 0.0,
                drag_jitter_px: 0.0,
                double_tap_window_ms: 300.0,
                info_anchor: InfoAnchor::NearPointer,
                facts_follow_drag: true,
            },
            InputModality::Touch => Self {
                tap_max_ms: 200.0,
                tap_slop_px: 5.0,
                drag_grace_ms: 100.0,
                drag_jitter_px: 5.0,
                double_tap_window_ms: 300.0,
                info_anchor: InfoAnchor::CanvasCenter,
                facts_follow_drag: false,
            },
        }
    }
}

impl Default for InteractionSettings {
    fn default() -> Self {
        Self::for_modality(InputModality::default())
    }
}

/// App settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Settings {
    pub facts: FactSheet,
    pub modality: InputModality,
    pub interaction: InteractionSettings,
}

impl Default for Settings {
    fn default() -> Self {
        Self::from_modality(InputModality::default())
    }
}

impl Settings {
    /// Default settings tuned for a modality
    pub fn from_modality(modality: InputModality) -> Self {
        Self {
            facts: FactSheet::default(),
            modality,
            interaction: InteractionSettings::for_modality(modality),
        }
    }

    /// Switch modality (resets the interaction thresholds)
    pub fn apply_modality(&mut self, modality: InputModality) {
        self.modality = modality;
        self.interaction = InteractionSettings::for_modality(modality);
    }

    /// Parse `facts=` and `input=` from a URL query string (leading `?`
    /// optional). Unknown keys and values are ignored; without `input=`
    /// the modality is `fallback`.
    pub fn from_query(query: &str, fallback: InputModality) -> Self {
        let mut settings = Self::from_modality(fallback);

        for pair in query.trim_start_matches('?').split('&') {
            let (key, value) = pair.split_once('=').unwrap_or((pair, ""));
            match key {
                "facts" => match FactSheet::from_str(value) {
                    Some(sheet) => settings.facts = sheet,
                    None => log::warn!("Unknown fact sheet '{}'", value),
                },
                "input" => match InputModality::from_str(value) {
                    Some(modality) => settings.apply_modality(modality),
                    None => log::warn!("Unknown input modality '{}'", value),
                },
                _ => {}
            }
        }

        log::info!(
            "Settings: facts={} input={}",
            settings.facts.as_str(),
            settings.modality.as_str()
        );
        settings
    }
}
