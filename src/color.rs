use std::collections::BTreeMap;

use eframe::egui::Color32;
use palette::{Hsl, IntoColor, Srgb};

use crate::data::model::{ScalarValue, ThreadGroups};

// ---------------------------------------------------------------------------
// Color palette generator
// ---------------------------------------------------------------------------

/// Generates `n` visually distinct colours using evenly spaced hues.
pub fn generate_palette(n: usize) -> Vec<Color32> {
    if n == 0 {
        return Vec::new();
    }
    (0..n)
        .map(|i| {
            let hue = (i as f32 / n as f32) * 360.0;
            let hsl = Hsl::new(hue, 0.75, 0.55);
            let rgb: Srgb = hsl.into_color();
            Color32::from_rgb(
                (rgb.red * 255.0) as u8,
                (rgb.green * 255.0) as u8,
                (rgb.blue * 255.0) as u8,
            )
        })
        .collect()
}

// ---------------------------------------------------------------------------
// Color mapping: thread-group key → Color32
// ---------------------------------------------------------------------------

/// Maps each thread-group key to a distinct colour, assigned in first-seen
/// group order so series keep their colour when groups are toggled.
#[derive(Debug, Clone)]
pub struct ColorMap {
    mapping: BTreeMap<ScalarValue, Color32>,
    default_color: Color32,
}

impl ColorMap {
    /// Build a colour map for the groups of a parsed report.
    pub fn from_groups(groups: &ThreadGroups) -> Self {
        let palette = generate_palette(groups.len());
        let mapping: BTreeMap<ScalarValue, Color32> = groups
            .keys()
            .cloned()
            .zip(palette.into_iter())
            .collect();

        ColorMap {
            mapping,
            default_color: Color32::GRAY,
        }
    }

    /// Look up the colour for a given group key.
    pub fn color_for(&self, key: &ScalarValue) -> Color32 {
        self.mapping.get(key).copied().unwrap_or(self.default_color)
    }
}
