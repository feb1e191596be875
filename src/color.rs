use std::collections::BTreeMap;

use eframe::egui::Color32;
use palette::{Hsl, IntoColor, Srgb};

// ---------------------------------------------------------------------------
// Color palette generator
// ---------------------------------------------------------------------------

/// Generates `n` visually distinct colours using evenly spaced hues.
pub fn generate_palette(n: usize) -> Vec<Color32> {
    (0..n)
        .map(|i| {
            let hue = (i as f32 / n as f32) * 360.0;
            let rgb: Srgb = Hsl::new(hue, 0.75, 0.55).into_color();
            Color32::from_rgb(
                (rgb.red * 255.0) as u8,
                (rgb.green * 255.0) as u8,
                (rgb.blue * 255.0) as u8,
            )
        })
        .collect()
}

// ---------------------------------------------------------------------------
// Channel colours
// ---------------------------------------------------------------------------

/// Fixed colour per channel for a session, so a channel looks the same in
/// every graph it appears in.
#[derive(Debug, Clone)]
pub struct ChannelColors {
    mapping: BTreeMap<String, Color32>,
}

impl ChannelColors {
    pub fn new(channels: &[String]) -> Self {
        let mapping = channels
            .iter()
            .cloned()
            .zip(generate_palette(channels.len()))
            .collect();
        ChannelColors { mapping }
    }

    pub fn color_for(&self, channel: &str) -> Color32 {
        self.mapping
            .get(channel)
            .copied()
            .unwrap_or(Color32::LIGHT_BLUE)
    }
}
