use eframe::egui::Color32;
use palette::{Hsl, IntoColor, Srgb};

// ---------------------------------------------------------------------------
// Plot colours
// ---------------------------------------------------------------------------

/// Convert an HSL triple (hue in degrees) into an egui colour.
pub fn hsl_color(hue: f32, saturation: f32, lightness: f32) -> Color32 {
    let hsl = Hsl::new(hue, saturation, lightness);
    let rgb: Srgb = hsl.into_color();
    Color32::from_rgb(
        (rgb.red * 255.0).round() as u8,
        (rgb.green * 255.0).round() as u8,
        (rgb.blue * 255.0).round() as u8,
    )
}

/// Colours of the curve and of the peak markers drawn over it.
#[derive(Debug, Clone, Copy)]
pub struct PlotColors {
    pub curve: Color32,
    pub peaks: Color32,
}

impl Default for PlotColors {
    fn default() -> Self {
        Self {
            curve: hsl_color(210.0, 0.75, 0.55),
            peaks: hsl_color(0.0, 0.85, 0.5),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pure_hues() {
        assert_eq!(hsl_color(0.0, 1.0, 0.5), Color32::from_rgb(255, 0, 0));
        assert_eq!(hsl_color(120.0, 1.0, 0.5), Color32::from_rgb(0, 255, 0));
    }

    #[test]
    fn test_peaks_stand_out_from_curve() {
        let colors = PlotColors::default();
        assert_ne!(colors.curve, colors.peaks);
        assert!(colors.peaks.r() > colors.peaks.b());
    }
}
