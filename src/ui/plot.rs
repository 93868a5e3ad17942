use eframe::egui::Ui;
use egui_plot::{Line, MarkerShape, Plot, PlotPoints, Points};

use peak_finder::view::PlotView;

use crate::color::PlotColors;

// ---------------------------------------------------------------------------
// Data plot (central panel)
// ---------------------------------------------------------------------------

/// Render the curve and the detected peaks in the central panel.
pub fn peak_plot(ui: &mut Ui, view: &PlotView) {
    if !view.has_data() {
        ui.centered_and_justified(|ui: &mut Ui| {
            ui.heading("Open a data file to plot it  (File → Open…)");
        });
        return;
    }

    let colors = PlotColors::default();

    Plot::new("peak_plot")
        .legend(egui_plot::Legend::default())
        .x_axis_label("x")
        .y_axis_label("y")
        .allow_boxed_zoom(true)
        .allow_drag(true)
        .allow_scroll(true)
        .allow_zoom(true)
        .show(ui, |plot_ui| {
            let curve: PlotPoints = view.curve.iter().copied().collect();
            plot_ui.line(Line::new(curve).name("data").color(colors.curve).width(1.5));

            if !view.peak_points.is_empty() {
                let peaks: PlotPoints = view.peak_points.iter().copied().collect();
                plot_ui.points(
                    Points::new(peaks)
                        .name(format!("peaks ({})", view.peak_points.len()))
                        .color(colors.peaks)
                        .shape(MarkerShape::Circle)
                        .filled(true)
                        .radius(4.0),
                );
            }
        });
}
