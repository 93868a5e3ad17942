use eframe::egui;

use peak_finder::state::Session;

use crate::ui::{panels, plot};

// ---------------------------------------------------------------------------
// eframe App implementation
// ---------------------------------------------------------------------------

pub struct PeakFinderApp {
    pub session: Session,
    /// Text of the width entry fields, parsed only on "Find peaks".
    pub min_width_text: String,
    pub max_width_text: String,
}

impl Default for PeakFinderApp {
    fn default() -> Self {
        let session = Session::new();
        let range = session.range();
        Self {
            session,
            min_width_text: range.min().to_string(),
            max_width_text: range.max().to_string(),
        }
    }
}

impl eframe::App for PeakFinderApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        // ---- Top panel: menu bar ----
        egui::TopBottomPanel::top("top_bar").show(ctx, |ui| {
            panels::top_bar(ui, &mut self.session);
        });

        // ---- Bottom panel: status line ----
        egui::TopBottomPanel::bottom("status_bar").show(ctx, |ui| {
            panels::status_bar(ui, &self.session);
        });

        // ---- Left side panel: widths + peak report ----
        egui::SidePanel::left("peak_panel")
            .default_width(240.0)
            .resizable(true)
            .show(ctx, |ui| {
                panels::side_panel(
                    ui,
                    &mut self.session,
                    &mut self.min_width_text,
                    &mut self.max_width_text,
                );
            });

        // ---- Central panel: plot ----
        egui::CentralPanel::default().show(ctx, |ui| {
            plot::peak_plot(ui, self.session.view());
        });
    }
}
