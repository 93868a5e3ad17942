use eframe::egui::{self, Color32, RichText, ScrollArea, TextEdit, Ui};

use peak_finder::state::{display_name, parse_width, Command, Session, Status};

// ---------------------------------------------------------------------------
// Left side panel – detection controls and peak report
// ---------------------------------------------------------------------------

/// Render the width entries, the "Find peaks" button and the report.
pub fn side_panel(
    ui: &mut Ui,
    session: &mut Session,
    min_text: &mut String,
    max_text: &mut String,
) {
    ui.heading("Peak detection");
    ui.separator();

    egui::Grid::new("width_grid")
        .num_columns(2)
        .show(ui, |ui: &mut Ui| {
            ui.label("Min width");
            ui.add(TextEdit::singleline(min_text).desired_width(60.0));
            ui.end_row();

            ui.label("Max width");
            ui.add(TextEdit::singleline(max_text).desired_width(60.0));
            ui.end_row();
        });

    let has_data = session.series().is_some();
    if ui
        .add_enabled(has_data, egui::Button::new("Find peaks"))
        .clicked()
    {
        find_peaks(session, min_text, max_text);
    }

    ui.separator();
    ui.strong("Peaks (index; value)");

    // Read-only view of the report; `&str` cannot be edited.
    let report_text = session.view().report.to_text();
    ScrollArea::vertical()
        .auto_shrink([false, false])
        .max_height((ui.available_height() - 40.0).max(0.0))
        .show(ui, |ui: &mut Ui| {
            ui.add(
                TextEdit::multiline(&mut report_text.as_str())
                    .font(egui::TextStyle::Monospace)
                    .desired_width(f32::INFINITY),
            );
        });

    ui.separator();
    let has_peaks = !session.view().report.is_empty();
    if ui
        .add_enabled(has_peaks, egui::Button::new("Save peaks…"))
        .clicked()
    {
        save_file_dialog(session);
    }
}

/// Apply the entered widths, then detect. Stops at the first error so the
/// status bar shows what went wrong.
fn find_peaks(session: &mut Session, min_text: &str, max_text: &str) {
    let widths = parse_width(min_text).and_then(|min| Ok((min, parse_width(max_text)?)));
    let (min, max) = match widths {
        Ok(pair) => pair,
        Err(e) => {
            session.report_error(e);
            return;
        }
    };

    session.dispatch(Command::SetRange { min, max });
    if session.status().is_some_and(Status::is_error) {
        return;
    }
    session.dispatch(Command::Detect);
}

// ---------------------------------------------------------------------------
// Top bar
// ---------------------------------------------------------------------------

/// Render the top menu / toolbar.
pub fn top_bar(ui: &mut Ui, session: &mut Session) {
    egui::menu::bar(ui, |ui: &mut Ui| {
        ui.menu_button("File", |ui: &mut Ui| {
            if ui.button("Open…").clicked() {
                open_file_dialog(session);
                ui.close_menu();
            }
            let has_peaks = !session.view().report.is_empty();
            if ui
                .add_enabled(has_peaks, egui::Button::new("Save peaks…"))
                .clicked()
            {
                save_file_dialog(session);
                ui.close_menu();
            }
            ui.separator();
            if ui.button("Quit").clicked() {
                ui.ctx().send_viewport_cmd(egui::ViewportCommand::Close);
            }
        });

        ui.separator();

        match session.source() {
            Some(path) => {
                ui.label(format!("File: {}", display_name(path)));
                if let Some(series) = session.series() {
                    ui.label(format!("({} samples)", series.len()));
                }
            }
            None => {
                ui.label("No file loaded");
            }
        }

        ui.separator();
        let range = session.range();
        ui.label(format!("Widths {}..{}", range.min(), range.max()));
    });
}

// ---------------------------------------------------------------------------
// Status bar
// ---------------------------------------------------------------------------

pub fn status_bar(ui: &mut Ui, session: &Session) {
    ui.horizontal(|ui: &mut Ui| match session.status() {
        Some(Status::Error(msg)) => {
            ui.label(RichText::new(format!("Error: {msg}")).color(Color32::RED));
        }
        Some(Status::Info(msg)) => {
            ui.label(msg);
        }
        None => {
            ui.label("Ready");
        }
    });
}

// ---------------------------------------------------------------------------
// File dialogs
// ---------------------------------------------------------------------------

pub fn open_file_dialog(session: &mut Session) {
    let file = rfd::FileDialog::new()
        .set_title("Open data file")
        .add_filter("Tab-separated data", &["txt", "tsv", "dat"])
        .add_filter("All files", &["*"])
        .pick_file();

    if let Some(path) = file {
        session.dispatch(Command::LoadFile(path));
    }
}

pub fn save_file_dialog(session: &mut Session) {
    let file = rfd::FileDialog::new()
        .set_title("Save peaks to")
        .set_file_name("peaks.txt")
        .save_file();

    if let Some(path) = file {
        session.dispatch(Command::SaveReport(path));
    }
}
