//! Core of the peak finder: loading, detection, view model and the
//! command-driven session that the egui shell talks to.

pub mod data;
pub mod detect;
pub mod state;
pub mod view;
