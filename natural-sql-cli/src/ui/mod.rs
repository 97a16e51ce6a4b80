//! UI module containing components and layout utilities

pub mod components;
pub mod spinner;

pub use components::{
    error_panel::ErrorPanel, help_overlay::HelpOverlay, info_panel::InfoPanel,
    query_input::QueryInput, results_viewer::ResultsViewer, sql_viewer::SqlViewer,
    status_bar::StatusBar, Component,
};
pub use spinner::Spinner;
