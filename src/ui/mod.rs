//! UI components for SERP Preview
//!
//! This module contains the editing form panel and the settings window.

mod form;
mod settings;

pub use form::FormPanel;
pub use settings::SettingsPanel;
