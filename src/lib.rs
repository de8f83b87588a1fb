pub mod catalog;
pub mod gui;
pub mod logging;
pub mod panel_editor;
pub mod panels;
pub mod reconnect;
pub mod screens;
pub mod setting_values;
pub mod settings;
pub mod settings_editor;
