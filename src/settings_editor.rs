use crate::catalog::ModuleCatalog;
use crate::panels::PanelRegistry;
use crate::settings::UiSettings;
use eframe::egui;

/// The overlay's settings window. Edits apply immediately.
#[derive(Default)]
pub struct SettingsEditor {
    pub open: bool,
}

impl SettingsEditor {
    pub fn ui(
        &mut self,
        ctx: &egui::Context,
        prefs: &mut UiSettings,
        registry: &mut PanelRegistry,
        catalog: &ModuleCatalog,
    ) {
        if !self.open {
            return;
        }
        let mut open = self.open;
        egui::Window::new("Settings")
            .open(&mut open)
            .resizable(false)
            .show(ctx, |ui| {
                ui.checkbox(&mut prefs.modules_open, "Show module windows");
                ui.checkbox(&mut prefs.settings_in_popup, "Settings popup")
                    .on_hover_text("Show module settings in a popup instead of a collapsible");
                // The swap only affects the tree-header list, so it is
                // hidden while popup mode is on.
                if !prefs.settings_in_popup {
                    ui.checkbox(&mut prefs.swap_module_list_buttons, "Swap list buttons")
                        .on_hover_text(
                            "Right clicking modules reveals their settings, \
                             left clicking toggles them",
                        );
                }
                ui.checkbox(&mut prefs.hide_module_descriptions, "Hide descriptions")
                    .on_hover_text("Hide module descriptions when settings are open");
                ui.checkbox(&mut prefs.debug_logging, "Debug logging")
                    .on_hover_text("Takes effect on next start");

                ui.add_space(5.0);
                if ui.button("Reset module windows").clicked() {
                    registry.reset(catalog);
                }
            });
        self.open = open;
    }
}
