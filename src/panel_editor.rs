use crate::catalog::ModuleCatalog;
use crate::panels::PanelRegistry;
use eframe::egui;

/// Maintenance window for the live panel set: rename, close, reset.
#[derive(Default)]
pub struct PanelEditor {
    pub open: bool,
}

impl PanelEditor {
    pub fn ui(
        &mut self,
        ctx: &egui::Context,
        registry: &mut PanelRegistry,
        catalog: &ModuleCatalog,
    ) {
        if !self.open {
            return;
        }
        let mut open = self.open;
        egui::Window::new("Module windows")
            .open(&mut open)
            .default_width(260.0)
            .show(ctx, |ui| {
                for panel in registry.panels.iter_mut() {
                    ui.horizontal(|ui| {
                        ui.add(
                            egui::TextEdit::singleline(&mut panel.title).desired_width(140.0),
                        );
                        ui.label(format!("{} modules", panel.module_count()));
                        if ui.button("Close").clicked() {
                            panel.closed = true;
                        }
                    });
                }
                ui.separator();
                if ui.button("Reset to default").clicked() {
                    registry.reset(catalog);
                }
            });
        self.open = open;
    }
}
