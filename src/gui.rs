use crate::catalog::{ModuleCatalog, ModuleId};
use crate::panel_editor::PanelEditor;
use crate::panels::PanelRegistry;
use crate::reconnect::{AutoReconnect, ConnectRequest};
use crate::screens::{Screen, ServerEntry};
use crate::setting_values::{SettingValue, ValueEditorRegistry};
use crate::settings::UiSettings;
use crate::settings_editor::SettingsEditor;
use eframe::egui;
use std::time::Instant;

/// Name of the catalog module whose enabled flag and "Seconds" setting feed
/// the reconnect machine.
const RECONNECT_MODULE: &str = "AutoReconnect";

/// The overlay application: module panels on top of a mock client session
/// whose screen lifecycle drives the reconnect machine.
pub struct OverlayApp {
    pub catalog: ModuleCatalog,
    pub registry: PanelRegistry,
    pub editors: ValueEditorRegistry,
    pub prefs: UiSettings,
    pub reconnect: AutoReconnect,
    pub screen: Option<Screen>,
    pub current_server: Option<ServerEntry>,
    settings_editor: SettingsEditor,
    panel_editor: PanelEditor,
    reconnect_module: Option<ModuleId>,
    connect_fallback: Option<Screen>,
    settings_path: String,
}

impl OverlayApp {
    pub fn new(
        catalog: ModuleCatalog,
        prefs: UiSettings,
        settings_path: impl Into<String>,
    ) -> Self {
        let registry = PanelRegistry::new(&catalog);
        let reconnect_module = catalog.find_by_name(RECONNECT_MODULE);
        Self {
            catalog,
            registry,
            editors: ValueEditorRegistry::with_builtins(),
            prefs,
            reconnect: AutoReconnect::new(5),
            screen: None,
            current_server: None,
            settings_editor: SettingsEditor::default(),
            panel_editor: PanelEditor::default(),
            reconnect_module,
            connect_fallback: None,
            settings_path: settings_path.into(),
        }
    }

    /// Route a screen change through the reconnect machine, firing the host
    /// lifecycle events in order: old screen closed, new screen displayed.
    pub fn set_screen(&mut self, screen: Option<Screen>) {
        if let Some(old) = self.screen.take() {
            self.reconnect.screen_closed(&old);
            if matches!(&old, Screen::Disconnected(d) if d.overlay) {
                self.reconnect.screen_replaced();
            }
        }
        self.screen = screen.map(|s| {
            self.reconnect
                .screen_displayed(s, self.current_server.as_ref(), Instant::now())
        });
    }

    fn open_connect_screen(&mut self, request: ConnectRequest) {
        self.connect_fallback = Some(request.fallback);
        self.set_screen(Some(Screen::Connect(request.server)));
    }

    /// Mirror the AutoReconnect module's enabled flag and countdown setting
    /// into the machine.
    fn sync_reconnect_module(&mut self) {
        let Some(mid) = self.reconnect_module else {
            return;
        };
        let Some(module) = self.catalog.get(mid) else {
            return;
        };
        self.reconnect.enabled = module.enabled;
        if let Some(setting) = module.settings.iter().find(|s| s.name == "Seconds") {
            if let SettingValue::Int { value, .. } = setting.value {
                self.reconnect.seconds = value.max(0) as u32;
            }
        }
    }

    fn draw_screen(&mut self, ui: &mut egui::Ui) {
        let mut nav: Option<Option<Screen>> = None;
        match &self.screen {
            None => {
                if let Some(server) = &self.current_server {
                    ui.label(format!("Playing on {}", server.name));
                    if ui.button("Drop connection").clicked() {
                        nav = Some(Some(Screen::disconnected(
                            "Connection Lost",
                            "Internal Exception: connection reset by peer",
                            Screen::Multiplayer,
                        )));
                    }
                    if ui.button("Leave server").clicked() {
                        self.current_server = None;
                        nav = Some(Some(Screen::Multiplayer));
                    }
                } else {
                    ui.label("Main menu");
                    if ui.button("Multiplayer").clicked() {
                        nav = Some(Some(Screen::Multiplayer));
                    }
                }
            }
            Some(Screen::Multiplayer) => {
                ui.heading("Multiplayer");
                if ui.button("Join play.example.net").clicked() {
                    let server = ServerEntry::new("Example", "play.example.net");
                    self.current_server = Some(server.clone());
                    nav = Some(Some(Screen::Connect(server)));
                }
            }
            Some(Screen::Connect(server)) => {
                ui.heading("Connecting");
                ui.label(format!("Joining {}…", server.address));
                if ui.button("Connected").clicked() {
                    self.connect_fallback = None;
                    nav = Some(None);
                }
                if ui.button("Cancel").clicked() {
                    let fallback = self
                        .connect_fallback
                        .take()
                        .unwrap_or(Screen::Multiplayer);
                    nav = Some(Some(fallback));
                }
            }
            Some(Screen::Disconnected(info)) => {
                ui.heading(&info.title);
                ui.label(&info.reason);
                if info.overlay {
                    if let Some(text) = self.reconnect.countdown_text() {
                        ui.label(text);
                    }
                }
                if ui.button("Back to server list").clicked() {
                    nav = Some(Some((*info.parent).clone()));
                }
            }
        }
        if let Some(next) = nav {
            self.set_screen(next);
        }
    }
}

impl eframe::App for OverlayApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        self.sync_reconnect_module();
        if let Some(request) = self.reconnect.tick(Instant::now()) {
            self.open_connect_screen(request);
        }

        egui::TopBottomPanel::top("hud-menubar").show(ctx, |ui| {
            egui::menu::bar(ui, |ui| {
                ui.menu_button("View", |ui| {
                    ui.checkbox(&mut self.prefs.modules_open, "Modules");
                    if ui.button("Settings…").clicked() {
                        self.settings_editor.open = true;
                        ui.close_menu();
                    }
                    if ui.button("Module windows…").clicked() {
                        self.panel_editor.open = true;
                        ui.close_menu();
                    }
                });
            });
        });

        egui::CentralPanel::default().show(ctx, |ui| self.draw_screen(ui));

        if self.prefs.modules_open {
            self.registry
                .render_frame(ctx, &mut self.catalog, &self.prefs, &self.editors);
        }

        self.settings_editor
            .ui(ctx, &mut self.prefs, &mut self.registry, &self.catalog);
        self.panel_editor.ui(ctx, &mut self.registry, &self.catalog);

        if self.reconnect.is_counting() {
            ctx.request_repaint();
        }
    }

    fn on_exit(&mut self, _gl: Option<&eframe::glow::Context>) {
        if let Err(e) = self.prefs.save(&self.settings_path) {
            tracing::error!("failed to save settings: {e}");
        }
    }
}
