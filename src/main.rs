use eframe::egui;
use module_hud::catalog::{GameModule, ModuleCatalog};
use module_hud::gui::OverlayApp;
use module_hud::setting_values::SettingValue;
use module_hud::settings::UiSettings;

const SETTINGS_FILE: &str = "hud_settings.json";

fn main() -> anyhow::Result<()> {
    let prefs = UiSettings::load(SETTINGS_FILE)?;
    module_hud::logging::init(prefs.debug_logging);

    let app = OverlayApp::new(demo_catalog(), prefs, SETTINGS_FILE);
    let native_options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default().with_inner_size([900.0, 620.0]),
        ..Default::default()
    };
    eframe::run_native(
        "module_hud",
        native_options,
        Box::new(move |_cc| Box::new(app)),
    )
    .map_err(|e| anyhow::anyhow!("{e}"))?;
    Ok(())
}

/// A stand-in for the host client's feature modules.
fn demo_catalog() -> ModuleCatalog {
    let mut catalog = ModuleCatalog::new();
    catalog.register(
        GameModule::new("Fps display", "Render", "Shows the current frame rate")
            .setting(
                "Corner",
                SettingValue::Choice {
                    selected: 0,
                    options: vec![
                        "Top left".into(),
                        "Top right".into(),
                        "Bottom left".into(),
                        "Bottom right".into(),
                    ],
                },
            )
            .setting("Text color", SettingValue::Color { rgb: [1.0, 1.0, 1.0] }),
    );
    catalog.register(
        GameModule::new("Zoom", "Render", "Zooms the view while active").setting(
            "Factor",
            SettingValue::Float {
                value: 2.0,
                min: 1.0,
                max: 10.0,
            },
        ),
    );
    catalog.register(
        GameModule::new("Fullbright", "Render", "Raises gamma to maximum").setting(
            "Fade in",
            SettingValue::Bool { value: true },
        ),
    );
    catalog.register(GameModule::new(
        "Sprint",
        "Movement",
        "Keeps the sprint key held",
    ));
    catalog.register(
        GameModule::new("Step", "Movement", "Steps up full blocks").setting(
            "Height",
            SettingValue::Float {
                value: 1.0,
                min: 0.5,
                max: 2.5,
            },
        ),
    );
    catalog.register(
        GameModule::new("Chat prefix", "Chat", "Prepends a marker to sent chat").setting(
            "Marker",
            SettingValue::Char { value: '>' },
        ),
    );
    catalog.register(
        GameModule::new(
            "AutoReconnect",
            "Misc",
            "Automatically reconnects after being disconnected",
        )
        .setting(
            "Seconds",
            SettingValue::Int {
                value: 5,
                min: 0,
                max: 60,
            },
        ),
    );
    catalog
}
