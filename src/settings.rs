use serde::{Deserialize, Serialize};

/// User preferences for the overlay, persisted as JSON.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UiSettings {
    /// Master gate for the module windows: when false no panel is rendered.
    #[serde(default = "default_true")]
    pub modules_open: bool,
    /// Show module settings in a floating popup instead of inline under the
    /// row.
    #[serde(default = "default_true")]
    pub settings_in_popup: bool,
    /// Swap which mouse button toggles a module and which opens its
    /// settings. Only honoured when `settings_in_popup` is off.
    #[serde(default)]
    pub swap_module_list_buttons: bool,
    /// Hide module descriptions when their settings are open.
    #[serde(default)]
    pub hide_module_descriptions: bool,
    /// When enabled the application initialises the logger at debug level.
    #[serde(default)]
    pub debug_logging: bool,
}

fn default_true() -> bool {
    true
}

impl Default for UiSettings {
    fn default() -> Self {
        Self {
            modules_open: true,
            settings_in_popup: true,
            swap_module_list_buttons: false,
            hide_module_descriptions: false,
            debug_logging: false,
        }
    }
}

impl UiSettings {
    pub fn load(path: &str) -> anyhow::Result<Self> {
        let content = std::fs::read_to_string(path).unwrap_or_default();
        if content.is_empty() {
            return Ok(Self::default());
        }
        Ok(serde_json::from_str(&content)?)
    }

    pub fn save(&self, path: &str) -> anyhow::Result<()> {
        let json = serde_json::to_string_pretty(self)?;
        std::fs::write(path, json)?;
        Ok(())
    }

    /// The button swap only applies to the inline (non-popup) settings list.
    pub fn effective_swap(&self) -> bool {
        self.swap_module_list_buttons && !self.settings_in_popup
    }
}
