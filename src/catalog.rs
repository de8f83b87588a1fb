use crate::setting_values::SettingValue;

/// Stable identity of a module inside a [`ModuleCatalog`].
///
/// Panels and drag payloads refer to modules by id, never by name: names are
/// display text and two modules are allowed to share one.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ModuleId(pub usize);

/// One configurable setting declared by a module.
#[derive(Debug, Clone, PartialEq)]
pub struct ModuleSetting {
    pub name: String,
    pub value: SettingValue,
}

/// A feature module as exposed by the host client.
///
/// The overlay only organises and configures modules; what a module actually
/// does when enabled is entirely the host's business.
#[derive(Debug, Clone)]
pub struct GameModule {
    pub name: String,
    pub description: String,
    pub category: String,
    pub enabled: bool,
    pub settings: Vec<ModuleSetting>,
}

impl GameModule {
    pub fn new(
        name: impl Into<String>,
        category: impl Into<String>,
        description: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            description: description.into(),
            category: category.into(),
            enabled: false,
            settings: Vec::new(),
        }
    }

    pub fn setting(mut self, name: impl Into<String>, value: SettingValue) -> Self {
        self.settings.push(ModuleSetting {
            name: name.into(),
            value,
        });
        self
    }
}

/// The host's set of feature modules.
///
/// Ids are indices into the backing vec; modules are registered once at
/// startup and never removed, so an id stays valid for the process lifetime.
#[derive(Debug, Default)]
pub struct ModuleCatalog {
    modules: Vec<GameModule>,
}

impl ModuleCatalog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn register(&mut self, module: GameModule) -> ModuleId {
        self.modules.push(module);
        ModuleId(self.modules.len() - 1)
    }

    pub fn get(&self, id: ModuleId) -> Option<&GameModule> {
        self.modules.get(id.0)
    }

    pub fn get_mut(&mut self, id: ModuleId) -> Option<&mut GameModule> {
        self.modules.get_mut(id.0)
    }

    /// Flip a module's enabled flag. Unknown ids are ignored.
    pub fn toggle(&mut self, id: ModuleId) {
        if let Some(module) = self.modules.get_mut(id.0) {
            module.enabled = !module.enabled;
            tracing::debug!(module = %module.name, enabled = module.enabled, "toggled module");
        }
    }

    pub fn entries(&self) -> impl Iterator<Item = (ModuleId, &GameModule)> + '_ {
        self.modules
            .iter()
            .enumerate()
            .map(|(i, m)| (ModuleId(i), m))
    }

    /// Distinct category names in first-seen order.
    pub fn categories(&self) -> Vec<String> {
        let mut out: Vec<String> = Vec::new();
        for m in &self.modules {
            if !out.iter().any(|c| c == &m.category) {
                out.push(m.category.clone());
            }
        }
        out
    }

    pub fn len(&self) -> usize {
        self.modules.len()
    }

    pub fn is_empty(&self) -> bool {
        self.modules.is_empty()
    }

    /// Find a module by display name. Only used by hosts that need a
    /// well-known module (e.g. the auto-reconnect settings); the overlay core
    /// itself never looks modules up by name.
    pub fn find_by_name(&self, name: &str) -> Option<ModuleId> {
        self.modules
            .iter()
            .position(|m| m.name == name)
            .map(ModuleId)
    }
}
