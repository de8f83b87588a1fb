use eframe::egui;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// A typed setting value.
///
/// The built-in kinds cover what the stock modules declare; hosts with their
/// own value types use [`SettingValue::Custom`] together with a registered
/// [`ValueEditor`] for that kind tag.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum SettingValue {
    Bool { value: bool },
    Int { value: i64, min: i64, max: i64 },
    Float { value: f64, min: f64, max: f64 },
    Choice { selected: usize, options: Vec<String> },
    Color { rgb: [f32; 3] },
    Char { value: char },
    #[serde(untagged)]
    Custom { kind: String, data: serde_json::Value },
}

impl SettingValue {
    /// Tag used to look up the editor for this value.
    pub fn kind(&self) -> &str {
        match self {
            SettingValue::Bool { .. } => "bool",
            SettingValue::Int { .. } => "int",
            SettingValue::Float { .. } => "float",
            SettingValue::Choice { .. } => "choice",
            SettingValue::Color { .. } => "color",
            SettingValue::Char { .. } => "char",
            SettingValue::Custom { kind, .. } => kind,
        }
    }
}

/// Renders one kind of [`SettingValue`] as an editable widget.
///
/// `show` returns `Some(new_value)` only when the user changed the value this
/// frame; otherwise `None` and the caller leaves the stored value alone.
pub trait ValueEditor {
    fn kind(&self) -> &str;
    fn show(&self, ui: &mut egui::Ui, label: &str, value: &SettingValue) -> Option<SettingValue>;
}

/// Kind tag → editor dispatch table.
///
/// Open for extension: callers render any setting through [`show`] and a new
/// kind only needs a [`register`] call, never a change at the call sites.
///
/// [`show`]: ValueEditorRegistry::show
/// [`register`]: ValueEditorRegistry::register
pub struct ValueEditorRegistry {
    editors: HashMap<String, Box<dyn ValueEditor>>,
}

impl ValueEditorRegistry {
    pub fn new() -> Self {
        Self {
            editors: HashMap::new(),
        }
    }

    pub fn with_builtins() -> Self {
        let mut reg = Self::new();
        reg.register(Box::new(BoolEditor));
        reg.register(Box::new(IntEditor));
        reg.register(Box::new(FloatEditor));
        reg.register(Box::new(ChoiceEditor));
        reg.register(Box::new(ColorEditor));
        reg.register(Box::new(CharEditor));
        reg
    }

    pub fn register(&mut self, editor: Box<dyn ValueEditor>) {
        self.editors.insert(editor.kind().to_string(), editor);
    }

    pub fn has_kind(&self, kind: &str) -> bool {
        self.editors.contains_key(kind)
    }

    /// Render `value` behind `label`, writing an edit back in place.
    ///
    /// Returns whether an editor handled the value. Unknown kinds fall back
    /// to a disabled label so a misconfigured module still renders.
    pub fn show(&self, ui: &mut egui::Ui, label: &str, value: &mut SettingValue) -> bool {
        match self.editors.get(value.kind()) {
            Some(editor) => {
                if let Some(new_value) = editor.show(ui, label, value) {
                    *value = new_value;
                }
                true
            }
            None => {
                ui.add_enabled(
                    false,
                    egui::Label::new(format!("{label}: ({} unsupported)", value.kind())),
                );
                false
            }
        }
    }
}

impl Default for ValueEditorRegistry {
    fn default() -> Self {
        Self::with_builtins()
    }
}

struct BoolEditor;

impl ValueEditor for BoolEditor {
    fn kind(&self) -> &str {
        "bool"
    }

    fn show(&self, ui: &mut egui::Ui, label: &str, value: &SettingValue) -> Option<SettingValue> {
        let SettingValue::Bool { value } = value else {
            return None;
        };
        let mut v = *value;
        if ui.checkbox(&mut v, label).changed() {
            Some(SettingValue::Bool { value: v })
        } else {
            None
        }
    }
}

struct IntEditor;

impl ValueEditor for IntEditor {
    fn kind(&self) -> &str {
        "int"
    }

    fn show(&self, ui: &mut egui::Ui, label: &str, value: &SettingValue) -> Option<SettingValue> {
        let SettingValue::Int { value, min, max } = value else {
            return None;
        };
        let mut v = *value;
        let changed = ui
            .add(egui::Slider::new(&mut v, *min..=*max).text(label))
            .changed();
        changed.then_some(SettingValue::Int {
            value: v,
            min: *min,
            max: *max,
        })
    }
}

struct FloatEditor;

impl ValueEditor for FloatEditor {
    fn kind(&self) -> &str {
        "float"
    }

    fn show(&self, ui: &mut egui::Ui, label: &str, value: &SettingValue) -> Option<SettingValue> {
        let SettingValue::Float { value, min, max } = value else {
            return None;
        };
        let mut v = *value;
        let changed = ui
            .add(egui::Slider::new(&mut v, *min..=*max).text(label))
            .changed();
        changed.then_some(SettingValue::Float {
            value: v,
            min: *min,
            max: *max,
        })
    }
}

struct ChoiceEditor;

impl ValueEditor for ChoiceEditor {
    fn kind(&self) -> &str {
        "choice"
    }

    fn show(&self, ui: &mut egui::Ui, label: &str, value: &SettingValue) -> Option<SettingValue> {
        let SettingValue::Choice { selected, options } = value else {
            return None;
        };
        let mut sel = (*selected).min(options.len().saturating_sub(1));
        let mut changed = false;
        ui.horizontal(|ui| {
            egui::ComboBox::from_id_source(ui.make_persistent_id(("choice", label)))
                .selected_text(options.get(sel).map(String::as_str).unwrap_or(""))
                .show_ui(ui, |ui| {
                    for (idx, option) in options.iter().enumerate() {
                        if ui.selectable_value(&mut sel, idx, option).changed() {
                            changed = true;
                        }
                    }
                });
            ui.label(label);
        });
        (changed || sel != *selected).then_some(SettingValue::Choice {
            selected: sel,
            options: options.clone(),
        })
    }
}

struct ColorEditor;

impl ValueEditor for ColorEditor {
    fn kind(&self) -> &str {
        "color"
    }

    fn show(&self, ui: &mut egui::Ui, label: &str, value: &SettingValue) -> Option<SettingValue> {
        let SettingValue::Color { rgb } = value else {
            return None;
        };
        let mut v = *rgb;
        let mut changed = false;
        ui.horizontal(|ui| {
            changed = ui.color_edit_button_rgb(&mut v).changed();
            ui.label(label);
        });
        changed.then_some(SettingValue::Color { rgb: v })
    }
}

struct CharEditor;

impl ValueEditor for CharEditor {
    fn kind(&self) -> &str {
        "char"
    }

    fn show(&self, ui: &mut egui::Ui, label: &str, value: &SettingValue) -> Option<SettingValue> {
        let SettingValue::Char { value } = value else {
            return None;
        };
        let mut text = value.to_string();
        let mut out = None;
        ui.horizontal(|ui| {
            let resp = ui.add(
                egui::TextEdit::singleline(&mut text)
                    .char_limit(1)
                    .desired_width(24.0),
            );
            ui.label(label);
            if resp.changed() {
                if let Some(c) = text.chars().next() {
                    if c != *value {
                        out = Some(SettingValue::Char { value: c });
                    }
                }
            }
        });
        out
    }
}
