use crate::catalog::{ModuleCatalog, ModuleId};
use crate::setting_values::ValueEditorRegistry;
use crate::settings::UiSettings;
use eframe::egui;
use egui::collapsing_header::CollapsingState;
use hashlink::LinkedHashMap;

/// Snapshot of modules in transit during a drag gesture.
///
/// Published when a drag starts on a module row and consumed at most once by
/// the row it is dropped on, possibly several frames later. Stale payloads
/// (modules that left the origin group in the meantime) move nothing.
#[derive(Debug, Clone, PartialEq)]
pub struct DragPayload {
    pub modules: Vec<ModuleId>,
    pub source_panel: u64,
    pub source_group: String,
}

/// A drop accepted by a row, recorded for application after the render pass.
#[derive(Debug, Clone)]
pub struct MoveRequest {
    pub payload: DragPayload,
    pub dest_panel: u64,
    pub dest_group: String,
}

/// Mutations discovered while the panel set is being iterated.
///
/// Panels detached mid-frame and accepted drops both land here and are only
/// applied once the pass over the live panels has finished, so the collection
/// being iterated is never grown or cross-mutated under its own loop.
#[derive(Debug, Default)]
pub struct FrameOps {
    pub new_panels: Vec<Panel>,
    pub moves: Vec<MoveRequest>,
    next_id: u64,
}

impl FrameOps {
    pub fn seeded(next_id: u64) -> Self {
        Self {
            next_id,
            ..Default::default()
        }
    }

    pub fn alloc_id(&mut self) -> u64 {
        let id = self.next_id;
        self.next_id += 1;
        id
    }

    pub fn next_id(&self) -> u64 {
        self.next_id
    }
}

/// A movable overlay window holding named, ordered groups of modules.
#[derive(Debug, Clone)]
pub struct Panel {
    pub id: u64,
    pub title: String,
    /// Position requested for the first appearance only; afterwards the user
    /// moves the window freely.
    pub pos: Option<egui::Pos2>,
    pub groups: LinkedHashMap<String, Vec<ModuleId>>,
    pub closed: bool,
}

impl Panel {
    pub fn new(
        id: u64,
        title: impl Into<String>,
        groups: LinkedHashMap<String, Vec<ModuleId>>,
    ) -> Self {
        Self {
            id,
            title: title.into(),
            pos: None,
            groups,
            closed: false,
        }
    }

    /// The window produced by a detach action: one group, one module.
    pub fn standalone(id: u64, title: impl Into<String>, module: ModuleId) -> Self {
        let mut groups = LinkedHashMap::new();
        groups.insert("Group 1".to_string(), vec![module]);
        Self::new(id, title, groups)
    }

    /// The default window: every catalog module, grouped by category.
    pub fn all_modules(id: u64, catalog: &ModuleCatalog) -> Self {
        let mut groups: LinkedHashMap<String, Vec<ModuleId>> = LinkedHashMap::new();
        for (mid, module) in catalog.entries() {
            groups
                .entry(module.category.clone())
                .or_insert_with(Vec::new)
                .push(mid);
        }
        Self::new(id, "All modules", groups)
    }

    pub fn with_pos(mut self, pos: egui::Pos2) -> Self {
        self.pos = Some(pos);
        self
    }

    /// A panel with nothing left to render is removed by the registry.
    pub fn defunct(&self) -> bool {
        match self.groups.len() {
            0 => true,
            1 => self.groups.values().next().map_or(true, |g| g.is_empty()),
            _ => false,
        }
    }

    pub fn module_count(&self) -> usize {
        self.groups.values().map(Vec::len).sum()
    }

    /// Render this panel for one frame. Returns true when the registry
    /// should drop it: closed by the user, or defunct.
    pub fn draw(
        &mut self,
        ctx: &egui::Context,
        catalog: &mut ModuleCatalog,
        prefs: &UiSettings,
        editors: &ValueEditorRegistry,
        ops: &mut FrameOps,
    ) -> bool {
        if self.closed || self.defunct() {
            return true;
        }

        let panel_id = self.id;
        let mut open = true;
        let mut window = egui::Window::new(self.title.clone())
            .id(egui::Id::new(("hud-panel", panel_id)))
            .open(&mut open)
            .resizable(true)
            .default_width(200.0);
        if let Some(pos) = self.pos {
            window = window.default_pos(pos);
        }

        let groups = &mut self.groups;
        window.show(ctx, |ui| {
            if groups.len() == 1 {
                // A lone group is rendered flat, without its header.
                if let Some((name, list)) = groups.iter_mut().next() {
                    draw_group_rows(ui, catalog, panel_id, name, list, prefs, editors, ops);
                }
            } else {
                for (name, list) in groups.iter_mut() {
                    // Empty groups are skipped but kept; a drop may refill them.
                    if list.is_empty() {
                        continue;
                    }
                    egui::CollapsingHeader::new(name.as_str()).show(ui, |ui| {
                        draw_group_rows(ui, catalog, panel_id, name, list, prefs, editors, ops);
                    });
                }
            }
        });

        if !open {
            self.closed = true;
            tracing::debug!(panel = %self.title, "panel closed");
        }
        self.closed || self.defunct()
    }
}

#[allow(clippy::too_many_arguments)]
fn draw_group_rows(
    ui: &mut egui::Ui,
    catalog: &mut ModuleCatalog,
    panel_id: u64,
    group: &str,
    list: &mut Vec<ModuleId>,
    prefs: &UiSettings,
    editors: &ValueEditorRegistry,
    ops: &mut FrameOps,
) {
    let mut i = 0;
    while i < list.len() {
        let mid = list[i];
        match collapsible_module(ui, catalog, mid, panel_id, group, prefs, editors, ops) {
            Some(panel) => {
                // Detached: the row leaves this group now, the new panel is
                // admitted after the pass.
                list.remove(i);
                ops.new_panels.push(panel);
            }
            None => i += 1,
        }
    }
}

/// Render one module row. Returns the standalone panel when the user picked
/// "Detach" from the row's context menu.
///
/// The open/closed flag of the row is never toggled by the toolkit itself;
/// it lives in egui's retained widget storage under the row id and is
/// written back here, after the row has fully rendered, from the clicks
/// resolved this frame. Which button toggles the module and which opens the
/// settings follows the swap preference (only honoured outside popup mode).
#[allow(clippy::too_many_arguments)]
fn collapsible_module(
    ui: &mut egui::Ui,
    catalog: &mut ModuleCatalog,
    mid: ModuleId,
    panel_id: u64,
    group: &str,
    prefs: &UiSettings,
    editors: &ValueEditorRegistry,
    ops: &mut FrameOps,
) -> Option<Panel> {
    let module = catalog.get(mid)?;
    let name = module.name.clone();
    let enabled = module.enabled;

    let row_id = ui.make_persistent_id(("module-row", mid));
    let state = CollapsingState::load_with_default_open(ui.ctx(), row_id, false);
    let is_open = state.is_open();

    let mut detached = None;
    let header = state.show_header(ui, |ui| {
        let text = if enabled {
            egui::RichText::new(&name).strong()
        } else {
            egui::RichText::new(&name)
        };
        ui.add(egui::SelectableLabel::new(enabled, text))
    });
    let (_toggle, header_inner, _body) = header.body(|ui| {
        if !prefs.settings_in_popup {
            module_settings_body(ui, catalog, mid, prefs, editors);
        }
        drag_handle(ui, &name, mid, panel_id, group, row_id, ops, &mut detached);
    });
    let row = header_inner.inner;

    if prefs.settings_in_popup && is_open {
        egui::Window::new(&name)
            .id(row_id.with("settings-popup"))
            .collapsible(false)
            .default_width(220.0)
            .show(ui.ctx(), |ui| {
                module_settings_body(ui, catalog, mid, prefs, editors);
            });
    }

    // Open rows accept drops from other rows' drag handles.
    if is_open {
        if let Some(payload) = row.dnd_release_payload::<DragPayload>() {
            ops.moves.push(MoveRequest {
                payload: (*payload).clone(),
                dest_panel: panel_id,
                dest_group: group.to_string(),
            });
        }
    }

    let (toggle_button, open_button) = if prefs.effective_swap() {
        (egui::PointerButton::Primary, egui::PointerButton::Secondary)
    } else {
        (egui::PointerButton::Secondary, egui::PointerButton::Primary)
    };
    if row.clicked_by(toggle_button) {
        catalog.toggle(mid);
    } else if row.clicked_by(open_button) {
        let mut state = CollapsingState::load_with_default_open(ui.ctx(), row_id, false);
        state.set_open(!is_open);
        state.store(ui.ctx());
    }

    detached
}

fn module_settings_body(
    ui: &mut egui::Ui,
    catalog: &mut ModuleCatalog,
    mid: ModuleId,
    prefs: &UiSettings,
    editors: &ValueEditorRegistry,
) {
    let Some(module) = catalog.get_mut(mid) else {
        return;
    };
    if !prefs.hide_module_descriptions && !module.description.is_empty() {
        ui.label(egui::RichText::new(&module.description).weak());
    }
    for setting in module.settings.iter_mut() {
        editors.show(ui, &setting.name, &mut setting.value);
    }
}

#[allow(clippy::too_many_arguments)]
fn drag_handle(
    ui: &mut egui::Ui,
    name: &str,
    mid: ModuleId,
    panel_id: u64,
    group: &str,
    row_id: egui::Id,
    ops: &mut FrameOps,
    detached: &mut Option<Panel>,
) {
    let payload = DragPayload {
        modules: vec![mid],
        source_panel: panel_id,
        source_group: group.to_string(),
    };
    let drag = ui.dnd_drag_source(row_id.with("drag"), payload, |ui| {
        ui.small("Merge");
    });
    drag.response.context_menu(|ui| {
        if ui.button("Detach").clicked() {
            *detached = Some(Panel::standalone(ops.alloc_id(), name.to_string(), mid));
            ui.close_menu();
        }
    });
}

/// The live set of overlay panels.
#[derive(Debug, Default)]
pub struct PanelRegistry {
    pub panels: Vec<Panel>,
    /// Panels created during the current frame, admitted after the pass.
    pub pending: Vec<Panel>,
    next_id: u64,
}

impl PanelRegistry {
    pub fn new(catalog: &ModuleCatalog) -> Self {
        let mut registry = Self::default();
        registry.reset(catalog);
        registry
    }

    fn alloc_id(&mut self) -> u64 {
        let id = self.next_id;
        self.next_id += 1;
        id
    }

    /// Discard every panel and rebuild the single default window.
    pub fn reset(&mut self, catalog: &ModuleCatalog) {
        self.panels.clear();
        self.pending.clear();
        let id = self.alloc_id();
        self.panels.push(Panel::all_modules(id, catalog));
        tracing::debug!("panel registry reset to default layout");
    }

    pub fn panel(&self, id: u64) -> Option<&Panel> {
        self.panels.iter().find(|p| p.id == id)
    }

    pub fn panel_mut(&mut self, id: u64) -> Option<&mut Panel> {
        self.panels.iter_mut().find(|p| p.id == id)
    }

    pub fn begin_frame(&self) -> FrameOps {
        FrameOps::seeded(self.next_id)
    }

    /// Draw every live panel, dropping the ones whose draw reports removal,
    /// then commit the frame's deferred mutations. Panels created this frame
    /// are merged in last and first rendered on the next frame.
    pub fn render_frame(
        &mut self,
        ctx: &egui::Context,
        catalog: &mut ModuleCatalog,
        prefs: &UiSettings,
        editors: &ValueEditorRegistry,
    ) {
        let mut ops = self.begin_frame();
        self.panels
            .retain_mut(|panel| !panel.draw(ctx, catalog, prefs, editors, &mut ops));
        self.finish_frame(ops);
    }

    /// Apply a finished pass's deferred mutations: moves first, then the
    /// admission of newly detached panels.
    pub fn finish_frame(&mut self, mut ops: FrameOps) {
        self.next_id = ops.next_id();
        for request in ops.moves.drain(..) {
            self.apply_move(request);
        }
        self.pending.append(&mut ops.new_panels);
        self.admit_pending();
    }

    pub fn admit_pending(&mut self) {
        self.panels.append(&mut self.pending);
    }

    /// Transfer the payload's modules to the destination group.
    ///
    /// Dropping back onto the origin group is a no-op (no reorder). Only
    /// modules actually found in the origin group are appended, so a stale
    /// payload can never duplicate a module, and a vanished destination
    /// panel leaves everything untouched.
    pub fn apply_move(&mut self, request: MoveRequest) {
        let MoveRequest {
            payload,
            dest_panel,
            dest_group,
        } = request;
        if payload.source_panel == dest_panel && payload.source_group == dest_group {
            return;
        }
        if self.panel(dest_panel).is_none() {
            return;
        }

        let mut moved = Vec::new();
        if let Some(source) = self.panel_mut(payload.source_panel) {
            if let Some(group) = source.groups.get_mut(&payload.source_group) {
                for mid in &payload.modules {
                    if let Some(pos) = group.iter().position(|m| m == mid) {
                        group.remove(pos);
                        moved.push(*mid);
                    }
                }
            }
        }
        if moved.is_empty() {
            return;
        }
        if let Some(dest) = self.panel_mut(dest_panel) {
            dest.groups
                .entry(dest_group)
                .or_insert_with(Vec::new)
                .extend(moved);
        }
    }
}
