use eframe::egui;
use hashlink::LinkedHashMap;
use module_hud::catalog::{GameModule, ModuleCatalog, ModuleId};
use module_hud::panels::{DragPayload, MoveRequest, Panel, PanelRegistry};
use module_hud::setting_values::ValueEditorRegistry;
use module_hud::settings::UiSettings;

fn demo_catalog() -> (ModuleCatalog, Vec<ModuleId>) {
    let mut catalog = ModuleCatalog::new();
    let ids = vec![
        catalog.register(GameModule::new("Sprint", "Movement", "")),
        catalog.register(GameModule::new("Step", "Movement", "")),
        catalog.register(GameModule::new("Zoom", "Render", "")),
        catalog.register(GameModule::new("Fullbright", "Render", "")),
    ];
    (catalog, ids)
}

fn panel_with(id: u64, groups: &[(&str, &[ModuleId])]) -> Panel {
    let mut map = LinkedHashMap::new();
    for (name, list) in groups {
        map.insert(name.to_string(), list.to_vec());
    }
    Panel::new(id, "test", map)
}

fn move_request(
    modules: &[ModuleId],
    source_panel: u64,
    source_group: &str,
    dest_panel: u64,
    dest_group: &str,
) -> MoveRequest {
    MoveRequest {
        payload: DragPayload {
            modules: modules.to_vec(),
            source_panel,
            source_group: source_group.to_string(),
        },
        dest_panel,
        dest_group: dest_group.to_string(),
    }
}

#[test]
fn defunct_rules() {
    let (_, ids) = demo_catalog();
    assert!(panel_with(1, &[]).defunct());
    assert!(panel_with(1, &[("G1", &[])]).defunct());
    assert!(!panel_with(1, &[("G1", &[ids[0]])]).defunct());
    // Several groups keep the panel alive even when one of them is empty.
    assert!(!panel_with(1, &[("A", &[]), ("B", &[ids[0]])]).defunct());
}

#[test]
fn move_between_groups_appends_to_destination() {
    let (_, ids) = demo_catalog();
    let (m1, m2, m3) = (ids[0], ids[1], ids[2]);
    let mut registry = PanelRegistry::default();
    registry
        .panels
        .push(panel_with(1, &[("A", &[m1, m2]), ("B", &[m3])]));

    registry.apply_move(move_request(&[m1], 1, "A", 1, "B"));

    let panel = registry.panel(1).unwrap();
    assert_eq!(panel.groups.get("A").unwrap(), &vec![m2]);
    assert_eq!(panel.groups.get("B").unwrap(), &vec![m3, m1]);
    assert_eq!(panel.module_count(), 3);
    assert!(!panel.defunct());
}

#[test]
fn move_total_count_is_invariant() {
    let (_, ids) = demo_catalog();
    let (m1, m2, m3) = (ids[0], ids[1], ids[2]);
    let mut registry = PanelRegistry::default();
    registry
        .panels
        .push(panel_with(1, &[("A", &[m1, m2]), ("B", &[m3])]));

    registry.apply_move(move_request(&[m1], 1, "A", 1, "B"));
    registry.apply_move(move_request(&[m3], 1, "B", 1, "A"));
    registry.apply_move(move_request(&[m2], 1, "A", 1, "B"));

    assert_eq!(registry.panel(1).unwrap().module_count(), 3);
}

#[test]
fn move_to_origin_group_is_a_noop() {
    let (_, ids) = demo_catalog();
    let (m1, m2) = (ids[0], ids[1]);
    let mut registry = PanelRegistry::default();
    registry.panels.push(panel_with(1, &[("A", &[m1, m2])]));

    registry.apply_move(move_request(&[m1], 1, "A", 1, "A"));

    // No removal, no re-append: order is untouched.
    assert_eq!(registry.panel(1).unwrap().groups.get("A").unwrap(), &vec![m1, m2]);
}

#[test]
fn stale_payload_moves_nothing() {
    let (_, ids) = demo_catalog();
    let (m1, m2, m3) = (ids[0], ids[1], ids[2]);
    let mut registry = PanelRegistry::default();
    registry
        .panels
        .push(panel_with(1, &[("A", &[m1]), ("B", &[m2])]));

    // m3 never was in A; nothing is removed and nothing is appended.
    registry.apply_move(move_request(&[m3], 1, "A", 1, "B"));

    let panel = registry.panel(1).unwrap();
    assert_eq!(panel.groups.get("A").unwrap(), &vec![m1]);
    assert_eq!(panel.groups.get("B").unwrap(), &vec![m2]);
}

#[test]
fn move_to_vanished_panel_leaves_origin_untouched() {
    let (_, ids) = demo_catalog();
    let m1 = ids[0];
    let mut registry = PanelRegistry::default();
    registry.panels.push(panel_with(1, &[("A", &[m1])]));

    registry.apply_move(move_request(&[m1], 1, "A", 99, "B"));

    assert_eq!(registry.panel(1).unwrap().groups.get("A").unwrap(), &vec![m1]);
}

#[test]
fn move_into_empty_group_refills_it() {
    let (_, ids) = demo_catalog();
    let (m1, m2) = (ids[0], ids[1]);
    let mut registry = PanelRegistry::default();
    registry
        .panels
        .push(panel_with(1, &[("A", &[m1, m2]), ("B", &[])]));

    registry.apply_move(move_request(&[m1], 1, "A", 1, "B"));

    let panel = registry.panel(1).unwrap();
    assert_eq!(panel.groups.get("B").unwrap(), &vec![m1]);
}

#[test]
fn cross_panel_move() {
    let (_, ids) = demo_catalog();
    let (m1, m2) = (ids[0], ids[1]);
    let mut registry = PanelRegistry::default();
    registry.panels.push(panel_with(1, &[("A", &[m1])]));
    registry.panels.push(panel_with(2, &[("G", &[m2])]));

    registry.apply_move(move_request(&[m1], 1, "A", 2, "G"));

    assert_eq!(registry.panel(1).unwrap().groups.get("A").unwrap(), &Vec::<ModuleId>::new());
    assert_eq!(registry.panel(2).unwrap().groups.get("G").unwrap(), &vec![m2, m1]);
    // The emptied single-group panel is now defunct.
    assert!(registry.panel(1).unwrap().defunct());
}

#[test]
fn standalone_panel_has_one_group_with_the_module() {
    let (_, ids) = demo_catalog();
    let panel = Panel::standalone(7, "Sprint", ids[0]);
    assert_eq!(panel.title, "Sprint");
    assert_eq!(panel.groups.len(), 1);
    assert_eq!(panel.groups.get("Group 1").unwrap(), &vec![ids[0]]);
    assert!(!panel.defunct());
}

#[test]
fn detach_empties_source_and_queues_panel_for_admission() {
    let (_, ids) = demo_catalog();
    let m1 = ids[0];
    let mut registry = PanelRegistry::default();
    registry.panels.push(panel_with(1, &[("G1", &[m1])]));

    // What the row does when "Detach" is picked mid-draw.
    let mut ops = registry.begin_frame();
    let standalone = Panel::standalone(ops.alloc_id(), "Sprint", m1);
    let source = registry.panel_mut(1).unwrap();
    source.groups.get_mut("G1").unwrap().retain(|m| *m != m1);
    ops.new_panels.push(standalone);

    assert!(registry.panel(1).unwrap().defunct());

    registry.finish_frame(ops);
    assert!(registry.pending.is_empty());
    let admitted = registry
        .panels
        .iter()
        .find(|p| p.title == "Sprint")
        .unwrap();
    assert_eq!(admitted.groups.get("Group 1").unwrap(), &vec![m1]);
}

#[test]
fn reset_partitions_catalog_by_category() {
    let (catalog, ids) = demo_catalog();
    let mut registry = PanelRegistry::new(&catalog);
    registry.panels.push(panel_with(50, &[("X", &[ids[0]])]));

    registry.reset(&catalog);

    assert_eq!(registry.panels.len(), 1);
    let panel = &registry.panels[0];
    assert_eq!(panel.title, "All modules");
    assert_eq!(panel.module_count(), catalog.len());
    // Every module appears exactly once, under its own category.
    for (mid, module) in catalog.entries() {
        let holders: Vec<_> = panel
            .groups
            .iter()
            .filter(|(_, list)| list.contains(&mid))
            .map(|(name, _)| name.clone())
            .collect();
        assert_eq!(holders, vec![module.category.clone()]);
    }
}

#[test]
fn render_frame_drops_defunct_and_admits_pending_after_the_pass() {
    let (mut catalog, ids) = demo_catalog();
    let prefs = UiSettings::default();
    let editors = ValueEditorRegistry::with_builtins();
    let mut registry = PanelRegistry::new(&catalog);
    registry.panels.push(panel_with(100, &[("Empty", &[])]));
    registry.pending.push(Panel::standalone(101, "Zoom", ids[2]));

    let ctx = egui::Context::default();
    let _ = ctx.run(egui::RawInput::default(), |ctx| {
        registry.render_frame(ctx, &mut catalog, &prefs, &editors);
    });

    assert!(registry.panel(100).is_none());
    assert!(registry.panel(101).is_some());
    assert!(registry.pending.is_empty());
    assert_eq!(registry.panels.len(), 2);

    // The admitted panel renders fine on the following frame.
    let _ = ctx.run(egui::RawInput::default(), |ctx| {
        registry.render_frame(ctx, &mut catalog, &prefs, &editors);
    });
    assert_eq!(registry.panels.len(), 2);
}

#[test]
fn closed_panel_is_removed_on_next_frame() {
    let (mut catalog, ids) = demo_catalog();
    let prefs = UiSettings::default();
    let editors = ValueEditorRegistry::with_builtins();
    let mut registry = PanelRegistry::default();
    registry.panels.push(panel_with(1, &[("G", &[ids[0]])]));
    registry.panel_mut(1).unwrap().closed = true;

    let ctx = egui::Context::default();
    let _ = ctx.run(egui::RawInput::default(), |ctx| {
        registry.render_frame(ctx, &mut catalog, &prefs, &editors);
    });
    assert!(registry.panels.is_empty());
}
