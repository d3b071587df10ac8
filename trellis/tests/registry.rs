use trellis::{CellRef, Error, LabelStyle, Stage};

fn label(stage: &mut Stage, text: &str) -> trellis::ActorId {
    stage.new_label(text, LabelStyle::default())
}

// ============================================================================
// Registered Names
// ============================================================================

#[test]
fn test_register_and_lookup() {
    let mut stage = Stage::new();
    let table = stage.new_table();
    let ok = label(&mut stage, "ok");
    stage.add(table, Some(ok)).unwrap();

    assert_eq!(stage.register(table, "ok", ok).unwrap(), ok);
    assert_eq!(stage.widget(table, "ok"), Some(ok));
    assert_eq!(stage.widget(table, "cancel"), None);
}

#[test]
fn test_duplicate_name_is_rejected() {
    let mut stage = Stage::new();
    let table = stage.new_table();
    let a = label(&mut stage, "a");
    let b = label(&mut stage, "b");
    stage.register(table, "name", a).unwrap();

    let err = stage.register(table, "name", b).unwrap_err();
    assert!(matches!(err, Error::DuplicateName(ref name) if name == "name"));
    assert_eq!(stage.widget(table, "name"), Some(a));
}

#[test]
fn test_same_name_allowed_in_different_tables() {
    let mut stage = Stage::new();
    let first = stage.new_table();
    let second = stage.new_table();
    let a = label(&mut stage, "a");
    let b = label(&mut stage, "b");

    stage.register(first, "title", a).unwrap();
    stage.register(second, "title", b).unwrap();
    assert_eq!(stage.widget(second, "title"), Some(b));
}

#[test]
fn test_widgets_by_prefix_sorted() {
    let mut stage = Stage::new();
    let table = stage.new_table();
    let b = label(&mut stage, "b");
    let a = label(&mut stage, "a");
    let other = label(&mut stage, "other");
    stage.register(table, "btn_b", b).unwrap();
    stage.register(table, "btn_a", a).unwrap();
    stage.register(table, "other", other).unwrap();

    assert_eq!(stage.widgets(table, "btn_"), vec![a, b]);
    assert!(stage.widgets(table, "missing").is_empty());
}

#[test]
fn test_removed_actor_is_unregistered() {
    let mut stage = Stage::new();
    let table = stage.new_table();
    let a = label(&mut stage, "a");
    stage.add(table, Some(a)).unwrap();
    stage.register(table, "a", a).unwrap();

    stage.remove(a).unwrap();
    assert_eq!(stage.widget(table, "a"), None);
}

#[test]
fn test_removed_nested_actor_is_unregistered() {
    let mut stage = Stage::new();
    let outer = stage.new_table();
    let inner = stage.new_table();
    stage.add(outer, Some(inner)).unwrap();
    let leaf = label(&mut stage, "leaf");
    stage.add(inner, Some(leaf)).unwrap();
    stage.register(outer, "leaf", leaf).unwrap();

    stage.remove(leaf).unwrap();
    assert_eq!(stage.widget(outer, "leaf"), None);
    assert!(stage.widgets(outer, "").is_empty());
}

#[test]
fn test_removing_nested_table_unregisters_its_subtree() {
    let mut stage = Stage::new();
    let outer = stage.new_table();
    let inner = stage.new_table();
    stage.add(outer, Some(inner)).unwrap();
    let leaf = label(&mut stage, "leaf");
    stage.add(inner, Some(leaf)).unwrap();
    stage.register(outer, "inner", inner).unwrap();
    stage.register(outer, "leaf", leaf).unwrap();

    stage.remove(inner).unwrap();
    assert_eq!(stage.widget(outer, "inner"), None);
    assert_eq!(stage.widget(outer, "leaf"), None);
    stage.register(outer, "leaf", outer).unwrap();
}

// ============================================================================
// Named Cells
// ============================================================================

#[test]
fn test_cell_named() {
    let mut stage = Stage::new();
    let table = stage.new_table();
    let a = label(&mut stage, "a");
    let title = label(&mut stage, "title");
    stage.add(table, Some(a)).unwrap();
    stage.add(table, Some(title)).unwrap().named("title");

    assert_eq!(
        stage.cell_named(table, "title"),
        Some(CellRef { table, index: 1 })
    );
    assert_eq!(stage.widget(table, "title"), Some(title), "cell names resolve too");
    assert_eq!(stage.cell_named(table, "body"), None);
}

#[test]
fn test_all_cells_by_prefix() {
    let mut stage = Stage::new();
    let outer = stage.new_table();
    let inner = stage.new_table();
    stage.add(outer, None).unwrap().named("field_name");
    stage.add(outer, Some(inner)).unwrap();
    stage.add(inner, None).unwrap().named("field_value");
    stage.add(inner, None).unwrap().named("footer");

    assert_eq!(
        stage.all_cells(outer, "field_"),
        vec![
            CellRef {
                table: outer,
                index: 0
            },
            CellRef {
                table: inner,
                index: 0
            },
        ]
    );
    assert!(stage.all_cells(outer, "nothing").is_empty());
}

#[test]
fn test_widgets_include_cell_names() {
    let mut stage = Stage::new();
    let table = stage.new_table();
    let registered = label(&mut stage, "registered");
    let celled = label(&mut stage, "celled");
    let both = label(&mut stage, "both");
    stage.add(table, Some(registered)).unwrap();
    stage.add(table, Some(celled)).unwrap().named("ok_b");
    stage.add(table, Some(both)).unwrap().named("ok_c");
    stage.register(table, "ok_a", registered).unwrap();
    stage.register(table, "ok_d", both).unwrap();

    assert_eq!(stage.widget(table, "ok_b"), Some(celled));
    assert_eq!(stage.widgets(table, "ok_"), vec![registered, celled, both]);
    assert_eq!(stage.widgets(table, "ok_b"), vec![celled]);
}

#[test]
fn test_all_cells_with_empty_prefix_lists_every_cell() {
    let mut stage = Stage::new();
    let outer = stage.new_table();
    let inner = stage.new_table();
    stage.add(outer, None).unwrap().named("title");
    stage.add(outer, Some(inner)).unwrap();
    stage.add(inner, None).unwrap();

    assert_eq!(
        stage.all_cells(outer, ""),
        vec![
            CellRef {
                table: outer,
                index: 0
            },
            CellRef {
                table: outer,
                index: 1
            },
            CellRef {
                table: inner,
                index: 0
            },
        ]
    );
}

#[test]
fn test_set_widget_fills_named_cell() {
    let mut stage = Stage::new();
    let table = stage.new_table();
    stage.add(table, None).unwrap().named("slot");
    let content = label(&mut stage, "content");

    assert!(stage.set_widget(table, "slot", content).unwrap());
    assert_eq!(stage.cells(table)[0].actor(), Some(content));
    assert_eq!(stage.parent(content), Some(table));
    assert_eq!(stage.pref_width(table), 7.0);

    let other = label(&mut stage, "x");
    assert!(!stage.set_widget(table, "missing", other).unwrap());
}

#[test]
fn test_set_widget_replaces_previous_actor() {
    let mut stage = Stage::new();
    let table = stage.new_table();
    let old = label(&mut stage, "old");
    stage.add(table, Some(old)).unwrap().named("slot");
    let new = label(&mut stage, "new!");

    assert!(stage.set_widget(table, "slot", new).unwrap());
    assert_eq!(stage.cells(table)[0].actor(), Some(new));
    assert_eq!(stage.parent(old), None);
    assert!(stage.actor(old).is_some(), "previous actor is only detached");
    assert_eq!(stage.pref_width(table), 4.0);
}

// ============================================================================
// Nested Scopes
// ============================================================================

#[test]
fn test_lookup_searches_nested_tables() {
    let mut stage = Stage::new();
    let outer = stage.new_table();
    let inner = stage.new_table();
    stage.add(outer, Some(inner)).unwrap();
    let deep = label(&mut stage, "deep");
    stage.add(inner, Some(deep)).unwrap();
    stage.register(inner, "deep", deep).unwrap();

    assert_eq!(stage.widget(outer, "deep"), Some(deep));
    assert_eq!(stage.widget(inner, "deep"), Some(deep));
    assert_eq!(
        stage.cell_of(outer, deep),
        Some(CellRef {
            table: inner,
            index: 0
        })
    );
}

#[test]
fn test_own_scope_wins_over_nested() {
    let mut stage = Stage::new();
    let outer = stage.new_table();
    let inner = stage.new_table();
    stage.add(outer, Some(inner)).unwrap();
    let near = label(&mut stage, "near");
    let far = label(&mut stage, "far");
    stage.add(outer, Some(near)).unwrap();
    stage.add(inner, Some(far)).unwrap();
    stage.register(outer, "x", near).unwrap();
    stage.register(inner, "x", far).unwrap();

    assert_eq!(stage.widget(outer, "x"), Some(near));
}

#[test]
fn test_nested_search_is_depth_first_in_cell_order() {
    let mut stage = Stage::new();
    let outer = stage.new_table();
    let first = stage.new_table();
    let first_nested = stage.new_table();
    let second = stage.new_table();
    stage.add(outer, Some(first)).unwrap();
    stage.add(outer, Some(second)).unwrap();
    stage.add(first, Some(first_nested)).unwrap();

    let deep = label(&mut stage, "deep");
    let shallow = label(&mut stage, "shallow");
    stage.add(first_nested, Some(deep)).unwrap();
    stage.add(second, Some(shallow)).unwrap();
    stage.register(first_nested, "n", deep).unwrap();
    stage.register(second, "n", shallow).unwrap();

    assert_eq!(stage.widget(outer, "n"), Some(deep));
    assert_eq!(stage.widgets(outer, "n"), vec![deep, shallow]);
}

#[test]
fn test_lookup_descends_into_buttons() {
    let mut stage = Stage::new();
    let table = stage.new_table();
    let caption = label(&mut stage, "caption");
    let button = stage
        .new_button_with(caption, trellis::ButtonStyle::new())
        .unwrap();
    stage.add(table, Some(button)).unwrap();
    stage.register(button, "caption", caption).unwrap();

    assert_eq!(stage.widget(table, "caption"), Some(caption));
}

#[test]
fn test_lookups_on_non_table_miss() {
    let mut stage = Stage::new();
    let plain = label(&mut stage, "plain");

    assert_eq!(stage.widget(plain, "x"), None);
    assert!(stage.widgets(plain, "").is_empty());
    assert_eq!(stage.cell_of(plain, plain), None);
    assert!(stage.cells(plain).is_empty());
    assert!(matches!(
        stage.register(plain, "x", plain),
        Err(Error::WrongWidget { .. })
    ));
}
