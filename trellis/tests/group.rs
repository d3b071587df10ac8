use std::cell::Cell;
use std::rc::Rc;

use trellis::{ActorId, ButtonStyle, Change, ClickOutcome, Error, GroupId, Stage};

fn buttons(stage: &mut Stage, count: usize) -> Vec<ActorId> {
    (0..count)
        .map(|_| stage.new_button(ButtonStyle::new()))
        .collect()
}

// ============================================================================
// Bounds
// ============================================================================

#[test]
fn test_radio_group_refuses_second_check() {
    let mut stage = Stage::new();
    let group = stage.new_group();
    let members = buttons(&mut stage, 2);
    let (a, b) = (members[0], members[1]);
    stage.group_add(group, a).unwrap();
    stage.group_add(group, b).unwrap();
    assert!(stage.set_checked(a, true).unwrap());

    assert_eq!(stage.click(b).unwrap(), ClickOutcome::Refused);
    assert!(stage.is_checked(a), "group does not uncheck siblings");
    assert!(!stage.is_checked(b));
}

#[test]
fn test_min_keeps_last_checked() {
    let mut stage = Stage::new();
    let group = stage.new_group();
    let members = buttons(&mut stage, 2);
    let (a, b) = (members[0], members[1]);
    stage.group_add(group, a).unwrap();
    stage.group_add(group, b).unwrap();
    stage.set_checked(a, true).unwrap();

    assert_eq!(stage.click(a).unwrap(), ClickOutcome::Refused);
    assert!(stage.is_checked(a));
    assert!(!stage.set_checked(a, false).unwrap());
    assert!(stage.is_checked(a));
}

#[test]
fn test_check_within_max_keeps_siblings() {
    let mut stage = Stage::new();
    let group = stage.new_group_with(1, 2);
    let members = buttons(&mut stage, 3);
    for member in &members {
        stage.group_add(group, *member).unwrap();
    }
    let (a, b, c) = (members[0], members[1], members[2]);
    stage.set_checked(a, true).unwrap();

    assert_eq!(stage.click(b).unwrap(), ClickOutcome::Toggled(true));
    assert!(stage.is_checked(a), "no automatic uncheck");
    assert_eq!(stage.checked_in(group).unwrap(), vec![a, b]);

    assert_eq!(stage.click(c).unwrap(), ClickOutcome::Refused);
    assert_eq!(stage.click(a).unwrap(), ClickOutcome::Toggled(false));
    assert_eq!(stage.click(b).unwrap(), ClickOutcome::Refused);
}

#[test]
fn test_refusal_fires_no_notification() {
    let mut stage = Stage::new();
    let group = stage.new_group();
    let members = buttons(&mut stage, 2);
    let (a, b) = (members[0], members[1]);
    stage.group_add(group, a).unwrap();
    stage.group_add(group, b).unwrap();
    stage.set_checked(a, true).unwrap();

    let calls = Rc::new(Cell::new(0));
    let counter = Rc::clone(&calls);
    stage
        .on_change(b, move |_| {
            counter.set(counter.get() + 1);
            Change::Keep
        })
        .unwrap();

    stage.click(b).unwrap();
    assert_eq!(calls.get(), 0);
}

#[test]
fn test_veto_rollback_skips_group() {
    let mut stage = Stage::new();
    let group = stage.new_group();
    let a = stage.new_button(ButtonStyle::new());
    stage.group_add(group, a).unwrap();
    stage.on_change(a, |_| Change::Veto).unwrap();

    // Unchecking would break the group minimum, but the rollback is not asked.
    assert_eq!(stage.click(a).unwrap(), ClickOutcome::Vetoed);
    assert!(!stage.is_checked(a));
}

#[test]
fn test_set_group_bounds() {
    let mut stage = Stage::new();
    let group = stage.new_group();
    let members = buttons(&mut stage, 2);
    let (a, b) = (members[0], members[1]);
    stage.group_add(group, a).unwrap();
    stage.group_add(group, b).unwrap();
    stage.set_checked(a, true).unwrap();

    stage.set_group_bounds(group, 0, 2).unwrap();
    assert!(stage.set_checked(b, true).unwrap());
    assert!(stage.set_checked(a, false).unwrap());
    assert!(stage.set_checked(b, false).unwrap());

    let bounds = stage.button_group(group).unwrap();
    assert_eq!((bounds.min_checked(), bounds.max_checked()), (0, 2));
}

// ============================================================================
// Membership
// ============================================================================

#[test]
fn test_button_joins_one_group_at_a_time() {
    let mut stage = Stage::new();
    let first = stage.new_group();
    let second = stage.new_group();
    let a = stage.new_button(ButtonStyle::new());

    stage.group_add(first, a).unwrap();
    stage.group_add(second, a).unwrap();

    assert_eq!(stage.group(a), Some(second));
    assert!(stage.button_group(first).unwrap().buttons().is_empty());
    assert_eq!(stage.button_group(second).unwrap().buttons(), &[a]);
}

#[test]
fn test_group_remove() {
    let mut stage = Stage::new();
    let group = stage.new_group();
    let a = stage.new_button(ButtonStyle::new());
    stage.group_add(group, a).unwrap();

    stage.group_remove(group, a).unwrap();
    assert_eq!(stage.group(a), None);
    assert!(stage.set_checked(a, true).unwrap());
    assert!(stage.set_checked(a, false).unwrap(), "no group, no minimum");
}

#[test]
fn test_despawned_button_leaves_group() {
    let mut stage = Stage::new();
    let group = stage.new_group();
    let members = buttons(&mut stage, 2);
    stage.group_add(group, members[0]).unwrap();
    stage.group_add(group, members[1]).unwrap();

    stage.remove(members[0]).unwrap();
    assert_eq!(stage.button_group(group).unwrap().buttons(), &[members[1]]);
}

#[test]
fn test_unknown_group() {
    let mut stage = Stage::new();
    let a = stage.new_button(ButtonStyle::new());
    let missing = GroupId::default();

    assert!(matches!(
        stage.group_add(missing, a),
        Err(Error::UnknownGroup(id)) if id == missing
    ));
    assert!(stage.checked_in(missing).is_err());
}

#[test]
fn test_only_buttons_join_groups() {
    let mut stage = Stage::new();
    let group = stage.new_group();
    let table = stage.new_table();

    assert!(matches!(
        stage.group_add(group, table),
        Err(Error::WrongWidget { .. })
    ));
}
