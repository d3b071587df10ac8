use std::cell::RefCell;
use std::rc::Rc;

use trellis::{
    color, ActorId, ButtonStyle, Change, ChangeEvent, ClickOutcome, Drawable, Edges, Error,
    LabelStyle, PointerEvent, Skin, SolidDrawable, Stage,
};

fn solid(width: f32, height: f32) -> Rc<dyn Drawable> {
    Rc::new(SolidDrawable::new(color::white()).with_min_size(width, height))
}

fn same(a: Option<&Rc<dyn Drawable>>, b: &Rc<dyn Drawable>) -> bool {
    a.is_some_and(|a| std::ptr::addr_eq(Rc::as_ptr(a), Rc::as_ptr(b)))
}

/// A 20x10 root button at the origin.
fn root_button(stage: &mut Stage) -> ActorId {
    let style = ButtonStyle::new().up(solid(20.0, 10.0));
    let button = stage.new_button(style);
    stage.add_root(button).unwrap();
    button
}

fn record_changes(stage: &mut Stage, button: ActorId, answer: Change) -> Rc<RefCell<Vec<ChangeEvent>>> {
    let seen = Rc::new(RefCell::new(Vec::new()));
    let log = Rc::clone(&seen);
    stage
        .on_change(button, move |event| {
            log.borrow_mut().push(*event);
            answer
        })
        .unwrap();
    seen
}

// ============================================================================
// Press and Click
// ============================================================================

#[test]
fn test_press_then_release_inside_toggles() {
    let mut stage = Stage::new();
    let button = root_button(&mut stage);
    let seen = record_changes(&mut stage, button, Change::Keep);

    assert_eq!(stage.pointer_down(5.0, 5.0), Some(button));
    assert!(stage.is_pressed(button));
    assert_eq!(stage.pointer_up(5.0, 5.0), Some(ClickOutcome::Toggled(true)));

    assert!(stage.is_checked(button));
    assert!(!stage.is_pressed(button));
    assert_eq!(
        *seen.borrow(),
        vec![ChangeEvent {
            button,
            checked: true
        }]
    );
}

#[test]
fn test_second_click_unchecks() {
    let mut stage = Stage::new();
    let button = root_button(&mut stage);

    stage.pointer_down(5.0, 5.0);
    stage.pointer_up(5.0, 5.0);
    stage.pointer_down(5.0, 5.0);
    assert_eq!(stage.pointer_up(5.0, 5.0), Some(ClickOutcome::Toggled(false)));
    assert!(!stage.is_checked(button));
}

#[test]
fn test_veto_rolls_back() {
    let mut stage = Stage::new();
    let button = root_button(&mut stage);
    let seen = record_changes(&mut stage, button, Change::Veto);

    stage.pointer_down(5.0, 5.0);
    assert_eq!(stage.pointer_up(5.0, 5.0), Some(ClickOutcome::Vetoed));

    assert!(!stage.is_checked(button));
    assert_eq!(seen.borrow().len(), 1);
}

#[test]
fn test_every_observer_sees_the_change() {
    let mut stage = Stage::new();
    let button = root_button(&mut stage);
    let first = record_changes(&mut stage, button, Change::Veto);
    let second = record_changes(&mut stage, button, Change::Keep);

    assert_eq!(stage.click(button).unwrap(), ClickOutcome::Vetoed);
    assert_eq!(first.borrow().len(), 1);
    assert_eq!(second.borrow().len(), 1);
}

#[test]
fn test_release_outside_cancels() {
    let mut stage = Stage::new();
    let button = root_button(&mut stage);
    let seen = record_changes(&mut stage, button, Change::Keep);

    stage.pointer_down(5.0, 5.0);
    stage.pointer_moved(50.0, 5.0);
    assert!(!stage.is_pressed(button), "pressed needs the pointer over the button");

    assert_eq!(stage.pointer_up(50.0, 5.0), Some(ClickOutcome::Cancelled));
    assert!(!stage.is_checked(button));
    assert!(seen.borrow().is_empty());
}

#[test]
fn test_moving_back_inside_restores_press() {
    let mut stage = Stage::new();
    let button = root_button(&mut stage);

    stage.pointer_down(5.0, 5.0);
    stage.pointer_moved(50.0, 5.0);
    stage.pointer_moved(6.0, 6.0);
    assert!(stage.is_pressed(button));
    assert_eq!(stage.pointer_up(6.0, 6.0), Some(ClickOutcome::Toggled(true)));
}

#[test]
fn test_cancel_ends_press() {
    let mut stage = Stage::new();
    let button = root_button(&mut stage);

    stage.handle(PointerEvent::Down { x: 5.0, y: 5.0 });
    assert!(stage.is_pressed(button));
    assert_eq!(
        stage.handle(PointerEvent::Cancel),
        Some(ClickOutcome::Cancelled)
    );
    assert!(!stage.is_pressed(button));
    assert!(!stage.is_checked(button));
    assert_eq!(stage.handle(PointerEvent::Up { x: 5.0, y: 5.0 }), None);
}

#[test]
fn test_pointer_outside_any_button() {
    let mut stage = Stage::new();
    root_button(&mut stage);

    assert_eq!(stage.pointer_down(100.0, 100.0), None);
    assert_eq!(stage.pointer_up(100.0, 100.0), None);
}

#[test]
fn test_press_on_child_reaches_button() {
    let mut stage = Stage::new();
    let caption = stage.new_label("press me", LabelStyle::default());
    let button = stage.new_button_with(caption, ButtonStyle::new()).unwrap();
    stage.add_root(button).unwrap();
    stage.validate();

    assert_eq!(stage.hit(1.0, 0.5), Some(caption));
    assert_eq!(stage.pointer_down(1.0, 0.5), Some(button));
}

#[test]
fn test_untouchable_button_ignores_pointer() {
    let mut stage = Stage::new();
    let button = root_button(&mut stage);
    stage.set_touchable(button, false).unwrap();

    assert_eq!(stage.pointer_down(5.0, 5.0), None);
}

#[test]
fn test_mouse_events_translate() {
    use crossterm::event::{KeyModifiers, MouseButton, MouseEvent, MouseEventKind};

    let mouse = |kind| MouseEvent {
        kind,
        column: 3,
        row: 4,
        modifiers: KeyModifiers::NONE,
    };
    assert_eq!(
        PointerEvent::from_mouse(mouse(MouseEventKind::Down(MouseButton::Left))),
        Some(PointerEvent::Down { x: 3.0, y: 4.0 })
    );
    assert_eq!(
        PointerEvent::from_mouse(mouse(MouseEventKind::Drag(MouseButton::Left))),
        Some(PointerEvent::Moved { x: 3.0, y: 4.0 })
    );
    assert_eq!(
        PointerEvent::from_mouse(mouse(MouseEventKind::Down(MouseButton::Right))),
        None
    );
}

// ============================================================================
// Checked State
// ============================================================================

#[test]
fn test_set_checked_does_not_notify() {
    let mut stage = Stage::new();
    let button = root_button(&mut stage);
    let seen = record_changes(&mut stage, button, Change::Veto);

    assert!(stage.set_checked(button, true).unwrap());
    assert!(stage.is_checked(button));
    assert!(seen.borrow().is_empty());
}

#[test]
fn test_button_ops_reject_other_widgets() {
    let mut stage = Stage::new();
    let table = stage.new_table();

    assert!(matches!(
        stage.set_checked(table, true),
        Err(Error::WrongWidget { expected: "button", .. })
    ));
    assert!(!stage.is_checked(table));
}

// ============================================================================
// Style
// ============================================================================

#[test]
fn test_pref_size_floored_by_style_drawables() {
    let mut stage = Stage::new();
    let content = stage.new_label(&"x".repeat(20), LabelStyle::default());
    let style = ButtonStyle::new()
        .up(solid(40.0, 1.0))
        .checked(solid(60.0, 1.0));
    let button = stage.new_button_with(content, style).unwrap();

    assert_eq!(stage.pref_width(button), 60.0);
    assert_eq!(stage.min_width(button), 60.0, "min equals pref");
}

#[test]
fn test_new_button_is_sized_to_pref() {
    let mut stage = Stage::new();
    let button = root_button(&mut stage);
    let actor = stage.actor(button).unwrap();
    assert_eq!((actor.width(), actor.height()), (20.0, 10.0));
}

#[test]
fn test_style_resolution_order() {
    let up = solid(1.0, 1.0);
    let down = solid(1.0, 1.0);
    let checked = solid(1.0, 1.0);
    let style = ButtonStyle::new()
        .up(Rc::clone(&up))
        .down(Rc::clone(&down))
        .checked(Rc::clone(&checked))
        .pressed_offset(1.0, 2.0)
        .unpressed_offset(0.5, 0.5);

    let (drawable, offset) = style.resolve(true, true);
    assert!(same(drawable.as_ref(), &down));
    assert_eq!(offset, (1.0, 2.0));

    let (drawable, offset) = style.resolve(false, true);
    assert!(same(drawable.as_ref(), &checked));
    assert_eq!(offset, (0.5, 0.5));

    let (drawable, _) = style.resolve(false, false);
    assert!(same(drawable.as_ref(), &up));
}

#[test]
fn test_missing_drawables_fall_back() {
    let up = solid(1.0, 1.0);
    let style = ButtonStyle::new().up(Rc::clone(&up)).pressed_offset(1.0, 1.0);

    let (drawable, offset) = style.resolve(true, true);
    assert!(same(drawable.as_ref(), &up));
    assert_eq!(offset, (0.0, 0.0), "no down drawable means no pressed offset");

    let (drawable, _) = ButtonStyle::new().resolve(true, false);
    assert!(drawable.is_none());
}

#[test]
fn test_set_style_rederives_background() {
    let mut stage = Stage::new();
    let first = solid(10.0, 10.0);
    let button = stage.new_button(ButtonStyle::new().up(Rc::clone(&first)));
    let background = stage.table(button).unwrap().background();
    assert!(same(background, &first));

    let padded: Rc<dyn Drawable> = Rc::new(
        SolidDrawable::new(color::white())
            .with_min_size(30.0, 30.0)
            .with_insets(Edges::all(3.0)),
    );
    stage
        .set_style(button, ButtonStyle::new().up(Rc::clone(&padded)))
        .unwrap();

    let table = stage.table(button).unwrap();
    assert!(same(table.background(), &padded));
    assert_eq!(table.layout().pad(), Edges::all(3.0));
    assert_eq!(stage.pref_width(button), 30.0);
}

#[test]
fn test_checked_background_follows_state_on_draw() {
    let mut stage = Stage::new();
    let up = solid(5.0, 5.0);
    let checked = solid(5.0, 5.0);
    let button = stage.new_button(
        ButtonStyle::new()
            .up(Rc::clone(&up))
            .checked(Rc::clone(&checked)),
    );
    stage.add_root(button).unwrap();

    stage.set_checked(button, true).unwrap();
    stage.draw(&mut trellis::RecordingBatch::new());
    assert!(same(stage.table(button).unwrap().background(), &checked));

    stage.set_checked(button, false).unwrap();
    stage.refresh_button(button).unwrap();
    assert!(same(stage.table(button).unwrap().background(), &up));
}

#[test]
fn test_button_from_skin() {
    let mut stage = Stage::new();
    let skin = Skin::new().with("default", ButtonStyle::new().up(solid(8.0, 2.0)));
    let button = stage.button_from_skin(&skin).unwrap();
    assert_eq!(stage.pref_width(button), 8.0);

    let err = stage.button_from_skin(&Skin::new()).unwrap_err();
    assert!(matches!(err, Error::StyleNotFound { ref name, .. } if name == "default"));
}
