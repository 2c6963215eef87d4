//! Property-based invariant tests for directional navigation and key dispatch.
//!
//! 1. Without a focus item, no direction yields a candidate.
//! 2. A result is never the focus item, never selected, and always
//!    focusable and visible.
//! 3. A result comes from the strict pass when that pass is non-empty,
//!    otherwise from the loose pass.
//! 4. No eligible survivor of the chosen pass is strictly closer.
//! 5. Ctrl+Arrow moves exactly the selected movable items, by one step.
//! 6. Random focus is a pure function of seed and scene.
//! 7. A plain arrow that navigates leaves exactly the target selected and
//!    focused.

use kfview_core::event::{KeyCode, KeyEvent, Modifiers};
use kfview_core::geometry::{Direction, Point};
use kfview_widgets::focus::spatial::{
    closest, find_next_with, look, loose_predicate, strict_predicate,
};
use kfview_widgets::{
    ConePolicy, Item, ItemFlags, ItemId, KeyboardFriendlyView, Scene, ViewAction, ViewConfig,
};
use proptest::prelude::*;

// ── Strategies ────────────────────────────────────────────────────────────

#[derive(Debug, Clone)]
struct ItemSpec {
    x: i32,
    y: i32,
    flags: u8,
    visible: bool,
    selected: bool,
}

fn item_strategy() -> impl Strategy<Value = ItemSpec> {
    (
        -50i32..=50,
        -50i32..=50,
        0u8..8,
        proptest::bool::weighted(0.85),
        proptest::bool::weighted(0.2),
    )
        .prop_map(|(x, y, flags, visible, selected)| ItemSpec {
            x,
            y,
            flags,
            visible,
            selected,
        })
}

#[derive(Debug, Clone)]
struct SceneSpec {
    items: Vec<ItemSpec>,
    focus: Option<usize>,
}

fn scene_strategy() -> impl Strategy<Value = SceneSpec> {
    proptest::collection::vec(item_strategy(), 1..24).prop_flat_map(|items| {
        let n = items.len();
        (Just(items), proptest::option::weighted(0.9, 0..n))
            .prop_map(|(items, focus)| SceneSpec { items, focus })
    })
}

fn direction_strategy() -> impl Strategy<Value = Direction> {
    prop_oneof![
        Just(Direction::Up),
        Just(Direction::Down),
        Just(Direction::Left),
        Just(Direction::Right),
    ]
}

fn cone_strategy() -> impl Strategy<Value = ConePolicy> {
    prop_oneof![Just(ConePolicy::Legacy), Just(ConePolicy::Symmetric)]
}

/// Build the scene; the focus item is forced focusable and visible so the
/// focus request sticks.
fn build(spec: &SceneSpec) -> (Scene, Vec<ItemId>) {
    let mut scene = Scene::new();
    let mut ids = Vec::with_capacity(spec.items.len());
    for (idx, it) in spec.items.iter().enumerate() {
        let mut flags = ItemFlags::from_bits_truncate(it.flags);
        let mut visible = it.visible;
        if spec.focus == Some(idx) {
            flags |= ItemFlags::FOCUSABLE;
            visible = true;
        }
        let id = scene.insert(
            Item::new((f64::from(it.x), f64::from(it.y)))
                .with_flags(flags)
                .with_visible(visible),
        );
        if it.selected {
            scene.set_selected(id, true);
        }
        ids.push(id);
    }
    if let Some(idx) = spec.focus {
        assert!(scene.set_focus(ids[idx]));
    }
    (scene, ids)
}

fn eligible(scene: &Scene, id: ItemId) -> bool {
    scene
        .get(id)
        .is_some_and(|item| item.is_focusable() && item.is_visible())
}

// ═════════════════════════════════════════════════════════════════════════
// 1. No focus, no candidate
// ═════════════════════════════════════════════════════════════════════════

proptest! {
    #[test]
    fn no_focus_no_candidate(spec in scene_strategy(), cone in cone_strategy()) {
        let (mut scene, _) = build(&spec);
        scene.clear_focus();
        for dir in Direction::ALL {
            prop_assert_eq!(find_next_with(&scene, None, dir, cone), None);
        }
    }
}

// ═════════════════════════════════════════════════════════════════════════
// 2-4. Result shape, pass choice, and minimality
// ═════════════════════════════════════════════════════════════════════════

proptest! {
    #[test]
    fn result_is_eligible_and_never_focus_or_selected(
        spec in scene_strategy(),
        dir in direction_strategy(),
        cone in cone_strategy(),
    ) {
        let (scene, _) = build(&spec);
        let focus = scene.focus_item();
        if let Some(found) = find_next_with(&scene, focus, dir, cone) {
            prop_assert_ne!(Some(found), focus);
            prop_assert!(!scene.is_selected(found));
            prop_assert!(eligible(&scene, found));
        }
    }

    #[test]
    fn result_comes_from_the_chosen_pass(
        spec in scene_strategy(),
        dir in direction_strategy(),
        cone in cone_strategy(),
    ) {
        let (scene, _) = build(&spec);
        let Some(focus) = scene.focus_item() else {
            return Ok(());
        };
        let strict = look(&scene, focus, strict_predicate(dir, cone));
        let pass = if strict.is_empty() {
            look(&scene, focus, loose_predicate(dir))
        } else {
            strict
        };
        let found = find_next_with(&scene, Some(focus), dir, cone);
        prop_assert_eq!(found, closest(&scene, focus, &pass));
        if let Some(found) = found {
            prop_assert!(pass.contains(&found));
            let origin = scene.get(focus).map(Item::pos).unwrap_or_default();
            let best = origin.distance(scene.get(found).map(Item::pos).unwrap_or_default());
            for &other in pass.iter().filter(|id| eligible(&scene, **id)) {
                let d = origin.distance(scene.get(other).map(Item::pos).unwrap_or_default());
                prop_assert!(d >= best, "{other} at {d} beats {found} at {best}");
            }
        } else {
            prop_assert!(pass.iter().all(|id| !eligible(&scene, *id)));
        }
    }
}

// ═════════════════════════════════════════════════════════════════════════
// 5. Ctrl+Arrow moves exactly the selected movable items
// ═════════════════════════════════════════════════════════════════════════

proptest! {
    #[test]
    fn ctrl_arrow_moves_selected_movable_items(
        spec in scene_strategy(),
        dir in direction_strategy(),
    ) {
        let (scene, ids) = build(&spec);
        let before: Vec<Point> = ids
            .iter()
            .map(|id| scene.get(*id).map(Item::pos).unwrap_or_default())
            .collect();
        let mut view = KeyboardFriendlyView::new(scene);
        let ev = KeyEvent::new(KeyCode::from(dir)).with_modifiers(Modifiers::CTRL);
        let action = view.handle_key(&ev);

        let mut expected_count = 0;
        for (idx, id) in ids.iter().enumerate() {
            let scene = view.scene();
            let item = scene.get(*id).map(Item::clone).unwrap_or_else(|| Item::new(Point::ORIGIN));
            let moves = scene.is_selected(*id) && item.is_movable();
            let expected = if moves {
                expected_count += 1;
                before[idx] + dir.offset(10.0)
            } else {
                before[idx]
            };
            prop_assert_eq!(item.pos(), expected);
        }
        prop_assert_eq!(action, ViewAction::Moved { count: expected_count });
    }
}

// ═════════════════════════════════════════════════════════════════════════
// 6. Random focus is reproducible
// ═════════════════════════════════════════════════════════════════════════

proptest! {
    #[test]
    fn random_focus_reproducible(spec in scene_strategy(), seed in any::<u64>()) {
        let config = ViewConfig { seed, ..ViewConfig::default() };
        let (a, _) = build(&spec);
        let (b, _) = build(&spec);
        let mut first = KeyboardFriendlyView::with_config(a, config);
        let mut second = KeyboardFriendlyView::with_config(b, config);
        let space = KeyEvent::new(KeyCode::Space);
        prop_assert_eq!(first.handle_key(&space), second.handle_key(&space));
        prop_assert_eq!(first.scene().focus_item(), second.scene().focus_item());
    }
}

// ═════════════════════════════════════════════════════════════════════════
// 7. Plain arrow postconditions
// ═════════════════════════════════════════════════════════════════════════

proptest! {
    #[test]
    fn plain_arrow_selects_and_focuses_target(
        spec in scene_strategy(),
        dir in direction_strategy(),
    ) {
        let (scene, _) = build(&spec);
        let before_focus = scene.focus_item();
        let before_selected: Vec<ItemId> = scene.selected_items().collect();
        let mut view = KeyboardFriendlyView::new(scene);
        match view.handle_key(&KeyEvent::new(KeyCode::from(dir))) {
            ViewAction::Navigated { from, to } => {
                prop_assert_eq!(Some(from), before_focus);
                prop_assert!(view.scene().has_focus(to));
                let selected: Vec<ItemId> = view.scene().selected_items().collect();
                let target_selectable = view.scene().get(to).is_some_and(Item::is_selectable);
                if target_selectable {
                    prop_assert_eq!(selected, vec![to]);
                } else {
                    prop_assert!(selected.is_empty());
                }
            }
            ViewAction::NoCandidate | ViewAction::Ignored | ViewAction::FocusRefused { .. } => {
                prop_assert_eq!(view.scene().focus_item(), before_focus);
                let selected: Vec<ItemId> = view.scene().selected_items().collect();
                prop_assert_eq!(selected, before_selected);
            }
            other => {
                prop_assert!(false, "unexpected action {other:?}");
            }
        }
    }
}
