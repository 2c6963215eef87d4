#![forbid(unsafe_code)]

//! Directional nearest-neighbour search.
//!
//! Given the focus item and an arrow direction, [`find_next`] picks the
//! item that should receive focus next:
//!
//! 1. Candidates are all items except the focus item and selected items.
//! 2. A strict pass keeps candidates within 45° of the direction. If it
//!    keeps none, a loose pass keeps every candidate on the correct side
//!    (sign check only).
//! 3. Of the survivors, the closest focusable, visible item wins. Ties go to
//!    the item that comes first in scene order.
//!
//! Eligibility is checked in step 3, after the pass was chosen. A strict
//! pass that only finds hidden or unfocusable items yields no result; it
//! does not fall back to the loose pass.
//!
//! # Down cone
//!
//! Under [`ConePolicy::Legacy`] the strict Down predicate is
//! `dx > 0 && |dx| < |dy|`: it tests the sign of `dx`, unlike the other
//! three. [`ConePolicy::Symmetric`] uses `dy > 0` instead.

use kfview_core::geometry::{Direction, Point};

use crate::scene::{Item, ItemId, Scene};

/// A directional filter over the displacement `(dx, dy)` from the focus
/// item to a candidate.
pub type SearchPredicate = fn(f64, f64) -> bool;

/// Which strict Down predicate to use.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum ConePolicy {
    /// `dx > 0 && |dx| < |dy|`.
    #[default]
    Legacy,
    /// `dy > 0 && |dx| < |dy|`, mirroring Up.
    Symmetric,
}

fn strict_up(dx: f64, dy: f64) -> bool {
    dy < 0.0 && dx.abs() < dy.abs()
}

fn strict_down_legacy(dx: f64, dy: f64) -> bool {
    dx > 0.0 && dx.abs() < dy.abs()
}

fn strict_down_symmetric(dx: f64, dy: f64) -> bool {
    dy > 0.0 && dx.abs() < dy.abs()
}

fn strict_left(dx: f64, dy: f64) -> bool {
    dx < 0.0 && dy.abs() < dx.abs()
}

fn strict_right(dx: f64, dy: f64) -> bool {
    dx > 0.0 && dy.abs() < dx.abs()
}

fn loose_up(_dx: f64, dy: f64) -> bool {
    dy < 0.0
}

fn loose_down(_dx: f64, dy: f64) -> bool {
    dy > 0.0
}

fn loose_left(dx: f64, _dy: f64) -> bool {
    dx < 0.0
}

fn loose_right(dx: f64, _dy: f64) -> bool {
    dx > 0.0
}

/// Cone filter used by the first pass.
#[must_use]
pub fn strict_predicate(direction: Direction, policy: ConePolicy) -> SearchPredicate {
    match (direction, policy) {
        (Direction::Up, _) => strict_up,
        (Direction::Down, ConePolicy::Legacy) => strict_down_legacy,
        (Direction::Down, ConePolicy::Symmetric) => strict_down_symmetric,
        (Direction::Left, _) => strict_left,
        (Direction::Right, _) => strict_right,
    }
}

/// Sign-only filter used when the strict pass finds nothing.
#[must_use]
pub fn loose_predicate(direction: Direction) -> SearchPredicate {
    match direction {
        Direction::Up => loose_up,
        Direction::Down => loose_down,
        Direction::Left => loose_left,
        Direction::Right => loose_right,
    }
}

/// Euclidean distance between two positions.
#[inline]
#[must_use]
pub fn distance(a: Point, b: Point) -> f64 {
    a.distance(b)
}

/// All items that are neither selected nor the focus item, in scene order.
#[must_use]
pub fn unselected_non_focus_items(scene: &Scene) -> Vec<ItemId> {
    let focus = scene.focus_item();
    scene
        .ids()
        .filter(|id| Some(*id) != focus && !scene.is_selected(*id))
        .collect()
}

/// Candidates (unselected, not `focus`) whose displacement from `focus`
/// satisfies `predicate`.
#[must_use]
pub fn look(scene: &Scene, focus: ItemId, predicate: SearchPredicate) -> Vec<ItemId> {
    let Some(origin) = scene.get(focus).map(Item::pos) else {
        return Vec::new();
    };
    unselected_non_focus_items(scene)
        .into_iter()
        .filter(|id| *id != focus)
        .filter(|id| {
            scene.get(*id).is_some_and(|item| {
                let (dx, dy) = item.pos().delta_from(origin);
                predicate(dx, dy)
            })
        })
        .collect()
}

/// The focusable, visible candidate closest to `focus`.
///
/// Candidates that are not focusable or not visible are skipped, as are
/// candidates at infinite or NaN distance. On equal distance the earlier
/// candidate wins.
#[must_use]
pub fn closest(scene: &Scene, focus: ItemId, candidates: &[ItemId]) -> Option<ItemId> {
    let origin = scene.get(focus)?.pos();
    let mut best = None;
    let mut best_distance = f64::MAX;
    for &id in candidates {
        if id == focus {
            continue;
        }
        let Some(item) = scene.get(id) else {
            continue;
        };
        if !item.is_focusable() || !item.is_visible() {
            continue;
        }
        let d = distance(origin, item.pos());
        if d < best_distance {
            best = Some(id);
            best_distance = d;
        }
    }
    best
}

/// Next item to focus from `focus` in `direction`, using the legacy cone.
#[must_use]
pub fn find_next(scene: &Scene, focus: Option<ItemId>, direction: Direction) -> Option<ItemId> {
    find_next_with(scene, focus, direction, ConePolicy::Legacy)
}

/// Next item to focus from `focus` in `direction`.
#[must_use]
pub fn find_next_with(
    scene: &Scene,
    focus: Option<ItemId>,
    direction: Direction,
    policy: ConePolicy,
) -> Option<ItemId> {
    let focus = focus?;
    let mut candidates = look(scene, focus, strict_predicate(direction, policy));
    if candidates.is_empty() {
        candidates = look(scene, focus, loose_predicate(direction));
    }
    let found = closest(scene, focus, &candidates);
    debug_assert!(found != Some(focus));
    debug_assert!(!found.is_some_and(|id| scene.is_selected(id)));
    found
}
