#![forbid(unsafe_code)]

//! Focus and selection primitives used by the key dispatcher.
//!
//! The scene may refuse a selection or focus request (for example on a
//! hidden item). The `do_*` helpers log that as a warning and report it
//! through their return value; it is never an error.

use kfview_core::geometry::Point;
use rand::Rng;

use crate::scene::{ItemId, Scene};

/// Select `id`, warning if the scene refuses.
pub fn do_select(scene: &mut Scene, id: ItemId) -> bool {
    let ok = scene.set_selected(id, true) && scene.is_selected(id);
    #[cfg(feature = "tracing")]
    if !ok {
        tracing::warn!(message = "kfview.select_refused", item = %id);
    }
    ok
}

/// Focus `id`, warning if the scene refuses.
pub fn do_focus(scene: &mut Scene, id: ItemId) -> bool {
    let ok = scene.set_focus(id) && scene.has_focus(id);
    #[cfg(feature = "tracing")]
    if !ok {
        tracing::warn!(message = "kfview.focus_refused", item = %id);
    }
    ok
}

/// Deselect every item. Returns how many were deselected.
pub fn deselect_all(scene: &mut Scene) -> usize {
    scene.clear_selection()
}

/// Make the focus item give up focus and selection for good.
///
/// The item is disabled, deselected, unfocused and re-enabled, so no
/// focus or selection state survives on it. Returns the item that lost
/// focus.
pub fn really_lose_focus(scene: &mut Scene) -> Option<ItemId> {
    let id = scene.focus_item()?;
    // The id came from the scene, so these cannot fail.
    let _ = scene.set_enabled(id, false);
    scene.set_selected(id, false);
    scene.clear_focus();
    let _ = scene.set_enabled(id, true);
    Some(id)
}

/// Translate every selected, movable item by `delta`. Returns how many
/// items moved.
pub fn move_selected(scene: &mut Scene, delta: Point) -> usize {
    let movable: Vec<ItemId> = scene
        .selected_items()
        .filter(|id| scene.get(*id).is_some_and(|item| item.is_movable()))
        .collect();
    for &id in &movable {
        let _ = scene.translate(id, delta);
    }
    movable.len()
}

/// Items that may receive random focus: focusable, selectable, visible and
/// enabled.
#[must_use]
pub fn focus_candidates(scene: &Scene) -> Vec<ItemId> {
    scene
        .iter()
        .filter(|(_, item)| item.accepts_focus() && item.is_selectable())
        .map(|(id, _)| id)
        .collect()
}

/// Items that may receive random selection: selectable, visible and
/// enabled.
#[must_use]
pub fn selection_candidates(scene: &Scene) -> Vec<ItemId> {
    scene
        .iter()
        .filter(|(_, item)| item.accepts_selection())
        .map(|(id, _)| id)
        .collect()
}

fn pick<R: Rng>(candidates: &[ItemId], rng: &mut R) -> Option<ItemId> {
    if candidates.is_empty() {
        return None;
    }
    Some(candidates[rng.gen_range(0..candidates.len())])
}

/// Drop focus and selection, then select and focus one random candidate.
pub fn random_focus<R: Rng>(scene: &mut Scene, rng: &mut R) -> Option<ItemId> {
    really_lose_focus(scene);
    deselect_all(scene);
    let chosen = pick(&focus_candidates(scene), rng)?;
    do_select(scene, chosen);
    do_focus(scene, chosen);
    Some(chosen)
}

/// Drop focus and selection, then select one random candidate.
pub fn random_selection<R: Rng>(scene: &mut Scene, rng: &mut R) -> Option<ItemId> {
    deselect_all(scene);
    scene.clear_focus();
    let chosen = pick(&selection_candidates(scene), rng)?;
    do_select(scene, chosen);
    Some(chosen)
}
