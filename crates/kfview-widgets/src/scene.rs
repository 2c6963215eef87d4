#![forbid(unsafe_code)]

//! Item arena with focus and selection state.
//!
//! A [`Scene`] owns its [`Item`]s and hands out [`ItemId`]s. Selection is
//! kept in a table separate from the item records, and at most one item
//! holds focus.
//!
//! # Invariants
//!
//! 1. Item IDs are unique and never reused within a scene.
//! 2. Iteration order is insertion order; every search breaks ties by it.
//! 3. The focus item, if any, exists and is focusable, visible and enabled.
//! 4. Every selected item exists and is selectable, visible and enabled.
//! 5. Hiding, disabling or removing an item drops its focus and selection.
//!
//! Requests that would break (3) or (4) are refused and reported through
//! the `bool` result rather than an error; callers decide whether that is
//! worth a warning.

use std::collections::BTreeSet;
use std::fmt;

use bitflags::bitflags;
use kfview_core::geometry::Point;
use thiserror::Error;

/// Unique identifier for an item in a [`Scene`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(transparent))]
pub struct ItemId(u64);

impl ItemId {
    /// Raw numeric value.
    #[must_use]
    pub const fn get(self) -> u64 {
        self.0
    }
}

impl fmt::Display for ItemId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

bitflags! {
    /// Capabilities of an item.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    #[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
    pub struct ItemFlags: u8 {
        const SELECTABLE = 1 << 0;
        const FOCUSABLE = 1 << 1;
        const MOVABLE = 1 << 2;
    }
}

impl Default for ItemFlags {
    fn default() -> Self {
        Self::all()
    }
}

/// A positioned item in a scene.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Item {
    pos: Point,
    flags: ItemFlags,
    visible: bool,
    enabled: bool,
}

impl Item {
    /// Create a visible, enabled item with every capability flag set.
    #[must_use]
    pub fn new(pos: impl Into<Point>) -> Self {
        Self {
            pos: pos.into(),
            flags: ItemFlags::all(),
            visible: true,
            enabled: true,
        }
    }

    /// Builder: set capability flags.
    #[must_use]
    pub fn with_flags(mut self, flags: ItemFlags) -> Self {
        self.flags = flags;
        self
    }

    /// Builder: set visibility.
    #[must_use]
    pub fn with_visible(mut self, visible: bool) -> Self {
        self.visible = visible;
        self
    }

    #[inline]
    #[must_use]
    pub fn pos(&self) -> Point {
        self.pos
    }

    #[inline]
    #[must_use]
    pub fn flags(&self) -> ItemFlags {
        self.flags
    }

    #[inline]
    #[must_use]
    pub fn is_visible(&self) -> bool {
        self.visible
    }

    #[inline]
    #[must_use]
    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    #[inline]
    #[must_use]
    pub fn is_selectable(&self) -> bool {
        self.flags.contains(ItemFlags::SELECTABLE)
    }

    #[inline]
    #[must_use]
    pub fn is_focusable(&self) -> bool {
        self.flags.contains(ItemFlags::FOCUSABLE)
    }

    #[inline]
    #[must_use]
    pub fn is_movable(&self) -> bool {
        self.flags.contains(ItemFlags::MOVABLE)
    }

    /// Whether the item can currently take focus.
    #[must_use]
    pub fn accepts_focus(&self) -> bool {
        self.is_focusable() && self.visible && self.enabled
    }

    /// Whether the item can currently be selected.
    #[must_use]
    pub fn accepts_selection(&self) -> bool {
        self.is_selectable() && self.visible && self.enabled
    }
}

/// Errors from scene mutations addressed by id.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum SceneError {
    #[error("no item with id {0} in scene")]
    UnknownItem(ItemId),
}

/// Arena of items plus focus and selection state.
#[derive(Debug, Default, Clone)]
pub struct Scene {
    /// Sorted by id, which is also insertion order.
    items: Vec<(ItemId, Item)>,
    next_id: u64,
    focus: Option<ItemId>,
    selection: BTreeSet<ItemId>,
}

impl Scene {
    /// Create an empty scene.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Add an item. Returns its new id.
    pub fn insert(&mut self, item: Item) -> ItemId {
        let id = ItemId(self.next_id);
        self.next_id += 1;
        self.items.push((id, item));
        id
    }

    /// Remove an item, dropping its focus and selection.
    #[must_use = "use the removed item (if any)"]
    pub fn remove(&mut self, id: ItemId) -> Option<Item> {
        let idx = self.index_of(id)?;
        if self.focus == Some(id) {
            self.focus = None;
        }
        self.selection.remove(&id);
        Some(self.items.remove(idx).1)
    }

    fn index_of(&self, id: ItemId) -> Option<usize> {
        self.items.binary_search_by_key(&id, |(k, _)| *k).ok()
    }

    fn slot_mut(&mut self, id: ItemId) -> Result<&mut Item, SceneError> {
        let idx = self.index_of(id).ok_or(SceneError::UnknownItem(id))?;
        Ok(&mut self.items[idx].1)
    }

    /// Look up an item.
    #[must_use = "use the returned item (if any)"]
    pub fn get(&self, id: ItemId) -> Option<&Item> {
        self.index_of(id).map(|idx| &self.items[idx].1)
    }

    /// Whether the scene contains `id`.
    #[must_use]
    pub fn contains(&self, id: ItemId) -> bool {
        self.index_of(id).is_some()
    }

    /// Number of items.
    #[must_use]
    pub fn len(&self) -> usize {
        self.items.len()
    }

    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Items in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = (ItemId, &Item)> + '_ {
        self.items.iter().map(|(id, item)| (*id, item))
    }

    /// Item ids in insertion order.
    pub fn ids(&self) -> impl Iterator<Item = ItemId> + '_ {
        self.items.iter().map(|(id, _)| *id)
    }

    // --- focus ------------------------------------------------------------

    /// Current focus item.
    #[inline]
    #[must_use]
    pub fn focus_item(&self) -> Option<ItemId> {
        self.focus
    }

    #[must_use]
    pub fn has_focus(&self, id: ItemId) -> bool {
        self.focus == Some(id)
    }

    /// Give focus to `id`. Returns whether the item now has focus.
    ///
    /// Refused for unknown items and for items that are not focusable,
    /// visible and enabled; the previous focus is then left untouched.
    pub fn set_focus(&mut self, id: ItemId) -> bool {
        if !self.get(id).is_some_and(Item::accepts_focus) {
            return false;
        }
        self.focus = Some(id);
        true
    }

    /// Drop focus. Returns the item that had it.
    pub fn clear_focus(&mut self) -> Option<ItemId> {
        self.focus.take()
    }

    // --- selection --------------------------------------------------------

    #[must_use]
    pub fn is_selected(&self, id: ItemId) -> bool {
        self.selection.contains(&id)
    }

    /// Select or deselect `id`. Returns whether the item's selection state
    /// now equals `selected`.
    pub fn set_selected(&mut self, id: ItemId, selected: bool) -> bool {
        let Some(item) = self.get(id) else {
            return false;
        };
        if selected {
            if !item.accepts_selection() {
                return false;
            }
            self.selection.insert(id);
        } else {
            self.selection.remove(&id);
        }
        true
    }

    /// Selected items in insertion order.
    pub fn selected_items(&self) -> impl Iterator<Item = ItemId> + '_ {
        self.selection.iter().copied()
    }

    /// Number of selected items.
    #[must_use]
    pub fn selected_count(&self) -> usize {
        self.selection.len()
    }

    /// Deselect everything. Returns how many items were deselected.
    pub fn clear_selection(&mut self) -> usize {
        let n = self.selection.len();
        self.selection.clear();
        n
    }

    // --- item state -------------------------------------------------------

    /// Move an item to `pos`.
    pub fn set_position(&mut self, id: ItemId, pos: Point) -> Result<(), SceneError> {
        self.slot_mut(id)?.pos = pos;
        Ok(())
    }

    /// Move an item by `delta`.
    pub fn translate(&mut self, id: ItemId, delta: Point) -> Result<(), SceneError> {
        self.slot_mut(id)?.pos += delta;
        Ok(())
    }

    /// Show or hide an item. Hiding drops its focus and selection.
    pub fn set_visible(&mut self, id: ItemId, visible: bool) -> Result<(), SceneError> {
        self.slot_mut(id)?.visible = visible;
        if !visible {
            self.drop_interaction_state(id);
        }
        Ok(())
    }

    /// Enable or disable an item. Disabling drops its focus and selection.
    pub fn set_enabled(&mut self, id: ItemId, enabled: bool) -> Result<(), SceneError> {
        self.slot_mut(id)?.enabled = enabled;
        if !enabled {
            self.drop_interaction_state(id);
        }
        Ok(())
    }

    /// Replace an item's capability flags, dropping focus or selection the
    /// new flags no longer allow.
    pub fn set_flags(&mut self, id: ItemId, flags: ItemFlags) -> Result<(), SceneError> {
        self.slot_mut(id)?.flags = flags;
        if !flags.contains(ItemFlags::FOCUSABLE) && self.focus == Some(id) {
            self.focus = None;
        }
        if !flags.contains(ItemFlags::SELECTABLE) {
            self.selection.remove(&id);
        }
        Ok(())
    }

    fn drop_interaction_state(&mut self, id: ItemId) {
        if self.focus == Some(id) {
            self.focus = None;
        }
        self.selection.remove(&id);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn scene_with(n: usize) -> (Scene, Vec<ItemId>) {
        let mut scene = Scene::new();
        let ids = (0..n)
            .map(|i| scene.insert(Item::new((i as f64 * 10.0, 0.0))))
            .collect();
        (scene, ids)
    }

    #[test]
    fn ids_are_unique_and_ordered() {
        let (mut scene, ids) = scene_with(3);
        assert_eq!(scene.ids().collect::<Vec<_>>(), ids);
        let _ = scene.remove(ids[1]);
        let fresh = scene.insert(Item::new((5.0, 5.0)));
        assert!(!ids.contains(&fresh));
        assert_eq!(scene.ids().collect::<Vec<_>>(), vec![ids[0], ids[2], fresh]);
    }

    #[test]
    fn focus_requires_focusable_visible_enabled() {
        let mut scene = Scene::new();
        let plain = scene.insert(Item::new((0.0, 0.0)));
        let unfocusable = scene.insert(Item::new((1.0, 0.0)).with_flags(ItemFlags::SELECTABLE));
        let hidden = scene.insert(Item::new((2.0, 0.0)).with_visible(false));

        assert!(scene.set_focus(plain));
        assert!(!scene.set_focus(unfocusable));
        assert!(!scene.set_focus(hidden));
        assert_eq!(scene.focus_item(), Some(plain));

        scene.set_enabled(plain, false).unwrap();
        assert_eq!(scene.focus_item(), None);
        assert!(!scene.set_focus(plain));
    }

    #[test]
    fn selection_requires_selectable_visible_enabled() {
        let mut scene = Scene::new();
        let a = scene.insert(Item::new((0.0, 0.0)));
        let b = scene.insert(Item::new((1.0, 0.0)).with_flags(ItemFlags::FOCUSABLE));
        assert!(scene.set_selected(a, true));
        assert!(!scene.set_selected(b, true));
        assert!(scene.set_selected(b, false));
        assert_eq!(scene.selected_items().collect::<Vec<_>>(), vec![a]);

        scene.set_visible(a, false).unwrap();
        assert!(!scene.is_selected(a));
        assert!(!scene.set_selected(a, true));
    }

    #[test]
    fn remove_drops_focus_and_selection() {
        let (mut scene, ids) = scene_with(2);
        scene.set_focus(ids[0]);
        scene.set_selected(ids[0], true);
        let removed = scene.remove(ids[0]);
        assert!(removed.is_some());
        assert_eq!(scene.focus_item(), None);
        assert_eq!(scene.selected_count(), 0);
        assert!(scene.remove(ids[0]).is_none());
    }

    #[test]
    fn unknown_ids_are_reported() {
        let (mut scene, ids) = scene_with(1);
        let _ = scene.remove(ids[0]);
        assert_eq!(
            scene.set_position(ids[0], Point::ORIGIN),
            Err(SceneError::UnknownItem(ids[0]))
        );
        assert!(!scene.set_focus(ids[0]));
        assert!(!scene.set_selected(ids[0], false));
    }

    #[test]
    fn translate_moves_item() {
        let (mut scene, ids) = scene_with(2);
        scene.translate(ids[1], Point::new(0.0, -10.0)).unwrap();
        assert_eq!(scene.get(ids[1]).map(Item::pos), Some(Point::new(10.0, -10.0)));
    }

    #[test]
    fn clearing_flags_drops_state() {
        let (mut scene, ids) = scene_with(1);
        scene.set_focus(ids[0]);
        scene.set_selected(ids[0], true);
        scene.set_flags(ids[0], ItemFlags::MOVABLE).unwrap();
        assert_eq!(scene.focus_item(), None);
        assert!(!scene.is_selected(ids[0]));
    }

    #[cfg(feature = "serde")]
    #[test]
    fn item_serde_keeps_flags_and_state() {
        let item = Item::new((3.0, -4.0))
            .with_flags(ItemFlags::FOCUSABLE | ItemFlags::MOVABLE)
            .with_visible(false);
        let json = serde_json::to_string(&item).unwrap();
        let back: Item = serde_json::from_str(&json).unwrap();
        assert_eq!(back, item);
        assert!(!back.is_selectable());
        assert!(back.is_movable());
    }

    #[test]
    fn item_id_display() {
        assert_eq!(ItemId(7).to_string(), "#7");
    }
}
