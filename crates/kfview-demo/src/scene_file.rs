#![forbid(unsafe_code)]

//! Scene sources: JSON scene files and generated grids.
//!
//! ```json
//! {
//!   "items": [
//!     {"x": 0.0, "y": 0.0},
//!     {"x": 40.0, "y": 0.0, "movable": false}
//!   ],
//!   "focus": 0,
//!   "selected": [0]
//! }
//! ```
//!
//! Item flags default to `true`. `focus` and `selected` are indices into
//! `items`.

use std::fs;
use std::path::Path;

use kfview_core::geometry::Point;
use kfview_widgets::{Item, ItemFlags, ItemId, Scene};
use serde::{Deserialize, Serialize};

use crate::error::{DemoError, Result};

fn yes() -> bool {
    true
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ItemSpec {
    pub x: f64,
    pub y: f64,
    #[serde(default = "yes")]
    pub visible: bool,
    #[serde(default = "yes")]
    pub selectable: bool,
    #[serde(default = "yes")]
    pub focusable: bool,
    #[serde(default = "yes")]
    pub movable: bool,
}

impl ItemSpec {
    fn flags(&self) -> ItemFlags {
        let mut flags = ItemFlags::empty();
        flags.set(ItemFlags::SELECTABLE, self.selectable);
        flags.set(ItemFlags::FOCUSABLE, self.focusable);
        flags.set(ItemFlags::MOVABLE, self.movable);
        flags
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SceneFile {
    pub items: Vec<ItemSpec>,
    #[serde(default)]
    pub focus: Option<usize>,
    #[serde(default)]
    pub selected: Vec<usize>,
}

impl SceneFile {
    /// Read and parse a scene file.
    pub fn load(path: &Path) -> Result<Self> {
        let text = fs::read_to_string(path)?;
        serde_json::from_str(&text).map_err(|err| DemoError::scene_file(path, err.to_string()))
    }

    /// Build the scene. `path` is only used in error messages.
    pub fn into_scene(self, path: &Path) -> Result<Scene> {
        let mut scene = Scene::new();
        let mut ids: Vec<ItemId> = Vec::with_capacity(self.items.len());
        for (idx, spec) in self.items.iter().enumerate() {
            let pos = Point::new(spec.x, spec.y);
            if !pos.is_finite() {
                return Err(DemoError::scene_file(
                    path,
                    format!("item {idx} has a non-finite position"),
                ));
            }
            ids.push(
                scene.insert(
                    Item::new(pos)
                        .with_flags(spec.flags())
                        .with_visible(spec.visible),
                ),
            );
        }
        let lookup = |idx: usize, what: &str| {
            ids.get(idx).copied().ok_or_else(|| {
                DemoError::scene_file(
                    path,
                    format!("{what} index {idx} out of range (items: {})", ids.len()),
                )
            })
        };
        for &idx in &self.selected {
            let id = lookup(idx, "selected")?;
            if !scene.set_selected(id, true) {
                tracing::warn!(message = "kfview.scene_file.select_refused", index = idx);
            }
        }
        if let Some(idx) = self.focus {
            let id = lookup(idx, "focus")?;
            if !scene.set_focus(id) {
                tracing::warn!(message = "kfview.scene_file.focus_refused", index = idx);
            }
        }
        Ok(scene)
    }
}

/// A `count`-item grid, `columns` wide, with the first item focused and
/// selected.
pub fn grid(count: usize, columns: usize, spacing: f64) -> Result<Scene> {
    if columns == 0 {
        return Err(DemoError::invalid("columns must be at least 1"));
    }
    if !spacing.is_finite() || spacing <= 0.0 {
        return Err(DemoError::invalid(format!(
            "spacing must be a positive number, got {spacing}"
        )));
    }
    let mut scene = Scene::new();
    for idx in 0..count {
        let col = (idx % columns) as f64;
        let row = (idx / columns) as f64;
        scene.insert(Item::new((col * spacing, row * spacing)));
    }
    let first = scene.ids().next();
    if let Some(first) = first {
        scene.set_focus(first);
        scene.set_selected(first, true);
    }
    Ok(scene)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(text: &str) -> SceneFile {
        serde_json::from_str(text).expect("scene json")
    }

    #[test]
    fn flags_default_to_true() {
        let file = parse(r#"{"items":[{"x":1,"y":2},{"x":3,"y":4,"movable":false}]}"#);
        let scene = file.into_scene(Path::new("mem")).expect("scene");
        let items: Vec<&Item> = scene.iter().map(|(_, item)| item).collect();
        assert_eq!(items[0].flags(), ItemFlags::all());
        assert!(items[0].is_visible());
        assert!(!items[1].is_movable());
        assert_eq!(scene.focus_item(), None);
    }

    #[test]
    fn focus_and_selection_indices() {
        let file = parse(r#"{"items":[{"x":0,"y":0},{"x":9,"y":0}],"focus":1,"selected":[0,1]}"#);
        let scene = file.into_scene(Path::new("mem")).expect("scene");
        let ids: Vec<ItemId> = scene.ids().collect();
        assert_eq!(scene.focus_item(), Some(ids[1]));
        assert_eq!(scene.selected_count(), 2);
    }

    #[test]
    fn out_of_range_index_is_rejected() {
        let file = parse(r#"{"items":[{"x":0,"y":0}],"focus":3}"#);
        let err = file.into_scene(Path::new("scene.json")).unwrap_err();
        assert!(matches!(err, DemoError::SceneFile { .. }));
        assert!(err.to_string().contains("focus index 3"));
    }

    #[test]
    fn grid_layout() {
        let scene = grid(5, 2, 40.0).expect("grid");
        let positions: Vec<Point> = scene.iter().map(|(_, item)| item.pos()).collect();
        assert_eq!(positions[1], Point::new(40.0, 0.0));
        assert_eq!(positions[4], Point::new(0.0, 80.0));
        let first = scene.ids().next();
        assert_eq!(scene.focus_item(), first);
        assert_eq!(scene.selected_items().next(), first);
    }

    #[test]
    fn grid_rejects_bad_arguments() {
        assert!(grid(4, 0, 10.0).is_err());
        assert!(grid(4, 2, -1.0).is_err());
        assert!(grid(0, 2, 10.0).is_ok_and(|scene| scene.is_empty()));
    }
}
