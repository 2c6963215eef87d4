#![forbid(unsafe_code)]

//! Session reports, as JSON or a plain text table.

use std::fmt::Write as _;

use kfview_widgets::Scene;
use serde::Serialize;

use crate::session::Step;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ItemRecord {
    pub id: u64,
    pub x: f64,
    pub y: f64,
    pub visible: bool,
    pub selectable: bool,
    pub focusable: bool,
    pub movable: bool,
    pub selected: bool,
    pub focused: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Report {
    pub version: &'static str,
    pub seed: u64,
    pub steps: Vec<Step>,
    pub focus: Option<u64>,
    pub items: Vec<ItemRecord>,
}

impl Report {
    #[must_use]
    pub fn new(scene: &Scene, seed: u64, steps: Vec<Step>) -> Self {
        let items = scene
            .iter()
            .map(|(id, item)| ItemRecord {
                id: id.get(),
                x: item.pos().x,
                y: item.pos().y,
                visible: item.is_visible(),
                selectable: item.is_selectable(),
                focusable: item.is_focusable(),
                movable: item.is_movable(),
                selected: scene.is_selected(id),
                focused: scene.has_focus(id),
            })
            .collect();
        Self {
            version: kfview_widgets::version(),
            seed,
            steps,
            focus: scene.focus_item().map(|id| id.get()),
            items,
        }
    }

    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }

    #[must_use]
    pub fn to_text(&self) -> String {
        let mut out = String::new();
        let _ = writeln!(out, "kfview {} (seed {})", self.version, self.seed);
        if !self.steps.is_empty() {
            let _ = writeln!(out, "\nkeys:");
            for (n, step) in self.steps.iter().enumerate() {
                let _ = writeln!(out, "  {:>4}  {:<16} {}", n + 1, step.key, step.action);
            }
        }
        let _ = writeln!(out, "\nitems:");
        let _ = writeln!(out, "  {:>4}  {:>9} {:>9}  flags  state", "id", "x", "y");
        for item in &self.items {
            let flags: String = [
                (item.selectable, 's'),
                (item.focusable, 'f'),
                (item.movable, 'm'),
                (!item.visible, 'h'),
            ]
            .iter()
            .map(|&(on, ch)| if on { ch } else { '-' })
            .collect();
            let mut state = String::new();
            if item.focused {
                state.push_str("focus ");
            }
            if item.selected {
                state.push_str("selected");
            }
            let _ = writeln!(
                out,
                "  {:>4}  {:>9.1} {:>9.1}  {flags}   {}",
                item.id,
                item.x,
                item.y,
                state.trim_end()
            );
        }
        out
    }
}
