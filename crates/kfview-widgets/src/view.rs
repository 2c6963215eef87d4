#![forbid(unsafe_code)]

//! Keyboard dispatcher for a [`Scene`].
//!
//! | Key | Effect |
//! |-----|--------|
//! | Arrow | Move focus and selection to the next item in that direction |
//! | Shift+Arrow | Add the next item to the selection and move focus onto it |
//! | Ctrl+Arrow | Move every selected, movable item one step |
//! | Space | Focus and select a random item |
//! | Ctrl+Space | Select a random item, dropping focus |
//!
//! Ctrl takes precedence over Shift. Every other key is ignored. A missing
//! focus item or a direction without a candidate leaves the scene as is.
//!
//! # Example
//!
//! ```rust
//! use kfview_core::event::{KeyCode, KeyEvent};
//! use kfview_widgets::{Item, KeyboardFriendlyView, Scene, ViewAction};
//!
//! let mut scene = Scene::new();
//! let a = scene.insert(Item::new((0.0, 0.0)));
//! let b = scene.insert(Item::new((20.0, 0.0)));
//! scene.set_focus(a);
//!
//! let mut view = KeyboardFriendlyView::new(scene);
//! let action = view.handle_key(&KeyEvent::new(KeyCode::Right));
//! assert_eq!(action, ViewAction::Navigated { from: a, to: b });
//! assert!(view.scene().has_focus(b));
//! ```

use std::fmt;

use kfview_core::event::{KeyCode, KeyEvent};
use kfview_core::geometry::Direction;
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

use crate::focus::selection::{
    deselect_all, do_focus, do_select, move_selected, random_focus, random_selection,
};
use crate::focus::spatial::{ConePolicy, find_next_with};
use crate::scene::{Item, ItemId, Scene};

/// Default distance for Ctrl+Arrow moves.
pub const DEFAULT_MOVE_STEP: f64 = 10.0;

/// Dispatcher configuration.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct ViewConfig {
    /// Distance moved per Ctrl+Arrow press.
    pub move_step: f64,
    /// Strict Down predicate.
    pub cone: ConePolicy,
    /// Seed for the random source built by [`KeyboardFriendlyView::new`].
    pub seed: u64,
}

impl Default for ViewConfig {
    fn default() -> Self {
        Self {
            move_step: DEFAULT_MOVE_STEP,
            cone: ConePolicy::Legacy,
            seed: 0,
        }
    }
}

/// What a key press did.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ViewAction {
    /// The key has no binding, or nothing could act on it.
    Ignored,
    /// A direction key found no candidate.
    NoCandidate,
    /// The candidate `to` cannot take focus (for example it is disabled);
    /// focus and selection stay as they were.
    FocusRefused { from: ItemId, to: ItemId },
    /// Focus and selection moved to `to`.
    Navigated { from: ItemId, to: ItemId },
    /// `to` joined the selection and took focus.
    SelectionExtended { from: ItemId, to: ItemId },
    /// `count` selected items moved.
    Moved { count: usize },
    /// Random focus landed on the item, if any was eligible.
    RandomFocus(Option<ItemId>),
    /// Random selection landed on the item, if any was eligible.
    RandomSelection(Option<ItemId>),
}

impl fmt::Display for ViewAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Ignored => f.write_str("ignored"),
            Self::NoCandidate => f.write_str("no candidate"),
            Self::FocusRefused { from, to } => write!(f, "focus refused {from} -> {to}"),
            Self::Navigated { from, to } => write!(f, "navigated {from} -> {to}"),
            Self::SelectionExtended { from, to } => write!(f, "extended {from} -> {to}"),
            Self::Moved { count } => write!(f, "moved {count}"),
            Self::RandomFocus(Some(id)) => write!(f, "random focus {id}"),
            Self::RandomSelection(Some(id)) => write!(f, "random selection {id}"),
            Self::RandomFocus(None) | Self::RandomSelection(None) => {
                f.write_str("no eligible item")
            }
        }
    }
}

/// A scene driven by keyboard input.
#[derive(Debug, Clone)]
pub struct KeyboardFriendlyView<R = ChaCha8Rng> {
    scene: Scene,
    config: ViewConfig,
    rng: R,
}

impl KeyboardFriendlyView<ChaCha8Rng> {
    /// Wrap a scene with the default configuration.
    #[must_use]
    pub fn new(scene: Scene) -> Self {
        Self::with_config(scene, ViewConfig::default())
    }

    /// Wrap a scene; the random source is seeded from `config.seed`.
    #[must_use]
    pub fn with_config(scene: Scene, config: ViewConfig) -> Self {
        let rng = ChaCha8Rng::seed_from_u64(config.seed);
        Self { scene, config, rng }
    }
}

impl<R: Rng> KeyboardFriendlyView<R> {
    /// Wrap a scene with an explicit random source.
    #[must_use]
    pub fn with_rng(scene: Scene, config: ViewConfig, rng: R) -> Self {
        Self { scene, config, rng }
    }

    #[inline]
    #[must_use]
    pub fn scene(&self) -> &Scene {
        &self.scene
    }

    pub fn scene_mut(&mut self) -> &mut Scene {
        &mut self.scene
    }

    /// Consume the view, returning its scene.
    #[must_use]
    pub fn into_scene(self) -> Scene {
        self.scene
    }

    #[must_use]
    pub fn config(&self) -> &ViewConfig {
        &self.config
    }

    /// Dispatch a key press.
    pub fn handle_key(&mut self, key: &KeyEvent) -> ViewAction {
        let action = if key.ctrl() {
            self.handle_ctrl(key.code)
        } else if key.shift() {
            self.handle_shift(key.code)
        } else {
            self.handle_plain(key.code)
        };
        #[cfg(feature = "tracing")]
        tracing::debug!(message = "kfview.key", key = %key, action = ?action);
        action
    }

    fn handle_ctrl(&mut self, code: KeyCode) -> ViewAction {
        if code == KeyCode::Space {
            return ViewAction::RandomSelection(random_selection(&mut self.scene, &mut self.rng));
        }
        let Some(direction) = code.direction() else {
            return ViewAction::Ignored;
        };
        let count = move_selected(&mut self.scene, direction.offset(self.config.move_step));
        ViewAction::Moved { count }
    }

    fn handle_shift(&mut self, code: KeyCode) -> ViewAction {
        match code.direction() {
            Some(direction) => self.extend_selection(direction),
            None => ViewAction::Ignored,
        }
    }

    fn handle_plain(&mut self, code: KeyCode) -> ViewAction {
        if code == KeyCode::Space {
            return ViewAction::RandomFocus(random_focus(&mut self.scene, &mut self.rng));
        }
        match code.direction() {
            Some(direction) => self.navigate(direction),
            None => ViewAction::Ignored,
        }
    }

    /// Next item from the current focus in `direction`.
    #[must_use]
    pub fn find_next(&self, direction: Direction) -> Option<ItemId> {
        find_next_with(
            &self.scene,
            self.scene.focus_item(),
            direction,
            self.config.cone,
        )
    }

    /// Whether `to` would take focus, warning if not.
    fn accepts_focus(&self, to: ItemId) -> bool {
        let ok = self.scene.get(to).is_some_and(Item::accepts_focus);
        if !ok {
            #[cfg(feature = "tracing")]
            tracing::warn!(message = "kfview.focus_refused", item = %to);
        }
        ok
    }

    /// Move focus and selection one step in `direction`.
    pub fn navigate(&mut self, direction: Direction) -> ViewAction {
        let Some(from) = self.scene.focus_item() else {
            return ViewAction::Ignored;
        };
        let Some(to) = self.find_next(direction) else {
            return ViewAction::NoCandidate;
        };
        if !self.accepts_focus(to) {
            return ViewAction::FocusRefused { from, to };
        }
        deselect_all(&mut self.scene);
        do_select(&mut self.scene, to);
        self.scene.clear_focus();
        do_focus(&mut self.scene, to);
        #[cfg(feature = "tracing")]
        tracing::debug!(
            message = "kfview.navigate",
            direction = direction.as_str(),
            from = %from,
            to = %to
        );
        ViewAction::Navigated { from, to }
    }

    /// Add the next item in `direction` to the selection and focus it.
    pub fn extend_selection(&mut self, direction: Direction) -> ViewAction {
        let Some(from) = self.scene.focus_item() else {
            return ViewAction::Ignored;
        };
        let Some(to) = self.find_next(direction) else {
            return ViewAction::NoCandidate;
        };
        if !self.accepts_focus(to) {
            return ViewAction::FocusRefused { from, to };
        }
        do_select(&mut self.scene, to);
        self.scene.clear_focus();
        do_focus(&mut self.scene, to);
        #[cfg(feature = "tracing")]
        tracing::debug!(
            message = "kfview.extend_selection",
            direction = direction.as_str(),
            from = %from,
            to = %to,
            selected = self.scene.selected_count()
        );
        ViewAction::SelectionExtended { from, to }
    }
}
