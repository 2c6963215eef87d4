#![forbid(unsafe_code)]

//! Keyboard-friendly scene view.
//!
//! A [`Scene`] is an arena of positioned [`Item`]s with one optional focus
//! item and a selection table. [`KeyboardFriendlyView`] maps arrow keys
//! (plain, Shift, Ctrl) and Space onto focus, selection and movement, using
//! the directional search in [`focus::spatial`].

pub mod focus;
pub mod scene;
pub mod view;

pub use focus::{ConePolicy, find_next, find_next_with};
pub use scene::{Item, ItemFlags, ItemId, Scene, SceneError};
pub use view::{DEFAULT_MOVE_STEP, KeyboardFriendlyView, ViewAction, ViewConfig};

/// Version of the keyboard-friendly view behaviour.
#[must_use]
pub fn version() -> &'static str {
    "1.4"
}

/// Dated history of behaviour changes.
#[must_use]
pub fn version_history() -> &'static [&'static str] {
    &[
        "2012-12-13: version 1.0: initial version",
        "2012-12-31: version 1.1: improved moving focus",
        "2015-08-24: version 1.2: move item with CTRL, add selected with SHIFT, can move multiple items",
        "2015-09-18: version 1.3: added verbosity",
        "2015-08-16: version 1.4: key press handling reports its outcome",
    ]
}
