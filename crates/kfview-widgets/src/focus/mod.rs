#![forbid(unsafe_code)]

//! Focus management: directional search and focus/selection primitives.

pub mod selection;
pub mod spatial;

pub use selection::{
    deselect_all, do_focus, do_select, move_selected, random_focus, random_selection,
    really_lose_focus,
};
pub use spatial::{ConePolicy, SearchPredicate, find_next, find_next_with};
