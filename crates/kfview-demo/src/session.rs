#![forbid(unsafe_code)]

//! Key sessions: scripted replays and the "virtual bastard".
//!
//! The virtual bastard is an impatient user mashing keys: every press is an
//! arrow key or Space, with a random modifier, drawn from a seeded source so
//! a session can be replayed exactly.

use kfview_core::event::{KeyCode, KeyEvent, Modifiers};
use kfview_widgets::{KeyboardFriendlyView, ViewAction};
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use serde::Serialize;

/// One dispatched key and its outcome.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Step {
    pub key: String,
    pub action: String,
}

impl Step {
    fn new(key: &KeyEvent, action: ViewAction) -> Self {
        Self {
            key: key.to_string(),
            action: action.to_string(),
        }
    }
}

/// Dispatch `keys` in order.
pub fn replay<R: Rng>(view: &mut KeyboardFriendlyView<R>, keys: &[KeyEvent]) -> Vec<Step> {
    keys.iter()
        .map(|key| Step::new(key, view.handle_key(key)))
        .collect()
}

const BASTARD_CODES: [KeyCode; 5] = [
    KeyCode::Up,
    KeyCode::Down,
    KeyCode::Left,
    KeyCode::Right,
    KeyCode::Space,
];

const BASTARD_MODIFIERS: [Modifiers; 3] = [Modifiers::NONE, Modifiers::SHIFT, Modifiers::CTRL];

/// Draw one random key press.
pub fn random_key<R: Rng>(rng: &mut R) -> KeyEvent {
    let code = BASTARD_CODES[rng.gen_range(0..BASTARD_CODES.len())];
    let modifiers = BASTARD_MODIFIERS[rng.gen_range(0..BASTARD_MODIFIERS.len())];
    KeyEvent::new(code).with_modifiers(modifiers)
}

/// Random key source for a bastard session, kept apart from the view's
/// own random source so both stay reproducible.
#[must_use]
pub fn bastard_rng(seed: u64) -> ChaCha8Rng {
    ChaCha8Rng::seed_from_u64(seed.wrapping_add(1))
}

/// Press `presses` random keys.
pub fn virtual_bastard<R: Rng, K: Rng>(
    view: &mut KeyboardFriendlyView<R>,
    presses: usize,
    keys: &mut K,
) -> Vec<Step> {
    let span = tracing::debug_span!("kfview.bastard", presses);
    let _guard = span.enter();
    (0..presses)
        .map(|_| {
            let key = random_key(keys);
            Step::new(&key, view.handle_key(&key))
        })
        .collect()
}
