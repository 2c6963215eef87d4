#![no_main]

use arbitrary::Arbitrary;
use kfview_core::event::{KeyCode, KeyEvent, Modifiers};
use kfview_widgets::{ConePolicy, Item, ItemFlags, KeyboardFriendlyView, Scene, ViewConfig};
use libfuzzer_sys::fuzz_target;

#[derive(Arbitrary, Debug)]
struct FuzzItem {
    x: i16,
    y: i16,
    flags: u8,
    visible: bool,
}

#[derive(Arbitrary, Debug)]
enum FuzzKey {
    Up,
    Down,
    Left,
    Right,
    Space,
    Other(char),
}

#[derive(Arbitrary, Debug)]
struct FuzzPress {
    key: FuzzKey,
    modifiers: u8,
}

impl FuzzPress {
    fn to_event(&self) -> KeyEvent {
        let code = match self.key {
            FuzzKey::Up => KeyCode::Up,
            FuzzKey::Down => KeyCode::Down,
            FuzzKey::Left => KeyCode::Left,
            FuzzKey::Right => KeyCode::Right,
            FuzzKey::Space => KeyCode::Space,
            FuzzKey::Other(ch) => KeyCode::Char(ch),
        };
        KeyEvent::new(code).with_modifiers(Modifiers::from_bits_truncate(self.modifiers))
    }
}

#[derive(Arbitrary, Debug)]
struct FuzzSession {
    items: Vec<FuzzItem>,
    focus: Option<u8>,
    symmetric: bool,
    seed: u64,
    presses: Vec<FuzzPress>,
}

fuzz_target!(|input: FuzzSession| {
    let mut scene = Scene::new();
    let ids: Vec<_> = input
        .items
        .iter()
        .take(64)
        .map(|it| {
            scene.insert(
                Item::new((f64::from(it.x), f64::from(it.y)))
                    .with_flags(ItemFlags::from_bits_truncate(it.flags))
                    .with_visible(it.visible),
            )
        })
        .collect();
    if let Some(id) = input.focus.and_then(|idx| ids.get(usize::from(idx))) {
        scene.set_focus(*id);
    }

    let config = ViewConfig {
        cone: if input.symmetric {
            ConePolicy::Symmetric
        } else {
            ConePolicy::Legacy
        },
        seed: input.seed,
        ..ViewConfig::default()
    };
    let mut view = KeyboardFriendlyView::with_config(scene, config);
    for press in input.presses.iter().take(512) {
        view.handle_key(&press.to_event());

        let scene = view.scene();
        assert_eq!(scene.len(), ids.len());
        if let Some(focus) = scene.focus_item() {
            let item = scene.get(focus).expect("focus item exists");
            assert!(item.is_focusable() && item.is_visible() && item.is_enabled());
        }
        for id in scene.selected_items() {
            let item = scene.get(id).expect("selected item exists");
            assert!(item.is_selectable() && item.is_visible());
        }
    }
});
