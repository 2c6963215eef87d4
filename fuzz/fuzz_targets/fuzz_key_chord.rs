#![no_main]

use kfview_core::event::{KeyEvent, parse_key_script};
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &str| {
    if let Ok(key) = data.parse::<KeyEvent>() {
        // Rendered chords parse back to the same key.
        let rendered = key.to_string();
        assert_eq!(rendered.parse::<KeyEvent>().ok(), Some(key));
    }
    let _ = parse_key_script(data);
});
