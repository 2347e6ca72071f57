#![no_main]

use libfuzzer_sys::fuzz_target;
use sepa_pain::pain::XmlNode;

fuzz_target!(|data: &[u8]| {
    if let Ok(s) = std::str::from_utf8(data) {
        let (name, text) = s.split_once('\u{0}').unwrap_or(("Ustrd", s));
        // Errors are fine, panics are bugs.
        if let Ok(mut node) = XmlNode::new(name) {
            if node.set_text(text).is_ok() {
                let _ = node.set_attribute("Ccy", text);
                let _ = node.render(0, true);
            }
        }
    }
});
