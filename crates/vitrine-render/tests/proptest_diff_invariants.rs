//! Property-based invariant tests for frame diffing.
//!
//! Verifies:
//! 1. Presenting diffs yields the same page as presenting full frames
//! 2. A frame diffed against itself is empty
//! 3. Class writes on one target never leave a class both added and removed

use proptest::prelude::*;
use vitrine_core::ElementKey;
use vitrine_render::frame::{Frame, Patch};
use vitrine_render::presenter::Presenter;
use vitrine_render::{FrameDiff, VirtualPage};

const KEYS: [ElementKey; 3] = [
    ElementKey::new("a"),
    ElementKey::new("b"),
    ElementKey::indexed("c", 0),
];
const CLASSES: [&str; 4] = ["opacity-0", "opacity-100", "z-0", "z-10"];

#[derive(Debug, Clone)]
enum Op {
    Toggle(usize, usize, bool),
    Text(usize, u8),
    Style(usize, u8),
}

fn arb_op() -> impl Strategy<Value = Op> {
    prop_oneof![
        (0..3usize, 0..4usize, any::<bool>()).prop_map(|(k, c, on)| Op::Toggle(k, c, on)),
        (0..3usize, any::<u8>()).prop_map(|(k, t)| Op::Text(k, t)),
        (0..3usize, any::<u8>()).prop_map(|(k, t)| Op::Style(k, t)),
    ]
}

/// A "view" writes every class of every key so frames are complete.
fn arb_frame() -> impl Strategy<Value = Frame> {
    proptest::collection::vec(arb_op(), 0..12).prop_map(|ops| {
        let mut f = Frame::new();
        for key in KEYS {
            for class in CLASSES {
                f.toggle_class(key, class, false);
            }
            f.set_text(key, "");
            f.set_style(key, "width", "0%");
        }
        for op in ops {
            match op {
                Op::Toggle(k, c, on) => f.toggle_class(KEYS[k], CLASSES[c], on),
                Op::Text(k, t) => f.set_text(KEYS[k], t.to_string()),
                Op::Style(k, t) => f.set_style(KEYS[k], "width", format!("{t}%")),
            }
        }
        f
    })
}

fn fresh_page() -> VirtualPage {
    let mut page = VirtualPage::new();
    for key in KEYS {
        page.declare(key, &[]);
    }
    page
}

proptest! {
    #[test]
    fn diffed_presentation_matches_full(frames in proptest::collection::vec(arb_frame(), 1..8)) {
        let mut full = fresh_page();
        let mut diffed = fresh_page();
        let mut prev: Option<Frame> = None;
        for frame in &frames {
            full.present(frame, None).unwrap();
            let diff = prev.as_ref().map(|p| FrameDiff::compute(p, frame));
            diffed.present(frame, diff.as_ref()).unwrap();
            prev = Some(frame.clone());
        }
        for key in KEYS {
            prop_assert_eq!(full.element(key), diffed.element(key));
        }
    }

    #[test]
    fn self_diff_is_empty(frame in arb_frame()) {
        prop_assert!(FrameDiff::compute(&frame, &frame).is_empty());
    }

    #[test]
    fn class_lists_stay_disjoint(frame in arb_frame()) {
        for patch in frame.patches() {
            if let Patch::Classes { add, remove, .. } = patch {
                for c in add {
                    prop_assert!(!remove.contains(c));
                }
            }
        }
    }
}
