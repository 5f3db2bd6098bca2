#![forbid(unsafe_code)]

//! End-to-end auto-resize behaviour over the public API.

use hketa_core::{Constraints, Density, DisplayConfig, Size, Sp};
use hketa_text::{
    AutoResizeText, FontSizeRange, MonospaceMeasurer, RenderEnv, TextError, converge,
    converge_with, remember_auto_resize_state,
};
use proptest::prelude::*;

const LONG_WORD: &str = "Supercalifragilisticexpialidocious";

fn env() -> RenderEnv {
    RenderEnv::new(Density::ONE, Size::new(380, 800))
}

fn row(max_width: u32) -> Constraints {
    Constraints::new(0, max_width, 0, 800)
}

fn measurer() -> MonospaceMeasurer {
    MonospaceMeasurer::new().advance_ratio(1.0)
}

#[test]
fn eta_board_destinations_share_one_size() {
    let range = FontSizeRange::new(Sp(10.0), Sp(20.0), Sp(1.0)).unwrap();
    let group = remember_auto_resize_state(range, true);
    let mut texts = vec![
        AutoResizeText::new("Hello", &group),
        AutoResizeText::new(LONG_WORD, &group),
    ];

    let rendered = converge(&mut texts, &mut measurer(), row(380), env()).unwrap();
    assert_eq!(rendered.len(), 2);
    assert!(rendered.iter().all(|r| r.font_size == Sp(11.0)));
    assert!(rendered.iter().all(|r| r.opacity == 1.0));
    assert_eq!(rendered[1].layout.size.width, 374);
}

#[test]
fn separate_groups_do_not_interact() {
    let range = FontSizeRange::new(Sp(10.0), Sp(20.0), Sp(1.0)).unwrap();
    let routes = remember_auto_resize_state(range, true);
    let destinations = remember_auto_resize_state(range, true);
    assert!(!routes.same_group(&destinations));

    let mut texts = vec![
        AutoResizeText::new("1A", &routes),
        AutoResizeText::new(LONG_WORD, &destinations),
    ];
    let rendered = converge(&mut texts, &mut measurer(), row(380), env()).unwrap();
    assert_eq!(rendered[0].font_size, Sp(20.0));
    assert_eq!(rendered[1].font_size, Sp(11.0));
}

#[test]
fn per_text_constraints() {
    let range = FontSizeRange::new(Sp(10.0), Sp(20.0), Sp(1.0)).unwrap();
    let group = remember_auto_resize_state(range, true);
    let mut texts = vec![
        AutoResizeText::new("Hello", &group),
        AutoResizeText::new("Hello", &group),
    ];
    // The second slot is narrow enough to need 12sp.
    let widths = [380, 60];
    let rendered =
        converge_with(&mut texts, &mut measurer(), env(), |i| row(widths[i])).unwrap();
    assert!(rendered.iter().all(|r| r.font_size == Sp(12.0)));
}

#[test]
fn window_resize_restarts_and_grows_back() {
    let range = FontSizeRange::new(Sp(10.0), Sp(20.0), Sp(1.0)).unwrap();
    let group = remember_auto_resize_state(range, true);
    let mut texts = vec![AutoResizeText::new("Hello", &group)];
    let mut m = measurer();

    let narrow = RenderEnv::new(Density::ONE, Size::new(60, 800));
    let rendered = converge(&mut texts, &mut m, row(60), narrow).unwrap();
    assert_eq!(rendered[0].font_size, Sp(12.0));

    let wide = RenderEnv::from(&DisplayConfig {
        window_size: Size::new(380, 800),
        ..DisplayConfig::default()
    });
    let rendered = converge(&mut texts, &mut m, row(380), wide).unwrap();
    assert_eq!(rendered[0].font_size, Sp(20.0));
}

#[test]
fn reconfigure_keeps_subscribers() {
    let group = remember_auto_resize_state(FontSizeRange::up_to(Sp(20.0)).unwrap(), true);
    let mut texts = vec![AutoResizeText::new("Hello", &group)];
    converge(&mut texts, &mut measurer(), row(380), env()).unwrap();

    let smaller = FontSizeRange::new(Sp(8.0), Sp(14.0), Sp(2.0)).unwrap();
    assert!(group.reconfigure(smaller, false));
    assert_eq!(group.snapshot().subscriber_count(), 1);

    let rendered = converge(&mut texts, &mut measurer(), row(380), env()).unwrap();
    assert_eq!(rendered[0].font_size, Sp(14.0));
}

#[test]
fn invalid_ranges_are_rejected() {
    assert_eq!(
        FontSizeRange::new(Sp(12.0), Sp(12.0), Sp(1.0)),
        Err(TextError::InvalidFontSizeRange { min: 12.0, max: 12.0 })
    );
    assert_eq!(
        FontSizeRange::new(Sp(8.0), Sp(12.0), Sp(0.0)),
        Err(TextError::InvalidStep(0.0))
    );
}

proptest! {
    #[test]
    fn converged_group_uses_its_smallest_candidate(
        words in prop::collection::vec("[a-z]{1,24}", 1..6),
        max_width in 40u32..400,
    ) {
        let range = FontSizeRange::new(Sp(6.0), Sp(24.0), Sp(1.0)).unwrap();
        let group = remember_auto_resize_state(range, true);
        let mut texts: Vec<_> = words.iter().map(|w| AutoResizeText::new(w.as_str(), &group)).collect();

        let rendered = converge(&mut texts, &mut measurer(), row(max_width), env()).unwrap();
        let state = group.snapshot();
        prop_assert!(state.ready_to_draw());
        for r in &rendered {
            prop_assert_eq!(r.font_size, state.font_size());
            prop_assert!(r.font_size.value() >= range.min().value());
            prop_assert!(r.font_size.value() <= range.max().value());
            prop_assert_eq!(r.opacity, 1.0);
        }
    }

    #[test]
    fn converging_twice_is_stable(word in "[a-z]{1,30}", max_width in 40u32..400) {
        let range = FontSizeRange::new(Sp(8.0), Sp(20.0), Sp(1.0)).unwrap();
        let group = remember_auto_resize_state(range, true);
        let mut texts = vec![AutoResizeText::new(word, &group)];
        let mut m = measurer();

        let first = converge(&mut texts, &mut m, row(max_width), env()).unwrap();
        let version = group.version();
        let second = converge(&mut texts, &mut m, row(max_width), env()).unwrap();
        prop_assert_eq!(first, second);
        prop_assert_eq!(group.version(), version);
    }
}
