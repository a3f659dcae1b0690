//! Tests for attribute value resolution.

use quickcheck::TestResult;
use quickcheck_macros::quickcheck;
use strum::IntoEnumIterator;
use wombat_svg::{
    Color, SvgError, Unit, normalize_number_list, resolve_color, resolve_length, resolve_number,
    resolve_point,
};

/// Assert two floats are equal within a small tolerance.
fn assert_close(actual: f64, expected: f64) {
    assert!(
        (actual - expected).abs() < 1e-9,
        "expected {expected}, got {actual}"
    );
}

#[test]
fn test_length_empty_and_absent() {
    assert_eq!(resolve_length(None).unwrap(), 0.0);
    assert_eq!(resolve_length(Some("")).unwrap(), 0.0);
    assert_eq!(resolve_length(Some("  ")).unwrap(), 0.0);
}

#[test]
fn test_length_plain_numbers() {
    assert_eq!(resolve_length(Some("42")).unwrap(), 42.0);
    assert_eq!(resolve_length(Some(" -3.5 ")).unwrap(), -3.5);
    assert_eq!(resolve_length(Some("1e2")).unwrap(), 100.0);
}

#[test]
fn test_length_every_absolute_unit() {
    for unit in Unit::iter() {
        let Some(factor) = unit.factor() else {
            continue;
        };
        for value in [0.0, 1.0, -3.5, 100.0] {
            let text = format!("{value}{}", unit.symbol());
            assert_close(resolve_length(Some(&text)).unwrap(), value * factor);
        }
    }
}

#[test]
fn test_length_unit_factors() {
    assert_close(resolve_length(Some("1in")).unwrap(), 72.0);
    assert_close(resolve_length(Some("2.54cm")).unwrap(), 72.0);
    assert_close(resolve_length(Some("25.4mm")).unwrap(), 72.0);
    assert_close(resolve_length(Some("2pc")).unwrap(), 24.0);
    assert_close(resolve_length(Some("7px")).unwrap(), 7.0);
    assert_close(resolve_length(Some("12pt")).unwrap(), 12.0);
}

#[test]
fn test_length_relative_units_are_unresolved() {
    for (text, unit) in [("2em", Unit::Em), ("1ex", Unit::Ex), ("50%", Unit::Percent)] {
        assert_eq!(
            resolve_length(Some(text)),
            Err(SvgError::UnresolvedUnit {
                unit,
                value: text.to_string()
            })
        );
    }
}

#[test]
fn test_length_garbage_is_malformed() {
    assert!(matches!(
        resolve_length(Some("wide")),
        Err(SvgError::MalformedAttributeValue { .. })
    ));
    assert!(matches!(
        resolve_length(Some("pxpx")),
        Err(SvgError::MalformedAttributeValue { .. })
    ));
}

#[quickcheck]
fn prop_length_scales_by_unit_factor(value: f64) -> TestResult {
    if !value.is_finite() {
        return TestResult::discard();
    }
    let all_match = Unit::iter().all(|unit| {
        let text = format!("{value}{}", unit.symbol());
        match unit.factor() {
            Some(factor) => resolve_length(Some(&text)) == Ok(value * factor),
            None => matches!(resolve_length(Some(&text)), Err(SvgError::UnresolvedUnit { .. })),
        }
    });
    TestResult::from_bool(all_match)
}

#[quickcheck]
fn prop_plain_numbers_pass_through(value: f64) -> TestResult {
    if !value.is_finite() {
        return TestResult::discard();
    }
    TestResult::from_bool(resolve_length(Some(&value.to_string())) == Ok(value))
}

#[test]
fn test_color_none() {
    assert_eq!(resolve_color(None, 1.0).unwrap(), Color::TRANSPARENT);
    assert_eq!(resolve_color(Some("none"), 1.0).unwrap(), Color::TRANSPARENT);
    assert_eq!(resolve_color(Some(""), 1.0).unwrap(), Color::TRANSPARENT);
}

#[test]
fn test_color_short_hex() {
    assert_eq!(
        resolve_color(Some("#f00"), 1.0).unwrap(),
        Color::rgba(1.0, 0.0, 0.0, 1.0)
    );
}

#[test]
fn test_color_long_hex_with_opacity() {
    let color = resolve_color(Some("#00ff00"), 0.5).unwrap();
    assert_eq!(color, Color::rgba(0.0, 1.0, 0.0, 0.5));
}

#[test]
fn test_color_hex_alpha_multiplies_opacity() {
    let color = resolve_color(Some("#ff000080"), 1.0).unwrap();
    assert_close(color.a, 128.0 / 255.0);

    let color = resolve_color(Some("#ff000080"), 0.5).unwrap();
    assert_close(color.a, 0.5 * 128.0 / 255.0);

    let color = resolve_color(Some("#f008"), 1.0).unwrap();
    assert_close(color.a, 136.0 / 255.0);
    assert_close(color.r, 1.0);
}

#[test]
fn test_color_keywords_case_insensitive() {
    let expected = Color::rgba(1.0, 0.0, 0.0, 1.0);
    assert_eq!(resolve_color(Some("red"), 1.0).unwrap(), expected);
    assert_eq!(resolve_color(Some("RED"), 1.0).unwrap(), expected);
    assert_eq!(resolve_color(Some(" Red "), 1.0).unwrap(), expected);

    let navy = resolve_color(Some("Navy"), 1.0).unwrap();
    assert_close(navy.b, 128.0 / 255.0);
    assert!(!resolve_color(Some("transparent"), 1.0).unwrap().is_visible());
}

#[test]
fn test_color_malformed() {
    for text in ["#12", "#12345", "#ggg", "notacolor", "rgb(1,2,3)"] {
        assert!(
            matches!(
                resolve_color(Some(text), 1.0),
                Err(SvgError::MalformedAttributeValue { .. })
            ),
            "{text} should be rejected"
        );
    }
}

#[test]
fn test_point_with_rest() {
    let point = resolve_point(Some("10 20 rest")).unwrap();
    assert_eq!((point.x, point.y, point.rest), (10.0, 20.0, "rest"));
}

#[test]
fn test_point_exact_pair_and_absent() {
    let point = resolve_point(Some("1 2")).unwrap();
    assert_eq!((point.x, point.y, point.rest), (1.0, 2.0, ""));

    let point = resolve_point(None).unwrap();
    assert_eq!((point.x, point.y, point.rest), (0.0, 0.0, ""));
}

#[test]
fn test_point_chains() {
    let first = resolve_point(Some("1 2 3 4 5 6")).unwrap();
    let second = resolve_point(Some(first.rest)).unwrap();
    let third = resolve_point(Some(second.rest)).unwrap();
    assert_eq!((second.x, second.y), (3.0, 4.0));
    assert_eq!((third.x, third.y, third.rest), (5.0, 6.0, ""));
}

#[test]
fn test_point_single_token_is_malformed() {
    assert!(matches!(
        resolve_point(Some("10")),
        Err(SvgError::MalformedAttributeValue { .. })
    ));
}

#[test]
fn test_normalize_number_list() {
    assert_eq!(normalize_number_list("-1-2"), "-1 -2");
    assert_eq!(normalize_number_list("1,2 ,  3\t4"), "1 2 3 4");
    assert_eq!(normalize_number_list("1e-5-2"), "1e-5 -2");
    assert_eq!(normalize_number_list("3, -4"), "3 -4");
}

#[test]
fn test_resolve_number() {
    assert_eq!(resolve_number(None, 1.0).unwrap(), 1.0);
    assert_eq!(resolve_number(Some("0.25"), 1.0).unwrap(), 0.25);
    assert!(resolve_number(Some("half"), 1.0).is_err());
}
