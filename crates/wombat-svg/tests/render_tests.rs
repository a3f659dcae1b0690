//! Tests for tree rendering against the recording canvas.

use std::collections::HashMap;
use std::f64::consts::TAU;
use std::path::{Path, PathBuf};

use wombat_dom::AttributesMap;
use wombat_svg::{
    CanvasOp, Color, DocumentLoader, FillRule, FontFace, LoadedDocument, PaintKind, PaintRecord,
    RecordingCanvas, SvgError, Unit, render_document,
};
use wombat_xml::{ParseOptions, parse_svg, parse_svg_with};

/// Loader serving documents from memory, keyed by href.
#[derive(Default)]
struct MemoryLoader {
    documents: HashMap<&'static str, &'static str>,
}

impl MemoryLoader {
    fn with(mut self, href: &'static str, source: &'static str) -> Self {
        let _ = self.documents.insert(href, source);
        self
    }
}

impl DocumentLoader for MemoryLoader {
    fn load(
        &self,
        href: &str,
        _base: Option<&Path>,
        inherited: &AttributesMap,
    ) -> Result<LoadedDocument, SvgError> {
        let failure = |reason: String| SvgError::ReferenceResolution {
            href: href.to_string(),
            reason,
        };
        let source = self
            .documents
            .get(href)
            .ok_or_else(|| failure("not found".to_string()))?;
        let options = ParseOptions {
            inherited: Some(inherited),
            element_id: None,
        };
        let tree = parse_svg_with(source, &options).map_err(|error| failure(error.to_string()))?;
        Ok(LoadedDocument {
            tree,
            location: Some(PathBuf::from(href)),
        })
    }
}

/// Render `source` with `loader`, returning the recording and the outcome.
fn record_with(source: &str, loader: &MemoryLoader) -> (RecordingCanvas, Result<(), SvgError>) {
    let tree = parse_svg(source).expect("test document should parse");
    let mut canvas = RecordingCanvas::new();
    let result = render_document(&mut canvas, &tree, loader, None);
    (canvas, result)
}

/// Render `source`, which must succeed.
fn record(source: &str) -> RecordingCanvas {
    let (canvas, result) = record_with(source, &MemoryLoader::default());
    result.expect("render should succeed");
    canvas
}

fn count(canvas: &RecordingCanvas, op: &CanvasOp) -> usize {
    canvas.ops().iter().filter(|recorded| *recorded == op).count()
}

fn assert_bounds(paint: &PaintRecord, expected: [f64; 4]) {
    for (actual, expected) in paint.bounds.iter().zip(expected) {
        assert!(
            (actual - expected).abs() < 0.5,
            "bounds {:?} differ from {expected:?}",
            paint.bounds
        );
    }
}

#[test]
fn test_circle_end_to_end() {
    let canvas = record(
        r##"<svg xmlns="http://www.w3.org/2000/svg" width="100" height="100">
            <circle cx="50" cy="50" r="40" fill="#ff0000" stroke="#000000" stroke-width="2"/>
        </svg>"##,
    );

    let ops = canvas.ops();
    let arc = ops
        .iter()
        .position(|op| matches!(op, CanvasOp::Arc { .. }))
        .expect("circle should draw an arc");
    assert_eq!(ops[arc - 1], CanvasOp::NewSubPath);
    assert_eq!(
        ops[arc..arc + 8],
        [
            CanvasOp::Arc {
                xc: 50.0,
                yc: 50.0,
                radius: 40.0,
                angle1: 0.0,
                angle2: TAU
            },
            CanvasOp::SetLineWidth { width: 2.0 },
            CanvasOp::SetSource {
                color: Color::BLACK
            },
            CanvasOp::StrokePreserve,
            CanvasOp::SetFillRule {
                rule: FillRule::NonZero
            },
            CanvasOp::SetSource {
                color: Color::rgba(1.0, 0.0, 0.0, 1.0)
            },
            CanvasOp::Fill,
            CanvasOp::Restore,
        ]
    );

    let paints = canvas.paints();
    assert_eq!(paints.len(), 2);
    assert_eq!(paints[0].kind, PaintKind::Stroke);
    assert_eq!(paints[0].color, Color::BLACK);
    assert_eq!(paints[0].width, 2.0);
    assert_bounds(&paints[0], [10.0, 10.0, 90.0, 90.0]);
    assert_eq!(paints[1].kind, PaintKind::Fill);
    assert_eq!(paints[1].color, Color::rgba(1.0, 0.0, 0.0, 1.0));
    assert_bounds(&paints[1], [10.0, 10.0, 90.0, 90.0]);
}

#[test]
fn test_save_restore_balance() {
    let canvas = record(
        r#"<svg xmlns="http://www.w3.org/2000/svg" width="10" height="10">
            <g><g><rect width="1" height="1"/></g><line x2="3"/></g>
            <unknown><circle r="1"/></unknown>
        </svg>"#,
    );
    // Seven nodes, one of them the document element.
    assert_eq!(count(&canvas, &CanvasOp::Save), 6);
    assert_eq!(count(&canvas, &CanvasOp::Restore), 6);
    assert_eq!(canvas.depth(), 0);
}

#[test]
fn test_save_restore_balance_on_error() {
    let (canvas, result) = record_with(
        r#"<svg xmlns="http://www.w3.org/2000/svg" width="10" height="10">
            <g><g><path d="M0 0 L1 1 A 1 1 0 0 0 2 2"/></g></g>
            <rect width="1" height="1"/>
        </svg>"#,
        &MemoryLoader::default(),
    );
    assert_eq!(result, Err(SvgError::UnsupportedPathCommand('A')));
    assert_eq!(count(&canvas, &CanvasOp::Save), 3);
    assert_eq!(count(&canvas, &CanvasOp::Restore), 3);
    assert_eq!(canvas.depth(), 0);
}

#[test]
fn test_unknown_tags_render_children() {
    let canvas = record(
        r#"<svg xmlns="http://www.w3.org/2000/svg" width="10" height="10">
            <blink><circle r="2" fill="blue"/></blink>
        </svg>"#,
    );
    assert_eq!(canvas.paints().len(), 1);
    assert_eq!(canvas.paints()[0].color, Color::rgba(0.0, 0.0, 1.0, 1.0));
}

#[test]
fn test_opacity_multiplies() {
    let canvas = record(
        r#"<svg xmlns="http://www.w3.org/2000/svg" width="10" height="10">
            <rect width="4" height="4" fill="red" opacity="0.5" fill-opacity="0.5"/>
        </svg>"#,
    );
    assert_eq!(canvas.paints().len(), 1);
    assert_eq!(canvas.paints()[0].color.a, 0.25);
    assert_bounds(&canvas.paints()[0], [0.0, 0.0, 4.0, 4.0]);
}

#[test]
fn test_path_default_stroke_width_and_fill_rule() {
    let canvas = record(
        r#"<svg xmlns="http://www.w3.org/2000/svg" width="10" height="10">
            <path d="M0 0 L10 0 L10 10 Z" stroke="black" fill-rule="evenodd"/>
        </svg>"#,
    );
    assert_eq!(count(&canvas, &CanvasOp::SetLineWidth { width: 1.0 }), 1);
    assert_eq!(
        count(
            &canvas,
            &CanvasOp::SetFillRule {
                rule: FillRule::EvenOdd
            }
        ),
        1
    );
    let paints = canvas.paints();
    assert_eq!(paints.len(), 1);
    assert_eq!(paints[0].kind, PaintKind::Stroke);
    assert_eq!(paints[0].width, 1.0);
}

#[test]
fn test_transform_and_position() {
    let canvas = record(
        r#"<svg xmlns="http://www.w3.org/2000/svg" width="100" height="100">
            <rect x="1" y="2" width="3" height="4" fill="black" transform="translate(10 20) scale(2)"/>
        </svg>"#,
    );
    assert_bounds(&canvas.paints()[0], [12.0, 24.0, 18.0, 32.0]);
}

#[test]
fn test_root_viewbox_is_applied() {
    let canvas = record(
        r#"<svg xmlns="http://www.w3.org/2000/svg" width="100" height="50" viewBox="0 0 10 10">
            <rect width="10" height="10" fill="black"/>
        </svg>"#,
    );
    assert_eq!(canvas.ops()[0], CanvasOp::Scale { sx: 10.0, sy: 5.0 });
    assert_bounds(&canvas.paints()[0], [0.0, 0.0, 100.0, 50.0]);
}

#[test]
fn test_shapes() {
    let canvas = record(
        r#"<svg xmlns="http://www.w3.org/2000/svg" width="100" height="100" fill="black">
            <ellipse cx="50" cy="50" rx="20" ry="10"/>
            <polygon points="0,0 10,0 10,10"/>
            <polyline points="0 0 5 5" stroke="black" stroke-width="1" fill="none"/>
            <rect x="5" y="5" width="10" height="10" rx="2"/>
        </svg>"#,
    );
    let paints = canvas.paints();
    assert_eq!(paints.len(), 4);
    assert_bounds(&paints[0], [30.0, 40.0, 70.0, 60.0]);
    assert_bounds(&paints[1], [0.0, 0.0, 10.0, 10.0]);
    assert_eq!(paints[2].kind, PaintKind::Stroke);
    assert_bounds(&paints[3], [5.0, 5.0, 15.0, 15.0]);
}

#[test]
fn test_odd_polyline_points_fail() {
    let (_, result) = record_with(
        r#"<svg xmlns="http://www.w3.org/2000/svg"><polyline points="0 0 5"/></svg>"#,
        &MemoryLoader::default(),
    );
    assert!(matches!(
        result,
        Err(SvgError::MalformedAttributeValue { .. })
    ));
}

#[test]
fn test_unresolved_unit_propagates() {
    let (_, result) = record_with(
        r#"<svg xmlns="http://www.w3.org/2000/svg" width="10" height="10"><circle r="5em"/></svg>"#,
        &MemoryLoader::default(),
    );
    assert_eq!(
        result,
        Err(SvgError::UnresolvedUnit {
            unit: Unit::Em,
            value: "5em".to_string()
        })
    );
}

#[test]
fn test_text_paints_glyphs_once() {
    let canvas = record(
        r#"<svg xmlns="http://www.w3.org/2000/svg" width="100" height="100">
            <text x="10" y="20" font-size="10" font-weight="BOLD">Hi</text>
        </svg>"#,
    );
    let ops = canvas.ops();
    let show = ops
        .iter()
        .position(|op| *op == CanvasOp::ShowText { text: "Hi".to_string() })
        .expect("text should be shown");
    assert_eq!(ops[show - 2], CanvasOp::MoveTo { x: 10.0, y: 20.0 });
    assert_eq!(ops[show - 1], CanvasOp::SetSource { color: Color::BLACK });
    assert_eq!(ops[show + 2], CanvasOp::TextPath { text: "Hi".to_string() });
    assert!(ops.contains(&CanvasOp::SelectFontFace {
        face: FontFace {
            weight: wombat_svg::FontWeight::Bold,
            ..FontFace::default()
        }
    }));
    assert!(ops.contains(&CanvasOp::SetSource {
        color: Color::TRANSPARENT
    }));

    let paints = canvas.paints();
    assert_eq!(paints.len(), 1);
    assert_eq!(paints[0].color, Color::BLACK);
    assert_bounds(&paints[0], [10.0, 13.0, 22.0, 20.0]);
}

#[test]
fn test_text_default_size_and_anchor() {
    let canvas = record(
        r#"<svg xmlns="http://www.w3.org/2000/svg" width="100" height="100">
            <text x="50" y="20" text-anchor="middle">
abcd
</text>
        </svg>"#,
    );
    // 4 glyphs of 0.6 × 12pt.
    assert!(canvas.ops().contains(&CanvasOp::SetFontSize { size: 12.0 }));
    assert!(canvas.ops().contains(&CanvasOp::ShowText {
        text: "abcd".to_string()
    }));
    let moved = CanvasOp::MoveTo {
        x: 50.0 - 4.0 * 0.6 * 12.0 / 2.0,
        y: 20.0,
    };
    assert_eq!(count(&canvas, &moved), 2);
}

#[test]
fn test_tspan_continues_from_cursor() {
    let canvas = record(
        r#"<svg xmlns="http://www.w3.org/2000/svg" width="100" height="100"><text x="10" y="20" font-size="10">Hi<tspan dx="5">there</tspan><tspan x="0" dy="15">next</tspan></text></svg>"#,
    );
    let ops = canvas.ops();
    let shown_at = |text: &str| {
        let index = ops
            .iter()
            .position(|op| *op == CanvasOp::ShowText { text: text.to_string() })
            .expect("text should be shown");
        ops[index - 2].clone()
    };
    assert_eq!(shown_at("there"), CanvasOp::MoveTo { x: 27.0, y: 20.0 });
    // "there" ends at 27 + 5 × 6 = 57; x is reset, y continues.
    assert_eq!(shown_at("next"), CanvasOp::MoveTo { x: 0.0, y: 35.0 });
}

#[test]
fn test_use_renders_reference_with_viewbox() {
    let loader = MemoryLoader::default().with(
        "shape.svg",
        r#"<svg xmlns="http://www.w3.org/2000/svg" viewBox="0 0 50 50"><rect width="10" height="10" fill="blue"/></svg>"#,
    );
    let (canvas, result) = record_with(
        r#"<svg xmlns="http://www.w3.org/2000/svg" xmlns:xlink="http://www.w3.org/1999/xlink" width="100" height="100">
            <use xlink:href="shape.svg"/>
        </svg>"#,
        &loader,
    );
    result.unwrap();

    let ops = canvas.ops();
    let scale = ops
        .iter()
        .position(|op| matches!(op, CanvasOp::Scale { .. }))
        .expect("viewBox should scale");
    assert_eq!(ops[scale], CanvasOp::Scale { sx: 1.0, sy: 1.0 });
    assert_eq!(ops[scale + 1], CanvasOp::Translate { tx: 0.0, ty: 0.0 });
    assert_bounds(&canvas.paints()[0], [0.0, 0.0, 10.0, 10.0]);
}

#[test]
fn test_sized_use_scales_reference_viewbox() {
    let loader = MemoryLoader::default().with(
        "shape.svg",
        r#"<svg xmlns="http://www.w3.org/2000/svg" viewBox="0 0 50 50"><rect width="10" height="10" fill="blue"/></svg>"#,
    );
    let (canvas, result) = record_with(
        r#"<svg xmlns="http://www.w3.org/2000/svg" width="200" height="200">
            <use href="shape.svg" width="100" height="100" transform="translate(5 5)"/>
        </svg>"#,
        &loader,
    );
    result.unwrap();

    let ops = canvas.ops();
    let scale = ops
        .iter()
        .position(|op| matches!(op, CanvasOp::Scale { .. }))
        .expect("viewBox should scale");
    assert_eq!(ops[scale], CanvasOp::Scale { sx: 2.0, sy: 2.0 });
    assert_eq!(ops[scale + 1], CanvasOp::Translate { tx: 0.0, ty: 0.0 });
    // The use transform is not seeded into the referenced root.
    assert_eq!(count(&canvas, &CanvasOp::Translate { tx: 5.0, ty: 5.0 }), 1);
    let paints = canvas.paints();
    assert_eq!(paints.len(), 1);
    assert_eq!(paints[0].color, Color::rgba(0.0, 0.0, 1.0, 1.0));
    assert_bounds(&paints[0], [5.0, 5.0, 25.0, 25.0]);
}

#[test]
fn test_use_translates_and_inherits() {
    let loader = MemoryLoader::default().with(
        "shape.svg",
        r#"<svg xmlns="http://www.w3.org/2000/svg" width="10" height="10"><rect width="10" height="10"/></svg>"#,
    );
    let (canvas, result) = record_with(
        r#"<svg xmlns="http://www.w3.org/2000/svg" width="100" height="100">
            <use href="shape.svg" x="30" y="40" fill="green"/>
        </svg>"#,
        &loader,
    );
    result.unwrap();

    assert!(canvas.ops().contains(&CanvasOp::Translate { tx: 30.0, ty: 40.0 }));
    let paints = canvas.paints();
    assert_eq!(paints.len(), 1);
    assert_eq!(paints[0].color, Color::rgba(0.0, 128.0 / 255.0, 0.0, 1.0));
    assert_bounds(&paints[0], [30.0, 40.0, 40.0, 50.0]);
}

#[test]
fn test_use_missing_reference_fails() {
    let (canvas, result) = record_with(
        r#"<svg xmlns="http://www.w3.org/2000/svg"><g><use href="gone.svg"/></g></svg>"#,
        &MemoryLoader::default(),
    );
    assert!(matches!(
        result,
        Err(SvgError::ReferenceResolution { href, .. }) if href == "gone.svg"
    ));
    assert_eq!(canvas.depth(), 0);
}

#[test]
fn test_use_cycle_is_bounded() {
    let loader = MemoryLoader::default().with(
        "loop.svg",
        r#"<svg xmlns="http://www.w3.org/2000/svg"><use href="loop.svg"/></svg>"#,
    );
    let (canvas, result) = record_with(
        r#"<svg xmlns="http://www.w3.org/2000/svg"><use href="loop.svg"/></svg>"#,
        &loader,
    );
    assert!(matches!(
        result,
        Err(SvgError::ReferenceResolution { reason, .. }) if reason.contains("nested")
    ));
    assert_eq!(count(&canvas, &CanvasOp::Save), count(&canvas, &CanvasOp::Restore));
}
