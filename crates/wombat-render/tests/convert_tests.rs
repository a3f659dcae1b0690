//! End-to-end conversion tests: parse, render, encode, decode.

use std::path::PathBuf;

use image::RgbaImage;
use wombat_render::{ConvertError, OutputFormat, RenderOptions, render_file, render_str};
use wombat_svg::{Color, SvgError};

const CIRCLE: &str = r##"<svg xmlns="http://www.w3.org/2000/svg" width="100" height="100">
    <circle cx="50" cy="50" r="40" fill="#ff0000" stroke="#000000" stroke-width="2"/>
</svg>"##;

fn decode(bytes: &[u8]) -> RgbaImage {
    image::load_from_memory(bytes)
        .expect("output should decode")
        .to_rgba8()
}

/// A fresh directory under the system temp dir.
fn scratch_dir(name: &str) -> PathBuf {
    let dir = std::env::temp_dir().join(format!("wombat-{name}-{}", std::process::id()));
    std::fs::create_dir_all(&dir).unwrap();
    dir
}

#[test]
fn test_png_signature() {
    let bytes = render_str(CIRCLE, &RenderOptions::default()).unwrap();
    assert_eq!(&bytes[..8], b"\x89PNG\r\n\x1a\n");
}

#[test]
fn test_circle_pixels() {
    let image = decode(&render_str(CIRCLE, &RenderOptions::default()).unwrap());
    assert_eq!(image.dimensions(), (100, 100));

    // Inside: red fill.
    assert_eq!(image.get_pixel(50, 50).0, [255, 0, 0, 255]);
    // Outer half of the outline: black.
    let outline = image.get_pixel(50, 9).0;
    assert!(outline[0] < 40 && outline[3] > 200, "{outline:?}");
    // Outside: untouched.
    assert_eq!(image.get_pixel(2, 2).0[3], 0);
    assert_eq!(image.get_pixel(97, 97).0[3], 0);
}

#[test]
fn test_scale_multiplies_size() {
    let options = RenderOptions {
        scale: 2.0,
        ..RenderOptions::default()
    };
    let image = decode(&render_str(CIRCLE, &options).unwrap());
    assert_eq!(image.dimensions(), (200, 200));
    assert_eq!(image.get_pixel(100, 100).0, [255, 0, 0, 255]);
}

#[test]
fn test_viewbox_gives_size() {
    let image = decode(
        &render_str(
            r#"<svg xmlns="http://www.w3.org/2000/svg" viewBox="0 0 30 20"><rect width="30" height="20" fill="lime"/></svg>"#,
            &RenderOptions::default(),
        )
        .unwrap(),
    );
    assert_eq!(image.dimensions(), (30, 20));
    assert_eq!(image.get_pixel(15, 10).0, [0, 255, 0, 255]);
}

#[test]
fn test_background() {
    let options = RenderOptions {
        background: Some(Color::WHITE),
        ..RenderOptions::default()
    };
    let image = decode(
        &render_str(
            r#"<svg xmlns="http://www.w3.org/2000/svg" width="4" height="4"/>"#,
            &options,
        )
        .unwrap(),
    );
    assert_eq!(image.get_pixel(3, 3).0, [255, 255, 255, 255]);
}

#[test]
fn test_other_formats() {
    let jpeg = RenderOptions {
        format: OutputFormat::Jpeg,
        ..RenderOptions::default()
    };
    let bytes = render_str(CIRCLE, &jpeg).unwrap();
    assert_eq!(&bytes[..2], [0xFF, 0xD8]);
    // Transparent corners are flattened onto white.
    let corner = decode(&bytes).get_pixel(0, 0).0;
    assert!(corner.iter().all(|&channel| channel > 240), "{corner:?}");

    let bmp = RenderOptions {
        format: OutputFormat::Bmp,
        ..RenderOptions::default()
    };
    let bytes = render_str(CIRCLE, &bmp).unwrap();
    assert_eq!(&bytes[..2], b"BM");
}

#[test]
fn test_no_size() {
    let error = render_str(
        r#"<svg xmlns="http://www.w3.org/2000/svg"><rect width="5" height="5"/></svg>"#,
        &RenderOptions::default(),
    )
    .unwrap_err();
    assert!(matches!(error, ConvertError::NoSize));
}

#[test]
fn test_errors_propagate() {
    let error = render_str("<svg", &RenderOptions::default()).unwrap_err();
    assert!(matches!(error, ConvertError::Parse(_)));

    let error = render_str(
        r#"<svg xmlns="http://www.w3.org/2000/svg" width="5" height="5"><path d="M0 0 Q 1 1 2 2"/></svg>"#,
        &RenderOptions::default(),
    )
    .unwrap_err();
    assert!(matches!(
        error,
        ConvertError::Render(SvgError::UnsupportedPathCommand('Q'))
    ));

    let error = render_file(
        &PathBuf::from("/nonexistent/wombat.svg"),
        &RenderOptions::default(),
    )
    .unwrap_err();
    assert!(matches!(error, ConvertError::Io { .. }));
}

#[test]
fn test_explicit_font_must_exist() {
    let options = RenderOptions {
        font: Some(PathBuf::from("/nonexistent/wombat.ttf")),
        ..RenderOptions::default()
    };
    let error = render_str(CIRCLE, &options).unwrap_err();
    assert!(matches!(error, ConvertError::Io { .. }));
}

#[test]
fn test_render_file_resolves_relative_use() {
    let dir = scratch_dir("convert");
    std::fs::create_dir_all(dir.join("parts")).unwrap();
    std::fs::write(
        dir.join("parts/square.svg"),
        r#"<svg xmlns="http://www.w3.org/2000/svg"><rect id="sq" width="10" height="10"/></svg>"#,
    )
    .unwrap();
    let main = dir.join("main.svg");
    std::fs::write(
        &main,
        r#"<svg xmlns="http://www.w3.org/2000/svg" width="20" height="20">
            <use href="parts/square.svg#sq" x="10" y="10" fill="blue"/>
        </svg>"#,
    )
    .unwrap();

    let image = decode(&render_file(&main, &RenderOptions::default()).unwrap());
    assert_eq!(image.get_pixel(15, 15).0, [0, 0, 255, 255]);
    assert_eq!(image.get_pixel(5, 5).0[3], 0);
}

#[test]
fn test_options_serialize() {
    let json = serde_json::to_value(RenderOptions::default()).unwrap();
    assert_eq!(json["format"], "png");
    assert_eq!(json["scale"], 1.0);
    assert!(json["background"].is_null());
}
