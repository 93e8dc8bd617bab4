//! Request bodies built from real encoded images

use std::io::Cursor;

use base64::{Engine, engine::general_purpose::STANDARD};
use image::{ImageFormat, Rgb, RgbImage};
use serde_json::{Value, json};

/// PNG bytes of a solid `width` x `height` image
pub fn png(width: u32, height: u32, color: [u8; 3]) -> Vec<u8> {
    let image = RgbImage::from_pixel(width, height, Rgb(color));
    let mut out = Cursor::new(Vec::new());
    image.write_to(&mut out, ImageFormat::Png).expect("encode png");
    out.into_inner()
}

/// Base64 form of [`png`]
pub fn png_base64(width: u32, height: u32, color: [u8; 3]) -> String {
    STANDARD.encode(png(width, height, color))
}

pub fn avatar() -> String {
    png_base64(8, 12, [210, 180, 150])
}

/// Body for `POST /generate`
pub fn single_body() -> Value {
    json!({
        "personImage": avatar(),
        "productImage": png_base64(4, 4, [20, 40, 160]),
        "productName": "Harbour Overshirt",
        "productSize": "M",
        "productDesc": "Heavyweight cotton twill, boxy fit",
        "tone": "warm",
        "style": "editorial"
    })
}

/// Body for `POST /generate_multi_image` with `count` products of distinct widths
pub fn multi_body(count: u32) -> Value {
    let products: Vec<String> = (1..=count).map(|w| png_base64(w, 1, [0, 0, 255])).collect();

    json!({
        "personImage": avatar(),
        "productImages": products,
        "productName": "Harbour Overshirt",
        "productSize": "M",
        "productDesc": "Heavyweight cotton twill, boxy fit"
    })
}

/// Decode the inline image at `parts[index]` of a recorded request and return its width
pub fn inline_width(parts: &Value, index: usize) -> u32 {
    let data = parts[index]["inlineData"]["data"].as_str().expect("inline data");
    let bytes = STANDARD.decode(data).expect("base64");
    image::load_from_memory(&bytes).expect("image").width()
}
