//! Test fixtures: minimal PNG/JPEG/MP4 blobs and multipart parts built from them.

#![allow(dead_code)]

use axum_test::multipart::Part;
use bytes::Bytes;

/// Minimal valid 1x1 PNG bytes.
pub fn create_minimal_png() -> Vec<u8> {
    vec![
        0x89, 0x50, 0x4E, 0x47, 0x0D, 0x0A, 0x1A, 0x0A, 0x00, 0x00, 0x00, 0x0D, 0x49, 0x48, 0x44,
        0x52, 0x00, 0x00, 0x00, 0x01, 0x00, 0x00, 0x00, 0x01, 0x08, 0x02, 0x00, 0x00, 0x00, 0x90,
        0x77, 0x53, 0xDE, 0x00, 0x00, 0x00, 0x0C, 0x49, 0x44, 0x41, 0x54, 0x08, 0xD7, 0x63, 0xF8,
        0x00, 0x00, 0x00, 0x00, 0x01, 0x00, 0x01, 0x00, 0x18, 0xDD, 0x8D, 0x89, 0x00, 0x00, 0x00,
        0x00, 0x49, 0x45, 0x4E, 0x44, 0xAE, 0x42, 0x60, 0x82,
    ]
}

/// JPEG SOI/APP0 header followed by EOI. Enough for content sniffing; not decodable.
pub fn create_minimal_jpeg() -> Vec<u8> {
    let mut jpeg = vec![0xFF, 0xD8, 0xFF, 0xE0, 0x00, 0x10];
    jpeg.extend_from_slice(b"JFIF\0");
    jpeg.extend_from_slice(&[0x01, 0x01, 0x00, 0x00, 0x01, 0x00, 0x01, 0x00, 0x00]);
    jpeg.extend_from_slice(&[0xFF, 0xD9]);
    jpeg
}

/// Minimal MP4 `ftyp` box.
pub fn create_minimal_mp4() -> Vec<u8> {
    let mut mp4 = Vec::new();
    mp4.extend_from_slice(&24u32.to_be_bytes());
    mp4.extend_from_slice(b"ftyp");
    mp4.extend_from_slice(b"isom");
    mp4.extend_from_slice(&0x200u32.to_be_bytes());
    mp4.extend_from_slice(b"isommp41");
    mp4
}

pub fn png_part(file_name: &str) -> Part {
    Part::bytes(Bytes::from(create_minimal_png()))
        .file_name(file_name.to_string())
        .mime_type("image/png")
}

pub fn jpeg_part(file_name: &str) -> Part {
    Part::bytes(Bytes::from(create_minimal_jpeg()))
        .file_name(file_name.to_string())
        .mime_type("image/jpeg")
}

pub fn mp4_part(file_name: &str) -> Part {
    Part::bytes(Bytes::from(create_minimal_mp4()))
        .file_name(file_name.to_string())
        .mime_type("video/mp4")
}

pub fn pdf_part(file_name: &str) -> Part {
    Part::bytes(Bytes::from_static(b"%PDF-1.4\n%%EOF\n"))
        .file_name(file_name.to_string())
        .mime_type("application/pdf")
}

/// A part of `len` zero bytes declared as PNG.
pub fn sized_png_part(file_name: &str, len: usize) -> Part {
    Part::bytes(Bytes::from(vec![0u8; len]))
        .file_name(file_name.to_string())
        .mime_type("image/png")
}
