//! Criterion benchmarks for imgtool critical paths
//!
//! Benchmarks the core per-pixel operations:
//! - Sprite: PICO-8/TAC-08 sheet encode and decode
//! - Cart: `.p8` section parsing and sheet extraction
//! - Palette: hex parsing and exact-color remapping
//! - Codec: indexed PNG/GIF encode and decode

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use image::RgbImage;
use imgtool::cart::Cart;
use imgtool::codec::{decode_indexed, encode_indexed, ImageFormat};
use imgtool::hex_palette::parse_hex_palette;
use imgtool::sprite::SpriteFormat;
use imgtool::{IndexedImage, Palette};

// =============================================================================
// Test Data Generators
// =============================================================================

/// 128x128 sheet with a repeating index pattern
fn make_sheet() -> IndexedImage {
    let mut image = IndexedImage::new(128, 128, Palette::pico8());
    for y in 0..128 {
        for x in 0..128 {
            image.set_index(x, y, ((x * 3 + y * 5) % 256) as u8);
        }
    }
    image
}

/// Cart text with a lua section of `code_lines` lines and a full gfx section
fn make_cart(code_lines: usize) -> String {
    let mut text = String::from("pico-8 cartridge // http://www.pico-8.com\nversion 41\n__lua__\n");
    for i in 0..code_lines {
        text.push_str(&format!("x{} = {}\n", i, i));
    }
    let gfx = SpriteFormat::Pico8.render(&make_sheet()).unwrap_or_default();
    text.push_str(&gfx);
    text
}

// =============================================================================
// Sprite Benchmarks
// =============================================================================

fn bench_sprite(c: &mut Criterion) {
    let mut group = c.benchmark_group("sprite");
    let sheet = make_sheet();
    group.throughput(Throughput::Elements(128 * 128));

    for format in [SpriteFormat::Pico8, SpriteFormat::Tac08] {
        let name = format!("{:?}", format).to_lowercase();
        group.bench_function(BenchmarkId::new("encode", &name), |b| {
            b.iter(|| format.encode(black_box(&sheet)))
        });

        let rows = format.encode(&sheet).unwrap_or_default();
        group.bench_function(BenchmarkId::new("decode", &name), |b| {
            b.iter(|| format.decode(black_box(&rows), Palette::pico8()))
        });
    }

    group.finish();
}

// =============================================================================
// Cart Benchmarks
// =============================================================================

fn bench_cart(c: &mut Criterion) {
    let mut group = c.benchmark_group("cart");

    for code_lines in [10, 1000, 8000].iter() {
        let text = make_cart(*code_lines);
        group.throughput(Throughput::Bytes(text.len() as u64));
        group.bench_with_input(BenchmarkId::new("parse", code_lines), &text, |b, text| {
            b.iter(|| Cart::parse(black_box(text)))
        });
    }

    let cart = Cart::parse(&make_cart(10));
    let palette = Palette::pico8();
    group.bench_function("sprite_sheet", |b| b.iter(|| cart.sprite_sheet(black_box(&palette))));

    group.finish();
}

// =============================================================================
// Palette Benchmarks
// =============================================================================

fn bench_palette(c: &mut Criterion) {
    let mut group = c.benchmark_group("palette");

    let hex: String = (0..256u32).map(|i| format!("0x{:06x}\n", i * 0x010101)).collect();
    group.bench_function("parse_hex_256", |b| b.iter(|| parse_hex_palette(black_box(&hex))));

    let palette = Palette::pico8();
    let source = RgbImage::from_fn(128, 128, |x, y| palette.get(((x + y) % 16) as u8));
    group.throughput(Throughput::Elements(128 * 128));
    group.bench_function("remap_exact_128", |b| {
        b.iter(|| IndexedImage::remap_exact(black_box(&source), &palette))
    });

    group.finish();
}

// =============================================================================
// Codec Benchmarks
// =============================================================================

fn bench_codec(c: &mut Criterion) {
    let mut group = c.benchmark_group("codec");
    let sheet = make_sheet();

    for format in [ImageFormat::Png, ImageFormat::Gif] {
        group.bench_function(BenchmarkId::new("encode", format.name()), |b| {
            b.iter(|| encode_indexed(black_box(&sheet), format))
        });

        let bytes = encode_indexed(&sheet, format).unwrap_or_default();
        group.bench_function(BenchmarkId::new("decode", format.name()), |b| {
            b.iter(|| decode_indexed(black_box(&bytes), format))
        });
    }

    group.finish();
}

// =============================================================================
// Criterion Configuration
// =============================================================================

criterion_group!(benches, bench_sprite, bench_cart, bench_palette, bench_codec);

criterion_main!(benches);
