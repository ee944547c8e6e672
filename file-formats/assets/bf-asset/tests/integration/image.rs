//! Image files through the public API

use crate::common::{image_named, raster, temp_dir};
use bf_asset::{ColorSpace, Error, Image, Layer, LoadStats, PixelFormat, ReadOptions};
use pretty_assertions::assert_eq;
use proptest::prelude::*;
use rstest::rstest;

#[rstest]
#[case::rgba8_srgb(PixelFormat::RGBA8_SRGB)]
#[case::rgba8_linear(PixelFormat::RGBA8_LINEAR)]
#[case::rgb8_srgb(PixelFormat::RGB8_SRGB)]
#[case::r8_linear(PixelFormat::R8_LINEAR)]
#[case::rgba16f(PixelFormat::RGBA16F_LINEAR)]
#[case::rgba32f(PixelFormat::RGBA32F_LINEAR)]
#[case::four_bit(PixelFormat::new(1, 4, ColorSpace::Linear))]
fn test_single_layer_round_trip(#[case] format: PixelFormat) {
    let image = Image::single(5, 3, "albedo", format, raster(5, 3, format, 11));
    let bytes = image.write(Vec::new()).unwrap();
    assert_eq!(&bytes[..4], b"BFI\x01");

    assert_eq!(Image::read_single_layer(bytes.as_slice()).unwrap(), image);
    assert_eq!(Image::read(bytes.as_slice()).unwrap(), image);
}

#[test]
fn test_two_layers_need_general_path() {
    let image = image_named(4, 4, &["color", "emissive"]);
    let bytes = image.write(Vec::new()).unwrap();

    let err = Image::read_single_layer(bytes.as_slice()).unwrap_err();
    assert!(matches!(err, Error::TooManyLayers(2)));

    let loaded = Image::read(bytes.as_slice()).unwrap();
    let names: Vec<&str> = loaded.layers.iter().map(|l| l.name.as_str()).collect();
    assert_eq!(names, ["color", "emissive"]);
}

#[test]
fn test_layer_lookup_ignores_case() {
    let image = image_named(2, 2, &["Color", "Mask"]);
    assert!(image.layer("mask").is_some());
    assert!(image.layer("COLOR").is_some());
    assert!(image.layer("roughness").is_none());
}

#[test]
fn test_mixed_formats_share_dimensions() {
    let image = Image::new(3, 3)
        .with_layer(Layer::new(
            "color",
            PixelFormat::RGBA8_SRGB,
            raster(3, 3, PixelFormat::RGBA8_SRGB, 0),
        ))
        .with_layer(Layer::new(
            "height",
            PixelFormat::RGBA32F_LINEAR,
            raster(3, 3, PixelFormat::RGBA32F_LINEAR, 1),
        ));

    let mut stats = LoadStats::new();
    let bytes = image.write(Vec::new()).unwrap();
    let loaded =
        Image::read_with_options(bytes.as_slice(), &ReadOptions::default(), &mut stats).unwrap();

    assert_eq!(loaded, image);
    assert_eq!(loaded.layers[1].data.len(), 9 * 16);
    assert!(stats.allocated_bytes >= (9 * 4 + 9 * 16) as u64);
}

#[test]
fn test_save_and_load() {
    let dir = temp_dir();
    let path = dir.path().join("image.bf");

    let image = image_named(16, 8, &["color"]);
    image.save(&path).unwrap();
    assert_eq!(Image::load(&path).unwrap(), image);
}

#[test]
fn test_unknown_color_space_rejected() {
    let image = Image::single(1, 1, "x", PixelFormat::R8_LINEAR, vec![0]);
    let mut payload = Vec::new();
    image.write_payload(&mut payload).unwrap();

    // width(2) height(2) count(1) name(4 + 1) bpp channels colorspace
    let color_space_at = 2 + 2 + 1 + 5 + 2;
    payload[color_space_at] = 7;

    let err = Image::read_payload(&mut payload.as_slice(), &mut ()).unwrap_err();
    assert!(matches!(err, Error::UnknownColorSpace(7)));
}

fn arb_format() -> impl Strategy<Value = PixelFormat> {
    (
        1u8..=4,
        prop::sample::select(vec![4u8, 8, 16, 24, 32, 64, 128]),
        prop_oneof![Just(ColorSpace::Linear), Just(ColorSpace::Srgb)],
    )
        .prop_map(|(channels, bits, color_space)| PixelFormat::new(channels, bits, color_space))
}

fn arb_image() -> impl Strategy<Value = Image> {
    (0u16..12, 0u16..12, prop::collection::vec(arb_format(), 1..8)).prop_map(
        |(width, height, formats)| {
            let mut image = Image::new(width, height);
            for (i, format) in formats.into_iter().enumerate() {
                let data = raster(width, height, format, i as u8);
                image.layers.push(Layer::new(format!("layer{i}"), format, data));
            }
            image
        },
    )
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    #[test]
    fn prop_image_round_trip(image in arb_image()) {
        let bytes = image.write(Vec::new()).unwrap();
        let loaded = Image::read(bytes.as_slice()).unwrap();
        prop_assert_eq!(loaded, image);
    }
}

#[test]
fn test_max_layer_count_round_trips() {
    let mut image = Image::new(1, 1);
    for i in 0..255 {
        image
            .layers
            .push(Layer::new(format!("l{i}"), PixelFormat::R8_LINEAR, vec![i as u8]));
    }
    let bytes = image.write(Vec::new()).unwrap();
    assert_eq!(Image::read(bytes.as_slice()).unwrap().layers.len(), 255);
}
