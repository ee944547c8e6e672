//! Geometry files through the public API

use crate::common::{full_quad, quad, temp_dir};
use bf_asset::{
    Error, Geometry, GeometryIssue, LoadPhase, LoadStats, ReadOptions, SectionStrictness,
    SectionTag,
};
use glam::{Vec2, Vec3};
use pretty_assertions::assert_eq;
use proptest::prelude::*;

fn vec3_bits(values: &[Vec3]) -> Vec<[u32; 3]> {
    values
        .iter()
        .map(|v| [v.x.to_bits(), v.y.to_bits(), v.z.to_bits()])
        .collect()
}

fn vec2_bits(values: &[Vec2]) -> Vec<[u32; 2]> {
    values
        .iter()
        .map(|v| [v.x.to_bits(), v.y.to_bits()])
        .collect()
}

#[test]
fn test_quad_round_trip() {
    let geometry = quad();
    let bytes = geometry.write(Vec::new()).unwrap();
    assert_eq!(&bytes[..4], b"BFG\x01");

    let loaded = Geometry::read(bytes.as_slice()).unwrap();
    assert_eq!(loaded, geometry);
    assert_eq!(loaded.triangle_count(), 2);
    assert!(loaded.validate().is_empty());
}

#[test]
fn test_all_sections_written_in_fixed_order() {
    let geometry = full_quad();
    assert_eq!(
        geometry.sections(),
        vec![
            SectionTag::Positions,
            SectionTag::Normals,
            SectionTag::Texcoords,
            SectionTag::Tangents,
            SectionTag::Bitangents,
            SectionTag::Indices,
        ]
    );

    let bytes = geometry.write(Vec::new()).unwrap();
    assert_eq!(Geometry::read(bytes.as_slice()).unwrap(), geometry);
}

#[test]
fn test_save_and_load() {
    let dir = temp_dir();
    let path = dir.path().join("quad.bf");

    let geometry = full_quad();
    geometry.save(&path).unwrap();
    assert_eq!(Geometry::load(&path).unwrap(), geometry);
}

#[test]
fn test_load_missing_file() {
    let dir = temp_dir();
    let err = Geometry::load(dir.path().join("missing.bf")).unwrap_err();
    assert!(matches!(err, Error::Io(_)));
}

#[test]
fn test_image_file_rejected() {
    let image = bf_asset::Image::new(1, 1);
    let bytes = image.write(Vec::new()).unwrap();

    let err = Geometry::read(bytes.as_slice()).unwrap_err();
    assert!(matches!(err, Error::TypeMismatch { found: b'I', .. }));
}

#[test]
fn test_lenient_skips_unknown_tag() {
    // Payload with an unknown tag byte ahead of the indices
    let mut payload = Vec::new();
    quad().write_payload(&mut payload).unwrap();
    let indices_at = payload.len() - (4 + 6 * 4) - 1;
    payload.insert(indices_at, 0x2A);

    let strict = ReadOptions::default();
    let err = Geometry::read_payload(&mut payload.as_slice(), &strict, &mut ()).unwrap_err();
    assert!(matches!(err, Error::UnknownSection(0x2A)));

    let lenient = ReadOptions::new().with_strictness(SectionStrictness::Lenient);
    let geometry = Geometry::read_payload(&mut payload.as_slice(), &lenient, &mut ()).unwrap();
    assert_eq!(geometry, quad());
}

#[test]
fn test_stats_collected() {
    let bytes = full_quad().write(Vec::new()).unwrap();

    let mut stats = LoadStats::new();
    Geometry::read_with_options(bytes.as_slice(), &ReadOptions::default(), &mut stats).unwrap();

    assert_eq!(stats.index_count, 6);
    assert!(stats.allocated_bytes >= 24);
    assert_eq!(
        stats.uncompressed_bytes,
        full_quad().encoded_body_size() as u64
    );
    let phases: Vec<LoadPhase> = stats.timings.iter().map(|(phase, _)| *phase).collect();
    assert_eq!(
        phases,
        vec![LoadPhase::Header, LoadPhase::Decompress, LoadPhase::Parse]
    );
}

#[test]
fn test_validate_reports_producer_errors() {
    let mut geometry = quad();
    geometry.normals = Some(vec![Vec3::Z; 3]);
    geometry.indices.push(9);

    let issues = geometry.validate();
    assert!(issues.contains(&GeometryIssue::AttributeLength {
        section: SectionTag::Normals,
        len: 3,
        expected: 4,
    }));
    assert!(issues.contains(&GeometryIssue::IndexOutOfRange { at: 6, index: 9 }));

    // The codec writes whatever it is given
    let bytes = geometry.write(Vec::new()).unwrap();
    assert_eq!(Geometry::read(bytes.as_slice()).unwrap(), geometry);
}

fn arb_vec3() -> impl Strategy<Value = Vec3> {
    (any::<f32>(), any::<f32>(), any::<f32>()).prop_map(|(x, y, z)| Vec3::new(x, y, z))
}

fn arb_vec2() -> impl Strategy<Value = Vec2> {
    (any::<f32>(), any::<f32>()).prop_map(|(x, y)| Vec2::new(x, y))
}

fn arb_geometry() -> impl Strategy<Value = Geometry> {
    (1usize..64).prop_flat_map(|n| {
        (
            prop::collection::vec(arb_vec3(), n),
            prop::option::of(prop::collection::vec(arb_vec3(), n)),
            prop::option::of(prop::collection::vec(arb_vec2(), n)),
            prop::option::of(prop::collection::vec(arb_vec3(), n)),
            prop::option::of(prop::collection::vec(arb_vec3(), n)),
            prop::collection::vec(0..n as u32, 1..96),
        )
            .prop_map(
                |(positions, normals, texcoords, tangents, bitangents, indices)| Geometry {
                    positions,
                    normals,
                    texcoords,
                    tangents,
                    bitangents,
                    indices,
                },
            )
    })
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    #[test]
    fn prop_geometry_round_trip_is_bit_exact(geometry in arb_geometry()) {
        let bytes = geometry.write(Vec::new()).unwrap();
        let loaded = Geometry::read(bytes.as_slice()).unwrap();

        prop_assert_eq!(vec3_bits(&loaded.positions), vec3_bits(&geometry.positions));
        prop_assert_eq!(
            loaded.normals.as_deref().map(vec3_bits),
            geometry.normals.as_deref().map(vec3_bits)
        );
        prop_assert_eq!(
            loaded.texcoords.as_deref().map(vec2_bits),
            geometry.texcoords.as_deref().map(vec2_bits)
        );
        prop_assert_eq!(
            loaded.tangents.as_deref().map(vec3_bits),
            geometry.tangents.as_deref().map(vec3_bits)
        );
        prop_assert_eq!(
            loaded.bitangents.as_deref().map(vec3_bits),
            geometry.bitangents.as_deref().map(vec3_bits)
        );
        prop_assert_eq!(loaded.indices, geometry.indices);
    }
}
