//! Cube assembly from image files

use crate::common::{face_tokens, image_named, temp_dir};
use bf_asset::{CubeFace, CubeImage, Error, Image};
use pretty_assertions::assert_eq;
use rstest::rstest;

fn cube_file(names: &[&str]) -> Vec<u8> {
    image_named(4, 4, names).write(Vec::new()).unwrap()
}

fn invalid_cube_message(err: Error) -> String {
    match err {
        Error::InvalidCubeAsset(msg) => msg,
        other => panic!("expected InvalidCubeAsset, got {other}"),
    }
}

#[rstest]
#[case::canonical(["posx", "negx", "posy", "negy", "posz", "negz"])]
#[case::upper(["POSX", "NEGX", "POSY", "NEGY", "POSZ", "NEGZ"])]
#[case::shuffled(["negz", "PosY", "posx", "NegX", "posz", "negy"])]
fn test_any_case_and_order_assembles(#[case] names: [&str; 6]) {
    let bytes = cube_file(&names);
    let cube = CubeImage::read(bytes.as_slice()).unwrap();

    // Each face gets the raster written under its name
    let flat = image_named(4, 4, &names);
    for layer in &flat.layers {
        let face = CubeFace::from_token(&layer.name).unwrap();
        assert_eq!(cube.face(face).data, layer.data);
    }
}

#[test_log::test]
fn test_five_layers_rejected() {
    let bytes = cube_file(&["posx", "negx", "posy", "negy", "posz"]);
    let msg = invalid_cube_message(CubeImage::read(bytes.as_slice()).unwrap_err());
    assert_eq!(msg, "expected at least 6 layers, found 5");
}

#[test_log::test]
fn test_misspelled_face_names_missing_face() {
    let bytes = cube_file(&["posx", "negx", "posy", "negy", "poz", "negz"]);
    let msg = invalid_cube_message(CubeImage::read(bytes.as_slice()).unwrap_err());
    assert_eq!(msg, "missing faces: posz");
}

#[test_log::test]
fn test_only_first_six_layers_considered() {
    let bytes = cube_file(&["posx", "negx", "posy", "negy", "posz", "posz", "negz"]);
    let msg = invalid_cube_message(CubeImage::read(bytes.as_slice()).unwrap_err());
    assert_eq!(msg, "missing faces: negz");
}

#[test_log::test]
fn test_extra_layers_after_faces_ignored() {
    let mut names = face_tokens();
    names.push("irradiance");
    let bytes = cube_file(&names);
    assert!(CubeImage::read(bytes.as_slice()).is_ok());
}

#[test_log::test]
fn test_cube_file_is_a_six_layer_image() {
    let cube = CubeImage::from_image(image_named(2, 2, &face_tokens())).unwrap();
    let bytes = cube.write(Vec::new()).unwrap();

    let image = Image::read(bytes.as_slice()).unwrap();
    assert_eq!(image.layers.len(), 6);
    assert_eq!(image, cube.clone().into_image());
    assert!(matches!(
        Image::read_single_layer(bytes.as_slice()),
        Err(Error::TooManyLayers(6))
    ));
}

#[test_log::test]
fn test_save_and_load() {
    let dir = temp_dir();
    let path = dir.path().join("sky.bf");

    let cube = CubeImage::from_image(image_named(8, 8, &face_tokens())).unwrap();
    cube.save(&path).unwrap();
    assert_eq!(CubeImage::load(&path).unwrap(), cube);
}
