use std::fs;

use serde::Deserialize;
use tempfile::tempdir;
use toml::Table;

use crate::{Config, Error, merge_tables};

#[derive(Deserialize, Debug, PartialEq, Clone)]
#[serde(deny_unknown_fields)]
struct TestConfig {
    name: String,
    num_joints: u32,
    dimensions: Dimensions,
}

#[derive(Deserialize, Debug, PartialEq, Clone)]
#[serde(deny_unknown_fields)]
struct Dimensions {
    thigh: f64,
    calf: f64,
}

impl Config for TestConfig {
    const PATH: &'static str = "test_config.toml";
}

const MAIN: &str = r#"
name = "base"
num_joints = 12

[dimensions]
thigh = 0.211
calf = 0.230
"#;

#[test]
fn merge_replaces_nested_values() {
    let main: Table = MAIN.parse().unwrap();
    let overlay: Table = r"
        [dimensions]
        calf = 0.25
    "
    .parse()
    .unwrap();

    let merged = merge_tables(main, overlay, false);
    let dimensions = merged.get("dimensions").unwrap().as_table().unwrap();

    assert_eq!(merged.get("num_joints").unwrap().as_integer(), Some(12));
    assert_eq!(dimensions.get("thigh").unwrap().as_float(), Some(0.211));
    assert_eq!(dimensions.get("calf").unwrap().as_float(), Some(0.25));
}

#[test]
fn merge_only_adds_new_keys_when_asked() {
    let main: Table = MAIN.parse().unwrap();
    let overlay: Table = r#"colour = "red""#.parse().unwrap();

    assert!(!merge_tables(main.clone(), overlay.clone(), false).contains_key("colour"));
    assert!(merge_tables(main, overlay, true).contains_key("colour"));
}

#[test]
fn load_and_overlay() {
    let temp_dir = tempdir().unwrap();
    let config_dir = temp_dir.path().join("config");
    let overlay_dir = temp_dir.path().join("config/overlay/robot_1");
    fs::create_dir_all(&overlay_dir).unwrap();

    fs::write(config_dir.join(TestConfig::PATH), MAIN).unwrap();

    let main = TestConfig::load(&config_dir).unwrap();
    assert_eq!(main.name, "base");
    assert_eq!(main.dimensions.calf, 0.230);

    // without an overlay file the main configuration is used
    let same = TestConfig::load_with_overlay(&config_dir, &overlay_dir).unwrap();
    assert_eq!(same, main);

    fs::write(
        overlay_dir.join(TestConfig::PATH),
        "name = \"robot_1\"\n[dimensions]\ncalf = 0.25\n",
    )
    .unwrap();

    let overlaid = TestConfig::load_with_overlay(&config_dir, &overlay_dir).unwrap();
    assert_eq!(overlaid.name, "robot_1");
    assert_eq!(overlaid.num_joints, 12);
    assert_eq!(overlaid.dimensions.thigh, 0.211);
    assert_eq!(overlaid.dimensions.calf, 0.25);
}

#[test]
fn missing_file_is_an_io_error() {
    let temp_dir = tempdir().unwrap();

    let result = TestConfig::load(temp_dir.path());
    assert!(matches!(result, Err(Error::Io { .. })));
}

#[test]
fn schema_mismatch_is_a_deserialize_error() {
    let temp_dir = tempdir().unwrap();
    fs::write(
        temp_dir.path().join(TestConfig::PATH),
        "name = \"base\"\nnum_joints = \"twelve\"\n",
    )
    .unwrap();

    let result = TestConfig::load(temp_dir.path());
    assert!(matches!(result, Err(Error::Deserialize { .. })));
}
