//! Tests for command selection and the CLI commands

mod common;

use std::fs;

use image::{ImageBuffer, Luma};

use common::scratch_dir;
use scenegrab::commands::{cli, CommandFactory, ScenegrabCommandFactory};

fn run(args: &[&str]) -> scenegrab::errors::GrabResult<()> {
    let matches = cli().try_get_matches_from(args).unwrap();
    ScenegrabCommandFactory::new().create_command(&matches)?.execute()
}

/// Config and a one-scene manifest over (10, 20, 12, 24)
fn write_inputs(dir: &std::path::Path) -> (String, String) {
    for (band, value) in [("B4", 400u16), ("B3", 300), ("B2", 200), ("B8", 800)] {
        let image: ImageBuffer<Luma<u16>, Vec<u16>> = ImageBuffer::from_pixel(4, 8, Luma([value]));
        image.save(dir.join(format!("{}.png", band))).unwrap();
    }

    let manifest = r#"
[[scene]]
id = "20190603T084601_20190603T090101_T34HBH"
acquired = "2019-06-03T08:46:01Z"
cloud = 12.5
origin = [10.0, 24.0]
pixel_size = [0.5, 0.5]
size = [4, 8]

[scene.bands]
B4 = "B4.png"
B3 = "B3.png"
B2 = "B2.png"
B8 = "B8.png"
"#;
    let config = format!(r#"
[region]
rectangles = [[10.0, 20.0, 12.0, 24.0]]

[export]
destination = "{}"
"#, dir.join("configured").display());

    let manifest_path = dir.join("manifest.toml");
    let config_path = dir.join("run.toml");
    fs::write(&manifest_path, manifest).unwrap();
    fs::write(&config_path, config).unwrap();

    (config_path.display().to_string(), manifest_path.display().to_string())
}

#[test]
fn test_quadrants_command() {
    assert!(run(&["scenegrab", "--quadrants", "-73.5,-12.25,-71.0,-9.5"]).is_ok());
    assert!(run(&["scenegrab", "--quadrants", "1,2,3"]).is_err());
}

#[test]
fn test_missing_inputs() {
    assert!(run(&["scenegrab"]).is_err());
    assert!(run(&["scenegrab", "--plan", "run.toml"]).is_err());
}

#[test]
fn test_plan_writes_nothing() {
    let dir = scratch_dir("command_plan");
    let (config, manifest) = write_inputs(&dir);

    run(&["scenegrab", &config, "--manifest", &manifest, "--plan"]).unwrap();
    assert!(!dir.join("configured").exists());

    fs::remove_dir_all(&dir).unwrap();
}

#[test]
fn test_export_to_output_dir() {
    let dir = scratch_dir("command_export");
    let (config, manifest) = write_inputs(&dir);
    let output = dir.join("out");

    run(&["scenegrab", &config, "-m", &manifest, "-o", output.to_str().unwrap()]).unwrap();

    for i in 0..4 {
        assert!(output.join(format!("RGB_2019_6_part_{}.tif", i)).exists());
    }
    assert!(!dir.join("configured").exists());

    fs::remove_dir_all(&dir).unwrap();
}
