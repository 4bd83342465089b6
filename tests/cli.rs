use assert_cmd::Command;
use predicates::prelude::*;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

fn pixmark_cmd() -> Command {
    Command::cargo_bin("pixmark").expect("binary exists")
}

/// Writes a solid white PNG and returns its path.
fn write_white_png(dir: &Path, width: i32, height: i32) -> PathBuf {
    let surface = cairo::ImageSurface::create(cairo::Format::ARgb32, width, height).unwrap();
    {
        let ctx = cairo::Context::new(&surface).unwrap();
        ctx.set_source_rgb(1.0, 1.0, 1.0);
        ctx.paint().unwrap();
    }
    let path = dir.join("input.png");
    let mut file = std::fs::File::create(&path).unwrap();
    surface.write_to_png(&mut file).unwrap();
    path
}

fn png_size(path: &Path) -> (i32, i32) {
    let mut file = std::fs::File::open(path).unwrap();
    let surface = cairo::ImageSurface::create_from_png(&mut file).unwrap();
    (surface.width(), surface.height())
}

#[test]
fn help_prints_usage() {
    pixmark_cmd()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains(
            "Annotate raster images with shapes, arrows and text",
        ));
}

#[test]
fn input_is_required() {
    pixmark_cmd()
        .assert()
        .failure()
        .stderr(predicate::str::contains("--input"));
}

#[test]
fn unknown_tool_is_rejected() {
    pixmark_cmd()
        .args(["--input", "x.png", "--tool", "lasso"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("unknown tool 'lasso'"));
}

#[test]
fn replays_script_and_writes_output() {
    let temp = TempDir::new().unwrap();
    let input = write_white_png(temp.path(), 120, 80);
    let script = temp.path().join("events.txt");
    std::fs::write(
        &script,
        "# box, then crop to its corner\n\
         down 10 10\nmove 60 40\nup 60 40\n\
         tool crop\ndown 0 0\nmove 50 30\nup 50 30\n",
    )
    .unwrap();
    let output = temp.path().join("out").join("annotated.png");

    pixmark_cmd()
        .env("XDG_CONFIG_HOME", temp.path())
        .arg("--input")
        .arg(&input)
        .arg("--events")
        .arg(&script)
        .arg("--output")
        .arg(&output)
        .args(["--tool", "rect"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Saved").and(predicate::str::contains("50x30")));

    assert_eq!(png_size(&output), (50, 30));
}

#[test]
fn script_errors_report_line_numbers() {
    let temp = TempDir::new().unwrap();
    let input = write_white_png(temp.path(), 20, 20);
    let script = temp.path().join("events.txt");
    std::fs::write(&script, "tool rect\n\nscribble 1 2\n").unwrap();

    pixmark_cmd()
        .env("XDG_CONFIG_HOME", temp.path())
        .arg("--input")
        .arg(&input)
        .arg("--events")
        .arg(&script)
        .arg("--output")
        .arg(temp.path().join("out.png"))
        .assert()
        .failure()
        .stderr(predicate::str::contains("line 3: unknown command 'scribble'"));
}

#[test]
fn missing_image_fails() {
    let temp = TempDir::new().unwrap();
    pixmark_cmd()
        .env("XDG_CONFIG_HOME", temp.path())
        .arg("--input")
        .arg(temp.path().join("missing.png"))
        .assert()
        .failure()
        .stderr(predicate::str::contains("Failed to load image"));
}

#[test]
fn init_config_writes_example_once() {
    let temp = TempDir::new().unwrap();
    let config = temp.path().join("pixmark").join("config.toml");

    pixmark_cmd()
        .arg("--init-config")
        .arg("--config")
        .arg(&config)
        .assert()
        .success();
    assert!(config.exists());

    pixmark_cmd()
        .arg("--init-config")
        .arg("--config")
        .arg(&config)
        .assert()
        .failure()
        .stderr(predicate::str::contains("already exists"));
}
