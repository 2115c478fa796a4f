//! CLI command integration tests.
//! Each test writes into its own temp directory.

use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::TempDir;

fn orb_cmd() -> Command {
    #[allow(deprecated)]
    Command::cargo_bin("orb").unwrap()
}

#[test]
fn config_prints_defaults_as_toml() {
    let output = orb_cmd().arg("config").output().unwrap();
    assert!(output.status.success());

    let stdout = String::from_utf8_lossy(&output.stdout);
    let parsed: toml::Value = toml::from_str(&stdout).expect("config output should be valid TOML");
    assert_eq!(parsed["width"].as_integer(), Some(1280));
    assert_eq!(parsed["height"].as_integer(), Some(720));
    assert_eq!(parsed["rings"].as_array().map(Vec::len), Some(4));
    assert!(parsed["motion"]["spawn_threshold"].as_float().is_some());
}

#[test]
fn snapshot_writes_png() {
    let dir = TempDir::new().unwrap();
    let out = dir.path().join("orb.png");

    orb_cmd()
        .args(["snapshot", "--width", "320", "--height", "180", "--state", "speaking", "--ticks", "30"])
        .arg("--out")
        .arg(&out)
        .assert()
        .success()
        .stdout(predicate::str::contains("320x180"))
        .stdout(predicate::str::contains("30 ticks"));

    let image = image::open(&out).unwrap().to_rgba8();
    assert_eq!(image.dimensions(), (320, 180));
    assert_eq!(image.get_pixel(0, 0).0, [0, 0, 0, 255]);
}

#[test]
fn snapshot_is_deterministic_per_seed() {
    let dir = TempDir::new().unwrap();
    let a = dir.path().join("a.png");
    let b = dir.path().join("b.png");

    for out in [&a, &b] {
        orb_cmd()
            .args(["snapshot", "--width", "160", "--height", "90", "--state", "speaking", "--seed", "9"])
            .arg("--out")
            .arg(out)
            .assert()
            .success();
    }
    assert_eq!(std::fs::read(&a).unwrap(), std::fs::read(&b).unwrap());
}

#[test]
fn snapshot_reads_config_file() {
    let dir = TempDir::new().unwrap();
    let config = dir.path().join("orb.toml");
    std::fs::write(&config, "width = 200\nheight = 100\n").unwrap();
    let out = dir.path().join("orb.png");

    orb_cmd()
        .arg("--config")
        .arg(&config)
        .arg("snapshot")
        .arg("--out")
        .arg(&out)
        .assert()
        .success()
        .stdout(predicate::str::contains("200x100"));
}

#[test]
fn missing_logo_falls_back_to_placeholder() {
    let dir = TempDir::new().unwrap();
    let out = dir.path().join("orb.png");

    orb_cmd()
        .args(["snapshot", "--width", "160", "--height", "90", "--logo", "/nonexistent/logo.png"])
        .arg("--out")
        .arg(&out)
        .assert()
        .success()
        .stderr(predicate::str::contains("not found"));

    // overlay placeholder at the center
    let image = image::open(&out).unwrap().to_rgba8();
    let [r, g, b, _] = image.get_pixel(80, 45).0;
    assert!(r.abs_diff(100) <= 1 && g.abs_diff(100) <= 1 && b >= 254);
}

#[test]
fn invalid_fps_is_rejected() {
    let dir = TempDir::new().unwrap();
    orb_cmd()
        .args(["snapshot", "--fps", "0"])
        .arg("--out")
        .arg(dir.path().join("orb.png"))
        .assert()
        .failure()
        .stderr(predicate::str::contains("invalid configuration"));
}

#[test]
fn unknown_state_is_rejected() {
    orb_cmd()
        .args(["snapshot", "--out", "x.png", "--state", "shouting"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("shouting"));
}

#[test]
fn run_writes_whole_frames_until_duration() {
    let dir = TempDir::new().unwrap();
    let out = dir.path().join("frames.rgba");

    let output = orb_cmd()
        .args(["run", "--width", "64", "--height", "36", "--fps", "50", "--duration", "0.3", "--seed", "1"])
        .arg("--output")
        .arg(&out)
        .write_stdin("speaking\n{\"state\": \"thinking\"}\nnonsense\n")
        .output()
        .unwrap();
    assert!(output.status.success());

    let len = std::fs::metadata(&out).unwrap().len();
    let frame_len = 64 * 36 * 4;
    assert!(len > 0, "no frames written");
    assert_eq!(len % frame_len, 0, "partial frame in output");

    // Frame count is reported on stderr without --verbose.
    let stderr = String::from_utf8_lossy(&output.stderr);
    let frames: u64 = stderr
        .lines()
        .find_map(|l| l.strip_prefix("rendered ")?.strip_suffix(" frames")?.parse().ok())
        .expect("frame count line on stderr");
    assert_eq!(frames * frame_len, len);
}

#[test]
fn run_rejects_unrepresentable_fps() {
    let dir = TempDir::new().unwrap();
    orb_cmd()
        .args(["run", "--fps", "1e-20", "--duration", "0.1"])
        .arg("--output")
        .arg(dir.path().join("frames.rgba"))
        .assert()
        .failure()
        .stderr(predicate::str::contains("invalid configuration"))
        .stderr(predicate::str::contains("panicked").not());
}

#[test]
fn snapshot_rejects_zero_ticks() {
    let dir = TempDir::new().unwrap();
    orb_cmd()
        .args(["snapshot", "--ticks", "0"])
        .arg("--out")
        .arg(dir.path().join("orb.png"))
        .assert()
        .failure()
        .stderr(predicate::str::contains("--ticks"));
}
