extern crate assert_cmd;
extern crate image;
extern crate predicates;
extern crate tempfile;

use assert_cmd::prelude::*;
use image::GenericImageView;
use predicates::prelude::*;
use std::fs;
use std::process::Command;

fn xfracts() -> Command {
    Command::cargo_bin("xfracts").unwrap()
}

#[test]
fn renders_a_png_of_the_requested_size() {
    let dir = tempfile::tempdir().unwrap();
    let out = dir.path().join("julia.png");
    xfracts()
        .args(&["-o", out.to_str().unwrap(), "-s", "40x30", "-f", "2", "-p", "3"])
        .assert()
        .success();
    let bytes = fs::read(&out).unwrap();
    assert_eq!(&bytes[..8], b"\x89PNG\r\n\x1a\n");
    let img = image::open(&out).unwrap();
    assert_eq!(img.dimensions(), (40, 30));
}

#[test]
fn accepts_an_explicit_view() {
    let dir = tempfile::tempdir().unwrap();
    let out = dir.path().join("zoomed.png");
    xfracts()
        .args(&[
            "-o",
            out.to_str().unwrap(),
            "-s",
            "16x16",
            "-c",
            "-0.25,0.1",
            "-z",
            "0.5",
        ])
        .assert()
        .success();
    assert!(out.exists());
}

#[test]
fn prints_the_fragment_program() {
    xfracts()
        .args(&["--shader", "-f", "4"])
        .assert()
        .success()
        .stdout(predicate::str::contains("float nr = r * r - i * i-0.8;"))
        .stdout(predicate::str::contains("float ni = 2.0 * r * i+0.2;"));
}

#[test]
fn requires_an_output_file() {
    xfracts().args(&["-s", "10x10"]).assert().failure();
}

#[test]
fn rejects_unknown_palettes() {
    let dir = tempfile::tempdir().unwrap();
    let out = dir.path().join("never.png");
    xfracts()
        .args(&["-o", out.to_str().unwrap(), "-p", "4"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Palette id must be between 0 and 3"));
    assert!(!out.exists());
}

#[test]
fn rejects_an_empty_image() {
    let dir = tempfile::tempdir().unwrap();
    let out = dir.path().join("empty.png");
    xfracts()
        .args(&["-o", out.to_str().unwrap(), "-s", "0x10"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("invalid viewport"));
    assert!(!out.exists());
}

#[test]
fn rejects_an_oversized_image() {
    let dir = tempfile::tempdir().unwrap();
    let out = dir.path().join("huge.png");
    xfracts()
        .args(&["-o", out.to_str().unwrap(), "-s", "4294967295x4294967295"])
        .assert()
        .failure()
        .code(1)
        .stderr(predicate::str::contains("Could not parse output image size"));
    assert!(!out.exists());
}
