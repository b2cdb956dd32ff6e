// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

extern crate assert_cmd;
extern crate predicates;
extern crate tempfile;

use assert_cmd::prelude::*;
use predicates::prelude::*;
use std::fs;
use std::process::Command;

const SIERPINSKI: &str = "Affine\n0,0\n1,1\n0.5,0,0,0.5,0,0\n0.5,0,0,0.5,0.5,0\n0.5,0,0,0.5,0.25,0.5\n";
const DRAGON: &str = "Julia\n-2,-1.5\n2,1.5\n-0.8,0.156\n";

#[test]
fn walks_an_affine_description_to_a_graymap() {
    let dir = tempfile::tempdir().unwrap();
    let input = dir.path().join("sierpinski.txt");
    let output = dir.path().join("sierpinski.pgm");
    fs::write(&input, SIERPINSKI).unwrap();

    Command::cargo_bin("chaos")
        .unwrap()
        .arg(&input)
        .arg("-o")
        .arg(&output)
        .args(&["-s", "40x30", "-n", "5000", "--seed", "3"])
        .assert()
        .success();

    let written = fs::read(&output).unwrap();
    assert!(written.starts_with(b"P5"));
    assert!(written.len() > 40 * 30);
}

#[test]
fn renders_julia_escape_times_after_zoom_and_pan() {
    let dir = tempfile::tempdir().unwrap();
    let input = dir.path().join("dragon.txt");
    let output = dir.path().join("dragon.pgm");
    fs::write(&input, DRAGON).unwrap();

    Command::cargo_bin("chaos")
        .unwrap()
        .arg(&input)
        .arg("-o")
        .arg(&output)
        .args(&["-s", "32x24", "-m", "escape", "-i", "50", "-z", "-0.5", "-p", "-10,5"])
        .assert()
        .success();

    assert!(fs::read(&output).unwrap().starts_with(b"P5"));
}

#[test]
fn missing_input_is_a_render_failure() {
    let dir = tempfile::tempdir().unwrap();
    Command::cargo_bin("chaos")
        .unwrap()
        .arg(dir.path().join("nope.txt"))
        .arg("-o")
        .arg(dir.path().join("nope.pgm"))
        .assert()
        .failure()
        .stderr(predicate::str::contains("Render failure: file not found"));
}

#[test]
fn affine_descriptions_refuse_escape_mode() {
    let dir = tempfile::tempdir().unwrap();
    let input = dir.path().join("sierpinski.txt");
    fs::write(&input, SIERPINSKI).unwrap();

    Command::cargo_bin("chaos")
        .unwrap()
        .arg(&input)
        .arg("-o")
        .arg(dir.path().join("out.pgm"))
        .args(&["-m", "escape"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Render failure"));
}

#[test]
fn bad_sizes_are_rejected() {
    let dir = tempfile::tempdir().unwrap();
    let input = dir.path().join("sierpinski.txt");
    fs::write(&input, SIERPINSKI).unwrap();

    Command::cargo_bin("chaos")
        .unwrap()
        .arg(&input)
        .arg("-o")
        .arg(dir.path().join("out.pgm"))
        .args(&["-s", "wide"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Could not parse output image size"));
}
