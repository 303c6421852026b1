use predicates::prelude::*;
use std::fs;
use std::path::Path;
use tempfile::tempdir;

fn quest_cmd(home: &Path) -> assert_cmd::Command {
    let mut cmd = assert_cmd::cargo::cargo_bin_cmd!("pushup-quest");
    cmd.current_dir(home)
        .env("HOME", home)
        .env("QUEST_HOME", home.join("quest"))
        .env("QUEST_TODAY", "2024-01-10");
    cmd
}

fn write_image(home: &Path, name: &str, payload: &[u8]) -> std::path::PathBuf {
    let path = home.join(name);
    fs::write(&path, payload).expect("write image payload");
    path
}

#[test]
fn capture_gallery_and_export_round_trip() {
    let tmp = tempdir().expect("tempdir");
    let before = write_image(tmp.path(), "before.jpg", b"day-zero-pose");
    let level_one = write_image(tmp.path(), "level1.jpg", b"one-thousand-pose");

    quest_cmd(tmp.path())
        .args(["capture", "--before"])
        .arg(&before)
        .assert()
        .success()
        .stdout(predicate::str::contains("stored baseline photo"));

    quest_cmd(tmp.path()).args(["add", "1000"]).assert().success();

    quest_cmd(tmp.path())
        .args(["capture", "--milestone", "1000"])
        .arg(&level_one)
        .assert()
        .success()
        .stdout(predicate::str::contains("stored milestone 1000 photo"));

    quest_cmd(tmp.path())
        .arg("gallery")
        .assert()
        .success()
        .stdout(
            predicate::str::contains("1/2 baseline (Day 0)")
                .and(predicate::str::contains("2/2 level 1 (1000 push-ups)"))
                .and(predicate::str::contains("transformation: baseline (Day 0) -> level 1")),
        );

    let dest = tmp.path().join("out");
    quest_cmd(tmp.path())
        .args(["export", "--dest"])
        .arg(&dest)
        .assert()
        .success();

    assert_eq!(
        fs::read(dest.join("00-before.img")).expect("baseline export"),
        b"day-zero-pose"
    );
    assert_eq!(
        fs::read(dest.join("01-level-1-1000.img")).expect("milestone export"),
        b"one-thousand-pose"
    );
}

#[test]
fn retake_overwrites_the_same_milestone() {
    let tmp = tempdir().expect("tempdir");
    let first = write_image(tmp.path(), "first.jpg", b"first-take");
    let second = write_image(tmp.path(), "second.jpg", b"second-take");

    quest_cmd(tmp.path()).args(["add", "1000"]).assert().success();
    quest_cmd(tmp.path())
        .args(["capture", "--milestone", "1000"])
        .arg(&first)
        .assert()
        .success();
    quest_cmd(tmp.path())
        .args(["capture", "--milestone", "1000"])
        .arg(&second)
        .assert()
        .success()
        .stdout(predicate::str::contains("retook milestone 1000 photo"));

    let stored = fs::read(tmp.path().join("quest/photos/ms-001000.img")).expect("payload");
    assert_eq!(stored, b"second-take");
}

#[test]
fn capture_refuses_an_unreached_milestone() {
    let tmp = tempdir().expect("tempdir");
    let image = write_image(tmp.path(), "img.jpg", b"pose");

    quest_cmd(tmp.path()).args(["add", "500"]).assert().success();
    quest_cmd(tmp.path())
        .args(["capture", "--milestone", "1000"])
        .arg(&image)
        .assert()
        .failure()
        .stderr(predicate::str::contains("not reached yet"));
}

#[test]
fn photo_store_trouble_never_blocks_logging() {
    let tmp = tempdir().expect("tempdir");
    let image = write_image(tmp.path(), "img.jpg", b"pose");

    quest_cmd(tmp.path()).args(["add", "1000"]).assert().success();

    // Occupy the photos directory path with a plain file; the capture must
    // fail with the store-down warn and leave the prompt open.
    fs::write(tmp.path().join("quest/photos"), b"in the way").expect("block photos dir");

    quest_cmd(tmp.path())
        .args(["capture", "--milestone", "1000"])
        .arg(&image)
        .assert()
        .failure()
        .stderr(
            predicate::str::contains("QUEST_WARN code=W002_PHOTO_STORE_DOWN")
                .and(predicate::str::contains("capture failed, retry or dismiss")),
        );

    // Activity logging keeps working while the photo store is down.
    quest_cmd(tmp.path())
        .args(["add", "5"])
        .assert()
        .success()
        .stdout(predicate::str::contains("total=1005"));
}

#[test]
fn timelapse_plays_every_frame_and_stops() {
    let tmp = tempdir().expect("tempdir");
    let before = write_image(tmp.path(), "before.jpg", b"zero");
    let one = write_image(tmp.path(), "one.jpg", b"one");

    quest_cmd(tmp.path())
        .args(["capture", "--before"])
        .arg(&before)
        .assert()
        .success();
    quest_cmd(tmp.path()).args(["add", "1000"]).assert().success();
    quest_cmd(tmp.path())
        .args(["capture", "--milestone", "1000"])
        .arg(&one)
        .assert()
        .success();

    quest_cmd(tmp.path())
        .args(["timelapse", "--interval-ms", "50"])
        .assert()
        .success()
        .stdout(
            predicate::str::contains("frame 1/2 milestone=0")
                .and(predicate::str::contains("frame 2/2 milestone=1000"))
                .and(predicate::str::contains("played 2/2 frame(s)")),
        );

    quest_cmd(tmp.path())
        .args(["timelapse", "--interval-ms", "50", "--max-frames", "1"])
        .assert()
        .success()
        .stdout(predicate::str::contains("played 1/2 frame(s)"));
}

#[test]
fn verify_checks_photo_integrity() {
    let tmp = tempdir().expect("tempdir");
    let image = write_image(tmp.path(), "img.jpg", b"pose");

    quest_cmd(tmp.path())
        .args(["capture", "--before"])
        .arg(&image)
        .assert()
        .success();

    quest_cmd(tmp.path()).arg("verify").assert().success();

    // Tamper with the stored payload; verify must flag the digest drift.
    fs::write(tmp.path().join("quest/photos/ms-000000.img"), b"tampered").expect("tamper");
    quest_cmd(tmp.path())
        .arg("verify")
        .assert()
        .failure()
        .stderr(predicate::str::contains("does not match its recorded sha256"));
}
