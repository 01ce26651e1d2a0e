#![allow(dead_code)]
use assert_cmd::{Command, cargo_bin_cmd};
use std::env;
use std::fs;
use std::path::PathBuf;

pub fn lab() -> Command {
    cargo_bin_cmd!("paperlab")
}

/// Create a unique test DB path inside the system temp dir and remove any existing file
pub fn setup_test_db(name: &str) -> String {
    let mut path: PathBuf = env::temp_dir();
    path.push(format!("{}_paperlab.sqlite", name));
    let db_path = path.to_string_lossy().to_string();
    fs::remove_file(&db_path).ok();
    db_path
}

/// Create a temporary output file path inside tempdir and ensure it's removed
pub fn temp_out(name: &str, ext: &str) -> String {
    let mut path: PathBuf = env::temp_dir();
    path.push(format!("{}_out.{}", name, ext));
    let p = path.to_string_lossy().to_string();
    fs::remove_file(&p).ok();
    p
}

/// Fresh database with schema, without touching the user's config file
pub fn init_db(db_path: &str) {
    lab()
        .args(["--db", db_path, "--test", "init"])
        .assert()
        .success();
}

pub fn add_material(db_path: &str, name: &str) {
    lab()
        .args(["--db", db_path, "material", "add", "--name", name])
        .assert()
        .success();
}

/// Paper sample with a roll number plus any extra arguments
pub fn add_paper(db_path: &str, roll: &str, extra: &[&str]) {
    let mut args = vec![
        "--db",
        db_path,
        "paper",
        "add",
        "--date",
        "1403-02-15",
        "--start",
        "08:00",
        "--end",
        "9:30",
        "--roll",
        roll,
        "--person",
        "Rezaei",
    ];
    args.extend_from_slice(extra);
    lab().args(&args).assert().success();
}

pub fn add_pulp(db_path: &str, roll: &str, extra: &[&str]) {
    let mut args = vec![
        "--db", db_path, "pulp", "add", "--roll", roll, "--time", "08:15",
    ];
    args.extend_from_slice(extra);
    lab().args(&args).assert().success();
}
