use predicates::prelude::PredicateBooleanExt;
use predicates::str::contains;

mod common;
use common::{add_material, add_paper, add_pulp, init_db, lab, setup_test_db};

#[test]
fn test_material_crud_and_case_insensitive_names() {
    let db_path = setup_test_db("material_crud");
    init_db(&db_path);

    add_material(&db_path, "Starch");

    lab()
        .args(["--db", &db_path, "material", "add", "--name", "STARCH"])
        .assert()
        .failure()
        .stderr(contains("already exists"));

    lab()
        .args([
            "--db",
            &db_path,
            "material",
            "edit",
            "1",
            "--name",
            "Cationic starch",
            "--description",
            "wet end",
        ])
        .assert()
        .success()
        .stdout(contains("Updated material #1"));

    lab()
        .args(["--db", &db_path, "material", "list"])
        .assert()
        .success()
        .stdout(contains("Cationic starch").and(contains("wet end")));

    lab()
        .args(["--db", &db_path, "material", "del", "1", "--yes"])
        .assert()
        .success();

    lab()
        .args(["--db", &db_path, "material", "list"])
        .assert()
        .success()
        .stdout(contains("No materials defined"));
}

#[test]
fn test_delete_without_confirmation_is_cancelled() {
    let db_path = setup_test_db("material_del_cancel");
    init_db(&db_path);
    add_material(&db_path, "Alum");

    // empty stdin answers "no"
    lab()
        .args(["--db", &db_path, "material", "del", "1"])
        .write_stdin("\n")
        .assert()
        .success()
        .stdout(contains("Operation cancelled"));

    lab()
        .args(["--db", &db_path, "material", "list"])
        .assert()
        .success()
        .stdout(contains("Alum"));
}

#[test]
fn test_paper_add_show_and_usage_names() {
    let db_path = setup_test_db("paper_show");
    init_db(&db_path);
    add_material(&db_path, "Starch");

    add_paper(
        &db_path,
        "1201",
        &[
            "--shift",
            "n",
            "--set",
            "humidity=7.5",
            "--set",
            "cct1=120",
            "--usage",
            "1=3.5:Acme:night batch",
            "--usage",
            "77=0",
        ],
    );

    lab()
        .args(["--db", &db_path, "paper", "show", "1"])
        .assert()
        .success()
        .stdout(
            contains("roll 1201")
                .and(contains("09:30"))
                .and(contains("Starch"))
                .and(contains("Acme"))
                .and(contains("Material 77"))
                .and(contains("night")),
        );
}

#[test]
fn test_paper_validation_lists_every_problem() {
    let db_path = setup_test_db("paper_invalid");
    init_db(&db_path);

    lab()
        .args([
            "--db", &db_path, "paper", "add", "--date", "1403-13-01", "--start", "25:00",
            "--end", "09:00", "--person", "Rezaei",
        ])
        .assert()
        .failure()
        .stderr(
            contains("roll_number")
                .and(contains("date"))
                .and(contains("sampling_start_time")),
        );

    lab()
        .args(["--db", &db_path, "paper", "list"])
        .assert()
        .success()
        .stdout(contains("No paper records found"));
}

#[test]
fn test_duplicate_roll_warns_but_saves() {
    let db_path = setup_test_db("paper_dup_roll");
    init_db(&db_path);

    add_paper(&db_path, "900", &[]);

    lab()
        .args([
            "--db", &db_path, "paper", "add", "--date", "1403-02-16", "--start", "08:00",
            "--end", "09:00", "--roll", "900", "--person", "Karimi",
        ])
        .assert()
        .success()
        .stdout(contains("already used by paper #1"));

    lab()
        .args(["--db", &db_path, "paper", "list", "--search", "900"])
        .assert()
        .success()
        .stdout(contains("Showing 2 of 2"));
}

#[test]
fn test_paper_edit_and_filters() {
    let db_path = setup_test_db("paper_edit");
    init_db(&db_path);

    add_paper(&db_path, "10", &["--shift", "day", "--usage", "4=2"]);
    add_paper(&db_path, "11", &["--shift", "night"]);

    lab()
        .args([
            "--db",
            &db_path,
            "paper",
            "edit",
            "1",
            "--set",
            "humidity=6.25",
            "--drop-usage",
            "4",
        ])
        .assert()
        .success()
        .stdout(contains("Updated paper #1"));

    lab()
        .args(["--db", &db_path, "paper", "list", "--shift", "D"])
        .assert()
        .success()
        .stdout(contains("6.25").and(contains("Showing 1 of 1")));

    lab()
        .args(["--db", &db_path, "paper", "list", "--sort", "bogus"])
        .assert()
        .failure()
        .stderr(contains("Invalid sort key"));

    lab()
        .args(["--db", &db_path, "paper", "edit", "99", "--roll", "12"])
        .assert()
        .failure()
        .stderr(contains("not found"));
}

#[test]
fn test_pulp_crud() {
    let db_path = setup_test_db("pulp_crud");
    init_db(&db_path);

    lab()
        .args(["--db", &db_path, "pulp", "add", "--roll", "55"])
        .assert()
        .failure()
        .stderr(contains("lower_sampling_time"));

    lab()
        .args([
            "--db", &db_path, "pulp", "add", "--roll", "55", "--time", "08:15", "--set",
            "upper_ph=7.2",
        ])
        .assert()
        .success()
        .stdout(contains("No paper record has roll number 55"));

    add_pulp(&db_path, "56", &["--set", "lower_ph=6.8", "--set", "upper_ph=7.0"]);

    lab()
        .args(["--db", &db_path, "pulp", "show", "2"])
        .assert()
        .success()
        .stdout(contains("ph_avg").and(contains("6.9")));

    lab()
        .args(["--db", &db_path, "pulp", "edit", "1", "--roll", ""])
        .assert()
        .success();

    lab()
        .args(["--db", &db_path, "pulp", "del", "2", "-y"])
        .assert()
        .success();

    lab()
        .args(["--db", &db_path, "pulp", "list"])
        .assert()
        .success()
        .stdout(contains("Showing 1 of 1"));
}

#[test]
fn test_audit_log_records_changes() {
    let db_path = setup_test_db("audit_log");
    init_db(&db_path);
    add_material(&db_path, "Alum");
    add_paper(&db_path, "1", &[]);

    lab()
        .args(["--db", &db_path, "log", "--print"])
        .assert()
        .success()
        .stdout(
            contains("migration_applied")
                .and(contains("init"))
                .and(contains("material #1"))
                .and(contains("paper #1")),
        );
}

#[test]
fn test_suggest_json() {
    let db_path = setup_test_db("suggest_json");
    init_db(&db_path);
    add_paper(&db_path, "1", &["--usage", "3=1.5:Acme"]);
    add_paper(&db_path, "2", &["--usage", "3=2:Best"]);

    let out = lab()
        .args(["--db", &db_path, "suggest", "--json"])
        .output()
        .expect("run suggest");
    assert!(out.status.success());

    let json: serde_json::Value = serde_json::from_slice(&out.stdout).expect("valid json");
    assert_eq!(json["responsible_persons"][0], "Rezaei");
    assert_eq!(json["material_usage"]["3"]["brands"].as_array().map(Vec::len), Some(2));
}
