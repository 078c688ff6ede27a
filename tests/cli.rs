use assert_cmd::Command;
use predicates::{prelude::PredicateBooleanExt, str::contains};
use tempfile::TempDir;

const BIN_NAME: &str = "monthwise";

fn monthwise(data_dir: &TempDir) -> Command {
    let mut cmd = Command::cargo_bin(BIN_NAME).expect("binary exists");
    cmd.env("MONTHWISE_DATA_DIR", data_dir.path())
        .env_remove("MONTHWISE_MONTH")
        .env("RUST_LOG", "off");
    cmd
}

fn run(data_dir: &TempDir, args: &[&str]) {
    monthwise(data_dir).args(args).assert().success();
}

/// January with a Dining budget of 300 and a 320 restaurant charge
fn seed_january(data_dir: &TempDir) {
    run(data_dir, &["budget", "show", "--month", "2025-01"]);
    run(
        data_dir,
        &[
            "category", "add", "Eating Out", "--month", "2025-01", "--expected", "300", "--tag",
            "takeout",
        ],
    );
    run(
        data_dir,
        &[
            "transaction", "add", "Visa", "--date", "2025-01-09", "--tag", "takeout", "--", "-320",
        ],
    );
}

#[test]
fn init_creates_data_files() {
    let dir = TempDir::new().unwrap();

    monthwise(&dir)
        .arg("init")
        .assert()
        .success()
        .stdout(contains("Initialization complete!"));

    assert!(dir.path().join("config.json").exists());
    assert!(dir.path().join("data").join("categories.json").exists());
    assert!(dir.path().join("data").join("rollovers.json").exists());
    assert!(dir.path().join("data").join("transactions.json").exists());
}

#[test]
fn first_show_applies_default_template() {
    let dir = TempDir::new().unwrap();

    monthwise(&dir)
        .args(["budget", "show", "--month", "2025-01"])
        .assert()
        .success()
        .stdout(contains("applied the default template"))
        .stdout(contains("Groceries"));

    monthwise(&dir)
        .args(["category", "list", "--month", "2025-01"])
        .assert()
        .success()
        .stdout(contains("Salary").and(contains("Dining")));
}

#[test]
fn show_reports_actuals_against_expected() {
    let dir = TempDir::new().unwrap();
    seed_january(&dir);

    monthwise(&dir)
        .args(["budget", "show", "--month", "2025-01"])
        .assert()
        .success()
        .stdout(contains("Eating Out"))
        .stdout(contains("$320.00"))
        .stdout(contains("-$20.00"))
        .stdout(contains("106%"));
}

#[test]
fn account_filter_excludes_other_accounts() {
    let dir = TempDir::new().unwrap();
    seed_january(&dir);

    monthwise(&dir)
        .args(["budget", "show", "--month", "2025-01", "--account", "Checking"])
        .assert()
        .success()
        .stdout(contains("Eating Out"))
        .stdout(contains("106%").not());
}

#[test]
fn empty_month_offers_nearest_month_then_copies() {
    let dir = TempDir::new().unwrap();
    seed_january(&dir);

    monthwise(&dir)
        .args(["budget", "show", "--month", "2025-03"])
        .assert()
        .success()
        .stdout(contains("nearest month with data is 2025-01"));

    monthwise(&dir)
        .args(["budget", "bootstrap", "--copy", "--month", "2025-03"])
        .assert()
        .success()
        .stdout(contains("2025-03 has 10 categories."));

    monthwise(&dir)
        .args(["category", "list", "--month", "2025-03"])
        .assert()
        .success()
        .stdout(contains("Eating Out"));
}

#[test]
fn rollover_set_shows_allocation_and_lands_in_next_month() {
    let dir = TempDir::new().unwrap();
    run(&dir, &["budget", "show", "--month", "2025-01"]);
    run(
        &dir,
        &["category", "rename", "Dining", "Restaurants", "--month", "2025-01"],
    );
    run(
        &dir,
        &["category", "delete", "Shopping", "--month", "2025-01"],
    );

    monthwise(&dir)
        .args([
            "rollover",
            "set",
            "--month",
            "2025-01",
            "--transfer",
            "Groceries:Entertainment:25",
        ])
        .assert()
        .success()
        .stdout(contains("Saved 1 transfer(s) from 2025-01 to 2025-02"))
        .stdout(contains("over-allocated by $25.00"));

    monthwise(&dir)
        .args(["rollover", "list", "--month", "2025-02"])
        .assert()
        .success()
        .stdout(contains("Into 2025-02"))
        .stdout(contains("Groceries"))
        .stdout(contains("$25.00"));

    monthwise(&dir)
        .args(["rollover", "orphans", "--month", "2025-02"])
        .assert()
        .success()
        .stdout(contains("no matching category"));
}

#[test]
fn reset_requires_a_mode() {
    let dir = TempDir::new().unwrap();

    monthwise(&dir)
        .args(["budget", "reset", "--month", "2025-01"])
        .assert()
        .failure();
}

#[test]
fn reset_clear_removes_categories_and_rollovers() {
    let dir = TempDir::new().unwrap();
    run(&dir, &["budget", "show", "--month", "2025-01"]);
    run(
        &dir,
        &[
            "rollover", "set", "--month", "2025-01", "--transfer", "Dining:Dining:10",
        ],
    );

    monthwise(&dir)
        .args(["budget", "reset", "--clear", "--month", "2025-01"])
        .assert()
        .success()
        .stdout(contains("Cleared every category of 2025-01"))
        .stdout(contains("Removed 1 outgoing rollover(s)."));

    monthwise(&dir)
        .args(["category", "list", "--month", "2025-01"])
        .assert()
        .success()
        .stdout(contains("No categories for this month."));
}

#[test]
fn copy_onto_same_month_is_rejected() {
    let dir = TempDir::new().unwrap();
    run(&dir, &["budget", "show", "--month", "2025-01"]);

    monthwise(&dir)
        .args(["category", "copy", "--from", "2025-01", "--month", "2025-01"])
        .assert()
        .failure()
        .stderr(contains("Cannot copy"));
}

#[test]
fn invalid_month_is_rejected() {
    let dir = TempDir::new().unwrap();

    monthwise(&dir)
        .args(["budget", "show", "--month", "2025-13"])
        .assert()
        .failure();
}

#[test]
fn export_json_to_stdout() {
    let dir = TempDir::new().unwrap();
    seed_january(&dir);

    monthwise(&dir)
        .args(["export", "--format", "json", "--month", "2025-01"])
        .assert()
        .success()
        .stdout(contains("\"schema_version\""))
        .stdout(contains("\"month\": \"2025-01\""))
        .stdout(contains("Eating Out"));
}

#[test]
fn doctor_flags_uncategorized_expenses() {
    let dir = TempDir::new().unwrap();
    run(&dir, &["budget", "show", "--month", "2025-01"]);
    run(
        &dir,
        &[
            "transaction", "add", "Visa", "--date", "2025-01-12", "--tag", "pets", "--", "-40",
        ],
    );

    monthwise(&dir)
        .args(["doctor", "--month", "2025-01"])
        .assert()
        .success()
        .stdout(contains("1 of 1 expenses uncategorized"));
}

#[test]
fn audit_records_mutations() {
    let dir = TempDir::new().unwrap();
    run(&dir, &["budget", "show", "--month", "2025-01"]);

    monthwise(&dir)
        .args(["audit"])
        .assert()
        .success()
        .stdout(contains("2025-01"));
}

#[test]
fn trends_use_configured_window() {
    let dir = TempDir::new().unwrap();
    seed_january(&dir);

    monthwise(&dir)
        .args(["budget", "trends", "--month", "2025-01"])
        .assert()
        .success()
        .stdout(contains("Trends for the last 6 months"));
}

#[test]
fn transaction_list_and_accounts() {
    let dir = TempDir::new().unwrap();
    seed_january(&dir);

    monthwise(&dir)
        .args(["transaction", "list", "--month", "2025-01"])
        .assert()
        .success()
        .stdout(contains("2025-01-09"))
        .stdout(contains("-$320.00"));

    monthwise(&dir)
        .args(["transaction", "accounts"])
        .assert()
        .success()
        .stdout(contains("Visa"));
}
