//! CLI integration tests for the dinner decider
//!
//! These tests drive the `dinner` binary end to end: project setup, list
//! management, filters, and rolls.

use predicates::prelude::*;
use tempfile::TempDir;

const NO_CANDIDATES: &str = "No restaurants to choose from. Add one or turn on more categories!";

/// Get a command instance for the dinner binary
fn dinner_cmd() -> assert_cmd::Command {
    let mut cmd = assert_cmd::Command::new(assert_cmd::cargo::cargo_bin!("dinner"));
    cmd.env("DINNER_USER", "tester");
    cmd
}

/// Create a temporary directory and initialize a dinner project
fn setup_project() -> TempDir {
    let dir = TempDir::new().unwrap();
    dinner_cmd().arg("init").arg(dir.path()).assert().success();
    dir
}

/// Create a project with the starter restaurants
fn setup_seeded_project() -> TempDir {
    let dir = TempDir::new().unwrap();
    dinner_cmd()
        .args(["init", "--seed"])
        .arg(dir.path())
        .assert()
        .success();
    dir
}

/// Add a restaurant and return its ID
fn add_restaurant(dir: &TempDir, name: &str, category: &str) -> String {
    let output = dinner_cmd()
        .current_dir(dir.path())
        .args(["add", name, "--category", category, "--format", "json"])
        .assert()
        .success();

    let json: serde_json::Value = serde_json::from_slice(&output.get_output().stdout).unwrap();
    json["id"].as_str().unwrap().to_string()
}

fn stdout_of(dir: &TempDir, args: &[&str]) -> String {
    let output = dinner_cmd()
        .current_dir(dir.path())
        .args(args)
        .assert()
        .success();
    String::from_utf8_lossy(&output.get_output().stdout).to_string()
}

// =============================================================================
// Initialization Tests
// =============================================================================

#[test]
fn test_init_creates_structure() {
    let dir = TempDir::new().unwrap();

    dinner_cmd()
        .arg("init")
        .arg(dir.path())
        .assert()
        .success()
        .stdout(predicate::str::contains("Initialized dinner project"));

    assert!(dir.path().join(".dinner").is_dir());
    assert!(dir.path().join(".dinner/config.toml").is_file());
    assert!(dir.path().join(".dinner/.gitignore").is_file());
}

#[test]
fn test_init_is_idempotent() {
    let dir = TempDir::new().unwrap();

    dinner_cmd().arg("init").arg(dir.path()).assert().success();
    dinner_cmd().arg("init").arg(dir.path()).assert().success();
}

#[test]
fn test_init_seed_adds_starters() {
    let dir = TempDir::new().unwrap();

    dinner_cmd()
        .args(["init", "--seed"])
        .arg(dir.path())
        .assert()
        .success()
        .stdout(predicate::str::contains("Added 6 starter restaurants"));

    dinner_cmd()
        .current_dir(dir.path())
        .arg("list")
        .assert()
        .success()
        .stdout(predicate::str::contains("Pasta House"))
        .stdout(predicate::str::contains("Burger Joint"))
        .stdout(predicate::str::contains("6 restaurant(s)"));
}

// =============================================================================
// List Management Tests
// =============================================================================

#[test]
fn test_add_and_list() {
    let dir = setup_project();

    dinner_cmd()
        .current_dir(dir.path())
        .args(["add", "Ramen Bar", "-c", "dine-in-or-takeout"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Added restaurant"))
        .stdout(predicate::str::contains("Ramen Bar"));

    dinner_cmd()
        .current_dir(dir.path())
        .arg("list")
        .assert()
        .success()
        .stdout(predicate::str::contains("Ramen Bar"))
        .stdout(predicate::str::contains("Dine-in/Takeout"));
}

#[test]
fn test_add_defaults_to_dine_in() {
    let dir = setup_project();
    add_restaurant(&dir, "Trattoria", "dine-in");

    let output = dinner_cmd()
        .current_dir(dir.path())
        .args(["add", "Bistro", "--format", "json"])
        .assert()
        .success();
    let json: serde_json::Value = serde_json::from_slice(&output.get_output().stdout).unwrap();

    assert_eq!(json["category"], "dine_in");
    assert_eq!(json["added_by"], "tester");
    assert_eq!(json["eligible"], true);
}

#[test]
fn test_add_blank_name_fails() {
    let dir = setup_project();

    dinner_cmd()
        .current_dir(dir.path())
        .args(["add", "   "])
        .assert()
        .failure()
        .stderr(predicate::str::contains("cannot be empty"));
}

#[test]
fn test_add_unknown_category_fails() {
    let dir = setup_project();

    dinner_cmd()
        .current_dir(dir.path())
        .args(["add", "Taco Truck", "-c", "food-truck"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Unknown category"));
}

#[test]
fn test_list_empty() {
    let dir = setup_project();

    dinner_cmd()
        .current_dir(dir.path())
        .arg("list")
        .assert()
        .success()
        .stdout(predicate::str::contains("The list is empty"));
}

#[test]
fn test_list_keeps_insertion_order() {
    let dir = setup_project();
    add_restaurant(&dir, "Zucchini Place", "dine-in");
    add_restaurant(&dir, "Anchovy Shack", "takeout");

    let output = dinner_cmd()
        .current_dir(dir.path())
        .args(["list", "--format", "json"])
        .assert()
        .success();
    let json: serde_json::Value = serde_json::from_slice(&output.get_output().stdout).unwrap();
    let names: Vec<_> = json
        .as_array()
        .unwrap()
        .iter()
        .map(|r| r["name"].as_str().unwrap().to_string())
        .collect();

    assert_eq!(names, vec!["Zucchini Place", "Anchovy Shack"]);
}

#[test]
fn test_edit_restaurant() {
    let dir = setup_project();
    let id = add_restaurant(&dir, "Burger Joint", "dine-in");

    dinner_cmd()
        .current_dir(dir.path())
        .args(["edit", &id, "--name", "Burger Palace", "--category", "fast-food"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Updated restaurant"))
        .stdout(predicate::str::contains("Burger Palace"))
        .stdout(predicate::str::contains("Fast Food"));

    let listing = stdout_of(&dir, &["list"]);
    assert!(listing.contains("Burger Palace"));
    assert!(!listing.contains("Burger Joint"));
}

#[test]
fn test_edit_requires_a_change() {
    let dir = setup_project();
    let id = add_restaurant(&dir, "Pho Corner", "takeout");

    dinner_cmd()
        .current_dir(dir.path())
        .args(["edit", &id])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Nothing to change"));
}

#[test]
fn test_remove_restaurant() {
    let dir = setup_project();
    let id = add_restaurant(&dir, "Closed Diner", "dine-in");
    add_restaurant(&dir, "Open Diner", "dine-in");

    dinner_cmd()
        .current_dir(dir.path())
        .args(["remove", &id])
        .assert()
        .success()
        .stdout(predicate::str::contains("Removed restaurant"));

    let listing = stdout_of(&dir, &["list"]);
    assert!(!listing.contains("Closed Diner"));
    assert!(listing.contains("Open Diner"));

    dinner_cmd()
        .current_dir(dir.path())
        .args(["remove", &id])
        .assert()
        .failure()
        .stderr(predicate::str::contains("not found"));
}

// =============================================================================
// Filter Tests
// =============================================================================

#[test]
fn test_filter_show_defaults_all_on() {
    let dir = setup_seeded_project();

    dinner_cmd()
        .current_dir(dir.path())
        .args(["filter", "show"])
        .assert()
        .success()
        .stdout(predicate::str::contains("[x] Dine-in"))
        .stdout(predicate::str::contains("[x] Takeout"))
        .stdout(predicate::str::contains("[x] Fast Food"))
        .stdout(predicate::str::contains("6 of 6 restaurant(s) eligible"));
}

#[test]
fn test_filter_toggle_persists() {
    let dir = setup_seeded_project();

    dinner_cmd()
        .current_dir(dir.path())
        .args(["filter", "toggle", "fast-food"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Fast Food turned off"))
        .stdout(predicate::str::contains("[ ] Fast Food"));

    let pool = stdout_of(&dir, &["pool"]);
    assert!(!pool.contains("Burger Joint"));
    assert!(pool.contains("Pasta House"));

    dinner_cmd()
        .current_dir(dir.path())
        .args(["filter", "toggle", "fast-food"])
        .assert()
        .success()
        .stdout(predicate::str::contains("[x] Fast Food"));
}

#[test]
fn test_composite_category_follows_either_member() {
    let dir = setup_project();
    add_restaurant(&dir, "Noodle House", "dine-in-or-takeout");
    add_restaurant(&dir, "Burger Joint", "fast-food");

    // Dine-in off: still eligible through takeout
    dinner_cmd()
        .current_dir(dir.path())
        .args(["filter", "toggle", "dine-in"])
        .assert()
        .success();
    assert!(stdout_of(&dir, &["pool"]).contains("Noodle House"));

    // Both members off: gone
    dinner_cmd()
        .current_dir(dir.path())
        .args(["filter", "toggle", "takeout"])
        .assert()
        .success();
    let pool = stdout_of(&dir, &["pool"]);
    assert!(!pool.contains("Noodle House"));
    assert!(pool.contains("Burger Joint"));
}

#[test]
fn test_composite_filter_cannot_be_toggled() {
    let dir = setup_project();

    dinner_cmd()
        .current_dir(dir.path())
        .args(["filter", "toggle", "dine-in-or-takeout"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("combined category"));
}

#[test]
fn test_filter_reset() {
    let dir = setup_seeded_project();

    for tag in ["dine-in", "takeout", "fast-food"] {
        dinner_cmd()
            .current_dir(dir.path())
            .args(["filter", "toggle", tag])
            .assert()
            .success();
    }

    dinner_cmd()
        .current_dir(dir.path())
        .args(["pool"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Nothing to roll"));

    dinner_cmd()
        .current_dir(dir.path())
        .args(["filter", "reset"])
        .assert()
        .success()
        .stdout(predicate::str::contains("6 of 6 restaurant(s) eligible"));
}

#[test]
fn test_filter_json_output() {
    let dir = setup_seeded_project();

    let output = dinner_cmd()
        .current_dir(dir.path())
        .args(["filter", "toggle", "takeout", "--format", "json"])
        .assert()
        .success();
    let json: serde_json::Value = serde_json::from_slice(&output.get_output().stdout).unwrap();

    assert_eq!(json["toggled"], "takeout");
    assert_eq!(json["filters"][1]["active"], false);
    // Taiwanese Street Food is takeout only
    assert_eq!(json["eligible"], 5);
    assert_eq!(json["total"], 6);
}

// =============================================================================
// Roll Tests
// =============================================================================

#[test]
fn test_roll_picks_from_the_list() {
    let dir = setup_seeded_project();

    let picked = stdout_of(&dir, &["roll", "--quiet", "--quick"]);
    let picked = picked.trim();

    let listing = stdout_of(&dir, &["list"]);
    assert!(!picked.is_empty());
    assert!(listing.contains(picked));
}

#[test]
fn test_roll_respects_filters() {
    let dir = setup_seeded_project();

    for tag in ["dine-in", "takeout"] {
        dinner_cmd()
            .current_dir(dir.path())
            .args(["filter", "toggle", tag])
            .assert()
            .success();
    }

    for seed in 0..5 {
        let seed = seed.to_string();
        let picked = stdout_of(&dir, &["roll", "--quiet", "--quick", "--seed", &seed]);
        assert_eq!(picked.trim(), "Burger Joint");
    }
}

#[test]
fn test_roll_with_seed_is_reproducible() {
    let dir = setup_seeded_project();

    let first = stdout_of(&dir, &["roll", "--quiet", "--quick", "--seed", "7"]);
    let second = stdout_of(&dir, &["roll", "--quiet", "--quick", "--seed", "7"]);

    assert_eq!(first, second);
}

#[test]
fn test_roll_text_output() {
    let dir = setup_project();
    add_restaurant(&dir, "Only Option", "takeout");

    dinner_cmd()
        .current_dir(dir.path())
        .args(["roll", "--quick"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Tonight: Only Option (Takeout)"));
}

#[test]
fn test_roll_piped_output_has_no_animation_frames() {
    let dir = setup_seeded_project();

    // assert_cmd captures stdout through a pipe, never a terminal
    let stdout = stdout_of(&dir, &["roll", "--quick", "--seed", "3"]);

    assert!(!stdout.contains('\x1b'), "escape codes in piped output: {:?}", stdout);
    assert!(!stdout.contains('\r'));
    assert!(!stdout.contains("Deciding..."));
    assert_eq!(stdout.lines().count(), 1);
    assert!(stdout.starts_with("Tonight: "));
}

#[test]
fn test_roll_json_output() {
    let dir = setup_project();
    let id = add_restaurant(&dir, "Only Option", "fast-food");

    let output = dinner_cmd()
        .current_dir(dir.path())
        .args(["roll", "--quick", "--format", "json"])
        .assert()
        .success();
    let json: serde_json::Value = serde_json::from_slice(&output.get_output().stdout).unwrap();

    assert_eq!(json["result"]["id"], id);
    assert_eq!(json["result"]["name"], "Only Option");
    assert_eq!(json["result"]["category"], "fast_food");
    assert_eq!(json["pool_size"], 1);
}

#[test]
fn test_roll_empty_list_shows_message() {
    let dir = setup_project();

    dinner_cmd()
        .current_dir(dir.path())
        .args(["roll", "--quick"])
        .assert()
        .success()
        .stdout(predicate::str::contains(NO_CANDIDATES));
}

#[test]
fn test_roll_all_filtered_out_json() {
    let dir = setup_project();
    add_restaurant(&dir, "Burger Joint", "fast-food");

    dinner_cmd()
        .current_dir(dir.path())
        .args(["filter", "toggle", "fast-food"])
        .assert()
        .success();

    let output = dinner_cmd()
        .current_dir(dir.path())
        .args(["roll", "--format", "json"])
        .assert()
        .success();
    let json: serde_json::Value = serde_json::from_slice(&output.get_output().stdout).unwrap();

    assert!(json["result"].is_null());
    assert_eq!(json["message"], NO_CANDIDATES);
    assert_eq!(json["pool_size"], 0);
}

// =============================================================================
// Error Handling Tests
// =============================================================================

#[test]
fn test_not_in_project_error() {
    let dir = TempDir::new().unwrap();

    dinner_cmd()
        .current_dir(dir.path())
        .args(["list"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Not in a dinner project"));
}

#[test]
fn test_invalid_id_error() {
    let dir = setup_project();

    dinner_cmd()
        .current_dir(dir.path())
        .args(["remove", "r-nothex!"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Invalid restaurant ID"));
}

#[test]
fn test_verbose_flag() {
    let dir = setup_seeded_project();

    let output = dinner_cmd()
        .current_dir(dir.path())
        .args(["--verbose", "pool"])
        .assert()
        .success();

    let stderr = String::from_utf8_lossy(&output.get_output().stderr);
    assert!(stderr.contains("[verbose]"));
    assert!(stderr.contains("[verbose:pool]"));
}
