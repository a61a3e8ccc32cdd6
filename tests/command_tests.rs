//! Integration tests for the vault commands, driven through their
//! `run` functions with the passphrase passed in directly.

use std::cell::Cell;
use std::fs;
use std::path::PathBuf;

use passkeeper::cli::commands::add::{self, AddArgs};
use passkeeper::cli::commands::{chpass, list, new, remove, show};
use passkeeper::config::Settings;
use passkeeper::errors::PassKeeperError;
use passkeeper::random::PasswordPreset;
use tempfile::TempDir;

const PASS: &str = "correct horse";

/// Helper: a fresh empty vault in a temp dir.
fn new_vault() -> (TempDir, PathBuf) {
    let dir = TempDir::new().expect("create temp dir");
    let path = dir.path().join("test.passdb");
    new::run(&path, PASS).expect("create vault");
    (dir, path)
}

fn args<'a>(service: &'a str, login: &'a str, password: Option<&'a str>) -> AddArgs<'a> {
    AddArgs {
        service,
        login,
        password,
        generate: None,
        comment: "",
    }
}

// ---------------------------------------------------------------------------
// add / show
// ---------------------------------------------------------------------------

#[test]
fn added_record_can_be_shown() {
    let (_dir, path) = new_vault();
    let settings = Settings::default();

    let added = add::run(
        &path,
        PASS,
        &AddArgs {
            comment: "main account",
            ..args("bank", "alice", Some("s3cret"))
        },
        &settings,
    )
    .unwrap();
    assert_eq!(added.index, 0);
    assert_eq!(added.name, "alice@bank");
    assert!(added.generated.is_none());

    let record = show::run(&path, PASS, 0).unwrap();
    assert_eq!(record.service, b"bank");
    assert_eq!(record.login, b"alice");
    assert_eq!(record.password, b"s3cret");
    assert_eq!(record.comment, b"main account");
}

#[test]
fn add_reports_sorted_position() {
    let (_dir, path) = new_vault();
    let settings = Settings::default();

    add::run(&path, PASS, &args("zeta", "", Some("1")), &settings).unwrap();
    add::run(&path, PASS, &args("mu", "", Some("2")), &settings).unwrap();
    let added = add::run(&path, PASS, &args("alpha", "", Some("3")), &settings).unwrap();
    assert_eq!(added.index, 0);

    assert_eq!(show::run(&path, PASS, 2).unwrap().service, b"zeta");
}

#[test]
fn generate_without_preset_uses_configured_default() {
    let (_dir, path) = new_vault();
    let settings = Settings {
        default_preset: "pin4".into(),
        ..Settings::default()
    };

    let added = add::run(
        &path,
        PASS,
        &AddArgs {
            generate: Some(""),
            ..args("sim", "", None)
        },
        &settings,
    )
    .unwrap();

    let (preset, secret) = added.generated.expect("password was generated");
    assert_eq!(preset, PasswordPreset::Pin4);
    assert_eq!(secret.len(), 4);
    assert!(secret.bytes().all(|b| b.is_ascii_digit()));
    assert_eq!(show::run(&path, PASS, 0).unwrap().password, secret.as_bytes());
}

#[test]
fn generate_with_named_preset() {
    let (_dir, path) = new_vault();

    let added = add::run(
        &path,
        PASS,
        &AddArgs {
            generate: Some("key256"),
            ..args("disk", "", None)
        },
        &Settings::default(),
    )
    .unwrap();

    let (preset, secret) = added.generated.unwrap();
    assert_eq!(preset, PasswordPreset::Key256);
    assert_eq!(secret.len(), 64);
}

#[test]
fn unknown_preset_leaves_vault_untouched() {
    let (_dir, path) = new_vault();
    let before = fs::read(&path).unwrap();

    let result = add::run(
        &path,
        PASS,
        &AddArgs {
            generate: Some("pass7"),
            ..args("site", "", None)
        },
        &Settings::default(),
    );
    assert!(matches!(result, Err(PassKeeperError::ConfigError(_))));
    assert_eq!(fs::read(&path).unwrap(), before);
}

#[test]
fn add_without_password_stores_empty_password() {
    let (_dir, path) = new_vault();
    add::run(&path, PASS, &args("forum", "bob", None), &Settings::default()).unwrap();
    assert!(show::run(&path, PASS, 0).unwrap().password.is_empty());
}

#[test]
fn add_with_wrong_passphrase_fails() {
    let (_dir, path) = new_vault();
    let result = add::run(&path, "nope", &args("bank", "", Some("x")), &Settings::default());
    assert!(matches!(result, Err(PassKeeperError::DecryptionFailure)));
}

#[test]
fn show_out_of_range_is_record_not_found() {
    let (_dir, path) = new_vault();
    add::run(&path, PASS, &args("bank", "", Some("x")), &Settings::default()).unwrap();

    assert!(matches!(
        show::run(&path, PASS, 1),
        Err(PassKeeperError::RecordNotFound(1))
    ));
}

// ---------------------------------------------------------------------------
// remove
// ---------------------------------------------------------------------------

#[test]
fn remove_asks_with_display_name_and_respects_answer() {
    let (_dir, path) = new_vault();
    let settings = Settings::default();
    add::run(&path, PASS, &args("bank", "alice", Some("x")), &settings).unwrap();
    add::run(&path, PASS, &args("mail", "", Some("y")), &settings).unwrap();

    let declined = remove::run(&path, PASS, 0, |name| {
        assert_eq!(name, "alice@bank");
        Ok(false)
    })
    .unwrap();
    assert_eq!(declined, None);
    assert_eq!(list::run(&path, PASS, None).unwrap().total, 2);

    let removed = remove::run(&path, PASS, 0, |_| Ok(true)).unwrap();
    assert_eq!(removed.as_deref(), Some("alice@bank"));

    let listing = list::run(&path, PASS, None).unwrap();
    assert_eq!(listing.total, 1);
    assert_eq!(listing.rows[0].1.service, b"mail");
}

#[test]
fn remove_out_of_range_does_not_ask() {
    let (_dir, path) = new_vault();
    let asked = Cell::new(false);

    let result = remove::run(&path, PASS, 3, |_| {
        asked.set(true);
        Ok(true)
    });
    assert!(matches!(result, Err(PassKeeperError::RecordNotFound(3))));
    assert!(!asked.get());
}

// ---------------------------------------------------------------------------
// list / chpass
// ---------------------------------------------------------------------------

#[test]
fn list_filters_but_keeps_vault_indices() {
    let (_dir, path) = new_vault();
    let settings = Settings::default();
    for service in ["alpha.com", "beta.org", "gamma.com"] {
        add::run(&path, PASS, &args(service, "", Some("x")), &settings).unwrap();
    }

    let listing = list::run(&path, PASS, Some(".COM")).unwrap();
    assert_eq!(listing.total, 3);
    let indices: Vec<usize> = listing.rows.iter().map(|(i, _)| *i).collect();
    assert_eq!(indices, vec![0, 2]);
}

#[test]
fn chpass_reencrypts_under_new_passphrase() {
    let (_dir, path) = new_vault();
    add::run(&path, PASS, &args("bank", "", Some("x")), &Settings::default()).unwrap();

    assert_eq!(chpass::run(&path, PASS, "new pass").unwrap(), 1);

    assert!(matches!(
        show::run(&path, PASS, 0),
        Err(PassKeeperError::DecryptionFailure)
    ));
    assert_eq!(show::run(&path, "new pass", 0).unwrap().password, b"x");
}

#[test]
fn chpass_with_wrong_old_passphrase_changes_nothing() {
    let (_dir, path) = new_vault();
    let before = fs::read(&path).unwrap();

    assert!(chpass::run(&path, "wrong", "new pass").is_err());
    assert_eq!(fs::read(&path).unwrap(), before);
}
