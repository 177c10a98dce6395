use crate::common::{TestStore, incoming_yaml};
use assert_cmd::Command;
use kubemerge_cli::kubeconfig::KubeConfig;
use predicates::prelude::*;

fn load(store: &TestStore) -> KubeConfig {
    KubeConfig::parse(store.read().as_bytes()).unwrap()
}

#[test]
fn test_merge_from_stdin() {
    let store = TestStore::new();

    store
        .command()
        .arg("staging")
        .write_stdin(incoming_yaml())
        .assert()
        .success()
        .stdout(predicate::str::contains("Context 'staging' added successfully to"));

    let merged = load(&store);
    assert_eq!(merged.current_context, "staging");
    assert_eq!(merged.context_names(), vec!["context1", "staging"]);
    assert_eq!(merged.clusters.len(), 2);
    assert_eq!(merged.users.len(), 2);
    assert_eq!(
        merged.find_cluster("cluster1").unwrap().nested_str("cluster", "server"),
        Some("https://old-server-ip")
    );
    assert!(merged.extensions.contains_key("preferences"));
}

#[test]
fn test_merge_with_server_override() {
    let store = TestStore::new();

    store
        .command()
        .args(["staging", "https://updated-server-ip"])
        .write_stdin(incoming_yaml())
        .assert()
        .success();

    let merged = load(&store);
    assert_eq!(
        merged.find_cluster("cluster1").unwrap().nested_str("cluster", "server"),
        Some("https://updated-server-ip")
    );
    assert_eq!(
        merged.find_cluster("cluster2").unwrap().nested_str("cluster", "server"),
        Some("https://cluster2.example.com")
    );
}

#[test]
fn test_merge_into_default_home_store() {
    let store = TestStore::new();
    let mut cmd = Command::cargo_bin("kubemerge").unwrap();

    cmd.env("HOME", store.temp.path())
        .env("USERPROFILE", store.temp.path())
        .env_remove("KUBEMERGE_KUBECONFIG")
        .arg("staging")
        .write_stdin(incoming_yaml())
        .assert()
        .success();

    assert_eq!(load(&store).current_context, "staging");
}

#[test]
fn test_merge_from_input_file() {
    let store = TestStore::new();
    let input = store.temp.path().join("incoming.yaml");
    std::fs::write(&input, incoming_yaml()).unwrap();

    store.command().arg("--input").arg(&input).arg("from-file").assert().success();

    assert_eq!(load(&store).current_context, "from-file");
}

#[test]
fn test_dry_run_prints_and_does_not_write() {
    let store = TestStore::new();
    let before = store.read();

    store
        .command()
        .args(["--dry-run", "staging"])
        .write_stdin(incoming_yaml())
        .assert()
        .success()
        .stdout(predicate::str::contains("current-context: staging"))
        .stdout(predicate::str::contains("added successfully").not());

    assert_eq!(store.read(), before);
}

#[test]
fn test_backup_keeps_previous_store() {
    let store = TestStore::new();
    let before = store.read();

    store
        .command()
        .args(["--backup", "staging"])
        .write_stdin(incoming_yaml())
        .assert()
        .success();

    let backup = store.path.with_file_name("config.bak");
    assert_eq!(std::fs::read_to_string(backup).unwrap(), before);
}

#[test]
fn test_quiet_prints_nothing_on_success() {
    let store = TestStore::new();

    store
        .command()
        .args(["--quiet", "staging"])
        .write_stdin(incoming_yaml())
        .assert()
        .success()
        .stdout(predicate::str::is_empty());
}

#[test]
#[cfg(unix)]
fn test_store_is_owner_only_after_merge() {
    use std::os::unix::fs::PermissionsExt;

    let store = TestStore::new();
    let mut perms = std::fs::metadata(&store.path).unwrap().permissions();
    perms.set_mode(0o644);
    std::fs::set_permissions(&store.path, perms).unwrap();

    store.command().arg("staging").write_stdin(incoming_yaml()).assert().success();

    let mode = std::fs::metadata(&store.path).unwrap().permissions().mode() & 0o777;
    assert_eq!(mode, 0o600);
}

#[test]
fn test_repeated_import_appends_duplicates() {
    let store = TestStore::new();

    for _ in 0..2 {
        store.command().arg("staging").write_stdin(incoming_yaml()).assert().success();
    }

    let merged = load(&store);
    assert_eq!(merged.context_names(), vec!["context1", "staging", "staging"]);
    assert_eq!(merged.clusters.len(), 2);
}
