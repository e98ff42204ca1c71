mod harness;

use harness::TestContext;
use predicates::prelude::*;
use std::fs;
use std::os::unix::fs::MetadataExt;

#[test]
fn writer_create_reports_disk_attributes() {
    let ctx = TestContext::new();

    ctx.cli()
        .args(["apply", "writer", "--path", "out.txt", "--contents", "hello", "--mode", "0600"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Created file_writer out.txt"));

    assert_eq!(ctx.read_file("out.txt"), "hello");
    assert_eq!(ctx.mode_of("out.txt"), 0o600);

    let state = ctx.state();
    assert_eq!(state["kind"], "file_writer");
    assert_eq!(state["data"]["id"], "out.txt");
    let attributes = &state["data"]["attributes"];
    assert_eq!(attributes["name"], "out.txt");
    assert_eq!(attributes["contents"], "hello");
    assert_eq!(attributes["size"], 5);
    assert_eq!(attributes["mode"], "0600");
}

#[test]
fn mode_only_change_keeps_the_same_file() {
    let ctx = TestContext::new();
    let apply = |mode: &str| {
        ctx.cli()
            .args(["apply", "writer", "--path", "out.txt", "--contents", "hello", "--mode", mode])
            .assert()
            .success()
    };

    apply("0600");
    let inode = fs::metadata(ctx.path("out.txt")).unwrap().ino();

    apply("0640").stdout(predicate::str::contains("Updated file_writer out.txt (changed: mode)"));

    assert_eq!(ctx.read_file("out.txt"), "hello");
    assert_eq!(ctx.mode_of("out.txt"), 0o640);
    assert_eq!(fs::metadata(ctx.path("out.txt")).unwrap().ino(), inode);
    assert_eq!(ctx.state()["data"]["attributes"]["mode"], "0640");
}

#[test]
fn keep_on_destroy_leaves_file_behind() {
    let ctx = TestContext::new();

    ctx.cli()
        .args(["apply", "writer", "--path", "kept.txt", "--contents", "stay", "--keep-on-destroy"])
        .assert()
        .success();
    ctx.cli()
        .arg("destroy")
        .assert()
        .success()
        .stdout(predicate::str::contains("Destroyed file_writer kept.txt"));

    assert_eq!(ctx.read_file("kept.txt"), "stay");
    assert!(!ctx.state_path().exists());
}

#[test]
fn reader_on_directory_fails_without_state() {
    let ctx = TestContext::new();
    fs::create_dir(ctx.path("folder")).unwrap();

    ctx.cli()
        .args(["apply", "reader", "--path", "folder"])
        .assert()
        .failure()
        .code(1)
        .stderr(predicate::str::starts_with("Error:").and(predicate::str::contains("is a directory")));

    assert!(!ctx.state_path().exists());
}

#[test]
fn repeated_apply_is_a_noop() {
    let ctx = TestContext::new();
    let args = ["apply", "writer", "--path", "same.txt", "--contents", "x"];

    ctx.cli().args(args).assert().success();
    ctx.cli()
        .args(args)
        .assert()
        .success()
        .stdout(predicate::str::contains("file_writer same.txt is up to date"));
}

#[test]
fn absolute_path_to_same_file_is_a_noop() {
    let ctx = TestContext::new();
    ctx.cli().args(["apply", "writer", "--path", "same.txt"]).assert().success();

    let absolute = ctx.path("same.txt");
    ctx.cli()
        .args(["apply", "writer", "--path", absolute.to_str().unwrap()])
        .assert()
        .success()
        .stdout(predicate::str::contains("is up to date"));
    assert_eq!(ctx.state()["data"]["attributes"]["path"], "same.txt");
}

#[test]
fn moving_the_path_replaces_the_file() {
    let ctx = TestContext::new();
    ctx.cli().args(["apply", "writer", "--path", "a.txt", "--contents", "1"]).assert().success();

    ctx.cli()
        .args(["apply", "writer", "--path", "b.txt", "--contents", "1"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Replaced file_writer b.txt (forced by: path)"));

    assert!(!ctx.path("a.txt").exists());
    assert_eq!(ctx.read_file("b.txt"), "1");
}

#[test]
fn reader_tracks_file_without_touching_it() {
    let ctx = TestContext::new();
    ctx.write_file("notes/todo.txt", "buy milk", 0o640);

    ctx.cli().args(["apply", "reader", "--path", "notes/todo.txt"]).assert().success();
    ctx.cli().arg("destroy").assert().success();

    assert_eq!(ctx.read_file("notes/todo.txt"), "buy milk");
    assert_eq!(ctx.mode_of("notes/todo.txt"), 0o640);
}

#[test]
fn refresh_forgets_a_deleted_file() {
    let ctx = TestContext::new();
    ctx.cli().args(["apply", "writer", "--path", "brief.txt"]).assert().success();
    fs::remove_file(ctx.path("brief.txt")).unwrap();

    ctx.cli()
        .arg("refresh")
        .assert()
        .success()
        .stdout(predicate::str::contains("no longer exists"));

    assert!(!ctx.state_path().exists());
}

#[test]
fn refresh_records_external_edits() {
    let ctx = TestContext::new();
    ctx.write_file("watched.txt", "v1", 0o644);
    ctx.cli().args(["apply", "reader", "--path", "watched.txt"]).assert().success();
    fs::write(ctx.path("watched.txt"), "version two").unwrap();

    ctx.cli()
        .arg("refresh")
        .assert()
        .success()
        .stdout(predicate::str::contains("changed: contents, size"));

    assert_eq!(ctx.state()["data"]["attributes"]["contents"], "version two");
}

#[test]
fn show_masks_contents_unless_asked() {
    let ctx = TestContext::new();
    ctx.cli()
        .args(["apply", "writer", "--path", "secret.txt", "--contents", "hunter2"])
        .assert()
        .success();

    ctx.cli()
        .arg("show")
        .assert()
        .success()
        .stdout(predicate::str::contains("(sensitive value)").and(predicate::str::contains("hunter2").not()));
    ctx.cli()
        .args(["show", "--show-sensitive"])
        .assert()
        .success()
        .stdout(predicate::str::contains("hunter2"));
}

#[test]
fn state_file_is_private() {
    let ctx = TestContext::new();
    ctx.cli().args(["apply", "writer", "--path", "f.txt", "--contents", "x"]).assert().success();
    assert_eq!(ctx.mode_of(ctx.state_path()), 0o600);
}

#[test]
fn state_flag_and_env_select_state_file() {
    let ctx = TestContext::new();

    ctx.cli()
        .args(["--state", "custom.json", "apply", "writer", "--path", "f.txt"])
        .assert()
        .success();
    assert!(ctx.path("custom.json").exists());
    assert!(!ctx.state_path().exists());

    ctx.cli()
        .env("FSRES_STATE", ctx.path("custom.json"))
        .arg("show")
        .assert()
        .success()
        .stdout(predicate::str::contains("\"file_writer\""));
}

#[test]
fn tilde_paths_expand_to_home() {
    let ctx = TestContext::new();

    ctx.cli()
        .args(["apply", "writer", "--path", "~/dotfile", "--contents", "cfg", "--root", "~"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Created file_writer dotfile"));

    assert_eq!(fs::read_to_string(ctx.home().join("dotfile")).unwrap(), "cfg");
}

#[test]
fn contents_can_come_from_a_file() {
    let ctx = TestContext::new();
    ctx.write_file("template.txt", "from file", 0o644);

    ctx.cli()
        .args(["apply", "writer", "--path", "copy.txt", "--contents-file", "template.txt"])
        .assert()
        .success();

    assert_eq!(ctx.read_file("copy.txt"), "from file");
}

#[test]
fn missing_parent_is_an_error_when_creation_is_disabled() {
    let ctx = TestContext::new();

    ctx.cli()
        .args(["apply", "writer", "--path", "deep/f.txt", "--no-create-parent-dirs"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("no parent directory"));

    assert!(!ctx.path("deep").exists());
}

#[test]
fn invalid_mode_is_rejected() {
    let ctx = TestContext::new();

    ctx.cli()
        .args(["apply", "writer", "--path", "f.txt", "--mode", "rw-r--r--"])
        .assert()
        .failure()
        .code(1)
        .stderr(predicate::str::contains("failed to parse mode 'rw-r--r--'"));

    assert!(!ctx.path("f.txt").exists());
}

#[test]
fn commands_without_state_report_nothing_tracked() {
    let ctx = TestContext::new();
    for command in ["refresh", "show", "destroy"] {
        ctx.cli()
            .arg(command)
            .assert()
            .success()
            .stdout(predicate::str::contains("No resource is tracked"));
    }
}
