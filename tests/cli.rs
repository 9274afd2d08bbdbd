use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::TempDir;

fn pagemark_cmd() -> Command {
    Command::cargo_bin("pagemark").expect("binary exists")
}

/// Isolates the command from the user's own config file.
fn isolated_cmd(home: &TempDir) -> Command {
    let mut cmd = pagemark_cmd();
    cmd.env("XDG_CONFIG_HOME", home.path()).env("HOME", home.path());
    cmd
}

#[test]
fn pagemark_help_prints_usage() {
    pagemark_cmd()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains(
            "Render, share and inspect web page annotations",
        ))
        .stdout(predicate::str::contains("publish"));
}

#[test]
fn decode_prints_link_parts() {
    let temp = TempDir::new().unwrap();
    // base64 of "https://example.com/docs#ant=1280=abc123"
    let link = "https://annotateweb.com/?view=aHR0cHM6Ly9leGFtcGxlLmNvbS9kb2NzI2FudD0xMjgwPWFiYzEyMw%3D%3D";

    isolated_cmd(&temp)
        .args(["decode", link])
        .assert()
        .success()
        .stdout(predicate::str::contains("page:  https://example.com/docs"))
        .stdout(predicate::str::contains("width: 1280"))
        .stdout(predicate::str::contains("id:    abc123"));
}

#[test]
fn decode_rejects_links_without_share_fragment() {
    let temp = TempDir::new().unwrap();
    isolated_cmd(&temp)
        .args(["decode", "https://example.com/docs#intro"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("not a share fragment"));
}

#[test]
fn render_writes_png_into_output_dir() {
    let temp = TempDir::new().unwrap();
    let log = temp.path().join("log.json");
    std::fs::write(
        &log,
        r##"[{"tool":"line","color":"#6200d9","lineWidth":5,"startX":10,"startY":10,"endX":90,"endY":10}]"##,
    )
    .unwrap();
    let out = temp.path().join("out");

    isolated_cmd(&temp)
        .args(["render", "--width", "100", "--height", "40", "-o"])
        .arg(&out)
        .arg(&log)
        .assert()
        .success()
        .stdout(predicate::str::contains("screenshot-full-"));

    let written: Vec<_> = std::fs::read_dir(&out)
        .unwrap()
        .map(|entry| entry.unwrap().path())
        .collect();
    assert_eq!(written.len(), 1);
    let bytes = std::fs::read(&written[0]).unwrap();
    assert!(bytes.starts_with(&[0x89, b'P', b'N', b'G']));
}

#[test]
fn render_fails_for_missing_log() {
    let temp = TempDir::new().unwrap();
    isolated_cmd(&temp)
        .args(["render", "-o"])
        .arg(temp.path())
        .arg(temp.path().join("nope.json"))
        .assert()
        .failure()
        .stderr(predicate::str::contains("Failed to read"));
}

#[test]
fn invite_uses_configured_base() {
    let temp = TempDir::new().unwrap();
    let config = temp.path().join("pagemark.toml");
    std::fs::write(&config, "[share]\ninvite_base = \"https://live.test/?join=\"\n").unwrap();

    isolated_cmd(&temp)
        .arg("--config")
        .arg(&config)
        .args(["invite", "s-42"])
        .assert()
        .success()
        .stdout("https://live.test/?join=s-42\n");
}
