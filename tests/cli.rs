use std::{
    fs,
    path::{Path, PathBuf},
    process::{Command, Output},
};

const OWNER: &str = "0x1111111111111111111111111111111111111111";
const CLIENT: &str = "0x2222222222222222222222222222222222222222";
const STRANGER: &str = "0x4444444444444444444444444444444444444444";

fn write_config(dir: &Path) -> PathBuf {
    let path = dir.join("polyscale.toml");
    fs::write(
        &path,
        format!(
            "[storage]\ndb_path = {:?}\n\n[token]\ndecimals = 3\nminters = [{:?}]\n",
            dir.join("db"),
            OWNER
        ),
    )
    .unwrap();

    path
}

fn polyscale(config: &Path, args: &[&str]) -> Output {
    Command::new(env!("CARGO_BIN_EXE_polyscale"))
        .arg("--config")
        .arg(config)
        .args(args)
        .env_remove("RUST_LOG")
        .output()
        .unwrap()
}

fn stdout(output: &Output) -> String {
    String::from_utf8_lossy(&output.stdout).into_owned()
}

#[test]
fn commands_share_the_snapshot() {
    let dir = tempfile::tempdir().unwrap();
    let config = write_config(dir.path());

    let out = polyscale(
        &config,
        &["mint", "--from", OWNER, "--to", OWNER, "--amount", "1000"],
    );
    assert!(out.status.success());
    assert!(dir.path().join("db").join("ledger.bin").exists());

    let out = polyscale(
        &config,
        &["reward", "--from", OWNER, "--to", CLIENT, "--amount", "50"],
    );
    assert!(out.status.success());

    let out = polyscale(&config, &["balance", "--account", CLIENT]);
    assert!(out.status.success());
    assert!(stdout(&out).contains("50 (0.050 PSFL)"));

    let out = polyscale(&config, &["supply"]);
    assert!(stdout(&out).contains("1050 (1.050 PSFL)"));

    let out = polyscale(
        &config,
        &[
            "register-model",
            "--from",
            CLIENT,
            "--round",
            "1",
            "--cid",
            "QmTestCID123",
        ],
    );
    assert!(out.status.success());
    let out = polyscale(&config, &["total-models"]);
    assert_eq!(stdout(&out).trim(), "1");
    let out = polyscale(&config, &["models", "--round", "1"]);
    assert!(stdout(&out).contains("QmTestCID123"));
    assert!(stdout(&out).contains(CLIENT));

    let out = polyscale(
        &config,
        &["add-reputation", "--from", OWNER, "--who", CLIENT, "--amount", "20"],
    );
    assert!(out.status.success());
    let out = polyscale(
        &config,
        &["reduce-reputation", "--from", OWNER, "--who", CLIENT, "--amount", "25"],
    );
    assert!(out.status.success());
    let out = polyscale(&config, &["reputation", "--who", CLIENT]);
    assert!(stdout(&out).contains(&format!("Reputation of {}: 0", CLIENT)));
}

#[test]
fn rejected_commands_exit_with_an_error() {
    let dir = tempfile::tempdir().unwrap();
    let config = write_config(dir.path());

    let out = polyscale(
        &config,
        &["mint", "--from", STRANGER, "--to", STRANGER, "--amount", "1"],
    );
    assert_eq!(out.status.code(), Some(1));
    assert!(String::from_utf8_lossy(&out.stderr).contains("not allowed to mint"));

    let out = polyscale(
        &config,
        &["burn", "--from", OWNER, "--account", OWNER, "--amount", "1"],
    );
    assert_eq!(out.status.code(), Some(1));
    assert!(String::from_utf8_lossy(&out.stderr).contains("Insufficient balance"));

    let out = polyscale(&config, &["balance", "--account", "0x1234"]);
    assert!(!out.status.success());

    // Nothing was written by the failed commands
    assert!(!dir.path().join("db").join("ledger.bin").exists());
}

#[test]
fn show_config() {
    let dir = tempfile::tempdir().unwrap();
    let config = write_config(dir.path());

    let out = polyscale(&config, &["show-config"]);
    assert!(out.status.success());
    let printed = stdout(&out);
    assert!(printed.contains("symbol = \"PSFL\""));
    assert!(printed.contains("decimals = 3"));
    assert!(printed.contains(OWNER));
}
