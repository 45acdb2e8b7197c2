use std::{
    io::Write,
    process::{Command, Stdio},
};

#[test]
fn cli_compiles_without_warnings() {
    let status = Command::new(env!("CARGO"))
        .current_dir(env!("CARGO_MANIFEST_DIR"))
        .args(["check", "--quiet", "--bin", "retro-tactics"])
        .status()
        .expect("failed to invoke cargo check for retro-tactics CLI binary");

    assert!(status.success(), "cargo check --bin retro-tactics should succeed");
}

#[test]
fn scripted_session_prints_the_board() {
    let save_file = std::env::temp_dir().join(format!(
        "retro-tactics-cli-{}.save",
        std::process::id()
    ));
    let mut child = Command::new(env!("CARGO_BIN_EXE_retro-tactics"))
        .args(["--seed", "5", "--no-color", "--save-file"])
        .arg(&save_file)
        .stdin(Stdio::piped())
        .stdout(Stdio::piped())
        .stderr(Stdio::null())
        .spawn()
        .expect("failed to launch retro-tactics");

    child
        .stdin
        .take()
        .expect("stdin is piped")
        .write_all(b"board\nhover a1\njump\nsave\nload\nquit\n")
        .expect("script is written");
    let output = child.wait_with_output().expect("session finishes");
    let _ = std::fs::remove_file(&save_file);

    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("seed 5"));
    assert!(stdout.contains("prairie"));
    assert!(stdout.contains("Level 1"));
    assert!(stdout.contains("unknown command `jump`"));
    assert!(stdout.contains("Game saved"));
    assert!(stdout.contains("Loading game"));
}
