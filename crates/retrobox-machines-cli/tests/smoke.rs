use std::path::PathBuf;
use std::process::Command;

fn resolve_cli_exe(repo_root: &PathBuf) -> PathBuf {
    // Avoid relying on `CARGO_BIN_EXE_*` (Cargo does not guarantee it is set
    // for all test invocation modes). Use the workspace `target/` dir instead.
    let target_dir = std::env::var_os("CARGO_TARGET_DIR")
        .map(PathBuf::from)
        .unwrap_or_else(|| repo_root.join("target"));
    let exe_name = format!("retrobox-machines{}", std::env::consts::EXE_SUFFIX);
    let debug_exe = target_dir.join("debug").join(&exe_name);
    let release_exe = target_dir.join("release").join(&exe_name);
    if debug_exe.exists() {
        debug_exe
    } else if release_exe.exists() {
        release_exe
    } else {
        panic!(
            "expected retrobox-machines binary at {} or {}",
            debug_exe.display(),
            release_exe.display()
        );
    }
}

fn repo_root() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("../..")
}

#[test]
fn list_prints_the_catalog() {
    let exe = resolve_cli_exe(&repo_root());
    let output = Command::new(exe)
        .arg("list")
        .output()
        .expect("failed to run retrobox-machines CLI");

    assert!(
        output.status.success(),
        "list exited with {}\nstderr:\n{}",
        output.status,
        String::from_utf8_lossy(&output.stderr)
    );
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("586mc1"), "stdout:\n{stdout}");
    assert!(stdout.contains("Micronics 586MC1"), "stdout:\n{stdout}");
}

#[test]
fn probe_reports_missing_and_present_roms() {
    let exe = resolve_cli_exe(&repo_root());
    let tmp = tempfile::tempdir().expect("failed to create temp dir");

    // Missing ROM: non-zero exit and a user-facing message naming the machine.
    let output = Command::new(&exe)
        .args(["probe", "586mc1", "--roms"])
        .arg(tmp.path())
        .output()
        .expect("failed to run retrobox-machines CLI");
    assert!(!output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("586mc1"), "stderr:\n{stderr}");
    assert!(stderr.contains("BIOS"), "stderr:\n{stderr}");

    // Present ROM with the expected size: success.
    let rom = tmp.path().join("machines/586mc1/is.34");
    std::fs::create_dir_all(rom.parent().unwrap()).unwrap();
    std::fs::write(&rom, vec![0xFFu8; 0x2_0000]).unwrap();

    let output = Command::new(&exe)
        .args(["probe", "586mc1", "--roms"])
        .arg(tmp.path())
        .output()
        .expect("failed to run retrobox-machines CLI");
    assert!(
        output.status.success(),
        "probe exited with {}\nstderr:\n{}",
        output.status,
        String::from_utf8_lossy(&output.stderr)
    );
}

#[test]
fn bring_up_prints_slot_map_and_devices() {
    let exe = resolve_cli_exe(&repo_root());
    let tmp = tempfile::tempdir().expect("failed to create temp dir");

    let rom = tmp.path().join("machines/586mc1/is.34");
    std::fs::create_dir_all(rom.parent().unwrap()).unwrap();
    std::fs::write(&rom, vec![0xFFu8; 0x2_0000]).unwrap();

    let output = Command::new(&exe)
        .args(["bring-up", "586mc1", "--roms"])
        .arg(tmp.path())
        .output()
        .expect("failed to run retrobox-machines CLI");
    assert!(
        output.status.success(),
        "bring-up exited with {}\nstderr:\n{}",
        output.status,
        String::from_utf8_lossy(&output.stderr)
    );

    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("slot 0x00"), "stdout:\n{stdout}");
    assert!(stdout.contains("i430lx"), "stdout:\n{stdout}");
    assert!(stdout.contains("sio_zb"), "stdout:\n{stdout}");
}

#[test]
fn unknown_machine_is_a_configuration_error() {
    let exe = resolve_cli_exe(&repo_root());
    let tmp = tempfile::tempdir().expect("failed to create temp dir");

    let config = tmp.path().join("retrobox.json");
    std::fs::write(
        &config,
        r#"{ "machine": "no_such_board", "roms": "/nonexistent" }"#,
    )
    .unwrap();

    let output = Command::new(&exe)
        .args(["--config"])
        .arg(&config)
        .arg("probe")
        .output()
        .expect("failed to run retrobox-machines CLI");
    assert!(!output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(
        stderr.contains("unknown machine internal name: no_such_board"),
        "stderr:\n{stderr}"
    );
}
