use std::fs;
use std::process::Command;

fn xesbridge() -> Command {
    Command::new(env!("CARGO_BIN_EXE_xesbridge"))
}

#[test]
fn test_convert_and_verify() -> anyhow::Result<()> {
    let temp_dir = tempfile::tempdir()?;
    let input = temp_dir.path().join("traces.txt");
    let outdir = temp_dir.path().join("out");
    fs::write(&input, "Y\ta;b;c\nN\td;e\n")?;

    let output = xesbridge()
        .arg(&input)
        .arg(&outdir)
        .arg("--verify")
        .arg("--json")
        .output()?;
    assert!(output.status.success(), "stderr: {}", String::from_utf8_lossy(&output.stderr));

    for split in ["train", "test"] {
        assert!(outdir.join(split).join("T_OK.xes").is_file());
        assert!(outdir.join(split).join("T.xes").is_file());
    }

    let summary: serde_json::Value = serde_json::from_slice(&output.stdout)?;
    assert_eq!(summary["records"], 2);
    assert_eq!(summary["positive"], 1);
    assert_eq!(summary["negative"], 1);
    assert_eq!(summary["alphabet"], serde_json::json!(["a", "b", "c", "d", "e"]));
    assert_eq!(summary["copied"].as_array().map(Vec::len), Some(4));
    Ok(())
}

#[test]
fn test_logs_records_and_alphabet() -> anyhow::Result<()> {
    let temp_dir = tempfile::tempdir()?;
    let input = temp_dir.path().join("traces.txt");
    fs::write(&input, "N\nY\tx;y\n")?;

    let output = xesbridge()
        .arg(&input)
        .arg(temp_dir.path().join("out"))
        .env("RUST_LOG", "info")
        .output()?;
    assert!(output.status.success());

    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("line 1: label=\"N\" trace=[]"));
    assert!(stderr.contains("2 records: 1 accepted, 1 rejected"));
    assert!(stderr.contains("Alphabet (2 events)"));
    Ok(())
}

#[test]
fn test_missing_input_fails() -> anyhow::Result<()> {
    let temp_dir = tempfile::tempdir()?;
    let outdir = temp_dir.path().join("out");

    let output = xesbridge()
        .arg(temp_dir.path().join("missing.txt"))
        .arg(&outdir)
        .output()?;

    assert!(!output.status.success());
    assert!(!outdir.exists());
    Ok(())
}

#[test]
fn test_custom_accept_label() -> anyhow::Result<()> {
    let temp_dir = tempfile::tempdir()?;
    let input = temp_dir.path().join("traces.txt");
    fs::write(&input, "accept\ta\nY\tb\n")?;

    let output = xesbridge()
        .arg(&input)
        .arg(temp_dir.path().join("out"))
        .args(["--accept-label", "accept", "--json"])
        .output()?;
    assert!(output.status.success());

    let summary: serde_json::Value = serde_json::from_slice(&output.stdout)?;
    assert_eq!(summary["positive"], 1);
    assert_eq!(summary["negative"], 1);
    Ok(())
}

#[test]
fn test_missing_arguments() -> anyhow::Result<()> {
    let output = xesbridge().output()?;
    assert!(!output.status.success());
    Ok(())
}

#[test]
fn test_collapsed_names_verify() -> anyhow::Result<()> {
    let temp_dir = tempfile::tempdir()?;
    let input = temp_dir.path().join("traces.txt");
    let outdir = temp_dir.path().join("out");
    fs::write(&input, "Y\ta;b;c\nN\td;e\n")?;

    let output = xesbridge()
        .arg(&input)
        .arg(&outdir)
        .args(["--negative-name", "T_OK.xes", "--verify", "--json"])
        .output()?;
    assert!(output.status.success(), "stderr: {}", String::from_utf8_lossy(&output.stderr));

    let summary: serde_json::Value = serde_json::from_slice(&output.stdout)?;
    assert_eq!(summary["written"].as_array().map(Vec::len), Some(1));
    assert_eq!(summary["copied"].as_array().map(Vec::len), Some(2));
    assert!(!outdir.join("T.xes").exists());
    Ok(())
}

#[test]
fn test_rejects_names_with_directories() -> anyhow::Result<()> {
    let temp_dir = tempfile::tempdir()?;
    let input = temp_dir.path().join("traces.txt");
    fs::write(&input, "Y\ta\nN\tb\n")?;

    for (flag, name) in [
        ("--negative-name", "./T_OK.xes"),
        ("--negative-name", "sub/T.xes"),
        ("--positive-name", "../T_OK.xes"),
    ] {
        let outdir = temp_dir.path().join("out");
        let output = xesbridge()
            .arg(&input)
            .arg(&outdir)
            .args([flag, name])
            .output()?;

        assert!(!output.status.success(), "{flag} {name} should be rejected");
        assert!(String::from_utf8_lossy(&output.stderr).contains("bare file name"));
        assert!(!outdir.exists());
    }
    Ok(())
}

#[test]
fn test_carriage_return_input() -> anyhow::Result<()> {
    let temp_dir = tempfile::tempdir()?;
    let input = temp_dir.path().join("traces.txt");
    fs::write(&input, "Y\ta\rN\tb\r")?;

    let output = xesbridge()
        .arg(&input)
        .arg(temp_dir.path().join("out"))
        .args(["--verify", "--json"])
        .output()?;
    assert!(output.status.success());

    let summary: serde_json::Value = serde_json::from_slice(&output.stdout)?;
    assert_eq!(summary["records"], 2);
    assert_eq!(summary["positive"], 1);
    assert_eq!(summary["negative"], 1);
    Ok(())
}
