use std::path::Path;

use predicates::prelude::*;

#[test]
fn run_resolves_algorithm_and_data_from_config_layers() -> anyhow::Result<()> {
    let fixture = Path::new(env!("CARGO_MANIFEST_DIR"))
        .join("tests")
        .join("fixtures")
        .join("spy_2013_10_week.csv");

    let dir = tempfile::tempdir()?;
    let base = dir.path().join("base.yaml");
    std::fs::write(
        &base,
        format!(
            "run:\n  algorithm: settlement_override_check\n  data_csv: {}\n",
            fixture.display()
        ),
    )?;
    // Overlay flips the algorithm; data_csv carries over from base.
    let overlay = dir.path().join("overlay.yaml");
    std::fs::write(&overlay, "run:\n  algorithm: benchmark_override_check\n")?;

    let mut cmd = assert_cmd::Command::cargo_bin("qsk")?;
    cmd.args([
        "run",
        "--config",
        &base.display().to_string(),
        "--config",
        &overlay.display().to_string(),
    ]);

    cmd.assert()
        .success()
        .stdout(predicate::str::contains("\"status\": \"PASSED\""))
        .stdout(predicate::str::contains("benchmark_override_check"))
        .stdout(predicate::str::contains("\"config_hash\""));

    Ok(())
}
