//! Integration tests for matcache

mod cli_tests {
    use assert_cmd::{cargo::cargo_bin_cmd, Command};
    use predicates::prelude::*;
    use std::path::Path;
    use tempfile::TempDir;

    /// Command isolated from any user or project config
    fn matcache(temp: &TempDir) -> Command {
        let mut cmd = cargo_bin_cmd!("matcache");
        cmd.env_remove("MATCACHE_CONFIG")
            .arg("--no-local")
            .arg("--config")
            .arg(temp.path().join("config.toml"));
        cmd
    }

    fn write_matrix(temp: &TempDir, name: &str, json: &str) -> std::path::PathBuf {
        let path = temp.path().join(name);
        std::fs::write(&path, json).unwrap();
        path
    }

    fn path_arg(path: &Path) -> &str {
        path.to_str().unwrap()
    }

    /// 5x5 Hilbert matrix, invertible but badly conditioned
    const HILBERT_5: &str = "[
        [1.0, 0.5, 0.3333333333333333, 0.25, 0.2],
        [0.5, 0.3333333333333333, 0.25, 0.2, 0.16666666666666666],
        [0.3333333333333333, 0.25, 0.2, 0.16666666666666666, 0.14285714285714285],
        [0.25, 0.2, 0.16666666666666666, 0.14285714285714285, 0.125],
        [0.2, 0.16666666666666666, 0.14285714285714285, 0.125, 0.1111111111111111]
    ]";

    #[test]
    fn help_displays() {
        let temp = TempDir::new().unwrap();
        matcache(&temp)
            .arg("--help")
            .assert()
            .success()
            .stdout(predicate::str::contains("Memoized matrix inversion"));
    }

    #[test]
    fn version_displays() {
        let temp = TempDir::new().unwrap();
        matcache(&temp)
            .arg("--version")
            .assert()
            .success()
            .stdout(predicate::str::contains("matcache"));
    }

    #[test]
    fn invert_prints_inverse() {
        let temp = TempDir::new().unwrap();
        let file = write_matrix(&temp, "m.json", "[[1, 0], [1, 2]]");

        matcache(&temp)
            .args(["invert", path_arg(&file)])
            .assert()
            .success()
            .stdout(predicate::str::contains("-0.5000"))
            .stdout(predicate::str::contains("1 computed, 0 from cache"));
    }

    #[test]
    fn invert_repeat_serves_from_cache() {
        let temp = TempDir::new().unwrap();
        let file = write_matrix(&temp, "m.json", "[[1, 0], [1, 2]]");

        matcache(&temp)
            .args(["-v", "invert", path_arg(&file), "--repeat", "3"])
            .assert()
            .success()
            .stdout(predicate::str::contains("1 computed, 2 from cache"))
            .stderr(predicate::str::contains("getting cached data"));
    }

    #[test]
    fn invert_json_output() {
        let temp = TempDir::new().unwrap();
        let file = write_matrix(&temp, "m.json", "[[1, 0], [1, 2]]");

        let output = matcache(&temp)
            .args(["invert", path_arg(&file), "--format", "json"])
            .output()
            .unwrap();
        assert!(output.status.success());

        let report: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
        assert_eq!(report["method"], "lu");
        assert_eq!(report["computed"], 1);
        assert_eq!(
            report["inverse"],
            serde_json::json!([[1.0, 0.0], [-0.5, 0.5]])
        );
    }

    #[test]
    fn invert_singular_fails_with_hint() {
        let temp = TempDir::new().unwrap();
        let file = write_matrix(&temp, "s.json", "[[1, 2], [2, 4]]");

        matcache(&temp)
            .args(["invert", path_arg(&file)])
            .assert()
            .failure()
            .stderr(predicate::str::contains("Singular matrix"))
            .stderr(predicate::str::contains("Hint:"));
    }

    #[test]
    fn invert_non_square_fails() {
        let temp = TempDir::new().unwrap();
        let file = write_matrix(&temp, "r.json", "[[1, 2, 3], [4, 5, 6]]");

        matcache(&temp)
            .args(["invert", path_arg(&file)])
            .assert()
            .failure()
            .stderr(predicate::str::contains("not square"));
    }

    #[test]
    fn invert_malformed_input_fails() {
        let temp = TempDir::new().unwrap();
        let file = write_matrix(&temp, "bad.json", "[[1, 2], [3]]");

        matcache(&temp)
            .args(["invert", path_arg(&file)])
            .assert()
            .failure()
            .stderr(predicate::str::contains("Invalid matrix input"));
    }

    #[test]
    fn verify_passes_for_invertible_matrix() {
        let temp = TempDir::new().unwrap();
        let file = write_matrix(&temp, "m.json", "[[4, 7], [2, 6]]");

        matcache(&temp)
            .args(["verify", path_arg(&file), "--method", "gauss-jordan"])
            .assert()
            .success()
            .stdout(predicate::str::contains("gauss-jordan"));
    }

    #[test]
    fn verify_fails_when_residual_exceeds_max_error() {
        let temp = TempDir::new().unwrap();
        let file = write_matrix(&temp, "hilbert.json", HILBERT_5);

        matcache(&temp)
            .args(["verify", path_arg(&file), "--max-error", "1e-15"])
            .assert()
            .failure()
            .stderr(predicate::str::contains("Error:"))
            .stderr(predicate::str::contains("Verification failed"));
    }

    #[test]
    fn config_path() {
        let temp = TempDir::new().unwrap();
        matcache(&temp)
            .args(["config", "path"])
            .assert()
            .success()
            .stdout(predicate::str::contains("config.toml"));
    }

    #[test]
    fn config_show() {
        let temp = TempDir::new().unwrap();
        matcache(&temp)
            .args(["config", "show"])
            .assert()
            .success()
            .stdout(predicate::str::contains("[solver]"));
    }

    #[test]
    fn config_set_changes_default_method() {
        let temp = TempDir::new().unwrap();
        matcache(&temp)
            .args(["config", "set", "solver.method", "gauss-jordan"])
            .assert()
            .success();

        let file = write_matrix(&temp, "m.json", "[[1, 0], [1, 2]]");
        matcache(&temp)
            .args(["invert", path_arg(&file)])
            .assert()
            .success()
            .stdout(predicate::str::contains("gauss-jordan"));
    }

    #[test]
    fn config_init_respects_force() {
        let temp = TempDir::new().unwrap();
        let config_path = temp.path().join("config.toml");

        matcache(&temp).args(["config", "init"]).assert().success();
        let initial = std::fs::read_to_string(&config_path).unwrap();
        assert!(initial.contains("[solver]"));
        assert!(initial.contains("precision = 4"));

        std::fs::write(&config_path, "[output]\nprecision = 7\n").unwrap();
        matcache(&temp)
            .args(["config", "init"])
            .assert()
            .success()
            .stdout(predicate::str::contains("--force"));
        assert_eq!(
            std::fs::read_to_string(&config_path).unwrap(),
            "[output]\nprecision = 7\n"
        );

        matcache(&temp)
            .args(["config", "init", "--force"])
            .assert()
            .success();
        let reset = std::fs::read_to_string(&config_path).unwrap();
        assert!(reset.contains("precision = 4"));
    }

    #[test]
    fn config_set_local_writes_project_file() {
        let temp = TempDir::new().unwrap();

        matcache(&temp)
            .current_dir(temp.path())
            .args(["config", "set", "solver.method", "gauss-jordan", "--local"])
            .assert()
            .success();
        matcache(&temp)
            .current_dir(temp.path())
            .args(["config", "set", "solver.tolerance", "1e-3", "--local"])
            .assert()
            .success();

        let local: toml::Value =
            std::fs::read_to_string(temp.path().join(".matcache.toml"))
                .unwrap()
                .parse()
                .unwrap();
        assert_eq!(local["solver"]["method"].as_str(), Some("gauss-jordan"));
        assert_eq!(local["solver"]["tolerance"].as_float(), Some(1e-3));
        assert!(local.get("output").is_none());
        assert!(!temp.path().join("config.toml").exists());

        // Picked up when local config discovery is enabled
        let file = write_matrix(&temp, "m.json", "[[1, 0], [1, 2]]");
        cargo_bin_cmd!("matcache")
            .env_remove("MATCACHE_CONFIG")
            .current_dir(temp.path())
            .arg("--config")
            .arg(temp.path().join("config.toml"))
            .args(["invert", path_arg(&file)])
            .assert()
            .success()
            .stdout(predicate::str::contains("gauss-jordan"));
    }

    #[test]
    fn config_set_local_rejects_bad_value() {
        let temp = TempDir::new().unwrap();
        matcache(&temp)
            .current_dir(temp.path())
            .args(["config", "set", "solver.method", "qr", "--local"])
            .assert()
            .failure();
        assert!(!temp.path().join(".matcache.toml").exists());
    }

    #[test]
    fn config_set_unknown_key_fails() {
        let temp = TempDir::new().unwrap();
        matcache(&temp)
            .args(["config", "set", "vm.name", "x"])
            .assert()
            .failure()
            .stderr(predicate::str::contains("Unknown config key"));
    }
}
