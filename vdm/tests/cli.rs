//! End-to-end runs of the `vdmgen` binary on the fixture services.

use std::{
    path::{Path, PathBuf},
    process::{Command, Output},
};

fn fixture_dir(name: &str) -> PathBuf {
    Path::new(env!("CARGO_MANIFEST_DIR"))
        .join("..")
        .join("test-resources")
        .join("service-specs")
        .join(name)
}

/// A scratch directory holding a copy of `API_TEST_SRV` under `input/`.
fn workspace() -> tempfile::TempDir {
    let temp = tempfile::tempdir().unwrap();
    let input = temp.path().join("input");
    std::fs::create_dir_all(&input).unwrap();
    for file in ["API_TEST_SRV.edmx", "API_TEST_SRV.json"] {
        std::fs::copy(fixture_dir("API_TEST_SRV").join(file), input.join(file)).unwrap();
    }
    temp
}

fn vdmgen(cwd: &Path, args: &[&str]) -> Output {
    Command::new(env!("CARGO_BIN_EXE_vdmgen"))
        .current_dir(cwd)
        .env_remove("RUST_LOG")
        .args(args)
        .output()
        .unwrap()
}

fn stdout(output: &Output) -> String {
    String::from_utf8_lossy(&output.stdout).into_owned()
}

#[test]
fn test_generate_service_package() {
    let temp = workspace();

    let output = vdmgen(
        temp.path(),
        &[
            "generate",
            "--input-dir",
            "input",
            "--output-dir",
            "out",
            "--use-swagger",
            "--generate-package-json",
            "--version-in-package-json",
            "1.2.3",
        ],
    );

    assert!(output.status.success(), "{:?}", output);
    assert!(stdout(&output).contains("API_TEST_SRV -> test-service"));

    let dir = temp.path().join("out").join("test-service");
    for file in [
        "TestEntity.ts",
        "TestEntityRequestBuilder.ts",
        "TestComplexType.ts",
        "function-imports.ts",
        "index.ts",
        "tsconfig.json",
        "package.json",
    ] {
        assert!(dir.join(file).is_file(), "missing {}", file);
    }
    assert!(!dir.join("Unused.ts").exists());

    let package: serde_json::Value =
        serde_json::from_str(&std::fs::read_to_string(dir.join("package.json")).unwrap())
            .unwrap();
    assert_eq!(package["version"], "1.2.3");

    let mapping: serde_json::Value = serde_json::from_str(
        &std::fs::read_to_string(temp.path().join("out").join("service-mapping.json")).unwrap(),
    )
    .unwrap();
    assert_eq!(mapping["API_TEST_SRV"]["directoryName"], "test-service");
}

#[test]
fn test_service_mapping_renames_directory() {
    let temp = workspace();
    std::fs::write(
        temp.path().join("input").join("service-mapping.json"),
        r#"{
  "API_TEST_SRV": {
    "directoryName": "renamed",
    "servicePath": "/custom/path",
    "npmPackageName": "@acme/renamed"
  }
}"#,
    )
    .unwrap();

    let output = vdmgen(
        temp.path(),
        &["generate", "--input-dir", "input", "--output-dir", "out"],
    );

    assert!(output.status.success(), "{:?}", output);
    let entity =
        std::fs::read_to_string(temp.path().join("out").join("renamed").join("TestEntity.ts"))
            .unwrap();
    assert!(entity.contains("'/custom/path'"));
    assert!(!temp.path().join("out").join("test-service").exists());
}

#[test]
fn test_config_file_supplies_options() {
    let temp = workspace();
    std::fs::write(
        temp.path().join("vdmgen.toml"),
        "[generator]\ninput-dir = \"input\"\noutput-dir = \"from-config\"\n",
    )
    .unwrap();

    let output = vdmgen(temp.path(), &["--quiet", "generate"]);

    assert!(output.status.success(), "{:?}", output);
    assert!(
        temp.path()
            .join("from-config")
            .join("test-service")
            .join("index.ts")
            .is_file()
    );
}

#[test]
fn test_dry_run_prints_files() {
    let temp = workspace();

    let output = vdmgen(
        temp.path(),
        &[
            "generate",
            "--input-dir",
            "input",
            "--output-dir",
            "out",
            "--dry-run",
        ],
    );

    assert!(output.status.success(), "{:?}", output);
    let text = stdout(&output);
    assert!(text.contains("── test-service/TestEntity.ts ──"));
    assert!(text.contains("files would be generated"));
    assert!(!temp.path().join("out").exists());
}

#[test]
fn test_broken_service_fails_run() {
    let temp = workspace();
    std::fs::write(
        temp.path().join("input").join("API_BROKEN_SRV.edmx"),
        "<edmx:Edmx",
    )
    .unwrap();

    let output = vdmgen(
        temp.path(),
        &["generate", "--input-dir", "input", "--output-dir", "out"],
    );

    assert_eq!(output.status.code(), Some(1));
    assert!(stdout(&output).contains("API_BROKEN_SRV"));
    assert!(
        temp.path()
            .join("out")
            .join("test-service")
            .join("TestEntity.ts")
            .is_file()
    );
}

#[test]
fn test_check_dumps_model() {
    let temp = workspace();

    let output = vdmgen(
        temp.path(),
        &["check", "--input-dir", "input", "--dump-model", "models"],
    );

    assert!(output.status.success(), "{:?}", output);
    assert!(stdout(&output).contains("✓ 1 service in input valid"));
    let model: serde_json::Value = serde_json::from_str(
        &std::fs::read_to_string(temp.path().join("models").join("API_TEST_SRV.json")).unwrap(),
    )
    .unwrap();
    assert_eq!(model["className"], "TestService");
}

#[test]
fn test_completions() {
    let temp = tempfile::tempdir().unwrap();
    let output = vdmgen(temp.path(), &["completions", "bash"]);

    assert!(output.status.success());
    assert!(stdout(&output).contains("vdmgen"));
}
