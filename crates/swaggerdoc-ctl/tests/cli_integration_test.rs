//! Integration tests for the `swaggerdoc-ctl` binary.
//!
//! Each test builds documentation tables in a temp directory and runs the
//! compiled binary against them: generate → verify → tamper → verify.

use std::fs;
use std::path::{Path, PathBuf};
use std::process::{Command, Output};
use tempfile::TempDir;

const ARTIFACT: &str = "zz_generated.swagger_doc_generated.go";

fn swaggerdoc_ctl_bin() -> PathBuf {
    PathBuf::from(env!("CARGO_BIN_EXE_swaggerdoc-ctl"))
}

/// Run swaggerdoc-ctl in `work_dir` with HOME pointed at it, so no user-global
/// config leaks into the test.
fn run(work_dir: &Path, args: &[&str]) -> Output {
    Command::new(swaggerdoc_ctl_bin())
        .args(args)
        .current_dir(work_dir)
        .env("HOME", work_dir)
        .env_remove("SWAGGERDOC_CONFIG")
        .env_remove("RUST_LOG")
        .output()
        .expect("Failed to execute swaggerdoc-ctl")
}

fn stdout(output: &Output) -> String {
    String::from_utf8_lossy(&output.stdout).into_owned()
}

fn stderr(output: &Output) -> String {
    String::from_utf8_lossy(&output.stderr).into_owned()
}

fn write_table(dir: &Path, relative: &str, contents: &str) -> PathBuf {
    let path = dir.join(relative);
    fs::create_dir_all(path.parent().unwrap()).unwrap();
    fs::write(&path, contents).unwrap();
    path
}

const CORE_V1: &str = r#"
package: v1
types:
  - type: Pod
    description: Pod is a collection of containers that can run on a host.
    fields:
      - name: metadata
        doc: Standard object's metadata.
      - name: spec
        doc: Specification of the desired behavior of the pod.
  - type: PodList
    description: PodList is a list of Pods.
    fields:
      - name: items
        doc: List of pods.
"#;

const UNDOCUMENTED: &str = r#"
package: v1
types:
  - type: Pod
    fields:
      - name: spec
        doc: desired state
      - name: status
"#;

// ==========================================================================
// Single table
// ==========================================================================

#[test]
fn test_generate_then_verify() {
    let temp = TempDir::new().unwrap();
    write_table(temp.path(), "api/v1/docs.yaml", CORE_V1);

    let output = run(temp.path(), &["generate", "--records", "api/v1/docs.yaml"]);
    assert!(output.status.success(), "stderr: {}", stderr(&output));

    let artifact = temp.path().join("api/v1").join(ARTIFACT);
    let contents = fs::read_to_string(&artifact).unwrap();
    assert!(contents.starts_with("package v1\n"));
    assert!(contents.contains("// AUTO-GENERATED FUNCTIONS START HERE"));
    assert!(contents.contains("func (PodList) SwaggerDoc() map[string]string {"));
    assert!(contents.ends_with("// AUTO-GENERATED FUNCTIONS END HERE\n"));

    let output = run(
        temp.path(),
        &["verify", "--records", "api/v1/docs.yaml", "--enforce-comments"],
    );
    assert!(output.status.success(), "stderr: {}", stderr(&output));
    assert!(stdout(&output).contains("is up to date"));
}

#[test]
fn test_verify_detects_tampering() {
    let temp = TempDir::new().unwrap();
    write_table(temp.path(), "docs.yaml", CORE_V1);
    assert!(run(temp.path(), &["generate", "-r", "docs.yaml"]).status.success());

    let artifact = temp.path().join(ARTIFACT);
    let contents = fs::read_to_string(&artifact).unwrap();
    fs::write(&artifact, contents.replace("List of pods.", "List of Pods.")).unwrap();

    let output = run(temp.path(), &["verify", "-r", "docs.yaml"]);
    assert!(!output.status.success());
    assert!(stderr(&output).contains("out of date"));
    assert!(stdout(&output).contains("swaggerdoc-ctl generate"));
}

#[test]
fn test_verify_missing_file() {
    let temp = TempDir::new().unwrap();
    write_table(temp.path(), "docs.yaml", CORE_V1);

    let output = run(temp.path(), &["verify", "-r", "docs.yaml"]);
    assert!(!output.status.success());
    assert!(stderr(&output).contains("error reading existing swagger docs file"));
}

#[test]
fn test_enforce_comments_gate() {
    let temp = TempDir::new().unwrap();
    write_table(temp.path(), "docs.yaml", UNDOCUMENTED);
    assert!(run(temp.path(), &["generate", "-r", "docs.yaml"]).status.success());

    let lenient = run(temp.path(), &["verify", "-r", "docs.yaml"]);
    assert!(lenient.status.success(), "stderr: {}", stderr(&lenient));
    // Reported once, by the verifier's log line.
    let log = stderr(&lenient);
    assert_eq!(log.matches("field documentation is missing: status").count(), 1);
    assert!(log.contains("missing 1 entries"));
    assert!(!stdout(&lenient).contains("undocumented"));

    let strict = run(temp.path(), &["verify", "-r", "docs.yaml", "--enforce-comments"]);
    assert!(!strict.status.success());
    let err = stderr(&strict);
    assert!(err.contains("missing swagger docs for the following 1 fields"));
    assert!(err.contains("In struct: Pod, field documentation is missing: status"));
}

#[test]
fn test_generate_to_stdout_writes_nothing() {
    let temp = TempDir::new().unwrap();
    write_table(temp.path(), "docs.json", r#"{"types": [{"type": "Node", "fields": [{"name": "spec", "doc": "node spec"}]}]}"#);

    let output = run(
        temp.path(),
        &["generate", "-r", "docs.json", "--package", "core", "--stdout"],
    );
    assert!(output.status.success(), "stderr: {}", stderr(&output));
    assert!(stdout(&output).starts_with("package core\n"));
    assert!(stdout(&output).contains("\t\"spec\": \"node spec\",\n"));
    assert!(!temp.path().join(ARTIFACT).exists());
}

#[test]
fn test_missing_package_name() {
    let temp = TempDir::new().unwrap();
    write_table(temp.path(), "docs.json", r#"{"types": []}"#);

    let output = run(temp.path(), &["generate", "-r", "docs.json"]);
    assert!(!output.status.success());
    assert!(stderr(&output).contains("no package name"));
}

#[test]
fn test_check_lists_missing_fields() {
    let temp = TempDir::new().unwrap();
    write_table(temp.path(), "docs.yaml", UNDOCUMENTED);

    let output = run(temp.path(), &["check", "-r", "docs.yaml"]);
    assert!(output.status.success());
    assert!(stdout(&output).contains("v1: 1 undocumented entries"));
    assert!(stdout(&output).contains("field documentation is missing: status"));
    assert!(stdout(&output).contains("pass --enforce-comments to fail"));

    let output = run(temp.path(), &["check", "-r", "docs.yaml", "--enforce-comments"]);
    assert!(!output.status.success());
}

// ==========================================================================
// Configured packages
// ==========================================================================

#[test]
fn test_configured_packages() {
    let temp = TempDir::new().unwrap();
    write_table(temp.path(), "api/core/v1/docs.yaml", CORE_V1);
    write_table(
        temp.path(),
        "api/apps/v1/docs.toml",
        r#"
package = "v1"

[[types]]
type = "Deployment"
description = "Deployment enables declarative updates for Pods."

[[types.fields]]
name = "replicas"
doc = "Number of desired pods."
"#,
    );
    fs::write(
        temp.path().join(".swaggerdoc.toml"),
        r#"
enforce-comments = true

[[packages]]
records = "api/core/v1/docs.yaml"

[[packages]]
name = "apps"
records = "api/apps/v1/docs.toml"
output = "api/apps/v1/zz_generated.docs.go"
"#,
    )
    .unwrap();

    let output = run(temp.path(), &["generate"]);
    assert!(output.status.success(), "stderr: {}", stderr(&output));
    assert!(temp.path().join("api/core/v1").join(ARTIFACT).is_file());
    let apps = fs::read_to_string(temp.path().join("api/apps/v1/zz_generated.docs.go")).unwrap();
    assert!(apps.starts_with("package apps\n"));

    let output = run(temp.path(), &["verify"]);
    assert!(output.status.success(), "stderr: {}", stderr(&output));
    assert_eq!(stdout(&output).matches("is up to date").count(), 2);

    let output = run(temp.path(), &["verify", "--package", "apps"]);
    assert!(output.status.success());
    assert_eq!(stdout(&output).matches("is up to date").count(), 1);
}

#[test]
fn test_package_filter_skips_other_named_tables() {
    let temp = TempDir::new().unwrap();
    write_table(temp.path(), "api/core/v1/docs.yaml", CORE_V1);
    write_table(temp.path(), "api/broken/docs.yaml", "types: [unterminated\n");
    fs::write(
        temp.path().join(".swaggerdoc.toml"),
        r#"
[[packages]]
records = "api/core/v1/docs.yaml"

[[packages]]
name = "broken"
records = "api/broken/docs.yaml"
"#,
    )
    .unwrap();

    let output = run(temp.path(), &["generate", "--package", "v1"]);
    assert!(output.status.success(), "stderr: {}", stderr(&output));
    let output = run(temp.path(), &["verify", "--package", "v1"]);
    assert!(output.status.success(), "stderr: {}", stderr(&output));

    let output = run(temp.path(), &["verify", "--package", "broken"]);
    assert!(!output.status.success());
    assert!(stderr(&output).contains("failed to load documentation table"));
}

#[test]
fn test_config_enforce_comments_applies() {
    let temp = TempDir::new().unwrap();
    write_table(temp.path(), "docs.yaml", UNDOCUMENTED);
    assert!(run(temp.path(), &["generate", "-r", "docs.yaml"]).status.success());

    fs::write(temp.path().join(".swaggerdoc.toml"), "enforce-comments = true\n").unwrap();
    let output = run(temp.path(), &["verify", "-r", "docs.yaml"]);
    assert!(!output.status.success());

    fs::write(
        temp.path().join(".swaggerdoc.toml"),
        "enforce-comments = true\nexempt = [\"Pod.status\"]\n",
    )
    .unwrap();
    let output = run(temp.path(), &["verify", "-r", "docs.yaml"]);
    assert!(output.status.success(), "stderr: {}", stderr(&output));
}

#[test]
fn test_nothing_to_do_without_records_or_config() {
    let temp = TempDir::new().unwrap();
    let output = run(temp.path(), &["verify"]);
    assert!(!output.status.success());
    assert!(stderr(&output).contains("nothing to do"));
}

#[test]
fn test_explicit_config_flag() {
    let temp = TempDir::new().unwrap();
    write_table(temp.path(), "project/docs.yaml", CORE_V1);
    fs::write(
        temp.path().join("project/swaggerdoc.toml"),
        "[[packages]]\nrecords = \"docs.yaml\"\n",
    )
    .unwrap();

    let output = run(temp.path(), &["generate", "--config", "project/swaggerdoc.toml"]);
    assert!(output.status.success(), "stderr: {}", stderr(&output));
    assert!(temp.path().join("project").join(ARTIFACT).is_file());
}
