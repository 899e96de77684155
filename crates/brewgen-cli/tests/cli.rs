//! Smoke tests for the `brewgen` binary.

use std::path::{Path, PathBuf};
use std::process::{Command, Output};

use flate2::Compression;
use flate2::write::GzEncoder;
use tempfile::TempDir;

/// Isolated HOME / config dir so no user settings leak in.
struct TestContext {
    temp_dir: TempDir,
}

impl TestContext {
    fn new() -> Self {
        let temp_dir = TempDir::new().expect("failed to create temp dir");
        Self { temp_dir }
    }

    fn path(&self, name: &str) -> PathBuf {
        self.temp_dir.path().join(name)
    }

    fn brewgen(&self, args: &[&str]) -> Output {
        let mut cmd = Command::new(env!("CARGO_BIN_EXE_brewgen"));
        cmd.env("HOME", self.temp_dir.path())
            .env("XDG_CONFIG_HOME", self.temp_dir.path().join("config"))
            .env("NO_COLOR", "1")
            .env_remove("RUST_LOG")
            .env_remove("BREWGEN_CONFIG")
            .env_remove("BREWGEN_PLATFORM")
            .env_remove("BREWGEN_ARCH")
            .env_remove("BREWGEN_NO_VERIFY")
            .args(args);
        cmd.output().expect("failed to run brewgen")
    }
}

fn write_tar_gz(path: &Path, files: &[(&str, &[u8])]) {
    let mut builder = tar::Builder::new(GzEncoder::new(Vec::new(), Compression::default()));
    for (name, data) in files {
        let mut header = tar::Header::new_gnu();
        header.set_size(data.len() as u64);
        header.set_mode(0o755);
        header.set_cksum();
        builder.append_data(&mut header, name, *data).unwrap();
    }
    let bytes = builder.into_inner().unwrap().finish().unwrap();
    std::fs::write(path, bytes).unwrap();
}

fn stdout(output: &Output) -> String {
    String::from_utf8_lossy(&output.stdout).into_owned()
}

fn stderr(output: &Output) -> String {
    String::from_utf8_lossy(&output.stderr).into_owned()
}

#[test]
fn test_help_command() {
    let ctx = TestContext::new();
    let output = ctx.brewgen(&["--help"]);
    assert!(output.status.success());
    let out = stdout(&output);
    assert!(out.contains("Usage:"));
    assert!(out.contains("resolve"));
    assert!(out.contains("classify"));
    assert!(out.contains("inspect"));
}

#[test]
fn test_classify_marks_linux_tarball() {
    let ctx = TestContext::new();
    let output = ctx.brewgen(&[
        "classify",
        "--platform",
        "linux",
        "--arch",
        "x86_64",
        "tool-1.0-darwin.tar.gz",
        "tool-1.0-linux-x64.tar.gz",
        "tool-1.0-linux-x64.deb",
        "tool-1.0-windows.zip",
        "checksums.txt",
    ]);
    assert!(output.status.success(), "{}", stderr(&output));

    let out = stdout(&output);
    let marked: Vec<&str> = out.lines().filter(|l| l.contains('*')).collect();
    assert_eq!(marked.len(), 1, "{out}");
    assert!(marked[0].contains("tool-1.0-linux-x64.tar.gz"));
    assert!(out.contains("sidecar"));
}

#[test]
fn test_inspect_json() {
    let ctx = TestContext::new();
    let archive = ctx.path("tool-1.0-linux-x64.tar.gz");
    write_tar_gz(
        &archive,
        &[
            ("tool-1.0-linux-x64/bin/tool", b"\x7fELF"),
            ("tool-1.0-linux-x64/LICENSE", b"MIT"),
            ("tool-1.0-linux-x64/share/icons/256x256/tool.png", b"png"),
        ],
    );

    let output = ctx.brewgen(&["--quiet", "inspect", "--json", archive.to_str().unwrap()]);
    assert!(output.status.success(), "{}", stderr(&output));

    let desc: serde_json::Value = serde_json::from_str(&stdout(&output)).unwrap();
    assert_eq!(desc["root_dir"], "tool-1.0-linux-x64");
    assert_eq!(desc["binary_path"], "tool-1.0-linux-x64/bin/tool");
    assert_eq!(
        desc["icon_path"],
        "tool-1.0-linux-x64/share/icons/256x256/tool.png"
    );
    assert!(desc["desktop_file_path"].is_null());
    assert_eq!(desc["selected_asset"]["format"], "tar_gz");
    assert_eq!(desc["sha256"].as_str().unwrap().len(), 64);
}

#[test]
fn test_inspect_lists_entries() {
    let ctx = TestContext::new();
    let archive = ctx.path("tool-linux.tar.gz");
    write_tar_gz(
        &archive,
        &[("tool/bin/tool", b"bin"), ("tool/README", b"hi")],
    );

    let output = ctx.brewgen(&[
        "--quiet",
        "inspect",
        "--entries",
        archive.to_str().unwrap(),
    ]);
    assert!(output.status.success(), "{}", stderr(&output));

    let out = stdout(&output);
    assert!(out.contains("tool/bin/tool"), "{out}");
    assert!(out.contains("tool/README"), "{out}");
}

#[test]
fn test_inspect_read_entry() {
    let ctx = TestContext::new();
    let archive = ctx.path("app.tar.gz");
    write_tar_gz(
        &archive,
        &[("app/app.desktop", b"[Desktop Entry]\nName=App\n")],
    );

    let output = ctx.brewgen(&[
        "inspect",
        archive.to_str().unwrap(),
        "--read",
        "app/app.desktop",
    ]);
    assert!(output.status.success(), "{}", stderr(&output));
    assert_eq!(stdout(&output), "[Desktop Entry]\nName=App\n");
}

#[test]
fn test_resolve_no_candidate_fails() {
    let ctx = TestContext::new();
    let release = ctx.path("release.json");
    std::fs::write(
        &release,
        r#"{"tag_name":"v1.0","assets":[
            {"name":"tool-darwin.tar.gz","browser_download_url":"http://127.0.0.1:9/tool-darwin.tar.gz","size":1},
            {"name":"tool-windows.zip","browser_download_url":"http://127.0.0.1:9/tool-windows.zip","size":1}
        ]}"#,
    )
    .unwrap();

    let output = ctx.brewgen(&[
        "resolve",
        "--release",
        release.to_str().unwrap(),
        "--name",
        "tool",
        "--platform",
        "linux",
    ]);
    assert!(!output.status.success());
    assert!(
        stderr(&output).contains("No compatible asset"),
        "{}",
        stderr(&output)
    );
}

#[test]
fn test_missing_config_file_fails() {
    let ctx = TestContext::new();
    let missing = ctx.path("nope.toml");
    let output = ctx.brewgen(&[
        "--config",
        missing.to_str().unwrap(),
        "classify",
        "tool.tar.gz",
    ]);
    assert!(!output.status.success());
    assert!(stderr(&output).contains("Failed to read settings"));
}

#[test]
fn test_config_file_sets_target() {
    let ctx = TestContext::new();
    let config = ctx.path("brewgen.toml");
    std::fs::write(&config, "platform = \"macos\"\narch = \"arm64\"\n").unwrap();

    let output = ctx.brewgen(&[
        "--config",
        config.to_str().unwrap(),
        "classify",
        "tool-linux.tar.gz",
        "tool-darwin-arm64.tar.gz",
    ]);
    assert!(output.status.success(), "{}", stderr(&output));
    let out = stdout(&output);
    let marked: Vec<&str> = out.lines().filter(|l| l.contains('*')).collect();
    assert_eq!(marked.len(), 1, "{out}");
    assert!(marked[0].contains("tool-darwin-arm64.tar.gz"));
}
