//! End-to-end tests: a host with the depfile extension emitting `EnvUpdated`.

use std::{
    fs, io,
    path::{Path, PathBuf},
};

use docdep_config::Config;
use docdep_core::Environment;
use docdep_depfile::{DEPFILE_CONFIG, DepfileExtension, WriteOutcome, setup, write_depfile};
use docdep_ext::Host;
use tempfile::TempDir;

/// Build a host with the depfile extension, keeping a handle on its outcome.
fn host_with(config: Config) -> (Host, DepfileExtension) {
    let ext = DepfileExtension::new();
    let host = Host::new(config).extension(ext.clone());
    (host, ext)
}

fn config_with_depfile(path: &Path) -> Config {
    let mut config = Config::new();
    config.set(DEPFILE_CONFIG, path.display().to_string());
    config
}

fn sample_env() -> Environment {
    Environment::new("/docs", "/build/html")
        .document("index")
        .document("guide/install")
        .document("api")
        .dependency("index", "shared.rst")
        .dependency("api", "generated/api.inc")
        .dependency("api", "shared.rst")
}

/// Read the prerequisites of the first rule back out of a depfile.
fn parse_prerequisites(content: &str) -> (String, Vec<String>) {
    let mut lines = content.split('\n');
    let head = lines.next().unwrap();
    let target = head.strip_suffix(": \\").expect("continuation marker");
    let prereqs = lines
        .next()
        .unwrap()
        .split(' ')
        .filter(|p| !p.is_empty())
        .map(str::to_string)
        .collect();
    (target.to_string(), prereqs)
}

#[test]
fn test_disabled_writes_nothing() {
    let temp = TempDir::new().unwrap();
    let existing = temp.path().join("html.d");
    fs::write(&existing, "stale").unwrap();

    let host = setup(Host::new(Config::new()));
    host.env_updated(&sample_env()).unwrap();

    assert_eq!(fs::read_to_string(&existing).unwrap(), "stale");
    assert_eq!(fs::read_dir(temp.path()).unwrap().count(), 1);
}

#[test]
fn test_empty_path_is_disabled() {
    let mut config = Config::new();
    config.set(DEPFILE_CONFIG, "");
    let (host, ext) = host_with(config);

    host.env_updated(&sample_env()).unwrap();

    assert_eq!(ext.last_outcome(), Some(WriteOutcome::Disabled));
}

#[test]
fn test_host_config_reaches_hook() {
    let temp = TempDir::new().unwrap();
    let path = temp.path().join("html.d");
    let host = setup(Host::new(config_with_depfile(&path)));

    // The environment itself carries no depfile setting.
    let env = Environment::new("/docs", "/build/html").document("index");
    host.env_updated(&env).unwrap();

    assert_eq!(
        fs::read_to_string(&path).unwrap(),
        "/build/html: \\\n/docs/index.rst\n/docs/index.rst:\n"
    );
}

#[test]
fn test_direct_write_uses_env_config() {
    let temp = TempDir::new().unwrap();
    let path = temp.path().join("html.d");
    let env = sample_env().with_config(config_with_depfile(&path));

    let outcome = write_depfile(&env).unwrap();

    assert_eq!(outcome, WriteOutcome::Written { path, inputs: 6 });
}

#[test]
fn test_writes_configured_depfile() {
    let temp = TempDir::new().unwrap();
    let path = temp.path().join("html.d");

    let host = setup(Host::new(config_with_depfile(&path)));
    host.env_updated(&sample_env()).unwrap();

    insta::assert_snapshot!(fs::read_to_string(&path).unwrap(), @r"
    /build/html: \
    /docs/index.rst /docs/shared.rst /docs/guide/install.rst /docs/api.rst /docs/generated/api.inc /docs/shared.rst
    /docs/index.rst:
    /docs/shared.rst:
    /docs/guide/install.rst:
    /docs/api.rst:
    /docs/generated/api.inc:
    /docs/shared.rst:
    ");
}

#[test]
fn test_overwrites_existing_file() {
    let temp = TempDir::new().unwrap();
    let path = temp.path().join("html.d");
    fs::write(&path, "x".repeat(4096)).unwrap();

    let host = setup(Host::new(config_with_depfile(&path)));
    let env = Environment::new("/docs", "/build/html").document("index");
    host.env_updated(&env).unwrap();

    assert_eq!(
        fs::read_to_string(&path).unwrap(),
        "/build/html: \\\n/docs/index.rst\n/docs/index.rst:\n"
    );
}

#[test]
fn test_output_is_idempotent() {
    let temp = TempDir::new().unwrap();
    let path = temp.path().join("html.d");
    let host = setup(Host::new(config_with_depfile(&path)));
    let env = sample_env();

    host.env_updated(&env).unwrap();
    let first = fs::read(&path).unwrap();
    host.env_updated(&env).unwrap();
    let second = fs::read(&path).unwrap();

    assert_eq!(first, second);
}

#[test]
fn test_rule_count_matches_inputs() {
    let temp = TempDir::new().unwrap();
    let path = temp.path().join("html.d");
    let (host, ext) = host_with(config_with_depfile(&path));

    host.env_updated(&sample_env()).unwrap();

    // 3 documents + 3 dependency paths, one of them shared
    assert_eq!(
        ext.last_outcome(),
        Some(WriteOutcome::Written {
            path: path.clone(),
            inputs: 6
        })
    );
    let content = fs::read_to_string(&path).unwrap();
    let rules: Vec<&str> = content.lines().skip(2).collect();
    assert_eq!(rules.len(), 6);
    assert!(rules.iter().all(|rule| rule.ends_with(':')));
}

#[test]
fn test_prerequisites_round_trip() {
    let temp = TempDir::new().unwrap();
    let path = temp.path().join("html.d");
    let host = setup(Host::new(config_with_depfile(&path)));
    let env = sample_env();

    host.env_updated(&env).unwrap();
    let (target, prereqs) = parse_prerequisites(&fs::read_to_string(&path).unwrap());

    let expected: Vec<String> = docdep_depfile::input_files(&env)
        .map(|p| p.display().to_string())
        .collect();
    assert_eq!(target, "/build/html");
    assert_eq!(prereqs, expected);
}

#[test]
fn test_no_documents() {
    let temp = TempDir::new().unwrap();
    let path = temp.path().join("html.d");
    let host = setup(Host::new(config_with_depfile(&path)));

    let env = Environment::new("/docs", "/build/html");
    host.env_updated(&env).unwrap();

    let content = fs::read_to_string(&path).unwrap();
    assert_eq!(content, "/build/html: \\\n\n");
    let (_, prereqs) = parse_prerequisites(&content);
    assert!(prereqs.is_empty());
}

#[test]
fn test_missing_parent_directory_fails() {
    let temp = TempDir::new().unwrap();
    let path: PathBuf = temp.path().join("missing").join("html.d");
    let host = setup(Host::new(config_with_depfile(&path)));

    let err = host.env_updated(&sample_env()).unwrap_err();

    let io_err = err.downcast_ref::<io::Error>().expect("io error root cause");
    assert_eq!(io_err.kind(), io::ErrorKind::NotFound);
    assert!(!path.exists());
}

#[test]
fn test_environment_from_json() {
    let temp = TempDir::new().unwrap();
    let path = temp.path().join("html.d");
    let env = Environment::from_json_str(
        r#"{
            "srcdir": "/docs",
            "outdir": "/build/html",
            "found_docs": ["index"],
            "dependencies": { "index": ["shared.rst"] }
        }"#,
    )
    .unwrap();
    let host = setup(Host::new(config_with_depfile(&path)));

    host.env_updated(&env).unwrap();

    let content = fs::read_to_string(&path).unwrap();
    assert_eq!(
        content.lines().nth(1),
        Some("/docs/index.rst /docs/shared.rst")
    );
}
