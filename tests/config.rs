use archgraph::config::AnalyzerConfig;
use archgraph::core::Language;
use std::fs;

#[test]
fn default_config_ignores_vendor_and_hidden_dirs() {
    let config = AnalyzerConfig::default();

    for name in ["node_modules", "__pycache__", ".git", "target", "dist"] {
        assert!(config.is_ignored_dir(name), "{name}");
    }
    assert!(config.is_ignored_dir(".anything"));
    assert!(!config.is_ignored_dir("src"));
    assert!(config.is_hidden(".eslintrc.js"));
    assert!(!config.is_hidden("app.js"));
    assert!(!config.follow_links);
    assert_eq!(config.extensions.get("jsp"), Some(&Language::Jsp));
}

#[test]
fn toml_overrides_only_named_keys() {
    let config = AnalyzerConfig::from_toml_str(
        r#"
skip_hidden = false

[extensions]
jspx = "jsp"
"#,
    )
    .unwrap();

    assert!(!config.skip_hidden);
    assert!(!config.is_ignored_dir(".config"));
    assert!(!config.is_hidden(".eslintrc.js"));
    assert!(config.is_ignored_dir("node_modules"));
    assert_eq!(config.extensions.len(), 1);
    assert_eq!(config.extensions.get("jspx"), Some(&Language::Jsp));
}

#[test]
fn invalid_config_is_rejected() {
    assert!(AnalyzerConfig::from_toml_str("skip_hidden = \"maybe\"").is_err());
    assert!(AnalyzerConfig::from_toml_str("[extensions]\nfoo = \"cobol\"").is_err());
}

#[test]
fn load_reads_a_config_file() {
    let dir = tempfile::TempDir::new().unwrap();
    let path = dir.path().join("archgraph.toml");
    fs::write(&path, "ignore_dirs = [\"generated\"]\n").unwrap();

    let config = AnalyzerConfig::load(&path).unwrap();
    assert!(config.is_ignored_dir("generated"));
    assert!(!config.is_ignored_dir("node_modules"));

    assert!(AnalyzerConfig::load(&dir.path().join("missing.toml")).is_err());
}
