use assetcopy::{BundleOutput, CopyError, CopyOptions, CopyPlugin, PatternList, Plugin};
use std::path::PathBuf;
use tempfile::tempdir;
use tokio::fs;

#[test]
fn test_single_pattern_string_becomes_one_element_list() {
    let options = CopyOptions::from_json_str(r#"{ "patterns": "**/*.svg" }"#).unwrap();

    assert_eq!(options.patterns.as_slice(), &["**/*.svg".to_string()]);
    assert_eq!(options.exclude, None);
    assert_eq!(options.root_dir, None);
    assert!(options.exclude_patterns().is_empty());
}

#[test]
fn test_full_options_use_camel_case_names() {
    let options = CopyOptions::from_json_str(
        r#"{
            "patterns": ["icons/*.svg", "test/icons/*.svg"],
            "exclude": "**/draft-*.svg",
            "rootDir": "./my-path/"
        }"#,
    )
    .unwrap();

    assert_eq!(
        options.patterns,
        PatternList::from(vec!["icons/*.svg", "test/icons/*.svg"])
    );
    assert_eq!(options.exclude_patterns(), &["**/draft-*.svg".to_string()]);
    assert_eq!(options.root_dir, Some(PathBuf::from("./my-path/")));
}

#[test]
fn test_missing_patterns_are_not_rejected() {
    let options = CopyOptions::from_json_str("{}").unwrap();

    assert!(options.patterns.is_empty());
}

#[test]
fn test_malformed_json_is_a_config_error() {
    let result = CopyOptions::from_json_str(r#"{ "patterns": 42 }"#);

    assert!(matches!(result, Err(CopyError::ConfigError(_))));
}

#[tokio::test]
async fn test_options_file_drives_a_build() {
    let dir = tempdir().unwrap();
    let assets = dir.path().join("assets");
    fs::create_dir_all(assets.join("img")).await.unwrap();
    fs::write(assets.join("img/logo.svg"), "<svg/>").await.unwrap();
    fs::write(assets.join("img/logo.tmp.svg"), "<svg/>").await.unwrap();

    let config_path = dir.path().join("copy.json");
    let config = serde_json::json!({
        "patterns": "img/*.svg",
        "exclude": ["img/*.tmp.svg"],
        "rootDir": assets,
    });
    fs::write(&config_path, config.to_string()).await.unwrap();

    let options = CopyOptions::from_json_file(&config_path).await.unwrap();
    let mut plugin = CopyPlugin::new(options).unwrap();
    let mut output = BundleOutput::new();
    plugin.build_start(&mut output).await.unwrap();
    plugin.generate_bundle(&mut output).await.unwrap();

    assert_eq!(output.asset_names(), vec!["img/logo.svg"]);

    let out_dir = dir.path().join("dist");
    let written = output.write_to(&out_dir).await.unwrap();
    assert_eq!(written, 1);
    assert_eq!(fs::read(out_dir.join("img/logo.svg")).await.unwrap(), b"<svg/>");
}

#[tokio::test]
async fn test_missing_options_file_is_a_config_error() {
    let dir = tempdir().unwrap();

    let result = CopyOptions::from_json_file(&dir.path().join("absent.json")).await;

    assert!(matches!(result, Err(CopyError::ConfigError(_))));
}
