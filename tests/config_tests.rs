mod common;

use common::write;
use forge::{ForgeConfig, ForgeError};
use std::path::PathBuf;
use tempfile::tempdir;

#[tokio::test]
async fn test_defaults_without_config_file() {
    let dir = tempdir().unwrap();
    let root = dir.path().to_path_buf();

    let config = ForgeConfig::load(&root, None)
        .await
        .unwrap_or_else(|e| panic!("Failed to load config: {:?}", e));

    assert_eq!(config.root, root);
    assert_eq!(
        config.source_dirs(),
        vec![root.join("cp_util"), root.join("include")]
    );
    assert_eq!(config.main_file(), root.join("main.cpp"));
    assert_eq!(config.output_file(), root.join("bin/combined.cpp"));
    assert_eq!(config.binary_file(), root.join("bin/combined"));
    assert_eq!(config.compiler, "g++");
    assert_eq!(config.std_flag, "-std=c++23");
    assert_eq!(config.cleaning.debug_prefixes, vec!["print", "pprint"]);
}

#[tokio::test]
async fn test_forge_json_in_root_overrides_defaults() {
    let dir = tempdir().unwrap();
    let root = dir.path().to_path_buf();
    write(
        &root,
        "forge.json",
        r#"{
            "source_dirs": ["lib"],
            "compiler": "clang++",
            "std_flag": "-std=c++20",
            "cleaning": { "debug_prefixes": ["dbg"] },
            "source_link": "https://example.com/repo"
        }"#,
    )
    .await;

    let config = ForgeConfig::load(&root, None).await.unwrap();

    assert_eq!(config.source_dirs, vec![PathBuf::from("lib")]);
    assert_eq!(config.compiler, "clang++");
    assert_eq!(config.std_flag, "-std=c++20");
    assert_eq!(config.cleaning.debug_prefixes, vec!["dbg"]);
    assert_eq!(config.cleaning.guard_directive, "#pragma once");
    assert_eq!(config.source_link.as_deref(), Some("https://example.com/repo"));
    assert_eq!(config.main_file, PathBuf::from("main.cpp"));
}

#[tokio::test]
async fn test_explicit_config_must_exist() {
    let dir = tempdir().unwrap();
    let root = dir.path().to_path_buf();

    let result = ForgeConfig::load(&root, Some(root.join("missing.json").as_path())).await;
    assert!(
        matches!(result, Err(ForgeError::ConfigError(_))),
        "Expected ConfigError, got {:?}",
        result
    );
}

#[tokio::test]
async fn test_malformed_config_is_rejected() {
    let dir = tempdir().unwrap();
    let root = dir.path().to_path_buf();
    write(&root, "forge.json", "{ not json").await;

    let result = ForgeConfig::load(&root, None).await;
    assert!(matches!(result, Err(ForgeError::ConfigError(_))));
}

#[tokio::test]
async fn test_empty_rule_tokens_are_rejected() {
    let dir = tempdir().unwrap();
    let root = dir.path().to_path_buf();
    write(&root, "forge.json", r#"{ "cleaning": { "guard_directive": "" } }"#).await;

    let result = ForgeConfig::load(&root, None).await;
    match result {
        Err(ForgeError::ConfigError(message)) => {
            assert!(message.contains("cleaning.guard_directive"))
        }
        other => panic!("Expected ConfigError, got {:?}", other),
    }
}

#[test]
fn test_label_is_root_relative() {
    let config = ForgeConfig::new("/project");
    assert_eq!(
        config.label(&PathBuf::from("/project/cp_util/dc_funcs.hpp")),
        "cp_util/dc_funcs.hpp"
    );
    assert_eq!(config.label(&PathBuf::from("/elsewhere/x.hpp")), "/elsewhere/x.hpp");
}
