//! Synthesis over on-disk YAML class models and config files

mod common;

use common::*;
use entrypoint_synth::config::{EndpointMode, SynthesisConfig};
use entrypoint_synth::errors::ErrorKind;
use entrypoint_synth::features::symbol_resolution::{ClassRepository, Scene, YamlClassSource};
use entrypoint_synth::HandlerEntryPointCreator;
use std::fs;
use std::path::Path;
use tempfile::TempDir;

const USER_CONTROLLER: &str = r#"
name: app.UserController
methods:
  - name: "<init>"
    parameter_types: [app.UserService]
  - name: show
    parameter_types: [java.lang.String, app.UserService]
    return_type: java.lang.String
  - name: delete
    parameter_types: [long]
"#;

const USER_SERVICE: &str = r#"
name: app.UserService
kind: interface
methods:
  - name: find
    parameter_types: [java.lang.String]
    return_type: java.lang.String
    is_abstract: true
"#;

const USER_SERVICE_IMPL: &str = r#"
name: app.UserServiceImpl
interfaces: [app.UserService]
"#;

const HANDLERS: [&str; 2] = [
    "<app.UserController: java.lang.String show(java.lang.String,app.UserService)>",
    "<app.UserController: void delete(long)>",
];

fn write_class(root: &Path, class_name: &str, body: &str) {
    let source = YamlClassSource::new(root);
    let path = source.path_for(class_name);
    fs::create_dir_all(path.parent().unwrap()).unwrap();
    fs::write(path, body).unwrap();
}

fn classpath() -> TempDir {
    let dir = TempDir::new().unwrap();
    write_class(dir.path(), "app.UserController", USER_CONTROLLER);
    write_class(dir.path(), "app.UserService", USER_SERVICE);
    write_class(dir.path(), "app.UserServiceImpl", USER_SERVICE_IMPL);
    dir
}

fn scene_over(dir: &TempDir) -> Scene {
    let mut scene = Scene::with_jdk_stubs();
    scene.set_source(Box::new(YamlClassSource::new(dir.path())));
    scene
}

#[test]
fn test_handlers_loaded_on_demand() {
    let dir = classpath();
    let mut scene = scene_over(&dir);
    scene.load_all_available().unwrap();

    let outcome = HandlerEntryPointCreator::new(HANDLERS)
        .unwrap()
        .synthesize(&mut scene)
        .unwrap();
    let procedure = &outcome.procedure;

    assert!(outcome.is_complete(), "{:?}", outcome.warnings);
    assert_eq!(procedure.branches().len(), 2);
    // Receiver and argument each get their own service implementation
    assert_eq!(count_news(procedure, "app.UserController"), 1);
    assert_eq!(count_news(procedure, "app.UserServiceImpl"), 2);
    assert_string_args_tainted(procedure);
    assert_string_returns_reach_sink(procedure, "println");
}

#[test]
fn test_lazy_loading_without_preload() {
    let dir = classpath();
    let mut scene = scene_over(&dir);

    let outcome = HandlerEntryPointCreator::new(HANDLERS)
        .unwrap()
        .synthesize(&mut scene)
        .unwrap();

    assert!(scene.contains_class("app.UserController"));
    assert!(scene.contains_class("app.UserService"));
    // Never requested, so no implementation is known
    assert!(!scene.contains_class("app.UserServiceImpl"));
    assert_eq!(outcome.procedure.branches().len(), 2);
    // Receiver constructor argument and the handler argument both fall back to null
    assert_eq!(outcome.warnings_with_code("placeholder").count(), 2);
    assert_eq!(outcome.warnings_with_code("receiver_unavailable").count(), 0);
    assert_eq!(count_news(&outcome.procedure, "app.UserController"), 1);
}

#[test]
fn test_malformed_model_is_fatal() {
    let dir = classpath();
    write_class(dir.path(), "app.UserController", "name: [unclosed");
    let mut scene = scene_over(&dir);

    let err = HandlerEntryPointCreator::new(HANDLERS)
        .unwrap()
        .synthesize(&mut scene)
        .unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Loader);
}

#[test]
fn test_config_file_drives_synthesis() {
    let dir = classpath();
    let config_path = dir.path().join("synth.yaml");
    fs::write(
        &config_path,
        "version: 1\nsynthesis:\n  endpoints: synthetic\n  driver_method: main\n",
    )
    .unwrap();

    let config = SynthesisConfig::from_yaml(&config_path).unwrap();
    assert_eq!(config.endpoints, EndpointMode::Synthetic);

    let mut scene = scene_over(&dir);
    scene.load_all_available().unwrap();
    let outcome = HandlerEntryPointCreator::with_config(HANDLERS, config)
        .unwrap()
        .synthesize(&mut scene)
        .unwrap();
    assert_eq!(outcome.procedure.method_name, "main");
    assert_string_returns_reach_sink(&outcome.procedure, "_dummy_sink");
}
