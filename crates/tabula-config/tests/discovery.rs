//! Tests for settings layering: defaults, descriptor file, environment.

use std::fs;

use serial_test::serial;
use tabula_config::{BuildMode, ConfigBuilder, SettingsDiscovery, DEFAULT_DEV_SERVER_PORT};
use tempfile::TempDir;

const PREFIX: &str = "TABULA_IT_";

fn clear_env() {
    unsafe {
        std::env::remove_var("TABULA_IT_DEV_SERVER__PORT");
        std::env::remove_var("TABULA_IT_LAYOUT__OUTPUT_FILENAME");
    }
}

#[test]
#[serial]
fn environment_overrides_descriptor() {
    clear_env();
    let dir = TempDir::new().expect("tempdir");
    fs::write(
        dir.path().join("tabula.toml"),
        r#"
[dev_server]
port = 9000

[layout]
output_filename = "from-file.js"
"#,
    )
    .expect("write settings");

    unsafe {
        std::env::set_var("TABULA_IT_DEV_SERVER__PORT", "9500");
    }
    let settings = SettingsDiscovery::new(dir.path())
        .with_env_prefix(PREFIX)
        .load()
        .expect("load settings");
    clear_env();

    assert_eq!(settings.dev_server.port, 9500);
    assert_eq!(settings.layout.output_filename, "from-file.js");
}

#[test]
#[serial]
fn environment_alone_overrides_defaults() {
    clear_env();
    let dir = TempDir::new().expect("tempdir");

    unsafe {
        std::env::set_var("TABULA_IT_LAYOUT__OUTPUT_FILENAME", "env.js");
    }
    let settings = SettingsDiscovery::new(dir.path())
        .with_env_prefix(PREFIX)
        .load()
        .expect("load settings");
    clear_env();

    assert_eq!(settings.layout.output_filename, "env.js");
    assert_eq!(settings.dev_server.port, DEFAULT_DEV_SERVER_PORT);
}

#[test]
#[serial]
fn descriptor_flows_into_built_configuration() {
    clear_env();
    let dir = TempDir::new().expect("tempdir");
    fs::write(
        dir.path().join("tabula.toml"),
        r#"
[layout]
entry = "./app/Main.fsproj"
output_dir = "./wwwroot"

[build]
define_policy = "omit"

[profiles.production.layout]
output_filename = "bundle.[hash].js"
"#,
    )
    .expect("write settings");

    let settings = SettingsDiscovery::new(dir.path())
        .with_env_prefix(PREFIX)
        .load()
        .expect("load settings");
    let builder = ConfigBuilder::new(dir.path()).with_settings(settings);

    let prod = builder.build_for_mode(BuildMode::Production).expect("build");
    assert_eq!(prod.entry(), dir.path().join("app/Main.fsproj"));
    assert_eq!(prod.output().path, dir.path().join("wwwroot"));
    assert_eq!(prod.output().filename, "bundle.[hash].js");
    assert!(prod.rules()[0].loaders[0].options.is_none());

    let dev = builder.build_for_mode(BuildMode::Development).expect("build");
    assert_eq!(dev.output().filename, "bundle.js");
    assert_eq!(dev.dev_server().unwrap().content_base, dir.path().join("wwwroot"));
}

#[test]
#[serial]
fn serialized_settings_load_back_unchanged() {
    clear_env();
    let dir = TempDir::new().expect("tempdir");

    let mut settings = tabula_config::ProjectSettings::default();
    settings.dev_server.port = 9100;
    settings.layout.output_filename = "client.js".to_string();
    settings.build.debug_defines = vec!["DEBUG".to_string(), "TRACE".to_string()];
    fs::write(
        dir.path().join("tabula.toml"),
        toml::to_string(&settings).expect("serialize settings"),
    )
    .expect("write settings");

    let loaded = SettingsDiscovery::new(dir.path())
        .with_env_prefix(PREFIX)
        .load()
        .expect("load settings");
    assert_eq!(loaded, settings);
}
