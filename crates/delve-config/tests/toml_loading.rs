//! Integration tests for TOML configuration loading.
//!
//! Uses figment::Jail for sandboxed working directories and env vars.

use delve_config::{ConfigError, DelveConfig, PROJECT_CONFIG_PATH};
use figment::{
    Figment, Jail,
    providers::{Format, Serialized, Toml},
};
use pretty_assertions::assert_eq;

#[test]
fn loads_workflow_limits_from_toml() {
    Jail::expect_with(|jail| {
        jail.create_file(
            "config.toml",
            r#"
[workflow]
min_subquestions = 2
max_subquestions = 7
max_findings_per_subquestion = 10
"#,
        )?;

        let figment = Figment::from(Serialized::defaults(DelveConfig::default()))
            .merge(Toml::file("config.toml"));
        let config = DelveConfig::from_figment(&figment).expect("config loads");

        assert_eq!(config.workflow.min_subquestions, 2);
        assert_eq!(config.workflow.max_subquestions, 7);
        assert_eq!(config.workflow.max_findings_per_subquestion, 10);
        assert_eq!(config.server.name, "deep-research-server");
        Ok(())
    });
}

#[test]
fn partial_section_keeps_defaults() {
    Jail::expect_with(|jail| {
        jail.create_file(
            "config.toml",
            r#"
[workflow]
max_subquestions = 4
"#,
        )?;

        let figment = Figment::from(Serialized::defaults(DelveConfig::default()))
            .merge(Toml::file("config.toml"));
        let config = DelveConfig::from_figment(&figment).expect("config loads");

        assert_eq!(config.workflow.min_subquestions, 3);
        assert_eq!(config.workflow.max_subquestions, 4);
        Ok(())
    });
}

#[test]
fn project_config_is_picked_up_by_load() {
    Jail::expect_with(|jail| {
        jail.create_dir(".delve")?;
        jail.create_file(
            PROJECT_CONFIG_PATH,
            r#"
[server]
name = "team-research"
"#,
        )?;

        let config = DelveConfig::load().expect("config loads");
        assert_eq!(config.server.name, "team-research");
        Ok(())
    });
}

#[test]
fn invalid_bounds_fail_validation() {
    Jail::expect_with(|jail| {
        jail.create_file(
            "config.toml",
            r#"
[workflow]
min_subquestions = 6
max_subquestions = 3
"#,
        )?;

        let figment = Figment::from(Serialized::defaults(DelveConfig::default()))
            .merge(Toml::file("config.toml"));
        let err = DelveConfig::from_figment(&figment).unwrap_err();
        assert!(matches!(err, ConfigError::InvalidValue { .. }));
        Ok(())
    });
}
