//! Integration tests for TOML configuration loading.
//!
//! Uses figment::Jail for safe, sandboxed env var manipulation.

use figment::{
    Figment, Jail,
    providers::{Format, Serialized, Toml},
};
use cohort_config::CohortConfig;
use pretty_assertions::assert_eq;

#[test]
fn loads_all_sections_from_toml() {
    Jail::expect_with(|jail| {
        jail.create_file(
            "config.toml",
            r#"
[database]
path = "./data/promotions.db"

[attendance]
conflict_retry_attempts = 6
retry_base_delay_ms = 5
retry_max_delay_ms = 80

[backfill]
page_size = 250

[general]
default_limit = 30
"#,
        )?;

        let figment = Figment::from(Serialized::defaults(CohortConfig::default()))
            .merge(Toml::file("config.toml"));
        let config = CohortConfig::from_figment(&figment).expect("config loads");

        assert_eq!(config.database.path, "./data/promotions.db");
        assert_eq!(config.attendance.conflict_retry_attempts, 6);
        assert_eq!(config.attendance.retry_base_delay_ms, 5);
        assert_eq!(config.attendance.retry_max_delay_ms, 80);
        assert_eq!(config.backfill.page_size, 250);
        assert_eq!(config.general.default_limit, 30);
        Ok(())
    });
}

#[test]
fn partial_toml_keeps_other_defaults() {
    Jail::expect_with(|jail| {
        jail.create_file(
            "config.toml",
            r#"
[backfill]
page_size = 10
"#,
        )?;

        let config: CohortConfig = Figment::from(Serialized::defaults(CohortConfig::default()))
            .merge(Toml::file("config.toml"))
            .extract()?;

        assert_eq!(config.backfill.page_size, 10);
        assert_eq!(config.database.path, ".cohort/cohort.db");
        assert_eq!(config.attendance.conflict_retry_attempts, 4);
        assert_eq!(config.general.default_limit, 100);
        Ok(())
    });
}

#[test]
fn project_local_file_is_picked_up() {
    Jail::expect_with(|jail| {
        jail.create_dir(".cohort")?;
        jail.create_file(
            ".cohort/config.toml",
            r#"
[database]
path = ":memory:"
"#,
        )?;

        let config = CohortConfig::load().expect("config loads");
        assert!(config.database.is_in_memory());
        Ok(())
    });
}

#[test]
fn out_of_range_toml_value_is_rejected() {
    Jail::expect_with(|jail| {
        jail.create_file(
            "config.toml",
            r#"
[backfill]
page_size = 0
"#,
        )?;

        let figment = Figment::from(Serialized::defaults(CohortConfig::default()))
            .merge(Toml::file("config.toml"));
        assert!(CohortConfig::from_figment(&figment).is_err());
        Ok(())
    });
}
