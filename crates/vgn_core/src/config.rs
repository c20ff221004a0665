//! Per-demo configuration, parsed from JSON compiled into each binary.

use serde::Deserialize;

use crate::pool::OverflowPolicy;

#[derive(Debug, Deserialize, Clone, PartialEq)]
pub struct DemoConfig {
    pub title: String,
    pub width: u32,
    pub height: u32,
    #[serde(default = "default_tick_rate")]
    pub tick_rate: u32,
    #[serde(default = "default_duration_ms")]
    pub duration_ms: u64,
    #[serde(default = "default_grace_ms")]
    pub grace_ms: u64,
    /// Fixed RNG seed. Absent means a fresh seed every run.
    #[serde(default)]
    pub seed: Option<u64>,
    #[serde(default = "default_particle_cap")]
    pub particle_cap: usize,
    #[serde(default)]
    pub overflow: OverflowPolicy,
}

pub fn parse_demo_config(demo: &str, raw: &str) -> Result<DemoConfig, String> {
    let config: DemoConfig = serde_json::from_str(raw)
        .map_err(|e| format!("Failed to parse config for demo '{demo}': {e}"))?;
    validate_config(demo, &config)?;
    Ok(config)
}

fn validate_config(demo: &str, config: &DemoConfig) -> Result<(), String> {
    if config.title.trim().is_empty() {
        return Err(format!("Config validation failed for '{demo}': title is empty"));
    }
    if config.width == 0 || config.height == 0 {
        return Err(format!(
            "Config validation failed for '{demo}': window size {}x{} has a zero dimension",
            config.width, config.height
        ));
    }
    if config.tick_rate == 0 {
        return Err(format!(
            "Config validation failed for '{demo}': tick_rate must be > 0"
        ));
    }
    if config.duration_ms == 0 {
        return Err(format!(
            "Config validation failed for '{demo}': duration_ms must be > 0"
        ));
    }
    if config.particle_cap == 0 {
        return Err(format!(
            "Config validation failed for '{demo}': particle_cap must be > 0"
        ));
    }
    Ok(())
}

const fn default_tick_rate() -> u32 {
    60
}

const fn default_duration_ms() -> u64 {
    20_000
}

const fn default_grace_ms() -> u64 {
    1_000
}

const fn default_particle_cap() -> usize {
    512
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_applies_defaults() {
        let config = parse_demo_config(
            "test",
            r#"{ "title": "Test Scene", "width": 800, "height": 600 }"#,
        )
        .expect("minimal config should parse");
        assert_eq!(config.tick_rate, 60);
        assert_eq!(config.duration_ms, 20_000);
        assert_eq!(config.grace_ms, 1_000);
        assert_eq!(config.seed, None);
        assert_eq!(config.particle_cap, 512);
        assert_eq!(config.overflow, OverflowPolicy::EvictOldest);
    }

    #[test]
    fn parse_reads_every_field() {
        let config = parse_demo_config(
            "test",
            r#"{
              "title": "Forest Scene",
              "width": 800,
              "height": 600,
              "tick_rate": 400,
              "duration_ms": 5000,
              "grace_ms": 250,
              "seed": 1234,
              "particle_cap": 32,
              "overflow": "reject"
            }"#,
        )
        .expect("full config should parse");
        assert_eq!(config.tick_rate, 400);
        assert_eq!(config.duration_ms, 5000);
        assert_eq!(config.grace_ms, 250);
        assert_eq!(config.seed, Some(1234));
        assert_eq!(config.particle_cap, 32);
        assert_eq!(config.overflow, OverflowPolicy::Reject);
    }

    #[test]
    fn parse_rejects_malformed_json() {
        let err = parse_demo_config("broken", "{ not json").expect_err("should fail");
        assert!(err.contains("Failed to parse config for demo 'broken'"));
    }

    #[test]
    fn validation_rejects_zero_size() {
        let err = parse_demo_config("tiny", r#"{ "title": "t", "width": 0, "height": 600 }"#)
            .expect_err("zero width should fail");
        assert!(err.contains("zero dimension"));
    }

    #[test]
    fn validation_rejects_zero_tick_rate() {
        let err = parse_demo_config(
            "still",
            r#"{ "title": "t", "width": 10, "height": 10, "tick_rate": 0 }"#,
        )
        .expect_err("zero tick rate should fail");
        assert!(err.contains("tick_rate"));
    }

    #[test]
    fn validation_rejects_blank_title() {
        let err = parse_demo_config("blank", r#"{ "title": "  ", "width": 10, "height": 10 }"#)
            .expect_err("blank title should fail");
        assert!(err.contains("title is empty"));
    }

    #[test]
    fn validation_rejects_zero_particle_cap() {
        let err = parse_demo_config(
            "nocap",
            r#"{ "title": "t", "width": 10, "height": 10, "particle_cap": 0 }"#,
        )
        .expect_err("zero cap should fail");
        assert!(err.contains("particle_cap"));
    }
}
