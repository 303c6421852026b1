use crate::quest::milestones::MILESTONE_UNIT;
use anyhow::{Result, anyhow};
use serde::{Deserialize, Serialize};
use std::env;
use std::fs;
use std::path::PathBuf;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GoalConfig {
    pub goal: u64,
}

impl Default for GoalConfig {
    fn default() -> Self {
        Self { goal: 100_000 }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TimelapseConfig {
    pub interval_ms: u64,
}

impl Default for TimelapseConfig {
    fn default() -> Self {
        Self { interval_ms: 800 }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct QuestConfig {
    pub quest: GoalConfig,
    pub timelapse: TimelapseConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
struct PartialQuestConfig {
    quest: Option<GoalConfig>,
    timelapse: Option<TimelapseConfig>,
}

fn env_or_u64(var: &str, fallback: u64) -> u64 {
    match env::var(var) {
        Ok(v) => v.trim().parse::<u64>().ok().unwrap_or(fallback),
        Err(_) => fallback,
    }
}

fn validate(cfg: &QuestConfig) -> Result<()> {
    if cfg.quest.goal < MILESTONE_UNIT {
        return Err(anyhow!(
            "invalid goal: must be at least one full level ({MILESTONE_UNIT})"
        ));
    }
    if cfg.quest.goal % MILESTONE_UNIT != 0 {
        return Err(anyhow!(
            "invalid goal: must be a multiple of {MILESTONE_UNIT}"
        ));
    }
    if cfg.timelapse.interval_ms < 50 {
        return Err(anyhow!("invalid timelapse interval: must be >= 50 ms"));
    }
    Ok(())
}

fn resolve_config_path() -> Option<PathBuf> {
    if let Ok(custom) = env::var("QUEST_CONFIG_PATH") {
        let trimmed = custom.trim();
        if !trimmed.is_empty() {
            return Some(PathBuf::from(trimmed));
        }
    }

    let quest_home = match env::var("QUEST_HOME") {
        Ok(v) if !v.trim().is_empty() => PathBuf::from(v.trim()),
        _ => dirs::home_dir()?.join(".pushup-quest"),
    };
    Some(quest_home.join("quest.toml"))
}

fn merge_file_config(base: &mut QuestConfig) -> Result<()> {
    let Some(path) = resolve_config_path() else {
        return Ok(());
    };
    if !path.exists() {
        return Ok(());
    }

    let raw = fs::read_to_string(&path)?;
    let parsed: PartialQuestConfig = toml::from_str(&raw)
        .map_err(|err| anyhow!("failed to parse quest config {}: {err}", path.display()))?;
    if let Some(quest) = parsed.quest {
        base.quest = quest;
    }
    if let Some(timelapse) = parsed.timelapse {
        base.timelapse = timelapse;
    }
    Ok(())
}

pub fn load_config() -> Result<QuestConfig> {
    let mut cfg = QuestConfig::default();
    merge_file_config(&mut cfg)?;

    cfg.quest.goal = env_or_u64("QUEST_GOAL", cfg.quest.goal);
    cfg.timelapse.interval_ms =
        env_or_u64("QUEST_TIMELAPSE_INTERVAL_MS", cfg.timelapse.interval_ms);

    validate(&cfg)?;
    Ok(cfg)
}
