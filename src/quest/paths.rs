use anyhow::Result;
use std::env;
use std::path::PathBuf;

#[derive(Debug, Clone)]
pub struct QuestPaths {
    pub quest_home: PathBuf,
    pub log_file: PathBuf,
    pub log_lock_file: PathBuf,
    pub photos_dir: PathBuf,
    pub exports_dir: PathBuf,
    pub logs_dir: PathBuf,
}

fn required_home_dir() -> Result<PathBuf> {
    if let Some(home) = dirs::home_dir() {
        return Ok(home);
    }
    Err(anyhow::anyhow!("HOME directory could not be resolved"))
}

fn env_or_default_path(var: &str, fallback: PathBuf) -> PathBuf {
    match env::var(var) {
        Ok(v) if !v.trim().is_empty() => PathBuf::from(v.trim()),
        _ => fallback,
    }
}

pub fn resolve_paths() -> Result<QuestPaths> {
    let home = required_home_dir()?;
    let quest_home = env_or_default_path("QUEST_HOME", home.join(".pushup-quest"));

    let log_file = env_or_default_path("QUEST_LOG_FILE", quest_home.join("state/activity_log.json"));
    let log_lock_file = log_file.with_extension("lock");
    let photos_dir = env_or_default_path("QUEST_PHOTOS_DIR", quest_home.join("photos"));
    let exports_dir = env_or_default_path("QUEST_EXPORTS_DIR", quest_home.join("exports"));
    let logs_dir = env_or_default_path("QUEST_LOGS_DIR", quest_home.join("logs"));

    Ok(QuestPaths {
        quest_home,
        log_file,
        log_lock_file,
        photos_dir,
        exports_dir,
        logs_dir,
    })
}
