use crate::error::QuestWarnCode;
use crate::quest::log_store::{ActivityLog, LogStore, sanitize};
use crate::quest::paths::QuestPaths;
use crate::quest::warn;
use anyhow::Result;
use serde_json::Value;
use std::collections::BTreeMap;
use std::fs;
use std::path::PathBuf;

/// One legacy schema location: where it lives and how to read it.
struct LegacyProbe {
    name: &'static str,
    path: PathBuf,
    parse: fn(&str) -> Option<ActivityLog>,
}

fn entries_from_value(value: &Value) -> Option<ActivityLog> {
    let map = value.as_object()?;
    let mut raw = BTreeMap::new();
    for (key, count) in map {
        if let Some(n) = count.as_u64() {
            raw.insert(key.clone(), n);
        }
    }
    Some(sanitize(raw))
}

/// v2: combined `{entries, photos, ...}` document; hand-edited files are
/// common, so parse tolerantly with json5. Only `entries` survives.
fn parse_combined_v2(raw: &str) -> Option<ActivityLog> {
    let value: Value = json5::from_str(raw).ok()?;
    entries_from_value(value.get("entries")?)
}

/// v1: `{entries: {...}}` wrapper, strict JSON, other fields ignored.
fn parse_wrapped_v1(raw: &str) -> Option<ActivityLog> {
    let value: Value = serde_json::from_str(raw).ok()?;
    entries_from_value(value.get("entries")?)
}

/// v0: a bare day-to-count map.
fn parse_bare_v0(raw: &str) -> Option<ActivityLog> {
    let value: Value = serde_json::from_str(raw).ok()?;
    entries_from_value(&value)
}

/// Most recent legacy format first; probing stops at the first success.
fn probes(paths: &QuestPaths) -> Vec<LegacyProbe> {
    let mut out = vec![
        LegacyProbe {
            name: "quest-data-v2",
            path: paths.quest_home.join("quest-data.json"),
            parse: parse_combined_v2,
        },
        LegacyProbe {
            name: "pushup-quest-data-v1",
            path: paths.quest_home.join("pushup-quest-data.json"),
            parse: parse_wrapped_v1,
        },
    ];
    if let Some(home) = dirs::home_dir() {
        out.push(LegacyProbe {
            name: "pushups-v0",
            path: home.join(".pushups.json"),
            parse: parse_bare_v0,
        });
    }
    out
}

/// Copy the first parseable, nonempty legacy source into the canonical
/// store. Runs only while the canonical store is empty, which is what makes
/// a second invocation a no-op. Returns the migrated source name, if any.
pub fn run_if_empty(paths: &QuestPaths, store: &mut LogStore) -> Result<Option<&'static str>> {
    if !store.entries().is_empty() {
        return Ok(None);
    }

    for probe in probes(paths) {
        if !probe.path.is_file() {
            continue;
        }
        let raw = match fs::read_to_string(&probe.path) {
            Ok(raw) => raw,
            Err(err) => {
                warn::emit(
                    QuestWarnCode::W003LegacySkipped,
                    "migrate",
                    probe.name,
                    "unreadable legacy source",
                    &err.to_string(),
                );
                continue;
            }
        };
        match (probe.parse)(&raw) {
            Some(entries) if !entries.is_empty() => {
                store.replace_all(entries)?;
                return Ok(Some(probe.name));
            }
            _ => {
                warn::emit(
                    QuestWarnCode::W003LegacySkipped,
                    "migrate",
                    probe.name,
                    "legacy source empty or unparseable",
                    "na",
                );
            }
        }
    }

    Ok(None)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::quest::dates::DayId;
    use tempfile::tempdir;

    fn day(raw: &str) -> DayId {
        DayId::parse(raw).expect("valid day")
    }

    fn paths_in(dir: &std::path::Path) -> QuestPaths {
        QuestPaths {
            quest_home: dir.to_path_buf(),
            log_file: dir.join("state/activity_log.json"),
            log_lock_file: dir.join("state/activity_log.lock"),
            photos_dir: dir.join("photos"),
            exports_dir: dir.join("exports"),
            logs_dir: dir.join("logs"),
        }
    }

    fn store_for(paths: &QuestPaths) -> LogStore {
        LogStore::open(paths.log_file.clone(), paths.log_lock_file.clone())
    }

    #[test]
    fn v1_wrapper_migrates_entries_only() {
        let tmp = tempdir().expect("tempdir");
        let paths = paths_in(tmp.path());
        fs::write(
            tmp.path().join("pushup-quest-data.json"),
            r#"{"entries":{"2024-01-01":50,"2024-01-02":25},"photos":{"0":{}},"theme":"dark"}"#,
        )
        .expect("write legacy");

        let mut store = store_for(&paths);
        let migrated = run_if_empty(&paths, &mut store).expect("migrate");
        assert_eq!(migrated, Some("pushup-quest-data-v1"));
        assert_eq!(store.total(), 75);
        assert_eq!(store.count_for(&day("2024-01-01")), 50);
    }

    #[test]
    fn most_recent_format_wins() {
        let tmp = tempdir().expect("tempdir");
        let paths = paths_in(tmp.path());
        fs::write(
            tmp.path().join("quest-data.json"),
            // json5: trailing comma survives.
            r#"{entries: {"2024-02-01": 100,}, photos: {}}"#,
        )
        .expect("write v2");
        fs::write(
            tmp.path().join("pushup-quest-data.json"),
            r#"{"entries":{"2024-01-01":1}}"#,
        )
        .expect("write v1");

        let mut store = store_for(&paths);
        let migrated = run_if_empty(&paths, &mut store).expect("migrate");
        assert_eq!(migrated, Some("quest-data-v2"));
        assert_eq!(store.total(), 100);
    }

    #[test]
    fn broken_source_is_skipped_and_next_attempted() {
        let tmp = tempdir().expect("tempdir");
        let paths = paths_in(tmp.path());
        fs::write(tmp.path().join("quest-data.json"), "{{{{").expect("write broken");
        fs::write(
            tmp.path().join("pushup-quest-data.json"),
            r#"{"entries":{"2024-01-01":7}}"#,
        )
        .expect("write v1");

        let mut store = store_for(&paths);
        let migrated = run_if_empty(&paths, &mut store).expect("migrate");
        assert_eq!(migrated, Some("pushup-quest-data-v1"));
        assert_eq!(store.total(), 7);
    }

    #[test]
    fn migration_is_idempotent() {
        let tmp = tempdir().expect("tempdir");
        let paths = paths_in(tmp.path());
        fs::write(
            tmp.path().join("pushup-quest-data.json"),
            r#"{"entries":{"2024-01-01":50}}"#,
        )
        .expect("write legacy");

        let mut store = store_for(&paths);
        run_if_empty(&paths, &mut store).expect("first run");
        let after_first = store.entries().clone();

        // Change the legacy file; a populated canonical store must win.
        fs::write(
            tmp.path().join("pushup-quest-data.json"),
            r#"{"entries":{"2024-06-01":9999}}"#,
        )
        .expect("rewrite legacy");

        let mut store = store_for(&paths);
        let second = run_if_empty(&paths, &mut store).expect("second run");
        assert_eq!(second, None);
        assert_eq!(store.entries(), &after_first);
    }

    #[test]
    fn no_source_leaves_store_empty_without_error() {
        let tmp = tempdir().expect("tempdir");
        let paths = paths_in(tmp.path());
        let mut store = store_for(&paths);
        let migrated = run_if_empty(&paths, &mut store).expect("migrate");
        assert_eq!(migrated, None);
        assert!(store.entries().is_empty());
    }

    #[test]
    fn zero_and_negative_legacy_counts_are_dropped() {
        let tmp = tempdir().expect("tempdir");
        let paths = paths_in(tmp.path());
        fs::write(
            tmp.path().join("pushup-quest-data.json"),
            r#"{"entries":{"2024-01-01":10,"2024-01-02":0,"2024-01-03":-5}}"#,
        )
        .expect("write legacy");

        let mut store = store_for(&paths);
        run_if_empty(&paths, &mut store).expect("migrate");
        assert_eq!(store.total(), 10);
        assert_eq!(store.entries().len(), 1);
    }
}
