use crate::error::QuestWarnCode;
use crate::quest::audit;
use crate::quest::config::QuestConfig;
use crate::quest::dates::DayId;
use crate::quest::log_store::{ActivityLog, LogStore};
use crate::quest::migrate;
use crate::quest::milestones::crossed_milestone;
use crate::quest::paths::QuestPaths;
use crate::quest::photos::PhotoStore;
use crate::quest::stats::{self, Snapshot};
use crate::quest::warn;
use anyhow::Result;

/// Which screen the interaction layer is showing. Modeled as an explicit
/// state machine instead of scattered boolean flags; illegal triggers leave
/// the state unchanged.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ViewState {
    Loading,
    BeforePrompt,
    MilestonePrompt(u64),
    Gallery,
    Calendar,
    Stats,
    Main,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ViewEvent {
    BootComplete { total: u64, has_baseline: bool },
    Crossed(u64),
    CaptureSaved,
    Dismiss,
    OpenGallery,
    OpenCalendar,
    OpenStats,
    Back,
}

impl ViewState {
    pub fn apply(self, event: ViewEvent) -> ViewState {
        use ViewEvent::*;
        use ViewState::*;
        match (self, event) {
            (Loading, BootComplete { total, has_baseline }) => {
                if total == 0 && !has_baseline {
                    BeforePrompt
                } else {
                    Main
                }
            }
            (Main, Crossed(milestone)) => MilestonePrompt(milestone),
            (BeforePrompt | MilestonePrompt(_), CaptureSaved | Dismiss) => Main,
            (Main, OpenGallery) => Gallery,
            (Main, OpenCalendar) => Calendar,
            (Main, OpenStats) => Stats,
            (Gallery | Calendar | Stats, Back) => Main,
            (state, _) => state,
        }
    }
}

#[derive(Debug, Clone)]
pub struct AddOutcome {
    pub day: DayId,
    pub day_total: u64,
    pub total: u64,
    pub crossed: Option<u64>,
    /// Set when the crossing has no photo record yet and a capture prompt
    /// should be raised.
    pub capture_request: Option<u64>,
}

#[derive(Debug, Clone)]
pub struct RemoveOutcome {
    pub day: DayId,
    pub day_total: u64,
    pub total: u64,
}

/// Orchestrates the stores and the derived view. Store locations are
/// explicit constructor inputs, so tests point the whole session at a
/// temporary home.
pub struct Session {
    paths: QuestPaths,
    config: QuestConfig,
    log: LogStore,
    photos: PhotoStore,
    view: ViewState,
    migrated_from: Option<&'static str>,
}

impl Session {
    pub fn boot(paths: QuestPaths, config: QuestConfig) -> Result<Session> {
        let mut log = LogStore::open(paths.log_file.clone(), paths.log_lock_file.clone());
        let migrated_from = migrate::run_if_empty(&paths, &mut log)?;
        let photos = PhotoStore::new(paths.photos_dir.clone());

        let view = ViewState::Loading.apply(ViewEvent::BootComplete {
            total: log.total(),
            has_baseline: photos.has(0),
        });

        Ok(Session {
            paths,
            config,
            log,
            photos,
            view,
            migrated_from,
        })
    }

    pub fn entries(&self) -> &ActivityLog {
        self.log.entries()
    }

    pub fn config(&self) -> &QuestConfig {
        &self.config
    }

    pub fn paths(&self) -> &QuestPaths {
        &self.paths
    }

    pub fn photos(&self) -> &PhotoStore {
        &self.photos
    }

    pub fn view(&self) -> ViewState {
        self.view
    }

    pub fn migrated_from(&self) -> Option<&'static str> {
        self.migrated_from
    }

    pub fn snapshot(&self, today: &DayId) -> Snapshot {
        stats::snapshot(self.log.entries(), today, self.config.quest.goal)
    }

    /// Record push-ups and detect a milestone crossing. The mutation is
    /// durable before this returns; photo-store trouble never blocks it.
    pub fn apply_add(&mut self, day: &DayId, delta: u64) -> Result<AddOutcome> {
        let old_total = self.log.total();
        self.log.add_count(day, delta)?;
        let total = self.log.total();

        let crossed = crossed_milestone(old_total, total);
        let capture_request = crossed.filter(|&milestone| !self.photos.has(milestone));
        if let Some(milestone) = crossed {
            self.view = self.view.apply(ViewEvent::Crossed(milestone));
        }

        if let Err(err) = audit::append_mutation(&self.paths, "add", day, delta, total) {
            warn::emit(
                QuestWarnCode::W001LogWriteRetry,
                "audit",
                day.as_str(),
                "audit append failed",
                &format!("{err:#}"),
            );
        }

        Ok(AddOutcome {
            day: day.clone(),
            day_total: self.log.count_for(day),
            total,
            crossed,
            capture_request,
        })
    }

    /// Clamped decrement. Never raises capture requests and never touches
    /// photo records.
    pub fn apply_remove(&mut self, day: &DayId, delta: u64) -> Result<RemoveOutcome> {
        self.log.remove_count(day, delta)?;
        let total = self.log.total();

        if let Err(err) = audit::append_mutation(&self.paths, "remove", day, delta, total) {
            warn::emit(
                QuestWarnCode::W001LogWriteRetry,
                "audit",
                day.as_str(),
                "audit append failed",
                &format!("{err:#}"),
            );
        }

        Ok(RemoveOutcome {
            day: day.clone(),
            day_total: self.log.count_for(day),
            total,
        })
    }

    pub fn capture_saved(&mut self) {
        self.view = self.view.apply(ViewEvent::CaptureSaved);
    }
}
