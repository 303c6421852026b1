use thiserror::Error;

#[derive(Debug, Error)]
pub enum QuestError {
    #[error("activity log write failed: {0}")]
    LogWriteFailed(String),
    #[error("photo store unavailable: {0}")]
    StorageUnavailable(String),
    #[error("invalid day id (expected YYYY-MM-DD): {0}")]
    InvalidDayId(String),
    #[error("invalid milestone {0}: must be 0 or a positive multiple of 1000")]
    InvalidMilestone(u64),
    #[error("count must be greater than zero")]
    ZeroCount,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum QuestWarnCode {
    W001LogWriteRetry,
    W002PhotoStoreDown,
    W003LegacySkipped,
}

impl QuestWarnCode {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::W001LogWriteRetry => "W001_LOG_WRITE_RETRY",
            Self::W002PhotoStoreDown => "W002_PHOTO_STORE_DOWN",
            Self::W003LegacySkipped => "W003_LEGACY_SKIPPED",
        }
    }
}
