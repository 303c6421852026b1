pub mod audit;
pub mod config;
pub mod dates;
pub mod export;
pub mod log_store;
pub mod migrate;
pub mod milestones;
pub mod paths;
pub mod photos;
pub mod session;
pub mod stats;
pub mod timelapse;
pub mod warn;
