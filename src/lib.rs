//! OSINT Detective: progression and scoring engine
//!
//! Players work through a fixed campaign of investigation missions, run
//! simulated OSINT tools against canned data, and file free-text reports.
//! Reports are graded, XP is awarded, levels and achievements follow.
//!
//! # Game Mechanics
//!
//! - **Missions**: a 25-case campaign split into three acts
//! - **Grading**: keyword heuristic, or an optional LLM instructor
//! - **Progression**: XP drives level, level gates missions
//! - **Achievements**: permanent unlocks evaluated after every mutation
//!
//! # Architecture
//!
//! - `data` - Missions, player progress records, simulated tool data
//! - `game` - XP curve, grading, achievements, the progression engine
//! - `store` - Per-user progress persistence (memory and SQLite)
//! - `config` - Configuration file and environment overrides

pub mod config;
pub mod data;
pub mod game;
pub mod store;

pub use data::*;
pub use game::ProgressionEngine;

/// Crate version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Result type for plumbing (storage, config, HTTP)
pub type Result<T> = anyhow::Result<T>;

/// Errors surfaced by engine operations
#[derive(thiserror::Error, Debug)]
pub enum GameError {
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Player progress not found for user {0}")]
    ProgressNotFound(UserId),

    #[error("Mission not found: {0}")]
    MissionNotFound(MissionId),

    #[error("Mission locked: you must be level {required} to attempt this mission (current level {current})")]
    MissionLocked { required: u32, current: u32 },

    #[error("Storage failure: {0:#}")]
    Storage(#[from] anyhow::Error),
}

impl GameError {
    /// HTTP-style status code for the transport layer
    pub fn status_code(&self) -> u16 {
        match self {
            GameError::InvalidInput(_) => 400,
            GameError::MissionLocked { .. } => 403,
            GameError::ProgressNotFound(_) | GameError::MissionNotFound(_) => 404,
            GameError::Storage(_) => 500,
        }
    }

    /// Message safe to show the player
    pub fn user_message(&self) -> String {
        match self {
            GameError::Storage(_) => "Something went wrong saving your progress. Please try again.".to_string(),
            other => other.to_string(),
        }
    }
}
