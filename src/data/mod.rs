//! Data structures for the campaign
//!
//! Defines missions, player progress, and the simulated tool data.

pub mod mission;
pub mod progress;
pub mod tools;

pub use mission::*;
pub use progress::*;
pub use tools::*;

use serde::{Deserialize, Serialize};

/// Stable mission identifier within the campaign
pub type MissionId = u32;

/// Owning user of a progress record
pub type UserId = i64;

/// Game mode, server-authoritative
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum GameMode {
    #[default]
    Beginner,
    Expert,
}

impl GameMode {
    /// XP multiplier as an exact ratio (numerator, denominator)
    pub fn xp_ratio(&self) -> (u64, u64) {
        match self {
            GameMode::Beginner => (1, 1),
            GameMode::Expert => (3, 2),
        }
    }
}

impl std::fmt::Display for GameMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            GameMode::Beginner => write!(f, "beginner"),
            GameMode::Expert => write!(f, "expert"),
        }
    }
}

impl std::str::FromStr for GameMode {
    type Err = crate::GameError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "beginner" => Ok(GameMode::Beginner),
            "expert" => Ok(GameMode::Expert),
            other => Err(crate::GameError::InvalidInput(format!(
                "unknown mode '{}', expected beginner or expert",
                other
            ))),
        }
    }
}

/// Mission difficulty, descriptive only
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Difficulty {
    Beginner,
    Intermediate,
    Advanced,
    Expert,
}

impl std::fmt::Display for Difficulty {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Difficulty::Beginner => write!(f, "BEGINNER"),
            Difficulty::Intermediate => write!(f, "INTERMEDIATE"),
            Difficulty::Advanced => write!(f, "ADVANCED"),
            Difficulty::Expert => write!(f, "EXPERT"),
        }
    }
}

/// Investigation tools a mission may call for
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ToolType {
    Search,
    Whois,
    Metadata,
    Pastebin,
    Linkedin,
    Dns,
    Email,
    Cert,
    Breach,
}

impl std::fmt::Display for ToolType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ToolType::Search => write!(f, "search"),
            ToolType::Whois => write!(f, "whois"),
            ToolType::Metadata => write!(f, "metadata"),
            ToolType::Pastebin => write!(f, "pastebin"),
            ToolType::Linkedin => write!(f, "linkedin"),
            ToolType::Dns => write!(f, "dns"),
            ToolType::Email => write!(f, "email"),
            ToolType::Cert => write!(f, "cert"),
            ToolType::Breach => write!(f, "breach"),
        }
    }
}

impl std::str::FromStr for ToolType {
    type Err = crate::GameError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "search" => Ok(ToolType::Search),
            "whois" => Ok(ToolType::Whois),
            "metadata" => Ok(ToolType::Metadata),
            "pastebin" => Ok(ToolType::Pastebin),
            "linkedin" => Ok(ToolType::Linkedin),
            "dns" => Ok(ToolType::Dns),
            "email" => Ok(ToolType::Email),
            "cert" => Ok(ToolType::Cert),
            "breach" => Ok(ToolType::Breach),
            other => Err(crate::GameError::InvalidInput(format!("unknown tool '{}'", other))),
        }
    }
}

/// Interface accent color preference
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Theme {
    #[default]
    Cyan,
    Amber,
    Violet,
}

impl std::str::FromStr for Theme {
    type Err = crate::GameError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "cyan" => Ok(Theme::Cyan),
            "amber" => Ok(Theme::Amber),
            "violet" => Ok(Theme::Violet),
            other => Err(crate::GameError::InvalidInput(format!("unknown theme '{}'", other))),
        }
    }
}
