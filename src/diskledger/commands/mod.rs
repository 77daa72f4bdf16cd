//! # Command Layer
//!
//! This module contains the business logic of diskledger. Each command lives
//! in its own submodule as a plain function over a [`DiskRepository`].
//!
//! ## Role and Responsibilities
//!
//! - Check drafts before they reach a repository (repositories do not validate)
//! - Call the repository
//! - Turn absent results into messages instead of errors
//! - Return a structured [`CmdResult`]
//!
//! ## What Commands Do NOT Do
//!
//! - **Any terminal I/O**: no stdout, stderr, prompts or colours
//! - **Argument parsing**: that's the CLI layer's job
//! - **Confirmation**: asking before a delete is the UI's call
//!
//! ## Testing Strategy
//!
//! Command tests run against `InMemoryStore`. This is where most of the
//! behavioural testing lives.
//!
//! ## Command Modules
//!
//! - [`add`]: Create a disk
//! - [`list`]: List or filter disks
//! - [`view`]: Fetch one disk
//! - [`update`]: Replace a disk's fields
//! - [`delete`]: Remove a disk
//! - [`seed`]: Load the sample data set
//! - [`config`]: Show and change configuration
//! - [`helpers`]: Id prefix resolution
//!
//! [`DiskRepository`]: crate::store::DiskRepository

use crate::config::AppConfig;
use crate::model::Disk;
use serde::Serialize;

pub mod add;
pub mod config;
pub mod delete;
pub mod helpers;
pub mod list;
pub mod seed;
pub mod update;
pub mod view;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum MessageLevel {
    Info,
    Success,
    Warning,
    Error,
}

#[derive(Debug, Clone, Serialize)]
pub struct CmdMessage {
    pub level: MessageLevel,
    pub content: String,
}

impl CmdMessage {
    pub fn info(content: impl Into<String>) -> Self {
        Self {
            level: MessageLevel::Info,
            content: content.into(),
        }
    }

    pub fn success(content: impl Into<String>) -> Self {
        Self {
            level: MessageLevel::Success,
            content: content.into(),
        }
    }

    pub fn warning(content: impl Into<String>) -> Self {
        Self {
            level: MessageLevel::Warning,
            content: content.into(),
        }
    }

    pub fn error(content: impl Into<String>) -> Self {
        Self {
            level: MessageLevel::Error,
            content: content.into(),
        }
    }
}

#[derive(Debug, Default)]
pub struct CmdResult {
    /// Disks created, changed or removed by the command
    pub affected_disks: Vec<Disk>,
    /// Disks to show
    pub listed_disks: Vec<Disk>,
    pub messages: Vec<CmdMessage>,
    pub config: Option<AppConfig>,
}

impl CmdResult {
    pub fn add_message(&mut self, message: CmdMessage) {
        self.messages.push(message);
    }

    pub fn with_listed_disks(mut self, disks: Vec<Disk>) -> Self {
        self.listed_disks = disks;
        self
    }

    pub fn with_config(mut self, config: AppConfig) -> Self {
        self.config = Some(config);
        self
    }

    /// True if any message is a warning or error.
    pub fn has_problems(&self) -> bool {
        self.messages
            .iter()
            .any(|m| matches!(m.level, MessageLevel::Warning | MessageLevel::Error))
    }
}
