//! # API Facade
//!
//! The API layer is a **thin facade** over the command layer. It is the single
//! entry point for every diskledger operation, whatever UI is driving it.
//!
//! ## Role and Responsibilities
//!
//! - **Dispatches** to the right command function
//! - **Normalizes inputs** (user-typed id prefixes become full ids)
//! - **Returns structured types** (`Result<CmdResult>`)
//!
//! ## What the API Does NOT Do
//!
//! - **Business logic**: that belongs in `commands/*.rs`
//! - **I/O**: no stdout, stderr or prompts
//! - **Presentation**: returns data, not strings
//!
//! ## Intents
//!
//! UIs that prefer messages over method calls send a [`DiskIntent`] to
//! [`DiskApi::dispatch`]. After any intent the UI re-queries the list it is
//! showing; nothing is pushed back to it.
//!
//! ## Generic Over DiskRepository
//!
//! - Production: `DiskApi<Box<dyn DiskRepository>>` (backend picked at runtime)
//! - Testing: `DiskApi<InMemoryStore>`

use crate::commands;
use crate::commands::helpers::{self, Resolved};
use crate::error::Result;
use crate::filter::DiskFilter;
use crate::form::DiskDraft;
use crate::store::DiskRepository;

/// A request coming from a UI.
#[derive(Debug, Clone)]
pub enum DiskIntent {
    /// Create (`id: None`) or replace an existing disk
    Save {
        id: Option<String>,
        draft: DiskDraft,
    },
    Delete {
        id: String,
    },
    Filter(DiskFilter),
    Refresh,
}

pub struct DiskApi<S: DiskRepository> {
    store: S,
}

impl<S: DiskRepository> DiskApi<S> {
    pub fn new(store: S) -> Self {
        Self { store }
    }

    pub fn add_disk(&mut self, draft: DiskDraft) -> Result<CmdResult> {
        commands::add::run(&mut self.store, draft)
    }

    pub fn list_disks(&self, filter: &DiskFilter) -> Result<CmdResult> {
        commands::list::run(&self.store, filter)
    }

    pub fn view_disk(&self, id: &str) -> Result<CmdResult> {
        match self.resolve(id)? {
            Ok(id) => commands::view::run(&self.store, &id),
            Err(result) => Ok(result),
        }
    }

    pub fn update_disk(&mut self, id: &str, draft: DiskDraft) -> Result<CmdResult> {
        match self.resolve(id)? {
            Ok(id) => commands::update::run(&mut self.store, &id, draft),
            Err(result) => Ok(result),
        }
    }

    pub fn delete_disk(&mut self, id: &str) -> Result<CmdResult> {
        match self.resolve(id)? {
            Ok(id) => commands::delete::run(&mut self.store, &id),
            Err(result) => Ok(result),
        }
    }

    pub fn seed(&mut self) -> Result<CmdResult> {
        commands::seed::run(&mut self.store)
    }

    pub fn dispatch(&mut self, intent: DiskIntent) -> Result<CmdResult> {
        tracing::debug!(?intent, "dispatching intent");
        match intent {
            DiskIntent::Save { id: None, draft } => self.add_disk(draft),
            DiskIntent::Save { id: Some(id), draft } => self.update_disk(&id, draft),
            DiskIntent::Delete { id } => self.delete_disk(&id),
            DiskIntent::Filter(filter) => self.list_disks(&filter),
            DiskIntent::Refresh => self.list_disks(&DiskFilter::default()),
        }
    }

    /// Full id for `input`, or a result explaining why there is none.
    fn resolve(&self, input: &str) -> Result<std::result::Result<String, CmdResult>> {
        let mut result = CmdResult::default();
        match helpers::resolve_id(&self.store, input)? {
            Resolved::Id(id) => return Ok(Ok(id)),
            Resolved::Ambiguous(ids) => result.add_message(CmdMessage::error(format!(
                "Id '{}' is ambiguous, it matches: {}",
                input,
                ids.join(", ")
            ))),
            Resolved::NotFound => {
                tracing::warn!(id = input, "no disk matches id");
                result.add_message(CmdMessage::warning(format!("Disk not found: {}", input)))
            }
        }
        Ok(Err(result))
    }
}

pub use crate::commands::config::ConfigAction;
pub use crate::commands::{CmdMessage, CmdResult, MessageLevel};
