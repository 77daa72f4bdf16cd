//! # Diskledger Architecture
//!
//! Diskledger tracks storage disks: how big they are, what lives on them and
//! how much room is left. It is a **UI-agnostic library** with a CLI client on
//! top; the same core could drive a desktop form, a web page or a bot.
//!
//! ## Layers
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │  CLI Layer (cli/, wired by main.rs)                         │
//! │  - Parses arguments, renders cards, asks for confirmation   │
//! │  - The ONLY place that knows about stdout/stderr/exit codes │
//! └─────────────────────────────────────────────────────────────┘
//!                              │
//!                              ▼
//! ┌─────────────────────────────────────────────────────────────┐
//! │  API Layer (api.rs)                                         │
//! │  - Thin facade over commands, DiskIntent dispatch           │
//! │  - Normalizes inputs (id prefixes → ids)                    │
//! └─────────────────────────────────────────────────────────────┘
//!                              │
//!                              ▼
//! ┌─────────────────────────────────────────────────────────────┐
//! │  Command Layer (commands/*.rs)                              │
//! │  - Validation, repository calls, user-facing messages       │
//! │  - No I/O assumptions whatsoever                            │
//! └─────────────────────────────────────────────────────────────┘
//!                              │
//!                              ▼
//! ┌─────────────────────────────────────────────────────────────┐
//! │  Storage Layer (store/)                                     │
//! │  - DiskRepository trait                                     │
//! │  - InMemoryStore, FileStore, RemoteStore                    │
//! └─────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Derived values
//!
//! A [`model::Disk`] stores only its capacity and contents. Used space, free
//! space, usage percentage and usage level are computed on every call, so
//! they always agree with the current contents.
//!
//! ## Testing Strategy
//!
//! 1. **Commands**: unit tests against `InMemoryStore`. Most tests live here.
//! 2. **Stores**: each backend has its own tests; `tests/repository_contract.rs`
//!    runs the shared contract against all three.
//! 3. **API**: dispatch and id resolution.
//! 4. **CLI**: end to end with `assert_cmd` in `tests/cli.rs`.
//!
//! ## Module Overview
//!
//! - [`api`]: The API facade, entry point for all operations
//! - [`commands`]: Business logic for each command
//! - [`store`]: Storage abstraction and implementations
//! - [`model`]: `Disk`, `ContentItem`, `UsageLevel`
//! - [`filter`]: Name / content / free space filtering
//! - [`form`]: Parsing and validating user input
//! - [`config`]: Configuration management
//! - [`init`]: Data directory and backend selection
//! - [`error`]: Error types

pub mod api;
pub mod commands;
pub mod config;
pub mod error;
pub mod filter;
pub mod form;
pub mod init;
pub mod model;
pub mod store;
