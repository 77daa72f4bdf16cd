//! # CLI Behavior
//!
//! This is **one possible UI client** for diskledger, not the application
//! itself. It plays the part of a form plus a list of cards:
//!
//! - `add` / `update` are the form. Raw text goes through
//!   [`diskledger::form`], so a bad capacity or an oversized item is reported
//!   before anything is stored.
//! - `list` (also what a bare `diskledger` runs) shows the cards, optionally
//!   filtered by name, content and minimum free space.
//! - `delete` asks before removing unless `--yes` is given.
//!
//! Ids can be shortened to any unique prefix.
//!
//! Logging goes to stderr and is quiet by default. `-v` enables debug output
//! for diskledger, `RUST_LOG` takes over completely when set, and
//! `LOG_FORMAT=json` switches to JSON lines.

mod commands;
mod render;
mod setup;

pub use commands::run;
