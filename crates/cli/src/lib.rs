//! # PAS CLI
//!
//! Terminal front-end for the patient administration API.
//!
//! - `client`: HTTP calls against the REST API
//! - `commands`: the `pas` command line and what each command does
//! - `state`: per-fetch load state
//! - `view`: search, sort and paging over the fetched list
//! - `export`: date-filtered spreadsheet export

pub mod client;
pub mod commands;
pub mod export;
pub mod state;
pub mod view;
