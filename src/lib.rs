//! Core library for the meraki-inventory-report command line application.
//!
//! A run lists every organization visible to the API key, pulls each
//! organization's device inventory from the dashboard API, enriches switches
//! and access points with live telemetry, and renders one workbook per
//! organization plus a combined workbook. HTTP access lives in [`api`], the
//! pure transformations in [`classify`], [`enrich`] and [`layout`], spreadsheet
//! IO under [`io`] and [`merge`], and the orchestration in [`pipeline`].

pub mod api;
pub mod classify;
pub mod config;
pub mod enrich;
pub mod error;
pub mod io;
pub mod layout;
pub mod merge;
pub mod model;
pub mod pipeline;

pub use error::{ReportError, Result};
