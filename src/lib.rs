//! Quincena - Personal budgeting for quincenal pay cycles
//!
//! This library implements a single-user budgeting system built around the
//! Dominican quincenal pay schedule (two pay periods per month), with an
//! optional monthly mode. The heart of the crate is the period resolver,
//! which turns `(year, month, cycle)` into concrete calendar dates, and the
//! dashboard aggregator, which answers "how much money do I actually have
//! left this period?".
//!
//! # Architecture
//!
//! - `config`: Paths and application settings
//! - `error`: Custom error types
//! - `models`: Core data models (expenses, loans, savings, periods, ...)
//! - `storage`: JSON file storage layer
//! - `services`: Business logic (period resolution, dashboard, CRUD)
//! - `reports`: Flat report structures
//! - `display`: Terminal renderers
//! - `export`: CSV export
//! - `backup`: Rolling backups with retention
//! - `cli`: clap command handlers
//!
//! # Example
//!
//! ```rust,ignore
//! use quincena::config::paths::QuincenaPaths;
//! use quincena::storage::Storage;
//! use quincena::services::DashboardService;
//!
//! let paths = QuincenaPaths::new()?;
//! let storage = Storage::new(paths)?;
//! storage.load_all()?;
//!
//! let today = chrono::Local::now().date_naive();
//! let snapshot = DashboardService::new(&storage).current(today)?;
//! println!("Available: {}", snapshot.available_money);
//! ```

pub mod backup;
pub mod cli;
pub mod config;
pub mod display;
pub mod error;
pub mod export;
pub mod models;
pub mod reports;
pub mod services;
pub mod storage;

pub use error::{QuincenaError, QuincenaResult};
