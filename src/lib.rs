//! Fundwatch - appropriation burn-rate dashboard
//!
//! This library provides the core of a single-page financial dashboard:
//! appropriation balances and expiry dates, a simple months-of-burn metric,
//! and a pass-through chat to a hosted AI generation endpoint. Session data
//! (balances, analysis, transcript, credential) is never persisted.
//!
//! # Architecture
//!
//! The crate is organized into the following modules:
//!
//! - `config`: Preference file and path management
//! - `error`: Custom error types
//! - `models`: Money, appropriation codes, analysis context, chat transcript
//! - `calendar`: Federal holiday table and working-day counter
//! - `services`: Expiry resolver, analysis builder, session orchestrator
//! - `ai`: Prompt assembly and the blocking generation client
//! - `display`: Plain-text output for the CLI
//! - `cli`: One-shot command handlers
//! - `tui`: The interactive dashboard
//!
//! # Example
//!
//! ```rust
//! use chrono::NaiveDate;
//! use fundwatch::models::{ApiCredential, AppropriationCode, Money};
//! use fundwatch::services::{Session, SessionInputs};
//!
//! let inputs = SessionInputs::new(
//!     17,
//!     Money::from_cents(14136),
//!     2025,
//!     NaiveDate::from_ymd_opt(2025, 3, 14).unwrap(),
//! )
//! .with_balance(AppropriationCode::Omn, Money::from_cents(150_000_000));
//!
//! let mut session = Session::new(inputs, ApiCredential::default(), false);
//! let context = session.calculate().unwrap();
//! assert_eq!(context.months_of_burn().to_string(), "3.6");
//! ```

pub mod ai;
pub mod calendar;
pub mod cli;
pub mod config;
pub mod display;
pub mod error;
pub mod models;
pub mod services;
pub mod tui;

pub use error::FundError;
