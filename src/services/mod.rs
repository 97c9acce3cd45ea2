//! Business logic layer for Fundwatch
//!
//! Services sit between the CLI/TUI front ends and the data models:
//! expiry resolution, analysis computation, and the session orchestrator.

pub mod analysis;
pub mod expiry;
pub mod session;

pub use analysis::{build_analysis, monthly_personnel_cost, total_balance, SessionInputs};
pub use expiry::get_appropriation_expiry_date;
pub use session::{ChatStatus, PendingTurn, Session, MISSING_CONTEXT_REPLY};
