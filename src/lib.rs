//! Client-side core of a recruiting pipeline dashboard.
//!
//! - [`gateway`]: typed calls against the remote recruiting service
//! - [`store`]: job posting and applicant snapshot, replaced wholesale on reload
//! - [`selection`]: applicants picked for bulk operations
//! - [`pipeline`]: applicant stages and the drag-and-drop adapter
//! - [`scheduler`]: cancellable timers that poll simulated candidate responses
//! - [`dashboard`]: the state container and every intent a view dispatches

pub mod board;
pub mod cli;
pub mod config;
pub mod dashboard;
pub mod error;
pub mod gateway;
pub mod pipeline;
pub mod scheduler;
pub mod selection;
pub mod store;
pub mod telemetry;
pub mod ui;

pub use dashboard::{ActivePanel, BulkStatusAction, Dashboard, DashboardError, SendReport};
pub use gateway::{Gateway, GatewayError, HttpGateway};
pub use scheduler::{ResponseScheduler, ScheduleConfig};
