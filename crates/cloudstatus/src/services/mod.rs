//! Entity services reading through the shared TTL cache.
//!
//! Each service asks the cache first and, on a miss, fetches through the
//! [`DataAccessLayer`](crate::data_access::DataAccessLayer) and normalizes the
//! result before it is stored.

pub mod component;
pub mod incident;
pub mod status;

pub use component::ComponentService;
pub use incident::IncidentService;
pub use status::StatusService;

pub const OVERALL_STATUS_KEY: &str = "overall-status";
pub const ALL_COMPONENTS_KEY: &str = "all-components";
pub const ALL_INCIDENTS_KEY: &str = "all-incidents";
pub const UNRESOLVED_INCIDENTS_KEY: &str = "unresolved-incidents";
pub const ALL_MAINTENANCES_KEY: &str = "all-maintenances";
pub const ACTIVE_MAINTENANCES_KEY: &str = "active-maintenances";
pub const UPCOMING_MAINTENANCES_KEY: &str = "upcoming-maintenances";
