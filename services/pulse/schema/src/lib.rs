//! sea-orm entities for the pulse service tables.

pub mod announcements;
pub mod app_config;
pub mod daily_logs;
pub mod resources;
pub mod task_fields;
pub mod tasks;
pub mod users;
pub mod visitor_logs;
