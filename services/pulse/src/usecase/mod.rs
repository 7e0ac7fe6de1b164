pub mod analysis;
pub mod announcement;
pub mod daily_log;
pub mod field;
pub mod optimistic;
pub mod performance;
pub mod resource;
pub mod role;
pub mod session;
pub mod settings;
pub mod task;
pub mod user;
pub mod visitor;
