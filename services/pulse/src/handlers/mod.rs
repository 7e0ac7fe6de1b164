pub mod analysis;
pub mod announcement;
pub mod daily_log;
pub mod dashboard;
pub mod field;
pub mod health;
pub mod performance;
pub mod resource;
pub mod session;
pub mod settings;
pub mod stream;
pub mod task;
pub mod user;
pub mod visitor;
