pub mod db;
pub mod feed;
pub mod http;
pub mod identity;
