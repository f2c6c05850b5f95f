pub mod category;
pub mod config;
pub mod link;
