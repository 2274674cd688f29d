pub mod api;
pub mod config;
pub mod dom_ids;
pub mod error;
pub mod forms;
pub mod listing;
pub mod members;
pub mod models;
pub mod page;
pub mod validation;
pub mod view;
