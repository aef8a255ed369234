pub mod app_state;
pub mod client;
pub mod config;
pub mod db;
pub mod error;
pub mod handlers_courses;
pub mod handlers_files;
pub mod handlers_links;
pub mod models;
pub mod naming;
pub mod routes;
pub mod schema;
pub mod startup;
pub mod storage;
pub mod views;

#[doc(hidden)]
pub mod test_utils;
