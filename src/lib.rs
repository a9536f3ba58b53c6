pub mod config;
pub mod db;
pub mod errors;
pub mod refpath;
pub mod resolver;
pub mod types;
pub mod web;
