pub mod auth;
pub mod config;
pub mod db;
pub mod error;
pub mod gate;
pub mod guard;
pub mod handlers;
pub mod models;
pub mod supabase;
pub mod validation;

pub use db::create_pool;
