pub mod api;
pub mod chat;
pub mod common;
pub mod feeds;
pub mod health;
pub mod profile;
pub mod travel;
