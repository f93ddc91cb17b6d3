pub mod health;
pub mod models;
pub mod qa;
pub mod save;
pub mod search;
