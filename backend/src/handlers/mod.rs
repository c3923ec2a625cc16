//! HTTP request handlers

pub mod crop;
pub mod dashboard;
pub mod farm;
pub mod finance;
pub mod health;
pub mod task;
pub mod transaction;
pub mod weather;
