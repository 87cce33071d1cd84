//! Request handlers

pub mod health;
pub mod merchants;
pub mod orders;
pub mod payments;
