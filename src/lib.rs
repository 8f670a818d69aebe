//! Fleetdesk: a terminal dashboard for tasks, the day calendar and the car fleet

pub mod app;
pub mod config;
pub mod core;
pub mod domain;
pub mod infrastructure;
pub mod input;
pub mod logging;
pub mod modules;
pub mod ui;
