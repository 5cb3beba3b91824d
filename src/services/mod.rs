// Service module exports

pub mod clock;
pub mod config;
pub mod countdown;
pub mod database;
pub mod entry;
pub mod notification;
pub mod permission;
pub mod settings;
