// API Routes Module

pub mod admin;
pub mod events;
pub mod frameworks;
pub mod health;
pub mod notifications;
pub mod organizations;
pub mod people;
pub mod research;
pub mod services;
pub mod stories;
pub mod sync;
