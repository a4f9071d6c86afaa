/// Experience level bodies.
pub mod experience;
/// Game bodies.
pub mod game;
/// Health and greeting bodies.
pub mod health;
/// Report bodies and filters.
pub mod report;
/// Tip bodies and filters.
pub mod tip;
/// Custom `validator` rules.
pub mod validation;
