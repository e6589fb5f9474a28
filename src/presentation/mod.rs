//! Askama view models and template bindings.

pub mod views;
