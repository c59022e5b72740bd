//! UI layer - egui components and views

pub mod app;
pub mod components;
pub mod icons;
pub mod spacing;
pub mod theme;
pub mod views;
