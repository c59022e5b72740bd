//! Theme definitions for Billow
//!
//! This module provides semantic color names built on top of the Catppuccin Mocha palette
//! for consistent and accessible theming throughout the application.

use catppuccin_egui::MOCHA;
use eframe::egui;

#[derive(Debug, Clone, Copy)]
pub struct Theme {
    pub bg_primary: egui::Color32,
    pub text_primary: egui::Color32,

    pub bg_secondary: egui::Color32,
    pub text_secondary: egui::Color32,

    pub bg_card: egui::Color32,

    pub text_muted: egui::Color32,
    pub text_disabled: egui::Color32,

    pub brand: egui::Color32,

    // InvoiceStatus
    pub status_draft: egui::Color32,
    pub status_sent: egui::Color32,
    pub status_paid: egui::Color32,
    pub status_cancelled: egui::Color32,

    pub success: egui::Color32,
    pub warning: egui::Color32,
    pub destructive: egui::Color32,
    pub accent: egui::Color32,

    pub border: egui::Color32,
    pub border_secondary: egui::Color32,
}

impl Theme {
    /// Creates a new theme based on the Catppuccin Mocha palette
    pub fn mocha() -> Self {
        Self {
            bg_primary: MOCHA.base,
            text_primary: egui::Color32::from_rgb(230, 233, 239),

            bg_secondary: MOCHA.mantle,
            text_secondary: egui::Color32::from_rgb(186, 194, 222),

            bg_card: MOCHA.mantle,

            text_muted: MOCHA.subtext0,
            text_disabled: MOCHA.overlay1,

            brand: MOCHA.mauve,

            status_draft: MOCHA.subtext0,
            status_sent: MOCHA.blue,
            status_paid: MOCHA.green,
            status_cancelled: MOCHA.red,

            success: MOCHA.green,
            warning: MOCHA.yellow,
            destructive: MOCHA.red,
            accent: MOCHA.blue,

            border: MOCHA.surface1,
            border_secondary: MOCHA.surface0,
        }
    }

    /// Gets the theme based on current application settings
    pub fn current() -> Self {
        Self::mocha()
    }

    /// Color for an invoice status label.
    pub fn status_color(&self, status: crate::domain::InvoiceStatus) -> egui::Color32 {
        use crate::domain::InvoiceStatus::*;
        match status {
            Draft => self.status_draft,
            Sent => self.status_sent,
            Paid => self.status_paid,
            Cancelled => self.status_cancelled,
        }
    }
}

/// Global accessor for the current theme
pub fn current_theme() -> Theme {
    Theme::current()
}
