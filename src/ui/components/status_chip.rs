use catppuccin_egui::MOCHA;
use eframe::egui;

use crate::domain::InvoiceStatus;
use crate::ui::{icons, theme::current_theme};

fn status_icon(status: InvoiceStatus) -> &'static str {
    match status {
        InvoiceStatus::Draft => icons::STATUS_DRAFT,
        InvoiceStatus::Sent => icons::STATUS_SENT,
        InvoiceStatus::Paid => icons::STATUS_PAID,
        InvoiceStatus::Cancelled => icons::STATUS_CANCELLED,
    }
}

/// Small rounded chip showing an invoice status with its icon and color.
pub fn invoice_status_chip(ui: &mut egui::Ui, status: InvoiceStatus) -> egui::Response {
    let tint = current_theme().status_color(status);

    let text = egui::RichText::new(format!("{} {}", status_icon(status), status))
        .size(10.0)
        .color(tint);

    let old_padding = ui.spacing().button_padding;
    ui.spacing_mut().button_padding = egui::vec2(8.0, 4.0);

    let resp = ui.add(
        egui::Button::new(text)
            .fill(tint.gamma_multiply(0.18))
            .stroke(egui::Stroke::new(1.0, MOCHA.surface2))
            .corner_radius(egui::CornerRadius::same(255))
            .min_size(egui::vec2(0.0, 20.0))
            .sense(egui::Sense::hover()),
    );

    ui.spacing_mut().button_padding = old_padding;
    resp
}
