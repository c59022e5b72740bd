//! Painter-drawn bar chart used by the report views.

use eframe::egui;

use crate::ui::theme::current_theme;

/// One bar: a label on the x axis and a non-negative value.
#[derive(Debug, Clone)]
pub struct Bar {
    pub label: String,
    pub value: f64,
}

const VALUE_STRIP: f32 = 14.0;
const LABEL_STRIP: f32 = 16.0;

fn format_value(v: f64) -> String {
    if (v - v.round()).abs() < 1e-9 {
        format!("{}", v.round() as i64)
    } else {
        format!("{v:.2}")
    }
}

fn truncate_label(label: &str, max_chars: usize) -> String {
    if label.chars().count() <= max_chars {
        return label.to_string();
    }
    let mut out: String = label.chars().take(max_chars.saturating_sub(1)).collect();
    out.push('…');
    out
}

/// Draw a vertical bar chart filling the available width.
pub fn bar_chart(ui: &mut egui::Ui, bars: &[Bar], height: f32) {
    let theme = current_theme();

    if bars.is_empty() {
        ui.weak("No data");
        return;
    }

    let width = ui.available_width();
    let (rect, _response) =
        ui.allocate_exact_size(egui::vec2(width, height), egui::Sense::hover());
    if !ui.is_rect_visible(rect) {
        return;
    }

    let painter = ui.painter().with_clip_rect(rect);

    let plot = egui::Rect::from_min_max(
        egui::pos2(rect.min.x, rect.min.y + VALUE_STRIP),
        egui::pos2(rect.max.x, rect.max.y - LABEL_STRIP),
    );

    let max_value = bars.iter().map(|b| b.value).fold(0.0_f64, f64::max).max(1e-9);

    let slot = plot.width() / bars.len() as f32;
    let bar_width = (slot * 0.7).max(2.0);
    let label_chars = ((slot / 6.0) as usize).max(3);

    for (i, bar) in bars.iter().enumerate() {
        let center_x = plot.min.x + slot * (i as f32 + 0.5);
        let h = (bar.value / max_value) as f32 * plot.height();
        let bar_rect = egui::Rect::from_min_max(
            egui::pos2(center_x - bar_width / 2.0, plot.max.y - h),
            egui::pos2(center_x + bar_width / 2.0, plot.max.y),
        );
        painter.rect_filled(bar_rect, egui::CornerRadius::same(2), theme.brand);

        painter.text(
            egui::pos2(center_x, bar_rect.min.y - 2.0),
            egui::Align2::CENTER_BOTTOM,
            format_value(bar.value),
            egui::FontId::proportional(10.0),
            theme.text_muted,
        );

        painter.text(
            egui::pos2(center_x, plot.max.y + 2.0),
            egui::Align2::CENTER_TOP,
            truncate_label(&bar.label, label_chars),
            egui::FontId::proportional(10.0),
            theme.text_secondary,
        );
    }

    // Baseline
    painter.line_segment(
        [
            egui::pos2(plot.min.x, plot.max.y),
            egui::pos2(plot.max.x, plot.max.y),
        ],
        egui::Stroke::new(1.0, theme.border),
    );
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_value() {
        assert_eq!(format_value(3.0), "3");
        assert_eq!(format_value(4.5), "4.50");
    }

    #[test]
    fn test_truncate_label() {
        assert_eq!(truncate_label("Widget", 10), "Widget");
        assert_eq!(truncate_label("A very long product name", 8), "A very …");
    }
}
