use eframe::egui;
use egui_extras::{Column, TableBuilder};

use crate::ui::app::{BillowApp, ReportKind};
use crate::ui::components::{Bar, bar_chart};
use crate::ui::{icons, spacing, theme::current_theme};

const CHART_HEIGHT: f32 = 240.0;

impl BillowApp {
    pub fn ui_reports(&mut self, ui: &mut egui::Ui) {
        let theme = current_theme();

        ui.add_space(spacing::SPACING_SM);
        ui.heading(
            egui::RichText::new(format!("{} Reports", icons::VIEW_REPORTS))
                .color(theme.text_primary),
        );
        ui.add_space(spacing::SPACING_SM);

        ui.horizontal(|ui| {
            for (kind, label) in [
                (ReportKind::ProductsSold, "Products sold summary"),
                (ReportKind::TopSelling, "Top 10 best-selling"),
                (ReportKind::TopInvoices, "Top invoices"),
            ] {
                let active = self.state.report_kind == Some(kind);
                let text = if active {
                    egui::RichText::new(label).color(theme.brand)
                } else {
                    egui::RichText::new(label)
                };
                if ui.button(text).clicked() {
                    self.state.report_kind = Some(kind);
                    self.refresh_report();
                }
            }
        });

        ui.add_space(spacing::SPACING_SM);
        ui.separator();

        match self.state.report_kind {
            None => {
                ui.add_space(spacing::SPACING_MD);
                ui.weak("Pick a report above.");
            }
            Some(ReportKind::ProductsSold) | Some(ReportKind::TopSelling) => {
                self.product_sales_report(ui);
            }
            Some(ReportKind::TopInvoices) => {
                self.top_invoices_report(ui);
            }
        }
    }

    /// Re-run the query behind the currently shown report.
    pub fn refresh_report(&mut self) {
        let result = match self.state.report_kind {
            None => return,
            Some(ReportKind::ProductsSold) => self
                .reports
                .product_sales_summary()
                .map(|rows| self.state.product_sales = rows),
            Some(ReportKind::TopSelling) => self
                .reports
                .top_selling_products()
                .map(|rows| self.state.product_sales = rows),
            Some(ReportKind::TopInvoices) => self
                .reports
                .top_invoices()
                .map(|rows| self.state.invoice_ranking = rows),
        };
        if let Err(err) = result {
            self.flash_error(format!("Failed to run report: {err}"));
        }
    }

    fn product_sales_report(&mut self, ui: &mut egui::Ui) {
        let rows = self.state.product_sales.clone();
        if rows.is_empty() {
            ui.add_space(spacing::SPACING_MD);
            ui.weak("No sales data");
            return;
        }

        let bars: Vec<Bar> = rows
            .iter()
            .map(|r| Bar {
                label: r.product.clone(),
                value: r.qty_sold as f64,
            })
            .collect();
        bar_chart(ui, &bars, CHART_HEIGHT);

        ui.add_space(spacing::SPACING_MD);

        TableBuilder::new(ui)
            .id_salt("product_sales_table")
            .striped(true)
            .vscroll(false)
            .column(Column::auto().at_least(180.0))
            .column(Column::auto().at_least(90.0))
            .column(Column::remainder().at_least(90.0))
            .header(20.0, |mut header| {
                for title in ["Product", "Qty sold", "Revenue"] {
                    header.col(|ui| {
                        ui.strong(title);
                    });
                }
            })
            .body(|mut body| {
                for row_data in &rows {
                    body.row(20.0, |mut row| {
                        row.col(|ui| {
                            ui.label(&row_data.product);
                        });
                        row.col(|ui| {
                            ui.label(row_data.qty_sold.to_string());
                        });
                        row.col(|ui| {
                            ui.label(format!("{:.2}", row_data.revenue));
                        });
                    });
                }
            });
    }

    fn top_invoices_report(&mut self, ui: &mut egui::Ui) {
        let rows = self.state.invoice_ranking.clone();
        if rows.is_empty() {
            ui.add_space(spacing::SPACING_MD);
            ui.weak("No invoice data");
            return;
        }

        let bars: Vec<Bar> = rows
            .iter()
            .map(|r| Bar {
                label: format!("#{}", r.invoice_id),
                value: r.total_amount,
            })
            .collect();
        bar_chart(ui, &bars, CHART_HEIGHT);

        ui.add_space(spacing::SPACING_MD);

        TableBuilder::new(ui)
            .id_salt("top_invoices_table")
            .striped(true)
            .vscroll(false)
            .column(Column::auto().at_least(90.0))
            .column(Column::auto().at_least(180.0))
            .column(Column::remainder().at_least(90.0))
            .header(20.0, |mut header| {
                for title in ["Invoice", "Partner", "Total"] {
                    header.col(|ui| {
                        ui.strong(title);
                    });
                }
            })
            .body(|mut body| {
                for row_data in &rows {
                    body.row(20.0, |mut row| {
                        row.col(|ui| {
                            ui.monospace(row_data.invoice_id.to_string());
                        });
                        row.col(|ui| {
                            ui.label(&row_data.partner);
                        });
                        row.col(|ui| {
                            ui.label(format!("{:.2}", row_data.total_amount));
                        });
                    });
                }
            });
    }
}
