use eframe::egui;
use egui_extras::{Column, TableBuilder};

use crate::application::export;
use crate::domain::{Invoice, InvoiceId, InvoiceItemId, InvoiceStatus, validate};
use crate::ui::app::BillowApp;
use crate::ui::components::invoice_status_chip;
use crate::ui::{icons, spacing, theme::current_theme};

impl BillowApp {
    pub fn ui_invoices(&mut self, ui: &mut egui::Ui) {
        let theme = current_theme();

        ui.add_space(spacing::SPACING_SM);
        ui.horizontal(|ui| {
            ui.heading(
                egui::RichText::new(format!("{} Invoices", icons::VIEW_INVOICES))
                    .color(theme.text_primary),
            );
            if let Some(pid) = self.state.invoice_partner_filter {
                ui.label(
                    egui::RichText::new(format!("for {}", self.partner_name(pid)))
                        .color(theme.text_muted),
                );
                if ui.small_button("Clear filter").clicked() {
                    self.state.invoice_partner_filter = None;
                    self.sync_invoices_from_db();
                }
            }
            ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                if ui
                    .button(format!("{} Refresh", icons::ACTION_REFRESH))
                    .clicked()
                {
                    self.sync_all_from_db();
                }
                if ui
                    .button(format!("{} Export CSV", icons::ACTION_EXPORT))
                    .clicked()
                {
                    self.export_invoices_dialog();
                }
            });
        });
        ui.add_space(spacing::SPACING_SM);
        ui.separator();

        self.invoice_table(ui);

        ui.add_space(spacing::SPACING_MD);
        ui.separator();
        self.invoice_form(ui);

        if self.state.selected_invoice_id.is_some() {
            ui.add_space(spacing::SPACING_MD);
            ui.separator();
            self.invoice_item_editor(ui);
        }
    }

    fn invoice_table(&mut self, ui: &mut egui::Ui) {
        let theme = current_theme();
        let invoices = self.state.invoices.clone();

        if invoices.is_empty() {
            ui.add_space(spacing::SPACING_MD);
            ui.weak("No invoices yet. Create one below.");
            return;
        }

        let mut to_edit: Option<Invoice> = None;
        let mut to_delete: Option<InvoiceId> = None;
        let mut to_select: Option<InvoiceId> = None;

        TableBuilder::new(ui)
            .id_salt("invoices_table")
            .striped(true)
            .vscroll(false)
            .column(Column::auto())
            .column(Column::auto().at_least(140.0))
            .column(Column::auto().at_least(90.0))
            .column(Column::auto().at_least(90.0))
            .column(Column::auto().at_least(90.0))
            .column(Column::auto().at_least(80.0))
            .column(Column::remainder().at_least(170.0))
            .header(20.0, |mut header| {
                for title in ["ID", "Partner", "Date", "Due", "Status", "Total", ""] {
                    header.col(|ui| {
                        ui.strong(title);
                    });
                }
            })
            .body(|mut body| {
                for invoice in &invoices {
                    let selected = self.state.selected_invoice_id == Some(invoice.id);
                    body.row(24.0, |mut row| {
                        row.col(|ui| {
                            ui.monospace(invoice.id.to_string());
                        });
                        row.col(|ui| {
                            ui.label(self.partner_name(invoice.partner_id));
                        });
                        row.col(|ui| {
                            ui.label(&invoice.invoice_date);
                        });
                        row.col(|ui| {
                            ui.label(invoice.due_date.as_deref().unwrap_or("—"));
                        });
                        row.col(|ui| {
                            invoice_status_chip(ui, invoice.status);
                        });
                        row.col(|ui| {
                            ui.label(format!("{:.2}", invoice.total_amount));
                        });
                        row.col(|ui| {
                            ui.horizontal(|ui| {
                                let items_label = if selected { "Items ✓" } else { "Items" };
                                if ui.small_button(items_label).clicked() {
                                    to_select = Some(invoice.id);
                                }
                                if ui.small_button("Edit").clicked() {
                                    to_edit = Some(invoice.clone());
                                }
                                if ui
                                    .small_button(
                                        egui::RichText::new(icons::ACTION_DELETE)
                                            .color(theme.destructive),
                                    )
                                    .clicked()
                                {
                                    to_delete = Some(invoice.id);
                                }
                            });
                        });
                    });
                }
            });

        if let Some(id) = to_select {
            self.state.selected_invoice_id = Some(id);
            self.state.item_form.clear();
            self.sync_invoices_from_db();
        }
        if let Some(invoice) = to_edit {
            self.state.invoice_form.load(&invoice);
            self.state.selected_invoice_id = Some(invoice.id);
            self.sync_invoices_from_db();
        }
        if let Some(id) = to_delete {
            self.delete_invoice(id);
        }
    }

    fn invoice_form(&mut self, ui: &mut egui::Ui) {
        let editing = self.state.invoice_form.editing;
        ui.strong(if editing.is_some() {
            "Edit invoice"
        } else {
            "New invoice"
        });
        ui.add_space(spacing::SPACING_XS);

        let partners = self.state.partners.clone();

        egui::Grid::new("invoice_form")
            .num_columns(2)
            .spacing([spacing::SPACING_SM, spacing::SPACING_XS])
            .show(ui, |ui| {
                ui.label("Partner:");
                let selected_text = match self.state.invoice_form.partner_id {
                    Some(id) => partners
                        .iter()
                        .find(|p| p.id == id)
                        .map(|p| format!("{} - {}", p.id, p.name))
                        .unwrap_or_else(|| format!("partner {id}")),
                    None => "Select partner".to_string(),
                };
                egui::ComboBox::from_id_salt("invoice_partner")
                    .width(320.0)
                    .selected_text(selected_text)
                    .show_ui(ui, |ui| {
                        for partner in &partners {
                            ui.selectable_value(
                                &mut self.state.invoice_form.partner_id,
                                Some(partner.id),
                                format!("{} - {}", partner.id, partner.name),
                            );
                        }
                    });
                ui.end_row();

                ui.label("Invoice date:");
                ui.add(
                    egui::TextEdit::singleline(&mut self.state.invoice_form.invoice_date)
                        .hint_text("YYYY-MM-DD")
                        .desired_width(160.0),
                );
                ui.end_row();

                ui.label("Due date:");
                ui.add(
                    egui::TextEdit::singleline(&mut self.state.invoice_form.due_date)
                        .hint_text("YYYY-MM-DD (optional)")
                        .desired_width(160.0),
                );
                ui.end_row();

                ui.label("Status:");
                egui::ComboBox::from_id_salt("invoice_status")
                    .width(160.0)
                    .selected_text(self.state.invoice_form.status.to_string())
                    .show_ui(ui, |ui| {
                        for status in InvoiceStatus::ALL {
                            ui.selectable_value(
                                &mut self.state.invoice_form.status,
                                status,
                                status.to_string(),
                            );
                        }
                    });
                ui.end_row();
            });

        ui.add_space(spacing::SPACING_SM);
        ui.horizontal(|ui| {
            let submit_label = if editing.is_some() {
                format!("{} Update invoice", icons::ACTION_SAVE)
            } else {
                format!("{} Add invoice", icons::ACTION_ADD)
            };
            if ui.button(submit_label).clicked() {
                self.submit_invoice_form();
            }
            if ui.button(format!("{} New", icons::ACTION_CLEAR)).clicked() {
                self.state.invoice_form.clear();
            }
        });
    }

    fn submit_invoice_form(&mut self) {
        let draft = self.state.invoice_form.draft();
        let errors = validate::validate_invoice(&draft);
        if !errors.is_empty() {
            self.flash_error(errors.join("; "));
            return;
        }

        let result = match self.state.invoice_form.editing {
            Some(id) => self.invoice_repo.update(id, &draft).map(|_| "Invoice updated"),
            None => self.invoice_repo.create(&draft).map(|_| "Invoice created"),
        };
        match result {
            Ok(message) => {
                self.state.invoice_form.clear();
                self.flash_notice(message);
                self.sync_invoices_from_db();
            }
            Err(err) => self.flash_error(err.to_string()),
        }
    }

    fn delete_invoice(&mut self, id: InvoiceId) {
        match self.invoice_repo.delete(id) {
            Ok(()) => {
                if self.state.selected_invoice_id == Some(id) {
                    self.state.selected_invoice_id = None;
                }
                if self.state.invoice_form.editing == Some(id) {
                    self.state.invoice_form.clear();
                }
                self.flash_notice("Invoice deleted");
                self.sync_invoices_from_db();
            }
            Err(err) => self.flash_error(err.to_string()),
        }
    }

    fn invoice_item_editor(&mut self, ui: &mut egui::Ui) {
        let Some(invoice_id) = self.state.selected_invoice_id else {
            return;
        };
        let theme = current_theme();

        ui.strong(format!("Items of invoice {invoice_id}"));
        ui.add_space(spacing::SPACING_XS);

        let items = self.state.invoice_items.clone();
        let mut to_delete: Option<InvoiceItemId> = None;

        if items.is_empty() {
            ui.weak("No items yet.");
        } else {
            TableBuilder::new(ui)
                .id_salt("invoice_items_table")
                .striped(true)
                .vscroll(false)
                .column(Column::auto())
                .column(Column::auto().at_least(160.0))
                .column(Column::auto().at_least(70.0))
                .column(Column::auto().at_least(80.0))
                .column(Column::auto().at_least(80.0))
                .column(Column::remainder())
                .header(20.0, |mut header| {
                    for title in ["ID", "Product", "Quantity", "Unit price", "Line total", ""] {
                        header.col(|ui| {
                            ui.strong(title);
                        });
                    }
                })
                .body(|mut body| {
                    for item in &items {
                        body.row(22.0, |mut row| {
                            row.col(|ui| {
                                ui.monospace(item.id.to_string());
                            });
                            row.col(|ui| {
                                ui.label(self.product_name(item.product_id));
                            });
                            row.col(|ui| {
                                ui.label(item.quantity.to_string());
                            });
                            row.col(|ui| {
                                ui.label(format!("{:.2}", item.unit_price));
                            });
                            row.col(|ui| {
                                ui.label(format!("{:.2}", item.line_total));
                            });
                            row.col(|ui| {
                                if ui
                                    .small_button(
                                        egui::RichText::new(icons::ACTION_DELETE)
                                            .color(theme.destructive),
                                    )
                                    .clicked()
                                {
                                    to_delete = Some(item.id);
                                }
                            });
                        });
                    }
                });
        }

        if let Some(item_id) = to_delete {
            self.delete_invoice_item(item_id);
        }

        ui.add_space(spacing::SPACING_SM);

        let products = self.state.products.clone();
        ui.horizontal(|ui| {
            ui.label("Product:");
            let selected_text = match self.state.item_form.product_id {
                Some(id) => products
                    .iter()
                    .find(|p| p.id == id)
                    .map(|p| p.picker_label())
                    .unwrap_or_else(|| format!("product {id}")),
                None => "Select product".to_string(),
            };
            egui::ComboBox::from_id_salt("item_product")
                .width(260.0)
                .selected_text(selected_text)
                .show_ui(ui, |ui| {
                    for product in &products {
                        ui.selectable_value(
                            &mut self.state.item_form.product_id,
                            Some(product.id),
                            product.picker_label(),
                        );
                    }
                });

            ui.label("Qty:");
            ui.add(
                egui::TextEdit::singleline(&mut self.state.item_form.quantity)
                    .desired_width(60.0),
            );

            ui.label("Unit price:");
            ui.add(
                egui::TextEdit::singleline(&mut self.state.item_form.unit_price)
                    .hint_text("product price")
                    .desired_width(90.0),
            );

            if ui
                .button(format!("{} Add item", icons::ACTION_ADD))
                .clicked()
            {
                self.submit_item_form(invoice_id);
            }
        });
    }

    fn submit_item_form(&mut self, invoice_id: InvoiceId) {
        let product_id = self.state.item_form.product_id.unwrap_or_default();
        let quantity = match self.state.item_form.quantity.trim().parse::<i64>() {
            Ok(q) => q,
            Err(_) => {
                self.flash_error("quantity must be a positive integer");
                return;
            }
        };
        let errors = validate::validate_invoice_item(product_id, quantity);
        if !errors.is_empty() {
            self.flash_error(errors.join("; "));
            return;
        }

        let unit_price = self.state.item_form.unit_price.trim();
        let unit_price = if unit_price.is_empty() {
            None
        } else {
            match unit_price.parse::<f64>() {
                Ok(p) if p >= 0.0 => Some(p),
                _ => {
                    self.flash_error("unit price must be a non-negative number");
                    return;
                }
            }
        };

        match self
            .invoice_repo
            .add_item(invoice_id, product_id, quantity, unit_price)
        {
            Ok(_) => {
                self.state.item_form.clear();
                self.flash_notice("Item added");
                self.sync_invoices_from_db();
            }
            Err(err) => self.flash_error(err.to_string()),
        }
    }

    fn delete_invoice_item(&mut self, item_id: InvoiceItemId) {
        match self.invoice_repo.delete_item(item_id) {
            Ok(()) => {
                self.flash_notice("Item deleted");
                self.sync_invoices_from_db();
            }
            Err(err) => self.flash_error(err.to_string()),
        }
    }

    fn export_invoices_dialog(&mut self) {
        let Some(path) = self.csv_dialog().set_file_name("invoices.csv").save_file() else {
            return;
        };
        self.remember_csv_dir(&path);

        match export::export_invoices_csv(&self.invoice_repo, &path) {
            Ok(written) => {
                self.flash_notice(format!("Exported {written} invoices to {}", path.display()));
            }
            Err(err) => self.flash_error(format!("Export failed: {err}")),
        }
    }
}
