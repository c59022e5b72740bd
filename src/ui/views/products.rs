use eframe::egui;
use egui_extras::{Column, TableBuilder};

use crate::application::{export, import};
use crate::domain::{Product, ProductId, validate};
use crate::ui::app::{BillowApp, ProductUsage};
use crate::ui::{icons, spacing, theme::current_theme};

impl BillowApp {
    pub fn ui_products(&mut self, ui: &mut egui::Ui) {
        let theme = current_theme();

        ui.add_space(spacing::SPACING_SM);
        ui.horizontal(|ui| {
            ui.heading(
                egui::RichText::new(format!("{} Products", icons::VIEW_PRODUCTS))
                    .color(theme.text_primary),
            );
            ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                if ui
                    .button(format!("{} Refresh", icons::ACTION_REFRESH))
                    .clicked()
                {
                    self.sync_products_from_db();
                }
                if ui
                    .button(format!("{} Export CSV", icons::ACTION_EXPORT))
                    .clicked()
                {
                    self.export_products_dialog();
                }
                if ui
                    .button(format!("{} Import CSV", icons::ACTION_IMPORT))
                    .clicked()
                {
                    self.import_products_dialog();
                }
            });
        });
        ui.add_space(spacing::SPACING_SM);
        ui.separator();

        self.product_table(ui);

        ui.add_space(spacing::SPACING_MD);
        ui.separator();
        self.product_form(ui);
    }

    fn product_table(&mut self, ui: &mut egui::Ui) {
        let theme = current_theme();
        let products = self.state.products.clone();

        if products.is_empty() {
            ui.add_space(spacing::SPACING_MD);
            ui.weak("No products yet. Add one below or import a CSV.");
            return;
        }

        let mut to_edit: Option<Product> = None;
        let mut to_delete: Option<ProductId> = None;
        let mut to_usage: Option<ProductId> = None;

        TableBuilder::new(ui)
            .id_salt("products_table")
            .striped(true)
            .vscroll(false)
            .column(Column::auto())
            .column(Column::auto().at_least(90.0))
            .column(Column::auto().at_least(140.0))
            .column(Column::remainder())
            .column(Column::auto().at_least(70.0))
            .column(Column::auto().at_least(60.0))
            .column(Column::auto().at_least(160.0))
            .header(20.0, |mut header| {
                for title in ["ID", "SKU", "Name", "Description", "Price", "Stock", ""] {
                    header.col(|ui| {
                        ui.strong(title);
                    });
                }
            })
            .body(|mut body| {
                for product in &products {
                    body.row(22.0, |mut row| {
                        row.col(|ui| {
                            ui.monospace(product.id.to_string());
                        });
                        row.col(|ui| {
                            ui.monospace(&product.sku);
                        });
                        row.col(|ui| {
                            ui.label(&product.name);
                        });
                        row.col(|ui| {
                            ui.label(&product.description);
                        });
                        row.col(|ui| {
                            ui.label(format!("{:.2}", product.price));
                        });
                        row.col(|ui| {
                            ui.label(product.stock.to_string());
                        });
                        row.col(|ui| {
                            ui.horizontal(|ui| {
                                if ui.small_button("Edit").clicked() {
                                    to_edit = Some(product.clone());
                                }
                                if ui.small_button("Usage").clicked() {
                                    to_usage = Some(product.id);
                                }
                                if ui
                                    .small_button(
                                        egui::RichText::new(icons::ACTION_DELETE)
                                            .color(theme.destructive),
                                    )
                                    .clicked()
                                {
                                    to_delete = Some(product.id);
                                }
                            });
                        });
                    });
                }
            });

        if let Some(product) = to_edit {
            self.state.product_form.load(&product);
        }
        if let Some(id) = to_usage {
            self.open_product_usage(id);
        }
        if let Some(id) = to_delete {
            self.delete_product(id);
        }
    }

    fn product_form(&mut self, ui: &mut egui::Ui) {
        let editing = self.state.product_form.editing;
        ui.strong(if editing.is_some() {
            "Edit product"
        } else {
            "New product"
        });
        ui.add_space(spacing::SPACING_XS);

        egui::Grid::new("product_form")
            .num_columns(2)
            .spacing([spacing::SPACING_SM, spacing::SPACING_XS])
            .show(ui, |ui| {
                ui.label("SKU:");
                ui.add(
                    egui::TextEdit::singleline(&mut self.state.product_form.sku)
                        .desired_width(320.0),
                );
                ui.end_row();

                ui.label("Name:");
                ui.add(
                    egui::TextEdit::singleline(&mut self.state.product_form.name)
                        .desired_width(320.0),
                );
                ui.end_row();

                ui.label("Description:");
                ui.add(
                    egui::TextEdit::singleline(&mut self.state.product_form.description)
                        .desired_width(320.0),
                );
                ui.end_row();

                ui.label("Price:");
                ui.add(
                    egui::TextEdit::singleline(&mut self.state.product_form.price)
                        .hint_text("0.00")
                        .desired_width(120.0),
                );
                ui.end_row();

                ui.label("Stock:");
                ui.add(
                    egui::TextEdit::singleline(&mut self.state.product_form.stock)
                        .hint_text("0")
                        .desired_width(120.0),
                );
                ui.end_row();
            });

        ui.add_space(spacing::SPACING_SM);
        ui.horizontal(|ui| {
            let submit_label = if editing.is_some() {
                format!("{} Save update", icons::ACTION_SAVE)
            } else {
                format!("{} Add", icons::ACTION_ADD)
            };
            if ui.button(submit_label).clicked() {
                self.submit_product_form();
            }
            if ui
                .button(format!("{} Clear", icons::ACTION_CLEAR))
                .clicked()
            {
                self.state.product_form.clear();
            }
        });
    }

    fn submit_product_form(&mut self) {
        let form = &self.state.product_form;
        let errors = validate::validate_product_fields(
            &form.sku,
            &form.name,
            &form.description,
            &form.price,
            &form.stock,
        );
        if !errors.is_empty() {
            self.flash_error(errors.join("; "));
            return;
        }

        let draft = self.state.product_form.draft();
        let result = match self.state.product_form.editing {
            Some(id) => self.product_repo.update(id, &draft).map(|_| "Product updated"),
            None => self.product_repo.create(&draft).map(|_| "Product added"),
        };
        match result {
            Ok(message) => {
                self.state.product_form.clear();
                self.flash_notice(message);
                self.sync_products_from_db();
            }
            Err(err) => self.flash_error(err.to_string()),
        }
    }

    fn delete_product(&mut self, id: ProductId) {
        match self.product_repo.delete(id) {
            Ok(()) => {
                if self.state.product_form.editing == Some(id) {
                    self.state.product_form.clear();
                }
                self.flash_notice("Product deleted");
                self.sync_products_from_db();
            }
            Err(err) => self.flash_error(err.to_string()),
        }
    }

    fn open_product_usage(&mut self, id: ProductId) {
        match self.invoice_repo.items_for_product(id) {
            Ok(items) => {
                self.state.product_usage = Some(ProductUsage {
                    product_id: id,
                    product_name: self.product_name(id),
                    items,
                });
            }
            Err(err) => self.flash_error(format!("Failed to load product usage: {err}")),
        }
    }

    /// Popup window listing the invoice items that reference a product.
    pub fn ui_product_usage_window(&mut self, ctx: &egui::Context) {
        let Some(usage) = self.state.product_usage.clone() else {
            return;
        };

        let mut open = true;
        egui::Window::new(format!("Invoices with {}", usage.product_name))
            .open(&mut open)
            .collapsible(false)
            .resizable(true)
            .show(ctx, |ui| {
                if usage.items.is_empty() {
                    ui.weak("No invoice references this product.");
                    return;
                }
                TableBuilder::new(ui)
                    .id_salt("product_usage_table")
                    .striped(true)
                    .column(Column::auto().at_least(80.0))
                    .column(Column::auto().at_least(70.0))
                    .column(Column::auto().at_least(80.0))
                    .column(Column::auto().at_least(80.0))
                    .header(20.0, |mut header| {
                        for title in ["Invoice", "Quantity", "Unit price", "Line total"] {
                            header.col(|ui| {
                                ui.strong(title);
                            });
                        }
                    })
                    .body(|mut body| {
                        for item in &usage.items {
                            body.row(20.0, |mut row| {
                                row.col(|ui| {
                                    ui.monospace(item.invoice_id.to_string());
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
                            });
                        }
                    });
            });

        if !open {
            self.state.product_usage = None;
        }
    }

    fn import_products_dialog(&mut self) {
        let Some(path) = self.csv_dialog().pick_file() else {
            return;
        };
        self.remember_csv_dir(&path);

        match import::import_products_csv(&self.product_repo, &path) {
            Ok(report) => {
                self.sync_products_from_db();
                if report.errors.is_empty() {
                    self.flash_notice(report.summary());
                } else {
                    let mut message = report.summary();
                    for error in report.errors.iter().take(5) {
                        message.push_str("\n");
                        message.push_str(error);
                    }
                    self.flash_error(message);
                }
            }
            Err(err) => self.flash_error(format!("Import failed: {err}")),
        }
    }

    fn export_products_dialog(&mut self) {
        let Some(path) = self.csv_dialog().set_file_name("products.csv").save_file() else {
            return;
        };
        self.remember_csv_dir(&path);

        match export::export_products_csv(&self.product_repo, &path) {
            Ok(written) => {
                self.flash_notice(format!("Exported {written} products to {}", path.display()));
            }
            Err(err) => self.flash_error(format!("Export failed: {err}")),
        }
    }
}
