use eframe::egui;
use egui_extras::{Column, TableBuilder};

use crate::application::{export, import};
use crate::domain::{Partner, PartnerId, validate};
use crate::ui::app::BillowApp;
use crate::ui::{icons, spacing, theme::current_theme};

impl BillowApp {
    pub fn ui_partners(&mut self, ui: &mut egui::Ui) {
        let theme = current_theme();

        ui.add_space(spacing::SPACING_SM);
        ui.horizontal(|ui| {
            ui.heading(
                egui::RichText::new(format!("{} Partners", icons::VIEW_PARTNERS))
                    .color(theme.text_primary),
            );
            ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                if ui
                    .button(format!("{} Refresh", icons::ACTION_REFRESH))
                    .clicked()
                {
                    self.sync_partners_from_db();
                }
                if ui
                    .button(format!("{} Export CSV", icons::ACTION_EXPORT))
                    .clicked()
                {
                    self.export_partners_dialog();
                }
                if ui
                    .button(format!("{} Import CSV", icons::ACTION_IMPORT))
                    .clicked()
                {
                    self.import_partners_dialog();
                }
            });
        });
        ui.add_space(spacing::SPACING_SM);
        ui.separator();

        self.partner_table(ui);

        ui.add_space(spacing::SPACING_MD);
        ui.separator();
        self.partner_form(ui);
    }

    fn partner_table(&mut self, ui: &mut egui::Ui) {
        let theme = current_theme();
        let partners = self.state.partners.clone();

        if partners.is_empty() {
            ui.add_space(spacing::SPACING_MD);
            ui.weak("No partners yet. Add one below or import a CSV.");
            return;
        }

        let mut to_edit: Option<Partner> = None;
        let mut to_delete: Option<PartnerId> = None;
        let mut to_view: Option<PartnerId> = None;

        TableBuilder::new(ui)
            .id_salt("partners_table")
            .striped(true)
            .vscroll(false)
            .column(Column::auto())
            .column(Column::auto().at_least(140.0))
            .column(Column::auto().at_least(100.0))
            .column(Column::auto().at_least(160.0))
            .column(Column::auto().at_least(110.0))
            .column(Column::remainder())
            .column(Column::auto().at_least(170.0))
            .header(20.0, |mut header| {
                for title in ["ID", "Name", "Tax ID", "Email", "Phone", "Address", ""] {
                    header.col(|ui| {
                        ui.strong(title);
                    });
                }
            })
            .body(|mut body| {
                for partner in &partners {
                    body.row(22.0, |mut row| {
                        row.col(|ui| {
                            ui.monospace(partner.id.to_string());
                        });
                        row.col(|ui| {
                            ui.label(&partner.name);
                        });
                        row.col(|ui| {
                            ui.label(&partner.tax_id);
                        });
                        row.col(|ui| {
                            ui.label(&partner.email);
                        });
                        row.col(|ui| {
                            ui.label(&partner.phone);
                        });
                        row.col(|ui| {
                            ui.label(&partner.address);
                        });
                        row.col(|ui| {
                            ui.horizontal(|ui| {
                                if ui.small_button("Edit").clicked() {
                                    to_edit = Some(partner.clone());
                                }
                                if ui.small_button("Invoices").clicked() {
                                    to_view = Some(partner.id);
                                }
                                if ui
                                    .small_button(
                                        egui::RichText::new(icons::ACTION_DELETE)
                                            .color(theme.destructive),
                                    )
                                    .clicked()
                                {
                                    to_delete = Some(partner.id);
                                }
                            });
                        });
                    });
                }
            });

        if let Some(partner) = to_edit {
            self.state.partner_form.load(&partner);
        }
        if let Some(id) = to_view {
            self.show_invoices_for_partner(id);
        }
        if let Some(id) = to_delete {
            self.delete_partner(id);
        }
    }

    fn partner_form(&mut self, ui: &mut egui::Ui) {
        let editing = self.state.partner_form.editing;
        ui.strong(if editing.is_some() {
            "Edit partner"
        } else {
            "New partner"
        });
        ui.add_space(spacing::SPACING_XS);

        egui::Grid::new("partner_form")
            .num_columns(2)
            .spacing([spacing::SPACING_SM, spacing::SPACING_XS])
            .show(ui, |ui| {
                ui.label("Name:");
                ui.add(
                    egui::TextEdit::singleline(&mut self.state.partner_form.name)
                        .desired_width(320.0),
                );
                ui.end_row();

                ui.label("Tax ID:");
                ui.add(
                    egui::TextEdit::singleline(&mut self.state.partner_form.tax_id)
                        .desired_width(320.0),
                );
                ui.end_row();

                ui.label("Email:");
                ui.add(
                    egui::TextEdit::singleline(&mut self.state.partner_form.email)
                        .hint_text("name@company.example")
                        .desired_width(320.0),
                );
                ui.end_row();

                ui.label("Phone:");
                ui.add(
                    egui::TextEdit::singleline(&mut self.state.partner_form.phone)
                        .desired_width(320.0),
                );
                ui.end_row();

                ui.label("Address:");
                ui.add(
                    egui::TextEdit::singleline(&mut self.state.partner_form.address)
                        .desired_width(320.0),
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
                self.submit_partner_form();
            }
            if ui
                .button(format!("{} Clear", icons::ACTION_CLEAR))
                .clicked()
            {
                self.state.partner_form.clear();
            }
        });
    }

    fn submit_partner_form(&mut self) {
        let draft = self.state.partner_form.draft();
        let errors = validate::validate_partner(&draft);
        if !errors.is_empty() {
            self.flash_error(errors.join("; "));
            return;
        }

        let result = match self.state.partner_form.editing {
            Some(id) => self.partner_repo.update(id, &draft).map(|_| "Partner updated"),
            None => self.partner_repo.create(&draft).map(|_| "Partner added"),
        };
        match result {
            Ok(message) => {
                self.state.partner_form.clear();
                self.flash_notice(message);
                self.sync_partners_from_db();
            }
            Err(err) => self.flash_error(err.to_string()),
        }
    }

    fn delete_partner(&mut self, id: PartnerId) {
        match self.partner_repo.delete(id) {
            Ok(()) => {
                if self.state.partner_form.editing == Some(id) {
                    self.state.partner_form.clear();
                }
                self.flash_notice("Partner deleted");
                self.sync_partners_from_db();
            }
            Err(err) => self.flash_error(err.to_string()),
        }
    }

    fn import_partners_dialog(&mut self) {
        let Some(path) = self.csv_dialog().pick_file() else {
            return;
        };
        self.remember_csv_dir(&path);

        match import::import_partners_csv(&self.partner_repo, &path) {
            Ok(report) => {
                self.sync_partners_from_db();
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

    fn export_partners_dialog(&mut self) {
        let Some(path) = self.csv_dialog().set_file_name("partners.csv").save_file() else {
            return;
        };
        self.remember_csv_dir(&path);

        match export::export_partners_csv(&self.partner_repo, &path) {
            Ok(written) => {
                self.flash_notice(format!("Exported {written} partners to {}", path.display()));
            }
            Err(err) => self.flash_error(format!("Export failed: {err}")),
        }
    }
}
