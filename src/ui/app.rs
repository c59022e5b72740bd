//! Main application state and UI logic for the Billow application
//! This module contains the primary egui application state and UI implementation

use std::path::Path;
use std::sync::Arc;

use catppuccin_egui::MOCHA;
use eframe::egui;
use eframe::egui::{FontDefinitions, RichText};

use crate::application::reports::{InvoiceRanking, ProductSales, Reports};
use crate::domain::{
    Invoice, InvoiceDraft, InvoiceId, InvoiceItem, InvoiceStatus, Partner, PartnerDraft,
    PartnerId, Product, ProductDraft, ProductId,
};
use crate::infra::app_config::{self, AppConfig};
use crate::infra::db::Database;
use crate::infra::db::repository::{InvoiceRepository, PartnerRepository, ProductRepository};
use crate::ui::icons;

/// Which screen is active
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum AppView {
    #[default]
    Partners,
    Products,
    Invoices,
    Reports,
}

/// Which report is shown in the Reports view
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReportKind {
    ProductsSold,
    TopSelling,
    TopInvoices,
}

/// Edit buffer for the partner form.
#[derive(Debug, Clone, Default)]
pub struct PartnerForm {
    /// `Some` while an existing partner is being edited.
    pub editing: Option<PartnerId>,
    pub name: String,
    pub tax_id: String,
    pub email: String,
    pub phone: String,
    pub address: String,
}

impl PartnerForm {
    pub fn draft(&self) -> PartnerDraft {
        PartnerDraft {
            name: self.name.trim().to_string(),
            tax_id: self.tax_id.trim().to_string(),
            email: self.email.trim().to_string(),
            phone: self.phone.trim().to_string(),
            address: self.address.trim().to_string(),
        }
    }

    pub fn load(&mut self, partner: &Partner) {
        self.editing = Some(partner.id);
        self.name = partner.name.clone();
        self.tax_id = partner.tax_id.clone();
        self.email = partner.email.clone();
        self.phone = partner.phone.clone();
        self.address = partner.address.clone();
    }

    pub fn clear(&mut self) {
        *self = Self::default();
    }
}

/// Edit buffer for the product form. Price and stock stay text until they
/// pass validation.
#[derive(Debug, Clone, Default)]
pub struct ProductForm {
    pub editing: Option<ProductId>,
    pub sku: String,
    pub name: String,
    pub description: String,
    pub price: String,
    pub stock: String,
}

impl ProductForm {
    /// Build a draft from the buffers. Only valid after
    /// `validate_product_fields` passed.
    pub fn draft(&self) -> ProductDraft {
        ProductDraft {
            sku: self.sku.trim().to_string(),
            name: self.name.trim().to_string(),
            description: self.description.trim().to_string(),
            price: self.price.trim().parse().unwrap_or_default(),
            stock: self.stock.trim().parse().unwrap_or_default(),
        }
    }

    pub fn load(&mut self, product: &Product) {
        self.editing = Some(product.id);
        self.sku = product.sku.clone();
        self.name = product.name.clone();
        self.description = product.description.clone();
        self.price = product.price.to_string();
        self.stock = product.stock.to_string();
    }

    pub fn clear(&mut self) {
        *self = Self::default();
    }
}

/// Edit buffer for the invoice header form.
#[derive(Debug, Clone, Default)]
pub struct InvoiceForm {
    pub editing: Option<InvoiceId>,
    pub partner_id: Option<PartnerId>,
    pub invoice_date: String,
    pub due_date: String,
    pub status: InvoiceStatus,
}

impl InvoiceForm {
    pub fn draft(&self) -> InvoiceDraft {
        let due = self.due_date.trim();
        InvoiceDraft {
            partner_id: self.partner_id.unwrap_or_default(),
            invoice_date: self.invoice_date.trim().to_string(),
            due_date: if due.is_empty() {
                None
            } else {
                Some(due.to_string())
            },
            status: self.status,
        }
    }

    pub fn load(&mut self, invoice: &Invoice) {
        self.editing = Some(invoice.id);
        self.partner_id = Some(invoice.partner_id);
        self.invoice_date = invoice.invoice_date.clone();
        self.due_date = invoice.due_date.clone().unwrap_or_default();
        self.status = invoice.status;
    }

    pub fn clear(&mut self) {
        *self = Self::default();
    }
}

/// Edit buffer for the invoice item form.
#[derive(Debug, Clone, Default)]
pub struct ItemForm {
    pub product_id: Option<ProductId>,
    pub quantity: String,
    /// Optional override; the product price is captured when left empty.
    pub unit_price: String,
}

impl ItemForm {
    pub fn clear(&mut self) {
        *self = Self::default();
    }
}

/// Items referencing a product, shown in a popup from the Products view.
#[derive(Debug, Clone)]
pub struct ProductUsage {
    pub product_id: ProductId,
    pub product_name: String,
    pub items: Vec<InvoiceItem>,
}

/// All app state in one struct
#[derive(Default)]
pub struct AppState {
    pub current_view: AppView,

    /// All partners loaded from the database
    pub partners: Vec<Partner>,
    /// All products loaded from the database
    pub products: Vec<Product>,
    /// Invoices currently shown (possibly filtered by partner)
    pub invoices: Vec<Invoice>,
    /// When set, the Invoices view shows only this partner's invoices
    pub invoice_partner_filter: Option<PartnerId>,
    /// Invoice whose items are shown in the item editor
    pub selected_invoice_id: Option<InvoiceId>,
    /// Items of the selected invoice
    pub invoice_items: Vec<InvoiceItem>,

    pub partner_form: PartnerForm,
    pub product_form: ProductForm,
    pub invoice_form: InvoiceForm,
    pub item_form: ItemForm,

    /// Popup listing invoice items that reference a product
    pub product_usage: Option<ProductUsage>,

    /// Which report is currently rendered, if any
    pub report_kind: Option<ReportKind>,
    pub product_sales: Vec<ProductSales>,
    pub invoice_ranking: Vec<InvoiceRanking>,

    /// Error message from the last failed operation, if any
    pub error: Option<String>,
    /// Confirmation message from the last successful operation, if any
    pub notice: Option<String>,
}

/// Root egui application for Billow
pub struct BillowApp {
    /// Application state containing UI state and loaded records
    pub state: AppState,

    /// Repository for partner operations
    pub partner_repo: Arc<PartnerRepository>,
    /// Repository for product operations
    pub product_repo: Arc<ProductRepository>,
    /// Repository for invoice and item operations
    pub invoice_repo: Arc<InvoiceRepository>,
    /// Report aggregation queries
    pub reports: Arc<Reports>,

    /// Persisted app configuration (last CSV directory)
    pub config: AppConfig,

    /// Database wrapper (kept to maintain the connection during app lifetime)
    pub _db: Database,
}

impl BillowApp {
    pub fn new(cc: &eframe::CreationContext<'_>) -> Self {
        let mut fonts = FontDefinitions::default();
        egui_phosphor::add_to_fonts(&mut fonts, egui_phosphor::Variant::Regular);
        cc.egui_ctx.set_fonts(fonts);

        let db = Database::open().expect("db open");

        let conn = db.connection();
        let partner_repo = Arc::new(PartnerRepository::new(conn.clone()));
        let product_repo = Arc::new(ProductRepository::new(conn.clone()));
        let invoice_repo = Arc::new(InvoiceRepository::new(conn.clone()));
        let reports = Arc::new(Reports::new(conn));

        let config = app_config::load_config();

        let mut app = Self {
            state: AppState::default(),
            partner_repo,
            product_repo,
            invoice_repo,
            reports,
            config,
            _db: db,
        };
        app.sync_all_from_db();
        app
    }

    // --- flash messages ---

    pub fn flash_error(&mut self, message: impl Into<String>) {
        self.state.error = Some(message.into());
        self.state.notice = None;
    }

    pub fn flash_notice(&mut self, message: impl Into<String>) {
        self.state.notice = Some(message.into());
        self.state.error = None;
    }

    // --- database sync ---

    pub fn sync_partners_from_db(&mut self) {
        match self.partner_repo.list_all() {
            Ok(partners) => self.state.partners = partners,
            Err(err) => self.flash_error(format!("Failed to load partners: {err}")),
        }
    }

    pub fn sync_products_from_db(&mut self) {
        match self.product_repo.list_all() {
            Ok(products) => self.state.products = products,
            Err(err) => self.flash_error(format!("Failed to load products: {err}")),
        }
    }

    /// Reload the invoice list (honoring the partner filter) and the items
    /// of the selected invoice.
    pub fn sync_invoices_from_db(&mut self) {
        let result = match self.state.invoice_partner_filter {
            Some(pid) => self.invoice_repo.list_for_partner(pid),
            None => self.invoice_repo.list_all(),
        };
        match result {
            Ok(invoices) => self.state.invoices = invoices,
            Err(err) => {
                self.flash_error(format!("Failed to load invoices: {err}"));
                return;
            }
        }

        // Drop the selection when the invoice fell out of the filtered list
        if let Some(id) = self.state.selected_invoice_id
            && !self.state.invoices.iter().any(|inv| inv.id == id)
        {
            self.state.selected_invoice_id = None;
        }

        match self.state.selected_invoice_id {
            Some(id) => match self.invoice_repo.items_for_invoice(id) {
                Ok(items) => self.state.invoice_items = items,
                Err(err) => self.flash_error(format!("Failed to load invoice items: {err}")),
            },
            None => self.state.invoice_items.clear(),
        }
    }

    pub fn sync_all_from_db(&mut self) {
        self.sync_partners_from_db();
        self.sync_products_from_db();
        self.sync_invoices_from_db();
    }

    // --- navigation ---

    pub fn switch_to(&mut self, view: AppView) {
        self.state.current_view = view;
        match view {
            AppView::Partners => self.sync_partners_from_db(),
            AppView::Products => self.sync_products_from_db(),
            AppView::Invoices => {
                // Pickers need fresh partner/product lists too
                self.sync_all_from_db();
            }
            AppView::Reports => self.refresh_report(),
        }
    }

    /// Jump to the Invoices view showing only the given partner's invoices.
    pub fn show_invoices_for_partner(&mut self, partner_id: PartnerId) {
        self.state.invoice_partner_filter = Some(partner_id);
        self.state.selected_invoice_id = None;
        self.switch_to(AppView::Invoices);
    }

    // --- lookups for display ---

    pub fn partner_name(&self, id: PartnerId) -> String {
        self.state
            .partners
            .iter()
            .find(|p| p.id == id)
            .map(|p| p.name.clone())
            .unwrap_or_else(|| format!("partner {id}"))
    }

    pub fn product_name(&self, id: ProductId) -> String {
        self.state
            .products
            .iter()
            .find(|p| p.id == id)
            .map(|p| p.name.clone())
            .unwrap_or_else(|| format!("product {id}"))
    }

    // --- CSV dialog helpers ---

    /// Directory the next CSV dialog should start in.
    pub fn csv_dialog(&self) -> rfd::FileDialog {
        let mut dialog = rfd::FileDialog::new().add_filter("CSV files", &["csv"]);
        if let Some(dir) = &self.config.last_csv_dir {
            dialog = dialog.set_directory(dir);
        }
        dialog
    }

    /// Remember the directory of a chosen CSV path for the next dialog.
    pub fn remember_csv_dir(&mut self, path: &Path) {
        if let Some(parent) = path.parent() {
            self.config.last_csv_dir = Some(parent.to_string_lossy().to_string());
            if let Err(err) = app_config::save_config(&self.config) {
                log::warn!("failed to save config: {err}");
            }
        }
    }

    // --- header ---

    fn nav_button(&mut self, ui: &mut egui::Ui, icon: &str, label: &str, view: AppView) {
        let color = if self.state.current_view == view {
            MOCHA.mauve
        } else {
            MOCHA.subtext1
        };
        let response = ui.add(
            egui::Button::new(RichText::new(format!("{icon} {label}")).color(color))
                .frame(false)
                .corner_radius(egui::CornerRadius::same(4)),
        );
        if response.clicked() {
            self.switch_to(view);
        }
    }
}

/// Implement the egui application
impl eframe::App for BillowApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        // Set Catppuccin theme
        catppuccin_egui::set_theme(ctx, MOCHA);

        // Top panel with app title and navigation
        egui::TopBottomPanel::top("header").show(ctx, |ui| {
            ui.add_space(8.0);
            ui.horizontal(|ui| {
                ui.add_space(12.0);
                ui.label(
                    RichText::new(icons::VIEW_INVOICES)
                        .size(22.0)
                        .color(MOCHA.mauve),
                );
                ui.add_space(2.0);
                ui.heading(
                    RichText::new("Billow")
                        .strong()
                        .color(MOCHA.text)
                        .size(18.0),
                );

                ui.add_space(20.0);

                self.nav_button(ui, icons::VIEW_PARTNERS, "PARTNERS", AppView::Partners);
                ui.add_space(12.0);
                self.nav_button(ui, icons::VIEW_PRODUCTS, "PRODUCTS", AppView::Products);
                ui.add_space(12.0);
                self.nav_button(ui, icons::VIEW_INVOICES, "INVOICES", AppView::Invoices);
                ui.add_space(12.0);
                self.nav_button(ui, icons::VIEW_REPORTS, "REPORTS", AppView::Reports);
            });
            ui.add_space(8.0);
        });

        // Flash messages for the last operation
        if self.state.error.is_some() || self.state.notice.is_some() {
            egui::TopBottomPanel::bottom("flash").show(ctx, |ui| {
                ui.add_space(4.0);
                ui.horizontal(|ui| {
                    if let Some(error) = self.state.error.clone() {
                        ui.label(
                            RichText::new(format!("{} {error}", icons::ICON_WARNING))
                                .color(MOCHA.red),
                        );
                    } else if let Some(notice) = self.state.notice.clone() {
                        ui.label(
                            RichText::new(format!("{} {notice}", icons::ICON_CHECK))
                                .color(MOCHA.green),
                        );
                    }
                    ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                        if ui.button(icons::ACTION_CLOSE).clicked() {
                            self.state.error = None;
                            self.state.notice = None;
                        }
                    });
                });
                ui.add_space(4.0);
            });
        }

        // main content
        egui::CentralPanel::default().show(ctx, |ui| {
            egui::ScrollArea::vertical()
                .auto_shrink([false; 2])
                .show(ui, |ui| match self.state.current_view {
                    AppView::Partners => {
                        self.ui_partners(ui);
                    }
                    AppView::Products => {
                        self.ui_products(ui);
                    }
                    AppView::Invoices => {
                        self.ui_invoices(ui);
                    }
                    AppView::Reports => {
                        self.ui_reports(ui);
                    }
                });
        });

        // Product usage popup
        self.ui_product_usage_window(ctx);
    }
}
