//! Centralized icon registry for Billow.
//!
//! All UI components should use these constants instead of directly
//! referencing `egui_phosphor` to ensure visual consistency.

use egui_phosphor::regular::{self as icons};

// --- Navigation & Views ---

pub const VIEW_PARTNERS: &str = icons::USERS;
pub const VIEW_PRODUCTS: &str = icons::PACKAGE;
pub const VIEW_INVOICES: &str = icons::RECEIPT;
pub const VIEW_REPORTS: &str = icons::CHART_BAR;

// --- Invoice Status ---

pub const STATUS_DRAFT: &str = icons::PENCIL_SIMPLE;
pub const STATUS_SENT: &str = icons::PAPER_PLANE_RIGHT;
pub const STATUS_PAID: &str = icons::CHECK_CIRCLE;
pub const STATUS_CANCELLED: &str = icons::X_CIRCLE;

// --- Common Actions ---

pub const ACTION_ADD: &str = icons::PLUS;
pub const ACTION_SAVE: &str = icons::FLOPPY_DISK;
pub const ACTION_DELETE: &str = icons::TRASH_SIMPLE;
pub const ACTION_REFRESH: &str = icons::ARROW_CLOCKWISE;
pub const ACTION_IMPORT: &str = icons::DOWNLOAD_SIMPLE;
pub const ACTION_EXPORT: &str = icons::EXPORT;
pub const ACTION_CLOSE: &str = icons::X;
pub const ACTION_CLEAR: &str = icons::ERASER;

// --- Symbols ---

pub const ICON_CHECK: &str = icons::CHECK_CIRCLE;
pub const ICON_WARNING: &str = icons::WARNING;
pub const ICON_EMPTY: &str = icons::BOUNDING_BOX;
pub const ICON_LINK: &str = icons::ARROW_SQUARE_OUT;
