//! UI Components
//!
//! Reusable Leptos components.

mod dashboard_header;
mod delete_confirm_button;
mod edit_list_dialog;
mod form_error;
mod gift_item_card;
mod item_dialog;
mod list_card;
mod list_fields;
mod notifications;
mod public_gift_item;
mod reservations_card;
mod reserve_dialog;
mod share_list_card;
mod theme_picker;

pub use dashboard_header::DashboardHeader;
pub use delete_confirm_button::DeleteConfirmButton;
pub use edit_list_dialog::EditListDialog;
pub use form_error::FormError;
pub use gift_item_card::GiftItemCard;
pub use item_dialog::{ItemDialog, ItemDialogMode};
pub use list_card::ListCard;
pub use list_fields::ListFields;
pub use notifications::Notifications;
pub use public_gift_item::PublicGiftItem;
pub use reservations_card::ReservationsCard;
pub use reserve_dialog::ReserveDialog;
pub use share_list_card::ShareListCard;
pub use theme_picker::ThemePicker;
