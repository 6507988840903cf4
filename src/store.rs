//! Owner Dashboard State Store
//!
//! Uses Leptos reactive_stores for fine-grained reactivity.

use leptos::prelude::*;
use reactive_stores::Store;
use registry_core::domain::{GiftList, Item, ListSummary, ReservationEntry};
use uuid::Uuid;

/// Data shown on the dashboard pages, with field-level reactivity
#[derive(Clone, Debug, Default, Store)]
pub struct RegistryState {
    /// The caller's lists, newest first
    pub lists: Vec<ListSummary>,
    /// The list open on the detail page
    pub current_list: Option<GiftList>,
    /// Items of the open list, newest first
    pub items: Vec<Item>,
    /// Reservations against the open list, newest first
    pub reservations: Vec<ReservationEntry>,
}

/// Type alias for the store
pub type RegistryStore = Store<RegistryState>;

/// Get the store from context
pub fn use_registry_store() -> RegistryStore {
    expect_context::<RegistryStore>()
}

// ========================
// Store Helper Functions
// ========================

pub fn store_set_lists(store: &RegistryStore, lists: Vec<ListSummary>) {
    *store.lists().write() = lists;
}

pub fn store_remove_list(store: &RegistryStore, list_id: Uuid) {
    store.lists().write().retain(|summary| summary.list.id != list_id);
    if store.current_list().read().as_ref().map(|l| l.id) == Some(list_id) {
        store_close_list(store);
    }
}

/// Replace the open list with a freshly loaded one
pub fn store_open_list(store: &RegistryStore, list: GiftList, items: Vec<Item>, reservations: Vec<ReservationEntry>) {
    *store.current_list().write() = Some(list);
    *store.items().write() = items;
    *store.reservations().write() = reservations;
}

pub fn store_close_list(store: &RegistryStore) {
    *store.current_list().write() = None;
    store.items().write().clear();
    store.reservations().write().clear();
}

pub fn store_update_list(store: &RegistryStore, list: GiftList) {
    if let Some(summary) = store.lists().write().iter_mut().find(|s| s.list.id == list.id) {
        summary.list = list.clone();
    }
    *store.current_list().write() = Some(list);
}

/// Newly added items go first, matching the newest-first order
pub fn store_add_item(store: &RegistryStore, item: Item) {
    store.items().write().insert(0, item);
}

pub fn store_update_item(store: &RegistryStore, updated_item: Item) {
    if let Some(item) = store.items().write().iter_mut().find(|item| item.id == updated_item.id) {
        *item = updated_item;
    }
}

pub fn store_remove_item(store: &RegistryStore, item_id: Uuid) {
    store.items().write().retain(|item| item.id != item_id);
}
