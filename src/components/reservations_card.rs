//! Reservations Card Component
//!
//! Owner-only summary of who reserved what on the open list.

use leptos::prelude::*;
use registry_core::domain::ReservationTotals;

use crate::store::{use_registry_store, RegistryStateStoreFields};

#[component]
pub fn ReservationsCard() -> impl IntoView {
    let store = use_registry_store();
    let totals = move || ReservationTotals::of(&store.reservations().read());

    view! {
        <div class="reservations-card">
            <h3>"Reservations"</h3>
            <p class="hint">
                {move || {
                    let t = totals();
                    format!("{} reservation(s), {} unit(s) reserved", t.count, t.quantity)
                }}
            </p>
            <Show
                when=move || !store.reservations().read().is_empty()
                fallback=|| view! { <p class="empty">"No reservations yet."</p> }
            >
                <ul class="reservation-list">
                    <For
                        each=move || store.reservations().get()
                        key=|entry| entry.reservation.id
                        children=move |entry| {
                            let r = entry.reservation;
                            view! {
                                <li class="reservation">
                                    <div class="reservation-head">
                                        <strong>{r.reserver_name}</strong>
                                        <span>{format!("{} × {}", r.quantity, entry.item_name)}</span>
                                    </div>
                                    {r.reserver_email.map(|email| view! { <span class="reservation-email">{email}</span> })}
                                    {r.message.map(|msg| view! { <p class="reservation-message">{msg}</p> })}
                                    <span class="reservation-date">{r.created_at.format("%b %-d, %Y").to_string()}</span>
                                </li>
                            }
                        }
                    />
                </ul>
            </Show>
        </div>
    }
}
