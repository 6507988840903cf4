//! Reservation Repository
//!
//! Claims availability with a single conditional update inside a
//! transaction, so concurrent visitors cannot jointly overcommit an item.

use async_trait::async_trait;
use chrono::Utc;
use rusqlite::{params, OptionalExtension};
use uuid::Uuid;

use super::db::SharedConnection;
use crate::domain::{DomainError, DomainResult, NewReservation, Reservation, ReservationEntry};
use crate::repository::ReservationRepository;

/// SQLite implementation of the reservation repository
pub struct SqliteReservationRepository {
    conn: SharedConnection,
}

impl SqliteReservationRepository {
    pub(super) fn new(conn: SharedConnection) -> Self {
        Self { conn }
    }
}

#[async_trait(?Send)]
impl ReservationRepository for SqliteReservationRepository {
    async fn reserve(&self, draft: &NewReservation) -> DomainResult<Reservation> {
        if draft.quantity < 1 {
            return Err(DomainError::InvalidInput("Quantity must be at least 1".to_string()));
        }

        let mut conn = self.conn.lock().await;
        let now = Utc::now();

        let tx = conn.transaction()?;

        let claimed = tx.execute(
            "UPDATE gift_items SET reserved_count = reserved_count + ?1, updated_at = ?2
             WHERE id = ?3 AND quantity - reserved_count >= ?1",
            params![draft.quantity, now, draft.item_id],
        )?;

        if claimed == 0 {
            // Dropping the transaction rolls it back
            let remaining: Option<i32> = tx
                .query_row(
                    "SELECT quantity - reserved_count FROM gift_items WHERE id = ?1",
                    params![draft.item_id],
                    |row| row.get(0),
                )
                .optional()?;
            return Err(match remaining {
                None => DomainError::NotFound(format!("Item {}", draft.item_id)),
                Some(left) => DomainError::Conflict(format!("Only {} unit(s) available", left.max(0))),
            });
        }

        let reservation = Reservation::new(draft, now);
        tx.execute(
            "INSERT INTO reservations (id, item_id, reserver_name, reserver_email, quantity, message, created_at)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)",
            params![
                reservation.id,
                reservation.item_id,
                reservation.reserver_name,
                reservation.reserver_email,
                reservation.quantity,
                reservation.message,
                reservation.created_at,
            ],
        )?;
        tx.commit()?;

        log::debug!(
            "Reserved {} unit(s) of item {} for {}",
            reservation.quantity,
            reservation.item_id,
            reservation.reserver_name
        );
        Ok(reservation)
    }

    async fn list_by_list(&self, list_id: Uuid) -> DomainResult<Vec<ReservationEntry>> {
        let conn = self.conn.lock().await;

        let mut stmt = conn.prepare(
            "SELECT r.id, r.item_id, r.reserver_name, r.reserver_email, r.quantity, r.message, r.created_at, i.name
             FROM reservations r
             JOIN gift_items i ON i.id = r.item_id
             WHERE i.list_id = ?1
             ORDER BY r.created_at DESC, r.rowid DESC",
        )?;

        let rows = stmt.query_map(params![list_id], |row| {
            Ok(ReservationEntry {
                reservation: Reservation {
                    id: row.get(0)?,
                    item_id: row.get(1)?,
                    reserver_name: row.get(2)?,
                    reserver_email: row.get(3)?,
                    quantity: row.get(4)?,
                    message: row.get(5)?,
                    created_at: row.get(6)?,
                },
                item_name: row.get(7)?,
            })
        })?;

        let mut entries = Vec::new();
        for row in rows {
            entries.push(row?);
        }
        Ok(entries)
    }
}
