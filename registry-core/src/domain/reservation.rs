//! Reservation Entity
//!
//! A visitor's claim on some quantity of an item. Created once, never edited.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::entity::{DomainError, DomainResult, Entity};
use super::fields::{optional_text, required_text};
use super::item::Item;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Reservation {
    pub id: Uuid,
    pub item_id: Uuid,
    pub reserver_name: String,
    pub reserver_email: Option<String>,
    pub quantity: i32,
    /// Note left for the list owner
    pub message: Option<String>,
    pub created_at: DateTime<Utc>,
}

impl Reservation {
    pub fn new(draft: &NewReservation, now: DateTime<Utc>) -> Self {
        Self {
            id: Uuid::new_v4(),
            item_id: draft.item_id,
            reserver_name: draft.reserver_name.clone(),
            reserver_email: draft.reserver_email.clone(),
            quantity: draft.quantity,
            message: draft.message.clone(),
            created_at: now,
        }
    }
}

impl Entity for Reservation {
    type Id = Uuid;

    fn id(&self) -> Self::Id {
        self.id
    }
}

/// Reservation form as submitted by a visitor
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewReservation {
    pub item_id: Uuid,
    pub reserver_name: String,
    pub reserver_email: Option<String>,
    pub quantity: i32,
    pub message: Option<String>,
}

impl NewReservation {
    pub fn new(item_id: Uuid, reserver_name: &str, quantity: i32) -> Self {
        Self {
            item_id,
            reserver_name: reserver_name.to_string(),
            reserver_email: None,
            quantity,
            message: None,
        }
    }

    pub fn normalized(self) -> DomainResult<Self> {
        let reserver_name = required_text("Your name", &self.reserver_name)?;
        let reserver_email = optional_text(self.reserver_email);
        if let Some(email) = &reserver_email {
            if !email.contains('@') {
                return Err(DomainError::InvalidInput(format!("{} is not an email address", email)));
            }
        }
        if self.quantity < 1 {
            return Err(DomainError::InvalidInput("Quantity must be at least 1".to_string()));
        }
        Ok(Self {
            item_id: self.item_id,
            reserver_name,
            reserver_email,
            quantity: self.quantity,
            message: optional_text(self.message),
        })
    }

    /// Check the requested quantity against the caller's last-fetched item.
    ///
    /// This only filters obvious overcommits before a write; storage performs
    /// the authoritative conditional update.
    pub fn check_against(&self, snapshot: &Item) -> DomainResult<()> {
        if snapshot.id != self.item_id {
            return Err(DomainError::Internal(format!(
                "Reservation for item {} checked against item {}",
                self.item_id, snapshot.id
            )));
        }
        if self.quantity > snapshot.available() {
            return Err(DomainError::Conflict(format!(
                "Only {} unit(s) available",
                snapshot.display_available()
            )));
        }
        Ok(())
    }
}

/// Owner's view of a reservation, joined with the item it targets
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReservationEntry {
    pub reservation: Reservation,
    pub item_name: String,
}

/// Aggregates shown on the reservations card
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct ReservationTotals {
    pub count: usize,
    pub quantity: i64,
}

impl ReservationTotals {
    pub fn of(entries: &[ReservationEntry]) -> Self {
        Self {
            count: entries.len(),
            quantity: entries.iter().map(|e| e.reservation.quantity as i64).sum(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::ItemDraft;

    fn snapshot(quantity: i32, reserved: i32) -> Item {
        let mut item = Item::new(Uuid::new_v4(), ItemDraft::named("Stroller", quantity), Utc::now());
        item.reserved_count = reserved;
        item
    }

    #[test]
    fn test_normalization() {
        let item_id = Uuid::new_v4();
        let draft = NewReservation {
            reserver_email: Some("  ".into()),
            message: Some(" Congrats! ".into()),
            ..NewReservation::new(item_id, " Ana ", 1)
        }
        .normalized()
        .unwrap();
        assert_eq!(draft.reserver_name, "Ana");
        assert_eq!(draft.reserver_email, None);
        assert_eq!(draft.message.as_deref(), Some("Congrats!"));
    }

    #[test]
    fn test_invalid_reservations() {
        let id = Uuid::new_v4();
        assert!(NewReservation::new(id, "", 1).normalized().is_err());
        assert!(NewReservation::new(id, "Ana", 0).normalized().is_err());
        let bad_email = NewReservation {
            reserver_email: Some("ana.example.com".into()),
            ..NewReservation::new(id, "Ana", 1)
        };
        assert!(bad_email.normalized().is_err());
    }

    #[test]
    fn test_snapshot_check() {
        let item = snapshot(3, 1);
        assert!(NewReservation::new(item.id, "Ana", 2).check_against(&item).is_ok());
        assert_eq!(
            NewReservation::new(item.id, "Ana", 3).check_against(&item),
            Err(DomainError::Conflict("Only 2 unit(s) available".into()))
        );

        let full = snapshot(2, 2);
        assert!(matches!(
            NewReservation::new(full.id, "Ana", 1).check_against(&full),
            Err(DomainError::Conflict(_))
        ));
    }

    #[test]
    fn test_totals() {
        let item = snapshot(5, 0);
        let entries: Vec<ReservationEntry> = [2, 1]
            .iter()
            .map(|q| ReservationEntry {
                reservation: Reservation::new(&NewReservation::new(item.id, "Ana", *q), Utc::now()),
                item_name: item.name.clone(),
            })
            .collect();
        assert_eq!(ReservationTotals::of(&entries), ReservationTotals { count: 2, quantity: 3 });
    }
}
