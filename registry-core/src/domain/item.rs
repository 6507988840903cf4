//! Gift Item Entity
//!
//! A single desired product with a finite requestable quantity.
//! `reserved_count` caches the sum of reservation quantities.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::entity::{DomainError, DomainResult, Entity};
use super::fields::{optional_text, required_text};

/// Parse a quantity typed into a form. Only the leading integer counts
/// (`"2.5"` is 2); anything unparsable becomes 1 and anything below 1 is
/// clamped to 1.
pub fn coerce_quantity(input: &str) -> i32 {
    let trimmed = input.trim_start();
    let sign_len = usize::from(trimmed.starts_with(['-', '+']));
    let digits = trimmed[sign_len..].bytes().take_while(u8::is_ascii_digit).count();
    trimmed[..sign_len + digits]
        .parse::<i64>()
        .map(clamp_quantity)
        .unwrap_or_else(|e| match e.kind() {
            std::num::IntErrorKind::PosOverflow => i32::MAX,
            _ => 1,
        })
}

/// Units reserved across a set of items
pub fn reserved_units(items: &[Item]) -> i64 {
    items.iter().map(|i| i.reserved_count as i64).sum()
}

fn clamp_quantity(value: i64) -> i32 {
    value.clamp(1, i32::MAX as i64) as i32
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Item {
    pub id: Uuid,
    /// Parent list
    pub list_id: Uuid,
    pub name: String,
    pub description: Option<String>,
    /// Where to buy it
    pub link: Option<String>,
    pub image_url: Option<String>,
    /// Requested units, always positive
    pub quantity: i32,
    /// Units already reserved by visitors
    pub reserved_count: i32,
    /// Higher shows first on the public page
    #[serde(default)]
    pub priority: i32,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Item {
    /// Build a new item from a normalized draft
    pub fn new(list_id: Uuid, draft: ItemDraft, now: DateTime<Utc>) -> Self {
        Self {
            id: Uuid::new_v4(),
            list_id,
            name: draft.name,
            description: draft.description,
            link: draft.link,
            image_url: draft.image_url,
            quantity: draft.quantity,
            reserved_count: 0,
            priority: draft.priority,
            created_at: now,
            updated_at: now,
        }
    }

    /// Apply edited fields. `reserved_count` is never written here, and the
    /// quantity cannot drop below what visitors already reserved.
    pub fn apply(&mut self, draft: ItemDraft, now: DateTime<Utc>) -> DomainResult<()> {
        if draft.quantity < self.reserved_count {
            return Err(DomainError::InvalidInput(format!(
                "Quantity cannot be lower than the {} unit(s) already reserved",
                self.reserved_count
            )));
        }
        self.name = draft.name;
        self.description = draft.description;
        self.link = draft.link;
        self.image_url = draft.image_url;
        self.quantity = draft.quantity;
        self.priority = draft.priority;
        self.updated_at = now;
        Ok(())
    }

    /// `quantity - reserved_count`; negative if the cache was ever overcommitted
    pub fn available(&self) -> i32 {
        self.quantity - self.reserved_count
    }

    /// Availability as shown to visitors, never negative
    pub fn display_available(&self) -> u32 {
        self.available().max(0) as u32
    }

    pub fn is_fully_reserved(&self) -> bool {
        self.available() <= 0
    }

    pub fn can_reserve(&self, quantity: i32) -> bool {
        quantity >= 1 && quantity <= self.available()
    }
}

impl Entity for Item {
    type Id = Uuid;

    fn id(&self) -> Self::Id {
        self.id
    }
}

/// Editable item fields, used for both adding and editing
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ItemDraft {
    pub name: String,
    pub description: Option<String>,
    pub link: Option<String>,
    pub image_url: Option<String>,
    pub quantity: i32,
    pub priority: i32,
}

impl Default for ItemDraft {
    fn default() -> Self {
        Self {
            name: String::new(),
            description: None,
            link: None,
            image_url: None,
            quantity: 1,
            priority: 0,
        }
    }
}

impl ItemDraft {
    pub fn named(name: &str, quantity: i32) -> Self {
        Self {
            name: name.to_string(),
            quantity,
            ..Default::default()
        }
    }

    /// Draft pre-filled from an existing item, for the edit dialog
    pub fn from_item(item: &Item) -> Self {
        Self {
            name: item.name.clone(),
            description: item.description.clone(),
            link: item.link.clone(),
            image_url: item.image_url.clone(),
            quantity: item.quantity,
            priority: item.priority,
        }
    }

    /// Trim fields, require a name, clamp quantity to at least 1
    pub fn normalized(self) -> DomainResult<Self> {
        Ok(Self {
            name: required_text("Name", &self.name)?,
            description: optional_text(self.description),
            link: optional_text(self.link),
            image_url: optional_text(self.image_url),
            quantity: clamp_quantity(self.quantity as i64),
            priority: self.priority,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn item(quantity: i32, reserved: i32) -> Item {
        let mut item = Item::new(Uuid::new_v4(), ItemDraft::named("Stroller", quantity), Utc::now());
        item.reserved_count = reserved;
        item
    }

    #[test]
    fn test_availability() {
        let i = item(3, 1);
        assert_eq!(i.available(), 2);
        assert_eq!(i.display_available(), 2);
        assert!(!i.is_fully_reserved());
        assert!(i.can_reserve(2));
        assert!(!i.can_reserve(3));
        assert!(!i.can_reserve(0));
    }

    #[test]
    fn test_overcommitted_item_displays_zero() {
        let i = item(2, 3);
        assert_eq!(i.available(), -1);
        assert_eq!(i.display_available(), 0);
        assert!(i.is_fully_reserved());
    }

    #[test]
    fn test_coerce_quantity() {
        assert_eq!(coerce_quantity("4"), 4);
        assert_eq!(coerce_quantity("0"), 1);
        assert_eq!(coerce_quantity("-7"), 1);
        assert_eq!(coerce_quantity("abc"), 1);
        assert_eq!(coerce_quantity(""), 1);
    }

    #[test]
    fn test_coerce_quantity_takes_leading_integer() {
        assert_eq!(coerce_quantity("2.5"), 2);
        assert_eq!(coerce_quantity(" 3 boxes"), 3);
        assert_eq!(coerce_quantity("+6"), 6);
        assert_eq!(coerce_quantity("-2.5"), 1);
        assert_eq!(coerce_quantity(".5"), 1);
        assert_eq!(coerce_quantity("99999999999999999999"), i32::MAX);
    }

    #[test]
    fn test_reserved_units() {
        let list_id = Uuid::new_v4();
        let mut a = Item::new(list_id, ItemDraft::named("Blanket", 3), Utc::now());
        let mut b = Item::new(list_id, ItemDraft::named("Rattle", 2), Utc::now());
        a.reserved_count = 2;
        b.reserved_count = 1;
        assert_eq!(reserved_units(&[a, b]), 3);
        assert_eq!(reserved_units(&[]), 0);
    }

    #[test]
    fn test_draft_normalization() {
        let d = ItemDraft {
            name: " Crib ".into(),
            link: Some(" ".into()),
            quantity: -2,
            ..Default::default()
        }
        .normalized()
        .unwrap();
        assert_eq!(d.name, "Crib");
        assert_eq!(d.link, None);
        assert_eq!(d.quantity, 1);

        assert!(ItemDraft::named("", 1).normalized().is_err());
    }

    #[test]
    fn test_apply_rejects_quantity_below_reserved() {
        let mut i = item(3, 2);
        let err = i.apply(ItemDraft::named("Stroller", 1), Utc::now()).unwrap_err();
        assert!(matches!(err, DomainError::InvalidInput(_)));
        assert_eq!(i.quantity, 3);

        i.apply(ItemDraft::named("Stroller XL", 2), Utc::now()).unwrap();
        assert_eq!(i.quantity, 2);
        assert_eq!(i.reserved_count, 2);
        assert!(i.is_fully_reserved());
    }
}
