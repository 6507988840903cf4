//! Gift List Entity
//!
//! A named, shareable collection of desired items owned by one user.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::entity::{DomainError, DomainResult, Entity};
use super::fields::{optional_text, required_text};
use super::item::{reserved_units, Item};

/// Theme colors offered by the list forms (label, hex value)
pub const THEME_PALETTE: &[(&str, &str)] = &[
    ("Rose", "#fbbf24"),
    ("Lavender", "#c084fc"),
    ("Sky", "#7dd3fc"),
    ("Mint", "#86efac"),
    ("Coral", "#fb923c"),
    ("Lilac", "#d8b4fe"),
];

pub const DEFAULT_THEME_COLOR: &str = "#fbbf24";

/// `#rrggbb`
pub fn is_theme_color(value: &str) -> bool {
    value.len() == 7
        && value.starts_with('#')
        && value[1..].chars().all(|c| c.is_ascii_hexdigit())
}

/// Public link for a list slug
pub fn share_url(origin: &str, slug: &str) -> String {
    format!("{}/list/{}", origin.trim_end_matches('/'), slug)
}

/// A gift list row
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GiftList {
    pub id: Uuid,
    /// Owning user
    pub user_id: Uuid,
    pub title: String,
    pub description: Option<String>,
    /// Hex color used for the list header and card
    pub theme_color: String,
    /// Public URL of the cover image
    pub cover_image: Option<String>,
    pub event_date: Option<NaiveDate>,
    /// Unique public identifier; immutable after creation
    pub slug: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl GiftList {
    /// Build a new list from a normalized draft
    pub fn new(user_id: Uuid, draft: ListDraft, slug: String, now: DateTime<Utc>) -> Self {
        Self {
            id: Uuid::new_v4(),
            user_id,
            title: draft.title,
            description: draft.description,
            theme_color: draft.theme_color,
            cover_image: draft.cover_image,
            event_date: draft.event_date,
            slug,
            created_at: now,
            updated_at: now,
        }
    }

    /// Apply edited fields from a normalized draft. The slug is left untouched.
    pub fn apply(&mut self, draft: ListDraft, now: DateTime<Utc>) {
        self.title = draft.title;
        self.description = draft.description;
        self.theme_color = draft.theme_color;
        self.cover_image = draft.cover_image;
        self.event_date = draft.event_date;
        self.updated_at = now;
    }

    pub fn is_owned_by(&self, user_id: Uuid) -> bool {
        self.user_id == user_id
    }
}

impl Entity for GiftList {
    type Id = Uuid;

    fn id(&self) -> Self::Id {
        self.id
    }
}

/// Editable list fields, used for both creation and editing
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ListDraft {
    pub title: String,
    pub description: Option<String>,
    pub theme_color: String,
    pub event_date: Option<NaiveDate>,
    pub cover_image: Option<String>,
}

impl Default for ListDraft {
    fn default() -> Self {
        Self {
            title: String::new(),
            description: None,
            theme_color: DEFAULT_THEME_COLOR.to_string(),
            event_date: None,
            cover_image: None,
        }
    }
}

impl ListDraft {
    /// Draft pre-filled from an existing list, for the edit dialog
    pub fn from_list(list: &GiftList) -> Self {
        Self {
            title: list.title.clone(),
            description: list.description.clone(),
            theme_color: list.theme_color.clone(),
            event_date: list.event_date,
            cover_image: list.cover_image.clone(),
        }
    }

    /// Trim fields, drop blank optionals and check the title and color
    pub fn normalized(self) -> DomainResult<Self> {
        let title = required_text("Title", &self.title)?;
        let theme_color = self.theme_color.trim().to_lowercase();
        let theme_color = if theme_color.is_empty() {
            DEFAULT_THEME_COLOR.to_string()
        } else if is_theme_color(&theme_color) {
            theme_color
        } else {
            return Err(DomainError::InvalidInput(format!(
                "Theme color must look like #rrggbb, got {}",
                self.theme_color
            )));
        };
        Ok(Self {
            title,
            description: optional_text(self.description),
            theme_color,
            event_date: self.event_date,
            cover_image: optional_text(self.cover_image),
        })
    }
}

/// Dashboard row: a list and how many items it holds
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ListSummary {
    pub list: GiftList,
    pub item_count: usize,
}

/// Owner's view of one list
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ListDetail {
    pub list: GiftList,
    /// Newest first
    pub items: Vec<Item>,
}

/// Visitor's view of one list
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PublicList {
    pub list: GiftList,
    /// Highest priority first, then newest
    pub items: Vec<Item>,
}

impl PublicList {
    pub fn total_items(&self) -> usize {
        self.items.len()
    }

    pub fn total_reserved(&self) -> i64 {
        reserved_units(&self.items)
    }

    pub fn total_available(&self) -> i64 {
        self.items.iter().map(|i| i.display_available() as i64).sum()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::ItemDraft;

    fn draft(title: &str) -> ListDraft {
        ListDraft {
            title: title.to_string(),
            ..Default::default()
        }
    }

    #[test]
    fn test_normalized_draft() {
        let d = ListDraft {
            title: "  Baby Shower ".into(),
            description: Some("   ".into()),
            theme_color: "#C084FC".into(),
            event_date: None,
            cover_image: Some("".into()),
        }
        .normalized()
        .unwrap();
        assert_eq!(d.title, "Baby Shower");
        assert_eq!(d.description, None);
        assert_eq!(d.theme_color, "#c084fc");
        assert_eq!(d.cover_image, None);
    }

    #[test]
    fn test_title_required() {
        assert!(matches!(draft(" ").normalized(), Err(DomainError::InvalidInput(_))));
    }

    #[test]
    fn test_bad_theme_color() {
        let d = ListDraft {
            theme_color: "pink".into(),
            ..draft("Wedding")
        };
        assert!(matches!(d.normalized(), Err(DomainError::InvalidInput(_))));
    }

    #[test]
    fn test_palette_colors_are_valid() {
        assert!(THEME_PALETTE.iter().all(|(_, hex)| is_theme_color(hex)));
        assert_eq!(THEME_PALETTE[0].1, DEFAULT_THEME_COLOR);
    }

    #[test]
    fn test_apply_keeps_slug() {
        let now = Utc::now();
        let mut list = GiftList::new(Uuid::new_v4(), draft("Birthday"), "birthday-abc123".into(), now);
        list.apply(draft("Birthday party"), now);
        assert_eq!(list.title, "Birthday party");
        assert_eq!(list.slug, "birthday-abc123");
    }

    #[test]
    fn test_share_url() {
        assert_eq!(
            share_url("https://gifts.example/", "baby-shower-x1y2z3"),
            "https://gifts.example/list/baby-shower-x1y2z3"
        );
    }

    #[test]
    fn test_public_totals_clamp_availability() {
        let now = Utc::now();
        let list = GiftList::new(Uuid::new_v4(), draft("Baby Shower"), "baby-shower-aaaaaa".into(), now);
        let mut a = Item::new(list.id, ItemDraft::named("Stroller", 3), now);
        a.reserved_count = 1;
        let mut b = Item::new(list.id, ItemDraft::named("Crib", 1), now);
        b.reserved_count = 2;
        let public = PublicList { list, items: vec![a, b] };
        assert_eq!(public.total_items(), 2);
        assert_eq!(public.total_reserved(), 3);
        assert_eq!(public.total_available(), 2);
    }
}
