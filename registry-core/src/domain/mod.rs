//! Domain Layer
//!
//! Contains all domain entities and core abstractions.
//! This layer performs no I/O.

mod entity;
mod fields;
mod form;
mod item;
mod list;
mod reservation;
mod session;
mod slug;
mod upload;

pub use entity::{Entity, DomainError, DomainResult};
pub use fields::{optional_text, required_text};
pub use form::FormState;
pub use item::{coerce_quantity, reserved_units, Item, ItemDraft};
pub use list::{
    is_theme_color, share_url, GiftList, ListDetail, ListDraft, ListSummary, PublicList,
    DEFAULT_THEME_COLOR, THEME_PALETTE,
};
pub use reservation::{NewReservation, Reservation, ReservationEntry, ReservationTotals};
pub use session::{Credentials, Session, SignUpForm, SignUpOutcome, User, MIN_PASSWORD_LEN};
pub use slug::{generate_slug, random_suffix, slugify, SLUG_SUFFIX_LEN};
pub use upload::{cover_object_path, validate_image, CoverUpload, MAX_COVER_BYTES};
