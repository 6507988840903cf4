//! SQLite Storage
//!
//! Local implementation of the persistence port. Tables mirror the hosted
//! schema; the reservation path runs as one conditional-update transaction.

mod db;
mod item_repo;
mod list_repo;
mod reservation_repo;

pub use db::{init_db, init_in_memory, DbState};
pub use item_repo::SqliteItemRepository;
pub use list_repo::SqliteListRepository;
pub use reservation_repo::SqliteReservationRepository;
