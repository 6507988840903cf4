//! Repository Layer
//!
//! Data access abstractions and the local implementations.

mod traits;

#[cfg(feature = "local")]
mod sqlite;


pub use traits::{
    IdentityProvider, ItemOrder, ItemRepository, ListRepository, ObjectStore, Registry, Repository,
    ReservationRepository,
};

#[cfg(feature = "local")]
pub use sqlite::{
    init_db, init_in_memory, DbState, SqliteItemRepository, SqliteListRepository,
    SqliteReservationRepository,
};
