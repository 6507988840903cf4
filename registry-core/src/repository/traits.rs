//! Repository Layer - Core Traits
//!
//! Abstract interfaces for data access, identity and object storage.
//! Implementations: the hosted backend over HTTP, SQLite and the local
//! filesystem.
//!
//! Futures are not required to be `Send`: the same traits back the
//! single-threaded wasm frontend and native callers.

use async_trait::async_trait;
use uuid::Uuid;

use crate::domain::{
    Credentials, DomainResult, Entity, GiftList, Item, ListSummary, NewReservation, Reservation,
    ReservationEntry, Session, SignUpForm, SignUpOutcome, User,
};

/// Core repository trait for CRUD operations
#[async_trait(?Send)]
pub trait Repository<T: Entity> {
    /// Insert a new entity, returning the stored row
    async fn create(&self, entity: &T) -> DomainResult<T>;

    /// Find entity by ID
    async fn find_by_id(&self, id: T::Id) -> DomainResult<Option<T>>;

    /// Update an existing entity
    async fn update(&self, entity: &T) -> DomainResult<T>;

    /// Delete entity by ID
    async fn delete(&self, id: T::Id) -> DomainResult<()>;
}

#[async_trait(?Send)]
pub trait ListRepository: Repository<GiftList> {
    async fn find_by_slug(&self, slug: &str) -> DomainResult<Option<GiftList>>;

    /// Lists owned by a user with their item counts, newest first
    async fn list_by_owner(&self, user_id: Uuid) -> DomainResult<Vec<ListSummary>>;
}

/// Item ordering for the two list views
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ItemOrder {
    /// `created_at` descending (owner view)
    Newest,
    /// `priority` descending, then `created_at` descending (public view)
    Priority,
}

#[async_trait(?Send)]
pub trait ItemRepository: Repository<Item> {
    async fn list_by_list(&self, list_id: Uuid, order: ItemOrder) -> DomainResult<Vec<Item>>;
}

#[async_trait(?Send)]
pub trait ReservationRepository {
    /// Atomically claim `draft.quantity` units of the item and record the
    /// reservation. Fails with `Conflict` when fewer units remain, and with
    /// `NotFound` when the item does not exist; nothing is written on failure.
    async fn reserve(&self, draft: &NewReservation) -> DomainResult<Reservation>;

    /// Reservations against any item of the list, newest first
    async fn list_by_list(&self, list_id: Uuid) -> DomainResult<Vec<ReservationEntry>>;
}

#[async_trait(?Send)]
pub trait ObjectStore {
    /// Store bytes at `path`. Existing objects are never overwritten.
    async fn upload(&self, path: &str, bytes: &[u8], content_type: &str) -> DomainResult<()>;

    /// Public URL under which an uploaded object is served
    fn public_url(&self, path: &str) -> String;
}

#[async_trait(?Send)]
pub trait IdentityProvider {
    async fn sign_up(&self, form: &SignUpForm) -> DomainResult<SignUpOutcome>;

    async fn sign_in(&self, credentials: &Credentials) -> DomainResult<Session>;

    /// Resolve the user behind a session; `Unauthenticated` if it was revoked
    async fn current_user(&self, session: &Session) -> DomainResult<User>;

    async fn refresh(&self, session: &Session) -> DomainResult<Session>;

    async fn sign_out(&self, session: &Session) -> DomainResult<()>;
}

/// The set of repositories one request works against
pub struct Registry {
    pub lists: Box<dyn ListRepository>,
    pub items: Box<dyn ItemRepository>,
    pub reservations: Box<dyn ReservationRepository>,
}
