//! Command Integration Tests
//!
//! Commands run against in-memory SQLite, an in-memory identity provider
//! and a counting object store.

use async_trait::async_trait;
use chrono::{Duration, Utc};
use std::cell::{Cell, RefCell};
use uuid::Uuid;

use super::*;
use crate::domain::{
    reserved_units, CoverUpload, Credentials, DomainError, DomainResult, ItemDraft, ListDraft, NewReservation,
    ReservationTotals, Session, SignUpForm, SignUpOutcome, User, MAX_COVER_BYTES,
};
use crate::repository::{init_in_memory, IdentityProvider, ObjectStore, Registry};

async fn setup_registry() -> Registry {
    init_in_memory().await.expect("Failed to init test DB").registry()
}

fn session_for(user_id: Uuid) -> Session {
    Session {
        access_token: format!("access-{}", user_id),
        refresh_token: "refresh".to_string(),
        expires_at: Utc::now() + Duration::hours(1),
        user: User {
            id: user_id,
            email: Some("owner@example.com".to_string()),
            full_name: None,
        },
    }
}

fn list_draft(title: &str) -> ListDraft {
    ListDraft {
        title: title.to_string(),
        ..Default::default()
    }
}

#[derive(Default)]
struct FakeIdentity {
    accounts: RefCell<Vec<(String, String, User)>>,
    calls: Cell<usize>,
    last_redirect: RefCell<Option<String>>,
}

#[async_trait(?Send)]
impl IdentityProvider for FakeIdentity {
    async fn sign_up(&self, form: &SignUpForm) -> DomainResult<SignUpOutcome> {
        self.calls.set(self.calls.get() + 1);
        *self.last_redirect.borrow_mut() = form.email_redirect_to.clone();
        let user = User {
            id: Uuid::new_v4(),
            email: Some(form.email.clone()),
            full_name: Some(form.full_name.clone()),
        };
        self.accounts
            .borrow_mut()
            .push((form.email.clone(), form.password.clone(), user.clone()));
        Ok(SignUpOutcome { user, session: None })
    }

    async fn sign_in(&self, credentials: &Credentials) -> DomainResult<Session> {
        self.calls.set(self.calls.get() + 1);
        self.accounts
            .borrow()
            .iter()
            .find(|(email, password, _)| *email == credentials.email && *password == credentials.password)
            .map(|(_, _, user)| session_for(user.id))
            .ok_or_else(|| DomainError::InvalidInput("Invalid login credentials".to_string()))
    }

    async fn current_user(&self, session: &Session) -> DomainResult<User> {
        Ok(session.user.clone())
    }

    async fn refresh(&self, session: &Session) -> DomainResult<Session> {
        self.calls.set(self.calls.get() + 1);
        let mut refreshed = session_for(session.user_id());
        refreshed.access_token = "refreshed".to_string();
        Ok(refreshed)
    }

    async fn sign_out(&self, _session: &Session) -> DomainResult<()> {
        self.calls.set(self.calls.get() + 1);
        Ok(())
    }
}

#[derive(Default)]
struct CountingStore {
    uploaded: RefCell<Vec<String>>,
}

#[async_trait(?Send)]
impl ObjectStore for CountingStore {
    async fn upload(&self, path: &str, _bytes: &[u8], _content_type: &str) -> DomainResult<()> {
        self.uploaded.borrow_mut().push(path.to_string());
        Ok(())
    }

    fn public_url(&self, path: &str) -> String {
        format!("https://cdn.example.com/{}", path)
    }
}

#[tokio::test]
async fn test_baby_shower_scenario() {
    let registry = setup_registry().await;
    let owner = session_for(Uuid::new_v4());

    let list = create_list(&registry, &owner, list_draft("Baby Shower")).await.unwrap();
    assert!(list.slug.starts_with("baby-shower-"));
    let item = add_item(&registry, &owner, list.id, ItemDraft::named("Onesies", 3)).await.unwrap();

    let public = get_public_list(&registry, &list.slug).await.unwrap();
    reserve_item(&registry, &public.items[0], NewReservation::new(item.id, "Grandma", 1))
        .await
        .unwrap();

    let public = get_public_list(&registry, &list.slug).await.unwrap();
    assert_eq!(public.items[0].available(), 2);
    reserve_item(&registry, &public.items[0], NewReservation::new(item.id, "Aunt May", 2))
        .await
        .unwrap();

    let public = get_public_list(&registry, &list.slug).await.unwrap();
    assert_eq!(public.items[0].display_available(), 0);
    assert!(public.items[0].is_fully_reserved());
    let result = reserve_item(&registry, &public.items[0], NewReservation::new(item.id, "Uncle Bob", 1)).await;
    assert!(matches!(result, Err(DomainError::Conflict(_))));

    let entries = list_reservations(&registry, &owner, list.id).await.unwrap();
    let totals = ReservationTotals::of(&entries);
    assert_eq!(totals.count, 2);
    assert_eq!(totals.quantity, 3);
    assert_eq!(entries[0].item_name, "Onesies");
}

#[tokio::test]
async fn test_stale_snapshot_cannot_overcommit() {
    let registry = setup_registry().await;
    let owner = session_for(Uuid::new_v4());
    let list = create_list(&registry, &owner, list_draft("Wedding")).await.unwrap();
    add_item(&registry, &owner, list.id, ItemDraft::named("Teapot", 2)).await.unwrap();

    let snapshot = get_public_list(&registry, &list.slug).await.unwrap().items.remove(0);
    reserve_item(&registry, &snapshot, NewReservation::new(snapshot.id, "First", 2))
        .await
        .unwrap();
    // The second visitor still sees two units available
    let second = reserve_item(&registry, &snapshot, NewReservation::new(snapshot.id, "Second", 1)).await;
    assert!(matches!(second, Err(DomainError::Conflict(_))));

    let public = get_public_list(&registry, &list.slug).await.unwrap();
    assert_eq!(public.items[0].reserved_count, 2);
    assert_eq!(list_reservations(&registry, &owner, list.id).await.unwrap().len(), 1);
}

#[tokio::test]
async fn test_overcommit_rejected_before_write() {
    let registry = setup_registry().await;
    let owner = session_for(Uuid::new_v4());
    let list = create_list(&registry, &owner, list_draft("Birthday")).await.unwrap();
    let item = add_item(&registry, &owner, list.id, ItemDraft::named("Book", 1)).await.unwrap();

    let result = reserve_item(&registry, &item, NewReservation::new(item.id, "Visitor", 2)).await;
    assert!(matches!(result, Err(DomainError::Conflict(_))));
    let result = reserve_item(&registry, &item, NewReservation::new(item.id, "  ", 1)).await;
    assert!(matches!(result, Err(DomainError::InvalidInput(_))));
    assert!(list_reservations(&registry, &owner, list.id).await.unwrap().is_empty());
}

#[tokio::test]
async fn test_delete_list_hides_public_page() {
    let registry = setup_registry().await;
    let owner = session_for(Uuid::new_v4());
    let list = create_list(&registry, &owner, list_draft("Housewarming")).await.unwrap();
    add_item(&registry, &owner, list.id, ItemDraft::named("Plant", 1)).await.unwrap();

    delete_list(&registry, &owner, list.id).await.unwrap();

    assert!(list_my_lists(&registry, &owner).await.unwrap().is_empty());
    assert!(matches!(
        get_public_list(&registry, &list.slug).await,
        Err(DomainError::NotFound(_))
    ));
}

#[tokio::test]
async fn test_deleting_missing_records_succeeds() {
    let registry = setup_registry().await;
    let owner = session_for(Uuid::new_v4());
    let list = create_list(&registry, &owner, list_draft("Retirement")).await.unwrap();
    let item = add_item(&registry, &owner, list.id, ItemDraft::named("Hammock", 1)).await.unwrap();

    delete_item(&registry, &owner, item.id).await.unwrap();
    // Second delete, e.g. from another tab
    delete_item(&registry, &owner, item.id).await.unwrap();
    delete_item(&registry, &owner, Uuid::new_v4()).await.unwrap();

    delete_list(&registry, &owner, list.id).await.unwrap();
    delete_list(&registry, &owner, list.id).await.unwrap();
    delete_list(&registry, &owner, Uuid::new_v4()).await.unwrap();
}

#[tokio::test]
async fn test_other_users_cannot_touch_a_list() {
    let registry = setup_registry().await;
    let owner = session_for(Uuid::new_v4());
    let stranger = session_for(Uuid::new_v4());
    let list = create_list(&registry, &owner, list_draft("Graduation")).await.unwrap();
    let item = add_item(&registry, &owner, list.id, ItemDraft::named("Pen", 1)).await.unwrap();

    let err = update_list(&registry, &stranger, list.id, list_draft("Mine now")).await.unwrap_err();
    assert!(err.is_access_failure());
    assert!(matches!(
        add_item(&registry, &stranger, list.id, ItemDraft::named("Spam", 1)).await,
        Err(DomainError::Forbidden(_))
    ));
    assert!(matches!(
        delete_item(&registry, &stranger, item.id).await,
        Err(DomainError::Forbidden(_))
    ));
    assert!(matches!(
        delete_list(&registry, &stranger, list.id).await,
        Err(DomainError::Forbidden(_))
    ));
    assert!(get_owned_list(&registry, &owner, list.id).await.is_ok());
    assert!(matches!(
        list_reservations(&registry, &stranger, list.id).await,
        Err(DomainError::Forbidden(_))
    ));
    assert!(matches!(
        get_owned_list(&registry, &owner, Uuid::new_v4()).await,
        Err(DomainError::NotFound(_))
    ));
}

#[tokio::test]
async fn test_update_list_keeps_slug() {
    let registry = setup_registry().await;
    let owner = session_for(Uuid::new_v4());
    let list = create_list(&registry, &owner, list_draft("Holiday")).await.unwrap();

    let mut draft = ListDraft::from_list(&list);
    draft.title = "Holiday 2025".to_string();
    draft.theme_color = "#7DD3FC".to_string();
    let updated = update_list(&registry, &owner, list.id, draft).await.unwrap();

    assert_eq!(updated.slug, list.slug);
    assert_eq!(updated.title, "Holiday 2025");
    assert_eq!(updated.theme_color, "#7dd3fc");
}

#[tokio::test]
async fn test_same_title_gets_distinct_slugs() {
    let registry = setup_registry().await;
    let owner = session_for(Uuid::new_v4());
    let a = create_list(&registry, &owner, list_draft("Baby Shower")).await.unwrap();
    let b = create_list(&registry, &owner, list_draft("Baby Shower")).await.unwrap();
    assert_ne!(a.slug, b.slug);

    let lists = list_my_lists(&registry, &owner).await.unwrap();
    assert_eq!(lists.len(), 2);
    assert_eq!(lists[0].list.id, b.id);
}

#[tokio::test]
async fn test_item_edit_preserves_reservations() {
    let registry = setup_registry().await;
    let owner = session_for(Uuid::new_v4());
    let list = create_list(&registry, &owner, list_draft("Retirement")).await.unwrap();
    let item = add_item(&registry, &owner, list.id, ItemDraft::named("Watch", 3)).await.unwrap();
    reserve_item(&registry, &item, NewReservation::new(item.id, "Colleague", 2))
        .await
        .unwrap();

    let mut draft = ItemDraft::from_item(&item);
    draft.name = "Gold watch".to_string();
    draft.quantity = 4;
    let updated = update_item(&registry, &owner, item.id, draft).await.unwrap();
    assert_eq!(updated.reserved_count, 2);
    assert_eq!(updated.available(), 2);

    let too_few = update_item(&registry, &owner, item.id, ItemDraft::named("Gold watch", 1)).await;
    assert!(matches!(too_few, Err(DomainError::InvalidInput(_))));
}

#[tokio::test]
async fn test_add_item_clamps_quantity() {
    let registry = setup_registry().await;
    let owner = session_for(Uuid::new_v4());
    let list = create_list(&registry, &owner, list_draft("Party")).await.unwrap();
    let item = add_item(&registry, &owner, list.id, ItemDraft::named("Balloons", 0)).await.unwrap();
    assert_eq!(item.quantity, 1);

    let detail = get_owned_list(&registry, &owner, list.id).await.unwrap();
    assert_eq!(detail.items.len(), 1);
    assert_eq!(reserved_units(&detail.items), 0);
    assert_eq!(list_my_lists(&registry, &owner).await.unwrap()[0].item_count, 1);
}

#[tokio::test]
async fn test_public_items_ordered_by_priority() {
    let registry = setup_registry().await;
    let owner = session_for(Uuid::new_v4());
    let list = create_list(&registry, &owner, list_draft("Wishlist")).await.unwrap();
    let mut urgent = ItemDraft::named("Urgent", 1);
    urgent.priority = 5;
    add_item(&registry, &owner, list.id, urgent).await.unwrap();
    add_item(&registry, &owner, list.id, ItemDraft::named("Later", 1)).await.unwrap();

    let public = get_public_list(&registry, &list.slug).await.unwrap();
    assert_eq!(public.items[0].name, "Urgent");
    let owned = get_owned_list(&registry, &owner, list.id).await.unwrap();
    assert_eq!(owned.items[0].name, "Later");
}

#[tokio::test]
async fn test_upload_rejected_without_storage_call() {
    let registry = setup_registry().await;
    let owner = session_for(Uuid::new_v4());
    let list = create_list(&registry, &owner, list_draft("Covers")).await.unwrap();
    let store = CountingStore::default();

    let too_big = CoverUpload {
        file_name: "big.png".to_string(),
        content_type: "image/png".to_string(),
        bytes: vec![0; MAX_COVER_BYTES],
    };
    let not_image = CoverUpload {
        file_name: "notes.txt".to_string(),
        content_type: "text/plain".to_string(),
        bytes: vec![1, 2, 3],
    };
    for upload in [too_big, not_image] {
        let result = upload_cover_image(&registry, &store, &owner, list.id, "list-covers", upload).await;
        assert!(matches!(result, Err(DomainError::InvalidInput(_))));
    }
    assert!(store.uploaded.borrow().is_empty());
}

#[tokio::test]
async fn test_upload_sets_cover_image() {
    let registry = setup_registry().await;
    let owner = session_for(Uuid::new_v4());
    let list = create_list(&registry, &owner, list_draft("Covers")).await.unwrap();
    let store = CountingStore::default();

    let upload = CoverUpload {
        file_name: "beach.JPG".to_string(),
        content_type: "image/jpeg".to_string(),
        bytes: vec![0; 1024],
    };
    let updated = upload_cover_image(&registry, &store, &owner, list.id, "list-covers", upload)
        .await
        .unwrap();

    let uploaded = store.uploaded.borrow();
    assert_eq!(uploaded.len(), 1);
    assert!(uploaded[0].starts_with(&format!("list-covers/{}-", list.id)));
    assert!(uploaded[0].ends_with(".jpg"));
    assert_eq!(updated.cover_image, Some(format!("https://cdn.example.com/{}", uploaded[0])));
}

#[tokio::test]
async fn test_cover_url_set_on_create_and_removed_on_edit() {
    let registry = setup_registry().await;
    let owner = session_for(Uuid::new_v4());
    let mut draft = list_draft("Wedding");
    draft.cover_image = Some(" https://images.example.com/rings.jpg ".to_string());
    let list = create_list(&registry, &owner, draft).await.unwrap();
    assert_eq!(list.cover_image.as_deref(), Some("https://images.example.com/rings.jpg"));

    let mut changes = ListDraft::from_list(&list);
    changes.cover_image = None;
    update_list(&registry, &owner, list.id, changes).await.unwrap();

    let detail = get_owned_list(&registry, &owner, list.id).await.unwrap();
    assert_eq!(detail.list.cover_image, None);
    assert_eq!(detail.list.slug, list.slug);
}

#[tokio::test]
async fn test_sign_up_validates_before_provider() {
    let identity = FakeIdentity::default();
    let form = SignUpForm {
        full_name: "Ana".to_string(),
        email: "ana@example.com".to_string(),
        password: "secret1".to_string(),
        repeat_password: "secret2".to_string(),
        email_redirect_to: None,
    };
    assert!(matches!(sign_up(&identity, form).await, Err(DomainError::InvalidInput(_))));
    assert_eq!(identity.calls.get(), 0);
}

#[tokio::test]
async fn test_sign_up_then_sign_in() {
    let identity = FakeIdentity::default();
    let form = SignUpForm {
        full_name: "Ana".to_string(),
        email: "ana@example.com".to_string(),
        password: "secret1".to_string(),
        repeat_password: "secret1".to_string(),
        email_redirect_to: Some("http://localhost:8080/dashboard".to_string()),
    };
    let outcome = sign_up(&identity, form).await.unwrap();
    assert!(outcome.needs_confirmation());
    assert_eq!(
        identity.last_redirect.borrow().as_deref(),
        Some("http://localhost:8080/dashboard")
    );

    let session = sign_in(
        &identity,
        Credentials {
            email: " ana@example.com ".to_string(),
            password: "secret1".to_string(),
        },
    )
    .await
    .unwrap();
    assert_eq!(session.user_id(), outcome.user.id);
    assert_eq!(current_user(&identity, &session).await.unwrap().id, outcome.user.id);
    sign_out(&identity, &session).await.unwrap();
}

#[tokio::test]
async fn test_require_session() {
    let identity = FakeIdentity::default();
    assert!(matches!(
        require_session(&identity, None).await,
        Err(DomainError::Unauthenticated)
    ));

    let fresh = session_for(Uuid::new_v4());
    assert_eq!(require_session(&identity, Some(&fresh)).await.unwrap(), fresh);
    assert_eq!(identity.calls.get(), 0);

    let mut expired = fresh.clone();
    expired.expires_at = Utc::now() - Duration::minutes(1);
    let refreshed = require_session(&identity, Some(&expired)).await.unwrap();
    assert_eq!(refreshed.access_token, "refreshed");
    assert_eq!(refreshed.user_id(), fresh.user_id());
}
