//! Hosted Repositories
//!
//! Repository implementations over the hosted table API. Row-level policies
//! on the backend scope every query to what the bearer token may see.

use async_trait::async_trait;
use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::rest::{RestClient, TableQuery};
use crate::domain::{
    DomainError, DomainResult, GiftList, Item, ListSummary, NewReservation, Reservation,
    ReservationEntry,
};
use crate::repository::{ItemOrder, ItemRepository, ListRepository, Repository, ReservationRepository};

const LISTS: &str = "gift_lists";
const ITEMS: &str = "gift_items";
const RESERVATIONS: &str = "reservations";

pub struct HostedListRepository {
    rest: RestClient,
}

impl HostedListRepository {
    pub fn new(rest: RestClient) -> Self {
        Self { rest }
    }
}

/// Mutable list columns; slug and owner are never sent on update
#[derive(Serialize)]
struct ListPatch<'a> {
    title: &'a str,
    description: Option<&'a str>,
    theme_color: &'a str,
    cover_image: Option<&'a str>,
    event_date: Option<NaiveDate>,
    updated_at: DateTime<Utc>,
}

#[derive(Deserialize)]
struct CountRow {
    count: i64,
}

/// `gift_lists` row with an embedded `gift_items(count)` aggregate
#[derive(Deserialize)]
struct ListWithCount {
    #[serde(flatten)]
    list: GiftList,
    #[serde(default)]
    gift_items: Vec<CountRow>,
}

#[async_trait(?Send)]
impl Repository<GiftList> for HostedListRepository {
    async fn create(&self, entity: &GiftList) -> DomainResult<GiftList> {
        self.rest.insert(LISTS, entity).await
    }

    async fn find_by_id(&self, id: Uuid) -> DomainResult<Option<GiftList>> {
        self.rest.select_one(TableQuery::new(LISTS).eq("id", id)).await
    }

    async fn update(&self, entity: &GiftList) -> DomainResult<GiftList> {
        let patch = ListPatch {
            title: &entity.title,
            description: entity.description.as_deref(),
            theme_color: &entity.theme_color,
            cover_image: entity.cover_image.as_deref(),
            event_date: entity.event_date,
            updated_at: entity.updated_at,
        };
        self.rest
            .update(&TableQuery::new(LISTS).eq("id", entity.id), &patch)
            .await?
            .ok_or_else(|| DomainError::NotFound(format!("List {}", entity.id)))
    }

    async fn delete(&self, id: Uuid) -> DomainResult<()> {
        self.rest.delete(&TableQuery::new(LISTS).eq("id", id)).await
    }
}

#[async_trait(?Send)]
impl ListRepository for HostedListRepository {
    async fn find_by_slug(&self, slug: &str) -> DomainResult<Option<GiftList>> {
        self.rest.select_one(TableQuery::new(LISTS).eq("slug", slug)).await
    }

    async fn list_by_owner(&self, user_id: Uuid) -> DomainResult<Vec<ListSummary>> {
        let query = TableQuery::new(LISTS)
            .select("*,gift_items(count)")
            .eq("user_id", user_id)
            .order_desc("created_at");
        let rows: Vec<ListWithCount> = self.rest.select(&query).await?;
        Ok(rows
            .into_iter()
            .map(|row| ListSummary {
                item_count: row.gift_items.first().map(|c| c.count.max(0) as usize).unwrap_or(0),
                list: row.list,
            })
            .collect())
    }
}

pub struct HostedItemRepository {
    rest: RestClient,
}

impl HostedItemRepository {
    pub fn new(rest: RestClient) -> Self {
        Self { rest }
    }
}

/// Mutable item columns; `reserved_count` is owned by the reservation path
#[derive(Serialize)]
struct ItemPatch<'a> {
    name: &'a str,
    description: Option<&'a str>,
    link: Option<&'a str>,
    image_url: Option<&'a str>,
    quantity: i32,
    priority: i32,
    updated_at: DateTime<Utc>,
}

#[async_trait(?Send)]
impl Repository<Item> for HostedItemRepository {
    async fn create(&self, entity: &Item) -> DomainResult<Item> {
        self.rest.insert(ITEMS, entity).await
    }

    async fn find_by_id(&self, id: Uuid) -> DomainResult<Option<Item>> {
        self.rest.select_one(TableQuery::new(ITEMS).eq("id", id)).await
    }

    async fn update(&self, entity: &Item) -> DomainResult<Item> {
        let patch = ItemPatch {
            name: &entity.name,
            description: entity.description.as_deref(),
            link: entity.link.as_deref(),
            image_url: entity.image_url.as_deref(),
            quantity: entity.quantity,
            priority: entity.priority,
            updated_at: entity.updated_at,
        };
        self.rest
            .update(&TableQuery::new(ITEMS).eq("id", entity.id), &patch)
            .await?
            .ok_or_else(|| DomainError::NotFound(format!("Item {}", entity.id)))
    }

    async fn delete(&self, id: Uuid) -> DomainResult<()> {
        self.rest.delete(&TableQuery::new(ITEMS).eq("id", id)).await
    }
}

#[async_trait(?Send)]
impl ItemRepository for HostedItemRepository {
    async fn list_by_list(&self, list_id: Uuid, order: ItemOrder) -> DomainResult<Vec<Item>> {
        let query = TableQuery::new(ITEMS).eq("list_id", list_id);
        let query = match order {
            ItemOrder::Newest => query.order_desc("created_at"),
            ItemOrder::Priority => query.order_desc("priority").order_desc("created_at"),
        };
        self.rest.select(&query).await
    }
}

pub struct HostedReservationRepository {
    rest: RestClient,
}

impl HostedReservationRepository {
    pub fn new(rest: RestClient) -> Self {
        Self { rest }
    }
}

/// Arguments of the `reserve_item` database function
#[derive(Serialize)]
struct ReserveArgs<'a> {
    p_item_id: Uuid,
    p_reserver_name: &'a str,
    p_reserver_email: Option<&'a str>,
    p_quantity: i32,
    p_message: Option<&'a str>,
}

#[derive(Deserialize)]
struct ItemName {
    name: String,
}

/// `reservations` row with its item embedded through an inner join
#[derive(Deserialize)]
struct ReservationWithItem {
    #[serde(flatten)]
    reservation: Reservation,
    gift_items: ItemName,
}

#[async_trait(?Send)]
impl ReservationRepository for HostedReservationRepository {
    async fn reserve(&self, draft: &NewReservation) -> DomainResult<Reservation> {
        let args = ReserveArgs {
            p_item_id: draft.item_id,
            p_reserver_name: &draft.reserver_name,
            p_reserver_email: draft.reserver_email.as_deref(),
            p_quantity: draft.quantity,
            p_message: draft.message.as_deref(),
        };
        self.rest.rpc("reserve_item", &args).await
    }

    async fn list_by_list(&self, list_id: Uuid) -> DomainResult<Vec<ReservationEntry>> {
        let query = TableQuery::new(RESERVATIONS)
            .select("*,gift_items!inner(name,list_id)")
            .eq("gift_items.list_id", list_id)
            .order_desc("created_at");
        let rows: Vec<ReservationWithItem> = self.rest.select(&query).await?;
        Ok(rows
            .into_iter()
            .map(|row| ReservationEntry {
                reservation: row.reservation,
                item_name: row.gift_items.name,
            })
            .collect())
    }
}
