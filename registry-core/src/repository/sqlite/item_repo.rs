//! Item Repository
//!
//! SQLite-backed storage for gift items. `reserved_count` is only written by
//! the reservation repository.

use async_trait::async_trait;
use rusqlite::{params, OptionalExtension, Row};
use uuid::Uuid;

use super::db::{map_write_error, SharedConnection};
use crate::domain::{DomainError, DomainResult, Item};
use crate::repository::{ItemOrder, ItemRepository, Repository};

const ITEM_COLUMNS: &str = "id, list_id, name, description, link, image_url, quantity, reserved_count, priority, created_at, updated_at";

/// SQLite implementation of the item repository
pub struct SqliteItemRepository {
    conn: SharedConnection,
}

impl SqliteItemRepository {
    pub(super) fn new(conn: SharedConnection) -> Self {
        Self { conn }
    }
}

#[async_trait(?Send)]
impl Repository<Item> for SqliteItemRepository {
    async fn create(&self, entity: &Item) -> DomainResult<Item> {
        let conn = self.conn.lock().await;

        conn.execute(
            "INSERT INTO gift_items (id, list_id, name, description, link, image_url, quantity, reserved_count, priority, created_at, updated_at)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11)",
            params![
                entity.id,
                entity.list_id,
                entity.name,
                entity.description,
                entity.link,
                entity.image_url,
                entity.quantity,
                entity.reserved_count,
                entity.priority,
                entity.created_at,
                entity.updated_at,
            ],
        )
        .map_err(|e| map_write_error(e, "Item"))?;

        Ok(entity.clone())
    }

    async fn find_by_id(&self, id: Uuid) -> DomainResult<Option<Item>> {
        let conn = self.conn.lock().await;

        let item = conn
            .query_row(
                &format!("SELECT {} FROM gift_items WHERE id = ?1", ITEM_COLUMNS),
                params![id],
                row_to_item,
            )
            .optional()?;
        Ok(item)
    }

    async fn update(&self, entity: &Item) -> DomainResult<Item> {
        let conn = self.conn.lock().await;

        let changed = conn
            .execute(
                "UPDATE gift_items SET name = ?1, description = ?2, link = ?3, image_url = ?4, quantity = ?5, priority = ?6, updated_at = ?7
                 WHERE id = ?8",
                params![
                    entity.name,
                    entity.description,
                    entity.link,
                    entity.image_url,
                    entity.quantity,
                    entity.priority,
                    entity.updated_at,
                    entity.id,
                ],
            )
            .map_err(|e| map_write_error(e, "Item"))?;

        if changed == 0 {
            return Err(DomainError::NotFound(format!("Item {}", entity.id)));
        }

        // Return the stored row so the caller sees the current reserved_count
        conn.query_row(
            &format!("SELECT {} FROM gift_items WHERE id = ?1", ITEM_COLUMNS),
            params![entity.id],
            row_to_item,
        )
        .map_err(DomainError::from)
    }

    async fn delete(&self, id: Uuid) -> DomainResult<()> {
        let conn = self.conn.lock().await;

        conn.execute("DELETE FROM gift_items WHERE id = ?1", params![id])?;
        Ok(())
    }
}

#[async_trait(?Send)]
impl ItemRepository for SqliteItemRepository {
    async fn list_by_list(&self, list_id: Uuid, order: ItemOrder) -> DomainResult<Vec<Item>> {
        let conn = self.conn.lock().await;

        let order_by = match order {
            ItemOrder::Newest => "created_at DESC, rowid DESC",
            ItemOrder::Priority => "priority DESC, created_at DESC, rowid DESC",
        };
        let mut stmt = conn.prepare(&format!(
            "SELECT {} FROM gift_items WHERE list_id = ?1 ORDER BY {}",
            ITEM_COLUMNS, order_by
        ))?;

        let rows = stmt.query_map(params![list_id], row_to_item)?;
        let mut items = Vec::new();
        for row in rows {
            items.push(row?);
        }
        Ok(items)
    }
}

/// Convert a database row to Item
pub(super) fn row_to_item(row: &Row) -> rusqlite::Result<Item> {
    Ok(Item {
        id: row.get(0)?,
        list_id: row.get(1)?,
        name: row.get(2)?,
        description: row.get(3)?,
        link: row.get(4)?,
        image_url: row.get(5)?,
        quantity: row.get(6)?,
        reserved_count: row.get(7)?,
        priority: row.get(8)?,
        created_at: row.get(9)?,
        updated_at: row.get(10)?,
    })
}
