//! List Repository
//!
//! SQLite-backed storage for gift lists.

use async_trait::async_trait;
use rusqlite::{params, OptionalExtension, Row};
use uuid::Uuid;

use super::db::{map_write_error, SharedConnection};
use crate::domain::{DomainError, DomainResult, GiftList, ListSummary};
use crate::repository::{ListRepository, Repository};

const LIST_COLUMNS: &str =
    "id, user_id, title, description, theme_color, cover_image, event_date, slug, created_at, updated_at";

/// SQLite implementation of the list repository
pub struct SqliteListRepository {
    conn: SharedConnection,
}

impl SqliteListRepository {
    pub(super) fn new(conn: SharedConnection) -> Self {
        Self { conn }
    }
}

#[async_trait(?Send)]
impl Repository<GiftList> for SqliteListRepository {
    async fn create(&self, entity: &GiftList) -> DomainResult<GiftList> {
        let conn = self.conn.lock().await;

        conn.execute(
            "INSERT INTO gift_lists (id, user_id, title, description, theme_color, cover_image, event_date, slug, created_at, updated_at)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10)",
            params![
                entity.id,
                entity.user_id,
                entity.title,
                entity.description,
                entity.theme_color,
                entity.cover_image,
                entity.event_date,
                entity.slug,
                entity.created_at,
                entity.updated_at,
            ],
        )
        .map_err(|e| map_write_error(e, "List"))?;

        Ok(entity.clone())
    }

    async fn find_by_id(&self, id: Uuid) -> DomainResult<Option<GiftList>> {
        let conn = self.conn.lock().await;

        let list = conn
            .query_row(
                &format!("SELECT {} FROM gift_lists WHERE id = ?1", LIST_COLUMNS),
                params![id],
                row_to_list,
            )
            .optional()?;
        Ok(list)
    }

    async fn update(&self, entity: &GiftList) -> DomainResult<GiftList> {
        let conn = self.conn.lock().await;

        // slug, user_id and created_at are immutable
        let changed = conn
            .execute(
                "UPDATE gift_lists SET title = ?1, description = ?2, theme_color = ?3, cover_image = ?4, event_date = ?5, updated_at = ?6
                 WHERE id = ?7",
                params![
                    entity.title,
                    entity.description,
                    entity.theme_color,
                    entity.cover_image,
                    entity.event_date,
                    entity.updated_at,
                    entity.id,
                ],
            )
            .map_err(|e| map_write_error(e, "List"))?;

        if changed == 0 {
            return Err(DomainError::NotFound(format!("List {}", entity.id)));
        }
        Ok(entity.clone())
    }

    async fn delete(&self, id: Uuid) -> DomainResult<()> {
        let conn = self.conn.lock().await;

        conn.execute("DELETE FROM gift_lists WHERE id = ?1", params![id])?;
        Ok(())
    }
}

#[async_trait(?Send)]
impl ListRepository for SqliteListRepository {
    async fn find_by_slug(&self, slug: &str) -> DomainResult<Option<GiftList>> {
        let conn = self.conn.lock().await;

        let list = conn
            .query_row(
                &format!("SELECT {} FROM gift_lists WHERE slug = ?1", LIST_COLUMNS),
                params![slug],
                row_to_list,
            )
            .optional()?;
        Ok(list)
    }

    async fn list_by_owner(&self, user_id: Uuid) -> DomainResult<Vec<ListSummary>> {
        let conn = self.conn.lock().await;

        let mut stmt = conn.prepare(&format!(
            "SELECT {}, (SELECT COUNT(*) FROM gift_items i WHERE i.list_id = gift_lists.id)
             FROM gift_lists WHERE user_id = ?1
             ORDER BY created_at DESC, rowid DESC",
            LIST_COLUMNS
        ))?;

        let rows = stmt.query_map(params![user_id], |row| {
            Ok(ListSummary {
                list: row_to_list(row)?,
                item_count: row.get::<_, i64>(10)? as usize,
            })
        })?;

        let mut lists = Vec::new();
        for row in rows {
            lists.push(row?);
        }
        Ok(lists)
    }
}

/// Convert a database row to GiftList
fn row_to_list(row: &Row) -> rusqlite::Result<GiftList> {
    Ok(GiftList {
        id: row.get(0)?,
        user_id: row.get(1)?,
        title: row.get(2)?,
        description: row.get(3)?,
        theme_color: row.get(4)?,
        cover_image: row.get(5)?,
        event_date: row.get(6)?,
        slug: row.get(7)?,
        created_at: row.get(8)?,
        updated_at: row.get(9)?,
    })
}
