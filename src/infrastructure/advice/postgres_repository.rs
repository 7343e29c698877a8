//! PostgreSQL advice store

use async_trait::async_trait;
use sqlx::postgres::PgRow;
use sqlx::{PgPool, Row};

use crate::domain::{AdviceEntry, AdviceStore, DomainError, MatchPolicy};

/// Table layout backing one advice site
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AdviceTable {
    pub table: &'static str,
    pub key_column: &'static str,
    pub answer_column: &'static str,
    /// Column holding the asking patient's id, if the table records it
    pub asked_by_column: Option<&'static str>,
}

impl AdviceTable {
    /// Health questions and their answers
    pub const CHAT_HISTORY: Self = Self {
        table: "chat_history",
        key_column: "question",
        answer_column: "answer",
        asked_by_column: Some("user_id"),
    };

    /// Symptoms and suggested remedies
    pub const REMEDIES: Self = Self {
        table: "remedies",
        key_column: "symptom",
        answer_column: "remedy",
        asked_by_column: None,
    };

    fn select_sql(&self, policy: MatchPolicy) -> String {
        let asked_by = self.asked_by_column.unwrap_or("NULL::BIGINT");
        let condition = match policy {
            MatchPolicy::Exact => format!("{} = $1", self.key_column),
            MatchPolicy::Contains => format!(
                "(strpos(lower($1), lower({key})) > 0 OR strpos(lower({key}), lower($1)) > 0)",
                key = self.key_column
            ),
        };

        format!(
            "SELECT id, {key} AS key, {answer} AS answer, {asked_by} AS asked_by, created_at \
             FROM {table} WHERE {condition} ORDER BY id LIMIT 1",
            key = self.key_column,
            answer = self.answer_column,
            asked_by = asked_by,
            table = self.table,
            condition = condition,
        )
    }

    fn insert_sql(&self) -> String {
        match self.asked_by_column {
            Some(asked_by) => format!(
                "INSERT INTO {} ({}, {}, created_at, {}) VALUES ($1, $2, $3, $4) RETURNING id",
                self.table, self.key_column, self.answer_column, asked_by
            ),
            None => format!(
                "INSERT INTO {} ({}, {}, created_at) VALUES ($1, $2, $3) RETURNING id",
                self.table, self.key_column, self.answer_column
            ),
        }
    }
}

/// PostgreSQL implementation of AdviceStore over one table
#[derive(Debug, Clone)]
pub struct PostgresAdviceStore {
    pool: PgPool,
    table: AdviceTable,
}

impl PostgresAdviceStore {
    pub fn new(pool: PgPool, table: AdviceTable) -> Self {
        Self { pool, table }
    }
}

#[async_trait]
impl AdviceStore for PostgresAdviceStore {
    async fn find(
        &self,
        query: &str,
        policy: MatchPolicy,
    ) -> Result<Option<AdviceEntry>, DomainError> {
        let sql = self.table.select_sql(policy);

        let row = sqlx::query(&sql)
            .bind(query)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| {
                DomainError::storage(format!("Failed to query {}: {}", self.table.table, e))
            })?;

        row.as_ref().map(row_to_entry).transpose()
    }

    async fn insert(&self, mut entry: AdviceEntry) -> Result<AdviceEntry, DomainError> {
        let sql = self.table.insert_sql();

        let mut query = sqlx::query_scalar::<_, i64>(&sql)
            .bind(&entry.key)
            .bind(&entry.answer)
            .bind(entry.created_at);
        if self.table.asked_by_column.is_some() {
            query = query.bind(entry.asked_by);
        }

        entry.id = query.fetch_one(&self.pool).await.map_err(|e| {
            DomainError::storage(format!("Failed to insert into {}: {}", self.table.table, e))
        })?;

        Ok(entry)
    }
}

fn row_to_entry(row: &PgRow) -> Result<AdviceEntry, DomainError> {
    let map = |e: sqlx::Error| DomainError::storage(format!("Failed to read advice row: {}", e));

    Ok(AdviceEntry {
        id: row.try_get("id").map_err(map)?,
        key: row.try_get("key").map_err(map)?,
        answer: row.try_get("answer").map_err(map)?,
        asked_by: row.try_get("asked_by").map_err(map)?,
        created_at: row.try_get("created_at").map_err(map)?,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_exact_select_for_chat_history() {
        let sql = AdviceTable::CHAT_HISTORY.select_sql(MatchPolicy::Exact);
        assert!(sql.contains("FROM chat_history WHERE question = $1"));
        assert!(sql.contains("user_id AS asked_by"));
        assert!(sql.ends_with("ORDER BY id LIMIT 1"));
    }

    #[test]
    fn test_contains_select_for_remedies_is_bidirectional() {
        let sql = AdviceTable::REMEDIES.select_sql(MatchPolicy::Contains);
        assert!(sql.contains("strpos(lower($1), lower(symptom)) > 0"));
        assert!(sql.contains("strpos(lower(symptom), lower($1)) > 0"));
        assert!(sql.contains("NULL::BIGINT AS asked_by"));
    }

    #[test]
    fn test_insert_sql_columns() {
        assert_eq!(
            AdviceTable::REMEDIES.insert_sql(),
            "INSERT INTO remedies (symptom, remedy, created_at) VALUES ($1, $2, $3) RETURNING id"
        );
        assert!(AdviceTable::CHAT_HISTORY.insert_sql().contains("user_id) VALUES ($1, $2, $3, $4)"));
    }
}
