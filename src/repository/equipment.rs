//! Equipment repository (`serial_numbers` table)

use async_trait::async_trait;
use sqlx::{Pool, Postgres, QueryBuilder};

use super::EquipmentStore;
use crate::{
    error::{AppError, AppResult},
    models::{
        equipment::{Equipment, EquipmentChanges, EquipmentFilter, NewEquipment, Page, SerialMatch},
        status::Status,
    },
};

const COLUMNS: &str = "auto_id, device_type_id, manufacturer_id, serial_number, status";

#[derive(Clone)]
pub struct PgEquipmentRepository {
    pool: Pool<Postgres>,
}

impl PgEquipmentRepository {
    pub fn new(pool: Pool<Postgres>) -> Self {
        Self { pool }
    }
}

fn not_found(auto_id: i32) -> AppError {
    AppError::NotFound(format!("equipment {} does not exist in database", auto_id))
}

/// Escape LIKE metacharacters so `fragment` matches literally
pub(crate) fn escape_like(fragment: &str) -> String {
    let mut escaped = String::with_capacity(fragment.len());
    for c in fragment.chars() {
        if matches!(c, '\\' | '%' | '_') {
            escaped.push('\\');
        }
        escaped.push(c);
    }
    escaped
}

#[async_trait]
impl EquipmentStore for PgEquipmentRepository {
    async fn list(&self, filter: &EquipmentFilter, page: Page) -> AppResult<Vec<Equipment>> {
        let mut builder: QueryBuilder<Postgres> =
            QueryBuilder::new(format!("SELECT {} FROM serial_numbers WHERE TRUE", COLUMNS));

        if let Some(device_type_id) = filter.device_type_id {
            builder.push(" AND device_type_id = ").push_bind(device_type_id);
        }
        if let Some(manufacturer_id) = filter.manufacturer_id {
            builder.push(" AND manufacturer_id = ").push_bind(manufacturer_id);
        }
        match &filter.serial {
            Some(SerialMatch::Exact(sn)) => {
                builder.push(" AND serial_number = ").push_bind(sn.clone());
            }
            Some(SerialMatch::Contains(fragment)) => {
                builder
                    .push(" AND serial_number LIKE ")
                    .push_bind(format!("%{}%", escape_like(fragment)));
            }
            None => {}
        }
        if filter.active_only {
            builder.push(" AND status = 'active'");
        }

        builder
            .push(" ORDER BY auto_id LIMIT ")
            .push_bind(page.limit)
            .push(" OFFSET ")
            .push_bind(page.offset);

        let rows = builder
            .build_query_as::<Equipment>()
            .fetch_all(&self.pool)
            .await?;
        Ok(rows)
    }

    async fn get_by_id(&self, auto_id: i32) -> AppResult<Option<Equipment>> {
        let row = sqlx::query_as::<_, Equipment>(&format!(
            "SELECT {} FROM serial_numbers WHERE auto_id = $1",
            COLUMNS
        ))
        .bind(auto_id)
        .fetch_optional(&self.pool)
        .await?;
        Ok(row)
    }

    async fn get_by_serial_number(&self, serial_number: &str) -> AppResult<Option<Equipment>> {
        let row = sqlx::query_as::<_, Equipment>(&format!(
            "SELECT {} FROM serial_numbers WHERE serial_number = $1",
            COLUMNS
        ))
        .bind(serial_number)
        .fetch_optional(&self.pool)
        .await?;
        Ok(row)
    }

    async fn insert(&self, data: &NewEquipment) -> AppResult<Equipment> {
        let row = sqlx::query_as::<_, Equipment>(&format!(
            r#"
            INSERT INTO serial_numbers (device_type_id, manufacturer_id, serial_number, status)
            VALUES ($1, $2, $3, $4)
            RETURNING {}
            "#,
            COLUMNS
        ))
        .bind(data.device_type_id)
        .bind(data.manufacturer_id)
        .bind(data.serial_number.as_str())
        .bind(Status::Active)
        .fetch_one(&self.pool)
        .await?;
        Ok(row)
    }

    async fn update_serial_number(&self, auto_id: i32, serial_number: &str) -> AppResult<()> {
        let result = sqlx::query("UPDATE serial_numbers SET serial_number = $1 WHERE auto_id = $2")
            .bind(serial_number)
            .bind(auto_id)
            .execute(&self.pool)
            .await?;
        if result.rows_affected() == 0 {
            return Err(not_found(auto_id));
        }
        Ok(())
    }

    async fn update(&self, auto_id: i32, changes: &EquipmentChanges) -> AppResult<()> {
        let result = sqlx::query(
            r#"
            UPDATE serial_numbers
            SET serial_number = $1, device_type_id = $2, manufacturer_id = $3
            WHERE auto_id = $4
            "#,
        )
        .bind(&changes.serial_number)
        .bind(changes.device_type_id)
        .bind(changes.manufacturer_id)
        .bind(auto_id)
        .execute(&self.pool)
        .await?;
        if result.rows_affected() == 0 {
            return Err(not_found(auto_id));
        }
        Ok(())
    }

    async fn update_status(&self, auto_id: i32, status: Status) -> AppResult<()> {
        let result = sqlx::query("UPDATE serial_numbers SET status = $1 WHERE auto_id = $2")
            .bind(status)
            .bind(auto_id)
            .execute(&self.pool)
            .await?;
        if result.rows_affected() == 0 {
            return Err(not_found(auto_id));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_escape_like() {
        assert_eq!(escape_like("SN-1"), "SN-1");
        assert_eq!(escape_like("50%_off"), "50\\%\\_off");
        assert_eq!(escape_like("a\\b"), "a\\\\b");
    }
}
