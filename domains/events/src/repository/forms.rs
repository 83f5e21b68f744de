//! Registration form persistence

use sqlx::PgPool;
use uuid::Uuid;

use clubhub_common::{Error, Result};

use crate::domain::entities::{Form, FormStatus};

const FORM_COLUMNS: &str =
    "id, event_id, title, instructions, form_content, status, created_at, updated_at";

#[derive(Clone)]
pub struct FormRepository {
    pool: PgPool,
}

impl FormRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub async fn create(&self, form: &Form) -> Result<Form> {
        let created = sqlx::query_as::<_, Form>(&format!(
            r#"
            INSERT INTO forms (id, event_id, title, instructions, form_content, status,
                               created_at, updated_at)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
            RETURNING {FORM_COLUMNS}
            "#
        ))
        .bind(form.id)
        .bind(form.event_id)
        .bind(&form.title)
        .bind(&form.instructions)
        .bind(&form.form_content)
        .bind(form.status)
        .bind(form.created_at)
        .bind(form.updated_at)
        .fetch_one(&self.pool)
        .await
        .map_err(Error::Database)?;

        Ok(created)
    }

    /// Find a form within its event; the pair acts as a verified link.
    pub async fn find_in_event(&self, event_id: Uuid, form_id: Uuid) -> Result<Option<Form>> {
        let form = sqlx::query_as::<_, Form>(&format!(
            "SELECT {FORM_COLUMNS} FROM forms WHERE id = $1 AND event_id = $2"
        ))
        .bind(form_id)
        .bind(event_id)
        .fetch_optional(&self.pool)
        .await
        .map_err(Error::Database)?;

        Ok(form)
    }

    pub async fn list_by_status(
        &self,
        event_id: Uuid,
        status: FormStatus,
        skip: i64,
        limit: i64,
    ) -> Result<Vec<Form>> {
        let forms = sqlx::query_as::<_, Form>(&format!(
            r#"
            SELECT {FORM_COLUMNS} FROM forms
            WHERE event_id = $1 AND status = $2
            ORDER BY created_at DESC
            OFFSET $3 LIMIT $4
            "#
        ))
        .bind(event_id)
        .bind(status)
        .bind(skip)
        .bind(limit)
        .fetch_all(&self.pool)
        .await
        .map_err(Error::Database)?;

        Ok(forms)
    }

    pub async fn list_all(&self, event_id: Uuid, skip: i64, limit: i64) -> Result<Vec<Form>> {
        let forms = sqlx::query_as::<_, Form>(&format!(
            r#"
            SELECT {FORM_COLUMNS} FROM forms
            WHERE event_id = $1
            ORDER BY created_at DESC
            OFFSET $2 LIMIT $3
            "#
        ))
        .bind(event_id)
        .bind(skip)
        .bind(limit)
        .fetch_all(&self.pool)
        .await
        .map_err(Error::Database)?;

        Ok(forms)
    }

    pub async fn update(&self, form: &Form) -> Result<Form> {
        let updated = sqlx::query_as::<_, Form>(&format!(
            r#"
            UPDATE forms
            SET title = $2, instructions = $3, form_content = $4, status = $5,
                updated_at = NOW()
            WHERE id = $1
            RETURNING {FORM_COLUMNS}
            "#
        ))
        .bind(form.id)
        .bind(&form.title)
        .bind(&form.instructions)
        .bind(&form.form_content)
        .bind(form.status)
        .fetch_optional(&self.pool)
        .await
        .map_err(Error::Database)?;

        updated.ok_or_else(|| Error::NotFound("Form not found".to_string()))
    }

    /// Delete a form and, via FK cascade, its responses and their
    /// registrations.
    pub async fn delete(&self, id: Uuid) -> Result<()> {
        let result = sqlx::query("DELETE FROM forms WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(Error::Database)?;

        if result.rows_affected() == 0 {
            return Err(Error::NotFound("Form not found".to_string()));
        }

        Ok(())
    }
}
