use serde::{Deserialize, Serialize};
use sqlx::{FromRow, PgPool};
use time::OffsetDateTime;

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Course {
    pub id: i64,
    pub title: String,
    pub description: String,
    pub category: Option<String>,
    pub duration_weeks: i32,
    pub price_cents: i64,
    pub is_published: bool,
    pub created_at: OffsetDateTime,
    pub updated_at: OffsetDateTime,
}

impl Course {
    pub async fn list_published(
        db: &PgPool,
        limit: i64,
        offset: i64,
    ) -> anyhow::Result<Vec<Course>> {
        let rows = sqlx::query_as::<_, Course>(
            r#"
            SELECT id, title, description, category, duration_weeks,
                   price_cents, is_published, created_at, updated_at
            FROM courses
            WHERE is_published
            ORDER BY created_at DESC
            LIMIT $1 OFFSET $2
            "#,
        )
        .bind(limit)
        .bind(offset)
        .fetch_all(db)
        .await?;
        Ok(rows)
    }

    pub async fn find_published(db: &PgPool, id: i64) -> anyhow::Result<Option<Course>> {
        let course = sqlx::query_as::<_, Course>(
            r#"
            SELECT id, title, description, category, duration_weeks,
                   price_cents, is_published, created_at, updated_at
            FROM courses
            WHERE id = $1 AND is_published
            "#,
        )
        .bind(id)
        .fetch_optional(db)
        .await?;
        Ok(course)
    }

    pub async fn find(db: &PgPool, id: i64) -> anyhow::Result<Option<Course>> {
        let course = sqlx::query_as::<_, Course>(
            r#"
            SELECT id, title, description, category, duration_weeks,
                   price_cents, is_published, created_at, updated_at
            FROM courses
            WHERE id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(db)
        .await?;
        Ok(course)
    }

    pub async fn create(
        db: &PgPool,
        title: &str,
        description: &str,
        category: Option<&str>,
        duration_weeks: i32,
        price_cents: i64,
        is_published: bool,
    ) -> anyhow::Result<Course> {
        let course = sqlx::query_as::<_, Course>(
            r#"
            INSERT INTO courses (title, description, category, duration_weeks,
                                 price_cents, is_published)
            VALUES ($1, $2, $3, $4, $5, $6)
            RETURNING id, title, description, category, duration_weeks,
                      price_cents, is_published, created_at, updated_at
            "#,
        )
        .bind(title)
        .bind(description)
        .bind(category)
        .bind(duration_weeks)
        .bind(price_cents)
        .bind(is_published)
        .fetch_one(db)
        .await?;
        Ok(course)
    }

    /// Partial update; absent fields keep their stored value.
    #[allow(clippy::too_many_arguments)]
    pub async fn update(
        db: &PgPool,
        id: i64,
        title: Option<&str>,
        description: Option<&str>,
        category: Option<&str>,
        duration_weeks: Option<i32>,
        price_cents: Option<i64>,
        is_published: Option<bool>,
    ) -> anyhow::Result<Option<Course>> {
        let course = sqlx::query_as::<_, Course>(
            r#"
            UPDATE courses
            SET title = COALESCE($2, title),
                description = COALESCE($3, description),
                category = COALESCE($4, category),
                duration_weeks = COALESCE($5, duration_weeks),
                price_cents = COALESCE($6, price_cents),
                is_published = COALESCE($7, is_published),
                updated_at = now()
            WHERE id = $1
            RETURNING id, title, description, category, duration_weeks,
                      price_cents, is_published, created_at, updated_at
            "#,
        )
        .bind(id)
        .bind(title)
        .bind(description)
        .bind(category)
        .bind(duration_weeks)
        .bind(price_cents)
        .bind(is_published)
        .fetch_optional(db)
        .await?;
        Ok(course)
    }

    /// Dependent rows (materials, enrollments, results) go with the course
    /// via FK cascade.
    pub async fn delete(db: &PgPool, id: i64) -> anyhow::Result<bool> {
        let result = sqlx::query("DELETE FROM courses WHERE id = $1")
            .bind(id)
            .execute(db)
            .await?;
        Ok(result.rows_affected() > 0)
    }

    pub async fn material_keys(db: &PgPool, id: i64) -> anyhow::Result<Vec<String>> {
        let keys = sqlx::query_scalar::<_, String>(
            "SELECT object_key FROM course_materials WHERE course_id = $1",
        )
        .bind(id)
        .fetch_all(db)
        .await?;
        Ok(keys)
    }
}
