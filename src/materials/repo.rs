use serde::{Deserialize, Serialize};
use sqlx::{FromRow, PgPool};
use time::OffsetDateTime;

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct CourseMaterial {
    pub id: i64,
    pub course_id: i64,
    pub title: String,
    #[serde(skip_serializing)]
    pub object_key: String,
    pub content_type: String,
    pub size_bytes: Option<i64>,
    pub created_at: OffsetDateTime,
}

impl CourseMaterial {
    pub async fn list_by_course(
        db: &PgPool,
        course_id: i64,
    ) -> anyhow::Result<Vec<CourseMaterial>> {
        let rows = sqlx::query_as::<_, CourseMaterial>(
            r#"
            SELECT id, course_id, title, object_key, content_type, size_bytes, created_at
            FROM course_materials
            WHERE course_id = $1
            ORDER BY created_at ASC
            "#,
        )
        .bind(course_id)
        .fetch_all(db)
        .await?;
        Ok(rows)
    }

    pub async fn find(db: &PgPool, id: i64) -> anyhow::Result<Option<CourseMaterial>> {
        let material = sqlx::query_as::<_, CourseMaterial>(
            r#"
            SELECT id, course_id, title, object_key, content_type, size_bytes, created_at
            FROM course_materials
            WHERE id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(db)
        .await?;
        Ok(material)
    }

    pub async fn create(
        db: &PgPool,
        course_id: i64,
        title: &str,
        object_key: &str,
        content_type: &str,
        size_bytes: Option<i64>,
    ) -> anyhow::Result<CourseMaterial> {
        let material = sqlx::query_as::<_, CourseMaterial>(
            r#"
            INSERT INTO course_materials (course_id, title, object_key, content_type, size_bytes)
            VALUES ($1, $2, $3, $4, $5)
            RETURNING id, course_id, title, object_key, content_type, size_bytes, created_at
            "#,
        )
        .bind(course_id)
        .bind(title)
        .bind(object_key)
        .bind(content_type)
        .bind(size_bytes)
        .fetch_one(db)
        .await?;
        Ok(material)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn object_key_stays_out_of_json() {
        let material = CourseMaterial {
            id: 1,
            course_id: 2,
            title: "Week 1 slides".into(),
            object_key: "materials/abc".into(),
            content_type: "application/pdf".into(),
            size_bytes: Some(1024),
            created_at: OffsetDateTime::UNIX_EPOCH,
        };
        let json = serde_json::to_string(&material).expect("serialize");
        assert!(!json.contains("materials/abc"));
        assert!(json.contains("Week 1 slides"));
    }
}
