use serde::{Deserialize, Serialize};
use sqlx::{FromRow, PgPool};
use time::OffsetDateTime;

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Enrollment {
    pub id: i64,
    pub user_id: i64,
    pub course_id: i64,
    pub status: String,
    pub enrolled_at: OffsetDateTime,
}

/// Enrollment joined with its course title for the listing endpoint.
#[derive(Debug, Clone, Serialize, FromRow)]
pub struct EnrollmentWithCourse {
    pub id: i64,
    pub course_id: i64,
    pub course_title: String,
    pub status: String,
    pub enrolled_at: OffsetDateTime,
}

impl Enrollment {
    /// Returns `None` when the user is already enrolled; uniqueness lives
    /// on (user_id, course_id).
    pub async fn enroll(
        db: &PgPool,
        user_id: i64,
        course_id: i64,
    ) -> anyhow::Result<Option<Enrollment>> {
        let enrollment = sqlx::query_as::<_, Enrollment>(
            r#"
            INSERT INTO enrollments (user_id, course_id, status)
            VALUES ($1, $2, 'active')
            ON CONFLICT (user_id, course_id) DO NOTHING
            RETURNING id, user_id, course_id, status, enrolled_at
            "#,
        )
        .bind(user_id)
        .bind(course_id)
        .fetch_optional(db)
        .await?;
        Ok(enrollment)
    }

    pub async fn list_by_user(
        db: &PgPool,
        user_id: i64,
    ) -> anyhow::Result<Vec<EnrollmentWithCourse>> {
        let rows = sqlx::query_as::<_, EnrollmentWithCourse>(
            r#"
            SELECT e.id, e.course_id, c.title AS course_title, e.status, e.enrolled_at
            FROM enrollments e
            JOIN courses c ON c.id = e.course_id
            WHERE e.user_id = $1
            ORDER BY e.enrolled_at DESC
            "#,
        )
        .bind(user_id)
        .fetch_all(db)
        .await?;
        Ok(rows)
    }

    pub async fn exists(db: &PgPool, user_id: i64, course_id: i64) -> anyhow::Result<bool> {
        let exists = sqlx::query_scalar::<_, bool>(
            r#"
            SELECT EXISTS(
                SELECT 1 FROM enrollments WHERE user_id = $1 AND course_id = $2
            )
            "#,
        )
        .bind(user_id)
        .bind(course_id)
        .fetch_one(db)
        .await?;
        Ok(exists)
    }
}
