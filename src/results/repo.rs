use serde::{Deserialize, Serialize};
use sqlx::{FromRow, PgPool};
use time::OffsetDateTime;

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct CourseResult {
    pub id: i64,
    pub user_id: i64,
    pub course_id: i64,
    pub score: i32,
    pub grade: String,
    pub remarks: Option<String>,
    pub recorded_at: OffsetDateTime,
}

#[derive(Debug, Clone, Serialize, FromRow)]
pub struct ResultWithCourse {
    pub id: i64,
    pub course_id: i64,
    pub course_title: String,
    pub score: i32,
    pub grade: String,
    pub remarks: Option<String>,
    pub recorded_at: OffsetDateTime,
}

impl CourseResult {
    pub async fn list_by_user(db: &PgPool, user_id: i64) -> anyhow::Result<Vec<ResultWithCourse>> {
        let rows = sqlx::query_as::<_, ResultWithCourse>(
            r#"
            SELECT r.id, r.course_id, c.title AS course_title, r.score, r.grade,
                   r.remarks, r.recorded_at
            FROM course_results r
            JOIN courses c ON c.id = r.course_id
            WHERE r.user_id = $1
            ORDER BY r.recorded_at DESC
            "#,
        )
        .bind(user_id)
        .fetch_all(db)
        .await?;
        Ok(rows)
    }

    pub async fn create(
        db: &PgPool,
        user_id: i64,
        course_id: i64,
        score: i32,
        grade: &str,
        remarks: Option<&str>,
    ) -> anyhow::Result<CourseResult> {
        let result = sqlx::query_as::<_, CourseResult>(
            r#"
            INSERT INTO course_results (user_id, course_id, score, grade, remarks)
            VALUES ($1, $2, $3, $4, $5)
            RETURNING id, user_id, course_id, score, grade, remarks, recorded_at
            "#,
        )
        .bind(user_id)
        .bind(course_id)
        .bind(score)
        .bind(grade)
        .bind(remarks)
        .fetch_one(db)
        .await?;
        Ok(result)
    }
}
