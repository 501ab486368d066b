use serde::{Deserialize, Serialize};
use sqlx::{FromRow, PgPool};
use time::OffsetDateTime;

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct InternshipApplication {
    pub id: i64,
    pub full_name: String,
    pub email: String,
    pub phone: String,
    pub university: Option<String>,
    pub course_of_study: Option<String>,
    pub cover_letter: String,
    pub submitted_at: OffsetDateTime,
}

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct PitchDeckApplication {
    pub id: i64,
    pub full_name: String,
    pub email: String,
    pub phone: String,
    pub startup_name: String,
    pub summary: String,
    pub deck_key: Option<String>,
    pub submitted_at: OffsetDateTime,
}

impl InternshipApplication {
    pub async fn create(
        db: &PgPool,
        full_name: &str,
        email: &str,
        phone: &str,
        university: Option<&str>,
        course_of_study: Option<&str>,
        cover_letter: &str,
    ) -> anyhow::Result<InternshipApplication> {
        let application = sqlx::query_as::<_, InternshipApplication>(
            r#"
            INSERT INTO internship_applications
                (full_name, email, phone, university, course_of_study, cover_letter)
            VALUES ($1, $2, $3, $4, $5, $6)
            RETURNING id, full_name, email, phone, university, course_of_study,
                      cover_letter, submitted_at
            "#,
        )
        .bind(full_name)
        .bind(email)
        .bind(phone)
        .bind(university)
        .bind(course_of_study)
        .bind(cover_letter)
        .fetch_one(db)
        .await?;
        Ok(application)
    }
}

impl PitchDeckApplication {
    pub async fn create(
        db: &PgPool,
        full_name: &str,
        email: &str,
        phone: &str,
        startup_name: &str,
        summary: &str,
        deck_key: Option<&str>,
    ) -> anyhow::Result<PitchDeckApplication> {
        let application = sqlx::query_as::<_, PitchDeckApplication>(
            r#"
            INSERT INTO pitch_deck_applications
                (full_name, email, phone, startup_name, summary, deck_key)
            VALUES ($1, $2, $3, $4, $5, $6)
            RETURNING id, full_name, email, phone, startup_name, summary,
                      deck_key, submitted_at
            "#,
        )
        .bind(full_name)
        .bind(email)
        .bind(phone)
        .bind(startup_name)
        .bind(summary)
        .bind(deck_key)
        .fetch_one(db)
        .await?;
        Ok(application)
    }
}
