use serde::{Deserialize, Serialize};
use time::OffsetDateTime;

#[derive(Debug, Serialize)]
pub struct CourseSummary {
    pub id: i64,
    pub title: String,
    pub category: Option<String>,
    pub duration_weeks: i32,
    pub price_cents: i64,
    pub created_at: OffsetDateTime,
}

#[derive(Debug, Deserialize)]
pub struct CreateCourseRequest {
    pub title: String,
    pub description: String,
    pub category: Option<String>,
    #[serde(default = "default_duration_weeks")]
    pub duration_weeks: i32,
    #[serde(default)]
    pub price_cents: i64,
    #[serde(default)]
    pub is_published: bool,
}

#[derive(Debug, Deserialize)]
pub struct UpdateCourseRequest {
    pub title: Option<String>,
    pub description: Option<String>,
    pub category: Option<String>,
    pub duration_weeks: Option<i32>,
    pub price_cents: Option<i64>,
    pub is_published: Option<bool>,
}

#[derive(Debug, Deserialize)]
pub struct Pagination {
    #[serde(default = "default_limit")]
    pub limit: i64,
    #[serde(default)]
    pub offset: i64,
}

fn default_limit() -> i64 {
    20
}

fn default_duration_weeks() -> i32 {
    12
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pagination_defaults() {
        let p: Pagination = serde_json::from_str("{}").expect("deserialize");
        assert_eq!(p.limit, 20);
        assert_eq!(p.offset, 0);
    }

    #[test]
    fn create_request_defaults() {
        let req: CreateCourseRequest =
            serde_json::from_str(r#"{"title":"Rust 101","description":"Intro"}"#)
                .expect("deserialize");
        assert_eq!(req.duration_weeks, 12);
        assert_eq!(req.price_cents, 0);
        assert!(!req.is_published);
    }
}
