use serde::Deserialize;

#[derive(Debug, Deserialize)]
pub struct RecordResultRequest {
    pub course_id: i64,
    pub score: i32,
    pub grade: String,
    pub remarks: Option<String>,
}
