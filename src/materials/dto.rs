use serde::Deserialize;

#[derive(Debug, Deserialize)]
pub struct RegisterMaterialRequest {
    pub title: String,
    /// Object key returned by a prior upload.
    pub object_key: String,
    pub content_type: String,
    pub size_bytes: Option<i64>,
}
