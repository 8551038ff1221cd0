use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Audit columns shared by persisted records.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Audit {
    /// Creation time, unix seconds
    pub created_at: i64,
    pub updated_at: Option<i64>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UserVo {
    pub id: i64,
    /// Login name
    pub username: String,
    #[serde(rename = "display")]
    pub display_name: String,
    #[serde(skip)]
    pub password_hash: String,
    pub tags: Vec<String>,
    pub scores: HashMap<String, f64>,
    #[serde(flatten)]
    pub audit: Audit,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Order {
    pub col: String,
    pub sort: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PageQuery {
    pub filter: HashMap<String, String>,
    pub orders: Vec<Order>,
    pub page: i32,
    pub size: i32,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PageRet {
    pub items: Vec<UserVo>,
    pub page_no: i32,
    pub page_size: i32,
    pub total: i64,
    pub has_next: bool,
}
