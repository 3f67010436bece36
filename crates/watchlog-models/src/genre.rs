use serde::{Deserialize, Serialize};

/// Catalog genre as returned by the genre list endpoints
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Genre {
    pub id: u32,
    pub name: String,
}
