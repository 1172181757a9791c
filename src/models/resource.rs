use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ResourceType {
    pub id: String,
    #[serde(rename = "resource_type")]
    pub resource_type: String,
    #[serde(default)]
    pub collection_id: String,
    #[serde(default)]
    pub collection_name: String,
    #[serde(default)]
    pub created: String,
    #[serde(default)]
    pub updated: String,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ResourceExpand {
    #[serde(rename = "type", default, skip_serializing_if = "Option::is_none")]
    pub resource_type: Option<ResourceType>,
}

/// Catalog entry as stored by the backend
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Resource {
    pub id: String,
    pub title: String,
    pub url: String,
    pub description: String,
    /// Comma-separated
    #[serde(default)]
    pub tags: String,
    /// Id of the related ResourceType
    #[serde(rename = "type")]
    pub resource_type: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub expand: Option<ResourceExpand>,
    #[serde(default)]
    pub collection_id: String,
    #[serde(default)]
    pub collection_name: String,
    #[serde(default)]
    pub created: String,
    #[serde(default)]
    pub updated: String,
}

impl Resource {
    /// Tags split into individual entries
    pub fn tag_list(&self) -> Vec<&str> {
        self.tags.split(',').map(str::trim).filter(|t| !t.is_empty()).collect()
    }

    /// Label of the expanded type, when the backend embedded it
    pub fn type_label(&self) -> Option<&str> {
        self.expand
            .as_ref()
            .and_then(|e| e.resource_type.as_ref())
            .map(|t| t.resource_type.as_str())
    }
}

/// Fields sent on create and update. There is no identifier: the backend assigns it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ResourcePayload {
    pub title: String,
    pub url: String,
    pub description: String,
    #[serde(rename = "type")]
    pub resource_type: String,
    pub tags: String,
}
