use serde::Serialize;

/// One row of a project's version history.
#[derive(Debug, Serialize, Clone, PartialEq, Default)]
pub struct VersionRecord {
    pub file_version: String,
    /// `YYYY-MM-DD`; serialized as `null` when the page date didn't parse.
    pub release_date: Option<String>,
    pub download_count: String,
    pub rating: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub download_link: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub file_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub file_name: Option<String>,
}

/// Response body for `GET /project/{id}/files`.
#[derive(Debug, Serialize, Clone)]
pub struct ProjectFiles {
    #[serde(rename = "projectId")]
    pub project_id: u32,
    pub versions: Vec<VersionRecord>,
}
