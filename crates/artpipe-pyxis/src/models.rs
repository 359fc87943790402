//! Response models for the Pyxis endpoints the resolver touches.

use serde::Deserialize;

/// `GET /v1/repositories/registry/{registry}/repository/{repo}/images`
#[derive(Debug, Deserialize)]
pub(crate) struct RepositoryImagesResponse {
    #[serde(default)]
    pub data: Vec<ImageEntry>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct ImageEntry {
    pub brew: BrewRef,
}

#[derive(Debug, Deserialize)]
pub(crate) struct BrewRef {
    pub package: String,
}

/// `GET /v1/repositories?filter=repository=={name}`
#[derive(Debug, Deserialize)]
pub(crate) struct RepositoriesResponse {
    #[serde(default)]
    pub data: Vec<RepositoryEntry>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct RepositoryEntry {
    #[serde(default, rename = "_id")]
    pub id: Option<String>,
}
