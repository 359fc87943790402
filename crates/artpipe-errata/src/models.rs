//! Response models for the Errata Tool endpoints the resolver touches.
//!
//! These mirror only the slices of the documents the lookups project;
//! everything else is ignored on deserialization. The wire shapes are
//! external and versioned, which is why they stay private to this crate
//! and convert into core domain types at the port boundary.

use artpipe_core::{CdnRepoDetails, VariantRef};
use serde::Deserialize;

/// `GET /api/v1/cdn_repo_package_tags?filter[package_name]=...`
#[derive(Debug, Deserialize)]
pub(crate) struct PackageTagsResponse {
    #[serde(default)]
    pub data: Vec<PackageTagEntry>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct PackageTagEntry {
    pub relationships: PackageTagRelationships,
}

#[derive(Debug, Deserialize)]
pub(crate) struct PackageTagRelationships {
    pub cdn_repo: NamedResource,
}

#[derive(Debug, Deserialize)]
pub(crate) struct NamedResource {
    pub name: String,
}

/// `GET /api/v1/cdn_repos/{name}`
#[derive(Debug, Deserialize)]
pub(crate) struct CdnRepoResponse {
    pub data: CdnRepoData,
}

#[derive(Debug, Default, Deserialize)]
pub(crate) struct CdnRepoData {
    #[serde(default)]
    pub id: Option<i64>,
    #[serde(default)]
    pub attributes: CdnRepoAttributes,
    #[serde(default)]
    pub relationships: CdnRepoRelationships,
}

#[derive(Debug, Default, Deserialize)]
pub(crate) struct CdnRepoAttributes {
    #[serde(default)]
    pub external_name: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
pub(crate) struct CdnRepoRelationships {
    #[serde(default)]
    pub variants: Vec<IdNamePair>,
    #[serde(default)]
    pub packages: Vec<NamedResource>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct IdNamePair {
    pub id: i64,
    pub name: String,
}

impl From<CdnRepoData> for CdnRepoDetails {
    fn from(data: CdnRepoData) -> Self {
        Self {
            id: data.id,
            external_name: data.attributes.external_name,
            variants: data
                .relationships
                .variants
                .into_iter()
                .map(|v| VariantRef {
                    id: v.id,
                    name: v.name,
                })
                .collect(),
            packages: data
                .relationships
                .packages
                .into_iter()
                .map(|p| p.name)
                .collect(),
        }
    }
}

/// `GET /api/v1/variants/{id}`
#[derive(Debug, Deserialize)]
pub(crate) struct VariantResponse {
    pub data: VariantData,
}

#[derive(Debug, Default, Deserialize)]
pub(crate) struct VariantData {
    #[serde(default)]
    pub attributes: VariantAttributes,
}

#[derive(Debug, Default, Deserialize)]
pub(crate) struct VariantAttributes {
    #[serde(default)]
    pub relationships: VariantRelationships,
}

#[derive(Debug, Default, Deserialize)]
pub(crate) struct VariantRelationships {
    #[serde(default)]
    pub product_version: Option<IdOnly>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct IdOnly {
    pub id: i64,
}
