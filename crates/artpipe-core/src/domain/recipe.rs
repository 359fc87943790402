//! Build-recipe documents from the version's build-data branch.

use serde::Deserialize;

/// Parsed build-recipe document for one dist-git component
/// (`images/{distgit}.yml`).
///
/// Only the fields the resolver projects are modeled; the rest of the
/// document is ignored on deserialization.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ImageRecipe {
    /// Full image name, e.g. `openshift/ose-clusterresourceoverride-operator`.
    #[serde(default)]
    pub name: Option<String>,

    /// Whether the image ships in the release payload.
    #[serde(default)]
    pub for_payload: bool,

    /// Operator-framework CSV stanza. Its presence, not its content, is
    /// what marks a component as needing a bundle build.
    #[serde(default, rename = "update-csv")]
    pub update_csv: Option<serde_json::Value>,

    #[serde(default)]
    pub distgit: Option<RecipeDistgit>,
}

/// The recipe's `distgit` stanza.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct RecipeDistgit {
    /// Explicit Brew component name, overriding the `{distgit}-container`
    /// convention.
    #[serde(default)]
    pub component: Option<String>,

    /// Explicit bundle component name, overriding the naming convention.
    #[serde(default)]
    pub bundle_component: Option<String>,
}

impl ImageRecipe {
    /// Brew component name declared in the recipe, if any.
    #[must_use]
    pub fn component_override(&self) -> Option<&str> {
        self.distgit.as_ref()?.component.as_deref()
    }

    /// Bundle component name declared in the recipe, if any.
    #[must_use]
    pub fn bundle_component_override(&self) -> Option<&str> {
        self.distgit.as_ref()?.bundle_component.as_deref()
    }

    /// Whether this component ships a secondary bundle build.
    #[must_use]
    pub const fn requires_bundle_build(&self) -> bool {
        self.update_csv.is_some()
    }

    /// Release-payload tag, when the image is payload-included.
    ///
    /// The tag is the second path segment of the image `name` with a
    /// leading `ose-` stripped. `None` means "not part of the payload",
    /// which is an ordinary outcome, not a failure.
    #[must_use]
    pub fn image_stream_tag(&self) -> Option<String> {
        if !self.for_payload {
            return None;
        }
        let tag = self.name.as_deref()?.split('/').nth(1)?;
        Some(tag.strip_prefix("ose-").unwrap_or(tag).to_string())
    }
}
