//! Hypermedia representation helpers shared by the dispatcher and handlers.
//!
//! Representations follow the Restful Objects layout: a JSON object with a
//! `links` array whose `self` link names the resource's canonical URL. Only
//! the fields the dispatch core relies on are modelled here.

mod kind;

use serde::{Deserialize, Serialize};
use serde_json::Value;

pub use self::kind::{RepresentationKind, classify};

/// Relation naming a representation's own canonical URL.
pub const SELF_REL: &str = "self";
/// Relation of a service link inside the services list.
pub const SERVICE_REL: &str = "urn:org.restfulobjects:rels/service";
/// Relation of an element link inside an object list.
pub const ELEMENT_REL: &str = "urn:org.restfulobjects:rels/element";
/// Relation prefix of an action member's details link.
pub const DETAILS_REL: &str = "urn:org.restfulobjects:rels/details";

/// A hypermedia link.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct Link {
    /// Relation, possibly carrying `;name="value"` parameters.
    pub rel: String,
    /// Target URL.
    pub href: String,
    /// HTTP method advertised for the link.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub method: Option<String>,
    /// Label of the target resource.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
}

impl Link {
    /// Relation without its parameters.
    ///
    /// `urn:org.restfulobjects:rels/service;serviceId="simple.Menu"` yields
    /// `urn:org.restfulobjects:rels/service`.
    #[must_use]
    pub fn rel_name(&self) -> &str {
        rel_name(&self.rel)
    }

    /// Title, or an empty string when the link carries none.
    #[must_use]
    pub fn title_or_empty(&self) -> &str {
        self.title.as_deref().unwrap_or_default()
    }
}

pub(crate) fn rel_name(rel: &str) -> &str {
    rel.split_once(';').map_or(rel, |(name, _)| name)
}

/// Returns the href of the `self` link, if the representation carries one.
///
/// Absence is a normal outcome: action results and some list
/// representations do not describe themselves.
#[must_use]
pub fn self_href(representation: &Value) -> Option<&str> {
    representation
        .get("links")?
        .as_array()?
        .iter()
        .find(|link| link.get("rel").and_then(Value::as_str) == Some(SELF_REL))?
        .get("href")?
        .as_str()
}

/// Top-level `title` field of the representation.
#[must_use]
pub fn title(representation: &Value) -> Option<&str> {
    representation.get("title")?.as_str()
}
