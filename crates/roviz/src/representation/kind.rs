//! Structural classification of representations.

use std::fmt;

use serde::Serialize;
use serde_json::Value;

use super::{SERVICE_REL, rel_name, self_href};

/// Representation kinds understood by the handler registry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum RepresentationKind {
    /// A single domain object, or an action result wrapping one.
    DomainObject,
    /// An action result whose value is a list of object links.
    List,
    /// A single service exposing menu actions.
    Menu,
    /// The services list backing the application's top menu.
    MenuBar,
}

impl RepresentationKind {
    /// Every kind, in classification order.
    pub const ALL: [Self; 4] = [Self::List, Self::Menu, Self::MenuBar, Self::DomainObject];

    /// Canonical lowercase name.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::DomainObject => "domain_object",
            Self::List => "list",
            Self::Menu => "menu",
            Self::MenuBar => "menu_bar",
        }
    }
}

impl fmt::Display for RepresentationKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Determines the kind of a parsed representation.
///
/// Rules are checked in order:
///
/// 1. `resultType` present: `list` is a [`RepresentationKind::List`],
///    `domainobject` a [`RepresentationKind::DomainObject`]; any other result
///    type is unroutable.
/// 2. `serviceId` present: [`RepresentationKind::Menu`].
/// 3. `value` array of service links, or an empty `value` array on a
///    resource whose self link ends in `/services`:
///    [`RepresentationKind::MenuBar`].
/// 4. `domainType` with `instanceId`, or a `members` object:
///    [`RepresentationKind::DomainObject`].
///
/// Returns `None` when no rule matches, including for non-object JSON.
#[must_use]
pub fn classify(representation: &Value) -> Option<RepresentationKind> {
    let object = representation.as_object()?;

    if let Some(result_type) = object.get("resultType") {
        return match result_type.as_str()? {
            "list" => Some(RepresentationKind::List),
            "domainobject" => Some(RepresentationKind::DomainObject),
            _ => None,
        };
    }

    if object.contains_key("serviceId") {
        return Some(RepresentationKind::Menu);
    }

    if is_menu_bar(representation) {
        return Some(RepresentationKind::MenuBar);
    }

    let identified = object.contains_key("domainType") && object.contains_key("instanceId");
    if identified || object.get("members").is_some_and(Value::is_object) {
        return Some(RepresentationKind::DomainObject);
    }

    None
}

fn is_menu_bar(representation: &Value) -> bool {
    let Some(values) = representation.get("value").and_then(Value::as_array) else {
        return false;
    };

    if values.is_empty() {
        return self_href(representation).is_some_and(|href| href.ends_with("/services"));
    }

    values.iter().all(|value| {
        value
            .get("rel")
            .and_then(Value::as_str)
            .is_some_and(|rel| rel_name(rel) == SERVICE_REL)
    })
}

#[cfg(test)]
mod tests {
    use rstest::rstest;
    use serde_json::json;

    use super::*;

    #[rstest]
    #[case(json!({"resultType": "list", "result": {"value": []}}), Some(RepresentationKind::List))]
    #[case(
        json!({"resultType": "domainobject", "result": {}}),
        Some(RepresentationKind::DomainObject)
    )]
    #[case(json!({"resultType": "scalar", "result": {"value": 3}}), None)]
    #[case(
        json!({"serviceId": "simple.SimpleObjectMenu", "members": {}}),
        Some(RepresentationKind::Menu)
    )]
    #[case(
        json!({"domainType": "simple.SimpleObject", "instanceId": "0"}),
        Some(RepresentationKind::DomainObject)
    )]
    #[case(
        json!({"members": {"name": {"memberType": "property"}}}),
        Some(RepresentationKind::DomainObject)
    )]
    #[case(json!({"unexpected": true}), None)]
    #[case(json!("just a string"), None)]
    fn classifies_by_structure(
        #[case] representation: Value,
        #[case] expected: Option<RepresentationKind>,
    ) {
        assert_eq!(classify(&representation), expected);
    }

    #[test]
    fn services_list_is_a_menu_bar() {
        let representation = json!({
            "value": [{
                "rel": "urn:org.restfulobjects:rels/service;serviceId=\"simple.SimpleObjectMenu\"",
                "href": "http://localhost:8080/restful/services/simple.SimpleObjectMenu"
            }]
        });
        assert_eq!(classify(&representation), Some(RepresentationKind::MenuBar));
    }

    #[test]
    fn empty_services_list_needs_services_self_link() {
        let empty = json!({"value": []});
        assert_eq!(classify(&empty), None);

        let services = json!({
            "value": [],
            "links": [{"rel": "self", "href": "http://localhost:8080/restful/services"}]
        });
        assert_eq!(classify(&services), Some(RepresentationKind::MenuBar));
    }

    #[test]
    fn mixed_value_links_are_not_a_menu_bar() {
        let representation = json!({
            "value": [
                {"rel": "urn:org.restfulobjects:rels/service", "href": "a"},
                {"rel": "urn:org.restfulobjects:rels/element", "href": "b"}
            ]
        });
        assert_eq!(classify(&representation), None);
    }
}
