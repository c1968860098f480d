use std::collections::BTreeMap;

use serde::Deserialize;
use serde_json::Value;

use crate::dispatch::errors::HandlerError;
use crate::dispatch::registry::{Handled, Handler};
use crate::model::{Menu, MenuAction, MenuBar, Model};
use crate::representation::{DETAILS_REL, Link};

use super::follow_links;

/// Parses a single service into a menu of its actions.
#[derive(Debug, Default, Clone, Copy)]
pub struct MenuHandler;

/// Parses the services list and fetches every service it names.
#[derive(Debug, Default, Clone, Copy)]
pub struct MenuBarHandler;

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct ServiceRepr {
    service_id: String,
    #[serde(default)]
    title: String,
    #[serde(default)]
    members: BTreeMap<String, ServiceMemberRepr>,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct ServiceMemberRepr {
    member_type: String,
    #[serde(default)]
    links: Vec<Link>,
}

#[derive(Deserialize)]
struct ServicesRepr {
    value: Vec<Link>,
}

impl Handler for MenuHandler {
    fn handle(&self, representation: &Value) -> Result<Handled, HandlerError> {
        let repr = ServiceRepr::deserialize(representation)?;
        let actions = repr
            .members
            .into_iter()
            .filter(|(_, member)| member.member_type == "action")
            .map(|(id, member)| MenuAction {
                id,
                href: member
                    .links
                    .into_iter()
                    .find(|link| link.rel_name() == DETAILS_REL)
                    .map(|link| link.href),
            })
            .collect();

        Ok(Handled::terminal(Model::Menu(Menu {
            service_id: repr.service_id,
            title: repr.title,
            actions,
        })))
    }
}

impl Handler for MenuBarHandler {
    fn handle(&self, representation: &Value) -> Result<Handled, HandlerError> {
        let repr = ServicesRepr::deserialize(representation)?;
        let follow_ups = follow_links(&repr.value)?;
        Ok(Handled {
            model: Model::MenuBar(MenuBar {
                entries: repr.value,
            }),
            follow_ups,
        })
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn menu_lists_action_members_only() {
        let representation = json!({
            "serviceId": "simple.SimpleObjectMenu",
            "title": "Simple Objects",
            "members": {
                "listAll": {
                    "memberType": "action",
                    "links": [{
                        "rel": "urn:org.restfulobjects:rels/details;action=\"listAll\"",
                        "href": "http://localhost/services/simple.SimpleObjectMenu/actions/listAll"
                    }]
                },
                "create": {"memberType": "action"},
                "hint": {"memberType": "property", "value": "x"}
            }
        });

        let handled = MenuHandler.handle(&representation).expect("handle");
        assert!(handled.follow_ups.is_empty());
        let Model::Menu(menu) = handled.model else {
            panic!("expected menu model");
        };
        assert_eq!(menu.title, "Simple Objects");
        let ids: Vec<_> = menu.actions.iter().map(|action| action.id.as_str()).collect();
        assert_eq!(ids, vec!["create", "listAll"]);
        assert!(menu.actions.iter().any(|action| action.href.is_some()));
    }

    #[test]
    fn menu_bar_follows_every_service() {
        let representation = json!({
            "value": [
                {"rel": "urn:org.restfulobjects:rels/service;serviceId=\"a\"", "href": "http://localhost/services/a", "title": "A"},
                {"rel": "urn:org.restfulobjects:rels/service;serviceId=\"b\"", "href": "http://localhost/services/b", "title": "B"}
            ]
        });

        let handled = MenuBarHandler.handle(&representation).expect("handle");
        let titles: Vec<_> = handled.follow_ups.iter().map(|f| f.title.as_str()).collect();
        assert_eq!(titles, vec!["A", "B"]);
    }

    #[test]
    fn service_without_id_fails_to_decode() {
        let error = MenuHandler
            .handle(&json!({"title": "No id"}))
            .expect_err("decode");
        assert!(matches!(error, HandlerError::Decode(_)));
    }
}
