use std::collections::BTreeMap;

use serde::Deserialize;
use serde_json::Value;

use crate::dispatch::errors::HandlerError;
use crate::dispatch::registry::{Handled, Handler};
use crate::model::{DomainObject, Model};
use crate::representation::{Link, SELF_REL};

/// Parses domain objects and action results wrapping one.
#[derive(Debug, Default, Clone, Copy)]
pub struct ObjectHandler;

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct ObjectRepr {
    #[serde(default)]
    title: String,
    #[serde(default)]
    domain_type: Option<String>,
    #[serde(default)]
    instance_id: Option<String>,
    #[serde(default)]
    members: BTreeMap<String, MemberRepr>,
    #[serde(default)]
    links: Vec<Link>,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct MemberRepr {
    member_type: String,
    #[serde(default)]
    value: Value,
}

impl Handler for ObjectHandler {
    fn handle(&self, representation: &Value) -> Result<Handled, HandlerError> {
        let target = if representation.get("resultType").is_some() {
            representation
                .get("result")
                .ok_or_else(|| HandlerError::missing_field("result"))?
        } else {
            representation
        };

        let repr = ObjectRepr::deserialize(target)?;
        let self_href = repr
            .links
            .iter()
            .find(|link| link.rel == SELF_REL)
            .map(|link| link.href.clone());

        let mut properties = BTreeMap::new();
        let mut actions = Vec::new();
        for (name, member) in repr.members {
            match member.member_type.as_str() {
                "property" => {
                    properties.insert(name, member.value);
                }
                "action" => actions.push(name),
                _ => {}
            }
        }

        Ok(Handled::terminal(Model::Object(DomainObject {
            self_href,
            title: repr.title,
            domain_type: repr.domain_type,
            instance_id: repr.instance_id,
            properties,
            actions,
        })))
    }
}
