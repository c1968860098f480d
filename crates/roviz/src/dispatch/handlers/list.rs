use serde::Deserialize;
use serde_json::Value;

use crate::dispatch::errors::HandlerError;
use crate::dispatch::registry::{Handled, Handler};
use crate::model::{Model, ObjectList};
use crate::representation::{self, ELEMENT_REL, Link};

use super::follow_links;

/// Parses list-valued action results and follows every element link.
///
/// Links with any other relation are dropped from the model.
#[derive(Debug, Default, Clone, Copy)]
pub struct ListHandler;

#[derive(Deserialize)]
struct ListResultRepr {
    result: ListRepr,
}

#[derive(Deserialize)]
struct ListRepr {
    #[serde(default)]
    value: Vec<Link>,
}

impl Handler for ListHandler {
    fn handle(&self, representation: &Value) -> Result<Handled, HandlerError> {
        let repr = ListResultRepr::deserialize(representation)?;
        let elements: Vec<Link> = repr
            .result
            .value
            .into_iter()
            .filter(|link| link.rel_name() == ELEMENT_REL)
            .collect();
        let follow_ups = follow_links(&elements)?;
        let title = representation::title(representation)
            .unwrap_or_default()
            .to_owned();

        Ok(Handled {
            model: Model::List(ObjectList {
                title,
                elements,
            }),
            follow_ups,
        })
    }
}
