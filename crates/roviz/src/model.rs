//! Domain models produced by the standard handlers.

use std::collections::BTreeMap;

use serde::Serialize;
use serde_json::Value;

use crate::representation::{Link, RepresentationKind};

/// A parsed domain object.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DomainObject {
    /// Canonical URL of the object.
    pub self_href: Option<String>,
    /// Object title as rendered by the server.
    pub title: String,
    /// Logical type name (for example `simple.SimpleObject`).
    pub domain_type: Option<String>,
    /// Identifier of the instance within its type.
    pub instance_id: Option<String>,
    /// Property members and their current values.
    pub properties: BTreeMap<String, Value>,
    /// Names of the action members.
    pub actions: Vec<String>,
}

/// Links returned by a list-valued action.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ObjectList {
    /// Label of the list, when the server supplies one.
    pub title: String,
    /// Element links in server order.
    pub elements: Vec<Link>,
}

impl ObjectList {
    /// Number of elements.
    #[must_use]
    pub fn len(&self) -> usize {
        self.elements.len()
    }

    /// Returns true when the list holds no elements.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.elements.is_empty()
    }
}

/// One action offered by a service menu.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MenuAction {
    /// Action identifier.
    pub id: String,
    /// Details link of the action.
    pub href: Option<String>,
}

/// A service rendered as a menu.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Menu {
    /// Service identifier.
    pub service_id: String,
    /// Menu label.
    pub title: String,
    /// Actions in member order.
    pub actions: Vec<MenuAction>,
}

/// The application's top menu: one entry per service.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct MenuBar {
    /// Service links in server order.
    pub entries: Vec<Link>,
}

/// Output of a handler.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Model {
    /// See [`DomainObject`].
    Object(DomainObject),
    /// See [`ObjectList`].
    List(ObjectList),
    /// See [`Menu`].
    Menu(Menu),
    /// See [`MenuBar`].
    MenuBar(MenuBar),
}

impl Model {
    /// Representation kind the model was built from.
    #[must_use]
    pub const fn kind(&self) -> RepresentationKind {
        match self {
            Self::Object(_) => RepresentationKind::DomainObject,
            Self::List(_) => RepresentationKind::List,
            Self::Menu(_) => RepresentationKind::Menu,
            Self::MenuBar(_) => RepresentationKind::MenuBar,
        }
    }
}
