//! Handler registry: classification ruleset plus one handler per kind.
//!
//! The registry owns both halves of routing. [`HandlerRegistry::classify`]
//! maps a representation onto the closed [`RepresentationKind`] set and
//! [`HandlerRegistry::handler`] resolves that kind with an exhaustive match,
//! so adding a kind forces every registry slot to be filled.

use std::fmt;

use serde_json::Value;

use crate::model::Model;
use crate::representation::{self, RepresentationKind};

use super::errors::HandlerError;
use super::handlers::{ListHandler, MenuBarHandler, MenuHandler, ObjectHandler};

/// A request a handler wants started once its entry is consumed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FollowUp {
    /// URL to fetch.
    pub url: String,
    /// Label for the new entry.
    pub title: String,
}

impl FollowUp {
    /// Creates a follow-up request.
    pub fn new(url: impl Into<String>, title: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            title: title.into(),
        }
    }
}

/// What a handler produced for one representation.
#[derive(Debug, Clone, PartialEq)]
pub struct Handled {
    /// Parsed model.
    pub model: Model,
    /// Requests to cascade, in triggering order.
    pub follow_ups: Vec<FollowUp>,
}

impl Handled {
    /// A model with no follow-up requests.
    #[must_use]
    pub const fn terminal(model: Model) -> Self {
        Self {
            model,
            follow_ups: Vec::new(),
        }
    }
}

/// Turns one kind of representation into a model.
pub trait Handler: Send + Sync {
    /// Parses `representation`.
    ///
    /// # Errors
    ///
    /// Returns a [`HandlerError`] when the representation lacks the fields
    /// the handler needs.
    fn handle(&self, representation: &Value) -> Result<Handled, HandlerError>;
}

/// Registry consulted by the [`Dispatcher`](super::Dispatcher).
pub struct HandlerRegistry {
    object: Box<dyn Handler>,
    list: Box<dyn Handler>,
    menu: Box<dyn Handler>,
    menu_bar: Box<dyn Handler>,
}

impl HandlerRegistry {
    /// Registry wired with the standard handlers.
    #[must_use]
    pub fn standard() -> Self {
        Self {
            object: Box::new(ObjectHandler),
            list: Box::new(ListHandler),
            menu: Box::new(MenuHandler),
            menu_bar: Box::new(MenuBarHandler),
        }
    }

    /// Replaces the handler for `kind`.
    #[must_use]
    pub fn with_handler(
        mut self,
        kind: RepresentationKind,
        handler: impl Handler + 'static,
    ) -> Self {
        *self.slot_mut(kind) = Box::new(handler);
        self
    }

    /// Classifies a representation; `None` means no handler applies.
    #[must_use]
    pub fn classify(&self, representation: &Value) -> Option<RepresentationKind> {
        representation::classify(representation)
    }

    /// Handler responsible for `kind`.
    #[must_use]
    pub fn handler(&self, kind: RepresentationKind) -> &dyn Handler {
        match kind {
            RepresentationKind::DomainObject => self.object.as_ref(),
            RepresentationKind::List => self.list.as_ref(),
            RepresentationKind::Menu => self.menu.as_ref(),
            RepresentationKind::MenuBar => self.menu_bar.as_ref(),
        }
    }

    fn slot_mut(&mut self, kind: RepresentationKind) -> &mut Box<dyn Handler> {
        match kind {
            RepresentationKind::DomainObject => &mut self.object,
            RepresentationKind::List => &mut self.list,
            RepresentationKind::Menu => &mut self.menu,
            RepresentationKind::MenuBar => &mut self.menu_bar,
        }
    }
}

impl Default for HandlerRegistry {
    fn default() -> Self {
        Self::standard()
    }
}

impl fmt::Debug for HandlerRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("HandlerRegistry")
            .field("kinds", &RepresentationKind::ALL)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;
    use crate::model::MenuBar;

    struct FixedHandler;

    impl Handler for FixedHandler {
        fn handle(&self, _representation: &Value) -> Result<Handled, HandlerError> {
            Ok(Handled {
                model: Model::MenuBar(MenuBar::default()),
                follow_ups: vec![FollowUp::new("http://localhost/a", "a")],
            })
        }
    }

    #[test]
    fn override_replaces_only_its_slot() {
        let registry =
            HandlerRegistry::standard().with_handler(RepresentationKind::Menu, FixedHandler);
        let menu = registry
            .handler(RepresentationKind::Menu)
            .handle(&json!({}))
            .expect("fixed handler");
        assert_eq!(menu.follow_ups.len(), 1);

        let object = registry
            .handler(RepresentationKind::DomainObject)
            .handle(&json!({"title": "Foo", "members": {}}))
            .expect("standard object handler");
        assert_eq!(object.model.kind(), RepresentationKind::DomainObject);
    }

    #[test]
    fn every_kind_has_a_handler() {
        let registry = HandlerRegistry::default();
        for kind in RepresentationKind::ALL {
            let _ = registry.handler(kind);
        }
        assert_eq!(
            registry.classify(&json!({"serviceId": "x"})),
            Some(RepresentationKind::Menu)
        );
    }
}
