//! Standard handlers for the Restful Objects representation kinds.

mod list;
mod menu;
mod object;

pub use self::list::ListHandler;
pub use self::menu::{MenuBarHandler, MenuHandler};
pub use self::object::ObjectHandler;

use crate::representation::Link;

use super::errors::HandlerError;
use super::registry::FollowUp;

/// Builds one follow-up per link, rejecting links that cannot be fetched.
fn follow_links(links: &[Link]) -> Result<Vec<FollowUp>, HandlerError> {
    links
        .iter()
        .map(|link| {
            if link.href.trim().is_empty() {
                Err(HandlerError::empty_href(link.rel.as_str()))
            } else {
                Ok(FollowUp::new(link.href.as_str(), link.title_or_empty()))
            }
        })
        .collect()
}
