//! Recorded representations and recording doubles shared by the suites.

use std::cell::RefCell;

use serde_json::{Value, json};

use crate::event_log::{EntryId, LogEntry};
use crate::model::Model;
use crate::observer::LogObserver;
use crate::transport::StaticTransport;

pub const BASE: &str = "http://localhost:8080/restful";

pub fn services_url() -> String {
    format!("{BASE}/services")
}

pub fn menu_url(service_id: &str) -> String {
    format!("{BASE}/services/{service_id}")
}

pub fn list_all_url() -> String {
    format!("{BASE}/services/simple.SimpleObjectMenu/actions/listAll/invoke")
}

pub fn object_url(index: usize) -> String {
    format!("{BASE}/objects/simple.SimpleObject/{index}")
}

pub const SERVICE_IDS: [&str; 3] = [
    "simple.SimpleObjectMenu",
    "simple.ReportMenu",
    "simple.AdminMenu",
];

const OBJECT_NAMES: [&str; 3] = ["Foo", "Bar", "Baz"];

pub fn services() -> Value {
    let value: Vec<Value> = SERVICE_IDS
        .iter()
        .map(|id| {
            json!({
                "rel": format!("urn:org.restfulobjects:rels/service;serviceId=\"{id}\""),
                "href": menu_url(id),
                "method": "GET",
                "title": id.trim_start_matches("simple.")
            })
        })
        .collect();
    json!({
        "value": value,
        "links": [{"rel": "self", "href": services_url(), "method": "GET"}]
    })
}

pub fn menu(service_id: &str) -> Value {
    json!({
        "serviceId": service_id,
        "title": service_id.trim_start_matches("simple."),
        "links": [{"rel": "self", "href": menu_url(service_id)}],
        "members": {
            "listAll": {
                "id": "listAll",
                "memberType": "action",
                "links": [{
                    "rel": "urn:org.restfulobjects:rels/details;action=\"listAll\"",
                    "href": format!("{}/actions/listAll", menu_url(service_id))
                }]
            }
        }
    })
}

pub fn list_all() -> Value {
    let value: Vec<Value> = OBJECT_NAMES
        .iter()
        .enumerate()
        .map(|(index, name)| {
            json!({
                "rel": "urn:org.restfulobjects:rels/element",
                "href": object_url(index),
                "method": "GET",
                "title": format!("Object: {name}")
            })
        })
        .collect();
    json!({
        "resultType": "list",
        "result": {"value": value},
        "links": [{"rel": "self", "href": list_all_url()}]
    })
}

pub fn object(index: usize) -> Value {
    let name = OBJECT_NAMES.get(index).copied().unwrap_or("Unnamed");
    json!({
        "links": [{"rel": "self", "href": object_url(index)}],
        "title": format!("Object: {name}"),
        "domainType": "simple.SimpleObject",
        "instanceId": index.to_string(),
        "members": {
            "name": {"id": "name", "memberType": "property", "value": name},
            "delete": {"id": "delete", "memberType": "action"}
        }
    })
}

pub fn unroutable() -> Value {
    json!({"unexpected": "shape", "links": []})
}

/// A list action result whose elements are the given URLs.
pub fn list_of(urls: &[String]) -> Value {
    let value: Vec<Value> = urls
        .iter()
        .map(|href| json!({"rel": "urn:org.restfulobjects:rels/element", "href": href}))
        .collect();
    json!({"resultType": "list", "result": {"value": value}})
}

/// Transport serving every recorded representation above.
pub fn fixture_transport() -> StaticTransport {
    let mut transport = StaticTransport::new()
        .with_response(services_url(), services().to_string())
        .with_response(list_all_url(), list_all().to_string());
    for id in SERVICE_IDS {
        transport.insert(menu_url(id), menu(id).to_string());
    }
    for index in 0..OBJECT_NAMES.len() {
        transport.insert(object_url(index), object(index).to_string());
    }
    transport
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LogEvent {
    Started(EntryId),
    Resolved(EntryId),
    Consumed(EntryId),
    Failed(EntryId),
}

/// Observer that records every notification in order.
#[derive(Debug, Default)]
pub struct RecordingObserver {
    events: RefCell<Vec<LogEvent>>,
}

impl RecordingObserver {
    pub fn events(&self) -> Vec<LogEvent> {
        self.events.borrow().clone()
    }
}

impl LogObserver for RecordingObserver {
    fn entry_started(&self, entry: &LogEntry) {
        self.events.borrow_mut().push(LogEvent::Started(entry.id()));
    }

    fn entry_resolved(&self, entry: &LogEntry) {
        self.events.borrow_mut().push(LogEvent::Resolved(entry.id()));
    }

    fn entry_consumed(&self, entry: &LogEntry, _model: &Model) {
        self.events.borrow_mut().push(LogEvent::Consumed(entry.id()));
    }

    fn entry_failed(&self, entry: &LogEntry) {
        self.events.borrow_mut().push(LogEvent::Failed(entry.id()));
    }
}
