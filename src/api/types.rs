// src/api/types.rs
// Typed JSON:API documents for the Productive REST API

use chrono::{DateTime, Utc};
use serde::Deserialize;
use std::collections::HashMap;

// ═══════════════════════════════════════════════════════════════════════════
// Resource envelopes
// ═══════════════════════════════════════════════════════════════════════════

/// Reference to a related resource: `{"type": "people", "id": "123"}`
#[derive(Debug, Clone, Deserialize)]
pub struct Identifier {
    pub id: String,
    #[serde(rename = "type")]
    pub kind: String,
}

/// Relationship payload; Productive uses both to-one and to-many
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum RelationshipData {
    One(Identifier),
    Many(Vec<Identifier>),
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct Relationship {
    #[serde(default)]
    pub data: Option<RelationshipData>,
}

/// A primary resource with typed attributes
#[derive(Debug, Clone, Deserialize)]
pub struct Resource<A> {
    pub id: String,
    #[serde(rename = "type")]
    pub kind: String,
    pub attributes: A,
    #[serde(default)]
    pub relationships: HashMap<String, Relationship>,
}

impl<A> Resource<A> {
    /// Id of a to-one relationship, if the server sent one
    pub fn related_id(&self, name: &str) -> Option<&str> {
        match self.relationships.get(name)?.data.as_ref()? {
            RelationshipData::One(identifier) => Some(identifier.id.as_str()),
            RelationshipData::Many(_) => None,
        }
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct Meta {
    #[serde(default)]
    pub total_count: Option<u64>,
}

/// Response document for list endpoints
#[derive(Debug, Clone, Deserialize)]
pub struct ListDocument<A> {
    pub data: Vec<Resource<A>>,
    #[serde(default)]
    pub included: Vec<Included>,
    #[serde(default)]
    pub meta: Meta,
}

impl<A> ListDocument<A> {
    /// Total matching the filter server-side, falling back to the page size
    pub fn total(&self) -> u64 {
        self.meta.total_count.unwrap_or(self.data.len() as u64)
    }

    pub fn people(&self) -> impl Iterator<Item = &IncludedRecord<PersonAttributes>> {
        included_people(&self.included)
    }

    pub fn projects(&self) -> impl Iterator<Item = &IncludedRecord<ProjectAttributes>> {
        included_projects(&self.included)
    }
}

/// Response document for single-resource endpoints
#[derive(Debug, Clone, Deserialize)]
pub struct OneDocument<A> {
    pub data: Resource<A>,
    #[serde(default)]
    pub included: Vec<Included>,
}

impl<A> OneDocument<A> {
    pub fn projects(&self) -> impl Iterator<Item = &IncludedRecord<ProjectAttributes>> {
        included_projects(&self.included)
    }
}

// ═══════════════════════════════════════════════════════════════════════════
// Included side channel
// ═══════════════════════════════════════════════════════════════════════════

/// One record in the `included` array: id plus typed attributes. The resource
/// type lives on the `Included` discriminant.
#[derive(Debug, Clone, Deserialize)]
#[serde(bound(deserialize = "A: serde::Deserialize<'de> + Default"))]
pub struct IncludedRecord<A> {
    pub id: String,
    #[serde(default)]
    pub attributes: A,
}

/// Denormalized related records shipped alongside primary data, discriminated
/// by JSON:API resource type. Kinds we do not consume deserialize as
/// `Unknown` instead of failing the whole document.
#[derive(Debug, Clone, Deserialize)]
#[serde(tag = "type")]
pub enum Included {
    #[serde(rename = "people")]
    Person(IncludedRecord<PersonAttributes>),
    #[serde(rename = "projects")]
    Project(IncludedRecord<ProjectAttributes>),
    #[serde(rename = "tasks")]
    Task(IncludedRecord<TaskAttributes>),
    #[serde(rename = "comments")]
    Comment(IncludedRecord<CommentAttributes>),
    #[serde(other)]
    Unknown,
}

pub fn included_people(
    included: &[Included],
) -> impl Iterator<Item = &IncludedRecord<PersonAttributes>> {
    included.iter().filter_map(|record| match record {
        Included::Person(person) => Some(person),
        _ => None,
    })
}

pub fn included_projects(
    included: &[Included],
) -> impl Iterator<Item = &IncludedRecord<ProjectAttributes>> {
    included.iter().filter_map(|record| match record {
        Included::Project(project) => Some(project),
        _ => None,
    })
}

// ═══════════════════════════════════════════════════════════════════════════
// Attributes per resource type
// ═══════════════════════════════════════════════════════════════════════════

// Every field is defaulted: Productive omits attributes the token's scopes
// cannot see, and a missing field must not poison the document.

#[derive(Debug, Clone, Default, Deserialize)]
pub struct TaskAttributes {
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub task_number: Option<i64>,
    /// Date only, e.g. "2026-03-01"
    #[serde(default)]
    pub due_date: Option<String>,
    #[serde(default)]
    pub closed_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub updated_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub last_activity_at: Option<DateTime<Utc>>,
}

impl TaskAttributes {
    pub fn is_open(&self) -> bool {
        self.closed_at.is_none()
    }

    /// Most recent activity timestamp, preferring `last_activity_at`
    pub fn recency(&self) -> Option<DateTime<Utc>> {
        self.last_activity_at.or(self.updated_at)
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct CommentAttributes {
    #[serde(default)]
    pub body: Option<String>,
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct PersonAttributes {
    #[serde(default)]
    pub first_name: Option<String>,
    #[serde(default)]
    pub last_name: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
}

impl PersonAttributes {
    /// "First Last", trimmed; falls back to the email when both name parts
    /// are blank. None means the caller should render its own placeholder.
    pub fn display_name(&self) -> Option<String> {
        let first = self.first_name.as_deref().unwrap_or("").trim();
        let last = self.last_name.as_deref().unwrap_or("").trim();
        let full = format!("{} {}", first, last).trim().to_string();
        if !full.is_empty() {
            return Some(full);
        }
        self.email
            .as_deref()
            .map(str::trim)
            .filter(|email| !email.is_empty())
            .map(String::from)
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct ProjectAttributes {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub project_number: Option<i64>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct CompanyAttributes {
    #[serde(default)]
    pub name: String,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct BoardAttributes {
    #[serde(default)]
    pub name: String,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct TaskListAttributes {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub position: Option<i64>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct WorkflowStatusAttributes {
    #[serde(default)]
    pub name: String,
    /// 1 = not started, 2 = started, 3 = closed
    #[serde(default)]
    pub category_id: Option<i64>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct TimeEntryAttributes {
    /// Date only, e.g. "2026-03-01"
    #[serde(default)]
    pub date: Option<String>,
    /// Minutes worked
    #[serde(default)]
    pub time: Option<i64>,
    #[serde(default)]
    pub note: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct DealAttributes {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub date: Option<String>,
    /// 1 = deal, 2 = budget; the endpoint serves both
    #[serde(default)]
    pub deal_type_id: Option<i64>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct ServiceAttributes {
    #[serde(default)]
    pub name: String,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct PageAttributes {
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub body: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn sample_task_document() -> serde_json::Value {
        json!({
            "data": [
                {
                    "id": "9001",
                    "type": "tasks",
                    "attributes": {
                        "title": "Fix login flow",
                        "description": "<p>Broken on staging</p>",
                        "last_activity_at": "2026-08-20T10:00:00.000Z"
                    },
                    "relationships": {
                        "project": { "data": { "type": "projects", "id": "77" } },
                        "assignee": { "data": { "type": "people", "id": "55" } }
                    }
                }
            ],
            "included": [
                { "type": "projects", "id": "77", "attributes": { "name": "Website" } },
                { "type": "people", "id": "55", "attributes": { "first_name": "Ana", "last_name": "Horvat" } },
                { "type": "memberships", "id": "1", "attributes": {} }
            ],
            "meta": { "total_count": 12 }
        })
    }

    // ========================================================================
    // Document deserialization
    // ========================================================================

    #[test]
    fn test_list_document_roundtrip() {
        let doc: ListDocument<TaskAttributes> =
            serde_json::from_value(sample_task_document()).unwrap();
        assert_eq!(doc.data.len(), 1);
        assert_eq!(doc.data[0].id, "9001");
        assert_eq!(doc.data[0].attributes.title, "Fix login flow");
        assert_eq!(doc.total(), 12);
    }

    #[test]
    fn test_related_id_to_one() {
        let doc: ListDocument<TaskAttributes> =
            serde_json::from_value(sample_task_document()).unwrap();
        assert_eq!(doc.data[0].related_id("project"), Some("77"));
        assert_eq!(doc.data[0].related_id("assignee"), Some("55"));
        assert_eq!(doc.data[0].related_id("workflow_status"), None);
    }

    #[test]
    fn test_included_discrimination() {
        let doc: ListDocument<TaskAttributes> =
            serde_json::from_value(sample_task_document()).unwrap();
        let projects: Vec<_> = doc.projects().collect();
        assert_eq!(projects.len(), 1);
        assert_eq!(projects[0].attributes.name, "Website");
        let people: Vec<_> = doc.people().collect();
        assert_eq!(people.len(), 1);
        assert_eq!(people[0].attributes.display_name().unwrap(), "Ana Horvat");
    }

    #[test]
    fn test_unknown_included_kind_is_tolerated() {
        let doc: ListDocument<TaskAttributes> =
            serde_json::from_value(sample_task_document()).unwrap();
        // The memberships entry survives as Unknown instead of failing the parse
        assert_eq!(doc.included.len(), 3);
        assert!(doc
            .included
            .iter()
            .any(|record| matches!(record, Included::Unknown)));
    }

    #[test]
    fn test_missing_meta_and_included_default() {
        let doc: ListDocument<CompanyAttributes> = serde_json::from_value(json!({
            "data": [ { "id": "1", "type": "companies", "attributes": { "name": "Acme" } } ]
        }))
        .unwrap();
        assert!(doc.included.is_empty());
        assert_eq!(doc.total(), 1);
    }

    #[test]
    fn test_null_relationship_data() {
        let doc: ListDocument<TaskAttributes> = serde_json::from_value(json!({
            "data": [ {
                "id": "2", "type": "tasks",
                "attributes": { "title": "Orphan" },
                "relationships": { "project": { "data": null } }
            } ]
        }))
        .unwrap();
        assert_eq!(doc.data[0].related_id("project"), None);
    }

    // ========================================================================
    // Attribute helpers
    // ========================================================================

    #[test]
    fn test_task_is_open() {
        let open = TaskAttributes::default();
        assert!(open.is_open());
        let closed: TaskAttributes = serde_json::from_value(json!({
            "title": "Done", "closed_at": "2026-08-01T09:00:00.000Z"
        }))
        .unwrap();
        assert!(!closed.is_open());
    }

    #[test]
    fn test_task_recency_prefers_last_activity() {
        let task: TaskAttributes = serde_json::from_value(json!({
            "title": "t",
            "updated_at": "2026-08-01T09:00:00.000Z",
            "last_activity_at": "2026-08-10T09:00:00.000Z"
        }))
        .unwrap();
        let recency = task.recency().unwrap();
        assert_eq!(recency, task.last_activity_at.unwrap());
    }

    #[test]
    fn test_display_name_variants() {
        let full = PersonAttributes {
            first_name: Some("Ana".to_string()),
            last_name: Some("Horvat".to_string()),
            email: None,
        };
        assert_eq!(full.display_name().unwrap(), "Ana Horvat");

        let first_only = PersonAttributes {
            first_name: Some("Ana".to_string()),
            last_name: None,
            email: None,
        };
        assert_eq!(first_only.display_name().unwrap(), "Ana");

        let email_fallback = PersonAttributes {
            first_name: Some("  ".to_string()),
            last_name: None,
            email: Some("ana@example.com".to_string()),
        };
        assert_eq!(email_fallback.display_name().unwrap(), "ana@example.com");

        assert_eq!(PersonAttributes::default().display_name(), None);
    }
}
