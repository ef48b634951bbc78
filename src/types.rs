//! Remote resource types for the Mochi Cards API
//!
//! Mochi's wire format uses kebab-case keys, `?`-suffixed booleans, and a
//! `{"date": ...}` wrapper around timestamps. The structs here carry those
//! names via serde renames so the rest of the crate stays snake_case.
//! Parameter structs model partial patches with `Option` +
//! `skip_serializing_if`: an omitted field is never serialized, which is
//! distinct from an explicit false or null.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// One page of a list endpoint plus the opaque cursor for the next page.
/// The bookmark must be passed back verbatim to continue the listing.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Paginated<T> {
    pub docs: Vec<T>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub bookmark: Option<String>,
}

/// Timestamp wrapper used by the remote API
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Timestamp {
    pub date: String,
}

/// A field value on a card, filling a slot its template defines
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FieldValue {
    pub id: String,
    pub value: String,
}

/// Attachment metadata as returned on a card
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Attachment {
    #[serde(rename = "file-name")]
    pub file_name: String,
    #[serde(rename = "content-type")]
    pub content_type: String,
}

/// How a deck sorts its cards
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum SortBy {
    None,
    Name,
    CreatedAt,
    UpdatedAt,
}

/// Display view for a deck's cards
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CardsView {
    List,
    Grid,
    Column,
}

/// Template field types
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FieldType {
    Text,
    Boolean,
    Number,
    Draw,
    Ai,
}

/// A flashcard. `content` is markdown; a literal `---` separates front
/// and back.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Card {
    pub id: String,
    pub content: String,
    #[serde(rename = "deck-id")]
    pub deck_id: String,
    #[serde(rename = "template-id", skip_serializing_if = "Option::is_none")]
    pub template_id: Option<String>,
    #[serde(rename = "archived?", skip_serializing_if = "Option::is_none")]
    pub archived: Option<bool>,
    #[serde(rename = "review-reverse?", skip_serializing_if = "Option::is_none")]
    pub review_reverse: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub pos: Option<String>,
    #[serde(rename = "manual-tags", skip_serializing_if = "Option::is_none")]
    pub tags: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub fields: Option<HashMap<String, FieldValue>>,
    #[serde(rename = "created-at", skip_serializing_if = "Option::is_none")]
    pub created_at: Option<Timestamp>,
    #[serde(rename = "updated-at", skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<Timestamp>,
    /// Presence of this timestamp marks the card as trashed
    #[serde(rename = "trashed?", skip_serializing_if = "Option::is_none")]
    pub trashed: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub attachments: Option<Vec<Attachment>>,
}

/// A deck of cards. Decks nest into a tree via `parent-id`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Deck {
    pub id: String,
    pub name: String,
    #[serde(rename = "parent-id", skip_serializing_if = "Option::is_none")]
    pub parent_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sort: Option<i64>,
    #[serde(rename = "archived?", skip_serializing_if = "Option::is_none")]
    pub archived: Option<bool>,
    #[serde(rename = "sort-by", skip_serializing_if = "Option::is_none")]
    pub sort_by: Option<SortBy>,
    #[serde(rename = "cards-view", skip_serializing_if = "Option::is_none")]
    pub cards_view: Option<CardsView>,
    #[serde(rename = "show-sides?", skip_serializing_if = "Option::is_none")]
    pub show_sides: Option<bool>,
    #[serde(rename = "review-reverse?", skip_serializing_if = "Option::is_none")]
    pub review_reverse: Option<bool>,
    /// Daily new-card limit; null means unlimited
    #[serde(rename = "cards-per-day", skip_serializing_if = "Option::is_none")]
    pub cards_per_day: Option<i64>,
    #[serde(rename = "created-at", skip_serializing_if = "Option::is_none")]
    pub created_at: Option<Timestamp>,
    #[serde(rename = "updated-at", skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<Timestamp>,
    #[serde(rename = "trashed?", skip_serializing_if = "Option::is_none")]
    pub trashed: Option<String>,
}

/// A field slot defined by a template
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TemplateField {
    pub id: String,
    pub name: String,
    #[serde(rename = "type")]
    pub field_type: FieldType,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub pos: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub options: Option<HashMap<String, serde_json::Value>>,
}

/// A card template with `{{field}}` placeholders in its content
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Template {
    pub id: String,
    pub name: String,
    pub content: String,
    pub fields: HashMap<String, TemplateField>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub pos: Option<String>,
    #[serde(rename = "created-at", skip_serializing_if = "Option::is_none")]
    pub created_at: Option<Timestamp>,
    #[serde(rename = "updated-at", skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<Timestamp>,
}

/// Read-only projection of a card due for review; the schedule is computed
/// by the remote service, never locally.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DueCard {
    pub id: String,
    #[serde(rename = "deck-id")]
    pub deck_id: String,
    #[serde(rename = "due-at")]
    pub due_at: Timestamp,
}

/// Body for `POST /cards`
#[derive(Debug, Clone, Default, Serialize)]
pub struct CreateCardParams {
    pub content: String,
    #[serde(rename = "deck-id")]
    pub deck_id: String,
    #[serde(rename = "template-id", skip_serializing_if = "Option::is_none")]
    pub template_id: Option<String>,
    #[serde(rename = "archived?", skip_serializing_if = "Option::is_none")]
    pub archived: Option<bool>,
    #[serde(rename = "review-reverse?", skip_serializing_if = "Option::is_none")]
    pub review_reverse: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub pos: Option<String>,
    #[serde(rename = "manual-tags", skip_serializing_if = "Option::is_none")]
    pub tags: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub fields: Option<HashMap<String, FieldValue>>,
}

/// Partial patch for `POST /cards/{id}`. Only supplied fields are sent.
#[derive(Debug, Clone, Default, Serialize)]
pub struct UpdateCardParams {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub content: Option<String>,
    #[serde(rename = "deck-id", skip_serializing_if = "Option::is_none")]
    pub deck_id: Option<String>,
    #[serde(rename = "template-id", skip_serializing_if = "Option::is_none")]
    pub template_id: Option<String>,
    #[serde(rename = "archived?", skip_serializing_if = "Option::is_none")]
    pub archived: Option<bool>,
    #[serde(rename = "review-reverse?", skip_serializing_if = "Option::is_none")]
    pub review_reverse: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub pos: Option<String>,
    #[serde(rename = "manual-tags", skip_serializing_if = "Option::is_none")]
    pub tags: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub fields: Option<HashMap<String, FieldValue>>,
    /// Soft-delete marker; set to an ISO-8601 instant, never to false
    #[serde(rename = "trashed?", skip_serializing_if = "Option::is_none")]
    pub trashed: Option<String>,
}

/// Body for `POST /decks`
#[derive(Debug, Clone, Default, Serialize)]
pub struct CreateDeckParams {
    pub name: String,
    #[serde(rename = "parent-id", skip_serializing_if = "Option::is_none")]
    pub parent_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sort: Option<i64>,
    #[serde(rename = "archived?", skip_serializing_if = "Option::is_none")]
    pub archived: Option<bool>,
    #[serde(rename = "sort-by", skip_serializing_if = "Option::is_none")]
    pub sort_by: Option<SortBy>,
    #[serde(rename = "cards-view", skip_serializing_if = "Option::is_none")]
    pub cards_view: Option<CardsView>,
    #[serde(rename = "show-sides?", skip_serializing_if = "Option::is_none")]
    pub show_sides: Option<bool>,
    #[serde(rename = "review-reverse?", skip_serializing_if = "Option::is_none")]
    pub review_reverse: Option<bool>,
    #[serde(rename = "cards-per-day", skip_serializing_if = "Option::is_none")]
    pub cards_per_day: Option<i64>,
}

/// Partial patch for `POST /decks/{id}`
#[derive(Debug, Clone, Default, Serialize)]
pub struct UpdateDeckParams {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(rename = "parent-id", skip_serializing_if = "Option::is_none")]
    pub parent_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sort: Option<i64>,
    #[serde(rename = "archived?", skip_serializing_if = "Option::is_none")]
    pub archived: Option<bool>,
    #[serde(rename = "sort-by", skip_serializing_if = "Option::is_none")]
    pub sort_by: Option<SortBy>,
    #[serde(rename = "cards-view", skip_serializing_if = "Option::is_none")]
    pub cards_view: Option<CardsView>,
    #[serde(rename = "show-sides?", skip_serializing_if = "Option::is_none")]
    pub show_sides: Option<bool>,
    #[serde(rename = "review-reverse?", skip_serializing_if = "Option::is_none")]
    pub review_reverse: Option<bool>,
    #[serde(rename = "cards-per-day", skip_serializing_if = "Option::is_none")]
    pub cards_per_day: Option<i64>,
    #[serde(rename = "trashed?", skip_serializing_if = "Option::is_none")]
    pub trashed: Option<String>,
}

/// Body for `POST /templates`. Fields are keyed by their id.
#[derive(Debug, Clone, Serialize)]
pub struct CreateTemplateParams {
    pub name: String,
    pub content: String,
    pub fields: HashMap<String, TemplateField>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub pos: Option<String>,
}

/// Query options for `GET /cards`
#[derive(Debug, Clone, Default)]
pub struct ListCardsOptions {
    pub deck_id: Option<String>,
    pub limit: Option<u32>,
    pub bookmark: Option<String>,
}
