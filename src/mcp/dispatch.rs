//! Shared tool dispatcher
//!
//! Maps a tool name plus an argument bag onto exactly one client call and
//! renders the outcome as a tool result. Every transport goes through
//! [`handle_tool_call`]; there is no per-transport dispatch logic.
//!
//! Argument names arrive in the tool-facing snake_case convention and are
//! translated to the remote field names by the per-operation builders
//! below. Builders use presence checks, so a supplied empty string or empty
//! list still reaches the API. `trashed` is the one truthiness check: only
//! `true` has meaning, and these operations never un-trash.

use chrono::{SecondsFormat, Utc};
use serde_json::Value;
use std::collections::HashMap;

use crate::client::MochiClient;
use crate::error::{MochiError, Result};
use crate::mcp::protocol::ToolCallResult;
use crate::types::{
    CreateCardParams, CreateDeckParams, CreateTemplateParams, ListCardsOptions, TemplateField,
    UpdateCardParams, UpdateDeckParams,
};

/// Dispatch a tool call. Client and input errors are rendered as
/// error-flagged tool results; this function never fails the transport.
pub async fn handle_tool_call(client: &MochiClient, name: &str, args: &Value) -> ToolCallResult {
    match dispatch(client, name, args).await {
        Ok(result) => result,
        Err(e) => ToolCallResult::error(format!("Error: {}", e)),
    }
}

async fn dispatch(client: &MochiClient, name: &str, args: &Value) -> Result<ToolCallResult> {
    match name {
        // Card operations
        "create_card" => {
            let params = create_card_params(args)?;
            Ok(ToolCallResult::json(&client.create_card(&params).await?))
        }
        "get_card" => {
            let card_id = required_str(args, "card_id")?;
            Ok(ToolCallResult::json(&client.get_card(card_id).await?))
        }
        "list_cards" => {
            let options = list_cards_options(args);
            Ok(ToolCallResult::json(&client.list_cards(&options).await?))
        }
        "update_card" => {
            let card_id = required_str(args, "card_id")?;
            let patch = card_patch(args);
            Ok(ToolCallResult::json(
                &client.update_card(card_id, &patch).await?,
            ))
        }
        "delete_card" => {
            let card_id = required_str(args, "card_id")?;
            client.delete_card(card_id).await?;
            Ok(ToolCallResult::text("Card deleted successfully"))
        }
        "add_attachment" => add_attachment(client, args).await,
        "delete_attachment" => {
            let card_id = required_str(args, "card_id")?;
            let filename = required_str(args, "filename")?;
            client.delete_attachment(card_id, filename).await?;
            Ok(ToolCallResult::text("Attachment deleted successfully"))
        }

        // Deck operations
        "create_deck" => {
            let params = create_deck_params(args)?;
            Ok(ToolCallResult::json(&client.create_deck(&params).await?))
        }
        "get_deck" => {
            let deck_id = required_str(args, "deck_id")?;
            Ok(ToolCallResult::json(&client.get_deck(deck_id).await?))
        }
        "list_decks" => {
            let bookmark = optional_str(args, "bookmark");
            Ok(ToolCallResult::json(&client.list_decks(bookmark).await?))
        }
        "update_deck" => {
            let deck_id = required_str(args, "deck_id")?;
            let patch = deck_patch(args)?;
            Ok(ToolCallResult::json(
                &client.update_deck(deck_id, &patch).await?,
            ))
        }
        "delete_deck" => {
            let deck_id = required_str(args, "deck_id")?;
            client.delete_deck(deck_id).await?;
            Ok(ToolCallResult::text("Deck deleted successfully"))
        }

        // Template operations
        "create_template" => {
            let params = create_template_params(args)?;
            Ok(ToolCallResult::json(&client.create_template(&params).await?))
        }
        "get_template" => {
            let template_id = required_str(args, "template_id")?;
            Ok(ToolCallResult::json(&client.get_template(template_id).await?))
        }
        "list_templates" => {
            let bookmark = optional_str(args, "bookmark");
            Ok(ToolCallResult::json(&client.list_templates(bookmark).await?))
        }

        // Due cards
        "get_due_cards" => {
            let deck_id = optional_str(args, "deck_id");
            let date = optional_str(args, "date");
            Ok(ToolCallResult::json(&client.due_cards(deck_id, date).await?))
        }

        // Bulk operations
        "create_cards_bulk" => create_cards_bulk(client, args).await,

        _ => Ok(ToolCallResult::error(format!("Unknown tool: {}", name))),
    }
}

async fn add_attachment(client: &MochiClient, args: &Value) -> Result<ToolCallResult> {
    let card_id = required_str(args, "card_id")?;
    let filename = required_str(args, "filename")?;
    let url = required_str(args, "url")?;

    // Fetch the source bytes before touching the Mochi API; a failed fetch
    // must not result in an upload call.
    let response = reqwest::get(url).await?;
    if !response.status().is_success() {
        return Err(MochiError::AttachmentFetch(format!(
            "fetching {} returned {}",
            url,
            response.status()
        )));
    }
    let content_type = response
        .headers()
        .get(reqwest::header::CONTENT_TYPE)
        .and_then(|v| v.to_str().ok())
        .unwrap_or("application/octet-stream")
        .to_string();
    let data = response.bytes().await?.to_vec();

    client
        .add_attachment(card_id, filename, data, &content_type)
        .await?;
    Ok(ToolCallResult::text("Attachment added successfully"))
}

/// Sequential create, input order preserved. A failure aborts the remainder
/// without rolling back earlier creations; the error reports how many cards
/// were already created so the caller can react.
async fn create_cards_bulk(client: &MochiClient, args: &Value) -> Result<ToolCallResult> {
    let deck_id = required_str(args, "deck_id")?;
    let specs = args
        .get("cards")
        .and_then(|v| v.as_array())
        .ok_or_else(|| MochiError::InvalidInput("cards is required".to_string()))?;
    let template_id = optional_string(args, "template_id");

    let mut created = Vec::with_capacity(specs.len());
    for spec in specs {
        let params = CreateCardParams {
            content: required_str(spec, "content")?.to_string(),
            deck_id: deck_id.to_string(),
            template_id: template_id.clone(),
            tags: optional_tags(spec, "tags"),
            ..Default::default()
        };
        match client.create_card(&params).await {
            Ok(card) => created.push(card),
            Err(e) => {
                return Ok(ToolCallResult::error(format!(
                    "Error: {} ({} of {} cards created before the failure)",
                    e,
                    created.len(),
                    specs.len()
                )));
            }
        }
    }

    let payload = serde_json::to_string_pretty(&created).unwrap_or_default();
    Ok(ToolCallResult::text(format!(
        "Created {} cards:\n{}",
        created.len(),
        payload
    )))
}

// Argument extraction

fn required_str<'a>(args: &'a Value, key: &str) -> Result<&'a str> {
    args.get(key)
        .and_then(|v| v.as_str())
        .ok_or_else(|| MochiError::InvalidInput(format!("{} is required", key)))
}

fn optional_str<'a>(args: &'a Value, key: &str) -> Option<&'a str> {
    args.get(key).and_then(|v| v.as_str())
}

fn optional_string(args: &Value, key: &str) -> Option<String> {
    optional_str(args, key).map(String::from)
}

fn optional_bool(args: &Value, key: &str) -> Option<bool> {
    args.get(key).and_then(|v| v.as_bool())
}

fn optional_tags(args: &Value, key: &str) -> Option<Vec<String>> {
    args.get(key).and_then(|v| v.as_array()).map(|arr| {
        arr.iter()
            .filter_map(|v| v.as_str().map(String::from))
            .collect()
    })
}

fn parse_enum<T: serde::de::DeserializeOwned>(args: &Value, key: &str) -> Result<Option<T>> {
    match args.get(key) {
        Some(v) if !v.is_null() => Ok(Some(serde_json::from_value(v.clone())?)),
        _ => Ok(None),
    }
}

/// ISO-8601 instant used as the trashed marker
fn now_iso8601() -> String {
    Utc::now().to_rfc3339_opts(SecondsFormat::Millis, true)
}

/// Only `trashed: true` produces a marker; false or absent must leave the
/// remote field untouched.
fn trashed_marker(args: &Value) -> Option<String> {
    match args.get("trashed").and_then(|v| v.as_bool()) {
        Some(true) => Some(now_iso8601()),
        _ => None,
    }
}

// Per-operation argument translation

fn create_card_params(args: &Value) -> Result<CreateCardParams> {
    Ok(CreateCardParams {
        content: required_str(args, "content")?.to_string(),
        deck_id: required_str(args, "deck_id")?.to_string(),
        template_id: optional_string(args, "template_id"),
        archived: optional_bool(args, "archived"),
        review_reverse: optional_bool(args, "review_reverse"),
        tags: optional_tags(args, "tags"),
        ..Default::default()
    })
}

fn list_cards_options(args: &Value) -> ListCardsOptions {
    ListCardsOptions {
        deck_id: optional_string(args, "deck_id"),
        limit: args.get("limit").and_then(|v| v.as_u64()).map(|v| v as u32),
        bookmark: optional_string(args, "bookmark"),
    }
}

fn card_patch(args: &Value) -> UpdateCardParams {
    UpdateCardParams {
        content: optional_string(args, "content"),
        deck_id: optional_string(args, "deck_id"),
        archived: optional_bool(args, "archived"),
        review_reverse: optional_bool(args, "review_reverse"),
        tags: optional_tags(args, "tags"),
        trashed: trashed_marker(args),
        ..Default::default()
    }
}

fn create_deck_params(args: &Value) -> Result<CreateDeckParams> {
    Ok(CreateDeckParams {
        name: required_str(args, "name")?.to_string(),
        parent_id: optional_string(args, "parent_id"),
        archived: optional_bool(args, "archived"),
        sort_by: parse_enum(args, "sort_by")?,
        cards_view: parse_enum(args, "cards_view")?,
        show_sides: optional_bool(args, "show_sides"),
        review_reverse: optional_bool(args, "review_reverse"),
        cards_per_day: args.get("cards_per_day").and_then(|v| v.as_i64()),
        ..Default::default()
    })
}

fn deck_patch(args: &Value) -> Result<UpdateDeckParams> {
    Ok(UpdateDeckParams {
        name: optional_string(args, "name"),
        parent_id: optional_string(args, "parent_id"),
        archived: optional_bool(args, "archived"),
        sort_by: parse_enum(args, "sort_by")?,
        cards_view: parse_enum(args, "cards_view")?,
        trashed: trashed_marker(args),
        ..Default::default()
    })
}

/// The tool takes a field array; the API wants a map keyed by field id.
fn create_template_params(args: &Value) -> Result<CreateTemplateParams> {
    let name = required_str(args, "name")?.to_string();
    let content = required_str(args, "content")?.to_string();
    let field_array = args
        .get("fields")
        .and_then(|v| v.as_array())
        .ok_or_else(|| MochiError::InvalidInput("fields is required".to_string()))?;

    let mut fields = HashMap::new();
    for field in field_array {
        let field: TemplateField = serde_json::from_value(field.clone())?;
        fields.insert(field.id.clone(), field);
    }

    Ok(CreateTemplateParams {
        name,
        content,
        fields,
        pos: None,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::DateTime;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    fn keys(value: &Value) -> Vec<&str> {
        value.as_object().unwrap().keys().map(|k| k.as_str()).collect()
    }

    #[test]
    fn create_card_with_required_args_only_sends_exactly_those_fields() {
        let params = create_card_params(&json!({
            "content": "q\n---\na",
            "deck_id": "d1",
        }))
        .unwrap();

        let value = serde_json::to_value(&params).unwrap();
        assert_eq!(keys(&value), vec!["content", "deck-id"]);
    }

    #[test]
    fn create_card_translates_every_optional_field() {
        let params = create_card_params(&json!({
            "content": "q",
            "deck_id": "d1",
            "template_id": "t1",
            "archived": true,
            "review_reverse": false,
            "tags": ["a", "b"],
        }))
        .unwrap();

        let value = serde_json::to_value(&params).unwrap();
        assert_eq!(
            value,
            json!({
                "content": "q",
                "deck-id": "d1",
                "template-id": "t1",
                "archived?": true,
                "review-reverse?": false,
                "manual-tags": ["a", "b"],
            })
        );
    }

    #[test]
    fn missing_required_arg_is_rejected() {
        let err = create_card_params(&json!({"content": "q"})).unwrap_err();
        assert!(err.to_string().contains("deck_id is required"));
    }

    #[test]
    fn card_patch_keeps_empty_content() {
        // Presence, not truthiness: an intentionally empty update is sent
        let patch = card_patch(&json!({"card_id": "c1", "content": ""}));
        let value = serde_json::to_value(&patch).unwrap();
        assert_eq!(value, json!({"content": ""}));
    }

    #[test]
    fn card_patch_omits_unsupplied_fields() {
        let patch = card_patch(&json!({"card_id": "c1", "archived": false}));
        let value = serde_json::to_value(&patch).unwrap();
        assert_eq!(value, json!({"archived?": false}));
    }

    #[test]
    fn trashed_true_sets_a_current_timestamp() {
        let before = Utc::now();
        let patch = card_patch(&json!({"card_id": "c1", "trashed": true}));
        let marker = patch.trashed.expect("trashed marker missing");

        let parsed = DateTime::parse_from_rfc3339(&marker).expect("not ISO-8601");
        let delta = (parsed.with_timezone(&Utc) - before).num_seconds().abs();
        assert!(delta < 5, "marker {marker} not within a few seconds");
    }

    #[test]
    fn trashed_false_or_absent_touches_nothing() {
        let patch = card_patch(&json!({"card_id": "c1", "trashed": false}));
        assert!(patch.trashed.is_none());

        let patch = deck_patch(&json!({"deck_id": "d1", "name": "n"})).unwrap();
        assert!(patch.trashed.is_none());
    }

    #[test]
    fn deck_patch_translates_enums_and_names() {
        let patch = deck_patch(&json!({
            "deck_id": "d1",
            "parent_id": "p1",
            "sort_by": "created-at",
            "cards_view": "grid",
        }))
        .unwrap();

        let value = serde_json::to_value(&patch).unwrap();
        assert_eq!(
            value,
            json!({
                "parent-id": "p1",
                "sort-by": "created-at",
                "cards-view": "grid",
            })
        );
    }

    #[test]
    fn template_fields_are_keyed_by_id() {
        let params = create_template_params(&json!({
            "name": "Vocab",
            "content": "{{Word}}\n---\n{{Meaning}}",
            "fields": [
                {"id": "word", "name": "Word", "type": "text"},
                {"id": "meaning", "name": "Meaning", "type": "text"},
            ],
        }))
        .unwrap();

        assert_eq!(params.fields.len(), 2);
        assert_eq!(params.fields["word"].name, "Word");
        let value = serde_json::to_value(&params).unwrap();
        assert_eq!(value["fields"]["meaning"]["type"], json!("text"));
    }

    #[tokio::test]
    async fn unknown_tool_reports_its_name_without_calling_out() {
        // Base URL points nowhere; an unknown tool must not attempt I/O
        let client = MochiClient::with_base_url("k", "http://127.0.0.1:1");
        let result = handle_tool_call(&client, "frobnicate", &json!({})).await;

        assert_eq!(result.is_error, Some(true));
        let text = serde_json::to_string(&result).unwrap();
        assert!(text.contains("frobnicate"));
    }

    #[tokio::test]
    async fn missing_required_argument_becomes_an_error_result() {
        let client = MochiClient::with_base_url("k", "http://127.0.0.1:1");
        let result = handle_tool_call(&client, "get_card", &json!({})).await;

        assert_eq!(result.is_error, Some(true));
        let text = serde_json::to_string(&result).unwrap();
        assert!(text.contains("card_id is required"));
    }
}
