//! MCP tool definitions for the Mochi Cards API
//!
//! The single source of truth for what operations exist; both transports
//! serve this catalog unchanged.

use serde_json::json;

use super::protocol::ToolDefinition;

/// All tool definitions, in catalog order
pub const TOOL_DEFINITIONS: &[(&str, &str, &str)] = &[
    // Card tools
    (
        "create_card",
        "Create a new flashcard in Mochi. The content supports Markdown formatting. Use '---' to separate front and back of the card.",
        r#"{
            "type": "object",
            "properties": {
                "content": {"type": "string", "description": "The card content in Markdown. Use '---' to separate front and back."},
                "deck_id": {"type": "string", "description": "The ID of the deck to add the card to"},
                "template_id": {"type": "string", "description": "Optional template ID to use for this card"},
                "archived": {"type": "boolean", "description": "Whether the card is archived"},
                "review_reverse": {"type": "boolean", "description": "Whether to review the card in reverse"},
                "tags": {"type": "array", "items": {"type": "string"}, "description": "Manual tags for the card"}
            },
            "required": ["content", "deck_id"]
        }"#,
    ),
    (
        "get_card",
        "Get details of a specific card by ID",
        r#"{
            "type": "object",
            "properties": {
                "card_id": {"type": "string", "description": "The ID of the card to retrieve"}
            },
            "required": ["card_id"]
        }"#,
    ),
    (
        "list_cards",
        "List cards, optionally filtered by deck",
        r#"{
            "type": "object",
            "properties": {
                "deck_id": {"type": "string", "description": "Filter cards by deck ID"},
                "limit": {"type": "number", "minimum": 1, "maximum": 100, "description": "Number of cards to return (1-100)"},
                "bookmark": {"type": "string", "description": "Pagination bookmark from previous response"}
            }
        }"#,
    ),
    (
        "update_card",
        "Update an existing card",
        r#"{
            "type": "object",
            "properties": {
                "card_id": {"type": "string", "description": "The ID of the card to update"},
                "content": {"type": "string", "description": "New content for the card"},
                "deck_id": {"type": "string", "description": "Move card to a different deck"},
                "archived": {"type": "boolean", "description": "Archive or unarchive the card"},
                "review_reverse": {"type": "boolean", "description": "Enable or disable reverse review"},
                "tags": {"type": "array", "items": {"type": "string"}, "description": "Update manual tags"},
                "trashed": {"type": "boolean", "description": "Soft delete the card (set to true to trash)"}
            },
            "required": ["card_id"]
        }"#,
    ),
    (
        "delete_card",
        "Permanently delete a card. This cannot be undone.",
        r#"{
            "type": "object",
            "properties": {
                "card_id": {"type": "string", "description": "The ID of the card to delete"}
            },
            "required": ["card_id"]
        }"#,
    ),
    (
        "add_attachment",
        "Add an attachment to a card using a URL",
        r#"{
            "type": "object",
            "properties": {
                "card_id": {"type": "string", "description": "The ID of the card"},
                "filename": {"type": "string", "description": "The filename for the attachment"},
                "url": {"type": "string", "description": "URL of the file to attach"}
            },
            "required": ["card_id", "filename", "url"]
        }"#,
    ),
    (
        "delete_attachment",
        "Delete an attachment from a card",
        r#"{
            "type": "object",
            "properties": {
                "card_id": {"type": "string", "description": "The ID of the card"},
                "filename": {"type": "string", "description": "The filename of the attachment to delete"}
            },
            "required": ["card_id", "filename"]
        }"#,
    ),
    // Deck tools
    (
        "create_deck",
        "Create a new deck for organizing flashcards",
        r#"{
            "type": "object",
            "properties": {
                "name": {"type": "string", "description": "Name of the deck"},
                "parent_id": {"type": "string", "description": "Parent deck ID for nested decks"},
                "archived": {"type": "boolean", "description": "Whether the deck is archived"},
                "sort_by": {"type": "string", "enum": ["none", "name", "created-at", "updated-at"], "description": "How to sort cards in this deck"},
                "cards_view": {"type": "string", "enum": ["list", "grid", "column"], "description": "Display view for cards"},
                "show_sides": {"type": "boolean", "description": "Show both sides of cards"},
                "review_reverse": {"type": "boolean", "description": "Review cards in reverse by default"},
                "cards_per_day": {"type": "number", "description": "Limit new cards per day (null for unlimited)"}
            },
            "required": ["name"]
        }"#,
    ),
    (
        "get_deck",
        "Get details of a specific deck",
        r#"{
            "type": "object",
            "properties": {
                "deck_id": {"type": "string", "description": "The ID of the deck to retrieve"}
            },
            "required": ["deck_id"]
        }"#,
    ),
    (
        "list_decks",
        "List all decks",
        r#"{
            "type": "object",
            "properties": {
                "bookmark": {"type": "string", "description": "Pagination bookmark from previous response"}
            }
        }"#,
    ),
    (
        "update_deck",
        "Update an existing deck",
        r#"{
            "type": "object",
            "properties": {
                "deck_id": {"type": "string", "description": "The ID of the deck to update"},
                "name": {"type": "string", "description": "New name for the deck"},
                "parent_id": {"type": "string", "description": "Move deck under a different parent"},
                "archived": {"type": "boolean", "description": "Archive or unarchive the deck"},
                "sort_by": {"type": "string", "enum": ["none", "name", "created-at", "updated-at"], "description": "How to sort cards"},
                "cards_view": {"type": "string", "enum": ["list", "grid", "column"], "description": "Display view for cards"},
                "trashed": {"type": "boolean", "description": "Soft delete the deck (set to true to trash)"}
            },
            "required": ["deck_id"]
        }"#,
    ),
    (
        "delete_deck",
        "Permanently delete a deck and all its cards. This cannot be undone!",
        r#"{
            "type": "object",
            "properties": {
                "deck_id": {"type": "string", "description": "The ID of the deck to delete"}
            },
            "required": ["deck_id"]
        }"#,
    ),
    // Template tools
    (
        "create_template",
        "Create a new card template with custom fields. Field types: text, boolean, number, draw, ai",
        r#"{
            "type": "object",
            "properties": {
                "name": {"type": "string", "description": "Name of the template"},
                "content": {"type": "string", "description": "Template content using {{field-name}} placeholders for fields"},
                "fields": {
                    "type": "array",
                    "items": {
                        "type": "object",
                        "properties": {
                            "id": {"type": "string"},
                            "name": {"type": "string"},
                            "type": {"type": "string", "enum": ["text", "boolean", "number", "draw", "ai"]}
                        },
                        "required": ["id", "name", "type"]
                    },
                    "description": "Field definitions for the template"
                }
            },
            "required": ["name", "content", "fields"]
        }"#,
    ),
    (
        "get_template",
        "Get details of a specific template",
        r#"{
            "type": "object",
            "properties": {
                "template_id": {"type": "string", "description": "The ID of the template to retrieve"}
            },
            "required": ["template_id"]
        }"#,
    ),
    (
        "list_templates",
        "List all templates",
        r#"{
            "type": "object",
            "properties": {
                "bookmark": {"type": "string", "description": "Pagination bookmark from previous response"}
            }
        }"#,
    ),
    // Due cards
    (
        "get_due_cards",
        "Get cards that are due for review",
        r#"{
            "type": "object",
            "properties": {
                "deck_id": {"type": "string", "description": "Filter by deck ID"},
                "date": {"type": "string", "description": "Date in ISO 8601 format (defaults to today)"}
            }
        }"#,
    ),
    // Bulk operations
    (
        "create_cards_bulk",
        "Create multiple flashcards at once. Each card should have content separated by '---' for front/back.",
        r#"{
            "type": "object",
            "properties": {
                "deck_id": {"type": "string", "description": "The ID of the deck to add cards to"},
                "cards": {
                    "type": "array",
                    "items": {
                        "type": "object",
                        "properties": {
                            "content": {"type": "string", "description": "Card content (use --- to separate front/back)"},
                            "tags": {"type": "array", "items": {"type": "string"}, "description": "Tags for this card"}
                        },
                        "required": ["content"]
                    },
                    "description": "Array of cards to create"
                },
                "template_id": {"type": "string", "description": "Optional template ID to use for all cards"}
            },
            "required": ["deck_id", "cards"]
        }"#,
    ),
];

/// Get all tool definitions as ToolDefinition structs
pub fn get_tool_definitions() -> Vec<ToolDefinition> {
    TOOL_DEFINITIONS
        .iter()
        .map(|(name, description, schema)| ToolDefinition {
            name: name.to_string(),
            description: description.to_string(),
            input_schema: serde_json::from_str(schema).unwrap_or(json!({})),
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn catalog_has_all_operations_with_unique_names() {
        let tools = get_tool_definitions();
        assert_eq!(tools.len(), 17);

        let names: HashSet<&str> = tools.iter().map(|t| t.name.as_str()).collect();
        assert_eq!(names.len(), tools.len());
        for name in [
            "create_card",
            "update_card",
            "delete_attachment",
            "create_cards_bulk",
            "get_due_cards",
        ] {
            assert!(names.contains(name), "missing tool {name}");
        }
    }

    #[test]
    fn every_schema_parses_as_an_object() {
        for tool in get_tool_definitions() {
            assert_eq!(
                tool.input_schema["type"], "object",
                "schema for {} did not parse",
                tool.name
            );
        }
    }

    #[test]
    fn list_cards_limit_is_bounded() {
        let tools = get_tool_definitions();
        let list_cards = tools.iter().find(|t| t.name == "list_cards").unwrap();
        let limit = &list_cards.input_schema["properties"]["limit"];
        assert_eq!(limit["minimum"], 1);
        assert_eq!(limit["maximum"], 100);
    }

    #[test]
    fn required_fields_are_declared() {
        let tools = get_tool_definitions();
        let create_card = tools.iter().find(|t| t.name == "create_card").unwrap();
        assert_eq!(
            create_card.input_schema["required"],
            serde_json::json!(["content", "deck_id"])
        );
        let bulk = tools.iter().find(|t| t.name == "create_cards_bulk").unwrap();
        assert_eq!(
            bulk.input_schema["required"],
            serde_json::json!(["deck_id", "cards"])
        );
    }
}
