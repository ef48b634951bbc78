//! Stateless HTTP client for the Mochi Cards REST API
//!
//! One method per remote operation. Authentication is HTTP Basic with the
//! API key as username and an empty password. The client holds only the key
//! and the base URL; construct one per request context.

use base64::{engine::general_purpose::STANDARD, Engine as _};
use reqwest::{header, multipart, Method, StatusCode};
use serde_json::{json, Value};

use crate::error::{MochiError, Result};
use crate::types::{
    Card, CreateCardParams, CreateDeckParams, CreateTemplateParams, Deck, DueCard,
    ListCardsOptions, Paginated, Template, UpdateCardParams, UpdateDeckParams,
};

/// Default API host
pub const BASE_URL: &str = "https://app.mochi.cards/api";

/// Client for the Mochi Cards API
#[derive(Debug, Clone)]
pub struct MochiClient {
    client: reqwest::Client,
    api_key: String,
    base_url: String,
}

impl MochiClient {
    pub fn new(api_key: impl Into<String>) -> Self {
        Self::with_base_url(api_key, BASE_URL)
    }

    /// Point the client at a non-default host (tests, self-hosted proxies)
    pub fn with_base_url(api_key: impl Into<String>, base_url: impl Into<String>) -> Self {
        Self {
            client: reqwest::Client::new(),
            api_key: api_key.into(),
            base_url: base_url.into(),
        }
    }

    fn auth_header(&self) -> String {
        format!("Basic {}", STANDARD.encode(format!("{}:", self.api_key)))
    }

    /// Issue a JSON request. 204 and empty bodies yield an empty object;
    /// any other 2xx parses as JSON; non-2xx surfaces the status code and
    /// body text verbatim. No retry, no backoff.
    async fn request(
        &self,
        method: Method,
        path: &str,
        query: &[(&str, String)],
        body: Option<Value>,
    ) -> Result<Value> {
        let url = format!("{}{}", self.base_url, path);
        let mut req = self
            .client
            .request(method, &url)
            .header(header::AUTHORIZATION, self.auth_header());
        if !query.is_empty() {
            req = req.query(query);
        }
        if let Some(body) = body {
            req = req.json(&body);
        }

        let response = req.send().await?;
        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(MochiError::Api {
                status: status.as_u16(),
                body,
            });
        }

        if status == StatusCode::NO_CONTENT {
            return Ok(json!({}));
        }
        let text = response.text().await?;
        if text.is_empty() {
            return Ok(json!({}));
        }
        Ok(serde_json::from_str(&text)?)
    }

    // Cards

    pub async fn create_card(&self, params: &CreateCardParams) -> Result<Card> {
        let value = self
            .request(Method::POST, "/cards", &[], Some(serde_json::to_value(params)?))
            .await?;
        Ok(serde_json::from_value(value)?)
    }

    pub async fn get_card(&self, card_id: &str) -> Result<Card> {
        let value = self
            .request(Method::GET, &format!("/cards/{card_id}"), &[], None)
            .await?;
        Ok(serde_json::from_value(value)?)
    }

    pub async fn list_cards(&self, options: &ListCardsOptions) -> Result<Paginated<Card>> {
        let mut query = Vec::new();
        if let Some(deck_id) = &options.deck_id {
            query.push(("deck-id", deck_id.clone()));
        }
        if let Some(limit) = options.limit {
            query.push(("limit", limit.to_string()));
        }
        if let Some(bookmark) = &options.bookmark {
            query.push(("bookmark", bookmark.clone()));
        }
        let value = self.request(Method::GET, "/cards", &query, None).await?;
        Ok(serde_json::from_value(value)?)
    }

    pub async fn update_card(&self, card_id: &str, params: &UpdateCardParams) -> Result<Card> {
        let value = self
            .request(
                Method::POST,
                &format!("/cards/{card_id}"),
                &[],
                Some(serde_json::to_value(params)?),
            )
            .await?;
        Ok(serde_json::from_value(value)?)
    }

    pub async fn delete_card(&self, card_id: &str) -> Result<()> {
        self.request(Method::DELETE, &format!("/cards/{card_id}"), &[], None)
            .await?;
        Ok(())
    }

    /// Upload an attachment as a multipart form with a single `file` part.
    /// The multipart boundary header is left to the transport.
    pub async fn add_attachment(
        &self,
        card_id: &str,
        filename: &str,
        data: Vec<u8>,
        content_type: &str,
    ) -> Result<()> {
        let part = multipart::Part::bytes(data)
            .file_name(filename.to_string())
            .mime_str(content_type)?;
        let form = multipart::Form::new().part("file", part);

        let url = format!("{}/cards/{card_id}/attachments/{filename}", self.base_url);
        let response = self
            .client
            .post(&url)
            .header(header::AUTHORIZATION, self.auth_header())
            .multipart(form)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(MochiError::Api {
                status: status.as_u16(),
                body,
            });
        }
        Ok(())
    }

    pub async fn delete_attachment(&self, card_id: &str, filename: &str) -> Result<()> {
        self.request(
            Method::DELETE,
            &format!("/cards/{card_id}/attachments/{filename}"),
            &[],
            None,
        )
        .await?;
        Ok(())
    }

    // Decks

    pub async fn create_deck(&self, params: &CreateDeckParams) -> Result<Deck> {
        let value = self
            .request(Method::POST, "/decks", &[], Some(serde_json::to_value(params)?))
            .await?;
        Ok(serde_json::from_value(value)?)
    }

    pub async fn get_deck(&self, deck_id: &str) -> Result<Deck> {
        let value = self
            .request(Method::GET, &format!("/decks/{deck_id}"), &[], None)
            .await?;
        Ok(serde_json::from_value(value)?)
    }

    pub async fn list_decks(&self, bookmark: Option<&str>) -> Result<Paginated<Deck>> {
        let query = bookmark
            .map(|b| vec![("bookmark", b.to_string())])
            .unwrap_or_default();
        let value = self.request(Method::GET, "/decks", &query, None).await?;
        Ok(serde_json::from_value(value)?)
    }

    pub async fn update_deck(&self, deck_id: &str, params: &UpdateDeckParams) -> Result<Deck> {
        let value = self
            .request(
                Method::POST,
                &format!("/decks/{deck_id}"),
                &[],
                Some(serde_json::to_value(params)?),
            )
            .await?;
        Ok(serde_json::from_value(value)?)
    }

    pub async fn delete_deck(&self, deck_id: &str) -> Result<()> {
        self.request(Method::DELETE, &format!("/decks/{deck_id}"), &[], None)
            .await?;
        Ok(())
    }

    // Templates

    pub async fn create_template(&self, params: &CreateTemplateParams) -> Result<Template> {
        let value = self
            .request(Method::POST, "/templates", &[], Some(serde_json::to_value(params)?))
            .await?;
        Ok(serde_json::from_value(value)?)
    }

    pub async fn get_template(&self, template_id: &str) -> Result<Template> {
        let value = self
            .request(Method::GET, &format!("/templates/{template_id}"), &[], None)
            .await?;
        Ok(serde_json::from_value(value)?)
    }

    pub async fn list_templates(&self, bookmark: Option<&str>) -> Result<Paginated<Template>> {
        let query = bookmark
            .map(|b| vec![("bookmark", b.to_string())])
            .unwrap_or_default();
        let value = self.request(Method::GET, "/templates", &query, None).await?;
        Ok(serde_json::from_value(value)?)
    }

    // Due cards

    /// Cards due for review, optionally scoped to a deck and a date
    pub async fn due_cards(
        &self,
        deck_id: Option<&str>,
        date: Option<&str>,
    ) -> Result<Paginated<DueCard>> {
        let path = match deck_id {
            Some(deck_id) => format!("/due/{deck_id}"),
            None => "/due".to_string(),
        };
        let query = date
            .map(|d| vec![("date", d.to_string())])
            .unwrap_or_default();
        let value = self.request(Method::GET, &path, &query, None).await?;
        Ok(serde_json::from_value(value)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn auth_header_is_basic_key_with_empty_password() {
        let client = MochiClient::new("test-key");
        // base64("test-key:")
        assert_eq!(client.auth_header(), "Basic dGVzdC1rZXk6");
    }

    #[test]
    fn base_url_override_is_respected() {
        let client = MochiClient::with_base_url("k", "http://127.0.0.1:9999/api");
        assert_eq!(client.base_url, "http://127.0.0.1:9999/api");
        assert_eq!(MochiClient::new("k").base_url, BASE_URL);
    }
}
