use anyhow::{bail, Context, Result};
use async_trait::async_trait;
use secrecy::{ExposeSecret, SecretString};
use serde::de::DeserializeOwned;
use serde::Deserialize;
use tracing::debug;

use super::{CardQuery, CardSource};
use crate::error::{Container, ReviewError};
use crate::model::card::{Card, LabelMap};

const API_BASE: &str = "https://api.trello.com/1";

pub struct TrelloSource {
    api_key: SecretString,
    token: SecretString,
    member: SecretString,
    base_url: String,
    client: reqwest::Client,
}

impl TrelloSource {
    pub fn new(api_key: SecretString, token: SecretString, member: SecretString) -> Self {
        Self {
            api_key,
            token,
            member,
            base_url: API_BASE.to_string(),
            client: reqwest::Client::new(),
        }
    }

    #[cfg(test)]
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into().trim_end_matches('/').to_string();
        self
    }

    fn auth_params(&self) -> [(&str, &str); 2] {
        [
            ("key", self.api_key.expose_secret()),
            ("token", self.token.expose_secret()),
        ]
    }

    async fn get<T: DeserializeOwned>(
        &self,
        path: &str,
        params: &[(&str, &str)],
        what: &str,
    ) -> Result<T> {
        let resp = self
            .client
            .get(format!("{}{path}", self.base_url))
            .query(&self.auth_params())
            .query(params)
            .send()
            .await
            .with_context(|| format!("Trello {what} request failed"))?;

        let status = resp.status();
        if !status.is_success() {
            let body = resp.text().await.unwrap_or_default();
            bail!("Trello {what} responded with status {}: {body}", status.as_u16());
        }

        resp.json()
            .await
            .with_context(|| format!("Failed to parse Trello {what}"))
    }
}

#[derive(Deserialize)]
struct Member {
    id: String,
}

#[derive(Deserialize)]
struct Board {
    id: String,
    name: String,
}

#[derive(Deserialize)]
struct TrelloList {
    id: String,
    name: String,
}

#[derive(Deserialize)]
struct TrelloLabel {
    id: String,
    #[serde(default)]
    name: String,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct TrelloCard {
    name: String,
    desc: Option<String>,
    #[serde(default)]
    id_labels: Vec<String>,
}

#[async_trait]
impl CardSource for TrelloSource {
    fn name(&self) -> &str {
        "Trello"
    }

    async fn fetch_cards(&self, query: &CardQuery) -> Result<Vec<Card>> {
        // Resolve the member to an ID
        let member: Member = self
            .get(
                &format!("/members/{}", self.member.expose_secret()),
                &[("fields", "id")],
                "member",
            )
            .await?;

        // Find the board by name among the member's boards
        let boards: Vec<Board> = self
            .get(
                &format!("/members/{}/boards", member.id),
                &[("fields", "id,name")],
                "boards",
            )
            .await?;
        let board = boards
            .into_iter()
            .find(|b| b.name == query.board)
            .ok_or_else(|| ReviewError::NotFound {
                kind: Container::Board,
                name: query.board.clone(),
            })?;
        debug!(board = %board.name, id = %board.id, "found board");

        // Then the list on that board
        let lists: Vec<TrelloList> = self
            .get(
                &format!("/boards/{}/lists", board.id),
                &[("fields", "id,name")],
                "lists",
            )
            .await?;
        let list = lists
            .into_iter()
            .find(|l| l.name == query.list)
            .ok_or_else(|| ReviewError::NotFound {
                kind: Container::List,
                name: query.list.clone(),
            })?;
        debug!(list = %list.name, id = %list.id, "found list");

        // Cards of the list, in board order
        let cards: Vec<TrelloCard> = self
            .get(
                &format!("/lists/{}/cards", list.id),
                &[("fields", "name,desc,idLabels")],
                "cards",
            )
            .await?;

        // Board labels, only when the caller wants names
        let label_map: Option<LabelMap> = if query.with_labels {
            let labels: Vec<TrelloLabel> = self
                .get(
                    &format!("/boards/{}/labels", board.id),
                    &[("fields", "id,name")],
                    "labels",
                )
                .await?;
            Some(labels.into_iter().map(|l| (l.id, l.name)).collect())
        } else {
            None
        };
        debug!(
            cards = cards.len(),
            labels = label_map.as_ref().map_or(0, LabelMap::len),
            "fetched cards"
        );

        Ok(cards
            .into_iter()
            .map(|card| {
                Card::new(
                    card.name,
                    card.desc.unwrap_or_default(),
                    card.id_labels,
                    label_map.as_ref(),
                )
            })
            .collect())
    }
}
