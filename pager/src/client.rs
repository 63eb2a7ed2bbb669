//! PokeAPI client implementation

use crate::config::ApiConfig;
use crate::environment::CreatureClient;
use crate::error::FetchError;
use crate::types::{Creature, CreatureIndex};
use reqwest::{Client, StatusCode, Url};
use serde::Deserialize;
use std::future::Future;
use std::pin::Pin;

#[derive(Debug, Deserialize)]
struct PokemonResponse {
    name: String,
    sprites: PokemonSprites,
}

#[derive(Debug, Deserialize)]
struct PokemonSprites {
    front_default: Option<String>,
}

/// Upper-case the first letter of every word and lower-case the rest.
///
/// Any character that is not a letter ends a word, so hyphenated names get
/// a capital after each hyphen.
///
/// ```
/// use dexpager::client::capitalize;
///
/// assert_eq!(capitalize("pikachu"), "Pikachu");
/// assert_eq!(capitalize("mr-mime"), "Mr-Mime");
/// assert_eq!(capitalize("tapu koko"), "Tapu Koko");
/// ```
#[must_use]
pub fn capitalize(name: &str) -> String {
    let mut out = String::with_capacity(name.len());
    let mut at_word_start = true;
    for c in name.chars() {
        if !c.is_alphabetic() {
            out.push(c);
            at_word_start = true;
        } else if at_word_start {
            out.extend(c.to_uppercase());
            at_word_start = false;
        } else {
            out.extend(c.to_lowercase());
        }
    }
    out
}

/// PokeAPI client
#[derive(Clone, Debug)]
pub struct PokeApiClient {
    client: Client,
    base_url: String,
}

impl PokeApiClient {
    /// Create a client from configuration
    ///
    /// # Errors
    ///
    /// Returns [`FetchError::ClientBuild`] if the HTTP client cannot be built
    pub fn from_config(config: &ApiConfig) -> Result<Self, FetchError> {
        let client = Client::builder()
            .timeout(config.request_timeout)
            .build()
            .map_err(|e| FetchError::ClientBuild(e.to_string()))?;

        Ok(Self::with_client(client, &config.base_url))
    }

    /// Create a client around an existing `reqwest::Client`
    #[must_use]
    pub fn with_client(client: Client, base_url: &str) -> Self {
        Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    /// Address of the creature resource for `index`
    #[must_use]
    pub fn creature_url(&self, index: CreatureIndex) -> String {
        format!("{}/pokemon/{index}", self.base_url)
    }

    /// Fetch and decode the creature at `index`
    ///
    /// # Errors
    ///
    /// Returns errors for network failures, non-success statuses, or
    /// bodies that are not a creature record
    #[tracing::instrument(skip(self))]
    pub async fn fetch_creature(&self, index: CreatureIndex) -> Result<Creature, FetchError> {
        let url = self.creature_url(index);
        tracing::debug!(%url, "Fetching creature");

        let response = self.client.get(&url).send().await.map_err(|e| {
            if e.is_timeout() {
                FetchError::Timeout
            } else {
                FetchError::RequestFailed(e.to_string())
            }
        })?;

        match response.status() {
            status if status.is_success() => {},
            StatusCode::NOT_FOUND => return Err(FetchError::NotFound),
            status => {
                return Err(FetchError::Status {
                    status: status.as_u16(),
                });
            },
        }

        let body = response.bytes().await.map_err(|e| {
            if e.is_timeout() {
                FetchError::Timeout
            } else {
                FetchError::RequestFailed(e.to_string())
            }
        })?;

        let model: PokemonResponse = serde_json::from_slice(&body)
            .map_err(|e| FetchError::ResponseParseFailed(e.to_string()))?;

        let image_url = model
            .sprites
            .front_default
            .map(|raw| {
                Url::parse(&raw)
                    .map(|_| raw)
                    .map_err(|e| FetchError::ResponseParseFailed(format!("sprite url: {e}")))
            })
            .transpose()?;

        Ok(Creature {
            name: capitalize(&model.name),
            image_url,
        })
    }
}

impl CreatureClient for PokeApiClient {
    fn fetch(
        &self,
        index: CreatureIndex,
    ) -> Pin<Box<dyn Future<Output = Result<Creature, FetchError>> + Send + '_>> {
        Box::pin(self.fetch_creature(index))
    }
}
