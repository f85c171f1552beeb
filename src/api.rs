//! PokeAPI client and list enrichment

use std::future::Future;
use std::sync::{Arc, OnceLock};

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use tokio::sync::Semaphore;
use tokio::task::JoinSet;

use crate::state::{PokemonDetail, PokemonRef, PokemonStat, PokemonSummary};

const API_BASE: &str = "https://pokeapi.co/api/v2";
const ENRICH_CONCURRENCY: usize = 12;

/// Failure taxonomy for catalog requests.
///
/// Carries strings rather than source errors because failures travel
/// through actions and screen state.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize, JsonSchema)]
pub enum FetchError {
    /// Transport failure or non-success status other than 404
    Network(String),
    /// The remote reports no such creature
    NotFound(String),
    /// The payload does not match the expected shape
    Decode(String),
}

impl std::fmt::Display for FetchError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            FetchError::Network(detail) => write!(f, "network error: {detail}"),
            FetchError::NotFound(target) => write!(f, "not found: {target}"),
            FetchError::Decode(detail) => write!(f, "malformed response: {detail}"),
        }
    }
}

impl std::error::Error for FetchError {}

#[derive(Clone, Debug, Deserialize)]
struct NamedResource {
    name: String,
    url: String,
}

#[derive(Clone, Debug, Deserialize)]
struct ListResponse {
    results: Vec<NamedResource>,
}

#[derive(Clone, Debug, Deserialize)]
struct PokemonResponse {
    id: u16,
    name: String,
    height: u16,
    weight: u16,
    types: Vec<PokemonTypeSlot>,
    stats: Vec<PokemonStatSlot>,
    sprites: serde_json::Value,
}

#[derive(Clone, Debug, Deserialize)]
struct PokemonTypeSlot {
    #[serde(rename = "type")]
    type_info: NamedResource,
}

#[derive(Clone, Debug, Deserialize)]
struct PokemonStatSlot {
    base_stat: u16,
    stat: NamedResource,
}

/// Fetch the first page of the catalog listing.
pub async fn list_first_page(limit: u32) -> Result<Vec<PokemonRef>, FetchError> {
    let url = format!("{API_BASE}/pokemon?limit={limit}");
    let response: ListResponse = fetch_json(&url).await?;
    Ok(response
        .results
        .into_iter()
        .map(|entry| PokemonRef {
            name: entry.name,
            url: entry.url,
        })
        .collect())
}

/// Fetch one creature's full record.
///
/// `target` is a numeric id, a name, or a fully-qualified reference URL;
/// a URL is used verbatim so the enrichment pipeline and the detail
/// screen share the same fetch path.
pub async fn fetch_detail(target: &str) -> Result<PokemonDetail, FetchError> {
    let url = request_url(target);
    let response: PokemonResponse = fetch_json(&url).await.map_err(|error| match error {
        FetchError::NotFound(_) => FetchError::NotFound(target.to_string()),
        other => other,
    })?;
    map_detail(response)
}

/// The detail fetch projected down to the list record.
pub async fn fetch_summary(entry: &PokemonRef) -> Result<PokemonSummary, FetchError> {
    fetch_detail(&entry.url).await.map(PokemonSummary::from)
}

/// Turn references into summaries, one detail fetch per reference.
///
/// All fetches start together and are joined once every one has settled.
/// A failed item is dropped and the remaining items keep their input
/// order; the error only propagates when nothing loaded at all.
pub async fn enrich_references(refs: Vec<PokemonRef>) -> Result<Vec<PokemonSummary>, FetchError> {
    enrich_with(refs, |entry| async move { fetch_summary(&entry).await }).await
}

async fn enrich_with<F, Fut>(
    refs: Vec<PokemonRef>,
    fetch: F,
) -> Result<Vec<PokemonSummary>, FetchError>
where
    F: Fn(PokemonRef) -> Fut,
    Fut: Future<Output = Result<PokemonSummary, FetchError>> + Send + 'static,
{
    if refs.is_empty() {
        return Ok(Vec::new());
    }

    let semaphore = Arc::new(Semaphore::new(ENRICH_CONCURRENCY));
    let mut join_set = JoinSet::new();
    let count = refs.len();
    for (index, entry) in refs.into_iter().enumerate() {
        let semaphore = Arc::clone(&semaphore);
        let future = fetch(entry);
        join_set.spawn(async move {
            let Ok(_permit) = semaphore.acquire_owned().await else {
                return (
                    index,
                    Err(FetchError::Network("enrichment pool closed".to_string())),
                );
            };
            (index, future.await)
        });
    }

    // Index-addressed slots keep output order equal to input order no
    // matter which fetch settles first.
    let mut slots: Vec<Option<PokemonSummary>> = Vec::new();
    slots.resize_with(count, || None);
    let mut last_error = None;
    while let Some(joined) = join_set.join_next().await {
        match joined {
            Ok((index, Ok(summary))) => slots[index] = Some(summary),
            Ok((_, Err(error))) => last_error = Some(error),
            Err(_) => {}
        }
    }

    let summaries: Vec<PokemonSummary> = slots.into_iter().flatten().collect();
    if summaries.is_empty() {
        if let Some(error) = last_error {
            return Err(error);
        }
    }
    Ok(summaries)
}

fn request_url(target: &str) -> String {
    if target.starts_with("http://") || target.starts_with("https://") {
        target.to_string()
    } else {
        format!("{API_BASE}/pokemon/{target}")
    }
}

fn map_detail(response: PokemonResponse) -> Result<PokemonDetail, FetchError> {
    let artwork_url = pointer_string(&response.sprites, "/other/official-artwork/front_default")
        .ok_or_else(|| FetchError::Decode("missing official-artwork sprite".to_string()))?;
    if response.types.is_empty() {
        return Err(FetchError::Decode("empty type list".to_string()));
    }

    Ok(PokemonDetail {
        id: response.id,
        name: response.name,
        artwork_url,
        types: response
            .types
            .into_iter()
            .map(|slot| slot.type_info.name)
            .collect(),
        height: response.height,
        weight: response.weight,
        stats: response
            .stats
            .into_iter()
            .map(|slot| PokemonStat {
                name: slot.stat.name,
                value: slot.base_stat,
            })
            .collect(),
    })
}

fn pointer_string(value: &serde_json::Value, pointer: &str) -> Option<String> {
    value
        .pointer(pointer)
        .and_then(|val| val.as_str())
        .map(|s| s.to_string())
}

async fn fetch_json<T: serde::de::DeserializeOwned>(url: &str) -> Result<T, FetchError> {
    let response = http_client()
        .get(url)
        .send()
        .await
        .map_err(|err| FetchError::Network(err.to_string()))?;
    if response.status() == reqwest::StatusCode::NOT_FOUND {
        return Err(FetchError::NotFound(url.to_string()));
    }
    let response = response
        .error_for_status()
        .map_err(|err| FetchError::Network(err.to_string()))?;
    let bytes = response
        .bytes()
        .await
        .map_err(|err| FetchError::Network(err.to_string()))?;
    serde_json::from_slice(&bytes).map_err(|err| FetchError::Decode(err.to_string()))
}

fn http_client() -> &'static reqwest::Client {
    static CLIENT: OnceLock<reqwest::Client> = OnceLock::new();
    CLIENT.get_or_init(reqwest::Client::new)
}
