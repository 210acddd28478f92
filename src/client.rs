//! This module provides a client to the REST API that stores assets

use std::error::Error;

use async_trait::async_trait;
use reqwest::{Method, StatusCode};
use reqwest::header::CONTENT_TYPE;
use serde::Serialize;
use url::Url;

use crate::asset::{Asset, AssetId, AssetPayload};
use crate::completion::CompletionUpdate;
use crate::traits::AssetSource;


/// An [`AssetSource`] that fetches its data from the REST API.
///
/// Authentication is not handled here: the bearer token must have been obtained from the identity provider beforehand.
pub struct Client {
    base_url: Url,
    token: String,
    http: reqwest::Client,
}

impl Client {
    /// Create a client. This does not start a connection
    pub fn new<S: AsRef<str>, T: ToString>(base_url: S, token: T) -> Result<Self, Box<dyn Error>> {
        let base_url = Url::parse(base_url.as_ref())?;
        if base_url.cannot_be_a_base() {
            return Err(format!("{} cannot be used as an API base URL", base_url).into());
        }

        Ok(Self{
            base_url,
            token: token.to_string(),
            http: reqwest::Client::new(),
        })
    }

    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// The URL of the asset collection, or of a single asset
    fn assets_url(&self, id: Option<AssetId>) -> Result<Url, Box<dyn Error>> {
        let mut url = self.base_url.clone();
        {
            let mut segments = url.path_segments_mut()
                .map_err(|_| format!("{} cannot be used as an API base URL", self.base_url))?;
            segments.pop_if_empty().push("assets");
            if let Some(id) = id {
                segments.push(&id.to_string());
            }
        }
        Ok(url)
    }

    /// Send a request, and return the response body (`None` for `204 No Content`)
    async fn request<B: Serialize + ?Sized>(&self, method: Method, url: Url, body: Option<&B>) -> Result<Option<String>, Box<dyn Error>> {
        log::debug!("{} {}", method, url);
        let mut req = self.http
            .request(method.clone(), url.as_str())
            .bearer_auth(&self.token);
        if let Some(body) = body {
            req = req
                .header(CONTENT_TYPE, "application/json")
                .body(serde_json::to_string(body)?);
        }

        let res = req.send().await?;
        let status = res.status();
        if status == StatusCode::UNAUTHORIZED {
            return Err(format!("Authentication failed for {} {}. Check the API audience settings", method, url).into());
        }
        if status.is_success() == false {
            let text = res.text().await.unwrap_or_default();
            let details = if text.is_empty() { "Request failed".to_string() } else { text };
            return Err(format!("API Error ({}) for {} {}: {}", status.as_u16(), method, url, details).into());
        }
        if status == StatusCode::NO_CONTENT {
            return Ok(None);
        }

        Ok(Some(res.text().await?))
    }

    async fn request_asset<B: Serialize + ?Sized>(&self, method: Method, url: Url, body: &B) -> Result<Asset, Box<dyn Error>> {
        match self.request(method, url.clone(), Some(body)).await? {
            None => Err(format!("The server returned no asset for {}", url).into()),
            Some(text) => Ok(serde_json::from_str(&text)?),
        }
    }
}

/// Parse a list of assets, leaving out (and logging) the ones that cannot be read
pub fn parse_asset_list(text: &str) -> Result<Vec<Asset>, Box<dyn Error>> {
    let values: Vec<serde_json::Value> = serde_json::from_str(text)?;
    let mut assets = Vec::with_capacity(values.len());
    for value in values {
        match serde_json::from_value::<Asset>(value) {
            Ok(asset) => assets.push(asset),
            Err(err) => {
                log::warn!("Invalid asset received from the server ({}). Ignoring it", err);
                continue;
            },
        }
    }
    Ok(assets)
}

#[async_trait]
impl AssetSource for Client {
    async fn get_assets(&self) -> Result<Vec<Asset>, Box<dyn Error>> {
        let url = self.assets_url(None)?;
        match self.request::<()>(Method::GET, url, None).await? {
            None => Ok(Vec::new()),
            Some(text) => {
                let assets = parse_asset_list(&text)?;
                log::info!("Fetched {} asset(s)", assets.len());
                Ok(assets)
            },
        }
    }

    async fn create_asset(&mut self, payload: &AssetPayload) -> Result<Asset, Box<dyn Error>> {
        let url = self.assets_url(None)?;
        self.request_asset(Method::POST, url, payload).await
    }

    async fn update_asset(&mut self, id: AssetId, payload: &AssetPayload) -> Result<Asset, Box<dyn Error>> {
        let url = self.assets_url(Some(id))?;
        self.request_asset(Method::PUT, url, payload).await
    }

    async fn patch_asset(&mut self, id: AssetId, update: &CompletionUpdate) -> Result<Asset, Box<dyn Error>> {
        let url = self.assets_url(Some(id))?;
        self.request_asset(Method::PATCH, url, update).await
    }

    async fn delete_asset(&mut self, id: AssetId) -> Result<(), Box<dyn Error>> {
        let url = self.assets_url(Some(id))?;
        self.request::<()>(Method::DELETE, url, None).await?;
        Ok(())
    }
}
