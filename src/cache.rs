//! This module provides a local cache for assets
//!
//! Because the API may be slow or unreachable, an app can display the cached copy at startup, then refresh it.

use std::path::PathBuf;
use std::path::Path;
use std::error::Error;

use serde::{Deserialize, Serialize};
use async_trait::async_trait;
use chrono::{DateTime, Utc};

use crate::asset::{Asset, AssetId, AssetPayload};
use crate::completion::CompletionUpdate;
use crate::traits::AssetSource;


/// An [`AssetSource`] that stores its assets in a local file
#[derive(Debug, PartialEq)]
pub struct Cache {
    backing_file: PathBuf,
    data: CachedData,
}

#[derive(Default, Debug, PartialEq, Serialize, Deserialize)]
struct CachedData {
    assets: Vec<Asset>,
    last_refresh: Option<DateTime<Utc>>,
}

impl Cache {
    /// Initialize a cache from the content of a valid backing file if it exists.
    /// Returns an error otherwise
    pub fn from_file(path: &Path) -> Result<Self, Box<dyn Error>> {
        let data = match std::fs::File::open(path) {
            Err(err) => {
                return Err(format!("Unable to open file {:?}: {}", path, err).into());
            },
            Ok(file) => serde_json::from_reader(std::io::BufReader::new(file))?,
        };

        Ok(Self{
            backing_file: PathBuf::from(path),
            data,
        })
    }

    /// Initialize an empty cache
    pub fn new(path: &Path) -> Self {
        Self{
            backing_file: PathBuf::from(path),
            data: CachedData::default(),
        }
    }

    /// Store the current Cache to its backing file
    pub fn save_to_file(&self) -> Result<(), Box<dyn Error>> {
        let path = &self.backing_file;
        let file = match std::fs::File::create(path) {
            Err(err) => {
                return Err(format!("Unable to save file {:?}: {}", path, err).into());
            },
            Ok(f) => f,
        };

        serde_json::to_writer(file, &self.data)?;
        log::debug!("Saved {} asset(s) to {:?}", self.data.assets.len(), path);
        Ok(())
    }

    pub fn assets(&self) -> &[Asset] {
        &self.data.assets
    }

    pub fn get_asset(&self, id: AssetId) -> Option<&Asset> {
        self.data.assets.iter().find(|asset| asset.id() == id)
    }

    /// Replace the whole content of the cache, e.g. with what has just been fetched from the server
    pub fn replace_all(&mut self, assets: Vec<Asset>) {
        self.data.assets = assets;
        self.data.last_refresh = Some(Utc::now());
    }

    /// The last time the cache has been filled with data from the server (or None in case it never has)
    pub fn last_refresh(&self) -> Option<DateTime<Utc>> {
        self.data.last_refresh
    }

    /// Insert an asset, or replace the one that has the same ID
    pub fn upsert(&mut self, asset: Asset) {
        match self.data.assets.iter_mut().find(|a| a.id() == asset.id()) {
            Some(existing) => *existing = asset,
            None => self.data.assets.push(asset),
        }
    }

    fn next_id(&self) -> AssetId {
        let max = self.data.assets.iter()
            .map(|asset| asset.id().as_i64())
            .max()
            .unwrap_or(0);
        AssetId::from(max + 1)
    }

    fn get_asset_mut(&mut self, id: AssetId) -> Result<&mut Asset, Box<dyn Error>> {
        self.data.assets.iter_mut()
            .find(|asset| asset.id() == id)
            .ok_or_else(|| format!("No asset with id {}", id).into())
    }
}

#[async_trait]
impl AssetSource for Cache {
    async fn get_assets(&self) -> Result<Vec<Asset>, Box<dyn Error>> {
        Ok(self.data.assets.clone())
    }

    async fn create_asset(&mut self, payload: &AssetPayload) -> Result<Asset, Box<dyn Error>> {
        let asset = Asset::from_draft(self.next_id(), payload.draft().clone())?;
        self.data.assets.push(asset.clone());
        Ok(asset)
    }

    async fn update_asset(&mut self, id: AssetId, payload: &AssetPayload) -> Result<Asset, Box<dyn Error>> {
        let asset = self.get_asset_mut(id)?;
        asset.apply_draft(payload.draft().clone())?;
        Ok(asset.clone())
    }

    async fn patch_asset(&mut self, id: AssetId, update: &CompletionUpdate) -> Result<Asset, Box<dyn Error>> {
        let asset = self.get_asset_mut(id)?;
        update.apply_to(asset);
        Ok(asset.clone())
    }

    async fn delete_asset(&mut self, id: AssetId) -> Result<(), Box<dyn Error>> {
        let before = self.data.assets.len();
        self.data.assets.retain(|asset| asset.id() != id);
        if self.data.assets.len() == before {
            return Err(format!("No asset with id {}", id).into());
        }
        Ok(())
    }
}
