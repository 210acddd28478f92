use std::error::Error;

use async_trait::async_trait;

use crate::asset::{Asset, AssetId, AssetPayload};
use crate::completion::CompletionUpdate;

/// A place assets are stored in, and can be edited.
///
/// This is usually the REST API (see [`Client`](crate::client::Client)), but a local [`Cache`](crate::cache::Cache) can stand in for it.
#[async_trait]
pub trait AssetSource {
    /// Returns every asset of this source
    /// This function may trigger network requests (that can be a long process, or that can even fail)
    async fn get_assets(&self) -> Result<Vec<Asset>, Box<dyn Error>>;

    /// Create an asset. Its ID is picked by the source
    async fn create_asset(&mut self, payload: &AssetPayload) -> Result<Asset, Box<dyn Error>>;

    /// Replace the editable fields of an existing asset
    async fn update_asset(&mut self, id: AssetId, payload: &AssetPayload) -> Result<Asset, Box<dyn Error>>;

    /// Record a completed maintenance on an existing asset
    async fn patch_asset(&mut self, id: AssetId, update: &CompletionUpdate) -> Result<Asset, Box<dyn Error>>;

    async fn delete_asset(&mut self, id: AssetId) -> Result<(), Box<dyn Error>>;
}
