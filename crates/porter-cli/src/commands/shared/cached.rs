use porter_core::cache::CacheState;
use porter_store::{CachedSlice, OpFailure, StoreError};

use crate::context::AppContext;

/// Load a cached resource, turning a failed or unfinished load into an error.
pub async fn load_cached<T>(slice: &CachedSlice<T>, ctx: &AppContext) -> anyhow::Result<T>
where
    T: Clone + Send + Sync + 'static,
{
    match slice.ensure_loaded().await {
        Ok(CacheState::Ready(value)) => Ok(value),
        Ok(CacheState::Failed(error)) => Err(anyhow::anyhow!(error)),
        Ok(CacheState::Loading | CacheState::Uninitialized) => {
            anyhow::bail!("resource is still loading")
        }
        Err(error) => Err(store_error(&error, ctx)),
    }
}

pub fn store_error(error: &StoreError, ctx: &AppContext) -> anyhow::Error {
    ctx.op_error(OpFailure::from(error))
}
