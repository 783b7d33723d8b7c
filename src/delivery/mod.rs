pub mod console;
pub mod slack;

use anyhow::Result;
use async_trait::async_trait;

use crate::review::Report;

/// Where a finished report goes.
#[async_trait]
pub trait Delivery: Send + Sync {
    fn name(&self) -> &str;
    async fn deliver(&self, report: &Report) -> Result<()>;
}
