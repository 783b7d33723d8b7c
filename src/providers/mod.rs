pub mod trello;

use anyhow::Result;
use async_trait::async_trait;

use crate::model::card::Card;

/// Which list to read, named the way the user sees it on the board.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CardQuery {
    pub board: String,
    pub list: String,
    pub with_labels: bool,
}

#[async_trait]
pub trait CardSource: Send + Sync {
    fn name(&self) -> &str;
    /// Cards of the list in board order, label names resolved. A board or list
    /// that does not exist is a `ReviewError::NotFound`.
    async fn fetch_cards(&self, query: &CardQuery) -> Result<Vec<Card>>;
}
