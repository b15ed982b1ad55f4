//! Per-caller dataset selection

use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;
use tracing::debug;
use uuid::Uuid;

/// Which stored dataset each caller is working with
#[derive(Debug, Clone, Default)]
pub struct DatasetSelections {
    inner: Arc<RwLock<HashMap<Uuid, String>>>,
}

impl DatasetSelections {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn get(&self, user: Uuid) -> Option<String> {
        self.inner.read().await.get(&user).cloned()
    }

    /// Select `name` for `user`, returning the previous selection
    pub async fn set(&self, user: Uuid, name: impl Into<String>) -> Option<String> {
        let name = name.into();
        debug!(%user, dataset = %name, "Dataset selected");
        self.inner.write().await.insert(user, name)
    }

    pub async fn clear(&self, user: Uuid) -> Option<String> {
        self.inner.write().await.remove(&user)
    }

    /// Drop every selection pointing at `name`; returns how many were dropped
    pub async fn forget_dataset(&self, name: &str) -> usize {
        let mut selections = self.inner.write().await;
        let before = selections.len();
        selections.retain(|_, selected| selected != name);
        before - selections.len()
    }

    pub async fn forget_all(&self) -> usize {
        let mut selections = self.inner.write().await;
        let count = selections.len();
        selections.clear();
        count
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_selection_is_per_user() {
        let selections = DatasetSelections::new();
        let (alice, bob) = (Uuid::new_v4(), Uuid::new_v4());

        assert_eq!(selections.set(alice, "a.csv").await, None);
        assert_eq!(selections.get(alice).await.as_deref(), Some("a.csv"));
        assert_eq!(selections.get(bob).await, None);

        assert_eq!(selections.set(alice, "b.csv").await.as_deref(), Some("a.csv"));
        assert_eq!(selections.clear(alice).await.as_deref(), Some("b.csv"));
        assert_eq!(selections.get(alice).await, None);
    }

    #[tokio::test]
    async fn test_forget_dataset() {
        let selections = DatasetSelections::new();
        let (alice, bob, carol) = (Uuid::new_v4(), Uuid::new_v4(), Uuid::new_v4());
        selections.set(alice, "shared.csv").await;
        selections.set(bob, "shared.csv").await;
        selections.set(carol, "own.csv").await;

        assert_eq!(selections.forget_dataset("shared.csv").await, 2);
        assert_eq!(selections.get(bob).await, None);
        assert_eq!(selections.get(carol).await.as_deref(), Some("own.csv"));

        assert_eq!(selections.forget_all().await, 1);
    }
}
