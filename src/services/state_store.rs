use serde::de::DeserializeOwned;
use serde::Serialize;
use tracing::warn;

use crate::db::repositories::state_repository::StateRepository;
use crate::db::DbPool;
use crate::error::AppResult;

/// Whole-document access to the JSON state slots. Every read parses the full
/// slot and every write replaces it, so there is no partial-update state to
/// reason about.
#[derive(Clone)]
pub struct StateStore {
    db: DbPool,
}

impl StateStore {
    pub fn new(db: DbPool) -> Self {
        Self { db }
    }

    /// Loads a slot, falling back to `default` when the slot is absent.
    /// A slot that exists but no longer parses is discarded and rewritten
    /// with the default instead of surfacing a parse error.
    pub fn load_or_default<T, F>(&self, key: &str, default: F) -> AppResult<T>
    where
        T: DeserializeOwned + Serialize,
        F: FnOnce() -> T,
    {
        let row = self
            .db
            .with_connection(|conn| StateRepository::get(conn, key))?;

        let Some(row) = row else {
            return Ok(default());
        };

        match serde_json::from_str::<T>(&row.value) {
            Ok(value) => Ok(value),
            Err(err) => {
                warn!(
                    target: "app::state",
                    key,
                    error = %err,
                    "stored state is malformed, resetting slot to defaults"
                );
                let fallback = default();
                self.save(key, &fallback)?;
                Ok(fallback)
            }
        }
    }

    pub fn save<T: Serialize>(&self, key: &str, value: &T) -> AppResult<()> {
        let json = serde_json::to_string(value)?;
        self.db
            .with_connection(|conn| StateRepository::upsert(conn, key, &json))
    }
}
