//! Favorites kept in snapshot storage

use serde::{Deserialize, Serialize};
use tracing::trace;

use crate::{
    favorites::{FavoriteKind, FavoritesError, FavoritesRemote},
    ids::UserId,
    snapshot::SnapshotStorage,
};

/// Prefix of the per-user storage key.
const KEY_PREFIX: &str = "foodie-favorites-";

#[derive(Debug, Default, Serialize, Deserialize)]
struct StoredFavorites {
    #[serde(default)]
    restaurants: Vec<String>,

    #[serde(default)]
    menu_items: Vec<String>,
}

impl StoredFavorites {
    fn ids_mut(&mut self, kind: FavoriteKind) -> &mut Vec<String> {
        match kind {
            FavoriteKind::Restaurant => &mut self.restaurants,
            FavoriteKind::MenuItem => &mut self.menu_items,
        }
    }
}

/// Favorites remote backed by [`SnapshotStorage`], one slot per user.
///
/// Stands in for the hosted favorites tables when running offline.
#[derive(Debug, Clone)]
pub struct LocalFavoritesRemote<S> {
    storage: S,
}

impl<S: SnapshotStorage> LocalFavoritesRemote<S> {
    /// Stores favorites in `storage`.
    pub fn new(storage: S) -> Self {
        Self { storage }
    }

    /// Storage key holding a user's favorites.
    ///
    /// Path separators and control characters in the user id are
    /// percent-encoded byte by byte, as is `%` itself, so every user id maps
    /// to its own valid key.
    pub fn key_for(user: &UserId) -> String {
        let mut key = String::from(KEY_PREFIX);

        for c in user.as_str().chars() {
            if c == '%' || c == '/' || c == '\\' || c.is_control() {
                let mut buf = [0; 4];
                for byte in c.encode_utf8(&mut buf).bytes() {
                    key.push_str(&format!("%{byte:02X}"));
                }
            } else {
                key.push(c);
            }
        }

        key
    }

    fn load(&self, user: &UserId) -> Result<StoredFavorites, FavoritesError> {
        match self.storage.read(&Self::key_for(user))? {
            Some(bytes) => serde_json::from_slice(&bytes).map_err(FavoritesError::Decode),
            None => Ok(StoredFavorites::default()),
        }
    }

    fn store(&self, user: &UserId, favorites: &StoredFavorites) -> Result<(), FavoritesError> {
        let bytes = serde_json::to_vec(favorites).map_err(FavoritesError::Encode)?;

        self.storage.write(&Self::key_for(user), &bytes)?;

        trace!(%user, "favorites written");

        Ok(())
    }
}

impl<S: SnapshotStorage> FavoritesRemote for LocalFavoritesRemote<S> {
    fn list(&self, user: &UserId, kind: FavoriteKind) -> Result<Vec<String>, FavoritesError> {
        let mut favorites = self.load(user)?;

        Ok(std::mem::take(favorites.ids_mut(kind)))
    }

    fn add(&self, user: &UserId, kind: FavoriteKind, id: &str) -> Result<(), FavoritesError> {
        let mut favorites = self.load(user)?;
        let ids = favorites.ids_mut(kind);

        if ids.iter().any(|existing| existing == id) {
            return Err(FavoritesError::AlreadyFavorite {
                kind,
                id: id.to_string(),
            });
        }

        ids.push(id.to_string());

        self.store(user, &favorites)
    }

    fn remove(&self, user: &UserId, kind: FavoriteKind, id: &str) -> Result<(), FavoritesError> {
        let mut favorites = self.load(user)?;
        let ids = favorites.ids_mut(kind);
        let before = ids.len();

        ids.retain(|existing| existing != id);

        if ids.len() == before {
            return Ok(());
        }

        self.store(user, &favorites)
    }
}
