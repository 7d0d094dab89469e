//! Favorites
//!
//! Users can favorite restaurants and menu items. The local sets are updated
//! optimistically: a toggle flips membership straight away, then the remote
//! call either confirms it or the flip is rolled back.

use std::fmt;

use mockall::automock;
use rustc_hash::FxHashSet;
use thiserror::Error;
use tracing::{debug, warn};

use crate::{ids::UserId, snapshot::StorageError};

mod local;

pub use local::LocalFavoritesRemote;

/// What a favorite points at.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FavoriteKind {
    /// A restaurant
    Restaurant,

    /// A menu item
    MenuItem,
}

impl fmt::Display for FavoriteKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Restaurant => "restaurant",
            Self::MenuItem => "menu item",
        })
    }
}

/// Errors raised by favorites operations.
#[derive(Debug, Error)]
pub enum FavoritesError {
    /// Favorites require a signed-in user.
    #[error("sign in to save favorites")]
    NotSignedIn,

    /// The remote already holds this favorite.
    #[error("{kind} {id} is already a favorite")]
    AlreadyFavorite {
        /// Kind of the favorite.
        kind: FavoriteKind,

        /// Favorited id.
        id: String,
    },

    /// The remote rejected or failed the request.
    #[error("favorites request failed: {0}")]
    Remote(String),

    /// Stored favorites could not be decoded.
    #[error("failed to decode favorites: {0}")]
    Decode(#[source] serde_json::Error),

    /// Favorites could not be encoded.
    #[error("failed to encode favorites: {0}")]
    Encode(#[source] serde_json::Error),

    /// The storage backend failed.
    #[error(transparent)]
    Storage(#[from] StorageError),
}

/// Outcome of a successful toggle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FavoriteToggle {
    /// The id is now a favorite.
    Added,

    /// The id is no longer a favorite.
    Removed,
}

/// Source of truth for a user's favorites.
#[automock]
pub trait FavoritesRemote {
    /// Lists every favorited id of a kind.
    ///
    /// # Errors
    ///
    /// Returns an error if the favorites cannot be fetched.
    fn list(&self, user: &UserId, kind: FavoriteKind) -> Result<Vec<String>, FavoritesError>;

    /// Adds a favorite.
    ///
    /// # Errors
    ///
    /// Returns [`FavoritesError::AlreadyFavorite`] for duplicates, or another
    /// error if the request fails.
    fn add(&self, user: &UserId, kind: FavoriteKind, id: &str) -> Result<(), FavoritesError>;

    /// Removes a favorite. Removing an absent favorite is not an error.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails.
    fn remove(&self, user: &UserId, kind: FavoriteKind, id: &str) -> Result<(), FavoritesError>;
}

/// Local view of the signed-in user's favorites.
pub struct Favorites<R> {
    remote: R,
    restaurants: FxHashSet<String>,
    menu_items: FxHashSet<String>,
}

impl<R: FavoritesRemote> Favorites<R> {
    /// Creates an empty view over `remote`.
    pub fn new(remote: R) -> Self {
        Self {
            remote,
            restaurants: FxHashSet::default(),
            menu_items: FxHashSet::default(),
        }
    }

    /// Replaces the local sets with the user's remote favorites.
    ///
    /// The local sets are left untouched if either list fails.
    ///
    /// # Errors
    ///
    /// Returns the remote error.
    pub fn sync(&mut self, user: &UserId) -> Result<(), FavoritesError> {
        let restaurants = self.remote.list(user, FavoriteKind::Restaurant)?;
        let menu_items = self.remote.list(user, FavoriteKind::MenuItem)?;

        self.restaurants = restaurants.into_iter().collect();
        self.menu_items = menu_items.into_iter().collect();

        debug!(
            %user,
            restaurants = self.restaurants.len(),
            menu_items = self.menu_items.len(),
            "favorites synced"
        );

        Ok(())
    }

    /// Forgets every local favorite.
    pub fn sign_out(&mut self) {
        self.restaurants.clear();
        self.menu_items.clear();
    }

    /// Flips whether `id` is a favorite.
    ///
    /// The local set changes before the remote call and is restored if the
    /// call fails.
    ///
    /// # Errors
    ///
    /// - [`FavoritesError::NotSignedIn`]: `user` is `None`.
    /// - [`FavoritesError::AlreadyFavorite`]: the remote already had it.
    /// - Any other remote error.
    pub fn toggle(
        &mut self,
        user: Option<&UserId>,
        kind: FavoriteKind,
        id: &str,
    ) -> Result<FavoriteToggle, FavoritesError> {
        let user = user.ok_or(FavoritesError::NotSignedIn)?;

        let set = self.set_mut(kind);
        let was_favorite = set.remove(id);

        if !was_favorite {
            set.insert(id.to_string());
        }

        let result = if was_favorite {
            self.remote.remove(user, kind, id)
        } else {
            self.remote.add(user, kind, id)
        };

        match result {
            Ok(()) if was_favorite => Ok(FavoriteToggle::Removed),
            Ok(()) => Ok(FavoriteToggle::Added),
            Err(error) => {
                let set = self.set_mut(kind);

                if was_favorite {
                    set.insert(id.to_string());
                } else {
                    set.remove(id);
                }

                warn!(%user, %kind, id, error = %error, "favorite toggle rolled back");

                Err(error)
            }
        }
    }

    /// Whether `id` is currently a favorite.
    pub fn is_favorite(&self, kind: FavoriteKind, id: &str) -> bool {
        self.set(kind).contains(id)
    }

    /// Favorited ids of a kind, sorted.
    pub fn ids(&self, kind: FavoriteKind) -> Vec<&str> {
        let mut ids: Vec<&str> = self.set(kind).iter().map(String::as_str).collect();
        ids.sort_unstable();
        ids
    }

    fn set(&self, kind: FavoriteKind) -> &FxHashSet<String> {
        match kind {
            FavoriteKind::Restaurant => &self.restaurants,
            FavoriteKind::MenuItem => &self.menu_items,
        }
    }

    fn set_mut(&mut self, kind: FavoriteKind) -> &mut FxHashSet<String> {
        match kind {
            FavoriteKind::Restaurant => &mut self.restaurants,
            FavoriteKind::MenuItem => &mut self.menu_items,
        }
    }
}

impl<R> fmt::Debug for Favorites<R> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Favorites")
            .field("restaurants", &self.restaurants.len())
            .field("menu_items", &self.menu_items.len())
            .finish_non_exhaustive()
    }
}
