//! App Context

use std::path::PathBuf;

use thiserror::Error;
use tracing::info;

use crate::{
    cart::CartStore,
    catalog::Catalog,
    favorites::{Favorites, FavoritesError, LocalFavoritesRemote},
    ids::UserId,
    pricing::PricingConfig,
    snapshot::{CART_SNAPSHOT_KEY, FileStorage},
};

/// Errors raised while building the context.
#[derive(Debug, Error)]
pub enum AppInitError {
    /// The signed-in user's favorites could not be loaded.
    #[error("failed to load favorites: {0}")]
    Favorites(#[source] FavoritesError),
}

/// Everything a session works with, built once at start.
#[derive(Debug)]
pub struct AppContext {
    /// The cart, restored from and persisted to the data directory.
    pub cart: CartStore,

    /// The signed-in user's favorites.
    pub favorites: Favorites<LocalFavoritesRemote<FileStorage>>,

    /// Restaurants and menus.
    pub catalog: Catalog,

    /// Fees and currency.
    pub pricing: PricingConfig,

    /// Signed-in user, if any.
    pub user: Option<UserId>,
}

impl AppContext {
    /// Opens the cart and favorites stored under `data_dir`.
    ///
    /// # Errors
    ///
    /// Returns [`AppInitError::Favorites`] if a user is signed in and their
    /// favorites cannot be read.
    pub fn open(
        data_dir: impl Into<PathBuf>,
        catalog: Catalog,
        pricing: PricingConfig,
        user: Option<UserId>,
    ) -> Result<Self, AppInitError> {
        let storage = FileStorage::new(data_dir);

        let cart = CartStore::open(storage.clone(), CART_SNAPSHOT_KEY);

        let mut favorites = Favorites::new(LocalFavoritesRemote::new(storage.clone()));

        if let Some(user) = &user {
            favorites.sync(user).map_err(AppInitError::Favorites)?;
        }

        info!(
            data_dir = %storage.dir().display(),
            signed_in = user.is_some(),
            "app context ready"
        );

        Ok(Self {
            cart,
            favorites,
            catalog,
            pricing,
            user,
        })
    }
}
