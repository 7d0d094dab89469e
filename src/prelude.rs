//! Foodie Cart prelude.
//!
//! Convenience exports for common library consumers.

pub use crate::{
    cart::{
        CartChange, CartError, CartLine, CartObserver, CartState, CartStore, InvariantViolation,
        NewCartLine, NoopObserver,
    },
    catalog::{Catalog, CatalogError, MenuEntry, MenuItem, MenuSection, Restaurant},
    checkout::{CheckoutError, DeliveryDetails, Field, FieldErrors, OrderConfirmation, place_order},
    context::{AppContext, AppInitError},
    favorites::{
        FavoriteKind, FavoriteToggle, Favorites, FavoritesError, FavoritesRemote,
        LocalFavoritesRemote,
    },
    ids::{ProductId, RestaurantId, SectionId, UserId},
    pricing::{OrderSummary, PricingConfig, PricingError},
    receipt::{ReceiptError, write_cart},
    snapshot::{
        CART_SNAPSHOT_KEY, FileStorage, MemoryStorage, PersistObserver, SnapshotError,
        SnapshotStorage, StorageError,
    },
};
