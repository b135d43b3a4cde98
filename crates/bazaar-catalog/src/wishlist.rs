//! Wishlist of saved products.

use std::collections::BTreeSet;

use bazaar_store::Store;

use crate::ids::ProductId;
use crate::CatalogError;
use serde::{Deserialize, Serialize};

/// Store key holding the wishlist.
pub const WISHLIST_KEY: &str = "wishlist";

/// Saved product ids, in the order they were added.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Wishlist {
    ids: Vec<ProductId>,
}

impl Wishlist {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add `id` if absent, remove it if present.
    ///
    /// Returns `true` if the product is wishlisted afterwards.
    pub fn toggle(&mut self, id: ProductId) -> bool {
        match self.ids.iter().position(|existing| *existing == id) {
            Some(idx) => {
                self.ids.remove(idx);
                false
            }
            None => {
                self.ids.push(id);
                true
            }
        }
    }

    pub fn contains(&self, id: ProductId) -> bool {
        self.ids.contains(&id)
    }

    pub fn ids(&self) -> &[ProductId] {
        &self.ids
    }

    /// The ids as a set, for the product pipeline.
    pub fn id_set(&self) -> BTreeSet<ProductId> {
        self.ids.iter().copied().collect()
    }

    pub fn clear(&mut self) {
        self.ids.clear();
    }

    pub fn len(&self) -> usize {
        self.ids.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }
}

impl FromIterator<ProductId> for Wishlist {
    fn from_iter<I: IntoIterator<Item = ProductId>>(iter: I) -> Self {
        let mut wishlist = Wishlist::new();
        for id in iter {
            if !wishlist.contains(id) {
                wishlist.ids.push(id);
            }
        }
        wishlist
    }
}

/// A [`Wishlist`] that writes through to a [`Store`] on every change.
#[derive(Debug, Clone)]
pub struct PersistentWishlist {
    store: Store,
    wishlist: Wishlist,
}

impl PersistentWishlist {
    /// Load the wishlist from `store`.
    ///
    /// Missing or unreadable data yields an empty wishlist.
    pub fn load(store: Store) -> Self {
        let wishlist = match store.get::<Vec<ProductId>>(WISHLIST_KEY) {
            Ok(Some(ids)) => ids.into_iter().collect(),
            Ok(None) => Wishlist::new(),
            Err(e) => {
                tracing::warn!(error = %e, "discarding unreadable wishlist");
                Wishlist::new()
            }
        };
        tracing::debug!(items = wishlist.len(), "wishlist loaded");
        Self { store, wishlist }
    }

    /// Toggle `id` and persist. Returns `true` if it is now wishlisted.
    pub fn toggle(&mut self, id: ProductId) -> Result<bool, CatalogError> {
        let added = self.wishlist.toggle(id);
        self.save()?;
        Ok(added)
    }

    /// Remove everything and persist.
    pub fn clear(&mut self) -> Result<(), CatalogError> {
        self.wishlist.clear();
        self.save()
    }

    pub fn wishlist(&self) -> &Wishlist {
        &self.wishlist
    }

    pub fn contains(&self, id: ProductId) -> bool {
        self.wishlist.contains(id)
    }

    fn save(&self) -> Result<(), CatalogError> {
        self.store.set(WISHLIST_KEY, &self.wishlist)?;
        Ok(())
    }
}
