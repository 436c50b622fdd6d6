//! In-memory coffee catalog.
//!
//! Insertion-ordered, lost on restart. Readers share the lock; create,
//! update and delete hold it exclusively, so id assignment and the append
//! are one step and nobody observes a half-removed element.

mod product;
pub mod seed;

use parking_lot::RwLock;
use tracing::debug;

pub use product::{Product, ProductDraft};

#[derive(Debug, Default)]
pub struct Catalog {
    products: RwLock<Vec<Product>>,
}

impl Catalog {
    pub fn new(products: Vec<Product>) -> Self {
        Self { products: RwLock::new(products) }
    }

    /// The catalog the service starts with.
    pub fn seeded() -> Self {
        Self::new(seed::products())
    }

    pub fn list(&self) -> Vec<Product> {
        self.products.read().clone()
    }

    pub fn get(&self, id: i64) -> Option<Product> {
        self.products.read().iter().find(|p| p.id == id).cloned()
    }

    /// Appends a new product and returns it with its assigned id.
    ///
    /// The id is one past the larger of the current length and the highest
    /// id in use, so ids freed by a delete are not handed out again.
    pub fn create(&self, draft: ProductDraft) -> Product {
        let mut products = self.products.write();
        let last = products
            .iter()
            .map(|p| p.id)
            .fold(products.len() as i64, i64::max);
        let product = Product::from_draft(last + 1, draft);
        products.push(product.clone());
        debug!(coffee_id = product.id, "coffee added");
        product
    }

    pub fn update(&self, id: i64, draft: ProductDraft) -> Option<Product> {
        let mut products = self.products.write();
        let product = products.iter_mut().find(|p| p.id == id)?;
        product.apply(draft);
        Some(product.clone())
    }

    /// Removes the product, keeping the order of the rest. Returns whether
    /// anything was removed.
    pub fn delete(&self, id: i64) -> bool {
        let mut products = self.products.write();
        match products.iter().position(|p| p.id == id) {
            Some(index) => {
                products.remove(index);
                true
            }
            None => false,
        }
    }

    pub fn len(&self) -> usize {
        self.products.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.products.read().is_empty()
    }
}
