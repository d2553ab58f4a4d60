//! Shared fixtures for the integration tests.
//!
//! Provides the `Product` / `ProductContainer` pair used by the wrapping
//! scenarios and a JSON resolver bound to both.

#![allow(dead_code)]

use std::sync::Arc;

use parcel::{ContentResolver, ContentType, ElementKind, FallbackPolicy, JsonResolver};
use serde::{Deserialize, Serialize};

pub const PRODUCTS_MEDIA_TYPE: &str = "application/vnd.shop.products+json";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Product {
    pub id: String,
    pub name: String,
    pub price_cents: u32,
}

/// Wire-level envelope around a [`Product`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProductContainer {
    pub product: Product,
    pub revision: u32,
}

pub fn bananas() -> Product {
    Product {
        id: "p-1".to_string(),
        name: "Bananas".to_string(),
        price_cents: 199,
    }
}

pub fn container(product: Product) -> ProductContainer {
    ProductContainer {
        product,
        revision: 1,
    }
}

/// JSON resolver for both product types, wrapping with revision 1.
pub fn product_resolver() -> Arc<dyn ContentResolver> {
    Arc::new(
        JsonResolver::new()
            .with_type::<Product>()
            .with_type::<ProductContainer>()
            .with_wrapper::<ProductContainer, Product>(
                |product| container(product.clone()),
                |container| container.product.clone(),
            ),
    )
}

/// Wrapping content type: `Product` sent inside a `ProductContainer`.
pub fn product_content_type(policy: FallbackPolicy) -> ContentType {
    ContentType::builder(PRODUCTS_MEDIA_TYPE, ElementKind::custom::<Product>())
        .wrapping(ElementKind::custom::<ProductContainer>())
        .resolver(product_resolver())
        .fallback(policy)
        .build()
}
