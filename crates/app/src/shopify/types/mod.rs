//! Domain types returned by the Shopify Admin API client.

pub mod common;
pub mod product;
pub mod shop;

pub use common::{MediaImage, PageInfo};
pub use product::{CatalogProduct, ProductConnection, ProductVariant};
pub use shop::Shop;
