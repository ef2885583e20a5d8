//! Conversions from raw wire shapes to domain types.

use super::queries::{PageInfoWire, ProductConnectionWire, ProductNodeWire, ShopWire};
use crate::shopify::types::{
    CatalogProduct, MediaImage, PageInfo, ProductConnection, ProductVariant, Shop,
};

pub fn convert_page_info(info: PageInfoWire) -> PageInfo {
    PageInfo {
        has_next_page: info.has_next_page,
        has_previous_page: info.has_previous_page,
        start_cursor: info.start_cursor,
        end_cursor: info.end_cursor,
    }
}

pub fn convert_product(node: ProductNodeWire) -> CatalogProduct {
    let variants = node
        .variants
        .edges
        .into_iter()
        .map(|e| ProductVariant {
            id: e.node.id,
            price: e.node.price,
            compare_at_price: e.node.compare_at_price,
        })
        .collect();

    // Non-image media (videos, 3D models) carry no image and are skipped
    let media = node
        .media
        .edges
        .into_iter()
        .filter_map(|e| e.node.image)
        .map(|img| MediaImage {
            url: img.url,
            alt_text: img.alt_text,
        })
        .collect();

    CatalogProduct {
        id: node.id,
        title: node.title,
        handle: node.handle,
        description: node.description,
        media,
        variants,
    }
}

pub fn convert_product_connection(conn: ProductConnectionWire) -> ProductConnection {
    ProductConnection {
        products: conn.edges.into_iter().map(|e| convert_product(e.node)).collect(),
        page_info: convert_page_info(conn.page_info),
    }
}

pub fn convert_shop(shop: ShopWire) -> Shop {
    Shop {
        name: shop.name,
        email: shop.email,
        myshopify_domain: shop.myshopify_domain,
        primary_domain_url: shop.primary_domain.url,
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_convert_product_connection_skips_non_image_media() {
        let json = r#"{
            "edges": [{
                "node": {
                    "id": "gid://shopify/Product/1",
                    "title": "Shirt",
                    "handle": "shirt",
                    "description": "A shirt",
                    "variants": {
                        "edges": [{
                            "node": {"id": "gid://shopify/ProductVariant/11", "price": "19.99", "compareAtPrice": null}
                        }]
                    },
                    "media": {
                        "edges": [
                            {"node": {}},
                            {"node": {"id": "gid://shopify/MediaImage/5", "image": {"url": "https://cdn/x.jpg", "altText": "front"}}}
                        ]
                    }
                }
            }],
            "pageInfo": {
                "hasPreviousPage": false,
                "hasNextPage": true,
                "startCursor": "c1",
                "endCursor": "c1"
            }
        }"#;
        let wire: ProductConnectionWire = serde_json::from_str(json).unwrap();
        let conn = convert_product_connection(wire);

        assert_eq!(conn.products.len(), 1);
        let product = conn.products.first().unwrap();
        assert_eq!(product.title, "Shirt");
        assert_eq!(product.variants.len(), 1);
        assert_eq!(product.variants.first().unwrap().price, "19.99");
        // The empty (non-image) media node is dropped
        assert_eq!(product.media.len(), 1);
        assert_eq!(product.media.first().unwrap().url, "https://cdn/x.jpg");
        assert!(conn.page_info.has_next_page);
    }
}
