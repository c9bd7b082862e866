//! Catalog source
//!
//! The catalog payload groups products under their category. Prices arrive as
//! formatted strings, and the pre-discount ("high") price may be blank.

use rust_decimal::{Decimal, RoundingStrategy, prelude::ToPrimitive};
use serde::{Deserialize, Deserializer};

use crate::{
    prices::{Price, parse_price},
    records::{Listing, Origin, SourceKind},
    sources::NormalizeError,
};

/// Decoded catalog payload: category groups in upstream order.
pub type CatalogTree = Vec<CatalogGroup>;

/// A category together with its products.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(remote = "Self")]
pub struct CatalogGroup {
    /// Category name
    #[serde(rename = "categoria", alias = "category")]
    pub category: String,

    /// Category weight. Some upstream revisions publish it as "relevance".
    #[serde(
        rename = "importancia",
        alias = "importance",
        alias = "relevancia",
        alias = "relevance"
    )]
    pub importance: f64,

    /// Products in this category
    #[serde(rename = "productos", alias = "products", default)]
    pub products: Vec<CatalogProduct>,
}

/// A catalog product as published upstream.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(remote = "Self")]
pub struct CatalogProduct {
    /// Product name
    #[serde(rename = "nombre", alias = "name")]
    pub name: String,

    /// Current price, e.g. `"$1.234"`
    #[serde(rename = "precio", alias = "price")]
    pub price: String,

    /// Pre-discount price; blank (or null upstream) when the product is not
    /// discounted
    #[serde(
        rename = "precio_alto",
        alias = "high_price",
        default,
        deserialize_with = "blank_when_null"
    )]
    pub high_price: String,

    /// Rating
    #[serde(rename = "calificacion", alias = "rate")]
    pub rate: u32,
}

deserialize_from_object!(CatalogGroup, CatalogProduct);

fn blank_when_null<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Option::<String>::deserialize(deserializer).map(Option::unwrap_or_default)
}

/// Flatten a catalog tree into listings, groups first, then products.
///
/// # Errors
///
/// Returns [`NormalizeError::Price`] for the first price string that fails to
/// parse; no listings are returned in that case.
pub fn normalize(tree: &[CatalogGroup]) -> Result<Vec<Listing>, NormalizeError> {
    tree.iter()
        .flat_map(|group| group.products.iter().map(move |product| (group, product)))
        .enumerate()
        .map(|(position, (group, product))| normalize_product(position, group, product))
        .collect()
}

fn normalize_product(
    position: usize,
    group: &CatalogGroup,
    product: &CatalogProduct,
) -> Result<Listing, NormalizeError> {
    let price = parse_price(&product.price)?;
    let high_price = parse_price(&product.high_price)?;

    let (discount, cash_discount) = discount_from_high_price(price, high_price);

    Ok(Listing {
        origin: Origin::new(SourceKind::Catalog, position),
        name: product.name.clone(),
        price,
        discount,
        cash_discount,
        rate: product.rate,
        category: group.category.clone(),
        category_importance: group.importance,
    })
}

/// Discount percentage and cash discount implied by a reference price.
///
/// A zero reference price means the product is not discounted.
fn discount_from_high_price(price: Price, high_price: Price) -> (i64, Decimal) {
    if high_price.is_zero() {
        return (0, Decimal::ZERO);
    }

    let high = high_price.to_decimal();
    let cash_discount = high - price.to_decimal();

    let percent = (cash_discount * Decimal::ONE_HUNDRED / high)
        .round_dp_with_strategy(0, RoundingStrategy::MidpointAwayFromZero);

    // Only a current price far above the reference can leave the i64 range.
    let discount = percent.to_i64().unwrap_or(i64::MIN);

    (discount, cash_discount)
}

#[cfg(test)]
mod tests {
    use testresult::TestResult;

    use crate::prices::PriceError;

    use super::*;

    fn product(name: &str, price: &str, high_price: &str, rate: u32) -> CatalogProduct {
        CatalogProduct {
            name: name.to_string(),
            price: price.to_string(),
            high_price: high_price.to_string(),
            rate,
        }
    }

    fn group(category: &str, importance: f64, products: Vec<CatalogProduct>) -> CatalogGroup {
        CatalogGroup {
            category: category.to_string(),
            importance,
            products,
        }
    }

    #[test]
    fn computes_discount_from_high_price() -> TestResult {
        let tree = vec![group(
            "Snacks",
            5.0,
            vec![product("Chips", "$100", "$200", 4)],
        )];

        let listings = normalize(&tree)?;
        let chips = listings.first().ok_or("no listing")?;

        assert_eq!(chips.price, Price::new(100));
        assert_eq!(chips.discount, 50);
        assert_eq!(chips.cash_discount, Decimal::from(100));
        assert_eq!(chips.rate, 4);
        assert_eq!(chips.category, "Snacks");
        assert!((chips.category_importance - 5.0).abs() < f64::EPSILON);

        Ok(())
    }

    #[test]
    fn blank_high_price_means_no_discount() -> TestResult {
        let tree = vec![group("Snacks", 1.0, vec![product("Nuts", "$1.500", "", 3)])];

        let listings = normalize(&tree)?;
        let nuts = listings.first().ok_or("no listing")?;

        assert_eq!(nuts.price, Price::new(1500));
        assert_eq!(nuts.discount, 0);
        assert_eq!(nuts.cash_discount, Decimal::ZERO);

        Ok(())
    }

    #[test]
    fn zero_high_price_means_no_discount() -> TestResult {
        let tree = vec![group("Snacks", 1.0, vec![product("Nuts", "$900", "$0", 3)])];

        let listings = normalize(&tree)?;
        let nuts = listings.first().ok_or("no listing")?;

        assert_eq!(nuts.discount, 0);
        assert_eq!(nuts.cash_discount, Decimal::ZERO);

        Ok(())
    }

    #[test]
    fn discount_percentage_is_rounded_not_truncated() -> TestResult {
        // 1 / 3 * 100 = 33.33 -> 33, 2 / 3 * 100 = 66.67 -> 67
        let tree = vec![group(
            "Snacks",
            1.0,
            vec![product("A", "$2", "$3", 1), product("B", "$1", "$3", 1)],
        )];

        let listings = normalize(&tree)?;
        let discounts: Vec<i64> = listings.iter().map(|l| l.discount).collect();

        assert_eq!(discounts, vec![33, 67]);

        Ok(())
    }

    #[test]
    fn discount_rounds_half_away_from_zero() {
        // 1 / 8 * 100 = 12.5
        let (discount, cash) = discount_from_high_price(Price::new(7), Price::new(8));

        assert_eq!(discount, 13);
        assert_eq!(cash, Decimal::ONE);
    }

    #[test]
    fn high_price_below_price_yields_negative_discount() {
        let (discount, cash) = discount_from_high_price(Price::new(150), Price::new(100));

        assert_eq!(discount, -50);
        assert_eq!(cash, Decimal::from(-50));
    }

    #[test]
    fn flattening_preserves_group_and_product_order() -> TestResult {
        let tree = vec![
            group(
                "Snacks",
                5.0,
                vec![product("Chips", "$1", "", 1), product("Nuts", "$2", "", 1)],
            ),
            group("Fruit", 2.0, vec![product("Apple", "$3", "", 1)]),
        ];

        let listings = normalize(&tree)?;

        let names: Vec<&str> = listings.iter().map(|l| l.name.as_str()).collect();
        let positions: Vec<usize> = listings.iter().map(|l| l.origin.position).collect();

        assert_eq!(names, vec!["Chips", "Nuts", "Apple"]);
        assert_eq!(positions, vec![0, 1, 2]);
        assert!(
            listings
                .iter()
                .all(|l| l.origin.source == SourceKind::Catalog),
            "every listing should originate from the catalog"
        );

        Ok(())
    }

    #[test]
    fn fails_fast_on_first_invalid_price() {
        let tree = vec![group(
            "Snacks",
            1.0,
            vec![
                product("Chips", "$1", "", 1),
                product("Broken", "$abc", "", 1),
                product("Worse", "$1", "???", 1),
            ],
        )];

        let result = normalize(&tree);

        assert_eq!(
            result,
            Err(NormalizeError::Price(PriceError::Invalid {
                raw: "$abc".to_string()
            }))
        );
    }

    #[test]
    fn empty_tree_yields_no_listings() -> TestResult {
        assert!(normalize(&[])?.is_empty(), "expected no listings");

        Ok(())
    }

    #[test]
    fn decodes_upstream_field_names() -> TestResult {
        let json = r#"[{
            "categoria": "Snacks",
            "importancia": 5,
            "productos": [
                {"nombre": "Chips", "precio": "$100", "precio_alto": "$200", "calificacion": 4}
            ]
        }]"#;

        let tree: CatalogTree = serde_json::from_str(json)?;

        assert_eq!(
            tree,
            vec![group(
                "Snacks",
                5.0,
                vec![product("Chips", "$100", "$200", 4)]
            )]
        );

        Ok(())
    }

    #[test]
    fn decodes_english_aliases_and_relevance_as_importance() -> TestResult {
        let json = r#"[{
            "category": "Snacks",
            "relevance": 0.75,
            "products": [{"name": "Chips", "price": "$100", "rate": 4}]
        }]"#;

        let tree: CatalogTree = serde_json::from_str(json)?;

        assert_eq!(
            tree,
            vec![group("Snacks", 0.75, vec![product("Chips", "$100", "", 4)])]
        );

        Ok(())
    }

    #[test]
    fn decodes_null_high_price_as_blank() -> TestResult {
        let json = r#"[{
            "categoria": "Snacks",
            "importancia": 1,
            "productos": [
                {"nombre": "Nuts", "precio": "$900", "precio_alto": null, "calificacion": 3}
            ]
        }]"#;

        let tree: CatalogTree = serde_json::from_str(json)?;
        let listings = normalize(&tree)?;
        let nuts = listings.first().ok_or("no listing")?;

        assert_eq!(
            tree.first()
                .and_then(|g| g.products.first())
                .map(|p| p.high_price.as_str()),
            Some("")
        );
        assert_eq!(nuts.discount, 0);
        assert_eq!(nuts.cash_discount, Decimal::ZERO);

        Ok(())
    }

    #[test]
    fn rejects_positional_arrays() {
        let group = serde_json::from_str::<CatalogTree>(r#"[["Snacks", 1, []]]"#);
        let product = serde_json::from_str::<CatalogTree>(
            r#"[{"categoria": "Snacks", "importancia": 1, "productos": [["Chips", "$1", "", 1]]}]"#,
        );

        assert!(group.is_err(), "group decoded from an array");
        assert!(product.is_err(), "product decoded from an array");
    }
}
