pub mod selection;

pub use selection::Selection;

use crate::parse_amount;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// A single dish as captured from a menu.
///
/// `price` stays as captured text; it is parsed only when totals are needed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MenuItem {
    pub id: u64,

    /// Name as printed on the menu
    pub original_name: String,

    /// Translated display name
    pub translated_name: String,

    pub price: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
}

impl MenuItem {
    pub fn new(id: u64, original_name: &str, translated_name: &str, price: &str) -> Self {
        MenuItem {
            id,
            original_name: original_name.to_string(),
            translated_name: translated_name.to_string(),
            price: price.to_string(),
            category: None,
        }
    }

    /// Price as a decimal; unparsable text is `0`
    pub fn price_value(&self) -> Decimal {
        parse_amount(&self.price)
    }
}

/// Fixed demo catalog returned in place of a real menu capture.
pub fn mock_catalog() -> Vec<MenuItem> {
    vec![
        MenuItem::new(1, "宫保鸡丁", "Kung Pao Chicken", "38.00"),
        MenuItem::new(2, "松鼠桂鱼", "Squirrel-Shaped Mandarin Fish", "128.00"),
        MenuItem::new(3, "麻婆豆腐", "Mapo Tofu (Spicy)", "22.00"),
        MenuItem::new(4, "蒜泥空心菜", "Stir-fried Water Spinach", "18.00"),
        MenuItem::new(5, "扬州炒饭", "Yangzhou Fried Rice", "28.00"),
        MenuItem::new(6, "番茄炒蛋", "Scrambled Eggs with Tomato", "20.00"),
    ]
}

/// Look up an item by id.
pub fn find_item(catalog: &[MenuItem], id: u64) -> Option<&MenuItem> {
    catalog.iter().find(|item| item.id == id)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mock_catalog_shape() {
        let catalog = mock_catalog();
        assert_eq!(catalog.len(), 6);
        assert_eq!(catalog[0].translated_name, "Kung Pao Chicken");
        assert_eq!(catalog[1].price_value(), Decimal::from(128));
        assert!(find_item(&catalog, 5).is_some());
        assert!(find_item(&catalog, 42).is_none());
    }

    #[test]
    fn test_unparsable_price_is_zero() {
        let item = MenuItem::new(9, "时价", "Market Price", "ask staff");
        assert_eq!(item.price_value(), Decimal::ZERO);
    }
}
