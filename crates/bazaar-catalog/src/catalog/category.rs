//! Category names used to organize the catalog.
//!
//! Categories are free-form strings on products; these lists only drive
//! navigation. The [`ALL`] sentinel disables category filtering.

/// Sentinel category that matches every product.
pub const ALL: &str = "All";

/// Retail navigation categories, in display order, starting with [`ALL`].
pub const RETAIL_CATEGORIES: &[&str] = &[
    ALL,
    "Grocery & Daily Needs",
    "Fruits & Vegetables",
    "Dairy & Bakery",
    "Personal Care",
    "Health & Wellness",
    "Baby Care",
    "Household & Cleaning",
    "Home & Kitchen",
    "Electronics & Appliances",
    "Fashion & Apparel",
    "Jewellery & Accessories",
    "Stationery & Office Supplies",
    "Sports & Fitness",
    "Toys, Games & Hobbies",
    "Automotive",
    "Construction & Hardware",
    "Food & Restaurant",
];

/// Wholesale navigation categories.
pub const WHOLESALE_CATEGORIES: &[&str] = &[
    "Industrial Machinery",
    "Textiles & Fabrics",
    "Construction Material",
    "Electronics Components",
    "Packaging Material",
    "Agriculture & Farming",
    "Chemicals & Solvents",
];

/// Check whether a category selection is the match-everything sentinel.
pub fn is_all(category: &str) -> bool {
    category == ALL
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sentinel() {
        assert!(is_all("All"));
        assert!(!is_all("all"));
        assert_eq!(RETAIL_CATEGORIES[0], ALL);
        assert!(!WHOLESALE_CATEGORIES.contains(&ALL));
    }
}
