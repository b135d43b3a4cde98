//! Variant groups and per-view variant selection.

use std::collections::BTreeMap;

use crate::catalog::Product;
use crate::CatalogError;
use serde::{Deserialize, Serialize};

/// How a variant group is presented.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum VariantKind {
    /// Color swatches.
    Color,
    /// Text chips (sizes, capacities).
    #[default]
    Text,
}

/// One selectable value of a variant group (e.g., "Red", "XL", "128GB").
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct VariantOption {
    pub id: String,
    pub label: String,
    /// Replaces the displayed price when selected.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub price: Option<f64>,
    /// Replaces the displayed image when selected.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,
    /// Swatch color token, e.g. "#FF0000".
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub color_code: Option<String>,
}

impl VariantOption {
    pub fn new(id: impl Into<String>, label: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            label: label.into(),
            price: None,
            image: None,
            color_code: None,
        }
    }

    pub fn with_price(mut self, price: f64) -> Self {
        self.price = Some(price);
        self
    }

    pub fn with_image(mut self, image: impl Into<String>) -> Self {
        self.image = Some(image.into());
        self
    }

    pub fn with_color(mut self, color_code: impl Into<String>) -> Self {
        self.color_code = Some(color_code.into());
        self
    }
}

/// A selectable product dimension. Always has at least one option.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(try_from = "RawVariantGroup")]
pub struct VariantGroup {
    pub id: String,
    pub name: String,
    #[serde(rename = "type")]
    pub kind: VariantKind,
    options: Vec<VariantOption>,
}

#[derive(Deserialize)]
struct RawVariantGroup {
    id: String,
    name: String,
    #[serde(rename = "type", default)]
    kind: VariantKind,
    options: Vec<VariantOption>,
}

impl TryFrom<RawVariantGroup> for VariantGroup {
    type Error = CatalogError;

    fn try_from(raw: RawVariantGroup) -> Result<Self, Self::Error> {
        VariantGroup::new(raw.id, raw.name, raw.kind, raw.options)
    }
}

impl VariantGroup {
    /// Create a group; fails if `options` is empty.
    pub fn new(
        id: impl Into<String>,
        name: impl Into<String>,
        kind: VariantKind,
        options: Vec<VariantOption>,
    ) -> Result<Self, CatalogError> {
        let id = id.into();
        if options.is_empty() {
            return Err(CatalogError::EmptyVariantGroup(id));
        }
        Ok(Self {
            id,
            name: name.into(),
            kind,
            options,
        })
    }

    pub fn options(&self) -> &[VariantOption] {
        &self.options
    }

    /// The option preselected when a product is opened.
    pub fn default_option(&self) -> &VariantOption {
        &self.options[0]
    }

    pub fn option(&self, option_id: &str) -> Option<&VariantOption> {
        self.options.iter().find(|o| o.id == option_id)
    }
}

/// Selected option per variant group for one product view.
///
/// Overrides are resolved against the product on read; the product itself is
/// never modified.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct VariantSelection {
    selected: BTreeMap<String, String>,
}

impl VariantSelection {
    /// Select the first option of every group.
    pub fn for_product(product: &Product) -> Self {
        let selected = product
            .variant_groups
            .iter()
            .map(|g| (g.id.clone(), g.default_option().id.clone()))
            .collect();
        Self { selected }
    }

    /// Select `option_id` in `group_id`, validating both against `product`.
    pub fn select(
        &mut self,
        product: &Product,
        group_id: &str,
        option_id: &str,
    ) -> Result<(), CatalogError> {
        let found = product
            .variant_group(group_id)
            .and_then(|g| g.option(option_id))
            .is_some();
        if !found {
            return Err(CatalogError::VariantNotFound {
                group: group_id.to_string(),
                option: option_id.to_string(),
            });
        }
        self.selected
            .insert(group_id.to_string(), option_id.to_string());
        Ok(())
    }

    /// Selected option id for a group.
    pub fn selected(&self, group_id: &str) -> Option<&str> {
        self.selected.get(group_id).map(String::as_str)
    }

    fn selected_options<'a>(
        &'a self,
        product: &'a Product,
    ) -> impl Iterator<Item = &'a VariantOption> + 'a {
        product.variant_groups.iter().filter_map(move |group| {
            self.selected
                .get(&group.id)
                .and_then(|option_id| group.option(option_id))
        })
    }

    /// Displayed price: the last selected option with a price override wins.
    pub fn current_price(&self, product: &Product) -> f64 {
        self.selected_options(product)
            .filter_map(|o| o.price)
            .last()
            .unwrap_or(product.price)
    }

    /// Displayed image: the last selected option with an image override wins.
    pub fn current_image<'a>(&'a self, product: &'a Product) -> &'a str {
        self.selected_options(product)
            .filter_map(|o| o.image.as_deref())
            .last()
            .unwrap_or(product.image.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::Source;

    fn phone() -> Product {
        let mut product = Product::new(7, "Phone", 15000.0, 4.2, Source::Flipkart, "Electronics");
        product.image = "base.jpg".to_string();
        product.variant_groups = vec![
            VariantGroup::new(
                "color",
                "Color",
                VariantKind::Color,
                vec![
                    VariantOption::new("black", "Black").with_color("#000000"),
                    VariantOption::new("blue", "Blue")
                        .with_color("#0000FF")
                        .with_image("blue.jpg"),
                ],
            )
            .unwrap(),
            VariantGroup::new(
                "storage",
                "Storage",
                VariantKind::Text,
                vec![
                    VariantOption::new("128", "128GB"),
                    VariantOption::new("256", "256GB").with_price(17000.0),
                ],
            )
            .unwrap(),
        ];
        product
    }

    #[test]
    fn test_empty_group_rejected() {
        let result = VariantGroup::new("size", "Size", VariantKind::Text, vec![]);
        assert!(matches!(result, Err(CatalogError::EmptyVariantGroup(_))));

        let json = r#"{"id":"size","name":"Size","type":"text","options":[]}"#;
        assert!(serde_json::from_str::<VariantGroup>(json).is_err());
    }

    #[test]
    fn test_defaults_to_first_options() {
        let product = phone();
        let selection = VariantSelection::for_product(&product);
        assert_eq!(selection.selected("color"), Some("black"));
        assert_eq!(selection.selected("storage"), Some("128"));
        assert_eq!(selection.current_price(&product), 15000.0);
        assert_eq!(selection.current_image(&product), "base.jpg");
    }

    #[test]
    fn test_overrides_do_not_mutate_product() {
        let product = phone();
        let before = product.clone();
        let mut selection = VariantSelection::for_product(&product);

        selection.select(&product, "storage", "256").unwrap();
        selection.select(&product, "color", "blue").unwrap();

        assert_eq!(selection.current_price(&product), 17000.0);
        assert_eq!(selection.current_image(&product), "blue.jpg");
        assert_eq!(product, before);
    }

    #[test]
    fn test_unknown_option_rejected() {
        let product = phone();
        let mut selection = VariantSelection::for_product(&product);
        assert!(selection.select(&product, "storage", "1tb").is_err());
        assert!(selection.select(&product, "size", "xl").is_err());
        assert_eq!(selection.selected("storage"), Some("128"));
    }

    #[test]
    fn test_kind_wire_name() {
        let json = r##"{"id":"color","name":"Color","type":"color","options":[{"id":"red","label":"Red","colorCode":"#FF0000"}]}"##;
        let group: VariantGroup = serde_json::from_str(json).unwrap();
        assert_eq!(group.kind, VariantKind::Color);
        assert_eq!(group.default_option().color_code.as_deref(), Some("#FF0000"));
    }
}
