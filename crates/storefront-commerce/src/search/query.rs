//! Search query builder.

use crate::catalog::{Category, Product};
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::str::FromStr;

/// Sort options for a product listing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "kebab-case")]
pub enum SortOption {
    /// Catalog order.
    #[default]
    Featured,
    /// Sort by price, low to high.
    PriceAsc,
    /// Sort by price, high to low.
    PriceDesc,
    /// Sort by name A-Z.
    NameAsc,
    /// Sort by highest rated.
    Rating,
}

impl SortOption {
    pub const ALL: [SortOption; 5] = [
        SortOption::Featured,
        SortOption::PriceAsc,
        SortOption::PriceDesc,
        SortOption::NameAsc,
        SortOption::Rating,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            SortOption::Featured => "featured",
            SortOption::PriceAsc => "price-asc",
            SortOption::PriceDesc => "price-desc",
            SortOption::NameAsc => "name-asc",
            SortOption::Rating => "rating",
        }
    }

    pub fn display_name(&self) -> &'static str {
        match self {
            SortOption::Featured => "Featured",
            SortOption::PriceAsc => "Price: Low to High",
            SortOption::PriceDesc => "Price: High to Low",
            SortOption::NameAsc => "Name: A-Z",
            SortOption::Rating => "Highest Rated",
        }
    }

    fn compare(&self, a: &Product, b: &Product) -> Ordering {
        match self {
            SortOption::Featured => Ordering::Equal,
            SortOption::PriceAsc => a.price.cmp(&b.price),
            SortOption::PriceDesc => b.price.cmp(&a.price),
            SortOption::NameAsc => a.name.to_lowercase().cmp(&b.name.to_lowercase()),
            SortOption::Rating => b.rating.total_cmp(&a.rating),
        }
    }
}

impl FromStr for SortOption {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        SortOption::ALL
            .into_iter()
            .find(|opt| opt.as_str().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| format!("unknown sort option: {}", s))
    }
}

/// A search over a product listing.
///
/// Text matches are case-insensitive substrings of the product's name,
/// description or category. An empty or all-whitespace text matches
/// everything.
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
pub struct SearchQuery {
    /// Text query.
    pub text: Option<String>,
    /// Restrict to one category.
    pub category: Option<Category>,
    /// Result ordering.
    pub sort: SortOption,
}

impl SearchQuery {
    /// Create a query that matches every product.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the text query. Blank text is ignored.
    pub fn with_text(mut self, q: impl Into<String>) -> Self {
        let q = q.into();
        let q = q.trim();
        self.text = if q.is_empty() {
            None
        } else {
            Some(q.to_lowercase())
        };
        self
    }

    /// Restrict to a category.
    pub fn with_category(mut self, category: Category) -> Self {
        self.category = Some(category);
        self
    }

    /// Set sort option.
    pub fn with_sort(mut self, sort: SortOption) -> Self {
        self.sort = sort;
        self
    }

    /// Check a single product against the query.
    pub fn matches(&self, product: &Product) -> bool {
        if let Some(category) = self.category {
            if product.category != category {
                return false;
            }
        }

        match &self.text {
            None => true,
            Some(text) => {
                let text = text.to_lowercase();
                product.name.to_lowercase().contains(&text)
                    || product.description.to_lowercase().contains(&text)
                    || product.category.as_str().contains(&text)
            }
        }
    }

    /// Filter and order a listing. Matching products keep their relative
    /// catalog order unless a sort is set.
    pub fn apply(&self, products: &[Product]) -> Vec<Product> {
        let mut results: Vec<Product> = products
            .iter()
            .filter(|p| self.matches(p))
            .cloned()
            .collect();
        results.sort_by(|a, b| self.sort.compare(a, b));
        results
    }
}

/// Products in one category, in catalog order.
pub fn products_by_category(products: &[Product], category: Category) -> Vec<Product> {
    SearchQuery::new().with_category(category).apply(products)
}

/// Products matching `query` in name, description or category.
pub fn search_products(products: &[Product], query: &str) -> Vec<Product> {
    SearchQuery::new().with_text(query).apply(products)
}
