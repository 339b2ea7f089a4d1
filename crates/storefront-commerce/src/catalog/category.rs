//! Product categories.

use crate::error::CommerceError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// The fixed set of storefront departments.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Category {
    Clothing,
    Shoes,
    Accessories,
}

impl Category {
    /// Every category, in display order.
    pub const ALL: [Category; 3] = [Category::Clothing, Category::Shoes, Category::Accessories];

    pub fn as_str(&self) -> &'static str {
        match self {
            Category::Clothing => "clothing",
            Category::Shoes => "shoes",
            Category::Accessories => "accessories",
        }
    }

    /// Shelf label shown to shoppers.
    pub fn display_name(&self) -> &'static str {
        match self {
            Category::Clothing => "Men's Clothing",
            Category::Shoes => "Footwear",
            Category::Accessories => "Accessories",
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Category {
    type Err = CommerceError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "clothing" => Ok(Category::Clothing),
            "shoes" => Ok(Category::Shoes),
            "accessories" => Ok(Category::Accessories),
            other => Err(CommerceError::UnknownCategory(other.to_string())),
        }
    }
}
