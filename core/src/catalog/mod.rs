use alloc::string::{String, ToString};
use core::cmp::Ordering;
use core::fmt;
use core::str::FromStr;
use serde::{Deserialize, Serialize};

use crate::{CatalogError, CatalogResult};

pub use api::*;
pub use session::*;

mod api;
mod session;

pub type ProductId = u32;

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Product {
    pub id: ProductId,
    pub title: String,
    pub description: String,
    pub price: f64,
}

impl Product {
    pub const SALE_THRESHOLD: f64 = 100.0;

    pub fn is_on_sale(&self) -> bool {
        self.price <= Self::SALE_THRESHOLD
    }

    fn matches(&self, needle: &str) -> bool {
        self.title.to_lowercase().contains(needle) || self.description.to_lowercase().contains(needle)
    }
}

#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum SortMode {
    #[default]
    Name,
    Price,
}

impl SortMode {
    pub const ALL: [SortMode; 2] = [SortMode::Name, SortMode::Price];

    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Name => "NAME",
            Self::Price => "PRICE",
        }
    }

    /// Option text shown in the sort selector.
    pub const fn label(self) -> &'static str {
        match self {
            Self::Name => "Nombre [a-z]",
            Self::Price => "Precio [menor a mayor]",
        }
    }

    fn compare(self, a: &Product, b: &Product) -> Ordering {
        let by_name = || compare_names(&a.title, &b.title);
        let by_price = || a.price.total_cmp(&b.price);
        match self {
            Self::Name => by_name().then_with(by_price),
            Self::Price => by_price().then_with(by_name),
        }
    }
}

impl fmt::Display for SortMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SortMode {
    type Err = CatalogError;

    fn from_str(s: &str) -> CatalogResult<Self> {
        Self::ALL
            .into_iter()
            .find(|mode| mode.as_str() == s)
            .ok_or_else(|| CatalogError::UnknownSortMode(s.to_string()))
    }
}

/// Collation rank of a lower-cased char: accented vowels sit with their base letter, `ñ` right after `n`.
fn collation_rank(c: char) -> u32 {
    let base = match c {
        'á' | 'à' | 'ä' | 'â' => 'a',
        'é' | 'è' | 'ë' | 'ê' => 'e',
        'í' | 'ì' | 'ï' | 'î' => 'i',
        'ó' | 'ò' | 'ö' | 'ô' => 'o',
        'ú' | 'ù' | 'ü' | 'û' => 'u',
        'ñ' => return u32::from('n') * 2 + 1,
        c => c,
    };
    u32::from(base) * 2
}

/// Case-insensitive Spanish name order; accents only break ties.
fn compare_names(a: &str, b: &str) -> Ordering {
    let (a, b) = (a.to_lowercase(), b.to_lowercase());
    a.chars()
        .map(collation_rank)
        .cmp(b.chars().map(collation_rank))
        .then_with(|| a.cmp(&b))
}

/// Stable sort: ties on the primary key fall back to the other key, then to input order.
pub fn sort_products(products: &mut [Product], mode: SortMode) {
    products.sort_by(|a, b| mode.compare(a, b));
}

/// Formats a price as Argentine pesos, e.g. `$ 1.234,50`.
pub fn format_price(price: f64) -> String {
    let negative = price < 0.0;
    let digits = alloc::format!("{:.2}", if negative { -price } else { price });
    let (int_part, frac_part) = digits.split_once('.').unwrap_or((digits.as_str(), "00"));

    let mut grouped = String::with_capacity(int_part.len() + int_part.len() / 3);
    for (i, digit) in int_part.chars().enumerate() {
        if i > 0 && (int_part.len() - i) % 3 == 0 {
            grouped.push('.');
        }
        grouped.push(digit);
    }

    let sign = if negative { "-" } else { "" };
    alloc::format!("{sign}$\u{a0}{grouped},{frac_part}")
}
