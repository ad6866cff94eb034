//! Menu and size catalogs.
//!
//! A [`Catalog`] is fixed when the workflow is built and only read afterwards. Names are
//! stored lowercase and looked up case-insensitively, so `"Meat Lovers"` and `"meat lovers"`
//! resolve to the same entry.

use serde::{Deserialize, Serialize};
use std::fmt::{self, Display};
use std::iter::Sum;
use std::ops::Add;
use std::path::Path;
use thiserror::Error;

/// Errors raised while building or loading a catalog.
#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("Invalid price: {0}")]
    InvalidPrice(f64),

    #[error("Catalog entry has a blank name")]
    BlankName,

    #[error("Catalog has no pizzas")]
    EmptyMenu,

    #[error("Duplicate catalog entry: {0}")]
    Duplicate(String),

    #[error("Catalog has no '{0}' size")]
    MissingDefaultSize(&'static str),

    #[error("Catalog file {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Catalog JSON: {0}")]
    Json(#[from] serde_json::Error),
}

/// An amount of money in cents.
///
/// Serialized as a decimal dollar amount (`12.99`), displayed as `$12.99`.
/// Amounts finer than a cent (`12.995`) are rejected rather than rounded.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize)]
#[serde(try_from = "f64", into = "f64")]
pub struct Price(u32);

impl Price {
    pub const ZERO: Price = Price(0);

    pub const fn from_cents(cents: u32) -> Self {
        Self(cents)
    }

    pub const fn cents(self) -> u32 {
        self.0
    }
}

impl Display for Price {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "${}.{:02}", self.0 / 100, self.0 % 100)
    }
}

impl Add for Price {
    type Output = Price;

    fn add(self, rhs: Price) -> Price {
        Price(self.0.saturating_add(rhs.0))
    }
}

impl Sum for Price {
    fn sum<I: Iterator<Item = Price>>(iter: I) -> Price {
        iter.fold(Price::ZERO, Add::add)
    }
}

impl TryFrom<f64> for Price {
    type Error = CatalogError;

    fn try_from(dollars: f64) -> Result<Self, Self::Error> {
        let exact = dollars * 100.0;
        let cents = exact.round();
        if !cents.is_finite()
            || cents < 0.0
            || cents > f64::from(u32::MAX)
            || (exact - cents).abs() > 1e-6
        {
            return Err(CatalogError::InvalidPrice(dollars));
        }
        Ok(Price(cents as u32))
    }
}

impl From<Price> for f64 {
    fn from(price: Price) -> f64 {
        f64::from(price.0) / 100.0
    }
}

/// A pizza on the menu and its base price.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MenuEntry {
    pub name: String,
    pub price: Price,
}

/// A size and the amount it adds to the base price.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SizeEntry {
    pub name: String,
    pub upcharge: Price,
}

/// Pizza name → base price, in menu order.
#[derive(Debug, Clone, PartialEq)]
pub struct MenuCatalog(Vec<MenuEntry>);

impl MenuCatalog {
    pub fn price(&self, pizza: &str) -> Option<Price> {
        let key = normalize(pizza);
        self.0.iter().find(|e| e.name == key).map(|e| e.price)
    }

    pub fn entries(&self) -> &[MenuEntry] {
        &self.0
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.0.iter().map(|e| e.name.as_str())
    }
}

/// Size name → upcharge, smallest first.
#[derive(Debug, Clone, PartialEq)]
pub struct SizeCatalog(Vec<SizeEntry>);

impl SizeCatalog {
    pub fn upcharge(&self, size: &str) -> Option<Price> {
        let key = normalize(size);
        self.0.iter().find(|e| e.name == key).map(|e| e.upcharge)
    }

    pub fn entries(&self) -> &[SizeEntry] {
        &self.0
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.0.iter().map(|e| e.name.as_str())
    }
}

/// On-disk shape of a catalog.
#[derive(Debug, Clone, Serialize, Deserialize)]
struct CatalogFile {
    menu: Vec<MenuEntry>,
    sizes: Vec<SizeEntry>,
}

/// The pizzas and sizes a workflow sells.
///
/// ```json
/// {
///   "menu":  [{ "name": "margherita", "price": 12.99 }],
///   "sizes": [{ "name": "small", "upcharge": 0 }, { "name": "medium", "upcharge": 2 }]
/// }
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "CatalogFile", into = "CatalogFile")]
pub struct Catalog {
    menu: MenuCatalog,
    sizes: SizeCatalog,
}

impl Catalog {
    /// Size used when a pizza is added without one.
    pub const DEFAULT_SIZE: &'static str = "medium";

    /// Builds a catalog, normalizing names.
    ///
    /// The menu must be non-empty, names must be unique within each list, and
    /// [`Catalog::DEFAULT_SIZE`] must be one of the sizes.
    pub fn new(menu: Vec<MenuEntry>, sizes: Vec<SizeEntry>) -> Result<Self, CatalogError> {
        if menu.is_empty() {
            return Err(CatalogError::EmptyMenu);
        }
        let menu = menu
            .into_iter()
            .map(|e| MenuEntry {
                name: normalize(&e.name),
                price: e.price,
            })
            .collect::<Vec<_>>();
        let sizes = sizes
            .into_iter()
            .map(|e| SizeEntry {
                name: normalize(&e.name),
                upcharge: e.upcharge,
            })
            .collect::<Vec<_>>();

        if menu
            .iter()
            .map(|e| &e.name)
            .chain(sizes.iter().map(|e| &e.name))
            .any(|name| name.is_empty())
        {
            return Err(CatalogError::BlankName);
        }
        check_unique(menu.iter().map(|e| e.name.as_str()))?;
        check_unique(sizes.iter().map(|e| e.name.as_str()))?;
        if !sizes.iter().any(|e| e.name == Self::DEFAULT_SIZE) {
            return Err(CatalogError::MissingDefaultSize(Self::DEFAULT_SIZE));
        }

        Ok(Self {
            menu: MenuCatalog(menu),
            sizes: SizeCatalog(sizes),
        })
    }

    pub fn from_json(json: &str) -> Result<Self, CatalogError> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn load(path: impl AsRef<Path>) -> Result<Self, CatalogError> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path).map_err(|source| CatalogError::Io {
            path: path.display().to_string(),
            source,
        })?;
        Self::from_json(&json)
    }

    pub fn menu(&self) -> &MenuCatalog {
        &self.menu
    }

    pub fn sizes(&self) -> &SizeCatalog {
        &self.sizes
    }
}

impl Default for Catalog {
    /// The Pizza Palace menu.
    fn default() -> Self {
        let menu = [
            ("margherita", 1299),
            ("pepperoni", 1499),
            ("veggie", 1399),
            ("meat lovers", 1699),
            ("hawaiian", 1499),
            ("supreme", 1799),
        ];
        let sizes = [("small", 0), ("medium", 200), ("large", 400)];

        Self {
            menu: MenuCatalog(
                menu.into_iter()
                    .map(|(name, cents)| MenuEntry {
                        name: name.to_string(),
                        price: Price::from_cents(cents),
                    })
                    .collect(),
            ),
            sizes: SizeCatalog(
                sizes
                    .into_iter()
                    .map(|(name, cents)| SizeEntry {
                        name: name.to_string(),
                        upcharge: Price::from_cents(cents),
                    })
                    .collect(),
            ),
        }
    }
}

impl TryFrom<CatalogFile> for Catalog {
    type Error = CatalogError;

    fn try_from(file: CatalogFile) -> Result<Self, Self::Error> {
        Catalog::new(file.menu, file.sizes)
    }
}

impl From<Catalog> for CatalogFile {
    fn from(catalog: Catalog) -> Self {
        Self {
            menu: catalog.menu.0,
            sizes: catalog.sizes.0,
        }
    }
}

/// Lookup key for a pizza or size name.
pub(crate) fn normalize(name: &str) -> String {
    name.trim().to_lowercase()
}

fn check_unique<'a>(names: impl Iterator<Item = &'a str>) -> Result<(), CatalogError> {
    let mut seen = std::collections::HashSet::new();
    for name in names {
        if !seen.insert(name) {
            return Err(CatalogError::Duplicate(name.to_string()));
        }
    }
    Ok(())
}
