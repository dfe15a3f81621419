use crate::statics;
use indexmap::IndexMap;
use std::{fmt, rc::Rc, str::FromStr};

/// The three price points of one sellable configuration.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PriceEntry {
    pub purchase_entry: f64,
    pub wholesale_small: Option<f64>,
    pub market: Option<f64>,
}

impl PriceEntry {
    /// A fresh entry with only the purchase price set.
    pub fn new(purchase_entry: f64) -> Self {
        Self {
            purchase_entry,
            wholesale_small: None,
            market: None,
        }
    }

    pub fn get(&self, field: PriceField) -> Option<f64> {
        match field {
            PriceField::PurchaseEntry => Some(self.purchase_entry),
            PriceField::WholesaleSmall => self.wholesale_small,
            PriceField::Market => self.market,
        }
    }

    /// Copy of this entry with `field` set to `value`.
    /// Returns `None` when `value` cannot be stored (clearing the required purchase price).
    pub fn with_field(&self, field: PriceField, value: Option<f64>) -> Option<Self> {
        let mut out = *self;
        match field {
            PriceField::PurchaseEntry => out.purchase_entry = value?,
            PriceField::WholesaleSmall => out.wholesale_small = value,
            PriceField::Market => out.market = value,
        }
        Some(out)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PriceField {
    PurchaseEntry,
    WholesaleSmall,
    Market,
}

impl PriceField {
    pub const ALL: [PriceField; 3] = [
        PriceField::PurchaseEntry,
        PriceField::WholesaleSmall,
        PriceField::Market,
    ];

    /// Name of the field in the saved document.
    pub fn as_str(self) -> &'static str {
        match self {
            PriceField::PurchaseEntry => statics::FIELD_PURCHASE_ENTRY,
            PriceField::WholesaleSmall => statics::FIELD_WHOLESALE_SMALL,
            PriceField::Market => statics::FIELD_MARKET,
        }
    }

    pub fn is_required(self) -> bool {
        self == PriceField::PurchaseEntry
    }
}

impl fmt::Display for PriceField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnknownPriceField(pub String);

impl fmt::Display for UnknownPriceField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "unknown price field \"{}\"", self.0)
    }
}

impl std::error::Error for UnknownPriceField {}

impl FromStr for PriceField {
    type Err = UnknownPriceField;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        PriceField::ALL
            .into_iter()
            .find(|field| field.as_str() == s)
            .ok_or_else(|| UnknownPriceField(s.to_string()))
    }
}

/// Configurations of one model, in insertion order.
pub type Configs = IndexMap<String, PriceEntry>;
/// Models of one category, in insertion order.
pub type Models = IndexMap<String, Rc<Configs>>;
pub(crate) type Categories = IndexMap<String, Rc<Models>>;

/// The whole price catalog: category -> model -> configuration -> prices.
///
/// Every level sits behind an `Rc`, so cloning a catalog is cheap and edits made by the
/// store only copy the branch they touch. A `Catalog` is never mutated in place.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Catalog {
    categories: Rc<Categories>,
}

impl Catalog {
    pub fn new() -> Self {
        Self::default()
    }

    pub(crate) fn from_categories(categories: Categories) -> Self {
        Self {
            categories: Rc::new(categories),
        }
    }

    pub(crate) fn categories_map(&self) -> &Categories {
        &self.categories
    }

    /// True when both handles point at the same snapshot (not merely equal contents).
    pub fn ptr_eq(a: &Catalog, b: &Catalog) -> bool {
        Rc::ptr_eq(&a.categories, &b.categories)
    }

    pub fn is_empty(&self) -> bool {
        self.categories.is_empty()
    }

    /// Number of categories.
    pub fn len(&self) -> usize {
        self.categories.len()
    }

    pub fn categories(&self) -> impl Iterator<Item = (&str, &Models)> {
        self.categories.iter().map(|(k, v)| (k.as_str(), &**v))
    }

    pub fn category_names(&self) -> impl Iterator<Item = &str> {
        self.categories.keys().map(String::as_str)
    }

    pub fn category(&self, category: &str) -> Option<&Models> {
        self.categories.get(category).map(|m| &**m)
    }

    /// Model names of `category`; empty when the category does not exist.
    pub fn model_names<'a>(&'a self, category: &str) -> impl Iterator<Item = &'a str> + use<'a> {
        self.category(category)
            .into_iter()
            .flat_map(|models| models.keys().map(String::as_str))
    }

    pub fn model(&self, category: &str, model: &str) -> Option<&Configs> {
        self.category(category)?.get(model).map(|c| &**c)
    }

    /// Configuration names of `category` / `model`; empty when the path does not exist.
    pub fn config_names<'a>(
        &'a self,
        category: &str,
        model: &str,
    ) -> impl Iterator<Item = &'a str> + use<'a> {
        self.model(category, model)
            .into_iter()
            .flat_map(|configs| configs.keys().map(String::as_str))
    }

    pub fn entry(&self, category: &str, model: &str, config: &str) -> Option<&PriceEntry> {
        self.model(category, model)?.get(config)
    }

    pub fn contains_category(&self, category: &str) -> bool {
        self.categories.contains_key(category)
    }

    pub fn contains_model(&self, category: &str, model: &str) -> bool {
        self.model(category, model).is_some()
    }

    pub fn contains_config(&self, category: &str, model: &str, config: &str) -> bool {
        self.entry(category, model, config).is_some()
    }

    /// Every price entry with its full path, in document order.
    pub fn entries(&self) -> impl Iterator<Item = (&str, &str, &str, &PriceEntry)> {
        self.categories.iter().flat_map(|(category, models)| {
            models.iter().flat_map(move |(model, configs)| {
                configs.iter().map(move |(config, entry)| {
                    (category.as_str(), model.as_str(), config.as_str(), entry)
                })
            })
        })
    }
}
