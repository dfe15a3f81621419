//! Pure checks for everything that reaches the catalog from outside: loaded documents,
//! user-entered names and user-entered prices.

use crate::{
    Candidate,
    error::{SchemaError, Subject, ValidationError},
    model::{Catalog, PriceEntry},
    statics,
};
use indexmap::{IndexMap, IndexSet};
use std::rc::Rc;
use tracing::warn;

const ROOT_PATH: &str = "$";

/// All failures of a price value; empty means valid.
///
/// Negative values are reported as `Negative` only, so `-inf` is not also `NotFinite`.
pub fn validate_price_value(value: Option<f64>, required: bool) -> Vec<ValidationError> {
    let mut errors = Vec::new();
    match value {
        None if required => errors.push(ValidationError::MissingRequired),
        None => {}
        Some(v) if v < 0.0 => errors.push(ValidationError::Negative),
        Some(v) if !v.is_finite() => errors.push(ValidationError::NotFinite),
        Some(_) => {}
    }
    errors
}

/// First failure of [`validate_price_value`], or the value back.
pub fn check_price_value(
    value: Option<f64>,
    required: bool,
) -> Result<Option<f64>, ValidationError> {
    match validate_price_value(value, required).into_iter().next() {
        Some(err) => Err(err),
        None => Ok(value),
    }
}

/// Read a price typed by the user. Blank input clears the value.
pub fn parse_price_input(text: &str) -> Result<Option<f64>, ValidationError> {
    let text = text.trim();
    if text.is_empty() {
        return Ok(None);
    }
    text.parse::<f64>()
        .map(Some)
        .map_err(|_| ValidationError::NotANumber {
            input: text.to_string(),
        })
}

/// Check a new category name against the existing ones. Returns the trimmed name to insert.
pub fn validate_category_name<'a>(
    name: &str,
    existing: impl IntoIterator<Item = &'a str>,
) -> Result<String, ValidationError> {
    check_name(Subject::Category, name, existing)
}

/// Check a new model name within `category`. A missing category has no duplicates.
pub fn validate_model_name(
    name: &str,
    category: &str,
    catalog: &Catalog,
) -> Result<String, ValidationError> {
    check_name(Subject::Model, name, catalog.model_names(category))
}

pub fn validate_config_name(
    name: &str,
    category: &str,
    model: &str,
    catalog: &Catalog,
) -> Result<String, ValidationError> {
    check_name(Subject::Config, name, catalog.config_names(category, model))
}

fn check_name<'a>(
    subject: Subject,
    name: &str,
    existing: impl IntoIterator<Item = &'a str>,
) -> Result<String, ValidationError> {
    let trimmed = name.trim();
    if trimmed.is_empty() {
        return Err(ValidationError::Empty { subject });
    }
    if existing.into_iter().any(|key| key == trimmed) {
        return Err(ValidationError::Duplicate {
            subject,
            name: trimmed.to_string(),
        });
    }
    Ok(trimmed.to_string())
}

/// Structural check of a single price object.
pub fn is_valid_price_entry(candidate: &Candidate) -> bool {
    check_price_entry(candidate, ROOT_PATH).is_ok()
}

/// Whether `candidate` has the full catalog shape with valid prices everywhere.
pub fn validate_document(candidate: &Candidate) -> bool {
    check_document(candidate).is_ok()
}

/// Check a parsed document and convert it into a typed [`Catalog`].
///
/// Names are trimmed; a name that is blank, or that collides with a sibling after
/// trimming, is rejected. The error points at the first offending path.
pub fn check_document(candidate: &Candidate) -> Result<Catalog, SchemaError> {
    let categories = check_level(candidate, ROOT_PATH, "catalog", |models, path| {
        check_level(models, path, "category", |configs, path| {
            check_level(configs, path, "model", check_price_entry).map(Rc::new)
        })
        .map(Rc::new)
    })?;
    Ok(Catalog::from_categories(categories))
}

fn check_level<T>(
    candidate: &Candidate,
    path: &str,
    what: &str,
    mut check_child: impl FnMut(&Candidate, &str) -> Result<T, SchemaError>,
) -> Result<IndexMap<String, T>, SchemaError> {
    let Some(map) = candidate.as_object() else {
        return Err(SchemaError::new(
            path,
            format!("expected a {what} object, found {}", candidate.type_name()),
        ));
    };

    let mut seen = IndexSet::with_capacity(map.len());
    let mut out = IndexMap::with_capacity(map.len());
    for (key, value) in map {
        let child_path = format!("{path}[{key:?}]");
        let name = key.trim();
        if name.is_empty() {
            return Err(SchemaError::new(child_path, "names cannot be empty"));
        }
        if !seen.insert(name) {
            return Err(SchemaError::new(
                child_path,
                format!("duplicate name \"{name}\" in {what}"),
            ));
        }
        out.insert(name.to_string(), check_child(value, &child_path)?);
    }
    Ok(out)
}

fn check_price_entry(candidate: &Candidate, path: &str) -> Result<PriceEntry, SchemaError> {
    let Some(fields) = candidate.as_object() else {
        return Err(SchemaError::new(
            path,
            format!("expected a price object, found {}", candidate.type_name()),
        ));
    };

    for key in fields.keys() {
        if ![
            statics::FIELD_PURCHASE_ENTRY,
            statics::FIELD_WHOLESALE_SMALL,
            statics::FIELD_MARKET,
        ]
        .contains(&key.as_str())
        {
            warn!(path, field = %key, "ignoring unknown price field");
        }
    }

    let purchase = check_price_field(
        fields.get(statics::FIELD_PURCHASE_ENTRY),
        path,
        statics::FIELD_PURCHASE_ENTRY,
        true,
    )?;
    let wholesale_small = check_price_field(
        fields.get(statics::FIELD_WHOLESALE_SMALL),
        path,
        statics::FIELD_WHOLESALE_SMALL,
        false,
    )?;
    let market = check_price_field(
        fields.get(statics::FIELD_MARKET),
        path,
        statics::FIELD_MARKET,
        false,
    )?;

    let Some(purchase_entry) = purchase else {
        return Err(SchemaError::new(
            format!("{path}.{}", statics::FIELD_PURCHASE_ENTRY),
            ValidationError::MissingRequired.to_string(),
        ));
    };

    Ok(PriceEntry {
        purchase_entry,
        wholesale_small,
        market,
    })
}

// An absent optional field reads as null.
fn check_price_field(
    value: Option<&Candidate>,
    path: &str,
    field: &str,
    required: bool,
) -> Result<Option<f64>, SchemaError> {
    let field_path = || format!("{path}.{field}");
    let number = match value {
        None | Some(Candidate::Null) => None,
        Some(Candidate::Number(n)) => Some(*n),
        Some(other) => {
            return Err(SchemaError::new(
                field_path(),
                format!("expected a number, found {}", other.type_name()),
            ));
        }
    };
    check_price_value(number, required)
        .map_err(|err| SchemaError::new(field_path(), err.to_string()))
}
