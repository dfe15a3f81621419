use crate::model::{Catalog, Configs, Models, PriceEntry, PriceField};
use std::rc::Rc;
use tracing::debug;

/// A structural edit of the catalog.
///
/// Commands do not check business rules (empty names, negative prices); run the
/// `validate` functions first. A command whose path precondition fails is a no-op.
#[derive(Debug, Clone, PartialEq)]
pub enum Command {
    SetDocument(Catalog),
    UpdatePrice {
        category: String,
        model: String,
        config: String,
        field: PriceField,
        value: Option<f64>,
    },
    AddCategory {
        name: String,
    },
    DeleteCategory {
        name: String,
    },
    AddModel {
        category: String,
        name: String,
    },
    DeleteModel {
        category: String,
        name: String,
    },
    AddConfig {
        category: String,
        model: String,
        name: String,
        entry: PriceEntry,
    },
    DeleteConfig {
        category: String,
        model: String,
        name: String,
    },
}

impl Command {
    pub fn kind(&self) -> &'static str {
        match self {
            Command::SetDocument(_) => "set_document",
            Command::UpdatePrice { .. } => "update_price",
            Command::AddCategory { .. } => "add_category",
            Command::DeleteCategory { .. } => "delete_category",
            Command::AddModel { .. } => "add_model",
            Command::DeleteModel { .. } => "delete_model",
            Command::AddConfig { .. } => "add_config",
            Command::DeleteConfig { .. } => "delete_config",
        }
    }
}

/// Apply `command` to `doc`, returning the next snapshot.
///
/// The result shares every untouched branch with `doc`. When nothing changes the result
/// is `doc` itself (`Catalog::ptr_eq` holds).
pub fn apply(doc: &Catalog, command: Command) -> Catalog {
    match command {
        Command::SetDocument(next) => next,
        Command::UpdatePrice {
            category,
            model,
            config,
            field,
            value,
        } => {
            let Some(models) = doc.categories_map().get(&category) else {
                return doc.clone();
            };
            let Some(configs) = models.get(&model) else {
                return doc.clone();
            };
            let Some(updated) = configs
                .get(&config)
                .and_then(|entry| entry.with_field(field, value))
            else {
                return doc.clone();
            };
            let mut configs = (**configs).clone();
            if let Some(slot) = configs.get_mut(&config) {
                *slot = updated;
            }
            replace_model(doc, &category, models, &model, configs)
        }
        Command::AddCategory { name } => {
            if doc.contains_category(&name) {
                return doc.clone();
            }
            let mut categories = doc.categories_map().clone();
            categories.insert(name, Rc::new(Models::new()));
            Catalog::from_categories(categories)
        }
        Command::DeleteCategory { name } => {
            if !doc.contains_category(&name) {
                return doc.clone();
            }
            let mut categories = doc.categories_map().clone();
            categories.shift_remove(&name);
            Catalog::from_categories(categories)
        }
        Command::AddModel { category, name } => {
            let Some(models) = doc.categories_map().get(&category) else {
                return doc.clone();
            };
            if models.contains_key(&name) {
                return doc.clone();
            }
            let mut models = (**models).clone();
            models.insert(name, Rc::new(Configs::new()));
            replace_category(doc, &category, models)
        }
        Command::DeleteModel { category, name } => {
            let Some(models) = doc.categories_map().get(&category) else {
                return doc.clone();
            };
            if !models.contains_key(&name) {
                return doc.clone();
            }
            let mut models = (**models).clone();
            models.shift_remove(&name);
            replace_category(doc, &category, models)
        }
        Command::AddConfig {
            category,
            model,
            name,
            entry,
        } => {
            let Some(models) = doc.categories_map().get(&category) else {
                return doc.clone();
            };
            let Some(configs) = models.get(&model) else {
                return doc.clone();
            };
            if configs.contains_key(&name) {
                return doc.clone();
            }
            let mut configs = (**configs).clone();
            configs.insert(name, entry);
            replace_model(doc, &category, models, &model, configs)
        }
        Command::DeleteConfig {
            category,
            model,
            name,
        } => {
            let Some(models) = doc.categories_map().get(&category) else {
                return doc.clone();
            };
            let Some(configs) = models.get(&model) else {
                return doc.clone();
            };
            if !configs.contains_key(&name) {
                return doc.clone();
            }
            let mut configs = (**configs).clone();
            configs.shift_remove(&name);
            replace_model(doc, &category, models, &model, configs)
        }
    }
}

// Both helpers keep the replaced key at its original position.
fn replace_category(doc: &Catalog, category: &str, models: Models) -> Catalog {
    let mut categories = doc.categories_map().clone();
    if let Some(slot) = categories.get_mut(category) {
        *slot = Rc::new(models);
    }
    Catalog::from_categories(categories)
}

fn replace_model(
    doc: &Catalog,
    category: &str,
    models: &Models,
    model: &str,
    configs: Configs,
) -> Catalog {
    let mut models = models.clone();
    if let Some(slot) = models.get_mut(model) {
        *slot = Rc::new(configs);
    }
    replace_category(doc, category, models)
}

/// Exclusive owner of the current catalog snapshot.
#[derive(Debug, Clone, Default)]
pub struct CatalogStore {
    document: Catalog,
}

impl CatalogStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn document(&self) -> &Catalog {
        &self.document
    }

    /// Apply `command` and commit the result. Returns whether the document changed.
    pub fn dispatch(&mut self, command: Command) -> bool {
        let kind = command.kind();
        let next = apply(&self.document, command);
        let changed = !Catalog::ptr_eq(&next, &self.document);
        debug!(command = kind, changed, "dispatched catalog command");
        self.document = next;
        changed
    }
}
