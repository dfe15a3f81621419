use crate::{
    confirm::ConfirmationGate,
    error::{EditorError, NotFoundError},
    model::{Catalog, PriceEntry, PriceField},
    statics,
    store::{CatalogStore, Command},
    transport::{self, LineEnding},
    validate,
};
use chrono::{Local, NaiveDate};
use std::path::Path;
use tracing::{info, warn};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoticeLevel {
    Success,
    Info,
    /// The host should ask the user and answer with `confirm` or `cancel`.
    Confirm,
}

/// What an intent reports back to the user.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notice {
    pub level: NoticeLevel,
    pub message: String,
}

impl Notice {
    pub fn success(message: impl Into<String>) -> Self {
        Self {
            level: NoticeLevel::Success,
            message: message.into(),
        }
    }

    pub fn info(message: impl Into<String>) -> Self {
        Self {
            level: NoticeLevel::Info,
            message: message.into(),
        }
    }

    pub fn confirm(message: impl Into<String>) -> Self {
        Self {
            level: NoticeLevel::Confirm,
            message: message.into(),
        }
    }
}

/// A destructive intent waiting for the user's answer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Deletion {
    Category {
        category: String,
    },
    Model {
        category: String,
        model: String,
    },
    Config {
        category: String,
        model: String,
        config: String,
    },
}

impl Deletion {
    fn success_message(&self) -> &'static str {
        match self {
            Deletion::Category { .. } => statics::EN_OK_CATEGORY_DELETED,
            Deletion::Model { .. } => statics::EN_OK_MODEL_DELETED,
            Deletion::Config { .. } => statics::EN_OK_CONFIG_DELETED,
        }
    }

    fn into_command(self) -> Command {
        match self {
            Deletion::Category { category } => Command::DeleteCategory { name: category },
            Deletion::Model { category, model } => Command::DeleteModel {
                category,
                name: model,
            },
            Deletion::Config {
                category,
                model,
                config,
            } => Command::DeleteConfig {
                category,
                model,
                name: config,
            },
        }
    }
}

/// Serialized catalog plus the file name to suggest to the user.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SavedFile {
    pub file_name: String,
    pub text: String,
}

/// The editor front door: every user intent goes through here.
///
/// Intents validate first and stop at the first error, so the catalog is either fully
/// updated or untouched. Deletions are parked behind a confirmation and only run once the
/// host answers `confirm`.
#[derive(Debug, Default)]
pub struct PriceEditor {
    store: CatalogStore,
    gate: ConfirmationGate<Deletion>,
    line_ending: LineEnding,
}

impl PriceEditor {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn catalog(&self) -> &Catalog {
        self.store.document()
    }

    pub fn pending_deletion(&self) -> Option<&Deletion> {
        self.gate.pending()
    }

    /// Line ending of the last successfully loaded text; LF until something is loaded.
    pub fn line_ending(&self) -> LineEnding {
        self.line_ending
    }

    pub fn load_text(&mut self, raw_text: &str) -> Result<Notice, EditorError> {
        let candidate =
            transport::parse(raw_text).inspect_err(|e| warn!("rejected load: {e}"))?;
        let catalog =
            validate::check_document(&candidate).inspect_err(|e| warn!("rejected load: {e}"))?;

        self.line_ending = transport::detect_line_ending(raw_text);
        info!(
            categories = catalog.len(),
            entries = catalog.entries().count(),
            "loaded catalog"
        );
        self.store.dispatch(Command::SetDocument(catalog));
        Ok(Notice::success(statics::EN_OK_LOADED))
    }

    pub fn load_path(&mut self, path: &Path) -> Result<Notice, EditorError> {
        let text = transport::read_path(path).map_err(EditorError::Io)?;
        self.load_text(&text)
    }

    /// Serialize the catalog for a save made today.
    ///
    /// The text uses [`PriceEditor::line_ending`], so after loading a CRLF file it differs from
    /// [`transport::serialize`] (always LF) by line terminators only.
    pub fn save_text(&self) -> Result<SavedFile, EditorError> {
        self.save_text_on(Local::now().date_naive())
    }

    pub fn save_text_on(&self, date: NaiveDate) -> Result<SavedFile, EditorError> {
        let catalog = self.catalog();
        if catalog.is_empty() {
            return Err(EditorError::NothingToSave);
        }
        Ok(SavedFile {
            file_name: transport::suggested_file_name(date),
            text: transport::serialize_with_newline(catalog, self.line_ending),
        })
    }

    pub fn save_path(&self, path: &Path) -> Result<Notice, EditorError> {
        let saved = self.save_text()?;
        transport::write_path(path, &saved.text).map_err(EditorError::Io)?;
        info!(path = %path.display(), "saved catalog");
        Ok(Notice::success(statics::EN_OK_SAVED))
    }

    pub fn add_category(&mut self, name: &str) -> Result<Notice, EditorError> {
        let name = validate::validate_category_name(name, self.catalog().category_names())?;
        self.store.dispatch(Command::AddCategory { name });
        Ok(Notice::success(statics::EN_OK_CATEGORY_ADDED))
    }

    pub fn add_model(&mut self, category: &str, name: &str) -> Result<Notice, EditorError> {
        let name = validate::validate_model_name(name, category, self.catalog())?;
        self.require_category(category)?;
        self.store.dispatch(Command::AddModel {
            category: category.to_string(),
            name,
        });
        Ok(Notice::success(statics::EN_OK_MODEL_ADDED))
    }

    /// Add a configuration priced at `purchase_price`; the other prices start empty.
    pub fn add_config(
        &mut self,
        category: &str,
        model: &str,
        name: &str,
        purchase_price: f64,
    ) -> Result<Notice, EditorError> {
        let name = validate::validate_config_name(name, category, model, self.catalog())?;
        validate::check_price_value(Some(purchase_price), true)?;
        self.require_model(category, model)?;
        self.store.dispatch(Command::AddConfig {
            category: category.to_string(),
            model: model.to_string(),
            name,
            entry: PriceEntry::new(purchase_price),
        });
        Ok(Notice::success(statics::EN_OK_CONFIG_ADDED))
    }

    pub fn update_price(
        &mut self,
        category: &str,
        model: &str,
        config: &str,
        field: PriceField,
        value: Option<f64>,
    ) -> Result<Notice, EditorError> {
        let value = validate::check_price_value(value, field.is_required())?;
        self.require_config(category, model, config)?;
        self.store.dispatch(Command::UpdatePrice {
            category: category.to_string(),
            model: model.to_string(),
            config: config.to_string(),
            field,
            value,
        });
        Ok(Notice::success(statics::EN_OK_PRICE_UPDATED))
    }

    /// Like [`PriceEditor::update_price`], reading the value from user text ("" clears it).
    pub fn update_price_text(
        &mut self,
        category: &str,
        model: &str,
        config: &str,
        field: PriceField,
        input: &str,
    ) -> Result<Notice, EditorError> {
        let value = validate::parse_price_input(input)?;
        self.update_price(category, model, config, field, value)
    }

    pub fn delete_category(&mut self, category: &str) -> Result<Notice, EditorError> {
        self.request_deletion(Deletion::Category {
            category: category.to_string(),
        })
    }

    pub fn delete_model(&mut self, category: &str, model: &str) -> Result<Notice, EditorError> {
        self.request_deletion(Deletion::Model {
            category: category.to_string(),
            model: model.to_string(),
        })
    }

    pub fn delete_config(
        &mut self,
        category: &str,
        model: &str,
        config: &str,
    ) -> Result<Notice, EditorError> {
        self.request_deletion(Deletion::Config {
            category: category.to_string(),
            model: model.to_string(),
            config: config.to_string(),
        })
    }

    pub fn confirm(&mut self) -> Result<Notice, EditorError> {
        self.resolve_confirmation(true)
    }

    pub fn cancel(&mut self) -> Result<Notice, EditorError> {
        self.resolve_confirmation(false)
    }

    /// Answer the pending confirmation. A confirmed deletion of a path that no longer
    /// exists is a silent no-op.
    pub fn resolve_confirmation(&mut self, confirmed: bool) -> Result<Notice, EditorError> {
        let Some(deletion) = self.gate.resolve(confirmed)? else {
            return Ok(Notice::info(statics::EN_CONFIRM_CANCELLED));
        };
        let message = deletion.success_message();
        self.store.dispatch(deletion.into_command());
        Ok(Notice::success(message))
    }

    /// Forget the pending confirmation; its deletion never runs.
    pub fn abandon_confirmation(&mut self) -> Option<Deletion> {
        self.gate.abandon()
    }

    fn request_deletion(&mut self, deletion: Deletion) -> Result<Notice, EditorError> {
        self.gate.request(deletion)?;
        Ok(Notice::confirm(statics::EN_CONFIRM_BODY))
    }

    fn require_category(&self, category: &str) -> Result<(), NotFoundError> {
        if self.catalog().contains_category(category) {
            Ok(())
        } else {
            Err(NotFoundError::Category {
                category: category.to_string(),
            })
        }
    }

    fn require_model(&self, category: &str, model: &str) -> Result<(), NotFoundError> {
        self.require_category(category)?;
        if self.catalog().contains_model(category, model) {
            Ok(())
        } else {
            Err(NotFoundError::Model {
                category: category.to_string(),
                model: model.to_string(),
            })
        }
    }

    fn require_config(
        &self,
        category: &str,
        model: &str,
        config: &str,
    ) -> Result<(), NotFoundError> {
        self.require_model(category, model)?;
        if self.catalog().contains_config(category, model, config) {
            Ok(())
        } else {
            Err(NotFoundError::Config {
                category: category.to_string(),
                model: model.to_string(),
                config: config.to_string(),
            })
        }
    }
}
