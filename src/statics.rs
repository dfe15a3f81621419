// Central place for user-facing strings and file format constants.
// Keep these out of editor.rs/validate.rs to reduce duplication and make tweaks safer.

// Wire field names of a price entry.
pub const FIELD_PURCHASE_ENTRY: &str = "purchase_entry";
pub const FIELD_WHOLESALE_SMALL: &str = "wholesale_small";
pub const FIELD_MARKET: &str = "market";

// Suggested save file name: `price-config-YYYY-MM-DD.json`.
pub const FILE_NAME_PREFIX: &str = "price-config-";
pub const FILE_NAME_EXTENSION: &str = ".json";
pub const FILE_DATE_FORMAT: &str = "%Y-%m-%d";

// Deepest bracket nesting accepted from a file; a catalog needs four object levels.
pub const MAX_NESTING_DEPTH: usize = 64;

// Pretty-printing indentation of saved documents.
pub const INDENT: &str = "  ";

// Newline constants (used for save formatting; keep out of transport code).
pub const NL_LF: &str = "\n";
pub const NL_CRLF: &str = "\r\n";

// Validation subjects (EN_ prefix to make future localization easier).
pub const EN_SUBJECT_CATEGORY: &str = "category";
pub const EN_SUBJECT_MODEL: &str = "model";
pub const EN_SUBJECT_CONFIG: &str = "configuration";
pub const EN_SUBJECT_PRICE: &str = "price";

// Success notices.
pub const EN_OK_LOADED: &str = "File loaded";
pub const EN_OK_SAVED: &str = "File saved";
pub const EN_OK_CATEGORY_ADDED: &str = "Category added";
pub const EN_OK_MODEL_ADDED: &str = "Model added";
pub const EN_OK_CONFIG_ADDED: &str = "Configuration added";
pub const EN_OK_PRICE_UPDATED: &str = "Price updated";
pub const EN_OK_CATEGORY_DELETED: &str = "Category deleted";
pub const EN_OK_MODEL_DELETED: &str = "Model deleted";
pub const EN_OK_CONFIG_DELETED: &str = "Configuration deleted";

// Confirmation prompt.
pub const EN_CONFIRM_BODY: &str =
    "Are you sure you want to delete this item? This action cannot be undone.";
pub const EN_CONFIRM_CANCELLED: &str = "Deletion cancelled";

// Errors surfaced to the user.
pub const EN_ERR_NOTHING_TO_SAVE: &str = "Nothing to save";
