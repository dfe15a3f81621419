use pretty_assertions::assert_eq;
use pricebook::{
    Catalog, CatalogStore, Command, EditorError, PriceEditor, PriceEntry, PriceField, apply,
    transport, validate,
};

type Result<T> = std::result::Result<T, Box<dyn std::error::Error>>;

fn s(v: &str) -> String {
    v.to_string()
}

fn assert_catalog_is_valid(catalog: &Catalog) {
    let text = transport::serialize(catalog);
    let candidate = transport::parse(&text).expect("serialized catalog parses");
    assert!(validate::validate_document(&candidate), "invalid catalog:\n{text}");
}

#[test]
fn iphone_walkthrough() {
    let mut store = CatalogStore::new();

    assert!(store.dispatch(Command::AddCategory { name: s("iPhone") }));
    assert!(store.dispatch(Command::AddModel {
        category: s("iPhone"),
        name: s("iPhone 15"),
    }));
    assert!(store.dispatch(Command::AddConfig {
        category: s("iPhone"),
        model: s("iPhone 15"),
        name: s("256GB"),
        entry: PriceEntry::new(999.0),
    }));
    assert_eq!(
        store.document().entry("iPhone", "iPhone 15", "256GB"),
        Some(&PriceEntry {
            purchase_entry: 999.0,
            wholesale_small: None,
            market: None,
        })
    );

    assert!(store.dispatch(Command::UpdatePrice {
        category: s("iPhone"),
        model: s("iPhone 15"),
        config: s("256GB"),
        field: PriceField::Market,
        value: Some(1099.0),
    }));
    let entry = store.document().entry("iPhone", "iPhone 15", "256GB").copied();
    assert_eq!(entry.and_then(|e| e.market), Some(1099.0));
    assert_eq!(entry.map(|e| e.purchase_entry), Some(999.0));

    assert!(store.dispatch(Command::DeleteModel {
        category: s("iPhone"),
        name: s("iPhone 15"),
    }));
    let models = store.document().category("iPhone").expect("category survives");
    assert!(models.is_empty());
    assert_catalog_is_valid(store.document());
}

#[test]
fn delete_category_is_idempotent() {
    let doc = apply(&Catalog::new(), Command::AddCategory { name: s("A") });
    let doc = apply(&doc, Command::AddCategory { name: s("B") });

    let once = apply(&doc, Command::DeleteCategory { name: s("A") });
    let twice = apply(&once, Command::DeleteCategory { name: s("A") });

    assert_eq!(once, twice);
    assert!(Catalog::ptr_eq(&once, &twice));
    assert_eq!(once.category_names().collect::<Vec<_>>(), ["B"]);
}

#[test]
fn add_category_twice_leaves_a_single_key() {
    let doc = apply(&Catalog::new(), Command::AddCategory { name: s("iPad") });
    let doc = apply(
        &doc,
        Command::AddModel {
            category: s("iPad"),
            name: s("iPad Air"),
        },
    );
    let again = apply(&doc, Command::AddCategory { name: s("iPad") });

    assert!(Catalog::ptr_eq(&doc, &again));
    assert_eq!(again.len(), 1);
    assert!(again.contains_model("iPad", "iPad Air"));
}

#[test]
fn commands_keep_the_catalog_valid() {
    let commands = vec![
        Command::AddCategory { name: s("Mac") },
        Command::AddCategory { name: s("Watch") },
        Command::AddModel {
            category: s("Mac"),
            name: s("MacBook Air"),
        },
        Command::AddConfig {
            category: s("Mac"),
            model: s("MacBook Air"),
            name: s("8/256"),
            entry: PriceEntry::new(1099.0),
        },
        Command::UpdatePrice {
            category: s("Mac"),
            model: s("MacBook Air"),
            config: s("8/256"),
            field: PriceField::WholesaleSmall,
            value: Some(1150.25),
        },
        // clearing the purchase price is refused by the store
        Command::UpdatePrice {
            category: s("Mac"),
            model: s("MacBook Air"),
            config: s("8/256"),
            field: PriceField::PurchaseEntry,
            value: None,
        },
        Command::AddModel {
            category: s("Missing"),
            name: s("Ghost"),
        },
        Command::DeleteConfig {
            category: s("Mac"),
            model: s("MacBook Air"),
            name: s("16/512"),
        },
        Command::DeleteCategory { name: s("Watch") },
    ];

    let mut store = CatalogStore::new();
    for command in commands {
        store.dispatch(command);
        assert_catalog_is_valid(store.document());
    }

    let entry = store
        .document()
        .entry("Mac", "MacBook Air", "8/256")
        .copied()
        .expect("entry exists");
    assert_eq!(entry.purchase_entry, 1099.0);
    assert_eq!(entry.wholesale_small, Some(1150.25));
    assert!(!store.document().contains_category("Missing"));
    assert_eq!(store.document().category_names().collect::<Vec<_>>(), ["Mac"]);
}

#[test]
fn rejected_load_leaves_the_catalog_untouched() -> Result<()> {
    let mut editor = PriceEditor::new();
    editor.add_category("Kept")?;
    let before = editor.catalog().clone();

    let err = editor
        .load_text(r#"{"A": {"B": {"C": {"purchase_entry": -5}}}}"#)
        .unwrap_err();
    assert!(matches!(err, EditorError::Schema(_)));
    assert!(Catalog::ptr_eq(editor.catalog(), &before));

    let err = editor.load_text("{ not json").unwrap_err();
    assert!(matches!(err, EditorError::Parse(_)));
    assert!(Catalog::ptr_eq(editor.catalog(), &before));
    Ok(())
}

#[test]
fn confirmed_deletion_through_the_editor() -> Result<()> {
    let mut editor = PriceEditor::new();
    editor.load_text(
        r#"{"iPhone": {"iPhone 15": {"128GB": {"purchase_entry": 799}}}, "iPad": {}}"#,
    )?;

    editor.delete_category("iPhone")?;
    assert!(editor.catalog().contains_category("iPhone"));

    editor.confirm()?;
    assert_eq!(editor.catalog().category_names().collect::<Vec<_>>(), ["iPad"]);

    // the prompt is shown even when the target has already gone
    editor.delete_category("iPhone")?;
    let before = editor.catalog().clone();
    editor.confirm()?;
    assert!(Catalog::ptr_eq(editor.catalog(), &before));
    Ok(())
}
