use pretty_assertions::assert_eq;
use pricebook::{PriceEditor, PriceField, transport, validate};

type Result<T> = std::result::Result<T, Box<dyn std::error::Error>>;

const SAMPLE: &str = r#"{
  "iPhone": {
    "iPhone 15": {
      "128GB": {
        "purchase_entry": 799,
        "wholesale_small": 849.5,
        "market": 899
      },
      "256GB": {
        "purchase_entry": 899,
        "wholesale_small": null,
        "market": null
      }
    },
    "iPhone 14": {}
  },
  "Accessories": {},
  "MacBook": {
    "Air 13\"": {
      "8/256": {
        "purchase_entry": 0.99,
        "wholesale_small": 0,
        "market": 1e21
      }
    }
  }
}
"#;

#[test]
fn roundtrip_canonical_text_is_identical() -> Result<()> {
    let mut editor = PriceEditor::new();
    editor.load_text(SAMPLE)?;
    let saved = editor.save_text()?;
    assert_eq!(saved.text, SAMPLE);
    Ok(())
}

#[test]
fn parse_of_serialize_is_structurally_equal() -> Result<()> {
    let catalog = validate::check_document(&transport::parse(SAMPLE)?)?;

    let text = transport::serialize(&catalog);
    let candidate = transport::parse(&text)?;
    assert!(validate::validate_document(&candidate));

    let reparsed = validate::check_document(&candidate)?;
    assert_eq!(reparsed, catalog);

    let order = |c: &pricebook::Catalog| -> Vec<String> {
        c.entries()
            .map(|(category, model, config, _)| format!("{category}/{model}/{config}"))
            .collect()
    };
    assert_eq!(order(&reparsed), order(&catalog));
    Ok(())
}

#[test]
fn edited_catalog_survives_a_file_roundtrip() -> Result<()> {
    let dir = tempfile::tempdir()?;
    let path = dir.path().join("prices.json");

    let mut editor = PriceEditor::new();
    editor.add_category("iPad")?;
    editor.add_model("iPad", "iPad Pro 11")?;
    editor.add_config("iPad", "iPad Pro 11", "Wi-Fi 256GB", 1099.0)?;
    editor.update_price(
        "iPad",
        "iPad Pro 11",
        "Wi-Fi 256GB",
        PriceField::Market,
        Some(1249.99),
    )?;
    editor.add_model("iPad", "iPad mini")?;
    editor.save_path(&path)?;

    let mut reloaded = PriceEditor::new();
    reloaded.load_path(&path)?;
    assert_eq!(reloaded.catalog(), editor.catalog());

    let models: Vec<_> = reloaded.catalog().model_names("iPad").collect();
    assert_eq!(models, ["iPad Pro 11", "iPad mini"]);
    Ok(())
}

#[test]
fn load_path_reports_missing_file() {
    let dir = tempfile::tempdir().expect("tempdir");
    let path = dir.path().join("missing.json");

    let mut editor = PriceEditor::new();
    let err = editor.load_path(&path).unwrap_err();
    assert!(matches!(err, pricebook::EditorError::Io(_)));
    assert!(err.to_string().contains("missing.json"));
}

#[test]
fn saved_file_name_carries_the_date() -> Result<()> {
    let mut editor = PriceEditor::new();
    editor.load_text(SAMPLE)?;

    let date = chrono::NaiveDate::from_ymd_opt(2025, 1, 31).ok_or("bad date")?;
    let saved = editor.save_text_on(date)?;
    assert_eq!(saved.file_name, "price-config-2025-01-31.json");
    Ok(())
}
