//! End-to-end tests across selector, template, converter and archive

use crate::*;
use std::io::{Cursor, Read};

fn archive_entry(archive: &[u8], name: &str) -> String {
    let mut zip = zip::ZipArchive::new(Cursor::new(archive)).unwrap();
    let mut file = zip.by_name(name).unwrap();
    let mut content = String::new();
    file.read_to_string(&mut content).unwrap();
    content
}

#[test]
fn test_selector_feeds_template() {
    let mut selector = Selector::new(Catalog::builtin());
    selector.toggle("en").unwrap();
    selector.toggle("es").unwrap();
    selector.toggle("fr").unwrap();

    // Base language is dropped from the targets
    let csv = generate("en", selector.selected_codes(), &["greeting"]).unwrap();
    let lines: Vec<&str> = csv.lines().collect();
    assert_eq!(lines[0], r#""key","en","es","fr""#);

    let cells: Vec<&str> = lines[1].split(',').collect();
    assert_eq!(cells[0], r#""greeting""#);
    assert_eq!(cells[1], r#""""#);
    assert_eq!(cells[2], r#"=GOOGLETRANSLATE($B2;"en";"es")"#);
    assert_eq!(cells[3], r#"=GOOGLETRANSLATE($B2;"en";"fr")"#);
}

#[test]
fn test_filter_select_clear_keeps_selection() {
    let mut selector = Selector::new(Catalog::builtin());
    selector.toggle("ja").unwrap();

    selector.set_filter("slov");
    selector.toggle_all_visible();
    selector.set_filter("");

    assert_eq!(selector.selected_codes(), ["ja", "sk", "sl"]);
    assert_eq!(selector.visible().len(), selector.catalog().len());
    assert!(!selector.is_all_selected(selector.visible()));
}

#[test]
fn test_toggle_all_is_a_toggle_on_the_full_catalog() {
    let mut selector = Selector::new(Catalog::builtin());
    selector.toggle_all_visible();
    assert_eq!(selector.selected_codes().len(), selector.catalog().len());
    selector.toggle_all_visible();
    assert!(selector.selected_codes().is_empty());
}

#[test]
fn test_filled_template_converts() {
    // The template after a spreadsheet filled and evaluated it
    let template = generate("en", &["es"], &["greeting", "farewell"]).unwrap();
    assert!(template.contains("GOOGLETRANSLATE"));

    let exported = "key,en,es\ngreeting,Hello,Hola\nfarewell,Goodbye,Adiós\n";
    let archive = convert_to_archive(exported.as_bytes(), &ConverterConfig::default()).unwrap();
    assert_eq!(
        archive_entry(&archive, "app_es.arb"),
        "{\n  \"greeting\": \"Hola\",\n  \"farewell\": \"Adiós\"\n}"
    );
}

#[test]
fn test_partial_translation_sheet() {
    let bundle = convert(b"key,en,es\ngreeting,Hello,Hola\nbye,Bye,\n").unwrap();
    let en: Vec<(&str, &str)> = bundle.document("en").unwrap().iter().collect();
    let es: Vec<(&str, &str)> = bundle.document("es").unwrap().iter().collect();
    assert_eq!(en, vec![("greeting", "Hello"), ("bye", "Bye")]);
    assert_eq!(es, vec![("greeting", "Hola")]);
}

#[test]
fn test_wrong_first_column_produces_no_archive() {
    let result = convert_to_archive(b"name,en\ngreeting,Hello\n", &ConverterConfig::default());
    assert_eq!(result, Err(SheetError::MissingKeyColumn));
    assert_eq!(
        Status::from(SheetError::MissingKeyColumn).to_string(),
        "Error: First column must be \"key\"."
    );
}

#[test]
fn test_duplicate_keys_last_write_wins() {
    let bundle = convert(b"key,en\nk,A\nk,B\n").unwrap();
    let en: Vec<(&str, &str)> = bundle.document("en").unwrap().iter().collect();
    assert_eq!(en, vec![("k", "B")]);
}

#[test]
fn test_round_trip_through_flatten() {
    let original = convert(
        "key,en,es,de\n\
         greeting,Hello,Hola,Hallo\n\
         bye,Bye,,Tschüss\n\
         list,\"a, b\",\"\",\n\
         quote,\"say \"\"hi\"\"\",\"di \"\"hola\"\"\",\n"
            .as_bytes(),
    )
    .unwrap();

    let flattened = flatten(original.documents()).unwrap();
    let reconverted = convert(flattened.as_bytes()).unwrap();
    assert_eq!(reconverted, original);
}

#[test]
fn test_round_trip_through_archive_files() {
    let config = ConverterConfig::default();
    let bundle = convert(b"key,en,fr\ngreeting,Hello,Bonjour\nbye,Bye,\n").unwrap();

    let dir = tempfile::tempdir().unwrap();
    for (name, content) in bundle.file_entries(&config.file_pattern).unwrap() {
        std::fs::write(dir.path().join(name), content).unwrap();
    }

    let loaded = load_documents_from_dir(dir.path(), &config.file_pattern).unwrap();
    assert_eq!(Bundle::new(loaded), bundle);
}
