use archgraph::core::language::default_extension_table;
use archgraph::core::{Language, LanguageClassifier};
use std::collections::BTreeMap;
use std::path::Path;

#[test]
fn every_configured_extension_maps_to_its_language() {
    let table = default_extension_table();
    let classifier = LanguageClassifier::new(&table);

    for (ext, language) in &table {
        let path = format!("src/file.{ext}");
        assert_eq!(classifier.classify(Path::new(&path)), *language, "{path}");
    }
}

#[test]
fn extension_match_ignores_case() {
    let classifier = LanguageClassifier::default();
    assert_eq!(classifier.classify(Path::new("web/A.JSP")), Language::Jsp);
    assert_eq!(classifier.classify(Path::new("db/S.Sql")), Language::Sql);
    assert_eq!(classifier.classify(Path::new("Main.JAVA")), Language::Java);
}

#[test]
fn unmapped_extensions_are_unknown() {
    let classifier = LanguageClassifier::default();
    let unmapped = [
        "lib.rs",
        "notes.txt",
        "Makefile",
        "image.png",
        ".gitignore",
        "archive.tar.gz",
    ];
    for path in unmapped {
        let language = classifier.classify(Path::new(path));
        assert_eq!(language, Language::Unknown, "{path}");
    }
}

#[test]
fn custom_table_replaces_the_default() {
    let mut table = BTreeMap::new();
    table.insert(".JSPX".to_string(), Language::Jsp);
    let classifier = LanguageClassifier::new(&table);

    assert_eq!(classifier.classify(Path::new("a.jspx")), Language::Jsp);
    assert_eq!(classifier.classify(Path::new("a.py")), Language::Unknown);
    assert_eq!(classifier.dotted_extensions(), vec![".jspx".to_string()]);
}
