//! Integration tests for matching document content to declared units.

use docoutline::{analyze, DeclaredUnit, MatchTier, ParagraphRecord, Warning};

const BODY: &str = "This paragraph carries enough words to back a declared unit on its own.";

fn records(texts: &[&str]) -> Vec<ParagraphRecord> {
    texts.iter().map(|t| ParagraphRecord::new(*t)).collect()
}

fn declared(numbers: &[u32]) -> Vec<DeclaredUnit> {
    numbers
        .iter()
        .map(|&n| DeclaredUnit::new(n, format!("Declared {}", n)))
        .collect()
}

#[test]
fn test_direct_number_match() {
    let analysis = analyze(&records(&[
        "UNIT 1: Redes",
        BODY,
        "UNIT 2: Protocolos",
        BODY,
        "2.1 TCP",
        "Orientado a conexión.",
    ]));
    let outcome = analysis.match_declared(&declared(&[1, 2]));

    assert_eq!(outcome.tier, MatchTier::DirectNumber);
    assert!(outcome.is_complete());
    assert_eq!(outcome.content(1), Some(BODY));
    let second = outcome.content(2).unwrap();
    assert!(second.contains("2.1 TCP"));
    assert!(second.contains("Orientado a conexión."));
}

#[test]
fn test_chapters_redistributed_in_order() {
    let analysis = analyze(&records(&[
        "1. Introducción",
        "Primer bloque.",
        "2. Hardware",
        "Segundo bloque.",
        "3. Software",
        "Tercer bloque.",
        "4. Redes",
        "Cuarto bloque.",
    ]));
    let outcome = analysis.match_declared(&declared(&[10, 20]));

    assert_eq!(outcome.tier, MatchTier::Redistribution);
    let first = outcome.content(10).unwrap();
    let second = outcome.content(20).unwrap();
    assert!(first.starts_with("Introducción"));
    assert!(first.contains("Segundo bloque."));
    assert!(second.starts_with("Software"));
    assert!(second.ends_with("Cuarto bloque."));
}

#[test]
fn test_flat_split_when_structure_is_missing() {
    let analysis = analyze(&records(&[
        "Primer párrafo con suficiente longitud para contar.",
        "corto",
        "Segundo párrafo con suficiente longitud para contar.",
        "Tercer párrafo con suficiente longitud para contar.",
    ]));
    let outcome = analysis.match_declared(&declared(&[1, 2]));

    assert_eq!(outcome.tier, MatchTier::FlatSplit);
    assert_eq!(
        outcome.content(1),
        Some(
            "Primer párrafo con suficiente longitud para contar.\n\n\
             Segundo párrafo con suficiente longitud para contar."
        )
    );
    assert_eq!(
        outcome.content(2),
        Some("Tercer párrafo con suficiente longitud para contar.")
    );
    assert!(outcome.warnings.is_empty());
}

#[test]
fn test_unbacked_units_reported() {
    let analysis = analyze(&records(&["Un único párrafo con longitud suficiente."]));
    let outcome = analysis.match_declared(&declared(&[1, 2, 3]));

    assert_eq!(outcome.contents.len(), 3);
    assert_eq!(outcome.content(3), Some(""));
    assert!(!outcome.is_complete());
    assert!(outcome.warnings.contains(&Warning::UnbackedUnit { number: 3 }));
}

#[test]
fn test_key_set_equals_declared_set() {
    let analysis = analyze(&records(&["UNIT 1: Solo", BODY]));
    let outcome = analysis.match_declared(&declared(&[5, 1, 5, 9]));

    let keys: Vec<u32> = outcome.contents.keys().copied().collect();
    assert_eq!(keys, vec![1, 5, 9]);
}

#[test]
fn test_no_declared_units() {
    let analysis = analyze(&records(&["UNIT 1: Solo", BODY]));
    let outcome = analysis.match_declared(&[]);
    assert_eq!(outcome.tier, MatchTier::Unmatched);
    assert!(outcome.contents.is_empty());
}
