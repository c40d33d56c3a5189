//! End-to-end pipeline tests and structural properties.

use docoutline::{
    analyze, analyze_with_options, match_units, DeclaredUnit, Engine, EngineOptions, Outline,
    OutlineBuilder, ParagraphRecord, Thresholds, Unit, UnitSizeNormalizer,
};
use proptest::prelude::*;
use std::collections::BTreeSet;

/// Paragraph shapes that exercise every branch of the outline builder.
fn paragraph_strategy() -> impl Strategy<Value = String> {
    prop_oneof![
        (1u32..5).prop_map(|n| format!("UNIT {}: Topic {}", n, n)),
        (1u32..5).prop_map(|n| format!("Unidad {}", n)),
        (1u32..5, 1u32..4).prop_map(|(n, m)| format!("{}.{} Section title", n, m)),
        (1u32..5, 1u32..4, prop::sample::select(vec!['a', 'b', 'c']))
            .prop_map(|(n, m, l)| format!("{}.{}.{} Detail", n, m, l)),
        (1u32..10).prop_map(|n| format!("{}. Chapter heading", n)),
        Just("MODULE 7".to_string()),
        Just("INTRODUCTION".to_string()),
        Just(String::new()),
        Just("   ".to_string()),
        "[a-z ]{1,40}",
        "[A-Za-z ,]{10,80}\\.",
    ]
}

fn records_strategy() -> impl Strategy<Value = Vec<ParagraphRecord>> {
    prop::collection::vec(
        (paragraph_strategy(), any::<bool>()).prop_map(|(text, heading)| {
            if heading {
                ParagraphRecord::heading(text)
            } else {
                ParagraphRecord::new(text)
            }
        }),
        0..40,
    )
}

fn filler(chars: usize) -> String {
    "Texto de relleno con contenido. ".repeat(chars / 32 + 1)[..chars].to_string()
}

proptest! {
    #[test]
    fn test_outline_build_idempotent(records in records_strategy()) {
        let builder = OutlineBuilder::default();
        prop_assert_eq!(builder.build(&records), builder.build(&records));
    }

    #[test]
    fn test_outline_covers_every_paragraph(records in records_strategy()) {
        let (outline, _) = OutlineBuilder::default().build(&records);
        let non_empty = records.iter().filter(|r| !r.is_empty()).count();
        prop_assert_eq!(outline.content_paragraph_count() + outline.heading_lines, non_empty);
    }

    #[test]
    fn test_unit_numbers_unique(records in records_strategy()) {
        let (outline, _) = OutlineBuilder::default().build(&records);
        let numbers: BTreeSet<u32> = outline.units.iter().map(|u| u.number).collect();
        prop_assert_eq!(numbers.len(), outline.units.len());
        for unit in &outline.units {
            for section in &unit.sections {
                let prefix = format!("{}.", unit.number);
                prop_assert!(section.id.starts_with(&prefix));
                for sub in &section.subsections {
                    let sub_prefix = format!("{}.", section.id);
                    prop_assert!(sub.id.starts_with(&sub_prefix));
                }
            }
        }
    }

    #[test]
    fn test_small_documents_normalize_to_one_unit(count in 2u32..30) {
        let mut outline = Outline::new();
        for n in 1..=count {
            outline.units.push(Unit::new(n, format!("Topic {}", n)));
        }
        let normalizer = UnitSizeNormalizer::default();
        prop_assert_eq!(normalizer.max_units(4000), 1);
        prop_assert_eq!(normalizer.normalize(&outline, 4000).len(), 1);
    }

    #[test]
    fn test_matcher_keys_equal_declared(
        records in records_strategy(),
        declared in prop::collection::vec(1u32..8, 0..6),
    ) {
        let (outline, _) = OutlineBuilder::default().build(&records);
        let pool: Vec<String> = records.iter().map(|r| r.text.clone()).collect();
        let declared: Vec<DeclaredUnit> = declared.iter().map(|&n| DeclaredUnit::new(n, "")).collect();

        let outcome = match_units(&declared, &outline, &pool, &Thresholds::default());
        let keys: BTreeSet<u32> = outcome.contents.keys().copied().collect();
        let expected: BTreeSet<u32> = declared.iter().map(|d| d.number).collect();
        prop_assert_eq!(keys, expected);
    }
}

#[test]
fn test_scenario_through_pipeline() {
    let records: Vec<ParagraphRecord> = [
        "MODULE 1",
        "UNIT 1: Basics",
        "Some intro text.",
        "1.1 Fundamentals",
        "More text here that is long enough to count as body content.",
    ]
    .iter()
    .map(|t| ParagraphRecord::new(*t))
    .collect();

    let analysis = analyze(&records);
    assert_eq!(analysis.units, analysis.outline.units);
    assert_eq!(analysis.units[0].title, "Basics");
    assert_eq!(analysis.units[0].sections[0].title, "Fundamentals");
    assert_eq!(analysis.stats.section_count, 1);
}

#[test]
fn test_small_document_merged_with_source_title() {
    let records: Vec<ParagraphRecord> = (1..=3)
        .flat_map(|n| {
            [
                ParagraphRecord::new(format!("UNIT {}: Part {}", n, n)),
                ParagraphRecord::new(filler(1000)),
            ]
        })
        .collect();

    let analysis = Engine::new()
        .with_source_name("seguridad_informatica.docx")
        .analyze(&records);

    assert_eq!(analysis.outline.units.len(), 3);
    assert_eq!(analysis.units.len(), 1);
    assert_eq!(analysis.units[0].title, "Seguridad informatica");
    assert_eq!(analysis.units[0].content.len(), 3);
    assert_eq!(analysis.stats.unit_count, 3);
    assert_eq!(analysis.stats.normalized_unit_count, 1);
}

#[test]
fn test_large_document_merged_by_density() {
    // Five units of ~2500 characters: about 12.5k characters support two units.
    let records: Vec<ParagraphRecord> = (1..=5)
        .flat_map(|n| {
            [
                ParagraphRecord::new(format!("UNIT {}: Part {}", n, n)),
                ParagraphRecord::new(filler(2500)),
            ]
        })
        .collect();

    let analysis = analyze(&records);
    assert_eq!(analysis.units.len(), 2);
    assert_eq!(analysis.units[0].title, "Part 1 - Part 2 - Part 3");
    assert_eq!(analysis.units[1].title, "Part 4 - Part 5");
    assert_eq!(analysis.units[1].number, 2);
}

#[test]
fn test_normalization_can_be_disabled() {
    let records: Vec<ParagraphRecord> = (1..=4)
        .map(|n| ParagraphRecord::new(format!("UNIT {}: Part {}", n, n)))
        .collect();
    let options = EngineOptions::new().with_normalization(false);
    let analysis = analyze_with_options(&records, &options);
    assert_eq!(analysis.units.len(), 4);
}

#[test]
fn test_json_output_shape() {
    let records = vec![
        ParagraphRecord::new("UNIT 1: Basics"),
        ParagraphRecord::new("Intro."),
        ParagraphRecord::new("UNIT 1: Basics"),
        ParagraphRecord::new("Real intro."),
    ];
    let analysis = analyze(&records);
    let json: serde_json::Value =
        serde_json::from_str(&analysis.to_json(docoutline::JsonFormat::Compact).unwrap()).unwrap();

    assert_eq!(json["units"][0]["title"], "Basics");
    assert_eq!(json["outline"]["suppressed"][0]["content"][0], "Intro.");
    assert_eq!(json["warnings"][0]["type"], "duplicate_unit");
    assert_eq!(json["warnings"][0]["number"], 1);
    assert_eq!(json["stats"]["suppressed_unit_count"], 1);
}
