// tests/scene_tests.rs

use sceneq::{
    load_scene, search, PropertyValue, QueryContext, SceneError, SceneNode, StyleResolver,
    StyleSheet, TypeRegistry, UiNode,
};

const SCENE: &str = r#"{
  "types": {
    "Widget":  { "container": false },
    "Surface": { "extends": "Widget", "container": true },
    "Board":   { "extends": "Surface", "attached": ["Slot"] },
    "Knob":    { "extends": "Widget" }
  },
  "styles": { "Accent": "Base", "Base": null },
  "root": {
    "type": "Surface",
    "name": "Root",
    "children": [
      {
        "type": "Board",
        "name": "Deck",
        "children": [
          {
            "type": "Knob",
            "name": "Volume",
            "style": "Accent",
            "props": { "Board.Slot": 2, "Gain": 0.5, "Muted": false, "Label": "Vol" }
          },
          { "type": "Knob", "name": "Balance", "props": { "Board.Slot": 3 } }
        ]
      },
      { "type": "Knob", "name": "Power" }
    ]
  }
}"#;

fn load(doc: &str) -> Result<(SceneNode, TypeRegistry<SceneNode>, StyleSheet), SceneError> {
    let json: serde_json::Value = serde_json::from_str(doc).unwrap();
    let mut types = TypeRegistry::new();
    let mut styles = StyleSheet::new();
    let root = load_scene(&json, &mut types, &mut styles)?;
    Ok((root, types, styles))
}

#[test]
fn test_load_builds_the_tree() {
    let (root, types, styles) = load(SCENE).unwrap();

    assert_eq!(root.name(), "Root");
    assert_eq!(root.children().len(), 2);
    assert_eq!(types.len(), 4);
    assert_eq!(styles.len(), 2);

    let deck = root.children()[0].clone();
    let volume = deck.children()[0].clone();
    assert_eq!(volume.path(), "Root/Deck/Volume");
    assert_eq!(types.full_name(deck.type_id()), Some("scene.Board"));
}

#[test]
fn test_declaration_order_does_not_matter() {
    // "Board" sorts before the "Surface" it extends and "Accent" before
    // its "Base"; loading still resolves both chains.
    let (_, types, styles) = load(SCENE).unwrap();
    assert!(types.resolve_short_name("Board").is_some());
    assert!(styles.resolve("Accent").is_some());
}

#[test]
fn test_container_flag_is_inherited_through_extends() {
    let (root, _, _) = load(SCENE).unwrap();
    let deck = root.children()[0].clone();
    let power = root.children()[1].clone();
    // Board never declares "container"; it inherits true from Surface.
    assert!(deck.is_container());
    assert!(!power.is_container());
}

#[test]
fn test_property_values_keep_their_json_types() {
    let (root, _, _) = load(SCENE).unwrap();
    let volume = root.children()[0].children()[0].clone();

    assert_eq!(volume.local_property("Board.Slot"), Some(PropertyValue::Integer(2)));
    assert_eq!(volume.local_property("Gain"), Some(PropertyValue::Float(0.5)));
    assert_eq!(volume.local_property("Muted"), Some(PropertyValue::Boolean(false)));
    assert_eq!(
        volume.local_property("Label"),
        Some(PropertyValue::String("Vol".to_string()))
    );
    assert_eq!(volume.local_property("Missing"), None);
}

#[test]
fn test_loaded_scene_answers_queries() {
    let (root, types, styles) = load(SCENE).unwrap();
    let ctx = QueryContext {
        types: &types,
        styles: &styles,
    };

    let run = |query: &str| -> Vec<String> {
        search(&root, query, &ctx)
            .unwrap()
            .iter()
            .map(|node| node.name())
            .collect()
    };

    assert_eq!(run("Knob"), vec!["Volume", "Balance", "Power"]);
    assert_eq!(run("[Board_Slot=2]"), vec!["Volume"]);
    assert_eq!(run(".Base"), vec!["Volume"]);
    // Power hangs off the root, which is never a candidate itself.
    assert_eq!(run("Surface>Knob"), vec!["Volume", "Balance"]);
}

// ============================================================================
// Malformed Documents
// ============================================================================

#[test]
fn test_document_must_be_an_object() {
    let err = load("[]").unwrap_err();
    assert!(matches!(err, SceneError::Shape(_)));
}

#[test]
fn test_root_is_required() {
    let err = load(r#"{ "types": { "Knob": {} } }"#).unwrap_err();
    assert!(matches!(err, SceneError::Shape(_)));
}

#[test]
fn test_undeclared_node_type() {
    let err = load(r#"{ "root": { "type": "Ghost" } }"#).unwrap_err();
    assert!(matches!(err, SceneError::UnknownType(name) if name == "Ghost"));
}

#[test]
fn test_undeclared_style_on_a_node() {
    let doc = r#"{
      "types": { "Knob": {} },
      "root": { "type": "Knob", "style": "Nope" }
    }"#;
    let err = load(doc).unwrap_err();
    assert!(matches!(err, SceneError::UnknownStyle(name) if name == "Nope"));
}

#[test]
fn test_unresolvable_extends() {
    let doc = r#"{
      "types": { "Knob": { "extends": "Ghost" } },
      "root": { "type": "Knob" }
    }"#;
    let err = load(doc).unwrap_err();
    assert!(matches!(err, SceneError::UnknownBase(_)));
}

#[test]
fn test_cyclic_extends() {
    let doc = r#"{
      "types": {
        "A": { "extends": "B" },
        "B": { "extends": "A" }
      },
      "root": { "type": "A" }
    }"#;
    let err = load(doc).unwrap_err();
    assert!(matches!(err, SceneError::UnknownBase(_)));
}

#[test]
fn test_cyclic_styles() {
    let doc = r#"{
      "types": { "Knob": {} },
      "styles": { "A": "B", "B": "A" },
      "root": { "type": "Knob" }
    }"#;
    let err = load(doc).unwrap_err();
    assert!(matches!(err, SceneError::UnknownStyle(_)));
}

#[test]
fn test_types_section_must_be_an_object() {
    let doc = r#"{ "types": [1, 2], "root": { "type": "Knob" } }"#;
    let err = load(doc).unwrap_err();
    assert!(matches!(err, SceneError::Shape(_)));
}
