// tests/engine_tests.rs

use sceneq::{
    search, NodeSpec, PropertyError, PropertyValue, QueryContext, QueryError, SceneNode,
    StyleSheet, TypeRegistry, UiNode,
};

struct Fixture {
    root: SceneNode,
    types: TypeRegistry<SceneNode>,
    styles: StyleSheet,
}

/// A small but representative scene:
///
/// Root (Panel)
/// ├── Header (Panel)
/// │   ├── Title (Label)      Text="Hello", FontSize=14
/// │   ├── Close (Button)     .DangerButton, Width=16
/// │   └── Tools (Toolbar)
/// │       └── Help (Button)  Width=24
/// ├── Body (Grid)
/// │   ├── Ok (Button)        .BaseButton, Width=80, Grid.Row=0, IsEnabled=true
/// │   ├── Cancel (Button)    .DangerButton, Width=80, Grid.Row=0
/// │   ├── Input (TextBox)    Text="", Grid.Row=1
/// │   └── (unnamed Label)    Grid.Row=1
/// └── Footer (Panel)
///     └── Status (Label)     Text="Ready"
fn fixture() -> Fixture {
    let mut types = TypeRegistry::new();
    let control = types.register("scene.Control", None).unwrap();
    let panel = types.register("scene.Panel", Some(control)).unwrap();
    let grid = types.register("scene.Grid", Some(panel)).unwrap();
    let toolbar = types.register("scene.Toolbar", Some(control)).unwrap();
    let label = types.register("scene.Label", Some(control)).unwrap();
    let button = types.register("scene.Button", Some(control)).unwrap();
    let textbox = types.register("scene.TextBox", Some(control)).unwrap();
    types
        .register_member(
            grid,
            "Row",
            Box::new(|node: &SceneNode| Ok(node.local_property("Grid.Row"))),
        )
        .unwrap();

    let mut styles = StyleSheet::new();
    let base_button = styles.define("BaseButton", None);
    let danger = styles.define("DangerButton", Some(base_button));

    let root = NodeSpec::container(panel, "Root")
        .child(
            NodeSpec::container(panel, "Header")
                .child(
                    NodeSpec::leaf(label, "Title")
                        .prop("Text", PropertyValue::String("Hello".to_string()))
                        .prop("FontSize", PropertyValue::Integer(14)),
                )
                .child(
                    NodeSpec::leaf(button, "Close")
                        .style(danger)
                        .prop("Width", PropertyValue::Integer(16)),
                )
                .child(
                    NodeSpec::container(toolbar, "Tools").child(
                        NodeSpec::leaf(button, "Help")
                            .prop("Width", PropertyValue::Integer(24)),
                    ),
                ),
        )
        .child(
            NodeSpec::container(grid, "Body")
                .child(
                    NodeSpec::leaf(button, "Ok")
                        .style(base_button)
                        .prop("Width", PropertyValue::Integer(80))
                        .prop("Grid.Row", PropertyValue::Integer(0))
                        .prop("IsEnabled", PropertyValue::Boolean(true)),
                )
                .child(
                    NodeSpec::leaf(button, "Cancel")
                        .style(danger)
                        .prop("Width", PropertyValue::Integer(80))
                        .prop("Grid.Row", PropertyValue::Integer(0)),
                )
                .child(
                    NodeSpec::leaf(textbox, "Input")
                        .prop("Text", PropertyValue::String(String::new()))
                        .prop("Grid.Row", PropertyValue::Integer(1)),
                )
                .child(NodeSpec::leaf(label, "").prop("Grid.Row", PropertyValue::Integer(1))),
        )
        .child(
            NodeSpec::container(panel, "Footer").child(
                NodeSpec::leaf(label, "Status")
                    .prop("Text", PropertyValue::String("Ready".to_string())),
            ),
        )
        .build();

    Fixture {
        root,
        types,
        styles,
    }
}

fn run(fx: &Fixture, query: &str) -> Vec<String> {
    let ctx = QueryContext {
        types: &fx.types,
        styles: &fx.styles,
    };
    let found = search(&fx.root, query, &ctx).unwrap();
    found.iter().map(|node| node.name()).collect()
}

#[test]
fn test_universal_matches_every_descendant_in_document_order() {
    let fx = fixture();
    assert_eq!(
        run(&fx, "*"),
        vec![
            "Header", "Title", "Close", "Tools", "Help", "Body", "Ok", "Cancel", "Input", "",
            "Footer", "Status"
        ]
    );
}

#[test]
fn test_root_itself_is_never_a_candidate() {
    let fx = fixture();
    assert!(run(&fx, "#Root").is_empty());
}

#[test]
fn test_element_matches_exact_type() {
    let fx = fixture();
    assert_eq!(run(&fx, "Button"), vec!["Close", "Help", "Ok", "Cancel"]);
    assert_eq!(run(&fx, "Grid"), vec!["Body"]);
}

#[test]
fn test_element_matches_subtypes() {
    let fx = fixture();
    // Grid derives from Panel, so Body answers to both names.
    assert_eq!(run(&fx, "Panel"), vec!["Header", "Body", "Footer"]);
    // Everything derives from Control.
    assert_eq!(run(&fx, "Control"), run(&fx, "*"));
}

#[test]
fn test_unknown_element_matches_nothing() {
    let fx = fixture();
    assert!(run(&fx, "Widget").is_empty());
}

#[test]
fn test_name_filter_is_exact() {
    let fx = fixture();
    assert_eq!(run(&fx, "#Close"), vec!["Close"]);
    assert_eq!(run(&fx, "Button#Ok"), vec!["Ok"]);
    assert!(run(&fx, "Label#Close").is_empty());
    assert!(run(&fx, "#close").is_empty());
}

#[test]
fn test_style_filter_follows_the_base_chain() {
    let fx = fixture();
    assert_eq!(run(&fx, ".DangerButton"), vec!["Close", "Cancel"]);
    // DangerButton derives from BaseButton, so its wearers match too.
    assert_eq!(run(&fx, ".BaseButton"), vec!["Close", "Ok", "Cancel"]);
}

#[test]
fn test_unknown_style_matches_nothing() {
    let fx = fixture();
    assert!(run(&fx, ".Missing").is_empty());
}

#[test]
fn test_property_equal_and_not_equal() {
    let fx = fixture();
    assert_eq!(run(&fx, "[Width=80]"), vec!["Ok", "Cancel"]);
    // Nodes without the property are skipped, not counted as unequal.
    assert_eq!(run(&fx, "[Width!=80]"), vec!["Close", "Help"]);
}

#[test]
fn test_property_string_operators() {
    let fx = fixture();
    assert_eq!(run(&fx, "[Text$=lo]"), vec!["Title"]);
    assert_eq!(run(&fx, "[Text~=ell]"), vec!["Title"]);
    assert_eq!(run(&fx, "Button[Width^=8]"), vec!["Ok", "Cancel"]);
}

#[test]
fn test_bare_property_means_non_default() {
    let fx = fixture();
    // Input carries Text="" which is the string default, so it is out.
    assert_eq!(run(&fx, "[Text]"), vec!["Title", "Status"]);
    assert_eq!(run(&fx, "[IsEnabled]"), vec!["Ok"]);
}

#[test]
fn test_dangling_operator_compares_against_empty() {
    let fx = fixture();
    // "[Text~]" splits into a comparison with the empty literal, and
    // every string contains "", so the default-valued Input matches
    // here even though "[Text]" skips it.
    assert_eq!(run(&fx, "[Text~]"), vec!["Title", "Input", "Status"]);
}

#[test]
fn test_boolean_property_comparison() {
    let fx = fixture();
    assert_eq!(run(&fx, "[IsEnabled=true]"), vec!["Ok"]);
    assert!(run(&fx, "[IsEnabled=false]").is_empty());
}

#[test]
fn test_attached_property_descriptor() {
    let fx = fixture();
    assert_eq!(run(&fx, "[Grid_Row=0]"), vec!["Ok", "Cancel"]);
    assert_eq!(run(&fx, "[Grid_Row=1]"), vec!["Input", ""]);
    // Row 0 is the integer default, so the bare form only sees row 1.
    assert_eq!(run(&fx, "[Grid_Row]"), vec!["Input", ""]);
}

#[test]
fn test_unresolvable_descriptor_falls_back_to_own_property() {
    let fx = fixture();
    // "Rows" is not a registered member of Grid, so the descriptor is
    // looked up verbatim as a property name, which no node carries.
    assert!(run(&fx, "[Grid_Rows=1]").is_empty());
}

#[test]
fn test_coercion_failure_compares_as_string() {
    let fx = fixture();
    assert!(run(&fx, "[Width=abc]").is_empty());
    assert_eq!(
        run(&fx, "[Width!=abc]"),
        vec!["Close", "Help", "Ok", "Cancel"]
    );
}

#[test]
fn test_malformed_comparison_matches_nothing() {
    let fx = fixture();
    assert!(run(&fx, "[Width=80=90]").is_empty());
}

#[test]
fn test_descendant_combinator() {
    let fx = fixture();
    assert_eq!(run(&fx, "Panel Button"), vec!["Close", "Help", "Ok", "Cancel"]);
}

#[test]
fn test_child_combinator_needs_a_direct_parent() {
    let fx = fixture();
    // Help sits inside Tools, not directly under a Panel.
    assert_eq!(run(&fx, "Panel>Button"), vec!["Close", "Ok", "Cancel"]);
    assert_eq!(run(&fx, "Toolbar>Button"), vec!["Help"]);
}

#[test]
fn test_child_matches_are_a_subset_of_descendant_matches() {
    let fx = fixture();
    let child = run(&fx, "Panel>Button");
    let descendant = run(&fx, "Panel Button");
    for name in &child {
        assert!(descendant.contains(name), "{name} missing from descendants");
    }
    assert!(descendant.contains(&"Help".to_string()));
    assert!(!child.contains(&"Help".to_string()));
}

#[test]
fn test_children_of_leaves_are_nothing() {
    let fx = fixture();
    assert!(run(&fx, "Label>*").is_empty());
}

#[test]
fn test_adjacent_keeps_matches_and_adds_their_siblings() {
    let fx = fixture();
    assert_eq!(
        run(&fx, "Label+Button"),
        vec!["Title", "", "Status", "Close", "Ok", "Cancel"]
    );
}

#[test]
fn test_surplus_combinator_is_inert() {
    let fx = fixture();
    assert_eq!(run(&fx, "Grid>>Button"), run(&fx, "Grid>Button"));
    assert_eq!(run(&fx, "Grid>Button"), vec!["Ok", "Cancel"]);
}

#[test]
fn test_comma_branches_concatenate_without_dedup() {
    let fx = fixture();
    assert_eq!(run(&fx, "#Ok, #Ok"), vec!["Ok", "Ok"]);
    assert_eq!(run(&fx, "*, Button").len(), 16);
}

#[test]
fn test_search_is_a_pure_function_of_its_inputs() {
    let fx = fixture();
    let ctx = QueryContext {
        types: &fx.types,
        styles: &fx.styles,
    };
    let first = search(&fx.root, "Panel Button", &ctx).unwrap();
    let second = search(&fx.root, "Panel Button", &ctx).unwrap();
    assert_eq!(first, second);
}

#[test]
fn test_invalid_queries_match_nothing() {
    let fx = fixture();
    assert!(run(&fx, "").is_empty());
    assert!(run(&fx, "   ").is_empty());
    assert!(run(&fx, "Bütton").is_empty());
    assert!(run(&fx, "Button()").is_empty());
}

#[test]
fn test_unsupported_filter_kills_the_chain() {
    let fx = fixture();
    // "=X" parses as a filter clause of no supported kind; unlike an
    // unparseable clause it stays in the chain and matches nothing.
    assert!(run(&fx, "Button=X").is_empty());
    assert_eq!(run(&fx, "*foo"), run(&fx, "*"));
}

#[test]
fn test_getter_failure_aborts_the_query() {
    let mut fx = fixture();
    let control = fx.types.resolve_short_name("Control").unwrap();
    fx.types
        .register_member(
            control,
            "Broken",
            Box::new(|_: &SceneNode| Err(PropertyError::new("Broken", "backend offline"))),
        )
        .unwrap();

    let ctx = QueryContext {
        types: &fx.types,
        styles: &fx.styles,
    };
    let err = search(&fx.root, "*[Control_Broken=1]", &ctx).unwrap_err();
    let QueryError::PropertyRead(inner) = err;
    assert_eq!(inner.property, "Broken");
}
