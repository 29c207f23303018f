//! Dump the parsed structure of a selector query

use std::fmt::Write;

use serde_json::Value as Json;

use crate::ast::{CombinatorKind, FilterKind, Selector, SimpleSelectorKind};
use crate::parse_query;

/// Options for the inspect command
#[derive(Debug, Clone, Default)]
pub struct InspectOptions {
    /// The selector query to inspect
    pub query: String,
    /// Report as JSON instead of indented text
    pub json: bool,
}

/// Result of an inspect operation
#[derive(Debug)]
pub enum InspectResult {
    /// Indented text report
    Text(String),
    /// Structured JSON report
    Json(Json),
}

/// Parse a query and report its structure. Queries that fail validation
/// parse to zero selectors, which the report shows as-is.
pub fn execute_inspect(options: &InspectOptions) -> InspectResult {
    let selectors = parse_query(&options.query);
    if options.json {
        InspectResult::Json(report_json(&options.query, &selectors))
    } else {
        InspectResult::Text(report_text(&options.query, &selectors))
    }
}

fn report_text(query: &str, selectors: &[Selector]) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "query: {}", query);
    let _ = writeln!(out, "{} selector(s)", selectors.len());

    for selector in selectors {
        let _ = writeln!(out, "selector: {}", selector.query);
        for (index, simple) in selector.simple_selectors.iter().enumerate() {
            if index > 0 {
                if let Some(combinator) = selector.combinators.get(index - 1) {
                    let _ = writeln!(
                        out,
                        "  combinator '{}' ({})",
                        combinator.symbol,
                        combinator_name(combinator.kind)
                    );
                }
            }
            let _ = writeln!(
                out,
                "  {} '{}'",
                simple_name(simple.kind),
                simple.main_token.text
            );
            for filter in &simple.filters {
                let _ = writeln!(
                    out,
                    "    filter '{}' ({})",
                    filter.query,
                    filter_name(filter.kind)
                );
            }
        }
    }
    out
}

fn report_json(query: &str, selectors: &[Selector]) -> Json {
    let mut report = serde_json::Map::new();
    report.insert("query".to_string(), Json::String(query.to_string()));

    let mut selector_list = Vec::with_capacity(selectors.len());
    for selector in selectors {
        let mut entry = serde_json::Map::new();
        entry.insert("text".to_string(), Json::String(selector.query.clone()));

        let simples = selector
            .simple_selectors
            .iter()
            .map(|simple| {
                let mut obj = serde_json::Map::new();
                obj.insert(
                    "kind".to_string(),
                    Json::String(simple_name(simple.kind).to_string()),
                );
                obj.insert(
                    "main".to_string(),
                    Json::String(simple.main_token.text.clone()),
                );
                let filters = simple
                    .filters
                    .iter()
                    .map(|filter| {
                        let mut f = serde_json::Map::new();
                        f.insert(
                            "kind".to_string(),
                            Json::String(filter_name(filter.kind).to_string()),
                        );
                        f.insert("text".to_string(), Json::String(filter.query.clone()));
                        Json::Object(f)
                    })
                    .collect();
                obj.insert("filters".to_string(), Json::Array(filters));
                Json::Object(obj)
            })
            .collect();
        entry.insert("simples".to_string(), Json::Array(simples));

        let combinators = selector
            .combinators
            .iter()
            .map(|combinator| {
                let mut c = serde_json::Map::new();
                c.insert(
                    "kind".to_string(),
                    Json::String(combinator_name(combinator.kind).to_string()),
                );
                c.insert(
                    "symbol".to_string(),
                    Json::String(combinator.symbol.to_string()),
                );
                Json::Object(c)
            })
            .collect();
        entry.insert("combinators".to_string(), Json::Array(combinators));

        selector_list.push(Json::Object(entry));
    }
    report.insert("selectors".to_string(), Json::Array(selector_list));
    Json::Object(report)
}

fn simple_name(kind: SimpleSelectorKind) -> &'static str {
    match kind {
        SimpleSelectorKind::Universal => "universal",
        SimpleSelectorKind::Element => "element",
    }
}

fn filter_name(kind: FilterKind) -> &'static str {
    match kind {
        FilterKind::Style => "style",
        FilterKind::Name => "name",
        FilterKind::Property => "property",
        FilterKind::Unsupported => "unsupported",
    }
}

fn combinator_name(kind: CombinatorKind) -> &'static str {
    match kind {
        CombinatorKind::Descendant => "descendant",
        CombinatorKind::Child => "child",
        CombinatorKind::Adjacent => "adjacent",
    }
}
