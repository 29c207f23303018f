//! Execute selector queries against a JSON scene document

use serde_json::Value as Json;

use super::CliError;
use crate::{load_scene, search, QueryContext, StyleSheet, TypeRegistry, UiNode};

/// Options for the run command
#[derive(Debug, Clone, Default)]
pub struct RunOptions {
    /// The selector query to execute
    pub query: String,
    /// Scene document JSON string
    pub scene: Option<String>,
    /// Pretty-print the output
    pub pretty: bool,
}

/// Execute a query against a scene document and report every match as a
/// JSON object carrying its type, name, and tree path.
pub fn execute_run(options: &RunOptions) -> Result<Json, CliError> {
    let scene_str = options.scene.as_ref().ok_or(CliError::NoScene)?;
    let doc: Json = serde_json::from_str(scene_str).map_err(CliError::Json)?;

    let mut types = TypeRegistry::new();
    let mut styles = StyleSheet::new();
    let root = load_scene(&doc, &mut types, &mut styles)?;

    let ctx = QueryContext {
        types: &types,
        styles: &styles,
    };
    let matches = search(&root, &options.query, &ctx)?;

    let mut report = Vec::with_capacity(matches.len());
    for node in &matches {
        let mut entry = serde_json::Map::new();
        let type_name = types
            .full_name(node.type_id())
            .map(|name| Json::String(name.to_string()))
            .unwrap_or(Json::Null);
        entry.insert("type".to_string(), type_name);
        entry.insert("name".to_string(), Json::String(node.name()));
        entry.insert("path".to_string(), Json::String(node.path()));
        report.push(Json::Object(entry));
    }
    Ok(Json::Array(report))
}
