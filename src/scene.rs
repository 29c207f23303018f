//! A small reference scene tree.
//!
//! Real hosts implement [`UiNode`] over their own widget trees; this
//! module is a self-contained host used by the test suites and the CLI:
//! an immutable tree built from [`NodeSpec`]s or loaded from a JSON scene
//! document, with its types in a [`TypeRegistry`] and its styles in a
//! [`StyleSheet`].
//!
//! Scene documents look like this:
//!
//! ```text
//! {
//!   "types": {
//!     "Panel":  { "container": true },
//!     "Button": { "extends": "Panel", "container": false },
//!     "Grid":   { "extends": "Panel", "attached": ["Row"] }
//!   },
//!   "styles": { "Base": null, "Danger": "Base" },
//!   "root": {
//!     "type": "Panel", "name": "Root",
//!     "children": [
//!       { "type": "Button", "name": "Ok", "style": "Danger",
//!         "props": { "Width": 80, "Grid.Row": 2 } }
//!     ]
//!   }
//! }
//! ```
//!
//! Types register under the `scene.` namespace, so `Button` above
//! resolves as `scene.Button`. A type's `attached` members read node
//! properties stored under the dotted `Type.Member` key, which is how
//! `[Grid_Row=2]` finds the `"Grid.Row"` property.

use std::collections::HashMap;
use std::error::Error;
use std::fmt;
use std::rc::Rc;

use serde_json::Value as Json;

use crate::node::{PropertyError, UiNode};
use crate::registry::{RegistryError, TypeId, TypeRegistry};
use crate::style::{StyleId, StyleResolver, StyleSheet};
use crate::value::PropertyValue;

/// Errors raised while loading a JSON scene document.
#[derive(Debug)]
pub enum SceneError {
    /// The document or one of its sections has the wrong shape
    Shape(String),
    /// A node uses a type the document never declares
    UnknownType(String),
    /// A node or style references an undeclared style
    UnknownStyle(String),
    /// A type extends an undeclared base (or the extends chain is cyclic)
    UnknownBase(String),
    /// Type registration failed
    Registry(RegistryError),
}

impl fmt::Display for SceneError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SceneError::Shape(msg) => write!(f, "malformed scene document: {}", msg),
            SceneError::UnknownType(name) => write!(f, "undeclared node type: '{}'", name),
            SceneError::UnknownStyle(name) => write!(f, "undeclared style: '{}'", name),
            SceneError::UnknownBase(name) => {
                write!(f, "type '{}' extends a base that cannot be resolved", name)
            }
            SceneError::Registry(err) => write!(f, "type registration failed: {}", err),
        }
    }
}

impl Error for SceneError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            SceneError::Registry(err) => Some(err),
            _ => None,
        }
    }
}

impl From<RegistryError> for SceneError {
    fn from(err: RegistryError) -> Self {
        SceneError::Registry(err)
    }
}

/// Blueprint for one scene node.
///
/// # Examples
///
/// ```
/// use sceneq::{NodeSpec, PropertyValue, TypeRegistry};
/// # use sceneq::SceneNode;
///
/// let mut types: TypeRegistry<SceneNode> = TypeRegistry::new();
/// let panel = types.register("scene.Panel", None).unwrap();
/// let button = types.register("scene.Button", None).unwrap();
///
/// let root = NodeSpec::container(panel, "Root")
///     .child(
///         NodeSpec::leaf(button, "Ok")
///             .prop("Width", PropertyValue::Integer(80)),
///     )
///     .build();
///
/// assert_eq!(root.path(), "Root");
/// ```
#[derive(Debug, Clone)]
pub struct NodeSpec {
    type_id: TypeId,
    name: String,
    container: bool,
    style: Option<StyleId>,
    props: Vec<(String, PropertyValue)>,
    children: Vec<NodeSpec>,
}

impl NodeSpec {
    /// A node that takes part in child and sibling narrowing.
    pub fn container(type_id: TypeId, name: &str) -> Self {
        NodeSpec::new(type_id, name, true)
    }

    /// A node that never counts as a container, children or not.
    pub fn leaf(type_id: TypeId, name: &str) -> Self {
        NodeSpec::new(type_id, name, false)
    }

    fn new(type_id: TypeId, name: &str, container: bool) -> Self {
        NodeSpec {
            type_id,
            name: name.to_string(),
            container,
            style: None,
            props: Vec::new(),
            children: Vec::new(),
        }
    }

    pub fn style(mut self, style: StyleId) -> Self {
        self.style = Some(style);
        self
    }

    pub fn prop(mut self, name: &str, value: PropertyValue) -> Self {
        self.props.push((name.to_string(), value));
        self
    }

    pub fn child(mut self, child: NodeSpec) -> Self {
        self.children.push(child);
        self
    }

    /// Materialize the tree and hand back the root. The returned handle
    /// keeps the whole scene alive.
    pub fn build(self) -> SceneNode {
        let mut tree = SceneTree { nodes: Vec::new() };
        tree.add(self, None);
        SceneNode {
            tree: Rc::new(tree),
            index: 0,
        }
    }
}

#[derive(Debug)]
struct NodeData {
    type_id: TypeId,
    name: String,
    container: bool,
    style: Option<StyleId>,
    props: HashMap<String, PropertyValue>,
    parent: Option<usize>,
    children: Vec<usize>,
}

#[derive(Debug)]
struct SceneTree {
    nodes: Vec<NodeData>,
}

impl SceneTree {
    fn add(&mut self, spec: NodeSpec, parent: Option<usize>) -> usize {
        let index = self.nodes.len();
        self.nodes.push(NodeData {
            type_id: spec.type_id,
            name: spec.name,
            container: spec.container,
            style: spec.style,
            props: spec.props.into_iter().collect(),
            parent,
            children: Vec::new(),
        });
        for child in spec.children {
            let child_index = self.add(child, Some(index));
            self.nodes[index].children.push(child_index);
        }
        index
    }
}

/// Handle to one node of a scene. Cloning is cheap, and two handles are
/// equal exactly when they point at the same node of the same scene.
#[derive(Clone)]
pub struct SceneNode {
    tree: Rc<SceneTree>,
    index: usize,
}

impl PartialEq for SceneNode {
    fn eq(&self, other: &Self) -> bool {
        Rc::ptr_eq(&self.tree, &other.tree) && self.index == other.index
    }
}

impl fmt::Debug for SceneNode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SceneNode")
            .field("index", &self.index)
            .field("name", &self.data().name)
            .finish()
    }
}

impl SceneNode {
    fn data(&self) -> &NodeData {
        &self.tree.nodes[self.index]
    }

    fn handle(&self, index: usize) -> SceneNode {
        SceneNode {
            tree: Rc::clone(&self.tree),
            index,
        }
    }

    /// Raw property access by exact key, dotted attached keys included.
    pub fn local_property(&self, key: &str) -> Option<PropertyValue> {
        self.data().props.get(key).cloned()
    }

    /// The path of names from the root down to this node. Unnamed nodes
    /// render as their scene index.
    pub fn path(&self) -> String {
        let mut segments = Vec::new();
        let mut current = Some(self.index);
        while let Some(index) = current {
            let data = &self.tree.nodes[index];
            if data.name.is_empty() {
                segments.push(format!("[{index}]"));
            } else {
                segments.push(data.name.clone());
            }
            current = data.parent;
        }
        segments.reverse();
        segments.join("/")
    }
}

impl UiNode for SceneNode {
    fn children(&self) -> Vec<SceneNode> {
        self.data()
            .children
            .iter()
            .map(|&index| self.handle(index))
            .collect()
    }

    fn parent(&self) -> Option<SceneNode> {
        self.data().parent.map(|index| self.handle(index))
    }

    fn is_container(&self) -> bool {
        self.data().container
    }

    fn type_id(&self) -> TypeId {
        self.data().type_id
    }

    fn name(&self) -> String {
        self.data().name.clone()
    }

    fn style(&self) -> Option<StyleId> {
        self.data().style
    }

    fn property(&self, name: &str) -> Result<Option<PropertyValue>, PropertyError> {
        Ok(self.local_property(name))
    }
}

/// Load a scene document, registering its types into `types` and its
/// styles into `styles`, and hand back the root node.
pub fn load_scene(
    doc: &Json,
    types: &mut TypeRegistry<SceneNode>,
    styles: &mut StyleSheet,
) -> Result<SceneNode, SceneError> {
    let Some(root_doc) = doc.as_object() else {
        return Err(SceneError::Shape("document must be an object".to_string()));
    };

    let declared = match root_doc.get("types") {
        Some(section) => register_types(section, types)?,
        None => DeclaredTypes::default(),
    };
    if let Some(section) = root_doc.get("styles") {
        define_styles(section, styles)?;
    }

    let root_value = root_doc
        .get("root")
        .ok_or_else(|| SceneError::Shape("document is missing \"root\"".to_string()))?;
    let spec = node_spec(root_value, &declared, styles)?;
    Ok(spec.build())
}

/// Short name to tag and container flag for every declared type.
#[derive(Debug, Default)]
struct DeclaredTypes {
    ids: HashMap<String, TypeId>,
    containers: HashMap<String, bool>,
}

/// Register the `types` section. Declarations may extend each other in
/// any order, so unresolved ones are retried until nothing progresses.
fn register_types(
    section: &Json,
    types: &mut TypeRegistry<SceneNode>,
) -> Result<DeclaredTypes, SceneError> {
    let Some(map) = section.as_object() else {
        return Err(SceneError::Shape("\"types\" must be an object".to_string()));
    };

    let mut declared = DeclaredTypes::default();
    let mut pending: Vec<(&String, &Json)> = map.iter().collect();

    while !pending.is_empty() {
        let mut retry = Vec::new();
        let mut progressed = false;

        for (name, decl) in pending {
            let Some(fields) = decl.as_object() else {
                return Err(SceneError::Shape(format!(
                    "declaration of type \"{name}\" must be an object"
                )));
            };

            let base_name = match fields.get("extends") {
                None | Some(Json::Null) => None,
                Some(Json::String(base)) => Some(base.as_str()),
                Some(_) => {
                    return Err(SceneError::Shape(format!(
                        "\"extends\" of type \"{name}\" must be a string"
                    )));
                }
            };

            let base_id = match base_name {
                Some(base) => match declared.ids.get(base) {
                    Some(id) => Some(*id),
                    None => {
                        // Base not registered yet; try again next round.
                        retry.push((name, decl));
                        continue;
                    }
                },
                None => None,
            };

            let id = types.register(&format!("scene.{name}"), base_id)?;
            register_attached(fields, name, id, types)?;

            let inherited = base_name
                .and_then(|base| declared.containers.get(base).copied())
                .unwrap_or(false);
            let container = match fields.get("container") {
                None => inherited,
                Some(Json::Bool(flag)) => *flag,
                Some(_) => {
                    return Err(SceneError::Shape(format!(
                        "\"container\" of type \"{name}\" must be a boolean"
                    )));
                }
            };

            declared.ids.insert(name.clone(), id);
            declared.containers.insert(name.clone(), container);
            progressed = true;
        }

        if !progressed && !retry.is_empty() {
            return Err(SceneError::UnknownBase(retry[0].0.clone()));
        }
        pending = retry;
    }

    Ok(declared)
}

/// Register a type's attached members: each reads the dotted
/// `Type.Member` property off any node.
fn register_attached(
    decl: &serde_json::Map<String, Json>,
    type_name: &str,
    type_id: TypeId,
    types: &mut TypeRegistry<SceneNode>,
) -> Result<(), SceneError> {
    let Some(attached) = decl.get("attached") else {
        return Ok(());
    };
    let Some(members) = attached.as_array() else {
        return Err(SceneError::Shape(format!(
            "\"attached\" of type \"{type_name}\" must be an array"
        )));
    };

    for member in members {
        let Some(member) = member.as_str() else {
            return Err(SceneError::Shape(format!(
                "attached members of type \"{type_name}\" must be strings"
            )));
        };
        let key = format!("{type_name}.{member}");
        types.register_member(
            type_id,
            member,
            Box::new(move |node: &SceneNode| Ok(node.local_property(&key))),
        )?;
    }
    Ok(())
}

/// Define the `styles` section: `{ "Name": null | "BaseName" }`. Styles
/// may be declared in any order.
fn define_styles(section: &Json, styles: &mut StyleSheet) -> Result<(), SceneError> {
    let Some(map) = section.as_object() else {
        return Err(SceneError::Shape("\"styles\" must be an object".to_string()));
    };

    let mut pending: Vec<(&String, Option<&str>)> = Vec::new();
    for (name, base) in map {
        match base {
            Json::Null => {
                pending.push((name, None));
            }
            Json::String(base) => pending.push((name, Some(base.as_str()))),
            _ => {
                return Err(SceneError::Shape(format!(
                    "style \"{name}\" must map to null or a base style name"
                )));
            }
        }
    }

    while !pending.is_empty() {
        let mut retry = Vec::new();
        let mut progressed = false;

        for (name, base) in pending {
            match base {
                None => {
                    styles.define(name, None);
                    progressed = true;
                }
                Some(base_name) => match styles.resolve(base_name) {
                    Some(base_id) => {
                        styles.define(name, Some(base_id));
                        progressed = true;
                    }
                    None => retry.push((name, base)),
                },
            }
        }

        if !progressed && !retry.is_empty() {
            return Err(SceneError::UnknownStyle(retry[0].0.clone()));
        }
        pending = retry;
    }

    Ok(())
}

/// Build the spec for one node object of the document.
fn node_spec(
    value: &Json,
    declared: &DeclaredTypes,
    styles: &StyleSheet,
) -> Result<NodeSpec, SceneError> {
    let Some(obj) = value.as_object() else {
        return Err(SceneError::Shape("every node must be an object".to_string()));
    };

    let type_name = obj
        .get("type")
        .and_then(Json::as_str)
        .ok_or_else(|| SceneError::Shape("every node needs a \"type\" string".to_string()))?;
    let type_id = *declared
        .ids
        .get(type_name)
        .ok_or_else(|| SceneError::UnknownType(type_name.to_string()))?;

    let name = obj.get("name").and_then(Json::as_str).unwrap_or("");
    let container = declared.containers.get(type_name).copied().unwrap_or(false);
    let mut spec = if container {
        NodeSpec::container(type_id, name)
    } else {
        NodeSpec::leaf(type_id, name)
    };

    if let Some(style_value) = obj.get("style") {
        let style_name = style_value.as_str().ok_or_else(|| {
            SceneError::Shape(format!("style of node \"{name}\" must be a string"))
        })?;
        let style = styles
            .resolve(style_name)
            .ok_or_else(|| SceneError::UnknownStyle(style_name.to_string()))?;
        spec = spec.style(style);
    }

    if let Some(props) = obj.get("props") {
        let Some(props) = props.as_object() else {
            return Err(SceneError::Shape(format!(
                "props of node \"{name}\" must be an object"
            )));
        };
        for (key, value) in props {
            spec = spec.prop(key, PropertyValue::from_json(value));
        }
    }

    if let Some(children) = obj.get("children") {
        let Some(children) = children.as_array() else {
            return Err(SceneError::Shape(format!(
                "children of node \"{name}\" must be an array"
            )));
        };
        for child in children {
            spec = spec.child(node_spec(child, declared, styles)?);
        }
    }

    Ok(spec)
}
