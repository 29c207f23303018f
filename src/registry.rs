use std::collections::HashMap;
use std::error::Error;
use std::fmt;
use std::sync::LazyLock;

use regex::Regex;

use crate::node::PropertyError;
use crate::value::PropertyValue;

static IDENTIFIER: LazyLock<Regex> =
    LazyLock::new(|| Regex::new("^[a-zA-Z][a-zA-Z0-9]*$").unwrap());

/// Opaque tag of a registered node type. Minted by [`TypeRegistry`];
/// every node carries one, and element matching is membership in the
/// type's precomputed ancestor set.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TypeId(usize);

/// Accessor registered for a type member; reads a value off any node.
pub type Getter<N> = Box<dyn Fn(&N) -> Result<Option<PropertyValue>, PropertyError>>;

/// Errors raised while registering types or members.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RegistryError {
    /// Fully-qualified names are dot-separated identifiers with at least
    /// two segments, e.g. `controls.Button`.
    InvalidTypeName(String),

    /// A type with this fully-qualified name already exists.
    DuplicateTypeName(String),

    /// Member names are plain identifiers. `_` in particular is reserved
    /// as the type/member separator inside property descriptors.
    InvalidMemberName(String),

    /// The given tag was not minted by this registry.
    UnknownType,
}

impl fmt::Display for RegistryError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RegistryError::InvalidTypeName(name) => {
                write!(f, "invalid type name '{}': expected dot-separated identifiers", name)
            }
            RegistryError::DuplicateTypeName(name) => {
                write!(f, "type '{}' is already registered", name)
            }
            RegistryError::InvalidMemberName(name) => {
                write!(f, "invalid member name '{}': expected an identifier", name)
            }
            RegistryError::UnknownType => write!(f, "unknown type tag"),
        }
    }
}

impl Error for RegistryError {}

struct TypeEntry<N> {
    full_name: String,
    /// This type plus every base, nearest first
    ancestors: Vec<TypeId>,
    members: HashMap<String, Getter<N>>,
}

/// The engine's knowledge of host node types.
///
/// Hosts register every queryable type once at startup: its
/// fully-qualified name, its base type, and accessors for the members
/// reachable through `Type_Member` descriptors. Element selectors
/// resolve short names against this registry and match by ancestor-tag
/// membership, so no type introspection happens during a query.
///
/// # Examples
///
/// ```
/// use sceneq::TypeRegistry;
/// # use sceneq::SceneNode;
///
/// let mut types: TypeRegistry<SceneNode> = TypeRegistry::new();
/// let control = types.register("demo.Control", None).unwrap();
/// let button = types.register("demo.Button", Some(control)).unwrap();
///
/// assert_eq!(types.resolve_short_name("Button"), Some(button));
/// assert!(types.is_instance(button, control));
/// assert!(!types.is_instance(control, button));
/// ```
pub struct TypeRegistry<N> {
    types: Vec<TypeEntry<N>>,
}

impl<N> TypeRegistry<N> {
    pub fn new() -> Self {
        TypeRegistry { types: Vec::new() }
    }

    /// Register a node type under its fully-qualified name, optionally
    /// deriving from an already registered base.
    pub fn register(&mut self, full_name: &str, base: Option<TypeId>) -> Result<TypeId, RegistryError> {
        if !is_full_name(full_name) {
            return Err(RegistryError::InvalidTypeName(full_name.to_string()));
        }
        if self.types.iter().any(|entry| entry.full_name == full_name) {
            return Err(RegistryError::DuplicateTypeName(full_name.to_string()));
        }

        let id = TypeId(self.types.len());
        let mut ancestors = vec![id];
        if let Some(base) = base {
            let entry = self.types.get(base.0).ok_or(RegistryError::UnknownType)?;
            ancestors.extend(entry.ancestors.iter().copied());
        }

        self.types.push(TypeEntry {
            full_name: full_name.to_string(),
            ancestors,
            members: HashMap::new(),
        });
        Ok(id)
    }

    /// Attach a member accessor to a type. Registering the same member
    /// again replaces the getter.
    pub fn register_member(
        &mut self,
        type_id: TypeId,
        member: &str,
        getter: Getter<N>,
    ) -> Result<(), RegistryError> {
        if !IDENTIFIER.is_match(member) {
            return Err(RegistryError::InvalidMemberName(member.to_string()));
        }
        let entry = self.types.get_mut(type_id.0).ok_or(RegistryError::UnknownType)?;
        entry.members.insert(member.to_string(), getter);
        Ok(())
    }

    /// Resolve an element short name: the first registered type whose
    /// fully-qualified name ends with `.name`.
    pub fn resolve_short_name(&self, name: &str) -> Option<TypeId> {
        let suffix = format!(".{name}");
        self.types
            .iter()
            .position(|entry| entry.full_name.ends_with(&suffix))
            .map(TypeId)
    }

    /// True when `node_type` is `target` or one of its subtypes.
    pub fn is_instance(&self, node_type: TypeId, target: TypeId) -> bool {
        self.types
            .get(node_type.0)
            .is_some_and(|entry| entry.ancestors.contains(&target))
    }

    /// Look up a member accessor on exactly the given type; base types
    /// are not consulted.
    pub fn member(&self, type_id: TypeId, member: &str) -> Option<&Getter<N>> {
        self.types.get(type_id.0).and_then(|entry| entry.members.get(member))
    }

    /// Fully-qualified name of a registered type.
    pub fn full_name(&self, type_id: TypeId) -> Option<&str> {
        self.types.get(type_id.0).map(|entry| entry.full_name.as_str())
    }

    pub fn len(&self) -> usize {
        self.types.len()
    }

    pub fn is_empty(&self) -> bool {
        self.types.is_empty()
    }
}

impl<N> Default for TypeRegistry<N> {
    fn default() -> Self {
        TypeRegistry::new()
    }
}

impl<N> fmt::Debug for TypeRegistry<N> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let names: Vec<&str> = self.types.iter().map(|entry| entry.full_name.as_str()).collect();
        f.debug_struct("TypeRegistry").field("types", &names).finish()
    }
}

fn is_full_name(name: &str) -> bool {
    let segments: Vec<&str> = name.split('.').collect();
    segments.len() >= 2 && segments.iter().all(|segment| IDENTIFIER.is_match(segment))
}

#[test]
fn test_short_name_resolution_is_suffix_based() {
    let mut types: TypeRegistry<()> = TypeRegistry::new();
    let button = types.register("toolkit.controls.Button", None).unwrap();
    assert_eq!(types.resolve_short_name("Button"), Some(button));
    assert_eq!(types.resolve_short_name("controls"), None);
    assert_eq!(types.resolve_short_name("utton"), None);
}

#[test]
fn test_underscore_members_are_rejected() {
    let mut types: TypeRegistry<()> = TypeRegistry::new();
    let grid = types.register("toolkit.Grid", None).unwrap();
    let err = types
        .register_member(grid, "Row_Span", Box::new(|_| Ok(None)))
        .unwrap_err();
    assert_eq!(err, RegistryError::InvalidMemberName("Row_Span".to_string()));
}
