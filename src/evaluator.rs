use std::error::Error;
use std::fmt;

use tracing::{debug, trace};

use crate::ast::{
    Combinator, CombinatorKind, FilterKind, FilterSelector, Selector, SimpleSelector,
    SimpleSelectorKind,
};
use crate::lexer::VALUE_DELIMITERS;
use crate::node::{PropertyError, UiNode, descendants};
use crate::nodeset::NodeSet;
use crate::parser;
use crate::registry::{Getter, TypeRegistry};
use crate::style::StyleResolver;
use crate::value::{CompareOp, PropertyValue};

/// Everything a query needs from the host besides the tree itself.
///
/// Carried explicitly through every execution step; the engine keeps no
/// global state, so contexts can be built per query or shared freely.
pub struct QueryContext<'a, N> {
    pub types: &'a TypeRegistry<N>,
    pub styles: &'a dyn StyleResolver,
}

/// Error raised when a host collaborator fails mid-query.
///
/// Malformed queries and unresolvable names never produce this; they
/// degrade to empty results.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum QueryError {
    /// A host getter failed while a property filter read a node
    PropertyRead(PropertyError),
}

impl fmt::Display for QueryError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            QueryError::PropertyRead(err) => write!(f, "query execution failed: {}", err),
        }
    }
}

impl Error for QueryError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            QueryError::PropertyRead(err) => Some(err),
        }
    }
}

impl From<PropertyError> for QueryError {
    fn from(err: PropertyError) -> Self {
        QueryError::PropertyRead(err)
    }
}

/// Run a query against the subtree below `root`.
///
/// Results concatenate per comma-separated selector; within one selector
/// stage the order is document (pre-order) order and duplicates are
/// removed, but a node matched by several comma branches appears once
/// per branch. The root itself is never a candidate.
///
/// # Examples
///
/// ```
/// use sceneq::{NodeSpec, QueryContext, StyleSheet, TypeRegistry, search};
///
/// let mut types = TypeRegistry::new();
/// let panel = types.register("demo.Panel", None).unwrap();
/// let button = types.register("demo.Button", None).unwrap();
///
/// let root = NodeSpec::container(panel, "Root")
///     .child(NodeSpec::leaf(button, "Ok"))
///     .child(NodeSpec::leaf(button, "Cancel"))
///     .build();
///
/// let styles = StyleSheet::new();
/// let ctx = QueryContext { types: &types, styles: &styles };
///
/// let found = search(&root, "Button#Ok", &ctx).unwrap();
/// assert_eq!(found.len(), 1);
/// ```
pub fn search<N: UiNode>(
    root: &N,
    full_query: &str,
    ctx: &QueryContext<'_, N>,
) -> Result<NodeSet<N>, QueryError> {
    let selectors = parser::parse_query(full_query);
    debug!(query = %full_query, selectors = selectors.len(), "running query");

    let mut results = NodeSet::new();
    for selector in &selectors {
        results.extend(execute_selector(selector, root, ctx)?);
    }

    debug!(query = %full_query, matches = results.len(), "query finished");
    Ok(results)
}

/// Execute one selector: seed with the full subtree, then fold the
/// simple selectors and combinators left to right.
fn execute_selector<N: UiNode>(
    selector: &Selector,
    root: &N,
    ctx: &QueryContext<'_, N>,
) -> Result<NodeSet<N>, QueryError> {
    if selector.simple_selectors.is_empty() {
        return Ok(NodeSet::new());
    }

    let mut current = descendants(root);
    trace!(selector = %selector.query, seed = current.len(), "selector seed");

    for index in 0..selector.simple_selectors.len() {
        if index == 0 {
            current = execute_simple(&selector.simple_selectors[0], &current, ctx)?;
            continue;
        }

        let combinator = &selector.combinators[index - 1];
        current = execute_combinator(combinator, &current);

        if combinator.kind == CombinatorKind::Adjacent {
            // Sibling narrowing keeps both sides of the `+`.
            let mut joined =
                execute_simple(&selector.simple_selectors[index - 1], &current, ctx)?;
            joined.extend(execute_simple(
                &selector.simple_selectors[index],
                &current,
                ctx,
            )?);
            current = joined;
        } else {
            current = execute_simple(&selector.simple_selectors[index], &current, ctx)?;
        }
    }

    Ok(current)
}

/// Execute one simple selector: the main token narrows by type (or not
/// at all for `*`), then each filter narrows further.
fn execute_simple<N: UiNode>(
    simple: &SimpleSelector,
    candidates: &NodeSet<N>,
    ctx: &QueryContext<'_, N>,
) -> Result<NodeSet<N>, QueryError> {
    let mut matched = match simple.kind {
        SimpleSelectorKind::Universal => candidates.clone(),
        SimpleSelectorKind::Element => {
            match ctx.types.resolve_short_name(&simple.main_token.text) {
                Some(type_id) => candidates.filter_by_type(type_id, ctx.types),
                None => {
                    trace!(element = %simple.main_token.text, "unknown element type");
                    NodeSet::new()
                }
            }
        }
    };

    for filter in &simple.filters {
        matched = execute_filter(filter, &matched, ctx)?;
    }

    trace!(simple = %simple.query, matched = matched.len(), "simple selector");
    Ok(matched)
}

/// Execute one filter clause against the current candidates.
fn execute_filter<N: UiNode>(
    filter: &FilterSelector,
    candidates: &NodeSet<N>,
    ctx: &QueryContext<'_, N>,
) -> Result<NodeSet<N>, QueryError> {
    // A lone delimiter has nothing to say; it matches nothing.
    if filter.tokens.len() < 2 {
        return Ok(NodeSet::new());
    }

    match filter.kind {
        FilterKind::Style => Ok(filter_by_style(filter, candidates, ctx)),
        FilterKind::Name => Ok(filter_by_name(filter, candidates)),
        FilterKind::Property => filter_by_property(filter, candidates, ctx),
        FilterKind::Unsupported => Ok(NodeSet::new()),
    }
}

fn filter_by_style<N: UiNode>(
    filter: &FilterSelector,
    candidates: &NodeSet<N>,
    ctx: &QueryContext<'_, N>,
) -> NodeSet<N> {
    let style_name = &filter.tokens[1].text;
    let Some(target) = ctx.styles.resolve(style_name) else {
        trace!(style = %style_name, "unknown style");
        return NodeSet::new();
    };

    candidates
        .iter()
        .filter(|node| {
            node.style()
                .is_some_and(|own| ctx.styles.derives_from(own, target))
        })
        .cloned()
        .collect()
}

fn filter_by_name<N: UiNode>(filter: &FilterSelector, candidates: &NodeSet<N>) -> NodeSet<N> {
    let name = &filter.tokens[1].text;
    candidates
        .iter()
        .filter(|node| node.name() == *name)
        .cloned()
        .collect()
}

/// Execute a property filter: resolve the operator, split descriptor
/// from literal, and compare every candidate's value.
fn filter_by_property<N: UiNode>(
    filter: &FilterSelector,
    candidates: &NodeSet<N>,
    ctx: &QueryContext<'_, N>,
) -> Result<NodeSet<N>, QueryError> {
    let expression = property_expression(filter);

    match resolve_compare_op(&expression) {
        None => {
            let reader = resolve_reader(&expression, ctx);
            let mut matched = NodeSet::new();
            for node in candidates {
                if let Some(value) = reader.read(node)? {
                    if !value.is_default() {
                        matched.push(node.clone());
                    }
                }
            }
            Ok(matched)
        }
        Some((symbol, op)) => {
            let parts: Vec<&str> = expression.split(symbol).collect();
            if parts.len() != 2 {
                trace!(expression = %expression, "malformed property expression");
                return Ok(NodeSet::new());
            }

            let reader = resolve_reader(parts[0], ctx);
            let literal = parts[1];
            let mut matched = NodeSet::new();
            for node in candidates {
                if let Some(value) = reader.read(node)? {
                    if value.matches(op, literal) {
                        matched.push(node.clone());
                    }
                }
            }
            Ok(matched)
        }
    }
}

/// Concatenate the clause's tokens, drop the brackets, and shrink the
/// two-character operators to their single-character forms.
fn property_expression(filter: &FilterSelector) -> String {
    let text: String = filter
        .tokens
        .iter()
        .map(|token| token.text.as_str())
        .collect();

    text.replace(['[', ']'], "")
        .replace("!=", "!")
        .replace("^=", "^")
        .replace("$=", "$")
        .replace("~=", "~")
}

/// Find the comparison operator: scan for `=` `!` `^` `$` `~` in
/// priority order; the first symbol present wins. The expression is
/// split on that symbol only, so literals may contain the others.
fn resolve_compare_op(expression: &str) -> Option<(char, CompareOp)> {
    VALUE_DELIMITERS
        .iter()
        .find(|symbol| expression.contains(**symbol))
        .and_then(|symbol| CompareOp::from_symbol(*symbol).map(|op| (*symbol, op)))
}

/// How a property descriptor reads its value off a node.
enum PropertyReader<'a, N> {
    /// `Type_Member` descriptor resolved to a registered accessor; reads
    /// through it for every candidate, whatever the candidate's type
    Attached(&'a Getter<N>),
    /// Anything else falls back to the node's own property by name
    Own(&'a str),
}

impl<N: UiNode> PropertyReader<'_, N> {
    fn read(&self, node: &N) -> Result<Option<PropertyValue>, PropertyError> {
        match self {
            PropertyReader::Attached(getter) => getter(node),
            PropertyReader::Own(name) => node.property(name),
        }
    }
}

/// Resolve a property descriptor. `Type_Member` with exactly two parts,
/// a known type, and a registered member reads through the accessor
/// table; everything else uses the descriptor verbatim as an own
/// property name.
fn resolve_reader<'a, N>(descriptor: &'a str, ctx: &QueryContext<'a, N>) -> PropertyReader<'a, N> {
    let parts: Vec<&str> = descriptor.split('_').collect();
    if let [type_name, member] = parts.as_slice()
        && let Some(type_id) = ctx.types.resolve_short_name(type_name)
        && let Some(getter) = ctx.types.member(type_id, member)
    {
        return PropertyReader::Attached(getter);
    }
    PropertyReader::Own(descriptor)
}

/// Execute one combinator step. Output is de-duplicated with first
/// occurrences kept in order.
fn execute_combinator<N: UiNode>(combinator: &Combinator, candidates: &NodeSet<N>) -> NodeSet<N> {
    let mut next = NodeSet::new();

    match combinator.kind {
        CombinatorKind::Descendant => {
            for node in candidates {
                next.extend(descendants(node));
            }
        }
        CombinatorKind::Child => {
            for node in candidates {
                if node.is_container() {
                    next.extend(node.children());
                }
            }
        }
        CombinatorKind::Adjacent => {
            for node in candidates {
                if let Some(parent) = node.parent()
                    && parent.is_container()
                {
                    next.extend(parent.children());
                }
            }
            // The matches themselves stay in play alongside their
            // siblings.
            next.extend(candidates.clone());
        }
    }

    let result = next.dedup();
    trace!(
        combinator = ?combinator.kind,
        input = candidates.len(),
        output = result.len(),
        "combinator"
    );
    result
}
