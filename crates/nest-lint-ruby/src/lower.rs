//! Lowering from the Tree-sitter Ruby tree into the nest-lint syntax model.

use nest_lint_core::syntax::{
    CompoundName, Definition, DefinitionKind, Node as SyntaxNode, OtherNode, Program, Span,
};
use tracing::debug;
use tree_sitter::Node;

/// Lowers the root `program` node.
pub(crate) fn program(root: Node<'_>, src: &[u8]) -> Program {
    Program::new(children(root, src, &[]))
}

fn span(node: Node<'_>) -> Span {
    Span::new(node.start_byte(), node.end_byte())
}

/// Lowers the named children of `node`, skipping comments and the nodes in
/// `skip`. `body_statement` wrappers are flattened into their statements.
fn children(node: Node<'_>, src: &[u8], skip: &[usize]) -> Vec<SyntaxNode> {
    let mut lowered = Vec::new();
    let mut cursor = node.walk();
    for child in node.named_children(&mut cursor) {
        if child.is_extra() || skip.contains(&child.id()) {
            continue;
        }
        if child.kind() == "body_statement" {
            lowered.extend(children(child, src, &[]));
        } else {
            lowered.push(lower(child, src));
        }
    }
    lowered
}

fn lower(node: Node<'_>, src: &[u8]) -> SyntaxNode {
    match node.kind() {
        "class" => definition(node, src, DefinitionKind::Class),
        "module" => definition(node, src, DefinitionKind::Module),
        _ => other(node, src, &[]),
    }
}

fn other(node: Node<'_>, src: &[u8], skip: &[usize]) -> SyntaxNode {
    SyntaxNode::Other(OtherNode {
        kind: node.kind().to_string(),
        span: span(node),
        children: children(node, src, skip),
    })
}

fn definition(node: Node<'_>, src: &[u8], kind: DefinitionKind) -> SyntaxNode {
    let name_node = node.child_by_field_name("name");
    let superclass_node = node.child_by_field_name("superclass");

    let skip: Vec<usize> = name_node
        .iter()
        .chain(superclass_node.iter())
        .map(Node::id)
        .collect();

    let Some((name_node, name)) =
        name_node.and_then(|n| constant_path(n, src).map(|name| (n, name)))
    else {
        debug!(
            "Skipping {kind} with non-constant name at byte {}",
            node.start_byte()
        );
        return other(node, src, &skip);
    };

    let superclass = superclass_node
        .and_then(first_named)
        .and_then(|expr| constant_path(expr, src));

    SyntaxNode::Definition(Definition {
        kind,
        name,
        superclass,
        body: children(node, src, &skip),
        span: span(node),
        name_span: span(name_node),
    })
}

fn first_named(node: Node<'_>) -> Option<Node<'_>> {
    let mut cursor = node.walk();
    let first = node.named_children(&mut cursor).find(|c| !c.is_extra());
    first
}

/// Resolves `Foo` or `Foo::Bar::Baz` into a name.
///
/// Returns `None` for anything that is not a chain of constants, including
/// top-level anchored paths like `::Foo` and dynamic scopes like `foo::Bar`.
fn constant_path(node: Node<'_>, src: &[u8]) -> Option<CompoundName> {
    let mut segments = Vec::new();
    collect_segments(node, src, &mut segments)?;
    CompoundName::new(segments)
}

fn collect_segments(node: Node<'_>, src: &[u8], out: &mut Vec<String>) -> Option<()> {
    match node.kind() {
        "constant" => {
            out.push(node.utf8_text(src).ok()?.to_owned());
            Some(())
        }
        "scope_resolution" => {
            let scope = node.child_by_field_name("scope")?;
            let name = node.child_by_field_name("name")?;
            if name.kind() != "constant" {
                return None;
            }
            collect_segments(scope, src, out)?;
            out.push(name.utf8_text(src).ok()?.to_owned());
            Some(())
        }
        _ => None,
    }
}
