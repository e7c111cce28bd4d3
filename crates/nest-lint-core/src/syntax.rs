//! Language-neutral syntax model consumed by rules.
//!
//! Parsers (see [`SourceParser`](crate::SourceParser)) lower their concrete
//! trees into this closed model. Rules only ever read it.

use std::fmt;

/// Half-open byte range into the source text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Span {
    /// Byte offset of the first byte.
    pub start: usize,
    /// Byte offset one past the last byte.
    pub end: usize,
}

impl Span {
    /// Creates a new span.
    #[must_use]
    pub fn new(start: usize, end: usize) -> Self {
        Self { start, end }
    }

    /// Length of the span in bytes.
    #[must_use]
    pub fn len(self) -> usize {
        self.end.saturating_sub(self.start)
    }

    /// Returns true for a zero-length span.
    #[must_use]
    pub fn is_empty(self) -> bool {
        self.len() == 0
    }

    /// Slices `source` at this span, or returns `""` when out of bounds.
    #[must_use]
    pub fn text(self, source: &str) -> &str {
        source.get(self.start..self.end).unwrap_or("")
    }
}

/// Scope path naming a definition, e.g. `FooClass::BarClass`.
///
/// Always holds at least one segment.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct CompoundName {
    segments: Vec<String>,
}

impl CompoundName {
    /// Builds a name from its segments, or `None` if there are none.
    #[must_use]
    pub fn new<I, S>(segments: I) -> Option<Self>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let segments: Vec<String> = segments.into_iter().map(Into::into).collect();
        if segments.is_empty() {
            None
        } else {
            Some(Self { segments })
        }
    }

    /// Builds a single-segment name.
    #[must_use]
    pub fn simple(segment: impl Into<String>) -> Self {
        Self {
            segments: vec![segment.into()],
        }
    }

    /// The identifier segments, outermost first.
    #[must_use]
    pub fn segments(&self) -> &[String] {
        &self.segments
    }

    /// True when the name has exactly one segment.
    #[must_use]
    pub fn is_simple(&self) -> bool {
        self.segments.len() == 1
    }

    /// True when the name spells out more than one scope level.
    #[must_use]
    pub fn is_compact(&self) -> bool {
        self.segments.len() > 1
    }

    /// Appends `inner`'s segments to this name.
    #[must_use]
    pub fn join(&self, inner: &Self) -> Self {
        let mut segments = self.segments.clone();
        segments.extend(inner.segments.iter().cloned());
        Self { segments }
    }
}

impl fmt::Display for CompoundName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.segments.join("::"))
    }
}

/// Which keyword introduced a definition.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DefinitionKind {
    /// `class Foo ... end`
    Class,
    /// `module Foo ... end`
    Module,
}

impl fmt::Display for DefinitionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Class => write!(f, "class"),
            Self::Module => write!(f, "module"),
        }
    }
}

/// A class or module definition with a statically known name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Definition {
    /// Class or module.
    pub kind: DefinitionKind,
    /// The definition's own name.
    pub name: CompoundName,
    /// Inheritance target after `<`. Only classes carry one.
    pub superclass: Option<CompoundName>,
    /// Statements of the definition body, in source order.
    pub body: Vec<Node>,
    /// The whole definition, keyword through `end`.
    pub span: Span,
    /// Just the name tokens.
    pub name_span: Span,
}

impl Definition {
    /// Returns the body's only statement, if it has exactly one.
    #[must_use]
    pub fn sole_child(&self) -> Option<&Node> {
        match self.body.as_slice() {
            [only] => Some(only),
            _ => None,
        }
    }
}

/// Any syntax node that is not a class/module definition.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OtherNode {
    /// Parser-specific kind tag (e.g. `"method"`, `"singleton_class"`).
    pub kind: String,
    /// Source range of the node.
    pub span: Span,
    /// Child nodes, in source order.
    pub children: Vec<Node>,
}

/// A statement or expression in the tree.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Node {
    /// `class` / `module` definition.
    Definition(Definition),
    /// Everything else.
    Other(OtherNode),
}

impl Node {
    /// Returns the definition if this node is one.
    #[must_use]
    pub fn as_definition(&self) -> Option<&Definition> {
        match self {
            Self::Definition(def) => Some(def),
            Self::Other(_) => None,
        }
    }

    /// Source range of the node.
    #[must_use]
    pub fn span(&self) -> Span {
        match self {
            Self::Definition(def) => def.span,
            Self::Other(other) => other.span,
        }
    }

    fn children(&self) -> &[Node] {
        match self {
            Self::Definition(def) => &def.body,
            Self::Other(other) => &other.children,
        }
    }
}

/// Root of a parsed source file.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Program {
    /// Top-level statements.
    pub nodes: Vec<Node>,
}

impl Program {
    /// Creates a program from its top-level statements.
    #[must_use]
    pub fn new(nodes: Vec<Node>) -> Self {
        Self { nodes }
    }

    /// Iterates every definition in the tree in pre-order.
    ///
    /// Bodies of definitions and children of other nodes are both walked.
    /// Each call starts a fresh traversal.
    #[must_use]
    pub fn definitions(&self) -> Definitions<'_> {
        Definitions {
            stack: vec![self.nodes.iter()],
        }
    }
}

/// Pre-order iterator over the definitions of a [`Program`].
#[derive(Debug, Clone)]
pub struct Definitions<'a> {
    stack: Vec<std::slice::Iter<'a, Node>>,
}

impl<'a> Iterator for Definitions<'a> {
    type Item = &'a Definition;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            let level = self.stack.last_mut()?;
            let Some(node) = level.next() else {
                self.stack.pop();
                continue;
            };

            let children = node.children();
            if !children.is_empty() {
                self.stack.push(children.iter());
            }

            if let Node::Definition(def) = node {
                return Some(def);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn def(kind: DefinitionKind, name: &str, body: Vec<Node>) -> Node {
        Node::Definition(Definition {
            kind,
            name: CompoundName::new(name.split("::")).unwrap(),
            superclass: None,
            body,
            span: Span::default(),
            name_span: Span::default(),
        })
    }

    fn other(kind: &str, children: Vec<Node>) -> Node {
        Node::Other(OtherNode {
            kind: kind.to_string(),
            span: Span::default(),
            children,
        })
    }

    fn names(program: &Program) -> Vec<String> {
        program.definitions().map(|d| d.name.to_string()).collect()
    }

    #[test]
    fn compound_name_requires_a_segment() {
        assert!(CompoundName::new(Vec::<String>::new()).is_none());
        let name = CompoundName::new(["FooClass", "BarClass"]).unwrap();
        assert!(name.is_compact());
        assert!(!name.is_simple());
        assert_eq!(name.to_string(), "FooClass::BarClass");
        assert!(CompoundName::simple("Foo").is_simple());
    }

    #[test]
    fn join_appends_segments() {
        let outer = CompoundName::simple("Foo");
        let inner = CompoundName::new(["Bar", "Baz"]).unwrap();
        assert_eq!(outer.join(&inner).to_string(), "Foo::Bar::Baz");
    }

    #[test]
    fn span_text_is_bounds_checked() {
        let src = "class Foo; end";
        assert_eq!(Span::new(6, 9).text(src), "Foo");
        assert_eq!(Span::new(6, 99).text(src), "");
        assert_eq!(Span::new(6, 9).len(), 3);
    }

    #[test]
    fn empty_program_yields_nothing() {
        assert_eq!(Program::default().definitions().count(), 0);
    }

    #[test]
    fn definitions_are_pre_order() {
        let program = Program::new(vec![
            def(
                DefinitionKind::Module,
                "A",
                vec![
                    def(DefinitionKind::Class, "B", vec![def(DefinitionKind::Class, "C", vec![])]),
                    other("method", vec![]),
                    def(DefinitionKind::Module, "D", vec![]),
                ],
            ),
            def(DefinitionKind::Class, "E", vec![]),
        ]);
        assert_eq!(names(&program), ["A", "B", "C", "D", "E"]);
    }

    #[test]
    fn definitions_inside_other_nodes_are_found() {
        let program = Program::new(vec![other(
            "if",
            vec![other("then", vec![def(DefinitionKind::Class, "X::Y", vec![])])],
        )]);
        assert_eq!(names(&program), ["X::Y"]);
    }

    #[test]
    fn definitions_is_restartable() {
        let program = Program::new(vec![def(DefinitionKind::Class, "A", vec![])]);
        assert_eq!(program.definitions().count(), 1);
        assert_eq!(program.definitions().count(), 1);
    }

    #[test]
    fn sole_child_requires_exactly_one_statement() {
        let Node::Definition(empty) = def(DefinitionKind::Class, "A", vec![]) else {
            unreachable!()
        };
        assert!(empty.sole_child().is_none());

        let Node::Definition(one) =
            def(DefinitionKind::Class, "A", vec![other("method", vec![])])
        else {
            unreachable!()
        };
        assert!(one.sole_child().is_some());
    }
}
