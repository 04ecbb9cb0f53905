//! Go parser and declaration classifier.

use tree_sitter::{Node, Parser};

use crate::parsing::Declaration;
use crate::tags::{TagKind, TagScope};

/// Error type for Go parsing operations
#[derive(Debug, thiserror::Error)]
pub enum GoParseError {
    #[error("failed to set Go language: {0}")]
    LanguageSetup(String),
    #[error("failed to parse source")]
    ParseFailed,
    #[error("source contains syntax errors (first at line {line})")]
    SyntaxError { line: u32 },
}

pub struct GoParser {
    parser: Parser,
}

impl std::fmt::Debug for GoParser {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GoParser").field("language", &"Go").finish()
    }
}

impl GoParser {
    pub fn new() -> Result<Self, GoParseError> {
        let mut parser = Parser::new();
        parser
            .set_language(&tree_sitter_go::LANGUAGE.into())
            .map_err(|e| GoParseError::LanguageSetup(e.to_string()))?;

        Ok(Self { parser })
    }

    /// Parse one file's source and classify its top-level declarations.
    ///
    /// A tree containing syntax errors counts as a parse failure: the file
    /// contributes zero tags rather than tags from a half-broken tree.
    pub fn parse(&mut self, code: &str) -> Result<Vec<Declaration>, GoParseError> {
        let tree = self.parser.parse(code, None).ok_or(GoParseError::ParseFailed)?;
        let root = tree.root_node();

        if root.has_error() {
            let line = first_error_line(root).unwrap_or(1);
            return Err(GoParseError::SyntaxError { line });
        }

        let mut declarations = Vec::new();
        let mut cursor = root.walk();
        for child in root.named_children(&mut cursor) {
            match child.kind() {
                "function_declaration" => {
                    self.process_function(child, code, &mut declarations);
                }
                "method_declaration" => {
                    self.process_method(child, code, &mut declarations);
                }
                "const_declaration" => {
                    self.process_value_group(child, TagKind::Constant, code, &mut declarations);
                }
                "var_declaration" => {
                    self.process_value_group(child, TagKind::Variable, code, &mut declarations);
                }
                "type_declaration" => {
                    self.process_type_group(child, code, &mut declarations);
                }
                // Package clause, imports, comments, and grammar constructs
                // not handled yet contribute no tags.
                _ => {}
            }
        }
        Ok(declarations)
    }

    fn process_function(&self, node: Node, code: &str, out: &mut Vec<Declaration>) {
        if let Some(name) = node.child_by_field_name("name") {
            out.push(Declaration {
                name: code[name.byte_range()].to_string(),
                line: start_line(node),
                kind: TagKind::Function,
                scope: TagScope::None,
            });
        }
    }

    /// Methods are Function tags scoped `class:<ReceiverTypeName>`.
    ///
    /// The receiver list carries exactly one entry in legal Go; only the
    /// first parameter declaration is consulted.
    fn process_method(&self, node: Node, code: &str, out: &mut Vec<Declaration>) {
        let Some(name) = node.child_by_field_name("name") else {
            return;
        };
        let scope = node
            .child_by_field_name("receiver")
            .and_then(|list| {
                let mut cursor = list.walk();
                list.named_children(&mut cursor)
                    .find(|n| n.kind() == "parameter_declaration")
            })
            .and_then(|param| param.child_by_field_name("type"))
            .and_then(|ty| receiver_type_name(ty, code))
            .map_or(TagScope::None, TagScope::Class);

        out.push(Declaration {
            name: code[name.byte_range()].to_string(),
            line: start_line(node),
            kind: TagKind::Function,
            scope,
        });
    }

    /// Const and var groups: one tag per named identifier, at the
    /// identifier's own line, never the group's.
    fn process_value_group(
        &self,
        node: Node,
        kind: TagKind,
        code: &str,
        out: &mut Vec<Declaration>,
    ) {
        let mut cursor = node.walk();
        for child in node.named_children(&mut cursor) {
            match child.kind() {
                "const_spec" | "var_spec" => self.collect_value_names(child, kind, code, out),
                // Grouped `var (...)` blocks wrap their specs in a list node.
                "var_spec_list" => {
                    let mut inner = child.walk();
                    for spec in child.named_children(&mut inner) {
                        if spec.kind() == "var_spec" {
                            self.collect_value_names(spec, kind, code, out);
                        }
                    }
                }
                _ => {}
            }
        }
    }

    fn collect_value_names(&self, spec: Node, kind: TagKind, code: &str, out: &mut Vec<Declaration>) {
        let mut cursor = spec.walk();
        for name in spec.children_by_field_name("name", &mut cursor) {
            out.push(Declaration {
                name: code[name.byte_range()].to_string(),
                line: start_line(name),
                kind,
                scope: TagScope::None,
            });
        }
    }

    fn process_type_group(&self, node: Node, code: &str, out: &mut Vec<Declaration>) {
        let mut cursor = node.walk();
        for spec in node.named_children(&mut cursor) {
            if matches!(spec.kind(), "type_spec" | "type_alias") {
                self.process_type_spec(spec, code, out);
            }
        }
    }

    /// The declared type expression determines handling: struct types get a
    /// Struct tag plus Member tags for named fields, interfaces get a Class
    /// tag plus Function tags for named method signatures, anything else
    /// named gets a plain Type tag.
    fn process_type_spec(&self, spec: Node, code: &str, out: &mut Vec<Declaration>) {
        let Some(name_node) = spec.child_by_field_name("name") else {
            return;
        };
        let Some(type_node) = spec.child_by_field_name("type") else {
            return;
        };
        let type_name = &code[name_node.byte_range()];

        match type_node.kind() {
            "struct_type" => {
                out.push(Declaration {
                    name: type_name.to_string(),
                    line: start_line(type_node),
                    kind: TagKind::Struct,
                    scope: TagScope::None,
                });
                self.collect_struct_members(type_node, type_name, code, out);
            }
            "interface_type" => {
                out.push(Declaration {
                    name: type_name.to_string(),
                    line: start_line(type_node),
                    kind: TagKind::Class,
                    scope: TagScope::None,
                });
                self.collect_interface_methods(type_node, type_name, code, out);
            }
            _ => {
                out.push(Declaration {
                    name: type_name.to_string(),
                    line: start_line(type_node),
                    kind: TagKind::Type,
                    scope: TagScope::None,
                });
            }
        }
    }

    /// Every named field identifier across every field group becomes a
    /// Member tag. Embedded (anonymous) fields carry no name field and
    /// contribute nothing.
    fn collect_struct_members(
        &self,
        struct_node: Node,
        type_name: &str,
        code: &str,
        out: &mut Vec<Declaration>,
    ) {
        let mut cursor = struct_node.walk();
        for body in struct_node.named_children(&mut cursor) {
            if body.kind() != "field_declaration_list" {
                continue;
            }
            let mut fields = body.walk();
            for field in body.named_children(&mut fields) {
                if field.kind() != "field_declaration" {
                    continue;
                }
                let mut names = field.walk();
                for name in field.children_by_field_name("name", &mut names) {
                    out.push(Declaration {
                        name: code[name.byte_range()].to_string(),
                        line: start_line(name),
                        kind: TagKind::Member,
                        scope: TagScope::Struct(type_name.to_string()),
                    });
                }
            }
        }
    }

    /// Named method signatures become Function tags scoped to the
    /// interface. Embedded interface types contribute nothing.
    fn collect_interface_methods(
        &self,
        interface_node: Node,
        type_name: &str,
        code: &str,
        out: &mut Vec<Declaration>,
    ) {
        let mut cursor = interface_node.walk();
        for elem in interface_node.named_children(&mut cursor) {
            if elem.kind() != "method_elem" {
                continue;
            }
            if let Some(name) = elem.child_by_field_name("name") {
                out.push(Declaration {
                    name: code[name.byte_range()].to_string(),
                    line: start_line(name),
                    kind: TagKind::Function,
                    scope: TagScope::Class(type_name.to_string()),
                });
            }
        }
    }
}

fn start_line(node: Node) -> u32 {
    node.start_position().row as u32 + 1
}

/// Resolve the receiver's declared type to the name used in the scope
/// qualifier: one level of pointer indirection is stripped, then the
/// identifier is taken; qualified references resolve to the dotted
/// selector chain at any nesting depth.
fn receiver_type_name(node: Node, code: &str) -> Option<String> {
    let node = if node.kind() == "pointer_type" {
        node.named_child(0)?
    } else {
        node
    };
    type_expr_name(node, code)
}

fn type_expr_name(node: Node, code: &str) -> Option<String> {
    match node.kind() {
        "type_identifier" | "package_identifier" | "identifier" => {
            Some(code[node.byte_range()].to_string())
        }
        "qualified_type" => {
            let package = node.child_by_field_name("package")?;
            let name = node.child_by_field_name("name")?;
            Some(format!(
                "{}.{}",
                type_expr_name(package, code)?,
                &code[name.byte_range()]
            ))
        }
        // Type arguments do not participate in the scope name.
        "generic_type" => type_expr_name(node.child_by_field_name("type")?, code),
        "parenthesized_type" => type_expr_name(node.named_child(0)?, code),
        _ => None,
    }
}

fn first_error_line(root: Node) -> Option<u32> {
    let mut stack = vec![root];
    while let Some(node) = stack.pop() {
        if node.is_error() || node.is_missing() {
            return Some(start_line(node));
        }
        if !node.has_error() {
            continue;
        }
        let mut cursor = node.walk();
        let children: Vec<Node> = node.children(&mut cursor).collect();
        for child in children.into_iter().rev() {
            stack.push(child);
        }
    }
    None
}
