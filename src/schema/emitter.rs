//! TypeScript declaration output
//!
//! Renders an [`ApiSchema`] as a namespace-wrapped declaration module:
//! fallback `any` aliases, union aliases, one interface per data type and a
//! single `API` interface keyed by method name.

use super::types::{ApiSchema, Field, Item, OneOfType};

/// Renders an [`ApiSchema`] as TypeScript declarations
#[derive(Debug, Clone)]
pub struct TypeScriptEmitter<'a> {
    docs_url: &'a str,
    namespace: &'a str,
}

impl<'a> TypeScriptEmitter<'a> {
    /// Create an emitter; anchors are appended to `docs_url`
    pub fn new(docs_url: &'a str, namespace: &'a str) -> Self {
        Self {
            docs_url,
            namespace,
        }
    }

    /// Render the whole module
    pub fn emit(&self, schema: &ApiSchema) -> String {
        let mut blocks: Vec<String> = Vec::new();

        blocks.extend(
            schema
                .unknown_types
                .iter()
                .map(|name| format!("type {name} = any;")),
        );
        blocks.extend(schema.one_of_types.iter().map(|t| self.one_of(t)));
        blocks.extend(schema.types().map(|item| self.interface(item)));
        blocks.push(self.api(schema));

        let body = indent(&blocks.join("\n\n"), 2);
        format!(
            "export default {ns};\nnamespace {ns} {{\n{body}\n}}\n",
            ns = self.namespace
        )
    }

    fn one_of(&self, one_of: &OneOfType) -> String {
        format!(
            "{}type {} = {};",
            self.comment(one_of.description.as_deref(), Some(one_of.url.as_str())),
            one_of.title,
            one_of.any_of.join(" | ")
        )
    }

    fn interface(&self, item: &Item) -> String {
        let mut out = self.comment(item.description.as_deref(), item.url.as_deref());
        out.push_str(&format!("export interface {} {{\n", item.title));
        for field in &item.fields {
            out.push_str(&indent(&field_decl(field), 2));
            out.push('\n');
        }
        out.push('}');
        out
    }

    fn api(&self, schema: &ApiSchema) -> String {
        let methods: Vec<String> = schema.methods().map(|item| self.method(item)).collect();
        if methods.is_empty() {
            return "export interface API {\n}".to_string();
        }
        format!(
            "export interface API {{\n{}\n}}",
            indent(&methods.join("\n"), 2)
        )
    }

    fn method(&self, item: &Item) -> String {
        let mut out = self.comment(item.description.as_deref(), item.url.as_deref());
        out.push_str(&format!("\"{}\": {{\n", item.title));

        if item.fields.is_empty() {
            out.push_str("  request: {};\n");
        } else {
            out.push_str("  request: {\n");
            for field in &item.fields {
                out.push_str(&indent(&field_decl(field), 4));
                out.push('\n');
            }
            out.push_str("  };\n");
        }

        if let Some(response) = &item.response {
            out.push_str(&format!("  response: {response};\n"));
        }

        out.push_str("};");
        out
    }

    fn comment(&self, text: Option<&str>, anchor: Option<&str>) -> String {
        if text.is_none() && anchor.is_none() {
            return String::new();
        }

        let mut comment = String::from("/**\n");
        if let Some(text) = text {
            comment.push_str(&format!(" * {}\n", escape_comment(text)));
        }
        if let Some(anchor) = anchor {
            comment.push_str(&format!(" * @url {}{anchor}\n", self.docs_url));
        }
        comment.push_str(" */\n");
        comment
    }
}

fn field_decl(field: &Field) -> String {
    let marker = if field.optional { "?" } else { "" };
    let decl = format!("{}{marker}: {};", field.name, field.ty);
    if field.description.is_empty() {
        decl
    } else {
        format!("/** {} */\n{decl}", escape_comment(&field.description))
    }
}

fn escape_comment(text: &str) -> String {
    text.replace("*/", "*\\/").replace('\n', " ")
}

/// Indent every non-empty line by `n` spaces
fn indent(text: &str, n: usize) -> String {
    let pad = " ".repeat(n);
    text.lines()
        .map(|line| {
            if line.is_empty() {
                String::new()
            } else {
                format!("{pad}{line}")
            }
        })
        .collect::<Vec<_>>()
        .join("\n")
}
