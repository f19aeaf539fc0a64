//! Schema types scraped from the Bot API documentation

use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::fmt;

/// A type expression inferred from documentation text
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "of", rename_all = "snake_case")]
pub enum TypeExpr {
    Number,
    String,
    Boolean,
    True,
    False,
    /// Opaque types with no structural form (uploads, external payloads)
    Any,
    /// Reference to a data type or union by name
    Named(String),
    List(Box<TypeExpr>),
    Union(Vec<TypeExpr>),
}

impl TypeExpr {
    /// Create a named type reference
    pub fn named(name: impl Into<String>) -> Self {
        Self::Named(name.into())
    }

    /// Create a list of `element`
    pub fn list(element: TypeExpr) -> Self {
        Self::List(Box::new(element))
    }

    /// Create a union, flattening nested unions and dropping duplicates.
    ///
    /// A single remaining variant is returned as-is.
    pub fn union(variants: impl IntoIterator<Item = TypeExpr>) -> Self {
        let mut flat: Vec<TypeExpr> = Vec::new();
        for variant in variants {
            let nested = match variant {
                TypeExpr::Union(inner) => inner,
                other => vec![other],
            };
            for v in nested {
                if !flat.contains(&v) {
                    flat.push(v);
                }
            }
        }

        if flat.len() == 1 {
            flat.remove(0)
        } else {
            TypeExpr::Union(flat)
        }
    }

    /// Collect the names referenced anywhere in this expression
    pub fn collect_names<'a>(&'a self, names: &mut BTreeSet<&'a str>) {
        match self {
            TypeExpr::Named(name) => {
                names.insert(name.as_str());
            }
            TypeExpr::List(element) => element.collect_names(names),
            TypeExpr::Union(variants) => {
                for variant in variants {
                    variant.collect_names(names);
                }
            }
            _ => {}
        }
    }
}

/// Renders TypeScript type syntax
impl fmt::Display for TypeExpr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TypeExpr::Number => f.write_str("number"),
            TypeExpr::String => f.write_str("string"),
            TypeExpr::Boolean => f.write_str("boolean"),
            TypeExpr::True => f.write_str("true"),
            TypeExpr::False => f.write_str("false"),
            TypeExpr::Any => f.write_str("any"),
            TypeExpr::Named(name) => f.write_str(name),
            TypeExpr::List(element) => match element.as_ref() {
                TypeExpr::Union(_) => write!(f, "({element})[]"),
                _ => write!(f, "{element}[]"),
            },
            TypeExpr::Union(variants) => {
                for (i, variant) in variants.iter().enumerate() {
                    if i > 0 {
                        f.write_str(" | ")?;
                    }
                    write!(f, "{variant}")?;
                }
                Ok(())
            }
        }
    }
}

/// One row of a documentation table
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Field {
    pub name: String,
    #[serde(rename = "type")]
    pub ty: TypeExpr,
    pub optional: bool,
    pub description: String,
}

/// A documented table: a method (lowerCamelCase title) or a data type
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Item {
    pub title: String,
    pub description: Option<String>,
    /// Anchor of the heading, e.g. `#sendmessage`
    pub url: Option<String>,
    pub is_method: bool,
    pub fields: Vec<Field>,
    /// Inferred from the description, methods only
    pub response: Option<TypeExpr>,
}

/// A union declared by a list of links under a single-word heading
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OneOfType {
    pub title: String,
    pub description: Option<String>,
    pub url: String,
    pub any_of: Vec<String>,
}

/// Everything extracted from one documentation page
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ApiSchema {
    pub items: Vec<Item>,
    pub one_of_types: Vec<OneOfType>,
    /// Names referenced but never declared, emitted as `any` aliases
    pub unknown_types: Vec<String>,
}

impl ApiSchema {
    /// Data type items
    pub fn types(&self) -> impl Iterator<Item = &Item> {
        self.items.iter().filter(|item| !item.is_method)
    }

    /// Method items
    pub fn methods(&self) -> impl Iterator<Item = &Item> {
        self.items.iter().filter(|item| item.is_method)
    }

    /// Look up an item by title
    pub fn item(&self, title: &str) -> Option<&Item> {
        self.items.iter().find(|item| item.title == title)
    }

    /// Recompute `unknown_types` from items and unions
    pub fn resolve_unknown_types(&mut self) {
        let declared: BTreeSet<&str> = self
            .items
            .iter()
            .map(|item| item.title.as_str())
            .chain(self.one_of_types.iter().map(|t| t.title.as_str()))
            .collect();

        let mut referenced = BTreeSet::new();
        for item in &self.items {
            for field in &item.fields {
                field.ty.collect_names(&mut referenced);
            }
            if let Some(response) = &item.response {
                response.collect_names(&mut referenced);
            }
        }
        for one_of in &self.one_of_types {
            referenced.extend(one_of.any_of.iter().map(String::as_str));
        }

        self.unknown_types = referenced
            .difference(&declared)
            .map(|name| (*name).to_string())
            .collect();
    }
}
