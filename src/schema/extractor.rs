//! Best-effort extraction of the API surface from the documentation page
//!
//! The page is not meant for machines, so everything here leans on its
//! current layout:
//!
//! - Each `table.table` and each `ul` belongs to the nearest `h4` found by
//!   walking back through its preceding siblings. Paragraphs passed on the
//!   way provide the description; the one directly under the heading wins.
//! - Titles starting with a lowercase letter are methods, the rest are
//!   data types.
//! - A `ul` declares a union only when its heading is a single word and
//!   every linked entry starts with an uppercase letter.
//! - A single-word lowercase `h4` with no table before the next heading is
//!   a method without parameters (`getMe`, `logOut`).
//!
//! Blocks that do not fit are skipped silently (logged at debug level), so
//! a layout change degrades the output rather than failing the run.

use super::rewrite::{infer_response, rewrite_type};
use super::types::{ApiSchema, Field, Item, OneOfType};
use crate::error::{Error, Result};
use regex::Regex;
use scraper::{ElementRef, Html, Selector};
use std::sync::LazyLock;
use tracing::debug;

/// Field descriptions marking the field as optional (two-column tables)
static OPTIONAL_MARK: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"(?i)optional\.").unwrap());

/// Leading `Optional.` removed from field descriptions
static OPTIONAL_PREFIX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)^Optional\s*.\s*").unwrap());

/// Heading found above a table or list
#[derive(Debug, Clone, PartialEq, Eq)]
struct Heading {
    title: String,
    anchor: Option<String>,
    description: Option<String>,
}

/// Extractor over one parsed documentation page
pub struct Extractor {
    document: Html,
    table: Selector,
    row: Selector,
    cell: Selector,
    list: Selector,
    link: Selector,
    h4: Selector,
}

impl Extractor {
    /// Parse a documentation page
    pub fn from_html(html: &str) -> Result<Self> {
        Ok(Self {
            document: Html::parse_document(html),
            table: parse_selector("table.table")?,
            row: parse_selector("tbody tr")?,
            cell: parse_selector("td")?,
            list: parse_selector("ul")?,
            link: parse_selector("a")?,
            h4: parse_selector("h4")?,
        })
    }

    /// Extract items, unions and unresolved type names
    pub fn extract(&self) -> ApiSchema {
        let mut schema = ApiSchema {
            one_of_types: self.one_of_types(),
            items: self.items(),
            unknown_types: Vec::new(),
        };
        schema.resolve_unknown_types();

        debug!(
            "Extracted {} types, {} methods, {} unions, {} unknown names",
            schema.types().count(),
            schema.methods().count(),
            schema.one_of_types.len(),
            schema.unknown_types.len()
        );

        schema
    }

    fn items(&self) -> Vec<Item> {
        let mut items: Vec<Item> = self
            .document
            .select(&self.table)
            .filter_map(|table| self.item(table))
            .collect();
        items.extend(self.parameterless_methods());
        items
    }

    /// Methods documented by a heading and prose only
    fn parameterless_methods(&self) -> Vec<Item> {
        let mut methods = Vec::new();

        for heading in self.document.select(&self.h4) {
            let title = text_of(heading);
            let is_method = title.starts_with(char::is_lowercase) && !title.contains(' ');
            if !is_method {
                continue;
            }

            let mut description = None;
            let mut has_table = false;
            for sibling in heading.next_siblings().filter_map(ElementRef::wrap) {
                let element = sibling.value();
                match element.name() {
                    "h3" | "h4" => break,
                    "table" if element.classes().any(|class| class == "table") => {
                        has_table = true;
                        break;
                    }
                    "p" if description.is_none() => description = Some(text_of(sibling)),
                    _ => {}
                }
            }
            if has_table {
                continue;
            }

            let url = heading
                .select(&self.link)
                .find_map(|a| a.value().attr("href"))
                .map(|href| href.trim().to_string());
            let response = description.as_deref().and_then(infer_response);

            methods.push(Item {
                title,
                description,
                url,
                is_method: true,
                fields: Vec::new(),
                response,
            });
        }

        methods
    }

    fn item(&self, table: ElementRef<'_>) -> Option<Item> {
        let Some(heading) = self.heading(table) else {
            debug!("Skipping table without a heading");
            return None;
        };
        let first = heading.title.chars().next()?;
        let is_method = first.is_lowercase();

        let fields = table
            .select(&self.row)
            .filter_map(|row| self.field(row))
            .collect();

        let response = if is_method {
            heading.description.as_deref().and_then(infer_response)
        } else {
            None
        };

        Some(Item {
            title: heading.title,
            description: heading.description,
            url: heading.anchor,
            is_method,
            fields,
            response,
        })
    }

    fn field(&self, row: ElementRef<'_>) -> Option<Field> {
        let cells: Vec<ElementRef<'_>> = row.select(&self.cell).collect();
        if cells.len() < 2 {
            return None;
        }

        let description = text_of(*cells.last()?);
        let optional = if cells.len() > 3 {
            text_of(cells[2]) != "Yes"
        } else {
            OPTIONAL_MARK.is_match(&description)
        };

        Some(Field {
            name: text_of(cells[0]),
            ty: rewrite_type(&text_of(cells[1])),
            optional,
            description: OPTIONAL_PREFIX.replace(&description, "").into_owned(),
        })
    }

    fn one_of_types(&self) -> Vec<OneOfType> {
        self.document
            .select(&self.list)
            .filter_map(|list| self.one_of(list))
            .collect()
    }

    fn one_of(&self, list: ElementRef<'_>) -> Option<OneOfType> {
        let heading = self.heading(list)?;
        let url = heading.anchor?;
        if heading.title.is_empty() || heading.title.contains(' ') {
            return None;
        }

        let any_of: Vec<String> = list.select(&self.link).map(text_of).collect();
        let all_type_names = any_of
            .iter()
            .all(|name| name.starts_with(|c: char| c.is_ascii_uppercase()));
        if any_of.is_empty() || !all_type_names {
            debug!("List under '{}' is not a union", heading.title);
            return None;
        }

        Some(OneOfType {
            title: heading.title,
            description: heading.description,
            url,
            any_of,
        })
    }

    /// Walk back from `element` to the nearest `h4`
    fn heading(&self, element: ElementRef<'_>) -> Option<Heading> {
        let mut description = None;

        for sibling in element.prev_siblings().filter_map(ElementRef::wrap) {
            match sibling.value().name() {
                "p" => description = Some(text_of(sibling)),
                "h4" => {
                    let anchor = sibling
                        .select(&self.link)
                        .find_map(|a| a.value().attr("href"))
                        .map(|href| href.trim().to_string());
                    return Some(Heading {
                        title: text_of(sibling),
                        anchor,
                        description,
                    });
                }
                _ => {}
            }
        }

        None
    }
}

/// Extract the API schema from a documentation page
pub fn extract_schema(html: &str) -> Result<ApiSchema> {
    Ok(Extractor::from_html(html)?.extract())
}

fn parse_selector(selector: &str) -> Result<Selector> {
    Selector::parse(selector).map_err(|_| Error::selector(selector))
}

fn text_of(element: ElementRef<'_>) -> String {
    element.text().collect::<String>().trim().to_string()
}
