// src/extract/mod.rs
use scraper::{ElementRef, Html, Selector};
use tracing::{debug, info};

use crate::{
    config::{TableLocator, TableSchema},
    error::EtlError,
    table::GdpTable,
};

/// The source page writes this in place of a missing figure.
pub const EM_DASH: char = '—';

/// Column (0-based) holding the GDP figure we keep.
const GDP_CELL: usize = 2;

struct Selectors {
    tbody: Selector,
    tr: Selector,
    td: Selector,
    link: Selector,
    heading: Selector,
}

impl Selectors {
    fn new() -> Self {
        let parse = |css: &str| Selector::parse(css).expect("static CSS selector should parse");
        Self {
            tbody: parse("tbody"),
            tr: parse("tr"),
            td: parse("td"),
            link: parse("a"),
            heading: parse("caption, th"),
        }
    }
}

/// Parse `html` and pull (country, raw GDP) rows out of the GDP table body.
///
/// Admission: the row has `<td>` cells, the first cell holds a link with
/// text, and the third cell does not contain [`EM_DASH`]. Admitted rows keep
/// their source order. Zero admitted rows gives an empty table, not an error.
#[tracing::instrument(level = "info", skip(html, schema), fields(bytes = html.len()))]
pub fn extract_gdp_table(
    html: &str,
    schema: &TableSchema,
    locator: &TableLocator,
) -> Result<GdpTable<String>, EtlError> {
    let document = Html::parse_document(html);
    let sel = Selectors::new();
    let body = locate_table_body(&document, &sel, locator)?;

    let mut table = GdpTable::new(schema.clone());
    for (idx, row) in body.select(&sel.tr).enumerate() {
        let cells: Vec<ElementRef> = row.select(&sel.td).collect();
        if cells.is_empty() {
            continue;
        }

        let Some(country) = cells[0]
            .select(&sel.link)
            .map(|a| cell_text(&a))
            .find(|text| !text.is_empty())
        else {
            continue;
        };

        let gdp_cell = cells.get(GDP_CELL).ok_or_else(|| {
            EtlError::ParseFailure(format!(
                "row {idx} ({country}) has {} cells, expected at least {}",
                cells.len(),
                GDP_CELL + 1
            ))
        })?;
        if cell_text(gdp_cell).contains(EM_DASH) {
            debug!(row = idx, %country, "no GDP figure, skipping");
            continue;
        }

        table.push(country, text_without_footnotes(gdp_cell));
    }

    info!(rows = table.len(), "extracted GDP rows");
    Ok(table)
}

fn locate_table_body<'a>(
    document: &'a Html,
    sel: &Selectors,
    locator: &TableLocator,
) -> Result<ElementRef<'a>, EtlError> {
    match locator {
        TableLocator::Position(n) => {
            let mut bodies = document.select(&sel.tbody);
            bodies.nth(*n).ok_or_else(|| {
                EtlError::ParseFailure(format!(
                    "expected at least {} table bodies, found {}",
                    n + 1,
                    document.select(&sel.tbody).count()
                ))
            })
        }
        TableLocator::Anchor(needle) => {
            let needle = needle.to_lowercase();
            document
                .select(&sel.tbody)
                .find(|body| {
                    enclosing_table(body).is_some_and(|table| {
                        table
                            .select(&sel.heading)
                            .any(|h| cell_text(&h).to_lowercase().contains(&needle))
                    })
                })
                .ok_or_else(|| {
                    EtlError::ParseFailure(format!("no table headed by {needle:?} on the page"))
                })
        }
    }
}

fn enclosing_table<'a>(element: &ElementRef<'a>) -> Option<ElementRef<'a>> {
    element
        .ancestors()
        .filter_map(ElementRef::wrap)
        .find(|e| e.value().name() == "table")
}

/// All text under `element`, trimmed.
fn cell_text(element: &ElementRef) -> String {
    element.text().collect::<String>().trim().to_string()
}

/// Cell text minus `<sup>` reference markers such as `[n 1]`.
fn text_without_footnotes(element: &ElementRef) -> String {
    fn collect(element: ElementRef, out: &mut String) {
        for child in element.children() {
            if let Some(text) = child.value().as_text() {
                out.push_str(text);
            } else if let Some(el) = ElementRef::wrap(child) {
                if el.value().name() != "sup" {
                    collect(el, out);
                }
            }
        }
    }

    let mut out = String::new();
    collect(*element, &mut out);
    out.trim().to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Two filler tables ahead of the GDP table, like the source page.
    fn page(gdp_rows: &str) -> String {
        format!(
            r#"<html><body>
<table><tbody><tr><td><a href="/x">Nav</a></td><td>1</td><td>2</td></tr></tbody></table>
<table><tbody><tr><td>filler</td></tr></tbody></table>
<table><caption>GDP (US$ million) by country</caption><tbody>
<tr><th>Country</th><th>Region</th><th>IMF</th></tr>
{gdp_rows}
</tbody></table>
</body></html>"#
        )
    }

    fn extract(html: &str) -> Result<GdpTable<String>, EtlError> {
        extract_gdp_table(html, &TableSchema::default(), &TableLocator::default())
    }

    #[test]
    fn admits_linked_row() {
        let html = page("<tr><td><a>Testland</a></td><td>99</td><td>12,345.67</td></tr>");
        let table = extract(&html).unwrap();
        assert_eq!(table.len(), 1);
        assert_eq!(table.rows[0].country, "Testland");
        assert_eq!(table.rows[0].gdp, "12,345.67");
        assert_eq!(table.schema, TableSchema::default());
    }

    #[test]
    fn skips_em_dash_rows() {
        let html = page(
            r#"<tr><td><a href="/a">Alpha</a></td><td>Europe</td><td>—</td></tr>
<tr><td><a href="/b">Beta</a></td><td>Asia</td><td>1,000</td></tr>
<tr><td><a href="/c">Gamma</a></td><td>Asia</td><td>— <sup>n 1</sup></td></tr>"#,
        );
        let table = extract(&html).unwrap();
        let countries: Vec<_> = table.rows.iter().map(|r| r.country.as_str()).collect();
        assert_eq!(countries, ["Beta"]);
    }

    #[test]
    fn skips_rows_without_link() {
        let html = page(
            r#"<tr><td>World</td><td></td><td>100,562,011</td></tr>
<tr><td><span><a href="/u">United States</a></span></td><td>Americas</td><td>26,854,599</td></tr>"#,
        );
        let table = extract(&html).unwrap();
        assert_eq!(table.len(), 1);
        assert_eq!(table.rows[0].country, "United States");
        assert_eq!(table.rows[0].gdp, "26,854,599");
    }

    #[test]
    fn drops_footnote_markers() {
        let html = page(
            r#"<tr><td><a>China</a></td><td>Asia</td><td>19,373,586<sup>[n 1]</sup></td></tr>"#,
        );
        let table = extract(&html).unwrap();
        assert_eq!(table.rows[0].gdp, "19,373,586");
    }

    #[test]
    fn keeps_source_order() {
        let html = page(
            r#"<tr><td><a>C</a></td><td></td><td>3</td></tr>
<tr><td><a>A</a></td><td></td><td>1</td></tr>
<tr><td><a>B</a></td><td></td><td>2</td></tr>"#,
        );
        let table = extract(&html).unwrap();
        let countries: Vec<_> = table.rows.iter().map(|r| r.country.as_str()).collect();
        assert_eq!(countries, ["C", "A", "B"]);
    }

    #[test]
    fn no_admitted_rows_is_empty_table() {
        let html = page(r#"<tr><td>World</td><td></td><td>—</td></tr>"#);
        let table = extract(&html).unwrap();
        assert!(table.is_empty());
        assert_eq!(table.schema.columns(), ["Country", "GDP_USD_millions"]);
    }

    #[test]
    fn missing_table_body_is_parse_failure() {
        let html = "<html><body><table><tbody><tr><td>x</td></tr></tbody></table></body></html>";
        let err = extract(html).unwrap_err();
        assert!(matches!(err, EtlError::ParseFailure(_)), "{err}");
    }

    #[test]
    fn short_linked_row_is_parse_failure() {
        let html = page(r#"<tr><td><a>Shortland</a></td><td>1</td></tr>"#);
        let err = extract(&html).unwrap_err();
        assert!(matches!(err, EtlError::ParseFailure(msg) if msg.contains("Shortland")));
    }

    #[test]
    fn anchor_locator_finds_captioned_table() {
        let html = page("<tr><td><a>Testland</a></td><td>99</td><td>5</td></tr>");
        let locator = TableLocator::Anchor("us$ million".into());
        let table = extract_gdp_table(&html, &TableSchema::default(), &locator).unwrap();
        assert_eq!(table.rows[0].country, "Testland");
    }

    #[test]
    fn unmatched_anchor_is_parse_failure() {
        let html = page("<tr><td><a>Testland</a></td><td>99</td><td>5</td></tr>");
        let locator = TableLocator::Anchor("population".into());
        let err = extract_gdp_table(&html, &TableSchema::default(), &locator).unwrap_err();
        assert!(matches!(err, EtlError::ParseFailure(_)));
    }
}
