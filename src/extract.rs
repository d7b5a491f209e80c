use std::sync::LazyLock;

use scraper::{ElementRef, Html, Selector};
use thiserror::Error;

static TBODY: LazyLock<Selector> = LazyLock::new(|| Selector::parse("tbody").unwrap());
static TR: LazyLock<Selector> = LazyLock::new(|| Selector::parse("tr").unwrap());
static TD: LazyLock<Selector> = LazyLock::new(|| Selector::parse("td").unwrap());
static ANCHOR: LazyLock<Selector> = LazyLock::new(|| Selector::parse("a").unwrap());

/// One parsed bank row: name plus the raw market-cap string as printed
/// in the source table. Numeric coercion happens later, in transform.
#[derive(Debug, Clone, PartialEq)]
pub struct Bank {
    pub name: String,
    pub mc_usd: String,
}

#[derive(Debug, Error)]
pub enum ExtractError {
    #[error("no <tbody> found in document")]
    NoTableBody,
    #[error("row {row}: expected cell {cell} is missing")]
    MissingCell { row: usize, cell: usize },
    #[error("row {row}: name cell has no <a> element")]
    MissingAnchor { row: usize },
    #[error("row {row}: name anchor has no title attribute")]
    UntitledAnchor { row: usize },
}

/// Extract bank rows from the first table body of the page.
///
/// Per row: the name is the `title` attribute of the anchor in the second
/// data cell, the market cap is the trimmed text of the third. Rows with
/// no `<td>` cells (the header) are skipped. Any other structural mismatch
/// is an `ExtractError` naming the offending row.
pub fn extract_banks(html: &str) -> Result<Vec<Bank>, ExtractError> {
    let doc = Html::parse_document(html);
    let body = doc.select(&TBODY).next().ok_or(ExtractError::NoTableBody)?;

    let mut banks = Vec::new();
    for (row, tr) in body.select(&TR).enumerate() {
        let cells: Vec<ElementRef> = tr.select(&TD).collect();
        if cells.is_empty() {
            continue;
        }

        let name_cell = cells
            .get(1)
            .ok_or(ExtractError::MissingCell { row, cell: 2 })?;
        let anchor = name_cell
            .select(&ANCHOR)
            .next()
            .ok_or(ExtractError::MissingAnchor { row })?;
        let name = anchor
            .value()
            .attr("title")
            .ok_or(ExtractError::UntitledAnchor { row })?
            .to_string();

        let mc_cell = cells
            .get(2)
            .ok_or(ExtractError::MissingCell { row, cell: 3 })?;
        let mc_usd = mc_cell.text().collect::<String>().trim().to_string();

        banks.push(Bank { name, mc_usd });
    }

    Ok(banks)
}

// ── Tests ──

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fixture_rows_in_source_order() {
        let html = std::fs::read_to_string("tests/fixtures/largest_banks.html").unwrap();
        let banks = extract_banks(&html).unwrap();
        assert_eq!(banks.len(), 5);
        assert_eq!(banks[0].name, "JPMorgan Chase");
        assert_eq!(banks[0].mc_usd, "432.92");
        assert_eq!(banks[1].name, "Bank of America");
        assert_eq!(banks[4].name, "HDFC Bank");
        // Surrounding whitespace stripped, non-numeric text kept as-is
        assert_eq!(banks[4].mc_usd, "N/A");
    }

    #[test]
    fn header_row_without_data_cells_is_skipped() {
        let html = r#"<table><tbody>
            <tr><th>Rank</th><th>Name</th><th>Cap</th></tr>
            <tr><td>1</td><td><a title="Foo Bank">Foo</a></td><td> 12.5 </td></tr>
        </tbody></table>"#;
        let banks = extract_banks(html).unwrap();
        assert_eq!(banks.len(), 1);
        assert_eq!(banks[0], Bank { name: "Foo Bank".into(), mc_usd: "12.5".into() });
    }

    #[test]
    fn missing_tbody_is_a_named_error() {
        let err = extract_banks("<p>not a table</p>").unwrap_err();
        assert!(matches!(err, ExtractError::NoTableBody));
    }

    #[test]
    fn row_without_anchor_is_a_named_error() {
        let html = r#"<table><tbody>
            <tr><td>1</td><td>no anchor here</td><td>9.9</td></tr>
        </tbody></table>"#;
        let err = extract_banks(html).unwrap_err();
        assert!(matches!(err, ExtractError::MissingAnchor { row: 0 }));
    }

    #[test]
    fn short_row_is_a_named_error() {
        let html = r#"<table><tbody>
            <tr><td>1</td></tr>
        </tbody></table>"#;
        let err = extract_banks(html).unwrap_err();
        assert!(matches!(err, ExtractError::MissingCell { row: 0, cell: 2 }));
    }
}
