//! Line-item validation for document forms.
//!
//! Every row is checked; nothing short-circuits on the first failure, so the
//! operator sees every problem at once. The verdict is the AND-reduction of
//! an explicit per-row result list, and on any failure no partial line list
//! is produced.

use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use thiserror::Error;

use crate::cache::ReferenceCache;
use crate::models::{InboundLine, OutboundLine};

const MSG_MATERIAL: &str = "select a material";
const MSG_UNKNOWN_MATERIAL: &str = "material is not in the catalog";
const MSG_QUANTITY: &str = "quantity must be a whole number of at least 1";
const MSG_UNIT_PRICE: &str = "unit price must be at least 0.01";

/// Raw field values of one editable line row, exactly as entered.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LineDraft {
    pub material_id: String,
    pub quantity: String,
    pub unit_price: String,
}

impl LineDraft {
    /// A fresh row with the form's default values.
    pub fn new() -> Self {
        Self {
            material_id: String::new(),
            quantity: "1".to_string(),
            unit_price: "0.01".to_string(),
        }
    }
}

impl Default for LineDraft {
    fn default() -> Self {
        Self::new()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LineField {
    Material,
    Quantity,
    UnitPrice,
}

/// One invalid field, addressed by row index so the rendering layer can
/// highlight it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldError {
    pub row: usize,
    pub field: LineField,
    pub message: &'static str,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum InvalidDocument {
    #[error("document has no lines")]
    Empty,
    #[error("{} invalid line field(s)", .0.len())]
    Fields(Vec<FieldError>),
}

/// Validates and normalizes the rows of an inbound document.
///
/// Rules: material selected and present in the reference cache, integer
/// quantity >= 1, decimal unit price >= 0.01.
pub fn validate_inbound_lines(
    rows: &[LineDraft],
    cache: &ReferenceCache,
) -> Result<Vec<InboundLine>, InvalidDocument> {
    if rows.is_empty() {
        return Err(InvalidDocument::Empty);
    }
    let results: Vec<Result<InboundLine, Vec<FieldError>>> = rows
        .iter()
        .enumerate()
        .map(|(index, row)| check_inbound_row(index, row, cache))
        .collect();
    reduce(results)
}

/// Validates and normalizes the rows of an outbound document. Outbound lines
/// carry no price; whatever sits in the draft's price field is ignored.
pub fn validate_outbound_lines(
    rows: &[LineDraft],
    cache: &ReferenceCache,
) -> Result<Vec<OutboundLine>, InvalidDocument> {
    if rows.is_empty() {
        return Err(InvalidDocument::Empty);
    }
    let results: Vec<Result<OutboundLine, Vec<FieldError>>> = rows
        .iter()
        .enumerate()
        .map(|(index, row)| check_outbound_row(index, row, cache))
        .collect();
    reduce(results)
}

fn check_inbound_row(
    index: usize,
    row: &LineDraft,
    cache: &ReferenceCache,
) -> Result<InboundLine, Vec<FieldError>> {
    let material = check_material(index, &row.material_id, cache);
    let quantity = check_quantity(index, &row.quantity);
    let unit_price = check_unit_price(index, &row.unit_price);
    match (material, quantity, unit_price) {
        (Ok(material_id), Ok(quantity), Ok(unit_price)) => Ok(InboundLine {
            material_id,
            quantity,
            unit_price,
        }),
        (material, quantity, unit_price) => Err([
            material.err(),
            quantity.err(),
            unit_price.err(),
        ]
        .into_iter()
        .flatten()
        .collect()),
    }
}

fn check_outbound_row(
    index: usize,
    row: &LineDraft,
    cache: &ReferenceCache,
) -> Result<OutboundLine, Vec<FieldError>> {
    let material = check_material(index, &row.material_id, cache);
    let quantity = check_quantity(index, &row.quantity);
    match (material, quantity) {
        (Ok(material_id), Ok(quantity)) => Ok(OutboundLine {
            material_id,
            quantity,
        }),
        (material, quantity) => Err([material.err(), quantity.err()]
            .into_iter()
            .flatten()
            .collect()),
    }
}

fn check_material(index: usize, raw: &str, cache: &ReferenceCache) -> Result<i64, FieldError> {
    let raw = raw.trim();
    if raw.is_empty() {
        return Err(FieldError {
            row: index,
            field: LineField::Material,
            message: MSG_MATERIAL,
        });
    }
    // The id must still resolve against the current material snapshot.
    match raw.parse::<i64>() {
        Ok(id) if cache.has_material(id) => Ok(id),
        _ => Err(FieldError {
            row: index,
            field: LineField::Material,
            message: MSG_UNKNOWN_MATERIAL,
        }),
    }
}

fn check_quantity(index: usize, raw: &str) -> Result<i32, FieldError> {
    match raw.trim().parse::<i32>() {
        Ok(quantity) if quantity >= 1 => Ok(quantity),
        _ => Err(FieldError {
            row: index,
            field: LineField::Quantity,
            message: MSG_QUANTITY,
        }),
    }
}

fn check_unit_price(index: usize, raw: &str) -> Result<Decimal, FieldError> {
    match raw.trim().parse::<Decimal>() {
        Ok(price) if price >= dec!(0.01) => Ok(price),
        _ => Err(FieldError {
            row: index,
            field: LineField::UnitPrice,
            message: MSG_UNIT_PRICE,
        }),
    }
}

/// AND-reduction of the per-row results: all rows valid, or every collected
/// field error and no lines at all.
fn reduce<T>(results: Vec<Result<T, Vec<FieldError>>>) -> Result<Vec<T>, InvalidDocument> {
    let mut lines = Vec::with_capacity(results.len());
    let mut errors = Vec::new();
    for result in results {
        match result {
            Ok(line) => lines.push(line),
            Err(row_errors) => errors.extend(row_errors),
        }
    }
    if errors.is_empty() {
        Ok(lines)
    } else {
        Err(InvalidDocument::Fields(errors))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Material;
    use assert_matches::assert_matches;
    use proptest::prelude::*;
    use rstest::rstest;

    fn cache_with_materials(ids: &[i64]) -> ReferenceCache {
        let cache = ReferenceCache::new();
        cache.replace_materials(
            ids.iter()
                .map(|&id| Material {
                    id,
                    name: format!("material-{id}"),
                    category: None,
                    unit: "pcs".to_string(),
                    stock: 100,
                })
                .collect(),
        );
        cache
    }

    fn draft(material: &str, quantity: &str, price: &str) -> LineDraft {
        LineDraft {
            material_id: material.to_string(),
            quantity: quantity.to_string(),
            unit_price: price.to_string(),
        }
    }

    #[test]
    fn empty_row_set_is_invalid() {
        let cache = cache_with_materials(&[1]);
        assert_matches!(
            validate_inbound_lines(&[], &cache),
            Err(InvalidDocument::Empty)
        );
        assert_matches!(
            validate_outbound_lines(&[], &cache),
            Err(InvalidDocument::Empty)
        );
    }

    #[test]
    fn valid_inbound_rows_normalize() {
        let cache = cache_with_materials(&[1, 2]);
        let rows = vec![draft("1", "5", "2.50"), draft("2", " 3 ", "0.01")];
        let lines = validate_inbound_lines(&rows, &cache).unwrap();
        assert_eq!(lines.len(), 2);
        assert_eq!(lines[0].material_id, 1);
        assert_eq!(lines[0].quantity, 5);
        assert_eq!(lines[0].unit_price, dec!(2.50));
        assert_eq!(lines[1].quantity, 3);
    }

    #[test]
    fn every_row_is_checked_no_short_circuit() {
        let cache = cache_with_materials(&[1]);
        let rows = vec![
            draft("", "0", "2.50"),
            draft("1", "5", "0.001"),
            draft("1", "2", "1.00"),
        ];
        let errors = match validate_inbound_lines(&rows, &cache) {
            Err(InvalidDocument::Fields(errors)) => errors,
            other => panic!("expected field errors, got {other:?}"),
        };
        // Row 0 contributes two errors, row 1 one; the valid row 2 none.
        assert_eq!(errors.len(), 3);
        assert!(errors
            .iter()
            .any(|e| e.row == 0 && e.field == LineField::Material));
        assert!(errors
            .iter()
            .any(|e| e.row == 0 && e.field == LineField::Quantity));
        assert!(errors
            .iter()
            .any(|e| e.row == 1 && e.field == LineField::UnitPrice));
    }

    #[test]
    fn unknown_material_is_flagged() {
        let cache = cache_with_materials(&[1]);
        let rows = vec![draft("42", "1", "0.01")];
        let errors = match validate_inbound_lines(&rows, &cache) {
            Err(InvalidDocument::Fields(errors)) => errors,
            other => panic!("expected field errors, got {other:?}"),
        };
        assert_eq!(errors[0].field, LineField::Material);
        assert_eq!(errors[0].message, MSG_UNKNOWN_MATERIAL);
    }

    #[test]
    fn outbound_ignores_the_price_field() {
        let cache = cache_with_materials(&[1]);
        let rows = vec![draft("1", "4", "garbage")];
        let lines = validate_outbound_lines(&rows, &cache).unwrap();
        assert_eq!(lines, vec![OutboundLine { material_id: 1, quantity: 4 }]);
    }

    #[rstest]
    #[case("0")]
    #[case("-3")]
    #[case("abc")]
    #[case("2.5")]
    #[case("")]
    fn bad_quantities_are_rejected(#[case] quantity: &str) {
        let cache = cache_with_materials(&[1]);
        let rows = vec![draft("1", quantity, "1.00")];
        let errors = match validate_inbound_lines(&rows, &cache) {
            Err(InvalidDocument::Fields(errors)) => errors,
            other => panic!("expected field errors, got {other:?}"),
        };
        assert!(errors
            .iter()
            .any(|e| e.field == LineField::Quantity && e.message == MSG_QUANTITY));
    }

    #[rstest]
    #[case("0.009")]
    #[case("0")]
    #[case("-1.50")]
    #[case("free")]
    fn bad_unit_prices_are_rejected(#[case] price: &str) {
        let cache = cache_with_materials(&[1]);
        let rows = vec![draft("1", "1", price)];
        assert_matches!(
            validate_inbound_lines(&rows, &cache),
            Err(InvalidDocument::Fields(_))
        );
    }

    proptest! {
        #[test]
        fn quantities_below_one_never_validate(quantity in i64::MIN..1i64) {
            let cache = cache_with_materials(&[1]);
            let rows = vec![draft("1", &quantity.to_string(), "1.00")];
            prop_assert!(validate_outbound_lines(&rows, &cache).is_err());
        }
    }
}
