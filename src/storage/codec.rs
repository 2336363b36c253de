//! Document encoding for movements
//!
//! Stored documents are schemaless JSON objects, so decoding is lenient:
//! an unreadable date becomes "not a date" and an unreadable amount becomes
//! "no amount", each logged, while the rest of the record stays usable.
//! Unknown kinds, categories or payment methods are hard errors because the
//! movement could not be classified at all.

use chrono::{DateTime, NaiveDate, NaiveDateTime};
use serde_json::{json, Map, Value};

use crate::error::{LedgerError, LedgerResult};
use crate::models::movement::detail_from_stored;
use crate::models::{Money, Movement, MovementId, MovementPatch, NONE_SENTINEL};

pub const NOMINAL_DATE: &str = "nominal_date";
pub const REGISTERED_AT: &str = "registered_at";
pub const EFFECTIVE_DATE: &str = "effective_date";
pub const UPDATED_AT: &str = "updated_at";
pub const KIND: &str = "kind";
pub const CATEGORY: &str = "category";
pub const DETAIL: &str = "detail";
pub const SUBDETAIL: &str = "subdetail";
pub const PAYMENT_METHOD: &str = "payment_method";
pub const AMOUNT: &str = "amount";
pub const COMMENT: &str = "comment";
pub const OWNER: &str = "owner";

/// Field names written by the earlier spreadsheet-era ledger
fn legacy_name(field: &str) -> Option<&'static str> {
    match field {
        NOMINAL_DATE => Some("Fecha"),
        REGISTERED_AT => Some("Fecha_Registro"),
        EFFECTIVE_DATE => Some("Fecha_Real"),
        UPDATED_AT => Some("Fecha_Actualizacion"),
        KIND => Some("Tipo"),
        CATEGORY => Some("Categoría"),
        DETAIL => Some("Detalle"),
        SUBDETAIL => Some("Subdetalle"),
        PAYMENT_METHOD => Some("Forma de pago"),
        AMOUNT => Some("Monto"),
        COMMENT => Some("Comentario"),
        OWNER => Some("Usuario"),
        _ => None,
    }
}

const DATE_FORMAT: &str = "%Y-%m-%d";
const DATETIME_FORMAT: &str = "%Y-%m-%dT%H:%M:%S%.f";

fn field<'a>(doc: &'a Map<String, Value>, name: &str) -> Option<&'a Value> {
    doc.get(name)
        .or_else(|| legacy_name(name).and_then(|legacy| doc.get(legacy)))
        .filter(|v| !v.is_null())
}

/// Parse a stored timestamp into naive local time
///
/// Accepts a plain date (midnight), a naive date-time with `T` or space, or
/// RFC 3339 with an offset. The offset is dropped and the wall-clock time
/// kept.
pub fn parse_timestamp(raw: &str) -> Option<NaiveDateTime> {
    let raw = raw.trim();
    if let Ok(date) = NaiveDate::parse_from_str(raw, DATE_FORMAT) {
        return date.and_hms_opt(0, 0, 0);
    }
    if let Ok(dt) = NaiveDateTime::parse_from_str(raw, DATETIME_FORMAT) {
        return Some(dt);
    }
    if let Ok(dt) = NaiveDateTime::parse_from_str(raw, "%Y-%m-%d %H:%M:%S%.f") {
        return Some(dt);
    }
    DateTime::parse_from_rfc3339(raw)
        .ok()
        .map(|dt| dt.naive_local())
}

fn decode_timestamp(id: &str, doc: &Map<String, Value>, name: &str) -> Option<NaiveDateTime> {
    let value = field(doc, name)?;
    let parsed = value.as_str().and_then(parse_timestamp);
    if parsed.is_none() {
        tracing::warn!(id, field = name, value = %value, "unreadable date; treating as not-a-date");
    }
    parsed
}

fn decode_date(id: &str, doc: &Map<String, Value>, name: &str) -> Option<NaiveDate> {
    decode_timestamp(id, doc, name).map(|dt| dt.date())
}

fn decode_amount(id: &str, doc: &Map<String, Value>) -> Option<Money> {
    let value = field(doc, AMOUNT)?;
    let amount = match value {
        Value::Number(n) => n.as_f64().and_then(Money::from_decimal),
        Value::String(s) => Money::parse(s).ok(),
        _ => None,
    };
    match amount {
        Some(a) if !a.is_negative() => Some(a),
        _ => {
            tracing::warn!(id, value = %value, "non-numeric or negative amount; excluded from totals");
            None
        }
    }
}

fn decode_required<T>(id: &str, doc: &Map<String, Value>, name: &str) -> LedgerResult<T>
where
    T: std::str::FromStr,
    T::Err: std::fmt::Display,
{
    let raw = field(doc, name).and_then(Value::as_str).ok_or_else(|| {
        LedgerError::Storage(format!("Movement {} has no '{}'", id, name))
    })?;
    raw.parse::<T>()
        .map_err(|e| LedgerError::Storage(format!("Movement {}: {}", id, e)))
}

fn decode_text(doc: &Map<String, Value>, name: &str) -> Option<String> {
    match field(doc, name)? {
        Value::String(s) => Some(s.clone()),
        other => Some(other.to_string()),
    }
}

/// Decode a stored document into a movement
pub fn decode(id: &MovementId, doc: &Map<String, Value>) -> LedgerResult<Movement> {
    let key = id.as_str();
    Ok(Movement {
        id: Some(id.clone()),
        nominal_date: decode_date(key, doc, NOMINAL_DATE),
        registered_at: decode_timestamp(key, doc, REGISTERED_AT),
        effective_date: decode_date(key, doc, EFFECTIVE_DATE),
        updated_at: decode_timestamp(key, doc, UPDATED_AT),
        kind: decode_required(key, doc, KIND)?,
        category: decode_required(key, doc, CATEGORY)?,
        detail: detail_from_stored(decode_text(doc, DETAIL).as_deref()),
        subdetail: detail_from_stored(decode_text(doc, SUBDETAIL).as_deref()),
        payment_method: decode_required(key, doc, PAYMENT_METHOD)?,
        amount: decode_amount(key, doc),
        comment: decode_text(doc, COMMENT).unwrap_or_default(),
        owner: decode_text(doc, OWNER).unwrap_or_default(),
    })
}

fn date_value(date: Option<NaiveDate>) -> Value {
    date.map(|d| Value::String(d.format(DATE_FORMAT).to_string()))
        .unwrap_or(Value::Null)
}

fn timestamp_value(ts: Option<NaiveDateTime>) -> Value {
    ts.map(|t| Value::String(t.format(DATETIME_FORMAT).to_string()))
        .unwrap_or(Value::Null)
}

fn detail_value(detail: &Option<String>) -> Value {
    Value::String(detail.clone().unwrap_or_else(|| NONE_SENTINEL.to_string()))
}

fn amount_value(amount: Option<Money>) -> Value {
    amount
        .map(|a| json!(a.to_decimal()))
        .unwrap_or(Value::Null)
}

fn into_map(value: Value) -> Map<String, Value> {
    match value {
        Value::Object(map) => map,
        _ => Map::new(),
    }
}

/// Encode a movement as a document body (the id is the document key)
pub fn encode(movement: &Movement) -> Map<String, Value> {
    into_map(json!({
        NOMINAL_DATE: date_value(movement.nominal_date),
        REGISTERED_AT: timestamp_value(movement.registered_at),
        EFFECTIVE_DATE: date_value(movement.effective_date),
        UPDATED_AT: timestamp_value(movement.updated_at),
        KIND: movement.kind.as_str(),
        CATEGORY: movement.category.label(),
        DETAIL: detail_value(&movement.detail),
        SUBDETAIL: detail_value(&movement.subdetail),
        PAYMENT_METHOD: movement.payment_method.as_str(),
        AMOUNT: amount_value(movement.amount),
        COMMENT: movement.comment,
        OWNER: movement.owner,
    }))
}

/// Encode the fields an edit may change
pub fn encode_patch(patch: &MovementPatch) -> Map<String, Value> {
    into_map(json!({
        NOMINAL_DATE: date_value(Some(patch.nominal_date)),
        EFFECTIVE_DATE: date_value(Some(patch.effective_date)),
        UPDATED_AT: timestamp_value(Some(patch.updated_at)),
        KIND: patch.kind.as_str(),
        CATEGORY: patch.category.label(),
        DETAIL: detail_value(&patch.detail),
        SUBDETAIL: detail_value(&patch.subdetail),
        PAYMENT_METHOD: patch.payment_method.as_str(),
        AMOUNT: amount_value(Some(patch.amount)),
        COMMENT: patch.comment,
        OWNER: patch.owner,
    }))
}

/// Remove legacy spellings of fields that a patch is about to set
pub fn drop_legacy_fields(doc: &mut Map<String, Value>, patch: &Map<String, Value>) {
    for name in patch.keys() {
        if let Some(legacy) = legacy_name(name) {
            doc.remove(legacy);
        }
    }
}
