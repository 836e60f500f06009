use serde_json::Value;

use super::types::{quote_identifier, CompiledClause, FilterKeySpec, FilterOp, FilterRequest, ParamList};

/// A comparison picked for one filter key, before placeholders are numbered.
#[derive(Debug)]
struct FilterWhereInfo {
    column: &'static str,
    op: FilterOp,
    data: Option<Value>,
}

/// Build a flat `AND` conjunction from a search-query object.
///
/// Keys are looked up in `spec`; a key may bind a value (`ILIKE`, `>=`, `<=`) or
/// just emit a presence test (`> 0`) when its value is truthy. Placeholders count
/// only bound values, so presence tests never shift the index of later keys.
/// Nothing to filter yields an empty clause; callers add `WHERE` themselves.
pub fn compile_filter(filters: &FilterRequest, spec: &FilterKeySpec) -> CompiledClause {
    let conditions: Vec<FilterWhereInfo> = filters
        .iter()
        .filter_map(|(key, value)| parse_condition(key, value, spec))
        .collect();

    let mut params = ParamList::default();
    let fragments: Vec<String> = conditions
        .into_iter()
        .map(|condition| {
            let column = quote_identifier(condition.column);
            match condition.data {
                Some(data) => format!("{} {} {}", column, condition.op.to_sql(), params.param(data)),
                None => format!("{} {} 0", column, condition.op.to_sql()),
            }
        })
        .collect();

    CompiledClause {
        sql: fragments.join(" AND "),
        params: params.into_values(),
    }
}

fn parse_condition(key: &str, value: &Value, spec: &FilterKeySpec) -> Option<FilterWhereInfo> {
    let Some(rule) = spec.rule(key) else {
        tracing::warn!(
            "Ignoring unrecognized filter key '{}' (expected one of: {})",
            key,
            spec.keys().collect::<Vec<_>>().join(", ")
        );
        return None;
    };

    if !rule.op.consumes_param() {
        return is_truthy(value).then_some(FilterWhereInfo { column: rule.column, op: rule.op, data: None });
    }

    let data = match rule.op {
        FilterOp::ILike => Value::String(format!("%{}%", like_text(value))),
        _ => value.clone(),
    };
    Some(FilterWhereInfo { column: rule.column, op: rule.op, data: Some(data) })
}

fn like_text(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

fn is_truthy(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_f64().map_or(true, |f| f != 0.0),
        Value::String(s) => !s.is_empty(),
        Value::Array(_) | Value::Object(_) => true,
    }
}
