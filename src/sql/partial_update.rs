use super::error::SqlError;
use super::types::{quote_identifier, ColumnAliasMap, CompiledClause, ParamList, UpdateRequest};

/// Build the `SET` list for a partial update.
///
/// Every field in `updates` becomes `"<column>"=$i` in insertion order, with the
/// column resolved through `aliases`. The returned params line up with the
/// placeholders one to one, so a caller binding a key predicate after the SET
/// list should use `$` + [`CompiledClause::next_placeholder`].
///
/// ```text
/// {name: "New", numEmployees: 1} => "name"=$1, "num_employees"=$2  ["New", 1]
/// ```
pub fn compile_partial_update(
    updates: &UpdateRequest,
    aliases: &ColumnAliasMap,
) -> Result<CompiledClause, SqlError> {
    if updates.is_empty() {
        return Err(SqlError::InvalidInput("No data"));
    }

    let mut params = ParamList::default();
    let assignments: Vec<String> = updates
        .iter()
        .map(|(field, value)| {
            let column = quote_identifier(aliases.column_for(field));
            format!("{}={}", column, params.param(value.clone()))
        })
        .collect();

    Ok(CompiledClause {
        sql: assignments.join(", "),
        params: params.into_values(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::{json, Value};

    const COMPANY_ALIASES: ColumnAliasMap =
        ColumnAliasMap::new(&[("numEmployees", "num_employees"), ("logoUrl", "logo_url")]);

    fn request(value: Value) -> UpdateRequest {
        match value {
            Value::Object(map) => map,
            other => panic!("expected object, got {}", other),
        }
    }

    #[test]
    fn maps_aliased_and_plain_fields() {
        let updates = request(json!({ "name": "New", "numEmployees": 1 }));
        let clause = compile_partial_update(&updates, &COMPANY_ALIASES).unwrap();

        assert_eq!(clause.sql, r#""name"=$1, "num_employees"=$2"#);
        assert_eq!(clause.params, vec![json!("New"), json!(1)]);
        assert_eq!(clause.next_placeholder(), 3);
    }

    #[test]
    fn many_fields_keep_insertion_order() {
        let updates = request(json!({
            "name": "New",
            "description": "New Description",
            "numEmployees": 1,
            "logoUrl": "http://new.img"
        }));
        let clause = compile_partial_update(&updates, &COMPANY_ALIASES).unwrap();

        assert_eq!(
            clause.sql,
            r#""name"=$1, "description"=$2, "num_employees"=$3, "logo_url"=$4"#
        );
        assert_eq!(
            clause.params,
            vec![json!("New"), json!("New Description"), json!(1), json!("http://new.img")]
        );
    }

    #[test]
    fn order_follows_input_not_alias_table() {
        let updates = request(json!({ "logoUrl": "http://a.img", "name": "A" }));
        let clause = compile_partial_update(&updates, &COMPANY_ALIASES).unwrap();

        assert_eq!(clause.sql, r#""logo_url"=$1, "name"=$2"#);
        assert_eq!(clause.params, vec![json!("http://a.img"), json!("A")]);
    }

    #[test]
    fn single_field() {
        let updates = request(json!({ "logoUrl": "http://new.img" }));
        let clause = compile_partial_update(&updates, &COMPANY_ALIASES).unwrap();

        assert_eq!(clause.sql, r#""logo_url"=$1"#);
        assert_eq!(clause.params, vec![json!("http://new.img")]);
    }

    #[test]
    fn without_aliases_uses_field_names() {
        let updates = request(json!({ "title": "Dev", "salary": 10, "equity": 0.5 }));
        let clause = compile_partial_update(&updates, &ColumnAliasMap::EMPTY).unwrap();

        assert_eq!(clause.sql, r#""title"=$1, "salary"=$2, "equity"=$3"#);
        assert_eq!(clause.params.len(), 3);
    }

    #[test]
    fn empty_update_is_rejected() {
        let err = compile_partial_update(&UpdateRequest::new(), &ColumnAliasMap::EMPTY).unwrap_err();
        assert_eq!(err, SqlError::InvalidInput("No data"));
        assert_eq!(err.to_string(), "No data");
    }

    #[test]
    fn placeholders_are_contiguous_for_many_fields() {
        let mut updates = UpdateRequest::new();
        for i in 0..12 {
            updates.insert(format!("f{}", i), json!(i));
        }
        let clause = compile_partial_update(&updates, &ColumnAliasMap::EMPTY).unwrap();

        for (i, part) in clause.sql.split(", ").enumerate() {
            assert_eq!(part, format!("\"f{}\"=${}", i, i + 1));
            assert_eq!(clause.params[i], json!(i));
        }
        assert_eq!(clause.params.len(), 12);
    }

    #[test]
    fn repeated_calls_are_identical() {
        let updates = request(json!({ "name": "New", "numEmployees": 1 }));
        let first = compile_partial_update(&updates, &COMPANY_ALIASES).unwrap();
        let second = compile_partial_update(&updates, &COMPANY_ALIASES).unwrap();
        assert_eq!(first, second);
    }
}
