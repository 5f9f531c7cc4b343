//! Structural validation of raw JSON declarations.

use serde_json::{Map, Value};

use crate::declaration::{Action, Declaration};
use crate::error::InputError;

/// Parse declarations from JSON text.
pub fn from_json_str(input: &str) -> Result<Vec<Declaration>, InputError> {
  let value: Value = serde_json::from_str(input)?;
  parse_declarations(&value)
}

/// Validate and convert a raw JSON value into declarations.
///
/// Checks run element by element in this order and the first violation wins:
/// 1. the input is an array
/// 2. the element is a non-null object
/// 3. the element has a non-empty `name` (or legacy `component`)
/// 4. the element has a `dependsOn` field holding an array of strings
/// 5. `action` (or legacy `options`), when present and non-null, is an object
///
/// Nothing is returned unless every element passes.
pub fn parse_declarations(input: &Value) -> Result<Vec<Declaration>, InputError> {
  let elements = input.as_array().ok_or(InputError::NotAnArray)?;

  elements
    .iter()
    .enumerate()
    .map(|(index, element)| parse_declaration(index, element))
    .collect()
}

fn parse_declaration(index: usize, element: &Value) -> Result<Declaration, InputError> {
  let record = match element {
    Value::Null => return Err(InputError::NullElement { index }),
    Value::Object(record) => record,
    _ => return Err(InputError::NotAnObject { index }),
  };

  let name = field(record, "name", "component")
    .and_then(Value::as_str)
    .filter(|name| !name.is_empty())
    .ok_or(InputError::MissingName { index })?
    .to_string();

  let depends_on = match record.get("dependsOn") {
    None | Some(Value::Null) => return Err(InputError::MissingDependsOn { name }),
    Some(Value::Array(items)) => items
      .iter()
      .enumerate()
      .map(|(position, item)| {
        item
          .as_str()
          .map(str::to_string)
          .ok_or_else(|| InputError::InvalidDependency {
            name: name.clone(),
            position,
          })
      })
      .collect::<Result<Vec<_>, _>>()?,
    Some(_) => return Err(InputError::DependsOnNotArray { name }),
  };

  let action = match field(record, "action", "options") {
    None | Some(Value::Null) => None,
    Some(Value::Object(payload)) => Some(Action::from(payload.clone())),
    Some(_) => return Err(InputError::ActionNotObject { name }),
  };

  Ok(Declaration {
    name,
    depends_on,
    action,
  })
}

/// Read a field by its current name, falling back to the legacy one when the
/// current name is absent or `null`.
fn field<'a>(record: &'a Map<String, Value>, key: &str, legacy: &str) -> Option<&'a Value> {
  record
    .get(key)
    .filter(|value| !value.is_null())
    .or_else(|| record.get(legacy))
}
