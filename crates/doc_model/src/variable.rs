//! Named variables attached to documents and their children

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// A named value. The name is the lookup key: the first variable with a
/// given name wins.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Variable {
    pub name: String,
    #[serde(default)]
    pub value: Value,
    /// Additional fields (description, type, ...) preserved verbatim
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl Variable {
    /// Create a variable with the given name and value
    pub fn new(name: impl Into<String>, value: Value) -> Self {
        Self {
            name: name.into(),
            value,
            extra: Map::new(),
        }
    }
}

/// Find the first variable with the given name
pub fn find_variable<'a>(variables: &'a [Variable], name: &str) -> Option<&'a Variable> {
    variables.iter().find(|v| v.name == name)
}

/// Set a variable's value in place, appending a new variable when the name
/// is not present yet. Returns the index of the affected variable.
pub fn upsert_variable(variables: &mut Vec<Variable>, name: &str, value: Value) -> usize {
    match variables.iter().position(|v| v.name == name) {
        Some(index) => {
            variables[index].value = value;
            index
        }
        None => {
            variables.push(Variable::new(name, value));
            variables.len() - 1
        }
    }
}
