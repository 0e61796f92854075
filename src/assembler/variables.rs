use crate::project::Variable;
use crate::text::parse_var;
use ahash::AHashMap;

/// Looks up variable display names by id.
pub struct VariableResolver<'a> {
    names: AHashMap<&'a str, &'a str>,
}

impl<'a> VariableResolver<'a> {
    pub fn new(variables: &'a [Variable]) -> Self {
        let names = variables
            .iter()
            .map(|variable| (variable.id.as_str(), variable.name.as_str()))
            .collect();
        Self { names }
    }

    /// The name as configured in the design tool.
    pub fn display_name(&self, variable_id: &str) -> Option<&'a str> {
        self.names.get(variable_id).copied()
    }

    /// The name usable as a context variable (`%` delimiters stripped,
    /// whitespace replaced).
    pub fn context_name(&self, variable_id: &str) -> Option<String> {
        self.display_name(variable_id)
            .map(parse_var)
            .filter(|name| !name.is_empty())
    }
}
