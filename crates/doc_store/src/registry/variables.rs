//! Document variable operations

use super::DocumentRegistry;
use crate::document_key::resolve_path;
use crate::backend::StorageBackend;
use crate::Result;
use doc_model::Variable;
use serde_json::Value;

impl<B: StorageBackend> DocumentRegistry<B> {
    /// Set a document variable, updating the first one with that name in
    /// place or appending a new one
    pub async fn set_var_value(&mut self, document: &str, name: &str, value: Value) -> Result<Variable> {
        let path = &resolve_path(document)?;
        self.ensure_loaded(path).await?;
        let variable = self.cached_mut(path)?.set_variable(name, value).clone();
        self.save(path).await?;
        Ok(variable)
    }

    /// Value of a document variable, `None` when no variable has that name
    pub async fn get_var_value(&mut self, document: &str, name: &str) -> Result<Option<Value>> {
        let path = &resolve_path(document)?;
        Ok(self
            .get(path)
            .await?
            .variable(name)
            .map(|variable| variable.value.clone()))
    }
}
