//! Condition editor — an editable list of predicates plus an AND/OR selector.

use autoflow_domain::automation::{Condition, ConditionLogic, Operator};
use autoflow_domain::error::ValidationError;
use autoflow_domain::id::ConditionId;

/// Staged copy of an automation's conditions.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ConditionEditor {
    conditions: Vec<Condition>,
    logic: ConditionLogic,
}

impl ConditionEditor {
    /// Seed the buffer with the current conditions. Logic starts at `AND`.
    #[must_use]
    pub fn open(initial: &[Condition]) -> Self {
        Self {
            conditions: initial.to_vec(),
            logic: ConditionLogic::default(),
        }
    }

    #[must_use]
    pub fn conditions(&self) -> &[Condition] {
        &self.conditions
    }

    #[must_use]
    pub fn logic(&self) -> ConditionLogic {
        self.logic
    }

    // TODO: carry the logic into the saved automation once the product decides
    // whether AND/OR belongs on the entity.
    pub fn set_logic(&mut self, logic: ConditionLogic) {
        self.logic = logic;
    }

    /// Append a blank condition and return its id.
    pub fn add(&mut self) -> ConditionId {
        let id = self.fresh_id();
        self.conditions.push(Condition::blank(id.clone()));
        id
    }

    /// # Errors
    ///
    /// Returns [`ValidationError::IndexOutOfRange`] for an unknown row.
    pub fn set_field(
        &mut self,
        index: usize,
        field: impl Into<String>,
    ) -> Result<(), ValidationError> {
        self.row_mut(index)?.field = field.into();
        Ok(())
    }

    /// # Errors
    ///
    /// Returns [`ValidationError::IndexOutOfRange`] for an unknown row.
    pub fn set_operator(
        &mut self,
        index: usize,
        operator: Operator,
    ) -> Result<(), ValidationError> {
        self.row_mut(index)?.operator = operator;
        Ok(())
    }

    /// # Errors
    ///
    /// Returns [`ValidationError::IndexOutOfRange`] for an unknown row.
    pub fn set_value(
        &mut self,
        index: usize,
        value: impl Into<serde_json::Value>,
    ) -> Result<(), ValidationError> {
        self.row_mut(index)?.value = value.into();
        Ok(())
    }

    /// Delete a row by position.
    ///
    /// # Errors
    ///
    /// Returns [`ValidationError::IndexOutOfRange`] for an unknown row.
    pub fn remove(&mut self, index: usize) -> Result<Condition, ValidationError> {
        self.check(index)?;
        Ok(self.conditions.remove(index))
    }

    /// Hand back the staged list. The logic selection is not part of it.
    #[must_use]
    pub fn save(self) -> Vec<Condition> {
        self.conditions
    }

    fn row_mut(&mut self, index: usize) -> Result<&mut Condition, ValidationError> {
        self.check(index)?;
        Ok(&mut self.conditions[index])
    }

    fn check(&self, index: usize) -> Result<(), ValidationError> {
        if index < self.conditions.len() {
            Ok(())
        } else {
            Err(ValidationError::IndexOutOfRange {
                index,
                len: self.conditions.len(),
            })
        }
    }

    fn fresh_id(&self) -> ConditionId {
        loop {
            let id = ConditionId::new();
            if self.conditions.iter().all(|c| c.id != id) {
                return id;
            }
        }
    }
}
