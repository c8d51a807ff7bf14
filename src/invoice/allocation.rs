//! Proportional split of one invoice total across several projects.
//!
//! Each row carries both an amount and a percentage of the fixed total. Editing
//! either one recomputes the other from the exact value just entered, so
//! repeated edits never feed a rounded number back into the calculation.

use bigdecimal::{BigDecimal, Zero};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::models::{ProjectAllocation, Reference, wire};

use super::money;

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AllocationSplit {
    #[serde(default, deserialize_with = "wire::optional_id")]
    pub project_id: Option<String>,
    #[serde(default, deserialize_with = "wire::decimal_or_zero")]
    pub amount: BigDecimal,
    #[serde(default, deserialize_with = "wire::decimal_or_zero")]
    pub percentage: BigDecimal,
}

impl AllocationSplit {
    pub fn for_project(project_id: impl Into<String>) -> Self {
        Self {
            project_id: Some(project_id.into()),
            ..Self::default()
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum AllocationField {
    Amount,
    Percentage,
}

#[derive(Debug, Clone, PartialEq, Error)]
pub enum AllocationError {
    #[error("Allocation row {index} does not exist")]
    RowOutOfRange { index: usize },

    #[error("At least one allocation row is required")]
    LastRow,

    #[error("Allocation values cannot be negative")]
    NegativeValue,

    #[error("Allocation row {index} has no project")]
    MissingProject { index: usize },

    #[error("Allocations must add up to the total, {} remaining", money::format_amount(remaining))]
    Unbalanced { remaining: BigDecimal },
}

/// Editing session for a split against one fixed total.
#[derive(Debug, Clone, PartialEq)]
pub struct AllocationEditor {
    total: BigDecimal,
    rows: Vec<AllocationSplit>,
}

impl AllocationEditor {
    /// Starts with a single empty row.
    pub fn new(total: BigDecimal) -> Self {
        Self {
            total,
            rows: vec![AllocationSplit::default()],
        }
    }

    /// Continue an editing session with rows exactly as they were left.
    pub fn with_rows(total: BigDecimal, rows: Vec<AllocationSplit>) -> Self {
        let mut editor = Self { total, rows };
        if editor.rows.is_empty() {
            editor.rows.push(AllocationSplit::default());
        }
        editor
    }

    /// Resume from rows sent by a client. Amounts are authoritative, so every
    /// percentage is recomputed from its amount.
    pub fn from_rows(total: BigDecimal, rows: Vec<AllocationSplit>) -> Self {
        let mut editor = Self::with_rows(total, rows);
        for row in &mut editor.rows {
            row.percentage = money::percentage_of(&row.amount, &editor.total);
        }
        editor
    }

    pub fn total(&self) -> &BigDecimal {
        &self.total
    }

    pub fn rows(&self) -> &[AllocationSplit] {
        &self.rows
    }

    pub fn into_rows(self) -> Vec<AllocationSplit> {
        self.rows
    }

    fn row_mut(&mut self, index: usize) -> Result<&mut AllocationSplit, AllocationError> {
        self.rows
            .get_mut(index)
            .ok_or(AllocationError::RowOutOfRange { index })
    }

    pub fn set_amount(&mut self, index: usize, amount: BigDecimal) -> Result<(), AllocationError> {
        if amount < BigDecimal::zero() {
            return Err(AllocationError::NegativeValue);
        }
        let percentage = money::percentage_of(&amount, &self.total);
        let row = self.row_mut(index)?;
        row.amount = amount;
        row.percentage = percentage;
        Ok(())
    }

    pub fn set_percentage(
        &mut self,
        index: usize,
        percentage: BigDecimal,
    ) -> Result<(), AllocationError> {
        if percentage < BigDecimal::zero() {
            return Err(AllocationError::NegativeValue);
        }
        let amount = money::portion_of(&self.total, &percentage);
        let row = self.row_mut(index)?;
        row.amount = amount;
        row.percentage = percentage;
        Ok(())
    }

    pub fn update(
        &mut self,
        index: usize,
        field: AllocationField,
        value: BigDecimal,
    ) -> Result<(), AllocationError> {
        match field {
            AllocationField::Amount => self.set_amount(index, value),
            AllocationField::Percentage => self.set_percentage(index, value),
        }
    }

    pub fn set_project(
        &mut self,
        index: usize,
        project_id: impl Into<String>,
    ) -> Result<(), AllocationError> {
        self.row_mut(index)?.project_id = Some(project_id.into());
        Ok(())
    }

    pub fn add_row(&mut self) {
        self.rows.push(AllocationSplit::default());
    }

    pub fn remove_row(&mut self, index: usize) -> Result<AllocationSplit, AllocationError> {
        if index >= self.rows.len() {
            return Err(AllocationError::RowOutOfRange { index });
        }
        if self.rows.len() == 1 {
            return Err(AllocationError::LastRow);
        }
        Ok(self.rows.remove(index))
    }

    pub fn allocated(&self) -> BigDecimal {
        money::sum(self.rows.iter().map(|row| &row.amount))
    }

    pub fn remaining(&self) -> BigDecimal {
        &self.total - &self.allocated()
    }

    /// Balanced when nothing is left to allocate at cent precision.
    pub fn is_balanced(&self) -> bool {
        money::is_zero_at_display(&self.remaining())
    }

    /// Final allocations, or the reason they cannot be submitted. Never
    /// mutates the rows.
    pub fn submit(&self) -> Result<Vec<ProjectAllocation>, AllocationError> {
        if !self.is_balanced() {
            return Err(AllocationError::Unbalanced {
                remaining: self.remaining(),
            });
        }
        self.rows
            .iter()
            .enumerate()
            .map(|(index, row)| match row.project_id.as_deref() {
                Some(project_id) if !project_id.trim().is_empty() => Ok(ProjectAllocation {
                    project: Reference::new(project_id),
                    amount: row.amount.clone(),
                }),
                _ => Err(AllocationError::MissingProject { index }),
            })
            .collect()
    }
}

/// Stateless form of a single edit: apply `value` to `field` of row `index`
/// and return the updated rows.
pub fn update_allocation(
    rows: Vec<AllocationSplit>,
    index: usize,
    field: AllocationField,
    value: BigDecimal,
    total: BigDecimal,
) -> Result<Vec<AllocationSplit>, AllocationError> {
    let mut editor = AllocationEditor { total, rows };
    editor.update(index, field, value)?;
    Ok(editor.into_rows())
}
