use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// Income and expenditure for one financial year.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq)]
pub struct AnnualFinance {
    pub year: i32,
    pub income: f64,
    pub expenditure: f64,
    #[serde(default)]
    pub lines: Vec<FinanceLine>,
}

impl AnnualFinance {
    #[must_use]
    pub fn balance(&self) -> f64 {
        self.income - self.expenditure
    }
}

/// One budget line.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq)]
pub struct FinanceLine {
    pub category: String,
    pub budgeted: f64,
    pub actual: f64,
}
