//! Annual accounts.

use porter_core::entities::{AnnualFinance, FinanceLine};
use reqwest::Method;
use serde::Deserialize;

use crate::{ApiClient, error::ApiError};

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct ApiAnnual {
    #[serde(default)]
    year: Option<i32>,
    #[serde(default, alias = "totalIncome")]
    income: f64,
    #[serde(default, alias = "totalExpenditure")]
    expenditure: f64,
    #[serde(default, alias = "categories")]
    lines: Vec<ApiLine>,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct ApiLine {
    #[serde(alias = "name")]
    category: String,
    #[serde(default, alias = "budget")]
    budgeted: f64,
    #[serde(default, alias = "spent")]
    actual: f64,
}

impl ApiAnnual {
    fn into_annual(self, requested_year: i32) -> AnnualFinance {
        AnnualFinance {
            year: self.year.unwrap_or(requested_year),
            income: self.income,
            expenditure: self.expenditure,
            lines: self
                .lines
                .into_iter()
                .map(|line| FinanceLine {
                    category: line.category,
                    budgeted: line.budgeted,
                    actual: line.actual,
                })
                .collect(),
        }
    }
}

impl ApiClient {
    /// # Errors
    ///
    /// Returns [`ApiError`] if the request fails or the backend rejects it.
    pub async fn annual_finance(&self, year: i32) -> Result<AnnualFinance, ApiError> {
        let path = format!("/api/finance/annual/{year}");
        let raw: ApiAnnual = self.send(self.request(Method::GET, &path)).await?;
        Ok(raw.into_annual(year))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::http::decode_envelope;
    use pretty_assertions::assert_eq;

    #[test]
    fn parse_annual_fixture() {
        let raw: ApiAnnual = decode_envelope(
            br#"{"success":true,"data":{"totalIncome":48000.0,"totalExpenditure":41250.5,
                "categories":[{"name":"Insurance","budget":9000,"spent":9120.5},
                              {"category":"Cleaning","budgeted":6000,"actual":5400}]}}"#,
        )
        .unwrap();
        let annual = raw.into_annual(2024);
        assert_eq!(annual.year, 2024);
        assert_eq!(annual.lines.len(), 2);
        assert_eq!(annual.lines[0].category, "Insurance");
        assert!((annual.balance() - 6749.5).abs() < f64::EPSILON);
    }
}
