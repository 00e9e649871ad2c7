// Salary table loading: salary column resolution and currency coercion.

use crate::columns::{self, SALARY_RULES, SALARY_TEAM_RULES};
use crate::error::PipelineError;
use crate::normalize::normalize_opt;
use crate::numeric::parse_currency;
use crate::table::Table;
use tracing::{debug, info};

/// One row of the salary sheet after coercion.
#[derive(Debug, Clone, PartialEq)]
pub struct SalaryRecord {
    pub player: Option<String>,
    /// `None` when the source cell was empty or not a number.
    pub salary: Option<f64>,
    pub team: Option<String>,
    /// Join key derived from `player`.
    pub key: String,
    /// Values of [`SalarySheet::extra_columns`], in the same order.
    pub extra: Vec<Option<String>>,
}

/// The salary table with its salary column resolved.
#[derive(Debug, Clone, PartialEq)]
pub struct SalarySheet {
    /// Header the `Salary` field was read from.
    pub salary_source: String,
    /// Header the team was read from, if the sheet has one.
    pub team_source: Option<String>,
    /// Every column except Player and the salary column, carried through to
    /// the output untouched. Includes the team column.
    pub extra_columns: Vec<String>,
    pub records: Vec<SalaryRecord>,
}

impl SalarySheet {
    /// Resolve the salary and player columns and coerce every row.
    ///
    /// Fails with a configuration error when no salary-like column or no
    /// `Player` column exists.
    pub fn from_table(table: &Table) -> Result<Self, PipelineError> {
        let headers = table.headers();
        let salary_col =
            columns::resolve(headers, SALARY_RULES).ok_or_else(|| PipelineError::NoSalaryColumn {
                columns: headers.to_vec(),
            })?;
        if salary_col.source_name != "Salary" {
            info!("using '{}' as the Salary column", salary_col.source_name);
        }

        let player_idx = table
            .column_index("Player")
            .ok_or_else(|| PipelineError::missing_column("salaries", "Player"))?;
        let team_col = columns::resolve(headers, SALARY_TEAM_RULES);
        let team_idx = team_col.as_ref().map(|c| c.index);

        let extra_idx: Vec<usize> = (0..headers.len())
            .filter(|&i| i != player_idx && i != salary_col.index)
            .collect();
        let extra_columns = extra_idx.iter().map(|&i| headers[i].clone()).collect();

        let mut records = Vec::with_capacity(table.len());
        for row in table.rows() {
            let player = row.get(player_idx).map(str::to_string);
            let raw_salary = row.get(salary_col.index);
            let salary = raw_salary.and_then(parse_currency);
            if salary.is_none() {
                debug!(
                    "salary for '{}' is missing or unparseable: {:?}",
                    player.as_deref().unwrap_or_default(),
                    raw_salary
                );
            }
            records.push(SalaryRecord {
                key: normalize_opt(player.as_deref()),
                player,
                salary,
                team: row.get_opt(team_idx).map(str::to_string),
                extra: extra_idx
                    .iter()
                    .map(|&i| row.get(i).map(str::to_string))
                    .collect(),
            });
        }

        Ok(SalarySheet {
            salary_source: salary_col.source_name,
            team_source: team_col.map(|c| c.source_name),
            extra_columns,
            records,
        })
    }
}
