// Inner join of salaries and season stats on normalized player names, plus
// the derived efficiency metrics.

use crate::salary::{SalaryRecord, SalarySheet};
use crate::stats::{CountingStats, SeasonStats, StatRecord};
use std::collections::{HashMap, HashSet};
use tracing::{debug, info};

/// A salary row paired with a statistics row of the same key.
#[derive(Debug, Clone, PartialEq)]
pub struct MergedRecord {
    /// Salary-side name, falling back to the stats-side name.
    pub player: Option<String>,
    /// Stats-side team when the stats table has a team column, otherwise the
    /// salary-side team.
    pub team: Option<String>,
    pub position: Option<String>,
    pub year: i64,
    pub salary: Option<f64>,
    pub games: Option<String>,
    pub minutes: Option<String>,
    pub counting: CountingStats,
    pub efficiency: f64,
    /// `None` when efficiency is zero or the salary is missing.
    pub salary_per_efficiency: Option<f64>,
    /// Pass-through salary columns, aligned with `SalarySheet::extra_columns`.
    pub extra: Vec<Option<String>>,
    pub key: String,
}

/// Output of [`join`].
#[derive(Debug, Clone, PartialEq, Default)]
pub struct JoinResult {
    pub matched: Vec<MergedRecord>,
    /// Salary rows whose key found no statistics row, in input order.
    pub unmatched: Vec<SalaryRecord>,
}

impl JoinResult {
    /// Distinct keys present in the matched set.
    pub fn matched_keys(&self) -> HashSet<&str> {
        self.matched.iter().map(|m| m.key.as_str()).collect()
    }
}

/// Salary divided by efficiency. Zero efficiency yields `None` rather than an
/// infinite ratio.
pub fn salary_per_efficiency(salary: Option<f64>, efficiency: f64) -> Option<f64> {
    if efficiency == 0.0 {
        return None;
    }
    salary.map(|s| s / efficiency).filter(|v| v.is_finite())
}

fn merge(salary: &SalaryRecord, stat: &StatRecord, stats_have_team: bool) -> MergedRecord {
    let efficiency = stat.counting.efficiency();
    let team = if stats_have_team {
        stat.team.clone()
    } else {
        salary.team.clone()
    };
    MergedRecord {
        player: salary.player.clone().or_else(|| stat.player.clone()),
        team,
        position: stat.position.clone(),
        year: stat.year,
        salary: salary.salary,
        games: stat.games.clone(),
        minutes: stat.minutes.clone(),
        counting: stat.counting,
        efficiency,
        salary_per_efficiency: salary_per_efficiency(salary.salary, efficiency),
        extra: salary.extra.clone(),
        key: salary.key.clone(),
    }
}

/// Inner join on the normalized key.
///
/// Every salary row is paired with every stats row sharing its key, in salary
/// order then stats order. Blank names share the empty key and join like any
/// other key.
pub fn join(salaries: &SalarySheet, stats: &SeasonStats) -> JoinResult {
    let mut by_key: HashMap<&str, Vec<&StatRecord>> = HashMap::new();
    for rec in &stats.records {
        by_key.entry(rec.key.as_str()).or_default().push(rec);
    }

    let mut result = JoinResult::default();
    for salary in &salaries.records {
        match by_key.get(salary.key.as_str()) {
            Some(stat_rows) => {
                if stat_rows.len() > 1 {
                    debug!(
                        "'{}' matches {} stat rows; keeping all",
                        salary.key,
                        stat_rows.len()
                    );
                }
                result
                    .matched
                    .extend(stat_rows.iter().map(|stat| merge(salary, stat, stats.has_team)));
            }
            None => result.unmatched.push(salary.clone()),
        }
    }

    info!(
        "joined {} salary rows against {} stat rows: {} matched, {} unmatched",
        salaries.records.len(),
        stats.records.len(),
        result.matched.len(),
        result.unmatched.len()
    );
    result
}
