// Pipeline entry points.
//
// `process` is the pure stage chain over in-memory tables; `run` adds the
// file I/O around it. Every configuration error surfaces from `process`, so
// nothing is written unless all required columns resolved.

use crate::config::PipelineConfig;
use crate::error::PipelineError;
use crate::join::{self, JoinResult};
use crate::numeric::with_thousands;
use crate::report::{self, OutputLayout};
use crate::salary::SalarySheet;
use crate::stats::SeasonStats;
use crate::table::Table;
use std::path::{Path, PathBuf};
use tracing::info;

/// Joined data ready to be written.
#[derive(Debug, Clone, PartialEq)]
pub struct PipelineOutput {
    pub salaries: SalarySheet,
    pub stats: SeasonStats,
    pub layout: OutputLayout,
    pub join: JoinResult,
}

/// Resolve columns, select the latest season and join.
pub fn process(salaries: &Table, stats: &Table) -> Result<PipelineOutput, PipelineError> {
    let salaries = SalarySheet::from_table(salaries)?;
    let stats = SeasonStats::latest_from_table(stats)?;
    let join = join::join(&salaries, &stats);
    let layout = OutputLayout::new(&salaries, &stats);
    Ok(PipelineOutput {
        salaries,
        stats,
        layout,
        join,
    })
}

/// Counts and destinations of a completed run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunSummary {
    pub salary_rows: usize,
    pub stat_rows: usize,
    pub season: Option<i64>,
    pub season_rows: usize,
    pub salary_column: String,
    pub matched: usize,
    pub unmatched: usize,
    pub matched_output: PathBuf,
    pub unmatched_output: PathBuf,
}

fn display_name(path: &Path) -> String {
    path.file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string())
}

impl RunSummary {
    /// Plain-text console summary, one line per entry.
    pub fn report_lines(&self) -> Vec<String> {
        let mut lines = vec![format!(
            "Loaded {} salary rows and {} stat rows",
            with_thousands(self.salary_rows),
            with_thousands(self.stat_rows)
        )];
        if self.salary_column != "Salary" {
            lines.push(format!("Using '{}' as Salary", self.salary_column));
        }
        match self.season {
            Some(season) => lines.push(format!(
                "Latest season: {} ({} stat rows)",
                season,
                with_thousands(self.season_rows)
            )),
            None => lines.push("No usable Year values found; no season selected".into()),
        }
        lines.push(format!("Matched rows: {}", with_thousands(self.matched)));
        lines.push(format!(
            "Wrote {} for any players that didn't match ({} rows).",
            display_name(&self.unmatched_output),
            with_thousands(self.unmatched)
        ));
        lines.push(format!(
            "Cleaned data saved as {}",
            display_name(&self.matched_output)
        ));
        lines
    }
}

/// Load both inputs, join them and write both outputs.
pub fn run(config: &PipelineConfig) -> Result<RunSummary, PipelineError> {
    info!("loading salaries from {}", config.salaries.display());
    let salary_table = Table::load(&config.salaries)?;
    info!("loading season stats from {}", config.stats.display());
    let stats_table = Table::load(&config.stats)?;

    let output = process(&salary_table, &stats_table)?;

    report::save_unmatched(&config.unmatched_output, &output.join.unmatched)?;
    info!(
        "wrote {} unmatched rows to {}",
        output.join.unmatched.len(),
        config.unmatched_output.display()
    );
    report::save_matched(&config.matched_output, &output.layout, &output.join.matched)?;
    info!(
        "wrote {} matched rows to {}",
        output.join.matched.len(),
        config.matched_output.display()
    );

    Ok(RunSummary {
        salary_rows: salary_table.len(),
        stat_rows: stats_table.len(),
        season: output.stats.season,
        season_rows: output.stats.records.len(),
        salary_column: output.salaries.salary_source,
        matched: output.join.matched.len(),
        unmatched: output.join.unmatched.len(),
        matched_output: config.matched_output.clone(),
        unmatched_output: config.unmatched_output.clone(),
    })
}
