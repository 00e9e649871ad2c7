// CSV output: the matched dataset (fixed column preference order) and the
// unmatched-salary diagnostic report.

use crate::error::PipelineError;
use crate::join::MergedRecord;
use crate::numeric::{format_number, format_opt};
use crate::salary::{SalaryRecord, SalarySheet};
use crate::stats::{SeasonStats, StatColumn};
use std::io::Write;
use std::path::Path;
use tracing::debug;

/// Where an output cell comes from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputField {
    Player,
    Team,
    Position,
    Year,
    Salary,
    Stat(StatColumn),
    Efficiency,
    SalaryPerEfficiency,
    /// Index into `SalarySheet::extra_columns`.
    Extra(usize),
}

/// Ordered header/field pairs for the matched dataset.
#[derive(Debug, Clone, PartialEq)]
pub struct OutputLayout {
    columns: Vec<(String, OutputField)>,
}

impl OutputLayout {
    /// Preferred columns first (only those the inputs can fill), then salary
    /// pass-through columns in source order, then games and minutes.
    ///
    /// The salary team column is emitted as `Team` only when the stats table
    /// has no team column; otherwise it passes through under its own header.
    pub fn new(salaries: &SalarySheet, stats: &SeasonStats) -> Self {
        let mut columns: Vec<(String, OutputField)> = vec![("Player".into(), OutputField::Player)];
        if salaries.team_source.is_some() || stats.has_team {
            columns.push(("Team".into(), OutputField::Team));
        }
        if stats.has_position {
            columns.push(("Pos".into(), OutputField::Position));
        }
        columns.push(("Year".into(), OutputField::Year));
        columns.push(("Salary".into(), OutputField::Salary));
        for &stat in stats.columns.iter().filter(|c| c.is_counting()) {
            columns.push((stat.header().into(), OutputField::Stat(stat)));
        }
        columns.push(("Efficiency".into(), OutputField::Efficiency));
        columns.push(("Salary_per_Efficiency".into(), OutputField::SalaryPerEfficiency));

        let trailing: Vec<StatColumn> = stats
            .columns
            .iter()
            .copied()
            .filter(|c| !c.is_counting())
            .collect();

        let taken = |name: &str, columns: &[(String, OutputField)]| {
            columns.iter().any(|(h, _)| h == name) || trailing.iter().any(|c| c.header() == name)
        };
        let team_is_salary_side = !stats.has_team;
        for (i, name) in salaries.extra_columns.iter().enumerate() {
            if team_is_salary_side && salaries.team_source.as_deref() == Some(name.as_str()) {
                continue;
            }
            if taken(name, &columns) {
                debug!("dropping salary column '{}': name already in output", name);
                continue;
            }
            columns.push((name.clone(), OutputField::Extra(i)));
        }
        for stat in trailing {
            columns.push((stat.header().into(), OutputField::Stat(stat)));
        }

        OutputLayout { columns }
    }

    pub fn headers(&self) -> Vec<&str> {
        self.columns.iter().map(|(h, _)| h.as_str()).collect()
    }

    pub fn fields(&self) -> impl Iterator<Item = OutputField> + '_ {
        self.columns.iter().map(|(_, f)| *f)
    }

    /// Cells for one merged record, in header order.
    pub fn render(&self, rec: &MergedRecord) -> Vec<String> {
        self.fields().map(|field| render_field(field, rec)).collect()
    }
}

fn render_field(field: OutputField, rec: &MergedRecord) -> String {
    match field {
        OutputField::Player => rec.player.clone().unwrap_or_default(),
        OutputField::Team => rec.team.clone().unwrap_or_default(),
        OutputField::Position => rec.position.clone().unwrap_or_default(),
        OutputField::Year => rec.year.to_string(),
        OutputField::Salary => format_opt(rec.salary),
        OutputField::Stat(StatColumn::Games) => rec.games.clone().unwrap_or_default(),
        OutputField::Stat(StatColumn::Minutes) => rec.minutes.clone().unwrap_or_default(),
        OutputField::Stat(stat) => format_opt(rec.counting.get(stat)),
        OutputField::Efficiency => format_number(rec.efficiency),
        OutputField::SalaryPerEfficiency => format_opt(rec.salary_per_efficiency),
        OutputField::Extra(i) => rec.extra.get(i).cloned().flatten().unwrap_or_default(),
    }
}

// ---------------------------------------------------------------------------
// Writer-based output (enables testing without temp files)
// ---------------------------------------------------------------------------

/// Write the matched dataset.
pub fn write_matched<W: Write>(
    wtr: W,
    layout: &OutputLayout,
    records: &[MergedRecord],
) -> Result<(), csv::Error> {
    let mut writer = csv::Writer::from_writer(wtr);
    writer.write_record(layout.headers())?;
    for rec in records {
        writer.write_record(layout.render(rec))?;
    }
    writer.flush()?;
    Ok(())
}

/// Write the `Player, Salary` report for salary rows that found no match.
pub fn write_unmatched<W: Write>(wtr: W, records: &[SalaryRecord]) -> Result<(), csv::Error> {
    let mut writer = csv::Writer::from_writer(wtr);
    writer.write_record(["Player", "Salary"])?;
    for rec in records {
        writer.write_record([
            rec.player.clone().unwrap_or_default(),
            format_opt(rec.salary),
        ])?;
    }
    writer.flush()?;
    Ok(())
}

// ---------------------------------------------------------------------------
// Path-based output
// ---------------------------------------------------------------------------

fn create(path: &Path) -> Result<std::fs::File, PipelineError> {
    std::fs::File::create(path).map_err(|e| PipelineError::Io {
        path: path.to_path_buf(),
        source: e,
    })
}

pub fn save_matched(
    path: &Path,
    layout: &OutputLayout,
    records: &[MergedRecord],
) -> Result<(), PipelineError> {
    write_matched(create(path)?, layout, records).map_err(|e| PipelineError::Csv {
        path: path.to_path_buf(),
        source: e,
    })
}

pub fn save_unmatched(path: &Path, records: &[SalaryRecord]) -> Result<(), PipelineError> {
    write_unmatched(create(path)?, records).map_err(|e| PipelineError::Csv {
        path: path.to_path_buf(),
        source: e,
    })
}
