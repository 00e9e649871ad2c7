// Season statistics loading and latest-season selection.
//
// Reads Basketball-Reference style per-season rows (Player, Tm, Pos, Year and
// the counting stat columns). Only the most recent season is kept.

use crate::columns::{self, STATS_POSITION_RULES, STATS_TEAM_RULES};
use crate::error::PipelineError;
use crate::normalize::normalize_opt;
use crate::numeric::{count_or_zero, parse_number};
use crate::table::{Row, Table};
use tracing::{debug, info, warn};

// ---------------------------------------------------------------------------
// Stat columns
// ---------------------------------------------------------------------------

/// A statistics column carried into the joined output.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StatColumn {
    Games,
    Minutes,
    Points,
    Rebounds,
    Assists,
    Steals,
    Blocks,
    FieldGoalAttempts,
    FieldGoals,
    FreeThrowAttempts,
    FreeThrows,
    Turnovers,
}

impl StatColumn {
    pub const ALL: [StatColumn; 12] = [
        StatColumn::Games,
        StatColumn::Minutes,
        StatColumn::Points,
        StatColumn::Rebounds,
        StatColumn::Assists,
        StatColumn::Steals,
        StatColumn::Blocks,
        StatColumn::FieldGoalAttempts,
        StatColumn::FieldGoals,
        StatColumn::FreeThrowAttempts,
        StatColumn::FreeThrows,
        StatColumn::Turnovers,
    ];

    /// Source and output header.
    pub fn header(self) -> &'static str {
        match self {
            StatColumn::Games => "G",
            StatColumn::Minutes => "MP",
            StatColumn::Points => "PTS",
            StatColumn::Rebounds => "TRB",
            StatColumn::Assists => "AST",
            StatColumn::Steals => "STL",
            StatColumn::Blocks => "BLK",
            StatColumn::FieldGoalAttempts => "FGA",
            StatColumn::FieldGoals => "FG",
            StatColumn::FreeThrowAttempts => "FTA",
            StatColumn::FreeThrows => "FT",
            StatColumn::Turnovers => "TOV",
        }
    }

    /// Counting stats are coerced to numbers (missing = 0); games and minutes
    /// pass through as written.
    pub fn is_counting(self) -> bool {
        !matches!(self, StatColumn::Games | StatColumn::Minutes)
    }
}

// ---------------------------------------------------------------------------
// Records
// ---------------------------------------------------------------------------

/// Counting stats used by the efficiency formula. Missing values are 0.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct CountingStats {
    pub points: f64,
    pub rebounds: f64,
    pub assists: f64,
    pub steals: f64,
    pub blocks: f64,
    pub field_goal_attempts: f64,
    pub field_goals: f64,
    pub free_throw_attempts: f64,
    pub free_throws: f64,
    pub turnovers: f64,
}

impl CountingStats {
    /// `(PTS + TRB + AST + STL + BLK) - missed FG - missed FT - TOV`
    pub fn efficiency(&self) -> f64 {
        let positive = self.points + self.rebounds + self.assists + self.steals + self.blocks;
        let missed_fg = self.field_goal_attempts - self.field_goals;
        let missed_ft = self.free_throw_attempts - self.free_throws;
        positive - missed_fg - missed_ft - self.turnovers
    }

    /// Value for a counting column; `None` for games and minutes.
    pub fn get(&self, column: StatColumn) -> Option<f64> {
        match column {
            StatColumn::Points => Some(self.points),
            StatColumn::Rebounds => Some(self.rebounds),
            StatColumn::Assists => Some(self.assists),
            StatColumn::Steals => Some(self.steals),
            StatColumn::Blocks => Some(self.blocks),
            StatColumn::FieldGoalAttempts => Some(self.field_goal_attempts),
            StatColumn::FieldGoals => Some(self.field_goals),
            StatColumn::FreeThrowAttempts => Some(self.free_throw_attempts),
            StatColumn::FreeThrows => Some(self.free_throws),
            StatColumn::Turnovers => Some(self.turnovers),
            StatColumn::Games | StatColumn::Minutes => None,
        }
    }
}

/// One player-season from the statistics table.
#[derive(Debug, Clone, PartialEq)]
pub struct StatRecord {
    pub player: Option<String>,
    pub team: Option<String>,
    pub position: Option<String>,
    pub year: i64,
    pub games: Option<String>,
    pub minutes: Option<String>,
    pub counting: CountingStats,
    /// Join key derived from `player`.
    pub key: String,
}

/// The statistics table narrowed to its most recent season.
#[derive(Debug, Clone, PartialEq)]
pub struct SeasonStats {
    /// Latest Year present; `None` when no row had a usable Year.
    pub season: Option<i64>,
    pub has_team: bool,
    pub has_position: bool,
    /// Stat columns present in the source, in [`StatColumn::ALL`] order.
    pub columns: Vec<StatColumn>,
    /// Rows in the source table before the season filter.
    pub total_rows: usize,
    pub records: Vec<StatRecord>,
}

// ---------------------------------------------------------------------------
// Season selection
// ---------------------------------------------------------------------------

/// Parse a Year cell. Accepts `2024` and `2024.0`; anything else is `None`.
fn parse_year(raw: Option<&str>) -> Option<i64> {
    let value = raw.and_then(parse_number)?;
    (value.fract() == 0.0).then_some(value as i64)
}

/// Maximum Year in the table, ignoring missing and unparseable cells.
pub fn latest_season(table: &Table, year_idx: usize) -> Option<i64> {
    table.rows().filter_map(|row| parse_year(row.get(year_idx))).max()
}

struct StatIndices {
    player: usize,
    year: usize,
    team: Option<usize>,
    position: Option<usize>,
    stats: Vec<(StatColumn, usize)>,
}

impl StatIndices {
    fn stat(&self, column: StatColumn) -> Option<usize> {
        self.stats.iter().find(|(c, _)| *c == column).map(|(_, i)| *i)
    }

    fn record(&self, row: Row<'_>, year: i64) -> StatRecord {
        let count = |column| count_or_zero(row.get_opt(self.stat(column)));
        let player = row.get(self.player).map(str::to_string);
        StatRecord {
            key: normalize_opt(player.as_deref()),
            player,
            team: row.get_opt(self.team).map(str::to_string),
            position: row.get_opt(self.position).map(str::to_string),
            year,
            games: row.get_opt(self.stat(StatColumn::Games)).map(str::to_string),
            minutes: row.get_opt(self.stat(StatColumn::Minutes)).map(str::to_string),
            counting: CountingStats {
                points: count(StatColumn::Points),
                rebounds: count(StatColumn::Rebounds),
                assists: count(StatColumn::Assists),
                steals: count(StatColumn::Steals),
                blocks: count(StatColumn::Blocks),
                field_goal_attempts: count(StatColumn::FieldGoalAttempts),
                field_goals: count(StatColumn::FieldGoals),
                free_throw_attempts: count(StatColumn::FreeThrowAttempts),
                free_throws: count(StatColumn::FreeThrows),
                turnovers: count(StatColumn::Turnovers),
            },
        }
    }
}

impl SeasonStats {
    /// Keep only the rows of the most recent season.
    ///
    /// Fails with a configuration error when the table has no `Year` or no
    /// `Player` column.
    pub fn latest_from_table(table: &Table) -> Result<Self, PipelineError> {
        let year = table
            .column_index("Year")
            .ok_or_else(|| PipelineError::missing_column("season stats", "Year"))?;
        let player = table
            .column_index("Player")
            .ok_or_else(|| PipelineError::missing_column("season stats", "Player"))?;

        let headers = table.headers();
        let stats: Vec<(StatColumn, usize)> = StatColumn::ALL
            .iter()
            .filter_map(|&c| table.column_index(c.header()).map(|i| (c, i)))
            .collect();
        let idx = StatIndices {
            player,
            year,
            team: columns::resolve(headers, STATS_TEAM_RULES).map(|c| c.index),
            position: columns::resolve(headers, STATS_POSITION_RULES).map(|c| c.index),
            stats,
        };

        let season = latest_season(table, year);
        let records: Vec<StatRecord> = match season {
            Some(season) => table
                .rows()
                .filter(|row| parse_year(row.get(year)) == Some(season))
                .map(|row| idx.record(row, season))
                .collect(),
            None => {
                warn!("no usable Year values in season stats; no rows selected");
                Vec::new()
            }
        };

        if let Some(season) = season {
            info!(
                "selected season {}: {} of {} stat rows",
                season,
                records.len(),
                table.len()
            );
        }
        let missing: Vec<&str> = StatColumn::ALL
            .iter()
            .filter(|c| idx.stat(**c).is_none())
            .map(|c| c.header())
            .collect();
        if !missing.is_empty() {
            debug!("stat columns absent from source: {}", missing.join(", "));
        }

        Ok(SeasonStats {
            season,
            has_team: idx.team.is_some(),
            has_position: idx.position.is_some(),
            columns: idx.stats.iter().map(|(c, _)| *c).collect(),
            total_rows: table.len(),
            records,
        })
    }
}
