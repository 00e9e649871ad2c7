// Column resolution by ordered name rules.
//
// Input spreadsheets disagree on header names ("Salary", "2024-25 Salary",
// "Tm", "Team"). A column is located by evaluating rules in order; the first
// rule with a matching header wins, and within a rule the leftmost header
// wins.

/// One way of recognizing a column by its header.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ColumnRule {
    /// Header equals the name exactly.
    Exact(&'static str),
    /// Header contains the needle, ignoring ASCII case.
    ContainsIgnoreCase(&'static str),
    /// Header equals one of the names, ignoring ASCII case.
    OneOfIgnoreCase(&'static [&'static str]),
}

impl ColumnRule {
    pub fn matches(&self, header: &str) -> bool {
        match self {
            ColumnRule::Exact(name) => header == *name,
            ColumnRule::ContainsIgnoreCase(needle) => header
                .to_ascii_lowercase()
                .contains(&needle.to_ascii_lowercase()),
            ColumnRule::OneOfIgnoreCase(names) => {
                names.iter().any(|n| header.eq_ignore_ascii_case(n))
            }
        }
    }
}

/// A column located by [`resolve`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedColumn {
    pub index: usize,
    /// Header as it appears in the source table.
    pub source_name: String,
    pub rule: ColumnRule,
}

/// Find the first header satisfying the earliest matching rule.
pub fn resolve(headers: &[String], rules: &[ColumnRule]) -> Option<ResolvedColumn> {
    rules.iter().find_map(|rule| {
        headers
            .iter()
            .position(|h| rule.matches(h))
            .map(|index| ResolvedColumn {
                index,
                source_name: headers[index].clone(),
                rule: *rule,
            })
    })
}

/// Salary amount: an exact `Salary` header, else the first header mentioning
/// "salary" in any case.
pub const SALARY_RULES: &[ColumnRule] = &[
    ColumnRule::Exact("Salary"),
    ColumnRule::ContainsIgnoreCase("salary"),
];

/// Team on the salary side.
pub const SALARY_TEAM_RULES: &[ColumnRule] = &[ColumnRule::OneOfIgnoreCase(&["team", "tm"])];

/// Team on the statistics side.
pub const STATS_TEAM_RULES: &[ColumnRule] = &[ColumnRule::Exact("Tm"), ColumnRule::Exact("Team")];

/// Position on the statistics side.
pub const STATS_POSITION_RULES: &[ColumnRule] =
    &[ColumnRule::Exact("Pos"), ColumnRule::Exact("Position")];

#[cfg(test)]
mod tests {
    use super::*;

    fn headers(names: &[&str]) -> Vec<String> {
        names.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn exact_salary_preferred() {
        let h = headers(&["Player", "2024-25 Salary", "Salary"]);
        let col = resolve(&h, SALARY_RULES).unwrap();
        assert_eq!(col.index, 2);
        assert_eq!(col.rule, ColumnRule::Exact("Salary"));
    }

    #[test]
    fn salary_substring_fallback() {
        let h = headers(&["Player", "Tm", "2024-25 Salary", "2025-26 SALARY"]);
        let col = resolve(&h, SALARY_RULES).unwrap();
        assert_eq!(col.index, 2);
        assert_eq!(col.source_name, "2024-25 Salary");
    }

    #[test]
    fn lowercase_salary_header_found() {
        let h = headers(&["player", "salary"]);
        assert_eq!(resolve(&h, SALARY_RULES).unwrap().index, 1);
    }

    #[test]
    fn no_candidate_is_none() {
        let h = headers(&["Player", "Team", "Cap Hit"]);
        assert!(resolve(&h, SALARY_RULES).is_none());
        assert!(resolve(&[], SALARY_RULES).is_none());
    }

    #[test]
    fn team_rules_ignore_case() {
        assert_eq!(resolve(&headers(&["Player", "TM"]), SALARY_TEAM_RULES).unwrap().index, 1);
        assert_eq!(resolve(&headers(&["team", "Player"]), SALARY_TEAM_RULES).unwrap().index, 0);
        assert!(resolve(&headers(&["Teams"]), SALARY_TEAM_RULES).is_none());
    }

    #[test]
    fn stats_rules_are_exact() {
        assert!(resolve(&headers(&["tm", "pos"]), STATS_TEAM_RULES).is_none());
        assert!(resolve(&headers(&["tm", "pos"]), STATS_POSITION_RULES).is_none());
        assert_eq!(
            resolve(&headers(&["Team", "Tm"]), STATS_TEAM_RULES).unwrap().source_name,
            "Tm"
        );
    }
}
