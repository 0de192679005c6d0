use std::cmp::Ordering;

use crate::data_loader::Match;
use crate::standings::{DRAW_POINTS, WIN_POINTS};

// Mini-league record for one club, counting only matches played entirely
// inside a tied group.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct H2hRecord {
    pub team: String,
    pub points: i32,
    pub goals_for: u32,
    pub goals_against: u32,
}

impl H2hRecord {
    fn new(team: &str) -> Self {
        Self {
            team: team.to_owned(),
            points: 0,
            goals_for: 0,
            goals_against: 0,
        }
    }

    pub fn goal_difference(&self) -> i32 {
        self.goals_for as i32 - self.goals_against as i32
    }
}

// Re-aggregates the group's direct meetings with the usual outcome rules.
// Matches with a club outside the group, or without a final score, do not
// count. Records come back in group order, zero-filled for clubs that never
// met a fellow member.
pub fn table(group: &[String], matches: &[Match]) -> Vec<H2hRecord> {
    let mut records: Vec<H2hRecord> = group.iter().map(|t| H2hRecord::new(t)).collect();

    for m in matches {
        let Some((home_goals, away_goals)) = m.result() else {
            continue;
        };
        let home = group.iter().position(|t| t == &m.home);
        let away = group.iter().position(|t| t == &m.away);
        let (Some(hi), Some(ai)) = (home, away) else {
            continue;
        };

        records[hi].goals_for += home_goals;
        records[hi].goals_against += away_goals;
        records[ai].goals_for += away_goals;
        records[ai].goals_against += home_goals;

        if home_goals > away_goals {
            records[hi].points += WIN_POINTS;
        } else if home_goals < away_goals {
            records[ai].points += WIN_POINTS;
        } else {
            records[hi].points += DRAW_POINTS;
            records[ai].points += DRAW_POINTS;
        }
    }

    records
}

// Head-to-head criteria: points, then goal difference, then goals scored,
// then (when the rule is on) goals conceded ascending. Equal means the mini
// league cannot separate the two clubs.
pub fn compare_records(a: &H2hRecord, b: &H2hRecord, goals_against_rule: bool) -> Ordering {
    let ord = b.points.cmp(&a.points);
    if ord != Ordering::Equal {
        return ord;
    }

    let ord = b.goal_difference().cmp(&a.goal_difference());
    if ord != Ordering::Equal {
        return ord;
    }

    let ord = b.goals_for.cmp(&a.goals_for);
    if ord != Ordering::Equal {
        return ord;
    }

    if goals_against_rule {
        return a.goals_against.cmp(&b.goals_against);
    }

    Ordering::Equal
}

// Sub-order for a tied group. The sort is stable, so clubs the mini league
// cannot separate keep the order the caller handed in; a group of one, or a
// group whose members never met, comes back unchanged.
pub fn resolve(group: &[String], matches: &[Match], goals_against_rule: bool) -> Vec<H2hRecord> {
    let mut records = table(group, matches);
    if records.len() < 2 {
        return records;
    }

    records.sort_by(|a, b| compare_records(a, b, goals_against_rule));
    records
}
