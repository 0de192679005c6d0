use std::cmp::Ordering;
use std::collections::HashMap;

use serde::Serialize;

use crate::data_loader::Match;
use crate::head_to_head;
use crate::standings_context::{H2hMode, StandingsContext};
use crate::util::cmp_names;

pub const WIN_POINTS: i32 = 3;
pub const DRAW_POINTS: i32 = 1;

// Season totals for one club. Field names serialize the way the table
// renderer expects them, so a row can be displayed without recomputation.
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct TeamStats {
    pub name: String,
    pub points: i32,
    pub played: u32,
    pub won: u32,
    pub drawn: u32,
    pub lost: u32,
    pub goals_for: u32,
    pub goals_against: u32,
    pub goal_difference: i32,
}

impl TeamStats {
    fn new(name: &str) -> Self {
        Self {
            name: name.to_owned(),
            points: 0,
            played: 0,
            won: 0,
            drawn: 0,
            lost: 0,
            goals_for: 0,
            goals_against: 0,
            goal_difference: 0,
        }
    }
}

// One line of the final table. Positions are 1-based and strictly increasing:
// the comparator chain never leaves two clubs level.
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct TableRow {
    pub position: usize,
    #[serde(flatten)]
    pub stats: TeamStats,
}

// Full pipeline for one season: aggregate, adjust, order, number. Pure in its
// inputs; recomputed from scratch on every call.
pub fn gen_standings(teams: &[String], matches: &[Match], ctx: &StandingsContext) -> Vec<TableRow> {
    let mut stats = aggregate(teams, matches);

    for rec in stats.iter_mut() {
        if let Some(delta) = ctx.adjustments.get(&rec.name) {
            rec.points += delta;
        }
    }

    // Derived once here, after every match and adjustment has landed.
    for rec in stats.iter_mut() {
        rec.goal_difference = rec.goals_for as i32 - rec.goals_against as i32;
    }

    // Tie keys snapshotted before sorting, so the head-to-head step can
    // rebuild the exact set of clubs sharing one.
    let keys: Vec<(String, i32, u32)> = stats
        .iter()
        .map(|rec| (rec.name.clone(), rec.points, rec.played))
        .collect();

    stats.sort_by(|a, b| numeric_order(a, b, ctx).then_with(|| cmp_names(&a.name, &b.name)));

    if ctx.h2h != H2hMode::Disabled {
        apply_head_to_head(&mut stats, &keys, matches, ctx);
    }

    stats
        .into_iter()
        .enumerate()
        .map(|(i, stats)| TableRow {
            position: i + 1,
            stats,
        })
        .collect()
}

// One record per roster club, zero-filled for clubs yet to play. A match
// counts only when both clubs are on the roster and both scores are in;
// anything else is skipped without comment. Duplicate roster names collapse
// to their first occurrence.
pub fn aggregate(teams: &[String], matches: &[Match]) -> Vec<TeamStats> {
    let mut stats: Vec<TeamStats> = Vec::new();
    let mut index: HashMap<&str, usize> = HashMap::new();

    for name in teams {
        if index.contains_key(name.as_str()) {
            continue;
        }
        index.insert(name, stats.len());
        stats.push(TeamStats::new(name));
    }

    for m in matches {
        let Some((home_goals, away_goals)) = m.result() else {
            continue;
        };
        let (Some(&hi), Some(&ai)) = (index.get(m.home.as_str()), index.get(m.away.as_str()))
        else {
            continue;
        };

        stats[hi].played += 1;
        stats[ai].played += 1;
        stats[hi].goals_for += home_goals;
        stats[hi].goals_against += away_goals;
        stats[ai].goals_for += away_goals;
        stats[ai].goals_against += home_goals;

        if home_goals > away_goals {
            stats[hi].points += WIN_POINTS;
            stats[hi].won += 1;
            stats[ai].lost += 1;
        } else if home_goals < away_goals {
            stats[ai].points += WIN_POINTS;
            stats[ai].won += 1;
            stats[hi].lost += 1;
        } else {
            stats[hi].points += DRAW_POINTS;
            stats[ai].points += DRAW_POINTS;
            stats[hi].drawn += 1;
            stats[ai].drawn += 1;
        }
    }

    stats
}

// The purely numeric part of the chain. Every criterion is a plain integer
// comparison, so this order is always total and cheap.
fn numeric_order(a: &TeamStats, b: &TeamStats, ctx: &StandingsContext) -> Ordering {
    let ord = b.points.cmp(&a.points);
    if ord != Ordering::Equal {
        return ord;
    }

    if ctx.fewer_played_first {
        let ord = a.played.cmp(&b.played);
        if ord != Ordering::Equal {
            return ord;
        }
    }

    let ord = b.goal_difference.cmp(&a.goal_difference);
    if ord != Ordering::Equal {
        return ord;
    }

    let ord = b.goals_for.cmp(&a.goals_for);
    if ord != Ordering::Equal {
        return ord;
    }

    if ctx.goals_against_rule {
        let ord = a.goals_against.cmp(&b.goals_against);
        if ord != Ordering::Equal {
            return ord;
        }
    }

    Ordering::Equal
}

// Walks the sorted table and re-ranks every maximal run the numeric criteria
// left level. Mini leagues are built lazily, one tied run at a time.
fn apply_head_to_head(
    stats: &mut [TeamStats],
    keys: &[(String, i32, u32)],
    matches: &[Match],
    ctx: &StandingsContext,
) {
    let mut start = 0;
    while start < stats.len() {
        let mut end = start + 1;
        while end < stats.len() && numeric_order(&stats[start], &stats[end], ctx) == Ordering::Equal
        {
            end += 1;
        }
        if end - start > 1 {
            reorder_run(&mut stats[start..end], keys, matches, ctx);
        }
        start = end;
    }
}

// The tie key is points alone, or points plus games played when the
// fewer-played rule is active. The mini league must cover every club sharing
// the key, which can be broader than the run itself: clubs level on points
// but split by goal difference still belong to the same mini league.
fn tie_group(sample: &TeamStats, keys: &[(String, i32, u32)], ctx: &StandingsContext) -> Vec<String> {
    let mut group: Vec<String> = keys
        .iter()
        .filter(|(_, points, played)| {
            *points == sample.points && (!ctx.fewer_played_first || *played == sample.played)
        })
        .map(|(name, _, _)| name.clone())
        .collect();
    group.sort_by(|a, b| cmp_names(a, b));
    group
}

fn reorder_run(
    run: &mut [TeamStats],
    keys: &[(String, i32, u32)],
    matches: &[Match],
    ctx: &StandingsContext,
) {
    match ctx.h2h {
        H2hMode::Grouped => {
            // One mini league for the whole key group; clubs it cannot
            // separate stay alphabetical, since the group is resolved from
            // alphabetical order and the sort is stable.
            let group = tie_group(&run[0], keys, ctx);
            let order = head_to_head::resolve(&group, matches, ctx.goals_against_rule);
            run.sort_by_key(|rec| {
                order
                    .iter()
                    .position(|r| r.team == rec.name)
                    .unwrap_or(usize::MAX)
            });
        }
        H2hMode::Pairwise => {
            // Two clubs at a time, each pair judged on its own meetings
            // only. Circular results settle by insertion order.
            for i in 1..run.len() {
                let mut j = i;
                while j > 0 && pair_order(&run[j - 1], &run[j], matches, ctx) == Ordering::Greater {
                    run.swap(j - 1, j);
                    j -= 1;
                }
            }
        }
        H2hMode::Disabled => {}
    }
}

fn pair_order(a: &TeamStats, b: &TeamStats, matches: &[Match], ctx: &StandingsContext) -> Ordering {
    let group = [a.name.clone(), b.name.clone()];
    let records = head_to_head::table(&group, matches);
    head_to_head::compare_records(&records[0], &records[1], ctx.goals_against_rule)
        .then_with(|| cmp_names(&a.name, &b.name))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::standings_context::H2hMode;

    fn played(home: &str, hs: u32, away: &str, aw: u32) -> Match {
        Match {
            home: home.to_owned(),
            away: away.to_owned(),
            home_score: Some(hs),
            away_score: Some(aw),
        }
    }

    fn unplayed(home: &str, away: &str) -> Match {
        Match {
            home: home.to_owned(),
            away: away.to_owned(),
            home_score: None,
            away_score: None,
        }
    }

    fn roster(names: &[&str]) -> Vec<String> {
        names.iter().map(|n| (*n).to_owned()).collect()
    }

    fn order(rows: &[TableRow]) -> Vec<&str> {
        rows.iter().map(|r| r.stats.name.as_str()).collect()
    }

    #[test]
    fn outcomes_accumulate_per_club() {
        let teams = roster(&["Inter", "Milan", "Napoli"]);
        let matches = vec![
            played("Inter", 3, "Milan", 1),
            played("Milan", 2, "Napoli", 2),
            unplayed("Napoli", "Inter"),
        ];

        let stats = aggregate(&teams, &matches);
        let inter = &stats[0];
        assert_eq!(
            (inter.points, inter.played, inter.won, inter.drawn, inter.lost),
            (3, 1, 1, 0, 0)
        );
        assert_eq!((inter.goals_for, inter.goals_against), (3, 1));

        let milan = &stats[1];
        assert_eq!((milan.points, milan.played, milan.won, milan.drawn, milan.lost), (1, 2, 0, 1, 1));

        let napoli = &stats[2];
        assert_eq!((napoli.points, napoli.played, napoli.drawn), (1, 1, 1));
    }

    #[test]
    fn half_scored_and_foreign_matches_are_skipped() {
        let teams = roster(&["Inter", "Milan"]);
        let matches = vec![
            Match {
                home: "Inter".to_owned(),
                away: "Milan".to_owned(),
                home_score: Some(2),
                away_score: None,
            },
            played("Inter", 4, "Feralpisalò", 0),
        ];

        let stats = aggregate(&teams, &matches);
        assert!(stats.iter().all(|rec| rec.played == 0));
        assert!(stats.iter().all(|rec| rec.points == 0));
    }

    #[test]
    fn idle_clubs_get_a_zero_filled_row_and_empty_roster_an_empty_table() {
        let rows = gen_standings(
            &roster(&["Inter", "Lecce"]),
            &[],
            &StandingsContext::default(),
        );
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0].position, 1);
        assert_eq!(rows[1].stats.points, 0);

        assert!(gen_standings(&[], &[], &StandingsContext::default()).is_empty());
    }

    #[test]
    fn never_met_clubs_fall_back_to_alphabetical_order() {
        let teams = roster(&["Juventus", "Inter"]);
        let rows = gen_standings(&teams, &[], &StandingsContext::default());
        assert_eq!(order(&rows), ["Inter", "Juventus"]);
    }

    #[test]
    fn adjusted_points_drive_every_later_criterion() {
        let teams = roster(&["Bologna", "Fiorentina", "Genoa", "Udinese"]);
        // Bologna takes 10 raw points, Fiorentina 9; a -2 adjustment must
        // rank Bologna as an 8-point side.
        let matches = vec![
            played("Bologna", 1, "Genoa", 0),
            played("Bologna", 2, "Udinese", 0),
            played("Bologna", 3, "Genoa", 0),
            played("Bologna", 1, "Udinese", 1),
            played("Fiorentina", 1, "Genoa", 0),
            played("Fiorentina", 2, "Udinese", 0),
            played("Fiorentina", 5, "Genoa", 0),
        ];

        let mut ctx = StandingsContext::default();
        ctx.adjustments.insert("Bologna".to_owned(), -2);
        // Unknown names are a no-op.
        ctx.adjustments.insert("Palermo".to_owned(), -30);

        let rows = gen_standings(&teams, &matches, &ctx);
        assert_eq!(order(&rows)[..2], ["Fiorentina", "Bologna"]);
        assert_eq!(rows[1].stats.points, 8);
        assert_eq!(rows[1].stats.won, 3);
    }

    #[test]
    fn three_way_cycle_resolves_on_overall_goal_numbers() {
        let teams = roster(&["Atalanta", "Bologna", "Como"]);
        let matches = vec![
            played("Atalanta", 2, "Bologna", 0),
            played("Bologna", 1, "Como", 0),
            played("Como", 1, "Atalanta", 0),
        ];

        let rows = gen_standings(&teams, &matches, &StandingsContext::default());
        // Everyone at three points; overall goal difference (+1, 0, -1)
        // settles it before head-to-head is ever consulted.
        assert_eq!(order(&rows), ["Atalanta", "Como", "Bologna"]);
        assert!(rows.iter().all(|r| r.stats.points == 3));
    }

    // Five clubs, three of them level on points, goal difference and goals
    // scored. Atalanta beat Bologna directly; Como met neither. The grouped
    // mini league ranks Como above Bologna on its own goal difference, while
    // the pairwise mode can only fall back to the alphabet for Como's pairs.
    fn divergence_fixture() -> (Vec<String>, Vec<Match>) {
        let teams = roster(&["Atalanta", "Bologna", "Como", "Desenzano", "Empoli"]);
        let matches = vec![
            played("Atalanta", 1, "Bologna", 0),
            played("Empoli", 2, "Atalanta", 1),
            played("Bologna", 2, "Desenzano", 1),
            played("Como", 1, "Desenzano", 0),
            played("Empoli", 2, "Como", 1),
            played("Empoli", 1, "Desenzano", 0),
        ];
        (teams, matches)
    }

    #[test]
    fn grouped_head_to_head_ranks_the_whole_tied_group_at_once() {
        let (teams, matches) = divergence_fixture();
        let rows = gen_standings(&teams, &matches, &StandingsContext::default());
        assert_eq!(order(&rows), ["Empoli", "Atalanta", "Como", "Bologna", "Desenzano"]);

        let tied: Vec<i32> = rows[1..4].iter().map(|r| r.stats.points).collect();
        assert_eq!(tied, [3, 3, 3]);
    }

    #[test]
    fn pairwise_head_to_head_judges_each_pair_in_isolation() {
        let (teams, matches) = divergence_fixture();
        let mut ctx = StandingsContext::default();
        ctx.h2h = H2hMode::Pairwise;

        let rows = gen_standings(&teams, &matches, &ctx);
        assert_eq!(order(&rows), ["Empoli", "Atalanta", "Bologna", "Como", "Desenzano"]);
    }

    #[test]
    fn disabled_head_to_head_goes_straight_to_the_alphabet() {
        let (teams, matches) = divergence_fixture();
        let mut ctx = StandingsContext::default();
        ctx.h2h = H2hMode::Disabled;

        let rows = gen_standings(&teams, &matches, &ctx);
        assert_eq!(order(&rows)[1..4], ["Atalanta", "Bologna", "Como"]);
    }

    #[test]
    fn fewer_played_first_outranks_goal_difference_when_enabled() {
        let teams = roster(&["Parma", "Pisa", "Roma", "Salernitana"]);
        // Parma: six points from three games with a fat goal difference.
        // Pisa: six points from two games, slimmer difference.
        let matches = vec![
            played("Parma", 3, "Roma", 0),
            played("Parma", 2, "Salernitana", 0),
            played("Roma", 1, "Parma", 0),
            played("Pisa", 1, "Roma", 0),
            played("Pisa", 1, "Salernitana", 0),
        ];

        let off = gen_standings(&teams, &matches, &StandingsContext::default());
        assert_eq!(order(&off)[..2], ["Parma", "Pisa"]);

        let mut ctx = StandingsContext::default();
        ctx.fewer_played_first = true;
        let on = gen_standings(&teams, &matches, &ctx);
        assert_eq!(order(&on)[..2], ["Pisa", "Parma"]);
    }

    #[test]
    fn goals_against_rule_changes_nothing_once_difference_and_scored_are_level() {
        // Equal difference and equal goals scored force equal goals
        // conceded, so the extra criterion can never flip a pair. It stays
        // available because the policy exists in the wild.
        let (teams, matches) = divergence_fixture();
        let mut ctx = StandingsContext::default();
        ctx.goals_against_rule = true;

        assert_eq!(
            gen_standings(&teams, &matches, &ctx),
            gen_standings(&teams, &matches, &StandingsContext::default())
        );
    }

    #[test]
    fn positions_are_strict_and_rows_expose_renderer_names() {
        let (teams, matches) = divergence_fixture();
        let rows = gen_standings(&teams, &matches, &StandingsContext::default());

        let positions: Vec<usize> = rows.iter().map(|r| r.position).collect();
        assert_eq!(positions, (1..=rows.len()).collect::<Vec<_>>());

        let value = serde_json::to_value(&rows[0]).unwrap();
        for key in [
            "position",
            "name",
            "points",
            "played",
            "won",
            "drawn",
            "lost",
            "goalsFor",
            "goalsAgainst",
            "goalDifference",
        ] {
            assert!(value.get(key).is_some(), "missing {key}");
        }
    }
}
