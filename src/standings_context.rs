use std::collections::HashMap;

// How a tied group is re-ranked on direct meetings.
//
// Grouped builds one mini league out of every club sharing the tie key and is
// the house rule. Pairwise re-ranks two clubs at a time from their own
// meetings only; with three or more tied clubs the two can disagree when
// direct results are circular, so the mode stays configurable instead of
// being folded into one behavior.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum H2hMode {
    Grouped,
    Pairwise,
    Disabled,
}

// Tunable policy for one standings computation. All configuration travels
// through here; the engine reads nothing ambient.
#[derive(Debug, Clone)]
pub struct StandingsContext {
    // Criterion between points and goal difference: fewer games played ranks
    // better. Useful mid-season when rounds are uneven.
    pub fewer_played_first: bool,

    // Trailing criterion after goals scored: fewer goals conceded ranks
    // better. Applies to the head-to-head mini league as well.
    pub goals_against_rule: bool,

    pub h2h: H2hMode,

    // Administrative penalties and bonuses, by team name. Names not on the
    // roster are ignored.
    pub adjustments: HashMap<String, i32>,
}

impl StandingsContext {
    pub fn default() -> Self {
        Self {
            fewer_played_first: false,
            goals_against_rule: false,
            h2h: H2hMode::Grouped,
            adjustments: HashMap::new(),
        }
    }
}
