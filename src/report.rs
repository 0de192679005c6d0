use crate::data_loader::{Config, SeasonEntry, Zone};
use crate::seasons;
use crate::standings::TableRow;
use crate::util::signed;

// First zone whose position list contains the 1-based table position.
pub fn zone_for_position(config: &Config, position: usize) -> Option<&Zone> {
    config
        .positions
        .values()
        .find(|zone| zone.positions.contains(&position))
}

pub fn output_table(rows: &[TableRow], config: Option<&Config>) {
    println!(
        "|{0:>4} | {1:20} | {2:>3} {3:>3} {4:>3} {5:>3} {6:>3} | {7:>4} {8:>4} {9:>4} |",
        "Pos", "Squadra", "Pt", "G", "V", "N", "P", "GF", "GS", "DR",
    );

    for row in rows {
        let s = &row.stats;
        let zone = config
            .and_then(|c| zone_for_position(c, row.position))
            .map(|z| z.name.as_str())
            .unwrap_or("");

        println!(
            "|{0:>4} | {1:20} | {2:>3} {3:>3} {4:>3} {5:>3} {6:>3} | {7:>4} {8:>4} {9:>4} | {10}",
            row.position,
            s.name,
            s.points,
            s.played,
            s.won,
            s.drawn,
            s.lost,
            s.goals_for,
            s.goals_against,
            signed(s.goal_difference),
            zone,
        );
    }
}

pub fn output_legend(config: &Config) {
    for zone in config.positions.values() {
        println!("  {0}: {1}", zone.name, zone.description);
    }
}

// Expects the list already ordered by seasons::sort_seasons.
pub fn output_seasons(seasons: &[SeasonEntry]) {
    let current = seasons::current_season(seasons).map(|s| s.year.clone());

    for season in seasons {
        let champion = season
            .champion
            .as_deref()
            .map(str::trim)
            .filter(|c| !c.is_empty())
            .unwrap_or("-");
        let marker = if current.as_deref() == Some(season.year.as_str()) {
            "  [in corso]"
        } else {
            ""
        };

        println!("|{0:10} | {1:28} | {2:20}{3}", season.year, season.title, champion, marker);
    }
}
