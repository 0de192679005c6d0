mod archive;
mod data_loader;
mod head_to_head;
mod report;
mod seasons;
mod standings;
mod standings_context;
mod util;

use std::path::Path;
use std::process::ExitCode;

use data_loader::{load_config, load_season, load_seasons_index};
use standings::gen_standings;
use standings_context::{H2hMode, StandingsContext};

/*
    Reads the same documents the site pages fetch: JS/seasons-data.json on the
    archive home page, JSON/data.json and JSON/config.json inside a season
    directory. Point the first argument at either kind of directory; --check
    runs the sanity audit on top of the table.

    The tie-break policy can be adjusted from the command line:
      --fewer-played   fewer games played ranks better, before goal difference
      --goals-against  fewer goals conceded as a trailing criterion
      --pairwise       head-to-head judged two clubs at a time
      --no-h2h         skip head-to-head, go straight to the alphabet
*/

fn main() -> ExitCode {
    let args: Vec<String> = std::env::args().skip(1).collect();
    let run_checks = args.iter().any(|a| a == "--check");
    let base = args
        .iter()
        .find(|a| !a.starts_with("--"))
        .map(String::as_str)
        .unwrap_or(".");
    let base = Path::new(base);

    let mut listed_seasons = false;
    match load_seasons_index(&base.join("JS/seasons-data.json")) {
        Ok(mut index) => {
            seasons::sort_seasons(&mut index.seasons);
            report::output_seasons(&index.seasons);
            listed_seasons = true;
        }
        // Season directories simply have no index document.
        Err(err) if err.is_not_found() => {}
        Err(err) => {
            eprintln!("{err}");
            return ExitCode::FAILURE;
        }
    }

    let season = match load_season(&base.join("JSON/data.json")) {
        Ok(season) => season,
        Err(err) if err.is_not_found() && listed_seasons => return ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("{err}");
            return ExitCode::FAILURE;
        }
    };
    let config = match load_config(&base.join("JSON/config.json")) {
        Ok(config) => config,
        Err(err) => {
            eprintln!("{err}");
            return ExitCode::FAILURE;
        }
    };

    let mut ctx = StandingsContext::default();
    ctx.fewer_played_first = args.iter().any(|a| a == "--fewer-played");
    ctx.goals_against_rule = args.iter().any(|a| a == "--goals-against");
    if args.iter().any(|a| a == "--pairwise") {
        ctx.h2h = H2hMode::Pairwise;
    }
    if args.iter().any(|a| a == "--no-h2h") {
        ctx.h2h = H2hMode::Disabled;
    }
    ctx.adjustments = config.point_adjustments.clone();

    let matches = season.all_matches();
    let rows = gen_standings(&season.teams, &matches, &ctx);

    report::output_table(&rows, Some(&config));
    println!();
    report::output_legend(&config);

    if let Err(err) = archive::export_table(&base.join("classifica.csv"), &rows) {
        eprintln!("{err}");
        return ExitCode::FAILURE;
    }

    if run_checks && !test::sanity_report(&season.teams, &matches, &ctx) {
        return ExitCode::FAILURE;
    }

    ExitCode::SUCCESS
}
