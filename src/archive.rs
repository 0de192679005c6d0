// CSV snapshot of a computed table, one record per club, headed with the
// same field names the JSON rows expose.

use std::io;
use std::path::{Path, PathBuf};

use thiserror::Error;

use crate::standings::TableRow;

#[derive(Debug, Error)]
pub enum ArchiveError {
    #[error("cannot write {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("cannot encode {}: {source}", .path.display())]
    Csv {
        path: PathBuf,
        #[source]
        source: csv::Error,
    },
}

pub fn export_table(path: &Path, rows: &[TableRow]) -> Result<(), ArchiveError> {
    let csv_err = |source| ArchiveError::Csv {
        path: path.to_path_buf(),
        source,
    };

    let mut writer = csv::Writer::from_path(path).map_err(csv_err)?;

    writer
        .write_record([
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
        ])
        .map_err(csv_err)?;

    for row in rows {
        let s = &row.stats;
        writer
            .write_record([
                row.position.to_string(),
                s.name.clone(),
                s.points.to_string(),
                s.played.to_string(),
                s.won.to_string(),
                s.drawn.to_string(),
                s.lost.to_string(),
                s.goals_for.to_string(),
                s.goals_against.to_string(),
                s.goal_difference.to_string(),
            ])
            .map_err(csv_err)?;
    }

    writer.flush().map_err(|source| ArchiveError::Io {
        path: path.to_path_buf(),
        source,
    })
}
