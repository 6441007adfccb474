//! thor2pgn - convert WTHOR game databases to PGN-like transcripts.
//!
//! Loads the tournament and player name tables once, then decodes each
//! `.wtb` database named on the command line (or found in a directory) and
//! writes one transcript per game. Transcripts go to the log by default, or
//! to `.pgn` files with `--save-pgn`.
//!
//! Files are processed one at a time. A file that cannot be read or is too
//! short to hold a header is skipped; anomalies inside a file (unknown IDs,
//! malformed moves, truncated record lists) are logged as warnings and the
//! remaining games are still converted.

use std::path::{Path, PathBuf};

use anyhow::Context;
use clap::Parser;
use serde::Serialize;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_appender::rolling::{RollingFileAppender, Rotation};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};
use wthor::{decode_database, NameTables, PgnOptions, WthorError};

mod config;
mod discover;
mod output;

use output::{PgnSink, SaveTarget};

/// Command-line arguments.
#[derive(Parser, Serialize, Debug)]
#[command(name = "thor2pgn", about = "Convert WTHOR files to PGN")]
struct Cli {
    /// Enable debug logging: arguments, file metadata and every decoded game.
    #[arg(long)]
    debug: bool,

    /// A `.wtb` file, or a directory whose `.wtb` files are all converted.
    #[arg(short, long)]
    file: PathBuf,

    /// Directory containing WTHOR.TRN and WTHOR.JOU.
    ///
    /// Defaults to `THOR2PGN_DATA_DIR`, then `../../wthor`.
    #[arg(long, value_name = "DIR")]
    data_dir: Option<PathBuf>,

    /// Save transcripts instead of logging them.
    ///
    /// Without a value, each database gets a `.pgn` next to it. A directory
    /// (existing, or written with a trailing `/`) receives one `.pgn` per
    /// database. Any other path collects every game in that single file.
    #[arg(long, value_name = "PATH")]
    save_pgn: Option<Option<PathBuf>>,

    /// Append the game result after the move list.
    #[arg(long)]
    add_result: bool,

    /// Number move lines by line index instead of by the first move's ply.
    #[arg(long)]
    line_index: bool,

    /// Also write logs to this file. Defaults to `THOR2PGN_LOG_FILE`.
    #[arg(long, value_name = "PATH")]
    log_file: Option<PathBuf>,
}

impl Cli {
    fn pgn_options(&self) -> PgnOptions {
        PgnOptions {
            line_index: self.line_index,
            add_result: self.add_result,
        }
    }
}

/// Error type for CLI operations.
#[derive(Debug, thiserror::Error)]
enum CliError {
    #[error("data directory {} does not exist", .0.display())]
    DataDirMissing(PathBuf),

    /// Name table or database decode failure.
    #[error(transparent)]
    Wthor(#[from] WthorError),

    #[error(transparent)]
    Discover(#[from] discover::DiscoverError),

    #[error(transparent)]
    Output(#[from] output::OutputError),

    #[error("invalid log file path: {}", .0.display())]
    InvalidLogFile(PathBuf),

    #[error("failed to open log file {}: {source}", .path.display())]
    LogInit {
        path: PathBuf,
        source: tracing_appender::rolling::InitError,
    },
}

/// Counters reported at the end of a run.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
struct RunSummary {
    files: usize,
    skipped: usize,
    games: usize,
}

/// Open the log file without rotation. Unlike `rolling::never`, a path that
/// cannot be created is reported instead of panicking.
fn log_file_appender(path: &Path) -> Result<RollingFileAppender, CliError> {
    let name = path
        .file_name()
        .ok_or_else(|| CliError::InvalidLogFile(path.to_path_buf()))?;
    let dir = path
        .parent()
        .filter(|p| !p.as_os_str().is_empty())
        .unwrap_or(Path::new("."));

    RollingFileAppender::builder()
        .rotation(Rotation::NEVER)
        .filename_prefix(name.to_string_lossy().into_owned())
        .build(dir)
        .map_err(|source| CliError::LogInit {
            path: path.to_path_buf(),
            source,
        })
}

/// Install the console subscriber, plus a non-blocking file layer when a log
/// file is configured. The returned guard must live until exit so buffered
/// file output is flushed.
fn init_tracing(debug: bool, log_file: Option<&Path>) -> Result<Option<WorkerGuard>, CliError> {
    let default_level = if debug { "debug" } else { "info" };

    let (file_layer, guard) = match log_file {
        Some(path) => {
            let appender = log_file_appender(path)?;
            let (non_blocking, guard) = tracing_appender::non_blocking(appender);
            let layer = fmt::layer()
                .with_writer(non_blocking)
                .with_ansi(false)
                .with_target(true)
                .with_line_number(true);
            (Some(layer), Some(guard))
        }
        None => (None, None),
    };

    tracing_subscriber::registry()
        .with(fmt::layer().with_target(false))
        .with(file_layer)
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level)))
        .init();

    Ok(guard)
}

/// Settings shared by every database converted in one run.
struct Conversion<'a> {
    tables: &'a NameTables,
    target: SaveTarget,
    options: PgnOptions,
    debug: bool,
}

impl Conversion<'_> {
    /// Transcripts are logged at info level only when they are not saved and
    /// debug output (which already carries them) is off.
    fn logs_transcripts(&self, saving: bool) -> bool {
        !saving && !self.debug
    }

    /// Decode one database and emit its transcripts. Returns the number of
    /// games written.
    fn process_file(
        &self,
        input: &Path,
        shared_sink: Option<&mut PgnSink>,
    ) -> Result<usize, CliError> {
        let bytes = std::fs::read(input).map_err(|source| WthorError::MissingResource {
            path: input.to_path_buf(),
            source,
        })?;
        let decoded = decode_database(&bytes, self.tables)?;
        tracing::debug!("Meta\n{}", decoded.metadata);

        for warning in &decoded.warnings {
            tracing::warn!("{}: {}", input.display(), warning);
        }

        let mut own_sink = match self.target.pgn_path_for(input)? {
            Some(path) => Some(PgnSink::create(&path)?),
            None => None,
        };
        let mut sink = own_sink.as_mut().or(shared_sink);
        let log_info = self.logs_transcripts(sink.is_some());

        for (idx, game) in decoded.games.iter().enumerate() {
            tracing::debug!("Game {:03}\n{}", idx + 1, game);
            let pgn = game.to_pgn(&decoded.metadata, self.options);
            tracing::debug!("PGN\n{}", pgn);

            if let Some(sink) = sink.as_mut() {
                sink.write_game(&pgn)?;
            } else if log_info {
                tracing::info!("Game {:03} PGN\n{}\n{}\n", idx + 1, pgn, "-".repeat(40));
            }
        }

        if let Some(sink) = own_sink {
            tracing::debug!("Wrote {}", sink.path().display());
            sink.finish()?;
        }

        Ok(decoded.games.len())
    }

    /// Convert every input in order. A file that cannot be read or decoded
    /// is logged and counted as skipped; the rest are still converted.
    fn convert_all(&self, inputs: &[PathBuf]) -> Result<RunSummary, CliError> {
        let mut shared_sink = match &self.target {
            SaveTarget::SingleFile(path) => Some(PgnSink::create(path)?),
            _ => None,
        };

        let mut summary = RunSummary::default();
        for (i, input) in inputs.iter().enumerate() {
            tracing::info!("file {:03}: '{}'", i + 1, input.display());

            match self.process_file(input, shared_sink.as_mut()) {
                Ok(games) => {
                    summary.files += 1;
                    summary.games += games;
                }
                Err(CliError::Wthor(WthorError::TruncatedHeader { actual, .. })) => {
                    tracing::warn!(
                        "Skipping {}: file too small ({} bytes).",
                        input.display(),
                        actual
                    );
                    summary.skipped += 1;
                }
                Err(e) => {
                    tracing::error!("Error processing {}: {}", input.display(), e);
                    summary.skipped += 1;
                }
            }
        }

        if let Some(sink) = shared_sink {
            sink.finish()?;
        }

        Ok(summary)
    }
}

/// Run a whole conversion.
///
/// Fails only when the data directory or a name table is missing, or when
/// the inputs or a shared output file cannot be opened. Per-file problems
/// are logged and counted as skipped.
fn run(cli: &Cli) -> Result<RunSummary, CliError> {
    let data_dir = cli.data_dir.clone().unwrap_or_else(config::get_data_dir);
    if !data_dir.is_dir() {
        return Err(CliError::DataDirMissing(data_dir));
    }

    let tables = NameTables::load_from_dir(&data_dir)?;
    tracing::debug!(
        tournaments = tables.tournaments.len(),
        players = tables.players.len(),
        "Loaded name tables from {}",
        data_dir.display()
    );

    let inputs = discover::collect_inputs(&cli.file)?;
    tracing::debug!("Found {} WTB files to process.", inputs.len());

    let conversion = Conversion {
        tables: &tables,
        target: SaveTarget::from_arg(cli.save_pgn.clone()),
        options: cli.pgn_options(),
        debug: cli.debug,
    };
    conversion.convert_all(&inputs)
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    let log_file = cli.log_file.clone().or_else(config::get_log_file);
    let _guard = init_tracing(cli.debug, log_file.as_deref())
        .context("failed to initialise logging")?;

    if cli.debug {
        tracing::debug!("Args: {}", serde_json::to_string_pretty(&cli)?);
    }

    let summary = run(&cli).context("conversion failed")?;
    tracing::info!(
        "Converted {} games from {} files ({} skipped).",
        summary.games,
        summary.files,
        summary.skipped
    );

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use wthor::{NameKind, RECORD_SIZE};

    fn write_table(dir: &Path, kind: NameKind, names: &[&str]) {
        let mut buf = vec![0; 16];
        for name in names {
            let mut slot = vec![0; kind.record_width()];
            slot[..name.len()].copy_from_slice(name.as_bytes());
            buf.extend_from_slice(&slot);
        }
        std::fs::write(dir.join(kind.file_name()), buf).unwrap();
    }

    fn database(year: u16, games: &[(u8, &[u8])]) -> Vec<u8> {
        let mut buf = vec![20, 24, 1, 1];
        buf.extend_from_slice(&(games.len() as u32).to_le_bytes());
        buf.extend_from_slice(&0u16.to_le_bytes());
        buf.extend_from_slice(&year.to_le_bytes());
        buf.extend_from_slice(&[8, 0, 22, 0]);
        for (score, moves) in games {
            let mut record = vec![0, 0, 0, 0, 1, 0, *score, 0];
            record.extend_from_slice(moves);
            record.resize(RECORD_SIZE, 0);
            buf.extend_from_slice(&record);
        }
        buf
    }

    fn setup() -> tempfile::TempDir {
        let tempdir = tempfile::tempdir().expect("failed to create temp dir");
        let data = tempdir.path().join("data");
        std::fs::create_dir(&data).unwrap();
        write_table(&data, NameKind::Tournaments, &["Paris"]);
        write_table(&data, NameKind::Players, &["Dupont", "Tamenori"]);

        let games = tempdir.path().join("games");
        std::fs::create_dir(&games).unwrap();
        std::fs::write(
            games.join("WTH_1977.wtb"),
            database(1977, &[(33, &[45, 56]), (40, &[56, 66, 65])]),
        )
        .unwrap();
        std::fs::write(games.join("WTH_1978.wtb"), database(1978, &[(32, &[56])])).unwrap();
        // Too short for a header
        std::fs::write(games.join("broken.wtb"), [0u8; 8]).unwrap();
        tempdir
    }

    fn parse(args: &[&str]) -> Cli {
        Cli::try_parse_from(std::iter::once("thor2pgn").chain(args.iter().copied()))
            .expect("failed to parse args")
    }

    #[test]
    fn test_save_pgn_flag_forms() {
        assert_eq!(parse(&["-f", "x.wtb"]).save_pgn, None);
        assert_eq!(parse(&["-f", "x.wtb", "--save-pgn"]).save_pgn, Some(None));
        assert_eq!(
            parse(&["-f", "x.wtb", "--save-pgn", "out.pgn"]).save_pgn,
            Some(Some(PathBuf::from("out.pgn")))
        );
    }

    #[test]
    fn test_file_is_required() {
        assert!(Cli::try_parse_from(["thor2pgn"]).is_err());
    }

    #[test]
    fn test_run_writes_pgn_next_to_each_database() {
        let tempdir = setup();
        let data = tempdir.path().join("data");
        let games = tempdir.path().join("games");

        let cli = parse(&[
            "-f",
            games.to_str().unwrap(),
            "--data-dir",
            data.to_str().unwrap(),
            "--save-pgn",
            "--add-result",
        ]);
        let summary = run(&cli).unwrap();
        assert_eq!(
            summary,
            RunSummary {
                files: 2,
                skipped: 1,
                games: 3
            }
        );

        let text = std::fs::read_to_string(games.join("WTH_1977.pgn")).unwrap();
        assert!(text.starts_with(
            "[Event \"Paris - 1977\"]\n\
             [Date \"1977\"]\n\
             [Black \"Dupont\"]\n\
             [White \"Tamenori\"]\n\
             [Result \"33-31\"]\n\
             1. E4 F5\n\
             33-31\n"
        ));
        assert!(text.contains("1. F5 F6\n3. E6\n40-24\n"));
        assert!(games.join("WTH_1978.pgn").exists());
        assert!(!games.join("broken.pgn").exists());
    }

    #[test]
    fn test_run_collects_games_in_single_file() {
        let tempdir = setup();
        let data = tempdir.path().join("data");
        let games = tempdir.path().join("games");
        let out = tempdir.path().join("out/all.pgn");

        let cli = parse(&[
            "-f",
            games.to_str().unwrap(),
            "--data-dir",
            data.to_str().unwrap(),
            "--save-pgn",
            out.to_str().unwrap(),
            "--line-index",
        ]);
        run(&cli).unwrap();

        let text = std::fs::read_to_string(&out).unwrap();
        assert_eq!(text.matches("[Event ").count(), 3);
        assert!(text.contains("1. F5 F6\n2. E6\n"));
        assert!(text.contains("[Event \"Paris - 1978\"]"));
    }

    #[test]
    fn test_run_fails_without_name_tables() {
        let tempdir = tempfile::tempdir().expect("failed to create temp dir");
        let cli = parse(&[
            "-f",
            "x.wtb",
            "--data-dir",
            tempdir.path().to_str().unwrap(),
        ]);
        assert!(matches!(
            run(&cli),
            Err(CliError::Wthor(WthorError::MissingResource { .. }))
        ));
    }

    #[test]
    fn test_run_fails_without_data_dir() {
        let tempdir = tempfile::tempdir().expect("failed to create temp dir");
        let missing = tempdir.path().join("nope");
        let cli = parse(&["-f", "x.wtb", "--data-dir", missing.to_str().unwrap()]);
        assert!(matches!(run(&cli), Err(CliError::DataDirMissing(_))));
    }

    #[test]
    fn test_unreadable_database_is_skipped_and_run_continues() {
        let tempdir = setup();
        let tables = NameTables::load_from_dir(&tempdir.path().join("data")).unwrap();
        let games = tempdir.path().join("games");
        let out = tempdir.path().join("all.pgn");

        let conversion = Conversion {
            tables: &tables,
            target: SaveTarget::SingleFile(out.clone()),
            options: PgnOptions::default(),
            debug: false,
        };
        let inputs = vec![games.join("missing.wtb"), games.join("WTH_1977.wtb")];
        let summary = conversion.convert_all(&inputs).unwrap();
        assert_eq!(
            summary,
            RunSummary {
                files: 1,
                skipped: 1,
                games: 2
            }
        );

        let text = std::fs::read_to_string(&out).unwrap();
        assert_eq!(text.matches("[Event \"Paris - 1977\"]").count(), 2);
    }

    #[test]
    fn test_transcripts_logged_only_without_save_or_debug() {
        let tables = NameTables::default();
        let mut conversion = Conversion {
            tables: &tables,
            target: SaveTarget::Log,
            options: PgnOptions::default(),
            debug: false,
        };
        assert!(conversion.logs_transcripts(false));
        assert!(!conversion.logs_transcripts(true));

        conversion.debug = true;
        assert!(!conversion.logs_transcripts(false));
        assert!(!conversion.logs_transcripts(true));
    }

    #[test]
    fn test_uncreatable_log_file_is_an_error() {
        let tempdir = tempfile::tempdir().expect("failed to create temp dir");
        // A regular file where the log directory should be
        let blocker = tempdir.path().join("blocker");
        std::fs::write(&blocker, b"").unwrap();
        let path = blocker.join("logs/thor2pgn.log");

        assert!(matches!(
            log_file_appender(&path),
            Err(CliError::LogInit { .. })
        ));
    }

    #[test]
    fn test_log_file_appender_creates_file() {
        let tempdir = tempfile::tempdir().expect("failed to create temp dir");
        let path = tempdir.path().join("logs/thor2pgn.log");

        let _appender = log_file_appender(&path).expect("failed to open log file");
        assert!(path.exists());
    }

    #[test]
    fn test_args_serialize_for_debug_dump() {
        let cli = parse(&["-f", "x.wtb", "--save-pgn", "--debug"]);
        let json = serde_json::to_value(&cli).unwrap();
        assert_eq!(json["file"], "x.wtb");
        assert_eq!(json["debug"], true);
    }
}
