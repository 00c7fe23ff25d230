use anyhow::{Context, Result};
use clap::Parser;

use focusmode::{
    cli::Args,
    config::{DataDir, STATS_FILE},
    logging,
    stats::StatsTracker,
    tui::{self, App},
};

fn main() -> Result<()> {
    let args = Args::parse();

    let data = DataDir::resolve(args.data_dir.as_deref());
    data.ensure().context("failed to create data directory")?;

    let log = logging::init_file_logging(&data.logs_dir()).context("failed to start logging")?;
    match logging::cleanup_old_logs(&data.logs_dir()) {
        Ok(count) if count > 0 => tracing::info!("cleaned up {count} old log files"),
        Ok(_) => {}
        Err(err) => tracing::warn!(error = %err, "log cleanup failed"),
    }
    tracing::info!("logging to {}", log.path.display());

    let mut config = data.load_config();
    config.apply_args(&args);
    let settings = config
        .pomodoro_settings()
        .context("invalid pomodoro settings")?;

    let tracker = StatsTracker::load(data.file(STATS_FILE));
    let snapshot = if args.resume {
        data.load_snapshot()
    } else {
        None
    };

    let mut app = App::new(config, settings, data, tracker, snapshot);
    tui::run(&mut app).context("terminal error")?;
    Ok(())
}
