//! `timetrack watch`: apply messages from stdin as they arrive.
//!
//! Each line is one JSON message, the same shape `replay` reads. Transitions
//! are printed as they happen. At end of input the open interval is closed
//! at the current wall-clock time and the totals are printed.
//! Malformed lines are logged and skipped so a single bad write from the
//! host does not end the session.
//!
//! When `screensaver.probe_command` is configured, the probe is sampled at
//! the recorded time of each message, no more often than the poll interval.

use std::io::{self, BufRead, Write};
use std::path::PathBuf;
use std::sync::mpsc;
use timetrack_core::replay::parse_line;
use timetrack_core::{
    load_config, Clock, Conditions, ScreenSaverPoller, ScreenSaverProbe, SystemClock, TimeTracker,
    TrackerConfig,
};
use timetrack_protocol::TransitionNotice;

use crate::error::CliError;
use crate::probe::CommandProbe;
use crate::report::Report;

pub fn run(config: Option<PathBuf>) -> Result<(), CliError> {
    let config = load_config(config)?;
    let poller = CommandProbe::from_argv(&config.screensaver.probe_command)
        .map(|probe| ScreenSaverPoller::with_interval(probe, config.screensaver.poll_interval()));
    match &poller {
        Some(poller) => tracing::debug!(
            interval_secs = poller.interval().num_seconds(),
            "Screensaver probe configured"
        ),
        None => tracing::debug!("No screensaver probe configured"),
    }

    let stdin = io::stdin();
    let stdout = io::stdout();
    let mut out = stdout.lock();
    watch(stdin.lock(), &mut out, &config, poller, &SystemClock)
}

fn watch<R, W, P>(
    input: R,
    out: &mut W,
    config: &TrackerConfig,
    mut poller: Option<ScreenSaverPoller<P>>,
    clock: &dyn Clock,
) -> Result<(), CliError>
where
    R: BufRead,
    W: Write,
    P: ScreenSaverProbe,
{
    let (notices_tx, notices_rx) = mpsc::channel::<TransitionNotice>();
    let mut session: Option<(TimeTracker, _)> = None;

    for (index, line) in input.lines().enumerate() {
        let line = line?;
        if line.trim().is_empty() {
            continue;
        }

        let message = match parse_line(index + 1, &line) {
            Ok(message) => message,
            Err(err) => {
                tracing::warn!(error = %err, "Skipping message");
                continue;
            }
        };
        let at = match message.timestamp() {
            Ok(at) => at,
            Err(info) => {
                tracing::warn!(line = index + 1, error = %info, "Skipping message");
                continue;
            }
        };

        let (tracker, _) = session.get_or_insert_with(|| {
            let mut tracker = TimeTracker::new(Conditions::default(), at);
            let tx = notices_tx.clone();
            let id = tracker.subscribe(move |notice| {
                let _ = tx.send(*notice);
            });
            (tracker, id)
        });

        if let Err(info) = tracker.handle(&message) {
            tracing::warn!(line = index + 1, error = %info, "Rejected message");
            continue;
        }
        if let Some(poller) = poller.as_mut() {
            poller.tick(tracker, at);
        }

        for notice in notices_rx.try_iter() {
            writeln!(out, "{notice}")?;
        }
        out.flush()?;
    }

    let Some((mut tracker, subscription)) = session else {
        writeln!(out, "No events recorded")?;
        return Ok(());
    };
    tracker.unsubscribe(subscription);

    let snapshot = tracker.snapshot(clock.now());
    let report = Report::new(&snapshot, &config.chart.buckets, &config.refresh);
    write!(out, "{}", report.render())?;
    Ok(())
}
