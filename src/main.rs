// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Mapty-Tracker command driver
//!
//! Reads one command per line from stdin and feeds it to a file-backed
//! session. This stands in for the browser event loop; it renders plain
//! text only.

use std::io::{self, BufRead, Write};

use anyhow::Context;
use mapty_tracker::{
    config::Config,
    db::KeyValueStore,
    error::AppError,
    models::{Coordinates, Workout, WorkoutDetails, WorkoutInput, WorkoutKind},
    services::{RestoreOutcome, SessionController},
    time_utils::format_utc_rfc3339,
};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

const HELP: &str = "commands:
  add running LAT LNG DISTANCE_KM DURATION_MIN CADENCE
  add cycling LAT LNG DISTANCE_KM DURATION_MIN ELEVATION_GAIN
  select ID
  list
  stats
  save
  reset
  quit";

fn main() -> anyhow::Result<()> {
    let config = Config::from_env().context("Failed to load configuration")?;
    init_logging(config.json_logs);

    tracing::info!(
        dir = %config.storage_dir.display(),
        key = %config.storage_key,
        "Starting Mapty-Tracker"
    );

    let mut session = mapty_tracker::open_session(&config);
    match session.restore_session() {
        RestoreOutcome::Restored(count) => println!("restored {} workout(s)", count),
        RestoreOutcome::Discarded(err) => {
            tracing::error!(error = %err, "Stored workouts could not be restored");
            println!("could not restore saved workouts ({}); starting empty", err);
        }
    }
    // No location service here; positions come with each command.
    session.location_unavailable();

    let stdin = io::stdin();
    let mut stdout = io::stdout();
    for line in stdin.lock().lines() {
        let line = line.context("Failed to read stdin")?;
        let words: Vec<&str> = line.split_whitespace().collect();
        match words.as_slice() {
            [] => continue,
            ["quit"] | ["exit"] => break,
            ["help"] => println!("{}", HELP),
            ["add", kind, lat, lng, distance, duration, extra] => {
                handle_add(&mut session, kind, [lat, lng, distance, duration, extra])
            }
            ["select", id] => match session.select_workout(id) {
                Some(selection) => println!(
                    "centering on [{}, {}]: {} ({} click(s))",
                    selection.coordinates.lat,
                    selection.coordinates.lng,
                    selection.workout.popup_label(),
                    selection.workout.click_count()
                ),
                None => println!("no workout with id {}", id),
            },
            ["list"] => {
                for workout in session.workouts() {
                    println!("{}", render_line(workout));
                }
            }
            ["stats"] => {
                let stats = session.stats();
                println!("{}", serde_json::to_string_pretty(&stats)?);
            }
            ["save"] => match session.save_session() {
                Ok(()) => println!("saved"),
                Err(err) => println!("save failed: {}", err),
            },
            ["reset"] => match session.reset_session() {
                Ok(()) => println!("all workouts removed"),
                Err(err) => println!("reset failed: {}", err),
            },
            _ => println!("unrecognised command; try `help`"),
        }
        stdout.flush()?;
    }

    Ok(())
}

fn handle_add<S: KeyValueStore>(
    session: &mut SessionController<S>,
    kind: &str,
    numbers: [&&str; 5],
) {
    let kind: WorkoutKind = match kind.parse() {
        Ok(kind) => kind,
        Err(err) => {
            println!("{}", err);
            return;
        }
    };
    // Unparseable numbers become NaN and are rejected by validation.
    let [lat, lng, distance, duration, extra] = numbers.map(|s| s.parse().unwrap_or(f64::NAN));
    let input = WorkoutInput {
        kind,
        coordinates: Coordinates::new(lat, lng),
        distance_km: distance,
        duration_min: duration,
        extra,
    };

    match session.submit_workout(input) {
        Ok(submission) => {
            println!("{}", render_line(&submission.workout));
            if let Some(err) = submission.save_error {
                println!("warning: not saved ({})", err);
            }
        }
        Err(AppError::Validation(details)) => {
            tracing::debug!(details = %details, "Rejected input");
            println!("{}", AppError::INVALID_INPUT_ALERT);
        }
        Err(err) => println!("error: {}", err),
    }
}

fn render_line(workout: &Workout) -> String {
    let extra = match *workout.details() {
        WorkoutDetails::Running { cadence_spm, .. } => format!("{} spm", cadence_spm),
        WorkoutDetails::Cycling {
            elevation_gain_m, ..
        } => format!("{} m", elevation_gain_m),
    };
    format!(
        "{}  {}  {}  {} km  {} min  {}  {}",
        workout.id(),
        format_utc_rfc3339(workout.created_at()),
        workout.popup_label(),
        workout.distance_km(),
        workout.duration_min(),
        workout.metric_label(),
        extra
    )
}

/// Initialize structured logging on stderr.
fn init_logging(json: bool) {
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("mapty_tracker=debug,info"));

    let registry = tracing_subscriber::registry().with(filter);
    if json {
        registry
            .with(
                tracing_subscriber::fmt::layer()
                    .json()
                    .with_target(false)
                    .flatten_event(true)
                    .with_writer(io::stderr),
            )
            .init();
    } else {
        registry
            .with(
                tracing_subscriber::fmt::layer()
                    .compact()
                    .with_writer(io::stderr),
            )
            .init();
    }
}
