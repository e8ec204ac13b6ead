//! Example panel run demonstrating the refresh loop
//!
//! Drives a headless spell timer panel with a few sample timers that re-trigger
//! shortly after they come back up. In production the timers come from the
//! trigger engine and the host is a real overlay window.

use std::time::Duration;

use chrono::{Local, NaiveDateTime, TimeDelta};
use spelltimer_core::{AppConfig, AppConfigExt, SpellTimer};
use spelltimer_overlay::{
    HeadlessHost, NoopFocusAvoidance, SpellTimerPanel, WindowHandle, logging,
};

const TICK: Duration = Duration::from_millis(50);
const RUN_FOR: Duration = Duration::from_secs(30);
const RETRIGGER_AFTER_SECS: i64 = 2;

fn sample_timers(now: NaiveDateTime) -> Vec<SpellTimer> {
    let mut timers = vec![
        SpellTimer::new(1, "Interrupt").with_recast(8.0).with_display_order(0),
        SpellTimer::new(2, "Defensive").with_recast(15.0).with_display_order(1),
        SpellTimer::new(3, "Burst").with_recast(4.0).with_display_order(2),
        SpellTimer::new(4, "Raid Buff")
            .with_recast(20.0)
            .with_display_order(3)
            .with_dont_hide(true),
    ];
    for (i, timer) in timers.iter_mut().enumerate() {
        timer.match_time = Some(now - TimeDelta::seconds(i as i64));
        timer.style.background_alpha = 96;
    }
    timers
}

/// Re-trigger timers a little after they finish
fn retrigger(timers: &mut [SpellTimer], now: NaiveDateTime) {
    for timer in timers.iter_mut() {
        if timer.secs_since_due(now) > RETRIGGER_AFTER_SECS as f64 {
            timer.match_time = Some(now);
            tracing::debug!(id = timer.id, title = %timer.title, "Timer re-triggered");
        }
    }
}

#[tokio::main(flavor = "current_thread")]
async fn main() {
    let _guard = logging::init();

    let config = AppConfig::load();
    let mut panel = SpellTimerPanel::new("General", HeadlessHost::default());
    // No native window behind a headless host
    panel.on_source_initialized(WindowHandle(0), &NoopFocusAvoidance);

    let start = Local::now().naive_local();
    let mut timers = sample_timers(start);
    panel.set_timers(Some(timers.clone()));
    panel.on_loaded(&config, &config, start);

    let mut interval = tokio::time::interval(TICK);
    let mut last_report = start;

    tracing::info!(panel = panel.name(), "Panel running");

    loop {
        interval.tick().await;
        let now = Local::now().naive_local();
        if now - start > TimeDelta::from_std(RUN_FOR).unwrap_or(TimeDelta::MAX) {
            break;
        }

        retrigger(&mut timers, now);
        panel.set_timers(Some(timers.clone()));
        panel.tick(&config);

        if now - last_report >= TimeDelta::seconds(1) {
            last_report = now;
            let rows: Vec<String> = panel
                .displayed_ids()
                .into_iter()
                .filter_map(|id| panel.row(id))
                .map(|row| {
                    format!(
                        "{} {} ({:.0}%)",
                        row.title(),
                        row.time_text(),
                        row.progress() * 100.0
                    )
                })
                .collect();
            tracing::info!(shown = panel.is_shown(), rows = ?rows, "Panel state");
        }
    }

    panel.close();
}
