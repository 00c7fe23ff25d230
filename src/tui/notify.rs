use std::{
    path::Path,
    process::{Command, ExitStatus, Stdio},
};

use notify_rust::{Notification, Urgency};
use tracing::debug;

use crate::focus::{Phase, Transition};

const SOUNDS: &[(&str, &str)] = &[
    ("paplay", "/usr/share/sounds/freedesktop/stereo/complete.oga"),
    ("aplay", "/usr/share/sounds/sound-icons/guitar-11.wav"),
    ("aplay", "/usr/share/sounds/generic.wav"),
];

pub fn message(transition: &Transition) -> (&'static str, String) {
    match transition.next {
        Phase::LongBreak => (
            "Long Break Time!",
            format!(
                "{} pomodoros done. Take a longer break.",
                transition.focus_completed
            ),
        ),
        Phase::ShortBreak => ("Break Time!", "Time for a short break.".to_string()),
        Phase::Focus => (
            "Back to Focus!",
            "Break's over, let's get back to studying.".to_string(),
        ),
    }
}

/// Desktop notification and optional sound for a phase change. Failures are
/// logged and otherwise ignored.
pub fn phase_changed(transition: &Transition, notifications: bool, sound: bool) {
    if notifications {
        let (title, body) = message(transition);
        if let Err(err) = Notification::new()
            .summary(title)
            .body(&body)
            .appname("focusmode")
            .icon("alarm-clock")
            .urgency(Urgency::Critical)
            .show()
        {
            debug!(error = %err, "desktop notification failed");
        }
    }

    if sound {
        std::thread::spawn(|| {
            if let Some(status) = play_first_available(SOUNDS) {
                debug!(%status, "sound player exited");
            }
        });
    }
}

/// Run the first player whose sound file exists and wait for it to exit.
fn play_first_available(sounds: &[(&str, &str)]) -> Option<ExitStatus> {
    let (cmd, file) = sounds.iter().find(|(_, file)| Path::new(file).exists())?;
    Command::new(cmd)
        .arg(file)
        .stdout(Stdio::null())
        .stderr(Stdio::null())
        .status()
        .ok()
}
