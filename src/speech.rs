//! Text-to-speech playback for card terms.
//!
//! Speech is fire-and-forget: nothing in the scheduler or session reads its
//! result, and the app only uses the return value to report a missing engine.

use std::process::{Child, Command, Stdio};

#[derive(Debug, Clone, PartialEq)]
pub struct SpeechOptions {
    /// Voice or language passed to the engine.
    pub voice: String,
    /// Relative speed, 1.0 being the engine's normal rate.
    pub rate: f32,
    pub pitch: f32,
}

impl Default for SpeechOptions {
    fn default() -> Self {
        Self {
            voice: "cmn".to_string(),
            rate: 0.8,
            pitch: 1.0,
        }
    }
}

pub trait Speaker {
    /// Starts speaking `text`, cancelling any earlier utterance.
    /// Returns false when no speech engine is available.
    fn speak(&mut self, text: &str, options: &SpeechOptions) -> bool;
}

/// Used when speech is disabled.
#[derive(Debug, Default)]
pub struct SilentSpeaker;

impl Speaker for SilentSpeaker {
    fn speak(&mut self, _text: &str, _options: &SpeechOptions) -> bool {
        false
    }
}

/// Runs an espeak-compatible program (`-v voice -s wpm -p pitch text`).
#[derive(Debug)]
pub struct CommandSpeaker {
    program: String,
    current: Option<Child>,
}

const BASE_WORDS_PER_MINUTE: f32 = 175.0;
const BASE_PITCH: f32 = 50.0;

impl CommandSpeaker {
    pub fn new(program: impl Into<String>) -> Self {
        Self {
            program: program.into(),
            current: None,
        }
    }

    fn arguments(text: &str, options: &SpeechOptions) -> Vec<String> {
        let words_per_minute = (BASE_WORDS_PER_MINUTE * options.rate).round().max(80.0);
        let pitch = (BASE_PITCH * options.pitch).round().clamp(0.0, 99.0);
        vec![
            "-v".to_string(),
            options.voice.clone(),
            "-s".to_string(),
            format!("{}", words_per_minute as u32),
            "-p".to_string(),
            format!("{}", pitch as u32),
            text.to_string(),
        ]
    }

    fn cancel(&mut self) {
        if let Some(mut child) = self.current.take() {
            // Already-finished children only need reaping
            if let Ok(None) = child.try_wait() {
                let _ = child.kill();
            }
            let _ = child.wait();
        }
    }
}

impl Speaker for CommandSpeaker {
    fn speak(&mut self, text: &str, options: &SpeechOptions) -> bool {
        self.cancel();
        if text.trim().is_empty() {
            return false;
        }

        match Command::new(&self.program)
            .args(Self::arguments(text, options))
            .stdin(Stdio::null())
            .stdout(Stdio::null())
            .stderr(Stdio::null())
            .spawn()
        {
            Ok(child) => {
                self.current = Some(child);
                true
            }
            Err(e) => {
                log::warn!("Failed to start speech program '{}': {}", self.program, e);
                false
            }
        }
    }
}

impl Drop for CommandSpeaker {
    fn drop(&mut self) {
        self.cancel();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_silent_speaker() {
        assert!(!SilentSpeaker.speak("你好", &SpeechOptions::default()));
    }

    #[test]
    fn test_arguments_scale_rate_and_pitch() {
        let args = CommandSpeaker::arguments("你好", &SpeechOptions::default());
        assert_eq!(args, vec!["-v", "cmn", "-s", "140", "-p", "50", "你好"]);

        let slow = SpeechOptions {
            rate: 0.1,
            pitch: 3.0,
            ..SpeechOptions::default()
        };
        let args = CommandSpeaker::arguments("x", &slow);
        assert_eq!(args[3], "80");
        assert_eq!(args[5], "99");
    }

    #[test]
    fn test_missing_program_reports_false() {
        let mut speaker = CommandSpeaker::new("definitely-not-a-speech-engine-xyz");
        assert!(!speaker.speak("你好", &SpeechOptions::default()));
    }

    #[test]
    fn test_blank_text_is_not_spoken() {
        let mut speaker = CommandSpeaker::new("definitely-not-a-speech-engine-xyz");
        assert!(!speaker.speak("  ", &SpeechOptions::default()));
    }
}
