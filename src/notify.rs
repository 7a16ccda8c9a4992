//! Game-over score notification
//!
//! The sim never talks to the network; it reports the end of a run through
//! the [`ScoreNotifier`] capability the platform layer injects. Delivery is
//! fire-and-forget: failures are logged and discarded, never surfaced to the
//! game loop.

use serde::{Deserialize, Serialize};

use crate::sim::GameEvent;

/// Consumer of the final score of a run
pub trait ScoreNotifier {
    /// Called exactly once per Running -> Over transition
    fn game_over(&self, score: u32);
}

/// Forward the interesting outcomes of a tick to the notifier
pub fn dispatch(events: &[GameEvent], notifier: &dyn ScoreNotifier) {
    for event in events {
        match event {
            GameEvent::Scored { total } => log::debug!("score: {total}"),
            GameEvent::GameOver { score } => notifier.game_over(*score),
        }
    }
}

/// Message body sent on game over
pub fn game_over_message(score: u32) -> String {
    format!("Game Over!\nScore: {score}")
}

/// Default notifier: just logs the final score
pub struct LogNotifier;

impl ScoreNotifier for LogNotifier {
    fn game_over(&self, score: u32) {
        log::info!("game over, final score {score}");
    }
}

fn default_api_base() -> String {
    "https://api.telegram.org".to_string()
}

/// Telegram bot credentials and endpoint
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NotifyConfig {
    #[serde(default = "default_api_base")]
    pub api_base: String,
    pub bot_token: String,
    pub chat_id: String,
}

impl NotifyConfig {
    /// Load from a JSON file
    pub fn from_file(path: &str) -> Result<Self, Box<dyn std::error::Error>> {
        let json = std::fs::read_to_string(path)?;
        let config: Self = serde_json::from_str(&json)?;
        Ok(config)
    }

    fn send_message_url(&self) -> String {
        format!("{}/bot{}/sendMessage", self.api_base, self.bot_token)
    }
}

/// Sends the final score to a Telegram chat via the bot API
pub struct TelegramNotifier {
    config: NotifyConfig,
}

impl TelegramNotifier {
    pub fn new(config: NotifyConfig) -> Self {
        Self { config }
    }
}

#[cfg(not(target_arch = "wasm32"))]
impl ScoreNotifier for TelegramNotifier {
    fn game_over(&self, score: u32) {
        let result = ureq::get(&self.config.send_message_url())
            .query("chat_id", &self.config.chat_id)
            .query("text", &game_over_message(score))
            .call();
        match result {
            Ok(_) => log::info!("score {score} sent to Telegram"),
            Err(e) => log::error!("failed to send score to Telegram: {e}"),
        }
    }
}

#[cfg(target_arch = "wasm32")]
impl ScoreNotifier for TelegramNotifier {
    fn game_over(&self, score: u32) {
        use wasm_bindgen::JsCast;
        use wasm_bindgen_futures::JsFuture;

        let encoded_text = js_sys::encode_uri_component(&game_over_message(score));
        let url = format!(
            "{}?chat_id={}&text={}",
            self.config.send_message_url(),
            self.config.chat_id,
            encoded_text,
        );

        wasm_bindgen_futures::spawn_local(async move {
            let Some(window) = web_sys::window() else {
                return;
            };
            match JsFuture::from(window.fetch_with_str(&url)).await {
                Ok(value) => {
                    let ok = value
                        .dyn_into::<web_sys::Response>()
                        .map(|resp| resp.ok())
                        .unwrap_or(false);
                    if ok {
                        log::info!("score {score} sent to Telegram");
                    } else {
                        log::error!("Telegram rejected the score notification");
                    }
                }
                Err(e) => log::error!("failed to send score to Telegram: {e:?}"),
            }
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;

    use crate::consts::PACE_MULTIPLIER;
    use crate::sim::{GamePhase, GameState, TickInput, tick};

    /// Recording stub standing in for the network
    struct RecordingNotifier {
        calls: RefCell<Vec<u32>>,
    }

    impl RecordingNotifier {
        fn new() -> Self {
            Self {
                calls: RefCell::new(Vec::new()),
            }
        }
    }

    impl ScoreNotifier for RecordingNotifier {
        fn game_over(&self, score: u32) {
            self.calls.borrow_mut().push(score);
        }
    }

    #[test]
    fn test_notified_once_per_game_over() {
        let notifier = RecordingNotifier::new();
        let mut state = GameState::new(1);
        state.start_run();
        state.score = 4;
        state.bird.pos.y = crate::consts::SCREEN_HEIGHT; // breach on next tick

        let input = TickInput::default();
        for _ in 0..5 {
            let events = tick(&mut state, &input, PACE_MULTIPLIER);
            dispatch(&events, &notifier);
        }

        assert_eq!(state.phase, GamePhase::Over);
        assert_eq!(*notifier.calls.borrow(), vec![4]);
    }

    #[test]
    fn test_scored_events_do_not_notify() {
        let notifier = RecordingNotifier::new();
        dispatch(&[crate::sim::GameEvent::Scored { total: 2 }], &notifier);
        assert!(notifier.calls.borrow().is_empty());
    }

    #[test]
    fn test_game_over_message_format() {
        assert_eq!(game_over_message(12), "Game Over!\nScore: 12");
    }

    #[test]
    fn test_config_defaults_api_base() {
        let config: NotifyConfig =
            serde_json::from_str(r#"{"bot_token":"t0k3n","chat_id":"42"}"#).unwrap();
        assert_eq!(config.api_base, "https://api.telegram.org");
        assert_eq!(
            config.send_message_url(),
            "https://api.telegram.org/bott0k3n/sendMessage"
        );
    }
}
