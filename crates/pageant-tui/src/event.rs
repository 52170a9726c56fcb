use std::time::Duration;

use anyhow::Result;
use crossterm::event::{self, Event, KeyEvent, KeyEventKind, MouseEvent};

/// Event handler for terminal events
///
/// Polls with a deadline and reports a `Tick` when nothing arrived, which is
/// what drives scroll animation frames and tracker recomputes. While an
/// animation is running the poll deadline drops to the animation frame rate.
pub struct EventHandler {
    tick_rate: Duration,
    animation_tick_rate: Duration,
}

/// Application events
#[derive(Debug)]
pub enum AppEvent {
    /// A key was pressed
    Key(KeyEvent),
    /// Mouse input (movement, buttons, wheel)
    Mouse(MouseEvent),
    /// Terminal was resized
    Resize(u16, u16),
    /// Tick event for periodic updates
    Tick,
}

impl EventHandler {
    pub fn new(tick_rate_ms: u64, animation_fps: u16) -> Self {
        let animation_tick_rate = if animation_fps == 0 {
            Duration::from_millis(16) // ~60fps fallback
        } else {
            Duration::from_millis(1000 / animation_fps as u64)
        };
        Self {
            tick_rate: Duration::from_millis(tick_rate_ms),
            animation_tick_rate,
        }
    }

    /// Poll for the next event
    pub fn next(&self, animating: bool) -> Result<Option<AppEvent>> {
        let deadline = if animating {
            self.animation_tick_rate
        } else {
            self.tick_rate
        };
        if event::poll(deadline)? {
            match event::read()? {
                Event::Key(key) => {
                    // Only handle key press events, ignore release events
                    // (crossterm 0.27+ sends release events on some systems)
                    if key.kind == KeyEventKind::Press {
                        Ok(Some(AppEvent::Key(key)))
                    } else {
                        Ok(None)
                    }
                }
                Event::Mouse(mouse) => Ok(Some(AppEvent::Mouse(mouse))),
                Event::Resize(w, h) => Ok(Some(AppEvent::Resize(w, h))),
                _ => Ok(None),
            }
        } else {
            Ok(Some(AppEvent::Tick))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_animation_tick_rate() {
        let handler = EventHandler::new(250, 50);
        assert_eq!(handler.animation_tick_rate, Duration::from_millis(20));
        assert_eq!(handler.tick_rate, Duration::from_millis(250));

        // zero fps falls back instead of dividing by zero
        let handler = EventHandler::new(250, 0);
        assert_eq!(handler.animation_tick_rate, Duration::from_millis(16));
    }
}
