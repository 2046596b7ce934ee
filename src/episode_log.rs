use std::time::Instant;

use serde::{Deserialize, Serialize};

use crate::pathfinding::Position;

/// Events recorded over the lifetime of an environment instance
#[derive(Clone, Debug, Serialize, Deserialize)]
pub enum EpisodeEvent {
    /// A new episode started
    Reset {
        episode: u32,
        player: Position,
        target: Position,
        optimal_path_length: usize,
    },
    /// One step transition (bumps show up as `from == to`)
    Step {
        action: u8,
        from: Position,
        to: Position,
        reward: f64,
        terminal: bool,
    },
}

/// Logged event with timestamp
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct LoggedEvent {
    /// Milliseconds since the log was created
    pub timestamp_ms: u64,
    pub event: EpisodeEvent,
}

/// Structured episode logger
pub struct EpisodeLog {
    start_time: Instant,
    events: Vec<LoggedEvent>,
}

impl EpisodeLog {
    pub fn new() -> Self {
        EpisodeLog {
            start_time: Instant::now(),
            events: Vec::new(),
        }
    }

    fn push(&mut self, event: EpisodeEvent) {
        let timestamp_ms = self.start_time.elapsed().as_millis() as u64;
        self.events.push(LoggedEvent {
            timestamp_ms,
            event,
        });
    }

    pub fn log_reset(
        &mut self,
        episode: u32,
        player: Position,
        target: Position,
        optimal_path_length: usize,
    ) {
        self.push(EpisodeEvent::Reset {
            episode,
            player,
            target,
            optimal_path_length,
        });
    }

    pub fn log_step(&mut self, action: u8, from: Position, to: Position, reward: f64, terminal: bool) {
        self.push(EpisodeEvent::Step {
            action,
            from,
            to,
            reward,
            terminal,
        });
    }

    /// Get all logged events
    pub fn events(&self) -> &Vec<LoggedEvent> {
        &self.events
    }

    /// Save log to JSON file
    pub fn save_to_file(&self, path: &str) -> Result<(), Box<dyn std::error::Error>> {
        let json = serde_json::to_string_pretty(&self.events)?;
        std::fs::write(path, json)?;
        Ok(())
    }

    /// Print log to console
    pub fn print(&self) {
        println!("\n=== Episode Log ({} events) ===", self.events.len());
        for (i, logged) in self.events.iter().enumerate() {
            println!(
                "[{:6}ms] #{:3} {:?}",
                logged.timestamp_ms,
                i + 1,
                logged.event
            );
        }
        println!("=== End of Log ===\n");
    }

    /// Get summary statistics
    pub fn summary(&self) -> String {
        let mut episodes = 0;
        let mut steps = 0;
        let mut bumps = 0;
        let mut goals = 0;

        for logged in &self.events {
            match &logged.event {
                EpisodeEvent::Reset { .. } => episodes += 1,
                EpisodeEvent::Step {
                    from, to, terminal, ..
                } => {
                    steps += 1;
                    if from == to {
                        bumps += 1;
                    }
                    if *terminal {
                        goals += 1;
                    }
                }
            }
        }

        let duration = self.events.last().map(|e| e.timestamp_ms).unwrap_or(0);

        format!(
            "Session Duration: {}ms\n\
             Episodes: {}\n\
             Steps: {} ({} bumps)\n\
             Goals Reached: {}",
            duration, episodes, steps, bumps, goals
        )
    }
}

impl Default for EpisodeLog {
    fn default() -> Self {
        Self::new()
    }
}
