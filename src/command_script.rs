use anyhow::{Context, Result};
use serde::Deserialize;
use std::{collections::VecDeque, fs, path::Path};
use tetherstone_core::SimTick;

/// On-disk form: `{"steps": [{"tick": 3, "command": "use 10 64 -5 up"}, ...]}`.
#[derive(Debug, Deserialize)]
struct ScriptDoc {
    steps: Vec<StepDoc>,
}

#[derive(Debug, Deserialize)]
struct StepDoc {
    #[serde(default)]
    tick: u64,
    command: String,
}

/// Interaction script replayed against the sandbox.
///
/// Each step is a sandbox command line (`place`, `sneak`, `use`, ...) run at
/// a simulation tick. Steps run in file order, several may share a tick, and
/// a tick never goes backwards.
#[derive(Debug)]
pub struct InteractionScript {
    steps: VecDeque<(SimTick, String)>,
}

impl InteractionScript {
    pub fn from_path(path: &Path) -> Result<Self> {
        let contents = fs::read_to_string(path)
            .with_context(|| format!("failed to read interaction script {}", path.display()))?;
        Self::parse(&contents)
            .with_context(|| format!("invalid interaction script {}", path.display()))
    }

    pub fn parse(contents: &str) -> Result<Self> {
        let doc: ScriptDoc = serde_json::from_str(contents)?;
        if doc.steps.is_empty() {
            anyhow::bail!("interaction script has no steps");
        }

        let mut steps = VecDeque::with_capacity(doc.steps.len());
        let mut previous = SimTick::ZERO;
        for (index, step) in doc.steps.into_iter().enumerate() {
            let command = step.command.trim();
            if command.is_empty() {
                anyhow::bail!("step {index} has no sandbox command");
            }
            let tick = SimTick(step.tick);
            if tick < previous {
                anyhow::bail!(
                    "step {index} ({command:?}) runs at tick {}, before the previous step at tick {}",
                    tick.0,
                    previous.0
                );
            }
            previous = tick;
            steps.push_back((tick, command.to_string()));
        }

        Ok(Self { steps })
    }

    /// Tick the next command is due at.
    pub fn next_tick(&self) -> Option<SimTick> {
        self.steps.front().map(|(tick, _)| *tick)
    }

    /// Take every command due at or before `tick`, in script order.
    pub fn drain_ready(&mut self, tick: SimTick) -> Vec<String> {
        let due = self
            .steps
            .iter()
            .take_while(|(at, _)| *at <= tick)
            .count();
        self.steps.drain(..due).map(|(_, command)| command).collect()
    }

    pub fn is_finished(&self) -> bool {
        self.steps.is_empty()
    }
}
