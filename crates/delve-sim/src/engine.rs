//! Simulation engine.
//!
//! `SimulationEngine` owns the hecs ECS world and the tile grid, processes
//! player commands, runs all systems, and produces `WorldSnapshot`s.
//! Completely headless, so every scenario can be tested deterministically.

use std::collections::VecDeque;
use std::path::Path;

use hecs::{Entity, World};

use delve_core::commands::{MoveIntent, PlayerCommand};
use delve_core::config::{ConfigError, DelveConfig};
use delve_core::enums::Outcome;
use delve_core::events::SimEvent;
use delve_core::state::WorldSnapshot;
use delve_core::types::{Position, SimTime};
use delve_world::{load_map, Camera, LoadedMap, MapLoadError, TileGrid};

use crate::systems;
use crate::systems::snapshot::SnapshotInputs;
use crate::world_setup;

/// Startup failures. Nothing is simulated if either occurs.
#[derive(thiserror::Error, Debug)]
pub enum SimError {
    #[error("Config error: {0}")]
    Config(#[from] ConfigError),

    #[error("Map error: {0}")]
    Map(#[from] MapLoadError),
}

/// The simulation engine. Owns the ECS world and all sim state.
pub struct SimulationEngine {
    world: World,
    grid: TileGrid,
    config: DelveConfig,
    time: SimTime,
    outcome: Outcome,
    player: Entity,
    camera: Camera,
    move_intent: MoveIntent,
    keys_remaining: u32,
    next_serial: u64,
    command_queue: VecDeque<PlayerCommand>,
    despawn_buffer: Vec<Entity>,
    events: Vec<SimEvent>,
}

impl SimulationEngine {
    /// Create an engine from an already parsed map.
    ///
    /// `config` is validated here, so a map parsed with an unchecked config
    /// still cannot start a simulation the collision window cannot resolve.
    pub fn new(map: LoadedMap, config: DelveConfig) -> Result<Self, SimError> {
        config.validate()?;
        let mut world = World::new();
        let mut next_serial = 0;
        let player = world_setup::populate(&mut world, &map, &config, &mut next_serial);

        let start = map.player_start.center(map.grid.tile_size());
        let camera = Camera::new(map.grid.pixel_size(), config.viewport_size, start);

        let mut engine = Self {
            world,
            grid: map.grid,
            config,
            time: SimTime::default(),
            outcome: Outcome::default(),
            player,
            camera,
            move_intent: MoveIntent::default(),
            keys_remaining: map.key_spawns.len() as u32,
            next_serial,
            command_queue: VecDeque::new(),
            despawn_buffer: Vec::new(),
            events: Vec::new(),
        };
        // Light the starting area so the first snapshot is not all black.
        systems::lighting::run(&mut engine.world, &mut engine.grid, engine.config.light_radius);
        Ok(engine)
    }

    /// Validate `config`, load the map at `path` and build an engine.
    pub fn load(path: &Path, config: DelveConfig) -> Result<Self, SimError> {
        // Checked before touching the filesystem.
        config.validate()?;
        let map = load_map(path, &config)?;
        Self::new(map, config)
    }

    /// Queue a player command for processing at the next tick boundary.
    pub fn queue_command(&mut self, command: PlayerCommand) {
        self.command_queue.push_back(command);
    }

    /// Queue multiple commands.
    pub fn queue_commands(&mut self, commands: impl IntoIterator<Item = PlayerCommand>) {
        self.command_queue.extend(commands);
    }

    /// Advance the simulation by `elapsed_ms` and return the resulting snapshot.
    ///
    /// Elapsed time is capped at `max_frame_ms`. Once the outcome is terminal,
    /// ticks only drain the command queue and report the frozen state.
    pub fn tick(&mut self, elapsed_ms: u64) -> WorldSnapshot {
        if self.outcome.is_terminal() {
            self.command_queue.clear();
        } else {
            let elapsed_ms = elapsed_ms.min(self.config.max_frame_ms);
            self.time.advance(elapsed_ms);
            self.process_commands();
            self.run_systems(elapsed_ms as f64 / 1000.0);
        }

        let events = std::mem::take(&mut self.events);
        systems::snapshot::build_snapshot(
            &self.world,
            &self.grid,
            SnapshotInputs {
                time: &self.time,
                outcome: self.outcome,
                player: self.player,
                keys_remaining: self.keys_remaining,
                camera: &self.camera,
                viewport_size: self.config.viewport_size,
                events,
            },
        )
    }

    pub fn outcome(&self) -> Outcome {
        self.outcome
    }

    pub fn time(&self) -> SimTime {
        self.time
    }

    pub fn keys_remaining(&self) -> u32 {
        self.keys_remaining
    }

    pub fn config(&self) -> &DelveConfig {
        &self.config
    }

    pub fn grid(&self) -> &TileGrid {
        &self.grid
    }

    pub fn camera(&self) -> &Camera {
        &self.camera
    }

    pub fn player(&self) -> Entity {
        self.player
    }

    /// Get a read-only reference to the ECS world.
    pub fn world(&self) -> &World {
        &self.world
    }

    /// Mutable world access for tests that stage a scenario directly.
    #[cfg(test)]
    pub(crate) fn world_mut(&mut self) -> &mut World {
        &mut self.world
    }

    /// Spawn an extra enemy (for tests).
    #[cfg(test)]
    pub(crate) fn spawn_test_enemy(&mut self, position: Position) -> Entity {
        world_setup::spawn_enemy(&mut self.world, &self.config, position, &mut self.next_serial)
    }

    /// Spawn an extra bullet (for tests).
    #[cfg(test)]
    pub(crate) fn spawn_test_bullet(
        &mut self,
        position: Position,
        velocity: delve_core::types::Velocity,
    ) -> Entity {
        world_setup::spawn_bullet(
            &mut self.world,
            &self.config,
            position,
            velocity,
            &mut self.next_serial,
        )
    }

    /// Process all queued commands.
    fn process_commands(&mut self) {
        while let Some(command) = self.command_queue.pop_front() {
            self.handle_command(command);
        }
    }

    /// Handle a single player command.
    fn handle_command(&mut self, command: PlayerCommand) {
        match command {
            PlayerCommand::SetMovement { intent } => {
                self.move_intent = intent;
            }
            PlayerCommand::Attack { target } => {
                let fired = systems::player::fire(
                    &mut self.world,
                    &self.config,
                    self.player,
                    target,
                    self.time.now_ms,
                    &mut self.next_serial,
                    &mut self.events,
                );
                if fired.is_none() {
                    log::trace!("Attack toward {:?} ignored", target);
                }
            }
        }
    }

    /// Run all systems in order.
    fn run_systems(&mut self, elapsed_secs: f64) {
        // 1. Enemies (corpse removal, melee, pursuit)
        systems::enemy_ai::run(
            &mut self.world,
            &self.grid,
            &self.config,
            self.player,
            &self.time,
            elapsed_secs,
            &mut self.despawn_buffer,
            &mut self.events,
        );
        // 2. Bullets (flight, wall stops, hits)
        systems::bullets::run(
            &mut self.world,
            &self.grid,
            elapsed_secs,
            &mut self.despawn_buffer,
            &mut self.events,
        );
        // 3. Player movement
        systems::player::run(
            &mut self.world,
            &self.grid,
            &self.config,
            self.player,
            self.move_intent,
            elapsed_secs,
        );
        // 4. Key pickups
        systems::pickups::run(
            &mut self.world,
            self.player,
            &mut self.keys_remaining,
            &mut self.despawn_buffer,
            &mut self.events,
        );
        // 5. Lighting follows the player's new position
        systems::lighting::run(&mut self.world, &mut self.grid, self.config.light_radius);
        // 6. Stray bullets
        systems::cleanup::run(&mut self.world, &self.grid, &mut self.despawn_buffer);
        // 7. Camera
        if let Ok(pos) = self.world.get::<&Position>(self.player).map(|p| *p) {
            self.camera.follow(pos);
        }
        // 8. Win/lose
        let outcome = systems::outcome::evaluate(&self.world, self.player, self.keys_remaining);
        if outcome != self.outcome {
            log::info!("Outcome {:?} at tick {}", outcome, self.time.tick);
            match outcome {
                Outcome::Won => self.events.push(SimEvent::Won),
                Outcome::Lost => self.events.push(SimEvent::Lost),
                Outcome::Playing => {}
            }
            self.outcome = outcome;
        }
    }
}
