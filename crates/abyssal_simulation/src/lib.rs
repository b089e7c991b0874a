//! Abyssal Simulation Core
//!
//! Headless ECS-симуляция боевого ядра на Bevy 0.16:
//! - Combat: health/invincibility, damage contract, knockback, снаряды, hazards
//! - AI: pursuit FSM + attack routines по архетипам, фазы босса, краб-вор
//! - Player: ground probe, jump, hover на энергии, оружие, бонусы наград
//! - Room: roster врагов и награда за зачистку
//!
//! Все системы в FixedUpdate (60Hz), порядок внутри тика задаёт `SimSet`.

use bevy::prelude::*;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

// Публичные модули
pub mod ai;
pub mod combat;
pub mod components;
pub mod config;
pub mod error;
pub mod logger;
pub mod player;
pub mod room;
pub mod spatial;
pub mod spawn;

// Re-export базовых типов для удобства
pub use ai::{AIConfig, AIPlugin, AIState, AttackPattern, PursuitStyle};
pub use combat::{
    BossPhase, CombatPlugin, CooldownGate, DamageDealt, DamageRequest, Dead, EntityDied, HealRequest,
    HealthChanged, Knockback, KnockbackPolicy, PhaseChanged,
};
pub use components::*;
pub use config::SimulationConfig;
pub use error::{SimError, SimFault, SimResult};
pub use logger::{init_logger, log, log_error, log_info, log_warning};
pub use player::{ApplyReward, PlayerPlugin, PlayerStats, RewardItem, RewardKind};
pub use room::{Room, RoomCleared, RoomPlugin, SpawnPoint, SpawnWave};

/// Фазы одного fixed тика (строго последовательно)
///
/// Prepare (поиск игрока, roster комнат) → Player → Ai → Combat (урон, фазы)
/// → Reaction (эскалация, награды) → Death (смерти, split, зачистка, деспавн)
#[derive(SystemSet, Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SimSet {
    Prepare,
    Player,
    Ai,
    Combat,
    Reaction,
    Death,
}

#[derive(Resource)]
struct SimSetsConfigured;

/// Настраивает порядок SimSet (идемпотентно, вызывается каждым plugin'ом)
pub fn configure_sim_sets(app: &mut App) {
    if app.world().contains_resource::<SimSetsConfigured>() {
        return;
    }
    app.insert_resource(SimSetsConfigured).configure_sets(
        FixedUpdate,
        (
            SimSet::Prepare,
            SimSet::Player,
            SimSet::Ai,
            SimSet::Combat,
            SimSet::Reaction,
            SimSet::Death,
        )
            .chain(),
    );
}

/// Главный plugin симуляции (объединяет все подсистемы)
#[derive(Default)]
pub struct SimulationPlugin {
    pub config: SimulationConfig,
}

impl SimulationPlugin {
    pub fn new(config: SimulationConfig) -> Self {
        Self { config }
    }
}

impl Plugin for SimulationPlugin {
    fn build(&self, app: &mut App) {
        configure_sim_sets(app);

        app
            // Fixed timestep (60Hz по умолчанию, легче считать интервалы)
            .insert_resource(Time::<Fixed>::from_hz(self.config.tick_hz))
            // Детерминистичный RNG (seed из конфига)
            .insert_resource(DeterministicRng::new(self.config.seed))
            .insert_resource(self.config.clone())
            .add_event::<SimFault>()
            // Подсистемы
            .add_plugins((CombatPlugin, AIPlugin, PlayerPlugin, RoomPlugin));
    }
}

/// Детерминистичный RNG resource (seeded)
#[derive(Resource)]
pub struct DeterministicRng {
    pub rng: ChaCha8Rng,
    pub seed: u64,
}

impl DeterministicRng {
    pub fn new(seed: u64) -> Self {
        Self {
            rng: ChaCha8Rng::seed_from_u64(seed),
            seed,
        }
    }
}

/// Создаёт minimal Bevy App для headless симуляции (дефолтный тюнинг)
pub fn create_headless_app(seed: u64) -> App {
    create_headless_app_with_config(SimulationConfig {
        seed,
        ..SimulationConfig::default()
    })
}

pub fn create_headless_app_with_config(config: SimulationConfig) -> App {
    let mut app = App::new();
    init_logger();
    app.add_plugins(MinimalPlugins).add_plugins(SimulationPlugin::new(config));

    app
}

/// Snapshot мира для сравнения детерминизма
pub fn world_snapshot<T: Component>(world: &mut World) -> Vec<u8>
where
    T: std::fmt::Debug,
{
    // Собираем все компоненты в детерминированный формат
    let mut snapshot = Vec::new();

    let mut query = world.query::<(Entity, &T)>();
    let mut entities: Vec<_> = query.iter(world).collect();

    // Сортируем по Entity ID для детерминизма
    entities.sort_by_key(|(entity, _)| entity.index());

    // Сериализуем в байты через Debug (простейший способ)
    for (entity, component) in entities {
        snapshot.extend_from_slice(&entity.index().to_le_bytes());
        snapshot.extend_from_slice(format!("{:?}", component).as_bytes());
    }

    snapshot
}
