//! Ошибки симуляции
//!
//! Ни одна из них не фатальна для процесса: runtime-сбои логируются и
//! публикуются через `SimFault`, конфиг возвращает `Result`.

use bevy::prelude::*;
use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum SimError {
    #[error("failed to read config {path}: {source}")]
    ConfigIo {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse config: {0}")]
    ConfigParse(#[from] serde_json::Error),

    #[error("invalid config value `{field}`: {reason}")]
    InvalidConfig { field: &'static str, reason: String },

    #[error("player entity not found")]
    PlayerNotFound,

    #[error("room `{room}` has no reward chest configured")]
    MissingRewardPrefab { room: String },

    #[error("room `{room}` found no enemies after {attempts} attempts")]
    RoomPopulationTimedOut { room: String, attempts: u32 },

    #[error("room `{room}` has no free spawn point left for {archetype}")]
    NoSpawnPointAvailable { room: String, archetype: &'static str },
}

pub type SimResult<T> = Result<T, SimError>;

/// Структурированный канал ошибок: кто пострадал + что произошло
#[derive(Event, Debug)]
pub struct SimFault {
    pub entity: Option<Entity>,
    pub error: SimError,
}

impl SimFault {
    pub fn new(entity: Option<Entity>, error: SimError) -> Self {
        Self { entity, error }
    }
}

/// Логирует и публикует fault одним вызовом
pub fn report_fault(faults: &mut EventWriter<SimFault>, entity: Option<Entity>, error: SimError) {
    crate::logger::log_warning(&format!("⚠️ {:?}: {}", entity, error));
    faults.write(SimFault::new(entity, error));
}
