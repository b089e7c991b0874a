//! Конфигурация симуляции (JSON через serde)
//!
//! Дефолты = тюнинг из игры. Любое поле можно опустить в JSON (`#[serde(default)]`).

use bevy::prelude::*;
use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::ai::PursuitStyle;
use crate::combat::KnockbackPolicy;
use crate::error::{SimError, SimResult};

#[derive(Resource, Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SimulationConfig {
    pub seed: u64,
    pub tick_hz: f64,
    pub player: PlayerConfig,
    pub boss: BossConfig,
    pub jelly_slime: JellySlimeConfig,
    pub jellyfish: JellyfishConfig,
    pub seahorse: SeahorseConfig,
    pub roller: RollerConfig,
    pub thief: ThiefConfig,
    pub room: RoomConfig,
}

impl Default for SimulationConfig {
    fn default() -> Self {
        Self {
            seed: 42,
            tick_hz: 60.0,
            player: PlayerConfig::default(),
            boss: BossConfig::default(),
            jelly_slime: JellySlimeConfig::default(),
            jellyfish: JellyfishConfig::default(),
            seahorse: SeahorseConfig::default(),
            roller: RollerConfig::default(),
            thief: ThiefConfig::default(),
            room: RoomConfig::default(),
        }
    }
}

impl SimulationConfig {
    pub fn from_json_str(json: &str) -> SimResult<Self> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    pub fn load(path: impl AsRef<Path>) -> SimResult<Self> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path).map_err(|source| SimError::ConfigIo {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_json_str(&json)
    }

    pub fn validate(&self) -> SimResult<()> {
        if !(self.tick_hz > 0.0) {
            return Err(invalid("tick_hz", "must be positive"));
        }

        self.player.validate()?;
        self.boss.validate()?;
        self.jelly_slime.base.validate("jelly_slime")?;
        self.jelly_slime.split.validate()?;
        self.jellyfish.base.validate("jellyfish")?;
        self.jellyfish.laser.validate("jellyfish.laser")?;
        self.seahorse.base.validate("seahorse")?;
        non_negative("seahorse.brood.spacing", self.seahorse.brood.spacing)?;
        non_negative("seahorse.brood.jitter", self.seahorse.brood.jitter)?;
        self.roller.base.validate("roller")?;
        self.room.validate()?;

        non_negative("thief.scan_cooldown", self.thief.scan_cooldown)?;
        non_negative("thief.steal_cooldown", self.thief.steal_cooldown)?;
        non_negative("thief.move_speed", self.thief.move_speed)?;
        Ok(())
    }
}

fn invalid(field: &'static str, reason: impl Into<String>) -> SimError {
    SimError::InvalidConfig {
        field,
        reason: reason.into(),
    }
}

fn non_negative(field: &'static str, value: f32) -> SimResult<()> {
    if value.is_finite() && value >= 0.0 {
        Ok(())
    } else {
        Err(invalid(field, format!("must be a non-negative number, got {}", value)))
    }
}

fn positive(field: &'static str, value: f32) -> SimResult<()> {
    if value.is_finite() && value > 0.0 {
        Ok(())
    } else {
        Err(invalid(field, format!("must be a positive number, got {}", value)))
    }
}

fn positive_hp(field: &'static str, value: u32) -> SimResult<()> {
    if value == 0 {
        Err(invalid(field, "max health must be greater than zero"))
    } else {
        Ok(())
    }
}

// ============================================================================
// Player
// ============================================================================

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PlayerConfig {
    pub max_health: u32,
    /// Окно неуязвимости после попадания (сек)
    pub invincibility: f32,
    pub walk_speed: f32,
    pub run_speed: f32,
    pub jump_impulse: f32,
    pub gravity: f32,
    pub ground_check_distance: f32,
    /// Whitelist тегов поверхностей, на которых можно стоять
    pub ground_tags: Vec<String>,
    pub body_radius: f32,
    pub hover: HoverConfig,
    pub gun: GunConfig,
}

impl Default for PlayerConfig {
    fn default() -> Self {
        Self {
            max_health: 100,
            invincibility: 1.0,
            walk_speed: 2.0,
            run_speed: 4.0,
            jump_impulse: 5.0,
            gravity: -9.81,
            ground_check_distance: 0.3,
            ground_tags: vec!["Ground".into(), "NoSpawnGround".into(), "Platform".into()],
            body_radius: 0.5,
            hover: HoverConfig::default(),
            gun: GunConfig::default(),
        }
    }
}

impl PlayerConfig {
    fn validate(&self) -> SimResult<()> {
        positive_hp("player.max_health", self.max_health)?;
        non_negative("player.invincibility", self.invincibility)?;
        non_negative("player.walk_speed", self.walk_speed)?;
        non_negative("player.run_speed", self.run_speed)?;
        non_negative("player.jump_impulse", self.jump_impulse)?;
        non_negative("player.ground_check_distance", self.ground_check_distance)?;
        non_negative("player.hover.max_energy", self.hover.max_energy)?;
        non_negative("player.hover.drain_rate", self.hover.drain_rate)?;
        non_negative("player.hover.regen_rate", self.hover.regen_rate)?;
        if self.hover.activation_threshold > self.hover.max_energy {
            return Err(invalid("player.hover.activation_threshold", "exceeds max_energy"));
        }
        non_negative("player.gun.fire_interval", self.gun.fire_interval)?;
        non_negative("player.gun.bullet_speed", self.gun.bullet_speed)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct HoverConfig {
    pub max_energy: f32,
    /// Расход в секунду пока hover активен
    pub drain_rate: f32,
    /// Восстановление в секунду пока hover выключен
    pub regen_rate: f32,
    pub activation_threshold: f32,
    pub height: f32,
    pub bob_amplitude: f32,
    /// Гц
    pub bob_frequency: f32,
    pub spring_stiffness: f32,
    pub spring_damping: f32,
    pub speed_multiplier: f32,
}

impl Default for HoverConfig {
    fn default() -> Self {
        Self {
            max_energy: 100.0,
            drain_rate: 25.0,
            regen_rate: 10.0,
            activation_threshold: 20.0,
            height: 1.5,
            bob_amplitude: 0.15,
            bob_frequency: 0.5,
            spring_stiffness: 40.0,
            spring_damping: 8.0,
            speed_multiplier: 1.5,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GunConfig {
    pub damage: f32,
    pub bullet_speed: f32,
    pub lifetime: f32,
    pub knockback: f32,
    /// Базовый интервал между выстрелами (делится на attack speed multiplier)
    pub fire_interval: f32,
    pub radius: f32,
}

impl Default for GunConfig {
    fn default() -> Self {
        Self {
            damage: 10.0,
            bullet_speed: 25.0,
            lifetime: 2.0,
            knockback: 15.0,
            fire_interval: 0.25,
            radius: 0.1,
        }
    }
}

// ============================================================================
// Enemies
// ============================================================================

/// Общая часть всех архетипов врагов
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ArchetypeConfig {
    pub max_health: u32,
    pub detection_radius: f32,
    pub attack_radius: f32,
    pub move_speed: f32,
    pub turn_rate: f32,
    pub attack_cooldown: f32,
    pub player_search_interval: f32,
    pub despawn_delay: f32,
    pub body_radius: f32,
    pub obstacle_check_distance: f32,
    pub knockback: Option<KnockbackConfig>,
}

impl Default for ArchetypeConfig {
    fn default() -> Self {
        Self {
            max_health: 30,
            detection_radius: 3.0,
            attack_radius: 1.2,
            move_speed: 2.0,
            turn_rate: 5.0,
            attack_cooldown: 2.0,
            player_search_interval: 0.3,
            despawn_delay: 0.1,
            body_radius: 0.5,
            obstacle_check_distance: 0.0,
            knockback: Some(KnockbackConfig::default()),
        }
    }
}

impl ArchetypeConfig {
    fn validate(&self, name: &'static str) -> SimResult<()> {
        positive_hp(name, self.max_health)?;
        non_negative(name, self.detection_radius)?;
        non_negative(name, self.attack_radius)?;
        non_negative(name, self.move_speed)?;
        non_negative(name, self.turn_rate)?;
        non_negative(name, self.attack_cooldown)?;
        non_negative(name, self.player_search_interval)?;
        non_negative(name, self.despawn_delay)?;
        if let Some(knockback) = &self.knockback {
            non_negative(name, knockback.strength)?;
            non_negative(name, knockback.decay_rate)?;
        }
        Ok(())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct KnockbackConfig {
    pub strength: f32,
    pub decay_rate: f32,
    pub epsilon: f32,
    pub policy: KnockbackPolicy,
}

impl Default for KnockbackConfig {
    fn default() -> Self {
        Self {
            strength: 15.0,
            decay_rate: 10.0,
            epsilon: 0.1,
            policy: KnockbackPolicy::Freeze,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LaserConfig {
    pub damage: u32,
    pub speed: f32,
    pub lifetime: f32,
    pub per_shot: u32,
    /// Полный угол веера (градусы)
    pub spread_angle: f32,
    pub radius: f32,
}

impl Default for LaserConfig {
    fn default() -> Self {
        Self {
            damage: 15,
            speed: 15.0,
            lifetime: 5.0,
            per_shot: 3,
            spread_angle: 20.0,
            radius: 0.2,
        }
    }
}

impl LaserConfig {
    fn validate(&self, name: &'static str) -> SimResult<()> {
        non_negative(name, self.speed)?;
        non_negative(name, self.lifetime)?;
        non_negative(name, self.spread_angle)?;
        if self.per_shot == 0 {
            return Err(invalid(name, "per_shot must be at least 1"));
        }
        Ok(())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ExplosionConfig {
    pub count: u32,
    pub damage: u32,
    pub radius: f32,
    /// Полное время жизни hazard'а
    pub lifetime: f32,
    /// Warm-up до начала урона
    pub telegraph: f32,
    /// Окно урона
    pub active: f32,
    /// Пауза между спавнами
    pub spacing: f32,
    /// Случайный сдвиг по x/z от позиции игрока: [-range, range]
    pub offset_range: f32,
}

impl Default for ExplosionConfig {
    fn default() -> Self {
        Self {
            count: 3,
            damage: 20,
            radius: 3.0,
            lifetime: 4.0,
            telegraph: 3.1,
            active: 0.2,
            spacing: 0.3,
            offset_range: 4.0,
        }
    }
}

/// Шаг эскалации фазы босса (применяется один раз при достижении фазы)
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, Reflect)]
#[serde(default)]
pub struct PhaseModifiers {
    pub cooldown_scale: f32,
    pub explosions_add: u32,
    pub lasers_add: u32,
    pub bursts_add: u32,
    pub burst_interval_scale: f32,
    pub move_speed_scale: f32,
}

impl Default for PhaseModifiers {
    fn default() -> Self {
        Self {
            cooldown_scale: 1.0,
            explosions_add: 0,
            lasers_add: 0,
            bursts_add: 0,
            burst_interval_scale: 1.0,
            move_speed_scale: 1.0,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BossConfig {
    pub base: ArchetypeConfig,
    pub min_distance: f32,
    pub max_distance: f32,
    /// Время сглаживания скорости при kiting (сек)
    pub velocity_smoothing: f32,
    pub phase2_threshold: f32,
    pub phase3_threshold: f32,
    pub reaction_delay: f32,
    pub laser: LaserConfig,
    pub burst_count: u32,
    pub time_between_bursts: f32,
    pub laser_cooldown: f32,
    pub explosion: ExplosionConfig,
    pub explosion_cooldown: f32,
    pub inter_attack_delay: f32,
    pub phase2: PhaseModifiers,
    pub phase3: PhaseModifiers,
}

impl Default for BossConfig {
    fn default() -> Self {
        Self {
            base: ArchetypeConfig {
                max_health: 1000,
                detection_radius: 15.0,
                attack_radius: 8.0,
                move_speed: 2.0,
                turn_rate: 4.0,
                attack_cooldown: 3.0,
                player_search_interval: 0.1,
                despawn_delay: 2.0,
                body_radius: 1.5,
                obstacle_check_distance: 2.0,
                knockback: None,
            },
            min_distance: 3.0,
            max_distance: 8.0,
            velocity_smoothing: 0.2,
            phase2_threshold: 0.5,
            phase3_threshold: 0.2,
            reaction_delay: 0.3,
            laser: LaserConfig::default(),
            burst_count: 2,
            time_between_bursts: 0.8,
            laser_cooldown: 3.0,
            explosion: ExplosionConfig::default(),
            explosion_cooldown: 5.0,
            inter_attack_delay: 0.5,
            phase2: PhaseModifiers {
                cooldown_scale: 0.6,
                explosions_add: 1,
                lasers_add: 1,
                bursts_add: 1,
                burst_interval_scale: 0.8,
                move_speed_scale: 1.2,
            },
            phase3: PhaseModifiers {
                cooldown_scale: 0.4,
                explosions_add: 2,
                lasers_add: 2,
                bursts_add: 2,
                burst_interval_scale: 0.6,
                move_speed_scale: 1.4,
            },
        }
    }
}

impl BossConfig {
    fn validate(&self) -> SimResult<()> {
        self.base.validate("boss")?;
        self.laser.validate("boss.laser")?;
        let in_unit = |t: f32| t > 0.0 && t <= 1.0;
        if !in_unit(self.phase2_threshold) {
            return Err(invalid("boss.phase2_threshold", "must be in (0, 1]"));
        }
        if !in_unit(self.phase3_threshold) {
            return Err(invalid("boss.phase3_threshold", "must be in (0, 1]"));
        }
        if self.phase3_threshold > self.phase2_threshold {
            return Err(invalid("boss.phase3_threshold", "must not exceed phase2_threshold"));
        }
        if self.min_distance > self.max_distance {
            return Err(invalid("boss.min_distance", "must not exceed max_distance"));
        }
        // Залп начинается только изнутри коридора дистанции
        if self.base.attack_radius > self.max_distance {
            return Err(invalid("boss.base.attack_radius", "must not exceed max_distance"));
        }
        non_negative("boss.reaction_delay", self.reaction_delay)?;
        non_negative("boss.time_between_bursts", self.time_between_bursts)?;
        non_negative("boss.laser_cooldown", self.laser_cooldown)?;
        non_negative("boss.explosion_cooldown", self.explosion_cooldown)?;
        non_negative("boss.inter_attack_delay", self.inter_attack_delay)?;
        non_negative("boss.explosion.telegraph", self.explosion.telegraph)?;
        non_negative("boss.explosion.active", self.explosion.active)?;
        non_negative("boss.explosion.spacing", self.explosion.spacing)?;
        positive("boss.explosion.offset_range", self.explosion.offset_range)
    }

    pub fn pursuit_style(&self) -> PursuitStyle {
        PursuitStyle::Standoff {
            min_distance: self.min_distance,
            max_distance: self.max_distance,
            smoothing: self.velocity_smoothing,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SplitConfig {
    pub enabled: bool,
    pub count: u32,
    /// Фиксированный max HP каждого child (всегда меньше родителя)
    pub child_max_health: u32,
    pub child_move_speed: f32,
    pub child_turn_rate: f32,
    pub child_stop_distance: f32,
    pub child_explosion_damage: u32,
    pub child_trigger_distance: f32,
    pub ring_radius: f32,
}

impl Default for SplitConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            count: 2,
            child_max_health: 5,
            child_move_speed: 6.0,
            child_turn_rate: 8.0,
            child_stop_distance: 0.5,
            child_explosion_damage: 20,
            child_trigger_distance: 0.8,
            ring_radius: 1.0,
        }
    }
}

impl SplitConfig {
    fn validate(&self) -> SimResult<()> {
        positive_hp("jelly_slime.split.child_max_health", self.child_max_health)?;
        non_negative("jelly_slime.split.child_move_speed", self.child_move_speed)?;
        non_negative("jelly_slime.split.ring_radius", self.ring_radius)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct JellySlimeConfig {
    pub base: ArchetypeConfig,
    pub slam_damage: u32,
    pub split: SplitConfig,
}

impl Default for JellySlimeConfig {
    fn default() -> Self {
        Self {
            base: ArchetypeConfig::default(),
            slam_damage: 15,
            split: SplitConfig::default(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct JellyfishConfig {
    pub base: ArchetypeConfig,
    pub stop_distance: f32,
    pub laser: LaserConfig,
}

impl Default for JellyfishConfig {
    fn default() -> Self {
        Self {
            base: ArchetypeConfig {
                detection_radius: 8.0,
                attack_radius: 6.0,
                move_speed: 3.0,
                attack_cooldown: 3.0,
                ..ArchetypeConfig::default()
            },
            stop_distance: 2.0,
            laser: LaserConfig {
                damage: 10,
                per_shot: 2,
                spread_angle: 15.0,
                ..LaserConfig::default()
            },
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BroodConfig {
    pub count: u32,
    pub spacing: f32,
    pub damage: u32,
    pub speed: f32,
    pub lifetime: f32,
    /// Случайный разброс направления (горизонталь; вертикаль вдвое меньше)
    pub jitter: f32,
    pub radius: f32,
}

impl Default for BroodConfig {
    fn default() -> Self {
        Self {
            count: 3,
            spacing: 0.3,
            damage: 5,
            speed: 8.0,
            lifetime: 4.0,
            jitter: 0.2,
            radius: 0.25,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SeahorseConfig {
    pub base: ArchetypeConfig,
    pub stop_distance: f32,
    pub brood: BroodConfig,
}

impl Default for SeahorseConfig {
    fn default() -> Self {
        Self {
            base: ArchetypeConfig {
                detection_radius: 5.0,
                attack_radius: 4.0,
                move_speed: 2.0,
                turn_rate: 3.0,
                attack_cooldown: 3.0,
                obstacle_check_distance: 1.0,
                knockback: Some(KnockbackConfig {
                    strength: 3.0,
                    decay_rate: 4.0,
                    epsilon: 0.1,
                    policy: KnockbackPolicy::Blend,
                }),
                ..ArchetypeConfig::default()
            },
            stop_distance: 1.5,
            brood: BroodConfig::default(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RollerConfig {
    pub base: ArchetypeConfig,
    pub contact_damage: u32,
}

impl Default for RollerConfig {
    fn default() -> Self {
        Self {
            base: ArchetypeConfig {
                attack_radius: 1.0,
                attack_cooldown: 1.0,
                ..ArchetypeConfig::default()
            },
            contact_damage: 10,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ThiefConfig {
    pub scan_cooldown: f32,
    pub steal_cooldown: f32,
    pub steal_range: f32,
    pub move_speed: f32,
    pub patrol_radius: f32,
    pub wait_time: f32,
    pub retarget_interval: f32,
    /// Пауза после неудачного скана
    pub scan_reset_delay: f32,
    pub arrive_distance: f32,
}

impl Default for ThiefConfig {
    fn default() -> Self {
        Self {
            scan_cooldown: 20.0,
            steal_cooldown: 20.0,
            steal_range: 5.0,
            move_speed: 5.0,
            patrol_radius: 10.0,
            wait_time: 3.0,
            retarget_interval: 8.0,
            scan_reset_delay: 2.0,
            arrive_distance: 1.0,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RoomConfig {
    pub radius: f32,
    pub initial_delay: f32,
    pub retry_interval: f32,
    pub max_attempts: u32,
    /// Смещение сундука от центра комнаты; None = награда не настроена
    pub chest_offset: Option<[f32; 3]>,
    /// Случайный сдвиг по x/z вокруг точки спавна волны
    pub spawn_radius: f32,
}

impl Default for RoomConfig {
    fn default() -> Self {
        Self {
            radius: 50.0,
            initial_delay: 2.0,
            retry_interval: 3.0,
            max_attempts: 10,
            chest_offset: Some([0.0, 0.0, 0.0]),
            spawn_radius: 2.0,
        }
    }
}

impl RoomConfig {
    fn validate(&self) -> SimResult<()> {
        non_negative("room.radius", self.radius)?;
        non_negative("room.initial_delay", self.initial_delay)?;
        non_negative("room.retry_interval", self.retry_interval)?;
        non_negative("room.spawn_radius", self.spawn_radius)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_is_valid() {
        assert!(SimulationConfig::default().validate().is_ok());
    }

    #[test]
    fn test_partial_json_uses_defaults() {
        let config = SimulationConfig::from_json_str(r#"{ "seed": 7, "boss": { "burst_count": 4 } }"#)
            .expect("valid json");

        assert_eq!(config.seed, 7);
        assert_eq!(config.boss.burst_count, 4);
        assert_eq!(config.boss.base.max_health, 1000);
        assert_eq!(config.jellyfish.laser.per_shot, 2);
    }

    #[test]
    fn test_invalid_thresholds_rejected() {
        let result = SimulationConfig::from_json_str(
            r#"{ "boss": { "phase2_threshold": 0.2, "phase3_threshold": 0.5 } }"#,
        );
        assert!(matches!(result, Err(SimError::InvalidConfig { field: "boss.phase3_threshold", .. })));
    }

    #[test]
    fn test_boss_attack_radius_bounded_by_max_distance() {
        let config = SimulationConfig::default();
        assert!(config.boss.base.attack_radius <= config.boss.max_distance);

        let result = SimulationConfig::from_json_str(r#"{ "boss": { "base": { "attack_radius": 15.0 } } }"#);
        assert!(matches!(result, Err(SimError::InvalidConfig { field: "boss.base.attack_radius", .. })));
    }

    #[test]
    fn test_random_ranges_must_be_finite() {
        let mut config = SimulationConfig::default();
        config.boss.explosion.offset_range = f32::INFINITY;
        assert!(matches!(
            config.validate(),
            Err(SimError::InvalidConfig { field: "boss.explosion.offset_range", .. })
        ));

        let mut config = SimulationConfig::default();
        config.boss.explosion.offset_range = 0.0;
        assert!(config.validate().is_err());

        let mut config = SimulationConfig::default();
        config.seahorse.brood.jitter = f32::NAN;
        assert!(matches!(
            config.validate(),
            Err(SimError::InvalidConfig { field: "seahorse.brood.jitter", .. })
        ));

        let result = SimulationConfig::from_json_str(r#"{ "boss": { "explosion": { "spacing": -1.0 } } }"#);
        assert!(matches!(result, Err(SimError::InvalidConfig { field: "boss.explosion.spacing", .. })));
    }

    #[test]
    fn test_zero_child_health_rejected() {
        let result = SimulationConfig::from_json_str(r#"{ "jelly_slime": { "split": { "child_max_health": 0 } } }"#);
        assert!(matches!(
            result,
            Err(SimError::InvalidConfig { field: "jelly_slime.split.child_max_health", .. })
        ));
    }

    #[test]
    fn test_malformed_json_is_parse_error() {
        let result = SimulationConfig::from_json_str("{ not json");
        assert!(matches!(result, Err(SimError::ConfigParse(_))));
    }

    #[test]
    fn test_missing_file_is_io_error() {
        let result = SimulationConfig::load("/definitely/not/here.json");
        assert!(matches!(result, Err(SimError::ConfigIo { .. })));
    }
}
