type ConfigResult<T> = Result<T, String>;

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub(crate) struct SessionConfig {
    pub(crate) base_speed: f32,
    pub(crate) rotation_speed_cap_degrees: f32,
    pub(crate) boost_multiplier: f32,
    pub(crate) boost_duration_seconds: f32,
    pub(crate) fall_threshold_y: f32,
    pub(crate) respawn_delay_seconds: f32,
    pub(crate) pickup_time_bonus_seconds: f32,
    pub(crate) initial_countdown_seconds: f32,
    pub(crate) death_presentation_wait_seconds: f32,
    pub(crate) mid_count_threshold: u32,
    pub(crate) max_count_threshold: u32,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            base_speed: 10.0,
            rotation_speed_cap_degrees: 720.0,
            boost_multiplier: 2.0,
            boost_duration_seconds: 1.0,
            fall_threshold_y: -10.0,
            respawn_delay_seconds: 2.0,
            pickup_time_bonus_seconds: 15.0,
            initial_countdown_seconds: 15.0,
            death_presentation_wait_seconds: 1.0,
            mid_count_threshold: 4,
            max_count_threshold: 12,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub(crate) struct LevelLayout {
    pub(crate) player_spawn: Vec3,
    pub(crate) pickups: Vec<Vec3>,
    pub(crate) first_tier_enemies: Vec<Vec3>,
    pub(crate) second_tier_enemy: Option<Vec3>,
    pub(crate) obstacle: Option<Vec3>,
}

impl Default for LevelLayout {
    fn default() -> Self {
        let mut pickups = Vec::with_capacity(12);
        for index in 0..12u32 {
            let angle = (index as f32 / 12.0) * std::f32::consts::TAU;
            pickups.push(Vec3 {
                x: angle.cos() * 6.0,
                y: 0.5,
                z: angle.sin() * 6.0,
            });
        }
        Self {
            player_spawn: Vec3 {
                x: 0.0,
                y: 0.5,
                z: 0.0,
            },
            pickups,
            first_tier_enemies: vec![Vec3 {
                x: 8.0,
                y: 0.5,
                z: 8.0,
            }],
            second_tier_enemy: Some(Vec3 {
                x: -8.0,
                y: 0.5,
                z: -8.0,
            }),
            obstacle: Some(Vec3 {
                x: 10.0,
                y: 0.5,
                z: 0.0,
            }),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub(crate) struct GameConfigFile {
    pub(crate) session: SessionConfig,
    pub(crate) layout: LevelLayout,
}

impl GameConfigFile {
    pub(crate) fn validate(&self) -> ConfigResult<()> {
        let session = &self.session;
        if session.base_speed <= 0.0 {
            return Err("session.base_speed must be positive".to_string());
        }
        if session.rotation_speed_cap_degrees <= 0.0 {
            return Err("session.rotation_speed_cap_degrees must be positive".to_string());
        }
        if session.boost_multiplier < 1.0 {
            return Err("session.boost_multiplier must be at least 1.0".to_string());
        }
        if session.boost_duration_seconds <= 0.0 {
            return Err("session.boost_duration_seconds must be positive".to_string());
        }
        if session.respawn_delay_seconds < 0.0 {
            return Err("session.respawn_delay_seconds must not be negative".to_string());
        }
        if session.initial_countdown_seconds <= 0.0 {
            return Err("session.initial_countdown_seconds must be positive".to_string());
        }
        if session.mid_count_threshold >= session.max_count_threshold {
            return Err(format!(
                "session.mid_count_threshold ({}) must be below max_count_threshold ({})",
                session.mid_count_threshold, session.max_count_threshold
            ));
        }
        Ok(())
    }
}

pub(crate) fn load_config_file(path: &Path) -> ConfigResult<GameConfigFile> {
    let raw = fs::read_to_string(path)
        .map_err(|error| format!("failed to read config {}: {error}", path.display()))?;
    let mut deserializer = serde_json::Deserializer::from_str(&raw);
    let config: GameConfigFile = serde_path_to_error::deserialize(&mut deserializer)
        .map_err(|error| {
            format!(
                "invalid config {}: {} (at {})",
                path.display(),
                error.inner(),
                error.path()
            )
        })?;
    Ok(config)
}
