/// Read-only view of the player's world position for collaborators
/// that track it (chase navigation, camera follow).
struct PlayerTracker<'a> {
    world: &'a World,
    player_id: Option<EntityId>,
}

impl PositionSource for PlayerTracker<'_> {
    fn tracked_position(&self) -> Option<Vec3> {
        let id = self.player_id?;
        let entity = self.world.find_entity(id)?;
        entity.active.then_some(entity.transform.position)
    }
}

/// The whole chase/collection session: player lifecycle, motion,
/// boost and respawn coordinators, level progression, and the wiring
/// between them. Collaborators (presentation, navigation) are
/// injected at construction; every absent one degrades to a skip.
pub(crate) struct ChaseSession {
    config: SessionConfig,
    layout: LevelLayout,
    timeline: SimTimeline,
    lifecycle: PlayerLifecycle,
    respawn: RespawnCoordinator,
    boost: BoostCoordinator,
    progression: LevelProgressionHooks,
    signals: SignalBus,
    presentation: Option<Box<dyn PresentationSink>>,
    chase_nav: Option<Box<dyn NavigationService>>,
    player_id: Option<EntityId>,
    obstacle_id: Option<EntityId>,
    second_enemy_id: Option<EntityId>,
    intent: Vec2,
    velocity: Vec3,
    was_moving: bool,
    missing_body_reported: bool,
    tracking_lost_reported: bool,
}

impl ChaseSession {
    pub(crate) fn new(config: SessionConfig, layout: LevelLayout) -> Self {
        let lifecycle = PlayerLifecycle::new(
            config.initial_countdown_seconds,
            config.pickup_time_bonus_seconds,
            config.death_presentation_wait_seconds,
        );
        let respawn = RespawnCoordinator::new(
            layout.player_spawn,
            config.respawn_delay_seconds,
            config.fall_threshold_y,
        );
        let boost = BoostCoordinator::new(
            config.base_speed,
            config.boost_multiplier,
            config.boost_duration_seconds,
        );
        let progression =
            LevelProgressionHooks::new(config.mid_count_threshold, config.max_count_threshold);
        Self {
            config,
            layout,
            timeline: SimTimeline::new(),
            lifecycle,
            respawn,
            boost,
            progression,
            signals: SignalBus::default(),
            presentation: None,
            chase_nav: None,
            player_id: None,
            obstacle_id: None,
            second_enemy_id: None,
            intent: Vec2::default(),
            velocity: Vec3::ZERO,
            was_moving: false,
            missing_body_reported: false,
            tracking_lost_reported: false,
        }
    }

    pub(crate) fn with_presentation(mut self, sink: Box<dyn PresentationSink>) -> Self {
        self.presentation = Some(sink);
        self
    }

    pub(crate) fn with_navigation(mut self, service: Box<dyn NavigationService>) -> Self {
        self.chase_nav = Some(service);
        self
    }

    pub(crate) fn signal_counts(&self) -> SignalCounts {
        self.signals.total_counts()
    }

    fn presentation_attached(&self) -> bool {
        self.presentation.is_some()
    }

    fn emit(&mut self, signal: PresentationSignal) {
        self.signals.emit(signal);
        if let Some(sink) = self.presentation.as_mut() {
            sink.signal(signal);
        }
    }

    fn set_banner(&mut self, banner: Option<&str>) {
        if let Some(sink) = self.presentation.as_mut() {
            sink.set_banner(banner);
        }
    }

    fn refresh_count_text(&mut self) {
        let text = format!("Count: {}", self.lifecycle.pickup_count());
        if let Some(sink) = self.presentation.as_mut() {
            sink.set_count_text(&text);
        }
    }

    fn refresh_timer_text(&mut self) {
        let text = format_timer_text(self.lifecycle.remaining_seconds());
        if let Some(sink) = self.presentation.as_mut() {
            sink.set_timer_text(&text);
        }
    }

    fn set_intent(&mut self, input: &InputSnapshot) {
        // Input is ignored outside Active; a dead or frozen player
        // keeps whatever velocity the damping has left.
        self.intent = if self.lifecycle.is_active() {
            input.intent_vector()
        } else {
            Vec2::default()
        };
    }

    fn handle_death_transition(&mut self, transition: DeathTransition, world: &mut World) {
        match transition {
            DeathTransition::Ignored => {}
            DeathTransition::PresentationWait => {
                // Entity stays up for the death presentation; the
                // wait timer disables it on expiry.
                self.emit(PresentationSignal::Died);
            }
            DeathTransition::DisableNow => {
                self.emit(PresentationSignal::Died);
                self.disable_player(world);
                self.respawn.request(self.timeline.now());
            }
        }
    }

    fn disable_player(&mut self, world: &mut World) {
        if let Some(id) = self.player_id {
            world.set_active(id, false);
        }
        self.velocity = Vec3::ZERO;
        self.intent = Vec2::default();
    }

    fn poll_timers(&mut self, world: &mut World) {
        let now = self.timeline.now();
        if self.lifecycle.poll_death_wait(now) {
            self.disable_player(world);
            self.respawn.request(now);
        }
        if self.respawn.poll(now) {
            self.complete_respawn(world);
        }
        // The boost runs on its own clock and survives death; only
        // expiry reverts the speed.
        if self.boost.poll(now) {
            debug!(speed = self.boost.effective_speed(), "boost_expired");
        }
    }

    fn complete_respawn(&mut self, world: &mut World) {
        let point = self.respawn.respawn_point();
        if let Some(id) = self.player_id {
            if let Some(player) = world.find_entity_mut(id) {
                player.transform.position = point;
                player.transform.yaw_degrees = 0.0;
                player.active = true;
            }
        }
        self.velocity = Vec3::ZERO;
        self.lifecycle.reset();
        self.set_banner(None);
        info!(x = point.x, z = point.z, "player_respawned");
    }

    fn check_fall(&mut self, world: &mut World) {
        let Some(position) = self.player_position(world) else {
            return;
        };
        if !self.respawn.fell_below_threshold(position) {
            return;
        }
        // Falling is fatal only positionally; the lifecycle may
        // already be Dead from a contact in the same tick, in which
        // case the in-flight guard has absorbed this.
        if self.lifecycle.is_active() {
            let transition = self
                .lifecycle
                .on_fatal_contact(self.timeline.now(), self.presentation_attached());
            self.handle_death_transition(transition, world);
        } else {
            self.disable_player(world);
            self.respawn.request(self.timeline.now());
        }
    }

    fn player_position(&self, world: &World) -> Option<Vec3> {
        let id = self.player_id?;
        world.find_entity(id).map(|entity| entity.transform.position)
    }

    fn collect_pickups(&mut self, world: &mut World) {
        let Some(player_position) = self.player_position(world) else {
            return;
        };
        if !self.lifecycle.is_active() {
            return;
        }
        let collected: Vec<EntityId> = world
            .entities()
            .iter()
            .filter(|entity| {
                entity.active
                    && entity.tag == EntityTag::Pickup
                    && entity.transform.position.distance_to(player_position)
                        <= entity.collider_radius + PLAYER_COLLIDER_RADIUS
            })
            .map(|entity| entity.id)
            .collect();

        for id in collected {
            if !self.lifecycle.on_pickup() {
                break;
            }
            world.set_active(id, false);
            let trigger = self.boost.activate(self.timeline.now());
            debug!(
                count = self.lifecycle.pickup_count(),
                boost = ?trigger,
                "pickup_collected"
            );
            self.refresh_count_text();
            let actions = self
                .progression
                .on_count_changed(self.lifecycle.pickup_count());
            for action in actions {
                self.apply_progression_action(action, world);
            }
        }
    }

    fn apply_progression_action(&mut self, action: ProgressionAction, world: &mut World) {
        match action {
            ProgressionAction::DeactivateObstacle => {
                if let Some(id) = self.obstacle_id {
                    world.set_active(id, false);
                    info!("obstacle_deactivated");
                }
            }
            ProgressionAction::SwapEnemyTiers => {
                let first_tier: Vec<EntityId> = world
                    .entities()
                    .iter()
                    .filter(|entity| {
                        entity.tag
                            == EntityTag::Enemy {
                                tier: EnemyTier::First,
                            }
                    })
                    .map(|entity| entity.id)
                    .collect();
                for id in first_tier {
                    world.despawn(id);
                }
                if let Some(id) = self.second_enemy_id {
                    world.set_active(id, true);
                }
                info!("enemy_tiers_swapped");
            }
            ProgressionAction::DeclareVictory => {
                self.lifecycle.freeze();
                self.emit(PresentationSignal::Won);
                self.set_banner(Some(WIN_BANNER_TEXT));
                let enemies: Vec<EntityId> = world
                    .entities()
                    .iter()
                    .filter(|entity| matches!(entity.tag, EntityTag::Enemy { .. }))
                    .map(|entity| entity.id)
                    .collect();
                for id in enemies {
                    world.despawn(id);
                }
                info!(count = self.lifecycle.pickup_count(), "victory_declared");
            }
        }
    }

    fn check_fatal_contacts(&mut self, world: &mut World) {
        if !self.lifecycle.is_active() {
            return;
        }
        let Some(player_position) = self.player_position(world) else {
            return;
        };
        let hit = world.entities().iter().any(|entity| {
            entity.active
                && matches!(entity.tag, EntityTag::Enemy { .. })
                && entity.transform.position.distance_to(player_position)
                    <= entity.collider_radius + PLAYER_COLLIDER_RADIUS
        });
        if hit {
            let transition = self
                .lifecycle
                .on_fatal_contact(self.timeline.now(), self.presentation_attached());
            self.handle_death_transition(transition, world);
        }
    }

    fn drive_chase_navigation(&mut self, world: &World) {
        if self.chase_nav.is_none() {
            return;
        }
        let tracker = PlayerTracker {
            world,
            player_id: self.player_id,
        };
        match tracker.tracked_position() {
            Some(position) => {
                if let Some(nav) = self.chase_nav.as_mut() {
                    nav.set_destination(position);
                }
            }
            None => {
                if !self.tracking_lost_reported {
                    self.tracking_lost_reported = true;
                    warn!("chase_target_unavailable");
                }
            }
        }
    }

    /// Edge-triggered movement signal for the presentation layer.
    fn update_moving_signal(&mut self) {
        let moving = self.velocity.magnitude() > INTENT_EPSILON;
        if moving != self.was_moving {
            self.was_moving = moving;
            self.emit(PresentationSignal::Moving(moving));
        }
    }

    /// The physics body is a mandatory collaborator; without it the
    /// session reports the wiring fault once and goes inert.
    fn player_body_id(&mut self, world: &World) -> Option<EntityId> {
        let id = self.player_id?;
        if world.find_entity(id).is_some() {
            return Some(id);
        }
        if !self.missing_body_reported {
            self.missing_body_reported = true;
            error!("player_body_missing");
        }
        None
    }
}

/// `Time: MM:SS`, rounded up so the display never shows 00:00 while
/// time remains.
fn format_timer_text(remaining_seconds: f32) -> String {
    let total = remaining_seconds.max(0.0).ceil() as u32;
    format!("Time: {:02}:{:02}", total / 60, total % 60)
}
