impl Session for ChaseSession {
    fn load(&mut self, world: &mut World) {
        let player_id = world.spawn(
            EntityTag::Player,
            Transform {
                position: self.layout.player_spawn,
                yaw_degrees: 0.0,
            },
            PLAYER_COLLIDER_RADIUS,
            "player",
        );
        self.player_id = Some(player_id);
        self.respawn.set_respawn_point(self.layout.player_spawn);

        for position in &self.layout.pickups {
            world.spawn(
                EntityTag::Pickup,
                Transform {
                    position: *position,
                    yaw_degrees: 0.0,
                },
                PICKUP_COLLIDER_RADIUS,
                "pickup",
            );
        }
        for position in &self.layout.first_tier_enemies {
            world.spawn(
                EntityTag::Enemy {
                    tier: EnemyTier::First,
                },
                Transform {
                    position: *position,
                    yaw_degrees: 0.0,
                },
                ENEMY_COLLIDER_RADIUS,
                "enemy_first",
            );
        }
        if let Some(position) = self.layout.second_tier_enemy {
            self.second_enemy_id = Some(world.spawn(
                EntityTag::Enemy {
                    tier: EnemyTier::Second,
                },
                Transform {
                    position,
                    yaw_degrees: 0.0,
                },
                ENEMY_COLLIDER_RADIUS,
                "enemy_second",
            ));
        }
        if let Some(position) = self.layout.obstacle {
            self.obstacle_id = Some(world.spawn(
                EntityTag::Obstacle,
                Transform {
                    position,
                    yaw_degrees: 0.0,
                },
                OBSTACLE_COLLIDER_RADIUS,
                "obstacle",
            ));
        }
        world.apply_pending();

        // The second-tier enemy is held back until the mid threshold.
        if let Some(id) = self.second_enemy_id {
            world.set_active(id, false);
        }

        self.refresh_count_text();
        self.refresh_timer_text();
        self.set_banner(None);
        info!(
            entities = world.entity_count(),
            pickups = self.layout.pickups.len(),
            "session_loaded"
        );
    }

    fn update(
        &mut self,
        dt_seconds: f32,
        input: &InputSnapshot,
        world: &mut World,
    ) -> SessionCommand {
        if input.quit_requested() {
            return SessionCommand::Exit;
        }

        self.timeline.advance(dt_seconds);
        self.set_intent(input);

        let outcome = self.lifecycle.tick_countdown(
            dt_seconds,
            self.timeline.now(),
            self.presentation_attached(),
        );
        if let CountdownOutcome::Expired(transition) = outcome {
            warn!("countdown_expired");
            self.set_banner(Some(TIME_UP_BANNER_TEXT));
            self.handle_death_transition(transition, world);
        }

        self.poll_timers(world);
        self.check_fall(world);
        self.drive_chase_navigation(world);
        self.refresh_timer_text();
        SessionCommand::None
    }

    fn fixed_update(&mut self, fixed_dt_seconds: f32, world: &mut World) {
        let Some(player_id) = self.player_body_id(world) else {
            return;
        };

        if self.lifecycle.is_active() {
            let yaw_degrees = match world.find_entity(player_id) {
                Some(player) => player.transform.yaw_degrees,
                None => return,
            };
            let next = integrate_motion(
                MotionState {
                    yaw_degrees,
                    velocity: self.velocity,
                },
                self.intent,
                self.boost.effective_speed(),
                self.config.rotation_speed_cap_degrees,
                fixed_dt_seconds,
            );
            self.velocity = next.velocity;
            if let Some(player) = world.find_entity_mut(player_id) {
                let step = next.velocity.scaled(fixed_dt_seconds);
                player.transform.position = Vec3 {
                    x: player.transform.position.x + step.x,
                    y: player.transform.position.y + step.y,
                    z: player.transform.position.z + step.z,
                };
                player.transform.yaw_degrees = next.yaw_degrees;
            }

            self.collect_pickups(world);
            self.check_fatal_contacts(world);
        }

        self.update_moving_signal();
    }

    fn shutdown(&mut self, _world: &mut World) {
        let counts = self.signals.total_counts();
        info!(
            pickups = self.lifecycle.pickup_count(),
            deaths = counts.died,
            won = counts.won > 0,
            "session_summary"
        );
    }
}
