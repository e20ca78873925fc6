#[derive(Debug, Clone, Copy, PartialEq)]
struct MotionState {
    yaw_degrees: f32,
    velocity: Vec3,
}

/// One fixed-rate integration step. Pure function of the current
/// motion state, the clamped intent vector, the speed/rotation caps,
/// and the fixed dt. Below the intent threshold no impulse or
/// rotation is applied; velocity decays toward zero instead so the
/// body does not slide indefinitely.
fn integrate_motion(
    state: MotionState,
    intent: Vec2,
    speed_cap: f32,
    rotation_cap_degrees: f32,
    dt_seconds: f32,
) -> MotionState {
    if intent.magnitude() <= INTENT_EPSILON {
        let damping = (1.0 - IDLE_DAMPING_RATE_PER_SECOND * dt_seconds).clamp(0.0, 1.0);
        return MotionState {
            yaw_degrees: state.yaw_degrees,
            velocity: state.velocity.scaled(damping),
        };
    }

    let target_yaw = yaw_from_intent(intent);
    let yaw_degrees = rotate_toward_degrees(
        state.yaw_degrees,
        target_yaw,
        rotation_cap_degrees * dt_seconds,
    );

    // Intent scaled into an instantaneous impulse; dt is folded in
    // here, so the speed clamp below uses the raw cap.
    let mut velocity = Vec3 {
        x: state.velocity.x + intent.x * speed_cap * dt_seconds,
        y: state.velocity.y,
        z: state.velocity.z + intent.y * speed_cap * dt_seconds,
    };
    let speed = velocity.magnitude();
    if speed > speed_cap {
        velocity = velocity.scaled(speed_cap / speed);
    }

    MotionState {
        yaw_degrees,
        velocity,
    }
}

/// Heading for an intent vector, measured clockwise from the +z
/// ground axis.
fn yaw_from_intent(intent: Vec2) -> f32 {
    intent.x.atan2(intent.y).to_degrees()
}

fn rotate_toward_degrees(current: f32, target: f32, max_delta: f32) -> f32 {
    let difference = wrap_degrees(target - current);
    if difference.abs() <= max_delta {
        target
    } else {
        current + difference.signum() * max_delta
    }
}

/// Shortest signed angle equivalent, in (-180, 180].
fn wrap_degrees(angle: f32) -> f32 {
    let wrapped = angle.rem_euclid(360.0);
    if wrapped > 180.0 {
        wrapped - 360.0
    } else {
        wrapped
    }
}
