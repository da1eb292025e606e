use serde::Deserialize;

use crate::actor::{ActorState, Facing};
use crate::collision::{depenetrate, resolve, ContactPolicy, Resolution};
use crate::geometry::LevelGeometry;

/// Input for one tick. Sampled once and never re-read mid-resolution.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct MovementIntent {
    /// -1 left, 0 none, 1 right. Other values are clamped.
    pub horizontal: i8,
    pub jump: bool,
}

impl MovementIntent {
    pub const IDLE: Self = Self {
        horizontal: 0,
        jump: false,
    };

    pub fn new(horizontal: i8, jump: bool) -> Self {
        Self {
            horizontal: horizontal.signum(),
            jump,
        }
    }
}

/// Tuning constants, in pixels and pixels per tick. `y` grows downward, so
/// `jump_velocity` is negative.
#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
#[serde(default)]
pub struct MovementConfig {
    pub gravity: f32,
    pub jump_velocity: f32,
    pub max_fall_speed: f32,
    pub move_speed: f32,
    pub world_width: f32,
    pub world_height: f32,
    pub contact_policy: ContactPolicy,
}

impl Default for MovementConfig {
    fn default() -> Self {
        Self {
            gravity: 0.8,
            jump_velocity: -15.0,
            max_fall_speed: 10.0,
            move_speed: 5.0,
            world_width: 1000.0,
            world_height: 1000.0,
            contact_policy: ContactPolicy::NearestContact,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TickReport {
    /// Resolver output with `dx`, `dy` and `bounds` rewritten to the box the
    /// actor was committed to after the world clamp.
    pub resolution: Resolution,
    /// A jump started this tick.
    pub jumped: bool,
    /// The actor went from airborne to supported this tick.
    pub landed: bool,
}

#[derive(Debug, Clone, Copy, Default)]
pub struct MovementController {
    pub config: MovementConfig,
}

impl MovementController {
    pub fn new(config: MovementConfig) -> Self {
        Self { config }
    }

    pub fn tick(
        &self,
        actor: &mut ActorState,
        intent: MovementIntent,
        geometry: &LevelGeometry,
    ) -> TickReport {
        let cfg = &self.config;

        // The latch clears on release, airborne or not, so holding jump never
        // re-triggers but a fresh press right after landing does.
        if !intent.jump {
            actor.is_jumping = false;
        }

        let mut jumped = false;
        if intent.jump && !actor.is_jumping && !actor.is_airborne {
            actor.vertical_velocity = cfg.jump_velocity;
            actor.is_jumping = true;
            jumped = true;
            log::trace!("Jump at ({}, {})", actor.position.x, actor.position.y);
        }

        actor.vertical_velocity = (actor.vertical_velocity + cfg.gravity).min(cfg.max_fall_speed);

        let horizontal = intent.horizontal.signum();
        match horizontal {
            -1 => actor.facing = Facing::Left,
            1 => actor.facing = Facing::Right,
            _ => {}
        }

        let dx = f32::from(horizontal) * cfg.move_speed;
        let start = actor.bounds();
        let mut resolution = resolve(
            start,
            dx,
            actor.vertical_velocity,
            actor.vertical_velocity,
            geometry,
            cfg.contact_policy,
        );
        if resolution.hit_vertical() {
            actor.vertical_velocity = 0.0;
        }

        let mut bounds = resolution.bounds;
        bounds.x = bounds.x.clamp(0.0, (cfg.world_width - bounds.width).max(0.0));

        debug_assert!(
            !geometry.overlaps(&bounds),
            "actor {bounds:?} overlaps level geometry after resolution"
        );
        if geometry.overlaps(&bounds) {
            log::warn!("Actor {bounds:?} overlaps level geometry after resolution, pushing out");
            bounds = depenetrate(bounds, geometry);
        }
        actor.set_bounds(bounds);
        if bounds != resolution.bounds {
            resolution.dx = bounds.x - start.x;
            resolution.dy = bounds.y - start.y;
            resolution.bounds = bounds;
        }

        let was_airborne = actor.is_airborne;
        actor.is_airborne = !resolution.landed;
        let landed = was_airborne && resolution.landed;
        if landed {
            log::trace!("Landed at ({}, {})", actor.position.x, actor.position.y);
        }

        TickReport {
            resolution,
            jumped,
            landed,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geometry::CollisionRect;
    use approx::assert_abs_diff_eq;

    const PLATFORM: CollisionRect = CollisionRect::new(200.0, 900.0, 100.0, 20.0);

    fn platform_level() -> LevelGeometry {
        LevelGeometry::from_rects(vec![PLATFORM])
    }

    fn grounded_actor() -> ActorState {
        let mut actor = ActorState::spawn(CollisionRect::new(220.0, 820.0, 40.0, 80.0));
        actor.is_airborne = false;
        actor
    }

    fn jump() -> MovementIntent {
        MovementIntent::new(0, true)
    }

    #[test]
    fn falls_onto_platform_and_rests_there() {
        let geometry = platform_level();
        let controller = MovementController::default();
        let mut actor = ActorState::spawn(CollisionRect::new(220.0, 800.0, 40.0, 80.0));

        let mut landed_at = None;
        for tick in 1..=20 {
            let report = controller.tick(&mut actor, MovementIntent::IDLE, &geometry);
            if report.landed {
                landed_at = Some(tick);
            }
        }

        let landed_at = landed_at.expect("actor should land within 20 ticks");
        assert!(landed_at <= 14, "landed on tick {landed_at}");
        assert_eq!(actor.bounds().bottom(), 900.0);
        assert!(!actor.is_airborne);
        assert_eq!(actor.vertical_velocity, 0.0);
    }

    #[test]
    fn resting_actor_is_idempotent() {
        let geometry = platform_level();
        let controller = MovementController::default();
        let mut actor = grounded_actor();
        let before = actor.position;

        let report = controller.tick(&mut actor, MovementIntent::IDLE, &geometry);

        assert_eq!(actor.position, before);
        assert!(!actor.is_airborne);
        assert!(!report.landed, "already grounded, no landing transition");
        assert!(report.resolution.landed);
    }

    #[test]
    fn jump_then_land_returns_to_same_height() {
        let geometry = platform_level();
        let controller = MovementController::default();
        let mut actor = grounded_actor();

        let report = controller.tick(&mut actor, jump(), &geometry);
        assert!(report.jumped);
        assert!(actor.is_jumping);
        assert!(actor.is_airborne);
        // Jump velocity, then one tick of gravity.
        assert_abs_diff_eq!(actor.vertical_velocity, -15.0 + 0.8, epsilon = 1e-5);

        let mut lowest_y = actor.position.y;
        let mut landed = false;
        for _ in 0..120 {
            let report = controller.tick(&mut actor, MovementIntent::IDLE, &geometry);
            lowest_y = lowest_y.min(actor.position.y);
            if report.landed {
                landed = true;
                break;
            }
        }

        assert!(landed);
        assert!(lowest_y < 720.0, "jump apex should be well above the platform");
        assert_eq!(actor.position.y, 820.0);
        assert!(!actor.is_airborne);
    }

    #[test]
    fn held_jump_does_not_retrigger() {
        let geometry = platform_level();
        let controller = MovementController::default();
        let mut actor = grounded_actor();

        let mut jumps = 0;
        for _ in 0..200 {
            if controller.tick(&mut actor, jump(), &geometry).jumped {
                jumps += 1;
            }
        }
        assert_eq!(jumps, 1);
        assert!(!actor.is_airborne, "actor lands while jump is still held");

        // Release then press again: a second jump.
        controller.tick(&mut actor, MovementIntent::IDLE, &geometry);
        assert!(!actor.is_jumping);
        assert!(controller.tick(&mut actor, jump(), &geometry).jumped);
    }

    #[test]
    fn releasing_mid_air_clears_latch_without_jumping() {
        let geometry = platform_level();
        let controller = MovementController::default();
        let mut actor = grounded_actor();

        controller.tick(&mut actor, jump(), &geometry);
        controller.tick(&mut actor, MovementIntent::IDLE, &geometry);
        assert!(!actor.is_jumping);
        assert!(actor.is_airborne);

        let report = controller.tick(&mut actor, jump(), &geometry);
        assert!(!report.jumped, "no jump while airborne");
    }

    #[test]
    fn walking_into_wall_is_blocked_every_tick() {
        let geometry = LevelGeometry::from_rects(vec![
            CollisionRect::new(0.0, 900.0, 1000.0, 100.0),
            CollisionRect::new(300.0, 700.0, 50.0, 200.0),
        ]);
        let mut config = MovementConfig::default();
        config.move_speed = 37.0;
        let controller = MovementController::new(config);
        let mut actor = ActorState::spawn(CollisionRect::new(260.0, 820.0, 40.0, 80.0));
        actor.is_airborne = false;

        for _ in 0..10 {
            let report = controller.tick(&mut actor, MovementIntent::new(1, false), &geometry);
            assert_eq!(report.resolution.dx, 0.0);
            assert!(report.resolution.blocked_x(37.0));
        }
        assert_eq!(actor.position.x, 260.0);
        assert_eq!(actor.facing, Facing::Right);
    }

    #[test]
    fn facing_persists_without_input() {
        let geometry = platform_level();
        let controller = MovementController::default();
        let mut actor = grounded_actor();

        controller.tick(&mut actor, MovementIntent::new(-1, false), &geometry);
        assert_eq!(actor.facing, Facing::Left);
        controller.tick(&mut actor, MovementIntent::IDLE, &geometry);
        assert_eq!(actor.facing, Facing::Left);
    }

    #[test]
    fn horizontal_position_clamped_to_world() {
        let geometry =
            LevelGeometry::from_rects(vec![CollisionRect::new(0.0, 900.0, 1000.0, 100.0)]);
        let mut config = MovementConfig::default();
        config.world_width = 400.0;
        let controller = MovementController::new(config);

        let mut actor = ActorState::spawn(CollisionRect::new(2.0, 820.0, 40.0, 80.0));
        let report = controller.tick(&mut actor, MovementIntent::new(-1, false), &geometry);
        assert_eq!(actor.position.x, 0.0);
        assert_eq!(report.resolution.bounds, actor.bounds());
        assert_eq!(report.resolution.dx, -2.0);

        actor.position.x = 358.0;
        let report = controller.tick(&mut actor, MovementIntent::new(1, false), &geometry);
        assert_eq!(actor.position.x, 360.0);
        assert_eq!(report.resolution.bounds, actor.bounds());
        assert_eq!(report.resolution.dx, 2.0);
    }

    #[test]
    fn lands_flush_on_fractional_platform() {
        let geometry =
            LevelGeometry::from_rects(vec![CollisionRect::new(0.0, 391.30002, 600.0, 20.0)]);
        let controller = MovementController::default();
        let mut actor = ActorState::spawn(CollisionRect::new(100.0, 300.0, 40.0, 18.14));

        let mut landed = false;
        for _ in 0..60 {
            landed |= controller.tick(&mut actor, MovementIntent::IDLE, &geometry).landed;
            assert!(!geometry.overlaps(&actor.bounds()), "overlap at {:?}", actor.bounds());
        }

        assert!(landed);
        assert!(!actor.is_airborne);
        assert_abs_diff_eq!(actor.bounds().bottom(), 391.30002, epsilon = 1e-3);
    }

    #[test]
    fn fall_speed_is_capped() {
        let controller = MovementController::default();
        let mut actor = ActorState::spawn(CollisionRect::new(0.0, 0.0, 10.0, 10.0));
        let empty = LevelGeometry::default();
        for _ in 0..50 {
            controller.tick(&mut actor, MovementIntent::IDLE, &empty);
        }
        assert_eq!(actor.vertical_velocity, 10.0);
        assert!(actor.is_airborne);
    }

    #[test]
    fn bumping_ceiling_zeroes_velocity() {
        let geometry = LevelGeometry::from_rects(vec![
            PLATFORM,
            CollisionRect::new(200.0, 790.0, 100.0, 20.0),
        ]);
        let controller = MovementController::default();
        let mut actor = grounded_actor();

        let report = controller.tick(&mut actor, jump(), &geometry);
        assert!(report.jumped);
        assert!(report.resolution.hit_ceiling);
        assert_eq!(actor.position.y, 810.0);
        assert_eq!(actor.vertical_velocity, 0.0);
        assert!(actor.is_airborne);
    }

    #[test]
    fn intent_new_clamps_direction() {
        assert_eq!(MovementIntent::new(7, false).horizontal, 1);
        assert_eq!(MovementIntent::new(-3, true).horizontal, -1);
    }

    #[test]
    fn config_overrides_subset_from_json_defaults_rest() {
        let config: MovementConfig =
            serde_json::from_str(r#"{ "gravity": 1.5, "contact_policy": "last_match" }"#)
                .expect("partial config should parse");
        assert_eq!(config.gravity, 1.5);
        assert_eq!(config.contact_policy, ContactPolicy::LastMatch);
        assert_eq!(config.max_fall_speed, MovementConfig::default().max_fall_speed);
    }
}
