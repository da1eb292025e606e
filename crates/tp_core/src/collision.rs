//! Collision resolution against static level geometry.
//!
//! The algorithm is an **axis-separated sweep**: the horizontal displacement
//! is tested first and either kept whole or dropped to zero (no partial slide);
//! the vertical displacement is then tested from the already-corrected x
//! position and snapped flush against the surface that was hit.
//!
//! Each pass tests the region swept between the start and end positions, not
//! just the end box, so a large displacement cannot tunnel through a thin
//! rectangle.
//!
//! The resolver is pure. It reports what happened (`landed`, `hit_ceiling`)
//! and leaves velocity bookkeeping to the movement controller.

use serde::Deserialize;

use crate::geometry::{CollisionRect, LevelGeometry};

/// How the vertical pass picks a rectangle when the swept box overlaps several.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ContactPolicy {
    /// The surface met first along the motion, i.e. the one needing the
    /// smallest correction from the starting position.
    #[default]
    NearestContact,
    /// The last overlapping rectangle in geometry order. Order-dependent;
    /// kept for replaying levels tuned against that behavior.
    LastMatch,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Resolution {
    pub dx: f32,
    pub dy: f32,
    /// Actor box after applying the corrected displacement.
    pub bounds: CollisionRect,
    /// Vertical pass found a supporting rectangle below the actor.
    pub landed: bool,
    /// Vertical pass stopped an upward move against a rectangle above.
    pub hit_ceiling: bool,
}

impl Resolution {
    pub fn blocked_x(&self, requested_dx: f32) -> bool {
        requested_dx != 0.0 && self.dx == 0.0
    }

    pub fn hit_vertical(&self) -> bool {
        self.landed || self.hit_ceiling
    }
}

pub fn resolve(
    actor: CollisionRect,
    dx: f32,
    dy: f32,
    vertical_velocity: f32,
    geometry: &LevelGeometry,
    policy: ContactPolicy,
) -> Resolution {
    let dx = resolve_axis_x(actor, dx, geometry);
    let moved = actor.translated(dx, 0.0);
    let (y, contact) = resolve_axis_y(moved, dy, vertical_velocity, geometry, policy);

    // Keep the snapped y itself; y + dy can round past the surface.
    Resolution {
        dx,
        dy: y - moved.y,
        bounds: CollisionRect { y, ..moved },
        landed: contact == Some(VerticalContact::Floor),
        hit_ceiling: contact == Some(VerticalContact::Ceiling),
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum VerticalContact {
    Floor,
    Ceiling,
}

fn resolve_axis_x(actor: CollisionRect, dx: f32, geometry: &LevelGeometry) -> f32 {
    if dx == 0.0 {
        return 0.0;
    }
    // Full stop on any overlap: the first hit is enough.
    if geometry.overlaps(&swept(actor, dx, 0.0)) {
        0.0
    } else {
        dx
    }
}

fn resolve_axis_y(
    actor: CollisionRect,
    dy: f32,
    vertical_velocity: f32,
    geometry: &LevelGeometry,
    policy: ContactPolicy,
) -> (f32, Option<VerticalContact>) {
    let candidate = swept(actor, 0.0, dy);
    let moving_up = vertical_velocity < 0.0;
    // Resting y for each hit: just below a ceiling or flush on top of a floor.
    let targets = geometry
        .rects()
        .iter()
        .filter(|rect| rect.intersects(&candidate))
        .map(|rect| {
            if moving_up {
                rect.bottom()
            } else {
                flush_before(rect.top(), actor.height)
            }
        });

    let chosen = match policy {
        ContactPolicy::LastMatch => targets.last(),
        ContactPolicy::NearestContact => {
            targets.min_by(|a, b| (a - actor.y).abs().total_cmp(&(b - actor.y).abs()))
        }
    };

    match chosen {
        Some(target) if moving_up => (target, Some(VerticalContact::Ceiling)),
        Some(target) => (target, Some(VerticalContact::Floor)),
        None => (actor.y + dy, None),
    }
}

/// Largest start coordinate whose span of `extent` ends at or before `edge`.
///
/// `edge - extent` alone can round so that adding `extent` back lands one ulp
/// past `edge`, which [`CollisionRect::intersects`] counts as an overlap.
fn flush_before(edge: f32, extent: f32) -> f32 {
    let mut start = edge - extent;
    while start + extent > edge {
        start = next_down(start);
    }
    start
}

/// Largest finite `f32` strictly below `value`.
fn next_down(value: f32) -> f32 {
    if value == 0.0 {
        return -f32::from_bits(1);
    }
    let bits = value.to_bits();
    if value > 0.0 {
        f32::from_bits(bits - 1)
    } else {
        f32::from_bits(bits + 1)
    }
}

/// Smallest rectangle covering `actor` before and after moving by (`dx`, `dy`).
fn swept(actor: CollisionRect, dx: f32, dy: f32) -> CollisionRect {
    CollisionRect::new(
        actor.x + dx.min(0.0),
        actor.y + dy.min(0.0),
        actor.width + dx.abs(),
        actor.height + dy.abs(),
    )
}

/// Pushes `bounds` out of every rectangle it overlaps, each time along the
/// axis of least penetration. Used to restore the no-overlap invariant when
/// something upstream broke it.
pub fn depenetrate(mut bounds: CollisionRect, geometry: &LevelGeometry) -> CollisionRect {
    // Bounded so adversarial geometry cannot spin forever.
    for _ in 0..=geometry.len() {
        let Some(rect) = geometry.rects().iter().find(|r| r.intersects(&bounds)) else {
            break;
        };
        // Candidate positions: flush left, right, on top, below.
        let pushes = [
            (flush_before(rect.left(), bounds.width), bounds.y),
            (rect.right(), bounds.y),
            (bounds.x, flush_before(rect.top(), bounds.height)),
            (bounds.x, rect.bottom()),
        ];
        let distance = |&(x, y): &(f32, f32)| (x - bounds.x).abs() + (y - bounds.y).abs();
        let (x, y) = pushes
            .into_iter()
            .min_by(|a, b| distance(a).total_cmp(&distance(b)))
            .unwrap_or((bounds.x, bounds.y));
        bounds = CollisionRect { x, y, ..bounds };
    }
    bounds
}
