//! Spatial primitives (headless замена engine collision layer)
//!
//! Ядро только потребляет эти запросы: ближайший entity в радиусе,
//! сфера vs box, луч vs box, поворот к цели.

use bevy::prelude::*;

/// Горизонтальная проекция (y = 0)
pub fn flat(v: Vec3) -> Vec3 {
    Vec3::new(v.x, 0.0, v.z)
}

/// Высота тела по вертикали: зависший игрок всё ещё досягаем с земли
pub const BODY_HEIGHT: f32 = 2.0;

/// Расстояние по горизонтали (XZ)
pub fn flat_distance(a: Vec3, b: Vec3) -> f32 {
    flat(b - a).length()
}

/// Контакт-капсула: горизонтальный радиус + вертикальный допуск BODY_HEIGHT
pub fn within_reach(a: Vec3, b: Vec3, reach: f32) -> bool {
    flat_distance(a, b) <= reach && (b.y - a.y).abs() <= BODY_HEIGHT
}

/// Ближайший кандидат в радиусе (tie → первый по порядку итератора)
pub fn nearest_within<I>(origin: Vec3, radius: f32, candidates: I) -> Option<(Entity, f32)>
where
    I: IntoIterator<Item = (Entity, Vec3)>,
{
    let mut best: Option<(Entity, f32)> = None;
    for (entity, position) in candidates {
        let distance = origin.distance(position);
        if distance > radius {
            continue;
        }
        if best.map_or(true, |(_, d)| distance < d) {
            best = Some((entity, distance));
        }
    }
    best
}

pub fn sphere_overlaps_box(center: Vec3, radius: f32, box_center: Vec3, half_extents: Vec3) -> bool {
    let min = box_center - half_extents;
    let max = box_center + half_extents;
    let closest = center.clamp(min, max);
    closest.distance_squared(center) <= radius * radius
}

/// Slab test: расстояние до входа луча в box, если он ближе max_distance
pub fn ray_hits_box(
    origin: Vec3,
    direction: Vec3,
    max_distance: f32,
    box_center: Vec3,
    half_extents: Vec3,
) -> Option<f32> {
    let direction = direction.normalize_or_zero();
    if direction == Vec3::ZERO {
        return None;
    }

    let min = box_center - half_extents;
    let max = box_center + half_extents;
    let mut t_enter = 0.0_f32;
    let mut t_exit = max_distance;

    for axis in 0..3 {
        let o = origin[axis];
        let d = direction[axis];
        if d.abs() < f32::EPSILON {
            if o < min[axis] || o > max[axis] {
                return None;
            }
            continue;
        }
        let t1 = (min[axis] - o) / d;
        let t2 = (max[axis] - o) / d;
        let (near, far) = if t1 < t2 { (t1, t2) } else { (t2, t1) };
        t_enter = t_enter.max(near);
        t_exit = t_exit.min(far);
        if t_enter > t_exit {
            return None;
        }
    }

    Some(t_enter)
}

/// Поворот по горизонтали к точке с конечной угловой скоростью (slerp-фактор turn_rate·dt)
pub fn rotate_toward(transform: &mut Transform, target: Vec3, turn_rate: f32, delta: f32) {
    let direction = flat(target - transform.translation);
    if direction.length_squared() < 1e-6 {
        return;
    }

    let desired = Transform::IDENTITY.looking_to(direction, Vec3::Y).rotation;
    let t = (turn_rate * delta).clamp(0.0, 1.0);
    transform.rotation = transform.rotation.slerp(desired, t);
}

/// Горизонтальный forward (Bevy: -Z)
pub fn flat_forward(transform: &Transform) -> Vec3 {
    flat(transform.forward().as_vec3()).normalize_or_zero()
}

/// Знаковый угол (градусы) от `from` к `to` вокруг +Y
pub fn signed_angle_y(from: Vec3, to: Vec3) -> f32 {
    let a = flat(from).normalize_or_zero();
    let b = flat(to).normalize_or_zero();
    let cross = a.cross(b).y;
    let dot = a.dot(b);
    cross.atan2(dot).to_degrees()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_nearest_within_radius() {
        let a = Entity::from_raw(1);
        let b = Entity::from_raw(2);
        let c = Entity::from_raw(3);

        let found = nearest_within(
            Vec3::ZERO,
            5.0,
            [(a, Vec3::new(4.0, 0.0, 0.0)), (b, Vec3::new(2.0, 0.0, 0.0)), (c, Vec3::new(9.0, 0.0, 0.0))],
        );
        assert_eq!(found.map(|(e, _)| e), Some(b));

        assert!(nearest_within(Vec3::ZERO, 1.0, [(c, Vec3::new(9.0, 0.0, 0.0))]).is_none());
    }

    #[test]
    fn test_within_reach_ignores_hover_height() {
        let ground = Vec3::new(0.0, 0.0, 0.5);
        let hovering = Vec3::new(0.0, 1.5, 0.0);

        assert!(within_reach(ground, hovering, 0.7));
        assert!((flat_distance(ground, hovering) - 0.5).abs() < 1e-6);
        // Слишком высоко
        assert!(!within_reach(ground, Vec3::new(0.0, 3.0, 0.0), 0.7));
        // Слишком далеко по горизонтали
        assert!(!within_reach(ground, Vec3::new(0.0, 0.0, 2.0), 0.7));
    }

    #[test]
    fn test_ray_hits_box() {
        let hit = ray_hits_box(Vec3::ZERO, Vec3::X, 10.0, Vec3::new(5.0, 0.0, 0.0), Vec3::ONE);
        assert!((hit.unwrap() - 4.0).abs() < 1e-5);

        // Слишком далеко
        assert!(ray_hits_box(Vec3::ZERO, Vec3::X, 3.0, Vec3::new(5.0, 0.0, 0.0), Vec3::ONE).is_none());
        // Мимо
        assert!(ray_hits_box(Vec3::ZERO, Vec3::Z, 10.0, Vec3::new(5.0, 0.0, 0.0), Vec3::ONE).is_none());
    }

    #[test]
    fn test_sphere_box_overlap() {
        assert!(sphere_overlaps_box(Vec3::new(1.4, 0.0, 0.0), 0.5, Vec3::ZERO, Vec3::ONE));
        assert!(!sphere_overlaps_box(Vec3::new(1.6, 0.0, 0.0), 0.5, Vec3::ZERO, Vec3::ONE));
    }

    #[test]
    fn test_rotate_toward_is_gradual() {
        let mut transform = Transform::IDENTITY;
        let target = Vec3::new(10.0, 0.0, 0.0);

        rotate_toward(&mut transform, target, 4.0, 1.0 / 60.0);
        let angle = signed_angle_y(flat_forward(&transform), target).abs();
        assert!(angle > 1.0 && angle < 90.0, "turned too far or not at all: {}", angle);

        for _ in 0..600 {
            rotate_toward(&mut transform, target, 4.0, 1.0 / 60.0);
        }
        assert!(signed_angle_y(flat_forward(&transform), target).abs() < 0.5);
    }
}
