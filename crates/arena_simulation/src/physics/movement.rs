//! Player movement + aim из PlayerControl
//!
//! Top-down: move_input (x, y) → мир (x, 0, y), поворот только по yaw.

use bevy::prelude::*;

use crate::combat::components::DamageEffects;
use crate::combat::Dead;
use crate::components::{face_towards, PlayerControl};

/// Система: движение и прицеливание игрока
///
/// Подавлено пока игрок в knockback (управление возвращается по окончании окна).
pub fn drive_player(
    mut query: Query<(&PlayerControl, &mut Transform, Option<&DamageEffects>), Without<Dead>>,
    time: Res<Time<Fixed>>,
) {
    let delta = time.delta_secs();

    for (control, mut transform, effects) in query.iter_mut() {
        if effects.is_some_and(|effects| effects.controls_suspended()) {
            continue;
        }

        let input = control.move_input.clamp_length_max(1.0);
        transform.translation += Vec3::new(input.x, 0.0, input.y) * control.speed * delta;

        if let Some(aim_point) = control.aim_point {
            face_towards(&mut transform, aim_point);
        }
    }
}
