// Projectile types fired by the roster

use crate::game::combat::Hitbox;
use crate::game::events::SoundCue;
use crate::game::projectile::ProjectileDef;

/// A long, fast beam carrying three hitboxes along its length. It cannot be
/// struck and vanishes as soon as it lands a hit.
pub fn laser() -> ProjectileDef {
    [-75.0, 0.0, 75.0]
        .into_iter()
        .fold(
            ProjectileDef::new("laser", 150.0, 10.0, 20.0),
            |def, x_offset| {
                def.with_hitbox(
                    Hitbox::new(30.0, 30.0)
                        .offset(x_offset, 0.0)
                        .knockback(20.0, 30.0, 0.0)
                        .damage(3.0)
                        .sound(SoundCue("tap4")),
                )
            },
        )
        .immune_to_hits()
        .dies_on_hit()
        .with_sound(SoundCue("laser"))
}
