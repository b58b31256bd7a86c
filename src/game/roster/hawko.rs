// Hawko: light, fast faller with a sweetspot-heavy kit

use crate::error::ConfigError;
use crate::game::characters::{CharacterProfile, CharacterStats, MoveSlot, Moveset, BASE_STATS};
use crate::game::combat::{Hitbox, MoveBuilder, MoveDef};
use crate::game::events::SoundCue;

use super::{aerial_laser, sprite_table, up_special};

pub const HAWKO_STATS: CharacterStats = BASE_STATS;

pub fn hawko() -> Result<CharacterProfile, ConfigError> {
    let sprites = sprite_table(&[
        ("fair", 2),
        ("bair", 1),
        ("uair", 5),
        ("dair", 4),
        ("nair", 1),
        ("utilt", 8),
        ("jab", 1),
        ("dash_attack", 1),
        ("dtilt", 6),
        ("ftilt", 5),
        ("aerial_laser", 1),
    ]);

    let moveset = Moveset::new()
        .with(MoveSlot::ForwardAir, forward_air()?)
        .with(MoveSlot::BackAir, back_air()?)
        .with(MoveSlot::UpAir, up_air()?)
        .with(MoveSlot::DownAir, down_air()?)
        .with(MoveSlot::NeutralAir, neutral_air()?)
        .with(MoveSlot::UpTilt, up_tilt()?)
        .with(MoveSlot::Jab, jab()?)
        .with(MoveSlot::DashAttack, dash_attack()?)
        .with(MoveSlot::DownTilt, down_tilt()?)
        .with(MoveSlot::ForwardTilt, forward_tilt()?)
        .with(MoveSlot::NeutralSpecial, aerial_laser()?)
        .with(MoveSlot::UpSpecial, up_special()?);

    CharacterProfile::new("hawko", HAWKO_STATS, sprites, moveset)
}

/// Two weak early hits, then the sweetspot
fn forward_air() -> Result<MoveDef, ConfigError> {
    let mut m = MoveBuilder::aerial("forward_air", 11);
    m.sprite("fair");
    let sweet = m.hitbox(
        Hitbox::new(80.0, 40.0)
            .offset(20.0, 0.0)
            .rotation(30.0)
            .knockback(10.0, 30.0, 10.0)
            .damage(9.0),
    );
    let sour = Hitbox::new(80.0, 40.0)
        .offset(20.0, 0.0)
        .rotation(30.0)
        .knockback(5.0, 45.0, 5.0)
        .damage(3.0);
    let sour_first = m.hitbox(sour.clone());
    let sour_second = m.hitbox(sour);

    m.frames(2, 0, &[sour_first])
        .frames(2, 1, &[])
        .frames(2, 0, &[sour_second])
        .frames(2, 1, &[])
        .frames(2, 0, &[sweet])
        .frames(2, 1, &[]);
    m.build()
}

fn back_air() -> Result<MoveDef, ConfigError> {
    let mut m = MoveBuilder::aerial("back_air", 10);
    m.sprite("bair");
    let sweet = m.hitbox(
        Hitbox::new(60.0, 30.0)
            .offset(-25.0, 10.0)
            .rotation(-15.0)
            .knockback(10.0, 150.0, 10.0)
            .damage(15.0),
    );
    let sour = m.hitbox(
        Hitbox::new(40.0, 30.0)
            .offset(-30.0, 10.0)
            .knockback(5.0, 135.0, 5.0)
            .damage(9.0)
            .sibling(sweet),
    );
    let weak_front = m.hitbox(
        Hitbox::new(40.0, 20.0)
            .offset(30.0, 35.0)
            .rotation(-30.0)
            .knockback(3.0, 45.0, 2.0)
            .damage(5.0)
            .sibling(sour),
    );

    m.frames(3, 0, &[sweet, weak_front])
        .frames(5, 0, &[sour, weak_front]);
    m.build()
}

/// Two separate hits
fn up_air() -> Result<MoveDef, ConfigError> {
    let mut m = MoveBuilder::aerial("up_air", 9);
    m.sprite("uair");
    let first = m.hitbox(
        Hitbox::new(40.0, 60.0)
            .offset(0.0, -25.0)
            .knockback(10.0, 90.0, 5.0)
            .damage(6.0),
    );
    let second = m.hitbox(
        Hitbox::new(40.0, 60.0)
            .offset(0.0, -25.0)
            .knockback(10.0, 90.0, 10.0)
            .damage(10.0),
    );

    m.frame(0, &[])
        .frame(1, &[first])
        .frame(0, &[])
        .frame(2, &[second])
        .frame(3, &[])
        .frame(4, &[]);
    m.build()
}

/// Meteor
fn down_air() -> Result<MoveDef, ConfigError> {
    let mut m = MoveBuilder::aerial("down_air", 9);
    m.sprite("dair");
    let sweet = m.hitbox(
        Hitbox::new(40.0, 40.0)
            .offset(25.0, 35.0)
            .knockback(10.0, 280.0, 15.0)
            .damage(12.0)
            .sound(SoundCue("bighit")),
    );
    let sour = m.hitbox(
        Hitbox::new(60.0, 80.0)
            .offset(15.0, 15.0)
            .rotation(15.0)
            .knockback(5.0, 280.0, 7.0)
            .damage(9.0)
            .sibling(sweet),
    );

    for _ in 0..2 {
        for image in 0..4 {
            m.frame(image, &[sweet, sour]);
        }
    }
    for image in 0..4 {
        m.frame(image, &[]);
    }
    m.build()
}

fn neutral_air() -> Result<MoveDef, ConfigError> {
    let mut m = MoveBuilder::aerial("neutral_air", 7);
    m.sprite("nair");
    let sweet = m.hitbox(
        Hitbox::new(50.0, 30.0)
            .offset(25.0, 17.0)
            .knockback(10.0, 30.0, 10.0)
            .damage(12.0),
    );
    let sour = m.hitbox(
        Hitbox::new(50.0, 30.0)
            .offset(25.0, 17.0)
            .knockback(5.0, 45.0, 5.0)
            .damage(9.0)
            .sibling(sweet),
    );
    let back_weak = m.hitbox(
        Hitbox::new(40.0, 30.0)
            .offset(-15.0, 30.0)
            .knockback(5.0, 135.0, 5.0)
            .damage(9.0)
            .sibling(sour),
    );

    m.frames(2, 0, &[sweet, back_weak])
        .frames(2, 0, &[sour, back_weak])
        .frames(2, 0, &[]);
    m.build()
}

fn up_tilt() -> Result<MoveDef, ConfigError> {
    let mut m = MoveBuilder::ground("up_tilt");
    m.sprite("utilt");
    let low = m.hitbox(
        Hitbox::new(60.0, 40.0)
            .offset(-15.0, 10.0)
            .rotation(-30.0)
            .knockback(15.0, 95.0, 8.0)
            .damage(9.0),
    );
    let high = m.hitbox(
        Hitbox::new(50.0, 60.0)
            .offset(0.0, -15.0)
            .knockback(15.0, 95.0, 8.0)
            .damage(9.0)
            .sibling(low),
    );

    m.frame(0, &[])
        .frame(2, &[low])
        .frame(4, &[high])
        .frame(5, &[])
        .frame(6, &[])
        .frame(7, &[]);
    m.build()
}

fn jab() -> Result<MoveDef, ConfigError> {
    let mut m = MoveBuilder::ground("jab");
    let fist = m.hitbox(
        Hitbox::new(40.0, 30.0)
            .offset(30.0, 0.0)
            .knockback(30.0, 45.0, 1.0)
            .damage(4.0)
            .sound(SoundCue("smack3")),
    );

    m.sound(SoundCue("swing3"))
        .frame(0, &[fist])
        .frames(2, 0, &[]);
    m.build()
}

fn dash_attack() -> Result<MoveDef, ConfigError> {
    let mut m = MoveBuilder::ground("dash_attack");
    let sweet = m.hitbox(
        Hitbox::new(60.0, 30.0)
            .offset(30.0, 20.0)
            .knockback(70.0, 80.0, 0.0)
            .damage(9.0)
            .sound(SoundCue("sword_hit")),
    );
    let sour = m.hitbox(
        Hitbox::new(60.0, 30.0)
            .offset(30.0, 20.0)
            .knockback(30.0, 45.0, 0.0)
            .damage(6.0)
            .sibling(sweet)
            .sound(SoundCue("sword_hit2")),
    );

    m.start_velocity(Some(13.0), None)
        .frame(0, &[sweet])
        .frame(0, &[sour])
        .frames(4, 0, &[]);
    m.build()
}

fn down_tilt() -> Result<MoveDef, ConfigError> {
    let mut m = MoveBuilder::ground("down_tilt");
    m.sprite("dtilt");
    let sweet = m.hitbox(
        Hitbox::new(30.0, 20.0)
            .offset(50.0, 40.0)
            .knockback(10.0, 80.0, 13.0)
            .damage(13.0)
            .sound(SoundCue("sword_hit")),
    );
    let sour = m.hitbox(
        Hitbox::new(30.0, 30.0)
            .offset(10.0, 30.0)
            .knockback(5.0, 80.0, 8.0)
            .damage(6.0)
            .sibling(sweet)
            .sound(SoundCue("sword_hit2")),
    );

    m.frame(0, &[])
        .frame(1, &[])
        .frame(3, &[sweet, sour])
        .frame(4, &[sweet, sour])
        .frame(5, &[]);
    m.build()
}

fn forward_tilt() -> Result<MoveDef, ConfigError> {
    let mut m = MoveBuilder::ground("forward_tilt");
    m.sprite("ftilt");
    let sweet = m.hitbox(
        Hitbox::new(60.0, 30.0)
            .offset(30.0, 15.0)
            .knockback(8.0, 10.0, 8.0)
            .damage(9.0),
    );
    let sour = m.hitbox(
        Hitbox::new(60.0, 30.0)
            .offset(30.0, 15.0)
            .knockback(4.0, 10.0, 8.0)
            .damage(9.0)
            .sibling(sweet),
    );

    m.frame(0, &[])
        .frame(1, &[sweet])
        .frame(2, &[sour])
        .frame(3, &[])
        .frame(4, &[]);
    m.build()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game::combat::MoveKind;

    #[test]
    fn test_profile_is_valid() {
        let profile = hawko().unwrap();
        assert_eq!(profile.name(), "hawko");
        assert_eq!(profile.moveset().len(), 12);
        assert_eq!(profile.stats().run_speed, 7.8);
    }

    #[test]
    fn test_forward_air_data() {
        let fair = forward_air().unwrap();
        assert_eq!(fair.len(), 12);
        assert_eq!(fair.kind(), MoveKind::Aerial { landing_lag: 11 });
        // The two sourspot windows are separate hitboxes, so both can land
        assert_eq!(fair.frames()[0].hitboxes, vec![1]);
        assert_eq!(fair.frames()[4].hitboxes, vec![2]);
        assert_eq!(fair.frames()[8].hitboxes, vec![0]);
    }

    #[test]
    fn test_dash_attack_lunges() {
        let dash_attack = dash_attack().unwrap();
        assert_eq!(dash_attack.start_velocity().and_then(|start| start.u), Some(13.0));
    }
}
