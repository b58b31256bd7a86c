// Monkey King: heavy, wide, long-reaching staff

use crate::error::ConfigError;
use crate::game::characters::{CharacterProfile, CharacterStats, MoveSlot, Moveset, BASE_STATS};
use crate::game::combat::{Hitbox, MoveBuilder, MoveDef, NextState};
use crate::game::events::SoundCue;

use super::{aerial_laser, sprite_table, up_special};

pub const MONKEY_KING_STATS: CharacterStats = CharacterStats {
    mass: 20.0,
    width: 90.0,
    ground_acceleration: 6.0,
    run_speed: 9.0,
    air_speed: 5.5,
    gravity: 0.6,
    jump_speed: 13.0,
    friction: 0.8,
    jumpsquat_frames: 7,
    ..BASE_STATS
};

pub fn monkey_king() -> Result<CharacterProfile, ConfigError> {
    let sprites = sprite_table(&[
        ("fair", 9),
        ("bair", 3),
        ("uair", 4),
        ("dair", 4),
        ("nair", 6),
        ("utilt", 8),
        ("jab", 2),
        ("dash_attack", 1),
        ("dtilt", 5),
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

    CharacterProfile::new("monkey_king", MONKEY_KING_STATS, sprites, moveset)
}

/// Overhead staff swing: the tip launches, the arc underneath spikes
fn forward_air() -> Result<MoveDef, ConfigError> {
    let mut m = MoveBuilder::aerial("forward_air", 15);
    m.sprite("fair");
    let wap = m.hitbox(
        Hitbox::new(110.0, 50.0)
            .offset(15.0, -65.0)
            .rotation(15.0)
            .knockback(10.0, 45.0, 10.0)
            .damage(15.0),
    );
    let spike = m.hitbox(
        Hitbox::new(80.0, 40.0)
            .offset(40.0, 30.0)
            .knockback(20.0, -80.0, 15.0)
            .damage(15.0)
            .sibling(wap),
    );
    let wap_low = m.hitbox(
        Hitbox::new(60.0, 110.0)
            .offset(65.0, -10.0)
            .knockback(20.0, 10.0, 10.0)
            .damage(15.0)
            .sibling(spike),
    );

    m.frame(0, &[])
        .frame(1, &[])
        .frames(3, 2, &[])
        .frame(3, &[wap])
        .frame(4, &[wap_low, spike])
        .frame(5, &[spike])
        .frame(6, &[])
        .frame(7, &[])
        .frame(8, &[]);
    m.build()
}

fn back_air() -> Result<MoveDef, ConfigError> {
    let mut m = MoveBuilder::aerial("back_air", 5);
    m.sprite("bair");
    let sweet = m.hitbox(
        Hitbox::new(80.0, 40.0)
            .offset(-50.0, 10.0)
            .knockback(10.0, 170.0, 10.0)
            .damage(10.0),
    );
    let sour = m.hitbox(
        Hitbox::new(60.0, 30.0)
            .offset(-50.0, 10.0)
            .knockback(5.0, 135.0, 5.0)
            .damage(5.0)
            .sibling(sweet),
    );
    let weak_front = m.hitbox(
        Hitbox::new(30.0, 40.0)
            .offset(20.0, 25.0)
            .knockback(3.0, 45.0, 2.0)
            .damage(5.0)
            .sibling(sour),
    );

    m.frame(0, &[])
        .frame(1, &[])
        .frame(2, &[sweet, weak_front])
        .frames(3, 2, &[sour, weak_front])
        .frame(1, &[]);
    m.build()
}

/// Sweeping arc overhead, back to front
fn up_air() -> Result<MoveDef, ConfigError> {
    let mut m = MoveBuilder::aerial("up_air", 2);
    m.sprite("uair");
    let smack = SoundCue("smack");
    let behind = m.hitbox(
        Hitbox::new(40.0, 50.0)
            .offset(-45.0, -40.0)
            .knockback(10.0, 80.0, 15.0)
            .damage(10.0)
            .sound(smack),
    );
    let above = m.hitbox(
        Hitbox::new(100.0, 50.0)
            .offset(5.0, -55.0)
            .knockback(10.0, 90.0, 15.0)
            .damage(10.0)
            .sibling(behind)
            .sound(smack),
    );
    let ahead = m.hitbox(
        Hitbox::new(60.0, 70.0)
            .offset(40.0, -10.0)
            .knockback(10.0, 90.0, 15.0)
            .damage(10.0)
            .sibling(above)
            .sound(smack),
    );

    m.frame(0, &[])
        .frame(1, &[])
        .frame(1, &[behind])
        .frame(2, &[above])
        .frame(3, &[ahead])
        .frames(3, 3, &[]);
    m.build()
}

/// Staff plant: a long meteor window
fn down_air() -> Result<MoveDef, ConfigError> {
    let mut m = MoveBuilder::aerial("down_air", 15);
    m.sprite("dair");
    let bighit = SoundCue("bighit");
    let sweet = m.hitbox(
        Hitbox::new(60.0, 60.0)
            .offset(10.0, 30.0)
            .knockback(10.0, 270.0, 15.0)
            .damage(20.0)
            .sound(bighit),
    );
    let sweet_low = m.hitbox(
        Hitbox::new(60.0, 70.0)
            .offset(5.0, 40.0)
            .knockback(10.0, 270.0, 15.0)
            .damage(20.0)
            .sibling(sweet)
            .sound(bighit),
    );
    let sour = m.hitbox(
        Hitbox::new(40.0, 50.0)
            .offset(5.0, 40.0)
            .knockback(5.0, 270.0, 7.0)
            .damage(10.0)
            .sibling(sweet_low)
            .sound(bighit),
    );

    m.frame(0, &[])
        .frames(3, 1, &[])
        .frame(2, &[sweet])
        .frames(4, 3, &[sweet_low])
        .frames(2, 3, &[sour])
        .frames(3, 3, &[]);
    m.build()
}

/// Two spins, each hitting front and back
fn neutral_air() -> Result<MoveDef, ConfigError> {
    let mut m = MoveBuilder::aerial("neutral_air", 2);
    m.sprite("nair");
    let front = m.hitbox(
        Hitbox::new(90.0, 30.0)
            .offset(30.0, 0.0)
            .rotation(-10.0)
            .knockback(10.0, 45.0, 10.0)
            .damage(10.0),
    );
    let back = m.hitbox(
        Hitbox::new(50.0, 30.0)
            .offset(-45.0, -35.0)
            .rotation(-25.0)
            .knockback(5.0, 135.0, 5.0)
            .damage(5.0)
            .sibling(front),
    );
    let front_second = m.hitbox(
        Hitbox::new(70.0, 30.0)
            .offset(50.0, -5.0)
            .rotation(-15.0)
            .knockback(5.0, 45.0, 5.0)
            .damage(5.0),
    );
    let back_second = m.hitbox(
        Hitbox::new(50.0, 30.0)
            .offset(-45.0, -35.0)
            .rotation(-25.0)
            .knockback(5.0, 135.0, 5.0)
            .damage(5.0)
            .sibling(front_second),
    );

    m.frame(0, &[])
        .frame(1, &[front, back])
        .frame(2, &[])
        .frame(3, &[])
        .frame(4, &[])
        .frame(5, &[front_second, back_second]);
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
            .damage(8.0),
    );
    let high = m.hitbox(
        Hitbox::new(50.0, 60.0)
            .offset(0.0, -15.0)
            .knockback(15.0, 95.0, 8.0)
            .damage(8.0)
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
    let poke = m.hitbox(
        Hitbox::new(40.0, 30.0)
            .offset(65.0, 15.0)
            .knockback(15.0, 45.0, 1.0)
            .damage(3.0)
            .sound(SoundCue("smack2")),
    );

    m.sound(SoundCue("swing3"))
        .frame(0, &[poke])
        .frames(4, 1, &[]);
    m.build()
}

fn dash_attack() -> Result<MoveDef, ConfigError> {
    let mut m = MoveBuilder::ground("dash_attack");
    let sweet = m.hitbox(
        Hitbox::new(60.0, 30.0)
            .offset(30.0, 20.0)
            .knockback(70.0, 80.0, 0.0)
            .damage(20.0)
            .sound(SoundCue("sword_hit")),
    );
    let sour = m.hitbox(
        Hitbox::new(60.0, 30.0)
            .offset(30.0, 20.0)
            .knockback(30.0, 45.0, 0.0)
            .damage(10.0)
            .sibling(sweet)
            .sound(SoundCue("sword_hit2")),
    );

    m.start_velocity(Some(13.0), None)
        .frame(0, &[sweet])
        .frame(0, &[sour])
        .frames(4, 0, &[]);
    m.build()
}

/// Low sweep that leaves him crouching
fn down_tilt() -> Result<MoveDef, ConfigError> {
    let mut m = MoveBuilder::ground("down_tilt");
    m.sprite("dtilt");
    let smack = SoundCue("smack");
    let sweet = m.hitbox(
        Hitbox::new(50.0, 25.0)
            .offset(65.0, 27.0)
            .knockback(10.0, 10.0, 13.0)
            .damage(10.0)
            .sound(smack),
    );
    let sour = m.hitbox(
        Hitbox::new(60.0, 30.0)
            .offset(10.0, 30.0)
            .knockback(5.0, 80.0, 8.0)
            .damage(4.0)
            .sibling(sweet)
            .sound(smack),
    );

    m.frame(0, &[])
        .frame(1, &[])
        .frame(2, &[sweet, sour])
        .frame(3, &[sweet, sour])
        .frames(2, 4, &[])
        .next_state(NextState::Crouch);
    m.build()
}

fn forward_tilt() -> Result<MoveDef, ConfigError> {
    let mut m = MoveBuilder::ground("forward_tilt");
    m.sprite("ftilt");
    let sweet = m.hitbox(
        Hitbox::new(130.0, 40.0)
            .offset(35.0, 10.0)
            .rotation(5.0)
            .knockback(8.0, 10.0, 8.0)
            .damage(10.0),
    );
    let sour = m.hitbox(
        Hitbox::new(120.0, 40.0)
            .offset(-15.0, -40.0)
            .knockback(4.0, 140.0, 3.0)
            .damage(6.0)
            .sibling(sweet),
    );

    m.frame(0, &[])
        .frame(1, &[])
        .frame(2, &[sweet])
        .frame(3, &[sour])
        .frames(2, 4, &[]);
    m.build()
}
