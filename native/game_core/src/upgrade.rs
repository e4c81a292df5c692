//! Path: native/game_core/src/upgrade.rs
//! Summary: レベルアップ時の強化カタログ（レア度・効果・重み付き抽選）

use crate::physics::rng::SimpleRng;
use crate::player::PlayerStats;

#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum Rarity {
    Common,
    Rare,
    Legendary,
}

impl Rarity {
    /// 抽選: 15% Legendary, 35% Rare, 50% Common
    pub fn roll(rng: &mut SimpleRng) -> Self {
        let r = rng.next_f32();
        if r < 0.15 {
            Self::Legendary
        } else if r < 0.5 {
            Self::Rare
        } else {
            Self::Common
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Self::Common    => "",
            Self::Rare      => "[RARE] ",
            Self::Legendary => "[LEGENDARY] ",
        }
    }
}

#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug)]
pub enum Upgrade {
    // Common
    MaxHealth,
    Damage,
    AttackSpeed,
    MoveSpeed,
    MoreProjectiles,
    HealthRegen,
    // Rare
    CriticalStrike,
    PiercingShots,
    Lifesteal,
    MegaDamage,
    SpeedDemon,
    RapidFire,
    Shotgun,
    Spiral,
    Orbital,
    ReverseShot,
    Dash,
    ExplosiveRounds,
    // Legendary
    DeathRay,
    Omnipotence,
    VampiricAura,
    BulletStorm,
    Wisdom,
    GodMode,
    Homing,
    DoubleOrbital,
    Chaos,
}

impl Upgrade {
    pub const ALL: [Upgrade; 27] = [
        Self::MaxHealth, Self::Damage, Self::AttackSpeed, Self::MoveSpeed,
        Self::MoreProjectiles, Self::HealthRegen,
        Self::CriticalStrike, Self::PiercingShots, Self::Lifesteal, Self::MegaDamage,
        Self::SpeedDemon, Self::RapidFire, Self::Shotgun, Self::Spiral, Self::Orbital,
        Self::ReverseShot, Self::Dash, Self::ExplosiveRounds,
        Self::DeathRay, Self::Omnipotence, Self::VampiricAura, Self::BulletStorm,
        Self::Wisdom, Self::GodMode, Self::Homing, Self::DoubleOrbital, Self::Chaos,
    ];

    pub fn rarity(&self) -> Rarity {
        match self {
            Self::MaxHealth | Self::Damage | Self::AttackSpeed | Self::MoveSpeed
            | Self::MoreProjectiles | Self::HealthRegen => Rarity::Common,
            Self::CriticalStrike | Self::PiercingShots | Self::Lifesteal | Self::MegaDamage
            | Self::SpeedDemon | Self::RapidFire | Self::Shotgun | Self::Spiral
            | Self::Orbital | Self::ReverseShot | Self::Dash
            | Self::ExplosiveRounds => Rarity::Rare,
            _ => Rarity::Legendary,
        }
    }

    pub fn title(&self) -> &'static str {
        match self {
            Self::MaxHealth       => "MAX HEALTH +20",
            Self::Damage          => "DAMAGE +15%",
            Self::AttackSpeed     => "ATTACK SPEED +20%",
            Self::MoveSpeed       => "MOVEMENT SPEED +20%",
            Self::MoreProjectiles => "MORE PROJECTILES",
            Self::HealthRegen     => "HEALTH REGEN",
            Self::CriticalStrike  => "CRITICAL STRIKE",
            Self::PiercingShots   => "PIERCING SHOTS",
            Self::Lifesteal       => "LIFESTEAL",
            Self::MegaDamage      => "MEGA DAMAGE",
            Self::SpeedDemon      => "SPEED DEMON",
            Self::RapidFire       => "RAPID FIRE",
            Self::Shotgun         => "SHOTGUN MODE",
            Self::Spiral          => "SPIRAL ATTACK",
            Self::Orbital         => "ORBITAL WEAPONS",
            Self::ReverseShot     => "REVERSE SHOT",
            Self::Dash            => "DASH",
            Self::ExplosiveRounds => "EXPLOSIVE ROUNDS",
            Self::DeathRay        => "DEATH RAY",
            Self::Omnipotence     => "OMNIPOTENCE",
            Self::VampiricAura    => "VAMPIRIC AURA",
            Self::BulletStorm     => "BULLET STORM",
            Self::Wisdom          => "WISDOM",
            Self::GodMode         => "GOD MODE",
            Self::Homing          => "HOMING MISSILES",
            Self::DoubleOrbital   => "DOUBLE ORBITAL RING",
            Self::Chaos           => "CHAOS MODE",
        }
    }

    pub fn description(&self) -> &'static str {
        match self {
            Self::MaxHealth       => "Increase maximum health by 20",
            Self::Damage          => "Increase weapon damage by 15%",
            Self::AttackSpeed     => "Increase attack speed by 20%",
            Self::MoveSpeed       => "Move faster",
            Self::MoreProjectiles => "Fire 2 additional projectiles",
            Self::HealthRegen     => "Regenerate 5 HP per second",
            Self::CriticalStrike  => "15% chance to deal 3x damage",
            Self::PiercingShots   => "Projectiles pierce through 3 enemies",
            Self::Lifesteal       => "Heal 10% of damage dealt",
            Self::MegaDamage      => "Increase damage by 50%",
            Self::SpeedDemon      => "Increase movement speed by 50%",
            Self::RapidFire       => "Double attack speed",
            Self::Shotgun         => "Wide spread attack pattern",
            Self::Spiral          => "Rotating spiral pattern",
            Self::Orbital         => "Projectiles orbit around you",
            Self::ReverseShot     => "Also shoot backwards",
            Self::Dash            => "Press SPACE to dash (2s cooldown)",
            Self::ExplosiveRounds => "Shots explode and can chain",
            Self::DeathRay        => "Triple damage + infinite pierce",
            Self::Omnipotence     => "50% crit chance + 5x crit damage",
            Self::VampiricAura    => "50% lifesteal + 50 HP regen/sec",
            Self::BulletStorm     => "+10 projectiles + 2x attack speed",
            Self::Wisdom          => "Gain 2x experience from kills",
            Self::GodMode         => "+200 HP + 100% damage + 50% speed",
            Self::Homing          => "Projectiles track enemies",
            Self::DoubleOrbital   => "2x orbital weapons + 4 more",
            Self::Chaos           => "Shotgun + Spiral + Reverse",
        }
    }

    /// 一度きりの解放系は取得済みなら候補から外す
    pub fn is_available(&self, p: &PlayerStats) -> bool {
        match self {
            Self::HealthRegen => !p.regen,
            Self::Lifesteal   => !p.lifesteal,
            Self::Shotgun     => !p.shotgun,
            Self::Spiral      => !p.spiral,
            Self::Orbital     => !p.orbital,
            Self::ReverseShot => !p.reverse,
            Self::Dash        => !p.dash,
            Self::ExplosiveRounds => !p.explosive,
            Self::PiercingShots   => p.pierce < 3,
            Self::Chaos       => !(p.shotgun && p.spiral && p.reverse),
            _ => true,
        }
    }

    pub fn apply(&self, p: &mut PlayerStats) {
        match self {
            Self::MaxHealth => {
                p.max_health += 20.0;
                p.health += 20.0;
            }
            Self::Damage          => p.damage_mult += 0.15,
            Self::AttackSpeed     => p.attack_speed_mult += 0.2,
            Self::MoveSpeed       => p.move_speed *= 1.2,
            Self::MoreProjectiles => p.projectile_count += 2,
            Self::HealthRegen     => p.regen = true,
            Self::CriticalStrike => {
                p.crit_chance = (p.crit_chance + 0.15).min(1.0);
                p.crit_mult += 1.0;
            }
            Self::PiercingShots   => p.pierce = p.pierce.max(3),
            Self::Lifesteal       => p.lifesteal = true,
            Self::MegaDamage      => p.damage_mult += 0.5,
            Self::SpeedDemon      => p.move_speed *= 1.5,
            Self::RapidFire       => p.attack_speed_mult += 1.0,
            Self::Shotgun         => p.shotgun = true,
            Self::Spiral          => p.spiral = true,
            Self::Orbital         => p.orbital = true,
            Self::ReverseShot     => p.reverse = true,
            Self::Dash            => p.dash = true,
            Self::ExplosiveRounds => p.explosive = true,
            Self::DeathRay => {
                p.damage_mult += 3.0;
                p.pierce = 999;
            }
            Self::Omnipotence => {
                p.crit_chance = (p.crit_chance + 0.5).min(1.0);
                p.crit_mult += 3.0;
            }
            Self::VampiricAura => {
                p.lifesteal = true;
                p.lifesteal_pct += 0.4;
                p.regen = true;
                p.regen_rate += 45.0;
            }
            Self::BulletStorm => {
                p.projectile_count += 10;
                p.attack_speed_mult += 2.0;
            }
            Self::Wisdom => p.exp_mult *= 2.0,
            Self::GodMode => {
                p.max_health += 200.0;
                p.health += 200.0;
                p.damage_mult += 1.0;
                p.move_speed *= 1.5;
            }
            Self::Homing => {
                p.homing = true;
                p.damage_mult += 0.5;
            }
            Self::DoubleOrbital => {
                p.orbital = true;
                p.orbital_count += 4;
                p.damage_mult += 0.3;
            }
            Self::Chaos => {
                p.shotgun = true;
                p.spiral = true;
                p.reverse = true;
                p.projectile_count += 5;
            }
        }
    }
}

/// 重み付きで `count` 個の重複しない強化を選ぶ。
///
/// 抽選したレア度に候補がなければ Common → Rare → Legendary の順で埋める。
/// 候補が尽きたらその時点で打ち切る。
pub fn generate_offers(rng: &mut SimpleRng, stats: &PlayerStats, count: usize) -> Vec<Upgrade> {
    let mut pools: [Vec<Upgrade>; 3] = [Vec::new(), Vec::new(), Vec::new()];
    for u in Upgrade::ALL.iter().filter(|u| u.is_available(stats)) {
        let slot = match u.rarity() {
            Rarity::Common    => 0,
            Rarity::Rare      => 1,
            Rarity::Legendary => 2,
        };
        pools[slot].push(*u);
    }

    let mut offers = Vec::with_capacity(count);
    while offers.len() < count {
        let preferred = match Rarity::roll(rng) {
            Rarity::Legendary => 2,
            Rarity::Rare      => 1,
            Rarity::Common    => 0,
        };
        let slot = if !pools[preferred].is_empty() {
            preferred
        } else if let Some(s) = (0..3).find(|&s| !pools[s].is_empty()) {
            s
        } else {
            break;
        };
        let idx = rng.below(pools[slot].len());
        offers.push(pools[slot].swap_remove(idx));
    }
    offers
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn offers_are_unique_and_sized() {
        let stats = PlayerStats::default();
        let mut rng = SimpleRng::new(11);
        for _ in 0..50 {
            let offers = generate_offers(&mut rng, &stats, 3);
            assert_eq!(offers.len(), 3);
            for (i, a) in offers.iter().enumerate() {
                for b in offers.iter().skip(i + 1) {
                    assert_ne!(a, b);
                }
            }
        }
    }

    #[test]
    fn offers_stop_when_catalog_exhausted() {
        let stats = PlayerStats::default();
        let mut rng = SimpleRng::new(5);
        let offers = generate_offers(&mut rng, &stats, 100);
        assert_eq!(offers.len(), Upgrade::ALL.len());
    }

    #[test]
    fn owned_unlocks_are_not_offered() {
        let mut stats = PlayerStats::default();
        stats.shotgun = true;
        stats.dash = true;
        let mut rng = SimpleRng::new(8);
        let offers = generate_offers(&mut rng, &stats, 100);
        assert!(!offers.contains(&Upgrade::Shotgun));
        assert!(!offers.contains(&Upgrade::Dash));
    }

    #[test]
    fn max_health_heals_too() {
        let mut p = PlayerStats::default();
        p.health = 50.0;
        Upgrade::MaxHealth.apply(&mut p);
        assert!((p.max_health - 120.0).abs() < 0.001);
        assert!((p.health - 70.0).abs() < 0.001);
    }

    #[test]
    fn death_ray_sets_huge_pierce() {
        let mut p = PlayerStats::default();
        Upgrade::DeathRay.apply(&mut p);
        assert_eq!(p.pierce, 999);
        assert!((p.damage_mult - 4.0).abs() < 0.001);
        assert!(!Upgrade::PiercingShots.is_available(&p));
    }

    #[test]
    fn crit_chance_is_capped() {
        let mut p = PlayerStats::default();
        Upgrade::Omnipotence.apply(&mut p);
        Upgrade::Omnipotence.apply(&mut p);
        Upgrade::Omnipotence.apply(&mut p);
        assert!(p.crit_chance <= 1.0);
    }

    #[test]
    fn rarity_roll_follows_weights() {
        let mut rng = SimpleRng::new(123);
        let mut counts = [0usize; 3];
        for _ in 0..10_000 {
            match Rarity::roll(&mut rng) {
                Rarity::Common    => counts[0] += 1,
                Rarity::Rare      => counts[1] += 1,
                Rarity::Legendary => counts[2] += 1,
            }
        }
        assert!(counts[0] > 4_500 && counts[0] < 5_500, "{:?}", counts);
        assert!(counts[1] > 3_000 && counts[1] < 4_000, "{:?}", counts);
        assert!(counts[2] > 1_000 && counts[2] < 2_000, "{:?}", counts);
    }

    #[test]
    fn rarity_table_counts() {
        let count = |r: Rarity| Upgrade::ALL.iter().filter(|u| u.rarity() == r).count();
        assert_eq!(count(Rarity::Common), 6);
        assert_eq!(count(Rarity::Rare), 12);
        assert_eq!(count(Rarity::Legendary), 9);
    }
}
