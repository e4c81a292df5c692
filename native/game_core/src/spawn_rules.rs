//! Path: native/game_core/src/spawn_rules.rs
//! Summary: 敵出現スケジュール（ウェーブ・時間帯で有効になる連続ルールと一度きりの大群）
//!
//! ここでは「何体・どの種類を出すか」だけを決め、実体の生成は game_sim 側で行う。
//! 同時出現上限（cap）を超える注文は出さない。

use crate::enemy::EnemyKind;

/// 連続出現ルール
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SpawnRule {
    pub kind:     EnemyKind,
    pub min_wave: u32,
    /// 有効な経過時間 [start, end)
    pub start:    f32,
    pub end:      f32,
    /// 出現間隔（秒）
    pub every:    f32,
    /// 1 回あたりの出現数
    pub count:    usize,
}

impl SpawnRule {
    pub fn is_active(&self, elapsed: f32, wave: u32) -> bool {
        wave >= self.min_wave && elapsed >= self.start && elapsed < self.end
    }
}

/// 一度だけ発生する大群
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct TimedHorde {
    pub at_time:  f32,
    pub kind:     EnemyKind,
    pub count:    usize,
    pub min_wave: u32,
    pub fired:    bool,
}

/// スケジュールから出る出現注文
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum SpawnOrder {
    /// プレイヤー周囲にばらけて出現
    Batch { kind: EnemyKind, count: usize },
    /// 一方向にまとまって出現
    Horde { kind: EnemyKind, count: usize },
}

impl SpawnOrder {
    pub fn count(&self) -> usize {
        match self {
            Self::Batch { count, .. } | Self::Horde { count, .. } => *count,
        }
    }
}

pub fn default_rules() -> Vec<SpawnRule> {
    vec![
        SpawnRule { kind: EnemyKind::Grunt,    min_wave: 1, start: 0.0,   end: f32::INFINITY, every: 1.0, count: 3 },
        SpawnRule { kind: EnemyKind::Runner,   min_wave: 2, start: 30.0,  end: f32::INFINITY, every: 2.0, count: 2 },
        SpawnRule { kind: EnemyKind::Exploder, min_wave: 3, start: 60.0,  end: f32::INFINITY, every: 4.0, count: 2 },
        SpawnRule { kind: EnemyKind::Shooter,  min_wave: 4, start: 90.0,  end: f32::INFINITY, every: 5.0, count: 1 },
        // 中盤の押し寄せ
        SpawnRule { kind: EnemyKind::Grunt,    min_wave: 6, start: 150.0, end: 300.0,         every: 0.5, count: 4 },
    ]
}

pub fn default_hordes() -> Vec<TimedHorde> {
    vec![
        TimedHorde { at_time: 45.0,  kind: EnemyKind::Runner,   count: 15, min_wave: 2, fired: false },
        TimedHorde { at_time: 120.0, kind: EnemyKind::Exploder, count: 10, min_wave: 4, fired: false },
        TimedHorde { at_time: 200.0, kind: EnemyKind::Grunt,    count: 40, min_wave: 6, fired: false },
        TimedHorde { at_time: 270.0, kind: EnemyKind::Shooter,  count: 12, min_wave: 8, fired: false },
    ]
}

/// ルールごとの蓄積タイマーと大群の発火状態
#[derive(Clone, Debug)]
pub struct SpawnSchedule {
    rules:        Vec<SpawnRule>,
    accumulators: Vec<f32>,
    hordes:       Vec<TimedHorde>,
}

impl Default for SpawnSchedule {
    fn default() -> Self {
        Self::new(default_rules(), default_hordes())
    }
}

impl SpawnSchedule {
    pub fn new(rules: Vec<SpawnRule>, hordes: Vec<TimedHorde>) -> Self {
        let accumulators = vec![0.0; rules.len()];
        Self { rules, accumulators, hordes }
    }

    pub fn rules(&self) -> &[SpawnRule] {
        &self.rules
    }

    pub fn hordes(&self) -> &[TimedHorde] {
        &self.hordes
    }

    /// 1 フレーム分進め、出現注文を `out` に積む。
    ///
    /// `live` は現在の敵数、`cap` は同時出現上限。注文の合計は `cap - live` を超えない。
    pub fn tick(
        &mut self,
        dt: f32,
        elapsed: f32,
        wave: u32,
        live: usize,
        cap: usize,
        out: &mut Vec<SpawnOrder>,
    ) {
        let mut budget = cap.saturating_sub(live);

        for (rule, acc) in self.rules.iter().zip(self.accumulators.iter_mut()) {
            if !rule.is_active(elapsed, wave) || rule.every <= 0.0 {
                *acc = 0.0;
                continue;
            }
            *acc += dt;
            while *acc >= rule.every {
                if budget == 0 {
                    // 上限で止まっている間に溜め込まない
                    *acc = acc.min(rule.every);
                    break;
                }
                let n = rule.count.min(budget);
                out.push(SpawnOrder::Batch { kind: rule.kind, count: n });
                budget -= n;
                *acc -= rule.every;
            }
        }

        for horde in self.hordes.iter_mut() {
            if horde.fired || elapsed < horde.at_time || wave < horde.min_wave {
                continue;
            }
            if budget == 0 {
                break;
            }
            horde.fired = true;
            let n = horde.count.min(budget);
            out.push(SpawnOrder::Horde { kind: horde.kind, count: n });
            budget -= n;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn total(orders: &[SpawnOrder]) -> usize {
        orders.iter().map(|o| o.count()).sum()
    }

    #[test]
    fn rule_fires_once_per_interval() {
        let rules = vec![SpawnRule { kind: EnemyKind::Grunt, min_wave: 1, start: 0.0, end: 100.0, every: 1.0, count: 3 }];
        let mut s = SpawnSchedule::new(rules, Vec::new());
        let mut out = Vec::new();
        s.tick(0.5, 0.5, 1, 0, 100, &mut out);
        assert!(out.is_empty());
        s.tick(0.5, 1.0, 1, 0, 100, &mut out);
        assert_eq!(out, vec![SpawnOrder::Batch { kind: EnemyKind::Grunt, count: 3 }]);
    }

    #[test]
    fn coarse_frame_catches_up() {
        let rules = vec![SpawnRule { kind: EnemyKind::Runner, min_wave: 1, start: 0.0, end: 100.0, every: 0.5, count: 1 }];
        let mut s = SpawnSchedule::new(rules, Vec::new());
        let mut out = Vec::new();
        s.tick(1.6, 1.6, 1, 0, 100, &mut out);
        assert_eq!(out.len(), 3);
    }

    #[test]
    fn inactive_rules_do_not_fire() {
        let rules = vec![SpawnRule { kind: EnemyKind::Shooter, min_wave: 4, start: 10.0, end: 20.0, every: 1.0, count: 1 }];
        let mut s = SpawnSchedule::new(rules, Vec::new());
        let mut out = Vec::new();
        // ウェーブ不足
        s.tick(5.0, 15.0, 3, 0, 100, &mut out);
        // 時間帯外
        s.tick(5.0, 25.0, 4, 0, 100, &mut out);
        assert!(out.is_empty());
    }

    #[test]
    fn never_exceeds_population_cap() {
        let mut s = SpawnSchedule::default();
        let mut out = Vec::new();
        // すべてのルールと大群が同時に有効になる状況
        s.tick(5.0, 210.0, 7, 318, 320, &mut out);
        assert!(total(&out) <= 2);

        out.clear();
        s.tick(5.0, 215.0, 7, 320, 320, &mut out);
        assert!(out.is_empty());
    }

    #[test]
    fn cap_blocked_accumulator_does_not_burst() {
        let rules = vec![SpawnRule { kind: EnemyKind::Grunt, min_wave: 1, start: 0.0, end: 1000.0, every: 1.0, count: 1 }];
        let mut s = SpawnSchedule::new(rules, Vec::new());
        let mut out = Vec::new();
        s.tick(10.0, 10.0, 1, 50, 50, &mut out);
        assert!(out.is_empty());
        s.tick(0.016, 10.016, 1, 0, 50, &mut out);
        assert_eq!(total(&out), 1);
    }

    #[test]
    fn horde_fires_once() {
        let hordes = vec![TimedHorde { at_time: 45.0, kind: EnemyKind::Runner, count: 15, min_wave: 2, fired: false }];
        let mut s = SpawnSchedule::new(Vec::new(), hordes);
        let mut out = Vec::new();
        s.tick(0.016, 44.0, 2, 0, 500, &mut out);
        assert!(out.is_empty());
        s.tick(0.016, 45.0, 2, 0, 500, &mut out);
        s.tick(0.016, 46.0, 2, 0, 500, &mut out);
        assert_eq!(out, vec![SpawnOrder::Horde { kind: EnemyKind::Runner, count: 15 }]);
        assert!(s.hordes()[0].fired);
    }

    #[test]
    fn horde_waits_for_wave() {
        let hordes = vec![TimedHorde { at_time: 10.0, kind: EnemyKind::Grunt, count: 5, min_wave: 3, fired: false }];
        let mut s = SpawnSchedule::new(Vec::new(), hordes);
        let mut out = Vec::new();
        s.tick(0.016, 20.0, 2, 0, 500, &mut out);
        assert!(out.is_empty());
        s.tick(0.016, 61.0, 3, 0, 500, &mut out);
        assert_eq!(total(&out), 5);
    }
}
