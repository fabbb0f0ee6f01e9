//! Monster animation-cycle state machine
//!
//! No per-entity timers: every tick compares the elapsed time of the
//! current action against the duration table and transitions only when the
//! animation has fully played out. Monsters charge attacks by completing
//! stand loops; damage to the hero is dealt at the instant of the
//! transition into the attack action, simultaneous with the animation
//! start.

use crate::action::Action;
use crate::monster::Monster;
use crate::tables::DurationTable;

/// What the caller must do after advancing one monster
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CycleOutcome {
    /// Nothing to do (animation still playing, or a quiet transition)
    None,
    /// Death animation finished: remove from the live set and count the
    /// kill
    Remove,
    /// The monster just entered its attack action: deal its damage to the
    /// hero now
    Attack,
}

/// Advance one monster by one tick.
///
/// While `frozen`, a walking monster snaps to stand immediately, completed
/// stand loops never charge an attack, and hit reactions never
/// counter-attack — but attack, hit, and death animations that are already
/// playing resolve normally.
pub fn advance_monster(
    monster: &mut Monster,
    durations: &DurationTable,
    frozen: bool,
    now_ms: f64,
) -> CycleOutcome {
    // Never leave a monster mid-walk while frozen
    if frozen && monster.action == Action::Move {
        monster.set_action(Action::Stand, now_ms);
        return CycleOutcome::None;
    }

    let duration = durations.get(&monster.species, &monster.action.key());
    if monster.elapsed_ms(now_ms) < duration {
        return CycleOutcome::None;
    }

    match monster.action {
        Action::Die => CycleOutcome::Remove,

        Action::Stand => {
            if frozen {
                // Loop the idle without accumulating attack charge
                monster.stand_cycles = 0;
                monster.restart_action(now_ms);
                return CycleOutcome::None;
            }
            monster.stand_cycles += 1;
            if monster.stand_cycles >= monster.charge_cycles {
                monster.stand_cycles = 0;
                monster.set_action(Action::Attack(1), now_ms);
                CycleOutcome::Attack
            } else {
                monster.restart_action(now_ms);
                CycleOutcome::None
            }
        }

        Action::Attack(_) => {
            // A hit absorbed mid-attack is spliced in now, resuming from
            // the original hit timestamp so only the remaining reaction
            // time plays
            if let Some(hit_ms) = monster.last_hit_ms.take() {
                let hit_duration = durations.get(&monster.species, "hit1");
                if now_ms - hit_ms < hit_duration {
                    monster.set_action(Action::Hit(1), now_ms);
                    monster.state_start_ms = hit_ms;
                    return CycleOutcome::None;
                }
            }
            if !monster.stats.is_alive() {
                monster.set_action(Action::Die, now_ms);
            } else {
                monster.stand_cycles = 0;
                monster.set_action(Action::Stand, now_ms);
            }
            CycleOutcome::None
        }

        Action::Hit(_) => {
            if !monster.stats.is_alive() {
                monster.set_action(Action::Die, now_ms);
                return CycleOutcome::None;
            }
            // Being hit counts toward the next attack
            monster.stand_cycles += 1;
            if !frozen && monster.stand_cycles >= monster.charge_cycles {
                monster.stand_cycles = 0;
                monster.set_action(Action::Attack(1), now_ms);
                CycleOutcome::Attack
            } else {
                monster.set_action(Action::Stand, now_ms);
                CycleOutcome::None
            }
        }

        Action::Move => {
            // Walking is driven by the stage machine; a move animation
            // that runs out here just settles into the idle loop
            monster.set_action(Action::Stand, now_ms);
            CycleOutcome::None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::stats::EntityStats;
    use crate::tables::{FormationSlot, SpeciesDef};
    use forge_core::MonsterId;

    fn monster(charge_cycles: u32) -> Monster {
        let def = SpeciesDef {
            stats: EntityStats::new(100, 10, 5),
            charge_cycles,
            ..Default::default()
        };
        let mut m = Monster::spawn(
            MonsterId(1),
            "goblin",
            &def,
            70.0,
            FormationSlot::new(70.0, 62.0),
            0.0,
        );
        m.set_action(Action::Stand, 0.0);
        m
    }

    fn durations() -> DurationTable {
        let mut table = DurationTable::default();
        table.set("goblin", "stand", 600.0);
        table.set("goblin", "attack1", 800.0);
        table.set("goblin", "hit1", 400.0);
        table.set("goblin", "die1", 900.0);
        table
    }

    #[test]
    fn test_no_transition_before_duration() {
        let mut m = monster(1);
        let t = durations();
        assert_eq!(advance_monster(&mut m, &t, false, 599.0), CycleOutcome::None);
        assert_eq!(m.action, Action::Stand);
        assert_eq!(m.stand_cycles, 0);
    }

    #[test]
    fn test_charge_cycles_before_attack() {
        // charge_cycles = 3: exactly three completed stand loops, then the
        // third completion triggers the attack
        let mut m = monster(3);
        let t = durations();

        assert_eq!(advance_monster(&mut m, &t, false, 600.0), CycleOutcome::None);
        assert_eq!(m.stand_cycles, 1);
        assert_eq!(advance_monster(&mut m, &t, false, 1200.0), CycleOutcome::None);
        assert_eq!(m.stand_cycles, 2);
        assert_eq!(advance_monster(&mut m, &t, false, 1800.0), CycleOutcome::Attack);
        assert_eq!(m.action, Action::Attack(1));
        assert_eq!(m.stand_cycles, 0);
    }

    #[test]
    fn test_attack_returns_to_stand() {
        let mut m = monster(1);
        let t = durations();
        advance_monster(&mut m, &t, false, 600.0); // -> attack1 at 600
        assert_eq!(advance_monster(&mut m, &t, false, 1400.0), CycleOutcome::None);
        assert_eq!(m.action, Action::Stand);
        assert_eq!(m.stand_cycles, 0);
    }

    #[test]
    fn test_hit_splice_resumes_remaining_time() {
        let mut m = monster(5);
        let t = durations();
        m.set_action(Action::Attack(1), 0.0);
        // Hit landed 300ms into the attack; hit1 lasts 400ms
        m.last_hit_ms = Some(300.0);

        assert_eq!(advance_monster(&mut m, &t, false, 800.0), CycleOutcome::None);
        // Spliced within the hit window? 800 - 300 = 500 >= 400: no.
        assert_eq!(m.action, Action::Stand);

        // Hit landed 700ms into the attack: 800 - 700 = 100 < 400, splice
        let mut m = monster(5);
        m.set_action(Action::Attack(1), 0.0);
        m.last_hit_ms = Some(700.0);
        assert_eq!(advance_monster(&mut m, &t, false, 800.0), CycleOutcome::None);
        assert_eq!(m.action, Action::Hit(1));
        // Resumes from the original hit timestamp, not a fresh duration
        assert_eq!(m.state_start_ms, 700.0);
        assert!(m.last_hit_ms.is_none());
        // The remaining 300ms of the reaction finishes at 1100
        assert_eq!(advance_monster(&mut m, &t, false, 1099.0), CycleOutcome::None);
        assert_eq!(m.action, Action::Hit(1));
        advance_monster(&mut m, &t, false, 1100.0);
        assert_eq!(m.action, Action::Stand);
    }

    #[test]
    fn test_hit_complete_counter_attacks() {
        let mut m = monster(2);
        m.stand_cycles = 1;
        m.set_action(Action::Hit(1), 0.0);
        let t = durations();
        // Hit completion increments the charge to 2 and fires immediately
        assert_eq!(advance_monster(&mut m, &t, false, 400.0), CycleOutcome::Attack);
        assert_eq!(m.action, Action::Attack(1));
    }

    #[test]
    fn test_hit_complete_keeps_charge_progress() {
        let mut m = monster(3);
        m.stand_cycles = 0;
        m.set_action(Action::Hit(1), 0.0);
        let t = durations();
        assert_eq!(advance_monster(&mut m, &t, false, 400.0), CycleOutcome::None);
        assert_eq!(m.action, Action::Stand);
        assert_eq!(m.stand_cycles, 1);
    }

    #[test]
    fn test_death_at_zero_hp_after_attack_or_hit() {
        let t = durations();

        let mut m = monster(1);
        m.set_action(Action::Attack(1), 0.0);
        m.stats.apply_damage(m.stats.hp);
        advance_monster(&mut m, &t, false, 800.0);
        assert_eq!(m.action, Action::Die);

        let mut m = monster(1);
        m.set_action(Action::Hit(1), 0.0);
        m.stats.apply_damage(m.stats.hp);
        advance_monster(&mut m, &t, false, 400.0);
        assert_eq!(m.action, Action::Die);
    }

    #[test]
    fn test_die_completion_requests_removal() {
        let mut m = monster(1);
        m.force_die(0.0);
        let t = durations();
        assert_eq!(advance_monster(&mut m, &t, false, 899.0), CycleOutcome::None);
        assert_eq!(advance_monster(&mut m, &t, false, 900.0), CycleOutcome::Remove);
    }

    #[test]
    fn test_frozen_snaps_move_to_stand() {
        let def = SpeciesDef::default();
        let mut m = Monster::spawn(
            MonsterId(2),
            "goblin",
            &def,
            110.0,
            FormationSlot::new(70.0, 62.0),
            0.0,
        );
        assert_eq!(m.action, Action::Move);
        let t = durations();
        advance_monster(&mut m, &t, true, 1.0);
        assert_eq!(m.action, Action::Stand);
    }

    #[test]
    fn test_frozen_stand_never_charges() {
        let mut m = monster(1);
        let t = durations();
        // Many completed loops while frozen: never an attack
        for i in 1..=10 {
            let outcome = advance_monster(&mut m, &t, true, 600.0 * i as f64);
            assert_eq!(outcome, CycleOutcome::None);
            assert_eq!(m.action, Action::Stand);
            assert_eq!(m.stand_cycles, 0);
        }
        // Unfrozen, the very next completed loop attacks (charge is 1)
        assert_eq!(advance_monster(&mut m, &t, false, 6600.0), CycleOutcome::Attack);
    }

    #[test]
    fn test_frozen_lets_death_finish() {
        let mut m = monster(1);
        m.force_die(0.0);
        let t = durations();
        assert_eq!(advance_monster(&mut m, &t, true, 900.0), CycleOutcome::Remove);
    }

    #[test]
    fn test_frozen_hit_does_not_counter_attack() {
        let mut m = monster(1);
        m.set_action(Action::Hit(1), 0.0);
        let t = durations();
        assert_eq!(advance_monster(&mut m, &t, true, 400.0), CycleOutcome::None);
        assert_eq!(m.action, Action::Stand);
        assert_eq!(m.stand_cycles, 1);
    }
}
