//! Fixed timestep simulation tick
//!
//! One tick runs spawn, move, catch resolution and the chaos roll in that
//! order. Nothing runs once the game is over.

use rand::Rng;

use super::collision::{catch_point, is_offscreen, item_catch_check};
use super::state::{CatchEffect, GameState, ItemKind};
use crate::tuning::Tuning;

/// Inputs for a single tick
#[derive(Debug, Clone, Copy, Default)]
pub struct TickInput {
    /// Wall-clock time of this tick (ms); chaos deadlines are measured on it
    pub now_ms: f64,
}

/// What happened during one tick
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TickOutcome {
    /// Whether the tick ran at all (false once the game is over)
    pub ran: bool,
    pub spawned: Option<ItemKind>,
    pub eggs_caught: u32,
    pub rotten_caught: u32,
    pub culled: u32,
    pub chaos_started: bool,
    /// Game ended during this tick
    pub game_over: bool,
}

/// Advance the game state by one fixed timestep
pub fn tick(state: &mut GameState, tuning: &Tuning, input: &TickInput) -> TickOutcome {
    let mut outcome = TickOutcome::default();
    if state.is_game_over() {
        return outcome;
    }
    outcome.ran = true;
    state.time_ticks += 1;

    outcome.spawned = spawn(state, tuning);
    move_items(state, tuning);
    resolve_catches(state, tuning, &mut outcome);

    if state.is_game_over() {
        outcome.game_over = true;
        return outcome;
    }

    if tuning.cull_offscreen {
        outcome.culled = cull_offscreen(state, tuning);
    }

    outcome.chaos_started = roll_chaos(state, tuning, input.now_ms);
    outcome
}

/// Roll for a new item at the top of the field
fn spawn(state: &mut GameState, tuning: &Tuning) -> Option<ItemKind> {
    let chance = (tuning.base_spawn_probability * state.speed_multiplier()).clamp(0.0, 1.0);
    let span = tuning.spawn_span();
    let rotten_fraction = tuning.rotten_fraction;

    let rng = state.rng_mut();
    if rng.random::<f32>() >= chance {
        return None;
    }
    let x = rng.random::<f32>() * span;
    let kind = if rng.random::<f32>() < rotten_fraction {
        ItemKind::RottenEgg
    } else {
        ItemKind::Egg
    };

    let id = state.spawn_item(x, 0.0, kind);
    log::debug!("Spawned {:?} #{} at x={:.1}", kind, id, x);
    Some(kind)
}

/// Drop every item by the current fall speed
fn move_items(state: &mut GameState, tuning: &Tuning) {
    let dy = tuning.base_fall_speed * state.speed_multiplier();
    for item in &mut state.items {
        item.pos.y += dy;
    }
}

/// Remove caught items and apply their effects, one item at a time.
///
/// Once a catch ends the game the rest of the pass is skipped; those items
/// stay where they are.
fn resolve_catches(state: &mut GameState, tuning: &Tuning, outcome: &mut TickOutcome) {
    let target = catch_point(state.catcher.x, tuning);
    let mut items = std::mem::take(&mut state.items).into_iter();
    let mut remaining = Vec::with_capacity(items.len());

    while let Some(item) = items.next() {
        let check = item_catch_check(item.center(tuning.item_size), target, tuning.catch_radius);
        if !check.caught {
            remaining.push(item);
            continue;
        }

        match state.apply_catch(item.kind, tuning) {
            CatchEffect::Scored { score } => {
                outcome.eggs_caught += 1;
                log::debug!("Caught egg #{} (score {})", item.id, score);
            }
            CatchEffect::LifeLost { lives } => {
                outcome.rotten_caught += 1;
                log::debug!("Caught rotten egg #{} ({} lives left)", item.id, lives);
            }
            CatchEffect::FinalLifeLost => {
                outcome.rotten_caught += 1;
                remaining.extend(items.by_ref());
                break;
            }
        }
    }

    state.items = remaining;
}

fn cull_offscreen(state: &mut GameState, tuning: &Tuning) -> u32 {
    let before = state.items.len();
    state.items.retain(|item| !is_offscreen(item.pos.y, tuning));
    (before - state.items.len()) as u32
}

/// Chance to enter chaos mode; only rolled while chaos is off
fn roll_chaos(state: &mut GameState, tuning: &Tuning, now_ms: f64) -> bool {
    if state.chaos.is_active() {
        return false;
    }
    if state.rng_mut().random::<f32>() >= tuning.chaos_probability {
        return false;
    }
    state.trigger_chaos(now_ms, tuning).is_some()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::state::GamePhase;

    /// Tuning with all randomness switched off
    fn quiet() -> Tuning {
        Tuning {
            base_spawn_probability: 0.0,
            chaos_probability: 0.0,
            ..Tuning::default()
        }
    }

    /// Put an item so its centre sits exactly on the catch point after one move
    fn place_on_catcher(state: &mut GameState, tuning: &Tuning, kind: ItemKind) {
        let x = state.catcher.x + tuning.catcher_size / 2.0 - tuning.item_size / 2.0;
        let y = tuning.catch_line_y() - tuning.item_size / 2.0 - tuning.base_fall_speed;
        state.spawn_item(x, y, kind);
    }

    #[test]
    fn test_item_falls_two_units_per_tick() {
        let tuning = quiet();
        let mut state = GameState::new(1, &tuning);
        state.catcher.x = -1000.0;
        state.spawn_item(100.0, 0.0, ItemKind::Egg);

        for _ in 0..100 {
            tick(&mut state, &tuning, &TickInput::default());
        }
        assert_eq!(state.items.len(), 1);
        assert_eq!(state.items[0].pos.x, 100.0);
        assert_eq!(state.items[0].pos.y, 200.0);
    }

    #[test]
    fn test_egg_catch_scores_ten() {
        let tuning = quiet();
        let mut state = GameState::new(1, &tuning);
        place_on_catcher(&mut state, &tuning, ItemKind::Egg);

        let outcome = tick(&mut state, &tuning, &TickInput::default());
        assert_eq!(outcome.eggs_caught, 1);
        assert_eq!(state.score, 10);
        assert_eq!(state.lives, 3);
        assert!(state.items.is_empty());
        assert!(!state.is_game_over());
    }

    #[test]
    fn test_collision_uses_post_move_position() {
        let tuning = quiet();
        let mut state = GameState::new(1, &tuning);
        // Centre starts 31 units above the catch point: out of range before
        // the move, 29 after it
        let x = state.catcher.x + tuning.catcher_size / 2.0 - tuning.item_size / 2.0;
        let y = tuning.catch_line_y() - tuning.item_size / 2.0 - 31.0;
        state.spawn_item(x, y, ItemKind::Egg);

        tick(&mut state, &tuning, &TickInput::default());
        assert_eq!(state.score, 10);
    }

    #[test]
    fn test_rotten_on_last_life_ends_game() {
        let tuning = quiet();
        let mut state = GameState::new(1, &tuning);
        state.lives = 1;
        place_on_catcher(&mut state, &tuning, ItemKind::RottenEgg);

        let outcome = tick(&mut state, &tuning, &TickInput::default());
        assert!(outcome.game_over);
        assert_eq!(state.lives, 0);
        assert_eq!(state.phase, GamePhase::GameOver);
    }

    #[test]
    fn test_two_rotten_in_one_pass_from_two_lives() {
        let tuning = quiet();
        let mut state = GameState::new(1, &tuning);
        state.lives = 2;
        place_on_catcher(&mut state, &tuning, ItemKind::RottenEgg);
        place_on_catcher(&mut state, &tuning, ItemKind::RottenEgg);

        tick(&mut state, &tuning, &TickInput::default());
        assert_eq!(state.lives, 0);
        assert!(state.is_game_over());
    }

    #[test]
    fn test_items_after_final_catch_are_left_alone() {
        let tuning = quiet();
        let mut state = GameState::new(1, &tuning);
        state.lives = 1;
        place_on_catcher(&mut state, &tuning, ItemKind::RottenEgg);
        place_on_catcher(&mut state, &tuning, ItemKind::Egg);
        place_on_catcher(&mut state, &tuning, ItemKind::RottenEgg);

        let outcome = tick(&mut state, &tuning, &TickInput::default());
        assert_eq!(outcome.rotten_caught, 1);
        assert_eq!(outcome.eggs_caught, 0);
        assert_eq!(state.score, 0);
        assert_eq!(state.lives, 0);
        assert_eq!(state.items.len(), 2);
    }

    #[test]
    fn test_nothing_moves_after_game_over() {
        let tuning = Tuning {
            base_spawn_probability: 1.0,
            chaos_probability: 1.0,
            ..Tuning::default()
        };
        let mut state = GameState::new(1, &tuning);
        state.phase = GamePhase::GameOver;
        state.spawn_item(50.0, 100.0, ItemKind::Egg);
        let items = state.items.clone();

        for _ in 0..50 {
            let outcome = tick(&mut state, &tuning, &TickInput::default());
            assert!(!outcome.ran);
        }
        assert_eq!(state.items, items);
        assert_eq!(state.time_ticks, 0);
        assert!(!state.chaos.is_active());
    }

    #[test]
    fn test_offscreen_items_are_culled() {
        let tuning = quiet();
        let mut state = GameState::new(1, &tuning);
        state.catcher.x = -1000.0;
        state.spawn_item(10.0, 479.0, ItemKind::Egg);
        state.spawn_item(10.0, 100.0, ItemKind::Egg);

        let outcome = tick(&mut state, &tuning, &TickInput::default());
        assert_eq!(outcome.culled, 1);
        assert_eq!(state.items.len(), 1);
        assert_eq!(state.items[0].pos.y, 102.0);
    }

    #[test]
    fn test_culling_can_be_disabled() {
        let tuning = Tuning {
            cull_offscreen: false,
            ..quiet()
        };
        let mut state = GameState::new(1, &tuning);
        state.catcher.x = -1000.0;
        state.spawn_item(10.0, 479.0, ItemKind::Egg);

        tick(&mut state, &tuning, &TickInput::default());
        assert_eq!(state.items.len(), 1);
    }

    #[test]
    fn test_certain_spawn_lands_on_top_row_in_bounds() {
        let tuning = Tuning {
            base_spawn_probability: 1.0,
            chaos_probability: 0.0,
            ..Tuning::default()
        };
        let mut state = GameState::new(42, &tuning);
        state.catcher.x = -1000.0;

        for _ in 0..200 {
            tick(&mut state, &tuning, &TickInput::default());
        }
        // One spawn per tick, each moved once on its first tick
        assert!(!state.items.is_empty());
        let newest = state.items.last().unwrap();
        assert_eq!(newest.pos.y, tuning.base_fall_speed);
        for item in &state.items {
            assert!(item.pos.x >= 0.0 && item.pos.x <= tuning.spawn_span());
        }
    }

    #[test]
    fn test_rotten_fraction_extremes() {
        for (fraction, expected) in [(0.0, ItemKind::Egg), (1.0, ItemKind::RottenEgg)] {
            let tuning = Tuning {
                base_spawn_probability: 1.0,
                rotten_fraction: fraction,
                chaos_probability: 0.0,
                ..Tuning::default()
            };
            let mut state = GameState::new(3, &tuning);
            state.catcher.x = -1000.0;
            for _ in 0..20 {
                let outcome = tick(&mut state, &tuning, &TickInput::default());
                assert_eq!(outcome.spawned, Some(expected));
            }
        }
    }

    #[test]
    fn test_chaos_triples_fall_speed() {
        let tuning = Tuning {
            chaos_probability: 1.0,
            base_spawn_probability: 0.0,
            ..Tuning::default()
        };
        let mut state = GameState::new(1, &tuning);
        state.catcher.x = -1000.0;
        state.spawn_item(10.0, 0.0, ItemKind::Egg);

        let first = tick(&mut state, &tuning, &TickInput { now_ms: 0.0 });
        assert!(first.chaos_started);
        assert_eq!(state.items[0].pos.y, 2.0);

        let second = tick(&mut state, &tuning, &TickInput { now_ms: 16.0 });
        assert!(!second.chaos_started);
        assert_eq!(state.items[0].pos.y, 8.0);
        assert_eq!(state.chaos.pending().map(|h| h.due_ms), Some(5000.0));
    }

    #[test]
    fn test_determinism() {
        let tuning = Tuning::default();
        let mut a = GameState::new(99999, &tuning);
        let mut b = GameState::new(99999, &tuning);

        for i in 0..2000 {
            let input = TickInput {
                now_ms: i as f64 * 16.0,
            };
            let x = (i as f32 * 0.37).sin() * 150.0 + 140.0;
            a.catcher.set_x(x);
            b.catcher.set_x(x);
            assert_eq!(tick(&mut a, &tuning, &input), tick(&mut b, &tuning, &input));
        }

        assert_eq!(a.items, b.items);
        assert_eq!(a.score, b.score);
        assert_eq!(a.lives, b.lives);
    }
}
