//! Performance benchmarks for the duel engine
//!
//! Measures a complete scripted match (deal, play lands and characters,
//! attack until someone drops to zero health) and the move validation
//! that runs in front of every command.

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use duel_forge_rs::{
    core::{Card, CardId, Element, Position},
    game::{AttackTarget, GameState, Move, Phase},
    loader::{DeckList, GameInitializer},
    RulesConfig,
};

/// Alternating lands and cheap characters, 40 cards
fn bench_deck(offset: u32, element: Element) -> DeckList {
    let cards = (0..40)
        .map(|i| {
            let id = CardId::new(offset + i);
            if i % 2 == 0 {
                Card::land(id, "Land", element)
            } else {
                Card::character(id, "Soldier", element, 300 + (i as i32 % 7) * 100, 400, 1)
            }
        })
        .collect();
    DeckList {
        cards,
        rejected: Vec::new(),
    }
}

fn new_game(seed: u64) -> GameState {
    let init = GameInitializer::new(RulesConfig::default().with_seed(seed));
    let mut game = init
        .init_game("A", &bench_deck(0, Element::Fire), "B", &bench_deck(1000, Element::Water))
        .expect("bench decks fit the default rules");
    game.logger.set_verbosity(duel_forge_rs::game::VerbosityLevel::Silent);
    game.start_match().expect("match starts");
    game
}

/// Play whatever is legal each turn; returns the number of applied moves
fn play_out(game: &mut GameState) -> usize {
    let mut moves = 0;
    while !game.is_game_over() && game.turn_number() < 200 {
        let me = game.active_player();
        let hand: Vec<CardId> = game.player(me).map(|p| p.hand.iter().map(|c| c.id).collect()).unwrap_or_default();

        for card in &hand {
            let candidates = [
                Move::PlayLand { player: me, card: *card },
                Move::PlayCharacter {
                    player: me,
                    card: *card,
                    position: Position::Attack,
                },
            ];
            for mv in candidates {
                if game.apply(mv).is_ok() {
                    moves += 1;
                }
            }
        }

        while game.current_phase() != Phase::Battle {
            let _ = game.end_phase();
        }
        let attackers: Vec<CardId> = game
            .player(me)
            .map(|p| p.field.characters().map(|c| c.id()).collect())
            .unwrap_or_default();
        for attacker in attackers {
            if game.attack(me, attacker, AttackTarget::Player).is_ok() {
                moves += 1;
            }
        }
        let _ = game.end_turn();
    }
    moves
}

fn bench_full_match(c: &mut Criterion) {
    let mut group = c.benchmark_group("full_match");
    for seed in [1u64, 42] {
        group.bench_with_input(BenchmarkId::new("fresh", seed), &seed, |b, &seed| {
            b.iter(|| {
                let mut game = new_game(seed);
                black_box(play_out(&mut game))
            });
        });
    }
    group.finish();
}

fn bench_validate(c: &mut Criterion) {
    let game = new_game(7);
    let me = game.active_player();
    let card = game.player(me).ok().and_then(|p| p.hand.iter().next().map(|c| c.id));
    let mv = Move::PlayLand {
        player: me,
        card: card.unwrap_or(CardId::new(0)),
    };

    c.bench_function("validate_play_land", |b| b.iter(|| black_box(mv.validate(black_box(&game)))));
}

criterion_group!(benches, bench_full_match, bench_validate);
criterion_main!(benches);
