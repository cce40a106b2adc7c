//! End-to-end rules tests
//!
//! Matches are built from deck records and driven by text commands, the same
//! way the `duel` binary plays them. Decks are not shuffled here so that the
//! cards in hand are known.

use duel_forge_rs::{
    core::{CardId, Element, PlayerId},
    game::{parse_command, Duel, EventLog, EventSubscriber, GameEvent, GameState, LossReason, MoveScript, Phase},
    loader::{DeckLoader, GameInitializer},
    DuelError, IllegalMove, RulesConfig,
};
use similar_asserts::assert_eq;
use std::cell::RefCell;
use std::rc::Rc;

const FIRE_DECK: &str = "\
LAND\t1\tFire Nation Capital\tFIRE\t\t
CHARACTER\t2\tZuko\tFIRE\tBanished prince\t\t1200\t800\t1
SKILL_AURA\t3\tBlue Flame\tFIRE\t\t\t1\t300\t0
LAND\t4\tEmber Island\tFIRE\t\t
LAND\t5\tSun Warrior Ruins\tFIRE\t\t
LAND\t6\tCaldera\tFIRE\t\t
LAND\t7\tCrescent Island\tFIRE\t\t
";

const WATER_DECK: &str = "\
LAND\t101\tKyoshi Island\tWATER\t\t
CHARACTER\t102\tKatara\tWATER\t\t\t900\t1100\t1
LAND\t103\tNorth Pole\tWATER\t\t
LAND\t104\tSouth Pole\tWATER\t\t
LAND\t105\tSpirit Oasis\tWATER\t\t
LAND\t106\tFoggy Swamp\tWATER\t\t
";

const A: PlayerId = PlayerId::new(0);
const B: PlayerId = PlayerId::new(1);

/// Both decks loaded in file order, four cards drawn by each player
fn unshuffled_game() -> GameState {
    let fire = DeckLoader::parse(FIRE_DECK).unwrap();
    let water = DeckLoader::parse(WATER_DECK).unwrap();
    let mut game = GameInitializer::new(RulesConfig::default())
        .init_game("Zuko", &fire, "Katara", &water)
        .unwrap();
    game.logger.enable_capture();
    for player in [A, B] {
        for _ in 0..4 {
            game.draw_card(player).unwrap();
        }
    }
    game.events.drain();
    game
}

/// Run commands until one fails; returns all events and the failure, if any
fn play(game: &mut GameState, script: &str) -> (Vec<GameEvent>, Option<DuelError>) {
    let mut events = Vec::new();
    for command in MoveScript::parse(script).commands() {
        match parse_command(&command.text, game).and_then(|mv| game.apply(mv)) {
            Ok(produced) => events.extend(produced),
            Err(e) => return (events, Some(e)),
        }
    }
    (events, None)
}

#[test]
fn test_aura_boosted_direct_attack_wins() {
    let mut game = unshuffled_game();
    let (events, error) = play(
        &mut game,
        "
        land a 1
        character a 2
        turn            # Katara's turn 2
        land b 101
        turn            # back to Zuko, turn 3
        land a 4
        skill a 3 2
        phase           # battle
        attack a 2
        ",
    );
    assert!(error.is_none(), "script failed: {error:?}");

    assert_eq!(game.player(B).unwrap().health, -1420);
    assert_eq!(game.winner(), Some(A));
    assert_eq!(
        events.last(),
        Some(&GameEvent::MatchOver(duel_forge_rs::game::MatchResult {
            winner: A,
            loser: B,
            reason: LossReason::HealthDepleted,
        }))
    );

    let (_, error) = play(&mut game, "phase");
    assert!(matches!(error, Some(DuelError::IllegalMove(IllegalMove::MatchOver))));
}

#[test]
fn test_first_turn_attack_and_second_land_are_refused() {
    let mut game = unshuffled_game();

    let (_, error) = play(&mut game, "land a 1\nland a 4");
    assert!(matches!(error, Some(DuelError::IllegalMove(IllegalMove::LandAlreadyPlayed))));

    let (_, error) = play(&mut game, "character a 2\nphase\nattack a 2");
    assert!(matches!(error, Some(DuelError::IllegalMove(IllegalMove::FirstTurn))));
    assert_eq!(game.current_phase(), Phase::Battle);
    assert_eq!(game.player(B).unwrap().health, 80);
}

#[test]
fn test_turn_cycle_resets_flags_for_both_players() {
    let mut game = unshuffled_game();
    let (_, error) = play(
        &mut game,
        "
        land a 1
        character a 2
        turn
        land b 101
        character b 102
        turn
        phase
        attack a 2 102
        ",
    );
    assert!(error.is_none(), "script failed: {error:?}");

    // 1200 against Katara's 1100 defense: Katara is destroyed, Katara's player takes 100
    assert_eq!(game.player(B).unwrap().health, -20);
    assert!(game.is_game_over());

    let zuko = game.player(A).unwrap().field.character(CardId::new(2)).unwrap();
    assert!(zuko.has_attacked);
    assert!(!game.player(B).unwrap().has_played_land);
    assert_eq!(game.player(B).unwrap().discard.len(), 2);
}

#[test]
fn test_stats_at_the_record_limits_do_not_overflow() {
    let records = "\
CHARACTER\t1\tKoizilla\tWATER\t\t\t2147483647\t0\t0
SKILL_AURA\t2\tFull Moon\tWATER\t\t\t0\t1\t0
LAND\t3\tMist Island\tWATER\t\t
LAND\t4\tSea Shore\tWATER\t\t
";
    let deck = DeckLoader::parse(records).unwrap();
    assert!(deck.rejected.is_empty());
    let water = DeckLoader::parse(WATER_DECK).unwrap();
    let mut game = GameInitializer::new(RulesConfig::default())
        .init_game("Yue", &deck, "Katara", &water)
        .unwrap();
    game.logger.enable_capture();
    for _ in 0..2 {
        game.draw_card(A).unwrap();
    }
    game.draw_card(B).unwrap();

    let (events, error) = play(&mut game, "character a 1\nskill a 2 1\nturn\nturn\nphase\nattack a 1");
    assert!(error.is_none(), "script failed: {error:?}");
    assert!(events
        .iter()
        .any(|e| matches!(e, GameEvent::SkillAttached { total_attack: i32::MAX, .. })));
    assert_eq!(game.player(B).unwrap().health, 80 - i32::MAX);
    assert_eq!(game.winner(), Some(A));
}

#[test]
fn test_rejected_move_changes_nothing() {
    let mut game = unshuffled_game();
    play(&mut game, "land a 1\ncharacter a 2");
    let before = serde_json::to_string_pretty(&game).unwrap();

    for command in ["skill a 3 2", "land a 4", "attack a 2", "character b 102", "remove a 99"] {
        let (events, error) = play(&mut game, command);
        assert!(events.is_empty());
        assert!(matches!(error, Some(DuelError::IllegalMove(_))), "{command} was accepted");
    }

    assert_eq!(serde_json::to_string_pretty(&game).unwrap(), before);
}

#[test]
fn test_play_land_only_touches_its_player() {
    let mut game = unshuffled_game();
    let other_before = serde_json::to_value(game.player(B).unwrap()).unwrap();
    let turn_before = game.turn.clone();

    game.play_land(A, CardId::new(1)).unwrap();

    assert_eq!(serde_json::to_value(game.player(B).unwrap()).unwrap(), other_before);
    assert_eq!(game.turn, turn_before);
    let me = game.player(A).unwrap();
    assert_eq!(me.hand.len(), 3);
    assert_eq!(me.power.total(Element::Fire), 1);
    assert_eq!(me.card_count(), 7);
}

#[test]
fn test_deck_exhaustion_ends_the_match() {
    let mut game = unshuffled_game();
    // Water deck has 6 cards; 4 are drawn already, two more turn draws empty it
    let mut last = Vec::new();
    for _ in 0..6 {
        if game.is_game_over() {
            break;
        }
        last = game.end_turn().unwrap();
    }

    assert_eq!(game.player(B).unwrap().deck.len(), 0);
    assert_eq!(
        game.outcome().map(|o| (o.loser, o.reason)),
        Some((B, LossReason::DeckExhausted))
    );
    assert!(matches!(last.last(), Some(GameEvent::MatchOver(_))));
}

#[test]
fn test_subscribers_receive_events_in_order() {
    struct Shared(Rc<RefCell<EventLog>>);
    impl EventSubscriber for Shared {
        fn on_event(&mut self, event: &GameEvent) {
            self.0.borrow_mut().on_event(event);
        }
    }

    let log = Rc::new(RefCell::new(EventLog::default()));
    let mut duel = Duel::new(unshuffled_game());
    duel.subscribe(Box::new(Shared(log.clone())));

    let mut returned = Vec::new();
    for command in ["land a 1", "character a 2", "phase", "turn"] {
        let mv = parse_command(command, duel.state()).unwrap();
        returned.extend(duel.submit(mv).unwrap());
    }

    assert_eq!(log.borrow().events, returned);
    assert!(matches!(returned[0], GameEvent::LandPlayed { .. }));
    assert!(matches!(returned[1], GameEvent::CharacterPlayed { .. }));
    assert!(matches!(returned[2], GameEvent::PhaseAdvanced { phase: Phase::Battle, .. }));
    assert!(matches!(returned[3], GameEvent::TurnStarted { player: B, .. }));
}

#[test]
fn test_seeded_matches_are_identical() {
    let deal = |seed: u64| {
        let fire = DeckLoader::parse(FIRE_DECK).unwrap();
        let water = DeckLoader::parse(WATER_DECK).unwrap();
        let rules = RulesConfig {
            opening_hand: 3,
            ..RulesConfig::default()
        }
        .with_seed(seed);
        let mut game = GameInitializer::new(rules)
            .init_game("Zuko", &fire, "Katara", &water)
            .unwrap();
        game.logger.enable_capture();
        game.start_match().unwrap();
        serde_json::to_string_pretty(&game).unwrap()
    };

    assert_eq!(deal(9), deal(9));
}

#[test]
fn test_state_dump_round_trips() {
    let mut game = unshuffled_game();
    play(&mut game, "land a 1\ncharacter a 2\nphase");

    let json = serde_json::to_string(&game).unwrap();
    let restored: GameState = serde_json::from_str(&json).unwrap();
    assert_eq!(serde_json::to_string(&restored).unwrap(), json);
    assert_eq!(restored.current_phase(), Phase::Battle);
    assert_eq!(restored.player(A).unwrap().field.character_count(), 1);
}
