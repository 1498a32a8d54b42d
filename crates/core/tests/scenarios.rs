//! End-to-end match scenarios driven through the public API.

use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};

use werewolf_core::{
    ActionPayload, Activity, Match, MatchError, Role, Team, target_payload,
};

// Player names follow the RFC 3092 convention.
const NAMES: [&str; 8] = ["Foo", "Bar", "Baz", "Qux", "Quux", "Corge", "Grault", "Garply"];

fn new_match(count: usize, seed: u64) -> Match {
    let mut game = Match::new();
    for name in &NAMES[..count] {
        game.add_player(name).expect("distinct names join");
    }
    game.start(&mut StdRng::seed_from_u64(seed))
        .expect("enough players to start");
    game
}

fn wolf(game: &Match) -> String {
    game.wolves().next().expect("one wolf assigned").to_owned()
}

fn citizens(game: &Match) -> Vec<String> {
    game.alive()
        .filter(|p| p.role() == Role::Citizen)
        .map(|p| p.name().to_owned())
        .collect()
}

fn assert_tally_invariant(game: &Match) {
    if let Some(ballot) = game.phase().ballot() {
        let total: u32 = ballot.votes().values().sum();
        assert_eq!(total as usize, ballot.voter_count());
        for (target, count) in ballot.votes() {
            let pointing = ballot.voted_for().values().filter(|t| *t == target).count();
            assert_eq!(*count as usize, pointing);
        }
    }
}

fn assert_round_trip(game: &Match) {
    let encoded = game.encode().unwrap();
    let decoded = Match::decode(&encoded).unwrap();
    assert_eq!(decoded.encode().unwrap(), encoded);
}

#[test]
fn distinct_names_all_join() {
    let mut game = Match::new();
    for (joined, name) in NAMES.iter().enumerate() {
        game.add_player(&format!("  {name}  ")).unwrap();
        assert_eq!(game.roster().len(), joined + 1);
    }

    let err = game.add_player(" Quux").unwrap_err();
    assert_eq!(err, MatchError::DuplicateName { name: "Quux".into() });
    assert_eq!(game.roster().len(), NAMES.len());
}

#[test]
fn start_needs_four_players() {
    for count in 0..4 {
        let mut game = Match::new();
        for name in &NAMES[..count] {
            game.add_player(name).unwrap();
        }
        let err = game.start(&mut StdRng::seed_from_u64(0)).unwrap_err();
        assert_eq!(err.error_code(), "MATCH_NOT_ENOUGH_PLAYERS");
        assert_eq!(game.activity(), Activity::Waiting);
    }
}

#[test]
fn four_players_unique_wolf_citizens_win() {
    let mut game = new_match(4, 42);
    assert_eq!(game.activity(), Activity::Wolves);
    let wolf = wolf(&game);
    let victim = citizens(&game)[0].clone();

    game.perform_action(&wolf, &target_payload(&victim)).unwrap();
    assert_eq!(game.activity(), Activity::Vote);
    assert_eq!(game.dead().iter().collect::<Vec<_>>(), [&victim]);

    let voters: Vec<String> = game.alive().map(|p| p.name().to_owned()).collect();
    assert_eq!(voters.len(), 3);
    for voter in &voters {
        game.perform_action(voter, &target_payload(&wolf)).unwrap();
        assert_tally_invariant(&game);
    }

    assert!(game.dead().contains(&wolf));
    assert_eq!(game.activity(), Activity::Finished);
    assert_eq!(game.winners(), Some(Team::Citizens));
    assert_round_trip(&game);
}

#[test]
fn self_votes_tie_and_wait_in_place() {
    let mut game = new_match(5, 9);
    let wolf = wolf(&game);
    let victim = citizens(&game)[0].clone();
    game.perform_action(&wolf, &target_payload(&victim)).unwrap();

    let voters: Vec<String> = game.alive().map(|p| p.name().to_owned()).collect();
    assert_eq!(voters.len(), 4);
    for voter in &voters {
        game.perform_action(voter, &target_payload(voter)).unwrap();
    }

    let ballot = game.phase().ballot().unwrap();
    assert_eq!(ballot.voter_count(), game.roster().len() - game.dead().len());
    assert!(voters.iter().all(|v| ballot.tally(v) == 1));
    assert_eq!(game.activity(), Activity::Vote);
    assert_eq!(game.dead().len(), 1);
}

#[test]
fn changing_a_vote_moves_the_tally() {
    let mut game = new_match(6, 3);
    let wolf = wolf(&game);
    let victim = citizens(&game)
        .into_iter()
        .find(|name| !["Foo", "Bar", "Baz"].contains(&name.as_str()))
        .unwrap();
    game.perform_action(&wolf, &target_payload(&victim)).unwrap();

    game.perform_action("Foo", &target_payload("Bar")).unwrap();
    game.perform_action("Foo", &target_payload("Baz")).unwrap();

    let ballot = game.phase().ballot().unwrap();
    assert_eq!(ballot.tally("Bar"), 0);
    assert_eq!(ballot.tally("Baz"), 1);
    assert_eq!(ballot.vote_of("Foo"), Some("Baz"));
    assert_tally_invariant(&game);
}

#[test]
fn invalid_actions_change_nothing() {
    let mut game = new_match(5, 11);
    let wolf = wolf(&game);
    let citizen = citizens(&game)[0].clone();
    let before = game.encode().unwrap();

    assert_eq!(
        game.perform_action(&citizen, &target_payload(&wolf)),
        Err(MatchError::NotAWolf { name: citizen.clone() })
    );
    assert_eq!(
        game.perform_action(&wolf, &target_payload("Nobody")),
        Err(MatchError::PlayerNotFound { name: "Nobody".into() })
    );
    let mut wrong_type = ActionPayload::new();
    wrong_type.insert("player".into(), 7.into());
    assert_eq!(
        game.perform_action(&wolf, &wrong_type).unwrap_err().error_code(),
        "MATCH_WRONG_TYPE"
    );
    assert_eq!(game.encode().unwrap(), before);

    game.perform_action(&wolf, &target_payload(&citizen)).unwrap();
    let before = game.encode().unwrap();
    assert_eq!(
        game.perform_action(&wolf, &target_payload(&citizen)),
        Err(MatchError::PlayerDead { name: citizen.clone() })
    );
    assert_eq!(game.encode().unwrap(), before);
}

#[test]
fn random_play_preserves_invariants() {
    for seed in 0..50 {
        let mut rng = StdRng::seed_from_u64(seed);
        let count = rng.gen_range(4..=NAMES.len());
        let mut game = new_match(count, seed);

        for _ in 0..500 {
            if game.is_finished() {
                break;
            }
            let alive: Vec<String> = game.alive().map(|p| p.name().to_owned()).collect();
            let actor = alive.choose(&mut rng).unwrap().clone();
            let target = alive.choose(&mut rng).unwrap().clone();
            let before = game.encode().unwrap();

            if game.perform_action(&actor, &target_payload(&target)).is_err() {
                assert_eq!(game.encode().unwrap(), before);
            }

            assert!(game.dead().iter().all(|name| game.contains(name)));
            assert_tally_invariant(&game);
            assert_round_trip(&game);
        }

        assert_eq!(game.wolves().count(), 1);
    }
}
