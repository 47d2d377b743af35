//! Integration tests for derived standings, input parsing, and the player catalog.

use rummy_tracker_web::{
    avatar_for, available_players, compute_winner, game_phase, highest_hand_score, parse_score,
    parse_target, GamePhase, Player, RosterError, RosterState, DEFAULT_AVATAR,
};

fn player(name: &str, points: i64, target: i64) -> Player {
    Player::new(name, points, target)
}

#[test]
fn winner_is_the_only_active_player() {
    let list = vec![player("A", 400, 320), player("B", 200, 320)];
    assert_eq!(compute_winner(&list).map(|p| p.name.as_str()), Some("B"));
}

#[test]
fn no_winner_without_players() {
    assert!(compute_winner(&[]).is_none());
}

#[test]
fn no_winner_while_two_are_active() {
    let list = vec![player("A", 10, 320), player("B", 20, 320), player("C", 500, 320)];
    assert!(compute_winner(&list).is_none());
}

#[test]
fn no_winner_when_everyone_is_out() {
    let list = vec![player("A", 400, 320), player("B", 500, 320)];
    assert!(compute_winner(&list).is_none());
}

#[test]
fn phase_follows_the_roster() {
    let mut roster = RosterState::new();
    assert_eq!(game_phase(&roster), GamePhase::Setup);

    roster.list = vec![player("A", 0, 320), player("B", 0, 320)];
    roster.game_started = true;
    assert_eq!(game_phase(&roster), GamePhase::InProgress);

    roster.list[0].add_score(330, 320);
    assert_eq!(game_phase(&roster), GamePhase::Finished);
}

#[test]
fn single_started_player_is_not_a_finished_game() {
    let mut roster = RosterState::new();
    roster.list = vec![player("A", 0, 320)];
    roster.game_started = true;
    assert_eq!(game_phase(&roster), GamePhase::InProgress);
}

#[test]
fn highest_hand_ignores_totals_and_negatives() {
    let mut a = player("A", 0, 320);
    a.add_score(40, 320);
    a.add_score(80, 320);
    let mut b = player("B", 0, 320);
    b.add_score(-20, 320);
    b.add_score(60, 320);
    assert_eq!(highest_hand_score(&[a, b]), 80);

    let mut c = player("C", 0, 320);
    c.add_score(-5, 320);
    assert_eq!(highest_hand_score(&[c]), 0);
    assert_eq!(highest_hand_score(&[]), 0);
}

#[test]
fn scores_parse_like_form_input() {
    assert_eq!(parse_score("25"), Ok(25));
    assert_eq!(parse_score(" -10 "), Ok(-10));
    assert_eq!(parse_score("0"), Ok(0));
    assert_eq!(parse_score(""), Err(RosterError::InvalidScore));
    assert_eq!(parse_score("ten"), Err(RosterError::InvalidScore));
    assert_eq!(parse_score("2.5"), Err(RosterError::InvalidScore));
}

#[test]
fn targets_must_be_positive_integers() {
    assert_eq!(parse_target("320"), Ok(320));
    assert_eq!(parse_target(" 101"), Ok(101));
    assert_eq!(parse_target("0"), Err(RosterError::InvalidTarget));
    assert_eq!(parse_target("-5"), Err(RosterError::InvalidTarget));
    assert_eq!(parse_target("abc"), Err(RosterError::InvalidTarget));
}

#[test]
fn catalog_resolves_avatars() {
    assert!(!available_players().is_empty());
    assert_eq!(avatar_for("rahul"), "/static/avatars/rahul.svg");
    assert_eq!(avatar_for("Someone New"), DEFAULT_AVATAR);
}

#[test]
fn catalog_avatars_are_shipped_under_static() {
    let static_dir = std::path::Path::new(env!("CARGO_MANIFEST_DIR")).join("static");
    let avatars = available_players()
        .iter()
        .map(|entry| entry.avatar)
        .chain(std::iter::once(DEFAULT_AVATAR));
    for avatar in avatars {
        let relative = avatar
            .strip_prefix("/static/")
            .unwrap_or_else(|| panic!("{} is not served from /static", avatar));
        assert!(static_dir.join(relative).is_file(), "missing asset {}", avatar);
    }
}
