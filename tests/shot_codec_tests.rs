// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Shot-string codec tests.

use courtside::models::{QuarterLine, ShotTotals};
use courtside::shot::{decode, encode, FreeThrows, ShotEntry, ShotError, ShotType};

#[test]
fn test_documented_example() {
    let entry = decode("22-1x").unwrap();
    assert_eq!(entry.made(), 2);
    assert_eq!(entry.shot_type(), ShotType::Two);
    assert_eq!(entry.ft_made(), 1);
    assert_eq!(entry.ft_attempted(), 1);
}

#[test]
fn test_documented_failures() {
    for token in ["", "2", "2x-1"] {
        assert!(
            matches!(decode(token), Err(ShotError::MalformedToken { .. })),
            "{token:?}"
        );
    }
}

#[test]
fn test_canonical_tokens_are_fixed_points() {
    for token in ["22-1x", "02-0", "13/4-2", "32/5-1/3", "103-3x", "23/3-0"] {
        let entry = decode(token).unwrap();
        assert_eq!(encode(&entry), token);
    }
}

#[test]
fn test_reencoding_is_idempotent() {
    for token in ["0022-001x", "22-x", "22/2-0x", "33-0/0", " 12-2/2 "] {
        let once = encode(&decode(token).unwrap());
        let twice = encode(&decode(&once).unwrap());
        assert_eq!(once, twice, "{token:?}");
    }
}

#[test]
fn test_constructed_entries_roundtrip() {
    let entries = [
        ShotEntry::new(0, ShotType::Three, 4, FreeThrows::NONE).unwrap(),
        ShotEntry::new(11, ShotType::Two, 15, FreeThrows::new(3, 4).unwrap()).unwrap(),
        ShotEntry::new(1, ShotType::Three, 1, FreeThrows::all_made(1)).unwrap(),
        ShotEntry::new(0, ShotType::Two, 0, FreeThrows::new(0, 2).unwrap()).unwrap(),
    ];
    for entry in entries {
        assert_eq!(decode(&encode(&entry)).unwrap(), entry);
    }
}

#[test]
fn test_invalid_constructions() {
    assert!(ShotEntry::new(3, ShotType::Two, 2, FreeThrows::NONE).is_err());
    assert!(FreeThrows::new(2, 1).is_err());
}

#[test]
fn test_parse_via_from_str() {
    let entry: ShotEntry = "13-2x".parse().unwrap();
    assert_eq!(entry.points(), 5);
    assert_eq!(entry.to_string(), "13-2x");
}

#[test]
fn test_game_totals_from_quarters() {
    let quarters = [
        QuarterLine::parse("2026-10-17-home", 1, "Rivera", "22-1x 13/2-0").unwrap(),
        QuarterLine::parse("2026-10-17-home", 2, "Rivera", "02/3-1/2").unwrap(),
        QuarterLine::parse("2026-10-17-home", 3, "Rivera", "").unwrap(),
    ];

    let mut game = ShotTotals::default();
    for quarter in &quarters {
        game += quarter.totals();
    }

    assert_eq!(game.fg_made(), 3);
    assert_eq!(game.fg_attempted(), 7);
    assert_eq!(game.three_made, 1);
    assert_eq!(game.three_attempted, 2);
    assert_eq!(game.ft_made, 2);
    assert_eq!(game.ft_attempted, 3);
    assert_eq!(game.points(), 4 + 3 + 2);
}

#[test]
fn test_bad_token_in_line_fails_whole_line() {
    assert!(QuarterLine::parse("g", 1, "Rivera", "22-1x 24-0").is_err());
}
