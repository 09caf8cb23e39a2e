// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Shot-string codec.
//!
//! A shot-string records one shot category for a player in one quarter:
//!
//! ```text
//! token       := field-goal "-" free-throws
//! field-goal  := DIGITS [ "/" DIGITS ]
//! free-throws := "x" | DIGITS "x" | DIGITS "/" DIGITS | DIGITS
//! ```
//!
//! The last digit of the leading run is the shot type (2 or 3) and the
//! digits before it are the made count, so `"22"` is two made 2-pointers
//! and `"123"` is twelve made 3-pointers. An optional `/n` gives total
//! attempts; without it every attempt was made.
//!
//! Free throws: `x` is one attempt made, `nx` is n attempts all made,
//! `m/n` is m made of n, and a bare `n` is n attempts with none made.
//!
//! `decode("22-1x")` is two made 2-pointers followed by one free throw,
//! made. `encode` always emits the canonical form, so
//! `encode(decode(t))` normalizes `t` and `decode(encode(e)) == e`.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Shot-string decoding errors.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ShotError {
    #[error("Malformed shot token {token:?}: {reason}")]
    MalformedToken { token: String, reason: &'static str },
}

/// Point value of a field goal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ShotType {
    Two,
    Three,
}

impl ShotType {
    /// Points awarded for one made shot of this type.
    pub fn points(self) -> u32 {
        match self {
            ShotType::Two => 2,
            ShotType::Three => 3,
        }
    }

    fn from_digit(digit: u8) -> Option<Self> {
        match digit {
            b'2' => Some(ShotType::Two),
            b'3' => Some(ShotType::Three),
            _ => None,
        }
    }

    fn digit(self) -> char {
        match self {
            ShotType::Two => '2',
            ShotType::Three => '3',
        }
    }
}

/// Free throws attached to a shot entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct FreeThrows {
    made: u32,
    attempted: u32,
}

impl FreeThrows {
    /// No free throws.
    pub const NONE: FreeThrows = FreeThrows {
        made: 0,
        attempted: 0,
    };

    pub fn new(made: u32, attempted: u32) -> Result<Self, ShotError> {
        if made > attempted {
            return Err(ShotError::MalformedToken {
                token: format!("{}/{}", made, attempted),
                reason: "more free throws made than attempted",
            });
        }
        Ok(Self { made, attempted })
    }

    /// `attempted` free throws, every one made.
    pub fn all_made(attempted: u32) -> Self {
        Self {
            made: attempted,
            attempted,
        }
    }

    pub fn made(&self) -> u32 {
        self.made
    }

    pub fn attempted(&self) -> u32 {
        self.attempted
    }

    pub fn missed(&self) -> u32 {
        self.attempted - self.made
    }

    /// True when at least one free throw was attempted and none were missed.
    pub fn is_all_made(&self) -> bool {
        self.attempted > 0 && self.made == self.attempted
    }
}

/// One decoded shot-string.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct ShotEntry {
    made: u32,
    shot_type: ShotType,
    attempted: u32,
    free_throws: FreeThrows,
}

impl ShotEntry {
    /// Build an entry; `attempted` must be at least `made`.
    pub fn new(
        made: u32,
        shot_type: ShotType,
        attempted: u32,
        free_throws: FreeThrows,
    ) -> Result<Self, ShotError> {
        if attempted < made {
            return Err(ShotError::MalformedToken {
                token: format!("{}{}/{}", made, shot_type.digit(), attempted),
                reason: "fewer attempts than makes",
            });
        }
        Ok(Self {
            made,
            shot_type,
            attempted,
            free_throws,
        })
    }

    pub fn made(&self) -> u32 {
        self.made
    }

    pub fn shot_type(&self) -> ShotType {
        self.shot_type
    }

    pub fn attempted(&self) -> u32 {
        self.attempted
    }

    pub fn missed(&self) -> u32 {
        self.attempted - self.made
    }

    pub fn free_throws(&self) -> FreeThrows {
        self.free_throws
    }

    pub fn ft_made(&self) -> u32 {
        self.free_throws.made
    }

    pub fn ft_attempted(&self) -> u32 {
        self.free_throws.attempted
    }

    /// Points scored by this entry, free throws included.
    ///
    /// Widened to `u64` so any pair of `u32` counts fits.
    pub fn points(&self) -> u64 {
        u64::from(self.made) * u64::from(self.shot_type.points()) + u64::from(self.free_throws.made)
    }
}

/// Decode one shot-string. Surrounding whitespace is ignored.
pub fn decode(token: &str) -> Result<ShotEntry, ShotError> {
    let malformed = |reason: &'static str| ShotError::MalformedToken {
        token: token.to_string(),
        reason,
    };

    let raw = token.trim();
    let (field_goal, free_throws) = raw
        .split_once('-')
        .ok_or_else(|| malformed("missing '-' separator"))?;

    let (run, attempts) = match field_goal.split_once('/') {
        Some((run, attempts)) => (run, Some(attempts)),
        None => (field_goal, None),
    };

    if run.len() < 2 || !is_digits(run) {
        return Err(malformed("expected made count followed by shot type digit"));
    }
    let (made_digits, type_digit) = run.split_at(run.len() - 1);
    let shot_type = ShotType::from_digit(type_digit.as_bytes()[0])
        .ok_or_else(|| malformed("shot type must be 2 or 3"))?;
    let made = parse_count(made_digits).ok_or_else(|| malformed("invalid made count"))?;

    let attempted = match attempts {
        Some(digits) => parse_count(digits).ok_or_else(|| malformed("invalid attempt count"))?,
        None => made,
    };
    if attempted < made {
        return Err(malformed("fewer attempts than makes"));
    }

    let free_throws =
        decode_free_throws(free_throws).ok_or_else(|| malformed("invalid free-throw segment"))?;

    Ok(ShotEntry {
        made,
        shot_type,
        attempted,
        free_throws,
    })
}

fn decode_free_throws(segment: &str) -> Option<FreeThrows> {
    if segment == "x" {
        return Some(FreeThrows::all_made(1));
    }
    if let Some(count) = segment.strip_suffix('x') {
        return parse_count(count).map(FreeThrows::all_made);
    }
    if let Some((made, attempted)) = segment.split_once('/') {
        let made = parse_count(made)?;
        let attempted = parse_count(attempted)?;
        return FreeThrows::new(made, attempted).ok();
    }
    parse_count(segment).map(|attempted| FreeThrows { made: 0, attempted })
}

/// Encode an entry in canonical form.
pub fn encode(entry: &ShotEntry) -> String {
    let mut out = format!("{}{}", entry.made, entry.shot_type.digit());
    if entry.attempted != entry.made {
        out.push_str(&format!("/{}", entry.attempted));
    }
    out.push('-');

    let ft = entry.free_throws;
    match (ft.made, ft.attempted) {
        (_, 0) => out.push('0'),
        (made, attempted) if made == attempted => out.push_str(&format!("{}x", attempted)),
        (0, attempted) => out.push_str(&attempted.to_string()),
        (made, attempted) => out.push_str(&format!("{}/{}", made, attempted)),
    }
    out
}

/// Decode an ordered sequence of shot-strings separated by whitespace or commas.
pub fn decode_sequence(line: &str) -> Result<Vec<ShotEntry>, ShotError> {
    line.split(|c: char| c.is_whitespace() || c == ',')
        .filter(|t| !t.is_empty())
        .map(decode)
        .collect()
}

/// Encode a sequence as space-separated canonical tokens.
pub fn encode_sequence(entries: &[ShotEntry]) -> String {
    entries.iter().map(encode).collect::<Vec<_>>().join(" ")
}

fn is_digits(s: &str) -> bool {
    !s.is_empty() && s.bytes().all(|b| b.is_ascii_digit())
}

fn parse_count(s: &str) -> Option<u32> {
    if !is_digits(s) {
        return None;
    }
    s.parse().ok()
}

impl FromStr for ShotEntry {
    type Err = ShotError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        decode(s)
    }
}

impl fmt::Display for ShotEntry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&encode(self))
    }
}

impl TryFrom<String> for ShotEntry {
    type Error = ShotError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        decode(&value)
    }
}

impl From<ShotEntry> for String {
    fn from(entry: ShotEntry) -> Self {
        encode(&entry)
    }
}
