//! Box-score aggregates computed from decoded shot-strings.
//!
//! A quarter line owns its ordered shot entries; totals are derived on
//! demand and can be summed across quarters and games.

use serde::{Deserialize, Serialize};
use std::ops::AddAssign;

use crate::shot::{self, ShotEntry, ShotError, ShotType};

/// Shooting totals for any span (quarter, game, season).
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ShotTotals {
    // ─── Field Goals ─────────────────────────────────────────────
    pub two_made: u64,
    pub two_attempted: u64,
    pub three_made: u64,
    pub three_attempted: u64,

    // ─── Free Throws ─────────────────────────────────────────────
    pub ft_made: u64,
    pub ft_attempted: u64,
}

impl ShotTotals {
    /// Add one entry's makes and attempts.
    pub fn add_entry(&mut self, entry: &ShotEntry) {
        match entry.shot_type() {
            ShotType::Two => {
                add(&mut self.two_made, entry.made().into());
                add(&mut self.two_attempted, entry.attempted().into());
            }
            ShotType::Three => {
                add(&mut self.three_made, entry.made().into());
                add(&mut self.three_attempted, entry.attempted().into());
            }
        }
        add(&mut self.ft_made, entry.ft_made().into());
        add(&mut self.ft_attempted, entry.ft_attempted().into());
    }

    pub fn from_entries<'a>(entries: impl IntoIterator<Item = &'a ShotEntry>) -> Self {
        let mut totals = Self::default();
        for entry in entries {
            totals.add_entry(entry);
        }
        totals
    }

    pub fn fg_made(&self) -> u64 {
        self.two_made.saturating_add(self.three_made)
    }

    pub fn fg_attempted(&self) -> u64 {
        self.two_attempted.saturating_add(self.three_attempted)
    }

    /// Total points; saturates rather than wrapping.
    pub fn points(&self) -> u64 {
        self.two_made
            .saturating_mul(2)
            .saturating_add(self.three_made.saturating_mul(3))
            .saturating_add(self.ft_made)
    }

    /// Field-goal percentage in `[0, 1]`, `None` without attempts.
    pub fn fg_pct(&self) -> Option<f64> {
        ratio(self.fg_made(), self.fg_attempted())
    }

    pub fn three_pct(&self) -> Option<f64> {
        ratio(self.three_made, self.three_attempted)
    }

    pub fn ft_pct(&self) -> Option<f64> {
        ratio(self.ft_made, self.ft_attempted)
    }
}

impl AddAssign for ShotTotals {
    fn add_assign(&mut self, other: Self) {
        add(&mut self.two_made, other.two_made);
        add(&mut self.two_attempted, other.two_attempted);
        add(&mut self.three_made, other.three_made);
        add(&mut self.three_attempted, other.three_attempted);
        add(&mut self.ft_made, other.ft_made);
        add(&mut self.ft_attempted, other.ft_attempted);
    }
}

fn add(total: &mut u64, count: u64) {
    *total = total.saturating_add(count);
}

fn ratio(made: u64, attempted: u64) -> Option<f64> {
    (attempted > 0).then(|| made as f64 / attempted as f64)
}

/// Shot entries for one player in one quarter of one game.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QuarterLine {
    pub game_id: String,
    pub quarter: u8,
    pub player: String,
    /// Entries in scorebook order
    #[serde(default)]
    pub entries: Vec<ShotEntry>,
}

impl QuarterLine {
    /// Parse a scorebook line of shot-strings.
    pub fn parse(
        game_id: impl Into<String>,
        quarter: u8,
        player: impl Into<String>,
        line: &str,
    ) -> Result<Self, ShotError> {
        Ok(Self {
            game_id: game_id.into(),
            quarter,
            player: player.into(),
            entries: shot::decode_sequence(line)?,
        })
    }

    pub fn totals(&self) -> ShotTotals {
        ShotTotals::from_entries(&self.entries)
    }

    /// Canonical scorebook line.
    pub fn to_line(&self) -> String {
        shot::encode_sequence(&self.entries)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_totals_from_quarter_line() {
        let line = QuarterLine::parse("g1", 2, "Jordan", "22-1x 13/3-0 02/2-1/2").unwrap();
        let totals = line.totals();

        assert_eq!(totals.two_made, 2);
        assert_eq!(totals.two_attempted, 4);
        assert_eq!(totals.three_made, 1);
        assert_eq!(totals.three_attempted, 3);
        assert_eq!(totals.ft_made, 2);
        assert_eq!(totals.ft_attempted, 3);
        assert_eq!(totals.points(), 2 * 2 + 3 + 2);
        assert_eq!(totals.fg_pct(), Some(3.0 / 7.0));
    }

    #[test]
    fn test_totals_sum_across_quarters() {
        let q1 = QuarterLine::parse("g1", 1, "Jordan", "32-0").unwrap();
        let q2 = QuarterLine::parse("g1", 2, "Jordan", "13-2x").unwrap();

        let mut game = q1.totals();
        game += q2.totals();

        assert_eq!(game.points(), 6 + 3 + 2);
        assert_eq!(game.ft_pct(), Some(1.0));
    }

    #[test]
    fn test_empty_line_has_no_percentages() {
        let line = QuarterLine::parse("g1", 4, "Bench", "  ").unwrap();
        assert!(line.entries.is_empty());
        assert_eq!(line.totals().fg_pct(), None);
    }

    #[test]
    fn test_huge_counts_do_not_overflow() {
        let line = QuarterLine::parse("g1", 1, "Jordan", "42949672952-0 12-0 42949672953-4294967295x")
            .unwrap();
        let totals = line.totals();
        let max = u64::from(u32::MAX);

        assert_eq!(totals.two_made, max + 1);
        assert_eq!(totals.points(), (max + 1) * 2 + max * 3 + max);

        let mut saturated = ShotTotals {
            ft_made: u64::MAX,
            ..ShotTotals::default()
        };
        saturated += totals;
        assert_eq!(saturated.ft_made, u64::MAX);
        assert_eq!(saturated.points(), u64::MAX);
    }

    #[test]
    fn test_serializes_entries_as_strings() {
        let line = QuarterLine::parse("g1", 1, "Jordan", "22-1x").unwrap();
        let json = serde_json::to_value(&line).unwrap();
        assert_eq!(json["entries"][0], "22-1x");
    }
}
