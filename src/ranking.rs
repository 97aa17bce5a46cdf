//! Weekly leaderboard and Hall of Fame
//!
//! Both tables come from the backend already sorted. These types answer the
//! questions the results screen asks: where would this score land, what do we
//! tell the player, and which rows go on which page.

use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::consts::RANKING_PAGE_SIZE;

/// Rows the weekly ranking returns
pub const MAX_RANKING: usize = 30;
/// Rows in the all-time Hall of Fame
pub const MAX_HALL_OF_FAME: usize = 15;

/// A single leaderboard row
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RankingEntry {
    pub name: String,
    pub score: i64,
}

fn sorted(mut entries: Vec<RankingEntry>, cap: usize) -> Vec<RankingEntry> {
    // Stable, so ties keep server order
    entries.sort_by(|a, b| b.score.cmp(&a.score));
    entries.truncate(cap);
    entries
}

/// This week's ranking, best first
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Leaderboard {
    pub entries: Vec<RankingEntry>,
}

impl Leaderboard {
    pub fn from_entries(entries: Vec<RankingEntry>) -> Self {
        Self {
            entries: sorted(entries, MAX_RANKING),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Position (1-indexed) this score would take: just above the first
    /// strictly lower score, or after everyone
    pub fn position_for(&self, score: i64) -> usize {
        self.entries
            .iter()
            .position(|e| e.score < score)
            .unwrap_or(self.entries.len())
            + 1
    }

    /// Number of pages at `RANKING_PAGE_SIZE` rows each
    pub fn total_pages(&self) -> usize {
        self.entries.len().div_ceil(RANKING_PAGE_SIZE)
    }

    /// Rows on a 1-indexed page with their overall positions; empty past the end
    pub fn page(&self, page: usize) -> Vec<(usize, &RankingEntry)> {
        let start = page.saturating_sub(1) * RANKING_PAGE_SIZE;
        self.entries
            .iter()
            .enumerate()
            .skip(start)
            .take(RANKING_PAGE_SIZE)
            .map(|(i, e)| (i + 1, e))
            .collect()
    }

    /// Top score (if any)
    pub fn top_score(&self) -> Option<i64> {
        self.entries.first().map(|e| e.score)
    }
}

/// All-time top scores
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct HallOfFame {
    pub entries: Vec<RankingEntry>,
}

impl HallOfFame {
    pub fn from_entries(entries: Vec<RankingEntry>) -> Self {
        Self {
            entries: sorted(entries, MAX_HALL_OF_FAME),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Gold, silver, bronze
    pub fn podium(&self) -> [Option<&RankingEntry>; 3] {
        [self.entries.first(), self.entries.get(1), self.entries.get(2)]
    }
}

/// How well a position did, for the results banner
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RankTier {
    Top10,
    Top20,
    Top30,
    Outside,
}

impl RankTier {
    pub fn from_position(position: usize) -> Self {
        match position {
            0..=10 => RankTier::Top10,
            11..=20 => RankTier::Top20,
            21..=30 => RankTier::Top30,
            _ => RankTier::Outside,
        }
    }

    /// Banner line shown above the message
    pub fn headline(&self, position: usize) -> String {
        match self {
            RankTier::Top10 => format!("🥇 ¡POSICIÓN #{position} EN EL TOP 10! 🥇"),
            RankTier::Top20 => format!("🥈 Posición #{position} (Top 20) 🥈"),
            RankTier::Top30 => format!("🥉 Posición #{position} (Top 30) 🥉"),
            RankTier::Outside => format!("Posición #{position}"),
        }
    }

    /// Message pool for this tier
    pub fn messages(&self) -> &'static [&'static str] {
        match self {
            RankTier::Top10 => &[
                "¡ERES UNA LEYENDA! 🏆 ¡Los demás son hormigas!",
                "¡EL MEJOR DE LOS MEJORES! 👑 ¡La realeza del Honey Smash!",
                "¡HONEY SMASH SUPREMACÍA! 🍯⚡ ¡Eres IMPARABLE!",
                "¡RAFA QUIERE SER COMO TÚ! 😎 ¡Invertiste los papeles!",
            ],
            RankTier::Top20 => &[
                "¡Muy bien, campeón! Te acercas... demasiado bien 🎯",
                "¡Casi al podio! Falta poquito, sigue así 💪",
                "¡Vas como un cohete! 🚀 ¡El top 10 tiembla!",
            ],
            RankTier::Top30 => &[
                "¡BOOM! 🎉 ¡Entraste al ranking! ¡Felicidades!",
                "¡Dentro del top 30! 📍 Ahora a escalar hacia la gloria",
                "¡RANKING: DESBLOQUEADO! 🔓 ¡Eres oficial!",
            ],
            RankTier::Outside => &[
                "Ehhhh... 🍔 Quizás necesites otra Honey... ¡o doscientas!",
                "¡OUCH! 💔 Rafa se decepcionó un poquito...",
                "¡Honey, necesitabas MIEL! 🍯 (¡Literalmente!)",
                "Que no cunda el pánico... 🚨 Todos empezamos así. ¡Vuelve!",
            ],
        }
    }

    pub fn pick_message<R: Rng + ?Sized>(&self, rng: &mut R) -> &'static str {
        let pool = self.messages();
        pool[rng.random_range(0..pool.len())]
    }
}

/// Where a finished score lands and what to say about it
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Placement {
    pub position: usize,
    pub tier: RankTier,
    pub headline: String,
    pub message: &'static str,
}

impl Placement {
    pub fn compute<R: Rng + ?Sized>(leaderboard: &Leaderboard, score: i64, rng: &mut R) -> Self {
        let position = leaderboard.position_for(score);
        let tier = RankTier::from_position(position);
        Self {
            position,
            tier,
            headline: tier.headline(position),
            message: tier.pick_message(rng),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_pcg::Pcg32;

    fn board(scores: &[i64]) -> Leaderboard {
        Leaderboard::from_entries(
            scores
                .iter()
                .enumerate()
                .map(|(i, &score)| RankingEntry {
                    name: format!("p{i}"),
                    score,
                })
                .collect(),
        )
    }

    #[test]
    fn test_position_for() {
        let lb = board(&[300, 200, 200, 100]);
        assert_eq!(lb.position_for(400), 1);
        // Ties rank below existing equal scores
        assert_eq!(lb.position_for(200), 4);
        assert_eq!(lb.position_for(150), 4);
        assert_eq!(lb.position_for(50), 5);
        assert_eq!(Leaderboard::default().position_for(0), 1);
    }

    #[test]
    fn test_negative_scores_rank() {
        let lb = board(&[10, -3]);
        assert_eq!(lb.position_for(-1), 2);
        assert_eq!(lb.position_for(-20), 3);
    }

    #[test]
    fn test_tiers() {
        assert_eq!(RankTier::from_position(1), RankTier::Top10);
        assert_eq!(RankTier::from_position(10), RankTier::Top10);
        assert_eq!(RankTier::from_position(11), RankTier::Top20);
        assert_eq!(RankTier::from_position(30), RankTier::Top30);
        assert_eq!(RankTier::from_position(31), RankTier::Outside);
        assert_eq!(RankTier::Top20.headline(12), "🥈 Posición #12 (Top 20) 🥈");
    }

    #[test]
    fn test_from_entries_sorts_and_caps() {
        let scores: Vec<i64> = (0..40).collect();
        let lb = board(&scores);
        assert_eq!(lb.entries.len(), MAX_RANKING);
        assert_eq!(lb.top_score(), Some(39));
        assert_eq!(lb.entries.last().map(|e| e.score), Some(10));
    }

    #[test]
    fn test_pages() {
        let scores: Vec<i64> = (0..25).rev().collect();
        let lb = board(&scores);
        assert_eq!(lb.total_pages(), 3);
        let third = lb.page(3);
        assert_eq!(third.len(), 5);
        assert_eq!(third[0].0, 21);
        assert!(lb.page(4).is_empty());
        assert_eq!(Leaderboard::default().total_pages(), 0);
    }

    #[test]
    fn test_podium() {
        let hof = HallOfFame::from_entries(vec![
            RankingEntry {
                name: "b".into(),
                score: 5,
            },
            RankingEntry {
                name: "a".into(),
                score: 9,
            },
        ]);
        let [gold, silver, bronze] = hof.podium();
        assert_eq!(gold.map(|e| e.name.as_str()), Some("a"));
        assert_eq!(silver.map(|e| e.name.as_str()), Some("b"));
        assert!(bronze.is_none());
    }

    #[test]
    fn test_placement_message_from_tier_pool() {
        let mut rng = Pcg32::seed_from_u64(3);
        let lb = board(&[50; 25]);
        let placement = Placement::compute(&lb, 10, &mut rng);
        assert_eq!(placement.position, 26);
        assert_eq!(placement.tier, RankTier::Top30);
        assert!(RankTier::Top30.messages().contains(&placement.message));
    }
}
