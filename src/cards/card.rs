//! Treasure deck cards.

use serde::{Deserialize, Serialize};

use crate::board::Artefact;

/// Copies of each artefact's treasure card.
pub const TREASURE_CARDS_PER_ARTEFACT: usize = 5;
pub const HELICOPTER_LIFT_CARDS: usize = 3;
pub const SANDBAGS_CARDS: usize = 2;
/// Water Rise cards shuffled in once the opening hands are dealt.
pub const WATER_RISE_CARDS: usize = 3;
/// Treasure cards of one kind needed to claim its artefact.
pub const CARDS_TO_CLAIM: usize = 4;

/// A card of the treasure deck.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum TreasureCard {
    Treasure(Artefact),
    HelicopterLift,
    Sandbags,
    WaterRise,
}

impl TreasureCard {
    /// Counts toward claiming an artefact and may be given away.
    #[must_use]
    pub const fn is_treasure(self) -> bool {
        matches!(self, TreasureCard::Treasure(_))
    }

    /// Playable outside the action budget.
    #[must_use]
    pub const fn is_action_card(self) -> bool {
        matches!(self, TreasureCard::HelicopterLift | TreasureCard::Sandbags)
    }

    /// The 25 cards dealt from before Water Rise cards are added.
    #[must_use]
    pub fn starting_set() -> Vec<TreasureCard> {
        let treasures = Artefact::ALL.len() * TREASURE_CARDS_PER_ARTEFACT;
        let mut cards = Vec::with_capacity(treasures + HELICOPTER_LIFT_CARDS + SANDBAGS_CARDS);
        for artefact in Artefact::ALL {
            let card = TreasureCard::Treasure(artefact);
            cards.extend(std::iter::repeat(card).take(TREASURE_CARDS_PER_ARTEFACT));
        }
        cards.extend(std::iter::repeat(TreasureCard::HelicopterLift).take(HELICOPTER_LIFT_CARDS));
        cards.extend(std::iter::repeat(TreasureCard::Sandbags).take(SANDBAGS_CARDS));
        cards
    }
}

impl std::fmt::Display for TreasureCard {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            TreasureCard::Treasure(a) => write!(f, "{}", a),
            TreasureCard::HelicopterLift => f.write_str("Helicopter Lift"),
            TreasureCard::Sandbags => f.write_str("Sandbags"),
            TreasureCard::WaterRise => f.write_str("Water Rise"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_starting_set() {
        let cards = TreasureCard::starting_set();
        assert_eq!(cards.len(), 25);
        assert_eq!(cards.iter().filter(|c| c.is_treasure()).count(), 20);
        assert_eq!(
            cards.iter().filter(|&&c| c == TreasureCard::HelicopterLift).count(),
            3
        );
        assert_eq!(cards.iter().filter(|&&c| c == TreasureCard::Sandbags).count(), 2);
        assert!(!cards.contains(&TreasureCard::WaterRise));
    }

    #[test]
    fn test_classification() {
        let fire = TreasureCard::Treasure(Artefact::CrystalOfFire);
        assert!(fire.is_treasure());
        assert!(!fire.is_action_card());

        assert!(TreasureCard::Sandbags.is_action_card());
        assert!(!TreasureCard::WaterRise.is_action_card());
        assert!(!TreasureCard::WaterRise.is_treasure());
    }
}
