//! Tile identities, artefacts and zone roles.
//!
//! The island is made of 24 unique tiles. A tile's identity fixes its role:
//! the helicopter pad, one of the five other start gates, one of the two
//! shrines of an artefact, or an ordinary location.

use serde::{Deserialize, Serialize};

use crate::core::Role;

/// One of the four collectible artefacts.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Artefact {
    EarthStone,
    StatueOfTheWind,
    CrystalOfFire,
    OceansChalice,
}

impl Artefact {
    pub const ALL: [Artefact; 4] = [
        Artefact::EarthStone,
        Artefact::StatueOfTheWind,
        Artefact::CrystalOfFire,
        Artefact::OceansChalice,
    ];

    /// The two tiles this artefact can be claimed on.
    #[must_use]
    pub const fn tiles(self) -> [TileId; 2] {
        match self {
            Artefact::EarthStone => [TileId::TempleOfTheMoon, TileId::TempleOfTheSun],
            Artefact::StatueOfTheWind => [TileId::HowlingGarden, TileId::WhisperingGarden],
            Artefact::CrystalOfFire => [TileId::CaveOfEmbers, TileId::CaveOfShadows],
            Artefact::OceansChalice => [TileId::CoralPalace, TileId::TidalPalace],
        }
    }

    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Artefact::EarthStone => "Earth Stone",
            Artefact::StatueOfTheWind => "Statue of the Wind",
            Artefact::CrystalOfFire => "Crystal of Fire",
            Artefact::OceansChalice => "Ocean's Chalice",
        }
    }
}

impl std::fmt::Display for Artefact {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

/// What a zone is for, fixed by its tile.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ZoneRole {
    Casual,
    /// Fools' Landing. Also where the Pilot starts.
    Helicopter,
    PlayerStart(Role),
    ArtefactAssociated(Artefact),
}

/// The 24 unique island tiles.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum TileId {
    BreakersBridge,
    BronzeGate,
    CaveOfEmbers,
    CaveOfShadows,
    CliffsOfAbandon,
    CopperGate,
    CoralPalace,
    CrimsonForest,
    DunesOfDeception,
    FoolsLanding,
    GoldGate,
    HowlingGarden,
    IronGate,
    LostLagoon,
    MistyMarsh,
    Observatory,
    PhantomRock,
    SilverGate,
    TempleOfTheMoon,
    TempleOfTheSun,
    TidalPalace,
    TwilightHollow,
    Watchtower,
    WhisperingGarden,
}

impl TileId {
    pub const COUNT: usize = 24;

    pub const ALL: [TileId; Self::COUNT] = [
        TileId::BreakersBridge,
        TileId::BronzeGate,
        TileId::CaveOfEmbers,
        TileId::CaveOfShadows,
        TileId::CliffsOfAbandon,
        TileId::CopperGate,
        TileId::CoralPalace,
        TileId::CrimsonForest,
        TileId::DunesOfDeception,
        TileId::FoolsLanding,
        TileId::GoldGate,
        TileId::HowlingGarden,
        TileId::IronGate,
        TileId::LostLagoon,
        TileId::MistyMarsh,
        TileId::Observatory,
        TileId::PhantomRock,
        TileId::SilverGate,
        TileId::TempleOfTheMoon,
        TileId::TempleOfTheSun,
        TileId::TidalPalace,
        TileId::TwilightHollow,
        TileId::Watchtower,
        TileId::WhisperingGarden,
    ];

    /// Role of the zone holding this tile.
    #[must_use]
    pub fn role(self) -> ZoneRole {
        if self == TileId::FoolsLanding {
            return ZoneRole::Helicopter;
        }
        if let Some(role) = Role::ALL.into_iter().find(|r| r.start_tile() == self) {
            return ZoneRole::PlayerStart(role);
        }
        if let Some(artefact) = Artefact::ALL.into_iter().find(|a| a.tiles().contains(&self)) {
            return ZoneRole::ArtefactAssociated(artefact);
        }
        ZoneRole::Casual
    }

    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            TileId::BreakersBridge => "Breakers Bridge",
            TileId::BronzeGate => "Bronze Gate",
            TileId::CaveOfEmbers => "Cave of Embers",
            TileId::CaveOfShadows => "Cave of Shadows",
            TileId::CliffsOfAbandon => "Cliffs of Abandon",
            TileId::CopperGate => "Copper Gate",
            TileId::CoralPalace => "Coral Palace",
            TileId::CrimsonForest => "Crimson Forest",
            TileId::DunesOfDeception => "Dunes of Deception",
            TileId::FoolsLanding => "Fools' Landing",
            TileId::GoldGate => "Gold Gate",
            TileId::HowlingGarden => "Howling Garden",
            TileId::IronGate => "Iron Gate",
            TileId::LostLagoon => "Lost Lagoon",
            TileId::MistyMarsh => "Misty Marsh",
            TileId::Observatory => "Observatory",
            TileId::PhantomRock => "Phantom Rock",
            TileId::SilverGate => "Silver Gate",
            TileId::TempleOfTheMoon => "Temple of the Moon",
            TileId::TempleOfTheSun => "Temple of the Sun",
            TileId::TidalPalace => "Tidal Palace",
            TileId::TwilightHollow => "Twilight Hollow",
            TileId::Watchtower => "Watchtower",
            TileId::WhisperingGarden => "Whispering Garden",
        }
    }
}

impl std::fmt::Display for TileId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_all_tiles_unique() {
        let mut tiles = TileId::ALL.to_vec();
        tiles.sort();
        tiles.dedup();
        assert_eq!(tiles.len(), TileId::COUNT);
    }

    #[test]
    fn test_role_counts() {
        let roles: Vec<_> = TileId::ALL.iter().map(|t| t.role()).collect();

        let helicopters = roles.iter().filter(|r| **r == ZoneRole::Helicopter).count();
        let starts = roles
            .iter()
            .filter(|r| matches!(r, ZoneRole::PlayerStart(_)))
            .count();
        let shrines = roles
            .iter()
            .filter(|r| matches!(r, ZoneRole::ArtefactAssociated(_)))
            .count();

        assert_eq!(helicopters, 1);
        assert_eq!(starts, 5);
        assert_eq!(shrines, 8);
    }

    #[test]
    fn test_pilot_starts_on_helicopter_pad() {
        assert_eq!(Role::Pilot.start_tile().role(), ZoneRole::Helicopter);
        assert_eq!(
            TileId::IronGate.role(),
            ZoneRole::PlayerStart(Role::Diver)
        );
    }

    #[test]
    fn test_artefact_tiles() {
        for artefact in Artefact::ALL {
            for tile in artefact.tiles() {
                assert_eq!(tile.role(), ZoneRole::ArtefactAssociated(artefact));
            }
        }
    }
}
