//! Collision resolution.
//!
//! Double dispatch over (mover category, occupant category). Every pair is
//! spelled out below so the whole policy can be audited in one place; there is
//! no wildcard arm.

use crate::config::game::WeaponContact;
use crate::game::types::Category;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Fate {
    Survives,
    Dies,
}

/// Outcome of a mover entering an occupied cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Resolution {
    /// Whether the mover ends up on the contested cell.
    pub mover_advances: bool,
    pub mover: Fate,
    pub occupant: Fate,
}

impl Resolution {
    const BLOCKED: Resolution = Resolution {
        mover_advances: false,
        mover: Fate::Survives,
        occupant: Fate::Survives,
    };

    /// The mover dies on contact and stays where it was.
    fn mover_dies(occupant: Fate) -> Resolution {
        Resolution { mover_advances: false, mover: Fate::Dies, occupant }
    }

    /// The occupant dies; `advance` decides whether the mover takes the cell.
    fn occupant_dies(advance: bool) -> Resolution {
        Resolution { mover_advances: advance, mover: Fate::Survives, occupant: Fate::Dies }
    }
}

pub fn resolve_collision(mover: Category, occupant: Category, contact: WeaponContact) -> Resolution {
    use Category::*;

    let weapon_fate = match contact {
        WeaponContact::Persist => Fate::Survives,
        WeaponContact::Consume => Fate::Dies,
    };

    match (mover, occupant) {
        // Barriers and inert entities stop everything.
        (Player | Enemy | Weapon | Barrier | Neutral, Barrier | Neutral) => Resolution::BLOCKED,

        // Walking into a weapon is fatal.
        (Player | Enemy, Weapon) => Resolution::mover_dies(weapon_fate),

        // Walking into an enemy is fatal for the player.
        (Player, Enemy) => Resolution::mover_dies(Fate::Survives),
        // An enemy reaching the player kills it and takes the cell.
        (Enemy, Player) => Resolution::occupant_dies(true),
        // Enemies never displace each other.
        (Enemy, Enemy) => Resolution::BLOCKED,
        // There is only ever one player.
        (Player, Player) => Resolution::BLOCKED,

        // A weapon destroys an enemy without occupying its cell.
        (Weapon, Enemy) => Resolution::occupant_dies(false),
        (Weapon, Player | Weapon) => Resolution::BLOCKED,

        // Barriers and inert entities never move.
        (Barrier | Neutral, Player | Enemy | Weapon) => Resolution::BLOCKED,
    }
}
