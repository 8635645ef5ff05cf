use serde::{Deserialize, Serialize};

use crate::ids::{Address, ChainId, DaoId};

/// DAO-level fields that eligibility rules read.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct DaoSnapshot {
    pub id: DaoId,
    pub chain: ChainId,
    /// Minimum voting power a sponsor must keep for a sponsored proposal to
    /// stay protected from third-party cancellation
    #[serde(default)]
    pub sponsor_threshold: u128,
    #[serde(default)]
    pub shamans: Vec<Shaman>,
}

/// A privileged contract or account registered with the DAO.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Shaman {
    pub address: Address,
    pub permissions: ShamanPermissions,
}

/// Permission bitmask granted to a shaman.
///
/// Bit 0: admin, bit 1: manager, bit 2: governor.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ShamanPermissions(pub u8);

impl ShamanPermissions {
    pub const ADMIN: u8 = 0b001;
    pub const MANAGER: u8 = 0b010;
    pub const GOVERNOR: u8 = 0b100;

    pub fn is_admin(self) -> bool {
        self.0 & Self::ADMIN != 0
    }

    pub fn is_manager(self) -> bool {
        self.0 & Self::MANAGER != 0
    }

    pub fn is_governor(self) -> bool {
        self.0 & Self::GOVERNOR != 0
    }
}

impl DaoSnapshot {
    pub fn new(id: DaoId, chain: ChainId) -> Self {
        Self {
            id,
            chain,
            sponsor_threshold: 0,
            shamans: Vec::new(),
        }
    }

    /// Whether `address` is registered as a shaman holding governor permission.
    pub fn is_governor_shaman(&self, address: &Address) -> bool {
        self.shamans
            .iter()
            .any(|shaman| shaman.address == *address && shaman.permissions.is_governor())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn governor_bit_detection() {
        assert!(ShamanPermissions(4).is_governor());
        assert!(ShamanPermissions(7).is_governor());
        assert!(!ShamanPermissions(3).is_governor());
        assert!(ShamanPermissions(3).is_admin());
        assert!(ShamanPermissions(3).is_manager());
    }

    #[test]
    fn governor_shaman_lookup_ignores_case() {
        let mut dao = DaoSnapshot::new(DaoId::new("0xdao"), ChainId::new("0x64"));
        dao.shamans.push(Shaman {
            address: Address::new("0xGOV"),
            permissions: ShamanPermissions(ShamanPermissions::GOVERNOR),
        });
        dao.shamans.push(Shaman {
            address: Address::new("0xadmin"),
            permissions: ShamanPermissions(ShamanPermissions::ADMIN),
        });

        assert!(dao.is_governor_shaman(&Address::new("0xgov")));
        assert!(!dao.is_governor_shaman(&Address::new("0xadmin")));
        assert!(!dao.is_governor_shaman(&Address::new("0xstranger")));
    }
}
