//! Coffee rewards handed out after a successful fund.

use rand::Rng;
use serde::Serialize;

/// A cosmetic reward: a coffee name and its 24x24 SVG icon path.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct Reward {
    pub name: &'static str,
    pub icon_path: &'static str,
}

impl Reward {
    /// Caption shown under the icon.
    pub fn caption(&self) -> String {
        format!("Enjoy your {}!", self.name)
    }
}

/// The ten coffees a funder can receive.
pub static COFFEE_CATALOG: [Reward; 10] = [
    Reward {
        name: "Espresso",
        icon_path: "M12 3a9 9 0 00-9 9v7a2 2 0 002 2h14a2 2 0 002-2v-7a9 9 0 00-9-9zm0 2a7 7 0 017 7v1h-2v-1a5 5 0 00-10 0v1H5v-1a7 7 0 017-7zm-7 9h14v5H5v-5z",
    },
    Reward {
        name: "Latte",
        icon_path: "M5 5a7 7 0 0114 0v10a4 4 0 01-4 4H9a4 4 0 01-4-4V5zm2 0v10a2 2 0 002 2h6a2 2 0 002-2V5a5 5 0 00-10 0z",
    },
    Reward {
        name: "Cappuccino",
        icon_path: "M12 3a9 9 0 00-9 9v6a3 3 0 003 3h12a3 3 0 003-3v-6a9 9 0 00-9-9zm0 2a7 7 0 017 7v1h-2a1 1 0 00-1 1v2a1 1 0 001 1h2v1a1 1 0 01-1 1H6a1 1 0 01-1-1v-1h2a1 1 0 001-1v-2a1 1 0 00-1-1H5v-1a7 7 0 017-7z",
    },
    Reward {
        name: "Mocha",
        icon_path: "M6 3a6 6 0 00-6 6v8a3 3 0 003 3h12a3 3 0 003-3V9a6 6 0 00-6-6H6zm0 2h6a4 4 0 014 4v1H4v-1a4 4 0 014-4z",
    },
    Reward {
        name: "Americano",
        icon_path: "M12 2a10 10 0 00-10 10v6a4 4 0 004 4h12a4 4 0 004-4v-6A10 10 0 0012 2zm0 2a8 8 0 018 8v2H4v-2a8 8 0 018-8z",
    },
    Reward {
        name: "Macchiato",
        icon_path: "M5 4a8 8 0 0114 0v12a3 3 0 01-3 3H8a3 3 0 01-3-3V4zm2 0v12a1 1 0 001 1h8a1 1 0 001-1V4a6 6 0 00-12 0z",
    },
    Reward {
        name: "Flat White",
        icon_path: "M12 3a9 9 0 00-9 9v5a2 2 0 002 2h14a2 2 0 002-2v-5a9 9 0 00-9-9zm0 2a7 7 0 017 7v3H5v-3a7 7 0 017-7z",
    },
    Reward {
        name: "Affogato",
        icon_path: "M12 2a10 10 0 00-10 10v4a4 4 0 004 4h12a4 4 0 004-4v-4A10 10 0 0012 2zm0 2a8 8 0 018 8v1H4v-1a8 8 0 018-8z",
    },
    Reward {
        name: "Cortado",
        icon_path: "M6 4a6 6 0 00-6 6v7a3 3 0 003 3h12a3 3 0 003-3v-7a6 6 0 00-6-6H6zm0 2h6a4 4 0 014 4v1H4v-1a4 4 0 014-4z",
    },
    Reward {
        name: "Irish Coffee",
        icon_path: "M5 5a7 7 0 0114 0v10a4 4 0 01-4 4H9a4 4 0 01-4-4V5zm2 0v10a2 2 0 002 2h6a2 2 0 002-2V5a5 5 0 00-10 0zm3 2h4v2h-4V7z",
    },
];

/// Immutable table of rewards the orchestrator draws from.
#[derive(Debug, Clone, Copy)]
pub struct RewardCatalog {
    items: &'static [Reward],
}

impl RewardCatalog {
    /// Catalog over a static table. Must not be empty.
    pub fn new(items: &'static [Reward]) -> Self {
        assert!(!items.is_empty(), "reward catalog must not be empty");
        Self { items }
    }

    /// The ten-coffee catalog.
    pub fn coffee() -> Self {
        Self::new(&COFFEE_CATALOG)
    }

    /// Pick one reward uniformly at random.
    pub fn pick<R: Rng + ?Sized>(&self, rng: &mut R) -> Reward {
        self.items[rng.gen_range(0..self.items.len())]
    }

    pub fn contains(&self, reward: &Reward) -> bool {
        self.items.contains(reward)
    }

    pub fn items(&self) -> &'static [Reward] {
        self.items
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

impl Default for RewardCatalog {
    fn default() -> Self {
        Self::coffee()
    }
}
