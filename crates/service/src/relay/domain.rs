use std::fmt;

use serde::{Deserialize, Serialize};

/// Notification that an image for a wine is ready to move.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct WineImageTransfer {
    pub name: String,
    pub data: String,
}

impl WineImageTransfer {
    /// The copy published to the second routing key.
    pub fn mutate(&self) -> Self {
        Self {
            name: format!("{} name 222", self.name),
            data: format!("{} key2", self.data),
        }
    }
}

impl fmt::Display for WineImageTransfer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "WineImageTransfer(name={}, data={})", self.name, self.data)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn mutate_appends_suffixes_without_touching_original() {
        let t = WineImageTransfer { name: "n".into(), data: "d".into() };
        let m = t.mutate();
        assert_eq!(m, WineImageTransfer { name: "n name 222".into(), data: "d key2".into() });
        assert_eq!(t.name, "n");
    }
}
