use serde::{Deserialize, Serialize};

///
/// Direction
///
/// Canonical per-field sort direction shared by field descriptors, predicate
/// synthesis, and order-by mutation.
///

#[derive(Clone, Copy, Debug, Default, Deserialize, Eq, PartialEq, Serialize)]
pub enum Direction {
    #[default]
    Asc,
    Desc,
}

impl Direction {
    /// Flip `Asc` to `Desc` and vice versa.
    ///
    /// Used when an incoming `before`-only cursor forces the order-by to be
    /// walked in reverse (see [`crate::query::reverse_order`]).
    #[must_use]
    pub const fn flip(self) -> Self {
        match self {
            Self::Asc => Self::Desc,
            Self::Desc => Self::Asc,
        }
    }
}

impl std::fmt::Display for Direction {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Asc => write!(f, "asc"),
            Self::Desc => write!(f, "desc"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::Direction;

    #[test]
    fn flip_is_involutive() {
        assert_eq!(Direction::Asc.flip(), Direction::Desc);
        assert_eq!(Direction::Desc.flip(), Direction::Asc);
        assert_eq!(Direction::Asc.flip().flip(), Direction::Asc);
    }
}
