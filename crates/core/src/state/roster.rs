//! Players of a match in join order.

use std::fmt;

use serde::de::{MapAccess, Visitor};
use serde::ser::SerializeMap;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

use super::Role;

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Player {
    name: String,
    role: Role,
}

impl Player {
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn role(&self) -> Role {
        self.role
    }

    pub(crate) fn assign(&mut self, role: Role) {
        self.role = role;
    }
}

/// Ordered name → role mapping.
///
/// Serializes as a JSON object whose key order is the join order, so a record
/// decoded and re-encoded produces the same bytes.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Roster {
    players: Vec<Player>,
}

impl Roster {
    pub fn len(&self) -> usize {
        self.players.len()
    }

    pub fn is_empty(&self) -> bool {
        self.players.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Player> {
        self.players.iter()
    }

    pub fn names(&self) -> impl Iterator<Item = &str> + '_ {
        self.players.iter().map(Player::name)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.get(name).is_some()
    }

    pub fn get(&self, name: &str) -> Option<&Player> {
        self.players.iter().find(|p| p.name == name)
    }

    pub fn role_of(&self, name: &str) -> Option<Role> {
        self.get(name).map(Player::role)
    }

    /// Appends a citizen. Returns false if the name is already present.
    pub(crate) fn insert(&mut self, name: String, role: Role) -> bool {
        if self.contains(&name) {
            return false;
        }
        self.players.push(Player { name, role });
        true
    }

    pub(crate) fn players_mut(&mut self) -> &mut [Player] {
        &mut self.players
    }
}

impl<'a> IntoIterator for &'a Roster {
    type Item = &'a Player;
    type IntoIter = std::slice::Iter<'a, Player>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl Serialize for Roster {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        let mut map = serializer.serialize_map(Some(self.players.len()))?;
        for player in &self.players {
            map.serialize_entry(&player.name, &player.role)?;
        }
        map.end()
    }
}

impl<'de> Deserialize<'de> for Roster {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        struct RosterVisitor;

        impl<'de> Visitor<'de> for RosterVisitor {
            type Value = Roster;

            fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str("a map of player name to role")
            }

            fn visit_map<A>(self, mut access: A) -> Result<Roster, A::Error>
            where
                A: MapAccess<'de>,
            {
                let mut roster = Roster::default();
                while let Some((name, role)) = access.next_entry::<String, Role>()? {
                    if !roster.insert(name.clone(), role) {
                        return Err(serde::de::Error::custom(format!(
                            "duplicate player {name}"
                        )));
                    }
                }
                Ok(roster)
            }
        }

        deserializer.deserialize_map(RosterVisitor)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn serializes_in_join_order() {
        let mut roster = Roster::default();
        for name in ["Qux", "Foo", "Bar"] {
            assert!(roster.insert(name.into(), Role::Citizen));
        }

        let json = serde_json::to_string(&roster).unwrap();
        assert_eq!(json, r#"{"Qux":"citizen","Foo":"citizen","Bar":"citizen"}"#);

        let decoded: Roster = serde_json::from_str(&json).unwrap();
        assert_eq!(decoded.names().collect::<Vec<_>>(), ["Qux", "Foo", "Bar"]);
    }

    #[test]
    fn rejects_duplicate_keys() {
        let result: Result<Roster, _> = serde_json::from_str(r#"{"Foo":"wolf","Foo":"citizen"}"#);
        assert!(result.is_err());
    }
}
