use mongodb::bson::{Binary, Bson, Document, doc, spec::BinarySubtype};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::error::MongoDaoError;
use crate::{
    dao::models::{GameEntity, GamePatch, NewGameEntity, TeamEntity},
    state::lifecycle::GameStatus,
};

/// Shape of a game inside the `games` collection; teams are embedded.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MongoGameDocument {
    #[serde(rename = "_id")]
    id: Binary,
    name: String,
    teams: Vec<TeamEntity>,
    words: Vec<String>,
    #[serde(default)]
    status: GameStatus,
}

impl MongoGameDocument {
    /// Document for a brand-new game under the freshly generated `id`.
    pub fn new(id: Uuid, game: NewGameEntity) -> Self {
        game.with_id(id).into()
    }
}

impl From<GameEntity> for MongoGameDocument {
    fn from(value: GameEntity) -> Self {
        Self {
            id: uuid_as_binary(value.id),
            name: value.name,
            teams: value.teams,
            words: value.words,
            status: value.status,
        }
    }
}

impl TryFrom<MongoGameDocument> for GameEntity {
    type Error = MongoDaoError;

    fn try_from(value: MongoGameDocument) -> Result<Self, Self::Error> {
        let id = Uuid::from_slice(&value.id.bytes).map_err(|source| {
            MongoDaoError::CorruptDocument {
                id: format!("{:?}", value.id.bytes),
                source,
            }
        })?;

        Ok(Self {
            id,
            name: value.name,
            teams: value.teams,
            words: value.words,
            status: value.status,
        })
    }
}

/// Translate a partial update into a `$set` document. Returns `None` for an empty patch.
pub fn set_document(patch: &GamePatch) -> Option<Document> {
    if patch.is_empty() {
        return None;
    }

    let mut set = Document::new();
    if let Some(name) = &patch.name {
        set.insert("name", name.clone());
    }
    if let Some(teams) = &patch.teams {
        let teams = teams
            .iter()
            .map(|team| Bson::Document(doc! { "name": team.name.clone(), "points": team.points }))
            .collect::<Vec<_>>();
        set.insert("teams", Bson::Array(teams));
    }
    if let Some(words) = &patch.words {
        let words = words
            .iter()
            .map(|word| Bson::String(word.clone()))
            .collect::<Vec<_>>();
        set.insert("words", Bson::Array(words));
    }
    if let Some(status) = patch.status {
        set.insert("status", status.as_str());
    }

    Some(doc! { "$set": set })
}

/// Encode a game identifier as a BSON UUID binary.
pub fn uuid_as_binary(id: Uuid) -> Binary {
    Binary {
        subtype: BinarySubtype::Uuid,
        bytes: id.into_bytes().to_vec(),
    }
}

/// Filter matching a single game by `_id`.
pub fn doc_id(id: Uuid) -> Document {
    doc! {"_id": uuid_as_binary(id)}
}
