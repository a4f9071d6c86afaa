use crate::{
    dao::{
        catalog_store::{CollectionName, Filter},
        models::GameEntity,
        object_id::parse_id,
    },
    dto::game::GameResponse,
    error::ServiceError,
    services::decode::{decode, decode_all},
    state::SharedState,
};

/// Return every game in store order.
pub async fn list_games(state: &SharedState) -> Result<Vec<GameResponse>, ServiceError> {
    let collection = CollectionName::Games;
    let documents = state.store().find_many(collection, Filter::all()).await?;
    decode_all(collection, &documents, GameEntity::from_document)
}

/// Return the game with the given identifier, if any.
pub async fn get_game(
    state: &SharedState,
    raw_id: &str,
) -> Result<Option<GameResponse>, ServiceError> {
    let id = parse_id(raw_id)?;
    let collection = CollectionName::Games;
    let document = state
        .store()
        .find_one(collection, Filter::by_id(id))
        .await?;

    document
        .map(|document| decode(collection, &document, GameEntity::from_document).map(Into::into))
        .transpose()
}
