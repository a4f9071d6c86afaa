use crate::{
    dao::{
        catalog_store::{CollectionName, Filter},
        models::ExperienceLevelEntity,
    },
    dto::experience::ExperienceLevelResponse,
    error::ServiceError,
    services::decode::decode,
    state::SharedState,
};

/// Return the experience level with the given integer id, if any.
pub async fn get_experience_level(
    state: &SharedState,
    id: i64,
) -> Result<Option<ExperienceLevelResponse>, ServiceError> {
    let collection = CollectionName::ExperienceLevels;
    let document = state
        .store()
        .find_one(collection, Filter::by_id(id))
        .await?;

    document
        .map(|document| {
            decode(collection, &document, ExperienceLevelEntity::from_document).map(Into::into)
        })
        .transpose()
}
