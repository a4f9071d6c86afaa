use tracing::{info, warn};

use crate::{
    dao::{
        catalog_store::{CollectionName, Filter},
        models::TipEntity,
        object_id::parse_id,
    },
    dto::tip::{TipResponse, TipsQuery},
    error::ServiceError,
    services::decode::{decode, decode_all},
    state::SharedState,
};

const COLLECTION: CollectionName = CollectionName::Tips;

/// Return the tips matching the supplied filters, in store order.
pub async fn list_tips(
    state: &SharedState,
    query: TipsQuery,
) -> Result<Vec<TipResponse>, ServiceError> {
    let filter = tip_filter(&query)?;
    let documents = state.store().find_many(COLLECTION, filter).await?;
    decode_all(COLLECTION, &documents, TipEntity::from_document)
}

/// Return the tip with the given identifier, if any.
pub async fn get_tip(
    state: &SharedState,
    raw_id: &str,
) -> Result<Option<TipResponse>, ServiceError> {
    let id = parse_id(raw_id)?;
    let document = state
        .store()
        .find_one(COLLECTION, Filter::by_id(id))
        .await?;

    document
        .map(|document| decode(COLLECTION, &document, TipEntity::from_document).map(Into::into))
        .transpose()
}

/// Add one like to a tip and return it as persisted afterwards.
pub async fn like_tip(state: &SharedState, raw_id: &str) -> Result<TipResponse, ServiceError> {
    let id = parse_id(raw_id)?;
    let store = state.store();

    let modified = store
        .increment_field(COLLECTION, Filter::by_id(id), TipEntity::LIKES_FIELD, 1)
        .await?;

    if modified == 0 {
        // The increment alone cannot tell a missing tip from a no-op update.
        let exists = store
            .find_one(COLLECTION, Filter::by_id(id))
            .await?
            .is_some();
        if exists {
            warn!(tip_id = %id, "like increment reported no modification");
            return Err(ServiceError::NotModified(format!(
                "Tip with ID {id} has not been modified"
            )));
        }
        return Err(ServiceError::NotFound(format!("Tip with ID {id} not found")));
    }

    let Some(document) = store.find_one(COLLECTION, Filter::by_id(id)).await? else {
        return Err(ServiceError::NotFound(format!("Tip with ID {id} not found")));
    };

    let tip = decode(COLLECTION, &document, TipEntity::from_document)?;
    info!(tip_id = %id, likes = tip.likes, "tip liked");
    Ok(tip.into())
}

/// Build the `tips` filter from the parameters that were actually supplied.
///
/// `spoiler_free=false` and `experience=0` are never filtered on, so they
/// behave like omitting the parameter.
fn tip_filter(query: &TipsQuery) -> Result<Filter, ServiceError> {
    let mut filter = Filter::all();

    if let Some(raw) = query.game_id.as_deref() {
        filter = filter.eq("game_id", parse_id(raw)?);
    }

    if let Some(experience) = query.experience.filter(|&level| level != 0) {
        filter = filter.eq("experience_id", experience);
    }

    if query.spoiler_free {
        filter = filter.eq("spoiler_free", true);
    }

    Ok(filter)
}

#[cfg(test)]
mod tests {
    use super::*;
    use mongodb::bson::{doc, oid::ObjectId};

    #[test]
    fn no_parameters_means_no_conditions() {
        let filter = tip_filter(&TipsQuery::default()).unwrap();
        assert!(filter.conditions().is_empty());
    }

    #[test]
    fn spoiler_free_false_is_not_filtered() {
        let query = TipsQuery {
            spoiler_free: false,
            ..TipsQuery::default()
        };
        assert_eq!(tip_filter(&query).unwrap(), Filter::all());

        let query = TipsQuery {
            spoiler_free: true,
            ..TipsQuery::default()
        };
        assert_eq!(
            tip_filter(&query).unwrap().to_document(),
            doc! { "spoiler_free": true }
        );
    }

    #[test]
    fn every_supplied_parameter_becomes_a_condition() {
        let game = "64c3c941d54e7b39dc4b1d6d";
        let query = TipsQuery {
            game_id: Some(game.into()),
            experience: Some(2),
            spoiler_free: true,
        };

        assert_eq!(
            tip_filter(&query).unwrap().to_document(),
            doc! {
                "game_id": ObjectId::parse_str(game).unwrap(),
                "experience_id": 2_i64,
                "spoiler_free": true,
            }
        );
    }

    #[test]
    fn experience_zero_is_not_filtered() {
        let query = TipsQuery {
            experience: Some(0),
            ..TipsQuery::default()
        };
        assert_eq!(tip_filter(&query).unwrap(), Filter::all());
    }

    #[test]
    fn malformed_game_id_is_rejected() {
        for raw in ["", "abc", "64C3C941D54E7B39DC4B1D6D"] {
            let query = TipsQuery {
                game_id: Some(raw.into()),
                ..TipsQuery::default()
            };
            assert!(matches!(
                tip_filter(&query),
                Err(ServiceError::InvalidId(_))
            ));
        }
    }
}
