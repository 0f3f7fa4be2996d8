//! Typed access to stored documents.

use doc_store::{Collection, Document, DocumentStore};
use entities::{MealConfirmation, User};
use serde::de::DeserializeOwned;
use tracing::warn;

use crate::CanteenResult;

/// Parses documents, skipping and logging the ones that do not match `T`.
pub(crate) fn parse_valid<T: DeserializeOwned>(collection: Collection, docs: &[Document]) -> Vec<T> {
    docs.iter()
        .filter_map(|doc| match doc.parse::<T>() {
            Ok(value) => Some(value),
            Err(e) => {
                warn!(%collection, id = %doc.id, error = %e, "Skipping malformed document");
                None
            }
        })
        .collect()
}

/// Loads every confirmation record.
pub(crate) async fn all_confirmations(
    store: &dyn DocumentStore,
) -> CanteenResult<Vec<MealConfirmation>> {
    let docs = store.get_all(Collection::Confirmations).await?;
    Ok(parse_valid(Collection::Confirmations, &docs))
}

/// Loads every user.
pub(crate) async fn all_users(store: &dyn DocumentStore) -> CanteenResult<Vec<User>> {
    let docs = store.get_all(Collection::Users).await?;
    Ok(parse_valid(Collection::Users, &docs))
}

#[cfg(test)]
mod tests {
    use doc_store::to_fields;
    use serde_json::json;

    use super::*;

    #[test]
    fn test_malformed_documents_are_skipped() {
        let docs = vec![
            Document::new(
                "emp1-2024-05-06",
                to_fields("emp1-2024-05-06", &json!({"userId": "emp1", "date": "2024-05-06"}))
                    .unwrap(),
            ),
            Document::new("broken", to_fields("broken", &json!({"date": "yesterday"})).unwrap()),
        ];

        let parsed: Vec<MealConfirmation> = parse_valid(Collection::Confirmations, &docs);
        assert_eq!(parsed.len(), 1);
        assert_eq!(parsed[0].user_id, "emp1");
    }
}
