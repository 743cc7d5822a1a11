use std::sync::Arc;

use dashmap::DashMap;
use models::{
    wine_note::{WineNote, WineNoteRequest, WineNoteResponse, PROPERTY_NOTE, PROPERTY_ORDINAL, PROPERTY_USER, PROPERTY_WINE_ID},
    ItemType,
};
use tokio::sync::Mutex;
use tracing::{debug, info, instrument};

use crate::errors::ServiceError;
use crate::gateway::RepositoryGateway;
use crate::query::{convert_all, ItemFilter, Predicate};

pub struct WineNoteService<R: RepositoryGateway + ?Sized = dyn RepositoryGateway> {
    repo: Arc<R>,
    /// Serializes batch writes per wine so ordinals stay unique within this
    /// process. Writers in other processes are not covered.
    wine_locks: DashMap<i32, Arc<Mutex<()>>>,
}

impl<R: RepositoryGateway + ?Sized> WineNoteService<R> {
    pub fn new(repo: Arc<R>) -> Self { Self { repo, wine_locks: DashMap::new() } }

    async fn notes_for_wine(&self, wine_id: i32) -> Result<Vec<models::RepositoryItem>, ServiceError> {
        self.repo
            .get_repository_items(&wine_id.to_string(), PROPERTY_WINE_ID, ItemType::WineNote)
            .await
    }

    pub async fn get_all_wine_notes(&self) -> Result<WineNoteResponse, ServiceError> {
        let items = self.repo.get_all_repository_items(ItemType::WineNote).await?;
        Ok(WineNoteResponse { wine_notes: convert_all(&items)? })
    }

    pub async fn get_wine_notes_by_user(&self, user: &str) -> Result<WineNoteResponse, ServiceError> {
        let items = self.repo.get_repository_items(user, PROPERTY_USER, ItemType::WineNote).await?;
        Ok(WineNoteResponse { wine_notes: convert_all(&items)? })
    }

    pub async fn get_wine_notes_by_wine_id(&self, wine_id: i32) -> Result<WineNoteResponse, ServiceError> {
        let items = self.notes_for_wine(wine_id).await?;
        Ok(WineNoteResponse { wine_notes: convert_all(&items)? })
    }

    pub async fn get_wine_notes_by_wine_id_by_user(&self, wine_id: i32, user: &str) -> Result<WineNoteResponse, ServiceError> {
        let items = self.notes_for_wine(wine_id).await?;
        let items = ItemFilter::all(vec![Predicate::equals(PROPERTY_USER, user)]).apply(items);
        Ok(WineNoteResponse { wine_notes: convert_all(&items)? })
    }

    /// Insert the request's new notes after the wine's current highest
    /// ordinal, apply its upserts to notes that existed before the call, and
    /// return every note of the wine afterwards.
    ///
    /// Upsert ids are parsed before anything is written, so a malformed id
    /// rejects the whole request.
    #[instrument(skip(self, request), fields(wine_id = request.wine_id, new = request.wine_notes.len(), upserts = request.upsert.len()))]
    pub async fn add_wine_notes(&self, request: &WineNoteRequest) -> Result<WineNoteResponse, ServiceError> {
        let upserts = request
            .upsert
            .iter()
            .map(|u| u.parsed_id().map(|id| (id, u.note.as_str())))
            .collect::<Result<Vec<_>, _>>()?;

        let lock = self.wine_locks.entry(request.wine_id).or_default().clone();
        let _guard = lock.lock().await;

        let existing = self.notes_for_wine(request.wine_id).await?;
        let mut max_ordinal = existing
            .iter()
            .map(|item| item.int(PROPERTY_ORDINAL))
            .collect::<Result<Vec<_>, _>>()?
            .into_iter()
            .max()
            .unwrap_or(-1);

        for note in &request.wine_notes {
            max_ordinal += 1;
            let mut item = self.repo.create_item(ItemType::WineNote);
            request.apply_to(&mut item, note, max_ordinal);
            self.repo.add_item(item).await?;
        }

        for mut item in existing {
            let id = item.require_id()?;
            if let Some((_, note)) = upserts.iter().find(|(upsert_id, _)| *upsert_id == id) {
                debug!(id, "upserting note");
                item.set_property(PROPERTY_NOTE, *note);
                self.repo.update_item(item, PROPERTY_NOTE).await?;
            }
        }

        let items = self.notes_for_wine(request.wine_id).await?;
        let response = WineNoteResponse { wine_notes: convert_all(&items)? };
        info!(total = response.wine_notes.len(), last_ordinal = max_ordinal, "wine_notes_added");
        Ok(response)
    }
}
