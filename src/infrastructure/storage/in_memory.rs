//! In-memory storage implementation
//!
//! Mirrors the PostgreSQL backend: sequential ids, soft delete, and
//! relations that resolve to `None` once their target is deleted. Data is
//! lost when the process terminates.

use std::collections::BTreeMap;
use std::sync::{RwLock, RwLockReadGuard, RwLockWriteGuard};

use async_trait::async_trait;
use chrono::Utc;

use crate::domain::comment::{Comment, CommentRepository, CommentWithRelations};
use crate::domain::photo::{Photo, PhotoContent, PhotoRepository, PhotoWithOwner};
use crate::domain::social_media::{
    SocialMedia, SocialMediaContent, SocialMediaRepository, SocialMediaWithOwner,
};
use crate::domain::user::{NewUser, User, UserRepository, UserSummary};
use crate::domain::{CommentId, DomainError, PhotoId, SocialMediaId, UserId};

#[derive(Debug, Clone)]
struct Row<T> {
    record: T,
    deleted: bool,
}

/// Id-keyed table whose reads only ever see rows that are not soft-deleted
#[derive(Debug, Clone)]
pub struct SoftDeleteTable<T> {
    rows: BTreeMap<i64, Row<T>>,
    last_id: i64,
}

impl<T> Default for SoftDeleteTable<T> {
    fn default() -> Self {
        Self {
            rows: BTreeMap::new(),
            last_id: 0,
        }
    }
}

impl<T> SoftDeleteTable<T> {
    /// Insert the record built from the next sequential id
    pub fn insert_with(&mut self, build: impl FnOnce(i64) -> T) -> &T {
        self.last_id += 1;
        let id = self.last_id;
        let row = self.rows.entry(id).or_insert(Row {
            record: build(id),
            deleted: false,
        });
        &row.record
    }

    pub fn get(&self, id: i64) -> Option<&T> {
        self.rows
            .get(&id)
            .filter(|row| !row.deleted)
            .map(|row| &row.record)
    }

    /// Replace a live row; returns false when there is none
    pub fn replace(&mut self, id: i64, record: T) -> bool {
        match self.rows.get_mut(&id) {
            Some(row) if !row.deleted => {
                row.record = record;
                true
            }
            _ => false,
        }
    }

    /// Mark a live row deleted; returns false when there is none
    pub fn soft_delete(&mut self, id: i64) -> bool {
        match self.rows.get_mut(&id) {
            Some(row) if !row.deleted => {
                row.deleted = true;
                true
            }
            _ => false,
        }
    }

    /// Live rows in id order
    pub fn live(&self) -> impl Iterator<Item = &T> {
        self.rows
            .values()
            .filter(|row| !row.deleted)
            .map(|row| &row.record)
    }
}

#[derive(Debug, Default)]
struct Tables {
    users: SoftDeleteTable<User>,
    photos: SoftDeleteTable<Photo>,
    comments: SoftDeleteTable<Comment>,
    social_medias: SoftDeleteTable<SocialMedia>,
}

impl Tables {
    fn owner(&self, id: UserId) -> Option<UserSummary> {
        self.users.get(id.value()).map(User::summary)
    }

    fn email_in_use(&self, email: &str, except: Option<UserId>) -> bool {
        self.users
            .live()
            .any(|user| user.email() == email && Some(user.id()) != except)
    }
}

/// Thread-safe in-memory backend implementing every repository trait
#[derive(Debug, Default)]
pub struct InMemoryStore {
    tables: RwLock<Tables>,
}

impl InMemoryStore {
    /// Creates a new empty store
    pub fn new() -> Self {
        Self::default()
    }

    fn read(&self) -> Result<RwLockReadGuard<'_, Tables>, DomainError> {
        self.tables
            .read()
            .map_err(|e| DomainError::storage(format!("Failed to acquire read lock: {}", e)))
    }

    fn write(&self) -> Result<RwLockWriteGuard<'_, Tables>, DomainError> {
        self.tables
            .write()
            .map_err(|e| DomainError::storage(format!("Failed to acquire write lock: {}", e)))
    }
}

#[async_trait]
impl UserRepository for InMemoryStore {
    async fn create(&self, user: NewUser) -> Result<User, DomainError> {
        let mut tables = self.write()?;

        if tables.email_in_use(&user.email, None) {
            return Err(DomainError::conflict(format!(
                "email {} already registered",
                user.email
            )));
        }

        let now = Utc::now();
        let created = tables
            .users
            .insert_with(|id| User::from_parts(UserId::new(id), user, now, now));
        Ok(created.clone())
    }

    async fn get(&self, id: UserId) -> Result<Option<User>, DomainError> {
        Ok(self.read()?.users.get(id.value()).cloned())
    }

    async fn get_by_email(&self, email: &str) -> Result<Option<User>, DomainError> {
        Ok(self
            .read()?
            .users
            .live()
            .find(|user| user.email() == email)
            .cloned())
    }

    async fn update(&self, user: &User) -> Result<User, DomainError> {
        let mut tables = self.write()?;

        let mut updated = tables
            .users
            .get(user.id().value())
            .cloned()
            .ok_or_else(|| DomainError::not_found(format!("user {} not found", user.id())))?;

        if tables.email_in_use(user.email(), Some(user.id())) {
            return Err(DomainError::conflict(format!(
                "email {} already registered",
                user.email()
            )));
        }

        updated.set_profile(user.email(), user.username());
        tables.users.replace(user.id().value(), updated.clone());
        Ok(updated)
    }

    async fn soft_delete(&self, id: UserId) -> Result<bool, DomainError> {
        Ok(self.write()?.users.soft_delete(id.value()))
    }
}

#[async_trait]
impl PhotoRepository for InMemoryStore {
    async fn create(&self, owner: UserId, content: PhotoContent) -> Result<Photo, DomainError> {
        let now = Utc::now();
        let mut tables = self.write()?;

        let created = tables
            .photos
            .insert_with(|id| Photo::from_parts(PhotoId::new(id), owner, content, now, now));
        Ok(created.clone())
    }

    async fn get(&self, id: PhotoId) -> Result<Option<Photo>, DomainError> {
        Ok(self.read()?.photos.get(id.value()).cloned())
    }

    async fn list_by_user(&self, user_id: UserId) -> Result<Vec<PhotoWithOwner>, DomainError> {
        let tables = self.read()?;

        Ok(tables
            .photos
            .live()
            .filter(|photo| photo.user_id() == user_id)
            .map(|photo| PhotoWithOwner {
                photo: photo.clone(),
                user: tables.owner(photo.user_id()),
            })
            .collect())
    }

    async fn update(&self, photo: &Photo) -> Result<Photo, DomainError> {
        let mut tables = self.write()?;

        let mut updated = tables
            .photos
            .get(photo.id().value())
            .cloned()
            .ok_or_else(|| DomainError::not_found(format!("photo {} not found", photo.id())))?;

        updated.apply(photo.content().clone());
        tables.photos.replace(photo.id().value(), updated.clone());
        Ok(updated)
    }

    async fn soft_delete(&self, id: PhotoId) -> Result<bool, DomainError> {
        Ok(self.write()?.photos.soft_delete(id.value()))
    }
}

#[async_trait]
impl CommentRepository for InMemoryStore {
    async fn create(
        &self,
        owner: UserId,
        photo_id: PhotoId,
        message: String,
    ) -> Result<Comment, DomainError> {
        let now = Utc::now();
        let mut tables = self.write()?;

        let created = tables.comments.insert_with(|id| {
            Comment::from_parts(CommentId::new(id), owner, photo_id, message, now, now)
        });
        Ok(created.clone())
    }

    async fn get(&self, id: CommentId) -> Result<Option<Comment>, DomainError> {
        Ok(self.read()?.comments.get(id.value()).cloned())
    }

    async fn list_by_photo(
        &self,
        photo_id: PhotoId,
    ) -> Result<Vec<CommentWithRelations>, DomainError> {
        let tables = self.read()?;

        Ok(tables
            .comments
            .live()
            .filter(|comment| comment.photo_id() == photo_id)
            .map(|comment| CommentWithRelations {
                comment: comment.clone(),
                user: tables.owner(comment.user_id()),
                photo: tables.photos.get(photo_id.value()).map(Photo::summary),
            })
            .collect())
    }

    async fn update(&self, comment: &Comment) -> Result<Comment, DomainError> {
        let mut tables = self.write()?;

        let mut updated = tables
            .comments
            .get(comment.id().value())
            .cloned()
            .ok_or_else(|| {
                DomainError::not_found(format!("comment {} not found", comment.id()))
            })?;

        updated.set_message(comment.message().to_string());
        tables.comments.replace(comment.id().value(), updated.clone());
        Ok(updated)
    }

    async fn soft_delete(&self, id: CommentId) -> Result<bool, DomainError> {
        Ok(self.write()?.comments.soft_delete(id.value()))
    }
}

#[async_trait]
impl SocialMediaRepository for InMemoryStore {
    async fn create(
        &self,
        owner: UserId,
        content: SocialMediaContent,
    ) -> Result<SocialMedia, DomainError> {
        let now = Utc::now();
        let mut tables = self.write()?;

        let created = tables.social_medias.insert_with(|id| {
            SocialMedia::from_parts(SocialMediaId::new(id), owner, content, now, now)
        });
        Ok(created.clone())
    }

    async fn get(&self, id: SocialMediaId) -> Result<Option<SocialMedia>, DomainError> {
        Ok(self.read()?.social_medias.get(id.value()).cloned())
    }

    async fn list_by_user(
        &self,
        user_id: UserId,
    ) -> Result<Vec<SocialMediaWithOwner>, DomainError> {
        let tables = self.read()?;

        Ok(tables
            .social_medias
            .live()
            .filter(|link| link.user_id() == user_id)
            .map(|link| SocialMediaWithOwner {
                social_media: link.clone(),
                user: tables.owner(link.user_id()),
            })
            .collect())
    }

    async fn update(&self, social_media: &SocialMedia) -> Result<SocialMedia, DomainError> {
        let mut tables = self.write()?;

        let mut updated = tables
            .social_medias
            .get(social_media.id().value())
            .cloned()
            .ok_or_else(|| {
                DomainError::not_found(format!("social media {} not found", social_media.id()))
            })?;

        updated.apply(social_media.content().clone());
        tables
            .social_medias
            .replace(social_media.id().value(), updated.clone());
        Ok(updated)
    }

    async fn soft_delete(&self, id: SocialMediaId) -> Result<bool, DomainError> {
        Ok(self.write()?.social_medias.soft_delete(id.value()))
    }
}
