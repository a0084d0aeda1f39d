//! In-process store for development and tests.

use async_trait::async_trait;
use serde_json::json;
use tokio::sync::RwLock;

use crate::domain::entities::{AccessRecord, NewUrl, NewUser, Url, User};
use crate::domain::queries::{Page, RecordId, UrlQuery, UserQuery};
use crate::domain::repositories::{
    InsertResult, URLS_CODE_CONSTRAINT, URLS_OWNER_LONG_URL_CONSTRAINT, USERS_API_KEY_CONSTRAINT,
    USERS_EMAIL_CONSTRAINT, UrlRepository, UserRepository,
};
use crate::error::AppError;

#[derive(Debug, Default)]
struct Tables {
    users: Vec<User>,
    urls: Vec<Url>,
    last_user_id: i64,
    last_url_id: i64,
}

/// In-memory implementation of both repository traits.
///
/// A single lock guards both tables, so each check-and-insert is atomic and
/// reports the same constraint names as the PostgreSQL schema.
#[derive(Debug, Default)]
pub struct InMemoryStore {
    tables: RwLock<Tables>,
}

impl InMemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl UrlRepository for InMemoryStore {
    async fn find_one_url(&self, query: &UrlQuery) -> Result<Option<Url>, AppError> {
        query.validate()?;

        let tables = self.tables.read().await;

        Ok(tables
            .urls
            .iter()
            .filter(|url| query.matches(url))
            .max_by_key(|url| (url.created_at, url.id))
            .cloned())
    }

    async fn find_urls(&self, owner: RecordId, page: Page) -> Result<Vec<Url>, AppError> {
        let tables = self.tables.read().await;

        let mut owned: Vec<&Url> = tables
            .urls
            .iter()
            .filter(|url| url.created_by == owner)
            .collect();
        owned.sort_by(|a, b| (b.created_at, b.id).cmp(&(a.created_at, a.id)));

        Ok(owned
            .into_iter()
            .skip(page.offset() as usize)
            .take(page.limit() as usize)
            .cloned()
            .collect())
    }

    async fn insert_url(&self, new_url: NewUrl) -> Result<InsertResult, AppError> {
        let mut tables = self.tables.write().await;

        if tables.urls.iter().any(|url| url.code == new_url.code) {
            return Err(AppError::duplicate_key(
                URLS_CODE_CONSTRAINT,
                json!({ "code": new_url.code }),
            ));
        }

        if !new_url.explicit_code
            && tables.urls.iter().any(|url| {
                !url.explicit_code
                    && url.created_by == new_url.created_by
                    && url.long_url == new_url.long_url
            })
        {
            return Err(AppError::duplicate_key(
                URLS_OWNER_LONG_URL_CONSTRAINT,
                json!({ "long_url": new_url.long_url }),
            ));
        }

        tables.last_url_id += 1;
        let id = RecordId::new(tables.last_url_id);
        tables.urls.push(new_url.into_url(id));

        Ok(InsertResult::with_id(id))
    }

    async fn append_url_access(
        &self,
        url_id: RecordId,
        record: AccessRecord,
    ) -> Result<(), AppError> {
        let mut tables = self.tables.write().await;

        let url = tables
            .urls
            .iter_mut()
            .find(|url| url.id == url_id)
            .ok_or_else(|| AppError::not_found("URL not found", json!({ "id": url_id.get() })))?;

        url.url_access.push(record);
        Ok(())
    }
}

#[async_trait]
impl UserRepository for InMemoryStore {
    async fn insert_user(&self, new_user: NewUser) -> Result<InsertResult, AppError> {
        let mut tables = self.tables.write().await;

        if tables.users.iter().any(|user| user.email == new_user.email) {
            return Err(AppError::duplicate_key(
                USERS_EMAIL_CONSTRAINT,
                json!({ "email": new_user.email }),
            ));
        }

        if tables.users.iter().any(|user| user.api_key == new_user.api_key) {
            return Err(AppError::duplicate_key(USERS_API_KEY_CONSTRAINT, json!({})));
        }

        tables.last_user_id += 1;
        let id = RecordId::new(tables.last_user_id);
        tables.users.push(new_user.into_user(id));

        Ok(InsertResult::with_id(id))
    }

    async fn find_one_user(&self, query: &UserQuery) -> Result<Option<User>, AppError> {
        query.validate()?;

        let tables = self.tables.read().await;

        Ok(tables.users.iter().find(|user| query.matches(user)).cloned())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, Utc};
    use std::sync::Arc;

    fn new_url(code: &str, long_url: &str, explicit: bool, owner: i64) -> NewUrl {
        NewUrl::compose(
            "http://sho.rt",
            code.to_string(),
            long_url.to_string(),
            explicit,
            RecordId::new(owner),
        )
    }

    #[tokio::test]
    async fn test_insert_and_find_url() {
        let store = InMemoryStore::new();

        let result = store
            .insert_url(new_url("abc", "http://example.com", false, 1))
            .await
            .unwrap();
        let id = result.inserted_id.unwrap();

        let found = store
            .find_one_url(&UrlQuery::ByCode("abc".to_string()))
            .await
            .unwrap()
            .unwrap();

        assert_eq!(found.id, id);
        assert_eq!(found.short_url, "http://sho.rt/abc");
        assert!(found.url_access.is_empty());

        let by_short = store
            .find_one_url(&UrlQuery::ByOwnerAndShortUrl {
                owner: RecordId::new(1),
                short_url: "http://sho.rt/abc".to_string(),
            })
            .await
            .unwrap();
        assert!(by_short.is_some());

        let other_owner = store
            .find_one_url(&UrlQuery::ByOwnerAndCode {
                owner: RecordId::new(2),
                code: "abc".to_string(),
            })
            .await
            .unwrap();
        assert!(other_owner.is_none());
    }

    #[tokio::test]
    async fn test_code_is_globally_unique() {
        let store = InMemoryStore::new();

        store
            .insert_url(new_url("abc", "http://a.com", true, 1))
            .await
            .unwrap();

        let err = store
            .insert_url(new_url("abc", "http://b.com", true, 2))
            .await
            .unwrap_err();

        assert!(err.is_duplicate_on(URLS_CODE_CONSTRAINT));
    }

    #[tokio::test]
    async fn test_long_url_unique_per_owner_for_generated_codes() {
        let store = InMemoryStore::new();

        store
            .insert_url(new_url("aaa", "http://a.com", false, 1))
            .await
            .unwrap();

        let err = store
            .insert_url(new_url("bbb", "http://a.com", false, 1))
            .await
            .unwrap_err();
        assert!(err.is_duplicate_on(URLS_OWNER_LONG_URL_CONSTRAINT));

        // Different owner, or an explicit code, is allowed.
        store
            .insert_url(new_url("ccc", "http://a.com", false, 2))
            .await
            .unwrap();
        store
            .insert_url(new_url("ddd", "http://a.com", true, 1))
            .await
            .unwrap();
    }

    #[tokio::test]
    async fn test_find_urls_newest_first_paged() {
        let store = InMemoryStore::new();
        let base = Utc::now();

        for i in 0..11 {
            let mut url = new_url(&format!("code{i}"), &format!("http://site{i}.com"), false, 1);
            url.created_at = base + Duration::seconds(i);
            store.insert_url(url).await.unwrap();
        }
        store
            .insert_url(new_url("foreign", "http://foreign.com", false, 2))
            .await
            .unwrap();

        let owner = RecordId::new(1);

        let first = store.find_urls(owner, Page::FIRST).await.unwrap();
        let codes: Vec<&str> = first.iter().map(|u| u.code.as_str()).collect();
        assert_eq!(codes, vec!["code10", "code9", "code8", "code7", "code6"]);

        let third = store
            .find_urls(owner, Page::parse(Some("3")).unwrap())
            .await
            .unwrap();
        assert_eq!(third.len(), 1);
        assert_eq!(third[0].code, "code0");

        let fourth = store
            .find_urls(owner, Page::parse(Some("4")).unwrap())
            .await
            .unwrap();
        assert!(fourth.is_empty());
    }

    #[tokio::test]
    async fn test_append_url_access() {
        let store = Arc::new(InMemoryStore::new());

        let id = store
            .insert_url(new_url("abc", "http://a.com", false, 1))
            .await
            .unwrap()
            .inserted_id
            .unwrap();

        let handles: Vec<_> = (0..20)
            .map(|_| {
                let store = store.clone();
                tokio::spawn(async move { store.append_url_access(id, AccessRecord::now()).await })
            })
            .collect();

        for handle in handles {
            handle.await.unwrap().unwrap();
        }

        let url = store
            .find_one_url(&UrlQuery::ById(id))
            .await
            .unwrap()
            .unwrap();
        assert_eq!(url.total_accesses(), 20);
    }

    #[tokio::test]
    async fn test_append_url_access_unknown_id() {
        let store = InMemoryStore::new();

        let err = store
            .append_url_access(RecordId::new(42), AccessRecord::now())
            .await
            .unwrap_err();

        assert!(matches!(err, AppError::NotFound { .. }));
    }

    #[tokio::test]
    async fn test_user_constraints() {
        let store = InMemoryStore::new();

        store
            .insert_user(NewUser::new("a@b.com".to_string(), "key-1".to_string()))
            .await
            .unwrap();

        let err = store
            .insert_user(NewUser::new("a@b.com".to_string(), "key-2".to_string()))
            .await
            .unwrap_err();
        assert!(err.is_duplicate_on(USERS_EMAIL_CONSTRAINT));

        let err = store
            .insert_user(NewUser::new("c@d.com".to_string(), "key-1".to_string()))
            .await
            .unwrap_err();
        assert!(err.is_duplicate_on(USERS_API_KEY_CONSTRAINT));

        let user = store
            .find_one_user(&UserQuery::ByApiKey("key-1".to_string()))
            .await
            .unwrap()
            .unwrap();
        assert_eq!(user.email, "a@b.com");
    }

    #[tokio::test]
    async fn test_empty_query_field_is_rejected() {
        let store = InMemoryStore::new();

        let err = store
            .find_one_url(&UrlQuery::ByCode(String::new()))
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::InvalidQuery { .. }));

        let err = store
            .find_one_user(&UserQuery::ByEmail(String::new()))
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::InvalidQuery { .. }));
    }
}
