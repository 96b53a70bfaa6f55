//! User service implementation.

use crate::cache::{cache_aside, cache_keys, CacheInterface};
use crate::dto::{CreateUserRequest, UserResponse};
use crate::user_service::UserService;
use async_trait::async_trait;
use orderly_core::{CallContext, OrderlyError, OrderlyResult, UserId, ValidateExt};
use orderly_repository::UserRepository;
use orderly_security::PasswordHasherInterface;
use std::sync::Arc;
use tracing::{debug, info, instrument};

/// User service over a store, a cache, and a password hasher.
pub struct UserServiceImpl {
    user_repository: Arc<dyn UserRepository>,
    cache: Arc<dyn CacheInterface>,
    password_hasher: Arc<dyn PasswordHasherInterface>,
}

impl UserServiceImpl {
    /// Creates a new user service.
    pub fn new(
        user_repository: Arc<dyn UserRepository>,
        cache: Arc<dyn CacheInterface>,
        password_hasher: Arc<dyn PasswordHasherInterface>,
    ) -> Self {
        Self {
            user_repository,
            cache,
            password_hasher,
        }
    }

    async fn hash_password(&self, ctx: &CallContext, password: String) -> OrderlyResult<String> {
        let hasher = Arc::clone(&self.password_hasher);
        ctx.run(async move {
            tokio::task::spawn_blocking(move || hasher.hash(&password))
                .await
                .map_err(|e| OrderlyError::internal(format!("Password hashing task failed: {e}")))?
        })
        .await
    }
}

#[async_trait]
impl UserService for UserServiceImpl {
    #[instrument(skip_all, fields(email = %request.email))]
    async fn create_user(&self, ctx: &CallContext, request: CreateUserRequest) -> OrderlyResult<UserId> {
        debug!("Creating user: {}", request.email);

        request.validate_request()?;

        // Fast path only; the store's unique index decides races.
        let existing = ctx
            .run(self.user_repository.find_by_email(&request.email))
            .await
            .map_err(OrderlyError::surface)?;
        if existing.is_some() {
            return Err(OrderlyError::already_exists(format!(
                "Email '{}' already exists",
                request.email
            )));
        }

        let password_hash = self.hash_password(ctx, request.password).await?;

        let user = ctx
            .run(self.user_repository.create_user(&request.email, &password_hash))
            .await
            .map_err(OrderlyError::surface)?;

        let response = UserResponse::from(user);
        cache_aside::populate(
            self.cache.as_ref(),
            ctx,
            &cache_keys::user(response.id),
            &response,
        )
        .await;

        info!("User created: {}", response.id);
        Ok(response.id)
    }

    #[instrument(skip_all, fields(user_id = %id))]
    async fn get_user(&self, ctx: &CallContext, id: UserId) -> OrderlyResult<UserResponse> {
        debug!("Getting user: {}", id);

        let id = id.ensure_positive()?;
        let key = cache_keys::user(id);

        if let Some(cached) = cache_aside::read::<UserResponse, _>(
            self.cache.as_ref(),
            ctx,
            &key,
            "user",
            |user| user.id == id,
        )
        .await?
        {
            return Ok(cached);
        }

        let found = ctx
            .run(self.user_repository.find_by_id(id))
            .await
            .map_err(OrderlyError::surface)?;

        let Some(user) = found else {
            cache_aside::invalidate(self.cache.as_ref(), ctx, &key).await;
            return Err(OrderlyError::not_found("User", id));
        };

        let response = UserResponse::from(user);
        cache_aside::populate(self.cache.as_ref(), ctx, &key, &response).await;

        Ok(response)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cache::{MemoryCache, CACHE_TTL};
    use crate::test_support::{FlakyCache, InMemoryUserRepository};
    use orderly_security::PasswordHasher;
    use std::time::Duration;

    struct Fixture {
        service: Arc<UserServiceImpl>,
        repository: Arc<InMemoryUserRepository>,
        cache: Arc<FlakyCache>,
    }

    fn fixture() -> Fixture {
        let repository = Arc::new(InMemoryUserRepository::new());
        let cache = Arc::new(FlakyCache::new());
        let service = Arc::new(UserServiceImpl::new(
            repository.clone(),
            cache.clone(),
            Arc::new(PasswordHasher::with_cost(1)),
        ));
        Fixture {
            service,
            repository,
            cache,
        }
    }

    fn request(email: &str) -> CreateUserRequest {
        CreateUserRequest {
            email: email.to_string(),
            password: "pw".to_string(),
        }
    }

    #[tokio::test]
    async fn test_create_then_get_round_trips() {
        let f = fixture();
        let ctx = CallContext::background();

        let id = f.service.create_user(&ctx, request("a@x.com")).await.unwrap();
        assert_eq!(id, UserId::new(1));

        // Served from cache.
        let user = f.service.get_user(&ctx, id).await.unwrap();
        assert_eq!(user.email, "a@x.com");
        assert_eq!(f.repository.find_by_id_calls(), 0);

        // Served from the store once the cache is gone.
        f.cache.inner().delete(&cache_keys::user(id)).await.unwrap();
        let user = f.service.get_user(&ctx, id).await.unwrap();
        assert_eq!(user.id, id);
        assert_eq!(user.email, "a@x.com");
        assert_eq!(f.repository.find_by_id_calls(), 1);
    }

    #[tokio::test]
    async fn test_create_stores_hash_not_password() {
        let f = fixture();
        let ctx = CallContext::background();

        let id = f.service.create_user(&ctx, request("a@x.com")).await.unwrap();
        let stored = f.repository.get(id).unwrap();
        assert_ne!(stored.password_hash, "pw");
        assert!(stored.password_hash.starts_with("$argon2id$"));

        let cached = f.cache.inner().get_raw(&cache_keys::user(id)).await.unwrap().unwrap();
        assert!(!cached.contains("argon2"));
        assert!(!cached.contains("password"));
    }

    #[tokio::test]
    async fn test_create_duplicate_email() {
        let f = fixture();
        let ctx = CallContext::background();

        f.service.create_user(&ctx, request("a@x.com")).await.unwrap();
        let err = f.service.create_user(&ctx, request("a@x.com")).await.unwrap_err();

        assert!(matches!(err, OrderlyError::AlreadyExists(_)));
        assert_eq!(f.repository.len(), 1);
    }

    #[tokio::test]
    async fn test_store_uniqueness_wins_race_past_fast_check() {
        let f = fixture();
        let ctx = CallContext::background();
        f.repository.hide_from_email_lookup(true);

        f.service.create_user(&ctx, request("a@x.com")).await.unwrap();
        let err = f.service.create_user(&ctx, request("a@x.com")).await.unwrap_err();

        assert!(matches!(err, OrderlyError::AlreadyExists(_)));
        assert_eq!(f.repository.len(), 1);
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 4)]
    async fn test_concurrent_creates_with_same_email() {
        let f = fixture();

        let handles: Vec<_> = (0..8)
            .map(|_| {
                let service = f.service.clone();
                tokio::spawn(async move {
                    service
                        .create_user(&CallContext::background(), request("race@x.com"))
                        .await
                })
            })
            .collect();

        let mut created = 0;
        let mut rejected = 0;
        for handle in handles {
            match handle.await.unwrap() {
                Ok(_) => created += 1,
                Err(OrderlyError::AlreadyExists(_)) => rejected += 1,
                Err(other) => panic!("unexpected error: {other}"),
            }
        }

        assert_eq!(created, 1);
        assert_eq!(rejected, 7);
        assert_eq!(f.repository.len(), 1);
    }

    #[tokio::test]
    async fn test_invalid_request_touches_nothing() {
        let f = fixture();
        let ctx = CallContext::background();

        let err = f.service.create_user(&ctx, request("not-an-email")).await.unwrap_err();

        assert!(matches!(err, OrderlyError::InvalidArgument(_)));
        assert_eq!(f.repository.find_by_email_calls(), 0);
    }

    #[tokio::test]
    async fn test_cache_set_failure_does_not_fail_create() {
        let f = fixture();
        let ctx = CallContext::background();
        f.cache.fail_set(true);

        let id = f.service.create_user(&ctx, request("a@x.com")).await.unwrap();

        assert!(f.repository.get(id).is_some());
        assert!(f.cache.inner().is_empty().await);
    }

    #[tokio::test]
    async fn test_store_failure_on_create_is_internal_and_cache_untouched() {
        let f = fixture();
        let ctx = CallContext::background();
        f.repository.fail_writes(true);

        let err = f.service.create_user(&ctx, request("a@x.com")).await.unwrap_err();

        assert!(matches!(err, OrderlyError::Internal(_)));
        assert_eq!(f.cache.set_calls(), 0);
    }

    #[tokio::test]
    async fn test_corrupt_entry_self_heals() {
        let f = fixture();
        let ctx = CallContext::background();
        let id = f.service.create_user(&ctx, request("a@x.com")).await.unwrap();
        let key = cache_keys::user(id);
        f.cache.inner().set_raw(&key, "{\"garbage\":", CACHE_TTL).await.unwrap();

        let user = f.service.get_user(&ctx, id).await.unwrap();

        assert_eq!(user.email, "a@x.com");
        let healed = f.cache.inner().get_raw(&key).await.unwrap().unwrap();
        assert_ne!(healed, "{\"garbage\":");
        let snapshot: UserResponse = serde_json::from_str(&healed).unwrap();
        assert_eq!(snapshot, user);
    }

    #[tokio::test]
    async fn test_snapshot_for_another_id_is_not_served() {
        let f = fixture();
        let ctx = CallContext::background();
        let first = f.service.create_user(&ctx, request("a@x.com")).await.unwrap();
        let second = f.service.create_user(&ctx, request("b@x.com")).await.unwrap();

        let wrong = f.cache.inner().get_raw(&cache_keys::user(second)).await.unwrap().unwrap();
        f.cache.inner().set_raw(&cache_keys::user(first), &wrong, CACHE_TTL).await.unwrap();

        let user = f.service.get_user(&ctx, first).await.unwrap();
        assert_eq!(user.email, "a@x.com");
    }

    #[tokio::test]
    async fn test_not_found_removes_stale_entry() {
        let f = fixture();
        let ctx = CallContext::background();
        let key = cache_keys::user(UserId::new(42));
        let stale = UserResponse {
            id: UserId::new(42),
            email: "ghost@x.com".to_string(),
            created_at: chrono::Utc::now(),
        };
        // A valid snapshot is served as-is; only a miss reaches the store.
        f.cache.fail_get(true);
        f.cache
            .inner()
            .set_raw(&key, &serde_json::to_string(&stale).unwrap(), CACHE_TTL)
            .await
            .unwrap();

        let err = f.service.get_user(&ctx, UserId::new(42)).await.unwrap_err();

        assert!(matches!(err, OrderlyError::NotFound { .. }));
        assert!(f.cache.inner().get_raw(&key).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_not_found_is_not_cached() {
        let f = fixture();
        let ctx = CallContext::background();

        for _ in 0..2 {
            let err = f.service.get_user(&ctx, UserId::new(7)).await.unwrap_err();
            assert!(err.is_not_found());
        }
        assert!(f.cache.inner().is_empty().await);
        assert_eq!(f.repository.find_by_id_calls(), 2);
    }

    #[tokio::test]
    async fn test_non_positive_id_is_invalid() {
        let f = fixture();
        let ctx = CallContext::background();

        let err = f.service.get_user(&ctx, UserId::new(0)).await.unwrap_err();

        assert!(matches!(err, OrderlyError::InvalidArgument(_)));
        assert_eq!(f.cache.get_calls(), 0);
    }

    #[tokio::test]
    async fn test_cache_outage_falls_back_to_store() {
        let f = fixture();
        let ctx = CallContext::background();
        let id = f.service.create_user(&ctx, request("a@x.com")).await.unwrap();
        f.cache.fail_all();

        let user = f.service.get_user(&ctx, id).await.unwrap();

        assert_eq!(user.email, "a@x.com");
        assert_eq!(f.repository.find_by_id_calls(), 1);
    }

    #[tokio::test]
    async fn test_store_read_failure_is_internal_and_cache_untouched() {
        let f = fixture();
        let ctx = CallContext::background();
        let id = f.service.create_user(&ctx, request("a@x.com")).await.unwrap();
        f.cache.inner().delete(&cache_keys::user(id)).await.unwrap();
        f.repository.fail_reads(true);
        let sets_before = f.cache.set_calls();

        let err = f.service.get_user(&ctx, id).await.unwrap_err();

        assert!(matches!(err, OrderlyError::Internal(_)));
        assert_eq!(f.cache.set_calls(), sets_before);
        assert_eq!(f.cache.delete_calls(), 0);
    }

    #[tokio::test]
    async fn test_entries_are_written_with_cache_ttl() {
        let f = fixture();
        let ctx = CallContext::background();
        let id = f.service.create_user(&ctx, request("a@x.com")).await.unwrap();
        let key = cache_keys::user(id);
        assert_eq!(f.cache.inner().ttl_of(&key).await, Some(CACHE_TTL));

        f.cache.inner().delete(&key).await.unwrap();
        f.service.get_user(&ctx, id).await.unwrap();
        assert_eq!(f.cache.inner().ttl_of(&key).await, Some(CACHE_TTL));
    }

    #[tokio::test(start_paused = true)]
    async fn test_slow_store_is_cancelled_by_deadline() {
        let f = fixture();
        let id = f
            .service
            .create_user(&CallContext::background(), request("a@x.com"))
            .await
            .unwrap();
        f.cache.inner().delete(&cache_keys::user(id)).await.unwrap();
        f.repository.set_latency(Duration::from_secs(5));

        let ctx = CallContext::with_timeout(Duration::from_millis(100));
        let err = f.service.get_user(&ctx, id).await.unwrap_err();

        assert!(matches!(err, OrderlyError::Cancelled(_)));
        assert!(f.cache.inner().is_empty().await);
    }

    #[tokio::test]
    async fn test_cancelled_before_start() {
        let f = fixture();
        let ctx = CallContext::background();
        ctx.cancel();

        let err = f.service.create_user(&ctx, request("a@x.com")).await.unwrap_err();

        assert!(err.is_cancelled());
        assert_eq!(f.repository.len(), 0);
    }

    #[tokio::test]
    async fn test_plain_memory_cache_works() {
        let repository = Arc::new(InMemoryUserRepository::new());
        let service = UserServiceImpl::new(
            repository,
            Arc::new(MemoryCache::new()),
            Arc::new(PasswordHasher::with_cost(1)),
        );
        let ctx = CallContext::background();

        let id = service.create_user(&ctx, request("a@x.com")).await.unwrap();
        assert_eq!(service.get_user(&ctx, id).await.unwrap().email, "a@x.com");
    }
}
