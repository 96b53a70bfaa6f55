//! In-memory collaborators with fault injection for service tests.

use crate::cache::{CacheInterface, MemoryCache};
use async_trait::async_trait;
use chrono::Utc;
use orderly_core::{NewOrder, Order, OrderId, OrderlyError, OrderlyResult, User, UserId};
use orderly_repository::{OrderRepository, UserRepository};
use parking_lot::Mutex;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::time::Duration;

/// User store whose uniqueness check and insert happen under one lock, like a
/// unique index.
#[derive(Default)]
pub struct InMemoryUserRepository {
    users: Mutex<Vec<User>>,
    latency: Mutex<Duration>,
    fail_reads: AtomicBool,
    fail_writes: AtomicBool,
    hide_from_email_lookup: AtomicBool,
    find_by_id_calls: AtomicUsize,
    find_by_email_calls: AtomicUsize,
}

impl InMemoryUserRepository {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.users.lock().len()
    }

    pub fn get(&self, id: UserId) -> Option<User> {
        self.users.lock().iter().find(|u| u.id == id).cloned()
    }

    pub fn fail_reads(&self, fail: bool) {
        self.fail_reads.store(fail, Ordering::SeqCst);
    }

    pub fn fail_writes(&self, fail: bool) {
        self.fail_writes.store(fail, Ordering::SeqCst);
    }

    /// Makes `find_by_email` miss, simulating a concurrent insert landing
    /// between the fast check and the write.
    pub fn hide_from_email_lookup(&self, hide: bool) {
        self.hide_from_email_lookup.store(hide, Ordering::SeqCst);
    }

    pub fn set_latency(&self, latency: Duration) {
        *self.latency.lock() = latency;
    }

    pub fn find_by_id_calls(&self) -> usize {
        self.find_by_id_calls.load(Ordering::SeqCst)
    }

    pub fn find_by_email_calls(&self) -> usize {
        self.find_by_email_calls.load(Ordering::SeqCst)
    }

    async fn delay(&self) {
        let latency = *self.latency.lock();
        if !latency.is_zero() {
            tokio::time::sleep(latency).await;
        }
    }

    fn check_reads(&self) -> OrderlyResult<()> {
        if self.fail_reads.load(Ordering::SeqCst) {
            return Err(OrderlyError::Database("connection reset".to_string()));
        }
        Ok(())
    }
}

#[async_trait]
impl UserRepository for InMemoryUserRepository {
    async fn create_user(&self, email: &str, password_hash: &str) -> OrderlyResult<User> {
        self.delay().await;
        if self.fail_writes.load(Ordering::SeqCst) {
            return Err(OrderlyError::Database("write failed".to_string()));
        }

        let mut users = self.users.lock();
        if users.iter().any(|u| u.email == email) {
            return Err(OrderlyError::already_exists(format!(
                "Email '{email}' already exists"
            )));
        }

        let user = User {
            id: UserId::new(users.len() as i64 + 1),
            email: email.to_string(),
            password_hash: password_hash.to_string(),
            created_at: Utc::now(),
        };
        users.push(user.clone());
        Ok(user)
    }

    async fn find_by_id(&self, id: UserId) -> OrderlyResult<Option<User>> {
        self.find_by_id_calls.fetch_add(1, Ordering::SeqCst);
        self.delay().await;
        self.check_reads()?;
        Ok(self.get(id))
    }

    async fn find_by_email(&self, email: &str) -> OrderlyResult<Option<User>> {
        self.find_by_email_calls.fetch_add(1, Ordering::SeqCst);
        self.delay().await;
        self.check_reads()?;
        if self.hide_from_email_lookup.load(Ordering::SeqCst) {
            return Ok(None);
        }
        Ok(self.users.lock().iter().find(|u| u.email == email).cloned())
    }
}

/// Order store that records every insert.
#[derive(Default)]
pub struct InMemoryOrderRepository {
    orders: Mutex<Vec<Order>>,
    fail_writes: AtomicBool,
}

impl InMemoryOrderRepository {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn orders(&self) -> Vec<Order> {
        self.orders.lock().clone()
    }

    pub fn fail_writes(&self, fail: bool) {
        self.fail_writes.store(fail, Ordering::SeqCst);
    }
}

#[async_trait]
impl OrderRepository for InMemoryOrderRepository {
    async fn create_order(&self, order: &NewOrder) -> OrderlyResult<Order> {
        if self.fail_writes.load(Ordering::SeqCst) {
            return Err(OrderlyError::Database("write failed".to_string()));
        }

        let mut orders = self.orders.lock();
        let created = Order {
            id: OrderId::new(orders.len() as i64 + 1),
            user_id: order.user_id,
            product: order.product.clone(),
            quantity: order.quantity,
            created_at: Utc::now(),
        };
        orders.push(created.clone());
        Ok(created)
    }
}

/// Memory cache whose operations can be made to fail individually.
#[derive(Default)]
pub struct FlakyCache {
    inner: MemoryCache,
    fail_get: AtomicBool,
    fail_set: AtomicBool,
    fail_delete: AtomicBool,
    get_calls: AtomicUsize,
    set_calls: AtomicUsize,
    delete_calls: AtomicUsize,
}

impl FlakyCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// The backing cache, bypassing fault injection and call counting.
    pub fn inner(&self) -> &MemoryCache {
        &self.inner
    }

    pub fn fail_get(&self, fail: bool) {
        self.fail_get.store(fail, Ordering::SeqCst);
    }

    pub fn fail_set(&self, fail: bool) {
        self.fail_set.store(fail, Ordering::SeqCst);
    }

    pub fn fail_delete(&self, fail: bool) {
        self.fail_delete.store(fail, Ordering::SeqCst);
    }

    pub fn fail_all(&self) {
        self.fail_get(true);
        self.fail_set(true);
        self.fail_delete(true);
    }

    pub fn get_calls(&self) -> usize {
        self.get_calls.load(Ordering::SeqCst)
    }

    pub fn set_calls(&self) -> usize {
        self.set_calls.load(Ordering::SeqCst)
    }

    pub fn delete_calls(&self) -> usize {
        self.delete_calls.load(Ordering::SeqCst)
    }
}

fn unavailable() -> OrderlyError {
    OrderlyError::Cache("connection refused".to_string())
}

#[async_trait]
impl CacheInterface for FlakyCache {
    async fn get_raw(&self, key: &str) -> OrderlyResult<Option<String>> {
        self.get_calls.fetch_add(1, Ordering::SeqCst);
        if self.fail_get.load(Ordering::SeqCst) {
            return Err(unavailable());
        }
        self.inner.get_raw(key).await
    }

    async fn set_raw(&self, key: &str, value: &str, ttl: Duration) -> OrderlyResult<()> {
        self.set_calls.fetch_add(1, Ordering::SeqCst);
        if self.fail_set.load(Ordering::SeqCst) {
            return Err(unavailable());
        }
        self.inner.set_raw(key, value, ttl).await
    }

    async fn delete(&self, key: &str) -> OrderlyResult<bool> {
        self.delete_calls.fetch_add(1, Ordering::SeqCst);
        if self.fail_delete.load(Ordering::SeqCst) {
            return Err(unavailable());
        }
        self.inner.delete(key).await
    }
}
