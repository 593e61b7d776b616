//! Invoice record storage.

use std::collections::HashMap;
use std::sync::Arc;
use std::sync::RwLock;

use ledgerline_core::{DomainError, DomainResult, InvoiceId, UserId};
use ledgerline_invoicing::Invoice;

/// Storage abstraction for invoice records.
///
/// Lookups are id-based and unaware of ownership; per-user visibility is the
/// manager's concern. `list_for_user` returns records newest first.
pub trait InvoiceStore: Send + Sync {
    fn insert(&self, invoice: Invoice) -> DomainResult<()>;
    fn get(&self, id: InvoiceId) -> Option<Invoice>;
    fn list_for_user(&self, user_id: UserId) -> Vec<Invoice>;
    fn update(&self, invoice: Invoice) -> DomainResult<()>;
    fn remove(&self, id: InvoiceId) -> Option<Invoice>;
}

impl<S> InvoiceStore for Arc<S>
where
    S: InvoiceStore + ?Sized,
{
    fn insert(&self, invoice: Invoice) -> DomainResult<()> {
        (**self).insert(invoice)
    }

    fn get(&self, id: InvoiceId) -> Option<Invoice> {
        (**self).get(id)
    }

    fn list_for_user(&self, user_id: UserId) -> Vec<Invoice> {
        (**self).list_for_user(user_id)
    }

    fn update(&self, invoice: Invoice) -> DomainResult<()> {
        (**self).update(invoice)
    }

    fn remove(&self, id: InvoiceId) -> Option<Invoice> {
        (**self).remove(id)
    }
}

/// In-memory invoice store for tests/dev.
#[derive(Debug)]
pub struct InMemoryInvoiceStore {
    inner: RwLock<HashMap<InvoiceId, Invoice>>,
}

impl InMemoryInvoiceStore {
    pub fn new() -> Self {
        Self {
            inner: RwLock::new(HashMap::new()),
        }
    }

    // A poisoned lock still guards a valid map; recover it rather than
    // report every record missing.
    fn read(&self) -> std::sync::RwLockReadGuard<'_, HashMap<InvoiceId, Invoice>> {
        self.inner.read().unwrap_or_else(|e| e.into_inner())
    }

    fn write(&self) -> std::sync::RwLockWriteGuard<'_, HashMap<InvoiceId, Invoice>> {
        self.inner.write().unwrap_or_else(|e| e.into_inner())
    }
}

impl Default for InMemoryInvoiceStore {
    fn default() -> Self {
        Self::new()
    }
}

impl InvoiceStore for InMemoryInvoiceStore {
    fn insert(&self, invoice: Invoice) -> DomainResult<()> {
        let mut map = self.write();
        if map.contains_key(&invoice.id) {
            return Err(DomainError::conflict("invoice already exists"));
        }
        map.insert(invoice.id, invoice);
        Ok(())
    }

    fn get(&self, id: InvoiceId) -> Option<Invoice> {
        self.read().get(&id).cloned()
    }

    fn list_for_user(&self, user_id: UserId) -> Vec<Invoice> {
        let map = self.read();
        let mut records: Vec<Invoice> = map
            .values()
            .filter(|invoice| invoice.user_id == user_id)
            .cloned()
            .collect();
        // v7 ids are time-ordered; newest first.
        records.sort_by(|a, b| b.id.as_uuid().cmp(a.id.as_uuid()));
        records
    }

    fn update(&self, invoice: Invoice) -> DomainResult<()> {
        let mut map = self.write();
        if !map.contains_key(&invoice.id) {
            return Err(DomainError::not_found());
        }
        map.insert(invoice.id, invoice);
        Ok(())
    }

    fn remove(&self, id: InvoiceId) -> Option<Invoice> {
        self.write().remove(&id)
    }
}
